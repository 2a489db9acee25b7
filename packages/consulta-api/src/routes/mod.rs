pub mod auth;
pub mod demographics;
pub mod health;
