pub mod config;
pub mod demographics;
pub mod models;
pub mod repositories;
pub mod services;
