pub mod auth;
pub mod demographic;
pub mod national_id;
pub mod token;
