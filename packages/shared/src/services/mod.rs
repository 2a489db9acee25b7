pub mod bureau_service;
pub mod errors;
pub mod historical_service;
pub mod login_service;
pub mod resolution_service;
pub mod token_service;
