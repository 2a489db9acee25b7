pub mod bureau_service_errors;
pub mod historical_service_errors;
pub mod login_service_errors;
pub mod resolution_service_errors;
pub mod token_service_errors;
