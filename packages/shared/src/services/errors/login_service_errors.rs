use std::fmt;

#[derive(Debug)]
pub enum LoginServiceError {
    ValidationError(String),
    /// The authentication service answered `success: false`.
    Rejected(String),
    Request(String),
    InvalidResponse(String),
}

impl fmt::Display for LoginServiceError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            LoginServiceError::ValidationError(msg) => write!(f, "{}", msg),
            LoginServiceError::Rejected(msg) => write!(f, "{}", msg),
            LoginServiceError::Request(msg) => write!(f, "Error de conexión: {}", msg),
            LoginServiceError::InvalidResponse(msg) => write!(f, "Error de conexión: {}", msg),
        }
    }
}

impl std::error::Error for LoginServiceError {}
