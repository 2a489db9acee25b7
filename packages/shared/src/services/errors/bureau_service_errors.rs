use std::fmt;

use crate::services::errors::token_service_errors::TokenServiceError;

#[derive(Debug)]
pub enum BureauServiceError {
    ValidationError(String),
    Token(TokenServiceError),
    Request(String),
    Api { status: u16, body: String },
    /// The bureau still answered 401 after one forced token refresh.
    Unauthorized,
    Decode(String),
}

impl fmt::Display for BureauServiceError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            BureauServiceError::ValidationError(msg) => write!(f, "Validation error: {}", msg),
            BureauServiceError::Token(err) => write!(f, "{}", err),
            BureauServiceError::Request(msg) => write!(f, "Bureau request failed: {}", msg),
            BureauServiceError::Api { status, body } => {
                write!(f, "API Error {}: {}", status, body)
            }
            BureauServiceError::Unauthorized => {
                write!(f, "Bureau rejected the request after refreshing the token")
            }
            BureauServiceError::Decode(msg) => write!(f, "Invalid bureau response: {}", msg),
        }
    }
}

impl std::error::Error for BureauServiceError {}

impl From<TokenServiceError> for BureauServiceError {
    fn from(err: TokenServiceError) -> Self {
        BureauServiceError::Token(err)
    }
}
