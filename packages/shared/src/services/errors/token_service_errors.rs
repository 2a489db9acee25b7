use std::fmt;

/// Failure to obtain a bureau access token.
#[derive(Debug)]
pub enum TokenServiceError {
    Request(String),
    UnexpectedStatus { status: u16, body: String },
    Decode(String),
    MissingAccessToken,
}

impl fmt::Display for TokenServiceError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            TokenServiceError::Request(msg) => write!(f, "Token request failed: {}", msg),
            TokenServiceError::UnexpectedStatus { status, body } => {
                write!(f, "Token request failed with status {}: {}", status, body)
            }
            TokenServiceError::Decode(msg) => write!(f, "Invalid token response: {}", msg),
            TokenServiceError::MissingAccessToken => {
                write!(f, "No se pudo obtener el access_token de la respuesta")
            }
        }
    }
}

impl std::error::Error for TokenServiceError {}
