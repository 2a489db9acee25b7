use std::fmt;

#[derive(Debug)]
pub enum HistoricalServiceError {
    Request(String),
    Api { status: u16, body: String },
    Decode(String),
}

impl fmt::Display for HistoricalServiceError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            HistoricalServiceError::Request(msg) => {
                write!(f, "Historical request failed: {}", msg)
            }
            HistoricalServiceError::Api { status, body } => {
                write!(f, "HistoEqx API Error {}: {}", status, body)
            }
            HistoricalServiceError::Decode(msg) => {
                write!(f, "Invalid historical response: {}", msg)
            }
        }
    }
}

impl std::error::Error for HistoricalServiceError {}
