#[derive(Debug)]
pub enum TokenRepositoryError {
    Io(String),
    Serialization(String),
}

impl std::fmt::Display for TokenRepositoryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TokenRepositoryError::Io(msg) => write!(f, "Token store I/O error: {}", msg),
            TokenRepositoryError::Serialization(msg) => {
                write!(f, "Token store serialization error: {}", msg)
            }
        }
    }
}

impl std::error::Error for TokenRepositoryError {}
