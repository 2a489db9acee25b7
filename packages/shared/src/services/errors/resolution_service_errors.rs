use std::fmt;

use crate::models::national_id::NationalIdError;
use crate::services::errors::bureau_service_errors::BureauServiceError;

/// Errors surfaced by the resolution pipeline. Historical-source failures
/// never appear here.
#[derive(Debug)]
pub enum ResolutionServiceError {
    ValidationError(NationalIdError),
    Bureau(BureauServiceError),
}

impl fmt::Display for ResolutionServiceError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ResolutionServiceError::ValidationError(err) => write!(f, "{}", err),
            ResolutionServiceError::Bureau(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for ResolutionServiceError {}

impl From<NationalIdError> for ResolutionServiceError {
    fn from(err: NationalIdError) -> Self {
        ResolutionServiceError::ValidationError(err)
    }
}

impl From<BureauServiceError> for ResolutionServiceError {
    fn from(err: BureauServiceError) -> Self {
        ResolutionServiceError::Bureau(err)
    }
}
