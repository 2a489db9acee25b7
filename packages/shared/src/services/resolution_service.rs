use std::sync::Arc;

use tracing::{info, warn};

use crate::demographics::has_usable_mobile;
use crate::models::demographic::{RecordSource, Resolution};
use crate::models::national_id::NationalId;
use crate::services::bureau_service::BureauClient;
use crate::services::errors::resolution_service_errors::ResolutionServiceError;
use crate::services::historical_service::HistoricalClient;

/// Historical source first; the bureau only when the historical record is
/// missing, failed, or has no usable mobile number.
pub struct ResolutionService {
    historical: Arc<dyn HistoricalClient>,
    bureau: Arc<dyn BureauClient>,
}

impl ResolutionService {
    pub fn new(historical: Arc<dyn HistoricalClient>, bureau: Arc<dyn BureauClient>) -> Self {
        ResolutionService { historical, bureau }
    }

    /// Validates the raw input before any lookup.
    pub async fn resolve_cedula(&self, cedula: &str) -> Result<Resolution, ResolutionServiceError> {
        let national_id = NationalId::parse(cedula)?;
        self.resolve(&national_id).await
    }

    pub async fn resolve(
        &self,
        national_id: &NationalId,
    ) -> Result<Resolution, ResolutionServiceError> {
        match self.historical.fetch_historical(national_id.as_str()).await {
            Ok(Some(record)) if has_usable_mobile(&record) => {
                info!("Resolved {} from the historical source", national_id);
                return Ok(Resolution {
                    source: RecordSource::Historical,
                    record,
                });
            }
            Ok(Some(_)) => {
                info!(
                    "Historical record for {} has no usable mobile number, querying bureau",
                    national_id
                );
            }
            Ok(None) => {
                info!("No historical record for {}, querying bureau", national_id);
            }
            Err(e) => {
                warn!(
                    "Historical lookup for {} failed, querying bureau: {}",
                    national_id, e
                );
            }
        }

        let record = self.bureau.fetch_demographics(national_id.as_str()).await?;
        info!("Resolved {} from the bureau", national_id);
        Ok(Resolution {
            source: RecordSource::Bureau,
            record,
        })
    }
}
