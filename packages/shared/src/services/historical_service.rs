use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tracing::debug;

use crate::config::AppConfig;
use crate::models::demographic::DemographicRecord;
use crate::services::errors::historical_service_errors::HistoricalServiceError;

#[cfg(test)]
use mockall::automock;

#[cfg_attr(test, automock)]
#[async_trait]
pub trait HistoricalClient: Send + Sync {
    /// `Ok(None)` when the service has no record for the id.
    async fn fetch_historical(
        &self,
        national_id: &str,
    ) -> Result<Option<DemographicRecord>, HistoricalServiceError>;
}

/// Previously captured bureau data, served without authentication.
pub struct HistoricalService {
    http: Client,
    base_url: String,
}

impl HistoricalService {
    pub fn new(http: Client, config: &AppConfig) -> Self {
        HistoricalService {
            http,
            base_url: config.historical_api_url.trim_end_matches('/').to_string(),
        }
    }

    fn lookup_url(&self, national_id: &str) -> String {
        format!(
            "{}/api/apisidesoft/EquifaxConsulta/{}",
            self.base_url, national_id
        )
    }
}

/// Takes the record out of its `{datos: {respuesta: ...}}` envelope.
pub fn unwrap_envelope(mut payload: Value) -> Option<DemographicRecord> {
    let record = payload.get_mut("datos")?.get_mut("respuesta")?.take();
    if record.is_null() {
        None
    } else {
        Some(record)
    }
}

#[async_trait]
impl HistoricalClient for HistoricalService {
    async fn fetch_historical(
        &self,
        national_id: &str,
    ) -> Result<Option<DemographicRecord>, HistoricalServiceError> {
        let response = self
            .http
            .get(self.lookup_url(national_id))
            .send()
            .await
            .map_err(|e| HistoricalServiceError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(HistoricalServiceError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let payload: Value = response
            .json()
            .await
            .map_err(|e| HistoricalServiceError::Decode(e.to_string()))?;
        let record = unwrap_envelope(payload);
        debug!("Historical lookup found a record: {}", record.is_some());
        Ok(record)
    }
}
