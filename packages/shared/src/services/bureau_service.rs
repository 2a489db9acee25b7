use std::sync::Arc;

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use tracing::{debug, error, warn};

use crate::config::{AppConfig, ProductConfig};
use crate::models::demographic::{BureauLookupRequest, DemographicRecord};
use crate::models::token::AccessToken;
use crate::services::errors::bureau_service_errors::BureauServiceError;
use crate::services::token_service::TokenProvider;

#[cfg(test)]
use mockall::automock;

#[cfg_attr(test, automock)]
#[async_trait]
pub trait BureauClient: Send + Sync {
    async fn fetch_demographics(
        &self,
        national_id: &str,
    ) -> Result<DemographicRecord, BureauServiceError>;
}

/// Decision-orchestration lookup against the credit bureau.
pub struct BureauService {
    tokens: Arc<dyn TokenProvider>,
    http: Client,
    lookup_url: String,
    product: ProductConfig,
}

impl BureauService {
    pub fn new(tokens: Arc<dyn TokenProvider>, http: Client, config: &AppConfig) -> Self {
        BureauService {
            tokens,
            http,
            lookup_url: format!(
                "{}/business/interconnect/v1/decision-orchestrations/execute",
                config.bureau_api_url.trim_end_matches('/')
            ),
            product: config.product.clone(),
        }
    }

    async fn send_lookup(
        &self,
        national_id: &str,
        token: &AccessToken,
    ) -> Result<Response, BureauServiceError> {
        self.http
            .post(&self.lookup_url)
            .bearer_auth(&token.value)
            .json(&BureauLookupRequest::new(national_id, &self.product))
            .send()
            .await
            .map_err(|e| BureauServiceError::Request(e.to_string()))
    }
}

#[async_trait]
impl BureauClient for BureauService {
    async fn fetch_demographics(
        &self,
        national_id: &str,
    ) -> Result<DemographicRecord, BureauServiceError> {
        if national_id.is_empty() {
            return Err(BureauServiceError::ValidationError(
                "Cédula es requerida".to_string(),
            ));
        }

        let token = self.tokens.get_token().await?;
        let mut response = self.send_lookup(national_id, &token).await?;

        // One forced refresh, one retry. A second 401 is final.
        if response.status() == StatusCode::UNAUTHORIZED {
            warn!("Bureau rejected the token, refreshing and retrying once");
            self.tokens.invalidate().await;
            let token = self.tokens.refresh().await?;
            response = self.send_lookup(national_id, &token).await?;
            if response.status() == StatusCode::UNAUTHORIZED {
                error!("Bureau rejected the refreshed token");
                return Err(BureauServiceError::Unauthorized);
            }
        }

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!("Bureau lookup failed with status {}", status);
            return Err(BureauServiceError::Api {
                status: status.as_u16(),
                body,
            });
        }

        debug!("Bureau lookup succeeded");
        response
            .json()
            .await
            .map_err(|e| BureauServiceError::Decode(e.to_string()))
    }
}
