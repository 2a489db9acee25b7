use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use tracing::{debug, info, warn};

use crate::config::AppConfig;
use crate::models::token::{AccessToken, TokenResponse};
use crate::repositories::token_repository::TokenRepository;
use crate::services::errors::token_service_errors::TokenServiceError;

#[cfg(test)]
use mockall::automock;

pub const TOKEN_KEY: &str = "bureau_token";
pub const TOKEN_EXPIRES_AT_KEY: &str = "bureau_token_expires_at";

#[cfg_attr(test, automock)]
#[async_trait]
pub trait TokenProvider: Send + Sync {
    /// Cached token if still usable, otherwise a freshly issued one.
    async fn get_token(&self) -> Result<AccessToken, TokenServiceError>;
    /// Always asks the token endpoint for a new token.
    async fn refresh(&self) -> Result<AccessToken, TokenServiceError>;
    /// Drops the cached expiration so the next `get_token` refreshes.
    async fn invalidate(&self);
}

pub struct TokenService {
    repository: Arc<dyn TokenRepository>,
    http: Client,
    token_url: String,
    client_id: String,
    client_secret: String,
    scope: String,
}

impl TokenService {
    pub fn new(repository: Arc<dyn TokenRepository>, http: Client, config: &AppConfig) -> Self {
        TokenService {
            repository,
            http,
            token_url: format!(
                "{}/v2/oauth/token",
                config.bureau_api_url.trim_end_matches('/')
            ),
            client_id: config.bureau_client_id.clone(),
            client_secret: config.bureau_client_secret.clone(),
            scope: config.bureau_scope.clone(),
        }
    }

    // Storage problems only cost us the cache; they never fail a lookup.
    async fn cached_token(&self) -> Option<AccessToken> {
        let value = match self.repository.get(TOKEN_KEY).await {
            Ok(value) => value?,
            Err(e) => {
                warn!("Failed to read cached token: {}", e);
                return None;
            }
        };
        let expires_at = match self.repository.get(TOKEN_EXPIRES_AT_KEY).await {
            Ok(expires_at) => expires_at?,
            Err(e) => {
                warn!("Failed to read cached token expiration: {}", e);
                return None;
            }
        };
        match DateTime::parse_from_rfc3339(&expires_at) {
            Ok(expires_at) => Some(AccessToken::new(value, expires_at.with_timezone(&Utc))),
            Err(e) => {
                warn!("Ignoring malformed token expiration {:?}: {}", expires_at, e);
                None
            }
        }
    }

    async fn persist(&self, token: &AccessToken) {
        if let Err(e) = self.repository.set(TOKEN_KEY, &token.value).await {
            warn!("Failed to persist token: {}", e);
            return;
        }
        if let Err(e) = self
            .repository
            .set(TOKEN_EXPIRES_AT_KEY, &token.expires_at.to_rfc3339())
            .await
        {
            warn!("Failed to persist token expiration: {}", e);
            // The stored expiration belongs to the previous token.
            if let Err(e) = self.repository.remove(TOKEN_EXPIRES_AT_KEY).await {
                warn!("Failed to clear stale token expiration: {}", e);
            }
        }
    }
}

#[async_trait]
impl TokenProvider for TokenService {
    async fn get_token(&self) -> Result<AccessToken, TokenServiceError> {
        if let Some(token) = self.cached_token().await {
            if token.is_usable_at(Utc::now()) {
                debug!("Using cached bureau token");
                return Ok(token);
            }
        }
        info!("Bureau token missing or about to expire, requesting a new one");
        self.refresh().await
    }

    async fn refresh(&self) -> Result<AccessToken, TokenServiceError> {
        let response = self
            .http
            .post(&self.token_url)
            .basic_auth(&self.client_id, Some(&self.client_secret))
            .form(&[
                ("grant_type", "client_credentials"),
                ("scope", self.scope.as_str()),
            ])
            .send()
            .await
            .map_err(|e| TokenServiceError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TokenServiceError::UnexpectedStatus {
                status: status.as_u16(),
                body,
            });
        }

        let payload: TokenResponse = response
            .json()
            .await
            .map_err(|e| TokenServiceError::Decode(e.to_string()))?;
        let now = Utc::now();
        let expires_at = payload.expires_at(now);
        let value = payload
            .access_token
            .filter(|t| !t.is_empty())
            .ok_or(TokenServiceError::MissingAccessToken)?;

        let token = AccessToken::new(value, expires_at);
        self.persist(&token).await;
        info!("Bureau token refreshed, expires at {}", token.expires_at);
        Ok(token)
    }

    async fn invalidate(&self) {
        if let Err(e) = self.repository.remove(TOKEN_EXPIRES_AT_KEY).await {
            warn!("Failed to invalidate cached token: {}", e);
        }
    }
}
