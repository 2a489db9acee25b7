use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tracing::{debug, warn};

use crate::config::AppConfig;
use crate::models::auth::requests::LoginRequest;
use crate::services::errors::login_service_errors::LoginServiceError;

#[cfg(test)]
use mockall::automock;

const NON_JSON_PREVIEW_CHARS: usize = 100;

#[cfg_attr(test, automock)]
#[async_trait]
pub trait LoginServiceTrait: Send + Sync {
    /// Returns the accepted username.
    async fn login(&self, credentials: &LoginRequest) -> Result<String, LoginServiceError>;
}

/// Forwards operator credentials to the external authentication service.
pub struct LoginService {
    http: Client,
    login_url: String,
}

impl LoginService {
    pub fn new(http: Client, config: &AppConfig) -> Self {
        LoginService {
            http,
            login_url: format!(
                "{}/api/security/login",
                config.auth_api_url.trim_end_matches('/')
            ),
        }
    }
}

/// Interprets the authentication service's answer. Any JSON value other than
/// an object with `success: false` is a successful login.
pub fn interpret_login_response(body: &str) -> Result<(), LoginServiceError> {
    let response: Value = serde_json::from_str(body).map_err(|_| {
        let preview: String = body.chars().take(NON_JSON_PREVIEW_CHARS).collect();
        LoginServiceError::InvalidResponse(format!(
            "Server returned non-JSON response: {}...",
            preview
        ))
    })?;

    if response.get("success") == Some(&Value::Bool(false)) {
        return Err(LoginServiceError::Rejected(
            response
                .get("message")
                .and_then(Value::as_str)
                .filter(|m| !m.is_empty())
                .unwrap_or("Credenciales incorrectas")
                .to_string(),
        ));
    }
    Ok(())
}

#[async_trait]
impl LoginServiceTrait for LoginService {
    async fn login(&self, credentials: &LoginRequest) -> Result<String, LoginServiceError> {
        if credentials.username.is_empty() || credentials.password.is_empty() {
            return Err(LoginServiceError::ValidationError(
                "Por favor ingresa usuario y contraseña".to_string(),
            ));
        }

        let response = self
            .http
            .post(&self.login_url)
            .json(credentials)
            .send()
            .await
            .map_err(|e| LoginServiceError::Request(e.to_string()))?;
        let body = response
            .text()
            .await
            .map_err(|e| LoginServiceError::Request(e.to_string()))?;

        match interpret_login_response(&body) {
            Ok(()) => {
                debug!("Login accepted for {}", credentials.username);
                Ok(credentials.username.clone())
            }
            Err(e) => {
                warn!("Login failed for {}: {}", credentials.username, e);
                Err(e)
            }
        }
    }
}
