use chrono::{DateTime, Duration, Utc};
use serde::Deserialize;

/// Margin before expiry after which a cached token is no longer handed out.
pub const TOKEN_SAFETY_BUFFER_SECS: i64 = 5 * 60;

/// Lifetime assumed when the token endpoint omits `expires_in`.
pub const DEFAULT_EXPIRES_IN_SECS: i64 = 3600;

#[derive(Debug, Clone, PartialEq)]
pub struct AccessToken {
    pub value: String,
    pub expires_at: DateTime<Utc>,
}

impl AccessToken {
    pub fn new(value: String, expires_at: DateTime<Utc>) -> Self {
        AccessToken { value, expires_at }
    }

    pub fn is_usable_at(&self, now: DateTime<Utc>) -> bool {
        now < self.expires_at - Duration::seconds(TOKEN_SAFETY_BUFFER_SECS)
    }
}

/// OAuth client-credentials response.
#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    pub access_token: Option<String>,
    pub expires_in: Option<i64>,
}

impl TokenResponse {
    /// Lifetimes that do not fit in a timestamp fall back to the default.
    pub fn expires_at(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        let default = now + Duration::seconds(DEFAULT_EXPIRES_IN_SECS);
        self.expires_in
            .and_then(Duration::try_seconds)
            .and_then(|lifetime| now.checked_add_signed(lifetime))
            .unwrap_or(default)
    }
}
