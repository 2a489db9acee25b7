use axum::{extract::FromRequestParts, http::request::Parts};

use crate::{error::ApiError, state::AppState};

/// Present only while an operator is logged in.
#[derive(Debug, Clone)]
pub struct LoggedInOperator {
    pub username: String,
}

impl FromRequestParts<AppState> for LoggedInOperator {
    type Rejection = ApiError;

    async fn from_request_parts(
        _parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_state = state.auth_state.read().await;
        auth_state
            .username()
            .map(|username| LoggedInOperator {
                username: username.to_string(),
            })
            .ok_or(ApiError::Unauthorized)
    }
}
