use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use tracing::{error, info};

use crate::{error::ApiError, state::AppState};
use shared::models::auth::requests::LoginRequest;
use shared::models::auth::responses::LoginResponse;
use shared::models::auth::state::AuthState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/auth/login", post(login))
        .route("/auth/logout", post(logout))
        .route("/auth/session", get(session))
}

async fn login(
    State(state): State<AppState>,
    Json(credentials): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let username = state
        .login_service
        .login(&credentials)
        .await
        .map_err(|e| {
            error!("Failed to log in {}: {}", credentials.username, e);
            ApiError::from(e)
        })?;

    state.auth_state.write().await.login(&username);
    info!("Operator {} logged in", username);
    Ok(Json(LoginResponse { username }))
}

async fn logout(State(state): State<AppState>) -> StatusCode {
    let mut auth_state = state.auth_state.write().await;
    if let Some(username) = auth_state.username() {
        info!("Operator {} logged out", username);
    }
    auth_state.logout();
    StatusCode::NO_CONTENT
}

async fn session(State(state): State<AppState>) -> Json<AuthState> {
    Json(state.auth_state.read().await.clone())
}
