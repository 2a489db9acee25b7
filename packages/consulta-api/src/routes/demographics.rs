use axum::{extract::State, routing::post, Json, Router};
use tracing::{debug, error};

use crate::{error::ApiError, middleware::auth::LoggedInOperator, state::AppState};
use shared::models::auth::requests::SearchRequest;
use shared::models::demographic::SearchResponse;

pub fn routes() -> Router<AppState> {
    Router::new().route("/demographics/search", post(search))
}

async fn search(
    State(state): State<AppState>,
    operator: LoggedInOperator,
    Json(request): Json<SearchRequest>,
) -> Result<Json<SearchResponse>, ApiError> {
    debug!("{} searching {}", operator.username, request.cedula);
    state
        .resolution_service
        .resolve_cedula(&request.cedula)
        .await
        .map(|resolution| Json(SearchResponse::from(resolution)))
        .map_err(|e| {
            error!("Search for {} failed: {}", request.cedula, e);
            ApiError::from(e)
        })
}
