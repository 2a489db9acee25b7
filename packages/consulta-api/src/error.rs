use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use shared::services::errors::{
    bureau_service_errors::BureauServiceError, login_service_errors::LoginServiceError,
    resolution_service_errors::ResolutionServiceError,
};

#[derive(Debug)]
pub enum ApiError {
    LoginService(LoginServiceError),
    ResolutionService(ResolutionServiceError),
    Unauthorized,
}

impl From<LoginServiceError> for ApiError {
    fn from(error: LoginServiceError) -> Self {
        ApiError::LoginService(error)
    }
}

impl From<ResolutionServiceError> for ApiError {
    fn from(error: ResolutionServiceError) -> Self {
        ApiError::ResolutionService(error)
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::LoginService(LoginServiceError::ValidationError(_)) => {
                StatusCode::BAD_REQUEST
            }
            ApiError::LoginService(LoginServiceError::Rejected(_)) => StatusCode::UNAUTHORIZED,
            ApiError::LoginService(
                LoginServiceError::Request(_) | LoginServiceError::InvalidResponse(_),
            ) => StatusCode::BAD_GATEWAY,

            ApiError::ResolutionService(ResolutionServiceError::ValidationError(_)) => {
                StatusCode::BAD_REQUEST
            }
            ApiError::ResolutionService(ResolutionServiceError::Bureau(
                BureauServiceError::ValidationError(_),
            )) => StatusCode::BAD_REQUEST,
            ApiError::ResolutionService(ResolutionServiceError::Bureau(_)) => {
                StatusCode::BAD_GATEWAY
            }

            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
        }
    }

    pub fn message(&self) -> String {
        match self {
            ApiError::LoginService(err) => err.to_string(),
            ApiError::ResolutionService(err) => err.to_string(),
            ApiError::Unauthorized => "Inicia sesión para continuar".to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), Json(json!({ "error": self.message() }))).into_response()
    }
}
