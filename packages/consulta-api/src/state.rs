use std::sync::Arc;

use tokio::sync::RwLock;

use shared::models::auth::state::AuthState;
use shared::services::login_service::LoginServiceTrait;
use shared::services::resolution_service::ResolutionService;

#[derive(Clone)]
pub struct AppState {
    pub login_service: Arc<dyn LoginServiceTrait>,
    pub resolution_service: Arc<ResolutionService>,
    pub auth_state: Arc<RwLock<AuthState>>,
}

impl AppState {
    pub fn new(
        login_service: Arc<dyn LoginServiceTrait>,
        resolution_service: Arc<ResolutionService>,
    ) -> Self {
        AppState {
            login_service,
            resolution_service,
            auth_state: Arc::new(RwLock::new(AuthState::LoggedOut)),
        }
    }
}
