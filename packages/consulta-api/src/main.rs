use std::sync::Arc;

use tracing::info;
use tracing_subscriber::EnvFilter;

use consulta_api::{app, state::AppState};
use shared::config::AppConfig;
use shared::repositories::token_repository::FileTokenRepository;
use shared::services::bureau_service::BureauService;
use shared::services::historical_service::HistoricalService;
use shared::services::login_service::LoginService;
use shared::services::resolution_service::ResolutionService;
use shared::services::token_service::TokenService;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let config = AppConfig::from_env()?;
    let http = reqwest::Client::new();

    // Set up services
    let token_repository = Arc::new(FileTokenRepository::new(&config.token_store_path));
    info!("Caching bureau tokens in {}", token_repository.path().display());
    let token_service = Arc::new(TokenService::new(token_repository, http.clone(), &config));
    let bureau_service = Arc::new(BureauService::new(token_service, http.clone(), &config));
    let historical_service = Arc::new(HistoricalService::new(http.clone(), &config));
    let resolution_service = Arc::new(ResolutionService::new(
        historical_service,
        bureau_service,
    ));
    let login_service = Arc::new(LoginService::new(http, &config));

    let app_state = AppState::new(login_service, resolution_service);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    info!("Listening on {}", config.bind_addr);
    axum::serve(listener, app(app_state)).await?;
    Ok(())
}
