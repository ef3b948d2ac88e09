use std::sync::Arc;

use eden_teams_config::{
    app,
    service::config::{ConfigService, ConfigServiceImpl},
    state::AppState,
};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Arc::new(ConfigServiceImpl::new());
    let port = config.port();

    let state = AppState::new(config)
        .await
        .unwrap_or_else(|err| panic!("startup failed: {}", err));
    tracing::info!(
        view = ?state.bootstrap().view,
        origin = %state.config().values().public_origin,
        "bootstrap complete"
    );

    let bind_addr = format!("0.0.0.0:{port}");
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .unwrap_or_else(|_| panic!("failed to bind to {}", bind_addr));
    tracing::info!(%bind_addr, "listening");

    axum::serve(listener, app(state))
        .await
        .expect("server error");
}
