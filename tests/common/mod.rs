#![allow(dead_code)]

use axum::Router;
use std::{sync::Arc, time::Duration};
use tokio::net::TcpListener;

use eden_teams_config::{
    app,
    runtime::BuildEnv,
    service::{config::ConfigServiceImpl, probe::Prober, store::ConfigStore},
    state::AppState,
};

pub const TENANT_ID: &str = "11111111-1111-1111-1111-111111111111";
pub const CLIENT_ID: &str = "22222222-2222-2222-2222-222222222222";

pub async fn spawn_router(router: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind ephemeral port");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("server error");
    });
    format!("http://{addr}")
}

pub async fn build_state(store: Arc<dyn ConfigStore>, env: &BuildEnv) -> Arc<AppState> {
    let config = Arc::new(ConfigServiceImpl::from_env(env));
    let prober = Prober::new(Duration::from_secs(1))
        .expect("prober")
        .with_targets(Vec::new());
    AppState::assemble(config, store, env, prober)
        .await
        .expect("assemble state")
}

/// Starts the service the way `main` does and returns its base URL.
pub async fn spawn_app(store: Arc<dyn ConfigStore>, env: BuildEnv) -> String {
    let state = build_state(store, &env).await;
    spawn_router(app(state)).await
}
