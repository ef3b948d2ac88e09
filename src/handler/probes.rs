use axum::{extract::State, routing::get, Json, Router};
use std::sync::Arc;

use crate::{service::probe::ProbeResult, state::AppState};

pub fn routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/v1/probes", get(probe_services))
        .with_state(state)
}

#[utoipa::path(
    get,
    path = "/api/v1/probes",
    tag = "probes",
    responses(
        (status = 200, description = "Reachability of each Eden service", body = [ProbeResult])
    )
)]
pub async fn probe_services(State(state): State<Arc<AppState>>) -> Json<Vec<ProbeResult>> {
    Json(state.prober().probe_all().await)
}
