use axum::Router;
use std::sync::Arc;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub mod config;
pub mod handler;
pub mod openapi;
pub mod runtime;
pub mod service;
pub mod state;

use crate::{openapi::ApiDoc, state::AppState};

pub fn app(state: Arc<AppState>) -> Router {
    Router::new()
        .merge(handler::health::routes(state.clone()))
        .merge(handler::runtime_config::routes(state.clone()))
        .merge(handler::query::routes(state.clone()))
        .merge(handler::probes::routes(state))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
