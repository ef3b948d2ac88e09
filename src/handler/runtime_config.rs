use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use std::sync::Arc;
use utoipa::ToSchema;

use crate::{
    handler::ErrorResponse,
    runtime::{validate_fields, Bootstrap, FieldIssue, RuntimeConfig},
    state::AppState,
};

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResponse {
    pub valid: bool,
    pub issues: Vec<FieldIssue>,
}

impl ValidationResponse {
    fn for_config(config: &RuntimeConfig) -> Self {
        let issues = validate_fields(config);
        Self {
            valid: issues.is_empty(),
            issues,
        }
    }
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SaveResponse {
    pub config: RuntimeConfig,
    pub reload_required: bool,
}

pub fn routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route(
            "/api/v1/runtime-config",
            get(get_runtime_config)
                .put(save_runtime_config)
                .delete(reset_runtime_config),
        )
        .route(
            "/api/v1/runtime-config/defaults",
            get(get_environment_defaults),
        )
        .route(
            "/api/v1/runtime-config/validate",
            post(validate_runtime_config),
        )
        .with_state(state)
}

#[utoipa::path(
    get,
    path = "/api/v1/runtime-config",
    tag = "runtime-config",
    responses(
        (status = 200, description = "Configuration resolved at startup", body = Bootstrap)
    )
)]
pub async fn get_runtime_config(State(state): State<Arc<AppState>>) -> Json<Bootstrap> {
    Json(state.bootstrap().clone())
}

#[utoipa::path(
    get,
    path = "/api/v1/runtime-config/defaults",
    tag = "runtime-config",
    responses(
        (status = 200, description = "Build-time defaults", body = RuntimeConfig)
    )
)]
pub async fn get_environment_defaults(State(state): State<Arc<AppState>>) -> Json<RuntimeConfig> {
    Json(state.runtime().environment_defaults())
}

#[utoipa::path(
    post,
    path = "/api/v1/runtime-config/validate",
    tag = "runtime-config",
    request_body = RuntimeConfig,
    responses(
        (status = 200, description = "Field validation result", body = ValidationResponse)
    )
)]
pub async fn validate_runtime_config(
    Json(payload): Json<RuntimeConfig>,
) -> Json<ValidationResponse> {
    Json(ValidationResponse::for_config(&payload))
}

#[utoipa::path(
    put,
    path = "/api/v1/runtime-config",
    tag = "runtime-config",
    request_body = RuntimeConfig,
    responses(
        (status = 200, description = "Saved; takes effect after reload", body = SaveResponse),
        (status = 422, description = "Invalid tenant or client id", body = ValidationResponse),
        (status = 500, description = "Store failure", body = ErrorResponse)
    )
)]
pub async fn save_runtime_config(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<RuntimeConfig>,
) -> Response {
    let validation = ValidationResponse::for_config(&payload);
    if !validation.valid {
        return (StatusCode::UNPROCESSABLE_ENTITY, Json(validation)).into_response();
    }

    match state.runtime().save(payload).await {
        Ok(config) => (
            StatusCode::OK,
            Json(SaveResponse {
                config,
                reload_required: true,
            }),
        )
            .into_response(),
        Err(err) => {
            tracing::error!(error = %err, "saving runtime config failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new(format!(
                    "saving configuration failed: {}",
                    err
                ))),
            )
                .into_response()
        }
    }
}

#[utoipa::path(
    delete,
    path = "/api/v1/runtime-config",
    tag = "runtime-config",
    responses(
        (status = 204, description = "Persisted configuration removed"),
        (status = 500, description = "Store failure", body = ErrorResponse)
    )
)]
pub async fn reset_runtime_config(State(state): State<Arc<AppState>>) -> Response {
    match state.runtime().reset().await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => {
            tracing::error!(error = %err, "resetting runtime config failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new(format!(
                    "resetting configuration failed: {}",
                    err
                ))),
            )
                .into_response()
        }
    }
}
