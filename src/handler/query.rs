use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use std::sync::Arc;

use crate::{
    handler::ErrorResponse,
    service::query::{QueryError, QueryRequest, QueryResponse},
    state::AppState,
};

pub fn routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/v1/query", post(ask_question))
        .with_state(state)
}

#[utoipa::path(
    post,
    path = "/api/v1/query",
    tag = "query",
    request_body = QueryRequest,
    responses(
        (status = 200, description = "Answer from the call-records backend", body = QueryResponse),
        (status = 400, description = "Empty question", body = ErrorResponse),
        (status = 502, description = "Backend failure", body = ErrorResponse)
    )
)]
pub async fn ask_question(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<QueryRequest>,
) -> Response {
    match state.query().ask(payload).await {
        Ok(answer) => (StatusCode::OK, Json(answer)).into_response(),
        Err(err) => {
            let status = match err {
                QueryError::EmptyQuestion => StatusCode::BAD_REQUEST,
                _ => StatusCode::BAD_GATEWAY,
            };
            tracing::warn!(
                error = %err,
                api_base = state.query().base_url(),
                "backend query failed"
            );
            (status, Json(ErrorResponse::new(err.user_message()))).into_response()
        }
    }
}
