use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub mod health;
pub mod probes;
pub mod query;
pub mod runtime_config;

#[derive(Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub message: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
