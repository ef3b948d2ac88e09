use async_trait::async_trait;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, time::Duration};
use utoipa::ToSchema;

/// Hosted Eden API, used when the active config leaves `apiBase` empty.
pub const DEFAULT_API_BASE: &str =
    "https://eden-api.redmushroom-c729ca5a.eastus2.azurecontainerapps.io";

pub const GENERIC_QUERY_FAILURE: &str = "Failed to query call records. Check API base and auth.";

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct QueryRequest {
    pub question: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct QueryResponse {
    pub answer: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Object>)]
    pub stats: Option<BTreeMap<String, serde_json::Value>>,
}

#[derive(Debug, thiserror::Error)]
pub enum QueryError {
    #[error("question must not be empty")]
    EmptyQuestion,
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("backend returned {status}")]
    Status {
        status: StatusCode,
        message: Option<String>,
    },
    #[error("invalid backend response: {0}")]
    Decode(String),
}

impl QueryError {
    /// Text for the dashboard's toast.
    pub fn user_message(&self) -> String {
        match self {
            QueryError::EmptyQuestion => "Please enter a question.".to_string(),
            QueryError::Status {
                message: Some(message),
                ..
            } => message.clone(),
            QueryError::Transport(err) => err.to_string(),
            QueryError::Status { message: None, .. } | QueryError::Decode(_) => {
                GENERIC_QUERY_FAILURE.to_string()
            }
        }
    }
}

#[derive(Deserialize)]
struct BackendError {
    detail: Option<serde_json::Value>,
    message: Option<String>,
}

fn backend_message(body: &str) -> Option<String> {
    let parsed: BackendError = serde_json::from_str(body).ok()?;
    let detail = parsed.detail.and_then(|detail| match detail {
        serde_json::Value::String(text) => Some(text),
        serde_json::Value::Null => None,
        other => Some(other.to_string()),
    });
    detail
        .or(parsed.message)
        .map(|text| text.trim().to_string())
        .filter(|text| !text.is_empty())
}

#[async_trait]
pub trait QueryService: Send + Sync {
    fn base_url(&self) -> &str;
    async fn ask(&self, request: QueryRequest) -> Result<QueryResponse, QueryError>;
}

pub struct HttpQueryService {
    client: reqwest::Client,
    base_url: String,
}

impl HttpQueryService {
    pub fn new(api_base: &str, timeout: Duration) -> Result<Self, reqwest::Error> {
        let api_base = api_base.trim();
        let base_url = if api_base.is_empty() {
            DEFAULT_API_BASE
        } else {
            api_base
        }
        .trim_end_matches('/')
        .to_string();
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client, base_url })
    }
}

#[async_trait]
impl QueryService for HttpQueryService {
    fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn ask(&self, request: QueryRequest) -> Result<QueryResponse, QueryError> {
        if request.question.trim().is_empty() {
            return Err(QueryError::EmptyQuestion);
        }

        let resp = self
            .client
            .post(format!("{}/api/query", self.base_url))
            .json(&request)
            .send()
            .await?;

        let status = resp.status();
        let body = resp.text().await?;
        if !status.is_success() {
            return Err(QueryError::Status {
                status,
                message: backend_message(&body),
            });
        }

        serde_json::from_str(&body).map_err(|err| QueryError::Decode(err.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_api_base_uses_hosted_default() {
        let service = HttpQueryService::new("  ", Duration::from_secs(1)).unwrap();
        assert_eq!(service.base_url(), DEFAULT_API_BASE);

        let service = HttpQueryService::new("http://127.0.0.1:9000/", Duration::from_secs(1)).unwrap();
        assert_eq!(service.base_url(), "http://127.0.0.1:9000");
    }

    #[tokio::test]
    async fn blank_question_is_rejected_before_any_request() {
        let service = HttpQueryService::new("http://127.0.0.1:9", Duration::from_secs(1)).unwrap();
        let err = service
            .ask(QueryRequest {
                question: "   ".to_string(),
                start_date: None,
                end_date: None,
                user: None,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, QueryError::EmptyQuestion));
        assert_eq!(err.user_message(), "Please enter a question.");
    }

    #[test]
    fn backend_detail_is_preferred_for_user_message() {
        let err = QueryError::Status {
            status: StatusCode::BAD_GATEWAY,
            message: backend_message(r#"{"detail":"Graph API credentials missing"}"#),
        };
        assert_eq!(err.user_message(), "Graph API credentials missing");

        let err = QueryError::Status {
            status: StatusCode::BAD_REQUEST,
            message: backend_message(r#"{"message":"bad date range"}"#),
        };
        assert_eq!(err.user_message(), "bad date range");
    }

    #[test]
    fn falls_back_to_generic_message() {
        let err = QueryError::Status {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: backend_message("<html>oops</html>"),
        };
        assert_eq!(err.user_message(), GENERIC_QUERY_FAILURE);
        assert_eq!(
            QueryError::Decode("eof".to_string()).user_message(),
            GENERIC_QUERY_FAILURE
        );
    }

    #[test]
    fn request_omits_unset_filters() {
        let request = QueryRequest {
            question: "calls last week".to_string(),
            start_date: Some("2024-01-01".to_string()),
            end_date: None,
            user: None,
        };
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            serde_json::json!({"question": "calls last week", "startDate": "2024-01-01"})
        );
    }
}
