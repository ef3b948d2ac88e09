use utoipa::OpenApi;

use crate::{
    handler::{
        self,
        health::Health,
        runtime_config::{SaveResponse, ValidationResponse},
        ErrorResponse,
    },
    runtime::{
        AppView, Bootstrap, CacheLocation, CachePolicy, ConfigSource, FieldIssue,
        IdentityClientSettings, RuntimeConfig,
    },
    service::{
        probe::{ProbeResult, Reachability},
        query::{QueryRequest, QueryResponse},
    },
};

#[derive(OpenApi)]
#[openapi(
    paths(
        handler::health::health,
        handler::runtime_config::get_runtime_config,
        handler::runtime_config::get_environment_defaults,
        handler::runtime_config::validate_runtime_config,
        handler::runtime_config::save_runtime_config,
        handler::runtime_config::reset_runtime_config,
        handler::query::ask_question,
        handler::probes::probe_services
    ),
    components(schemas(
        Health,
        ErrorResponse,
        RuntimeConfig,
        Bootstrap,
        ConfigSource,
        AppView,
        IdentityClientSettings,
        CachePolicy,
        CacheLocation,
        FieldIssue,
        ValidationResponse,
        SaveResponse,
        QueryRequest,
        QueryResponse,
        ProbeResult,
        Reachability
    )),
    tags(
        (name = "health", description = "Health check"),
        (name = "runtime-config", description = "Runtime identity configuration"),
        (name = "query", description = "Call-records query proxy"),
        (name = "probes", description = "Eden service reachability")
    )
)]
pub struct ApiDoc;
