use serde::Serialize;
use utoipa::ToSchema;

use super::{model::RuntimeConfig, redirect::normalize_redirect_uri, validation};

pub const AUTHORITY_BASE: &str = "https://login.microsoftonline.com";
pub const LOGIN_SCOPES: &[&str] = &["User.Read"];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ConfigSource {
    Persisted,
    Environment,
}

/// What the shell renders after startup.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum AppView {
    Wizard,
    Login,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub enum CacheLocation {
    SessionStorage,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CachePolicy {
    pub cache_location: CacheLocation,
    pub store_auth_state_in_cookie: bool,
}

/// Settings handed to the browser's identity client.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct IdentityClientSettings {
    pub client_id: String,
    pub authority: String,
    pub redirect_uri: String,
    pub cache: CachePolicy,
    pub scopes: Vec<String>,
}

impl IdentityClientSettings {
    fn from_config(config: &RuntimeConfig, env_defaults: &RuntimeConfig) -> Self {
        Self {
            client_id: config.client_id.trim().to_string(),
            authority: format!("{}/{}", AUTHORITY_BASE, config.tenant_id.trim()),
            redirect_uri: normalize_redirect_uri(&field_or(
                &config.redirect_uri,
                &env_defaults.redirect_uri,
            )),
            cache: CachePolicy {
                cache_location: CacheLocation::SessionStorage,
                store_auth_state_in_cookie: false,
            },
            scopes: LOGIN_SCOPES.iter().map(|scope| scope.to_string()).collect(),
        }
    }
}

/// Result of the one-time startup resolution. Handlers read this snapshot;
/// a saved change only shows up after a restart.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Bootstrap {
    pub config: RuntimeConfig,
    pub source: ConfigSource,
    pub is_configured: bool,
    pub view: AppView,
    pub identity: Option<IdentityClientSettings>,
    /// Base URL for backend queries; empty means the hosted default.
    pub api_base: String,
}

/// A blank field in the active record falls back to the environment's value.
fn field_or(value: &str, fallback: &str) -> String {
    let value = value.trim();
    if value.is_empty() {
        fallback.trim().to_string()
    } else {
        value.to_string()
    }
}

/// Persisted config if it is valid, otherwise the environment defaults as-is.
pub fn resolve_active(
    persisted: Option<RuntimeConfig>,
    env_defaults: RuntimeConfig,
) -> (RuntimeConfig, ConfigSource) {
    match persisted {
        Some(config) if validation::is_runtime_config_valid(Some(&config)) => {
            (config, ConfigSource::Persisted)
        }
        _ => (env_defaults, ConfigSource::Environment),
    }
}

pub fn bootstrap(persisted: Option<RuntimeConfig>, env_defaults: RuntimeConfig) -> Bootstrap {
    let (config, source) = resolve_active(persisted, env_defaults.clone());
    let is_configured = validation::is_runtime_config_valid(Some(&config));
    let api_base = field_or(&config.api_base, &env_defaults.api_base);

    let (view, identity) = if is_configured {
        (
            AppView::Login,
            Some(IdentityClientSettings::from_config(&config, &env_defaults)),
        )
    } else {
        tracing::warn!(
            "identity client not configured; enter credentials in the setup wizard or set \
             VITE_AAD_CLIENT_ID and VITE_AAD_TENANT_ID"
        );
        (AppView::Wizard, None)
    };

    Bootstrap {
        config,
        source,
        is_configured,
        view,
        identity,
        api_base,
    }
}
