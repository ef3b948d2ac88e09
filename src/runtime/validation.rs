use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;
use utoipa::ToSchema;

use super::model::{Role, RuntimeConfig};

static GUID_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^[0-9a-f]{8}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{12}$")
        .expect("guid pattern is a valid regex")
});

// Placeholder and sample ids that pass the GUID check but make AAD reject the login.
const DISALLOWED_TENANTS: &[&str] = &["00000000-0000-0000-0000-000000000001"];
const DISALLOWED_CLIENTS: &[&str] = &[
    "00000000-0000-0000-0000-000000000002",
    "1950a258-227a-4e31-a9cf-717495945fc2",
];

pub fn is_valid_guid(value: &str) -> bool {
    let value = value.trim();
    if value.is_empty() || value.contains("your-") || value == "common" {
        return false;
    }
    GUID_PATTERN.is_match(value)
}

pub fn is_disallowed(value: &str, role: Role) -> bool {
    let candidate = value.trim().to_ascii_lowercase();
    let denylist = match role {
        Role::Tenant => DISALLOWED_TENANTS,
        Role::Client => DISALLOWED_CLIENTS,
    };
    denylist.contains(&candidate.as_str())
}

fn is_usable(value: &str, role: Role) -> bool {
    is_valid_guid(value) && !is_disallowed(value, role)
}

/// Whether `config` can be handed to the identity client.
pub fn is_runtime_config_valid(config: Option<&RuntimeConfig>) -> bool {
    let Some(config) = config else {
        return false;
    };
    is_usable(&config.tenant_id, Role::Tenant) && is_usable(&config.client_id, Role::Client)
}

/// Inline feedback for one wizard field.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FieldIssue {
    pub field: &'static str,
    pub message: String,
}

fn field_issue(value: &str, role: Role) -> Option<FieldIssue> {
    let (field, label, denied) = match role {
        Role::Tenant => (
            "tenantId",
            "Tenant ID",
            "This tenant ID is a placeholder and cannot be used",
        ),
        Role::Client => (
            "clientId",
            "Client ID",
            "This client ID is a sample application ID and cannot be used",
        ),
    };

    let message = if value.trim().is_empty() {
        format!("{label} is required")
    } else if !is_valid_guid(value) {
        format!("{label} must be a GUID (xxxxxxxx-xxxx-xxxx-xxxx-xxxxxxxxxxxx)")
    } else if is_disallowed(value, role) {
        denied.to_string()
    } else {
        return None;
    };

    Some(FieldIssue { field, message })
}

/// Field-level issues for the configuration wizard. Empty iff
/// [`is_runtime_config_valid`] holds for `config`.
pub fn validate_fields(config: &RuntimeConfig) -> Vec<FieldIssue> {
    [
        field_issue(&config.tenant_id, Role::Tenant),
        field_issue(&config.client_id, Role::Client),
    ]
    .into_iter()
    .flatten()
    .collect()
}
