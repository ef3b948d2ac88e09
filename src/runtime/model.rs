use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::redirect::normalize_redirect_uri;

/// Key the persisted record is stored under.
pub const CONFIG_STORAGE_KEY: &str = "eden-teams-config";

/// Identity and API settings the dashboard bootstraps with.
///
/// Every field defaults to an empty string, so a partially written record
/// still parses and is then judged by the validation predicates.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct RuntimeConfig {
    pub tenant_id: String,
    pub client_id: String,
    pub redirect_uri: String,
    pub api_base: String,
}

impl RuntimeConfig {
    pub fn new(
        tenant_id: impl Into<String>,
        client_id: impl Into<String>,
        redirect_uri: impl Into<String>,
        api_base: impl Into<String>,
    ) -> Self {
        Self {
            tenant_id: tenant_id.into(),
            client_id: client_id.into(),
            redirect_uri: redirect_uri.into(),
            api_base: api_base.into(),
        }
    }

    /// Applies the localhost redirect rewrite. Other fields are left alone.
    pub fn normalized(mut self) -> Self {
        self.redirect_uri = normalize_redirect_uri(&self.redirect_uri);
        self
    }
}

/// Which identifier a value is checked as; each has its own denylist.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Role {
    Tenant,
    Client,
}
