use std::collections::HashMap;

use super::{model::RuntimeConfig, redirect};

/// Build-time variables consulted for each field, highest priority first.
pub const TENANT_ID_VARS: &[&str] = &["VITE_AAD_TENANT_ID", "AZURE_TENANT_ID"];
pub const CLIENT_ID_VARS: &[&str] = &["VITE_AAD_CLIENT_ID", "AZURE_CLIENT_ID"];
pub const REDIRECT_URI_VARS: &[&str] = &["VITE_AAD_REDIRECT_URI"];
pub const API_BASE_VARS: &[&str] = &["VITE_API_BASE", "EDEN_API_BASE"];

/// A snapshot of build-time variables.
///
/// Lookups return trimmed, non-empty values with one pair of wrapping quotes
/// removed, so `FOO=""` in a `.env` file counts as unset.
#[derive(Clone, Debug, Default)]
pub struct BuildEnv {
    values: HashMap<String, String>,
}

impl BuildEnv {
    pub fn from_process() -> Self {
        Self {
            values: std::env::vars().collect(),
        }
    }

    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            values: pairs
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        }
    }

    pub fn nonempty(&self, key: &str) -> Option<String> {
        let value = self.values.get(key)?.trim();
        let normalized = strip_wrapping_quotes(value).trim();
        if normalized.is_empty() {
            None
        } else {
            Some(normalized.to_string())
        }
    }

    /// First non-empty value among `keys`, in order.
    pub fn first_of(&self, keys: &[&str]) -> Option<String> {
        keys.iter().find_map(|key| self.nonempty(key))
    }
}

fn strip_wrapping_quotes(value: &str) -> &str {
    if value.len() >= 2 {
        let bytes = value.as_bytes();
        let first = bytes[0];
        let last = bytes[value.len() - 1];
        if (first == b'"' && last == b'"') || (first == b'\'' && last == b'\'') {
            return &value[1..value.len() - 1];
        }
    }
    value
}

/// Defaults baked in at build time. Never looks at persisted state.
pub fn environment_defaults(env: &BuildEnv, origin: &str, dev_port: u16) -> RuntimeConfig {
    let redirect_uri = env
        .first_of(REDIRECT_URI_VARS)
        .map(|uri| redirect::normalize_redirect_uri(&uri))
        .unwrap_or_else(|| redirect::default_redirect_uri(origin, dev_port));

    RuntimeConfig {
        tenant_id: env.first_of(TENANT_ID_VARS).unwrap_or_default(),
        client_id: env.first_of(CLIENT_ID_VARS).unwrap_or_default(),
        redirect_uri,
        api_base: env.first_of(API_BASE_VARS).unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn primary_variable_wins_over_legacy_name() {
        let env = BuildEnv::from_pairs([
            ("VITE_AAD_TENANT_ID", "11111111-1111-1111-1111-111111111111"),
            ("AZURE_TENANT_ID", "33333333-3333-3333-3333-333333333333"),
        ]);
        let defaults = environment_defaults(&env, "http://localhost:3334", 5173);
        assert_eq!(defaults.tenant_id, "11111111-1111-1111-1111-111111111111");
    }

    #[test]
    fn blank_primary_falls_through_to_legacy_name() {
        let env = BuildEnv::from_pairs([
            ("VITE_AAD_CLIENT_ID", "  "),
            ("AZURE_CLIENT_ID", "'22222222-2222-2222-2222-222222222222'"),
        ]);
        let defaults = environment_defaults(&env, "http://localhost:3334", 5173);
        assert_eq!(defaults.client_id, "22222222-2222-2222-2222-222222222222");
    }

    #[test]
    fn nothing_set_yields_empty_fields() {
        let env = BuildEnv::default();
        let defaults = environment_defaults(&env, "https://teams.example.com", 5173);
        assert_eq!(defaults.tenant_id, "");
        assert_eq!(defaults.client_id, "");
        assert_eq!(defaults.api_base, "");
        assert_eq!(defaults.redirect_uri, "https://teams.example.com");
    }

    #[test]
    fn redirect_falls_back_to_dev_port_on_localhost() {
        let env = BuildEnv::default();
        let defaults = environment_defaults(&env, "http://localhost:3334", 5173);
        assert_eq!(defaults.redirect_uri, "http://localhost:5173");
    }

    #[test]
    fn supplied_redirect_is_normalized() {
        let env = BuildEnv::from_pairs([("VITE_AAD_REDIRECT_URI", "https://localhost:5173")]);
        let defaults = environment_defaults(&env, "https://teams.example.com", 5173);
        assert_eq!(defaults.redirect_uri, "http://localhost:5173");
    }

    #[test]
    fn quoted_empty_value_counts_as_unset() {
        let env = BuildEnv::from_pairs([("VITE_API_BASE", "\"\""), ("EDEN_API_BASE", "http://api")]);
        assert_eq!(env.first_of(API_BASE_VARS).as_deref(), Some("http://api"));
    }
}
