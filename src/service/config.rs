use std::{path::PathBuf, sync::Arc};

use crate::{
    config::{Config, StoreBackend},
    runtime::BuildEnv,
};

pub trait ConfigService: Send + Sync {
    fn port(&self) -> u16;
    fn values(&self) -> &Config;
}

pub struct ConfigServiceImpl {
    config: Arc<Config>,
}

impl ConfigServiceImpl {
    fn env_u16(env: &BuildEnv, key: &str) -> Option<u16> {
        env.nonempty(key).and_then(|value| value.parse::<u16>().ok())
    }

    fn env_u64(env: &BuildEnv, key: &str) -> Option<u64> {
        env.nonempty(key).and_then(|value| value.parse::<u64>().ok())
    }

    fn env_lower_nonempty(env: &BuildEnv, key: &str) -> Option<String> {
        env.nonempty(key).map(|value| value.to_ascii_lowercase())
    }

    fn store_backend(env: &BuildEnv) -> StoreBackend {
        match Self::env_lower_nonempty(env, "CONFIG_STORE").as_deref() {
            None | Some("file") => StoreBackend::File,
            Some("redis") => StoreBackend::Redis,
            Some("memory") => StoreBackend::Memory,
            Some(other) => {
                tracing::warn!(value = other, "unknown CONFIG_STORE, using file");
                StoreBackend::File
            }
        }
    }

    pub fn new() -> Self {
        Self::from_env(&BuildEnv::from_process())
    }

    pub fn from_env(env: &BuildEnv) -> Self {
        let port = Self::env_u16(env, "PORT").unwrap_or(3334);
        let dev_port = Self::env_u16(env, "DEV_PORT").unwrap_or(5173);
        let public_origin = env
            .nonempty("PUBLIC_ORIGIN")
            .map(|origin| origin.trim_end_matches('/').to_string())
            .unwrap_or_else(|| format!("http://localhost:{dev_port}"));
        let store_backend = Self::store_backend(env);
        let store_dir = env
            .nonempty("CONFIG_STORE_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(".eden"));
        let redis_url = env.nonempty("REDIS_URL");
        let key_prefix = env
            .nonempty("CONFIG_KEY_PREFIX")
            .unwrap_or_else(|| "eden-teams".to_string());
        let query_timeout_seconds = Self::env_u64(env, "QUERY_TIMEOUT_SECONDS").unwrap_or(30);
        let probe_timeout_seconds = Self::env_u64(env, "PROBE_TIMEOUT_SECONDS").unwrap_or(5);

        Self {
            config: Arc::new(Config {
                port,
                public_origin,
                dev_port,
                store_backend,
                store_dir,
                redis_url,
                key_prefix,
                query_timeout_seconds,
                probe_timeout_seconds,
            }),
        }
    }
}

impl Default for ConfigServiceImpl {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigService for ConfigServiceImpl {
    fn port(&self) -> u16 {
        self.config.port
    }

    fn values(&self) -> &Config {
        &self.config
    }
}
