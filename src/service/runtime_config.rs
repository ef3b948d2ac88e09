use async_trait::async_trait;
use std::sync::Arc;

use crate::{
    runtime::{self, Bootstrap, RuntimeConfig, CONFIG_STORAGE_KEY},
    service::store::{ConfigStore, StoreError},
};

/// Outcome of reading the persisted record.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PersistedLookup {
    Absent,
    Malformed(String),
    Present(RuntimeConfig),
}

impl PersistedLookup {
    /// Collapses "malformed" into "absent".
    pub fn into_config(self) -> Option<RuntimeConfig> {
        match self {
            PersistedLookup::Present(config) => Some(config),
            PersistedLookup::Absent | PersistedLookup::Malformed(_) => None,
        }
    }
}

#[async_trait]
pub trait RuntimeConfigService: Send + Sync {
    async fn lookup_persisted(&self) -> PersistedLookup;
    async fn load_persisted(&self) -> Option<RuntimeConfig>;
    fn environment_defaults(&self) -> RuntimeConfig;
    async fn active_config(&self) -> RuntimeConfig;
    async fn bootstrap(&self) -> Bootstrap;
    async fn save(&self, config: RuntimeConfig) -> Result<RuntimeConfig, StoreError>;
    async fn reset(&self) -> Result<(), StoreError>;
}

pub struct RuntimeConfigServiceImpl {
    store: Arc<dyn ConfigStore>,
    env_defaults: RuntimeConfig,
}

impl RuntimeConfigServiceImpl {
    pub fn new(store: Arc<dyn ConfigStore>, env_defaults: RuntimeConfig) -> Self {
        Self {
            store,
            env_defaults,
        }
    }
}

#[async_trait]
impl RuntimeConfigService for RuntimeConfigServiceImpl {
    async fn lookup_persisted(&self) -> PersistedLookup {
        let raw = match self.store.get(CONFIG_STORAGE_KEY).await {
            Ok(Some(raw)) => raw,
            Ok(None) => return PersistedLookup::Absent,
            Err(err) => {
                tracing::warn!(error = %err, "reading persisted runtime config failed");
                return PersistedLookup::Absent;
            }
        };

        let value = match serde_json::from_slice::<serde_json::Value>(&raw) {
            Ok(value) if value.is_object() => value,
            Ok(_) => {
                return PersistedLookup::Malformed("record is not a JSON object".to_string())
            }
            Err(err) => return PersistedLookup::Malformed(err.to_string()),
        };

        match serde_json::from_value::<RuntimeConfig>(value) {
            Ok(config) => PersistedLookup::Present(config.normalized()),
            Err(err) => PersistedLookup::Malformed(err.to_string()),
        }
    }

    async fn load_persisted(&self) -> Option<RuntimeConfig> {
        match self.lookup_persisted().await {
            PersistedLookup::Malformed(reason) => {
                tracing::warn!(%reason, "ignoring malformed persisted runtime config");
                None
            }
            lookup => lookup.into_config(),
        }
    }

    fn environment_defaults(&self) -> RuntimeConfig {
        self.env_defaults.clone()
    }

    async fn active_config(&self) -> RuntimeConfig {
        let persisted = self.load_persisted().await;
        runtime::resolve_active(persisted, self.environment_defaults()).0
    }

    async fn bootstrap(&self) -> Bootstrap {
        let persisted = self.load_persisted().await;
        let boot = runtime::bootstrap(persisted, self.environment_defaults());
        tracing::info!(
            source = ?boot.source,
            configured = boot.is_configured,
            "runtime config resolved"
        );
        boot
    }

    async fn save(&self, config: RuntimeConfig) -> Result<RuntimeConfig, StoreError> {
        let config = config.normalized();
        let value = serde_json::to_string(&config)?;
        self.store.set(CONFIG_STORAGE_KEY, &value).await?;
        tracing::info!("runtime config saved; reload required");
        Ok(config)
    }

    async fn reset(&self) -> Result<(), StoreError> {
        self.store.remove(CONFIG_STORAGE_KEY).await?;
        tracing::info!("runtime config reset to environment defaults");
        Ok(())
    }
}
