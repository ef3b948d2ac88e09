use std::{sync::Arc, time::Duration};

use crate::{
    runtime::{sources, Bootstrap, BuildEnv},
    service::{
        config::ConfigService,
        probe::Prober,
        query::{HttpQueryService, QueryService},
        runtime_config::{RuntimeConfigService, RuntimeConfigServiceImpl},
        store::{self, ConfigStore, StoreError},
    },
};

#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error("config store: {0}")]
    Store(#[from] StoreError),
    #[error("http client: {0}")]
    Http(#[from] reqwest::Error),
}

pub struct AppState {
    config: Arc<dyn ConfigService>,
    runtime: Arc<dyn RuntimeConfigService>,
    bootstrap: Bootstrap,
    query: Arc<dyn QueryService>,
    prober: Arc<Prober>,
}

impl AppState {
    /// Opens the configured store and resolves the runtime config from the
    /// process environment.
    pub async fn new(config: Arc<dyn ConfigService>) -> Result<Arc<Self>, StartupError> {
        let store = store::open_store(config.values()).await?;
        let prober = Prober::new(Duration::from_secs(config.values().probe_timeout_seconds))?;
        Self::assemble(config, store, &BuildEnv::from_process(), prober).await
    }

    /// Builds the state from explicit parts. Runs the one-time bootstrap: the
    /// resolved config is fixed for the lifetime of the returned state.
    pub async fn assemble(
        config: Arc<dyn ConfigService>,
        store: Arc<dyn ConfigStore>,
        build_env: &BuildEnv,
        prober: Prober,
    ) -> Result<Arc<Self>, StartupError> {
        let values = config.values();
        let env_defaults =
            sources::environment_defaults(build_env, &values.public_origin, values.dev_port);
        let runtime = Arc::new(RuntimeConfigServiceImpl::new(store, env_defaults));
        let bootstrap = runtime.bootstrap().await;

        let query = Arc::new(HttpQueryService::new(
            &bootstrap.api_base,
            Duration::from_secs(values.query_timeout_seconds),
        )?);

        Ok(Arc::new(Self {
            config,
            runtime,
            bootstrap,
            query,
            prober: Arc::new(prober),
        }))
    }

    pub fn config(&self) -> &dyn ConfigService {
        self.config.as_ref()
    }

    pub fn runtime(&self) -> &dyn RuntimeConfigService {
        self.runtime.as_ref()
    }

    pub fn bootstrap(&self) -> &Bootstrap {
        &self.bootstrap
    }

    pub fn query(&self) -> &dyn QueryService {
        self.query.as_ref()
    }

    pub fn prober(&self) -> &Prober {
        self.prober.as_ref()
    }
}
