use std::path::PathBuf;

/// Where the runtime configuration record is persisted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StoreBackend {
    File,
    Redis,
    Memory,
}

#[derive(Clone, Debug)]
pub struct Config {
    pub port: u16,

    // Origin the dashboard is served from, and the dev server port used for
    // the localhost redirect fallback.
    pub public_origin: String,
    pub dev_port: u16,

    pub store_backend: StoreBackend,
    pub store_dir: PathBuf,
    pub redis_url: Option<String>,
    pub key_prefix: String,

    pub query_timeout_seconds: u64,
    pub probe_timeout_seconds: u64,
}
