use async_trait::async_trait;
use redis::aio::MultiplexedConnection;
use redis::AsyncCommands;
use std::{
    collections::HashMap,
    io::ErrorKind,
    path::{Path, PathBuf},
    sync::Arc,
};
use tokio::sync::{Mutex, RwLock};

use crate::config::{Config, StoreBackend};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("redis error: {0}")]
    Redis(#[from] redis::RedisError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("serde error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("store misconfigured: {0}")]
    Misconfigured(String),
}

/// Key-value persistence for the runtime configuration record.
///
/// Values come back as raw bytes; decoding is the caller's concern so that a
/// corrupt entry can be told apart from a missing one.
#[async_trait]
pub trait ConfigStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError>;
    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;
    async fn remove(&self, key: &str) -> Result<(), StoreError>;
}

#[derive(Default)]
pub struct MemoryConfigStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryConfigStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ConfigStore for MemoryConfigStore {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        Ok(self
            .entries
            .read()
            .await
            .get(key)
            .map(|value| value.clone().into_bytes()))
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries
            .write()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.entries.write().await.remove(key);
        Ok(())
    }
}

/// One JSON file per key inside `dir`.
pub struct FileConfigStore {
    dir: PathBuf,
    write_lock: Mutex<()>,
}

impl FileConfigStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            write_lock: Mutex::new(()),
        }
    }

    fn file_name(key: &str) -> String {
        let safe: String = key
            .chars()
            .map(|ch| {
                if ch.is_ascii_alphanumeric() || ch == '-' || ch == '_' || ch == '.' {
                    ch
                } else {
                    '_'
                }
            })
            .collect();
        format!("{safe}.json")
    }

    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(Self::file_name(key))
    }

    fn temp_path(path: &Path) -> PathBuf {
        let mut tmp = path.as_os_str().to_owned();
        tmp.push(".tmp");
        PathBuf::from(tmp)
    }
}

#[async_trait]
impl ConfigStore for FileConfigStore {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        match tokio::fs::read(self.path_for(key)).await {
            Ok(value) => Ok(Some(value)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let _guard = self.write_lock.lock().await;
        tokio::fs::create_dir_all(&self.dir).await?;
        let path = self.path_for(key);
        // rename is atomic, readers never see a half-written record
        let tmp = Self::temp_path(&path);
        tokio::fs::write(&tmp, value).await?;
        tokio::fs::rename(&tmp, &path).await?;
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StoreError> {
        let _guard = self.write_lock.lock().await;
        match tokio::fs::remove_file(self.path_for(key)).await {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}

pub struct RedisConfigStore {
    conn: Arc<Mutex<MultiplexedConnection>>,
    key_prefix: String,
}

impl RedisConfigStore {
    pub async fn new(redis_url: &str, key_prefix: String) -> Result<Self, StoreError> {
        let client = redis::Client::open(redis_url)?;
        let conn = client.get_multiplexed_async_connection().await?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
            key_prefix,
        })
    }

    fn key(&self, key: &str) -> String {
        format!("{}:{}", self.key_prefix, key)
    }
}

#[async_trait]
impl ConfigStore for RedisConfigStore {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        let mut conn = self.conn.lock().await;
        let value: Option<Vec<u8>> = conn.get(self.key(key)).await?;
        Ok(value)
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut conn = self.conn.lock().await;
        conn.set::<_, _, ()>(self.key(key), value).await?;
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StoreError> {
        let mut conn = self.conn.lock().await;
        let _: () = conn.del(self.key(key)).await?;
        Ok(())
    }
}

/// Opens the backend selected by `CONFIG_STORE`.
pub async fn open_store(config: &Config) -> Result<Arc<dyn ConfigStore>, StoreError> {
    match config.store_backend {
        StoreBackend::File => {
            tracing::info!(dir = %config.store_dir.display(), "using file config store");
            Ok(Arc::new(FileConfigStore::new(config.store_dir.clone())))
        }
        StoreBackend::Redis => {
            let Some(url) = config.redis_url.as_deref() else {
                return Err(StoreError::Misconfigured(
                    "CONFIG_STORE=redis but REDIS_URL is not set".to_string(),
                ));
            };
            tracing::info!(prefix = %config.key_prefix, "using redis config store");
            Ok(Arc::new(
                RedisConfigStore::new(url, config.key_prefix.clone()).await?,
            ))
        }
        StoreBackend::Memory => {
            tracing::warn!("using in-memory config store; saved settings are lost on restart");
            Ok(Arc::new(MemoryConfigStore::new()))
        }
    }
}
