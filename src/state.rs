use std::sync::Arc;

use tracing::{info, warn};

use crate::auth::jwt::JwtKeys;
use crate::config::{AppConfig, StorageMode};
use crate::storage::{EphemeralStorage, PersistentStorage, Storage};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub storage: Arc<dyn Storage>,
    pub keys: JwtKeys,
}

impl AppState {
    pub async fn init() -> anyhow::Result<Self> {
        let config = Arc::new(AppConfig::from_env()?);
        let storage = open_storage(&config).await?;
        info!(storage = storage.kind().as_str(), "storage selected");
        Ok(Self::from_parts(config, storage))
    }

    pub fn from_parts(config: Arc<AppConfig>, storage: Arc<dyn Storage>) -> Self {
        let keys = JwtKeys::from_config(&config.jwt);
        Self {
            config,
            storage,
            keys,
        }
    }

    /// In-memory state with a fixed JWT config, for tests.
    #[cfg(test)]
    pub fn fake() -> Self {
        Self::from_parts(Arc::new(test_config()), Arc::new(EphemeralStorage::new()))
    }
}

#[cfg(test)]
fn test_config() -> AppConfig {
    use crate::config::{DatabaseConfig, JwtConfig};

    AppConfig {
        host: "127.0.0.1".into(),
        port: 0,
        storage_mode: StorageMode::Ephemeral,
        database: DatabaseConfig {
            host: "localhost".into(),
            port: 5432,
            user: "postgres".into(),
            password: "postgres".into(),
            name: "organ_finder_test".into(),
            max_connections: 1,
            acquire_timeout_secs: 1,
            url: None,
        },
        jwt: JwtConfig {
            secret: "test-secret".into(),
            issuer: "test-issuer".into(),
            audience: "test-aud".into(),
            ttl_minutes: 60 * 24,
        },
    }
}

/// Picks the backend once; the choice holds for the life of the process.
async fn open_storage(config: &AppConfig) -> anyhow::Result<Arc<dyn Storage>> {
    match config.storage_mode {
        StorageMode::Persistent => {
            let storage = PersistentStorage::connect(&config.database).await?;
            Ok(Arc::new(storage))
        }
        StorageMode::Ephemeral => {
            warn!("STORAGE_MODE=ephemeral: data is kept in memory and lost on restart");
            Ok(Arc::new(EphemeralStorage::new()))
        }
        StorageMode::Auto => match PersistentStorage::connect(&config.database).await {
            Ok(storage) => Ok(Arc::new(storage)),
            Err(e) => {
                warn!(
                    error = ?e,
                    "database unreachable; running in degraded mode with ephemeral storage"
                );
                Ok(Arc::new(EphemeralStorage::new()))
            }
        },
    }
}
