use std::str::FromStr;

use anyhow::Context;
use serde::Deserialize;
use tracing::warn;

const DEV_JWT_SECRET: &str = "organ-finder-dev-secret";

#[derive(Debug, Clone, Deserialize)]
pub struct JwtConfig {
    pub secret: String,
    pub issuer: String,
    pub audience: String,
    pub ttl_minutes: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub name: String,
    pub max_connections: u32,
    /// Upper bound on waiting for a pooled connection, the first connect included.
    pub acquire_timeout_secs: u64,
    /// Full connection string; takes precedence over the discrete fields.
    pub url: Option<String>,
}

/// Which storage backend the process runs on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageMode {
    /// Try the database, fall back to ephemeral storage if it is unreachable.
    Auto,
    Persistent,
    Ephemeral,
}

impl FromStr for StorageMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "auto" => Ok(Self::Auto),
            "persistent" => Ok(Self::Persistent),
            "ephemeral" => Ok(Self::Ephemeral),
            other => anyhow::bail!("unknown STORAGE_MODE {other:?} (expected auto, persistent or ephemeral)"),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub storage_mode: StorageMode,
    pub database: DatabaseConfig,
    pub jwt: JwtConfig,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database = DatabaseConfig {
            host: var_or("DB_HOST", "localhost"),
            port: parse_var("DB_PORT", 5432)?,
            user: var_or("DB_USER", "postgres"),
            password: var_or("DB_PASSWORD", ""),
            name: var_or("DB_NAME", "organ_finder_db"),
            max_connections: parse_var("DB_MAX_CONNECTIONS", 10)?,
            acquire_timeout_secs: parse_var("DB_ACQUIRE_TIMEOUT_SECS", 10)?,
            url: std::env::var("DATABASE_URL").ok().filter(|v| !v.is_empty()),
        };

        let secret = std::env::var("JWT_SECRET").unwrap_or_else(|_| {
            warn!("JWT_SECRET not set, using the development secret");
            DEV_JWT_SECRET.into()
        });
        let jwt = JwtConfig {
            secret,
            issuer: var_or("JWT_ISSUER", "organ-finder"),
            audience: var_or("JWT_AUDIENCE", "organ-finder-users"),
            ttl_minutes: parse_var("JWT_TTL_MINUTES", 60 * 24)?,
        };

        let port = match std::env::var("APP_PORT").or_else(|_| std::env::var("PORT")) {
            Ok(v) => v.parse().with_context(|| format!("invalid listen port {v:?}"))?,
            Err(_) => 5001,
        };

        Ok(Self {
            host: var_or("APP_HOST", "0.0.0.0"),
            port,
            storage_mode: var_or("STORAGE_MODE", "auto").parse()?,
            database,
            jwt,
        })
    }
}

fn var_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parse_var<T>(key: &str, default: T) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(v) => v
            .parse()
            .map_err(|e| anyhow::anyhow!("invalid {key} value {v:?}: {e}")),
        Err(_) => Ok(default),
    }
}
