//! Pooled Redis connections for the storage adapter.

use std::time::Duration;

use deadpool_redis::{Config, Pool, Runtime};
use lingo_core::StorageError;

/// Upper bound on waiting for a free pooled connection
const CHECKOUT_TIMEOUT: Duration = Duration::from_secs(5);

/// Pool settings
#[derive(Debug, Clone)]
pub struct RedisPoolConfig {
    /// `redis://[user:password@]host:port[/db]`
    pub url: String,
    pub max_connections: usize,
}

impl From<&lingo_common::RedisConfig> for RedisPoolConfig {
    fn from(config: &lingo_common::RedisConfig) -> Self {
        Self {
            url: config.url.clone(),
            max_connections: config.max_connections as usize,
        }
    }
}

/// Failures talking to Redis
#[derive(Debug, thiserror::Error)]
pub enum RedisPoolError {
    #[error("Invalid Redis pool settings: {0}")]
    Build(String),

    #[error("No Redis connection available: {0}")]
    Checkout(#[from] deadpool_redis::PoolError),

    #[error("Redis command failed: {0}")]
    Command(#[from] redis::RedisError),

    #[error("Unexpected reply to PING: {0}")]
    UnexpectedReply(String),
}

impl From<RedisPoolError> for StorageError {
    fn from(err: RedisPoolError) -> Self {
        StorageError::Backend(err.to_string())
    }
}

pub type RedisResult<T> = Result<T, RedisPoolError>;

/// Shared handle to a deadpool-managed set of Redis connections
#[derive(Clone)]
pub struct RedisPool {
    pool: Pool,
}

impl RedisPool {
    pub fn new(config: RedisPoolConfig) -> RedisResult<Self> {
        let pool = Config::from_url(&config.url)
            .builder()
            .map_err(|e| RedisPoolError::Build(e.to_string()))?
            .max_size(config.max_connections.max(1))
            .wait_timeout(Some(CHECKOUT_TIMEOUT))
            .runtime(Runtime::Tokio1)
            .build()
            .map_err(|e| RedisPoolError::Build(e.to_string()))?;

        tracing::info!(
            url = %redacted(&config.url),
            max_connections = config.max_connections,
            "Redis pool created"
        );

        Ok(Self { pool })
    }

    pub fn from_config(config: &lingo_common::RedisConfig) -> RedisResult<Self> {
        Self::new(RedisPoolConfig::from(config))
    }

    /// Check out a connection, waiting at most five seconds
    pub async fn get(&self) -> RedisResult<deadpool_redis::Connection> {
        Ok(self.pool.get().await?)
    }

    /// Round-trip a PING; used once at startup
    pub async fn health_check(&self) -> RedisResult<()> {
        let mut conn = self.get().await?;
        let reply: String = redis::cmd("PING").query_async(&mut conn).await?;
        if reply != "PONG" {
            return Err(RedisPoolError::UnexpectedReply(reply));
        }
        Ok(())
    }
}

impl std::fmt::Debug for RedisPool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let status = self.pool.status();
        f.debug_struct("RedisPool")
            .field("size", &status.size)
            .field("available", &status.available)
            .field("max_size", &status.max_size)
            .finish()
    }
}

/// Drop the userinfo part of a connection URL
fn redacted(url: &str) -> String {
    match (url.split_once("://"), url.rsplit_once('@')) {
        (Some((scheme, _)), Some((_, host))) => format!("{scheme}://{host}"),
        _ => url.to_string(),
    }
}
