//! Redis-backed key-value store.

use crate::pool::{RedisPool, RedisPoolError};
use async_trait::async_trait;
use lingo_core::traits::capacity_stop;
use lingo_core::{KeyValueStore, StorageResult};
use redis::AsyncCommands;

/// `KeyValueStore` over a pooled Redis connection
#[derive(Clone, Debug)]
pub struct RedisStore {
    pool: RedisPool,
}

impl RedisStore {
    /// Create a new store on top of an existing pool
    #[must_use]
    pub fn new(pool: RedisPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl KeyValueStore for RedisStore {
    async fn set_add(&self, key: &str, member: &str) -> StorageResult<()> {
        let mut conn = self.pool.get().await?;
        conn.sadd::<_, _, ()>(key, member).await.map_err(RedisPoolError::Command)?;
        Ok(())
    }

    async fn set_members(&self, key: &str) -> StorageResult<Vec<String>> {
        let mut conn = self.pool.get().await?;
        let members: Vec<String> = conn.smembers(key).await.map_err(RedisPoolError::Command)?;
        Ok(members)
    }

    async fn get_string(&self, key: &str) -> StorageResult<Option<String>> {
        let mut conn = self.pool.get().await?;
        let value: Option<String> = conn.get(key).await.map_err(RedisPoolError::Command)?;
        Ok(value)
    }

    async fn set_string(&self, key: &str, value: &str) -> StorageResult<()> {
        let mut conn = self.pool.get().await?;
        conn.set::<_, _, ()>(key, value).await.map_err(RedisPoolError::Command)?;
        Ok(())
    }

    async fn list_push_front(&self, key: &str, value: &str) -> StorageResult<()> {
        let mut conn = self.pool.get().await?;
        conn.lpush::<_, _, ()>(key, value).await.map_err(RedisPoolError::Command)?;
        Ok(())
    }

    async fn list_trim(&self, key: &str, start: isize, stop: isize) -> StorageResult<()> {
        let mut conn = self.pool.get().await?;
        conn.ltrim::<_, ()>(key, start, stop).await.map_err(RedisPoolError::Command)?;
        Ok(())
    }

    async fn list_range(&self, key: &str, start: isize, stop: isize) -> StorageResult<Vec<String>> {
        let mut conn = self.pool.get().await?;
        let values: Vec<String> = conn
            .lrange(key, start, stop)
            .await
            .map_err(RedisPoolError::Command)?;
        Ok(values)
    }

    /// LPUSH + LTRIM inside one MULTI/EXEC so concurrent appends to the same
    /// room never observe an untrimmed list
    async fn list_push_front_capped(
        &self,
        key: &str,
        value: &str,
        capacity: usize,
    ) -> StorageResult<()> {
        let mut conn = self.pool.get().await?;
        redis::pipe()
            .atomic()
            .lpush(key, value)
            .ignore()
            .ltrim(key, 0, capacity_stop(capacity))
            .ignore()
            .query_async::<()>(&mut conn)
            .await
            .map_err(RedisPoolError::Command)?;
        Ok(())
    }
}
