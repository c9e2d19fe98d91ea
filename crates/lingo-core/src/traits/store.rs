//! Key-value storage port
//!
//! The room registry and message history only need a handful of Redis-like
//! primitives. Infrastructure crates provide the implementations; the domain
//! defines what it needs.
//!
//! List indices follow Redis semantics: `0` is the head, negative indices
//! count from the tail (`-1` is the last element), and ranges are inclusive.

use async_trait::async_trait;

use crate::error::StorageResult;

#[async_trait]
pub trait KeyValueStore: Send + Sync {
    // ========================================================================
    // Sets
    // ========================================================================

    /// Add a member to the set at `key`
    async fn set_add(&self, key: &str, member: &str) -> StorageResult<()>;

    /// All members of the set at `key` (empty if absent)
    async fn set_members(&self, key: &str) -> StorageResult<Vec<String>>;

    // ========================================================================
    // Strings
    // ========================================================================

    async fn get_string(&self, key: &str) -> StorageResult<Option<String>>;

    async fn set_string(&self, key: &str, value: &str) -> StorageResult<()>;

    // ========================================================================
    // Lists
    // ========================================================================

    /// Insert `value` at the head of the list at `key`
    async fn list_push_front(&self, key: &str, value: &str) -> StorageResult<()>;

    /// Keep only the elements in `start..=stop`
    async fn list_trim(&self, key: &str, start: isize, stop: isize) -> StorageResult<()>;

    /// Elements in `start..=stop`, head first
    async fn list_range(&self, key: &str, start: isize, stop: isize) -> StorageResult<Vec<String>>;

    /// Insert at the head, then trim the list to its newest `capacity` entries
    ///
    /// Adapters must make this atomic with respect to other writers of the
    /// same key. The default composes the two primitives and is only suitable
    /// for backends where that is already the case.
    async fn list_push_front_capped(
        &self,
        key: &str,
        value: &str,
        capacity: usize,
    ) -> StorageResult<()> {
        self.list_push_front(key, value).await?;
        self.list_trim(key, 0, capacity_stop(capacity)).await
    }
}

/// Inclusive stop index that keeps `capacity` head elements
pub fn capacity_stop(capacity: usize) -> isize {
    isize::try_from(capacity).unwrap_or(isize::MAX) - 1
}
