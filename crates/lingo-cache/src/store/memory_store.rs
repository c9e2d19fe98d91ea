//! Process-local key-value store.
//!
//! Mirrors the subset of Redis semantics the room store relies on. Every
//! operation takes a single lock for its whole duration and never awaits
//! while holding it, so each call (including the capped push) is atomic.

use async_trait::async_trait;
use lingo_core::{KeyValueStore, StorageResult};
use parking_lot::Mutex;
use std::collections::{HashMap, HashSet, VecDeque};

#[derive(Debug, Default)]
struct MemoryState {
    strings: HashMap<String, String>,
    sets: HashMap<String, HashSet<String>>,
    lists: HashMap<String, VecDeque<String>>,
}

/// In-memory `KeyValueStore`, lost on restart
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: Mutex<MemoryState>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

/// Resolve a Redis-style inclusive range against a list of `len` elements
fn resolve_range(len: usize, start: isize, stop: isize) -> Option<(usize, usize)> {
    let len = isize::try_from(len).ok()?;
    let start = if start < 0 { (len + start).max(0) } else { start };
    let stop = if stop < 0 { len + stop } else { stop.min(len - 1) };

    if len == 0 || start > stop || start >= len {
        return None;
    }
    Some((start as usize, stop as usize))
}

fn trim(list: &mut VecDeque<String>, start: isize, stop: isize) {
    match resolve_range(list.len(), start, stop) {
        Some((start, stop)) => {
            list.truncate(stop + 1);
            list.drain(..start);
        }
        None => list.clear(),
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn set_add(&self, key: &str, member: &str) -> StorageResult<()> {
        self.state
            .lock()
            .sets
            .entry(key.to_string())
            .or_default()
            .insert(member.to_string());
        Ok(())
    }

    async fn set_members(&self, key: &str) -> StorageResult<Vec<String>> {
        Ok(self
            .state
            .lock()
            .sets
            .get(key)
            .map(|set| set.iter().cloned().collect())
            .unwrap_or_default())
    }

    async fn get_string(&self, key: &str) -> StorageResult<Option<String>> {
        Ok(self.state.lock().strings.get(key).cloned())
    }

    async fn set_string(&self, key: &str, value: &str) -> StorageResult<()> {
        self.state
            .lock()
            .strings
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn list_push_front(&self, key: &str, value: &str) -> StorageResult<()> {
        self.state
            .lock()
            .lists
            .entry(key.to_string())
            .or_default()
            .push_front(value.to_string());
        Ok(())
    }

    async fn list_trim(&self, key: &str, start: isize, stop: isize) -> StorageResult<()> {
        let mut state = self.state.lock();
        if let Some(list) = state.lists.get_mut(key) {
            trim(list, start, stop);
            if list.is_empty() {
                state.lists.remove(key);
            }
        }
        Ok(())
    }

    async fn list_range(&self, key: &str, start: isize, stop: isize) -> StorageResult<Vec<String>> {
        let state = self.state.lock();
        let Some(list) = state.lists.get(key) else {
            return Ok(Vec::new());
        };

        Ok(match resolve_range(list.len(), start, stop) {
            Some((start, stop)) => list.range(start..=stop).cloned().collect(),
            None => Vec::new(),
        })
    }

    async fn list_push_front_capped(
        &self,
        key: &str,
        value: &str,
        capacity: usize,
    ) -> StorageResult<()> {
        let mut state = self.state.lock();
        let list = state.lists.entry(key.to_string()).or_default();
        list.push_front(value.to_string());
        list.truncate(capacity);
        if list.is_empty() {
            state.lists.remove(key);
        }
        Ok(())
    }
}
