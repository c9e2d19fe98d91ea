//! Test fixtures
//!
//! Configuration, a scripted translator and ready-made gateway state.

use async_trait::async_trait;
use lingo_cache::{MemoryStore, RoomStore};
use lingo_common::AppConfig;
use lingo_core::{KeyValueStore, Language, TranslateError, Translator};
use lingo_gateway::GatewayState;
use lingo_translate::TranslationPipeline;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Counter for unique test data
static COUNTER: AtomicU64 = AtomicU64::new(1);

/// Get a unique suffix for test data
pub fn unique_suffix() -> u64 {
    COUNTER.fetch_add(1, Ordering::SeqCst)
}

/// One recorded translator call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslateCall {
    pub text: String,
    pub from: Language,
    pub to: Language,
}

/// Translator double
///
/// Answers `"[{to}] {text}"`, fails for the configured targets, and records
/// every call.
#[derive(Debug, Default)]
pub struct ScriptedTranslator {
    failing: Vec<Language>,
    calls: Mutex<Vec<TranslateCall>>,
}

impl ScriptedTranslator {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// A translator whose calls to `targets` fail
    pub fn failing(targets: &[Language]) -> Arc<Self> {
        Arc::new(Self {
            failing: targets.to_vec(),
            ..Self::default()
        })
    }

    pub fn calls(&self) -> Vec<TranslateCall> {
        self.calls.lock().clone()
    }

    /// The text this translator produces for a successful call
    pub fn rendering(text: &str, to: Language) -> String {
        format!("[{to}] {text}")
    }
}

#[async_trait]
impl Translator for ScriptedTranslator {
    async fn translate(&self, text: &str, from: Language, to: Language) -> Result<String, TranslateError> {
        self.calls.lock().push(TranslateCall {
            text: text.to_string(),
            from,
            to,
        });

        if self.failing.contains(&to) {
            return Err(TranslateError::Backend(format!("{to} unavailable")));
        }
        Ok(Self::rendering(text, to))
    }
}

/// Configuration for an in-memory gateway, with `overrides` applied on top
pub fn memory_config(overrides: &[(&str, &str)]) -> AppConfig {
    let mut vars: HashMap<String, String> = [
        ("STORAGE_BACKEND", "memory"),
        ("GATEWAY_HOST", "127.0.0.1"),
        ("GATEWAY_PORT", "0"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect();

    for (key, value) in overrides {
        vars.insert((*key).to_string(), (*value).to_string());
    }

    AppConfig::from_lookup(|key| vars.get(key).cloned()).expect("valid test configuration")
}

/// Gateway state over the given store and translator
pub fn gateway_state_with(
    config: AppConfig,
    store: Arc<dyn KeyValueStore>,
    translator: Arc<dyn Translator>,
) -> GatewayState {
    let room_store = RoomStore::new(store, config.history.capacity);
    GatewayState::new(config, room_store, TranslationPipeline::new(translator))
}

/// Gateway state over a fresh in-memory store
pub fn memory_state(translator: Arc<dyn Translator>) -> GatewayState {
    gateway_state_with(memory_config(&[]), Arc::new(MemoryStore::new()), translator)
}
