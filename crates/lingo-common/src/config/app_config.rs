//! Application configuration structs
//!
//! Loads configuration from environment variables (and a `.env` file if present).

use serde::Deserialize;
use std::env;
use std::str::FromStr;

/// Main application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub app: AppSettings,
    pub gateway: ServerConfig,
    pub storage: StorageConfig,
    pub history: HistoryConfig,
    pub translator: TranslatorConfig,
    pub cors: CorsConfig,
}

/// General application settings
#[derive(Debug, Clone, Deserialize)]
pub struct AppSettings {
    #[serde(default = "default_app_name")]
    pub name: String,
    #[serde(default = "default_env")]
    pub env: Environment,
}

/// Environment type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl Environment {
    #[must_use]
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

/// Gateway server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    pub port: u16,
    /// Interval announced to clients in Hello; twice this without a
    /// heartbeat closes the connection
    #[serde(default = "default_heartbeat_interval_ms")]
    pub heartbeat_interval_ms: u64,
}

impl ServerConfig {
    #[must_use]
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Which key-value store backs rooms and history
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    #[default]
    Redis,
    /// Process-local store, lost on restart
    Memory,
}

/// Storage configuration
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    #[serde(default)]
    pub backend: StorageBackend,
    /// Present whenever `backend` is `Redis`
    pub redis: Option<RedisConfig>,
}

/// Redis configuration
#[derive(Debug, Clone, Deserialize)]
pub struct RedisConfig {
    pub url: String,
    #[serde(default = "default_redis_max_connections")]
    pub max_connections: u32,
}

/// Per-room message history configuration
#[derive(Debug, Clone, Deserialize)]
pub struct HistoryConfig {
    /// Most recent messages retained per room
    #[serde(default = "default_history_capacity")]
    pub capacity: usize,
    /// Messages replayed on join when the client does not ask for a limit
    #[serde(default = "default_replay_limit")]
    pub replay_limit: usize,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            capacity: default_history_capacity(),
            replay_limit: default_replay_limit(),
        }
    }
}

/// Translation backend configuration
#[derive(Debug, Clone, Deserialize)]
pub struct TranslatorConfig {
    #[serde(default = "default_translator_url")]
    pub url: String,
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "default_translator_timeout_ms")]
    pub timeout_ms: u64,
}

impl Default for TranslatorConfig {
    fn default() -> Self {
        Self {
            url: default_translator_url(),
            api_key: None,
            timeout_ms: default_translator_timeout_ms(),
        }
    }
}

/// CORS configuration for the upgrade route
#[derive(Debug, Clone, Deserialize)]
pub struct CorsConfig {
    /// Empty means any origin
    #[serde(default)]
    pub allowed_origins: Vec<String>,
}

// Default value functions
fn default_app_name() -> String {
    "lingo".to_string()
}

fn default_env() -> Environment {
    Environment::Development
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_heartbeat_interval_ms() -> u64 {
    45_000
}

fn default_redis_max_connections() -> u32 {
    10
}

fn default_history_capacity() -> usize {
    200
}

fn default_replay_limit() -> usize {
    50
}

fn default_translator_url() -> String {
    "http://127.0.0.1:5000".to_string()
}

fn default_translator_timeout_ms() -> u64 {
    5_000
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    /// Returns an error if required environment variables are missing or invalid
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable source
    ///
    /// # Errors
    /// Returns an error if required variables are missing or invalid
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let backend = match lookup("STORAGE_BACKEND") {
            None => StorageBackend::default(),
            Some(s) => match s.to_lowercase().as_str() {
                "redis" => StorageBackend::Redis,
                "memory" => StorageBackend::Memory,
                _ => return Err(ConfigError::InvalidValue("STORAGE_BACKEND", s)),
            },
        };

        let redis = match (backend, lookup("REDIS_URL")) {
            (_, Some(url)) => Some(RedisConfig {
                url,
                max_connections: parse_or(&lookup, "REDIS_MAX_CONNECTIONS", default_redis_max_connections)?,
            }),
            (StorageBackend::Redis, None) => return Err(ConfigError::MissingVar("REDIS_URL")),
            (StorageBackend::Memory, None) => None,
        };

        let history = HistoryConfig {
            capacity: parse_or(&lookup, "HISTORY_CAPACITY", default_history_capacity)?,
            replay_limit: parse_or(&lookup, "HISTORY_REPLAY_LIMIT", default_replay_limit)?,
        };
        if history.capacity == 0 {
            return Err(ConfigError::InvalidValue("HISTORY_CAPACITY", "0".to_string()));
        }

        let heartbeat_interval_ms =
            parse_or(&lookup, "HEARTBEAT_INTERVAL_MS", default_heartbeat_interval_ms)?;
        if heartbeat_interval_ms == 0 {
            return Err(ConfigError::InvalidValue("HEARTBEAT_INTERVAL_MS", "0".to_string()));
        }

        Ok(Self {
            app: AppSettings {
                name: lookup("APP_NAME").unwrap_or_else(default_app_name),
                env: lookup("APP_ENV")
                    .and_then(|s| match s.to_lowercase().as_str() {
                        "production" => Some(Environment::Production),
                        "staging" => Some(Environment::Staging),
                        "development" => Some(Environment::Development),
                        _ => None,
                    })
                    .unwrap_or_default(),
            },
            gateway: ServerConfig {
                host: lookup("GATEWAY_HOST").unwrap_or_else(default_host),
                port: {
                    let raw = lookup("GATEWAY_PORT").ok_or(ConfigError::MissingVar("GATEWAY_PORT"))?;
                    raw.trim()
                        .parse()
                        .map_err(|_| ConfigError::InvalidValue("GATEWAY_PORT", raw))?
                },
                heartbeat_interval_ms,
            },
            storage: StorageConfig { backend, redis },
            history,
            translator: TranslatorConfig {
                url: lookup("TRANSLATOR_URL").unwrap_or_else(default_translator_url),
                api_key: lookup("TRANSLATOR_API_KEY").filter(|key| !key.is_empty()),
                timeout_ms: parse_or(&lookup, "TRANSLATOR_TIMEOUT_MS", default_translator_timeout_ms)?,
            },
            cors: CorsConfig {
                allowed_origins: lookup("CORS_ALLOWED_ORIGINS")
                    .map(|s| {
                        s.split(',')
                            .map(str::trim)
                            .filter(|origin| !origin.is_empty())
                            .map(String::from)
                            .collect()
                    })
                    .unwrap_or_default(),
            },
        })
    }
}

/// Parse an optional variable, falling back to `default` when unset
fn parse_or<F, T>(lookup: &F, key: &'static str, default: fn() -> T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        None => Ok(default()),
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue(key, raw)),
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(&'static str),

    #[error("Invalid value for {0}: {1}")]
    InvalidValue(&'static str, String),
}
