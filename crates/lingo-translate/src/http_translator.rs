//! LibreTranslate-compatible HTTP backend.
//!
//! `POST {base_url}/translate` with `{q, source, target, format, api_key?}`,
//! answered by `{"translatedText": ...}`. Each call is bounded by the
//! configured timeout.

use async_trait::async_trait;
use lingo_common::TranslatorConfig;
use lingo_core::{Language, TranslateError, Translator};
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;

#[derive(Serialize)]
struct TranslateRequest<'a> {
    q: &'a str,
    source: &'a str,
    target: &'a str,
    format: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    api_key: Option<&'a str>,
}

pub struct HttpTranslator {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
    timeout: Duration,
}

impl HttpTranslator {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        let base_url: String = base_url.into();
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: None,
            timeout,
        }
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn from_config(config: &TranslatorConfig) -> Self {
        let translator = Self::new(&config.url, Duration::from_millis(config.timeout_ms));
        match &config.api_key {
            Some(key) => translator.with_api_key(key),
            None => translator,
        }
    }

    async fn request(&self, text: &str, from: Language, to: Language) -> Result<Value, TranslateError> {
        let body = TranslateRequest {
            q: text,
            source: from.code(),
            target: to.code(),
            format: "text",
            api_key: self.api_key.as_deref(),
        };

        self.client
            .post(format!("{}/translate", self.base_url))
            .json(&body)
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(|e| TranslateError::Backend(e.to_string()))?
            .json::<Value>()
            .await
            .map_err(|e| TranslateError::MalformedResponse(e.to_string()))
    }
}

/// Pull the translated text out of a response body
///
/// Non-string values are rendered as JSON text; null, missing or blank
/// values are malformed.
fn extract_translated_text(body: &Value) -> Result<String, TranslateError> {
    match body.get("translatedText") {
        Some(Value::String(s)) if !s.trim().is_empty() => Ok(s.clone()),
        Some(Value::String(_)) => Err(TranslateError::MalformedResponse(
            "empty translatedText".to_string(),
        )),
        None | Some(Value::Null) => Err(TranslateError::MalformedResponse(
            "missing translatedText".to_string(),
        )),
        Some(other) => Ok(other.to_string()),
    }
}

#[async_trait]
impl Translator for HttpTranslator {
    async fn translate(
        &self,
        text: &str,
        from: Language,
        to: Language,
    ) -> Result<String, TranslateError> {
        let body = tokio::time::timeout(self.timeout, self.request(text, from, to))
            .await
            .map_err(|_| TranslateError::Timeout(self.timeout.as_millis() as u64))??;

        extract_translated_text(&body)
    }
}

impl std::fmt::Debug for HttpTranslator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpTranslator")
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "***"))
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}
