use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::{json, Value};

use crate::config::GeneratorConfig;
use crate::error::GenerationError;

/// One call to a text-generation service: prompt in, reply text out.
#[async_trait]
pub trait GenerationClient: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<String, GenerationError>;
}

#[derive(Debug, Clone)]
pub struct HttpGenerationClient {
    config: Arc<GeneratorConfig>,
    http: reqwest::Client,
}

impl HttpGenerationClient {
    pub fn new(config: Arc<GeneratorConfig>) -> reqwest::Result<Self> {
        let http = reqwest::Client::builder()
            .connect_timeout(config.timeout.min(Duration::from_secs(3)))
            .timeout(config.timeout)
            .build()?;

        Ok(Self { config, http })
    }
}

#[async_trait]
impl GenerationClient for HttpGenerationClient {
    async fn complete(&self, prompt: &str) -> Result<String, GenerationError> {
        let token = self
            .config
            .api_token
            .as_deref()
            .ok_or(GenerationError::MissingCredential)?;

        let body = json!({
            "messages": [{"role": "user", "content": prompt}],
            "max_tokens": self.config.max_tokens,
            "temperature": self.config.temperature,
        });

        let timeout = self.config.timeout;
        let resp = self
            .http
            .post(&self.config.endpoint_url)
            .bearer_auth(token)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(error=%e, "generation request failed");
                GenerationError::from_reqwest(e, timeout)
            })?;

        let status = resp.status();
        if !status.is_success() {
            let text = resp.text().await.unwrap_or_default();
            tracing::error!(%status, body=%text, "generation endpoint returned error");
            return Err(GenerationError::Upstream {
                status: status.as_u16(),
            });
        }

        let raw = resp
            .text()
            .await
            .map_err(|e| GenerationError::from_reqwest(e, timeout))?;
        tracing::debug!(bytes = raw.len(), "generation endpoint replied");

        Ok(reply_text(&raw))
    }
}

/// Pulls the generated text out of a serving-endpoint reply.
///
/// Chat completions, legacy completions and prediction envelopes are
/// recognised. A bare JSON string is decoded, any other JSON is returned
/// serialized, and non-JSON verbatim.
pub fn reply_text(raw: &str) -> String {
    match serde_json::from_str::<Value>(raw) {
        Ok(Value::String(s)) => s,
        Ok(v) => envelope_text(&v).unwrap_or_else(|| v.to_string()),
        Err(_) => raw.to_string(),
    }
}

fn envelope_text(v: &Value) -> Option<String> {
    if let Some(choice) = v.get("choices").and_then(|c| c.get(0)) {
        let text = choice
            .get("message")
            .and_then(|m| m.get("content"))
            .and_then(content_text)
            .or_else(|| choice.get("text").and_then(Value::as_str).map(str::to_string));
        if text.is_some() {
            return text;
        }
    }

    if let Some(prediction) = v.get("predictions").and_then(|p| p.get(0)) {
        return match prediction {
            Value::String(s) => Some(s.clone()),
            other => envelope_text(other).or_else(|| Some(other.to_string())),
        };
    }

    v.get("content").and_then(content_text)
}

// Reasoning models return content as typed parts; only text parts count.
fn content_text(content: &Value) -> Option<String> {
    match content {
        Value::String(s) => Some(s.clone()),
        Value::Array(parts) => {
            let texts: Vec<&str> = parts
                .iter()
                .filter(|p| {
                    p.get("type")
                        .and_then(Value::as_str)
                        .is_none_or(|t| t == "text" || t == "output_text")
                })
                .filter_map(|p| p.get("text").and_then(Value::as_str))
                .collect();
            (!texts.is_empty()).then(|| texts.concat())
        }
        _ => None,
    }
}

/// Canned client for tests and offline runs. Counts every call.
#[derive(Debug)]
pub struct StubGenerationClient {
    reply: Result<String, GenerationError>,
    calls: AtomicUsize,
}

impl StubGenerationClient {
    pub fn replying(text: impl Into<String>) -> Self {
        Self {
            reply: Ok(text.into()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing(err: GenerationError) -> Self {
        Self {
            reply: Err(err),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl GenerationClient for StubGenerationClient {
    async fn complete(&self, _prompt: &str) -> Result<String, GenerationError> {
        self.calls.fetch_add(1, Ordering::Relaxed);
        self.reply.clone()
    }
}
