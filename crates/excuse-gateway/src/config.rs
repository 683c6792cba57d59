use std::time::Duration;

use serde_json::{json, Value};

use crate::args::Args;

/// Settings for the text-generation endpoint, fixed at startup.
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    pub endpoint_url: String,
    pub api_token: Option<String>,
    pub timeout: Duration,
    pub max_tokens: u32,
    pub temperature: f32,
}

impl GeneratorConfig {
    pub fn new(endpoint_url: impl Into<String>, api_token: Option<String>) -> Self {
        Self {
            endpoint_url: endpoint_url.into(),
            api_token: api_token.filter(|t| !t.trim().is_empty()),
            timeout: Duration::from_secs(30),
            max_tokens: 1000,
            temperature: 0.7,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Effective settings with the credential masked.
    pub fn redacted(&self) -> Value {
        json!({
            "endpoint_url": self.endpoint_url,
            "api_token": if self.api_token.is_some() { "***" } else { "Not set" },
            "timeout_secs": self.timeout.as_secs_f64(),
            "max_tokens": self.max_tokens,
            "temperature": self.temperature,
        })
    }
}

impl From<&Args> for GeneratorConfig {
    fn from(args: &Args) -> Self {
        Self {
            endpoint_url: args.endpoint_url.clone(),
            api_token: args.api_token.clone().filter(|t| !t.trim().is_empty()),
            timeout: Duration::from_secs(args.timeout_secs.max(1)),
            max_tokens: args.max_tokens,
            temperature: args.temperature,
        }
    }
}
