use std::time::Duration;

use anyhow::{bail, Context, Result};
use reqwest::Client;
use serde_json::Value;

use excuse_common::{ExcuseForm, ExcuseResponse};

pub struct GatewayClient {
    http: Client,
    base_url: String,
}

impl GatewayClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .context("failed to build http client")?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Failed generations come back as a response with `success=false`;
    /// only an unreachable or non-conforming gateway is an `Err`.
    pub async fn generate(&self, form: &ExcuseForm) -> Result<ExcuseResponse> {
        let resp = self
            .http
            .post(self.url("/api/generate-excuse"))
            .json(form)
            .send()
            .await
            .with_context(|| format!("failed to reach gateway at {}", self.base_url))?;

        let status = resp.status();
        let text = resp.text().await?;
        match serde_json::from_str::<ExcuseResponse>(&text) {
            Ok(parsed) => Ok(parsed),
            Err(_) => bail!("gateway returned HTTP {status}: {text}"),
        }
    }

    pub async fn health(&self) -> Result<Value> {
        let resp = self
            .http
            .get(self.url("/health"))
            .send()
            .await
            .with_context(|| format!("failed to reach gateway at {}", self.base_url))?;
        if !resp.status().is_success() {
            bail!("gateway unhealthy: HTTP {}", resp.status());
        }
        Ok(resp.json().await?)
    }
}
