use std::path::PathBuf;

use clap::Parser;

use excuse_common::telemetry::LogFormat;

#[derive(Debug, Parser)]
#[command(author, version, about = "Excuse email generator gateway")]
pub struct Args {
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    pub host: String,

    #[arg(long, env = "PORT", default_value_t = 8000)]
    pub port: u16,

    /// Text-generation serving endpoint (full invocations URL).
    #[arg(long, env = "DATABRICKS_ENDPOINT_URL")]
    pub endpoint_url: String,

    /// Bearer token for the serving endpoint.
    #[arg(long, env = "DATABRICKS_API_TOKEN", hide_env_values = true)]
    pub api_token: Option<String>,

    /// Upper bound on one generation call, in seconds.
    #[arg(long, env = "EXCUSE_LLM_TIMEOUT_SECS", default_value_t = 30)]
    pub timeout_secs: u64,

    #[arg(long, env = "EXCUSE_LLM_MAX_TOKENS", default_value_t = 1000)]
    pub max_tokens: u32,

    #[arg(long, env = "EXCUSE_LLM_TEMPERATURE", default_value_t = 0.7)]
    pub temperature: f32,

    #[arg(long, env = "EXCUSE_LOG_FORMAT", default_value = "text")]
    pub log_format: LogFormat,

    /// OTLP endpoint for exporting traces.
    #[arg(long, env = "EXCUSE_OTLP_URL")]
    pub otlp_url: Option<String>,

    /// Bearer token for the OTLP collector.
    #[arg(long, env = "EXCUSE_OTLP_TOKEN", hide_env_values = true)]
    pub otlp_token: Option<String>,
}

impl Args {
    /// Merges `.env` from the working directory into the environment, then
    /// parses. Variables already set in the environment take precedence.
    pub fn load() -> (Self, Option<PathBuf>) {
        let env_file = dotenvy::dotenv().ok();
        (Self::parse(), env_file)
    }

    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
