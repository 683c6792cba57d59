use std::sync::Arc;

use excuse_gateway::args::Args;
use excuse_gateway::config::GeneratorConfig;
use excuse_gateway::engine::{GenerationClient, HttpGenerationClient};
use excuse_gateway::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let (args, env_file) = Args::load();

    let otel = excuse_common::telemetry::init_tracing(
        "excuse-gateway",
        args.otlp_url.as_deref(),
        args.otlp_token.as_deref(),
        args.log_format,
    );

    if let Some(path) = env_file {
        tracing::info!(path = %path.display(), "loaded environment file");
    }

    let config = Arc::new(GeneratorConfig::from(&args));
    if config.api_token.is_none() {
        tracing::warn!("DATABRICKS_API_TOKEN not set, generation requests will fail");
    }

    let client: Arc<dyn GenerationClient> = Arc::new(HttpGenerationClient::new(config.clone())?);
    let st = AppState::new(config.clone(), client);
    let app = excuse_gateway::router(st);

    let addr = args.listen_addr();
    tracing::info!(
        %addr,
        endpoint_url = %config.endpoint_url,
        timeout_secs = config.timeout.as_secs(),
        "gateway starting"
    );

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            tracing::info!("shutdown signal received");
        })
        .await?;

    if let Some(provider) = otel {
        if let Err(e) = provider.shutdown() {
            eprintln!("failed to flush traces: {e}");
        }
    }
    Ok(())
}
