mod args;
mod client;
mod output;

use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use excuse_common::ExcuseForm;

use crate::args::{Args, Command, GenerateArgs};
use crate::client::GatewayClient;
use crate::output::{print_excuse, print_options};

fn build_form(args: GenerateArgs) -> ExcuseForm {
    ExcuseForm {
        category: Some(args.category),
        tone: Some(args.tone),
        seriousness: Some(args.seriousness),
        recipient_name: Some(args.recipient),
        sender_name: Some(args.sender),
        eta_when: args.eta,
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let client = GatewayClient::new(&args.gateway_url, Duration::from_secs(args.timeout_secs))?;

    match args.command {
        Command::Generate(gen) => {
            let json = gen.json;
            let form = build_form(gen);
            if let Err(e) = form.validate() {
                eprintln!("✗ {e}");
                std::process::exit(2);
            }

            tracing::debug!(gateway = %args.gateway_url, "submitting excuse request");
            let resp = client.generate(&form).await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&resp)?);
            } else {
                print_excuse(&resp);
            }
            if !resp.success {
                std::process::exit(1);
            }
        }
        Command::Health => {
            let status = client.health().await?;
            println!("✓ {}", status);
        }
        Command::Options => print_options(),
    }
    Ok(())
}
