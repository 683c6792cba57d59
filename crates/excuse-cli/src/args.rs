use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "excuse")]
#[command(about = "Draft excuse emails through the excuse gateway", long_about = None)]
pub struct Args {
    /// Gateway URL
    #[arg(
        long,
        env = "EXCUSE_GATEWAY_URL",
        default_value = "http://127.0.0.1:8000"
    )]
    pub gateway_url: String,

    /// Give up on the gateway after this many seconds
    #[arg(long, default_value_t = 60)]
    pub timeout_secs: u64,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Generate an excuse email
    Generate(GenerateArgs),
    /// Check that the gateway is up
    Health,
    /// List accepted categories, tones and seriousness levels
    Options,
}

#[derive(Debug, clap::Args)]
pub struct GenerateArgs {
    /// Situation, e.g. "Running Late" or running-late
    #[arg(long, default_value = "running-late")]
    pub category: String,

    /// Sincere, Playful or Corporate
    #[arg(long, default_value = "Sincere")]
    pub tone: String,

    /// 1 (silly) to 5 (very serious)
    #[arg(long, default_value_t = 3, allow_negative_numbers = true)]
    pub seriousness: i64,

    /// Who the email is addressed to
    #[arg(long)]
    pub recipient: String,

    /// Who signs the email
    #[arg(long)]
    pub sender: String,

    /// Timing, e.g. "15 minutes"
    #[arg(long)]
    pub eta: Option<String>,

    /// Print the raw gateway response
    #[arg(long)]
    pub json: bool,
}
