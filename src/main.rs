use anyhow::Result;
use clap::Parser;
use todopilot::Config;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

/// No flags, no subcommands: start it and type. clap still provides
/// `--help`/`--version` and rejects stray arguments.
#[derive(Debug, Parser)]
#[command(
    name = "todopilot",
    version,
    about = "Conversational to-do assistant for the terminal"
)]
struct Cli {}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    let _cli = Cli::parse();
    let config = Config::load_or_init()?;
    todopilot::run(config).await
}
