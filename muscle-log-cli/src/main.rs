use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use muscle_log_cli::commands::Cli;

fn main() -> Result<()> {
    // Parse command line arguments
    let cli = Cli::parse();

    // Initialize logging on stderr so chart output stays clean
    let filter = if cli.verbose {
        EnvFilter::new("muscle_log_cli=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    // One session, one thread
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?
        .block_on(async { cli.execute().await })
}
