//! `heavy`: query the HeavyMarket console backend from the terminal.
//!
//! Usage:
//!   heavy list fabricantes --page 2 --search cat
//!   heavy get quotes 42
//!   heavy delete carriers 7
//!
//! `HEAVY_API_URL` and `HEAVY_API_TOKEN` configure the backend.

use anyhow::Result;
use clap::Parser;
use heavy_cli::Args;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let filter = if args.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();

    let output = heavy_cli::run(&args).await?;
    println!("{output}");
    Ok(())
}
