use anyhow::Result;
use bankledger::cli::Cli;
use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt};

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(cli.log_directive()));
    fmt().with_env_filter(filter).with_writer(std::io::stderr).init();

    cli.run()
}
