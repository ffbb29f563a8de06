mod cli;
mod config;
mod date;
mod emoji;
mod error;
mod i18n;
mod output;
mod pipeline;

use anyhow::Result;
use clap::Parser;
use cli::Cli;
use log::info;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    output::print_banner();

    let cli = Cli::parse();
    info!("Starting pipeview - CI/CD Pipeline Viewer");
    cli.execute().await?;

    Ok(())
}
