//! VyOS CLI - Command-line tool for the VyOS HTTP API
//!
//! Runs single commands or an interactive session against one device.

mod commands;
mod config;
mod output;

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use vyos_client::VyosClient;

use crate::commands::Commands;
use crate::config::{Config, MergedConfig};
use crate::output::{OutputContext, OutputFormat};

#[derive(Parser)]
#[command(name = "vyos-cli")]
#[command(author, version, about = "VyOS HTTP API CLI")]
#[command(propagate_version = true)]
struct Cli {
    /// Device URL (e.g. https://192.168.0.1)
    #[arg(short, long, env = "VYOS_URL")]
    url: Option<String>,

    /// API key
    #[arg(short, long, env = "VYOS_API_KEY", hide_env_values = true)]
    key: Option<String>,

    /// Validate the device TLS certificate
    #[arg(long)]
    verify_tls: bool,

    /// Configuration file path
    #[arg(short, long, env = "VYOS_CONFIG")]
    config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum)]
    output: Option<OutputFormat>,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,

    /// Minimal output (for scripting)
    #[arg(short, long)]
    quiet: bool,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();

    // Load config file
    let config = if let Some(config_path) = &cli.config {
        Config::load_from(config_path)?
    } else {
        Config::load()?
    };

    // Merge CLI args with config
    let merged = config.merge_with_args(
        cli.url.as_deref(),
        cli.key.as_deref(),
        cli.verify_tls,
        cli.output,
    );

    let ctx = OutputContext::new(merged.output, cli.no_color, cli.quiet);
    let client = create_client(&merged)?;

    match &cli.command {
        Commands::Repl => commands::repl(&client, &ctx).await,
        command => commands::execute(&client, command, &ctx).await,
    }
}

/// Create a VyOS client from the merged settings
fn create_client(merged: &MergedConfig) -> Result<VyosClient> {
    VyosClient::from_config(merged.client_config()?).context("Failed to create VyOS client")
}
