//! adminkit command-line front end
//!
//! Loads an admin configuration, opens the JSON data snapshot it names and
//! runs one command against the configured objects:
//!
//!   adminkit --config adminkit.toml create book title=Dune pages=412
//!   adminkit list book
//!   adminkit editor book --id 1 --format json
//!
//! Command results are printed to stdout as JSON (or HTML for rendered
//! editors and tables); logs go to stderr.

use std::path::PathBuf;
use std::process::ExitCode;

use adminkit_cli::{AdminConfig, Command, Registry, execute};
use adminkit_storage::HostStore;
use anyhow::{Context, Result};
use clap::Parser;
use tracing::{Level, info, warn};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser, Debug)]
#[command(name = "adminkit")]
#[command(about = "Manage adminkit objects from the command line")]
struct Args {
    /// Path to the admin configuration file
    #[arg(short, long, default_value = "adminkit.toml")]
    config: PathBuf,

    /// Data snapshot to use instead of the configured one
    #[arg(short, long)]
    data: Option<PathBuf>,

    /// Enable verbose debug logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

fn main() -> Result<ExitCode> {
    let args = Args::parse();
    let log_level = if args.verbose { Level::DEBUG } else { Level::INFO };
    FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();

    let config = AdminConfig::load_from(&args.config)
        .with_context(|| format!("Failed to load config {:?}", args.config))?;
    let data_file = args.data.unwrap_or_else(|| config.data_file.clone());
    let host = HostStore::open(&data_file)
        .with_context(|| format!("Failed to open data file {:?}", data_file))?;
    let mut registry =
        Registry::build(&config, host).context("Failed to build object registry")?;
    info!(objects = registry.len(), "Registry ready");

    let report = execute(&mut registry, &args.command)?;
    if report.mutated {
        registry
            .host()
            .persist()
            .context("Failed to persist data file")?;
        info!("Saved data to {:?}", data_file);
    }

    println!("{}", report.output);
    if report.success {
        Ok(ExitCode::SUCCESS)
    } else {
        warn!("Command failed");
        Ok(ExitCode::FAILURE)
    }
}
