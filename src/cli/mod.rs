//! Command-line interface for config-registry
//!
//! Provides `get`, `list` and `parse` subcommands for inspecting configs.

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod get;
mod list;
mod parse;
mod utils;

use utils::RegistryArgs;

/// Inspect named, multi-instance configuration sets
#[derive(Parser)]
#[command(name = "config-registry")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[command(flatten)]
    registry: RegistryArgs,

    /// Enable verbose logging (sets log level to DEBUG)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Print one config instance, loading it from the config directory
    Get(get::GetArgs),

    /// Load every config in the directory and list names and instances
    List,

    /// Run a format parser on a file and print the result
    Parse(parse::ParseArgs),
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    // RUST_LOG in the environment always takes precedence; --verbose falls back to DEBUG.
    let filter = if cli.verbose {
        EnvFilter::from_default_env().add_directive(Level::DEBUG.into())
    } else {
        EnvFilter::from_default_env().add_directive(Level::WARN.into())
    };
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .try_init();

    match cli.command {
        Commands::Get(args) => get::run(args, &cli.registry),
        Commands::List => list::run(&cli.registry),
        Commands::Parse(args) => parse::run(args, &cli.registry),
    }
}
