//! Shared CLI utilities.

use anyhow::{Context, Result};
use clap::Args;
use config_registry::config::{load_config, CliOverrides, RegistryConfig};
use config_registry::{Format, Registry};
use serde::Serialize;
use std::path::PathBuf;

/// Options shared by every subcommand for building the registry.
#[derive(Args, Debug, Clone)]
pub struct RegistryArgs {
    /// Settings file (config-registry.toml or config-registry.yml)
    #[arg(short = 'c', long, value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

    /// Directory holding <NAME><SUFFIX> config files
    #[arg(short = 'd', long, value_name = "DIR", global = true, env = "CONFIG_REGISTRY_DIR")]
    pub dir: Option<PathBuf>,

    /// Filename suffix appended to config names (e.g. '.ini')
    #[arg(short = 's', long, value_name = "SUFFIX", global = true)]
    pub suffix: Option<String>,

    /// Config file format: json, ini, yaml, xml or env
    #[arg(short = 'f', long, value_name = "FORMAT", global = true)]
    pub format: Option<Format>,

    /// File of configs that always override loaded values
    #[arg(long, value_name = "FILE", global = true)]
    pub persistence: Option<PathBuf>,
}

impl RegistryArgs {
    /// Settings file values with command-line overrides applied.
    pub fn settings(&self) -> Result<RegistryConfig> {
        let cwd = std::env::current_dir().context("Failed to resolve working directory")?;
        let cfg = load_config(&cwd, self.config.as_deref())?;
        Ok(cfg.with_overrides(CliOverrides {
            dir: self.dir.clone(),
            suffix: self.suffix.clone(),
            format: self.format,
            persistence: self.persistence.clone(),
        }))
    }

    pub fn build(&self) -> Result<Registry> {
        self.settings()?.build()
    }
}

pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
