//! Parse command implementation

use anyhow::{bail, Context, Result};
use clap::Args;
use config_registry::{Format, Source};
use std::path::PathBuf;

use super::utils::{print_json, RegistryArgs};

#[derive(Args)]
pub struct ParseArgs {
    /// File to parse; the format comes from --format or the file extension
    #[arg(value_name = "FILE")]
    pub file: PathBuf,
}

pub fn run(args: ParseArgs, registry_args: &RegistryArgs) -> Result<()> {
    let format = match registry_args.format.or_else(|| Format::from_path(&args.file)) {
        Some(format) => format,
        None => bail!(
            "Cannot infer a format for {}; pass --format (json, ini, yaml, xml, env)",
            args.file.display()
        ),
    };

    tracing::debug!(file = %args.file.display(), %format, "parsing");
    let tree = format
        .parser()
        .parse(&Source::file(&args.file))
        .with_context(|| format!("Failed parsing {}", args.file.display()))?;
    print_json(&tree)
}
