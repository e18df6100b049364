//! Get command implementation

use anyhow::{bail, Result};
use clap::Args;
use config_registry::DEFAULT_INSTANCE;

use super::utils::{print_json, RegistryArgs};

#[derive(Args)]
pub struct GetArgs {
    /// Config name (file name without directory and suffix)
    #[arg(value_name = "NAME")]
    pub name: String,

    /// Service instance to print
    #[arg(short, long, value_name = "INSTANCE", default_value = DEFAULT_INSTANCE)]
    pub instance: String,

    /// Print every instance of NAME
    #[arg(short = 'a', long, conflicts_with = "instance")]
    pub all_instances: bool,
}

pub fn run(args: GetArgs, registry_args: &RegistryArgs) -> Result<()> {
    let mut registry = registry_args.build()?;

    if args.all_instances {
        registry.get(&args.name, DEFAULT_INSTANCE)?;
        return match registry.instances(&args.name) {
            Some(instances) => print_json(instances),
            None => bail!("Config not found: {}", args.name),
        };
    }

    match registry.get(&args.name, &args.instance)? {
        Some(values) => print_json(values),
        None => bail!("Config not found: {} (instance '{}')", args.name, args.instance),
    }
}
