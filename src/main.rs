//! config-registry binary entry point

use anyhow::Result;

mod cli;

fn main() -> Result<()> {
    cli::run()
}
