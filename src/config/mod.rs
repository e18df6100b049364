//! Settings for building a registry from files and CLI arguments
//!
//! Handles loading from a settings file and CLI overrides with proper
//! precedence (CLI > File > Defaults).

pub mod loader;
pub mod settings;

pub use loader::load_config;
pub use settings::{CliOverrides, RegistryConfig};
