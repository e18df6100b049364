//! Registry settings and CLI overrides

use crate::parsers::{Format, Source};
use crate::registry::{ConfigStore, Registry, DEFAULT_SUFFIX};
use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RegistryConfig {
    /// Directory lazily loaded configs are read from.
    pub dir: Option<PathBuf>,
    /// Suffix appended to a config name to form its filename.
    pub suffix: String,
    /// Parser for config files; inferred from `suffix` when unset.
    pub format: Option<Format>,
    /// File holding `name -> instance -> values` that always wins.
    pub persistence: Option<PathBuf>,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self { dir: None, suffix: DEFAULT_SUFFIX.to_string(), format: None, persistence: None }
    }
}

/// Values given on the command line; `Some` wins over the settings file.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub dir: Option<PathBuf>,
    pub suffix: Option<String>,
    pub format: Option<Format>,
    pub persistence: Option<PathBuf>,
}

impl RegistryConfig {
    pub fn with_overrides(mut self, cli: CliOverrides) -> Self {
        if let Some(dir) = cli.dir {
            self.dir = Some(dir);
        }
        if let Some(suffix) = cli.suffix {
            self.suffix = suffix;
        }
        if let Some(format) = cli.format {
            self.format = Some(format);
        }
        if let Some(persistence) = cli.persistence {
            self.persistence = Some(persistence);
        }
        self
    }

    /// The explicit format, or the one matching the suffix.
    pub fn resolved_format(&self) -> Result<Format> {
        if let Some(format) = self.format {
            return Ok(format);
        }
        match Format::from_extension(&self.suffix) {
            Some(format) => Ok(format),
            None => bail!("Cannot infer a format from suffix '{}'; set `format`", self.suffix),
        }
    }

    /// Build a registry from these settings.
    pub fn build(&self) -> Result<Registry> {
        let format = self.resolved_format()?;
        let mut registry =
            Registry::new().with_suffix(self.suffix.clone()).with_parser(format.parser());

        if let Some(path) = &self.persistence {
            registry = registry.with_persistence(self.load_persistence(path, format)?);
        }

        if let Some(dir) = &self.dir {
            registry.set_dir(dir)?;
        }

        Ok(registry)
    }

    fn load_persistence(&self, path: &Path, fallback: Format) -> Result<ConfigStore> {
        let format = Format::from_path(path).unwrap_or(fallback);
        let parsed = format
            .parser()
            .parse(&Source::File(path.to_path_buf()))
            .with_context(|| format!("Failed reading persistence file: {}", path.display()))?;
        serde_json::from_value(parsed).with_context(|| {
            format!("Persistence file must map names to instances: {}", path.display())
        })
    }
}
