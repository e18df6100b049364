//! Settings file loading

use super::settings::RegistryConfig;
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Section name accepted as a wrapper around the settings.
const SECTION: &str = "config-registry";

pub fn load_config(root: &Path, config_path: Option<&Path>) -> Result<RegistryConfig> {
    let config_path_provided = config_path.is_some();

    let discovered = match config_path {
        Some(path) => Some(path.to_path_buf()),
        None => discover_config(root),
    };

    let Some(config_file) = discovered else {
        return Ok(RegistryConfig::default());
    };

    let content = fs::read_to_string(&config_file)
        .with_context(|| format!("Failed reading config file: {}", config_file.display()))?;

    let ext = config_file.extension().and_then(|e| e.to_str()).unwrap_or("").to_ascii_lowercase();

    let parsed = match ext.as_str() {
        "toml" => parse_toml_config(&content, &config_file),
        "yaml" | "yml" => parse_yaml_config(&content, &config_file),
        other => Err(anyhow::anyhow!(
            "Unsupported config extension '.{}' for file {}",
            other,
            config_file.display()
        )),
    };

    match parsed {
        Ok(cfg) => {
            tracing::debug!(file = %config_file.display(), "loaded settings");
            Ok(cfg)
        }
        Err(e) if config_path_provided => Err(e),
        Err(e) => {
            // Auto-discovered files never abort the run.
            tracing::warn!(
                "Failed to parse auto-discovered config {}: {:#}",
                config_file.display(),
                e
            );
            Ok(RegistryConfig::default())
        }
    }
}

/// Parse TOML settings, optionally nested under `[config-registry]`.
fn parse_toml_config(content: &str, config_file: &Path) -> Result<RegistryConfig> {
    let raw: toml::Value = toml::from_str(content)
        .with_context(|| format!("Invalid TOML syntax: {}", config_file.display()))?;

    let config_val = match raw.get(SECTION) {
        Some(nested) => nested.clone(),
        None => raw,
    };

    config_val.try_into().with_context(|| format!("Invalid TOML config: {}", config_file.display()))
}

/// Parse YAML settings, optionally nested under `config-registry:`.
fn parse_yaml_config(content: &str, config_file: &Path) -> Result<RegistryConfig> {
    let raw: serde_yaml::Value = serde_yaml::from_str(content)
        .with_context(|| format!("Invalid YAML syntax: {}", config_file.display()))?;

    let config_val = match raw.get(SECTION) {
        Some(nested) => nested.clone(),
        None => raw,
    };

    serde_yaml::from_value(config_val)
        .with_context(|| format!("Invalid YAML config: {}", config_file.display()))
}

fn discover_config(root: &Path) -> Option<PathBuf> {
    let candidates = [
        "config-registry.toml",
        ".config-registry.toml",
        "config-registry.yaml",
        ".config-registry.yaml",
        "config-registry.yml",
        ".config-registry.yml",
    ];

    candidates.iter().map(|candidate| root.join(candidate)).find(|path| path.exists())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsers::Format;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_load_config_defaults_when_missing() {
        let tmp = TempDir::new().expect("tmp");
        let cfg = load_config(tmp.path(), None).expect("config");
        assert_eq!(cfg, RegistryConfig::default());
    }

    #[test]
    fn test_load_toml_config() {
        let tmp = TempDir::new().expect("tmp");
        fs::write(
            tmp.path().join("config-registry.toml"),
            "dir = 'conf'\nsuffix = '.conf'\nformat = 'ini'\n",
        )
        .expect("write");

        let cfg = load_config(tmp.path(), None).expect("config");
        assert_eq!(cfg.dir, Some(PathBuf::from("conf")));
        assert_eq!(cfg.suffix, ".conf");
        assert_eq!(cfg.format, Some(Format::Ini));
    }

    #[test]
    fn test_load_nested_toml_section() {
        let tmp = TempDir::new().expect("tmp");
        fs::write(tmp.path().join(".config-registry.toml"), "[config-registry]\nsuffix = '.yml'\n")
            .expect("write");

        let cfg = load_config(tmp.path(), None).expect("config");
        assert_eq!(cfg.suffix, ".yml");
        assert_eq!(cfg.resolved_format().unwrap(), Format::Yaml);
    }

    #[test]
    fn test_load_yaml_config() {
        let tmp = TempDir::new().expect("tmp");
        let path = tmp.path().join("settings.yaml");
        fs::write(&path, "config-registry:\n  persistence: locked.json\n  format: xml\n").expect("write");

        let cfg = load_config(tmp.path(), Some(&path)).expect("config");
        assert_eq!(cfg.persistence, Some(PathBuf::from("locked.json")));
        assert_eq!(cfg.format, Some(Format::Xml));
        assert_eq!(cfg.suffix, ".json");
    }

    #[test]
    fn test_explicit_config_invalid_type_returns_err() {
        let tmp = TempDir::new().expect("tmp");
        let path = tmp.path().join("bad.toml");
        fs::write(&path, "suffix = 123\n").expect("write");

        let result = load_config(tmp.path(), Some(&path));
        assert!(result.is_err(), "explicit config with invalid type should return Err");
    }

    #[test]
    fn test_explicit_config_unknown_format_returns_err() {
        let tmp = TempDir::new().expect("tmp");
        let path = tmp.path().join("bad.toml");
        fs::write(&path, "format = 'php'\n").expect("write");

        assert!(load_config(tmp.path(), Some(&path)).is_err());
    }

    #[test]
    fn test_explicit_config_unsupported_extension_returns_err() {
        let tmp = TempDir::new().expect("tmp");
        let path = tmp.path().join("settings.ini");
        fs::write(&path, "suffix = .ini\n").expect("write");

        let err = load_config(tmp.path(), Some(&path)).expect_err("unsupported");
        assert!(err.to_string().contains("Unsupported config extension"));
    }

    #[test]
    fn test_auto_discovered_invalid_config_returns_default() {
        let tmp = TempDir::new().expect("tmp");
        fs::write(tmp.path().join("config-registry.toml"), "unknown_key = true\n").expect("write");

        let cfg = load_config(tmp.path(), None).expect("should not error on auto-discovery");
        assert_eq!(cfg, RegistryConfig::default());
    }
}
