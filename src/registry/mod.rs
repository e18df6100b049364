//! The configuration registry
//!
//! Stores value trees by `(name, instance)`, lazily loads `<dir><name><suffix>`
//! files on first access, and keeps a persistence overlay on top of every
//! entry after each write.

use crate::error::{ParseError, RegistryError, Result};
use crate::parsers::{JsonParser, Parser, Source};
use crate::tree::merge;
use indexmap::IndexMap;
use serde_json::Value;
use std::fmt;
use std::path::{Path, PathBuf};

pub mod overlay;

pub use overlay::apply_overlay;

/// Instance name used when callers have no variant to pick.
pub const DEFAULT_INSTANCE: &str = "default";

/// Default filename suffix for lazily loaded configs.
pub const DEFAULT_SUFFIX: &str = ".json";

/// `instance -> values` for one config name.
pub type Instances = IndexMap<String, Value>;

/// `name -> instance -> values`.
pub type ConfigStore = IndexMap<String, Instances>;

pub struct Registry {
    configs: ConfigStore,
    persistence: ConfigStore,
    dir: Option<PathBuf>,
    suffix: String,
    parser: Box<dyn Parser>,
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("configs", &self.configs)
            .field("persistence", &self.persistence)
            .field("dir", &self.dir)
            .field("suffix", &self.suffix)
            .field("parser", &self.parser.name())
            .finish()
    }
}

impl Registry {
    /// An empty registry with no directory, no persistence, and JSON files.
    pub fn new() -> Self {
        Self {
            configs: ConfigStore::new(),
            persistence: ConfigStore::new(),
            dir: None,
            suffix: DEFAULT_SUFFIX.to_string(),
            parser: Box::new(JsonParser),
        }
    }

    /// A registry pre-populated with `configs`.
    pub fn from_configs(configs: ConfigStore) -> Self {
        let mut registry = Self::new();
        registry.set_many(configs);
        registry
    }

    /// A registry that lazily loads configs from `dir`.
    pub fn with_dir(dir: impl AsRef<Path>) -> Result<Self> {
        let mut registry = Self::new();
        registry.set_dir(dir)?;
        Ok(registry)
    }

    /// Configs that always win over set, added, or loaded values.
    ///
    /// Applied on the next write; the overlay itself never changes afterwards.
    pub fn with_persistence(mut self, persistence: ConfigStore) -> Self {
        self.persistence = persistence;
        self
    }

    /// Filename suffix appended to a config name when loading.
    pub fn with_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.suffix = suffix.into();
        self
    }

    /// Parser used for lazily loaded files.
    pub fn with_parser(mut self, parser: Box<dyn Parser>) -> Self {
        self.parser = parser;
        self
    }

    pub fn suffix(&self) -> &str {
        &self.suffix
    }

    pub fn persistence(&self) -> &ConfigStore {
        &self.persistence
    }

    /// Replace the values of `(name, instance)` and return them with
    /// persistence applied.
    pub fn set(&mut self, name: &str, instance: &str, values: Value) -> &Value {
        tracing::trace!(name, instance, "set config");
        self.configs.entry(name.to_string()).or_default().insert(instance.to_string(), values);
        self.replace_persistence();
        // Inserted above; persistence only adds entries.
        &self.configs[name][instance]
    }

    /// Merge `values` into `(name, instance)`, new values winning, or set
    /// them if the instance does not exist yet.
    pub fn add(&mut self, name: &str, instance: &str, values: Value) -> &Value {
        let Some(slot) = self.configs.get_mut(name).and_then(|i| i.get_mut(instance)) else {
            return self.set(name, instance, values);
        };
        tracing::trace!(name, instance, "add config");
        let current = slot.take();
        *slot = merge(current, values);
        self.replace_persistence();
        &self.configs[name][instance]
    }

    /// Values of `(name, instance)`, loading `name` from the config directory
    /// first when nothing is stored for it yet.
    ///
    /// `Ok(None)` means the instance is not configured; an empty mapping is a
    /// configured-but-empty instance.
    pub fn get(&mut self, name: &str, instance: &str) -> Result<Option<&Value>> {
        if !self.configs.contains_key(name) && self.dir.is_some() {
            self.load(name)?;
        }
        Ok(self.configs.get(name).and_then(|instances| instances.get(instance)))
    }

    /// Every instance stored under `name`, without triggering a load.
    pub fn instances(&self, name: &str) -> Option<&Instances> {
        self.configs.get(name)
    }

    /// `set` every `(name, instance, values)` triple in order.
    pub fn set_many(&mut self, configs: ConfigStore) {
        for (name, instances) in configs {
            for (instance, values) in instances {
                self.set(&name, &instance, values);
            }
        }
    }

    pub fn all(&self) -> &ConfigStore {
        &self.configs
    }

    /// Set the directory lazily loaded configs are read from.
    ///
    /// The path is resolved to an absolute directory and stored with a
    /// trailing separator.
    pub fn set_dir(&mut self, dir: impl AsRef<Path>) -> Result<&mut Self> {
        let dir = dir.as_ref();
        let mut resolved = match dir.canonicalize() {
            Ok(resolved) if resolved.is_dir() => resolved,
            _ => return Err(RegistryError::DirectoryNotFound(dir.to_path_buf())),
        };
        resolved.push("");
        tracing::debug!(dir = %resolved.display(), "config directory set");
        self.dir = Some(resolved);
        Ok(self)
    }

    pub fn dir(&self) -> Option<&Path> {
        self.dir.as_deref()
    }

    /// Parse `<dir><name><suffix>` and set every instance it defines.
    ///
    /// The file must hold a mapping of instance names to values. On failure
    /// the stored configs are left untouched.
    pub fn load(&mut self, name: &str) -> Result<&Instances> {
        let filename = self.filename(name);
        let path = match filename.canonicalize() {
            Ok(path) if path.is_file() => path,
            _ => return Err(RegistryError::FileNotFound(name.to_string())),
        };

        tracing::debug!(name, path = %path.display(), parser = self.parser.name(), "loading config");
        let parsed = match self.parser.parse(&Source::File(path))? {
            Value::Object(instances) => instances,
            other => {
                return Err(ParseError::failure(
                    self.parser.name(),
                    format!("expected a mapping of instances for '{name}', got {}", kind(&other)),
                )
                .into())
            }
        };

        let mut configs = ConfigStore::new();
        configs.insert(name.to_string(), parsed.into_iter().collect());
        self.set_many(configs);

        Ok(self.configs.entry(name.to_string()).or_default())
    }

    /// `<dir><name><suffix>` by plain concatenation; an absolute `name`
    /// stays under `dir`.
    fn filename(&self, name: &str) -> PathBuf {
        let mut file = self.dir.as_ref().map(|dir| dir.as_os_str().to_os_string()).unwrap_or_default();
        file.push(name);
        file.push(&self.suffix);
        PathBuf::from(file)
    }

    fn replace_persistence(&mut self) {
        if self.persistence.is_empty() {
            return;
        }
        self.configs = apply_overlay(std::mem::take(&mut self.configs), &self.persistence);
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a sequence",
        Value::Object(_) => "a mapping",
    }
}
