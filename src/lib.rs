//! config-registry: named, multi-instance configuration sets
//!
//! A [`Registry`] stores value trees by service name and instance, lazily
//! loads `<dir>/<name><suffix>` files through a pluggable [`Parser`], and keeps
//! a persistence overlay on top of every entry.
//!
//! ```
//! use config_registry::{Registry, DEFAULT_INSTANCE};
//! use serde_json::json;
//!
//! let mut registry = Registry::new();
//! registry.set("db", DEFAULT_INSTANCE, json!({"host": "localhost"}));
//! registry.add("db", DEFAULT_INSTANCE, json!({"port": 5432}));
//!
//! let db = registry.get("db", DEFAULT_INSTANCE).unwrap();
//! assert_eq!(db, Some(&json!({"host": "localhost", "port": 5432})));
//! ```

pub mod config;
pub mod error;
pub mod parsers;
pub mod registry;
pub mod tree;

pub use error::{ParseError, RegistryError};
pub use parsers::{Format, Parser, Source};
pub use registry::{apply_overlay, ConfigStore, Instances, Registry, DEFAULT_INSTANCE};
pub use tree::merge;
