//! Format parsers (JSON, INI, YAML, XML, ENV, database)
//!
//! Every parser turns one [`Source`] into a value tree. File-based parsers
//! sort their output by key at every level; the database parser keeps row
//! order.

use crate::error::ParseError;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

pub mod database;
pub mod env;
pub mod ini;
pub mod json;
pub mod xml;
pub mod yaml;

pub use database::DatabaseParser;
pub use env::EnvParser;
pub use ini::IniParser;
pub use json::JsonParser;
pub use xml::XmlParser;
pub use yaml::YamlParser;

/// Where a parser reads its data from.
#[derive(Debug, Clone, PartialEq)]
pub enum Source {
    /// A file on disk.
    File(PathBuf),
    /// A connection descriptor such as `{username, schema, table, ...}`.
    Connection(Map<String, Value>),
}

impl Source {
    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self::File(path.into())
    }
}

/// Converts one external representation into a value tree.
pub trait Parser: Send + Sync {
    /// Name used to prefix error messages.
    fn name(&self) -> &'static str;

    /// Parse `source` into a value tree.
    fn parse(&self, source: &Source) -> Result<Value, ParseError>;
}

/// File formats the registry can load by suffix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    Json,
    Ini,
    Yaml,
    Xml,
    Env,
}

impl Format {
    /// Pick a format from a file extension or suffix (`json`, `.yml`, ...).
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.trim_start_matches('.').to_ascii_lowercase().as_str() {
            "json" => Some(Self::Json),
            "ini" => Some(Self::Ini),
            "yaml" | "yml" => Some(Self::Yaml),
            "xml" => Some(Self::Xml),
            "env" => Some(Self::Env),
            _ => None,
        }
    }

    /// Pick a format from the extension of `path`.
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension().and_then(|e| e.to_str()).and_then(Self::from_extension)
    }

    /// The conventional file suffix for this format.
    pub fn suffix(self) -> &'static str {
        match self {
            Self::Json => ".json",
            Self::Ini => ".ini",
            Self::Yaml => ".yaml",
            Self::Xml => ".xml",
            Self::Env => ".env",
        }
    }

    pub fn parser(self) -> Box<dyn Parser> {
        match self {
            Self::Json => Box::new(JsonParser),
            Self::Ini => Box::new(IniParser),
            Self::Yaml => Box::new(YamlParser),
            Self::Xml => Box::new(XmlParser),
            Self::Env => Box::new(EnvParser),
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Json => "json",
            Self::Ini => "ini",
            Self::Yaml => "yaml",
            Self::Xml => "xml",
            Self::Env => "env",
        };
        f.write_str(name)
    }
}

impl FromStr for Format {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_extension(s).ok_or_else(|| format!("Unsupported format: {s}"))
    }
}

/// Resolve a file source and read it as text.
///
/// Shared by every file-based parser: rejects connection descriptors, missing
/// paths and non-files, and unreadable files.
pub(crate) fn read_file_source(parser: &'static str, source: &Source) -> Result<String, ParseError> {
    let Source::File(path) = source else {
        return Err(ParseError::invalid_config(parser, "must be a file path"));
    };

    let resolved = match path.canonicalize() {
        Ok(resolved) if resolved.is_file() => resolved,
        _ => {
            return Err(ParseError::failure(parser, format!("File not found: {}", path.display())))
        }
    };

    tracing::debug!(parser, path = %resolved.display(), "reading config source");
    fs::read_to_string(&resolved).map_err(|e| {
        ParseError::failure(parser, format!("File is not readable: {} ({e})", path.display()))
    })
}
