//! Error types for the registry and the format parsers

use std::path::PathBuf;

/// Errors raised by a [`Parser`](crate::parsers::Parser).
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    /// The source descriptor has the wrong shape or lacks required keys.
    #[error("{parser} config {reason}")]
    InvalidConfig { parser: &'static str, reason: String },

    /// The source is missing, unreadable, or not valid for the format.
    #[error("{parser}: {message}")]
    ParseFailure { parser: &'static str, message: String },
}

impl ParseError {
    pub fn invalid_config(parser: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidConfig { parser, reason: reason.into() }
    }

    pub fn failure(parser: &'static str, message: impl ToString) -> Self {
        Self::ParseFailure { parser, message: message.to_string() }
    }
}

/// Errors raised by the [`Registry`](crate::registry::Registry).
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("Config directory not found: {}", .0.display())]
    DirectoryNotFound(PathBuf),

    #[error("Config file not found: {0}")]
    FileNotFound(String),

    #[error(transparent)]
    Parse(#[from] ParseError),
}

pub type Result<T, E = RegistryError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_errors_are_prefixed_with_parser_name() {
        let err = ParseError::invalid_config("DatabaseParser", "username not set");
        assert_eq!(err.to_string(), "DatabaseParser config username not set");

        let err = ParseError::failure("JsonParser", "expected value at line 1 column 1");
        assert_eq!(err.to_string(), "JsonParser: expected value at line 1 column 1");
    }

    #[test]
    fn registry_errors_name_the_path() {
        let err = RegistryError::DirectoryNotFound(PathBuf::from("/nonexistent"));
        assert_eq!(err.to_string(), "Config directory not found: /nonexistent");

        let err = RegistryError::FileNotFound("missing".to_string());
        assert_eq!(err.to_string(), "Config file not found: missing");
    }
}
