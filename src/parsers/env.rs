//! `.env` file parser
//!
//! One `key=value` pair per line; `#` starts a comment line. Keys are dotted
//! paths and values go through scalar coercion.

use super::{read_file_source, Parser, Source};
use crate::error::ParseError;
use crate::tree::{coerce_scalar, insert_dotted, sort_keys_recursive};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Copy, Default)]
pub struct EnvParser;

impl Parser for EnvParser {
    fn name(&self) -> &'static str {
        "EnvParser"
    }

    fn parse(&self, source: &Source) -> Result<Value, ParseError> {
        let content = read_file_source(self.name(), source)?;
        let mut data = Map::new();

        for (index, line) in content.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let Some((key, value)) = line.split_once('=') else {
                return Err(ParseError::failure(
                    self.name(),
                    format!("line {}: expected KEY=VALUE, got '{line}'", index + 1),
                ));
            };
            insert_dotted(&mut data, key.trim(), coerce_scalar(value));
        }

        Ok(sort_keys_recursive(Value::Object(data)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::fs;
    use tempfile::TempDir;

    fn parse_str(content: &str) -> Result<Value, ParseError> {
        let tmp = TempDir::new().expect("tmp");
        let path = tmp.path().join("config.env");
        fs::write(&path, content).expect("write");
        EnvParser.parse(&Source::file(&path))
    }

    #[test]
    fn expands_dotted_keys_and_coerces() {
        let value = parse_str(
            "# database\napp.default.db.port=5432\n\napp.default.db.host = localhost\napp.default.debug=False\n",
        )
        .expect("parse");
        assert_eq!(
            value,
            json!({"app": {"default": {"db": {"host": "localhost", "port": 5432}, "debug": false}}})
        );
    }

    #[test]
    fn value_may_contain_equals_sign() {
        let value = parse_str("svc.default.dsn=\"a=b\"\n").expect("parse");
        assert_eq!(value, json!({"svc": {"default": {"dsn": "a=b"}}}));
    }

    #[test]
    fn line_without_separator_fails() {
        let err = parse_str("ok=1\nbroken line\n").expect_err("must fail");
        assert!(err.to_string().starts_with("EnvParser: line 2"));
    }
}
