//! YAML file parser

use super::{read_file_source, Parser, Source};
use crate::error::ParseError;
use crate::tree::sort_keys_recursive;
use serde_json::{Map, Value};
use serde_yaml::Value as YamlValue;

#[derive(Debug, Clone, Copy, Default)]
pub struct YamlParser;

impl Parser for YamlParser {
    fn name(&self) -> &'static str {
        "YamlParser"
    }

    fn parse(&self, source: &Source) -> Result<Value, ParseError> {
        let content = read_file_source(self.name(), source)?;
        let raw: YamlValue =
            serde_yaml::from_str(&content).map_err(|e| ParseError::failure(self.name(), e))?;
        let data = yaml_to_tree(raw).map_err(|message| ParseError::failure(self.name(), message))?;
        Ok(sort_keys_recursive(data))
    }
}

/// Convert a YAML document into a value tree. Scalar mapping keys are
/// stringified; composite keys are rejected.
fn yaml_to_tree(value: YamlValue) -> Result<Value, String> {
    Ok(match value {
        YamlValue::Null => Value::Null,
        YamlValue::Bool(b) => Value::Bool(b),
        YamlValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                Value::from(i)
            } else if let Some(u) = n.as_u64() {
                Value::from(u)
            } else {
                n.as_f64().map(Value::from).unwrap_or(Value::Null)
            }
        }
        YamlValue::String(s) => Value::String(s),
        YamlValue::Sequence(items) => {
            Value::Array(items.into_iter().map(yaml_to_tree).collect::<Result<_, _>>()?)
        }
        YamlValue::Mapping(mapping) => {
            let mut map = Map::new();
            for (key, value) in mapping {
                map.insert(yaml_key(key)?, yaml_to_tree(value)?);
            }
            Value::Object(map)
        }
        YamlValue::Tagged(tagged) => yaml_to_tree(tagged.value)?,
    })
}

fn yaml_key(key: YamlValue) -> Result<String, String> {
    match key {
        YamlValue::String(s) => Ok(s),
        YamlValue::Number(n) => Ok(n.to_string()),
        YamlValue::Bool(b) => Ok(b.to_string()),
        YamlValue::Null => Ok(String::new()),
        other => Err(format!("unsupported mapping key: {other:?}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn parses_typed_yaml() {
        let tmp = TempDir::new().expect("tmp");
        let path = tmp.path().join("app.yaml");
        fs::write(
            &path,
            "default:\n  port: 8080\n  ratio: 1.5\n  debug: true\n  name: ~\n  hosts: [a, b]\n",
        )
        .expect("write");

        let value = YamlParser.parse(&Source::file(&path)).expect("parse");
        assert_eq!(
            value,
            json!({"default": {"debug": true, "hosts": ["a", "b"], "name": null, "port": 8080, "ratio": 1.5}})
        );
    }

    #[test]
    fn integer_keys_become_strings() {
        let tmp = TempDir::new().expect("tmp");
        let path = tmp.path().join("app.yaml");
        fs::write(&path, "default:\n  1: one\n  0: zero\n").expect("write");

        let value = YamlParser.parse(&Source::file(&path)).expect("parse");
        assert_eq!(value, json!({"default": {"0": "zero", "1": "one"}}));
    }

    #[test]
    fn invalid_yaml_is_a_parse_failure() {
        let tmp = TempDir::new().expect("tmp");
        let path = tmp.path().join("app.yaml");
        fs::write(&path, "default: [unclosed\n").expect("write");

        let err = YamlParser.parse(&Source::file(&path)).expect_err("invalid yaml");
        assert!(err.to_string().starts_with("YamlParser: "));
    }
}
