//! INI file parser
//!
//! Supports `[section]` headers, `;` and `#` comments, dotted keys, and
//! `key[] = value` to append to a sequence. Each section becomes a top-level
//! key; keys before the first section land at the top level directly.

use super::{read_file_source, Parser, Source};
use crate::error::ParseError;
use crate::tree::{coerce_scalar, insert_dotted, sort_keys_recursive};
use serde_json::{Map, Value};
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, Default)]
pub struct IniParser;

impl Parser for IniParser {
    fn name(&self) -> &'static str {
        "IniParser"
    }

    fn parse(&self, source: &Source) -> Result<Value, ParseError> {
        let content = read_file_source(self.name(), source)?;
        let data = parse_ini(&content).map_err(|message| ParseError::failure(self.name(), message))?;
        Ok(sort_keys_recursive(Value::Object(data)))
    }
}

fn parse_ini(content: &str) -> Result<Map<String, Value>, String> {
    let mut top = Map::new();
    let mut sections: Vec<(String, Map<String, Value>)> = Vec::new();
    let mut current: Option<usize> = None;
    let mut appended: HashMap<(Option<usize>, String), Vec<Value>> = HashMap::new();

    for (index, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with(';') || line.starts_with('#') {
            continue;
        }

        if let Some(header) = line.strip_prefix('[') {
            let Some(name) = header.strip_suffix(']') else {
                return Err(format!("line {}: unterminated section header '{line}'", index + 1));
            };
            let name = name.trim().to_string();
            current = match sections.iter().position(|(existing, _)| *existing == name) {
                Some(pos) => Some(pos),
                None => {
                    sections.push((name, Map::new()));
                    Some(sections.len() - 1)
                }
            };
            continue;
        }

        let Some((key, raw)) = line.split_once('=') else {
            return Err(format!("line {}: expected key = value, got '{line}'", index + 1));
        };
        let key = key.trim();
        let value = coerce_scalar(strip_inline_comment(raw));
        let target = match current {
            Some(pos) => &mut sections[pos].1,
            None => &mut top,
        };

        match key.strip_suffix("[]") {
            Some(list_key) => {
                let items = appended.entry((current, list_key.to_string())).or_default();
                items.push(value);
                insert_dotted(target, list_key, Value::Array(items.clone()));
            }
            None => {
                appended.remove(&(current, key.to_string()));
                insert_dotted(target, key, value);
            }
        }
    }

    for (name, values) in sections {
        top.insert(name, Value::Object(values));
    }
    Ok(top)
}

/// Cut a value at the first `;` after its quoted part, if any.
///
/// Only a quote at the start of the value opens a quoted part; quotes inside
/// an unquoted value are literal.
fn strip_inline_comment(raw: &str) -> &str {
    let trimmed = raw.trim_start();
    let offset = raw.len() - trimmed.len();
    let start = match trimmed.chars().next() {
        Some(quote @ ('"' | '\'')) => match trimmed[1..].find(quote) {
            Some(close) => offset + 1 + close + 1,
            None => return raw,
        },
        _ => offset,
    };
    match raw[start..].find(';') {
        Some(pos) => &raw[..start + pos],
        None => raw,
    }
}
