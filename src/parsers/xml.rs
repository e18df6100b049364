//! XML file parser
//!
//! The root element is dropped and its children become the top-level keys.
//! Repeated sibling elements collect into a sequence, text-only elements are
//! coerced scalars, and empty elements are empty mappings. Attributes are
//! ignored.

use super::{read_file_source, Parser, Source};
use crate::error::ParseError;
use crate::tree::{coerce_scalar, sort_keys_recursive};
use quick_xml::events::Event;
use quick_xml::Reader;
use serde_json::{Map, Value};

#[derive(Debug, Clone, Copy, Default)]
pub struct XmlParser;

impl Parser for XmlParser {
    fn name(&self) -> &'static str {
        "XmlParser"
    }

    fn parse(&self, source: &Source) -> Result<Value, ParseError> {
        let content = read_file_source(self.name(), source)?;
        let data = parse_xml(&content).map_err(|message| ParseError::failure(self.name(), message))?;
        Ok(sort_keys_recursive(data))
    }
}

struct Element {
    name: String,
    children: Map<String, Value>,
    text: String,
}

impl Element {
    fn new(name: String) -> Self {
        Self { name, children: Map::new(), text: String::new() }
    }

    fn into_value(self) -> Value {
        let text = self.text.trim();
        if self.children.is_empty() && !text.is_empty() {
            coerce_scalar(text)
        } else {
            Value::Object(self.children)
        }
    }
}

fn parse_xml(content: &str) -> Result<Value, String> {
    let mut reader = Reader::from_str(content);
    reader.config_mut().trim_text(true);
    let mut stack: Vec<Element> = Vec::new();

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => {
                let name = String::from_utf8_lossy(e.name().as_ref()).to_string();
                stack.push(Element::new(name));
            }
            Ok(Event::Empty(e)) => {
                let name = String::from_utf8_lossy(e.name().as_ref()).to_string();
                match stack.last_mut() {
                    Some(parent) => add_to_parent(&mut parent.children, name, Value::Object(Map::new())),
                    None => return Ok(Value::Object(Map::new())),
                }
            }
            Ok(Event::Text(e)) => {
                let text = e.unescape().map_err(|e| format!("XML decode error: {e}"))?;
                if let Some(current) = stack.last_mut() {
                    current.text.push_str(&text);
                }
            }
            Ok(Event::CData(e)) => {
                if let Some(current) = stack.last_mut() {
                    current.text.push_str(&String::from_utf8_lossy(&e.into_inner()));
                }
            }
            Ok(Event::End(_)) => {
                let Some(element) = stack.pop() else {
                    return Err("unexpected closing tag".to_string());
                };
                let name = element.name.clone();
                let value = element.into_value();
                match stack.last_mut() {
                    Some(parent) => add_to_parent(&mut parent.children, name, value),
                    None if value.is_object() => return Ok(value),
                    None => return Err(format!("root element <{name}> must contain elements")),
                }
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => {
                return Err(format!("XML parse error at position {}: {e}", reader.error_position()))
            }
        }
    }

    Err("no root element".to_string())
}

fn add_to_parent(parent: &mut Map<String, Value>, name: String, value: Value) {
    match parent.get_mut(&name) {
        Some(Value::Array(items)) => items.push(value),
        Some(existing) => {
            let first = existing.take();
            *existing = Value::Array(vec![first, value]);
        }
        None => {
            parent.insert(name, value);
        }
    }
}
