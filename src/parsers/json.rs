//! JSON file parser

use super::{read_file_source, Parser, Source};
use crate::error::ParseError;
use crate::tree::sort_keys_recursive;
use serde_json::Value;

#[derive(Debug, Clone, Copy, Default)]
pub struct JsonParser;

impl Parser for JsonParser {
    fn name(&self) -> &'static str {
        "JsonParser"
    }

    fn parse(&self, source: &Source) -> Result<Value, ParseError> {
        let content = read_file_source(self.name(), source)?;
        let data: Value =
            serde_json::from_str(&content).map_err(|e| ParseError::failure(self.name(), e))?;
        Ok(sort_keys_recursive(data))
    }
}
