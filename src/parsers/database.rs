//! Database-backed config source
//!
//! Reads `(key, value)` rows from a SQLite table. The connection descriptor
//! needs `username`, `schema` and `table`; `schema` names the database file.
//! `host`, `port` and `password` are accepted but unused by SQLite.
//!
//! Rows are applied in fetch order (`ORDER BY key`) and the result is not
//! re-sorted, unlike the file parsers.

use super::{Parser, Source};
use crate::error::ParseError;
use crate::tree::{coerce_scalar, insert_dotted};
use once_cell::sync::Lazy;
use regex::Regex;
use rusqlite::types::Value as SqlValue;
use rusqlite::{Connection, OpenFlags};
use serde_json::{Map, Value};

static IDENTIFIER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").unwrap());

const REQUIRED_KEYS: &[&str] = &["username", "schema", "table"];

#[derive(Debug, Clone, Copy, Default)]
pub struct DatabaseParser;

/// Validated connection settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Connect {
    pub username: String,
    pub schema: String,
    pub table: String,
    pub host: Option<String>,
    pub port: Option<u16>,
}

impl DatabaseParser {
    /// Validate a connection descriptor.
    pub fn check_config(&self, source: &Source) -> Result<Connect, ParseError> {
        let Source::Connection(config) = source else {
            return Err(ParseError::invalid_config(self.name(), "must be a mapping"));
        };

        for key in REQUIRED_KEYS {
            if config.get(*key).map_or(true, Value::is_null) {
                return Err(ParseError::invalid_config(self.name(), format!("{key} not set")));
            }
        }

        let username = self.field(config, "username")?.unwrap_or_default();
        let schema = self.field(config, "schema")?.unwrap_or_default();
        let table = self.field(config, "table")?.unwrap_or_default();
        if !IDENTIFIER.is_match(&table) {
            return Err(ParseError::invalid_config(
                self.name(),
                format!("table must be a plain identifier, got '{table}'"),
            ));
        }

        let port = match self.field(config, "port")? {
            Some(port) => Some(port.parse::<u16>().map_err(|_| {
                ParseError::invalid_config(
                    self.name(),
                    format!("port must be a number from 0 to 65535, got '{port}'"),
                )
            })?),
            None => None,
        };

        Ok(Connect {
            username,
            schema,
            table,
            host: self.field(config, "host")?,
            port,
        })
    }

    /// Text of a descriptor value; `None` when absent or null.
    fn field(&self, config: &Map<String, Value>, key: &str) -> Result<Option<String>, ParseError> {
        match config.get(key) {
            None | Some(Value::Null) => Ok(None),
            Some(value) => descriptor_text(value).map(Some).ok_or_else(|| {
                ParseError::invalid_config(self.name(), format!("{key} must be a string or number"))
            }),
        }
    }

    fn fetch_rows(&self, connect: &Connect) -> rusqlite::Result<Vec<(String, SqlValue)>> {
        let conn = Connection::open_with_flags(&connect.schema, OpenFlags::SQLITE_OPEN_READ_ONLY)?;
        let mut stmt =
            conn.prepare(&format!("SELECT \"key\", \"value\" FROM \"{}\" ORDER BY \"key\"", connect.table))?;
        let rows = stmt.query_map([], |row| Ok((row.get::<_, String>(0)?, row.get::<_, SqlValue>(1)?)))?;
        rows.collect()
    }
}

impl Parser for DatabaseParser {
    fn name(&self) -> &'static str {
        "DatabaseParser"
    }

    fn parse(&self, source: &Source) -> Result<Value, ParseError> {
        let connect = self.check_config(source)?;
        tracing::debug!(
            user = %connect.username,
            schema = %connect.schema,
            table = %connect.table,
            "reading config rows"
        );

        let rows = self.fetch_rows(&connect).map_err(|e| ParseError::failure(self.name(), e))?;
        let mut data = Map::new();
        for (key, cell) in rows {
            let value = match cell {
                SqlValue::Null => Value::Null,
                SqlValue::Integer(i) => coerce_scalar(&i.to_string()),
                SqlValue::Real(f) => Value::from(f),
                SqlValue::Text(s) => coerce_scalar(&s),
                SqlValue::Blob(b) => coerce_scalar(&String::from_utf8_lossy(&b)),
            };
            insert_dotted(&mut data, &key, value);
        }
        Ok(Value::Object(data))
    }
}

/// Descriptor values may be strings or numbers (`port: 3306`).
fn descriptor_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}
