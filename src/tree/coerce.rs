//! Scalar coercion for raw string values read from flat formats.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

/// Decimal number shape: optional sign, digits with optional fraction (or a
/// bare fraction), optional exponent.
static NUMERIC: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[+-]?(\d+(\.\d*)?|\.\d+)([eE][+-]?\d+)?$").unwrap());

/// Interpret a raw string as a typed scalar.
///
/// # Arguments
/// * `raw` - The value as read from the source, untrimmed
///
/// # Returns
/// `true`/`false`/`null` (case-insensitive), an integer or float for numeric
/// strings within `i64` range, an unquoted string for `"..."` or `'...'`, and
/// the trimmed string otherwise.
pub fn coerce_scalar(raw: &str) -> Value {
    let value = raw.trim();

    match value.to_ascii_lowercase().as_str() {
        "true" => return Value::Bool(true),
        "false" => return Value::Bool(false),
        "null" => return Value::Null,
        _ => {}
    }

    if let Some(number) = coerce_number(value) {
        return number;
    }

    if let Some(inner) = strip_quotes(value, '"') {
        return Value::String(unescape_double_quoted(inner));
    }

    if let Some(inner) = strip_quotes(value, '\'') {
        return Value::String(inner.to_string());
    }

    Value::String(value.to_string())
}

fn coerce_number(value: &str) -> Option<Value> {
    if !NUMERIC.is_match(value) {
        return None;
    }

    let parsed: f64 = value.parse().ok()?;
    if !parsed.is_finite() || parsed < i64::MIN as f64 || parsed > i64::MAX as f64 {
        return None;
    }

    if value.contains('.') {
        return Some(Value::from(parsed));
    }

    // Plain integers parse exactly; exponent forms go through the float.
    match value.parse::<i64>() {
        Ok(int) => Some(Value::from(int)),
        Err(_) => Some(Value::from(parsed as i64)),
    }
}

/// Text between a leading and trailing `quote`. A lone quote character is
/// both, and yields an empty string.
fn strip_quotes(value: &str, quote: char) -> Option<&str> {
    if !value.starts_with(quote) || !value.ends_with(quote) {
        return None;
    }
    Some(value.get(1..value.len() - 1).unwrap_or(""))
}

/// Replace `\"` with `"` and `\\` with `\`, scanning left to right.
fn unescape_double_quoted(inner: &str) -> String {
    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '\\' {
            match chars.peek() {
                Some('"') => {
                    out.push('"');
                    chars.next();
                }
                Some('\\') => {
                    out.push('\\');
                    chars.next();
                }
                _ => out.push('\\'),
            }
        } else {
            out.push(c);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case("True", json!(true))]
    #[case("FALSE", json!(false))]
    #[case(" null ", json!(null))]
    #[case("42", json!(42))]
    #[case("-7", json!(-7))]
    #[case("1.5", json!(1.5))]
    #[case(".5", json!(0.5))]
    #[case("1e3", json!(1000))]
    #[case("\"quoted \\\"x\\\"\"", json!("quoted \"x\""))]
    #[case("\"back\\\\slash\"", json!("back\\slash"))]
    #[case("\"null 123 \\\"", json!("null 123 \\"))]
    #[case("'True'", json!("True"))]
    #[case("'no \\\" escapes'", json!("no \\\" escapes"))]
    #[case("apos'4'56", json!("apos'4'56"))]
    #[case("  plain text  ", json!("plain text"))]
    #[case("", json!(""))]
    #[case("\"", json!(""))]
    #[case(" ' ", json!(""))]
    fn test_coerce_scalar(#[case] raw: &str, #[case] expected: Value) {
        assert_eq!(coerce_scalar(raw), expected);
    }

    #[test]
    fn test_out_of_range_numbers_stay_strings() {
        assert_eq!(coerce_scalar("99999999999999999999"), json!("99999999999999999999"));
        assert_eq!(coerce_scalar("1e400"), json!("1e400"));
    }

    #[test]
    fn test_non_decimal_numbers_stay_strings() {
        assert_eq!(coerce_scalar("0x1A"), json!("0x1A"));
        assert_eq!(coerce_scalar("inf"), json!("inf"));
        assert_eq!(coerce_scalar("NaN"), json!("NaN"));
        assert_eq!(coerce_scalar("1.2.3"), json!("1.2.3"));
    }

    #[test]
    fn test_integer_and_float_are_distinguished() {
        assert!(coerce_scalar("123").is_i64());
        assert!(coerce_scalar("123.0").is_f64());
    }
}
