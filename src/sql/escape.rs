//! Value escaping
//!
//! Dispatches every `Value` kind to its SQL literal form.

use indexmap::IndexMap;
use serde_json::Value as JsonValue;

use crate::config::EscapeOptions;
use crate::error::{Result, SqlStringError};
use crate::sql::date::format_instant;
use crate::sql::list::{write_list, write_object};
use crate::types::Value;

/// Maximum nesting of lists, mappings and custom hooks the encoder follows
pub const MAX_DEPTH: usize = 128;

/// Escape a value into a SQL literal
///
/// | Value | Output |
/// |---|---|
/// | `Raw` | the fragment, verbatim |
/// | `Null` | `NULL` |
/// | `List` | `a, b, (c, d)` |
/// | `Bytes` | `X'0fa5'` |
/// | `Date` | `'2012-05-07 11:42:03.002'` |
/// | `Bool` | `true` / `false` |
/// | numbers | `42`, `-1.5`; non-finite floats as `'NaN'`, `'Infinity'`, `'-Infinity'` |
/// | `Custom` | the escaped result of its hook |
/// | `Map` | `` `a` = 1, `b` = 'x' ``, or quoted JSON when `stringify_objects` is set |
/// | `Text` | `'it\'s'` |
///
/// Fails only when the value nests deeper than [`MAX_DEPTH`].
///
/// # Example
/// ```
/// use sqlstring::{escape, EscapeOptions, Value};
///
/// let options = EscapeOptions::default();
/// assert_eq!(escape(&Value::from("it's"), &options).unwrap(), r"'it\'s'");
/// assert_eq!(escape(&Value::Null, &options).unwrap(), "NULL");
/// assert_eq!(escape(&Value::from(f64::NAN), &options).unwrap(), "'NaN'");
/// ```
pub fn escape(value: &Value, options: &EscapeOptions) -> Result<String> {
    escape_value(value, options, 0)
}

pub(crate) fn escape_value(value: &Value, options: &EscapeOptions, depth: usize) -> Result<String> {
    check_depth(depth)?;

    match value {
        Value::Raw(r) => Ok(r.to_sql_string().to_string()),
        Value::Null => Ok("NULL".to_string()),
        Value::List(items) => write_list(items, options, depth + 1),
        Value::Bytes(bytes) => Ok(buffer_to_string(bytes)),
        Value::Date(dt) => Ok(format_instant(dt, &options.time_zone)),
        Value::Bool(b) => Ok(b.to_string()),
        Value::Int(n) => Ok(n.to_string()),
        Value::UInt(n) => Ok(n.to_string()),
        Value::Decimal(n) => Ok(n.to_string()),
        Value::Float(n) => Ok(escape_float(*n)),
        Value::Custom(hook) => escape_value(&hook.to_sql(), options, depth + 1),
        Value::Map(map) if options.stringify_objects => {
            let json = map_to_json(map, depth + 1)?;
            Ok(escape_string(&serde_json::to_string(&json)?))
        }
        Value::Map(map) => write_object(map, options, depth + 1),
        Value::Text(s) => Ok(escape_string(s)),
    }
}

pub(crate) fn check_depth(depth: usize) -> Result<()> {
    if depth > MAX_DEPTH {
        tracing::warn!(max_depth = MAX_DEPTH, "value nesting too deep, refusing to escape");
        return Err(SqlStringError::DepthExceeded(MAX_DEPTH));
    }
    Ok(())
}

fn escape_float(n: f64) -> String {
    if n.is_nan() {
        "'NaN'".to_string()
    } else if n.is_infinite() {
        if n > 0.0 {
            "'Infinity'".to_string()
        } else {
            "'-Infinity'".to_string()
        }
    } else if n == 0.0 {
        // -0 has no meaning in SQL
        "0".to_string()
    } else if n.abs() >= 1e21 || n.abs() < 1e-6 {
        // Exponent form keeps huge and tiny magnitudes short: 1e+300, 1.5e-7
        let exp = format!("{:e}", n);
        match exp.split_once('e') {
            Some((mantissa, exponent)) if !exponent.starts_with('-') => {
                format!("{}e+{}", mantissa, exponent)
            }
            _ => exp,
        }
    } else {
        n.to_string()
    }
}

/// Quote a string literal
///
/// Wraps the text in single quotes and backslash-escapes NUL, backspace, tab,
/// newline, carriage return, Ctrl-Z, both quote characters, backslash and `%`.
///
/// # Example
/// ```
/// use sqlstring::escape_string;
///
/// assert_eq!(escape_string("50% off\n"), r"'50\% off\n'");
/// ```
pub fn escape_string(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len() + 2);
    escaped.push('\'');
    for c in value.chars() {
        match c {
            '\0' => escaped.push_str("\\0"),
            '\x08' => escaped.push_str("\\b"),
            '\t' => escaped.push_str("\\t"),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            '\x1a' => escaped.push_str("\\Z"),
            '"' | '\'' | '\\' | '%' => {
                escaped.push('\\');
                escaped.push(c);
            }
            _ => escaped.push(c),
        }
    }
    escaped.push('\'');
    escaped
}

/// Render bytes as a hex literal
///
/// # Example
/// ```
/// use sqlstring::buffer_to_string;
///
/// assert_eq!(buffer_to_string(b"\x01\xff"), "X'01ff'");
/// ```
pub fn buffer_to_string(bytes: &[u8]) -> String {
    format!("X'{}'", hex::encode(bytes))
}

fn map_to_json(map: &IndexMap<String, Value>, depth: usize) -> Result<JsonValue> {
    let object = map
        .iter()
        .map(|(k, v)| -> Result<(String, JsonValue)> {
            Ok((k.clone(), to_json(v, depth + 1)?))
        })
        .collect::<Result<serde_json::Map<_, _>>>()?;
    Ok(JsonValue::Object(object))
}

fn to_json(value: &Value, depth: usize) -> Result<JsonValue> {
    check_depth(depth)?;

    Ok(match value {
        Value::Null => JsonValue::Null,
        Value::Bool(b) => JsonValue::Bool(*b),
        Value::Int(n) => JsonValue::from(*n),
        Value::UInt(n) => JsonValue::from(*n),
        Value::Float(n) => serde_json::Number::from_f64(*n)
            .map(JsonValue::Number)
            .unwrap_or(JsonValue::Null),
        Value::Decimal(n) => n
            .to_string()
            .parse::<serde_json::Number>()
            .map(JsonValue::Number)
            .unwrap_or_else(|_| JsonValue::String(n.to_string())),
        Value::Text(s) => JsonValue::String(s.clone()),
        Value::Bytes(bytes) => JsonValue::String(hex::encode(bytes)),
        Value::Date(dt) => JsonValue::String(dt.to_rfc3339()),
        Value::List(items) => JsonValue::Array(
            items
                .iter()
                .map(|item| to_json(item, depth + 1))
                .collect::<Result<Vec<_>>>()?,
        ),
        Value::Map(map) => map_to_json(map, depth)?,
        Value::Raw(r) => JsonValue::String(r.to_sql_string().to_string()),
        Value::Custom(hook) => to_json(&hook.to_sql(), depth + 1)?,
    })
}
