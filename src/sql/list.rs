//! List and mapping serialization
//!
//! Lists become comma-separated values (nested lists become row tuples), flat
//! mappings become `` `key` = value `` assignments.

use indexmap::IndexMap;

use crate::config::EscapeOptions;
use crate::error::Result;
use crate::sql::escape::{check_depth, escape_value};
use crate::sql::sanitize::quote_identifier;
use crate::types::Value;

/// Render values as a comma-separated list
///
/// Elements that are lists render as parenthesized tuples, which is the shape
/// of a multi-row `VALUES` clause. Mappings inside the list are stringified.
///
/// # Example
/// ```
/// use sqlstring::{array_to_list, EscapeOptions, Value};
///
/// let values = vec![Value::from(1), Value::list([2, 3]), Value::from(4)];
/// assert_eq!(array_to_list(&values, &EscapeOptions::default()).unwrap(), "1, (2, 3), 4");
/// ```
pub fn array_to_list(items: &[Value], options: &EscapeOptions) -> Result<String> {
    write_list(items, options, 0)
}

/// Render a flat mapping as `` `key` = value `` pairs
///
/// Keys are quoted as single identifiers (dots are kept inside the quotes),
/// values are escaped with mappings stringified. Entries keep their insertion
/// order.
///
/// # Example
/// ```
/// use sqlstring::{object_to_values, EscapeOptions, Value};
///
/// let Value::Map(row) = Value::map([("a", Value::from(1)), ("b", Value::from("x"))]) else {
///     unreachable!()
/// };
/// assert_eq!(
///     object_to_values(&row, &EscapeOptions::default()).unwrap(),
///     "`a` = 1, `b` = 'x'"
/// );
/// ```
pub fn object_to_values(map: &IndexMap<String, Value>, options: &EscapeOptions) -> Result<String> {
    write_object(map, options, 0)
}

pub(crate) fn write_list(items: &[Value], options: &EscapeOptions, depth: usize) -> Result<String> {
    check_depth(depth)?;

    let element_options = options.stringified();
    let parts = items
        .iter()
        .map(|item| match item {
            Value::List(inner) => Ok(format!("({})", write_list(inner, options, depth + 1)?)),
            other => escape_value(other, &element_options, depth + 1),
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(parts.join(", "))
}

pub(crate) fn write_object(
    map: &IndexMap<String, Value>,
    options: &EscapeOptions,
    depth: usize,
) -> Result<String> {
    check_depth(depth)?;

    let value_options = options.stringified();
    let parts = map
        .iter()
        .map(|(key, value)| -> Result<String> {
            Ok(format!(
                "{} = {}",
                quote_identifier(key, true),
                escape_value(value, &value_options, depth + 1)?
            ))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(parts.join(", "))
}
