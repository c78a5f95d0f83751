//! Placeholder substitution
//!
//! Replaces `?` with escaped values and `??` with escaped identifiers, left to
//! right. The template itself is not parsed as SQL.

use crate::config::EscapeOptions;
use crate::error::Result;
use crate::sql::escape::escape;
use crate::sql::sanitize::escape_id;
use crate::types::Value;

/// Substitute placeholders in `sql`
///
/// `values` is the positional sequence when it is a `List`; `Null` leaves the
/// template untouched; any other value fills the first placeholder. To bind a
/// list to a single `?`, wrap it in another list.
///
/// # Example
/// ```
/// use sqlstring::{format, EscapeOptions, Value};
///
/// let sql = format(
///     "SELECT * FROM ?? WHERE id = ?",
///     &Value::List(vec!["users".into(), 42.into()]),
///     &EscapeOptions::default(),
/// )
/// .unwrap();
/// assert_eq!(sql, "SELECT * FROM `users` WHERE id = 42");
/// ```
pub fn format(sql: &str, values: &Value, options: &EscapeOptions) -> Result<String> {
    match values {
        Value::Null => Ok(sql.to_string()),
        Value::List(items) => format_values(sql, items, options),
        single => format_values(sql, std::slice::from_ref(single), options),
    }
}

/// Substitute placeholders in `sql` from a slice of values
///
/// Placeholders beyond the available values are left as they are and extra
/// values are ignored. A run of three or more `?` is copied verbatim and
/// consumes no value.
pub fn format_values(sql: &str, values: &[Value], options: &EscapeOptions) -> Result<String> {
    tracing::trace!(values = values.len(), "formatting sql template");

    let mut out = String::with_capacity(sql.len());
    let mut rest = sql;
    let mut next = 0;

    while let Some(start) = rest.find('?') {
        let run = rest[start..].bytes().take_while(|b| *b == b'?').count();
        let token = &rest[start..start + run];
        out.push_str(&rest[..start]);
        rest = &rest[start + run..];

        if run > 2 {
            out.push_str(token);
            continue;
        }

        let Some(value) = values.get(next) else {
            tracing::debug!(
                consumed = next,
                "ran out of values, leaving remaining placeholders unsubstituted"
            );
            out.push_str(token);
            break;
        };
        next += 1;

        if run == 2 {
            out.push_str(&escape_id(value, false)?);
        } else {
            out.push_str(&escape(value, options)?);
        }
    }

    out.push_str(rest);
    Ok(out)
}
