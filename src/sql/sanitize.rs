//! SQL Identifier Escaping
//!
//! Quotes table and column names with backticks so they can be spliced into a
//! statement without being read as SQL syntax.

use crate::error::{Result, SqlStringError};
use crate::sql::escape::check_depth;
use crate::types::Value;

/// Quote a SQL identifier
///
/// Every backtick in the identifier is doubled and the result is wrapped in
/// backticks. Unless `forbid_qualified` is set, `.` separates qualified parts
/// (`db.table`) and each part is quoted on its own.
///
/// # Example
/// ```
/// use sqlstring::quote_identifier;
///
/// assert_eq!(quote_identifier("users", false), "`users`");
/// assert_eq!(quote_identifier("db.users", false), "`db`.`users`");
/// assert_eq!(quote_identifier("db.users", true), "`db.users`");
/// ```
pub fn quote_identifier(identifier: &str, forbid_qualified: bool) -> String {
    let escaped = identifier.replace('`', "``");
    if forbid_qualified {
        format!("`{}`", escaped)
    } else {
        format!("`{}`", escaped.replace('.', "`.`"))
    }
}

/// Escape a value as an identifier
///
/// Strings are quoted with [`quote_identifier`]; lists produce a comma-separated
/// list of quoted identifiers; raw fragments pass through untouched. Booleans
/// and numbers are quoted using their text form. Other values cannot name a
/// table or column and are rejected.
///
/// # Example
/// ```
/// use sqlstring::{escape_id, Value};
///
/// let columns = Value::list(["id", "users.name"]);
/// assert_eq!(escape_id(&columns, false).unwrap(), "`id`, `users`.`name`");
/// ```
pub fn escape_id(value: &Value, forbid_qualified: bool) -> Result<String> {
    escape_id_at(value, forbid_qualified, 0)
}

fn escape_id_at(value: &Value, forbid_qualified: bool, depth: usize) -> Result<String> {
    check_depth(depth)?;

    match value {
        Value::Text(s) => Ok(quote_identifier(s, forbid_qualified)),
        Value::Raw(r) => Ok(r.to_sql_string().to_string()),
        Value::List(items) => {
            let parts = items
                .iter()
                .map(|item| escape_id_at(item, forbid_qualified, depth + 1))
                .collect::<Result<Vec<_>>>()?;
            Ok(parts.join(", "))
        }
        Value::Bool(b) => Ok(quote_identifier(&b.to_string(), forbid_qualified)),
        Value::Int(n) => Ok(quote_identifier(&n.to_string(), forbid_qualified)),
        Value::UInt(n) => Ok(quote_identifier(&n.to_string(), forbid_qualified)),
        Value::Float(n) => Ok(quote_identifier(&n.to_string(), forbid_qualified)),
        Value::Decimal(n) => Ok(quote_identifier(&n.to_string(), forbid_qualified)),
        Value::Null => Err(SqlStringError::invalid_identifier(
            "NULL cannot be used as an identifier",
        )),
        Value::Bytes(_) => Err(SqlStringError::invalid_identifier(
            "binary data cannot be used as an identifier",
        )),
        Value::Date(_) => Err(SqlStringError::invalid_identifier(
            "a date cannot be used as an identifier",
        )),
        Value::Map(_) => Err(SqlStringError::invalid_identifier(
            "a mapping cannot be used as an identifier",
        )),
        Value::Custom(hook) => Err(SqlStringError::invalid_identifier(format!(
            "custom value {:?} cannot be used as an identifier",
            hook
        ))),
    }
}
