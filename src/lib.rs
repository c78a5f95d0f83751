//! # sqlstring
//!
//! Escape values and identifiers into MySQL-style SQL text without a database
//! connection.
//!
//! This crate turns native values into literals that are safe to splice into a
//! statement, and fills `?` / `??` placeholders in a SQL template with escaped
//! values and identifiers.
//!
//! ## Features
//!
//! - **Value Escaping**: strings, numbers, booleans, dates, binary data, lists and mappings
//! - **Identifier Quoting**: backtick quoting with optional `db.table` qualification
//! - **Templates**: positional `?` (value) and `??` (identifier) placeholders
//! - **Raw Fragments**: trusted SQL such as `NOW()` inserted verbatim
//! - **Custom Types**: implement [`SqlStringify`] to control how a type renders
//! - **Time Zones**: dates rendered in local time, UTC or a fixed offset
//!
//! ## Quick Start
//!
//! ```rust
//! use sqlstring::{format, raw, EscapeOptions, Value};
//!
//! let options = EscapeOptions::default();
//! let sql = format(
//!     "UPDATE ?? SET ? WHERE id = ?",
//!     &Value::List(vec![
//!         "users".into(),
//!         Value::map([("name", Value::from("O'Brien")), ("seen_at", raw("NOW()"))]),
//!         7.into(),
//!     ]),
//!     &options,
//! )?;
//!
//! assert_eq!(
//!     sql,
//!     r"UPDATE `users` SET `name` = 'O\'Brien', `seen_at` = NOW() WHERE id = 7"
//! );
//! # Ok::<(), sqlstring::SqlStringError>(())
//! ```
//!
//! ## Configuration
//!
//! Every call takes an `EscapeOptions`:
//!
//! ```rust
//! use sqlstring::EscapeOptions;
//!
//! let options = EscapeOptions::builder()
//!     .stringify_objects(false)   // Mappings render as `key` = value pairs (default)
//!     .time_zone("+02:00")        // "local" (default), "Z" or a fixed offset
//!     .build();
//! ```
//!
//! ## Limits
//!
//! Output is only safe against value-level injection. Templates are not parsed,
//! so a `?` inside a quoted string in the template is still a placeholder.

pub mod config;
pub mod error;
pub mod sql;
pub mod types;

// Re-export main types for convenience
pub use config::{EscapeOptions, EscapeOptionsBuilder, TimeZone};
pub use error::{Result, SqlStringError};
pub use types::{Raw, SqlStringify, Value, raw, to_value};

pub use sql::date::date_to_string;
pub use sql::escape::{MAX_DEPTH, buffer_to_string, escape, escape_string};
pub use sql::list::{array_to_list, object_to_values};
pub use sql::sanitize::{escape_id, quote_identifier};
pub use sql::template::{format, format_values};
