//! SQL text generation
//!
//! Identifier quoting, value escaping, date rendering, list/object
//! serialization and placeholder substitution.

pub mod date;
pub mod escape;
pub mod list;
pub mod sanitize;
pub mod template;

pub use date::date_to_string;
pub use escape::{MAX_DEPTH, buffer_to_string, escape, escape_string};
pub use list::{array_to_list, object_to_values};
pub use sanitize::{escape_id, quote_identifier};
pub use template::{format, format_values};
