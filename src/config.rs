//! Configuration for escaping
//!
//! Provides `EscapeOptions`, the options bundle threaded through every encoder
//! call, and the `TimeZone` used when rendering dates.

use std::fmt;
use std::sync::LazyLock;

use chrono::FixedOffset;
use regex::Regex;
use serde::{Deserialize, Serialize};

static OFFSET_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([+\-\s])(\d\d):?(\d\d)?").unwrap());

/// Time zone used to render dates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TimeZone {
    /// Machine local time (`"local"`)
    #[default]
    Local,
    /// UTC (`"Z"`)
    Utc,
    /// Fixed offset from UTC (`"+HH:MM"` / `"-HH:MM"`)
    Offset(FixedOffset),
}

impl TimeZone {
    /// Parse the string form of a time zone option
    ///
    /// Accepts `"local"`, `"Z"` and offsets such as `"+05:30"`, `"-0800"` or
    /// `"+01"`. Anything else falls back to UTC.
    ///
    /// # Example
    /// ```
    /// use sqlstring::TimeZone;
    ///
    /// assert_eq!(TimeZone::parse("local"), TimeZone::Local);
    /// assert_eq!(TimeZone::parse("Z"), TimeZone::Utc);
    /// assert_eq!(TimeZone::parse("+01:00").to_string(), "+01:00");
    /// ```
    pub fn parse(value: &str) -> Self {
        if value == "local" {
            return TimeZone::Local;
        }
        if value == "Z" {
            return TimeZone::Utc;
        }

        let Some(caps) = OFFSET_PATTERN.captures(value) else {
            tracing::debug!(time_zone = value, "unrecognized time zone, using UTC");
            return TimeZone::Utc;
        };

        let sign = if &caps[1] == "-" { -1 } else { 1 };
        let hours: i32 = caps[2].parse().unwrap_or(0);
        let minutes: i32 = caps.get(3).and_then(|m| m.as_str().parse().ok()).unwrap_or(0);

        match FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60)) {
            Some(offset) => TimeZone::Offset(offset),
            None => {
                tracing::debug!(time_zone = value, "time zone offset out of range, using UTC");
                TimeZone::Utc
            }
        }
    }

    /// Returns the fixed offset for this zone, or `None` for `Local`
    pub fn fixed_offset(&self) -> Option<FixedOffset> {
        match self {
            TimeZone::Local => None,
            TimeZone::Utc => FixedOffset::east_opt(0),
            TimeZone::Offset(offset) => Some(*offset),
        }
    }
}

impl fmt::Display for TimeZone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimeZone::Local => f.write_str("local"),
            TimeZone::Utc => f.write_str("Z"),
            TimeZone::Offset(offset) => write!(f, "{}", offset),
        }
    }
}

impl From<&str> for TimeZone {
    fn from(value: &str) -> Self {
        TimeZone::parse(value)
    }
}

impl From<String> for TimeZone {
    fn from(value: String) -> Self {
        TimeZone::parse(&value)
    }
}

impl From<TimeZone> for String {
    fn from(value: TimeZone) -> Self {
        value.to_string()
    }
}

/// Options applied when escaping values
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EscapeOptions {
    /// Render mappings as quoted JSON text instead of `key = value` pairs
    pub stringify_objects: bool,
    /// Zone used to render dates (default: local)
    pub time_zone: TimeZone,
}

impl EscapeOptions {
    /// Create a new options builder
    pub fn builder() -> EscapeOptionsBuilder {
        EscapeOptionsBuilder::new()
    }

    pub(crate) fn stringified(&self) -> Self {
        Self {
            stringify_objects: true,
            time_zone: self.time_zone,
        }
    }
}

impl From<(bool, &str)> for EscapeOptions {
    fn from((stringify_objects, time_zone): (bool, &str)) -> Self {
        Self {
            stringify_objects,
            time_zone: TimeZone::parse(time_zone),
        }
    }
}

impl From<TimeZone> for EscapeOptions {
    fn from(time_zone: TimeZone) -> Self {
        Self {
            stringify_objects: false,
            time_zone,
        }
    }
}

/// Builder for EscapeOptions
#[derive(Debug, Default)]
pub struct EscapeOptionsBuilder {
    stringify_objects: bool,
    time_zone: TimeZone,
}

impl EscapeOptionsBuilder {
    /// Create a new builder with default options
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable object stringification (default: false)
    pub fn stringify_objects(mut self, enabled: bool) -> Self {
        self.stringify_objects = enabled;
        self
    }

    /// Set the time zone used for dates (default: local)
    pub fn time_zone(mut self, time_zone: impl Into<TimeZone>) -> Self {
        self.time_zone = time_zone.into();
        self
    }

    /// Build the options
    pub fn build(self) -> EscapeOptions {
        EscapeOptions {
            stringify_objects: self.stringify_objects,
            time_zone: self.time_zone,
        }
    }
}
