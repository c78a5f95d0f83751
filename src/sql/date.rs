//! Date rendering
//!
//! Turns instants into quoted `'YYYY-MM-DD HH:MM:SS.mmm'` literals. Inputs that
//! cannot be read as a date render as `NULL`.

use chrono::{
    DateTime, Datelike, Duration, Local, NaiveDate, NaiveDateTime, TimeZone as _, Timelike, Utc,
};

use crate::config::TimeZone;
use crate::types::Value;

/// Largest epoch offset in milliseconds a date may carry
const MAX_EPOCH_MILLIS: f64 = 8.64e15;

const LOCAL_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"];

/// Render a date as a SQL literal
///
/// `date` may be a `Value::Date`, a number of milliseconds since the Unix
/// epoch, or text (RFC 3339, `YYYY-MM-DD HH:MM:SS[.fff]` in local time, or a
/// bare `YYYY-MM-DD` taken as UTC midnight). Anything else renders as `NULL`.
///
/// # Example
/// ```
/// use sqlstring::{date_to_string, TimeZone, Value};
///
/// let date = Value::Int(0);
/// assert_eq!(date_to_string(&date, &TimeZone::Utc), "'1970-01-01 00:00:00.000'");
/// assert_eq!(date_to_string(&Value::from("nope"), &TimeZone::Utc), "NULL");
/// ```
pub fn date_to_string(date: &Value, time_zone: &TimeZone) -> String {
    match to_instant(date) {
        Some(instant) => format_instant(&instant, time_zone),
        None => "NULL".to_string(),
    }
}

/// Render an instant in the given zone
///
/// Renders `NULL` when the shifted wall time falls outside the representable
/// date range.
pub(crate) fn format_instant(instant: &DateTime<Utc>, time_zone: &TimeZone) -> String {
    let utc = instant.naive_utc();
    let offset = match time_zone.fixed_offset() {
        Some(offset) => offset,
        None => Local.offset_from_utc_datetime(&utc),
    };

    match utc.checked_add_signed(Duration::seconds(i64::from(offset.local_minus_utc()))) {
        Some(wall) => render(&wall),
        None => "NULL".to_string(),
    }
}

fn render(dt: &NaiveDateTime) -> String {
    // Leap seconds carry nanoseconds past one second
    let millis = (dt.nanosecond() % 1_000_000_000) / 1_000_000;
    format!(
        "'{:04}-{:02}-{:02} {:02}:{:02}:{:02}.{:03}'",
        dt.year(),
        dt.month(),
        dt.day(),
        dt.hour(),
        dt.minute(),
        dt.second(),
        millis
    )
}

fn to_instant(date: &Value) -> Option<DateTime<Utc>> {
    match date {
        Value::Date(dt) => Some(*dt),
        Value::Int(ms) => DateTime::from_timestamp_millis(*ms),
        Value::UInt(ms) => i64::try_from(*ms)
            .ok()
            .and_then(DateTime::from_timestamp_millis),
        Value::Float(ms) => from_float_millis(*ms),
        Value::Text(s) => parse_text(s.trim()),
        _ => None,
    }
}

fn from_float_millis(ms: f64) -> Option<DateTime<Utc>> {
    if !ms.is_finite() || ms.abs() > MAX_EPOCH_MILLIS {
        return None;
    }
    DateTime::from_timestamp_millis(ms.trunc() as i64)
}

fn parse_text(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }

    for format in LOCAL_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, format) {
            return Local
                .from_local_datetime(&naive)
                .earliest()
                .map(|dt| dt.with_timezone(&Utc));
        }
    }

    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| Utc.from_utc_datetime(&naive))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn instant(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32, ms: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, mo, d, h, mi, s).unwrap() + chrono::Duration::milliseconds(ms as i64)
    }

    // =========================================================================
    // Fixed Zone Tests
    // =========================================================================

    #[test]
    fn test_utc() {
        let date = Value::Date(instant(2012, 5, 7, 11, 42, 3, 2));
        assert_eq!(date_to_string(&date, &TimeZone::Utc), "'2012-05-07 11:42:03.002'");
    }

    #[test]
    fn test_positive_offset() {
        let date = Value::Date(instant(2012, 5, 7, 11, 42, 3, 2));
        assert_eq!(
            date_to_string(&date, &TimeZone::parse("+01:00")),
            "'2012-05-07 12:42:03.002'"
        );
    }

    #[test]
    fn test_negative_offset_crosses_midnight() {
        let date = Value::Date(instant(2012, 1, 1, 2, 0, 0, 0));
        assert_eq!(
            date_to_string(&date, &TimeZone::parse("-05:30")),
            "'2011-12-31 20:30:00.000'"
        );
    }

    #[test]
    fn test_unknown_zone_renders_utc() {
        let date = Value::Date(instant(2020, 2, 29, 23, 59, 59, 999));
        assert_eq!(
            date_to_string(&date, &TimeZone::parse("Mars/Olympus")),
            "'2020-02-29 23:59:59.999'"
        );
    }

    #[test]
    fn test_zero_padding() {
        let date = Value::Date(instant(33, 1, 2, 3, 4, 5, 6));
        assert_eq!(date_to_string(&date, &TimeZone::Utc), "'0033-01-02 03:04:05.006'");
    }

    #[test]
    fn test_wall_time_past_max_is_null() {
        let date = Value::Date(DateTime::<Utc>::MAX_UTC);
        assert_eq!(date_to_string(&date, &TimeZone::parse("+14:00")), "NULL");
        assert_ne!(date_to_string(&date, &TimeZone::Utc), "NULL");
    }

    #[test]
    fn test_wall_time_before_min_is_null() {
        let date = Value::Date(DateTime::<Utc>::MIN_UTC);
        assert_eq!(date_to_string(&date, &TimeZone::parse("-14:00")), "NULL");
        assert_ne!(date_to_string(&date, &TimeZone::Utc), "NULL");
    }

    #[test]
    fn test_max_epoch_millis_with_positive_offset_is_null() {
        let date = Value::Int(8_210_298_412_799_999);
        assert_eq!(date_to_string(&date, &TimeZone::parse("+01:00")), "NULL");
    }

    #[test]
    fn test_extreme_dates_in_local_zone_do_not_panic() {
        for date in [DateTime::<Utc>::MAX_UTC, DateTime::<Utc>::MIN_UTC] {
            let rendered = date_to_string(&Value::Date(date), &TimeZone::Local);
            assert!(rendered == "NULL" || rendered.starts_with('\''));
        }
    }

    #[test]
    fn test_local_matches_chrono_local() {
        let dt = instant(2015, 6, 15, 8, 30, 0, 125);
        let expected = render(&dt.with_timezone(&Local).naive_local());
        assert_eq!(date_to_string(&Value::Date(dt), &TimeZone::Local), expected);
    }

    // =========================================================================
    // Input Coercion Tests
    // =========================================================================

    #[test]
    fn test_epoch_millis() {
        assert_eq!(
            date_to_string(&Value::Int(1_000), &TimeZone::Utc),
            "'1970-01-01 00:00:01.000'"
        );
        assert_eq!(
            date_to_string(&Value::UInt(86_400_000), &TimeZone::Utc),
            "'1970-01-02 00:00:00.000'"
        );
        assert_eq!(
            date_to_string(&Value::Float(1.9), &TimeZone::Utc),
            "'1970-01-01 00:00:00.001'"
        );
    }

    #[test]
    fn test_rfc3339_text() {
        let date = Value::from("2020-01-01T10:00:00+02:00");
        assert_eq!(date_to_string(&date, &TimeZone::Utc), "'2020-01-01 08:00:00.000'");
    }

    #[test]
    fn test_date_only_text_is_utc_midnight() {
        let date = Value::from("2021-07-04");
        assert_eq!(date_to_string(&date, &TimeZone::Utc), "'2021-07-04 00:00:00.000'");
    }

    #[test]
    fn test_local_text_round_trips_in_local_zone() {
        let date = Value::from("2019-03-10 12:34:56.789");
        assert_eq!(
            date_to_string(&date, &TimeZone::Local),
            "'2019-03-10 12:34:56.789'"
        );
    }

    // =========================================================================
    // Invalid Input Tests
    // =========================================================================

    #[test]
    fn test_invalid_text_is_null() {
        assert_eq!(date_to_string(&Value::from("not a date"), &TimeZone::Utc), "NULL");
        assert_eq!(date_to_string(&Value::from(""), &TimeZone::Local), "NULL");
    }

    #[test]
    fn test_non_finite_is_null() {
        assert_eq!(date_to_string(&Value::Float(f64::NAN), &TimeZone::Utc), "NULL");
        assert_eq!(date_to_string(&Value::Float(f64::INFINITY), &TimeZone::Utc), "NULL");
    }

    #[test]
    fn test_out_of_range_is_null() {
        assert_eq!(date_to_string(&Value::Float(9e15), &TimeZone::Utc), "NULL");
        assert_eq!(date_to_string(&Value::Int(i64::MAX), &TimeZone::Utc), "NULL");
        assert_eq!(date_to_string(&Value::UInt(u64::MAX), &TimeZone::Utc), "NULL");
    }

    #[test]
    fn test_other_kinds_are_null() {
        assert_eq!(date_to_string(&Value::Null, &TimeZone::Utc), "NULL");
        assert_eq!(date_to_string(&Value::Bool(true), &TimeZone::Utc), "NULL");
        assert_eq!(date_to_string(&Value::list([1]), &TimeZone::Utc), "NULL");
    }
}
