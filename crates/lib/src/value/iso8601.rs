//! ISO8601 rendering and parsing for calendar values.
//!
//! The repository's date format is `±YYYY-MM-DDThh:mm:ss.SSSTZD`:
//!
//! - the year is zero padded to four digits and uses astronomical numbering,
//!   so 1 BC is `0000` and 2 BC is `-0001`
//! - milliseconds are always present
//! - `TZD` is `Z` for a zero offset, otherwise `+hh:mm` or `-hh:mm`
//!
//! Both directions delegate to chrono.

use chrono::{DateTime, FixedOffset, NaiveDateTime, SecondsFormat};

const LOCAL_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";
const OFFSET_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f%:z";

/// Renders a calendar value.
///
/// ```
/// # use node_decorators::value::iso8601;
/// use chrono::{FixedOffset, TimeZone};
///
/// let offset = FixedOffset::east_opt(2 * 3600).unwrap();
/// let date = offset.with_ymd_and_hms(2024, 3, 9, 7, 5, 0).unwrap();
/// assert_eq!(iso8601::format(&date), "2024-03-09T07:05:00.000+02:00");
/// ```
pub fn format(value: &DateTime<FixedOffset>) -> String {
    value.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Parses a calendar value rendered by [`format`].
///
/// The fractional seconds may be omitted. Returns `None` for malformed input
/// or out-of-range fields.
pub fn parse(text: &str) -> Option<DateTime<FixedOffset>> {
    match text.strip_suffix('Z') {
        Some(local) => NaiveDateTime::parse_from_str(local, LOCAL_FORMAT)
            .ok()
            .map(|naive| naive.and_utc().fixed_offset()),
        None => DateTime::parse_from_str(text, OFFSET_FORMAT).ok(),
    }
}
