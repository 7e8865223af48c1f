//! Date formatting for chart axes and captions.

use chrono::DateTime;
use chrono::Datelike;

/// The name under which the page script exposes its date formatter.
pub const DATE_FORMATTER: &str = "formatDate";

/// The browser side counterpart of [format_date], attached to the x axis of
/// every chart.
pub(crate) const DATE_FORMATTER_SCRIPT: &str = r#"
function zeropad(x) { return (x < 10) ? '0' + x : x; }
function formatDate(millis) {
  var d = new Date(millis);
  return d.getUTCFullYear() + '/' + zeropad(1 + d.getUTCMonth()) + '/' + zeropad(d.getUTCDate());
}
"#;

/// Formats a timestamp in milliseconds as `YYYY/MM/DD` in UTC.
///
/// A timestamp out of the representable range formats the way an invalid
/// date does in the browser, as `NaN/NaN/NaN`.
pub fn format_date(millis: i64) -> String {
    match DateTime::from_timestamp_millis(millis) {
        Some(dt) => format!("{}/{:02}/{:02}", dt.year(), dt.month(), dt.day()),
        None => String::from("NaN/NaN/NaN"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use chrono::Utc;

    fn millis(y: i32, m: u32, d: u32) -> i64 {
        Utc.with_ymd_and_hms(y, m, d, 12, 30, 0)
            .unwrap()
            .timestamp_millis()
    }

    #[test]
    fn pads_single_digit_month_and_day() {
        assert_eq!(format_date(millis(2023, 1, 5)), "2023/01/05");
    }

    #[test]
    fn leaves_two_digit_month_and_day() {
        assert_eq!(format_date(millis(2023, 11, 23)), "2023/11/23");
    }

    #[test]
    fn epoch() {
        assert_eq!(format_date(0), "1970/01/01");
    }

    #[test]
    fn out_of_range() {
        assert_eq!(format_date(i64::MAX), "NaN/NaN/NaN");
    }
}
