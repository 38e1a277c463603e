//! Small helpers for URL encoding and timestamp formatting.

use std::fmt::Write;

use chrono::DateTime;

/// What: Percent-encode a string for use in a URL query component (RFC 3986).
///
/// Inputs:
/// - `input`: String to encode.
///
/// Output:
/// - Encoded string; unreserved characters (`A-Z a-z 0-9 - . _ ~`) pass through.
///
/// Details:
/// - Space becomes `%20`, never `+`. Multi-byte characters are escaped byte by byte.
#[must_use]
pub fn percent_encode(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for &b in input.as_bytes() {
        if b.is_ascii_alphanumeric() || matches!(b, b'-' | b'.' | b'_' | b'~') {
            out.push(char::from(b));
        } else {
            let _ = write!(out, "%{b:02X}");
        }
    }
    out
}

/// What: Format epoch seconds with a `chrono` format string (UTC).
///
/// Details:
/// - Negative inputs and instants `chrono` cannot represent come back as the
///   plain number.
fn format_ts(ts: i64, fmt: &str) -> String {
    if ts < 0 {
        return ts.to_string();
    }
    DateTime::from_timestamp(ts, 0)
        .map_or_else(|| ts.to_string(), |dt| dt.format(fmt).to_string())
}

/// What: Format epoch seconds as `YYYY-MM-DD HH:MM:SS` (UTC).
///
/// Inputs:
/// - `ts`: Seconds since the Unix epoch
///
/// Output:
/// - Formatted string; negative or out-of-range inputs are returned as plain numbers
#[must_use]
pub fn ts_to_date(ts: i64) -> String {
    format_ts(ts, "%Y-%m-%d %H:%M:%S")
}

/// Format epoch seconds as `YYYY-MM-DD` (UTC); negative or out-of-range inputs as plain numbers.
#[must_use]
pub fn ts_to_day(ts: i64) -> String {
    format_ts(ts, "%Y-%m-%d")
}
