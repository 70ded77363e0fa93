//! HTTP conditional request module
//!
//! Provides `Last-Modified` formatting and `If-Modified-Since` handling.

use chrono::{DateTime, Utc};
use std::time::{SystemTime, UNIX_EPOCH};

/// Format a timestamp as an RFC 7231 IMF-fixdate
/// (e.g., `Tue, 15 Nov 1994 08:12:31 GMT`), the format used by the
/// `Last-Modified` and `Date` headers.
pub fn format_http_date(time: SystemTime) -> String {
    DateTime::<Utc>::from(time)
        .format("%a, %d %b %Y %H:%M:%S GMT")
        .to_string()
}

/// Parse an HTTP date header value.
///
/// Accepts the RFC 2822/7231 date shape clients send in
/// `If-Modified-Since`. Returns `None` for anything unparsable, which
/// callers treat as "no condition".
pub fn parse_http_date(value: &str) -> Option<SystemTime> {
    DateTime::parse_from_rfc2822(value)
        .ok()
        .map(SystemTime::from)
}

/// Check whether a file is unmodified with respect to the client's
/// `If-Modified-Since` header (should answer 304).
///
/// HTTP dates carry second resolution, so sub-second precision on the
/// file's mtime is dropped before comparing.
pub fn not_modified(if_modified_since: Option<&str>, modified: SystemTime) -> bool {
    let Some(header) = if_modified_since else {
        return false;
    };
    let Some(client_time) = parse_http_date(header.trim()) else {
        return false;
    };

    match (unix_seconds(modified), unix_seconds(client_time)) {
        (Some(file_secs), Some(header_secs)) => file_secs <= header_secs,
        _ => false,
    }
}

fn unix_seconds(time: SystemTime) -> Option<u64> {
    time.duration_since(UNIX_EPOCH).ok().map(|d| d.as_secs())
}
