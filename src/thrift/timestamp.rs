use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use tracing::debug;

use super::error::{Result, ThriftError};

const DATE_TIME: &str = "%Y-%m-%d %H:%M:%S";

/// Converts timestamp text into nanoseconds since the epoch (UTC).
///
/// Bare integers are taken as already resolved. Otherwise the text may be a
/// `YYYY-MM-DD HH:MM:SS` date time, optionally followed by `:NNNNNNNNN` nanoseconds or a
/// `.fff` fraction, an RFC 3339 instant, or a plain `YYYY-MM-DD` date.
pub fn parse_timestamp(text: &str) -> Result<i64> {
    let text = text.trim();
    if let Ok(nanos) = text.parse::<i64>() {
        return Ok(nanos);
    }

    let ts = parse_date_time(text).and_then(|dt| dt.timestamp_nanos_opt());
    match ts {
        Some(nanos) => {
            debug!(text, nanos, "parsed timestamp");
            Ok(nanos)
        }
        None => Err(invalid(text)),
    }
}

fn parse_date_time(text: &str) -> Option<DateTime<Utc>> {
    if let Ok(naive) = NaiveDateTime::parse_from_str(text, DATE_TIME) {
        return Some(Utc.from_utc_datetime(&naive));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(text, "%Y-%m-%d %H:%M:%S%.f") {
        return Some(Utc.from_utc_datetime(&naive));
    }
    if let Some(dt) = parse_nanosecond_suffix(text) {
        return Some(dt);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| Utc.from_utc_datetime(&naive))
}

// "2008-07-28 00:00:02:123456789"
fn parse_nanosecond_suffix(text: &str) -> Option<DateTime<Utc>> {
    let (head, nanos) = text.rsplit_once(':')?;
    if nanos.is_empty() || nanos.len() > 9 || !nanos.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let naive = NaiveDateTime::parse_from_str(head, DATE_TIME).ok()?;
    let nanos: i64 = nanos.parse().ok()?;
    Some(Utc.from_utc_datetime(&naive) + chrono::Duration::nanoseconds(nanos))
}

fn invalid(text: &str) -> ThriftError {
    ThriftError::InvalidArgument {
        what: "timestamp",
        input: text.to_owned(),
    }
}
