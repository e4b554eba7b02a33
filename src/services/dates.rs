use jiff::{
    Timestamp,
    civil::{Date, DateTime, Time},
    tz::TimeZone,
};

/// Parse a raw backend date field into a civil datetime in `tz`.
///
/// Accepts an instant with an offset (`2024-03-01T09:30:00Z`), a civil
/// datetime (`2024-03-01T09:30`) or a bare date (`2024-03-01`, at midnight).
/// Returns `None` for anything else; callers decide whether to log the skip.
pub fn parse_record_date(raw: &str, tz: &TimeZone) -> Option<DateTime> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(timestamp) = raw.parse::<Timestamp>() {
        return Some(timestamp.to_zoned(tz.clone()).datetime());
    }
    if let Ok(datetime) = raw.parse::<DateTime>() {
        return Some(datetime);
    }
    raw.parse::<Date>()
        .ok()
        .map(|date| date.to_datetime(Time::midnight()))
}

/// Civil date of an instant as seen in `tz`.
pub fn local_date(timestamp: Timestamp, tz: &TimeZone) -> Date {
    timestamp.to_zoned(tz.clone()).date()
}
