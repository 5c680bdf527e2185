use chrono::{DateTime, Local, TimeZone, Utc};

const DISPLAY_FORMAT: &str = "%-m/%-d/%Y, %-I:%M:%S %p";

/// Renders a backend timestamp in the machine's local time zone.
pub fn format_local(timestamp: DateTime<Utc>) -> String {
    format_in(timestamp, &Local)
}

pub fn format_in<Tz>(timestamp: DateTime<Utc>, zone: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    timestamp.with_timezone(zone).format(DISPLAY_FORMAT).to_string()
}
