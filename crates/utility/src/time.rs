use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TimeParseError {
    #[error("expected HH:MM:SS, got '{0}'")]
    Malformed(String),
    #[error("minutes or seconds out of range in '{0}'")]
    OutOfRange(String),
}

/// Parses a GTFS schedule time (`HH:MM:SS`, single-digit hours allowed) into
/// seconds since midnight. Hours ≥ 24 are legal and denote post-midnight
/// service on the same service day.
pub fn parse_schedule_time(value: &str) -> Result<u32, TimeParseError> {
    let mut parts = value.trim().splitn(3, ':');
    let (hours, minutes, seconds) = match (parts.next(), parts.next(), parts.next()) {
        (Some(h), Some(m), Some(s)) => (h, m, s),
        _ => return Err(TimeParseError::Malformed(value.to_owned())),
    };

    let hours: u32 = hours
        .parse()
        .map_err(|_| TimeParseError::Malformed(value.to_owned()))?;
    let minutes: u32 = minutes
        .parse()
        .map_err(|_| TimeParseError::Malformed(value.to_owned()))?;
    let seconds: u32 = seconds
        .parse()
        .map_err(|_| TimeParseError::Malformed(value.to_owned()))?;

    if minutes > 59 || seconds > 59 {
        return Err(TimeParseError::OutOfRange(value.to_owned()));
    }

    Ok(hours * 3600 + minutes * 60 + seconds)
}

/// Formats seconds since midnight as `HH:MM:SS`. Values ≥ 86400 keep their
/// hour count (e.g. `25:10:00`) to round-trip post-midnight schedule times.
pub fn format_schedule_time(seconds: u32) -> String {
    format!(
        "{:02}:{:02}:{:02}",
        seconds / 3600,
        (seconds % 3600) / 60,
        seconds % 60
    )
}
