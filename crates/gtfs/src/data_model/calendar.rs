use serde::Deserialize;

/// A row of `calendar.txt`: a weekly service pattern with a validity window.
/// See <https://gtfs.org/schedule/reference/#calendartxt>
#[derive(Debug, Clone, Deserialize)]
pub struct CalendarRecord {
    /// Identifies a set of dates when service is available.
    pub service_id: String,

    /// `1` if the service runs on the weekday, `0` otherwise.
    pub monday: u8,
    pub tuesday: u8,
    pub wednesday: u8,
    pub thursday: u8,
    pub friday: u8,
    pub saturday: u8,
    pub sunday: u8,

    /// Start of the validity window as `YYYYMMDD`.
    pub start_date: String,

    /// End of the validity window (inclusive) as `YYYYMMDD`.
    pub end_date: String,
}
