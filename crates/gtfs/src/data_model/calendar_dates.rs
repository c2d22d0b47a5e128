use serde::Deserialize;

/// A row of `calendar_dates.txt`: a dated exception to a weekly pattern.
/// See <https://gtfs.org/schedule/reference/#calendar_datestxt>
#[derive(Debug, Clone, Deserialize)]
pub struct CalendarDateRecord {
    /// Foreign ID referencing `calendar.service_id`.
    pub service_id: String,

    /// The exception date as `YYYYMMDD`.
    pub date: String,

    /// `1` when service is added for the date, `2` when removed.
    pub exception_type: u8,
}
