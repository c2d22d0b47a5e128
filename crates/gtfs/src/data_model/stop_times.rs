use serde::Deserialize;

/// A row of `stop_times.txt`.
/// See <https://gtfs.org/schedule/reference/#stop_timestxt>
#[derive(Debug, Clone, Deserialize)]
pub struct StopTimeRecord {
    /// Foreign ID referencing `trips.trip_id`.
    pub trip_id: String,

    /// Arrival time at the stop in `HH:MM:SS`, in the agency's timezone.
    /// For times occurring after midnight on the service day the hour is
    /// greater than 24. Blank when the feed only provides interpolated
    /// timepoints.
    pub arrival_time: Option<String>,

    /// Departure time from the stop, same format and caveats as
    /// `arrival_time`.
    pub departure_time: Option<String>,

    /// Foreign ID referencing `stops.stop_id`.
    pub stop_id: Option<String>,

    /// Order of the visit within the trip. Values must increase along the
    /// trip but need not be consecutive.
    pub stop_sequence: u32,
}
