use serde::Deserialize;

/// A row of `trips.txt`.
/// See <https://gtfs.org/schedule/reference/#tripstxt>
#[derive(Debug, Clone, Deserialize)]
pub struct TripRecord {
    /// Foreign ID referencing `routes.route_id`.
    pub route_id: String,

    /// Foreign ID referencing `calendar.service_id` or
    /// `calendar_dates.service_id`. Identifies the set of dates when the
    /// trip is available.
    pub service_id: String,

    /// Identifies a trip.
    pub trip_id: String,
}
