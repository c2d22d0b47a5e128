use serde::Deserialize;

/// A row of `stops.txt`.
/// See <https://gtfs.org/schedule/reference/#stopstxt>
#[derive(Debug, Clone, Deserialize)]
pub struct StopRecord {
    /// Identifies a location: a stop/platform, station, entrance/exit,
    /// generic node or boarding area.
    pub stop_id: String,

    /// Name of the location. The GTFS reference requires it for stops and
    /// platforms; feeds in the wild still leave it blank.
    pub stop_name: Option<String>,

    /// Latitude of the location. Conditionally required; rows without a
    /// coordinate cannot take part in routing and are dropped.
    pub stop_lat: Option<f64>,

    /// Longitude of the location.
    pub stop_lon: Option<f64>,
}
