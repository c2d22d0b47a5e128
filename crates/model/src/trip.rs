use serde::{Deserialize, Serialize};

/// One scheduled run of a route on a service pattern.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Trip {
    pub id: String,
    pub route_id: String,
    pub service_id: String,
}

/// One visit of a trip at a stop. Times are kept both as the raw `HH:MM:SS`
/// strings the feed carries and as parsed seconds since midnight; values
/// ≥ 86400 are legal and denote post-midnight service. Seconds are `None`
/// when the feed left the time blank.
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StopTime {
    pub trip_id: String,
    pub stop_id: String,
    pub stop_sequence: u32,
    pub arrival_time: String,
    pub departure_time: String,
    pub arrival_seconds: Option<u32>,
    pub departure_seconds: Option<u32>,
}
