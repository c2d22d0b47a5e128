use model::trip::{StopTime, Trip};
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow)]
pub struct TripRow {
    pub id: String,
    pub route_id: String,
    pub service_id: String,
}

impl From<TripRow> for Trip {
    fn from(row: TripRow) -> Self {
        Trip {
            id: row.id,
            route_id: row.route_id,
            service_id: row.service_id,
        }
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct StopTimeRow {
    pub trip_id: String,
    pub stop_id: String,
    pub stop_sequence: i32,
    pub arrival_time: String,
    pub departure_time: String,
    pub arrival_seconds: Option<i32>,
    pub departure_seconds: Option<i32>,
}

impl From<StopTimeRow> for StopTime {
    fn from(row: StopTimeRow) -> Self {
        StopTime {
            trip_id: row.trip_id,
            stop_id: row.stop_id,
            stop_sequence: row.stop_sequence as u32,
            arrival_time: row.arrival_time,
            departure_time: row.departure_time,
            arrival_seconds: row.arrival_seconds.map(|seconds| seconds as u32),
            departure_seconds: row.departure_seconds.map(|seconds| seconds as u32),
        }
    }
}
