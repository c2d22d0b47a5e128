use serde::{Deserialize, Serialize};
use utility::geo::haversine_distance;

/// A physical stop location. Immutable once inserted; a fresh import of the
/// same agency replaces stops by id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stop {
    pub id: String,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl Stop {
    /// Great-circle distance to another stop, in meters.
    pub fn distance_to(&self, other: &Stop) -> f64 {
        haversine_distance(
            self.latitude,
            self.longitude,
            other.latitude,
            other.longitude,
        )
    }
}
