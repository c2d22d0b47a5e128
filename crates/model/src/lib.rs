use serde::{Deserialize, Serialize};

pub mod calendar;
pub mod graph;
pub mod journey;
pub mod route;
pub mod stop;
pub mod trip;

/// A geographic position as supplied by a caller. Unlike [`stop::Stop`],
/// which is always valid once imported, a `Coordinates` value arrives from
/// the outside and has to be range-checked before use.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && (-90.0..=90.0).contains(&self.latitude)
            && (-180.0..=180.0).contains(&self.longitude)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coordinate_validation() {
        assert!(Coordinates::new(14.7167, -17.4677).is_valid());
        assert!(Coordinates::new(-90.0, 180.0).is_valid());
        assert!(!Coordinates::new(90.5, 0.0).is_valid());
        assert!(!Coordinates::new(0.0, -180.1).is_valid());
        assert!(!Coordinates::new(f64::NAN, 0.0).is_valid());
    }
}
