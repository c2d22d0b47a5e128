use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Transit mode served by a route. The set is closed: everything an agency
/// runs maps onto one of these five.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransitMode {
    Bus,
    Brt,
    Ter,
    Ferry,
    Tram,
}

impl TransitMode {
    /// Infers the mode of a route. Agency-id substring rules are authoritative
    /// and checked first; the GTFS `route_type` is the fallback, and anything
    /// unrecognized is a bus.
    pub fn infer(agency_id: &str, route_type: Option<u16>) -> Self {
        if agency_id.contains("BRT") {
            return Self::Brt;
        }
        if agency_id.contains("TER") {
            return Self::Ter;
        }
        if agency_id.contains("AFTU")
            || agency_id.contains("DDD")
            || agency_id.contains("DEM")
        {
            return Self::Bus;
        }

        match route_type {
            Some(0) | Some(5..=7) => Self::Tram,
            Some(1) => Self::Brt,
            Some(2) => Self::Ter,
            Some(3) => Self::Bus,
            Some(4) => Self::Ferry,
            _ => Self::Bus,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Bus => "BUS",
            Self::Brt => "BRT",
            Self::Ter => "TER",
            Self::Ferry => "FERRY",
            Self::Tram => "TRAM",
        }
    }
}

impl fmt::Display for TransitMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransitMode {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "BUS" => Ok(Self::Bus),
            "BRT" => Ok(Self::Brt),
            "TER" => Ok(Self::Ter),
            "FERRY" => Ok(Self::Ferry),
            "TRAM" => Ok(Self::Tram),
            other => Err(format!("unknown transit mode '{other}'")),
        }
    }
}

/// A named transit line.
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Route {
    pub id: String,
    pub agency_id: String,
    pub short_name: Option<String>,
    pub long_name: Option<String>,
    pub mode: TransitMode,
}

impl Route {
    /// Preferred display name: the short name where present, the long name
    /// otherwise, the id as a last resort.
    pub fn display_name(&self) -> &str {
        self.short_name
            .as_deref()
            .or(self.long_name.as_deref())
            .unwrap_or(&self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn agency_rules_win_over_route_type() {
        assert_eq!(TransitMode::infer("DAKAR-BRT", Some(3)), TransitMode::Brt);
        assert_eq!(TransitMode::infer("TER-SN", Some(3)), TransitMode::Ter);
        assert_eq!(TransitMode::infer("AFTU-12", Some(2)), TransitMode::Bus);
        assert_eq!(TransitMode::infer("DDD", Some(4)), TransitMode::Bus);
        assert_eq!(TransitMode::infer("DEM-X", Some(0)), TransitMode::Bus);
    }

    #[test]
    fn route_type_fallback() {
        assert_eq!(TransitMode::infer("OTHER", Some(0)), TransitMode::Tram);
        assert_eq!(TransitMode::infer("OTHER", Some(1)), TransitMode::Brt);
        assert_eq!(TransitMode::infer("OTHER", Some(2)), TransitMode::Ter);
        assert_eq!(TransitMode::infer("OTHER", Some(3)), TransitMode::Bus);
        assert_eq!(TransitMode::infer("OTHER", Some(4)), TransitMode::Ferry);
        assert_eq!(TransitMode::infer("OTHER", Some(5)), TransitMode::Tram);
        assert_eq!(TransitMode::infer("OTHER", Some(7)), TransitMode::Tram);
    }

    #[test]
    fn unknown_defaults_to_bus() {
        assert_eq!(TransitMode::infer("OTHER", None), TransitMode::Bus);
        assert_eq!(TransitMode::infer("OTHER", Some(12)), TransitMode::Bus);
    }

    #[test]
    fn mode_round_trips_through_str() {
        for mode in [
            TransitMode::Bus,
            TransitMode::Brt,
            TransitMode::Ter,
            TransitMode::Ferry,
            TransitMode::Tram,
        ] {
            assert_eq!(mode.as_str().parse::<TransitMode>(), Ok(mode));
        }
        assert!("TRAIN".parse::<TransitMode>().is_err());
    }
}
