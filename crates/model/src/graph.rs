use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::route::TransitMode;

/// A (stop, route) pair: one location viewed from a particular line. A stop
/// served by three routes appears as three nodes. `UNIQUE(stop_id, route_id)`
/// holds in the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    pub id: i64,
    pub stop_id: String,
    pub route_id: String,
    pub mode: TransitMode,
    pub latitude: f64,
    pub longitude: f64,
}

/// The three transition kinds, distinguished by cost semantics and endpoint
/// constraints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EdgeKind {
    Ride,
    Walk,
    Transfer,
}

impl EdgeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ride => "RIDE",
            Self::Walk => "WALK",
            Self::Transfer => "TRANSFER",
        }
    }
}

impl fmt::Display for EdgeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EdgeKind {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "RIDE" => Ok(Self::Ride),
            "WALK" => Ok(Self::Walk),
            "TRANSFER" => Ok(Self::Transfer),
            other => Err(format!("unknown edge kind '{other}'")),
        }
    }
}

/// A directed, typed transition between two nodes with three non-negative
/// cost components. RIDE edges additionally carry their originating trip and
/// the stop sequence of the departure visit.
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Edge {
    pub id: i64,
    pub from_node_id: i64,
    pub to_node_id: i64,
    pub kind: EdgeKind,
    /// Seconds of travel (RIDE), walking (WALK) or a fixed penalty (TRANSFER).
    pub cost_time: u32,
    /// Meters walked; zero except on WALK edges.
    pub cost_walk: u32,
    /// Transfer count; zero except on TRANSFER edges, where it is one.
    pub cost_transfer: u32,
    pub trip_id: Option<String>,
    pub sequence: Option<u32>,
}
