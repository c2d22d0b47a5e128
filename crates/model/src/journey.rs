use serde::{Deserialize, Serialize};

use crate::graph::{Edge, EdgeKind, Node};
use crate::route::TransitMode;

/// One user-visible leg of a journey. Consecutive RIDE edges on the same
/// route collapse into a single step whose `num_stops` counts the merged
/// edges; WALK and TRANSFER steps always stand alone.
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Step {
    #[serde(rename = "type")]
    pub kind: EdgeKind,
    pub from_stop_id: String,
    pub to_stop_id: String,
    pub route_id: Option<String>,
    pub mode: Option<TransitMode>,
    pub duration_seconds: u32,
    pub distance_meters: u32,
    pub num_stops: u32,
}

/// A routed journey: the node/edge chain the search produced, its totals,
/// and the consolidated step list. This is the value serialized into the
/// cache and handed back to callers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Journey {
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
    pub total_time_seconds: u32,
    pub walk_distance_meters: u32,
    pub transfers: u32,
    pub steps: Vec<Step>,
}

impl Journey {
    /// Totals recomputed from the edge list: summed time, summed walk
    /// meters, and the TRANSFER edge count.
    pub fn totals_from_edges(edges: &[Edge]) -> (u32, u32, u32) {
        let mut time = 0u32;
        let mut walk = 0u32;
        let mut transfers = 0u32;
        for edge in edges {
            time += edge.cost_time;
            walk += edge.cost_walk;
            if edge.kind == EdgeKind::Transfer {
                transfers += 1;
            }
        }
        (time, walk, transfers)
    }
}
