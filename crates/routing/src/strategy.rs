use std::fmt;
use std::str::FromStr;

use model::graph::{Edge, EdgeKind};
use serde::{Deserialize, Serialize};

/// Read-only view of a search path, handed to the stop predicates. The
/// engine consults strategies; strategies never mutate search state.
#[derive(Debug, Clone, Copy)]
pub struct PathState {
    pub total_time: u32,
    pub transfers: u32,
    pub explored_nodes: usize,
}

/// The four fixed search objectives. The set is closed, so each strategy is
/// a variant rather than a trait object; dispatch is a `match`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// Never transfers; walking is strongly discouraged.
    NoTransfer,
    /// Never transfers; walking is discouraged even harder.
    Direct,
    /// Balanced: tolerates up to two transfers, charges for walking.
    Simple,
    /// Pure travel time, up to three transfers.
    Fast,
}

impl Strategy {
    pub const ALL: [Strategy; 4] = [
        Strategy::NoTransfer,
        Strategy::Direct,
        Strategy::Simple,
        Strategy::Fast,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::NoTransfer => "no_transfer",
            Self::Direct => "direct",
            Self::Simple => "simple",
            Self::Fast => "fast",
        }
    }

    /// Cost charged for traversing an edge. Never below the edge's scheduled
    /// time, which keeps the walking-speed heuristic admissible.
    pub fn edge_cost(&self, edge: &Edge) -> u64 {
        let time = u64::from(edge.cost_time);
        match (self, edge.kind) {
            (_, EdgeKind::Ride) => time,

            (Self::NoTransfer, EdgeKind::Walk) => time * 5,
            (Self::Direct, EdgeKind::Walk) => time * 10,
            (Self::Simple, EdgeKind::Walk) => time + u64::from(edge.cost_walk) * 2,
            (Self::Fast, EdgeKind::Walk) => time,

            (Self::NoTransfer, EdgeKind::Transfer) => 1_000_000_000,
            (Self::Direct, EdgeKind::Transfer) => 1_000_000,
            (Self::Simple, EdgeKind::Transfer) => {
                time + 180 * u64::from(edge.cost_transfer)
            }
            (Self::Fast, EdgeKind::Transfer) => time,
        }
    }

    /// Whether the engine should abandon the popped path. The transfer
    /// limits bound journey shape; the exploration limits bound work.
    pub fn should_stop(&self, state: &PathState) -> bool {
        match self {
            Self::NoTransfer => state.transfers > 0 || state.explored_nodes > 3000,
            Self::Direct => state.transfers > 0 || state.explored_nodes > 5000,
            Self::Simple => state.transfers > 2 || state.explored_nodes > 10_000,
            Self::Fast => state.transfers > 3 || state.explored_nodes > 10_000,
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Strategy {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "no_transfer" => Ok(Self::NoTransfer),
            "direct" => Ok(Self::Direct),
            "simple" => Ok(Self::Simple),
            "fast" => Ok(Self::Fast),
            other => Err(format!("unknown strategy '{other}'")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn edge(kind: EdgeKind, time: u32, walk: u32, transfer: u32) -> Edge {
        Edge {
            id: 1,
            from_node_id: 1,
            to_node_id: 2,
            kind,
            cost_time: time,
            cost_walk: walk,
            cost_transfer: transfer,
            trip_id: None,
            sequence: None,
        }
    }

    #[test]
    fn ride_costs_scheduled_time_everywhere() {
        let ride = edge(EdgeKind::Ride, 240, 0, 0);
        for strategy in Strategy::ALL {
            assert_eq!(strategy.edge_cost(&ride), 240);
        }
    }

    #[test]
    fn walk_multipliers() {
        let walk = edge(EdgeKind::Walk, 100, 140, 0);
        assert_eq!(Strategy::NoTransfer.edge_cost(&walk), 500);
        assert_eq!(Strategy::Direct.edge_cost(&walk), 1000);
        assert_eq!(Strategy::Simple.edge_cost(&walk), 100 + 280);
        assert_eq!(Strategy::Fast.edge_cost(&walk), 100);
    }

    #[test]
    fn transfer_penalties() {
        let transfer = edge(EdgeKind::Transfer, 180, 0, 1);
        assert_eq!(Strategy::NoTransfer.edge_cost(&transfer), 1_000_000_000);
        assert_eq!(Strategy::Direct.edge_cost(&transfer), 1_000_000);
        assert_eq!(Strategy::Simple.edge_cost(&transfer), 360);
        assert_eq!(Strategy::Fast.edge_cost(&transfer), 180);
    }

    #[test]
    fn costs_are_monotone_across_strategies() {
        let ride = edge(EdgeKind::Ride, 60, 0, 0);
        let walk = edge(EdgeKind::Walk, 143, 200, 0);
        let transfer = edge(EdgeKind::Transfer, 180, 0, 1);

        for e in [&ride, &walk, &transfer] {
            assert!(Strategy::Fast.edge_cost(e) <= Strategy::Simple.edge_cost(e));
            assert!(Strategy::Simple.edge_cost(e) <= Strategy::Direct.edge_cost(e));
        }
        // direct charges x10 on walks where no_transfer charges x5, so the
        // direct <= no_transfer link only holds off walk edges
        for e in [&ride, &transfer] {
            assert!(Strategy::Direct.edge_cost(e) <= Strategy::NoTransfer.edge_cost(e));
        }
    }

    #[test]
    fn cost_never_below_scheduled_time() {
        let edges = [
            edge(EdgeKind::Ride, 60, 0, 0),
            edge(EdgeKind::Walk, 143, 200, 0),
            edge(EdgeKind::Transfer, 180, 0, 1),
        ];
        for e in &edges {
            for strategy in Strategy::ALL {
                assert!(strategy.edge_cost(e) >= u64::from(e.cost_time));
            }
        }
    }

    #[test]
    fn stop_predicates() {
        let state = |transfers, explored_nodes| PathState {
            total_time: 0,
            transfers,
            explored_nodes,
        };

        assert!(Strategy::NoTransfer.should_stop(&state(1, 0)));
        assert!(Strategy::NoTransfer.should_stop(&state(0, 3001)));
        assert!(!Strategy::NoTransfer.should_stop(&state(0, 3000)));

        assert!(Strategy::Direct.should_stop(&state(1, 0)));
        assert!(!Strategy::Direct.should_stop(&state(0, 5000)));

        assert!(!Strategy::Simple.should_stop(&state(2, 0)));
        assert!(Strategy::Simple.should_stop(&state(3, 0)));
        assert!(Strategy::Simple.should_stop(&state(0, 10_001)));

        assert!(!Strategy::Fast.should_stop(&state(3, 0)));
        assert!(Strategy::Fast.should_stop(&state(4, 0)));
    }

    #[test]
    fn names_round_trip() {
        for strategy in Strategy::ALL {
            assert_eq!(strategy.name().parse::<Strategy>(), Ok(strategy));
        }
        assert!("fastest".parse::<Strategy>().is_err());
    }
}
