//! Turns the node/edge chain of a returned path into user-visible steps,
//! collapsing consecutive same-route rides. Pure functions: identical paths
//! produce identical step lists.

use model::graph::{Edge, EdgeKind, Node};
use model::journey::Step;

/// One step per edge, then same-route RIDE runs merged. `nodes` must be the
/// edge chain's node sequence, one longer than `edges`.
pub fn build_steps(nodes: &[Node], edges: &[Edge]) -> Vec<Step> {
    let raw = edges
        .iter()
        .enumerate()
        .map(|(i, edge)| step_for_edge(&nodes[i], &nodes[i + 1], edge))
        .collect();
    consolidate(raw)
}

fn step_for_edge(from: &Node, to: &Node, edge: &Edge) -> Step {
    let (route_id, mode) = match edge.kind {
        EdgeKind::Ride => (Some(from.route_id.clone()), Some(from.mode)),
        // a transfer is labeled with the line being boarded
        EdgeKind::Transfer => (Some(to.route_id.clone()), Some(to.mode)),
        EdgeKind::Walk => (None, None),
    };
    Step {
        kind: edge.kind,
        from_stop_id: from.stop_id.clone(),
        to_stop_id: to.stop_id.clone(),
        route_id,
        mode,
        duration_seconds: edge.cost_time,
        distance_meters: edge.cost_walk,
        num_stops: 1,
    }
}

/// Merges any run of consecutive RIDE steps with equal route and mode.
/// Idempotent: consolidating an already consolidated list is a no-op.
pub fn consolidate(steps: Vec<Step>) -> Vec<Step> {
    let mut merged: Vec<Step> = Vec::with_capacity(steps.len());
    for step in steps {
        match merged.last_mut() {
            Some(previous)
                if previous.kind == EdgeKind::Ride
                    && step.kind == EdgeKind::Ride
                    && previous.route_id == step.route_id
                    && previous.mode == step.mode =>
            {
                previous.to_stop_id = step.to_stop_id;
                previous.duration_seconds += step.duration_seconds;
                previous.distance_meters += step.distance_meters;
                previous.num_stops += step.num_stops;
            }
            _ => merged.push(step),
        }
    }
    merged
}
