//! Heap-based A* over the persistent multigraph. Neighbor lists are fetched
//! from the store only when a node is popped, so the graph never has to fit
//! in memory. The heuristic is straight-line distance at walking speed.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap, HashSet};
use std::time::Instant;

use log::{debug, warn};
use model::graph::{Edge, EdgeKind, Node};
use model::journey::Journey;
use model::Coordinates;
use utility::geo::haversine_distance;

use crate::config::RoutingConfig;
use crate::error::SearchError;
use crate::steps::build_steps;
use crate::store::{GraphStore, StoreError};
use crate::strategy::{PathState, Strategy};

/// `MinScored` holds an f-score and a scored value for use with a
/// `BinaryHeap`. It compares in reverse order by the score so the heap pops
/// the least score first, and breaks equal scores by insertion sequence so
/// they pop FIFO. Based on the petgraph implementation.
struct MinScored<T>(f64, u64, T);

impl<T> PartialEq for MinScored<T> {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0 && self.1 == other.1
    }
}

impl<T> Eq for MinScored<T> {}

impl<T> PartialOrd for MinScored<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for MinScored<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .0
            .partial_cmp(&self.0)
            .unwrap()
            .then_with(|| other.1.cmp(&self.1))
    }
}

/// A partial path in the open set. Paths copy their prefix on expansion;
/// prefix sharing via parent links would be equivalent.
#[derive(Clone)]
struct SearchPath {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
    g: u64,
    total_time: u32,
    transfers: u32,
}

impl SearchPath {
    fn terminal(&self) -> &Node {
        // a path always holds at least its seed node
        self.nodes.last().expect("search path without nodes")
    }
}

/// Runs one strategy search between two coordinates and returns the best
/// journey, or the reason there is none.
pub async fn find_route<S>(
    store: &S,
    config: &RoutingConfig,
    strategy: Strategy,
    from: Coordinates,
    to: Coordinates,
) -> Result<Journey, SearchError>
where
    S: GraphStore + ?Sized,
{
    let deadline = Instant::now() + config.route_timeout;
    let heuristic = |node: &Node| {
        haversine_distance(node.latitude, node.longitude, to.latitude, to.longitude)
            / config.walking_speed
    };

    let start_nodes = store
        .nearest_nodes(from.latitude, from.longitude, config.nearest_node_count)
        .await?;
    let goal_nodes = store
        .nearest_nodes(to.latitude, to.longitude, config.nearest_node_count)
        .await?;
    let goal_ids: HashSet<i64> = goal_nodes.iter().map(|node| node.id).collect();

    if start_nodes.is_empty() || goal_ids.is_empty() {
        return Err(SearchError::NoPath);
    }

    let mut open_set = BinaryHeap::new();
    let mut best_g: HashMap<i64, u64> = HashMap::new();
    let mut sequence: u64 = 0;
    let mut explored: usize = 0;

    // the start set competes on equal footing; whichever entry reaches a
    // goal node first wins
    for node in start_nodes {
        let f = heuristic(&node);
        best_g.insert(node.id, 0);
        open_set.push(MinScored(
            f,
            sequence,
            SearchPath {
                nodes: vec![node],
                edges: Vec::new(),
                g: 0,
                total_time: 0,
                transfers: 0,
            },
        ));
        sequence += 1;
    }

    while let Some(MinScored(_, _, path)) = open_set.pop() {
        if Instant::now() >= deadline {
            return Err(SearchError::Timeout);
        }

        if goal_ids.contains(&path.terminal().id) {
            return Ok(finish(path));
        }

        explored += 1;
        if explored > config.max_explored_nodes {
            return Err(SearchError::ExplorationCapReached);
        }

        let state = PathState {
            total_time: path.total_time,
            transfers: path.transfers,
            explored_nodes: explored,
        };
        if strategy.should_stop(&state) {
            continue;
        }

        // lazy expansion: the fan-out is loaded only when the node is popped
        let edges = store.outgoing_edges(path.terminal().id).await?;
        for edge in edges {
            let tentative_g = path.g + strategy.edge_cost(&edge);
            let known = best_g.get(&edge.to_node_id).copied().unwrap_or(u64::MAX);
            if tentative_g >= known {
                continue;
            }

            let to_node = match store.get_node(edge.to_node_id).await {
                Ok(node) => node,
                Err(StoreError::NotFound) => {
                    warn!("edge {} points at missing node {}", edge.id, edge.to_node_id);
                    continue;
                }
                Err(why) => return Err(why.into()),
            };

            best_g.insert(edge.to_node_id, tentative_g);

            let f = tentative_g as f64 + heuristic(&to_node);
            let mut successor = path.clone();
            successor.total_time = successor.total_time.saturating_add(edge.cost_time);
            if edge.kind == EdgeKind::Transfer {
                successor.transfers += 1;
            }
            successor.g = tentative_g;
            successor.nodes.push(to_node);
            successor.edges.push(edge);
            open_set.push(MinScored(f, sequence, successor));
            sequence += 1;
        }
    }

    debug!(
        "strategy {} exhausted the open set after {} pops",
        strategy, explored
    );
    Err(SearchError::NoPath)
}

fn finish(path: SearchPath) -> Journey {
    let (total_time, walk, transfers) = Journey::totals_from_edges(&path.edges);
    let steps = build_steps(&path.nodes, &path.edges);
    Journey {
        nodes: path.nodes,
        edges: path.edges,
        total_time_seconds: total_time,
        walk_distance_meters: walk,
        transfers,
        steps,
    }
}
