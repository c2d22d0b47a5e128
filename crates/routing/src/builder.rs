//! Derives the (Node, Edge) set from an imported feed snapshot: stop
//! deduplication, (stop, route) node derivation, and RIDE/WALK/TRANSFER
//! edge emission. Everything here is pure; persistence is the store's job.

use std::collections::{HashMap, HashSet};

use itertools::Itertools;
use log::{info, warn};
use model::graph::{Edge, EdgeKind, Node};
use model::route::Route;
use model::stop::Stop;
use model::trip::{StopTime, Trip};
use utility::geo::{calculate_bounding_box, haversine_distance};

use crate::config::RoutingConfig;

/// The built graph, ready for bulk insertion.
#[derive(Debug, Default)]
pub struct GraphData {
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
}

/// Drops every stop that lies within `threshold_m` of an already accepted
/// one and records `duplicate_id → kept_id`. The scan is quadratic and
/// stable with respect to input order, so a re-import reproduces the same
/// merge decisions.
pub fn dedupe_stops(
    stops: Vec<Stop>,
    threshold_m: f64,
) -> (Vec<Stop>, HashMap<String, String>) {
    let mut kept: Vec<Stop> = Vec::with_capacity(stops.len());
    let mut replaced: HashMap<String, String> = HashMap::new();

    for stop in stops {
        match kept
            .iter()
            .find(|accepted| accepted.distance_to(&stop) < threshold_m)
        {
            Some(accepted) => {
                replaced.insert(stop.id, accepted.id.clone());
            }
            None => kept.push(stop),
        }
    }

    if !replaced.is_empty() {
        info!("merged {} duplicate stops", replaced.len());
    }
    (kept, replaced)
}

/// Rewrites stop_time references through the deduplication map.
pub fn rewrite_stop_times(
    stop_times: &mut [StopTime],
    replaced: &HashMap<String, String>,
) {
    if replaced.is_empty() {
        return;
    }
    for stop_time in stop_times {
        if let Some(kept_id) = replaced.get(&stop_time.stop_id) {
            stop_time.stop_id = kept_id.clone();
        }
    }
}

/// Builds the node and edge set for the given (already deduplicated)
/// snapshot. Node ids are assigned in first-observation order of the
/// (stop, route) pairs; edge ids follow emission order.
pub fn build_graph(
    stops: &[Stop],
    routes: &[Route],
    trips: &[Trip],
    stop_times: &[StopTime],
    config: &RoutingConfig,
) -> GraphData {
    let stops_by_id: HashMap<&str, &Stop> =
        stops.iter().map(|stop| (stop.id.as_str(), stop)).collect();
    let routes_by_id: HashMap<&str, &Route> =
        routes.iter().map(|route| (route.id.as_str(), route)).collect();
    let trips_by_id: HashMap<&str, &Trip> =
        trips.iter().map(|trip| (trip.id.as_str(), trip)).collect();

    // nodes: distinct (stop, route) pairs observed across all stop_times
    let mut nodes: Vec<Node> = Vec::new();
    let mut node_ids: HashMap<(String, String), i64> = HashMap::new();
    let mut skipped = 0usize;
    for stop_time in stop_times {
        let Some(trip) = trips_by_id.get(stop_time.trip_id.as_str()) else {
            skipped += 1;
            continue;
        };
        let Some(route) = routes_by_id.get(trip.route_id.as_str()) else {
            skipped += 1;
            continue;
        };
        let Some(stop) = stops_by_id.get(stop_time.stop_id.as_str()) else {
            skipped += 1;
            continue;
        };

        let key = (stop.id.clone(), route.id.clone());
        node_ids.entry(key).or_insert_with(|| {
            let id = nodes.len() as i64 + 1;
            nodes.push(Node {
                id,
                stop_id: stop.id.clone(),
                route_id: route.id.clone(),
                mode: route.mode,
                latitude: stop.latitude,
                longitude: stop.longitude,
            });
            id
        });
    }
    if skipped > 0 {
        warn!("skipped {skipped} stop_times with dangling references");
    }

    let mut edges = ride_edges(trips, &routes_by_id, stop_times, &node_ids);
    edges.extend(walk_edges(&nodes, config));
    edges.extend(transfer_edges(&nodes, config));
    for (index, edge) in edges.iter_mut().enumerate() {
        edge.id = index as i64 + 1;
    }

    info!("built graph: {} nodes, {} edges", nodes.len(), edges.len());
    GraphData { nodes, edges }
}

/// One RIDE edge per consecutive stop_time pair of each trip, in forward
/// stop_sequence order. Re-emissions of the same (from, to) pair (further
/// trips on the line) are idempotent: the first one wins.
fn ride_edges(
    trips: &[Trip],
    routes_by_id: &HashMap<&str, &Route>,
    stop_times: &[StopTime],
    node_ids: &HashMap<(String, String), i64>,
) -> Vec<Edge> {
    let mut by_trip: HashMap<&str, Vec<&StopTime>> = HashMap::new();
    for stop_time in stop_times {
        by_trip
            .entry(stop_time.trip_id.as_str())
            .or_default()
            .push(stop_time);
    }

    let mut edges = Vec::new();
    let mut seen: HashSet<(i64, i64)> = HashSet::new();
    for trip in trips {
        if !routes_by_id.contains_key(trip.route_id.as_str()) {
            continue;
        }
        let Some(visits) = by_trip.get(trip.id.as_str()) else {
            continue;
        };
        let ordered: Vec<&StopTime> = visits
            .iter()
            .copied()
            .sorted_by_key(|visit| visit.stop_sequence)
            .collect();

        for pair in ordered.windows(2) {
            let (prev, next) = (pair[0], pair[1]);
            let from_key = (prev.stop_id.clone(), trip.route_id.clone());
            let to_key = (next.stop_id.clone(), trip.route_id.clone());
            let (Some(&from_id), Some(&to_id)) =
                (node_ids.get(&from_key), node_ids.get(&to_key))
            else {
                continue;
            };
            if from_id == to_id || !seen.insert((from_id, to_id)) {
                continue;
            }

            let time = match (prev.arrival_seconds, next.departure_seconds) {
                (Some(arrive), Some(depart)) => depart.saturating_sub(arrive).max(60),
                _ => 300,
            };
            edges.push(Edge {
                id: 0,
                from_node_id: from_id,
                to_node_id: to_id,
                kind: EdgeKind::Ride,
                cost_time: time,
                cost_walk: 0,
                cost_transfer: 0,
                trip_id: Some(trip.id.clone()),
                sequence: Some(prev.stop_sequence),
            });
        }
    }
    edges
}

/// WALK edges in both directions between distinct-stop nodes within the
/// walk threshold. A latitude-sorted sweep prunes the candidate pairs; the
/// global cap is filled in ascending per-source distance rank, so every
/// source keeps its closest neighbors before any keeps its second-closest.
fn walk_edges(nodes: &[Node], config: &RoutingConfig) -> Vec<Edge> {
    let mut by_latitude: Vec<usize> = (0..nodes.len()).collect();
    by_latitude.sort_by(|&a, &b| {
        nodes[a]
            .latitude
            .partial_cmp(&nodes[b].latitude)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    // per-source candidate lists, sorted by distance
    let mut candidates: Vec<Vec<(f64, usize)>> = vec![Vec::new(); nodes.len()];
    for (position, &source) in by_latitude.iter().enumerate() {
        let node = &nodes[source];
        let ((_, _), (max_lat, _)) = calculate_bounding_box(
            node.latitude,
            node.longitude,
            config.max_walk_distance,
        );
        for &other in by_latitude[position + 1..].iter() {
            let candidate = &nodes[other];
            if candidate.latitude > max_lat {
                break;
            }
            if candidate.stop_id == node.stop_id {
                continue;
            }
            let distance = haversine_distance(
                node.latitude,
                node.longitude,
                candidate.latitude,
                candidate.longitude,
            );
            if distance <= config.max_walk_distance {
                candidates[source].push((distance, other));
                candidates[other].push((distance, source));
            }
        }
    }
    for list in &mut candidates {
        list.sort_by(|a, b| {
            a.0.partial_cmp(&b.0)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then(nodes[a.1].id.cmp(&nodes[b.1].id))
        });
    }

    let total: usize = candidates.iter().map(Vec::len).sum();
    if total > config.max_walk_edges {
        warn!(
            "walk edge candidates ({total}) exceed the cap ({}), keeping the closest per node",
            config.max_walk_edges
        );
    }

    let mut edges = Vec::new();
    let mut rank = 0usize;
    while edges.len() < total.min(config.max_walk_edges) {
        let mut advanced = false;
        for source in 0..candidates.len() {
            if edges.len() >= config.max_walk_edges {
                break;
            }
            let Some(&(distance, target)) = candidates[source].get(rank) else {
                continue;
            };
            advanced = true;
            edges.push(Edge {
                id: 0,
                from_node_id: nodes[source].id,
                to_node_id: nodes[target].id,
                kind: EdgeKind::Walk,
                cost_time: (distance / config.walking_speed).ceil() as u32,
                cost_walk: distance.ceil() as u32,
                cost_transfer: 0,
                trip_id: None,
                sequence: None,
            });
        }
        if !advanced {
            break;
        }
        rank += 1;
    }
    edges
}

/// TRANSFER edges in both directions between every pair of same-stop nodes
/// on different routes.
fn transfer_edges(nodes: &[Node], config: &RoutingConfig) -> Vec<Edge> {
    let mut by_stop: HashMap<&str, Vec<&Node>> = HashMap::new();
    for node in nodes {
        by_stop.entry(node.stop_id.as_str()).or_default().push(node);
    }

    let mut edges = Vec::new();
    // iterate in node-id order so edge emission is deterministic
    for node in nodes {
        for other in &by_stop[node.stop_id.as_str()] {
            if other.route_id == node.route_id {
                continue;
            }
            edges.push(Edge {
                id: 0,
                from_node_id: node.id,
                to_node_id: other.id,
                kind: EdgeKind::Transfer,
                cost_time: config.transfer_time,
                cost_walk: 0,
                cost_transfer: 1,
                trip_id: None,
                sequence: None,
            });
        }
    }
    edges
}
