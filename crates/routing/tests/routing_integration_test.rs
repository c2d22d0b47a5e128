//! End-to-end scenarios against the in-memory store and cache: graphs are
//! built from synthetic feed snapshots through the real builder, then routed
//! through the real dispatcher.

use std::sync::Arc;

use model::graph::EdgeKind;
use model::route::{Route, TransitMode};
use model::stop::Stop;
use model::trip::{StopTime, Trip};
use model::Coordinates;
use routing::builder::build_graph;
use routing::{
    MemoryCache, MemoryGraphStore, RouteError, Router, RoutingConfig, Strategy,
};

fn stop(id: &str, latitude: f64, longitude: f64) -> Stop {
    Stop {
        id: id.to_owned(),
        name: id.to_owned(),
        latitude,
        longitude,
    }
}

fn route(id: &str) -> Route {
    Route {
        id: id.to_owned(),
        agency_id: "AG".to_owned(),
        short_name: Some(id.to_owned()),
        long_name: None,
        mode: TransitMode::Bus,
    }
}

fn trip(id: &str, route_id: &str) -> Trip {
    Trip {
        id: id.to_owned(),
        route_id: route_id.to_owned(),
        service_id: "S".to_owned(),
    }
}

fn stop_time(trip_id: &str, stop_id: &str, sequence: u32, seconds: u32) -> StopTime {
    StopTime {
        trip_id: trip_id.to_owned(),
        stop_id: stop_id.to_owned(),
        stop_sequence: sequence,
        arrival_time: utility::time::format_schedule_time(seconds),
        departure_time: utility::time::format_schedule_time(seconds),
        arrival_seconds: Some(seconds),
        departure_seconds: Some(seconds),
    }
}

/// One nearest node per endpoint keeps the start and goal sets disjoint on
/// these miniature graphs.
fn test_config() -> RoutingConfig {
    RoutingConfig {
        nearest_node_count: 1,
        ..RoutingConfig::default()
    }
}

fn router(
    stops: Vec<Stop>,
    routes: Vec<Route>,
    trips: Vec<Trip>,
    stop_times: Vec<StopTime>,
    config: RoutingConfig,
) -> Router<MemoryGraphStore, MemoryCache> {
    let graph = build_graph(&stops, &routes, &trips, &stop_times, &config);
    Router::new(
        Arc::new(MemoryGraphStore::new(graph.nodes, graph.edges)),
        Arc::new(MemoryCache::new()),
        config,
    )
}

/// Stops ~1.1 km apart so no WALK edge shadows the scheduled ride.
fn direct_ride_router() -> Router<MemoryGraphStore, MemoryCache> {
    router(
        vec![stop("A", 0.0, 0.0), stop("B", 0.0, 0.01)],
        vec![route("R1")],
        vec![trip("T1", "R1")],
        vec![
            stop_time("T1", "A", 1, 28_800),
            stop_time("T1", "B", 2, 29_040),
        ],
        test_config(),
    )
}

#[tokio::test]
async fn trivial_direct_ride_under_every_strategy() {
    let router = direct_ride_router();
    let journeys = router
        .search(
            Coordinates::new(0.0, 0.0),
            Coordinates::new(0.0, 0.01),
            None,
        )
        .await
        .unwrap();

    assert_eq!(journeys.len(), 4);
    for strategy in Strategy::ALL {
        let journey = &journeys[&strategy];
        assert_eq!(journey.steps.len(), 1, "strategy {strategy}");
        assert_eq!(journey.steps[0].kind, EdgeKind::Ride);
        assert_eq!(journey.steps[0].from_stop_id, "A");
        assert_eq!(journey.steps[0].to_stop_id, "B");
        assert_eq!(journey.total_time_seconds, 240);
        assert_eq!(journey.transfers, 0);
        assert_eq!(journey.walk_distance_meters, 0);
    }
}

#[tokio::test]
async fn one_transfer_journey_is_found_by_the_tolerant_strategies_only() {
    let router = router(
        vec![
            stop("A", 0.0, 0.0),
            stop("B", 0.0, 0.01),
            stop("C", 0.0, 0.02),
        ],
        vec![route("R1"), route("R2")],
        vec![trip("T1", "R1"), trip("T2", "R2")],
        vec![
            stop_time("T1", "A", 1, 28_800),
            stop_time("T1", "B", 2, 29_040),
            stop_time("T2", "B", 1, 29_400),
            stop_time("T2", "C", 2, 29_640),
        ],
        test_config(),
    );

    let journeys = router
        .search(
            Coordinates::new(0.0, 0.0),
            Coordinates::new(0.0, 0.02),
            None,
        )
        .await
        .unwrap();

    assert!(journeys.contains_key(&Strategy::Simple));
    assert!(journeys.contains_key(&Strategy::Fast));
    assert!(!journeys.contains_key(&Strategy::NoTransfer));
    assert!(!journeys.contains_key(&Strategy::Direct));

    for strategy in [Strategy::Simple, Strategy::Fast] {
        let journey = &journeys[&strategy];
        let kinds: Vec<EdgeKind> = journey.steps.iter().map(|s| s.kind).collect();
        assert_eq!(
            kinds,
            vec![EdgeKind::Ride, EdgeKind::Transfer, EdgeKind::Ride]
        );
        assert_eq!(journey.transfers, 1);
        assert_eq!(journey.steps[0].route_id.as_deref(), Some("R1"));
        assert_eq!(journey.steps[2].route_id.as_deref(), Some("R2"));
        assert_eq!(journey.steps[1].from_stop_id, "B");
        assert_eq!(journey.steps[1].to_stop_id, "B");
    }
}

#[tokio::test]
async fn walk_to_the_first_stop_then_ride() {
    // origin sits on stop X (route R9 heading away); stop A is ~200 m from
    // X and carries the useful line
    let router = router(
        vec![
            stop("X", 0.0, 0.0),
            stop("F", -0.02, 0.0),
            stop("A", 0.0018, 0.0),
            stop("B", 0.0118, 0.0),
        ],
        vec![route("R9"), route("R1")],
        vec![trip("T9", "R9"), trip("T1", "R1")],
        vec![
            stop_time("T9", "X", 1, 28_800),
            stop_time("T9", "F", 2, 30_000),
            stop_time("T1", "A", 1, 28_800),
            stop_time("T1", "B", 2, 29_040),
        ],
        test_config(),
    );

    let journeys = router
        .search(
            Coordinates::new(0.0, 0.0),
            Coordinates::new(0.0118, 0.0),
            Some(&[Strategy::Simple]),
        )
        .await
        .unwrap();

    let journey = &journeys[&Strategy::Simple];
    assert_eq!(journey.steps[0].kind, EdgeKind::Walk);
    // ~200 m at 1.4 m/s
    assert_eq!(journey.steps[0].distance_meters, 201);
    assert_eq!(journey.steps[0].duration_seconds, 143);
    assert_eq!(journey.steps[1].kind, EdgeKind::Ride);
    assert_eq!(journey.transfers, 0);
}

#[tokio::test]
async fn five_rides_on_one_route_consolidate_into_one_step() {
    let stops: Vec<Stop> = (0..6)
        .map(|i| stop(&format!("S{i}"), 0.0, 0.01 * f64::from(i)))
        .collect();
    let stop_times: Vec<StopTime> = (0..6)
        .map(|i| stop_time("T1", &format!("S{i}"), i + 1, 28_800 + i * 120))
        .collect();
    let router = router(
        stops,
        vec![route("R1")],
        vec![trip("T1", "R1")],
        stop_times,
        test_config(),
    );

    let journeys = router
        .search(
            Coordinates::new(0.0, 0.0),
            Coordinates::new(0.0, 0.05),
            None,
        )
        .await
        .unwrap();

    for (_, journey) in &journeys {
        assert_eq!(journey.steps.len(), 1);
        assert_eq!(journey.steps[0].kind, EdgeKind::Ride);
        assert_eq!(journey.steps[0].num_stops, 5);
        assert_eq!(journey.steps[0].duration_seconds, 600);
        assert_eq!(journey.steps[0].from_stop_id, "S0");
        assert_eq!(journey.steps[0].to_stop_id, "S5");
    }
}

#[tokio::test]
async fn disconnected_subgraphs_yield_no_routes_found() {
    let router = router(
        vec![
            stop("A", 0.0, 0.0),
            stop("B", 0.0, 0.01),
            stop("C", 1.0, 1.0),
            stop("D", 1.0, 1.01),
        ],
        vec![route("R1"), route("R2")],
        vec![trip("T1", "R1"), trip("T2", "R2")],
        vec![
            stop_time("T1", "A", 1, 28_800),
            stop_time("T1", "B", 2, 29_040),
            stop_time("T2", "C", 1, 28_800),
            stop_time("T2", "D", 2, 29_040),
        ],
        test_config(),
    );

    let result = router
        .search(Coordinates::new(0.0, 0.0), Coordinates::new(1.0, 1.0), None)
        .await;
    assert!(matches!(result, Err(RouteError::NoRoutesFound)));
}

#[tokio::test]
async fn exploration_cap_silences_a_strategy_without_hurting_the_others() {
    // the only transfer-free corridor is a 20-stop chain heading away from
    // the goal, so the transfer-averse strategies burn through the cap while
    // fast takes the R2 shortcut within a couple of pops
    let mut stops = vec![stop("O", 0.0, 0.0), stop("G", 0.01, 0.0)];
    let mut stop_times = vec![stop_time("T1", "O", 1, 28_800)];
    for i in 1..=20 {
        let id = format!("D{i}");
        stops.push(stop(&id, -0.01 * f64::from(i), 0.0));
        stop_times.push(stop_time("T1", &id, i + 1, 28_800 + i * 60));
    }
    stop_times.push(stop_time("T2", "O", 1, 28_800));
    stop_times.push(stop_time("T2", "G", 2, 29_040));

    let config = RoutingConfig {
        nearest_node_count: 1,
        max_walk_distance: 10.0,
        max_explored_nodes: 10,
        ..RoutingConfig::default()
    };
    let router = router(
        stops,
        vec![route("R1"), route("R2")],
        vec![trip("T1", "R1"), trip("T2", "R2")],
        stop_times,
        config,
    );

    let journeys = router
        .search(Coordinates::new(0.0, 0.0), Coordinates::new(0.01, 0.0), None)
        .await
        .unwrap();

    assert!(!journeys.contains_key(&Strategy::NoTransfer));
    assert!(journeys.contains_key(&Strategy::Fast));
    let fast = &journeys[&Strategy::Fast];
    assert_eq!(fast.transfers, 1);
    assert_eq!(fast.steps.last().unwrap().kind, EdgeKind::Ride);
}

#[tokio::test]
async fn repeated_requests_hit_the_cache_byte_for_byte() {
    let router = direct_ride_router();
    let from = Coordinates::new(0.0, 0.0);
    let to = Coordinates::new(0.0, 0.01);

    let first = router.search(from, to, Some(&[Strategy::Fast])).await.unwrap();
    let second = router.search(from, to, Some(&[Strategy::Fast])).await.unwrap();

    assert_eq!(first[&Strategy::Fast], second[&Strategy::Fast]);
    // byte-identical at the serialization layer as well
    assert_eq!(
        serde_json::to_string(&first[&Strategy::Fast]).unwrap(),
        serde_json::to_string(&second[&Strategy::Fast]).unwrap()
    );
}

#[tokio::test]
async fn quantized_coordinates_share_a_cache_entry() {
    let router = direct_ride_router();
    let first = router
        .search(
            Coordinates::new(0.0000001, 0.0),
            Coordinates::new(0.0, 0.01),
            Some(&[Strategy::Fast]),
        )
        .await
        .unwrap();
    let second = router
        .search(
            Coordinates::new(0.0000004, 0.0),
            Coordinates::new(0.0, 0.01),
            Some(&[Strategy::Fast]),
        )
        .await
        .unwrap();
    assert_eq!(first[&Strategy::Fast], second[&Strategy::Fast]);
}

#[tokio::test]
async fn out_of_range_coordinates_are_rejected() {
    let router = direct_ride_router();
    let result = router
        .search(Coordinates::new(91.0, 0.0), Coordinates::new(0.0, 0.01), None)
        .await;
    assert!(matches!(result, Err(RouteError::InvalidCoords)));
}
