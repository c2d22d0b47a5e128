//! Feed import and graph rebuild: dedup + rewrite, transactional insert of
//! the transit tables, wholesale replacement of the derived graph, and
//! statistics collection.

use gtfs::feed::TransitFeed;
use log::info;
use routing::builder::{build_graph, dedupe_stops, rewrite_stop_times};
use routing::{RoutingConfig, StoreError};

use crate::queries::{self, convert_error};
use crate::PgDatabase;

#[derive(Debug)]
pub struct ImportSummary {
    pub stops: usize,
    pub merged_stops: usize,
    pub routes: usize,
    pub trips: usize,
    pub stop_times: usize,
    pub nodes: usize,
    pub edges: usize,
}

/// Imports one GTFS snapshot: deduplicates stops, rewrites references,
/// upserts the transit tables in a single transaction, replaces the derived
/// graph, and finishes with `ANALYZE` on the routing tables.
pub async fn import_feed(
    db: &PgDatabase,
    feed: TransitFeed,
    config: &RoutingConfig,
) -> Result<ImportSummary, StoreError> {
    let TransitFeed {
        stops,
        routes,
        trips,
        mut stop_times,
        calendars,
        calendar_dates,
    } = feed;

    let (stops, replaced) = dedupe_stops(stops, config.dedupe_threshold);
    rewrite_stop_times(&mut stop_times, &replaced);

    let graph = build_graph(&stops, &routes, &trips, &stop_times, config);

    let mut tx = db.pool().begin().await.map_err(convert_error)?;
    queries::stop::insert_all(&mut tx, &stops).await?;
    queries::route::insert_all(&mut tx, &routes).await?;
    queries::trip::insert_all(&mut tx, &trips).await?;
    queries::trip::insert_all_stop_times(&mut tx, &stop_times).await?;
    queries::calendar::insert_all(&mut tx, &calendars).await?;
    queries::calendar::insert_all_dates(&mut tx, &calendar_dates).await?;
    queries::node::truncate_with_edges(&mut tx).await?;
    queries::node::insert_all(&mut tx, &graph.nodes).await?;
    queries::edge::insert_all(&mut tx, &graph.edges).await?;
    tx.commit().await.map_err(convert_error)?;

    analyze(db).await?;

    let summary = ImportSummary {
        stops: stops.len(),
        merged_stops: replaced.len(),
        routes: routes.len(),
        trips: trips.len(),
        stop_times: stop_times.len(),
        nodes: graph.nodes.len(),
        edges: graph.edges.len(),
    };
    info!(
        "imported feed: {} stops ({} merged), {} routes, {} trips, {} stop_times, {} nodes, {} edges",
        summary.stops,
        summary.merged_stops,
        summary.routes,
        summary.trips,
        summary.stop_times,
        summary.nodes,
        summary.edges
    );
    Ok(summary)
}

/// Re-derives node and edge from the current persistent transit tables,
/// across all imported agencies.
pub async fn rebuild_graph(
    db: &PgDatabase,
    config: &RoutingConfig,
) -> Result<(usize, usize), StoreError> {
    let stops = queries::stop::get_all(db.pool()).await?;
    let routes = queries::route::get_all(db.pool()).await?;
    let trips = queries::trip::get_all(db.pool()).await?;
    let stop_times = queries::trip::get_all_stop_times(db.pool()).await?;

    let graph = build_graph(&stops, &routes, &trips, &stop_times, config);

    let mut tx = db.pool().begin().await.map_err(convert_error)?;
    queries::node::truncate_with_edges(&mut tx).await?;
    queries::node::insert_all(&mut tx, &graph.nodes).await?;
    queries::edge::insert_all(&mut tx, &graph.edges).await?;
    tx.commit().await.map_err(convert_error)?;

    analyze(db).await?;

    info!(
        "rebuilt graph: {} nodes, {} edges",
        graph.nodes.len(),
        graph.edges.len()
    );
    Ok((graph.nodes.len(), graph.edges.len()))
}

async fn analyze(db: &PgDatabase) -> Result<(), StoreError> {
    for table in ["stop", "route", "node", "edge"] {
        sqlx::query(&format!("ANALYZE {table};"))
            .execute(db.pool())
            .await
            .map_err(convert_error)?;
    }
    Ok(())
}
