use std::collections::HashMap;
use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use database::{import, DatabaseConnectionInfo, PgDatabase};
use gtfs::feed::TransitFeed;
use log::error;
use model::journey::Journey;
use model::Coordinates;
use routing::{MemoryCache, Router, RoutingConfig, Strategy};

#[derive(Parser)]
#[command(name = "transit-router", version, about = "Transit graph import and routing")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Import a GTFS feed (directory, ZIP archive, or http(s) URL), then
    /// rebuild the routing graph from it.
    Import { source: String },

    /// Re-derive the routing graph from the persisted transit tables,
    /// across all imported agencies.
    RebuildGraph,

    /// Run one routing request against the live store.
    Route {
        #[arg(long)]
        from_lat: f64,
        #[arg(long)]
        from_lon: f64,
        #[arg(long)]
        to_lat: f64,
        #[arg(long)]
        to_lon: f64,
        /// Comma-separated subset of: no_transfer, direct, simple, fast.
        #[arg(long)]
        strategies: Option<String>,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    // database
    let connection_info = DatabaseConnectionInfo::from_env()
        .expect("expected database connection info in env.");
    let db = PgDatabase::connect(connection_info)
        .await
        .expect("could not connect to database.");

    let config = RoutingConfig::from_env();

    let result = match cli.command {
        Command::Import { source } => import_command(&db, &config, &source).await,
        Command::RebuildGraph => rebuild_command(&db, &config).await,
        Command::Route {
            from_lat,
            from_lon,
            to_lat,
            to_lon,
            strategies,
        } => {
            route_command(
                db.clone(),
                config,
                Coordinates::new(from_lat, from_lon),
                Coordinates::new(to_lat, to_lon),
                strategies.as_deref(),
            )
            .await
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(why) => {
            error!("{why}");
            ExitCode::FAILURE
        }
    }
}

async fn import_command(
    db: &PgDatabase,
    config: &RoutingConfig,
    source: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let feed = load_feed(source).await?;
    let summary = import::import_feed(db, feed, config).await?;
    println!(
        "imported {} stops ({} merged), {} routes, {} trips; graph has {} nodes and {} edges",
        summary.stops,
        summary.merged_stops,
        summary.routes,
        summary.trips,
        summary.nodes,
        summary.edges
    );
    Ok(())
}

async fn load_feed(source: &str) -> Result<TransitFeed, gtfs::FeedError> {
    if source.starts_with("http://") || source.starts_with("https://") {
        let archive = "latest.zip";
        gtfs::download_feed(source, archive).await?;
        return gtfs::read_feed_zip(Path::new(archive));
    }
    let path = Path::new(source);
    if path.is_dir() {
        gtfs::read_feed_dir(path)
    } else {
        gtfs::read_feed_zip(path)
    }
}

async fn rebuild_command(
    db: &PgDatabase,
    config: &RoutingConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let (nodes, edges) = import::rebuild_graph(db, config).await?;
    println!("rebuilt graph: {nodes} nodes, {edges} edges");
    Ok(())
}

async fn route_command(
    db: PgDatabase,
    config: RoutingConfig,
    from: Coordinates,
    to: Coordinates,
    strategies: Option<&str>,
) -> Result<(), Box<dyn std::error::Error>> {
    let strategies = match strategies {
        Some(names) => Some(
            names
                .split(',')
                .map(|name| name.trim().parse::<Strategy>())
                .collect::<Result<Vec<_>, _>>()?,
        ),
        None => None,
    };

    let router = Router::new(Arc::new(db), Arc::new(MemoryCache::new()), config);
    let journeys = router.search(from, to, strategies.as_deref()).await?;

    let by_name: HashMap<&str, &Journey> = journeys
        .iter()
        .map(|(strategy, journey)| (strategy.name(), journey))
        .collect();
    println!("{}", serde_json::to_string_pretty(&by_name)?);
    Ok(())
}
