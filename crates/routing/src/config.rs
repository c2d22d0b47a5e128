use std::env;
use std::str::FromStr;
use std::time::Duration;

/// Routing parameters, read once at process start and immutable thereafter.
/// Every field has an environment override named after it.
#[derive(Debug, Clone)]
pub struct RoutingConfig {
    /// Maximum distance covered by a WALK edge, in meters.
    pub max_walk_distance: f64,
    /// Walking speed in meters per second.
    pub walking_speed: f64,
    /// Fixed TRANSFER edge duration, in seconds.
    pub transfer_time: u32,
    /// Hard cap on settled search paths before a strategy gives up.
    pub max_explored_nodes: usize,
    /// Wall-clock budget of a single strategy search.
    pub route_timeout: Duration,
    /// Lifetime of a cached journey.
    pub cache_ttl: Duration,
    /// Lifetime of the single-flight lock key.
    pub cache_mutex_ttl: Duration,
    /// Stops closer than this are merged at import, in meters.
    pub dedupe_threshold: f64,
    /// Build-time cap on the total WALK edge count.
    pub max_walk_edges: usize,
    /// Size of the start and goal node sets.
    pub nearest_node_count: usize,
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            max_walk_distance: 500.0,
            walking_speed: 1.4,
            transfer_time: 180,
            max_explored_nodes: 50_000,
            route_timeout: Duration::from_secs(10),
            cache_ttl: Duration::from_secs(600),
            cache_mutex_ttl: Duration::from_secs(5),
            dedupe_threshold: 30.0,
            max_walk_edges: 100_000,
            nearest_node_count: 5,
        }
    }
}

impl RoutingConfig {
    /// Defaults overridden by whatever is set in the environment. Unparseable
    /// values fall back to the default rather than failing startup.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            max_walk_distance: env_or("MAX_WALK_DISTANCE", defaults.max_walk_distance),
            walking_speed: env_or("WALKING_SPEED", defaults.walking_speed),
            transfer_time: env_or("TRANSFER_TIME", defaults.transfer_time),
            max_explored_nodes: env_or(
                "MAX_EXPLORED_NODES",
                defaults.max_explored_nodes,
            ),
            route_timeout: env_or_secs("ROUTE_TIMEOUT", defaults.route_timeout),
            cache_ttl: env_or_secs("CACHE_TTL", defaults.cache_ttl),
            cache_mutex_ttl: env_or_secs("CACHE_MUTEX_TTL", defaults.cache_mutex_ttl),
            dedupe_threshold: env_or("DEDUPE_THRESHOLD", defaults.dedupe_threshold),
            max_walk_edges: env_or("MAX_WALK_EDGES", defaults.max_walk_edges),
            nearest_node_count: env_or(
                "NEAREST_NODE_COUNT",
                defaults.nearest_node_count,
            ),
        }
    }
}

fn env_or<T: FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or(default)
}

fn env_or_secs(name: &str, default: Duration) -> Duration {
    env::var(name)
        .ok()
        .and_then(|value| value.parse().ok())
        .map(Duration::from_secs)
        .unwrap_or(default)
}
