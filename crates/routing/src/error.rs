use thiserror::Error;

use crate::store::StoreError;

/// User-visible failures of a routing request. Everything else stays inside
/// the strategy task that produced it.
#[derive(Debug, Error)]
pub enum RouteError {
    #[error("latitude or longitude out of range")]
    InvalidCoords,
    #[error("no routes found between the requested coordinates")]
    NoRoutesFound,
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Per-strategy search outcomes that are not paths. All of these are
/// reported to the caller as an omission from the response map; the variant
/// only matters for logging.
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("no path between the start and goal sets")]
    NoPath,
    #[error("search deadline exceeded")]
    Timeout,
    #[error("exploration cap reached")]
    ExplorationCapReached,
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// A cache transport failure. Never surfaced to callers; the request
/// downgrades to a direct compute.
#[derive(Debug, Error)]
#[error("cache i/o failed: {0}")]
pub struct CacheError(#[from] pub Box<dyn std::error::Error + Send + Sync>);
