use async_trait::async_trait;
use model::graph::{Edge, Node};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    /// A lookup matched zero rows. A data condition, not a failure state.
    #[error("not found")]
    NotFound,
    /// The store is unreachable. Surfaces to callers as service-unavailable.
    #[error("graph store unavailable: {0}")]
    Unavailable(#[source] Box<dyn std::error::Error + Send + Sync>),
}

pub type Result<T> = std::result::Result<T, StoreError>;

/// Query surface of the persistent graph, sufficient for search. The store
/// hands out value copies; entity ownership stays with the backend.
/// Implementations must tolerate concurrent queries from many search tasks.
#[async_trait]
pub trait GraphStore: Send + Sync {
    /// The `k` nodes whose stop is geographically closest to the given
    /// coordinate, ordered by ascending great-circle distance with ties
    /// broken by ascending node id.
    async fn nearest_nodes(
        &self,
        latitude: f64,
        longitude: f64,
        k: usize,
    ) -> Result<Vec<Node>>;

    /// Every edge leaving the node, in no particular order. No filtering is
    /// applied here; strategies decide admissibility.
    async fn outgoing_edges(&self, node_id: i64) -> Result<Vec<Edge>>;

    async fn get_node(&self, node_id: i64) -> Result<Node>;
}
