use std::collections::HashMap;

use async_trait::async_trait;
use model::graph::{Edge, Node};
use utility::geo::haversine_distance;

use crate::store::{GraphStore, Result, StoreError};

/// In-memory graph store. Backs the test suite and small single-process
/// deployments; the persistent backend lives in the `database` crate and
/// implements the same trait.
#[derive(Debug, Default)]
pub struct MemoryGraphStore {
    nodes: HashMap<i64, Node>,
    edges_by_node: HashMap<i64, Vec<Edge>>,
}

impl MemoryGraphStore {
    pub fn new(nodes: Vec<Node>, edges: Vec<Edge>) -> Self {
        let mut edges_by_node: HashMap<i64, Vec<Edge>> = HashMap::new();
        for edge in edges {
            edges_by_node.entry(edge.from_node_id).or_default().push(edge);
        }
        Self {
            nodes: nodes.into_iter().map(|node| (node.id, node)).collect(),
            edges_by_node,
        }
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges_by_node.values().map(Vec::len).sum()
    }
}

#[async_trait]
impl GraphStore for MemoryGraphStore {
    async fn nearest_nodes(
        &self,
        latitude: f64,
        longitude: f64,
        k: usize,
    ) -> Result<Vec<Node>> {
        let mut scored: Vec<(f64, &Node)> = self
            .nodes
            .values()
            .map(|node| {
                (
                    haversine_distance(
                        latitude,
                        longitude,
                        node.latitude,
                        node.longitude,
                    ),
                    node,
                )
            })
            .collect();
        scored.sort_by(|a, b| {
            a.0.partial_cmp(&b.0)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then(a.1.id.cmp(&b.1.id))
        });
        Ok(scored
            .into_iter()
            .take(k)
            .map(|(_, node)| node.clone())
            .collect())
    }

    async fn outgoing_edges(&self, node_id: i64) -> Result<Vec<Edge>> {
        Ok(self
            .edges_by_node
            .get(&node_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn get_node(&self, node_id: i64) -> Result<Node> {
        self.nodes
            .get(&node_id)
            .cloned()
            .ok_or(StoreError::NotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use model::route::TransitMode;

    fn node(id: i64, latitude: f64, longitude: f64) -> Node {
        Node {
            id,
            stop_id: format!("S{id}"),
            route_id: "R1".to_owned(),
            mode: TransitMode::Bus,
            latitude,
            longitude,
        }
    }

    #[tokio::test]
    async fn nearest_orders_by_distance_then_id() {
        // two nodes at the same coordinate, one further away
        let store = MemoryGraphStore::new(
            vec![node(3, 0.0, 0.0), node(1, 0.0, 0.0), node(2, 0.0, 0.01)],
            vec![],
        );
        let nearest = store.nearest_nodes(0.0, 0.0, 3).await.unwrap();
        let ids: Vec<i64> = nearest.iter().map(|n| n.id).collect();
        assert_eq!(ids, vec![1, 3, 2]);
    }

    #[tokio::test]
    async fn missing_node_is_not_found() {
        let store = MemoryGraphStore::new(vec![], vec![]);
        assert!(matches!(
            store.get_node(42).await,
            Err(StoreError::NotFound)
        ));
    }

    #[tokio::test]
    async fn unknown_node_has_no_edges() {
        let store = MemoryGraphStore::new(vec![node(1, 0.0, 0.0)], vec![]);
        assert!(store.outgoing_edges(1).await.unwrap().is_empty());
    }
}
