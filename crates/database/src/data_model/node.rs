use model::graph::Node;
use routing::StoreError;
use sqlx::FromRow;

use super::corrupt_row;

#[derive(Debug, Clone, FromRow)]
pub struct NodeRow {
    pub id: i64,
    pub stop_id: String,
    pub route_id: String,
    pub mode: String,
    pub lat: f64,
    pub lon: f64,
}

impl NodeRow {
    pub fn into_model(self) -> Result<Node, StoreError> {
        let mode = self
            .mode
            .parse()
            .map_err(|why: String| corrupt_row(format!("node {}: {why}", self.id)))?;
        Ok(Node {
            id: self.id,
            stop_id: self.stop_id,
            route_id: self.route_id,
            mode,
            latitude: self.lat,
            longitude: self.lon,
        })
    }
}
