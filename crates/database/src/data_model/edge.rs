use model::graph::Edge;
use routing::StoreError;
use sqlx::FromRow;

use super::corrupt_row;

#[derive(Debug, Clone, FromRow)]
pub struct EdgeRow {
    pub id: i64,
    pub from_node_id: i64,
    pub to_node_id: i64,
    #[sqlx(rename = "type")]
    pub kind: String,
    pub cost_time: i32,
    pub cost_walk: i32,
    pub cost_transfer: i32,
    pub trip_id: Option<String>,
    pub sequence: Option<i32>,
}

impl EdgeRow {
    pub fn into_model(self) -> Result<Edge, StoreError> {
        let kind = self
            .kind
            .parse()
            .map_err(|why: String| corrupt_row(format!("edge {}: {why}", self.id)))?;
        Ok(Edge {
            id: self.id,
            from_node_id: self.from_node_id,
            to_node_id: self.to_node_id,
            kind,
            cost_time: self.cost_time as u32,
            cost_walk: self.cost_walk as u32,
            cost_transfer: self.cost_transfer as u32,
            trip_id: self.trip_id,
            sequence: self.sequence.map(|sequence| sequence as u32),
        })
    }
}
