use model::graph::Edge;
use routing::StoreError;
use sqlx::{Executor, Postgres, Transaction};

use crate::data_model::edge::EdgeRow;

use super::convert_error;

pub async fn outgoing<'c, E>(executor: E, node_id: i64) -> Result<Vec<Edge>, StoreError>
where
    E: Executor<'c, Database = Postgres>,
{
    let rows: Vec<EdgeRow> = sqlx::query_as(
        "
        SELECT id, from_node_id, to_node_id, type, cost_time, cost_walk,
               cost_transfer, trip_id, sequence
        FROM edge
        WHERE from_node_id = $1;
        ",
    )
    .bind(node_id)
    .fetch_all(executor)
    .await
    .map_err(convert_error)?;
    rows.into_iter().map(EdgeRow::into_model).collect()
}

pub async fn insert_all(
    tx: &mut Transaction<'_, Postgres>,
    edges: &[Edge],
) -> Result<u64, StoreError> {
    super::insert_all(
        tx,
        "edge",
        &[
            "id",
            "from_node_id",
            "to_node_id",
            "type",
            "cost_time",
            "cost_walk",
            "cost_transfer",
            "trip_id",
            "sequence",
        ],
        edges,
        |query, edge| {
            query
                .bind(edge.id)
                .bind(edge.from_node_id)
                .bind(edge.to_node_id)
                .bind(edge.kind.as_str())
                .bind(edge.cost_time as i32)
                .bind(edge.cost_walk as i32)
                .bind(edge.cost_transfer as i32)
                .bind(edge.trip_id.clone())
                .bind(edge.sequence.map(|sequence| sequence as i32))
        },
        "",
    )
    .await
    .map_err(convert_error)
}
