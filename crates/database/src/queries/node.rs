use model::graph::Node;
use routing::StoreError;
use sqlx::{Executor, PgPool, Postgres, Transaction};
use utility::geo::{calculate_bounding_box, EARTH_RADIUS_M};

use crate::data_model::node::NodeRow;

use super::convert_error;

/// Bounding boxes tried before falling back to an unpruned ordering; a city
/// query resolves inside the first one.
const SEARCH_RADII_M: [f64; 3] = [1_000.0, 10_000.0, 100_000.0];

pub async fn nearest(
    pool: &PgPool,
    latitude: f64,
    longitude: f64,
    k: usize,
) -> Result<Vec<Node>, StoreError> {
    for radius in SEARCH_RADII_M {
        let ((min_lat, min_lon), (max_lat, max_lon)) =
            calculate_bounding_box(latitude, longitude, radius);

        let rows: Vec<NodeRow> = sqlx::query_as(
            "
            SELECT id, stop_id, route_id, mode, lat, lon
            FROM node
            WHERE
                lat BETWEEN $1 AND $2
                AND lon BETWEEN $3 AND $4
            ORDER BY
                ($5 * ACOS(LEAST(1.0,
                    COS(RADIANS($6)) * COS(RADIANS(lat)) *
                    COS(RADIANS(lon) - RADIANS($7)) +
                    SIN(RADIANS($6)) * SIN(RADIANS(lat))
                ))) ASC,
                id ASC
            LIMIT $8;
            ",
        )
        .bind(min_lat)
        .bind(max_lat)
        .bind(min_lon)
        .bind(max_lon)
        .bind(EARTH_RADIUS_M)
        .bind(latitude)
        .bind(longitude)
        .bind(k as i64)
        .fetch_all(pool)
        .await
        .map_err(convert_error)?;

        if rows.len() >= k {
            return rows.into_iter().map(NodeRow::into_model).collect();
        }
    }

    // sparse region: order the whole table
    let rows: Vec<NodeRow> = sqlx::query_as(
        "
        SELECT id, stop_id, route_id, mode, lat, lon
        FROM node
        ORDER BY
            ($1 * ACOS(LEAST(1.0,
                COS(RADIANS($2)) * COS(RADIANS(lat)) *
                COS(RADIANS(lon) - RADIANS($3)) +
                SIN(RADIANS($2)) * SIN(RADIANS(lat))
            ))) ASC,
            id ASC
        LIMIT $4;
        ",
    )
    .bind(EARTH_RADIUS_M)
    .bind(latitude)
    .bind(longitude)
    .bind(k as i64)
    .fetch_all(pool)
    .await
    .map_err(convert_error)?;
    rows.into_iter().map(NodeRow::into_model).collect()
}

pub async fn get<'c, E>(executor: E, node_id: i64) -> Result<Node, StoreError>
where
    E: Executor<'c, Database = Postgres>,
{
    let row: Option<NodeRow> = sqlx::query_as(
        "
        SELECT id, stop_id, route_id, mode, lat, lon
        FROM node
        WHERE id = $1;
        ",
    )
    .bind(node_id)
    .fetch_optional(executor)
    .await
    .map_err(convert_error)?;
    row.ok_or(StoreError::NotFound)?.into_model()
}

pub async fn insert_all(
    tx: &mut Transaction<'_, Postgres>,
    nodes: &[Node],
) -> Result<u64, StoreError> {
    super::insert_all(
        tx,
        "node",
        &["id", "stop_id", "route_id", "mode", "lat", "lon"],
        nodes,
        |query, node| {
            query
                .bind(node.id)
                .bind(node.stop_id.clone())
                .bind(node.route_id.clone())
                .bind(node.mode.as_str())
                .bind(node.latitude)
                .bind(node.longitude)
        },
        "",
    )
    .await
    .map_err(convert_error)
}

/// Clears the derived graph ahead of a rebuild. Edges go with their nodes.
pub async fn truncate_with_edges(
    tx: &mut Transaction<'_, Postgres>,
) -> Result<(), StoreError> {
    sqlx::query("TRUNCATE TABLE edge, node RESTART IDENTITY;")
        .execute(&mut **tx)
        .await
        .map_err(convert_error)?;
    Ok(())
}
