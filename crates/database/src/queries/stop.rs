use model::stop::Stop;
use routing::StoreError;
use sqlx::{Executor, Postgres, Transaction};

use crate::data_model::stop::StopRow;

use super::convert_error;

pub async fn get_all<'c, E>(executor: E) -> Result<Vec<Stop>, StoreError>
where
    E: Executor<'c, Database = Postgres>,
{
    let rows: Vec<StopRow> = sqlx::query_as(
        "
        SELECT id, name, lat, lon
        FROM stop;
        ",
    )
    .fetch_all(executor)
    .await
    .map_err(convert_error)?;
    Ok(rows.into_iter().map(Stop::from).collect())
}

pub async fn insert_all(
    tx: &mut Transaction<'_, Postgres>,
    stops: &[Stop],
) -> Result<u64, StoreError> {
    super::insert_all(
        tx,
        "stop",
        &["id", "name", "lat", "lon"],
        stops,
        |query, stop| {
            query
                .bind(stop.id.clone())
                .bind(stop.name.clone())
                .bind(stop.latitude)
                .bind(stop.longitude)
        },
        "ON CONFLICT (id) DO UPDATE SET \
         name = EXCLUDED.name, lat = EXCLUDED.lat, lon = EXCLUDED.lon",
    )
    .await
    .map_err(convert_error)
}
