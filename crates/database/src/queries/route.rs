use model::route::Route;
use routing::StoreError;
use sqlx::{Executor, Postgres, Transaction};

use crate::data_model::route::RouteRow;

use super::convert_error;

pub async fn get_all<'c, E>(executor: E) -> Result<Vec<Route>, StoreError>
where
    E: Executor<'c, Database = Postgres>,
{
    let rows: Vec<RouteRow> = sqlx::query_as(
        "
        SELECT id, agency_id, short_name, long_name, mode
        FROM route;
        ",
    )
    .fetch_all(executor)
    .await
    .map_err(convert_error)?;
    rows.into_iter().map(RouteRow::into_model).collect()
}

pub async fn insert_all(
    tx: &mut Transaction<'_, Postgres>,
    routes: &[Route],
) -> Result<u64, StoreError> {
    super::insert_all(
        tx,
        "route",
        &["id", "agency_id", "short_name", "long_name", "mode"],
        routes,
        |query, route| {
            query
                .bind(route.id.clone())
                .bind(route.agency_id.clone())
                .bind(route.short_name.clone())
                .bind(route.long_name.clone())
                .bind(route.mode.as_str())
        },
        "ON CONFLICT (id) DO UPDATE SET \
         agency_id = EXCLUDED.agency_id, short_name = EXCLUDED.short_name, \
         long_name = EXCLUDED.long_name, mode = EXCLUDED.mode",
    )
    .await
    .map_err(convert_error)
}
