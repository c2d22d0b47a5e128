use model::trip::{StopTime, Trip};
use routing::StoreError;
use sqlx::{Executor, Postgres, Transaction};

use crate::data_model::trip::{StopTimeRow, TripRow};

use super::convert_error;

pub async fn get_all<'c, E>(executor: E) -> Result<Vec<Trip>, StoreError>
where
    E: Executor<'c, Database = Postgres>,
{
    let rows: Vec<TripRow> = sqlx::query_as(
        "
        SELECT id, route_id, service_id
        FROM trip;
        ",
    )
    .fetch_all(executor)
    .await
    .map_err(convert_error)?;
    Ok(rows.into_iter().map(Trip::from).collect())
}

pub async fn get_all_stop_times<'c, E>(executor: E) -> Result<Vec<StopTime>, StoreError>
where
    E: Executor<'c, Database = Postgres>,
{
    let rows: Vec<StopTimeRow> = sqlx::query_as(
        "
        SELECT trip_id, stop_id, stop_sequence, arrival_time, departure_time,
               arrival_seconds, departure_seconds
        FROM stop_time
        ORDER BY trip_id, stop_sequence;
        ",
    )
    .fetch_all(executor)
    .await
    .map_err(convert_error)?;
    Ok(rows.into_iter().map(StopTime::from).collect())
}

pub async fn insert_all(
    tx: &mut Transaction<'_, Postgres>,
    trips: &[Trip],
) -> Result<u64, StoreError> {
    super::insert_all(
        tx,
        "trip",
        &["id", "route_id", "service_id"],
        trips,
        |query, trip| {
            query
                .bind(trip.id.clone())
                .bind(trip.route_id.clone())
                .bind(trip.service_id.clone())
        },
        "ON CONFLICT (id) DO UPDATE SET \
         route_id = EXCLUDED.route_id, service_id = EXCLUDED.service_id",
    )
    .await
    .map_err(convert_error)
}

pub async fn insert_all_stop_times(
    tx: &mut Transaction<'_, Postgres>,
    stop_times: &[StopTime],
) -> Result<u64, StoreError> {
    super::insert_all(
        tx,
        "stop_time",
        &[
            "trip_id",
            "stop_id",
            "stop_sequence",
            "arrival_time",
            "departure_time",
            "arrival_seconds",
            "departure_seconds",
        ],
        stop_times,
        |query, stop_time| {
            query
                .bind(stop_time.trip_id.clone())
                .bind(stop_time.stop_id.clone())
                .bind(stop_time.stop_sequence as i32)
                .bind(stop_time.arrival_time.clone())
                .bind(stop_time.departure_time.clone())
                .bind(stop_time.arrival_seconds.map(|seconds| seconds as i32))
                .bind(stop_time.departure_seconds.map(|seconds| seconds as i32))
        },
        "ON CONFLICT (trip_id, stop_sequence) DO UPDATE SET \
         stop_id = EXCLUDED.stop_id, arrival_time = EXCLUDED.arrival_time, \
         departure_time = EXCLUDED.departure_time, \
         arrival_seconds = EXCLUDED.arrival_seconds, \
         departure_seconds = EXCLUDED.departure_seconds",
    )
    .await
    .map_err(convert_error)
}
