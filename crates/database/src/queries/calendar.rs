use model::calendar::{Calendar, CalendarDate};
use routing::StoreError;
use sqlx::{Executor, Postgres, Transaction};

use crate::data_model::calendar::{CalendarDateRow, CalendarRow};

use super::convert_error;

pub async fn get_all<'c, E>(executor: E) -> Result<Vec<Calendar>, StoreError>
where
    E: Executor<'c, Database = Postgres>,
{
    let rows: Vec<CalendarRow> = sqlx::query_as(
        "
        SELECT service_id, monday, tuesday, wednesday, thursday, friday,
               saturday, sunday, start_date, end_date
        FROM calendar;
        ",
    )
    .fetch_all(executor)
    .await
    .map_err(convert_error)?;
    Ok(rows.into_iter().map(Calendar::from).collect())
}

pub async fn get_all_dates<'c, E>(executor: E) -> Result<Vec<CalendarDate>, StoreError>
where
    E: Executor<'c, Database = Postgres>,
{
    let rows: Vec<CalendarDateRow> = sqlx::query_as(
        "
        SELECT service_id, date, exception_type
        FROM calendar_date;
        ",
    )
    .fetch_all(executor)
    .await
    .map_err(convert_error)?;
    rows.into_iter().map(CalendarDateRow::into_model).collect()
}

pub async fn insert_all(
    tx: &mut Transaction<'_, Postgres>,
    calendars: &[Calendar],
) -> Result<u64, StoreError> {
    super::insert_all(
        tx,
        "calendar",
        &[
            "service_id",
            "monday",
            "tuesday",
            "wednesday",
            "thursday",
            "friday",
            "saturday",
            "sunday",
            "start_date",
            "end_date",
        ],
        calendars,
        |query, calendar| {
            query
                .bind(calendar.service_id.clone())
                .bind(calendar.monday)
                .bind(calendar.tuesday)
                .bind(calendar.wednesday)
                .bind(calendar.thursday)
                .bind(calendar.friday)
                .bind(calendar.saturday)
                .bind(calendar.sunday)
                .bind(calendar.start_date)
                .bind(calendar.end_date)
        },
        "ON CONFLICT (service_id) DO UPDATE SET \
         monday = EXCLUDED.monday, tuesday = EXCLUDED.tuesday, \
         wednesday = EXCLUDED.wednesday, thursday = EXCLUDED.thursday, \
         friday = EXCLUDED.friday, saturday = EXCLUDED.saturday, \
         sunday = EXCLUDED.sunday, start_date = EXCLUDED.start_date, \
         end_date = EXCLUDED.end_date",
    )
    .await
    .map_err(convert_error)
}

pub async fn insert_all_dates(
    tx: &mut Transaction<'_, Postgres>,
    dates: &[CalendarDate],
) -> Result<u64, StoreError> {
    super::insert_all(
        tx,
        "calendar_date",
        &["service_id", "date", "exception_type"],
        dates,
        |query, date| {
            query
                .bind(date.service_id.clone())
                .bind(date.date)
                .bind(i32::from(date.exception_type.as_gtfs()))
        },
        "ON CONFLICT (service_id, date) DO UPDATE SET \
         exception_type = EXCLUDED.exception_type",
    )
    .await
    .map_err(convert_error)
}
