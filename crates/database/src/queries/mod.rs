use std::fmt::Write as _;

use routing::StoreError;
use sqlx::{postgres::PgArguments, query::Query, Postgres, Transaction};

pub mod calendar;
pub mod edge;
pub mod node;
pub mod route;
pub mod stop;
pub mod trip;

pub(crate) fn convert_error(why: sqlx::Error) -> StoreError {
    match why {
        sqlx::Error::RowNotFound => StoreError::NotFound,
        _ => StoreError::Unavailable(Box::new(why)),
    }
}

const MAX_CHUNK_SIZE: usize = 100;

/// Chunked multi-row INSERT. `bind` appends one row's values in column
/// order; `conflict` is a complete ON CONFLICT clause, or empty.
pub(crate) async fn insert_all<T, B>(
    tx: &mut Transaction<'_, Postgres>,
    table: &str,
    columns: &[&str],
    values: &[T],
    bind: B,
    conflict: &str,
) -> Result<u64, sqlx::Error>
where
    for<'a> B:
        Fn(Query<'a, Postgres, PgArguments>, &T) -> Query<'a, Postgres, PgArguments>,
{
    if values.is_empty() {
        return Ok(0);
    }

    let mut affected = 0;
    for chunk in values.chunks(MAX_CHUNK_SIZE) {
        // build query string
        let mut query_str =
            format!("INSERT INTO {} ({}) VALUES ", table, columns.join(", "));
        let mut placeholder_index = 1;
        for i in 0..chunk.len() {
            if i > 0 {
                query_str.push_str(", ");
            }
            query_str.push('(');
            for j in 0..columns.len() {
                if j > 0 {
                    query_str.push_str(", ");
                }
                write!(&mut query_str, "${}", placeholder_index).unwrap();
                placeholder_index += 1;
            }
            query_str.push(')');
        }
        if !conflict.is_empty() {
            query_str.push(' ');
            query_str.push_str(conflict);
        }
        query_str.push(';');

        // query
        let mut query = sqlx::query::<Postgres>(&query_str);
        for value in chunk {
            query = bind(query, value);
        }
        affected += query.execute(&mut **tx).await?.rows_affected();
    }
    Ok(affected)
}
