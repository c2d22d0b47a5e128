//! Row structs mirroring the persisted schema, plus their conversions into
//! model types. Rows that fail to convert (e.g. an unknown mode string)
//! indicate a corrupt table and surface as store errors.

use routing::StoreError;

pub mod calendar;
pub mod edge;
pub mod node;
pub mod route;
pub mod stop;
pub mod trip;

pub(crate) fn corrupt_row(why: String) -> StoreError {
    StoreError::Unavailable(why.into())
}
