//! Raw record types for the GTFS Schedule files this system consumes, one
//! module per file. Fields mirror the CSV columns; cleaning and conversion
//! into model types happens in [`crate::feed`].

pub mod calendar;
pub mod calendar_dates;
pub mod routes;
pub mod stop_times;
pub mod stops;
pub mod trips;
