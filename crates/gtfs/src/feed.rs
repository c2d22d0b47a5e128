use log::warn;
use model::calendar::{Calendar, CalendarDate, ServiceException};
use model::route::{Route, TransitMode};
use model::stop::Stop;
use model::trip::{StopTime, Trip};
use utility::time::parse_schedule_time;

use crate::data_model::calendar::CalendarRecord;
use crate::data_model::calendar_dates::CalendarDateRecord;
use crate::data_model::routes::RouteRecord;
use crate::data_model::stop_times::StopTimeRecord;
use crate::data_model::stops::StopRecord;
use crate::data_model::trips::TripRecord;

/// The raw rows of one GTFS snapshot, exactly as decoded from CSV.
#[derive(Debug, Default)]
pub struct FeedRecords {
    pub stops: Vec<StopRecord>,
    pub routes: Vec<RouteRecord>,
    pub trips: Vec<TripRecord>,
    pub stop_times: Vec<StopTimeRecord>,
    pub calendars: Vec<CalendarRecord>,
    pub calendar_dates: Vec<CalendarDateRecord>,
}

/// A cleaned, typed GTFS snapshot. Rows that cannot take part in routing
/// (missing ids, missing coordinates, unparseable dates) are dropped here,
/// with a summary line per file, so the graph builder only ever sees valid
/// data.
#[derive(Debug, Default)]
pub struct TransitFeed {
    pub stops: Vec<Stop>,
    pub routes: Vec<Route>,
    pub trips: Vec<Trip>,
    pub stop_times: Vec<StopTime>,
    pub calendars: Vec<Calendar>,
    pub calendar_dates: Vec<CalendarDate>,
}

impl TransitFeed {
    pub fn from_records(records: FeedRecords) -> Self {
        Self {
            stops: convert_stops(records.stops),
            routes: convert_routes(records.routes),
            trips: convert_trips(records.trips),
            stop_times: convert_stop_times(records.stop_times),
            calendars: convert_calendars(records.calendars),
            calendar_dates: convert_calendar_dates(records.calendar_dates),
        }
    }
}

fn convert_stops(records: Vec<StopRecord>) -> Vec<Stop> {
    let total = records.len();
    let stops: Vec<Stop> = records
        .into_iter()
        .filter_map(|record| {
            let latitude = record.stop_lat?;
            let longitude = record.stop_lon?;
            Some(Stop {
                name: record
                    .stop_name
                    .filter(|name| !name.is_empty())
                    .unwrap_or_else(|| record.stop_id.clone()),
                id: record.stop_id,
                latitude,
                longitude,
            })
        })
        .collect();
    log_dropped("stops", total, stops.len());
    stops
}

fn convert_routes(records: Vec<RouteRecord>) -> Vec<Route> {
    records
        .into_iter()
        .map(|record| {
            let agency_id = record.agency_id.unwrap_or_default();
            let mode = TransitMode::infer(&agency_id, record.route_type);
            Route {
                id: record.route_id,
                agency_id,
                short_name: record.route_short_name,
                long_name: record.route_long_name,
                mode,
            }
        })
        .collect()
}

fn convert_trips(records: Vec<TripRecord>) -> Vec<Trip> {
    records
        .into_iter()
        .map(|record| Trip {
            id: record.trip_id,
            route_id: record.route_id,
            service_id: record.service_id,
        })
        .collect()
}

fn convert_stop_times(records: Vec<StopTimeRecord>) -> Vec<StopTime> {
    let total = records.len();
    let stop_times: Vec<StopTime> = records
        .into_iter()
        .filter_map(|record| {
            let stop_id = record.stop_id.filter(|id| !id.is_empty())?;
            let arrival_time = record.arrival_time.unwrap_or_default();
            let departure_time = record.departure_time.unwrap_or_default();
            Some(StopTime {
                arrival_seconds: parse_schedule_time(&arrival_time).ok(),
                departure_seconds: parse_schedule_time(&departure_time).ok(),
                trip_id: record.trip_id,
                stop_id,
                stop_sequence: record.stop_sequence,
                arrival_time,
                departure_time,
            })
        })
        .collect();
    log_dropped("stop_times", total, stop_times.len());
    stop_times
}

fn convert_calendars(records: Vec<CalendarRecord>) -> Vec<Calendar> {
    let total = records.len();
    let calendars: Vec<Calendar> = records
        .into_iter()
        .filter_map(|record| {
            let start_date = parse_gtfs_date(&record.start_date)?;
            let end_date = parse_gtfs_date(&record.end_date)?;
            Some(Calendar {
                service_id: record.service_id,
                monday: record.monday == 1,
                tuesday: record.tuesday == 1,
                wednesday: record.wednesday == 1,
                thursday: record.thursday == 1,
                friday: record.friday == 1,
                saturday: record.saturday == 1,
                sunday: record.sunday == 1,
                start_date,
                end_date,
            })
        })
        .collect();
    log_dropped("calendar", total, calendars.len());
    calendars
}

fn convert_calendar_dates(records: Vec<CalendarDateRecord>) -> Vec<CalendarDate> {
    let total = records.len();
    let dates: Vec<CalendarDate> = records
        .into_iter()
        .filter_map(|record| {
            Some(CalendarDate {
                date: parse_gtfs_date(&record.date)?,
                exception_type: ServiceException::from_gtfs(record.exception_type)?,
                service_id: record.service_id,
            })
        })
        .collect();
    log_dropped("calendar_dates", total, dates.len());
    dates
}

fn parse_gtfs_date(value: &str) -> Option<chrono::NaiveDate> {
    chrono::NaiveDate::parse_from_str(value, "%Y%m%d").ok()
}

fn log_dropped(file: &str, total: usize, kept: usize) {
    if kept < total {
        warn!("{}: dropped {} of {} records", file, total - kept, total);
    }
}
