use chrono::NaiveDate;
use model::calendar::{Calendar, CalendarDate, ServiceException};
use routing::StoreError;
use sqlx::FromRow;

use super::corrupt_row;

#[derive(Debug, Clone, FromRow)]
pub struct CalendarRow {
    pub service_id: String,
    pub monday: bool,
    pub tuesday: bool,
    pub wednesday: bool,
    pub thursday: bool,
    pub friday: bool,
    pub saturday: bool,
    pub sunday: bool,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl From<CalendarRow> for Calendar {
    fn from(row: CalendarRow) -> Self {
        Calendar {
            service_id: row.service_id,
            monday: row.monday,
            tuesday: row.tuesday,
            wednesday: row.wednesday,
            thursday: row.thursday,
            friday: row.friday,
            saturday: row.saturday,
            sunday: row.sunday,
            start_date: row.start_date,
            end_date: row.end_date,
        }
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct CalendarDateRow {
    pub service_id: String,
    pub date: NaiveDate,
    pub exception_type: i32,
}

impl CalendarDateRow {
    pub fn into_model(self) -> Result<CalendarDate, StoreError> {
        let exception_type = ServiceException::from_gtfs(self.exception_type as u8)
            .ok_or_else(|| {
                corrupt_row(format!(
                    "calendar_date {}: unknown exception type {}",
                    self.service_id, self.exception_type
                ))
            })?;
        Ok(CalendarDate {
            service_id: self.service_id,
            date: self.date,
            exception_type,
        })
    }
}
