use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

/// Weekly operating pattern of a service. Stored for external consumers
/// (schedule endpoints, service-day filters); the routing core does not
/// consult it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Calendar {
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

impl Calendar {
    pub fn runs_on(&self, date: NaiveDate) -> bool {
        if date < self.start_date || date > self.end_date {
            return false;
        }
        match date.weekday() {
            Weekday::Mon => self.monday,
            Weekday::Tue => self.tuesday,
            Weekday::Wed => self.wednesday,
            Weekday::Thu => self.thursday,
            Weekday::Fri => self.friday,
            Weekday::Sat => self.saturday,
            Weekday::Sun => self.sunday,
        }
    }
}

/// Dated exception to a weekly pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ServiceException {
    /// Service added for the date (GTFS exception type 1).
    Added,
    /// Service removed for the date (GTFS exception type 2).
    Removed,
}

impl ServiceException {
    pub fn from_gtfs(value: u8) -> Option<Self> {
        match value {
            1 => Some(Self::Added),
            2 => Some(Self::Removed),
            _ => None,
        }
    }

    pub fn as_gtfs(&self) -> u8 {
        match self {
            Self::Added => 1,
            Self::Removed => 2,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarDate {
    pub service_id: String,
    pub date: NaiveDate,
    pub exception_type: ServiceException,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn weekday_service() -> Calendar {
        Calendar {
            service_id: "WK".to_owned(),
            monday: true,
            tuesday: true,
            wednesday: true,
            thursday: true,
            friday: true,
            saturday: false,
            sunday: false,
            start_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2024, 12, 31).unwrap(),
        }
    }

    #[test]
    fn runs_on_weekdays_only() {
        let service = weekday_service();
        // 2024-03-04 is a Monday
        assert!(service.runs_on(NaiveDate::from_ymd_opt(2024, 3, 4).unwrap()));
        assert!(!service.runs_on(NaiveDate::from_ymd_opt(2024, 3, 9).unwrap()));
    }

    #[test]
    fn outside_window_never_runs() {
        let service = weekday_service();
        assert!(!service.runs_on(NaiveDate::from_ymd_opt(2025, 3, 3).unwrap()));
    }

    #[test]
    fn exception_codes_round_trip() {
        assert_eq!(ServiceException::from_gtfs(1), Some(ServiceException::Added));
        assert_eq!(
            ServiceException::from_gtfs(2),
            Some(ServiceException::Removed)
        );
        assert_eq!(ServiceException::from_gtfs(3), None);
        assert_eq!(ServiceException::Added.as_gtfs(), 1);
    }
}
