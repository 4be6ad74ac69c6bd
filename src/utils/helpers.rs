//! Helper functions and utilities
//!
//! This module contains common date helpers used throughout the calendar.

use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveTime, TimeZone, Utc};
use crate::utils::errors::{AstroClubError, Result};

/// Format a timestamp for display
pub fn format_timestamp(timestamp: DateTime<Utc>) -> String {
    timestamp.format("%Y-%m-%d %H:%M:%S UTC").to_string()
}

/// Build a date, rejecting impossible calendar days
pub fn checked_date(year: i32, month: u32, day: u32) -> Result<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, day)
        .ok_or(AstroClubError::InvalidDate { year, month, day })
}

/// First day of the given month
pub fn first_of_month(year: i32, month: u32) -> Result<NaiveDate> {
    checked_date(year, month, 1)
}

/// Last day of the given month
pub fn last_of_month(year: i32, month: u32) -> Result<NaiveDate> {
    let first = first_of_month(year, month)?;
    let next = if month == 12 {
        checked_date(year + 1, 1, 1)?
    } else {
        checked_date(year, month + 1, 1)?
    };
    Ok(next.pred_opt().unwrap_or(first))
}

/// `00:00:00.000` of the day, in UTC
pub fn start_of_day(day: NaiveDate) -> DateTime<Utc> {
    Utc.from_utc_datetime(&day.and_time(NaiveTime::MIN))
}

/// `23:59:59.999` of the day, in UTC
pub fn end_of_day(day: NaiveDate) -> DateTime<Utc> {
    start_of_day(day) + Duration::days(1) - Duration::milliseconds(1)
}

/// Same calendar month
pub fn is_same_month(date: NaiveDate, year: i32, month: u32) -> bool {
    date.year() == year && date.month() == month
}

/// Inclusive iterator over days
pub fn each_day(from: NaiveDate, to: NaiveDate) -> impl Iterator<Item = NaiveDate> {
    from.iter_days().take_while(move |day| *day <= to)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_last_of_month() {
        assert_eq!(last_of_month(2024, 2).unwrap(), NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
        assert_eq!(last_of_month(2023, 2).unwrap(), NaiveDate::from_ymd_opt(2023, 2, 28).unwrap());
        assert_eq!(last_of_month(2024, 12).unwrap(), NaiveDate::from_ymd_opt(2024, 12, 31).unwrap());
    }

    #[test]
    fn test_checked_date_rejects_bad_day() {
        assert!(checked_date(2024, 2, 30).is_err());
        assert!(checked_date(2024, 13, 1).is_err());
    }

    #[test]
    fn test_day_bounds() {
        let day = NaiveDate::from_ymd_opt(2024, 8, 1).unwrap();
        assert_eq!(format_timestamp(start_of_day(day)), "2024-08-01 00:00:00 UTC");
        assert_eq!(format_timestamp(end_of_day(day)), "2024-08-01 23:59:59 UTC");
    }

    #[test]
    fn test_each_day_inclusive() {
        let from = NaiveDate::from_ymd_opt(2024, 8, 30).unwrap();
        let to = NaiveDate::from_ymd_opt(2024, 9, 2).unwrap();
        assert_eq!(each_day(from, to).count(), 4);
    }
}
