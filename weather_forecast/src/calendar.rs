//! Calendar features derived from a single date

use chrono::{Datelike, NaiveDate};

/// Date-only part of a feature vector
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarFeatures {
    /// 1 to 366
    pub day_of_year: u32,
    /// 1 to 12
    pub month: u32,
    pub year: i32,
    /// 0 = Monday, 6 = Sunday
    pub day_of_week: u32,
    /// Saturday or Sunday
    pub is_weekend: bool,
}

impl CalendarFeatures {
    /// Derive the features of a date
    pub fn from_date(date: NaiveDate) -> Self {
        let day_of_week = date.weekday().num_days_from_monday();
        Self {
            day_of_year: date.ordinal(),
            month: date.month(),
            year: date.year(),
            day_of_week,
            is_weekend: day_of_week >= 5,
        }
    }
}

/// Parse a calendar date in `YYYY-MM-DD` form
pub fn parse_date(input: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(input, "%Y-%m-%d").ok()
}

/// Parse a dataset date cell, accepting a trailing time part after `T` or a space
pub fn parse_date_cell(cell: &str) -> Option<NaiveDate> {
    let cell = cell.trim();
    if let Some(date) = parse_date(cell) {
        return Some(date);
    }
    let (date_part, _) = cell.split_once(['T', ' '])?;
    parse_date(date_part)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_features_of_known_dates() {
        // 2024-06-15 is a Saturday
        let features = CalendarFeatures::from_date(NaiveDate::from_ymd_opt(2024, 6, 15).unwrap());
        assert_eq!(features.day_of_year, 167);
        assert_eq!(features.month, 6);
        assert_eq!(features.year, 2024);
        assert_eq!(features.day_of_week, 5);
        assert!(features.is_weekend);

        // 2024-01-01 is a Monday
        let features = CalendarFeatures::from_date(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        assert_eq!(features.day_of_year, 1);
        assert_eq!(features.day_of_week, 0);
        assert!(!features.is_weekend);
    }

    #[test]
    fn test_leap_year_end() {
        let features =
            CalendarFeatures::from_date(NaiveDate::from_ymd_opt(2020, 12, 31).unwrap());
        assert_eq!(features.day_of_year, 366);
    }

    #[test]
    fn test_weekend_matches_weekday_for_a_full_year() {
        let mut date = NaiveDate::from_ymd_opt(2023, 1, 1).unwrap();
        while date.year() == 2023 {
            let features = CalendarFeatures::from_date(date);
            let weekend = matches!(date.weekday(), chrono::Weekday::Sat | chrono::Weekday::Sun);
            assert_eq!(features.is_weekend, weekend, "{}", date);
            assert_eq!(features.is_weekend, features.day_of_week >= 5);
            date = date.succ_opt().unwrap();
        }
    }

    #[test]
    fn test_parse_date_cell() {
        let expected = NaiveDate::from_ymd_opt(2010, 1, 1);
        assert_eq!(parse_date_cell("2010-01-01"), expected);
        assert_eq!(parse_date_cell("2010-01-01T00:00"), expected);
        assert_eq!(parse_date_cell("2010-01-01 00:00:00"), expected);
        assert_eq!(parse_date_cell("01/01/2010"), None);
    }
}
