//! Calendar-day helpers shared by period bucketing and goal projection.

use std::fmt;

use chrono::{Datelike, Duration, NaiveDate};

/// Parses a strict `YYYY-MM-DD` calendar date.
pub fn parse_date(input: &str) -> Result<NaiveDate, DateParseError> {
    NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .map_err(|_| DateParseError::Malformed(input.to_string()))
}

/// Shifts a date by a signed number of months, clamping the day-of-month to
/// the last valid day of the resulting month (Jan 31 + 1 month is Feb 28,
/// or Feb 29 in a leap year).
pub fn add_months(date: NaiveDate, months: i32) -> NaiveDate {
    let mut year = date.year();
    let mut month = date.month() as i32 + months;
    while month > 12 {
        month -= 12;
        year += 1;
    }
    while month < 1 {
        month += 12;
        year -= 1;
    }
    let day = date.day().min(days_in_month(year, month as u32));
    // year/month are normalized into 1..=12 above, so this cannot fail.
    NaiveDate::from_ymd_opt(year, month as u32, day).unwrap_or(date)
}

/// Number of days in the given calendar month.
pub fn days_in_month(year: i32, month: u32) -> u32 {
    let next_month = if month == 12 { 1 } else { month + 1 };
    let next_year = if month == 12 { year + 1 } else { year };
    let first_next = NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .unwrap_or_else(|| NaiveDate::from_ymd_opt(year, month, 28).unwrap());
    let last_current = first_next - Duration::days(1);
    last_current.day()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DateParseError {
    Malformed(String),
}

impl fmt::Display for DateParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DateParseError::Malformed(input) => {
                write!(f, "`{input}` is not a YYYY-MM-DD calendar date")
            }
        }
    }
}

impl std::error::Error for DateParseError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn add_months_clamps_to_leap_february() {
        assert_eq!(add_months(date(2024, 1, 31), 1), date(2024, 2, 29));
        assert_eq!(add_months(date(2023, 1, 31), 1), date(2023, 2, 28));
    }

    #[test]
    fn add_months_rolls_over_year_boundaries() {
        assert_eq!(add_months(date(2024, 11, 15), 3), date(2025, 2, 15));
        assert_eq!(add_months(date(2024, 2, 29), 12), date(2025, 2, 28));
        assert_eq!(add_months(date(2024, 3, 31), -1), date(2024, 2, 29));
        assert_eq!(add_months(date(2024, 1, 10), -13), date(2022, 12, 10));
    }

    #[test]
    fn century_years_are_not_leap_unless_divisible_by_400() {
        assert_eq!(days_in_month(2100, 2), 28);
        assert_eq!(days_in_month(2000, 2), 29);
    }

    #[test]
    fn parse_date_rejects_malformed_input() {
        assert!(parse_date("2024-02-30").is_err());
        assert!(parse_date("2024/02/01").is_err());
        assert!(parse_date("garbage").is_err());
        assert_eq!(parse_date("2024-02-29").unwrap(), date(2024, 2, 29));
    }
}
