//! Calendar-month aggregation buckets keyed as `YYYY-MM`.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// Identifies one calendar month used as an aggregation bucket.
///
/// Periods order chronologically and serialize as their `YYYY-MM` key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Period {
    year: i32,
    month: u32,
}

impl Period {
    pub fn new(year: i32, month: u32) -> Result<Self, PeriodParseError> {
        if !(1..=12).contains(&month) {
            return Err(PeriodParseError::MonthOutOfRange(month));
        }
        Ok(Self { year, month })
    }

    /// The period containing the given calendar day.
    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// Derives the period from the leading seven characters of a
    /// `YYYY-MM-DD` string. Inputs shorter than seven characters fail.
    pub fn from_date_str(input: &str) -> Result<Self, PeriodParseError> {
        if input.len() < 7 {
            return Err(PeriodParseError::TooShort(input.to_string()));
        }
        if !input.is_char_boundary(7) {
            return Err(PeriodParseError::Malformed(input.to_string()));
        }
        input[..7].parse()
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    /// The following calendar month, rolling the year past December.
    pub fn next(self) -> Self {
        self.plus(1)
    }

    /// Shifts the period by a signed number of months.
    pub fn plus(self, months: i32) -> Self {
        let index = self.year * 12 + self.month as i32 - 1 + months;
        Self {
            year: index.div_euclid(12),
            month: index.rem_euclid(12) as u32 + 1,
        }
    }

    /// Whether the given day falls inside this calendar month.
    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for Period {
    type Err = PeriodParseError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let malformed = || PeriodParseError::Malformed(input.to_string());
        let (year_part, month_part) = input.split_once('-').ok_or_else(malformed)?;
        if year_part.len() != 4 || month_part.len() != 2 {
            return Err(malformed());
        }
        let year: i32 = year_part.parse().map_err(|_| malformed())?;
        let month: u32 = month_part.parse().map_err(|_| malformed())?;
        Period::new(year, month)
    }
}

impl TryFrom<String> for Period {
    type Error = PeriodParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Period> for String {
    fn from(period: Period) -> Self {
        period.to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PeriodParseError {
    TooShort(String),
    Malformed(String),
    MonthOutOfRange(u32),
}

impl fmt::Display for PeriodParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PeriodParseError::TooShort(input) => {
                write!(f, "`{input}` is too short for a YYYY-MM period key")
            }
            PeriodParseError::Malformed(input) => {
                write!(f, "`{input}` is not a YYYY-MM period key")
            }
            PeriodParseError::MonthOutOfRange(month) => {
                write!(f, "month {month} is outside 1..=12")
            }
        }
    }
}

impl std::error::Error for PeriodParseError {}
