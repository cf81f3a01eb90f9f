//! Templates that re-materialize ledger transactions on a schedule.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::note::Note;
use crate::transaction::TxKind;

/// Nominal cadence of a recurring rule.
///
/// Carried and persisted, but the current processor treats every active
/// in-window rule as due each day it runs; see the recurrence service.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Frequency {
    Weekly,
    Monthly,
    Yearly,
}

impl Frequency {
    pub fn as_str(self) -> &'static str {
        match self {
            Frequency::Weekly => "weekly",
            Frequency::Monthly => "monthly",
            Frequency::Yearly => "yearly",
        }
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Frequency {
    type Err = FrequencyParseError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        match input {
            "weekly" => Ok(Frequency::Weekly),
            "monthly" => Ok(Frequency::Monthly),
            "yearly" => Ok(Frequency::Yearly),
            other => Err(FrequencyParseError(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrequencyParseError(String);

impl fmt::Display for FrequencyParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "`{}` is not weekly, monthly, or yearly", self.0)
    }
}

impl std::error::Error for FrequencyParseError {}

/// A template describing a transaction to be re-created over time.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecurringRule {
    pub id: Uuid,
    pub kind: TxKind,
    pub category: String,
    pub amount: f64,
    pub frequency: Frequency,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub note: Note,
    pub active: bool,
}

impl RecurringRule {
    pub fn new(
        kind: TxKind,
        category: impl Into<String>,
        amount: f64,
        frequency: Frequency,
        start_date: NaiveDate,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            category: category.into(),
            amount,
            frequency,
            start_date,
            end_date: None,
            note: Note::default(),
            active: true,
        }
    }

    pub fn with_end_date(mut self, end_date: NaiveDate) -> Self {
        self.end_date = Some(end_date);
        self
    }

    pub fn with_note(mut self, note: Note) -> Self {
        self.note = note;
        self
    }

    /// Whether the rule's date window covers the given day: the start date
    /// has passed and the end date, when present, has not.
    pub fn in_window(&self, date: NaiveDate) -> bool {
        self.start_date <= date && self.end_date.map_or(true, |end| end >= date)
    }
}
