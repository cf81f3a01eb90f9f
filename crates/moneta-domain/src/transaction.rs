//! Ledger transaction entries and their income/expense kind.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::note::Note;

/// Whether a ledger entry adds to or draws from the balance.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum TxKind {
    Income,
    Expense,
}

impl TxKind {
    pub fn as_str(self) -> &'static str {
        match self {
            TxKind::Income => "income",
            TxKind::Expense => "expense",
        }
    }
}

impl fmt::Display for TxKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single dated ledger entry.
///
/// Amounts are non-negative; the sign of the flow is carried by `kind`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Transaction {
    pub id: Uuid,
    pub kind: TxKind,
    pub category: String,
    pub amount: f64,
    pub date: NaiveDate,
    pub note: Note,
}

impl Transaction {
    pub fn new(kind: TxKind, category: impl Into<String>, amount: f64, date: NaiveDate) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            category: category.into(),
            amount,
            date,
            note: Note::default(),
        }
    }

    pub fn with_note(mut self, note: Note) -> Self {
        self.note = note;
        self
    }
}
