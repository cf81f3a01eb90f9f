//! Savings goals tracked against a monthly contribution.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A savings target funded by a fixed monthly contribution.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Goal {
    pub id: Uuid,
    pub name: String,
    pub target_amount: f64,
    pub monthly_saving: f64,
    pub start_date: NaiveDate,
}

impl Goal {
    pub fn new(
        name: impl Into<String>,
        target_amount: f64,
        monthly_saving: f64,
        start_date: NaiveDate,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            target_amount,
            monthly_saving,
            start_date,
        }
    }
}
