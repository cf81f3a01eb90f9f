//! Completion projection for savings goals.

use chrono::NaiveDate;

use moneta_domain::{add_months, Goal};

use crate::error::Result;
use crate::CoreError;

/// Derived completion estimate for a goal. Never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GoalProjection {
    pub months_needed: u32,
    pub projected_date: NaiveDate,
}

pub struct GoalService;

impl GoalService {
    /// Months of contributions needed to reach the target, and the calendar
    /// date that many months after the goal's start. Goals without a
    /// positive target and contribution cannot be projected.
    pub fn project(goal: &Goal) -> Result<GoalProjection> {
        if goal.target_amount <= 0.0 {
            return Err(CoreError::InvalidArgument(format!(
                "goal `{}` needs a positive target amount",
                goal.name
            )));
        }
        if goal.monthly_saving <= 0.0 {
            return Err(CoreError::InvalidArgument(format!(
                "goal `{}` needs a positive monthly saving",
                goal.name
            )));
        }
        let months_needed = (goal.target_amount / goal.monthly_saving).ceil() as u32;
        Ok(GoalProjection {
            months_needed,
            projected_date: add_months(goal.start_date, months_needed as i32),
        })
    }
}
