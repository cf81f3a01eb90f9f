//! Income/expense/balance projection from recent ledger history.

use serde::{Deserialize, Serialize};
use tracing::debug;

use moneta_domain::{Period, TxKind};

use crate::error::Result;
use crate::store::LedgerStore;
use crate::trend::{linear_trend, monthly_window};
use crate::CoreError;

/// Length of the historical window the projection is fitted against.
pub const HISTORY_MONTHS: u32 = 6;

/// Upper bound on how far ahead a forecast may reach.
pub const MAX_MONTHS_AHEAD: u32 = 12;

/// Projected totals for one future period.
///
/// Income and expense are floored at zero independently; the balance is the
/// difference of the floored values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastPoint {
    pub period: Period,
    pub predicted_income: f64,
    pub predicted_expense: f64,
    pub predicted_balance: f64,
}

/// Stateless forecasting over the ledger store.
pub struct ForecastService;

impl ForecastService {
    /// Projects the next `months_ahead` periods after `reference` from the
    /// trailing [`HISTORY_MONTHS`] of ledger activity.
    ///
    /// The window is clipped to months on or after the ledger's first
    /// transaction, so young ledgers fit against fewer points (a window
    /// under two points degrades to a flat average). A ledger with no
    /// transactions at all yields [`CoreError::NoData`].
    pub fn forecast(
        store: &dyn LedgerStore,
        reference: Period,
        months_ahead: u32,
    ) -> Result<Vec<ForecastPoint>> {
        if !(1..=MAX_MONTHS_AHEAD).contains(&months_ahead) {
            return Err(CoreError::InvalidArgument(format!(
                "months_ahead must be within 1..={MAX_MONTHS_AHEAD}, got {months_ahead}"
            )));
        }

        let earliest = store
            .earliest_transaction_date()?
            .ok_or(CoreError::NoData)?;
        let earliest_period = Period::of(earliest);
        let window: Vec<Period> = monthly_window(reference, HISTORY_MONTHS)
            .into_iter()
            .filter(|period| *period >= earliest_period)
            .collect();
        if window.is_empty() {
            return Err(CoreError::NoData);
        }

        let mut income_history = Vec::with_capacity(window.len());
        let mut expense_history = Vec::with_capacity(window.len());
        for period in &window {
            income_history.push(store.total_by_kind(TxKind::Income, *period)?);
            expense_history.push(store.total_by_kind(TxKind::Expense, *period)?);
        }
        let income = linear_trend(&income_history);
        let expense = linear_trend(&expense_history);
        let hist_count = window.len() as f64;
        debug!(
            periods = window.len(),
            income_slope = income.slope,
            expense_slope = expense.slope,
            "forecast window assembled"
        );

        let mut points = Vec::with_capacity(months_ahead as usize);
        for step in 1..=months_ahead {
            let offset = step as f64 + hist_count;
            let predicted_income = (income.average + income.slope * offset).max(0.0);
            let predicted_expense = (expense.average + expense.slope * offset).max(0.0);
            points.push(ForecastPoint {
                period: reference.plus(step as i32),
                predicted_income,
                predicted_expense,
                predicted_balance: predicted_income - predicted_expense,
            });
        }
        Ok(points)
    }
}
