//! Budget consumption checks and threshold alerts.

use moneta_domain::Period;

use crate::error::Result;
use crate::store::LedgerStore;
use crate::CoreError;

/// Budgets whose progress reaches this ratio produce an alert.
pub const ALERT_THRESHOLD: f64 = 0.80;

/// Spending against a category's monthly limit.
///
/// `progress` is spent/limit and deliberately unbounded above 1; values
/// beyond 1 mean the budget is blown and callers are expected to surface
/// that. A zero limit pins progress to 0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BudgetStatus {
    pub spent: f64,
    pub limit: f64,
    pub progress: f64,
}

/// A budget that has crossed the alert threshold, with progress expressed
/// as a percentage.
#[derive(Debug, Clone, PartialEq)]
pub struct BudgetAlert {
    pub category: String,
    pub percentage: f64,
}

/// Stateless budget evaluation over the ledger store.
pub struct BudgetService;

impl BudgetService {
    /// Spending status for one category in one period. Categories without a
    /// budget row yield [`CoreError::NotFound`]; callers treat that as "no
    /// budget set" rather than a failure.
    pub fn status(store: &dyn LedgerStore, category: &str, period: Period) -> Result<BudgetStatus> {
        let budget = store.budget_for(category)?.ok_or_else(|| {
            CoreError::NotFound(format!("no budget for category `{category}`"))
        })?;
        let spent = store.spent_in_category(category, period)?;
        Ok(BudgetStatus {
            spent,
            limit: budget.monthly_limit,
            progress: progress_ratio(spent, budget.monthly_limit),
        })
    }

    /// Scans every budget for the given period and reports those at or past
    /// [`ALERT_THRESHOLD`], in the store's category-sorted order.
    pub fn alerts(store: &dyn LedgerStore, period: Period) -> Result<Vec<BudgetAlert>> {
        let mut alerts = Vec::new();
        for budget in store.list_budgets()? {
            let spent = store.spent_in_category(&budget.category, period)?;
            let progress = progress_ratio(spent, budget.monthly_limit);
            if progress >= ALERT_THRESHOLD {
                alerts.push(BudgetAlert {
                    category: budget.category,
                    percentage: progress * 100.0,
                });
            }
        }
        Ok(alerts)
    }
}

fn progress_ratio(spent: f64, limit: f64) -> f64 {
    if limit > 0.0 {
        spent / limit
    } else {
        0.0
    }
}
