//! Stable, public-facing helpers that wrap the internal service layer.
//!
//! This module exposes the simplified API that frontends (GUI, CLI,
//! automation jobs) call without depending on the individual services. The
//! store and clock are injected explicitly; nothing here holds state.

use moneta_domain::{Goal, Period};

use crate::budget_service::{BudgetAlert, BudgetService, BudgetStatus};
use crate::error::Result;
use crate::forecast_service::{ForecastPoint, ForecastService};
use crate::format;
use crate::goal_service::{GoalProjection, GoalService};
use crate::recurrence_service::RecurrenceService;
use crate::store::LedgerStore;
use crate::summary_service::{PeriodSummary, SummaryService};
use crate::time::Clock;
use crate::trend::{TrendEstimate, TrendService};

/// Average and slope of the category's monthly spending over the
/// `months_back` periods ending in the current month.
pub fn api_trend(
    store: &dyn LedgerStore,
    clock: &dyn Clock,
    category: &str,
    months_back: u32,
) -> Result<TrendEstimate> {
    TrendService::spending_trend(store, category, months_back, clock.current_period())
}

/// Average monthly spending for the category; the trend with the slope
/// dropped.
pub fn api_category_average(
    store: &dyn LedgerStore,
    clock: &dyn Clock,
    category: &str,
    months_back: u32,
) -> Result<f64> {
    TrendService::category_average(store, category, months_back, clock.current_period())
}

/// Projects income, expense, and balance for the next `months_ahead`
/// periods.
pub fn api_forecast(
    store: &dyn LedgerStore,
    clock: &dyn Clock,
    months_ahead: u32,
) -> Result<Vec<ForecastPoint>> {
    ForecastService::forecast(store, clock.current_period(), months_ahead)
}

/// Spending status against the category's budget for the given period.
pub fn api_budget_status(
    store: &dyn LedgerStore,
    category: &str,
    period: Period,
) -> Result<BudgetStatus> {
    BudgetService::status(store, category, period)
}

/// Budgets at or past the alert threshold for the current period.
pub fn api_budget_alerts(store: &dyn LedgerStore, clock: &dyn Clock) -> Result<Vec<BudgetAlert>> {
    BudgetService::alerts(store, clock.current_period())
}

/// Months-to-target and projected completion date for a goal.
pub fn api_project_goal(goal: &Goal) -> Result<GoalProjection> {
    GoalService::project(goal)
}

/// Materializes today's due recurring rules, returning how many
/// transactions were created.
pub fn api_process_recurring(store: &dyn LedgerStore, clock: &dyn Clock) -> Result<usize> {
    RecurrenceService::process_due(store, clock.today())
}

/// Income/expense/balance totals for one period.
pub fn api_period_summary(store: &dyn LedgerStore, period: Period) -> Result<PeriodSummary> {
    SummaryService::summarize(store, period)
}

/// The currency symbol callers should format analytics output with.
pub fn api_currency_symbol(store: &dyn LedgerStore) -> Result<String> {
    format::currency_symbol(store)
}
