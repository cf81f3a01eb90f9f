use std::sync::Mutex;

use chrono::NaiveDate;

use moneta_domain::{Budget, Frequency, Goal, Note, Period, RecurringRule, Transaction, TxKind};

use crate::budget_service::BudgetService;
use crate::forecast_service::{ForecastService, HISTORY_MONTHS};
use crate::goal_service::GoalService;
use crate::public_api::{
    api_budget_alerts, api_budget_status, api_currency_symbol, api_period_summary,
    api_process_recurring, api_trend,
};
use crate::recurrence_service::{RecurrenceOptions, RecurrenceService};
use crate::store::LedgerStore;
use crate::time::FixedClock;
use crate::trend::TrendService;
use crate::{CoreError, Result};

/// Ledger store fake backed by plain vectors. `fail_inserts_for` makes
/// inserts into one category error, for partial-failure tests.
#[derive(Default)]
struct FakeStore {
    transactions: Mutex<Vec<Transaction>>,
    budgets: Vec<Budget>,
    goals: Vec<Goal>,
    rules: Vec<RecurringRule>,
    settings: Vec<(String, String)>,
    fail_inserts_for: Option<String>,
}

impl FakeStore {
    fn with_transactions(transactions: Vec<Transaction>) -> Self {
        Self {
            transactions: Mutex::new(transactions),
            ..Self::default()
        }
    }

    fn transaction_count(&self) -> usize {
        self.transactions.lock().unwrap().len()
    }
}

impl LedgerStore for FakeStore {
    fn total_by_kind(&self, kind: TxKind, period: Period) -> Result<f64> {
        Ok(self
            .transactions
            .lock()
            .unwrap()
            .iter()
            .filter(|txn| txn.kind == kind && period.contains(txn.date))
            .map(|txn| txn.amount)
            .sum())
    }

    fn spent_in_category(&self, category: &str, period: Period) -> Result<f64> {
        Ok(self
            .transactions
            .lock()
            .unwrap()
            .iter()
            .filter(|txn| {
                txn.kind == TxKind::Expense
                    && txn.category == category
                    && period.contains(txn.date)
            })
            .map(|txn| txn.amount)
            .sum())
    }

    fn budget_for(&self, category: &str) -> Result<Option<Budget>> {
        Ok(self
            .budgets
            .iter()
            .find(|budget| budget.category == category)
            .cloned())
    }

    fn list_budgets(&self) -> Result<Vec<Budget>> {
        let mut budgets = self.budgets.clone();
        budgets.sort_by(|a, b| a.category.cmp(&b.category));
        Ok(budgets)
    }

    fn list_goals(&self) -> Result<Vec<Goal>> {
        Ok(self.goals.clone())
    }

    fn list_active_rules(&self) -> Result<Vec<RecurringRule>> {
        Ok(self
            .rules
            .iter()
            .filter(|rule| rule.active)
            .cloned()
            .collect())
    }

    fn transactions_on(&self, date: NaiveDate) -> Result<Vec<Transaction>> {
        Ok(self
            .transactions
            .lock()
            .unwrap()
            .iter()
            .filter(|txn| txn.date == date)
            .cloned()
            .collect())
    }

    fn insert_transaction(&self, transaction: Transaction) -> Result<()> {
        if self.fail_inserts_for.as_deref() == Some(transaction.category.as_str()) {
            return Err(CoreError::Store("simulated insert failure".into()));
        }
        self.transactions.lock().unwrap().push(transaction);
        Ok(())
    }

    fn earliest_transaction_date(&self) -> Result<Option<NaiveDate>> {
        Ok(self
            .transactions
            .lock()
            .unwrap()
            .iter()
            .map(|txn| txn.date)
            .min())
    }

    fn setting(&self, key: &str) -> Result<Option<String>> {
        Ok(self
            .settings
            .iter()
            .find(|(name, _)| name == key)
            .map(|(_, value)| value.clone()))
    }
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn period(y: i32, m: u32) -> Period {
    Period::new(y, m).unwrap()
}

fn expense(category: &str, amount: f64, on: NaiveDate) -> Transaction {
    Transaction::new(TxKind::Expense, category, amount, on)
}

fn income(category: &str, amount: f64, on: NaiveDate) -> Transaction {
    Transaction::new(TxKind::Income, category, amount, on)
}

#[test]
fn budget_status_without_a_budget_row_is_not_found() {
    let store = FakeStore::with_transactions(vec![expense("Food", 50.0, date(2025, 3, 10))]);
    let result = BudgetService::status(&store, "Food", period(2025, 3));
    assert!(matches!(result, Err(CoreError::NotFound(_))));
}

#[test]
fn budget_status_reports_progress_past_the_limit_unclamped() {
    let mut store = FakeStore::with_transactions(vec![
        expense("Food", 450.0, date(2025, 3, 5)),
        expense("Food", 150.0, date(2025, 3, 20)),
        expense("Food", 999.0, date(2025, 2, 28)), // outside the period
        expense("Travel", 80.0, date(2025, 3, 7)), // other category
    ]);
    store.budgets = vec![Budget::new("Food", 500.0)];

    let status = api_budget_status(&store, "Food", period(2025, 3)).unwrap();
    assert_eq!(status.spent, 600.0);
    assert_eq!(status.limit, 500.0);
    assert!((status.progress - 1.2).abs() < 1e-12);
}

#[test]
fn zero_limit_budgets_report_zero_progress() {
    let mut store = FakeStore::with_transactions(vec![expense("Misc", 300.0, date(2025, 3, 1))]);
    store.budgets = vec![Budget::new("Misc", 0.0)];

    let status = BudgetService::status(&store, "Misc", period(2025, 3)).unwrap();
    assert_eq!(status.progress, 0.0);
    assert_eq!(status.spent, 300.0);
}

#[test]
fn alerts_fire_at_eighty_percent_in_category_order() {
    let today = date(2025, 3, 15);
    let mut store = FakeStore::with_transactions(vec![
        expense("Food", 400.0, today),    // exactly 80%
        expense("Travel", 790.0, today),  // 79%
        expense("Rent", 1300.0, today),   // 130%
        expense("Hobby", 9999.0, today),  // zero limit, never alerts
    ]);
    store.budgets = vec![
        Budget::new("Travel", 1000.0),
        Budget::new("Rent", 1000.0),
        Budget::new("Food", 500.0),
        Budget::new("Hobby", 0.0),
    ];

    let alerts = api_budget_alerts(&store, &FixedClock(today)).unwrap();
    let labels: Vec<(&str, f64)> = alerts
        .iter()
        .map(|alert| (alert.category.as_str(), alert.percentage))
        .collect();
    assert_eq!(labels.len(), 2);
    assert_eq!(labels[0].0, "Food");
    assert!((labels[0].1 - 80.0).abs() < 1e-9);
    assert_eq!(labels[1].0, "Rent");
    assert!((labels[1].1 - 130.0).abs() < 1e-9);
}

#[test]
fn trend_rejects_an_empty_window() {
    let store = FakeStore::default();
    let result = TrendService::spending_trend(&store, "Food", 0, period(2025, 3));
    assert!(matches!(result, Err(CoreError::InvalidArgument(_))));
}

#[test]
fn trend_runs_oldest_to_newest_so_growth_is_positive() {
    let store = FakeStore::with_transactions(vec![
        expense("Food", 100.0, date(2025, 1, 10)),
        expense("Food", 200.0, date(2025, 2, 10)),
        expense("Food", 300.0, date(2025, 3, 10)),
    ]);
    let clock = FixedClock(date(2025, 3, 20));

    let estimate = api_trend(&store, &clock, "Food", 3).unwrap();
    assert!((estimate.average - 200.0).abs() < 1e-12);
    assert!((estimate.slope - 100.0).abs() < 1e-12);
}

#[test]
fn forecast_rejects_out_of_range_horizons() {
    let store = FakeStore::with_transactions(vec![income("Salary", 1.0, date(2025, 1, 1))]);
    for months_ahead in [0, 13] {
        let result = ForecastService::forecast(&store, period(2025, 3), months_ahead);
        assert!(matches!(result, Err(CoreError::InvalidArgument(_))));
    }
}

#[test]
fn forecast_on_an_empty_ledger_is_no_data() {
    let store = FakeStore::default();
    let result = ForecastService::forecast(&store, period(2025, 3), 3);
    assert!(matches!(result, Err(CoreError::NoData)));
}

#[test]
fn forecast_with_one_history_month_degrades_to_flat_averages() {
    let reference = period(2025, 3);
    let store = FakeStore::with_transactions(vec![
        income("Salary", 3000.0, date(2025, 3, 1)),
        expense("Rent", 1200.0, date(2025, 3, 2)),
    ]);

    let points = ForecastService::forecast(&store, reference, 3).unwrap();
    assert_eq!(points.len(), 3);
    for point in &points {
        assert_eq!(point.predicted_income, 3000.0);
        assert_eq!(point.predicted_expense, 1200.0);
        assert_eq!(point.predicted_balance, 1800.0);
    }
}

#[test]
fn forecast_extends_a_linear_income_trend() {
    let reference = period(2025, 6);
    let mut transactions = Vec::new();
    // Income grows by exactly 100 per month over the 6-month window.
    for (index, month) in (1..=6).enumerate() {
        transactions.push(income(
            "Salary",
            1000.0 + 100.0 * index as f64,
            date(2025, month, 15),
        ));
    }
    let store = FakeStore::with_transactions(transactions);

    let points = ForecastService::forecast(&store, reference, 2).unwrap();
    // avg = 1250, slope = 100, hist_count = 6.
    assert!((points[0].predicted_income - (1250.0 + 100.0 * 7.0)).abs() < 1e-9);
    assert!((points[1].predicted_income - (1250.0 + 100.0 * 8.0)).abs() < 1e-9);
    assert_eq!(points[0].predicted_expense, 0.0);
    assert_eq!(points[0].predicted_balance, points[0].predicted_income);
    assert_eq!(points[0].period, period(2025, 7));
    assert_eq!(points[1].period, period(2025, 8));
}

#[test]
fn forecast_floors_each_side_before_differencing() {
    let reference = period(2025, 6);
    let mut transactions = Vec::new();
    // Expenses fall steeply enough that the projection would go negative.
    for (index, month) in (1..=6).enumerate() {
        transactions.push(expense(
            "Rent",
            1000.0 - 180.0 * index as f64,
            date(2025, month, 3),
        ));
        transactions.push(income("Salary", 500.0, date(2025, month, 1)));
    }
    let store = FakeStore::with_transactions(transactions);

    let points = ForecastService::forecast(&store, reference, 3).unwrap();
    let last = points.last().unwrap();
    // avg = 550, slope = -180; at offset 9 the raw projection is -1070.
    assert_eq!(last.predicted_expense, 0.0);
    assert_eq!(last.predicted_balance, last.predicted_income);
}

#[test]
fn forecast_period_labels_roll_past_december() {
    let reference = period(2024, 11);
    let store = FakeStore::with_transactions(vec![income("Salary", 100.0, date(2024, 11, 1))]);

    let points = ForecastService::forecast(&store, reference, 3).unwrap();
    let labels: Vec<String> = points.iter().map(|p| p.period.to_string()).collect();
    assert_eq!(labels, vec!["2024-12", "2025-01", "2025-02"]);
}

#[test]
fn forecast_window_never_exceeds_six_months() {
    let reference = period(2025, 12);
    let mut transactions = Vec::new();
    for month in 1..=12 {
        transactions.push(income("Salary", 100.0 * month as f64, date(2025, month, 1)));
    }
    let store = FakeStore::with_transactions(transactions);

    // Constant-growth data: the fit only sees the last HISTORY_MONTHS points,
    // so the projected average matches that window's mean (950), not the
    // full year's (650).
    let points = ForecastService::forecast(&store, reference, 1).unwrap();
    let expected = 950.0 + 100.0 * (1.0 + HISTORY_MONTHS as f64);
    assert!((points[0].predicted_income - expected).abs() < 1e-9);
}

#[test]
fn goal_projection_matches_the_worked_example() {
    let goal = Goal::new("Emergency fund", 1200.0, 100.0, date(2024, 1, 1));
    let projection = GoalService::project(&goal).unwrap();
    assert_eq!(projection.months_needed, 12);
    assert_eq!(projection.projected_date, date(2025, 1, 1));
}

#[test]
fn goal_projection_rounds_partial_months_up_and_clamps_days() {
    let goal = Goal::new("Laptop", 1000.0, 300.0, date(2024, 10, 31));
    let projection = GoalService::project(&goal).unwrap();
    assert_eq!(projection.months_needed, 4);
    assert_eq!(projection.projected_date, date(2025, 2, 28));
}

#[test]
fn unfunded_goals_cannot_be_projected() {
    let no_saving = Goal::new("Idle", 1000.0, 0.0, date(2024, 1, 1));
    assert!(matches!(
        GoalService::project(&no_saving),
        Err(CoreError::InvalidArgument(_))
    ));
    let no_target = Goal::new("Empty", 0.0, 50.0, date(2024, 1, 1));
    assert!(matches!(
        GoalService::project(&no_target),
        Err(CoreError::InvalidArgument(_))
    ));
}

#[test]
fn processing_recurring_rules_twice_in_a_day_is_idempotent() {
    let today = date(2025, 3, 15);
    let mut store = FakeStore::default();
    store.rules = vec![
        RecurringRule::new(
            TxKind::Expense,
            "Rent",
            1200.0,
            Frequency::Monthly,
            date(2024, 1, 1),
        )
        .with_note(Note::new("apartment").unwrap()),
        RecurringRule::new(
            TxKind::Income,
            "Salary",
            3000.0,
            Frequency::Monthly,
            date(2024, 1, 1),
        ),
    ];

    let created = api_process_recurring(&store, &FixedClock(today)).unwrap();
    assert_eq!(created, 2);
    assert_eq!(store.transaction_count(), 2);

    let rent = &store.transactions_on(today).unwrap()[0];
    assert_eq!(rent.note.as_str(), "Recurring: apartment");
    assert_eq!(rent.date, today);

    let repeat = api_process_recurring(&store, &FixedClock(today)).unwrap();
    assert_eq!(repeat, 0);
    assert_eq!(store.transaction_count(), 2);
}

#[test]
fn rules_outside_their_window_or_inactive_are_not_due() {
    let today = date(2025, 3, 15);
    let mut store = FakeStore::default();
    let mut paused = RecurringRule::new(
        TxKind::Expense,
        "Gym",
        40.0,
        Frequency::Monthly,
        date(2024, 1, 1),
    );
    paused.active = false;
    store.rules = vec![
        paused,
        RecurringRule::new(
            TxKind::Expense,
            "Future",
            10.0,
            Frequency::Weekly,
            date(2025, 4, 1),
        ),
        RecurringRule::new(
            TxKind::Expense,
            "Expired",
            10.0,
            Frequency::Weekly,
            date(2024, 1, 1),
        )
        .with_end_date(date(2025, 2, 28)),
    ];

    let created = RecurrenceService::process_due(&store, today).unwrap();
    assert_eq!(created, 0);
    assert_eq!(store.transaction_count(), 0);
}

#[test]
fn a_failing_rule_does_not_abort_the_remaining_rules() {
    let today = date(2025, 3, 15);
    let mut store = FakeStore::default();
    store.fail_inserts_for = Some("Broken".into());
    store.rules = vec![
        RecurringRule::new(
            TxKind::Expense,
            "Broken",
            5.0,
            Frequency::Weekly,
            date(2024, 1, 1),
        ),
        RecurringRule::new(
            TxKind::Expense,
            "Working",
            7.0,
            Frequency::Weekly,
            date(2024, 1, 1),
        ),
    ];

    let created = RecurrenceService::process_due(&store, today).unwrap();
    assert_eq!(created, 1);
    let remaining = store.transactions_on(today).unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].category, "Working");
}

#[test]
fn duplicate_tolerance_is_configurable() {
    let today = date(2025, 3, 15);
    let mut store = FakeStore::with_transactions(vec![expense("Rent", 1200.004, today)]);
    store.rules = vec![RecurringRule::new(
        TxKind::Expense,
        "Rent",
        1200.0,
        Frequency::Monthly,
        date(2024, 1, 1),
    )];

    // Within the default 0.01 tolerance the manual entry counts as the
    // rule's materialization for today.
    let created = RecurrenceService::process_due(&store, today).unwrap();
    assert_eq!(created, 0);

    let strict = RecurrenceOptions {
        duplicate_tolerance: 0.001,
    };
    let created = RecurrenceService::process_due_with(&store, today, &strict).unwrap();
    assert_eq!(created, 1);
}

#[test]
fn period_summary_keeps_negative_balances() {
    let store = FakeStore::with_transactions(vec![
        income("Salary", 1000.0, date(2025, 3, 1)),
        expense("Rent", 1500.0, date(2025, 3, 2)),
    ]);
    let summary = api_period_summary(&store, period(2025, 3)).unwrap();
    assert_eq!(summary.income, 1000.0);
    assert_eq!(summary.expense, 1500.0);
    assert_eq!(summary.balance, -500.0);
}

#[test]
fn domain_parse_failures_convert_to_invalid_format() {
    let err = CoreError::from("2024-1".parse::<Period>().unwrap_err());
    assert!(matches!(err, CoreError::InvalidFormat(_)));
    let err = CoreError::from(moneta_domain::parse_date("bogus").unwrap_err());
    assert!(matches!(err, CoreError::InvalidFormat(_)));
}

#[test]
fn currency_symbol_defaults_to_dollar() {
    let store = FakeStore::default();
    assert_eq!(api_currency_symbol(&store).unwrap(), "$");

    let mut store = FakeStore::default();
    store.settings = vec![("currency".to_string(), "€".to_string())];
    assert_eq!(api_currency_symbol(&store).unwrap(), "€");
}
