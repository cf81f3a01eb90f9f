use chrono::NaiveDate;

use moneta_domain::{Budget, Goal, Period, RecurringRule, Transaction, TxKind};

use crate::error::Result;

/// Abstraction over the persistent ledger consumed by every service in this
/// crate.
///
/// Implementations translate their own failures into [`CoreError::Store`];
/// the core propagates those without retrying. All read methods must be safe
/// to call concurrently. The default [`insert_transaction_unless_similar`]
/// is a non-atomic check-then-insert: callers that invoke the recurrence
/// processor from more than one thread must either serialize those calls or
/// override it with an atomic conditional insert.
///
/// [`CoreError::Store`]: crate::CoreError::Store
/// [`insert_transaction_unless_similar`]: LedgerStore::insert_transaction_unless_similar
pub trait LedgerStore: Send + Sync {
    /// Sum of amounts of the given kind dated within the period.
    fn total_by_kind(&self, kind: TxKind, period: Period) -> Result<f64>;

    /// Sum of expense amounts in the category dated within the period.
    fn spent_in_category(&self, category: &str, period: Period) -> Result<f64>;

    /// The budget row for a category, if one exists.
    fn budget_for(&self, category: &str) -> Result<Option<Budget>>;

    /// All budgets, sorted by category.
    fn list_budgets(&self) -> Result<Vec<Budget>>;

    /// All savings goals.
    fn list_goals(&self) -> Result<Vec<Goal>>;

    /// Recurring rules whose active flag is set.
    fn list_active_rules(&self) -> Result<Vec<RecurringRule>>;

    /// Transactions dated exactly on the given day.
    fn transactions_on(&self, date: NaiveDate) -> Result<Vec<Transaction>>;

    /// Persists a new transaction.
    fn insert_transaction(&self, transaction: Transaction) -> Result<()>;

    /// Inserts the transaction unless a same-day near-duplicate already
    /// exists, returning whether an insert happened.
    fn insert_transaction_unless_similar(
        &self,
        transaction: Transaction,
        tolerance: f64,
    ) -> Result<bool> {
        let existing = self.transactions_on(transaction.date)?;
        if existing
            .iter()
            .any(|candidate| similar_transaction(candidate, &transaction, tolerance))
        {
            return Ok(false);
        }
        self.insert_transaction(transaction)?;
        Ok(true)
    }

    /// Date of the oldest transaction on record, if any exist.
    fn earliest_transaction_date(&self) -> Result<Option<NaiveDate>>;

    /// Key/value settings lookup.
    fn setting(&self, key: &str) -> Result<Option<String>>;
}

/// Whether two transactions count as duplicates of one another: same kind,
/// same category, amounts within the absolute tolerance.
pub fn similar_transaction(a: &Transaction, b: &Transaction, tolerance: f64) -> bool {
    a.kind == b.kind && a.category == b.category && (a.amount - b.amount).abs() < tolerance
}
