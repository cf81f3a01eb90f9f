//! moneta-storage-memory
//!
//! In-memory [`LedgerStore`] implementation. Backs the integration test
//! suites and embedders that do not need durable persistence; real
//! applications substitute a database-backed store behind the same trait.

use std::collections::{BTreeMap, HashMap};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::NaiveDate;
use tracing::debug;

use moneta_core::store::{similar_transaction, LedgerStore};
use moneta_core::{CoreError, Result};
use moneta_domain::{Budget, Goal, Period, RecurringRule, Transaction, TxKind};

#[derive(Debug, Default)]
struct Tables {
    transactions: Vec<Transaction>,
    budgets: BTreeMap<String, Budget>,
    goals: Vec<Goal>,
    rules: Vec<RecurringRule>,
    settings: HashMap<String, String>,
}

/// Thread-safe in-memory ledger store.
///
/// A single `RwLock` guards every table, which makes the conditional-insert
/// override atomic: the duplicate scan and the insert happen under one
/// write guard, preserving the at-most-one-per-day recurrence guarantee
/// under concurrent callers.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a transaction. Alias for the trait's insert, convenient when
    /// seeding.
    pub fn add_transaction(&self, transaction: Transaction) -> Result<()> {
        self.insert_transaction(transaction)
    }

    /// Inserts or replaces the budget for its category; last write wins.
    pub fn upsert_budget(&self, budget: Budget) -> Result<()> {
        let mut tables = self.write_guard()?;
        tables.budgets.insert(budget.category.clone(), budget);
        Ok(())
    }

    /// Removes the budget for a category, reporting whether one existed.
    pub fn remove_budget(&self, category: &str) -> Result<bool> {
        let mut tables = self.write_guard()?;
        Ok(tables.budgets.remove(category).is_some())
    }

    pub fn add_goal(&self, goal: Goal) -> Result<()> {
        let mut tables = self.write_guard()?;
        tables.goals.push(goal);
        Ok(())
    }

    pub fn add_rule(&self, rule: RecurringRule) -> Result<()> {
        let mut tables = self.write_guard()?;
        tables.rules.push(rule);
        Ok(())
    }

    pub fn set_setting(&self, key: impl Into<String>, value: impl Into<String>) -> Result<()> {
        let mut tables = self.write_guard()?;
        tables.settings.insert(key.into(), value.into());
        Ok(())
    }

    pub fn transaction_count(&self) -> Result<usize> {
        Ok(self.read_guard()?.transactions.len())
    }

    fn read_guard(&self) -> Result<RwLockReadGuard<'_, Tables>> {
        self.tables
            .read()
            .map_err(|_| CoreError::Store("ledger store lock poisoned".into()))
    }

    fn write_guard(&self) -> Result<RwLockWriteGuard<'_, Tables>> {
        self.tables
            .write()
            .map_err(|_| CoreError::Store("ledger store lock poisoned".into()))
    }
}

impl LedgerStore for MemoryStore {
    fn total_by_kind(&self, kind: TxKind, period: Period) -> Result<f64> {
        let tables = self.read_guard()?;
        Ok(tables
            .transactions
            .iter()
            .filter(|txn| txn.kind == kind && period.contains(txn.date))
            .map(|txn| txn.amount)
            .sum())
    }

    fn spent_in_category(&self, category: &str, period: Period) -> Result<f64> {
        let tables = self.read_guard()?;
        Ok(tables
            .transactions
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
        let tables = self.read_guard()?;
        Ok(tables.budgets.get(category).cloned())
    }

    fn list_budgets(&self) -> Result<Vec<Budget>> {
        let tables = self.read_guard()?;
        // BTreeMap iteration keeps the category-sorted listing order.
        Ok(tables.budgets.values().cloned().collect())
    }

    fn list_goals(&self) -> Result<Vec<Goal>> {
        let tables = self.read_guard()?;
        Ok(tables.goals.clone())
    }

    fn list_active_rules(&self) -> Result<Vec<RecurringRule>> {
        let tables = self.read_guard()?;
        Ok(tables
            .rules
            .iter()
            .filter(|rule| rule.active)
            .cloned()
            .collect())
    }

    fn transactions_on(&self, date: NaiveDate) -> Result<Vec<Transaction>> {
        let tables = self.read_guard()?;
        Ok(tables
            .transactions
            .iter()
            .filter(|txn| txn.date == date)
            .cloned()
            .collect())
    }

    fn insert_transaction(&self, transaction: Transaction) -> Result<()> {
        let mut tables = self.write_guard()?;
        tables.transactions.push(transaction);
        Ok(())
    }

    fn insert_transaction_unless_similar(
        &self,
        transaction: Transaction,
        tolerance: f64,
    ) -> Result<bool> {
        let mut tables = self.write_guard()?;
        let duplicate = tables
            .transactions
            .iter()
            .filter(|txn| txn.date == transaction.date)
            .any(|txn| similar_transaction(txn, &transaction, tolerance));
        if duplicate {
            debug!(category = %transaction.category, date = %transaction.date,
                "conditional insert found a same-day duplicate");
            return Ok(false);
        }
        tables.transactions.push(transaction);
        Ok(true)
    }

    fn earliest_transaction_date(&self) -> Result<Option<NaiveDate>> {
        let tables = self.read_guard()?;
        Ok(tables.transactions.iter().map(|txn| txn.date).min())
    }

    fn setting(&self, key: &str) -> Result<Option<String>> {
        let tables = self.read_guard()?;
        Ok(tables.settings.get(key).cloned())
    }
}
