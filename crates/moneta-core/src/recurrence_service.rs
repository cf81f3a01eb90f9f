//! Materializes due recurring rules into concrete ledger transactions.

use chrono::NaiveDate;
use tracing::{debug, warn};

use moneta_domain::{Note, RecurringRule, Transaction};

use crate::error::Result;
use crate::store::LedgerStore;

const RECURRING_NOTE_PREFIX: &str = "Recurring: ";

/// Tunables for recurrence materialization.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RecurrenceOptions {
    /// Absolute amount tolerance under which a same-day transaction of the
    /// same kind and category counts as a duplicate.
    pub duplicate_tolerance: f64,
}

impl Default for RecurrenceOptions {
    fn default() -> Self {
        Self {
            duplicate_tolerance: 0.01,
        }
    }
}

/// Stateless materialization of recurring rules against the ledger store.
pub struct RecurrenceService;

impl RecurrenceService {
    /// Runs [`process_due_with`](Self::process_due_with) under the default
    /// options.
    pub fn process_due(store: &dyn LedgerStore, today: NaiveDate) -> Result<usize> {
        Self::process_due_with(store, today, &RecurrenceOptions::default())
    }

    /// Materializes at most one transaction per active, in-window rule for
    /// `today` and returns how many were created. Safe to invoke repeatedly
    /// within a day: the same-day duplicate check keeps reruns from
    /// inserting twice. A failure on one rule is logged and does not stop
    /// the remaining rules; the count reflects successful inserts only.
    pub fn process_due_with(
        store: &dyn LedgerStore,
        today: NaiveDate,
        options: &RecurrenceOptions,
    ) -> Result<usize> {
        let rules = store.list_active_rules()?;
        let mut created = 0;
        for rule in rules {
            if !rule.in_window(today) {
                continue;
            }
            // The rule's frequency is deliberately not consulted: every
            // active rule whose window contains `today` counts as due on
            // each run, and the same-day duplicate check inside the insert
            // path is the only thing keeping repeated runs idempotent.
            // Anniversary gating would change ledger contents; see DESIGN.md.
            let candidate = materialize(&rule, today);
            match store.insert_transaction_unless_similar(candidate, options.duplicate_tolerance) {
                Ok(true) => created += 1,
                Ok(false) => {
                    debug!(rule = %rule.id, "similar transaction exists today, skipping")
                }
                Err(err) => {
                    warn!(rule = %rule.id, %err, "failed to materialize recurring transaction")
                }
            }
        }
        Ok(created)
    }
}

/// Builds the concrete transaction a rule produces for the given day.
fn materialize(rule: &RecurringRule, date: NaiveDate) -> Transaction {
    Transaction::new(rule.kind, rule.category.clone(), rule.amount, date)
        .with_note(recurring_note(&rule.note))
}

/// Prefixes the rule's note, clipping to the note bound with the prefix
/// reserved; falls back to a bare marker if the bound leaves no room.
fn recurring_note(source: &Note) -> Note {
    let room = Note::MAX_LEN.saturating_sub(RECURRING_NOTE_PREFIX.len());
    if room == 0 {
        return Note::truncated("Recurring");
    }
    Note::truncated(&format!("{RECURRING_NOTE_PREFIX}{source}"))
}
