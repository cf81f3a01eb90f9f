//! Income/expense/balance roll-up for a single period.

use moneta_domain::{Period, TxKind};

use crate::error::Result;
use crate::store::LedgerStore;

/// Historical totals for one calendar month. Unlike forecast output the
/// balance here is a plain difference and may be negative.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PeriodSummary {
    pub income: f64,
    pub expense: f64,
    pub balance: f64,
}

pub struct SummaryService;

impl SummaryService {
    pub fn summarize(store: &dyn LedgerStore, period: Period) -> Result<PeriodSummary> {
        let income = store.total_by_kind(TxKind::Income, period)?;
        let expense = store.total_by_kind(TxKind::Expense, period)?;
        Ok(PeriodSummary {
            income,
            expense,
            balance: income - expense,
        })
    }
}
