//! Ordinary-least-squares trend estimation over monthly spending windows.

use moneta_domain::Period;

use crate::error::Result;
use crate::store::LedgerStore;
use crate::CoreError;

/// Degenerate OLS denominators below this magnitude force the slope to zero.
const SLOPE_DENOMINATOR_EPSILON: f64 = 1e-10;

/// Mean and fitted slope of a value sequence against its position index.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrendEstimate {
    pub average: f64,
    pub slope: f64,
}

/// Fits `values` against indices `0..n`, returning the arithmetic mean and
/// the ordinary-least-squares slope. Empty input yields zeros; a single
/// value yields that value with a flat slope.
pub fn linear_trend(values: &[f64]) -> TrendEstimate {
    match values {
        [] => TrendEstimate {
            average: 0.0,
            slope: 0.0,
        },
        [single] => TrendEstimate {
            average: *single,
            slope: 0.0,
        },
        _ => {
            let n = values.len() as f64;
            let average = values.iter().sum::<f64>() / n;

            let mut x_sum = 0.0;
            let mut y_sum = 0.0;
            let mut xy_sum = 0.0;
            let mut x2_sum = 0.0;
            for (index, value) in values.iter().enumerate() {
                let x = index as f64;
                x_sum += x;
                y_sum += value;
                xy_sum += x * value;
                x2_sum += x * x;
            }
            let denominator = n * x2_sum - x_sum * x_sum;
            let slope = if denominator.abs() > SLOPE_DENOMINATOR_EPSILON {
                (n * xy_sum - x_sum * y_sum) / denominator
            } else {
                0.0
            };
            TrendEstimate { average, slope }
        }
    }
}

/// Oldest-first run of `len` consecutive periods ending at `reference`.
pub(crate) fn monthly_window(reference: Period, len: u32) -> Vec<Period> {
    (0..len)
        .rev()
        .map(|back| reference.plus(-(back as i32)))
        .collect()
}

/// Store-backed spending trend analysis for a single category.
pub struct TrendService;

impl TrendService {
    /// Fits the category's monthly expense totals over the `months_back`
    /// periods ending at `reference`, oldest first. Months without spending
    /// contribute zero.
    pub fn spending_trend(
        store: &dyn LedgerStore,
        category: &str,
        months_back: u32,
        reference: Period,
    ) -> Result<TrendEstimate> {
        if months_back < 1 {
            return Err(CoreError::InvalidArgument(
                "months_back must be at least 1".into(),
            ));
        }
        let mut values = Vec::with_capacity(months_back as usize);
        for period in monthly_window(reference, months_back) {
            values.push(store.spent_in_category(category, period)?);
        }
        Ok(linear_trend(&values))
    }

    /// Average monthly spending for the category over the window.
    pub fn category_average(
        store: &dyn LedgerStore,
        category: &str,
        months_back: u32,
        reference: Period,
    ) -> Result<f64> {
        Ok(Self::spending_trend(store, category, months_back, reference)?.average)
    }
}
