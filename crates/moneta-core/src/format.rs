//! Presentation-facing formatting seams and the default amount renderer.

use chrono::NaiveDate;

use crate::error::Result;
use crate::store::LedgerStore;

/// Symbol used when the store has no currency setting.
pub const DEFAULT_CURRENCY: &str = "$";

const CURRENCY_SETTING_KEY: &str = "currency";

/// Formats currency amounts for presentation.
pub trait CurrencyFormatter: Send + Sync {
    fn format_amount(&self, amount: f64, currency: &str) -> String;
}

/// Formats dates for presentation.
pub trait DateFormatter: Send + Sync {
    fn format_date(&self, date: NaiveDate) -> String;
}

/// Formatter producing `$1,234.56`-style amounts and ISO dates.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainFormatter;

impl CurrencyFormatter for PlainFormatter {
    fn format_amount(&self, amount: f64, currency: &str) -> String {
        format_amount(amount, currency)
    }
}

impl DateFormatter for PlainFormatter {
    fn format_date(&self, date: NaiveDate) -> String {
        date.format("%Y-%m-%d").to_string()
    }
}

/// Renders an amount as `<sign><currency><grouped whole>.<cents>`, grouping
/// the whole part in thousands.
pub fn format_amount(amount: f64, currency: &str) -> String {
    let negative = amount < 0.0;
    let magnitude = amount.abs();
    let mut whole = magnitude.trunc() as i64;
    let mut cents = ((magnitude - magnitude.trunc()) * 100.0).round() as i64;
    if cents == 100 {
        whole += 1;
        cents = 0;
    }

    let digits = whole.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    format!(
        "{}{}{}.{:02}",
        if negative { "-" } else { "" },
        currency,
        grouped,
        cents
    )
}

/// The configured currency symbol, falling back to [`DEFAULT_CURRENCY`]
/// when the setting is absent.
pub fn currency_symbol(store: &dyn LedgerStore) -> Result<String> {
    Ok(store
        .setting(CURRENCY_SETTING_KEY)?
        .unwrap_or_else(|| DEFAULT_CURRENCY.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_thousands_and_pads_cents() {
        assert_eq!(format_amount(1234.56, "$"), "$1,234.56");
        assert_eq!(format_amount(0.5, "€"), "€0.50");
        assert_eq!(format_amount(1_000_000.0, "$"), "$1,000,000.00");
        assert_eq!(format_amount(999.999, "$"), "$1,000.00");
    }

    #[test]
    fn sign_precedes_the_currency_symbol() {
        assert_eq!(format_amount(-1234.5, "$"), "-$1,234.50");
        assert_eq!(format_amount(-0.004, "$"), "-$0.00");
    }

    #[test]
    fn plain_formatter_implements_both_seams() {
        let formatter = PlainFormatter;
        assert_eq!(formatter.format_amount(12.0, "$"), "$12.00");
        let date = NaiveDate::from_ymd_opt(2025, 3, 9).unwrap();
        assert_eq!(formatter.format_date(date), "2025-03-09");
    }
}
