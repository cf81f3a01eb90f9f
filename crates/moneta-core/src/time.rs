use chrono::{Local, NaiveDate};

use moneta_domain::Period;

/// Clock abstracts access to the current day so services remain
/// deterministic in tests.
pub trait Clock: Send + Sync {
    /// Returns the current local calendar day.
    fn today(&self) -> NaiveDate;

    /// Returns the period containing [`today`](Clock::today).
    fn current_period(&self) -> Period {
        Period::of(self.today())
    }
}

/// Clock backed by the system's local timezone.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// Clock pinned to a fixed day, for tests and historical replays.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}
