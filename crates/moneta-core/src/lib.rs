//! moneta-core
//!
//! Analytics and scheduling services for the Moneta finance tracker: budget
//! evaluation, trend estimation, forecasting, goal projection, and recurring
//! transaction materialization. Depends on moneta-domain and reaches the
//! persistent ledger only through the [`store::LedgerStore`] contract.
//! No rendering, no direct storage interactions.

pub mod budget_service;
pub mod error;
pub mod forecast_service;
pub mod format;
pub mod goal_service;
pub mod public_api;
pub mod recurrence_service;
pub mod store;
pub mod summary_service;
pub mod time;
pub mod trend;

pub use budget_service::*;
pub use error::{CoreError, Result};
pub use forecast_service::*;
pub use goal_service::*;
pub use public_api::*;
pub use recurrence_service::*;
pub use store::LedgerStore;
pub use summary_service::*;
pub use time::{Clock, FixedClock, SystemClock};
pub use trend::*;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes the global tracing subscriber with sensible defaults.
pub fn init() {
    INIT_TRACING.call_once(|| {
        use tracing_subscriber::{fmt, EnvFilter};

        let filter =
            EnvFilter::from_default_env().add_directive("moneta_core=info".parse().unwrap());

        fmt().with_env_filter(filter).init();
    });
}

#[cfg(test)]
mod tests;
