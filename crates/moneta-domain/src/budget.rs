//! Monthly spending limits keyed by category.

use serde::{Deserialize, Serialize};

/// A monthly spending limit for one category.
///
/// The category doubles as the identity: stores keep at most one budget per
/// category and replace the limit wholesale on upsert.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Budget {
    pub category: String,
    pub monthly_limit: f64,
}

impl Budget {
    pub fn new(category: impl Into<String>, monthly_limit: f64) -> Self {
        Self {
            category: category.into(),
            monthly_limit,
        }
    }
}
