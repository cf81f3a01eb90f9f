use std::result::Result as StdResult;

use thiserror::Error;

use moneta_domain::{DateParseError, NoteError, PeriodParseError};

/// Unified error type for the analytics core.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("invalid format: {0}")]
    InvalidFormat(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("no historical data available")]
    NoData,
    #[error("store error: {0}")]
    Store(String),
}

pub type Result<T> = StdResult<T, CoreError>;

impl From<PeriodParseError> for CoreError {
    fn from(err: PeriodParseError) -> Self {
        CoreError::InvalidFormat(err.to_string())
    }
}

impl From<DateParseError> for CoreError {
    fn from(err: DateParseError) -> Self {
        CoreError::InvalidFormat(err.to_string())
    }
}

impl From<NoteError> for CoreError {
    fn from(err: NoteError) -> Self {
        CoreError::InvalidArgument(err.to_string())
    }
}
