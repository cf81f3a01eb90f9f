//! moneta-domain
//!
//! Pure domain models for the Moneta finance tracker core (transactions,
//! budgets, goals, recurring rules) plus the calendar primitives they share.
//! No I/O, no storage. Only data types and date arithmetic.

pub mod budget;
pub mod dates;
pub mod goal;
pub mod note;
pub mod period;
pub mod recurring;
pub mod transaction;

pub use budget::*;
pub use dates::*;
pub use goal::*;
pub use note::*;
pub use period::*;
pub use recurring::*;
pub use transaction::*;
