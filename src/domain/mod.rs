//! Pure domain logic — no I/O, no async.

pub mod error;
pub mod marketplace;
pub mod metrics;
pub mod statusline;
