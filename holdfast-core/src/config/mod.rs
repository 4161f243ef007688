//! Configuration types
//!
//! Power-on defaults for an axis. Configuration lives in RAM only; the
//! shadow registers are the one copy of the chip settings.

pub mod types;

pub use types::*;
