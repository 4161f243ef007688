//! Runtime state of an axis
//!
//! The current regime machine and the cached values the periodic
//! controllers and the parameter dispatcher share.

pub mod machine;
pub mod runtime;

pub use machine::{CoolStepRegion, Regime};
pub use runtime::RuntimeState;
