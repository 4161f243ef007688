//! Stepper driver implementations

pub mod tmc2590;

pub use tmc2590::{Axis, SharedAxis, SpiTransport, Tmc2590};
