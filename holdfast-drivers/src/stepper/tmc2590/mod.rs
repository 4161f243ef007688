//! TMC2590 stepper driver (SPI, step/dir)
//!
//! The TMC2590 is configured over SPI with 20-bit datagrams and driven
//! with step/dir pulses from a separate motion generator.
//!
//! # Layout
//!
//! - [`registers`]: register addresses, field layout, power-on image
//! - [`chip`]: shadow registers, reply tracking, continuous refresh
//! - [`spi`]: datagram framing over an SPI bus
//! - [`catalog`]: numbered axis parameters
//! - [`axis`]: parameter dispatch, motion commands, periodic jobs
//! - [`standstill`], [`coolstep`]: current controllers run every tick
//! - [`shared`]: the axis behind a mutex

pub mod axis;
pub mod catalog;
pub mod chip;
pub mod coolstep;
pub mod limits;
pub mod registers;
pub mod shared;
pub mod spi;
pub mod standstill;

#[cfg(test)]
mod testing;

pub use axis::{Axis, ParameterValue, Snapshot};
pub use chip::Tmc2590;
pub use coolstep::CoolStepThresholdController;
pub use shared::{AxisBusy, SharedAxis};
pub use spi::{EmbeddedHalSpi, SpiTransport};
pub use standstill::StandstillCurrentController;
