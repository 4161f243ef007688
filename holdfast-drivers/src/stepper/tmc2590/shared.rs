//! Axis shared between execution contexts
//!
//! A single axis is usually driven from two places: the host command
//! handler and the tick interrupt or task. [`SharedAxis`] puts the whole
//! axis behind one blocking mutex so both see every operation complete.

use core::cell::RefCell;

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::blocking_mutex::Mutex;
use holdfast_core::parameter::Op;
use holdfast_core::traits::{MotionController, Transport};
use holdfast_core::ErrorFlags;

use super::axis::Axis;

/// The axis was already borrowed from the same context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AxisBusy;

/// Axis behind a blocking mutex
///
/// `R` picks the lock: `CriticalSectionRawMutex` when interrupts touch
/// the axis, `NoopRawMutex` when everything runs in one executor.
pub struct SharedAxis<R: RawMutex, T, M> {
    inner: Mutex<R, RefCell<Axis<T, M>>>,
}

impl<R: RawMutex, T: Transport, M: MotionController> SharedAxis<R, T, M> {
    /// Take ownership of an axis
    pub const fn new(axis: Axis<T, M>) -> Self {
        Self {
            inner: Mutex::new(RefCell::new(axis)),
        }
    }

    /// Run `f` with exclusive access to the axis
    ///
    /// Fails instead of panicking if called again from inside `f`.
    pub fn with<U>(&self, f: impl FnOnce(&mut Axis<T, M>) -> U) -> Result<U, AxisBusy> {
        self.inner.lock(|cell| {
            let mut axis = cell.try_borrow_mut().map_err(|_| AxisBusy)?;
            Ok(f(&mut axis))
        })
    }

    /// Read or write one parameter
    pub fn dispatch(
        &self,
        op: Op,
        id: u8,
        motor: u8,
        value: i32,
    ) -> Result<(i32, ErrorFlags), AxisBusy> {
        self.with(|axis| axis.dispatch(op, id, motor, value))
    }

    /// Run every periodic job once
    pub fn on_tick(&self, tick: u32) -> Result<(), AxisBusy> {
        self.with(|axis| axis.on_tick(tick))
    }
}
