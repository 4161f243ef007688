//! Driver runtime state
//!
//! Values the host can read and write that have no home in a chip
//! register, plus the cached current scales the standstill controller
//! swaps in and out of the chip.

use crate::config::AxisConfig;

/// Runtime state of one axis
///
/// Owned by the axis; mutated by parameter writes and by the periodic
/// controllers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RuntimeState {
    /// Current scale used while running
    pub run_current: i32,
    /// Current scale used during standstill
    pub standstill_current: i32,
    /// Ticks of standstill before the standstill limit is reported
    pub standstill_timeout: i32,
    /// coolStep threshold velocity
    pub coolstep_threshold: i32,
    /// SEMIN value while coolStep is active
    pub coolstep_active_value: i32,
    /// SEMIN value while coolStep is inactive
    pub coolstep_inactive_value: i32,
    /// Current has been limited after the standstill timeout
    pub standstill_current_limit: bool,
    /// Live current exceeded the standstill current at the timeout
    pub standstill_over_current: bool,
    /// Registers are re-sent and replies rotated every tick
    pub continuous_mode: bool,
    /// Legacy value reporting
    pub compatibility_mode: bool,
}

impl RuntimeState {
    /// Build the power-on state
    ///
    /// `run_current` is the current scale found in the default register
    /// image.
    pub fn new(config: &AxisConfig, run_current: i32) -> Self {
        Self {
            run_current,
            standstill_current: i32::from(config.standstill_current),
            standstill_timeout: i32::try_from(config.standstill_timeout).unwrap_or(i32::MAX),
            coolstep_threshold: config.coolstep_threshold,
            coolstep_active_value: i32::from(config.coolstep_active_value),
            coolstep_inactive_value: i32::from(config.coolstep_inactive_value),
            standstill_current_limit: false,
            standstill_over_current: false,
            continuous_mode: config.continuous_mode,
            compatibility_mode: config.compatibility_mode,
        }
    }

    /// Forget any standstill limit, e.g. when a new move starts
    pub fn clear_standstill_flags(&mut self) {
        self.standstill_current_limit = false;
        self.standstill_over_current = false;
    }
}
