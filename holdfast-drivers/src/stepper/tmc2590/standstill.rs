//! Standstill current reduction
//!
//! The chip flags standstill in every reply. When the flag rises, the
//! current scale in use is remembered as the run current and the
//! standstill current is written; when it falls the swap is reversed.
//! Each observed edge causes exactly one swap.
//!
//! While standing still the controller also times how long the motor has
//! been held. Once the timeout elapses the axis reports the standstill
//! current limit, plus an over-current if the live scale is still above
//! the standstill scale. Those flags stay up until the next motion
//! command clears them, which also restarts the timer.

use holdfast_core::state::{Regime, RuntimeState};
use holdfast_core::traits::Transport;

use super::chip::Tmc2590;
use super::registers::CS;

/// Run/standstill current swap and standstill timer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StandstillCurrentController {
    previous: Regime,
    ticks: u32,
}

impl Default for StandstillCurrentController {
    fn default() -> Self {
        Self::new()
    }
}

impl StandstillCurrentController {
    /// Power-on state: the axis starts out standing still
    pub const fn new() -> Self {
        Self {
            previous: Regime::Standstill,
            ticks: 0,
        }
    }

    /// Regime observed on the last tick
    pub fn regime(&self) -> Regime {
        self.previous
    }

    /// Ticks spent in the current standstill (0 while running)
    pub fn standstill_ticks(&self) -> u32 {
        self.ticks
    }

    /// Return to the power-on state
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Start timing the standstill from zero again
    pub fn restart_timer(&mut self) {
        self.ticks = 0;
    }

    /// Observe the chip once
    ///
    /// Returns the new regime if the standstill flag changed.
    pub fn update<T: Transport>(
        &mut self,
        chip: &mut Tmc2590<T>,
        runtime: &mut RuntimeState,
    ) -> Option<Regime> {
        let changed = self.previous.transition(chip.is_standstill());

        if let Some(next) = changed {
            match next {
                Regime::Standstill => {
                    runtime.run_current = chip.field(&CS);
                    chip.update_field(&CS, runtime.standstill_current);
                }
                Regime::Running => {
                    runtime.standstill_current = chip.field(&CS);
                    chip.update_field(&CS, runtime.run_current);
                }
            }
            #[cfg(feature = "defmt")]
            defmt::debug!(
                "standstill: {} -> {}, CS={}",
                self.previous,
                next,
                chip.field(&CS)
            );
            self.previous = next;
            self.ticks = 0;
        }

        if self.previous.is_standstill() {
            self.monitor(chip, runtime);
        }

        changed
    }

    fn monitor<T: Transport>(&mut self, chip: &Tmc2590<T>, runtime: &mut RuntimeState) {
        self.ticks = self.ticks.saturating_add(1);

        let timeout = u32::try_from(runtime.standstill_timeout).unwrap_or(0);
        if self.ticks < timeout || runtime.standstill_current_limit {
            return;
        }

        runtime.standstill_current_limit = true;
        runtime.standstill_over_current = chip.field(&CS) > runtime.standstill_current;
        #[cfg(feature = "defmt")]
        defmt::warn!(
            "standstill: held for {} ticks, over current: {}",
            self.ticks,
            runtime.standstill_over_current
        );
    }
}
