//! coolStep threshold switching
//!
//! coolStep is only useful above some velocity. Each tick the measured
//! velocity is classified against the threshold; on every change of
//! region the matching SEMIN value is written, and nothing otherwise.

use holdfast_core::state::{CoolStepRegion, RuntimeState};
use holdfast_core::traits::Transport;

use super::chip::Tmc2590;
use super::registers::SEMIN;

/// Edge-triggered SEMIN switch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CoolStepThresholdController {
    previous: CoolStepRegion,
}

impl Default for CoolStepThresholdController {
    fn default() -> Self {
        Self::new()
    }
}

impl CoolStepThresholdController {
    /// Power-on state: coolStep inactive
    pub const fn new() -> Self {
        Self {
            previous: CoolStepRegion::Inactive,
        }
    }

    /// Region observed on the last tick
    pub fn region(&self) -> CoolStepRegion {
        self.previous
    }

    /// Return to the power-on state
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Classify one velocity sample
    ///
    /// Returns the new region if it changed.
    pub fn update<T: Transport>(
        &mut self,
        velocity: i32,
        chip: &mut Tmc2590<T>,
        runtime: &RuntimeState,
    ) -> Option<CoolStepRegion> {
        let next = self
            .previous
            .transition(velocity, runtime.coolstep_threshold)?;

        let value = match next {
            CoolStepRegion::Active => runtime.coolstep_active_value,
            CoolStepRegion::Inactive => runtime.coolstep_inactive_value,
        };
        chip.update_field(&SEMIN, value);
        #[cfg(feature = "defmt")]
        defmt::debug!("coolstep: {} at v={}, SEMIN={}", next, velocity, value);

        self.previous = next;
        Some(next)
    }
}
