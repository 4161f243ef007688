//! Regime classification for the periodic controllers
//!
//! Both controllers are edge-triggered: they remember the last regime they
//! observed and act only when a new observation differs from it.

/// Current regime of the motor, as reported by the chip
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Regime {
    /// Motor is stepping; run current applies
    Running,
    /// Chip reports standstill; standstill current applies
    Standstill,
}

impl Regime {
    /// Classify the chip's standstill flag
    pub fn observe(standstill: bool) -> Self {
        if standstill {
            Regime::Standstill
        } else {
            Regime::Running
        }
    }

    /// Check if this is the standstill regime
    pub fn is_standstill(&self) -> bool {
        matches!(self, Regime::Standstill)
    }

    /// Feed one observation of the standstill flag
    ///
    /// Returns the new regime when it differs from `self`, `None` when the
    /// flag is unchanged.
    pub fn transition(self, standstill: bool) -> Option<Self> {
        let next = Self::observe(standstill);
        (next != self).then_some(next)
    }
}

/// Whether the motor runs fast enough for coolStep
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CoolStepRegion {
    /// Below the threshold velocity
    Inactive,
    /// At or above the threshold velocity
    Active,
}

impl CoolStepRegion {
    /// Classify a measured velocity against the threshold
    pub fn classify(velocity: i32, threshold: i32) -> Self {
        if i64::from(velocity).abs() >= i64::from(threshold) {
            CoolStepRegion::Active
        } else {
            CoolStepRegion::Inactive
        }
    }

    /// Feed one velocity sample
    ///
    /// Returns the new region when it differs from `self`.
    pub fn transition(self, velocity: i32, threshold: i32) -> Option<Self> {
        let next = Self::classify(velocity, threshold);
        (next != self).then_some(next)
    }
}
