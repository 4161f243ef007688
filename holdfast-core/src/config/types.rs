//! Configuration type definitions

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Standstill current scale applied after power-on
pub const DEFAULT_STANDSTILL_CURRENT: u8 = 5;

/// Standstill timeout in scheduler ticks
pub const DEFAULT_STANDSTILL_TIMEOUT: u32 = 1000;

/// Axis configuration
///
/// Everything here is restored by a reset of the axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AxisConfig {
    /// Current scale (0-31) while the motor stands still
    pub standstill_current: u8,
    /// Ticks of standstill before the standstill limit is reported
    pub standstill_timeout: u32,
    /// |velocity| at and above which coolStep is considered active
    pub coolstep_threshold: i32,
    /// SEMIN value written when entering the coolStep region
    pub coolstep_active_value: u8,
    /// SEMIN value written when leaving the coolStep region
    pub coolstep_inactive_value: u8,
    /// Keep re-sending all registers and rotating replies every tick
    pub continuous_mode: bool,
    /// Report values the way the legacy evaluation tool expects them
    pub compatibility_mode: bool,
}

impl Default for AxisConfig {
    fn default() -> Self {
        Self {
            standstill_current: DEFAULT_STANDSTILL_CURRENT,
            standstill_timeout: DEFAULT_STANDSTILL_TIMEOUT,
            coolstep_threshold: 0,
            coolstep_active_value: 0,
            coolstep_inactive_value: 0,
            continuous_mode: true,
            compatibility_mode: true,
        }
    }
}
