//! Step/dir motion collaborator
//!
//! The axis never generates step pulses itself. Positions, velocities and
//! ramp settings belong to a motion generator behind this trait; the axis
//! only forwards parameter traffic to it and samples its velocity and
//! status once per tick.

/// Status bits reported by the motion generator
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MotionStatus(u8);

impl MotionStatus {
    /// Last move was cancelled
    pub const CANCELED: Self = Self(0x01);
    /// Emergency stop is active
    pub const EMERGENCY_STOP: Self = Self(0x02);
    /// Motor stalled
    pub const STALLED: Self = Self(0x04);
    /// Target position reached
    pub const TARGET_REACHED: Self = Self(0x08);
    /// Stall detection is armed
    pub const STALLGUARD_ACTIVE: Self = Self(0x10);

    /// Build from raw bits
    pub const fn from_bits(bits: u8) -> Self {
        Self(bits)
    }

    /// Raw bits
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// True if every bit of `other` is set
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Combine two status sets
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }
}

/// Source of step pulses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StepDirMode {
    /// Pulses generated by the local ramp generator
    Internal,
    /// Pulses supplied by an external motion controller
    External,
}

impl StepDirMode {
    /// Decode the protocol value (0 = internal, 1 = external)
    pub fn from_raw(value: i32) -> Option<Self> {
        match value {
            0 => Some(StepDirMode::Internal),
            1 => Some(StepDirMode::External),
            _ => None,
        }
    }

    /// Protocol value
    pub fn as_raw(self) -> i32 {
        match self {
            StepDirMode::Internal => 0,
            StepDirMode::External => 1,
        }
    }
}

/// Trait for step/dir motion generators
///
/// Units are whatever the generator uses (microsteps, microsteps per
/// second, ...); the axis passes values through untouched.
pub trait MotionController {
    /// Position the current move is heading for
    fn target_position(&self) -> i32;

    /// Start a move to an absolute position
    fn move_to(&mut self, position: i32);

    /// Current position
    fn actual_position(&self) -> i32;

    /// Redefine the current position without moving
    fn set_actual_position(&mut self, position: i32);

    /// Commanded velocity
    fn target_velocity(&self) -> i32;

    /// Run at a constant signed velocity (0 stops)
    fn rotate(&mut self, velocity: i32);

    /// Velocity the motor is stepping at right now
    fn actual_velocity(&self) -> i32;

    /// Velocity ceiling for moves
    fn max_velocity(&self) -> i32;

    /// Set the velocity ceiling for moves
    fn set_max_velocity(&mut self, velocity: i32);

    /// Ramp acceleration
    fn acceleration(&self) -> i32;

    /// Set the ramp acceleration
    fn set_acceleration(&mut self, acceleration: i32);

    /// Highest acceleration the generator supports
    fn max_acceleration(&self) -> i32;

    /// Step interrupt frequency, which also bounds the step rate
    fn frequency(&self) -> i32;

    /// Set the step interrupt frequency
    fn set_frequency(&mut self, frequency: i32);

    /// Pulse source
    fn mode(&self) -> StepDirMode;

    /// Select the pulse source
    fn set_mode(&mut self, mode: StepDirMode);

    /// Velocity above which stall detection stops the motor
    fn stallguard_threshold(&self) -> i32;

    /// Set the stall detection velocity
    fn set_stallguard_threshold(&mut self, velocity: i32);

    /// Status bits
    fn status(&self) -> MotionStatus;

    /// Advance the generator by one scheduler tick
    fn periodic(&mut self, tick: u32);

    /// Return to power-on state
    fn reset(&mut self);

    /// Check if the motor is stepping
    fn is_moving(&self) -> bool {
        self.actual_velocity() != 0
    }
}
