//! Axis-parameter catalog of a TMC2590 step/dir axis
//!
//! Plain register fields resolve through the shadow store; everything
//! else names a [`Derived`] rule the axis implements.

use holdfast_core::parameter::ParameterEntry;

use super::registers::{
    CHM, DEDGE, DISS2G, HDEC, HEND, HSTRT, INTPOL, RNDTF, SDOFF, SE, SEDN, SEIMIN, SEMAX, SEUP,
    SFILT, SGT, SLPH, SLPL, TBL, TOFF, TS2G, TST, VSENSE,
};

/// Parameters that need more than a field access
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Derived {
    TargetPosition,
    ActualPosition,
    TargetSpeed,
    ActualSpeed,
    MaxSpeed,
    MaxAcceleration,
    RunCurrent,
    StandstillCurrent,
    PositionReached,
    MeasuredSpeed,
    StepDirMode,
    StepDirFrequency,
    MicrostepResolution,
    CoolStepActiveValue,
    StallVelocity,
    CoolStepThreshold,
    LoadValue,
    StatusFlags,
    PowerDownDelay,
}

/// Protocol ids
pub mod id {
    pub const TARGET_POSITION: u8 = 0;
    pub const ACTUAL_POSITION: u8 = 1;
    pub const TARGET_SPEED: u8 = 2;
    pub const ACTUAL_SPEED: u8 = 3;
    pub const MAX_SPEED: u8 = 4;
    pub const MAX_ACCELERATION: u8 = 5;
    pub const RUN_CURRENT: u8 = 6;
    pub const STANDSTILL_CURRENT: u8 = 7;
    pub const POSITION_REACHED: u8 = 8;
    /// Only known to the limits query
    pub const VELOCITY_CLASS: u8 = 24;
    pub const MEASURED_SPEED: u8 = 29;
    pub const STEP_DIR_MODE: u8 = 50;
    pub const STEP_DIR_FREQUENCY: u8 = 51;
    pub const MICROSTEP_RESOLUTION: u8 = 140;
    pub const INTERPOLATION: u8 = 160;
    pub const DOUBLE_EDGE: u8 = 161;
    pub const BLANK_TIME: u8 = 162;
    pub const CONSTANT_TOFF: u8 = 163;
    pub const FAST_DECAY: u8 = 164;
    pub const HYSTERESIS_END: u8 = 165;
    pub const HYSTERESIS_START: u8 = 166;
    pub const OFF_TIME: u8 = 167;
    pub const SE_CURRENT_MINIMUM: u8 = 168;
    pub const SE_DOWN_STEP: u8 = 169;
    pub const SE_HYSTERESIS: u8 = 170;
    pub const SE_UP_STEP: u8 = 171;
    pub const SE_HYSTERESIS_START: u8 = 172;
    pub const SG_FILTER: u8 = 173;
    pub const SG_THRESHOLD: u8 = 174;
    pub const SLOPE_HIGH: u8 = 175;
    pub const SLOPE_LOW: u8 = 176;
    pub const SHORT_PROTECTION: u8 = 177;
    pub const SHORT_TIMER: u8 = 178;
    pub const VSENSE: u8 = 179;
    pub const SE_ACTUAL_CURRENT: u8 = 180;
    pub const SE_STALL_VELOCITY: u8 = 181;
    pub const SE_THRESHOLD_SPEED: u8 = 182;
    pub const DISABLE_STEP_DIR: u8 = 183;
    pub const RANDOM_TOFF: u8 = 184;
    pub const TEST_MODE: u8 = 185;
    pub const LOAD_VALUE: u8 = 206;
    pub const STATUS_FLAGS: u8 = 208;
    pub const POWER_DOWN_DELAY: u8 = 214;
}

/// Number of catalog entries
pub const PARAMETER_COUNT: usize = 42;

/// Every parameter of the axis, sorted by id
pub static CATALOG: [ParameterEntry<Derived>; PARAMETER_COUNT] = [
    ParameterEntry::derived(id::TARGET_POSITION, Derived::TargetPosition),
    ParameterEntry::derived(id::ACTUAL_POSITION, Derived::ActualPosition),
    ParameterEntry::derived(id::TARGET_SPEED, Derived::TargetSpeed),
    ParameterEntry::derived_read_only(id::ACTUAL_SPEED, Derived::ActualSpeed),
    ParameterEntry::derived(id::MAX_SPEED, Derived::MaxSpeed),
    ParameterEntry::derived(id::MAX_ACCELERATION, Derived::MaxAcceleration),
    ParameterEntry::derived(id::RUN_CURRENT, Derived::RunCurrent),
    ParameterEntry::derived(id::STANDSTILL_CURRENT, Derived::StandstillCurrent),
    ParameterEntry::derived_read_only(id::POSITION_REACHED, Derived::PositionReached),
    ParameterEntry::derived_read_only(id::MEASURED_SPEED, Derived::MeasuredSpeed),
    ParameterEntry::derived(id::STEP_DIR_MODE, Derived::StepDirMode),
    ParameterEntry::derived(id::STEP_DIR_FREQUENCY, Derived::StepDirFrequency),
    ParameterEntry::derived(id::MICROSTEP_RESOLUTION, Derived::MicrostepResolution),
    ParameterEntry::field(id::INTERPOLATION, INTPOL),
    ParameterEntry::field(id::DOUBLE_EDGE, DEDGE),
    ParameterEntry::field(id::BLANK_TIME, TBL),
    ParameterEntry::field(id::CONSTANT_TOFF, CHM),
    ParameterEntry::field(id::FAST_DECAY, HDEC),
    ParameterEntry::field(id::HYSTERESIS_END, HEND),
    ParameterEntry::field(id::HYSTERESIS_START, HSTRT),
    ParameterEntry::field(id::OFF_TIME, TOFF),
    ParameterEntry::field(id::SE_CURRENT_MINIMUM, SEIMIN),
    ParameterEntry::field(id::SE_DOWN_STEP, SEDN),
    ParameterEntry::field(id::SE_HYSTERESIS, SEMAX),
    ParameterEntry::field(id::SE_UP_STEP, SEUP),
    ParameterEntry::derived(id::SE_HYSTERESIS_START, Derived::CoolStepActiveValue),
    ParameterEntry::field(id::SG_FILTER, SFILT),
    ParameterEntry::field(id::SG_THRESHOLD, SGT),
    ParameterEntry::field(id::SLOPE_HIGH, SLPH),
    ParameterEntry::field(id::SLOPE_LOW, SLPL),
    ParameterEntry::field(id::SHORT_PROTECTION, DISS2G),
    ParameterEntry::field(id::SHORT_TIMER, TS2G),
    ParameterEntry::field(id::VSENSE, VSENSE),
    ParameterEntry::field_read_only(id::SE_ACTUAL_CURRENT, SE),
    ParameterEntry::derived(id::SE_STALL_VELOCITY, Derived::StallVelocity),
    ParameterEntry::derived(id::SE_THRESHOLD_SPEED, Derived::CoolStepThreshold),
    ParameterEntry::field(id::DISABLE_STEP_DIR, SDOFF),
    ParameterEntry::field(id::RANDOM_TOFF, RNDTF),
    ParameterEntry::field(id::TEST_MODE, TST),
    ParameterEntry::derived_read_only(id::LOAD_VALUE, Derived::LoadValue),
    ParameterEntry::derived_read_only(id::STATUS_FLAGS, Derived::StatusFlags),
    ParameterEntry::derived(id::POWER_DOWN_DELAY, Derived::PowerDownDelay),
];
