//! TMC2590 step/dir axis
//!
//! Owns the chip model, the motion generator and the runtime state, and
//! exposes them to host tooling as numbered axis parameters. The periodic
//! controllers run from [`Axis::on_tick`], independent of host traffic.

use heapless::Vec;
use holdfast_core::config::AxisConfig;
use holdfast_core::parameter::{self, LimitKind, Op, Rule};
use holdfast_core::state::RuntimeState;
use holdfast_core::traits::{MotionController, MotionStatus, StepDirMode, Transport};
use holdfast_core::ErrorFlags;

use super::catalog::{Derived, CATALOG, PARAMETER_COUNT};
use super::chip::Tmc2590;
use super::coolstep::CoolStepThresholdController;
use super::limits;
use super::registers::{reg, CS, MRES, SG2, SGU};
use super::standstill::StandstillCurrentController;

/// Number of motors behind one axis
pub const MOTORS: u8 = 1;

/// Driver error bits reported to the board
pub mod driver_error {
    /// Current still above the standstill current when the timeout hit
    pub const I_STS: u8 = 1 << 0;
    /// Current limited after the standstill timeout
    pub const I_TIMEOUT_STS: u8 = 1 << 1;
}

/// User function numbers
pub mod user_function {
    /// Nonzero value disables continuous mode
    pub const DISABLE_CONTINUOUS_MODE: u8 = 0;
    /// Nonzero value disables compatibility mode
    pub const DISABLE_COMPATIBILITY_MODE: u8 = 1;
    /// Returns the step/dir generator status bits
    pub const STEP_DIR_STATUS: u8 = 2;
}

/// One entry of a parameter dump
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ParameterValue {
    pub id: u8,
    pub value: i32,
}

/// Values of every readable parameter
pub type Snapshot = Vec<ParameterValue, PARAMETER_COUNT>;

fn check_motor(motor: u8) -> Result<(), ErrorFlags> {
    if motor < MOTORS {
        Ok(())
    } else {
        Err(ErrorFlags::UNKNOWN_MOTOR)
    }
}

/// MRES exponent for a microstep count, if the count is a power of two
/// from 1 to 256
fn microstep_exponent(microsteps: i32) -> Option<i32> {
    match microsteps {
        1..=256 if microsteps.count_ones() == 1 => Some(8 - microsteps.trailing_zeros() as i32),
        _ => None,
    }
}

/// A TMC2590 axis driven by a step/dir motion generator
pub struct Axis<T, M> {
    chip: Tmc2590<T>,
    motion: M,
    config: AxisConfig,
    runtime: RuntimeState,
    standstill: StandstillCurrentController,
    coolstep: CoolStepThresholdController,
}

impl<T: Transport, M: MotionController> Axis<T, M> {
    /// Bring up an axis from its configuration
    ///
    /// The chip model starts from the power-on image with the standstill
    /// current applied, since the motor is not moving yet.
    pub fn new(transport: T, motion: M, config: AxisConfig) -> Self {
        let chip = Tmc2590::new(transport, config.continuous_mode);
        let runtime = RuntimeState::new(&config, chip.field(&CS));
        let mut axis = Self {
            chip,
            motion,
            config,
            runtime,
            standstill: StandstillCurrentController::new(),
            coolstep: CoolStepThresholdController::new(),
        };
        axis.chip.update_field(&CS, axis.runtime.standstill_current);
        axis
    }

    /// Chip register model
    pub fn chip(&self) -> &Tmc2590<T> {
        &self.chip
    }

    /// Motion generator
    pub fn motion(&self) -> &M {
        &self.motion
    }

    /// Motion generator, mutably
    pub fn motion_mut(&mut self) -> &mut M {
        &mut self.motion
    }

    /// Runtime state
    pub fn runtime(&self) -> &RuntimeState {
        &self.runtime
    }

    /// Configuration the axis resets to
    pub fn config(&self) -> &AxisConfig {
        &self.config
    }

    /// Standstill controller
    pub fn standstill(&self) -> &StandstillCurrentController {
        &self.standstill
    }

    /// coolStep controller
    pub fn coolstep(&self) -> &CoolStepThresholdController {
        &self.coolstep
    }

    /// Read or write one parameter
    ///
    /// Reads return the value, writes echo the value given. On error the
    /// value is passed through unchanged.
    pub fn dispatch(&mut self, op: Op, id: u8, motor: u8, value: i32) -> (i32, ErrorFlags) {
        let result = match op {
            Op::Read => self.read_parameter(id, motor),
            Op::Write => self.write_parameter(id, motor, value).map(|()| value),
        };
        match result {
            Ok(value) => (value, ErrorFlags::NONE),
            Err(flags) => (value, flags),
        }
    }

    /// Get axis parameter
    pub fn read_parameter(&self, id: u8, motor: u8) -> Result<i32, ErrorFlags> {
        check_motor(motor)?;
        let entry = parameter::lookup(&CATALOG, id)?;
        entry.check(Op::Read)?;

        Ok(match entry.rule {
            Rule::Field(field) => self.chip.field(&field),
            Rule::Derived(rule) => self.read_derived(rule),
        })
    }

    /// Set axis parameter
    pub fn write_parameter(&mut self, id: u8, motor: u8, value: i32) -> Result<(), ErrorFlags> {
        check_motor(motor)?;
        let entry = parameter::lookup(&CATALOG, id)?;
        entry.check(Op::Write)?;

        match entry.rule {
            Rule::Field(field) => {
                self.chip.update_field(&field, value);
                Ok(())
            }
            Rule::Derived(rule) => self.write_derived(rule, value),
        }
    }

    fn read_derived(&self, rule: Derived) -> i32 {
        match rule {
            Derived::TargetPosition => self.motion.target_position(),
            Derived::ActualPosition => self.motion.actual_position(),
            Derived::TargetSpeed => self.motion.target_velocity(),
            Derived::ActualSpeed | Derived::MeasuredSpeed => self.motion.actual_velocity(),
            Derived::MaxSpeed => self.motion.max_velocity(),
            Derived::MaxAcceleration => self.motion.acceleration(),
            Derived::RunCurrent => self.runtime.run_current,
            Derived::StandstillCurrent => self.runtime.standstill_current,
            Derived::PositionReached => {
                i32::from(self.motion.status().contains(MotionStatus::TARGET_REACHED))
            }
            Derived::StepDirMode => self.motion.mode().as_raw(),
            Derived::StepDirFrequency => self.motion.frequency(),
            Derived::MicrostepResolution => 256 >> self.chip.field(&MRES).min(8),
            Derived::CoolStepActiveValue => self.runtime.coolstep_active_value,
            Derived::StallVelocity => self.motion.stallguard_threshold(),
            Derived::CoolStepThreshold => self.runtime.coolstep_threshold,
            Derived::LoadValue => {
                if self.runtime.compatibility_mode {
                    self.chip.field(&SGU) << 5
                } else {
                    self.chip.field(&SG2)
                }
            }
            Derived::StatusFlags => i32::from(self.chip.status()),
            Derived::PowerDownDelay => self.runtime.standstill_timeout,
        }
    }

    fn write_derived(&mut self, rule: Derived, value: i32) -> Result<(), ErrorFlags> {
        match rule {
            Derived::TargetPosition => self.motion.move_to(value),
            Derived::ActualPosition => self.motion.set_actual_position(value),
            Derived::TargetSpeed => self.motion.rotate(value),
            Derived::MaxSpeed => self.motion.set_max_velocity(value.saturating_abs()),
            Derived::MaxAcceleration => self.motion.set_acceleration(value),
            Derived::RunCurrent => {
                self.runtime.run_current = value;
                if !self.standstill.regime().is_standstill() {
                    self.chip.update_field(&CS, value);
                }
            }
            Derived::StandstillCurrent => {
                self.runtime.standstill_current = value;
                if self.standstill.regime().is_standstill() {
                    self.chip.update_field(&CS, value);
                }
            }
            Derived::StepDirMode => {
                let mode = StepDirMode::from_raw(value).ok_or(ErrorFlags::INVALID_VALUE)?;
                self.motion.set_mode(mode);
            }
            Derived::StepDirFrequency => self.motion.set_frequency(value),
            Derived::MicrostepResolution => {
                let exponent = microstep_exponent(value).ok_or(ErrorFlags::INVALID_VALUE)?;
                self.chip.update_field(&MRES, exponent);
            }
            Derived::CoolStepActiveValue => self.runtime.coolstep_active_value = value,
            Derived::StallVelocity => self.motion.set_stallguard_threshold(value),
            Derived::CoolStepThreshold => self.runtime.coolstep_threshold = value,
            Derived::PowerDownDelay => self.runtime.standstill_timeout = value,
            Derived::ActualSpeed
            | Derived::PositionReached
            | Derived::MeasuredSpeed
            | Derived::LoadValue
            | Derived::StatusFlags => return Err(ErrorFlags::UNSUPPORTED_DIRECTION),
        }
        Ok(())
    }

    /// Lowest accepted value of a parameter
    pub fn min_limit(&self, id: u8, motor: u8) -> Result<i32, ErrorFlags> {
        check_motor(motor)?;
        limits::limit(&self.motion, LimitKind::Min, id)
    }

    /// Highest accepted value of a parameter
    pub fn max_limit(&self, id: u8, motor: u8) -> Result<i32, ErrorFlags> {
        check_motor(motor)?;
        limits::limit(&self.motion, LimitKind::Max, id)
    }

    /// Run every periodic job once
    pub fn on_tick(&mut self, tick: u32) {
        self.standstill.update(&mut self.chip, &mut self.runtime);
        let velocity = self.motion.actual_velocity();
        self.coolstep.update(velocity, &mut self.chip, &self.runtime);
        self.chip.periodic();
        self.motion.periodic(tick);
    }

    /// Driver error bits (see [`driver_error`])
    pub fn driver_errors(&self) -> u8 {
        let mut errors = 0;
        if self.runtime.standstill_over_current {
            errors |= driver_error::I_STS;
        }
        if self.runtime.standstill_current_limit {
            errors |= driver_error::I_TIMEOUT_STS;
        }
        errors
    }

    /// Run at a constant signed velocity
    pub fn rotate(&mut self, motor: u8, velocity: i32) -> Result<(), ErrorFlags> {
        check_motor(motor)?;
        self.runtime.clear_standstill_flags();
        self.standstill.restart_timer();
        self.motion.rotate(velocity);
        Ok(())
    }

    /// Rotate in positive direction
    pub fn right(&mut self, motor: u8, velocity: i32) -> Result<(), ErrorFlags> {
        self.rotate(motor, velocity)
    }

    /// Rotate in negative direction
    pub fn left(&mut self, motor: u8, velocity: i32) -> Result<(), ErrorFlags> {
        self.rotate(motor, velocity.wrapping_neg())
    }

    /// Rotate at zero velocity
    pub fn stop(&mut self, motor: u8) -> Result<(), ErrorFlags> {
        self.rotate(motor, 0)
    }

    /// Move to an absolute position
    pub fn move_to(&mut self, motor: u8, position: i32) -> Result<(), ErrorFlags> {
        check_motor(motor)?;
        self.motion.move_to(position);
        Ok(())
    }

    /// Move relative to the actual position, returning the new target
    pub fn move_by(&mut self, motor: u8, delta: i32) -> Result<i32, ErrorFlags> {
        check_motor(motor)?;
        let target = self.motion.actual_position().wrapping_add(delta);
        self.motion.move_to(target);
        Ok(target)
    }

    /// Velocity the motor is stepping at
    pub fn measured_speed(&self, motor: u8) -> Result<i32, ErrorFlags> {
        check_motor(motor)?;
        Ok(self.motion.actual_velocity())
    }

    /// Board-specific extras (see [`user_function`])
    pub fn user_function(&mut self, kind: u8, motor: u8, value: i32) -> Result<i32, ErrorFlags> {
        check_motor(motor)?;
        match kind {
            user_function::DISABLE_CONTINUOUS_MODE => {
                self.runtime.continuous_mode = value == 0;
                self.chip.set_continuous(self.runtime.continuous_mode);
                Ok(value)
            }
            user_function::DISABLE_COMPATIBILITY_MODE => {
                self.runtime.compatibility_mode = value == 0;
                Ok(value)
            }
            user_function::STEP_DIR_STATUS => Ok(i32::from(self.motion.status().bits())),
            _ => Err(ErrorFlags::UNKNOWN_TYPE),
        }
    }

    /// Return the axis to its configured power-on state
    ///
    /// Refused while the motor is moving; returns whether the reset
    /// happened.
    pub fn reset(&mut self) -> bool {
        if self.motion.is_moving() {
            #[cfg(feature = "defmt")]
            defmt::warn!("axis: reset refused at v={}", self.motion.actual_velocity());
            return false;
        }

        self.chip.set_continuous(self.config.continuous_mode);
        self.chip.reset();
        self.runtime = RuntimeState::new(&self.config, self.chip.field(&CS));
        self.standstill.reset();
        self.coolstep.reset();
        self.chip.update_field(&CS, self.runtime.standstill_current);
        self.motion.reset();
        #[cfg(feature = "defmt")]
        defmt::debug!("axis: reset");
        true
    }

    /// Re-send every register to the chip
    pub fn restore(&mut self) -> bool {
        self.chip.restore()
    }

    /// Number of datagrams lost on the link
    pub fn link_errors(&self) -> u32 {
        self.chip.link_errors()
    }

    /// Dump every readable parameter
    pub fn snapshot(&self) -> Snapshot {
        let mut values = Snapshot::new();
        for entry in CATALOG.iter().filter(|e| e.check(Op::Read).is_ok()) {
            if let Ok(value) = self.read_parameter(entry.id, 0) {
                let value = ParameterValue {
                    id: entry.id,
                    value,
                };
                if values.push(value).is_err() {
                    break;
                }
            }
        }
        values
    }

    /// Write a raw register, bypassing the parameter catalog
    pub fn write_register(&mut self, motor: u8, address: u8, value: u32) -> Result<(), ErrorFlags> {
        check_motor(motor)?;
        if !reg::is_writable(address & !reg::WRITE_BIT) {
            return Err(ErrorFlags::INVALID_VALUE);
        }
        self.chip.write_register(address, value);
        Ok(())
    }

    /// Read a raw register or reply slot (see [`Tmc2590::read_register`])
    pub fn read_register(&mut self, motor: u8, address: u8) -> Result<u32, ErrorFlags> {
        check_motor(motor)?;
        Ok(self.chip.read_register(address))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stepper::tmc2590::catalog::id;
    use crate::stepper::tmc2590::registers::{SEMIN, SGT};
    use crate::stepper::tmc2590::testing::{SimulatedChip, SimulatedMotion};
    use holdfast_core::parameter::Access;

    type TestAxis = Axis<SimulatedChip, SimulatedMotion>;

    fn direct() -> TestAxis {
        let config = AxisConfig {
            continuous_mode: false,
            ..AxisConfig::default()
        };
        Axis::new(SimulatedChip::new(), SimulatedMotion::default(), config)
    }

    fn continuous() -> TestAxis {
        Axis::new(
            SimulatedChip::new(),
            SimulatedMotion::default(),
            AxisConfig::default(),
        )
    }

    /// Tick once with the chip reporting `standstill`
    fn tick_with(axis: &mut TestAxis, standstill: bool) {
        axis.chip.transport_mut().standstill = standstill;
        axis.chip.read_register(reg::RESPONSE0);
        axis.on_tick(0);
    }

    /// A value the parameter accepts that differs from its current one
    fn fresh_value(axis: &mut TestAxis, parameter: u8) -> i32 {
        let current = axis.read_parameter(parameter, 0).unwrap_or(0);
        match parameter {
            id::MICROSTEP_RESOLUTION => {
                if current == 64 {
                    32
                } else {
                    64
                }
            }
            id::STEP_DIR_MODE => 1 - current,
            id::SG_THRESHOLD => {
                if current == -7 {
                    9
                } else {
                    -7
                }
            }
            _ => match CATALOG.iter().find(|e| e.id == parameter).map(|e| e.rule) {
                // flip the lowest bit to stay inside the field
                Some(Rule::Field(_)) => current ^ 1,
                _ => current.wrapping_add(3),
            },
        }
    }

    #[test]
    fn test_round_trip_every_writable_id() {
        let mut axis = direct();
        for entry in CATALOG.iter().filter(|e| e.access == Access::ReadWrite) {
            let value = fresh_value(&mut axis, entry.id);
            assert_eq!(
                axis.write_parameter(entry.id, 0, value),
                Ok(()),
                "id {}",
                entry.id
            );
            assert_eq!(
                axis.read_parameter(entry.id, 0),
                Ok(value),
                "id {}",
                entry.id
            );
        }
    }

    #[test]
    fn test_max_speed_stores_magnitude() {
        let mut axis = direct();
        assert_eq!(axis.write_parameter(id::MAX_SPEED, 0, -5000), Ok(()));
        assert_eq!(axis.read_parameter(id::MAX_SPEED, 0), Ok(5000));
    }

    #[test]
    fn test_field_write_preserves_other_bits() {
        let mut axis = direct();
        let before = axis.chip().shadow().written(reg::CHOPCONF);

        assert_eq!(axis.write_parameter(id::OFF_TIME, 0, 9), Ok(()));

        let after = axis.chip().shadow().written(reg::CHOPCONF);
        assert_eq!(after & 0xF, 9);
        assert_eq!(after & !0xF, before & !0xF);
        assert_eq!(axis.chip().transport().register(reg::CHOPCONF), after);
    }

    #[test]
    fn test_microstep_resolution() {
        let mut axis = direct();
        assert_eq!(axis.read_parameter(id::MICROSTEP_RESOLUTION, 0), Ok(16));

        for (microsteps, exponent) in [(256, 0), (128, 1), (16, 4), (2, 7), (1, 8)] {
            assert_eq!(
                axis.write_parameter(id::MICROSTEP_RESOLUTION, 0, microsteps),
                Ok(())
            );
            assert_eq!(axis.chip().field(&MRES), exponent);
            assert_eq!(
                axis.read_parameter(id::MICROSTEP_RESOLUTION, 0),
                Ok(microsteps)
            );
        }
    }

    #[test]
    fn test_microstep_rejects_non_powers() {
        let mut axis = direct();
        axis.write_parameter(id::MICROSTEP_RESOLUTION, 0, 32).ok();
        let sent = axis.chip().transport().sent.len();

        for bad in [3, 0, -4, 512, 96] {
            assert_eq!(
                axis.write_parameter(id::MICROSTEP_RESOLUTION, 0, bad),
                Err(ErrorFlags::INVALID_VALUE)
            );
        }
        assert_eq!(axis.read_parameter(id::MICROSTEP_RESOLUTION, 0), Ok(32));
        assert_eq!(axis.chip().transport().sent.len(), sent);
    }

    #[test]
    fn test_stallguard_threshold_wraps() {
        let mut axis = direct();
        assert_eq!(axis.write_parameter(id::SG_THRESHOLD, 0, 70), Ok(()));
        assert_eq!(axis.read_parameter(id::SG_THRESHOLD, 0), Ok(-58));

        assert_eq!(axis.write_parameter(id::SG_THRESHOLD, 0, -64), Ok(()));
        assert_eq!(axis.read_parameter(id::SG_THRESHOLD, 0), Ok(-64));
        assert_eq!(axis.chip().field(&SGT), -64);
    }

    #[test]
    fn test_run_current_while_running_is_pushed() {
        let mut axis = direct();
        tick_with(&mut axis, false);
        assert!(!axis.standstill().regime().is_standstill());

        assert_eq!(axis.write_parameter(id::RUN_CURRENT, 0, 20), Ok(()));
        assert_eq!(axis.chip().field(&CS), 20);
        assert_eq!(axis.read_parameter(id::RUN_CURRENT, 0), Ok(20));
    }

    #[test]
    fn test_run_current_in_standstill_is_cached() {
        let mut axis = direct();
        tick_with(&mut axis, true);
        assert!(axis.standstill().regime().is_standstill());
        assert_eq!(axis.chip().field(&CS), 5);

        assert_eq!(axis.write_parameter(id::RUN_CURRENT, 0, 20), Ok(()));
        assert_eq!(axis.chip().field(&CS), 5);
        assert_eq!(axis.read_parameter(id::RUN_CURRENT, 0), Ok(20));

        // applied on the next standstill exit
        tick_with(&mut axis, false);
        assert_eq!(axis.chip().field(&CS), 20);
    }

    #[test]
    fn test_standstill_current_policy() {
        let mut axis = direct();
        tick_with(&mut axis, true);
        assert_eq!(axis.write_parameter(id::STANDSTILL_CURRENT, 0, 8), Ok(()));
        assert_eq!(axis.chip().field(&CS), 8);

        tick_with(&mut axis, false);
        assert_eq!(axis.chip().field(&CS), 31);
        assert_eq!(axis.write_parameter(id::STANDSTILL_CURRENT, 0, 3), Ok(()));
        assert_eq!(axis.chip().field(&CS), 31);
        assert_eq!(axis.read_parameter(id::STANDSTILL_CURRENT, 0), Ok(3));
    }

    #[test]
    fn test_read_only_ids_reject_writes() {
        let mut axis = direct();
        axis.motion_mut().actual_velocity = 123;

        for id in [3, 8, 29, 180, 206, 208] {
            let shadow = axis.chip().shadow().clone();
            let sent = axis.chip().transport().sent.len();
            let before = axis.read_parameter(id, 0);

            assert_eq!(
                axis.write_parameter(id, 0, 42),
                Err(ErrorFlags::UNSUPPORTED_DIRECTION),
                "id {}",
                id
            );
            assert_eq!(axis.read_parameter(id, 0), before);
            assert_eq!(axis.chip().transport().sent.len(), sent);
            for address in 0..8 {
                assert_eq!(axis.chip().shadow().written(address), shadow.written(address));
            }
        }
        assert_eq!(axis.motion().actual_velocity, 123);
    }

    #[test]
    fn test_unknown_motor_for_every_id() {
        let mut axis = direct();
        for motor in [1, 2, 255] {
            for id in 0..=255u8 {
                assert_eq!(
                    axis.read_parameter(id, motor),
                    Err(ErrorFlags::UNKNOWN_MOTOR)
                );
                assert_eq!(
                    axis.write_parameter(id, motor, 1),
                    Err(ErrorFlags::UNKNOWN_MOTOR)
                );
            }
        }
        assert!(axis.chip().transport().sent.len() <= 1);
    }

    #[test]
    fn test_unknown_ids() {
        let mut axis = direct();
        for id in [9, 24, 100, 186, 255] {
            assert_eq!(axis.read_parameter(id, 0), Err(ErrorFlags::UNKNOWN_TYPE));
            assert_eq!(
                axis.write_parameter(id, 0, 0),
                Err(ErrorFlags::UNKNOWN_TYPE)
            );
        }
    }

    #[test]
    fn test_dispatch() {
        let mut axis = direct();
        assert_eq!(
            axis.dispatch(Op::Write, id::OFF_TIME, 0, 6),
            (6, ErrorFlags::NONE)
        );
        assert_eq!(
            axis.dispatch(Op::Read, id::OFF_TIME, 0, 0),
            (6, ErrorFlags::NONE)
        );
        assert_eq!(
            axis.dispatch(Op::Write, id::ACTUAL_SPEED, 0, 6),
            (6, ErrorFlags::UNSUPPORTED_DIRECTION)
        );
        assert_eq!(
            axis.dispatch(Op::Read, 0, 1, 0),
            (0, ErrorFlags::UNKNOWN_MOTOR)
        );
    }

    #[test]
    fn test_load_value_modes() {
        let mut axis = direct();
        axis.chip.transport_mut().stallguard = 0x3A5;
        axis.chip.transport_mut().stallguard_upper = 0x1D;
        axis.chip.read_register(reg::RESPONSE1);
        axis.chip.read_register(reg::RESPONSE2);

        assert_eq!(axis.read_parameter(id::LOAD_VALUE, 0), Ok(0x1D << 5));

        assert_eq!(
            axis.user_function(user_function::DISABLE_COMPATIBILITY_MODE, 0, 1),
            Ok(1)
        );
        assert_eq!(axis.read_parameter(id::LOAD_VALUE, 0), Ok(0x3A5));
    }

    #[test]
    fn test_reply_parameters() {
        let mut axis = direct();
        axis.chip.transport_mut().coolstep_current = 17;
        axis.chip.transport_mut().standstill = true;
        axis.chip.read_register(reg::RESPONSE2);

        assert_eq!(axis.read_parameter(id::SE_ACTUAL_CURRENT, 0), Ok(17));
        assert_eq!(axis.read_parameter(id::STATUS_FLAGS, 0), Ok(0x80));
    }

    #[test]
    fn test_position_reached_flag() {
        let mut axis = direct();
        assert_eq!(axis.read_parameter(id::POSITION_REACHED, 0), Ok(0));
        axis.motion_mut().status = MotionStatus::TARGET_REACHED;
        assert_eq!(axis.read_parameter(id::POSITION_REACHED, 0), Ok(1));
    }

    #[test]
    fn test_step_dir_mode_validation() {
        let mut axis = direct();
        assert_eq!(
            axis.write_parameter(id::STEP_DIR_MODE, 0, 2),
            Err(ErrorFlags::INVALID_VALUE)
        );
        assert_eq!(axis.motion().mode, StepDirMode::Internal);
    }

    #[test]
    fn test_coolstep_on_tick() {
        let mut axis = direct();
        axis.write_parameter(id::SE_THRESHOLD_SPEED, 0, 500).ok();
        axis.write_parameter(id::SE_HYSTERESIS_START, 0, 3).ok();

        axis.motion_mut().actual_velocity = 100;
        axis.on_tick(1);
        assert_eq!(axis.chip().field(&SEMIN), 2);

        axis.motion_mut().actual_velocity = -600;
        axis.on_tick(2);
        assert_eq!(axis.chip().field(&SEMIN), 3);

        axis.motion_mut().actual_velocity = 0;
        axis.on_tick(3);
        assert_eq!(axis.chip().field(&SEMIN), 0);
        assert_eq!(axis.motion().ticks, 3);
    }

    #[test]
    fn test_limits() {
        let axis = direct();
        assert_eq!(axis.max_limit(id::TARGET_SPEED, 0), Ok(2_000_000));
        assert_eq!(axis.min_limit(id::MAX_ACCELERATION, 0), Ok(0));
        assert_eq!(axis.max_limit(id::MAX_ACCELERATION, 0), Ok(100_000));
        assert_eq!(
            axis.max_limit(id::RUN_CURRENT, 0),
            Err(ErrorFlags::UNKNOWN_TYPE)
        );
        assert_eq!(
            axis.min_limit(id::TARGET_SPEED, 1),
            Err(ErrorFlags::UNKNOWN_MOTOR)
        );
    }

    #[test]
    fn test_standstill_timeout_reported_and_cleared() {
        let mut axis = direct();
        axis.write_parameter(id::POWER_DOWN_DELAY, 0, 2).ok();
        tick_with(&mut axis, true);
        assert_eq!(axis.driver_errors(), 0);
        tick_with(&mut axis, true);
        assert_eq!(axis.driver_errors(), driver_error::I_TIMEOUT_STS);

        assert_eq!(axis.stop(0), Ok(()));
        assert_eq!(axis.driver_errors(), 0);
    }

    #[test]
    fn test_standstill_timeout_restarts_after_clear() {
        let mut axis = direct();
        axis.write_parameter(id::POWER_DOWN_DELAY, 0, 2).ok();
        tick_with(&mut axis, true);
        tick_with(&mut axis, true);
        assert_eq!(axis.driver_errors(), driver_error::I_TIMEOUT_STS);

        // motor still reported standing: the limit needs a full timeout again
        assert_eq!(axis.stop(0), Ok(()));
        tick_with(&mut axis, true);
        assert_eq!(axis.driver_errors(), 0);
        assert_eq!(axis.standstill().standstill_ticks(), 1);
        tick_with(&mut axis, true);
        assert_eq!(axis.driver_errors(), driver_error::I_TIMEOUT_STS);
    }

    #[test]
    fn test_motion_commands() {
        let mut axis = direct();
        assert_eq!(axis.right(0, 300), Ok(()));
        assert_eq!(axis.motion().target_velocity, 300);
        assert_eq!(axis.left(0, 300), Ok(()));
        assert_eq!(axis.motion().target_velocity, -300);
        assert_eq!(axis.measured_speed(0), Ok(-300));
        assert_eq!(axis.stop(0), Ok(()));
        assert_eq!(axis.motion().target_velocity, 0);

        axis.motion_mut().actual_position = 1000;
        assert_eq!(axis.move_by(0, -250), Ok(750));
        assert_eq!(axis.motion().target_position, 750);
        assert_eq!(axis.move_to(0, 42), Ok(()));
        assert_eq!(axis.motion().target_position, 42);

        assert_eq!(axis.rotate(1, 5), Err(ErrorFlags::UNKNOWN_MOTOR));
        assert_eq!(axis.move_by(1, 5), Err(ErrorFlags::UNKNOWN_MOTOR));
    }

    #[test]
    fn test_user_functions() {
        let mut axis = continuous();
        assert!(axis.chip().is_continuous());

        assert_eq!(
            axis.user_function(user_function::DISABLE_CONTINUOUS_MODE, 0, 1),
            Ok(1)
        );
        assert!(!axis.chip().is_continuous());
        assert!(!axis.runtime().continuous_mode);

        axis.motion_mut().status = MotionStatus::STALLED;
        assert_eq!(
            axis.user_function(user_function::STEP_DIR_STATUS, 0, 0),
            Ok(0x04)
        );
        assert_eq!(axis.user_function(7, 0, 0), Err(ErrorFlags::UNKNOWN_TYPE));
    }

    #[test]
    fn test_reset_refused_while_moving() {
        let mut axis = direct();
        axis.write_parameter(id::OFF_TIME, 0, 9).ok();
        axis.rotate(0, 100).ok();

        assert!(!axis.reset());
        assert_eq!(axis.read_parameter(id::OFF_TIME, 0), Ok(9));
        assert_eq!(axis.motion().resets, 0);
    }

    #[test]
    fn test_reset_restores_defaults() {
        let mut axis = direct();
        axis.write_parameter(id::OFF_TIME, 0, 9).ok();
        axis.write_parameter(id::POWER_DOWN_DELAY, 0, 10).ok();
        axis.user_function(user_function::DISABLE_COMPATIBILITY_MODE, 0, 1)
            .ok();
        tick_with(&mut axis, false);

        assert!(axis.reset());
        assert_eq!(axis.read_parameter(id::OFF_TIME, 0), Ok(4));
        assert_eq!(axis.read_parameter(id::POWER_DOWN_DELAY, 0), Ok(1000));
        assert_eq!(axis.read_parameter(id::RUN_CURRENT, 0), Ok(31));
        assert!(axis.runtime().compatibility_mode);
        assert!(axis.standstill().regime().is_standstill());
        assert_eq!(axis.chip().field(&CS), 5);
        assert_eq!(axis.motion().resets, 1);
        // image reached the chip
        assert_eq!(axis.chip().transport().register(reg::CHOPCONF), 0x9_01B4);
    }

    #[test]
    fn test_continuous_mode_writes_on_tick() {
        let mut axis = continuous();
        axis.write_parameter(id::OFF_TIME, 0, 9).ok();
        assert!(axis.chip().transport().sent.is_empty());

        for tick in 0..5 {
            axis.on_tick(tick);
        }
        assert_eq!(axis.chip().transport().register(reg::CHOPCONF) & 0xF, 9);
    }

    #[test]
    fn test_snapshot_covers_catalog() {
        let mut axis = direct();
        axis.write_parameter(id::OFF_TIME, 0, 11).ok();

        let snapshot = axis.snapshot();
        assert_eq!(snapshot.len(), PARAMETER_COUNT);
        assert!(snapshot.contains(&ParameterValue {
            id: id::OFF_TIME,
            value: 11
        }));
        assert!(snapshot.contains(&ParameterValue {
            id: id::MICROSTEP_RESOLUTION,
            value: 16
        }));
    }

    #[test]
    fn test_raw_register_access() {
        let mut axis = direct();
        assert_eq!(axis.write_register(0, reg::CHOPCONF, 0x1_2345), Ok(()));
        assert_eq!(
            axis.read_register(0, reg::CHOPCONF | reg::WRITE_BIT),
            Ok(0x9_2345)
        );
        assert_eq!(
            axis.write_register(0, reg::RESPONSE2, 0),
            Err(ErrorFlags::INVALID_VALUE)
        );
        assert_eq!(
            axis.read_register(1, reg::RESPONSE0),
            Err(ErrorFlags::UNKNOWN_MOTOR)
        );
    }

    #[test]
    fn test_link_errors_are_counted() {
        let mut axis = direct();
        axis.chip.transport_mut().fail_next = 2;
        axis.write_parameter(id::OFF_TIME, 0, 9).ok();
        axis.write_parameter(id::BLANK_TIME, 0, 1).ok();

        assert_eq!(axis.link_errors(), 2);
        assert_eq!(axis.read_parameter(id::OFF_TIME, 0), Ok(9));
        assert!(axis.restore());
        assert_eq!(axis.chip().transport().register(reg::CHOPCONF) & 0xF, 9);
    }
}
