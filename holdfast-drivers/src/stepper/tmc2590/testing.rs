//! Host-side stand-ins for the chip and the motion generator

use holdfast_core::traits::{MotionController, MotionStatus, StepDirMode, Transport};

use super::registers::{self, reg, RDSEL};

/// Link error injected by [`SimulatedChip::fail_next`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinkDown;

/// Behavioural model of a TMC2590 behind its SPI port
///
/// Remembers the last datagram per register, answers with the reply
/// format selected before the datagram arrived and follows `RDSEL`.
#[derive(Debug, Default)]
pub struct SimulatedChip {
    /// Every datagram accepted, in order
    pub sent: Vec<u32>,
    /// Number of upcoming transfers to fail
    pub fail_next: u32,
    /// STST bit of the status byte
    pub standstill: bool,
    /// Microstep counter (reply 0)
    pub microstep: u32,
    /// stallGuard2 value (reply 1)
    pub stallguard: u32,
    /// Upper stallGuard2 bits (reply 2)
    pub stallguard_upper: u32,
    /// Actual coolStep current (reply 2)
    pub coolstep_current: u32,
    registers: [u32; registers::REGISTER_COUNT],
    rdsel: u8,
}

impl SimulatedChip {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last datagram received for `address` (0 if none)
    pub fn register(&self, address: u8) -> u32 {
        self.registers[usize::from(address)]
    }

    fn status(&self) -> u32 {
        if self.standstill {
            0x80
        } else {
            0x00
        }
    }

    fn reply(&self) -> u32 {
        let payload = match self.rdsel {
            0 => (self.microstep & 0x3FF) << 10,
            1 => (self.stallguard & 0x3FF) << 10,
            _ => ((self.stallguard_upper & 0x1F) << 15) | ((self.coolstep_current & 0x1F) << 10),
        };
        payload | self.status()
    }
}

impl Transport for SimulatedChip {
    type Error = LinkDown;

    fn transfer(&mut self, datagram: u32) -> Result<u32, LinkDown> {
        if self.fail_next > 0 {
            self.fail_next -= 1;
            return Err(LinkDown);
        }

        let reply = self.reply();
        let address = registers::address_of(datagram);
        self.registers[usize::from(address)] = datagram;
        if address == reg::DRVCONF {
            self.rdsel = RDSEL.get(datagram) as u8;
        }
        self.sent.push(datagram);
        Ok(reply)
    }
}

/// Motion generator that applies every command instantly
#[derive(Debug, Clone)]
pub struct SimulatedMotion {
    pub target_position: i32,
    pub actual_position: i32,
    pub target_velocity: i32,
    pub actual_velocity: i32,
    pub max_velocity: i32,
    pub acceleration: i32,
    pub max_acceleration: i32,
    pub frequency: i32,
    pub mode: StepDirMode,
    pub stallguard_threshold: i32,
    pub status: MotionStatus,
    pub ticks: u32,
    pub resets: u32,
}

impl Default for SimulatedMotion {
    fn default() -> Self {
        Self {
            target_position: 0,
            actual_position: 0,
            target_velocity: 0,
            actual_velocity: 0,
            max_velocity: 10_000,
            acceleration: 2_000,
            max_acceleration: 100_000,
            frequency: 2_000_000,
            mode: StepDirMode::Internal,
            stallguard_threshold: 0,
            status: MotionStatus::default(),
            ticks: 0,
            resets: 0,
        }
    }
}

impl MotionController for SimulatedMotion {
    fn target_position(&self) -> i32 {
        self.target_position
    }

    fn move_to(&mut self, position: i32) {
        self.target_position = position;
    }

    fn actual_position(&self) -> i32 {
        self.actual_position
    }

    fn set_actual_position(&mut self, position: i32) {
        self.actual_position = position;
    }

    fn target_velocity(&self) -> i32 {
        self.target_velocity
    }

    fn rotate(&mut self, velocity: i32) {
        self.target_velocity = velocity;
        self.actual_velocity = velocity;
    }

    fn actual_velocity(&self) -> i32 {
        self.actual_velocity
    }

    fn max_velocity(&self) -> i32 {
        self.max_velocity
    }

    fn set_max_velocity(&mut self, velocity: i32) {
        self.max_velocity = velocity;
    }

    fn acceleration(&self) -> i32 {
        self.acceleration
    }

    fn set_acceleration(&mut self, acceleration: i32) {
        self.acceleration = acceleration;
    }

    fn max_acceleration(&self) -> i32 {
        self.max_acceleration
    }

    fn frequency(&self) -> i32 {
        self.frequency
    }

    fn set_frequency(&mut self, frequency: i32) {
        self.frequency = frequency;
    }

    fn mode(&self) -> StepDirMode {
        self.mode
    }

    fn set_mode(&mut self, mode: StepDirMode) {
        self.mode = mode;
    }

    fn stallguard_threshold(&self) -> i32 {
        self.stallguard_threshold
    }

    fn set_stallguard_threshold(&mut self, velocity: i32) {
        self.stallguard_threshold = velocity;
    }

    fn status(&self) -> MotionStatus {
        self.status
    }

    fn periodic(&mut self, _tick: u32) {
        self.ticks += 1;
    }

    fn reset(&mut self) {
        *self = Self {
            resets: self.resets + 1,
            ..Self::default()
        };
    }
}
