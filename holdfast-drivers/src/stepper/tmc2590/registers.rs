//! TMC2590 register map
//!
//! Every datagram is 20 bits. Bits 19..17 carry the register address
//! (DRVCTRL only needs bit 19 clear), the remaining bits are settings.
//! The chip answers each datagram with one of three reply formats,
//! chosen by `DRVCONF.RDSEL` at the time the datagram is clocked in.

use holdfast_core::Field;

/// Datagram width in bits
pub const DATAGRAM_BITS: u32 = 20;

/// Mask of a complete datagram
pub const DATAGRAM_MASK: u32 = (1 << DATAGRAM_BITS) - 1;

/// Number of shadow slots (written registers share slots 0..=3 with replies)
pub const REGISTER_COUNT: usize = 8;

/// Register addresses
pub mod reg {
    /// Driver control (step/dir mode)
    pub const DRVCTRL: u8 = 0;
    /// Chopper configuration
    pub const CHOPCONF: u8 = 4;
    /// coolStep (smartEnergy) configuration
    pub const SMARTEN: u8 = 5;
    /// stallGuard2 and current scale
    pub const SGCSCONF: u8 = 6;
    /// Driver configuration
    pub const DRVCONF: u8 = 7;

    /// Reply 0: microstep position
    pub const RESPONSE0: u8 = 0;
    /// Reply 1: stallGuard2 value
    pub const RESPONSE1: u8 = 1;
    /// Reply 2: stallGuard2 upper bits and coolStep current
    pub const RESPONSE2: u8 = 2;
    /// Reply 3: reserved
    pub const RESPONSE3: u8 = 3;

    /// Set on a raw register address to select the written half
    pub const WRITE_BIT: u8 = 0x08;

    /// Registers in the order they are refreshed
    pub const WRITABLE: [u8; 5] = [DRVCTRL, CHOPCONF, SMARTEN, SGCSCONF, DRVCONF];

    /// Check if `address` names a writable register
    pub fn is_writable(address: u8) -> bool {
        WRITABLE.contains(&address)
    }
}

/// Power-on register image, indexed by the order of [`reg::WRITABLE`]
///
/// 16 microsteps with interpolation, spreadCycle with TOFF=4, coolStep
/// minimum of 2, filtered stallGuard at full current scale and reply 1
/// selected.
pub const DEFAULT_REGISTERS: [(u8, u32); 5] = [
    (reg::DRVCTRL, 0x0_0204),
    (reg::CHOPCONF, 0x9_01B4),
    (reg::SMARTEN, 0xA_8202),
    (reg::SGCSCONF, 0xD_001F),
    (reg::DRVCONF, 0xE_F010),
];

/// Mask `value` to a datagram and put the address bits of `address` in it
pub fn tag(address: u8, value: u32) -> u32 {
    let value = value & DATAGRAM_MASK;
    if address == reg::DRVCTRL {
        value & 0x3_FFFF
    } else {
        (value & 0x1_FFFF) | (u32::from(address & 0x07) << 17)
    }
}

/// Register address carried by a datagram
pub fn address_of(datagram: u32) -> u8 {
    if datagram & (1 << 19) == 0 {
        reg::DRVCTRL
    } else {
        ((datagram >> 17) & 0x07) as u8
    }
}

// DRVCTRL
/// Enable step interpolation to 256 microsteps
pub const INTPOL: Field = Field::new(reg::DRVCTRL, 0x200, 9);
/// Step on both edges
pub const DEDGE: Field = Field::new(reg::DRVCTRL, 0x100, 8);
/// Microstep resolution, log2(256 / microsteps)
pub const MRES: Field = Field::new(reg::DRVCTRL, 0xF, 0);

// CHOPCONF
/// Blanking time
pub const TBL: Field = Field::new(reg::CHOPCONF, 0x1_8000, 15);
/// Chopper mode (constant tOff)
pub const CHM: Field = Field::new(reg::CHOPCONF, 0x4000, 14);
/// Random tOff
pub const RNDTF: Field = Field::new(reg::CHOPCONF, 0x2000, 13);
/// Hysteresis decrement / fast decay comparator
pub const HDEC: Field = Field::new(reg::CHOPCONF, 0x1800, 11);
/// Hysteresis end
pub const HEND: Field = Field::new(reg::CHOPCONF, 0x780, 7);
/// Hysteresis start
pub const HSTRT: Field = Field::new(reg::CHOPCONF, 0x70, 4);
/// Off time
pub const TOFF: Field = Field::new(reg::CHOPCONF, 0xF, 0);

// SMARTEN
/// Minimum coolStep current
pub const SEIMIN: Field = Field::new(reg::SMARTEN, 0x8000, 15);
/// Current down step speed
pub const SEDN: Field = Field::new(reg::SMARTEN, 0x6000, 13);
/// stallGuard hysteresis
pub const SEMAX: Field = Field::new(reg::SMARTEN, 0xF00, 8);
/// Current up step width
pub const SEUP: Field = Field::new(reg::SMARTEN, 0x60, 5);
/// Lower coolStep threshold, 0 disables coolStep
pub const SEMIN: Field = Field::new(reg::SMARTEN, 0xF, 0);

// SGCSCONF
/// stallGuard2 filter
pub const SFILT: Field = Field::new(reg::SGCSCONF, 0x1_0000, 16);
/// stallGuard2 threshold, two's complement
pub const SGT: Field = Field::signed(reg::SGCSCONF, 0x7F00, 8);
/// Current scale
pub const CS: Field = Field::new(reg::SGCSCONF, 0x1F, 0);

// DRVCONF
/// Reserved test mode
pub const TST: Field = Field::new(reg::DRVCONF, 0x1_0000, 16);
/// High side slope control
pub const SLPH: Field = Field::new(reg::DRVCONF, 0xC000, 14);
/// Low side slope control
pub const SLPL: Field = Field::new(reg::DRVCONF, 0x3000, 12);
/// Disable short to ground protection
pub const DISS2G: Field = Field::new(reg::DRVCONF, 0x400, 10);
/// Short to ground detection timer
pub const TS2G: Field = Field::new(reg::DRVCONF, 0x300, 8);
/// Disable step/dir interface
pub const SDOFF: Field = Field::new(reg::DRVCONF, 0x80, 7);
/// Sense resistor voltage range
pub const VSENSE: Field = Field::new(reg::DRVCONF, 0x40, 6);
/// Reply format select
pub const RDSEL: Field = Field::new(reg::DRVCONF, 0x30, 4);

// Replies
/// Status byte, present in every reply format
pub const STATUS: Field = Field::response(reg::RESPONSE0, 0xFF, 0);
/// Standstill indicator of the status byte
pub const STST: Field = Field::response(reg::RESPONSE0, 0x80, 7);
/// Microstep counter
pub const MSTEP: Field = Field::response(reg::RESPONSE0, 0xF_FC00, 10);
/// stallGuard2 value
pub const SG2: Field = Field::response(reg::RESPONSE1, 0xF_FC00, 10);
/// Upper five bits of the stallGuard2 value
pub const SGU: Field = Field::response(reg::RESPONSE2, 0xF_8000, 15);
/// Actual coolStep current scale
pub const SE: Field = Field::response(reg::RESPONSE2, 0x7C00, 10);
