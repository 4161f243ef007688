//! Register field codec
//!
//! Driver chips pack several settings into one register word. A [`Field`]
//! names one of those sub-words by register address, mask and shift, and
//! knows whether it holds a two's-complement value.
//!
//! Writing a field truncates the value to the field width the same way the
//! chip would: high bits are dropped silently. Range checking, where it
//! exists, is the business of the caller.

/// Which half of a shadow register a field is read from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Half {
    /// The word this side last sent to the chip
    Written,
    /// The word the chip last replied with
    Response,
}

/// Location of one sub-word inside a register
///
/// `mask` must be a contiguous run of bits starting at `shift`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Field {
    /// Register address (index into the shadow store)
    pub address: u8,
    /// Bit mask in register position
    pub mask: u32,
    /// Position of the least significant field bit
    pub shift: u8,
    /// Field holds a two's-complement value
    pub signed: bool,
    /// Shadow half the field is read from
    pub half: Half,
}

impl Field {
    /// Unsigned configuration field
    pub const fn new(address: u8, mask: u32, shift: u8) -> Self {
        Self {
            address,
            mask,
            shift,
            signed: false,
            half: Half::Written,
        }
    }

    /// Signed configuration field
    pub const fn signed(address: u8, mask: u32, shift: u8) -> Self {
        Self {
            address,
            mask,
            shift,
            signed: true,
            half: Half::Written,
        }
    }

    /// Unsigned field of a chip reply
    pub const fn response(address: u8, mask: u32, shift: u8) -> Self {
        Self {
            address,
            mask,
            shift,
            signed: false,
            half: Half::Response,
        }
    }

    /// Number of bits in the field
    pub const fn width(&self) -> u32 {
        self.mask.count_ones()
    }

    /// Check that the field lies inside a register of `register_bits` bits
    /// and that mask and shift agree with each other
    pub const fn fits(&self, register_bits: u32) -> bool {
        if self.mask == 0 || self.shift as u32 >= register_bits {
            return false;
        }
        let limit = if register_bits >= 32 {
            u32::MAX
        } else {
            (1u32 << register_bits) - 1
        };
        let contiguous = (self.mask >> self.shift).wrapping_add(1) & (self.mask >> self.shift) == 0;
        self.mask & !limit == 0 && self.mask.trailing_zeros() == self.shift as u32 && contiguous
    }

    /// Decode the field from a register word
    pub fn get(&self, word: u32) -> i32 {
        extract(word, self.mask, self.shift, self.signed)
    }

    /// Replace the field inside a register word, leaving other bits alone
    pub fn set(&self, word: u32, value: i32) -> u32 {
        insert(word, self.mask, self.shift, value)
    }
}

/// Decode a field from a register word
///
/// With `signed` the masked value is reinterpreted as a two's-complement
/// number as wide as the mask.
pub fn extract(word: u32, mask: u32, shift: u8, signed: bool) -> i32 {
    let raw = (word & mask) >> shift;
    if signed {
        sign_extend(raw, mask.count_ones())
    } else {
        raw as i32
    }
}

/// Encode `value` into the field, truncating it to the field width
pub fn insert(word: u32, mask: u32, shift: u8, value: i32) -> u32 {
    (word & !mask) | (((value as u32) << shift) & mask)
}

/// Sign-extend the low `bits` bits of `raw`
pub fn sign_extend(raw: u32, bits: u32) -> i32 {
    if bits == 0 {
        return 0;
    }
    if bits >= 32 {
        return raw as i32;
    }
    let unused = 32 - bits;
    ((raw << unused) as i32) >> unused
}
