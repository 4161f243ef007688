//! Shadow register store
//!
//! Keeps, per physical register address, the last word this side sent and
//! the last word the chip answered with. The store is the single source of
//! truth for what is currently on the wire: every field read decodes a
//! shadow word, every field write is a read-modify-write of one.

use crate::field::{Field, Half};

/// Both halves of one register
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ShadowRegister {
    /// Most recent word written to the chip
    pub written: u32,
    /// Most recent chip reply stored for this address
    pub read: u32,
}

/// Shadow copies of `N` register addresses
#[derive(Debug, Clone)]
pub struct ShadowRegisters<const N: usize> {
    registers: [ShadowRegister; N],
    latest: u32,
}

impl<const N: usize> Default for ShadowRegisters<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> ShadowRegisters<N> {
    /// Create a store with every word cleared
    pub const fn new() -> Self {
        Self {
            registers: [ShadowRegister {
                written: 0,
                read: 0,
            }; N],
            latest: 0,
        }
    }

    /// Number of addresses in the store
    pub const fn len(&self) -> usize {
        N
    }

    /// True if the store holds no addresses
    pub const fn is_empty(&self) -> bool {
        N == 0
    }

    /// Both halves of one address, if it exists
    pub fn register(&self, address: u8) -> Option<&ShadowRegister> {
        self.registers.get(usize::from(address))
    }

    /// Last word written to `address` (0 for unknown addresses)
    pub fn written(&self, address: u8) -> u32 {
        self.register(address).map_or(0, |r| r.written)
    }

    /// Last reply stored for `address` (0 for unknown addresses)
    pub fn read(&self, address: u8) -> u32 {
        self.register(address).map_or(0, |r| r.read)
    }

    /// Most recent reply of any kind
    pub fn latest(&self) -> u32 {
        self.latest
    }

    /// Record a word sent to the chip
    pub fn store_written(&mut self, address: u8, value: u32) {
        if let Some(register) = self.registers.get_mut(usize::from(address)) {
            register.written = value;
        }
    }

    /// Record a chip reply; it also becomes the latest reply
    pub fn store_read(&mut self, address: u8, value: u32) {
        if let Some(register) = self.registers.get_mut(usize::from(address)) {
            register.read = value;
        }
        self.latest = value;
    }

    /// Decode a field from the half it lives in
    pub fn field(&self, field: &Field) -> i32 {
        let word = match field.half {
            Half::Written => self.written(field.address),
            Half::Response => self.read(field.address),
        };
        field.get(word)
    }

    /// Read-modify-write of a field in the written half
    ///
    /// Returns the complete new register word so it can be pushed to the
    /// chip. Bits outside the field keep their value.
    pub fn update_field(&mut self, field: &Field, value: i32) -> u32 {
        let word = field.set(self.written(field.address), value);
        self.store_written(field.address, word);
        word
    }

    /// Clear every word
    pub fn clear(&mut self) {
        *self = Self::new();
    }
}
