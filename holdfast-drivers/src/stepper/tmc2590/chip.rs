//! TMC2590 register model
//!
//! Holds the shadow copy of every register and the link to the chip.
//! Every datagram clocked in produces a reply whose format was chosen by
//! the `RDSEL` value in effect *before* that datagram, so the model
//! tracks the active `RDSEL` to file each reply in the right slot.
//!
//! In continuous mode nothing is sent on write; [`Tmc2590::periodic`]
//! refreshes one reply and re-sends one register per tick instead, which
//! keeps the chip configured after a brown-out and every reply current.

use holdfast_core::traits::Transport;
use holdfast_core::{Field, ShadowRegisters};

use super::registers::{self, reg, DEFAULT_REGISTERS, RDSEL, REGISTER_COUNT, STATUS, STST};

/// Number of reply formats the chip can be asked for
const REPLY_FORMATS: u8 = 3;

/// TMC2590 register model over a datagram link
pub struct Tmc2590<T> {
    transport: T,
    shadow: ShadowRegisters<REGISTER_COUNT>,
    rdsel: u8,
    continuous: bool,
    write_cursor: usize,
    read_cursor: u8,
    link_errors: u32,
}

impl<T: Transport> Tmc2590<T> {
    /// Create a model loaded with the power-on register image
    ///
    /// Nothing is sent until the first write, [`restore`](Self::restore)
    /// or periodic refresh.
    pub fn new(transport: T, continuous: bool) -> Self {
        let mut chip = Self {
            transport,
            shadow: ShadowRegisters::new(),
            // power-on value of the chip, not of the image
            rdsel: 0,
            continuous,
            write_cursor: 0,
            read_cursor: 0,
            link_errors: 0,
        };
        chip.load_defaults();
        chip
    }

    fn load_defaults(&mut self) {
        self.shadow.clear();
        for (address, word) in DEFAULT_REGISTERS {
            self.shadow.store_written(address, word);
        }
        self.write_cursor = 0;
        self.read_cursor = 0;
    }

    /// Check if continuous mode is on
    pub fn is_continuous(&self) -> bool {
        self.continuous
    }

    /// Switch continuous mode
    pub fn set_continuous(&mut self, continuous: bool) {
        self.continuous = continuous;
    }

    /// Number of datagrams the link failed to exchange
    pub fn link_errors(&self) -> u32 {
        self.link_errors
    }

    /// Reply format the next datagram will be answered with
    pub fn active_rdsel(&self) -> u8 {
        self.rdsel
    }

    /// Underlying link
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Underlying link, mutably
    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    /// Shadow store
    pub fn shadow(&self) -> &ShadowRegisters<REGISTER_COUNT> {
        &self.shadow
    }

    /// Decode a field from the shadow store
    pub fn field(&self, field: &Field) -> i32 {
        self.shadow.field(field)
    }

    /// Most recent reply of any format
    pub fn latest_reply(&self) -> u32 {
        self.shadow.latest()
    }

    /// Status byte of the most recent reply
    pub fn status(&self) -> u8 {
        STATUS.get(self.latest_reply()) as u8
    }

    /// Chip reports standstill in its most recent reply
    pub fn is_standstill(&self) -> bool {
        STST.get(self.latest_reply()) != 0
    }

    /// Read-modify-write of one register field
    pub fn update_field(&mut self, field: &Field, value: i32) {
        let word = self.shadow.update_field(field, value);
        self.write_register(field.address, word);
    }

    /// Write a complete register
    ///
    /// The value is truncated to a datagram and tagged with the address
    /// bits. Addresses that are not writable registers are ignored.
    pub fn write_register(&mut self, address: u8, value: u32) {
        let address = address & !reg::WRITE_BIT;
        if !reg::is_writable(address) {
            #[cfg(feature = "defmt")]
            defmt::warn!("tmc2590: write to non-writable address {}", address);
            return;
        }

        let word = registers::tag(address, value);
        self.shadow.store_written(address, word);
        if !self.continuous {
            self.exchange(word);
        }
    }

    /// Read a register
    ///
    /// With [`reg::WRITE_BIT`] set the last written word is returned.
    /// Otherwise the address names a reply slot: outside continuous mode
    /// the reply is fetched from the chip first, in continuous mode the
    /// cached reply is returned.
    pub fn read_register(&mut self, address: u8) -> u32 {
        if address & reg::WRITE_BIT != 0 {
            return self.shadow.written(address & !reg::WRITE_BIT);
        }
        if !self.continuous && address <= reg::RESPONSE3 {
            return self.read_immediately(address % REPLY_FORMATS);
        }
        self.shadow.read(address)
    }

    /// Fetch one reply format right now
    ///
    /// Sends `DRVCONF` with `RDSEL` set to `format`, then the configured
    /// `DRVCONF` again; the second exchange returns the requested reply
    /// and restores the configured format.
    fn read_immediately(&mut self, format: u8) -> u32 {
        let drvconf = self.shadow.written(reg::DRVCONF);
        let select = RDSEL.set(drvconf, i32::from(format));

        self.exchange(select);
        self.exchange(drvconf);
        self.shadow.read(format)
    }

    /// Shift one datagram and file the reply
    ///
    /// Returns `false` if the link failed. The chip has then not seen the
    /// datagram, so the active reply format is left unchanged.
    fn exchange(&mut self, datagram: u32) -> bool {
        match self.transport.transfer(datagram) {
            Ok(reply) => {
                self.shadow
                    .store_read(self.rdsel, reply & registers::DATAGRAM_MASK);
                if registers::address_of(datagram) == reg::DRVCONF {
                    self.rdsel = RDSEL.get(datagram) as u8;
                }
                true
            }
            Err(_) => {
                self.link_errors = self.link_errors.wrapping_add(1);
                #[cfg(feature = "defmt")]
                defmt::warn!(
                    "tmc2590: link error on datagram {=u32:#x} ({} total)",
                    datagram,
                    self.link_errors
                );
                false
            }
        }
    }

    /// Periodic refresh, called once per scheduler tick
    ///
    /// Does nothing outside continuous mode.
    pub fn periodic(&mut self) {
        if !self.continuous {
            return;
        }

        self.read_immediately(self.read_cursor);
        self.read_cursor = (self.read_cursor + 1) % REPLY_FORMATS;

        let address = reg::WRITABLE[self.write_cursor];
        self.exchange(self.shadow.written(address));
        self.write_cursor = (self.write_cursor + 1) % reg::WRITABLE.len();
    }

    /// Re-send every written register
    ///
    /// Returns `true` if the link accepted all of them.
    pub fn restore(&mut self) -> bool {
        let mut ok = true;
        for address in reg::WRITABLE {
            ok &= self.exchange(self.shadow.written(address));
        }
        ok
    }

    /// Return to the power-on register image
    ///
    /// Outside continuous mode the image is sent right away. The active
    /// reply format changes once `DRVCONF` reaches the chip.
    pub fn reset(&mut self) {
        self.load_defaults();
        if !self.continuous {
            self.restore();
        }
    }
}
