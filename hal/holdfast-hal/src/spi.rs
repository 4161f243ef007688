//! SPI bus abstractions
//!
//! Provides the SPI master trait used by driver transports. Chip select
//! handling belongs to the implementation: one call to
//! [`SpiBus::transfer_in_place`] is one framed transaction.

/// SPI bus master
pub trait SpiBus {
    /// Error type for SPI operations
    type Error;

    /// Transfer data in place
    ///
    /// Clocks out the buffer while the bytes shifted in by the peripheral
    /// replace it. Chip select is asserted for the whole buffer.
    fn transfer_in_place(&mut self, data: &mut [u8]) -> Result<(), Self::Error>;
}

impl<B: SpiBus + ?Sized> SpiBus for &mut B {
    type Error = B::Error;

    fn transfer_in_place(&mut self, data: &mut [u8]) -> Result<(), Self::Error> {
        (**self).transfer_in_place(data)
    }
}

/// SPI configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SpiConfig {
    /// Clock frequency in Hz
    pub frequency: u32,
    /// Clock polarity and phase
    pub mode: Mode,
}

impl SpiConfig {
    /// Configuration with the given clock and mode
    pub const fn new(frequency: u32, mode: Mode) -> Self {
        Self { frequency, mode }
    }
}

impl Default for SpiConfig {
    fn default() -> Self {
        Self::new(1_000_000, Mode::Mode0)
    }
}

/// SPI mode (combined polarity and phase)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Mode {
    /// Mode 0: CPOL=0, CPHA=0
    Mode0,
    /// Mode 1: CPOL=0, CPHA=1
    Mode1,
    /// Mode 2: CPOL=1, CPHA=0
    Mode2,
    /// Mode 3: CPOL=1, CPHA=1
    Mode3,
}

impl Mode {
    /// Clock idles high (CPOL=1)
    pub const fn idle_high(self) -> bool {
        matches!(self, Mode::Mode2 | Mode::Mode3)
    }

    /// Data captured on the second clock transition (CPHA=1)
    pub const fn capture_on_second_edge(self) -> bool {
        matches!(self, Mode::Mode1 | Mode::Mode3)
    }
}
