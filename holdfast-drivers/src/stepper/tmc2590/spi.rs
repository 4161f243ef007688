//! SPI datagram transport
//!
//! A 20-bit datagram travels as three bytes, most significant first, with
//! the datagram right-aligned: the chip keeps the last 20 bits it sees.
//! The reply comes back left-aligned in the same 24 bits.

use embedded_hal::spi::{Phase, Polarity};
use holdfast_core::traits::Transport;
use holdfast_hal::{Mode, SpiBus, SpiConfig};

use super::registers::DATAGRAM_MASK;

/// Pack a datagram into the three bytes clocked out
pub fn encode(datagram: u32) -> [u8; 3] {
    let datagram = datagram & DATAGRAM_MASK;
    [(datagram >> 16) as u8, (datagram >> 8) as u8, datagram as u8]
}

/// Unpack the reply clocked in during a transfer
pub fn decode(bytes: [u8; 3]) -> u32 {
    let raw = (u32::from(bytes[0]) << 16) | (u32::from(bytes[1]) << 8) | u32::from(bytes[2]);
    raw >> 4
}

/// `embedded-hal` form of a bus mode
pub const fn embedded_hal_mode(mode: Mode) -> embedded_hal::spi::Mode {
    embedded_hal::spi::Mode {
        polarity: if mode.idle_high() {
            Polarity::IdleHigh
        } else {
            Polarity::IdleLow
        },
        phase: if mode.capture_on_second_edge() {
            Phase::CaptureOnSecondTransition
        } else {
            Phase::CaptureOnFirstTransition
        },
    }
}

/// Datagram link over an SPI bus
pub struct SpiTransport<B> {
    bus: B,
}

impl<B> SpiTransport<B> {
    /// Bus setup the chip expects
    ///
    /// Mode 3; the clock stays well under the 4 MHz the internal
    /// oscillator allows.
    pub const CONFIG: SpiConfig = SpiConfig::new(1_000_000, Mode::Mode3);
}

impl<B: SpiBus> SpiTransport<B> {
    /// Wrap a bus; chip select is the bus' concern
    pub fn new(bus: B) -> Self {
        Self { bus }
    }

    /// Release the bus
    pub fn into_inner(self) -> B {
        self.bus
    }
}

impl<B: SpiBus> Transport for SpiTransport<B> {
    type Error = B::Error;

    fn transfer(&mut self, datagram: u32) -> Result<u32, Self::Error> {
        let mut bytes = encode(datagram);
        self.bus.transfer_in_place(&mut bytes)?;
        Ok(decode(bytes))
    }
}

/// [`SpiBus`] on top of an `embedded-hal` SPI device
///
/// The device owns chip select, so each transfer is one framed
/// transaction as the chip expects.
pub struct EmbeddedHalSpi<D> {
    device: D,
}

impl<D> EmbeddedHalSpi<D> {
    /// Mode to configure the underlying `embedded-hal` bus with
    pub const MODE: embedded_hal::spi::Mode = embedded_hal_mode(SpiTransport::<D>::CONFIG.mode);

    /// Wrap an `embedded-hal` device
    pub fn new(device: D) -> Self {
        Self { device }
    }

    /// Release the device
    pub fn into_inner(self) -> D {
        self.device
    }
}

impl<D: embedded_hal::spi::SpiDevice> SpiBus for EmbeddedHalSpi<D> {
    type Error = D::Error;

    fn transfer_in_place(&mut self, data: &mut [u8]) -> Result<(), Self::Error> {
        self.device.transfer_in_place(data)
    }
}
