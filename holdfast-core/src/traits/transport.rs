//! Datagram transport to a driver chip
//!
//! SPI driver chips answer every datagram with a status word clocked out
//! during the same transaction, so the link is modelled as a single
//! full-duplex exchange.

/// Full-duplex datagram link
pub trait Transport {
    /// Error type of the underlying bus
    type Error;

    /// Send one datagram and return the reply shifted in at the same time
    fn transfer(&mut self, datagram: u32) -> Result<u32, Self::Error>;
}

impl<T: Transport + ?Sized> Transport for &mut T {
    type Error = T::Error;

    fn transfer(&mut self, datagram: u32) -> Result<u32, Self::Error> {
        (**self).transfer(datagram)
    }
}
