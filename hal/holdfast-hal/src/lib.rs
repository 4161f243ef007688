//! Holdfast Hardware Abstraction Layer
//!
//! This crate defines the bus traits a board support package implements so
//! the driver crates can talk to a chip without knowing which MCU hosts it.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  holdfast-drivers (TMC2590 axis)        │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  holdfast-hal (this crate - traits)     │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  board support (SPI peripheral + CSN)   │
//! └─────────────────────────────────────────┘
//! ```
//!
//! # Traits
//!
//! - [`spi::SpiBus`] - SPI bus operations

#![no_std]
#![deny(unsafe_code)]

pub mod spi;

pub use spi::{Mode, SpiBus, SpiConfig};
