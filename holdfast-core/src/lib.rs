//! Chip-agnostic core of the Holdfast axis firmware
//!
//! This crate contains the pieces of the axis-parameter layer that do not
//! depend on a particular driver chip:
//!
//! - Register field codec (masked, shifted, optionally signed sub-words)
//! - Shadow register store (last written / last read word per address)
//! - Axis-parameter catalog types and error flags
//! - Collaborator traits (datagram transport, motion controller)
//! - Runtime state and configuration types

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod config;
pub mod error;
pub mod field;
pub mod parameter;
pub mod shadow;
pub mod state;
pub mod traits;

pub use error::ErrorFlags;
pub use field::{Field, Half};
pub use shadow::{ShadowRegister, ShadowRegisters};
