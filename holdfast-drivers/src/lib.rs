//! Driver chip implementations
//!
//! This crate provides the chip-specific parts of a Holdfast axis on top
//! of the register model and traits in holdfast-core:
//!
//! - TMC2590 register map and shadow model
//! - SPI datagram transport
//! - Axis-parameter dispatch with run/standstill current and coolStep
//!   controllers

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod stepper;
