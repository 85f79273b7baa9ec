//! ATmega32-specific HAL for the digital I/O driver
//!
//! This crate provides the memory-mapped register bank of the ATmega32
//! ports A-D for use with `dio-hal` traits.
//!
//! # Features
//!
//! - `defmt` - Enable debug formatting support
//!
//! # Usage
//!
//! ```ignore
//! let ports = unsafe { Atmega32Ports::steal() };
//! let mut dio = Dio::new(ports, NoopSink);
//! ```
//!
//! Pin direction is owned by the port driver; [`Atmega32Ports::set_direction`]
//! is provided for boards that have none.

#![no_std]

pub mod gpio;

pub use gpio::{parse_pin, Atmega32Ports, RegisterBlock, IO_BASE};

// Re-export shared types from dio-hal
pub use dio_hal::{Level, PortId, PortRegisters};
