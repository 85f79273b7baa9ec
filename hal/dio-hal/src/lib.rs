//! Digital I/O Hardware Abstraction Layer
//!
//! This crate defines the register-level view of the digital ports that the
//! DIO driver manipulates. Chip-specific crates implement [`PortRegisters`]
//! for their memory-mapped register file; host tests use [`SimulatedPorts`].
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Application code                       │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  dio-core (channel mapper & accessor)   │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  dio-hal (this crate - traits)          │
//! └─────────────────────────────────────────┘
//!                     │
//!         ┌───────────┴───────────┐
//!         ▼                       ▼
//! ┌───────────────┐       ┌───────────────┐
//! │  dio-hal-     │       │ SimulatedPorts│
//! │   atmega32    │       │  (host/tests) │
//! └───────────────┘       └───────────────┘
//! ```
//!
//! # Modules
//!
//! - [`gpio`] - Port identifiers, levels and bit helpers
//! - [`registers`] - The [`PortRegisters`] trait
//! - [`sim`] - In-memory register bank

#![no_std]
#![deny(unsafe_code)]

pub mod gpio;
pub mod registers;
pub mod sim;

// Re-export key types at crate root for convenience
pub use gpio::{Level, PortId, PortLevel, UnmappedPort, PORT_COUNT, PORT_WIDTH};
pub use registers::PortRegisters;
pub use sim::{PortSnapshot, SimulatedPorts};
