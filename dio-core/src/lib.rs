//! Board-agnostic digital I/O driver
//!
//! This crate maps abstract channel ids onto (port, pin) pairs and performs
//! the register accesses behind them:
//!
//! - Channel table types supplied by the configuration provider
//! - The [`Dio`] context object (init, read/write/flip channel, read/write port)
//! - Error reporting to an injected [`ErrorSink`]
//! - Version information
//! - Configuration types and the reference board table
//! - An `embedded-hal` adapter for single channels
//!
//! Precondition checks are compiled in with the `dev-error-detect` feature.
//! Every violation is reported to the sink and the service then returns a
//! safe default without touching the registers.

#![no_std]
#![deny(unsafe_code)]

pub mod channel;
pub mod config;
pub mod dio;
pub mod pin;
pub mod report;
pub mod version;

pub use channel::{ChannelDescriptor, ChannelId, ChannelTable};
pub use dio::{Dio, ModuleState};
pub use pin::ChannelPin;
pub use report::{DioError, ErrorReport, ErrorSink, NoopSink, RecordingSink, ServiceId};
pub use version::VersionInfo;

pub use dio_hal::{Level, PortId, PortLevel, PortRegisters};
