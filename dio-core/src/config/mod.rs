//! Configuration types
//!
//! The configuration provider side of the driver: named channel lists that
//! validate into a channel table, the reference board table, and TOML
//! loading (feature `toml`).

pub mod board;
#[cfg(feature = "toml")]
pub mod loader;
pub mod types;

pub use types::*;
