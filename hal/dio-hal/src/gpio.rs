//! Port and level abstractions
//!
//! Provides the small value types shared by every layer of the driver:
//! which physical port a pin lives on, the binary level of a pin, and the
//! raw value of a whole port.

use core::ops::Not;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Number of pins in one port register
pub const PORT_WIDTH: u8 = 8;

/// Number of physical ports
pub const PORT_COUNT: usize = 4;

/// Raw value of a whole port register (bit n = pin n)
pub type PortLevel = u8;

/// Binary level of a single pin
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Level {
    /// Logic 0
    #[default]
    Low,
    /// Logic 1
    High,
}

impl Level {
    /// Check if the level is high
    pub fn is_high(self) -> bool {
        self == Level::High
    }

    /// Check if the level is low
    pub fn is_low(self) -> bool {
        self == Level::Low
    }
}

impl Not for Level {
    type Output = Level;

    fn not(self) -> Level {
        match self {
            Level::Low => Level::High,
            Level::High => Level::Low,
        }
    }
}

impl From<bool> for Level {
    fn from(high: bool) -> Self {
        if high {
            Level::High
        } else {
            Level::Low
        }
    }
}

impl From<Level> for bool {
    fn from(level: Level) -> Self {
        level.is_high()
    }
}

/// Physical port identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[repr(u8)]
pub enum PortId {
    A = 0,
    B = 1,
    C = 2,
    D = 3,
}

/// A raw port index that does not name a physical port
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct UnmappedPort(pub u8);

impl PortId {
    /// All ports in index order
    pub const ALL: [PortId; PORT_COUNT] = [PortId::A, PortId::B, PortId::C, PortId::D];

    /// Get the raw port index
    pub const fn index(self) -> u8 {
        self as u8
    }

    /// Resolve a raw port index
    ///
    /// Every value outside `0..PORT_COUNT` is reported as [`UnmappedPort`]
    /// rather than silently picking a register.
    pub const fn from_index(index: u8) -> Result<Self, UnmappedPort> {
        match index {
            0 => Ok(PortId::A),
            1 => Ok(PortId::B),
            2 => Ok(PortId::C),
            3 => Ok(PortId::D),
            other => Err(UnmappedPort(other)),
        }
    }

    /// Parse a port letter ('A'..='D', case-insensitive)
    pub fn from_letter(letter: char) -> Option<Self> {
        match letter.to_ascii_uppercase() {
            'A' => Some(PortId::A),
            'B' => Some(PortId::B),
            'C' => Some(PortId::C),
            'D' => Some(PortId::D),
            _ => None,
        }
    }

    /// Get the port letter
    pub const fn letter(self) -> char {
        match self {
            PortId::A => 'A',
            PortId::B => 'B',
            PortId::C => 'C',
            PortId::D => 'D',
        }
    }
}

impl TryFrom<u8> for PortId {
    type Error = UnmappedPort;

    fn try_from(index: u8) -> Result<Self, Self::Error> {
        PortId::from_index(index)
    }
}

impl From<PortId> for u8 {
    fn from(port: PortId) -> Self {
        port.index()
    }
}

/// Mask selecting bit `pin`, empty for `pin >= PORT_WIDTH`
#[inline]
pub const fn bit_mask(pin: u8) -> PortLevel {
    match (1 as PortLevel).checked_shl(pin as u32) {
        Some(mask) => mask,
        None => 0,
    }
}

/// Return `value` with bit `pin` set
///
/// Pins outside the port leave `value` unchanged.
#[inline]
pub const fn set_bit(value: PortLevel, pin: u8) -> PortLevel {
    value | bit_mask(pin)
}

/// Return `value` with bit `pin` cleared
#[inline]
pub const fn clear_bit(value: PortLevel, pin: u8) -> PortLevel {
    value & !bit_mask(pin)
}

/// Check whether bit `pin` of `value` is set (never for pins outside the port)
#[inline]
pub const fn bit_is_set(value: PortLevel, pin: u8) -> bool {
    value & bit_mask(pin) != 0
}
