//! Channel table types
//!
//! A channel is one logical digital pin. The configuration provider builds
//! an ordered table of [`ChannelDescriptor`]s once; the index of a
//! descriptor is its [`ChannelId`] for the lifetime of the program.

use dio_hal::{PortId, PORT_WIDTH};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::config::ConfigError;

/// Index of a channel in the channel table
pub type ChannelId = u8;

/// Physical location of one channel
///
/// The pin is always below [`PORT_WIDTH`]; both constructors and
/// deserialization enforce it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawDescriptor"))]
pub struct ChannelDescriptor {
    port: PortId,
    pin: u8,
}

/// Unchecked wire form of a descriptor
#[cfg(feature = "serde")]
#[derive(Deserialize)]
struct RawDescriptor {
    port: PortId,
    pin: u8,
}

#[cfg(feature = "serde")]
impl TryFrom<RawDescriptor> for ChannelDescriptor {
    type Error = ConfigError;

    fn try_from(raw: RawDescriptor) -> Result<Self, Self::Error> {
        Self::try_new(raw.port, raw.pin)
    }
}

impl ChannelDescriptor {
    /// Create a descriptor for use in a static table
    ///
    /// An out-of-range pin fails constant evaluation of the table.
    pub const fn new(port: PortId, pin: u8) -> Self {
        assert!(pin < PORT_WIDTH, "pin must be below PORT_WIDTH");
        Self { port, pin }
    }

    /// Create a descriptor from runtime data
    pub fn try_new(port: PortId, pin: u8) -> Result<Self, ConfigError> {
        if pin >= PORT_WIDTH {
            return Err(ConfigError::InvalidPin);
        }
        Ok(Self { port, pin })
    }

    /// Port the pin belongs to
    pub const fn port(&self) -> PortId {
        self.port
    }

    /// Bit position within the port (0..PORT_WIDTH)
    pub const fn pin(&self) -> u8 {
        self.pin
    }
}

/// Read-only view of the configured channels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChannelTable<'a> {
    channels: &'a [ChannelDescriptor],
}

impl<'a> ChannelTable<'a> {
    /// Wrap a descriptor slice
    pub const fn new(channels: &'a [ChannelDescriptor]) -> Self {
        Self { channels }
    }

    /// Number of configured channels
    pub const fn len(&self) -> usize {
        self.channels.len()
    }

    /// Check if no channel is configured
    pub const fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }

    /// Look up a channel
    pub fn get(&self, id: ChannelId) -> Option<&'a ChannelDescriptor> {
        self.channels.get(usize::from(id))
    }

    /// Check if any channel lives on `port`
    ///
    /// Scans the whole table; this is the only notion of a "configured port".
    pub fn contains_port(&self, port: PortId) -> bool {
        self.channels.iter().any(|ch| ch.port == port)
    }

    /// Iterate over all descriptors in id order
    pub fn iter(&self) -> core::slice::Iter<'a, ChannelDescriptor> {
        self.channels.iter()
    }

    /// Get the underlying slice
    pub const fn as_slice(&self) -> &'a [ChannelDescriptor] {
        self.channels
    }
}

impl<'a> From<&'a [ChannelDescriptor]> for ChannelTable<'a> {
    fn from(channels: &'a [ChannelDescriptor]) -> Self {
        Self::new(channels)
    }
}
