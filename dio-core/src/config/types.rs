//! Configuration type definitions
//!
//! A [`DioConfig`] is the editable form of a channel table: channels carry
//! a name and are validated before the descriptors are handed to
//! [`crate::Dio::init`].

use heapless::{String, Vec};

use dio_hal::PortId;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::channel::{ChannelDescriptor, ChannelId};

/// Maximum label length
pub const MAX_LABEL_LEN: usize = 16;

/// Maximum channels per config
pub const MAX_CHANNELS: usize = 32;

/// Configuration errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Pin index is not below the port width
    InvalidPin,
    /// Too many channels (exceeded heapless capacity)
    TooManyChannels,
    /// Channel name longer than MAX_LABEL_LEN
    LabelTooLong,
    /// Two channels share a name
    DuplicateName,
    /// Two channels share a physical pin
    DuplicatePin,
    /// Text could not be parsed
    Parse,
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let msg = match self {
            ConfigError::InvalidPin => "pin index out of range",
            ConfigError::TooManyChannels => "too many channels",
            ConfigError::LabelTooLong => "channel name too long",
            ConfigError::DuplicateName => "duplicate channel name",
            ConfigError::DuplicatePin => "duplicate channel pin",
            ConfigError::Parse => "parse error",
        };
        f.write_str(msg)
    }
}

/// One named channel
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ChannelConfig {
    /// Channel name (e.g., "LED1", "BUTTON2")
    pub name: String<MAX_LABEL_LEN>,
    /// Port the pin belongs to
    pub port: PortId,
    /// Bit position within the port
    pub pin: u8,
}

impl ChannelConfig {
    /// Create a named channel
    pub fn new(name: &str, port: PortId, pin: u8) -> Result<Self, ConfigError> {
        let mut label = String::new();
        label.push_str(name).map_err(|_| ConfigError::LabelTooLong)?;
        Ok(Self {
            name: label,
            port,
            pin,
        })
    }

    /// Validate and convert into a descriptor
    pub fn descriptor(&self) -> Result<ChannelDescriptor, ConfigError> {
        ChannelDescriptor::try_new(self.port, self.pin)
    }
}

/// Complete channel configuration
///
/// The position of a channel in `channels` is its channel id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DioConfig {
    /// Channels in id order
    #[cfg_attr(feature = "serde", serde(rename = "channel", default))]
    pub channels: Vec<ChannelConfig, MAX_CHANNELS>,
}

impl DioConfig {
    /// Create an empty config
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a channel and return its id
    pub fn add_channel(
        &mut self,
        name: &str,
        port: PortId,
        pin: u8,
    ) -> Result<ChannelId, ConfigError> {
        let id = self.channels.len() as ChannelId;
        self.channels
            .push(ChannelConfig::new(name, port, pin)?)
            .map_err(|_| ConfigError::TooManyChannels)?;
        Ok(id)
    }

    /// Find a channel id by name
    pub fn channel_id(&self, name: &str) -> Option<ChannelId> {
        self.channels
            .iter()
            .position(|ch| ch.name.as_str() == name)
            .map(|i| i as ChannelId)
    }

    /// Check pins and uniqueness of names and pins
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (i, ch) in self.channels.iter().enumerate() {
            ch.descriptor()?;
            for other in &self.channels[..i] {
                if other.name == ch.name {
                    return Err(ConfigError::DuplicateName);
                }
                if other.port == ch.port && other.pin == ch.pin {
                    return Err(ConfigError::DuplicatePin);
                }
            }
        }
        Ok(())
    }

    /// Build the descriptor table to hand to the driver
    pub fn descriptors(&self) -> Result<Vec<ChannelDescriptor, MAX_CHANNELS>, ConfigError> {
        self.validate()?;
        let mut table = Vec::new();
        for ch in &self.channels {
            table
                .push(ch.descriptor()?)
                .map_err(|_| ConfigError::TooManyChannels)?;
        }
        Ok(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config() {
        let config = DioConfig::new();
        assert!(config.channels.is_empty());
        assert_eq!(config.descriptors().map(|t| t.len()), Ok(0));
        assert!(config.channel_id("LED1").is_none());
    }

    #[test]
    fn test_add_channels() {
        let mut config = DioConfig::new();
        assert_eq!(config.add_channel("LED1", PortId::C, 3), Ok(0));
        assert_eq!(config.add_channel("BUTTON1", PortId::A, 2), Ok(1));

        assert_eq!(config.channel_id("BUTTON1"), Some(1));
        let table = config.descriptors().unwrap();
        assert_eq!(table[0], ChannelDescriptor::new(PortId::C, 3));
        assert_eq!(table[1], ChannelDescriptor::new(PortId::A, 2));
    }

    #[test]
    fn test_label_too_long() {
        let mut config = DioConfig::new();
        assert_eq!(
            config.add_channel("A_VERY_LONG_CHANNEL_NAME", PortId::A, 0),
            Err(ConfigError::LabelTooLong)
        );
    }

    #[test]
    fn test_invalid_pin() {
        let mut config = DioConfig::new();
        config.add_channel("LED1", PortId::C, 8).unwrap();
        assert_eq!(config.descriptors(), Err(ConfigError::InvalidPin));
    }

    #[test]
    fn test_duplicates() {
        let mut config = DioConfig::new();
        config.add_channel("LED1", PortId::C, 3).unwrap();
        config.add_channel("LED1", PortId::D, 6).unwrap();
        assert_eq!(config.validate(), Err(ConfigError::DuplicateName));

        let mut config = DioConfig::new();
        config.add_channel("LED1", PortId::C, 3).unwrap();
        config.add_channel("LED2", PortId::C, 3).unwrap();
        assert_eq!(config.validate(), Err(ConfigError::DuplicatePin));
    }

    #[test]
    fn test_capacity() {
        let mut config = DioConfig::new();
        for i in 0..MAX_CHANNELS {
            let mut name: String<MAX_LABEL_LEN> = String::new();
            core::fmt::write(&mut name, format_args!("CH{}", i)).unwrap();
            let port = PortId::ALL[i / 8];
            config.add_channel(&name, port, (i % 8) as u8).unwrap();
        }
        assert_eq!(
            config.add_channel("EXTRA", PortId::A, 0),
            Err(ConfigError::TooManyChannels)
        );
        assert_eq!(config.descriptors().map(|t| t.len()), Ok(MAX_CHANNELS));
    }
}
