//! TOML configuration loading
//!
//! Format:
//!
//! ```toml
//! [[channel]]
//! name = "LED1"
//! port = "C"
//! pin = 3
//! ```
//!
//! Entries become channel ids in file order. The parsed config is validated
//! before it is returned.

use super::types::{ConfigError, DioConfig};

impl DioConfig {
    /// Parse and validate a TOML channel list
    pub fn from_toml(input: &str) -> Result<Self, ConfigError> {
        let config: DioConfig = toml::from_str(input).map_err(|_e| {
            #[cfg(feature = "defmt")]
            defmt::warn!("DIO config: TOML parse failed");
            ConfigError::Parse
        })?;
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::board;
    use dio_hal::PortId;

    #[test]
    fn test_board_toml_matches_table() {
        let config = DioConfig::from_toml(board::CHANNELS_TOML).unwrap();
        let table = config.descriptors().unwrap();

        assert_eq!(table.as_slice(), &board::CHANNELS[..]);
        assert_eq!(config.channel_id("LED2"), Some(board::LED2));
        assert_eq!(config.channel_id("BUTTON1"), Some(board::BUTTON1));
    }

    #[test]
    fn test_empty_document() {
        let config = DioConfig::from_toml("").unwrap();
        assert!(config.channels.is_empty());
    }

    #[test]
    fn test_unknown_port() {
        let input = r#"
            [[channel]]
            name = "LED1"
            port = "E"
            pin = 3
        "#;
        assert_eq!(DioConfig::from_toml(input), Err(ConfigError::Parse));
    }

    #[test]
    fn test_pin_out_of_range() {
        let input = r#"
            [[channel]]
            name = "LED1"
            port = "C"
            pin = 9
        "#;
        assert_eq!(DioConfig::from_toml(input), Err(ConfigError::InvalidPin));
    }

    #[test]
    fn test_duplicate_pin_rejected() {
        let input = r#"
            [[channel]]
            name = "LED1"
            port = "D"
            pin = 6

            [[channel]]
            name = "LED2"
            port = "D"
            pin = 6
        "#;
        assert_eq!(DioConfig::from_toml(input), Err(ConfigError::DuplicatePin));
    }

    #[test]
    fn test_single_channel() {
        let input = r#"
            [[channel]]
            name = "RELAY"
            port = "B"
            pin = 0
        "#;
        let config = DioConfig::from_toml(input).unwrap();
        assert_eq!(config.channels.len(), 1);
        assert_eq!(config.channels[0].port, PortId::B);
        assert_eq!(config.channels[0].name.as_str(), "RELAY");
    }
}
