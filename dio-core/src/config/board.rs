//! Reference board channel table
//!
//! Two LEDs and two push buttons:
//!
//! | Id | Name    | Pin | Direction |
//! |----|---------|-----|-----------|
//! | 0  | LED1    | PC3 | output    |
//! | 1  | LED2    | PD6 | output    |
//! | 2  | BUTTON1 | PA2 | input     |
//! | 3  | BUTTON2 | PB4 | input     |
//!
//! Pin directions are set by the port driver, not by this table.

use dio_hal::PortId;

use crate::channel::{ChannelDescriptor, ChannelId, ChannelTable};

pub const LED1: ChannelId = 0;
pub const LED2: ChannelId = 1;
pub const BUTTON1: ChannelId = 2;
pub const BUTTON2: ChannelId = 3;

/// Number of configured channels
pub const CONFIGURED_CHANNELS: usize = 4;

/// Channel descriptors in id order
pub static CHANNELS: [ChannelDescriptor; CONFIGURED_CHANNELS] = [
    ChannelDescriptor::new(PortId::C, 3),
    ChannelDescriptor::new(PortId::D, 6),
    ChannelDescriptor::new(PortId::A, 2),
    ChannelDescriptor::new(PortId::B, 4),
];

/// Same table in TOML form
pub const CHANNELS_TOML: &str = include_str!("../../dio.toml");

/// The board table
pub fn table() -> ChannelTable<'static> {
    ChannelTable::new(&CHANNELS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_board_table() {
        let table = table();
        assert_eq!(table.len(), CONFIGURED_CHANNELS);
        assert_eq!(table.get(LED1), Some(&ChannelDescriptor::new(PortId::C, 3)));
        assert_eq!(table.get(BUTTON2), Some(&ChannelDescriptor::new(PortId::B, 4)));
        for port in PortId::ALL {
            assert!(table.contains_port(port));
        }
    }
}
