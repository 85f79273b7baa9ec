//! `embedded-hal` adapter for a single channel
//!
//! Lets drivers written against `embedded_hal::digital` run on top of a DIO
//! channel. Every call goes through the normal services, so a bad channel id
//! is reported to the sink exactly like a direct call would be.

use core::convert::Infallible;

use dio_hal::{Level, PortRegisters};
use embedded_hal::digital::{ErrorType, InputPin, OutputPin, StatefulOutputPin};

use crate::channel::ChannelId;
use crate::dio::Dio;
use crate::report::ErrorSink;

/// One channel of a [`Dio`] borrowed as a pin
pub struct ChannelPin<'d, 'a, R, S> {
    dio: &'d mut Dio<'a, R, S>,
    channel: ChannelId,
}

impl<'d, 'a, R, S> ChannelPin<'d, 'a, R, S>
where
    R: PortRegisters,
    S: ErrorSink,
{
    /// Borrow `channel` of `dio`
    pub fn new(dio: &'d mut Dio<'a, R, S>, channel: ChannelId) -> Self {
        Self { dio, channel }
    }

    /// Channel this pin refers to
    pub fn channel(&self) -> ChannelId {
        self.channel
    }
}

impl<R, S> ErrorType for ChannelPin<'_, '_, R, S> {
    type Error = Infallible;
}

impl<R, S> OutputPin for ChannelPin<'_, '_, R, S>
where
    R: PortRegisters,
    S: ErrorSink,
{
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.dio.write_channel(self.channel, Level::Low);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.dio.write_channel(self.channel, Level::High);
        Ok(())
    }
}

impl<R, S> InputPin for ChannelPin<'_, '_, R, S>
where
    R: PortRegisters,
    S: ErrorSink,
{
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        Ok(self.dio.read_channel(self.channel).is_high())
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        Ok(self.dio.read_channel(self.channel).is_low())
    }
}

/// The set state comes from the output latch, so it stays meaningful on
/// pins configured as inputs.
impl<R, S> StatefulOutputPin for ChannelPin<'_, '_, R, S>
where
    R: PortRegisters,
    S: ErrorSink,
{
    fn is_set_high(&mut self) -> Result<bool, Self::Error> {
        Ok(self.dio.read_channel_latch(self.channel).is_high())
    }

    fn is_set_low(&mut self) -> Result<bool, Self::Error> {
        Ok(self.dio.read_channel_latch(self.channel).is_low())
    }

    #[cfg(feature = "flip-channel-api")]
    fn toggle(&mut self) -> Result<(), Self::Error> {
        self.dio.flip_channel(self.channel);
        Ok(())
    }
}
