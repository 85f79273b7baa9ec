//! Port register access
//!
//! Each physical port owns three registers: direction, output and input.
//! The direction register belongs to whatever configures the pins (a port
//! driver) and is not part of this trait.

use crate::gpio::{bit_is_set, clear_bit, set_bit, Level, PortId, PortLevel};

/// Register-level access to the digital ports
///
/// Implementations map a [`PortId`] to the input and output registers of
/// that port in one place, so the input and output view of a port can never
/// disagree. Accesses must reach the hardware (volatile on real targets).
///
/// The bit helpers are read-modify-write sequences. They are not atomic:
/// two execution contexts touching the same port must be serialized by the
/// caller.
pub trait PortRegisters {
    /// Read the input (pin) register of `port`
    fn read_input(&self, port: PortId) -> PortLevel;

    /// Read back the output register of `port`
    fn read_output(&self, port: PortId) -> PortLevel;

    /// Write the whole output register of `port`
    fn write_output(&mut self, port: PortId, value: PortLevel);

    /// Drive output bit `pin` of `port` to `level`
    fn write_output_bit(&mut self, port: PortId, pin: u8, level: Level) {
        let current = self.read_output(port);
        let next = match level {
            Level::High => set_bit(current, pin),
            Level::Low => clear_bit(current, pin),
        };
        self.write_output(port, next);
    }

    /// Sample input bit `pin` of `port`
    fn read_input_bit(&self, port: PortId, pin: u8) -> Level {
        Level::from(bit_is_set(self.read_input(port), pin))
    }
}

impl<T: PortRegisters + ?Sized> PortRegisters for &mut T {
    fn read_input(&self, port: PortId) -> PortLevel {
        (**self).read_input(port)
    }

    fn read_output(&self, port: PortId) -> PortLevel {
        (**self).read_output(port)
    }

    fn write_output(&mut self, port: PortId, value: PortLevel) {
        (**self).write_output(port, value)
    }
}
