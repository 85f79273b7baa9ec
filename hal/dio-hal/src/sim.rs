//! In-memory register bank
//!
//! Models the direction/output/input triple of every port without touching
//! hardware. Input bits of pins configured as outputs read back the output
//! latch; input bits of pins configured as inputs read the externally
//! applied level:
//!
//! ```text
//! input = (output & direction) | (external & !direction)
//! ```
//!
//! Every output write is counted so tests can assert that an operation left
//! the hardware untouched.

use crate::gpio::{clear_bit, set_bit, Level, PortId, PortLevel, PORT_COUNT};
use crate::registers::PortRegisters;

/// Register state of one simulated port
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PortSnapshot {
    /// Direction register (1 = output)
    pub direction: PortLevel,
    /// Output latch
    pub output: PortLevel,
    /// Level applied to the pins from outside
    pub external: PortLevel,
}

/// Simulated register bank for ports A-D
#[derive(Debug, Clone, Default)]
pub struct SimulatedPorts {
    ports: [PortSnapshot; PORT_COUNT],
    /// Number of output register writes since creation
    writes: u32,
}

impl SimulatedPorts {
    /// Create a bank with every pin an input, all latches low
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the direction register of `port` (1 = output)
    pub fn set_direction(&mut self, port: PortId, direction: PortLevel) {
        self.port_mut(port).direction = direction;
    }

    /// Configure a single pin as output (`true`) or input (`false`)
    pub fn set_pin_direction(&mut self, port: PortId, pin: u8, output: bool) {
        let regs = self.port_mut(port);
        regs.direction = if output {
            set_bit(regs.direction, pin)
        } else {
            clear_bit(regs.direction, pin)
        };
    }

    /// Apply an external level to every pin of `port`
    pub fn set_external(&mut self, port: PortId, value: PortLevel) {
        self.port_mut(port).external = value;
    }

    /// Apply an external level to a single pin
    pub fn set_external_pin(&mut self, port: PortId, pin: u8, level: Level) {
        let regs = self.port_mut(port);
        regs.external = match level {
            Level::High => set_bit(regs.external, pin),
            Level::Low => clear_bit(regs.external, pin),
        };
    }

    /// Get the register state of `port`
    pub fn snapshot(&self, port: PortId) -> PortSnapshot {
        self.ports[port.index() as usize]
    }

    /// Get the register state of every port
    pub fn snapshot_all(&self) -> [PortSnapshot; PORT_COUNT] {
        self.ports
    }

    /// Number of output register writes performed so far
    pub fn writes(&self) -> u32 {
        self.writes
    }

    fn port_mut(&mut self, port: PortId) -> &mut PortSnapshot {
        &mut self.ports[port.index() as usize]
    }
}

impl PortRegisters for SimulatedPorts {
    fn read_input(&self, port: PortId) -> PortLevel {
        let regs = self.snapshot(port);
        (regs.output & regs.direction) | (regs.external & !regs.direction)
    }

    fn read_output(&self, port: PortId) -> PortLevel {
        self.snapshot(port).output
    }

    fn write_output(&mut self, port: PortId, value: PortLevel) {
        self.port_mut(port).output = value;
        self.writes = self.writes.wrapping_add(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_pins_read_back_latch() {
        let mut ports = SimulatedPorts::new();
        ports.set_direction(PortId::C, 0b0000_1000);

        ports.write_output_bit(PortId::C, 3, Level::High);
        assert_eq!(ports.read_input_bit(PortId::C, 3), Level::High);

        ports.write_output_bit(PortId::C, 3, Level::Low);
        assert_eq!(ports.read_input_bit(PortId::C, 3), Level::Low);
        assert_eq!(ports.writes(), 2);
    }

    #[test]
    fn test_input_pins_read_external() {
        let mut ports = SimulatedPorts::new();
        ports.set_external_pin(PortId::A, 2, Level::High);

        assert_eq!(ports.read_input_bit(PortId::A, 2), Level::High);
        assert_eq!(ports.read_input(PortId::A), 0b0000_0100);

        // Latch is ignored while the pin is an input
        ports.write_output(PortId::A, 0xFF);
        assert_eq!(ports.read_input(PortId::A), 0b0000_0100);
    }

    #[test]
    fn test_mixed_direction_port() {
        let mut ports = SimulatedPorts::new();
        ports.set_pin_direction(PortId::B, 0, true);
        ports.set_external(PortId::B, 0b1111_0000);
        ports.write_output(PortId::B, 0b0000_0001);

        assert_eq!(ports.read_input(PortId::B), 0b1111_0001);
    }

    #[test]
    fn test_ports_are_independent() {
        let mut ports = SimulatedPorts::new();
        ports.write_output(PortId::D, 0xAA);

        assert_eq!(ports.snapshot(PortId::D).output, 0xAA);
        for port in [PortId::A, PortId::B, PortId::C] {
            assert_eq!(ports.snapshot(port), PortSnapshot::default());
        }
    }

    #[test]
    fn test_bit_access_outside_port_width() {
        let mut ports = SimulatedPorts::new();
        ports.set_direction(PortId::C, 0xFF);
        ports.write_output(PortId::C, 0b0000_0010);

        ports.write_output_bit(PortId::C, 9, Level::High);
        assert_eq!(ports.read_output(PortId::C), 0b0000_0010);
        assert_eq!(ports.read_input_bit(PortId::C, 9), Level::Low);
    }
}
