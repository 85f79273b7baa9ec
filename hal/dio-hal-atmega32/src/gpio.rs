//! Port registers for the ATmega32
//!
//! Every port has three registers in the I/O space, in ascending address
//! order: PINx (input), DDRx (direction), PORTx (output).

use dio_hal::{PortId, PortLevel, PortRegisters, PORT_WIDTH};

/// Data-space address of I/O register 0x00
pub const IO_BASE: usize = 0x20;

/// I/O-space offsets of the three registers belonging to one port
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RegisterBlock {
    /// PINx
    pub input: usize,
    /// DDRx
    pub direction: usize,
    /// PORTx
    pub output: usize,
}

impl RegisterBlock {
    /// Look up the register block of `port`
    pub const fn of(port: PortId) -> Self {
        let input = match port {
            PortId::A => 0x19,
            PortId::B => 0x16,
            PortId::C => 0x13,
            PortId::D => 0x10,
        };
        Self {
            input,
            direction: input + 1,
            output: input + 2,
        }
    }
}

/// Parse a datasheet pin name like "PC3" into its port and bit
///
/// The leading `P` and the port letter are case-insensitive. Returns `None`
/// for unknown ports and for bits outside the port.
pub fn parse_pin(name: &str) -> Option<(PortId, u8)> {
    let mut chars = name.trim().chars();
    if !chars.next()?.eq_ignore_ascii_case(&'P') {
        return None;
    }
    let port = PortId::from_letter(chars.next()?)?;
    let pin: u8 = chars.as_str().parse().ok()?;
    if pin >= PORT_WIDTH {
        return None;
    }
    Some((port, pin))
}

/// Memory-mapped register bank of ports A-D
pub struct Atmega32Ports {
    io_base: *mut u8,
}

impl Atmega32Ports {
    /// Take the bank at the chip's fixed I/O address
    ///
    /// # Safety
    /// Must only be called on an ATmega32. The caller is responsible for not
    /// creating a second handle that writes the same ports concurrently.
    pub unsafe fn steal() -> Self {
        Self {
            io_base: IO_BASE as *mut u8,
        }
    }

    /// Use a bank whose I/O space starts at `io_base`
    ///
    /// # Safety
    /// `io_base` must be valid for volatile reads and writes of at least
    /// 0x1C bytes for as long as the bank is used.
    pub unsafe fn from_io_base(io_base: *mut u8) -> Self {
        Self { io_base }
    }

    /// Set the direction register of `port` (1 = output)
    pub fn set_direction(&mut self, port: PortId, direction: PortLevel) {
        self.write(RegisterBlock::of(port).direction, direction);
    }

    /// Read the direction register of `port`
    pub fn direction(&self, port: PortId) -> PortLevel {
        self.read(RegisterBlock::of(port).direction)
    }

    fn read(&self, offset: usize) -> PortLevel {
        // SAFETY: the constructor contract covers every offset RegisterBlock yields
        unsafe { self.io_base.add(offset).read_volatile() }
    }

    fn write(&mut self, offset: usize, value: PortLevel) {
        // SAFETY: see `read`
        unsafe { self.io_base.add(offset).write_volatile(value) }
    }
}

impl PortRegisters for Atmega32Ports {
    fn read_input(&self, port: PortId) -> PortLevel {
        self.read(RegisterBlock::of(port).input)
    }

    fn read_output(&self, port: PortId) -> PortLevel {
        self.read(RegisterBlock::of(port).output)
    }

    fn write_output(&mut self, port: PortId, value: PortLevel) {
        #[cfg(feature = "defmt")]
        defmt::trace!("PORT{=char} <- {=u8:#x}", port.letter(), value);
        self.write(RegisterBlock::of(port).output, value);
    }
}
