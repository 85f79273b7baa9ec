//! Channel mapper and accessor
//!
//! [`Dio`] is the driver context. The caller owns it and calls every service
//! on it; several independent instances can coexist.
//!
//! Control flow of every service:
//!
//! ```text
//! caller -> validity checks -> table lookup -> register access -> return
//! ```
//!
//! # Concurrency
//!
//! The driver keeps no cursor state, but write/flip are read-modify-write
//! sequences on the output register. Two execution contexts (threads,
//! interrupts) touching the same port must be serialized by the caller,
//! e.g. with a critical section around the whole call.

use dio_hal::gpio::bit_is_set;
use dio_hal::{Level, PortId, PortLevel, PortRegisters};

use crate::channel::{ChannelDescriptor, ChannelId, ChannelTable};
use crate::pin::ChannelPin;
use crate::report::{DioError, ErrorSink, ServiceId};
#[cfg(feature = "version-info-api")]
use crate::version::VersionInfo;

/// Default level returned when a channel read fails its checks
pub const DEFAULT_LEVEL: Level = Level::Low;

/// Default value returned when a port read fails its checks
pub const DEFAULT_PORT_LEVEL: PortLevel = 0;

/// Driver lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ModuleState {
    NotInitialized,
    Initialized,
}

/// Digital I/O driver context
///
/// Generic parameters:
/// - `R`: register bank the channels live in
/// - `S`: sink receiving development errors
pub struct Dio<'a, R, S> {
    registers: R,
    sink: S,
    table: Option<ChannelTable<'a>>,
}

impl<'a, R, S> Dio<'a, R, S>
where
    R: PortRegisters,
    S: ErrorSink,
{
    /// Create an uninitialized driver
    pub fn new(registers: R, sink: S) -> Self {
        Self {
            registers,
            sink,
            table: None,
        }
    }

    /// Initialize the driver with a channel table
    ///
    /// `None` stands for a missing configuration: it is reported and the
    /// driver stays in its previous state. Calling this again replaces the
    /// table.
    pub fn init(&mut self, config: Option<ChannelTable<'a>>) {
        match config {
            Some(table) => {
                #[cfg(feature = "defmt")]
                defmt::info!("DIO initialized with {=usize} channels", table.len());
                self.table = Some(table);
            }
            None => self.report(ServiceId::Init, DioError::ParamConfig),
        }
    }

    /// Current lifecycle state
    pub fn state(&self) -> ModuleState {
        if self.table.is_some() {
            ModuleState::Initialized
        } else {
            ModuleState::NotInitialized
        }
    }

    /// Number of configured channels (0 before init)
    pub fn channel_count(&self) -> usize {
        self.table.map_or(0, |t| t.len())
    }

    /// Drive a channel to `level`
    ///
    /// Dropped (no register access) if the checks fail.
    pub fn write_channel(&mut self, id: ChannelId, level: Level) {
        if let Some(ch) = self.channel(ServiceId::WriteChannel, id) {
            self.registers.write_output_bit(ch.port(), ch.pin(), level);
        }
    }

    /// Read the level of a channel from its input register
    ///
    /// Returns [`DEFAULT_LEVEL`] if the checks fail.
    pub fn read_channel(&mut self, id: ChannelId) -> Level {
        match self.channel(ServiceId::ReadChannel, id) {
            Some(ch) => self.registers.read_input_bit(ch.port(), ch.pin()),
            None => DEFAULT_LEVEL,
        }
    }

    /// Invert a channel and return its new level
    ///
    /// The current level is sampled from the input register of the same
    /// port the output is written to. Returns [`DEFAULT_LEVEL`] without
    /// touching the registers if the checks fail.
    #[cfg(feature = "flip-channel-api")]
    pub fn flip_channel(&mut self, id: ChannelId) -> Level {
        match self.channel(ServiceId::FlipChannel, id) {
            Some(ch) => {
                let level = !self.registers.read_input_bit(ch.port(), ch.pin());
                self.registers.write_output_bit(ch.port(), ch.pin(), level);
                level
            }
            None => DEFAULT_LEVEL,
        }
    }

    /// Level a channel's output latch is set to
    ///
    /// Checked and reported like [`Dio::read_channel`].
    pub(crate) fn read_channel_latch(&mut self, id: ChannelId) -> Level {
        match self.channel(ServiceId::ReadChannel, id) {
            Some(ch) => Level::from(bit_is_set(
                self.registers.read_output(ch.port()),
                ch.pin(),
            )),
            None => DEFAULT_LEVEL,
        }
    }

    /// Read the raw input register of a port
    ///
    /// The port must carry at least one configured channel. All bits are
    /// returned, including pins that no channel refers to. Returns
    /// [`DEFAULT_PORT_LEVEL`] if the checks fail.
    pub fn read_port(&mut self, port: u8) -> PortLevel {
        match self.port(ServiceId::ReadPort, port) {
            Some(port) => self.registers.read_input(port),
            None => DEFAULT_PORT_LEVEL,
        }
    }

    /// Write the whole output register of a port
    ///
    /// Same checks as [`Dio::read_port`]. Every bit is written, including
    /// pins that no channel refers to.
    pub fn write_port(&mut self, port: u8, level: PortLevel) {
        if let Some(port) = self.port(ServiceId::WritePort, port) {
            self.registers.write_output(port, level);
        }
    }

    /// Copy the version information into `out`
    ///
    /// `None` stands for a missing output location and is reported.
    #[cfg(feature = "version-info-api")]
    pub fn get_version_info(&mut self, out: Option<&mut VersionInfo>) {
        match out {
            Some(out) => *out = VersionInfo::current(),
            None => self.report(ServiceId::GetVersionInfo, DioError::ParamPointer),
        }
    }

    /// Version information of the driver
    #[cfg(feature = "version-info-api")]
    pub const fn version_info() -> VersionInfo {
        VersionInfo::current()
    }

    /// Borrow a single channel as an `embedded-hal` pin
    pub fn pin(&mut self, id: ChannelId) -> ChannelPin<'_, 'a, R, S> {
        ChannelPin::new(self, id)
    }

    /// Get the register bank
    pub fn registers(&self) -> &R {
        &self.registers
    }

    /// Get the register bank mutably (e.g. for the port driver)
    pub fn registers_mut(&mut self) -> &mut R {
        &mut self.registers
    }

    /// Get the error sink
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Get the error sink mutably
    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    /// Take the driver apart
    pub fn into_parts(self) -> (R, S) {
        (self.registers, self.sink)
    }

    /// Resolve a channel id, reporting any violation
    fn channel(&mut self, service: ServiceId, id: ChannelId) -> Option<ChannelDescriptor> {
        let Some(table) = self.table else {
            self.report(service, DioError::Uninit);
            return None;
        };
        match table.get(id) {
            Some(ch) => Some(*ch),
            None => {
                self.report(service, DioError::ParamInvalidChannelId);
                None
            }
        }
    }

    /// Resolve a port id, reporting any violation
    #[cfg(feature = "dev-error-detect")]
    fn port(&mut self, service: ServiceId, raw: u8) -> Option<PortId> {
        let Some(table) = self.table else {
            self.report(service, DioError::Uninit);
            return None;
        };
        match PortId::from_index(raw) {
            Ok(port) if table.contains_port(port) => Some(port),
            _ => {
                self.report(service, DioError::ParamInvalidPortId);
                None
            }
        }
    }

    /// Resolve a port id without checking the channel table
    #[cfg(not(feature = "dev-error-detect"))]
    fn port(&mut self, _service: ServiceId, raw: u8) -> Option<PortId> {
        PortId::from_index(raw).ok()
    }

    fn report(&mut self, service: ServiceId, error: DioError) {
        #[cfg(feature = "dev-error-detect")]
        {
            #[cfg(feature = "defmt")]
            defmt::warn!("DIO {} rejected: {}", service, error);
            self.sink
                .report_error(crate::report::ErrorReport::new(service, error));
        }
        #[cfg(not(feature = "dev-error-detect"))]
        let _ = (service, error);
    }
}

#[cfg(all(
    test,
    feature = "dev-error-detect",
    feature = "flip-channel-api",
    feature = "version-info-api"
))]
mod tests {
    use super::*;
    use crate::report::{ErrorReport, RecordingSink};
    use dio_hal::SimulatedPorts;

    static TABLE: [ChannelDescriptor; 4] = [
        ChannelDescriptor::new(PortId::C, 3),
        ChannelDescriptor::new(PortId::D, 6),
        ChannelDescriptor::new(PortId::A, 2),
        ChannelDescriptor::new(PortId::B, 4),
    ];

    type TestDio = Dio<'static, SimulatedPorts, RecordingSink<8>>;

    fn uninit() -> TestDio {
        let mut ports = SimulatedPorts::new();
        ports.set_pin_direction(PortId::C, 3, true);
        ports.set_pin_direction(PortId::D, 6, true);
        Dio::new(ports, RecordingSink::new())
    }

    fn initialized() -> TestDio {
        let mut dio = uninit();
        dio.init(Some(ChannelTable::new(&TABLE)));
        dio
    }

    fn only_report(dio: &TestDio) -> ErrorReport {
        assert_eq!(dio.sink().count(), 1, "expected exactly one report");
        dio.sink().reports()[0]
    }

    #[test]
    fn test_init() {
        let mut dio = uninit();
        assert_eq!(dio.state(), ModuleState::NotInitialized);
        assert_eq!(dio.channel_count(), 0);

        dio.init(Some(ChannelTable::new(&TABLE)));
        assert_eq!(dio.state(), ModuleState::Initialized);
        assert_eq!(dio.channel_count(), 4);
        assert_eq!(dio.sink().count(), 0);
    }

    #[test]
    fn test_init_without_config() {
        let mut dio = uninit();
        dio.init(None);

        assert_eq!(dio.state(), ModuleState::NotInitialized);
        let report = only_report(&dio);
        assert_eq!(report.service, ServiceId::Init);
        assert_eq!(report.error, DioError::ParamConfig);
    }

    #[test]
    fn test_init_twice_replaces_table() {
        let mut dio = initialized();
        dio.init(Some(ChannelTable::new(&TABLE[..2])));
        assert_eq!(dio.channel_count(), 2);

        // Failed re-init keeps the stored table
        dio.init(None);
        assert_eq!(dio.state(), ModuleState::Initialized);
        assert_eq!(dio.channel_count(), 2);
    }

    #[test]
    fn test_write_channel_sets_output_bit() {
        let mut dio = initialized();
        dio.write_channel(0, Level::High);

        assert_eq!(dio.registers().snapshot(PortId::C).output, 0b0000_1000);
        for port in [PortId::A, PortId::B, PortId::D] {
            assert_eq!(dio.registers().snapshot(port).output, 0);
        }

        dio.write_channel(0, Level::Low);
        assert_eq!(dio.registers().snapshot(PortId::C).output, 0);
        assert_eq!(dio.sink().count(), 0);
    }

    #[test]
    fn test_write_preserves_other_bits() {
        let mut dio = initialized();
        dio.registers_mut().write_output(PortId::D, 0b1000_0001);

        dio.write_channel(1, Level::High);
        assert_eq!(dio.registers().snapshot(PortId::D).output, 0b1100_0001);

        dio.write_channel(1, Level::Low);
        assert_eq!(dio.registers().snapshot(PortId::D).output, 0b1000_0001);
    }

    #[test]
    fn test_read_channel_reflects_input() {
        let mut dio = initialized();
        assert_eq!(dio.read_channel(2), Level::Low);

        dio.registers_mut().set_external_pin(PortId::A, 2, Level::High);
        assert_eq!(dio.read_channel(2), Level::High);

        // Neighbouring bits do not leak into the channel
        dio.registers_mut().set_external(PortId::A, 0b1111_1011);
        assert_eq!(dio.read_channel(2), Level::Low);
    }

    #[test]
    fn test_flip_channel() {
        let mut dio = initialized();

        assert_eq!(dio.flip_channel(1), Level::High);
        assert_eq!(dio.registers().snapshot(PortId::D).output, 0b0100_0000);
        assert_eq!(dio.read_channel(1), Level::High);

        assert_eq!(dio.flip_channel(1), Level::Low);
        assert_eq!(dio.registers().snapshot(PortId::D).output, 0);
    }

    #[test]
    fn test_flip_samples_input_register() {
        let mut dio = initialized();
        // Input pin held high externally: flip drives the latch low
        dio.registers_mut().set_external_pin(PortId::A, 2, Level::High);
        dio.registers_mut().write_output(PortId::A, 0b0000_0100);

        assert_eq!(dio.flip_channel(2), Level::Low);
        assert_eq!(dio.registers().snapshot(PortId::A).output, 0);
    }

    #[test]
    fn test_uninit_channel_access() {
        let mut dio = uninit();

        dio.write_channel(0, Level::High);
        assert_eq!(only_report(&dio).error, DioError::Uninit);
        assert_eq!(only_report(&dio).service, ServiceId::WriteChannel);

        dio.sink_mut().clear();
        assert_eq!(dio.read_channel(0), Level::Low);
        assert_eq!(only_report(&dio).service, ServiceId::ReadChannel);

        dio.sink_mut().clear();
        assert_eq!(dio.flip_channel(0), Level::Low);
        assert_eq!(only_report(&dio).service, ServiceId::FlipChannel);

        assert_eq!(dio.registers().writes(), 0);
    }

    #[test]
    fn test_channel_id_boundary() {
        let mut dio = initialized();
        let past_end = TABLE.len() as ChannelId;

        dio.write_channel(past_end, Level::High);
        assert_eq!(only_report(&dio).error, DioError::ParamInvalidChannelId);

        dio.sink_mut().clear();
        assert_eq!(dio.read_channel(past_end), Level::Low);
        assert_eq!(only_report(&dio).error, DioError::ParamInvalidChannelId);

        dio.sink_mut().clear();
        assert_eq!(dio.flip_channel(past_end), Level::Low);
        assert_eq!(only_report(&dio).error, DioError::ParamInvalidChannelId);

        assert_eq!(dio.registers().writes(), 0);

        // Last valid id is accepted
        dio.sink_mut().clear();
        dio.write_channel(past_end - 1, Level::High);
        assert_eq!(dio.sink().count(), 0);
    }

    #[test]
    fn test_read_port_returns_raw_register() {
        let mut dio = initialized();
        // Bits without a channel are returned as-is
        dio.registers_mut().set_external(PortId::A, 0b1010_0101);

        assert_eq!(dio.read_port(PortId::A.index()), 0b1010_0101);
        assert_eq!(dio.sink().count(), 0);
    }

    #[test]
    fn test_read_port_unconfigured() {
        let mut ports = SimulatedPorts::new();
        ports.set_external(PortId::A, 0xFF);
        let mut dio: TestDio = Dio::new(ports, RecordingSink::new());
        dio.init(Some(ChannelTable::new(&TABLE[..2])));

        // Port A is real but carries no channel in this table
        assert_eq!(dio.read_port(PortId::A.index()), DEFAULT_PORT_LEVEL);
        let report = only_report(&dio);
        assert_eq!(report.service, ServiceId::ReadPort);
        assert_eq!(report.error, DioError::ParamInvalidPortId);
    }

    #[test]
    fn test_read_port_unmapped_index() {
        let mut dio = initialized();
        assert_eq!(dio.read_port(4), DEFAULT_PORT_LEVEL);
        assert_eq!(only_report(&dio).error, DioError::ParamInvalidPortId);

        dio.sink_mut().clear();
        assert_eq!(dio.read_port(u8::MAX), DEFAULT_PORT_LEVEL);
        assert_eq!(only_report(&dio).error, DioError::ParamInvalidPortId);
    }

    #[test]
    fn test_read_port_uninit() {
        let mut dio = uninit();
        assert_eq!(dio.read_port(PortId::C.index()), DEFAULT_PORT_LEVEL);
        assert_eq!(only_report(&dio).error, DioError::Uninit);
    }

    #[test]
    fn test_write_port() {
        let mut dio = initialized();
        dio.write_port(PortId::C.index(), 0x5A);
        assert_eq!(dio.registers().snapshot(PortId::C).output, 0x5A);

        dio.write_port(7, 0xFF);
        assert_eq!(only_report(&dio).service, ServiceId::WritePort);
        assert_eq!(dio.registers().writes(), 1);
    }

    #[test]
    fn test_version_info() {
        let mut dio = uninit();
        let mut info = VersionInfo::default();
        dio.get_version_info(Some(&mut info));

        assert_eq!(info, VersionInfo::current());
        assert_eq!(info.module_id, 120);
        assert_eq!(dio.sink().count(), 0);

        dio.get_version_info(None);
        let report = only_report(&dio);
        assert_eq!(report.service, ServiceId::GetVersionInfo);
        assert_eq!(report.error, DioError::ParamPointer);
    }

    #[test]
    fn test_independent_instances() {
        let mut a = initialized();
        let mut b = uninit();

        a.write_channel(0, Level::High);
        b.write_channel(0, Level::High);

        assert_eq!(a.registers().snapshot(PortId::C).output, 0b0000_1000);
        assert_eq!(b.registers().writes(), 0);
        assert_eq!(a.sink().count(), 0);
        assert_eq!(b.sink().count(), 1);
    }
}
