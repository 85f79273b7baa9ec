//! Development error reporting
//!
//! Services never return errors. A violated precondition is delivered to an
//! [`ErrorSink`] as an [`ErrorReport`] and the service continues on its
//! default path. The sink is injected into [`crate::Dio`], so tests can use
//! a [`RecordingSink`] and firmware can forward reports to its logger.

use heapless::Vec;

use crate::version::{INSTANCE_ID, MODULE_ID};

/// Development error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum DioError {
    /// Channel id is not in the channel table
    ParamInvalidChannelId = 0x0A,
    /// Missing configuration passed to init
    ParamConfig = 0x10,
    /// Port id names no configured port
    ParamInvalidPortId = 0x14,
    /// Missing output location
    ParamPointer = 0x20,
    /// Service called before init
    Uninit = 0xF0,
}

impl DioError {
    /// Get the raw error code
    pub fn code(self) -> u8 {
        self as u8
    }
}

/// Service identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum ServiceId {
    ReadChannel = 0x00,
    WriteChannel = 0x01,
    ReadPort = 0x02,
    WritePort = 0x03,
    Init = 0x10,
    FlipChannel = 0x11,
    GetVersionInfo = 0x12,
}

impl ServiceId {
    /// Get the raw service id
    pub fn id(self) -> u8 {
        self as u8
    }
}

/// One precondition violation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ErrorReport {
    /// Reporting module
    pub module_id: u16,
    /// Instance of the module
    pub instance_id: u8,
    /// Service that detected the violation
    pub service: ServiceId,
    /// What went wrong
    pub error: DioError,
}

impl ErrorReport {
    /// Create a report for this module
    pub fn new(service: ServiceId, error: DioError) -> Self {
        Self {
            module_id: MODULE_ID,
            instance_id: INSTANCE_ID,
            service,
            error,
        }
    }
}

/// Receiver of development errors
///
/// Reporting is fire-and-forget: nothing is returned to the driver.
pub trait ErrorSink {
    /// Record one violation
    fn report_error(&mut self, report: ErrorReport);
}

impl<T: ErrorSink + ?Sized> ErrorSink for &mut T {
    fn report_error(&mut self, report: ErrorReport) {
        (**self).report_error(report)
    }
}

/// Sink that discards every report
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopSink;

impl ErrorSink for NoopSink {
    fn report_error(&mut self, _report: ErrorReport) {}
}

/// Sink that keeps the first `N` reports
///
/// Reports beyond capacity are counted but not stored.
#[derive(Debug, Clone, Default)]
pub struct RecordingSink<const N: usize> {
    reports: Vec<ErrorReport, N>,
    dropped: u32,
}

impl<const N: usize> RecordingSink<N> {
    /// Create an empty sink
    pub fn new() -> Self {
        Self {
            reports: Vec::new(),
            dropped: 0,
        }
    }

    /// Stored reports, oldest first
    pub fn reports(&self) -> &[ErrorReport] {
        &self.reports
    }

    /// Total number of reports received
    pub fn count(&self) -> usize {
        self.reports.len() + self.dropped as usize
    }

    /// Most recent stored report
    pub fn last(&self) -> Option<&ErrorReport> {
        self.reports.last()
    }

    /// Number of reports that did not fit
    pub fn dropped(&self) -> u32 {
        self.dropped
    }

    /// Forget all reports
    pub fn clear(&mut self) {
        self.reports.clear();
        self.dropped = 0;
    }
}

impl<const N: usize> ErrorSink for RecordingSink<N> {
    fn report_error(&mut self, report: ErrorReport) {
        if self.reports.push(report).is_err() {
            self.dropped = self.dropped.saturating_add(1);
        }
    }
}

/// Sink that forwards every report to a closure
pub struct CallbackSink<F>(pub F);

impl<F: FnMut(ErrorReport)> ErrorSink for CallbackSink<F> {
    fn report_error(&mut self, report: ErrorReport) {
        (self.0)(report)
    }
}

/// Sink that logs every report through defmt
#[cfg(feature = "defmt")]
#[derive(Debug, Clone, Copy, Default)]
pub struct DefmtSink;

#[cfg(feature = "defmt")]
impl ErrorSink for DefmtSink {
    fn report_error(&mut self, report: ErrorReport) {
        defmt::error!(
            "DET module={=u16} instance={=u8} service={} error={}",
            report.module_id,
            report.instance_id,
            report.service,
            report.error
        );
    }
}
