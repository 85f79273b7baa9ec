//! Module identity and version information

/// Vendor id reported by this implementation
pub const VENDOR_ID: u16 = 1000;

/// DIO module id
pub const MODULE_ID: u16 = 120;

/// Instance id (a single driver instance per module)
pub const INSTANCE_ID: u8 = 0;

/// Software version
pub const SW_MAJOR_VERSION: u8 = 1;
pub const SW_MINOR_VERSION: u8 = 0;
pub const SW_PATCH_VERSION: u8 = 0;

/// Architecture release the services follow (4.0.3)
pub const AR_RELEASE_MAJOR_VERSION: u8 = 4;
pub const AR_RELEASE_MINOR_VERSION: u8 = 0;
pub const AR_RELEASE_PATCH_VERSION: u8 = 3;

/// Version information returned by `get_version_info`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct VersionInfo {
    pub vendor_id: u16,
    pub module_id: u16,
    pub sw_major_version: u8,
    pub sw_minor_version: u8,
    pub sw_patch_version: u8,
}

impl VersionInfo {
    /// Version information of this module
    pub const fn current() -> Self {
        Self {
            vendor_id: VENDOR_ID,
            module_id: MODULE_ID,
            sw_major_version: SW_MAJOR_VERSION,
            sw_minor_version: SW_MINOR_VERSION,
            sw_patch_version: SW_PATCH_VERSION,
        }
    }
}
