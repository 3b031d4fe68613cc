//! Scan mode, authentication and encryption switches.
//!
//! These have no numeric form on the command line: each setting is selected by its own command
//! token.

bitflags::bitflags! {
    /// Which scans the controller performs. An empty set disables scanning.
    #[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
    pub struct ScanMode : u32 {
        /// Inquiry scan: the controller is discoverable.
        const INQUIRY = 0x01;
        /// Page scan: the controller is connectable.
        const PAGE = 0x02;
    }
}

impl ScanMode {
    /// Scanning disabled.
    pub const DISABLED: ScanMode = ScanMode::empty();

    /// Returns the control request's option word.
    pub fn option_word(&self) -> u32 {
        self.bits()
    }
}

/// Whether the controller requires authentication for every connection.
#[repr(u32)]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum AuthMode {
    /// `noauth`
    Disabled = 0x00,
    /// `auth`
    Enabled = 0x01,
}

impl AuthMode {
    /// Returns the control request's option word.
    pub fn option_word(&self) -> u32 {
        *self as u32
    }
}

/// Whether the controller encrypts point-to-point traffic.
#[repr(u32)]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum EncryptMode {
    /// `noencrypt`
    Disabled = 0x00,
    /// `encrypt`: point-to-point encryption.
    PointToPoint = 0x01,
}

impl EncryptMode {
    /// Returns the control request's option word.
    pub fn option_word(&self) -> u32 {
        *self as u32
    }
}
