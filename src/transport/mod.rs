//! The operating-system side of both channels.
//!
//! [`Transport`] is the raw control handle: it enumerates devices, reports their state, applies
//! [`ControlRequest`]s and opens command sessions. [`Controller`] is one such session, a
//! packet-oriented link to a single controller over which [`crate::host::Hci`] runs its
//! command/response exchanges.
//!
//! Both traits use `std::io::Error` for failures so that the OS error text reaches the user
//! unchanged.

#[cfg(target_os = "linux")]
pub mod linux;

use crate::types::{
    AuthMode, DeviceInfo, EncryptMode, LinkMode, LinkPolicy, Mtu, PacketType, ScanMode,
};
use crate::DeviceId;
use std::io;

/// A session with one controller, able to send command packets and read event packets.
///
/// Device crates implement this trait; [`crate::host::Hci`] provides the command/response
/// protocol on top of it.
pub trait Controller {
    /// Communication errors.
    type Error;

    /// Writes one command packet to the controller: all of `header`, followed by all of
    /// `payload`. Returns `nb::Error::WouldBlock` if the controller cannot accept the packet yet.
    fn write(&mut self, header: &[u8], payload: &[u8]) -> nb::Result<(), Self::Error>;

    /// Reads one complete packet, including its packet indicator, into `buffer` and returns its
    /// length. Returns `nb::Error::WouldBlock` if no packet is available yet.
    fn read_into(&mut self, buffer: &mut [u8]) -> nb::Result<usize, Self::Error>;
}

/// A control-plane operation and the option word it carries.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ControlOp {
    /// Open and initialize the device.
    Up,
    /// Close the device.
    Down,
    /// Zero the traffic counters.
    ResetStats,
    /// Set the scan mode.
    Scan(ScanMode),
    /// Enable or disable authentication.
    Auth(AuthMode),
    /// Enable or disable encryption.
    Encrypt(EncryptMode),
    /// Set the default packet types.
    PacketType(PacketType),
    /// Set the default link policy.
    LinkPolicy(LinkPolicy),
    /// Set the default link mode.
    LinkMode(LinkMode),
    /// Set the ACL buffer size.
    AclMtu(Mtu),
    /// Set the SCO buffer size.
    ScoMtu(Mtu),
}

impl ControlOp {
    /// Returns the option word of the request. Operations without an option carry zero.
    pub fn option_word(&self) -> u32 {
        match self {
            ControlOp::Up | ControlOp::Down | ControlOp::ResetStats => 0,
            ControlOp::Scan(mode) => mode.option_word(),
            ControlOp::Auth(mode) => mode.option_word(),
            ControlOp::Encrypt(mode) => mode.option_word(),
            ControlOp::PacketType(ptype) => ptype.bits(),
            ControlOp::LinkPolicy(policy) => policy.bits(),
            ControlOp::LinkMode(mode) => mode.bits(),
            ControlOp::AclMtu(mtu) | ControlOp::ScoMtu(mtu) => mtu.option_word(),
        }
    }
}

/// A one-way configuration request for one device.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ControlRequest {
    /// The device to configure.
    pub device: DeviceId,
    /// What to do.
    pub op: ControlOp,
}

/// Raw control handle to the local controllers.
pub trait Transport {
    /// Command session type returned by [`open_session`](Transport::open_session).
    type Session: Controller<Error = io::Error>;

    /// Lists the indices of at most `max` devices.
    fn device_list(&mut self, max: usize) -> io::Result<Vec<DeviceId>>;

    /// Fetches the current information for one device.
    fn device_info(&mut self, device: DeviceId) -> io::Result<DeviceInfo>;

    /// Applies a control request and blocks until the kernel acknowledges it.
    fn control(&mut self, request: ControlRequest) -> io::Result<()>;

    /// Opens a command session bound to one device.
    fn open_session(&mut self, device: DeviceId) -> io::Result<Self::Session>;
}
