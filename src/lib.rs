//! Configure and query local Bluetooth controllers through the Linux HCI.
//!
//! This crate is the engine behind the `hciconfig` binary. It maps human-readable option tokens to
//! the binary structures that the two host-side channels require, dispatches each token to the
//! right handler, and decodes the controller's answers for display.
//!
//! # Design
//!
//! There are two ways to change a controller:
//!
//! - The **control plane** ([`control`]) is a one-way request addressed by device index carrying a
//!   single option word: bring the device up or down, set scan mode, authentication, encryption,
//!   packet types, link policy, link mode, and buffer sizes. The kernel applies these and answers
//!   with success or an OS error.
//!
//! - The **command/response channel** ([`command`], built on [`host::Hci`]) sends an HCI command to
//!   the controller itself and waits (bounded by [`COMMAND_TIMEOUT`]) for the matching Command
//!   Complete event. The return parameters always begin with a [`Status`] byte, which is verified
//!   before any other field is decoded.
//!
//! Both channels are reached through the [`transport::Transport`] trait, so the protocol logic is
//! agnostic about the actual OS interface. A raw-socket implementation for Linux lives in
//! [`transport::linux`].
//!
//! Every operation is synchronous and single-attempt: any failure aborts the whole invocation.

#![deny(missing_docs)]

#[macro_use]
pub mod event;

pub mod command;
pub mod control;
pub mod dispatch;
pub mod error;
pub mod host;
pub mod info;
pub mod names;
#[allow(missing_docs)]
pub mod opcode;
pub mod transport;
pub mod types;

pub use error::{Error, Result};
pub use event::Event;
pub use opcode::Opcode;

use core::fmt;
use core::str::FromStr;
use std::time::Duration;

/// Bound on every command/response exchange.
pub const COMMAND_TIMEOUT: Duration = Duration::from_millis(1000);

/// Maximum number of devices requested when enumerating controllers.
pub const MAX_DEVICES: usize = 16;

/// Index of a local controller, as used by the kernel (`hci0`, `hci1`, ...).
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DeviceId(pub u16);

impl fmt::Display for DeviceId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "hci{}", self.0)
    }
}

impl FromStr for DeviceId {
    type Err = Error;

    /// Parses a device token of the form `hciN`.
    fn from_str(s: &str) -> Result<DeviceId> {
        let index = s
            .strip_prefix("hci")
            .filter(|rest| !rest.is_empty() && rest.bytes().all(|b| b.is_ascii_digit()))
            .ok_or_else(|| Error::InvalidDevice(s.to_string()))?;

        index
            .parse()
            .map(DeviceId)
            .map_err(|_| Error::InvalidDevice(s.to_string()))
    }
}

/// A Bluetooth device address.
///
/// The bytes are kept in the order they cross the HCI: least significant byte first. The display
/// form swaps them into the conventional most-significant-first notation.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct BdAddr(pub [u8; 6]);

impl fmt::Display for BdAddr {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let b = &self.0;
        write!(
            f,
            "{:02X}:{:02X}:{:02X}:{:02X}:{:02X}:{:02X}",
            b[5], b[4], b[3], b[2], b[1], b[0]
        )
    }
}

/// The one-byte status code that starts every set of return parameters, and that the Command
/// Status event carries. See the Bluetooth Spec, Vol 2, Part D, Section 2.
///
/// Only `0x00` means success. The wrapped value is kept as-is so that codes this crate does not
/// know by name can still be reported.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Status(pub u8);

impl Status {
    /// The success code.
    pub const SUCCESS: Status = Status(0x00);

    /// Returns true if the status reports success.
    pub fn is_success(&self) -> bool {
        *self == Status::SUCCESS
    }

    /// Returns the Bluetooth Core name of the error code, if it is one this crate knows.
    pub fn description(&self) -> Option<&'static str> {
        let name = match self.0 {
            0x00 => "Success",
            0x01 => "Unknown HCI Command",
            0x02 => "Unknown Connection Identifier",
            0x03 => "Hardware Failure",
            0x04 => "Page Timeout",
            0x05 => "Authentication Failure",
            0x06 => "PIN or Key Missing",
            0x07 => "Memory Capacity Exceeded",
            0x08 => "Connection Timeout",
            0x09 => "Connection Limit Exceeded",
            0x0A => "Synchronous Connection Limit To A Device Exceeded",
            0x0B => "Connection Already Exists",
            0x0C => "Command Disallowed",
            0x0D => "Connection Rejected due to Limited Resources",
            0x0E => "Connection Rejected Due To Security Reasons",
            0x0F => "Connection Rejected due to Unacceptable BD_ADDR",
            0x10 => "Connection Accept Timeout Exceeded",
            0x11 => "Unsupported Feature or Parameter Value",
            0x12 => "Invalid HCI Command Parameters",
            0x1F => "Unspecified Error",
            0x20 => "Unsupported LMP Parameter Value",
            0x30 => "Parameter Out Of Mandatory Range",
            0x3A => "Controller Busy",
            _ => return None,
        };

        Some(name)
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
