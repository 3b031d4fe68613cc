//! Errors that end an invocation.
//!
//! Each variant carries the device and the operation that failed, so the message printed for it
//! names both along with the underlying cause. Out-of-range parameter values are not errors; they
//! are reported as warnings and the operation proceeds.

use crate::types::ParseError;
use crate::{host, DeviceId, Status};
use std::io;

/// Failure of a command/response exchange, over the OS session error type.
pub type ExchangeError = host::Error<io::Error>;

/// Every failure the library reports.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The device token is not `hci` followed by a decimal index.
    #[error("Invalid device '{0}'")]
    InvalidDevice(String),

    /// The raw control handle could not be opened.
    #[error("Can't open HCI socket. {0}")]
    Open(#[source] io::Error),

    /// The device roster could not be fetched.
    #[error("Can't get device list. {0}")]
    DeviceList(#[source] io::Error),

    /// The information for one device could not be fetched.
    #[error("Can't get device info for {device}. {source}")]
    DeviceInfo {
        /// Device queried.
        device: DeviceId,
        /// OS error.
        source: io::Error,
    },

    /// A control request failed.
    #[error("Can't {op} {device}. {source}")]
    Control {
        /// Device addressed.
        device: DeviceId,
        /// What was attempted, phrased to precede the device name (`init device`).
        op: &'static str,
        /// OS error.
        source: io::Error,
    },

    /// A command session could not be opened.
    #[error("Can't open device {device}. {source}")]
    Session {
        /// Device addressed.
        device: DeviceId,
        /// OS error.
        source: io::Error,
    },

    /// A command could not be sent, or its answer did not arrive or could not be decoded.
    #[error("Can't {op} on {device}. {source}")]
    Command {
        /// Device addressed.
        device: DeviceId,
        /// What was attempted (`read local name`).
        op: &'static str,
        /// Exchange failure.
        source: ExchangeError,
    },

    /// The controller answered a command with a failure status.
    #[error("{} on {} returned status {}", capitalize(.op), .device, .status)]
    Status {
        /// Device addressed.
        device: DeviceId,
        /// What was attempted (`read local name`).
        op: &'static str,
        /// The status the controller reported.
        status: Status,
    },

    /// An option string could not be parsed.
    #[error("Invalid argument for '{command}'. {source}")]
    InvalidOption {
        /// Command the option belongs to.
        command: &'static str,
        /// Parse failure.
        source: ParseError,
    },

    /// A command that requires an option was given none.
    #[error("'{command}' requires an argument {placeholder}")]
    MissingArgument {
        /// Command missing its option.
        command: &'static str,
        /// Placeholder from the usage text (`<mtu:pkt>`).
        placeholder: &'static str,
    },

    /// The report could not be written.
    #[error("Can't write output. {0}")]
    Output(#[from] io::Error),
}

impl Error {
    /// Classifies a failed exchange: a failure status the controller reported becomes
    /// [`Error::Status`], anything else [`Error::Command`].
    pub fn exchange(device: DeviceId, op: &'static str, err: ExchangeError) -> Error {
        match err.status() {
            Some(status) => {
                tracing::debug!(
                    %device,
                    op,
                    %status,
                    reason = status.description().unwrap_or("unknown"),
                    "command failed"
                );
                Error::Status { device, op, status }
            }
            None => Error::Command {
                device,
                op,
                source: err,
            },
        }
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Result type used throughout the library.
pub type Result<T> = std::result::Result<T, Error>;
