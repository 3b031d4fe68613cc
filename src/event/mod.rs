//! HCI events that answer a command.
//!
//! The tool only ever waits for the outcome of the command it just sent, so only the Command
//! Complete (Bluetooth Spec Vol 2, Part E, Section 7.7.14) and Command Status (Section 7.7.15)
//! events are decoded. Any other event code is reported as [`Error::UnknownEvent`] and the
//! exchange loop skips it.

macro_rules! require_len {
    ($left:expr, $right:expr) => {
        if $left.len() != $right {
            return Err($crate::event::Error::BadLength($left.len(), $right));
        }
    };
}

macro_rules! require_len_at_least {
    ($left:expr, $right:expr) => {
        if $left.len() < $right {
            return Err($crate::event::Error::BadLength($left.len(), $right));
        }
    };
}

pub mod command;

use crate::opcode::Opcode;
use crate::Status;
use byteorder::{ByteOrder, LittleEndian};

/// Packet indicator that precedes every event read from the controller.
pub const PACKET_TYPE_HCI_EVENT: u8 = 0x04;

/// Length of the event header: event code and parameter length.
pub const PACKET_HEADER_LENGTH: usize = 2;

const COMMAND_COMPLETE: u8 = 0x0E;
const COMMAND_STATUS: u8 = 0x0F;

/// Raw event bytes, starting at the event code (the packet indicator already stripped).
pub struct Packet<'a>(pub &'a [u8]);

/// Errors that can occur while decoding an event.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Error {
    /// The packet indicator is not the event indicator. Includes the byte that was found.
    BadPacketType(u8),
    /// The event code is not one this crate decodes. Includes the event code.
    UnknownEvent(u8),
    /// The buffer does not have the expected length. Includes the actual and expected lengths.
    BadLength(usize, usize),
    /// The return parameters carry a failure status. Includes the status.
    CommandFailed(Status),
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        match self {
            Error::BadPacketType(t) => write!(f, "unexpected packet type 0x{:02x}", t),
            Error::UnknownEvent(code) => write!(f, "unexpected event 0x{:02x}", code),
            Error::BadLength(actual, expected) => {
                write!(f, "malformed event ({} bytes, expected {})", actual, expected)
            }
            Error::CommandFailed(status) => write!(f, "command failed with status {}", status),
        }
    }
}

/// The Command Status event: the controller accepted (or refused) a command that completes later.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct CommandStatus {
    /// Outcome of the command at the time of the event.
    pub status: Status,
    /// Number of command packets the host may send.
    pub num_hci_command_packets: u8,
    /// The command this status refers to.
    pub opcode: Opcode,
}

impl CommandStatus {
    const LENGTH: usize = 4;

    fn new(buffer: &[u8]) -> Result<CommandStatus, Error> {
        require_len!(buffer, Self::LENGTH);

        Ok(CommandStatus {
            status: Status(buffer[0]),
            num_hci_command_packets: buffer[1],
            opcode: Opcode(LittleEndian::read_u16(&buffer[2..])),
        })
    }
}

/// The Command Complete event. The return parameters are kept raw; they are decoded by the caller
/// that knows which command was sent (see [`command`]).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CommandComplete {
    /// Number of command packets the host may send.
    pub num_hci_command_packets: u8,
    /// The command that completed. `Opcode(0)` marks a spontaneous event.
    pub opcode: Opcode,
    /// Return parameters, starting with the status byte for every command this crate sends.
    pub return_params: Vec<u8>,
}

impl CommandComplete {
    fn new(buffer: &[u8]) -> Result<CommandComplete, Error> {
        require_len_at_least!(buffer, 3);

        Ok(CommandComplete {
            num_hci_command_packets: buffer[0],
            opcode: Opcode(LittleEndian::read_u16(&buffer[1..])),
            return_params: buffer[3..].to_vec(),
        })
    }
}

/// Events the exchange loop understands.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    /// See [`CommandComplete`].
    CommandComplete(CommandComplete),
    /// See [`CommandStatus`].
    CommandStatus(CommandStatus),
}

impl Event {
    /// Decodes an event, starting at the event code.
    ///
    /// # Errors
    ///
    /// - [`Error::BadLength`] if the buffer is shorter than the header, or than the parameter
    ///   length announced by the header.
    /// - [`Error::UnknownEvent`] for any event other than Command Complete and Command Status.
    pub fn new(packet: Packet) -> Result<Event, Error> {
        let bytes = packet.0;
        require_len_at_least!(bytes, PACKET_HEADER_LENGTH);

        let param_len = bytes[1] as usize;
        require_len_at_least!(bytes, PACKET_HEADER_LENGTH + param_len);
        let params = &bytes[PACKET_HEADER_LENGTH..PACKET_HEADER_LENGTH + param_len];

        match bytes[0] {
            COMMAND_COMPLETE => Ok(Event::CommandComplete(CommandComplete::new(params)?)),
            COMMAND_STATUS => Ok(Event::CommandStatus(CommandStatus::new(params)?)),
            other => Err(Error::UnknownEvent(other)),
        }
    }

    /// Decodes an event as read from the controller, including the leading packet indicator.
    ///
    /// # Errors
    ///
    /// - [`Error::BadPacketType`] if the indicator is not [`PACKET_TYPE_HCI_EVENT`].
    /// - Any error from [`Event::new`].
    pub fn from_packet(bytes: &[u8]) -> Result<Event, Error> {
        require_len_at_least!(bytes, 1);
        match bytes[0] {
            PACKET_TYPE_HCI_EVENT => Event::new(Packet(&bytes[1..])),
            other => Err(Error::BadPacketType(other)),
        }
    }
}

/// Returns the opcode a Command Complete or Command Status packet refers to, read straight from
/// the raw bytes (packet indicator included) without validating the rest of the event. Returns
/// `None` for other packets or when the opcode bytes are missing.
pub fn peek_opcode(bytes: &[u8]) -> Option<Opcode> {
    let at = match bytes.get(..2)? {
        [PACKET_TYPE_HCI_EVENT, COMMAND_COMPLETE] => 4,
        [PACKET_TYPE_HCI_EVENT, COMMAND_STATUS] => 5,
        _ => return None,
    };

    bytes
        .get(at..at + 2)
        .map(|op| Opcode(LittleEndian::read_u16(op)))
}
