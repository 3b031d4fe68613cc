//! Host-side interface to the Bluetooth HCI.
//!
//! [`Hci`] is implemented for every [`Controller`]. Each function writes one command packet and
//! then blocks, bounded by the given timeout, until the controller reports the outcome of that
//! command. Events that answer other commands are skipped.

use crate::event::command::{LocalVersionInfo, ReturnParameters};
use crate::event::{self, Event};
use crate::opcode::{self, Opcode};
use crate::transport::Controller;
use crate::types::{ClassOfDevice, LocalName, PageTimeout, ScanActivity};
use byteorder::{ByteOrder, LittleEndian};
use std::time::{Duration, Instant};

const PACKET_TYPE_HCI_COMMAND: u8 = 0x01;

// Packet indicator, event header and the largest parameter length the header can announce.
const MAX_EVENT_LENGTH: usize = 1 + event::PACKET_HEADER_LENGTH + 255;

/// Header for HCI command packets, including the leading packet indicator.
///
/// See the Bluetooth Specification Vol 2, Part E, section 5.4.1. The command packet header contains
/// an opcode (comprising a 6-bit OGF and 10-bit OCF) and a 1-byte parameter length.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct CommandHeader {
    opcode: Opcode,
    param_len: u8,
}

impl CommandHeader {
    /// Length of the serialized header.
    pub const HEADER_LENGTH: usize = 4;

    /// Returns a new header with the given opcode and parameter length.
    ///
    /// # Panics
    ///
    /// Panics if `param_len` does not fit in the one-byte length field.
    pub fn new(opcode: Opcode, param_len: usize) -> CommandHeader {
        assert!(param_len <= u8::MAX as usize);

        CommandHeader {
            opcode,
            param_len: param_len as u8,
        }
    }

    /// Serialize the header into the given buffer, in Bluetooth byte order (little-endian).
    ///
    /// # Panics
    ///
    /// Panics if `buffer.len() < Self::HEADER_LENGTH`
    pub fn copy_into_slice(&self, buffer: &mut [u8]) {
        buffer[0] = PACKET_TYPE_HCI_COMMAND;
        LittleEndian::write_u16(&mut buffer[1..=2], self.opcode.0);
        buffer[3] = self.param_len;
    }
}

/// Errors that may occur during a command exchange. Must be specialized on the type of
/// communication errors.
#[derive(Copy, Clone, Debug, PartialEq, thiserror::Error)]
pub enum Error<E> {
    /// Underlying communication error.
    #[error("{0}")]
    Comm(E),

    /// The controller did not answer within the bound. Includes the bound.
    #[error("Connection timed out ({} ms)", .0.as_millis())]
    Timeout(Duration),

    /// The answer could not be decoded, or it reported a failure. A failure status is reported as
    /// [`event::Error::CommandFailed`].
    #[error("{0}")]
    Event(event::Error),
}

impl<E> Error<E> {
    /// Returns the status the controller reported, if the exchange failed because of one.
    pub fn status(&self) -> Option<crate::Status> {
        match self {
            Error::Event(event::Error::CommandFailed(status)) => Some(*status),
            _ => None,
        }
    }
}

/// Trait defining the command/response exchanges the tool performs with a controller.
///
/// An implementation is defined for all types that implement [`Controller`].
///
/// Every read function verifies the status byte before decoding the return parameters; every
/// write function verifies it as well, so a refused write is reported rather than ignored.
pub trait Hci<E> {
    /// Sends one command and returns the return parameters of its Command Complete event,
    /// including the leading status byte, which is not checked here.
    ///
    /// # Errors
    ///
    /// - [`Error::Comm`] if the controller cannot be written or read.
    /// - [`Error::Timeout`] if no answer arrives within `timeout`.
    /// - [`Error::Event`] if an event cannot be decoded, or if a Command Status event for this
    ///   command reports a failure.
    fn send_command(
        &mut self,
        opcode: Opcode,
        params: &[u8],
        timeout: Duration,
    ) -> Result<Vec<u8>, Error<E>>;

    /// Read Local Name (Vol 2, Part E, Section 7.3.12).
    fn read_local_name(&mut self, timeout: Duration) -> Result<LocalName, Error<E>>;

    /// Change Local Name (Section 7.3.11). The name is sent NUL-padded to its full field length.
    fn change_local_name(&mut self, name: &LocalName, timeout: Duration) -> Result<(), Error<E>>;

    /// Read Class of Device (Section 7.3.25).
    fn read_class_of_device(&mut self, timeout: Duration) -> Result<ClassOfDevice, Error<E>>;

    /// Write Class of Device (Section 7.3.26).
    fn write_class_of_device(
        &mut self,
        class: ClassOfDevice,
        timeout: Duration,
    ) -> Result<(), Error<E>>;

    /// Read Local Version Information (Section 7.4.1).
    fn read_local_version_information(
        &mut self,
        timeout: Duration,
    ) -> Result<LocalVersionInfo, Error<E>>;

    /// Read Inquiry Scan Activity (Section 7.3.21).
    fn read_inquiry_scan_activity(&mut self, timeout: Duration) -> Result<ScanActivity, Error<E>>;

    /// Write Inquiry Scan Activity (Section 7.3.22).
    fn write_inquiry_scan_activity(
        &mut self,
        activity: ScanActivity,
        timeout: Duration,
    ) -> Result<(), Error<E>>;

    /// Read Page Scan Activity (Section 7.3.19).
    fn read_page_scan_activity(&mut self, timeout: Duration) -> Result<ScanActivity, Error<E>>;

    /// Write Page Scan Activity (Section 7.3.20).
    fn write_page_scan_activity(
        &mut self,
        activity: ScanActivity,
        timeout: Duration,
    ) -> Result<(), Error<E>>;

    /// Read Page Timeout (Section 7.3.15).
    fn read_page_timeout(&mut self, timeout: Duration) -> Result<PageTimeout, Error<E>>;

    /// Write Page Timeout (Section 7.3.16).
    fn write_page_timeout(
        &mut self,
        page_timeout: PageTimeout,
        timeout: Duration,
    ) -> Result<(), Error<E>>;

    /// Vendor-specific firmware revision query. Only meaningful on controllers whose manufacturer
    /// defines it; others are expected to answer with a failure status.
    fn read_vendor_revision(&mut self, timeout: Duration) -> Result<String, Error<E>>;
}

fn check_status<E>(bytes: &[u8]) -> Result<ReturnParameters, Error<E>> {
    ReturnParameters::new(bytes).map_err(Error::Event)
}

impl<E, T> Hci<E> for T
where
    T: Controller<Error = E>,
{
    fn send_command(
        &mut self,
        opcode: Opcode,
        params: &[u8],
        timeout: Duration,
    ) -> Result<Vec<u8>, Error<E>> {
        let deadline = Instant::now() + timeout;

        let mut header = [0; CommandHeader::HEADER_LENGTH];
        CommandHeader::new(opcode, params.len()).copy_into_slice(&mut header);
        loop {
            match self.write(&header, params) {
                Ok(()) => break,
                Err(nb::Error::WouldBlock) if Instant::now() >= deadline => {
                    return Err(Error::Timeout(timeout));
                }
                Err(nb::Error::WouldBlock) => (),
                Err(nb::Error::Other(e)) => return Err(Error::Comm(e)),
            }
        }
        tracing::debug!(
            ogf = opcode.ogf(),
            ocf = opcode.ocf(),
            plen = params.len(),
            "command sent"
        );

        let mut buffer = [0; MAX_EVENT_LENGTH];
        loop {
            match self.read_into(&mut buffer) {
                Ok(len) => {
                    let packet = &buffer[..len];
                    match Event::from_packet(packet) {
                        Ok(Event::CommandComplete(event)) if event.opcode == opcode => {
                            tracing::debug!(len = event.return_params.len(), "command complete");
                            return Ok(event.return_params);
                        }
                        Ok(Event::CommandStatus(event))
                            if event.opcode == opcode && !event.status.is_success() =>
                        {
                            return Err(Error::Event(event::Error::CommandFailed(event.status)));
                        }
                        Ok(other) => tracing::trace!(?other, "skipping event for another command"),
                        Err(event::Error::UnknownEvent(code)) => {
                            tracing::trace!(code, "skipping unexpected event")
                        }
                        Err(e) if event::peek_opcode(packet).map_or(false, |op| op != opcode) => {
                            tracing::trace!(error = %e, "skipping malformed event for another command")
                        }
                        Err(e) => return Err(Error::Event(e)),
                    }
                }
                Err(nb::Error::WouldBlock) => (),
                Err(nb::Error::Other(e)) => return Err(Error::Comm(e)),
            }

            // Unrelated traffic must not stretch the wait.
            if Instant::now() >= deadline {
                return Err(Error::Timeout(timeout));
            }
        }
    }

    fn read_local_name(&mut self, timeout: Duration) -> Result<LocalName, Error<E>> {
        let bytes = self.send_command(opcode::READ_LOCAL_NAME, &[], timeout)?;
        check_status(&bytes)?.local_name().map_err(Error::Event)
    }

    fn change_local_name(&mut self, name: &LocalName, timeout: Duration) -> Result<(), Error<E>> {
        let mut params = [0; LocalName::LENGTH];
        name.copy_into_slice(&mut params);

        let bytes = self.send_command(opcode::CHANGE_LOCAL_NAME, &params, timeout)?;
        check_status(&bytes).map(|_| ())
    }

    fn read_class_of_device(&mut self, timeout: Duration) -> Result<ClassOfDevice, Error<E>> {
        let bytes = self.send_command(opcode::READ_CLASS_OF_DEVICE, &[], timeout)?;
        check_status(&bytes)?.class_of_device().map_err(Error::Event)
    }

    fn write_class_of_device(
        &mut self,
        class: ClassOfDevice,
        timeout: Duration,
    ) -> Result<(), Error<E>> {
        let mut params = [0; ClassOfDevice::LENGTH];
        class.copy_into_slice(&mut params);

        let bytes = self.send_command(opcode::WRITE_CLASS_OF_DEVICE, &params, timeout)?;
        check_status(&bytes).map(|_| ())
    }

    fn read_local_version_information(
        &mut self,
        timeout: Duration,
    ) -> Result<LocalVersionInfo, Error<E>> {
        let bytes = self.send_command(opcode::LOCAL_VERSION_INFO, &[], timeout)?;
        check_status(&bytes)?
            .local_version_info()
            .map_err(Error::Event)
    }

    fn read_inquiry_scan_activity(&mut self, timeout: Duration) -> Result<ScanActivity, Error<E>> {
        let bytes = self.send_command(opcode::READ_INQUIRY_SCAN_ACTIVITY, &[], timeout)?;
        check_status(&bytes)?.scan_activity().map_err(Error::Event)
    }

    fn write_inquiry_scan_activity(
        &mut self,
        activity: ScanActivity,
        timeout: Duration,
    ) -> Result<(), Error<E>> {
        let mut params = [0; ScanActivity::LENGTH];
        activity.copy_into_slice(&mut params);

        let bytes = self.send_command(opcode::WRITE_INQUIRY_SCAN_ACTIVITY, &params, timeout)?;
        check_status(&bytes).map(|_| ())
    }

    fn read_page_scan_activity(&mut self, timeout: Duration) -> Result<ScanActivity, Error<E>> {
        let bytes = self.send_command(opcode::READ_PAGE_SCAN_ACTIVITY, &[], timeout)?;
        check_status(&bytes)?.scan_activity().map_err(Error::Event)
    }

    fn write_page_scan_activity(
        &mut self,
        activity: ScanActivity,
        timeout: Duration,
    ) -> Result<(), Error<E>> {
        let mut params = [0; ScanActivity::LENGTH];
        activity.copy_into_slice(&mut params);

        let bytes = self.send_command(opcode::WRITE_PAGE_SCAN_ACTIVITY, &params, timeout)?;
        check_status(&bytes).map(|_| ())
    }

    fn read_page_timeout(&mut self, timeout: Duration) -> Result<PageTimeout, Error<E>> {
        let bytes = self.send_command(opcode::READ_PAGE_TIMEOUT, &[], timeout)?;
        check_status(&bytes)?.page_timeout().map_err(Error::Event)
    }

    fn write_page_timeout(
        &mut self,
        page_timeout: PageTimeout,
        timeout: Duration,
    ) -> Result<(), Error<E>> {
        let mut params = [0; PageTimeout::LENGTH];
        page_timeout.copy_into_slice(&mut params);

        let bytes = self.send_command(opcode::WRITE_PAGE_TIMEOUT, &params, timeout)?;
        check_status(&bytes).map(|_| ())
    }

    fn read_vendor_revision(&mut self, timeout: Duration) -> Result<String, Error<E>> {
        let bytes = self.send_command(opcode::VENDOR_REVISION, &[], timeout)?;
        check_status(&bytes)?
            .vendor_revision()
            .map_err(Error::Event)
    }
}
