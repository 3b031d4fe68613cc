//! Return parameters of the commands the tool sends.
//!
//! Every set of return parameters starts with a status byte. [`ReturnParameters::new`] verifies
//! that byte before anything else is looked at, so a failed command never reaches the field
//! decoders below.
//!
//! For the layout of each command's return parameters, see the Bluetooth specification, Vol 2,
//! Part E, Sections 7.3 and 7.4.

use super::Error;
use crate::types::{ClassOfDevice, LocalName, PageTimeout, ScanActivity};
use crate::Status;
use byteorder::{ByteOrder, LittleEndian};

/// Return parameters whose status byte reported success. Holds the bytes after the status.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ReturnParameters<'a>(&'a [u8]);

impl<'a> ReturnParameters<'a> {
    /// Verifies the leading status byte.
    ///
    /// # Errors
    ///
    /// - [`Error::BadLength`] if there is no status byte.
    /// - [`Error::CommandFailed`] if the status is not success. None of the remaining bytes are
    ///   interpreted in that case.
    pub fn new(bytes: &'a [u8]) -> Result<ReturnParameters<'a>, Error> {
        require_len_at_least!(bytes, 1);

        let status = Status(bytes[0]);
        if !status.is_success() {
            return Err(Error::CommandFailed(status));
        }

        Ok(ReturnParameters(&bytes[1..]))
    }

    /// Decodes the Read Local Name return parameters (Section 7.3.12).
    pub fn local_name(&self) -> Result<LocalName, Error> {
        require_len!(self.0, LocalName::LENGTH);
        Ok(LocalName::from_bytes(self.0))
    }

    /// Decodes the Read Class of Device return parameters (Section 7.3.25).
    pub fn class_of_device(&self) -> Result<ClassOfDevice, Error> {
        require_len!(self.0, ClassOfDevice::LENGTH);
        Ok(ClassOfDevice::from_bytes(self.0))
    }

    /// Decodes the Read Page Scan Activity and Read Inquiry Scan Activity return parameters
    /// (Sections 7.3.19 and 7.3.21).
    pub fn scan_activity(&self) -> Result<ScanActivity, Error> {
        require_len!(self.0, ScanActivity::LENGTH);
        Ok(ScanActivity::from_bytes(self.0))
    }

    /// Decodes the Read Page Timeout return parameters (Section 7.3.15).
    pub fn page_timeout(&self) -> Result<PageTimeout, Error> {
        require_len!(self.0, PageTimeout::LENGTH);
        Ok(PageTimeout::from_bytes(self.0))
    }

    /// Decodes the Read Local Version Information return parameters (Section 7.4.1).
    pub fn local_version_info(&self) -> Result<LocalVersionInfo, Error> {
        require_len!(self.0, 8);

        Ok(LocalVersionInfo {
            hci_version: self.0[0],
            hci_revision: LittleEndian::read_u16(&self.0[1..]),
            lmp_version: self.0[3],
            manufacturer_name: LittleEndian::read_u16(&self.0[4..]),
            lmp_subversion: LittleEndian::read_u16(&self.0[6..]),
        })
    }

    /// Decodes the vendor revision reply: a NUL-terminated string.
    pub fn vendor_revision(&self) -> Result<String, Error> {
        let end = self.0.iter().position(|&b| b == 0).unwrap_or(self.0.len());
        Ok(String::from_utf8_lossy(&self.0[..end]).into_owned())
    }
}

/// Values returned by Read Local Version Information command.  See the Bluetooth Specification,
/// v4.1 or later, Vol 2, Part E, Section 7.4.1.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct LocalVersionInfo {
    /// The version information of the HCI layer.
    ///
    /// See the Bluetooth [Assigned
    /// Numbers](https://www.bluetooth.com/specifications/assigned-numbers/host-controller-interface).
    pub hci_version: u8,

    /// Revision of the Current HCI in the BR/EDR Controller.  This value is implementation
    /// dependent.
    pub hci_revision: u16,

    /// Version of the Current [LMP] in the Controller.
    ///
    /// [LMP]: https://www.bluetooth.com/specifications/assigned-numbers/link-manager
    pub lmp_version: u8,

    /// Manufacturer Name of the BR/EDR Controller.  See Bluetooth [Assigned
    /// Numbers](https://www.bluetooth.com/specifications/assigned-numbers/company-identifiers)
    pub manufacturer_name: u16,

    /// Subversion of the Current LMP in the Controller. This value is implementation
    /// dependent.
    pub lmp_subversion: u16,
}
