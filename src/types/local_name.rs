//! User-friendly local name.

use super::ParseError;
use core::fmt;

/// The controller's user-friendly name (Bluetooth Spec Vol 2, Part E, Section 7.3.11).
///
/// The name is UTF-8 in a fixed 248-byte field. Shorter names are NUL-terminated; a name of
/// exactly 248 bytes fills the field without a terminator. Longer names are rejected rather than
/// truncated.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LocalName(String);

impl LocalName {
    /// Size of the name field.
    pub const LENGTH: usize = 248;

    /// Validates a name for writing.
    ///
    /// # Errors
    ///
    /// [`ParseError::NameTooLong`] if the UTF-8 encoding exceeds [`LENGTH`](Self::LENGTH) bytes.
    pub fn new(name: &str) -> Result<LocalName, ParseError> {
        if name.len() > Self::LENGTH {
            return Err(ParseError::NameTooLong(name.len(), Self::LENGTH));
        }

        Ok(LocalName(name.to_string()))
    }

    /// Returns the name.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Serializes the name into the given buffer, padding with zeros.
    ///
    /// # Panics
    ///
    /// The buffer must be exactly 248 bytes long.
    pub fn copy_into_slice(&self, bytes: &mut [u8]) {
        assert_eq!(bytes.len(), Self::LENGTH);

        let name = self.0.as_bytes();
        bytes[..name.len()].copy_from_slice(name);
        bytes[name.len()..].fill(0);
    }

    /// Reads a name from its field. The name ends at the first NUL or at the end of the buffer.
    /// Invalid UTF-8 sequences are replaced.
    pub fn from_bytes(bytes: &[u8]) -> LocalName {
        let end = bytes.iter().position(|&b| b == 0).unwrap_or(bytes.len());
        LocalName(String::from_utf8_lossy(&bytes[..end]).into_owned())
    }
}

impl fmt::Display for LocalName {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.0)
    }
}
