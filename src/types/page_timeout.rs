//! Page timeout.

use super::{parse_u16, ParseError, Slots};
use byteorder::{ByteOrder, LittleEndian};

/// How long the controller pages a remote device before giving up, in slots. See the Bluetooth
/// Spec Vol 2, Part E, Section 7.3.16.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct PageTimeout(pub Slots);

impl PageTimeout {
    /// Smallest timeout the specification allows. Zero is reserved.
    pub const MIN: Slots = Slots(0x0001);

    /// Largest timeout the specification allows.
    pub const MAX: Slots = Slots(0xffff);

    /// Length of the serialized timeout.
    pub const LENGTH: usize = 2;

    /// Parses a decimal slot count. Out-of-range values are accepted; see
    /// [`is_in_range`](Self::is_in_range).
    pub fn parse(s: &str) -> Result<PageTimeout, ParseError> {
        parse_u16(s).map(|slots| PageTimeout(Slots(slots)))
    }

    /// Returns true if the timeout lies in [`MIN`](Self::MIN)..=[`MAX`](Self::MAX).
    pub fn is_in_range(&self) -> bool {
        (Self::MIN..=Self::MAX).contains(&self.0)
    }

    /// Serializes the timeout into the given buffer.
    ///
    /// # Panics
    ///
    /// The buffer must be at least 2 bytes long.
    pub fn copy_into_slice(&self, bytes: &mut [u8]) {
        LittleEndian::write_u16(&mut bytes[0..Self::LENGTH], (self.0).0);
    }

    /// Deserializes the timeout from the given buffer.
    ///
    /// # Panics
    ///
    /// The buffer must be at least 2 bytes long.
    pub fn from_bytes(bytes: &[u8]) -> PageTimeout {
        PageTimeout(Slots(LittleEndian::read_u16(&bytes[0..Self::LENGTH])))
    }
}
