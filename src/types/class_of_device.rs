//! Class of device.

use super::ParseError;
use byteorder::{ByteOrder, LittleEndian};
use core::fmt;

/// The 24-bit class of device (Bluetooth Assigned Numbers, Baseband). Transmitted as 3
/// little-endian bytes.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ClassOfDevice(u32);

impl ClassOfDevice {
    /// Length of the serialized class.
    pub const LENGTH: usize = 3;

    /// Largest representable class.
    pub const MAX: u32 = 0x00ff_ffff;

    /// Creates a class of device from its numeric value.
    ///
    /// # Errors
    ///
    /// [`ParseError::ClassTooLarge`] if the value needs more than 24 bits.
    pub fn new(value: u32) -> Result<ClassOfDevice, ParseError> {
        if value > Self::MAX {
            return Err(ParseError::ClassTooLarge(value));
        }

        Ok(ClassOfDevice(value))
    }

    /// Parses a hexadecimal class, with or without a `0x` prefix.
    pub fn parse(s: &str) -> Result<ClassOfDevice, ParseError> {
        let digits = s
            .strip_prefix("0x")
            .or_else(|| s.strip_prefix("0X"))
            .unwrap_or(s);
        let value =
            u32::from_str_radix(digits, 16).map_err(|_| ParseError::BadHex(s.to_string()))?;

        ClassOfDevice::new(value)
    }

    /// Returns the numeric class.
    pub fn value(&self) -> u32 {
        self.0
    }

    /// Serializes the class into the low 3 bytes of its little-endian form.
    ///
    /// # Panics
    ///
    /// The buffer must be at least 3 bytes long.
    pub fn copy_into_slice(&self, bytes: &mut [u8]) {
        LittleEndian::write_u24(&mut bytes[0..Self::LENGTH], self.0);
    }

    /// Deserializes the class from 3 little-endian bytes.
    ///
    /// # Panics
    ///
    /// The buffer must be at least 3 bytes long.
    pub fn from_bytes(bytes: &[u8]) -> ClassOfDevice {
        ClassOfDevice(LittleEndian::read_u24(&bytes[0..Self::LENGTH]))
    }
}

impl fmt::Display for ClassOfDevice {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "0x{:06x}", self.0)
    }
}
