//! Buffer sizes for ACL and SCO traffic.

use super::{parse_pair, ParseError};
use byteorder::{ByteOrder, NativeEndian};
use core::fmt;

/// Maximum transfer unit and number of outstanding packets for one kind of link.
///
/// Written on the command line as `mtu:pkt`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Mtu {
    /// Largest packet payload, in bytes.
    pub mtu: u16,
    /// Number of packets the controller can buffer.
    pub packets: u16,
}

impl Mtu {
    /// Parses an `mtu:pkt` pair of decimal numbers.
    pub fn parse(s: &str) -> Result<Mtu, ParseError> {
        let (mtu, packets) = parse_pair(s)?;
        Ok(Mtu { mtu, packets })
    }

    /// Packs the pair into the control request's option word.
    ///
    /// The kernel reads the option word as two 16-bit halves in host memory: the packet count from
    /// the first half and the MTU from the second. On a little-endian host that puts the MTU in
    /// the high 16 bits and the packet count in the low 16 bits.
    pub fn option_word(&self) -> u32 {
        let mut word = [0; 4];
        NativeEndian::write_u16(&mut word[0..2], self.packets);
        NativeEndian::write_u16(&mut word[2..4], self.mtu);
        NativeEndian::read_u32(&word)
    }

    /// Inverse of [`option_word`](Self::option_word).
    pub fn from_option_word(word: u32) -> Mtu {
        let mut bytes = [0; 4];
        NativeEndian::write_u32(&mut bytes, word);
        Mtu {
            packets: NativeEndian::read_u16(&bytes[0..2]),
            mtu: NativeEndian::read_u16(&bytes[2..4]),
        }
    }
}

impl fmt::Display for Mtu {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}:{}", self.mtu, self.packets)
    }
}
