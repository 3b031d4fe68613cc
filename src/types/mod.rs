//! Parameter codec: the option strings accepted on the command line, and the binary fields they
//! become on either channel.
//!
//! Every type here converts in both directions. Values that go to the controller are written in
//! Bluetooth byte order (little-endian) with `byteorder`; values read back go through the same
//! conversion in reverse.

mod activity;
mod class_of_device;
mod device;
mod link;
mod local_name;
mod mtu;
mod page_timeout;
mod scan;

pub use self::activity::*;
pub use self::class_of_device::*;
pub use self::device::*;
pub use self::link::*;
pub use self::local_name::*;
pub use self::mtu::*;
pub use self::page_timeout::*;
pub use self::scan::*;

/// Reasons an option string is rejected.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// Expected two decimal numbers separated by a colon.
    #[error("expected two numbers separated by ':', got '{0}'")]
    BadPair(String),
    /// Expected a decimal number that fits in 16 bits.
    #[error("'{0}' is not a decimal number between 0 and 65535")]
    BadNumber(String),
    /// Expected a hexadecimal number.
    #[error("'{0}' is not a hexadecimal number")]
    BadHex(String),
    /// The class of device does not fit in its 3-byte field.
    #[error("class of device 0x{0:x} does not fit in 24 bits")]
    ClassTooLarge(u32),
    /// The name does not fit the controller's name field.
    #[error("name is {0} bytes long, the limit is {1}")]
    NameTooLong(usize, usize),
    /// A name in a flag list is not known.
    #[error("unknown {kind} '{name}'")]
    UnknownName {
        /// What kind of list was being parsed.
        kind: &'static str,
        /// The offending name.
        name: String,
    },
    /// A flag list contained no names.
    #[error("empty {0} list")]
    EmptyList(&'static str),
}

/// Parses an unsigned 16-bit decimal number.
pub fn parse_u16(s: &str) -> Result<u16, ParseError> {
    let s = s.trim();
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ParseError::BadNumber(s.to_string()));
    }

    s.parse().map_err(|_| ParseError::BadNumber(s.to_string()))
}

/// Parses a `first:second` pair of unsigned 16-bit decimal numbers.
pub fn parse_pair(s: &str) -> Result<(u16, u16), ParseError> {
    let (first, second) = s
        .split_once(':')
        .ok_or_else(|| ParseError::BadPair(s.to_string()))?;

    Ok((parse_u16(first)?, parse_u16(second)?))
}
