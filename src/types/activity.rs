//! Scan activity (window and interval) for inquiry scan and page scan, and the baseband slot unit
//! both are measured in.

use super::{parse_pair, ParseError};
use byteorder::{ByteOrder, LittleEndian};
use core::fmt;
use core::time::Duration;

/// A count of baseband slots. One slot is 0.625 ms.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct Slots(pub u16);

impl Slots {
    /// Length of one slot in microseconds.
    pub const MICROS_PER_SLOT: u64 = 625;

    /// Returns the slot count in milliseconds.
    pub fn as_millis(&self) -> f64 {
        // T = 0.625 ms * N
        f64::from(self.0) * 0.625
    }

    /// Returns the slot count as a duration.
    pub fn as_duration(&self) -> Duration {
        Duration::from_micros(u64::from(self.0) * Self::MICROS_PER_SLOT)
    }
}

impl fmt::Display for Slots {
    /// Formats as `N slots (M.MM ms)`.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} slots ({:.2} ms)", self.0, self.as_millis())
    }
}

/// Window and interval of the inquiry scan or page scan activity.
///
/// On the command line the pair is written `window:interval`. On the wire (Bluetooth Spec Vol 2,
/// Part E, Sections 7.3.19 - 7.3.22) the interval comes first, then the window, both as 16-bit
/// little-endian slot counts.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ScanActivity {
    /// How long the controller scans in each interval.
    pub window: Slots,
    /// How often a scan starts.
    pub interval: Slots,
}

impl ScanActivity {
    /// Smallest value the specification allows for the window and the interval.
    pub const MIN: Slots = Slots(0x0012);

    /// Largest value the specification allows for the window and the interval.
    pub const MAX: Slots = Slots(0x1000);

    /// Length of the serialized activity.
    pub const LENGTH: usize = 4;

    /// Parses a `window:interval` pair of decimal slot counts.
    ///
    /// Values outside [`MIN`](Self::MIN)..=[`MAX`](Self::MAX) are accepted; see
    /// [`out_of_range`](Self::out_of_range).
    ///
    /// # Errors
    ///
    /// - [`ParseError::BadPair`] if there is no colon.
    /// - [`ParseError::BadNumber`] if either half is not a 16-bit decimal number.
    pub fn parse(s: &str) -> Result<ScanActivity, ParseError> {
        let (window, interval) = parse_pair(s)?;
        Ok(ScanActivity {
            window: Slots(window),
            interval: Slots(interval),
        })
    }

    /// Returns the names of the fields ("window", "interval") that lie outside the range the
    /// specification allows. The window and the interval are checked independently.
    pub fn out_of_range(&self) -> Vec<&'static str> {
        let in_range = |s: Slots| (Self::MIN..=Self::MAX).contains(&s);

        let mut fields = Vec::new();
        if !in_range(self.window) {
            fields.push("window");
        }
        if !in_range(self.interval) {
            fields.push("interval");
        }
        fields
    }

    /// Serializes the activity into the given buffer.
    ///
    /// # Panics
    ///
    /// The buffer must be at least 4 bytes long.
    pub fn copy_into_slice(&self, bytes: &mut [u8]) {
        assert!(bytes.len() >= Self::LENGTH);

        LittleEndian::write_u16(&mut bytes[0..2], self.interval.0);
        LittleEndian::write_u16(&mut bytes[2..4], self.window.0);
    }

    /// Deserializes the activity from the given buffer.
    ///
    /// # Panics
    ///
    /// The buffer must be at least 4 bytes long.
    pub fn from_bytes(bytes: &[u8]) -> ScanActivity {
        assert!(bytes.len() >= Self::LENGTH);

        ScanActivity {
            interval: Slots(LittleEndian::read_u16(&bytes[0..2])),
            window: Slots(LittleEndian::read_u16(&bytes[2..4])),
        }
    }
}
