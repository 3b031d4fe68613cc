//! Per-device information reported by the control plane.

use super::{LinkMode, LinkPolicy, Mtu, PacketType};
use crate::{BdAddr, DeviceId};
use byteorder::{ByteOrder, LittleEndian};

bitflags::bitflags! {
    /// Run-time state of a device. Each bit is one of the kernel's device flag numbers.
    #[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
    pub struct DeviceFlags : u32 {
        /// The device is up.
        const UP = 1 << 0;
        /// The device is initializing.
        const INIT = 1 << 1;
        /// The device is running.
        const RUNNING = 1 << 2;
        /// Page scan is enabled.
        const PSCAN = 1 << 3;
        /// Inquiry scan is enabled.
        const ISCAN = 1 << 4;
        /// Authentication is enabled.
        const AUTH = 1 << 5;
        /// Encryption is enabled.
        const ENCRYPT = 1 << 6;
        /// An inquiry is in progress.
        const INQUIRY = 1 << 7;
        /// The device is in raw mode.
        const RAW = 1 << 8;
    }
}

impl DeviceFlags {
    /// Returns the names of all set flags separated by spaces, led by `DOWN` when the device is not
    /// up.
    pub fn names(&self) -> String {
        let mut names = Vec::new();
        if !self.contains(DeviceFlags::UP) {
            names.push("DOWN");
        }
        names.extend(self.iter_names().map(|(name, _)| name));
        names.join(" ")
    }
}

bitflags::bitflags! {
    /// The first four octets of the LMP feature mask. See the Bluetooth Specification, Vol 2, Part
    /// C, Section 3.3 (Table 3.2).
    #[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
    pub struct LmpFeatures : u32 {
        /// 3-slot packets
        const THREE_SLOT_PACKETS = 1 << 0;
        /// 5-slot packets
        const FIVE_SLOT_PACKETS = 1 << 1;
        /// Encryption
        const ENCRYPTION = 1 << 2;
        /// Slot offset
        const SLOT_OFFSET = 1 << 3;
        /// Timing accuracy
        const TIMING_ACCURACY = 1 << 4;
        /// Role switch
        const ROLE_SWITCH = 1 << 5;
        /// Hold mode
        const HOLD_MODE = 1 << 6;
        /// Sniff mode
        const SNIFF_MODE = 1 << 7;
        /// Park state
        const PARK_STATE = 1 << 8;
        /// Power control requests
        const POWER_CONTROL_REQUESTS = 1 << 9;
        /// Channel quality driven data rate
        const CHANNEL_QUALITY_DRIVEN_DATA_RATE = 1 << 10;
        /// SCO link
        const SCO_LINK = 1 << 11;
        /// HV2 packets
        const HV2_PACKETS = 1 << 12;
        /// HV3 packets
        const HV3_PACKETS = 1 << 13;
        /// μ-law log synchronous data
        const MU_LAW_LOG = 1 << 14;
        /// A-law log synchronous data
        const A_LAW_LOG = 1 << 15;
        /// CVSD synchronous data
        const CVSD = 1 << 16;
        /// Paging parameter negotiation
        const PAGING_PARAMETER_NEGOTIATION = 1 << 17;
        /// Power control
        const POWER_CONTROL = 1 << 18;
        /// Transparent synchronous data
        const TRANSPARENT_SYNCHRONOUS_DATA = 1 << 19;
        /// Flow control lag (least significant bit)
        const FLOW_CONTROL_LAG_LSB = 1 << 20;
        /// Flow control lag (middle bit)
        const FLOW_CONTROL_LAG_MID = 1 << 21;
        /// Flow control lag (most significant bit)
        const FLOW_CONTROL_LAG_MSB = 1 << 22;
        /// Broadcast encryption
        const BROADCAST_ENCRYPTION = 1 << 23;
        /// Enhanced Data Rate ACL 2 Mb/s mode
        const EDR_ACL_2_MBPS = 1 << 25;
        /// Enhanced Data Rate ACL 3 Mb/s mode
        const EDR_ACL_3_MBPS = 1 << 26;
        /// Enhanced inquiry scan
        const ENHANCED_INQUIRY_SCAN = 1 << 27;
        /// Interlaced inquiry scan
        const INTERLACED_INQUIRY_SCAN = 1 << 28;
        /// Interlaced page scan
        const INTERLACED_PAGE_SCAN = 1 << 29;
        /// RSSI with inquiry results
        const RSSI_WITH_INQUIRY_RESULTS = 1 << 30;
        /// Extended SCO link (EV3 packets)
        const EXTENDED_SCO_LINK = 1 << 31;
    }
}

impl LmpFeatures {
    /// Number of feature octets kept.
    pub const LENGTH: usize = 4;

    /// Reads the feature octets in the order the controller reports them.
    ///
    /// # Panics
    ///
    /// The buffer must be at least 4 bytes long.
    pub fn from_bytes(bytes: &[u8]) -> LmpFeatures {
        LmpFeatures::from_bits_retain(LittleEndian::read_u32(&bytes[..Self::LENGTH]))
    }

    /// Returns the feature octets in the order the controller reports them.
    pub fn to_bytes(&self) -> [u8; 4] {
        self.bits().to_le_bytes()
    }
}

/// Bus the controller is attached through.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum DeviceType {
    /// Virtual controller.
    Virtual,
    /// USB.
    Usb,
    /// PC Card.
    PcCard,
    /// UART.
    Uart,
    /// RS-232.
    Rs232,
    /// PCI.
    Pci,
    /// SDIO.
    Sdio,
    /// A bus code this crate does not know.
    Unknown(u8),
}

impl DeviceType {
    /// Decodes the bus from the kernel's device type byte. Only the low nibble names the bus.
    pub fn from_raw(raw: u8) -> DeviceType {
        match raw & 0x0f {
            0 => DeviceType::Virtual,
            1 => DeviceType::Usb,
            2 => DeviceType::PcCard,
            3 => DeviceType::Uart,
            4 => DeviceType::Rs232,
            5 => DeviceType::Pci,
            6 => DeviceType::Sdio,
            other => DeviceType::Unknown(other),
        }
    }

    /// Returns the bus name as printed in device headers.
    pub fn name(&self) -> &'static str {
        match self {
            DeviceType::Virtual => "VHCI",
            DeviceType::Usb => "USB",
            DeviceType::PcCard => "PCCARD",
            DeviceType::Uart => "UART",
            DeviceType::Rs232 => "RS232",
            DeviceType::Pci => "PCI",
            DeviceType::Sdio => "SDIO",
            DeviceType::Unknown(_) => "UNKNOWN",
        }
    }
}

/// Traffic counters kept by the kernel for one device.
#[allow(missing_docs)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct DeviceStats {
    pub err_rx: u32,
    pub err_tx: u32,
    pub cmd_tx: u32,
    pub evt_rx: u32,
    pub acl_tx: u32,
    pub acl_rx: u32,
    pub sco_tx: u32,
    pub sco_rx: u32,
    pub byte_rx: u32,
    pub byte_tx: u32,
}

/// Everything the control plane reports about one device. Fetched fresh for every query.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DeviceInfo {
    /// Device index.
    pub id: DeviceId,
    /// Kernel name of the device (`hci0`).
    pub name: String,
    /// Bus the controller is attached through.
    pub device_type: DeviceType,
    /// Public device address.
    pub bdaddr: BdAddr,
    /// Run-time state.
    pub flags: DeviceFlags,
    /// ACL buffer size.
    pub acl: Mtu,
    /// SCO buffer size.
    pub sco: Mtu,
    /// Supported LMP features.
    pub features: LmpFeatures,
    /// Default packet types.
    pub packet_type: PacketType,
    /// Default link policy.
    pub link_policy: LinkPolicy,
    /// Default link mode.
    pub link_mode: LinkMode,
    /// Traffic counters.
    pub stats: DeviceStats,
}

impl DeviceInfo {
    /// Returns true if the device is up.
    pub fn is_up(&self) -> bool {
        self.flags.contains(DeviceFlags::UP)
    }
}
