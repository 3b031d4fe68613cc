//! HCI command opcodes used by the tool.
//!
//! An opcode packs a 6-bit Opcode Group Field (OGF) and a 10-bit Opcode Command Field (OCF). See
//! the Bluetooth Specification, Vol 2, Part E, Section 5.4.1.

mod ogf {
    pub const HOST_CONTROLLER: u16 = 0x0003;
    pub const INFO_PARAM: u16 = 0x0004;
    pub const VENDOR: u16 = 0x003f;
}

mod ocf {
    pub const CHANGE_LOCAL_NAME: u16 = 0x0013;
    pub const READ_LOCAL_NAME: u16 = 0x0014;
    pub const READ_PAGE_TIMEOUT: u16 = 0x0017;
    pub const WRITE_PAGE_TIMEOUT: u16 = 0x0018;
    pub const READ_PAGE_SCAN_ACTIVITY: u16 = 0x001b;
    pub const WRITE_PAGE_SCAN_ACTIVITY: u16 = 0x001c;
    pub const READ_INQUIRY_SCAN_ACTIVITY: u16 = 0x001d;
    pub const WRITE_INQUIRY_SCAN_ACTIVITY: u16 = 0x001e;
    pub const READ_CLASS_OF_DEVICE: u16 = 0x0023;
    pub const WRITE_CLASS_OF_DEVICE: u16 = 0x0024;

    pub const LOCAL_VERSION_INFO: u16 = 0x0001;

    pub const VENDOR_REVISION: u16 = 0x000f;
}

/// A packed command opcode, as it appears (little-endian) in command packets and in the Command
/// Complete and Command Status events.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Opcode(pub u16);

impl Opcode {
    /// Packs the group and command fields into an opcode.
    pub const fn new(ogf: u16, ocf: u16) -> Opcode {
        Opcode((ogf << 10) | (ocf & 0x03ff))
    }

    /// Returns the Opcode Group Field.
    pub fn ogf(&self) -> u16 {
        self.0 >> 10
    }

    /// Returns the Opcode Command Field.
    pub fn ocf(&self) -> u16 {
        self.0 & 0x03ff
    }
}

pub const CHANGE_LOCAL_NAME: Opcode = Opcode::new(ogf::HOST_CONTROLLER, ocf::CHANGE_LOCAL_NAME);
pub const READ_LOCAL_NAME: Opcode = Opcode::new(ogf::HOST_CONTROLLER, ocf::READ_LOCAL_NAME);
pub const READ_PAGE_TIMEOUT: Opcode = Opcode::new(ogf::HOST_CONTROLLER, ocf::READ_PAGE_TIMEOUT);
pub const WRITE_PAGE_TIMEOUT: Opcode = Opcode::new(ogf::HOST_CONTROLLER, ocf::WRITE_PAGE_TIMEOUT);
pub const READ_PAGE_SCAN_ACTIVITY: Opcode =
    Opcode::new(ogf::HOST_CONTROLLER, ocf::READ_PAGE_SCAN_ACTIVITY);
pub const WRITE_PAGE_SCAN_ACTIVITY: Opcode =
    Opcode::new(ogf::HOST_CONTROLLER, ocf::WRITE_PAGE_SCAN_ACTIVITY);
pub const READ_INQUIRY_SCAN_ACTIVITY: Opcode =
    Opcode::new(ogf::HOST_CONTROLLER, ocf::READ_INQUIRY_SCAN_ACTIVITY);
pub const WRITE_INQUIRY_SCAN_ACTIVITY: Opcode =
    Opcode::new(ogf::HOST_CONTROLLER, ocf::WRITE_INQUIRY_SCAN_ACTIVITY);
pub const READ_CLASS_OF_DEVICE: Opcode =
    Opcode::new(ogf::HOST_CONTROLLER, ocf::READ_CLASS_OF_DEVICE);
pub const WRITE_CLASS_OF_DEVICE: Opcode =
    Opcode::new(ogf::HOST_CONTROLLER, ocf::WRITE_CLASS_OF_DEVICE);

pub const LOCAL_VERSION_INFO: Opcode = Opcode::new(ogf::INFO_PARAM, ocf::LOCAL_VERSION_INFO);

/// Vendor revision query. Only defined for controllers reporting manufacturer 0.
pub const VENDOR_REVISION: Opcode = Opcode::new(ogf::VENDOR, ocf::VENDOR_REVISION);
