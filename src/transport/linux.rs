//! Raw HCI sockets on Linux.
//!
//! The control handle is an unbound `AF_BLUETOOTH`/`BTPROTO_HCI` socket used only for ioctls.
//! Command sessions are separate sockets bound to one device, with a filter that lets only Command
//! Complete and Command Status events through.

use super::{ControlOp, ControlRequest, Controller, Transport};
use crate::types::{
    DeviceFlags, DeviceInfo, DeviceStats, DeviceType, LinkMode, LinkPolicy, LmpFeatures, Mtu,
    PacketType,
};
use crate::{BdAddr, DeviceId, MAX_DEVICES};
use byteorder::{ByteOrder, NativeEndian};
use std::io;
use std::mem;
use std::os::fd::{AsRawFd, FromRawFd, OwnedFd};

const BTPROTO_HCI: libc::c_int = 1;
const SOL_HCI: libc::c_int = 0;
const HCI_FILTER: libc::c_int = 2;
const HCI_CHANNEL_RAW: u16 = 0;

const HCI_EVENT_PKT: u32 = 0x04;
const EVT_CMD_COMPLETE: u32 = 0x0e;
const EVT_CMD_STATUS: u32 = 0x0f;

// How long one read_into call waits for a packet before reporting WouldBlock.
const POLL_QUANTUM_MS: libc::c_int = 10;

const fn iow(nr: u32) -> u32 {
    (1 << 30) | (4 << 16) | ((b'H' as u32) << 8) | nr
}

const fn ior(nr: u32) -> u32 {
    (2 << 30) | (4 << 16) | ((b'H' as u32) << 8) | nr
}

const HCIDEVUP: u32 = iow(201);
const HCIDEVDOWN: u32 = iow(202);
const HCIDEVRESTAT: u32 = iow(204);
const HCIGETDEVLIST: u32 = ior(210);
const HCIGETDEVINFO: u32 = ior(211);
const HCISETSCAN: u32 = iow(221);
const HCISETAUTH: u32 = iow(222);
const HCISETENCRYPT: u32 = iow(223);
const HCISETPTYPE: u32 = iow(224);
const HCISETLINKPOL: u32 = iow(225);
const HCISETLINKMODE: u32 = iow(226);
const HCISETACLMTU: u32 = iow(227);
const HCISETSCOMTU: u32 = iow(228);

#[repr(C)]
#[derive(Copy, Clone, Default)]
struct HciDevReq {
    dev_id: u16,
    dev_opt: u32,
}

#[repr(C)]
struct HciDevListReq {
    dev_num: u16,
    dev_req: [HciDevReq; MAX_DEVICES],
}

#[repr(C)]
struct SockaddrHci {
    hci_family: libc::sa_family_t,
    hci_dev: u16,
    hci_channel: u16,
}

#[repr(C)]
struct HciFilter {
    type_mask: u32,
    event_mask: [u32; 2],
    opcode: u16,
}

/// Size of the kernel's `hci_dev_info` record.
pub const DEVICE_INFO_LENGTH: usize = 92;

fn check(ret: libc::c_int) -> io::Result<libc::c_int> {
    if ret < 0 {
        Err(io::Error::last_os_error())
    } else {
        Ok(ret)
    }
}

fn open_socket() -> io::Result<OwnedFd> {
    let fd = check(unsafe {
        libc::socket(
            libc::AF_BLUETOOTH,
            libc::SOCK_RAW | libc::SOCK_CLOEXEC,
            BTPROTO_HCI,
        )
    })?;

    // SAFETY: the descriptor was just returned by socket(2) and is owned by nobody else.
    Ok(unsafe { OwnedFd::from_raw_fd(fd) })
}

/// Decodes the kernel's `hci_dev_info` record. The record is in host byte order.
///
/// # Panics
///
/// Panics if `bytes` is shorter than [`DEVICE_INFO_LENGTH`].
pub fn parse_device_info(bytes: &[u8]) -> DeviceInfo {
    assert!(bytes.len() >= DEVICE_INFO_LENGTH);

    let name_end = bytes[2..10].iter().position(|&b| b == 0).unwrap_or(8);
    let mut bdaddr = [0; 6];
    bdaddr.copy_from_slice(&bytes[10..16]);
    let stat = |i: usize| NativeEndian::read_u32(&bytes[52 + 4 * i..]);

    DeviceInfo {
        id: DeviceId(NativeEndian::read_u16(&bytes[0..2])),
        name: String::from_utf8_lossy(&bytes[2..2 + name_end]).into_owned(),
        bdaddr: BdAddr(bdaddr),
        flags: DeviceFlags::from_bits_truncate(NativeEndian::read_u32(&bytes[16..20])),
        device_type: DeviceType::from_raw(bytes[20]),
        features: LmpFeatures::from_bytes(&bytes[21..29]),
        packet_type: PacketType::from_bits_truncate(NativeEndian::read_u32(&bytes[32..36])),
        link_policy: LinkPolicy::from_bits_truncate(NativeEndian::read_u32(&bytes[36..40])),
        link_mode: LinkMode::from_bits_truncate(NativeEndian::read_u32(&bytes[40..44])),
        acl: Mtu {
            mtu: NativeEndian::read_u16(&bytes[44..46]),
            packets: NativeEndian::read_u16(&bytes[46..48]),
        },
        sco: Mtu {
            mtu: NativeEndian::read_u16(&bytes[48..50]),
            packets: NativeEndian::read_u16(&bytes[50..52]),
        },
        stats: DeviceStats {
            err_rx: stat(0),
            err_tx: stat(1),
            cmd_tx: stat(2),
            evt_rx: stat(3),
            acl_tx: stat(4),
            acl_rx: stat(5),
            sco_tx: stat(6),
            sco_rx: stat(7),
            byte_rx: stat(8),
            byte_tx: stat(9),
        },
    }
}

/// The raw control handle.
#[derive(Debug)]
pub struct HciSocket {
    fd: OwnedFd,
}

impl HciSocket {
    /// Opens an unbound HCI socket.
    pub fn open() -> io::Result<HciSocket> {
        Ok(HciSocket { fd: open_socket()? })
    }

    fn ioctl_value(&self, request: u32, value: libc::c_ulong) -> io::Result<()> {
        check(unsafe { libc::ioctl(self.fd.as_raw_fd(), request as _, value) }).map(|_| ())
    }

    fn ioctl_ptr<T>(&self, request: u32, arg: &mut T) -> io::Result<()> {
        check(unsafe { libc::ioctl(self.fd.as_raw_fd(), request as _, arg as *mut T) })
            .map(|_| ())
    }
}

impl Transport for HciSocket {
    type Session = Session;

    fn device_list(&mut self, max: usize) -> io::Result<Vec<DeviceId>> {
        let mut list = HciDevListReq {
            dev_num: max.min(MAX_DEVICES) as u16,
            dev_req: [HciDevReq::default(); MAX_DEVICES],
        };
        self.ioctl_ptr(HCIGETDEVLIST, &mut list)?;

        let count = (list.dev_num as usize).min(MAX_DEVICES);
        Ok(list.dev_req[..count]
            .iter()
            .map(|req| DeviceId(req.dev_id))
            .collect())
    }

    fn device_info(&mut self, device: DeviceId) -> io::Result<DeviceInfo> {
        let mut record = [0u8; DEVICE_INFO_LENGTH];
        NativeEndian::write_u16(&mut record[0..2], device.0);
        self.ioctl_ptr(HCIGETDEVINFO, &mut record)?;

        Ok(parse_device_info(&record))
    }

    fn control(&mut self, request: ControlRequest) -> io::Result<()> {
        let dev_id = request.device.0;
        let number = match request.op {
            ControlOp::Up => return self.ioctl_value(HCIDEVUP, dev_id.into()),
            ControlOp::Down => return self.ioctl_value(HCIDEVDOWN, dev_id.into()),
            ControlOp::ResetStats => return self.ioctl_value(HCIDEVRESTAT, dev_id.into()),
            ControlOp::Scan(_) => HCISETSCAN,
            ControlOp::Auth(_) => HCISETAUTH,
            ControlOp::Encrypt(_) => HCISETENCRYPT,
            ControlOp::PacketType(_) => HCISETPTYPE,
            ControlOp::LinkPolicy(_) => HCISETLINKPOL,
            ControlOp::LinkMode(_) => HCISETLINKMODE,
            ControlOp::AclMtu(_) => HCISETACLMTU,
            ControlOp::ScoMtu(_) => HCISETSCOMTU,
        };

        let mut req = HciDevReq {
            dev_id,
            dev_opt: request.op.option_word(),
        };
        self.ioctl_ptr(number, &mut req)
    }

    fn open_session(&mut self, device: DeviceId) -> io::Result<Session> {
        Session::open(device)
    }
}

/// A socket bound to one device that carries command packets out and events back.
#[derive(Debug)]
pub struct Session {
    fd: OwnedFd,
}

impl Session {
    /// Opens a socket bound to `device` that receives only command outcome events.
    pub fn open(device: DeviceId) -> io::Result<Session> {
        let fd = open_socket()?;

        let filter = HciFilter {
            type_mask: 1 << HCI_EVENT_PKT,
            event_mask: [(1 << EVT_CMD_COMPLETE) | (1 << EVT_CMD_STATUS), 0],
            opcode: 0,
        };
        check(unsafe {
            libc::setsockopt(
                fd.as_raw_fd(),
                SOL_HCI,
                HCI_FILTER,
                &filter as *const HciFilter as *const libc::c_void,
                mem::size_of::<HciFilter>() as libc::socklen_t,
            )
        })?;

        let addr = SockaddrHci {
            hci_family: libc::AF_BLUETOOTH as libc::sa_family_t,
            hci_dev: device.0,
            hci_channel: HCI_CHANNEL_RAW,
        };
        check(unsafe {
            libc::bind(
                fd.as_raw_fd(),
                &addr as *const SockaddrHci as *const libc::sockaddr,
                mem::size_of::<SockaddrHci>() as libc::socklen_t,
            )
        })?;

        Ok(Session { fd })
    }
}

fn would_block(err: io::Error) -> nb::Error<io::Error> {
    match err.kind() {
        io::ErrorKind::WouldBlock | io::ErrorKind::Interrupted => nb::Error::WouldBlock,
        _ => nb::Error::Other(err),
    }
}

impl Controller for Session {
    type Error = io::Error;

    fn write(&mut self, header: &[u8], payload: &[u8]) -> nb::Result<(), io::Error> {
        let iov = [
            libc::iovec {
                iov_base: header.as_ptr() as *mut libc::c_void,
                iov_len: header.len(),
            },
            libc::iovec {
                iov_base: payload.as_ptr() as *mut libc::c_void,
                iov_len: payload.len(),
            },
        ];

        let written = unsafe { libc::writev(self.fd.as_raw_fd(), iov.as_ptr(), iov.len() as _) };
        if written < 0 {
            return Err(would_block(io::Error::last_os_error()));
        }
        if written as usize != header.len() + payload.len() {
            return Err(nb::Error::Other(io::Error::new(
                io::ErrorKind::WriteZero,
                "short write of command packet",
            )));
        }

        Ok(())
    }

    fn read_into(&mut self, buffer: &mut [u8]) -> nb::Result<usize, io::Error> {
        let mut pfd = libc::pollfd {
            fd: self.fd.as_raw_fd(),
            events: libc::POLLIN,
            revents: 0,
        };
        let ready = unsafe { libc::poll(&mut pfd, 1, POLL_QUANTUM_MS) };
        if ready < 0 {
            return Err(would_block(io::Error::last_os_error()));
        }
        if ready == 0 {
            return Err(nb::Error::WouldBlock);
        }

        let len = unsafe {
            libc::read(
                self.fd.as_raw_fd(),
                buffer.as_mut_ptr() as *mut libc::c_void,
                buffer.len(),
            )
        };
        if len < 0 {
            return Err(would_block(io::Error::last_os_error()));
        }

        Ok(len as usize)
    }
}
