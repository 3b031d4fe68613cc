#![allow(dead_code)]

extern crate hci_config as hci;

use hci::opcode::Opcode;
use hci::transport::{ControlOp, ControlRequest, Controller, Transport};
use hci::types::*;
use hci::{BdAddr, DeviceId};
use std::cell::RefCell;
use std::collections::VecDeque;
use std::io;
use std::rc::Rc;

/// State shared by the transport and every session it opens.
#[derive(Default)]
pub struct Link {
    /// Every command packet written, in order, with its packet indicator.
    pub written: Vec<Vec<u8>>,
    /// Packets handed out by `read_into`, in order.
    pub events: VecDeque<Vec<u8>>,
    /// Number of sessions opened.
    pub sessions: usize,
}

pub struct RecordingSink {
    link: Rc<RefCell<Link>>,
}

impl Controller for RecordingSink {
    type Error = io::Error;

    fn write(&mut self, header: &[u8], payload: &[u8]) -> nb::Result<(), io::Error> {
        let mut packet = header.to_vec();
        packet.extend_from_slice(payload);
        self.link.borrow_mut().written.push(packet);
        Ok(())
    }

    fn read_into(&mut self, buffer: &mut [u8]) -> nb::Result<usize, io::Error> {
        match self.link.borrow_mut().events.pop_front() {
            Some(packet) => {
                buffer[..packet.len()].copy_from_slice(&packet);
                Ok(packet.len())
            }
            None => Err(nb::Error::WouldBlock),
        }
    }
}

impl RecordingSink {
    pub fn new() -> RecordingSink {
        RecordingSink {
            link: Rc::new(RefCell::new(Link::default())),
        }
    }

    pub fn link(&self) -> Rc<RefCell<Link>> {
        self.link.clone()
    }
}

pub struct MockTransport {
    pub devices: Vec<DeviceInfo>,
    pub requests: Vec<ControlRequest>,
    /// OS error number returned for every request with this op.
    pub failures: Vec<(ControlOp, i32)>,
    /// OS error number returned when opening a session.
    pub session_failure: Option<i32>,
    pub link: Rc<RefCell<Link>>,
}

impl MockTransport {
    pub fn new(devices: Vec<DeviceInfo>) -> MockTransport {
        MockTransport {
            devices,
            requests: Vec::new(),
            failures: Vec::new(),
            session_failure: None,
            link: Rc::new(RefCell::new(Link::default())),
        }
    }

    pub fn fail(mut self, op: ControlOp, errno: i32) -> MockTransport {
        self.failures.push((op, errno));
        self
    }

    pub fn respond(&self, packet: Vec<u8>) {
        self.link.borrow_mut().events.push_back(packet);
    }

    pub fn ops(&self) -> Vec<ControlOp> {
        self.requests.iter().map(|r| r.op).collect()
    }
}

impl Transport for MockTransport {
    type Session = RecordingSink;

    fn device_list(&mut self, max: usize) -> io::Result<Vec<DeviceId>> {
        Ok(self.devices.iter().take(max).map(|d| d.id).collect())
    }

    fn device_info(&mut self, device: DeviceId) -> io::Result<DeviceInfo> {
        self.devices
            .iter()
            .find(|d| d.id == device)
            .cloned()
            .ok_or_else(|| io::Error::from_raw_os_error(libc::ENODEV))
    }

    fn control(&mut self, request: ControlRequest) -> io::Result<()> {
        self.requests.push(request);
        match self.failures.iter().find(|(op, _)| *op == request.op) {
            Some((_, errno)) => Err(io::Error::from_raw_os_error(*errno)),
            None => Ok(()),
        }
    }

    fn open_session(&mut self, _device: DeviceId) -> io::Result<RecordingSink> {
        if let Some(errno) = self.session_failure {
            return Err(io::Error::from_raw_os_error(errno));
        }

        self.link.borrow_mut().sessions += 1;
        Ok(RecordingSink {
            link: self.link.clone(),
        })
    }
}

/// A USB controller that is up and page-scanning.
pub fn device(id: u16) -> DeviceInfo {
    DeviceInfo {
        id: DeviceId(id),
        name: format!("hci{}", id),
        device_type: DeviceType::Usb,
        bdaddr: BdAddr([0x66, 0x55, 0x44, 0x33, 0x22, 0x11]),
        flags: DeviceFlags::UP | DeviceFlags::RUNNING | DeviceFlags::PSCAN,
        acl: Mtu {
            mtu: 310,
            packets: 10,
        },
        sco: Mtu { mtu: 64, packets: 8 },
        features: LmpFeatures::from_bytes(&[0x03, 0x00, 0x00, 0x00]),
        packet_type: PacketType::DM1 | PacketType::DH1 | PacketType::HV1,
        link_policy: LinkPolicy::RSWITCH | LinkPolicy::SNIFF,
        link_mode: LinkMode::ACCEPT,
        stats: DeviceStats {
            byte_rx: 1000,
            acl_rx: 3,
            evt_rx: 40,
            byte_tx: 500,
            acl_tx: 2,
            cmd_tx: 38,
            ..DeviceStats::default()
        },
    }
}

/// The header block printed for `device(id)`.
pub fn header(id: u16) -> String {
    format!(
        "hci{}:\tType: USB\n\tBD Address: 11:22:33:44:55:66 ACL MTU: 310:10  SCO MTU: 64:8\n",
        id
    )
}

pub fn command_complete(opcode: Opcode, return_params: &[u8]) -> Vec<u8> {
    let mut packet = vec![
        0x04,
        0x0E,
        (3 + return_params.len()) as u8,
        1,
        opcode.0 as u8,
        (opcode.0 >> 8) as u8,
    ];
    packet.extend_from_slice(return_params);
    packet
}

pub fn command_status(status: u8, opcode: Opcode) -> Vec<u8> {
    vec![
        0x04,
        0x0F,
        4,
        status,
        1,
        opcode.0 as u8,
        (opcode.0 >> 8) as u8,
    ]
}

/// The command packet sent for `opcode` with `params`.
pub fn command_packet(opcode: Opcode, params: &[u8]) -> Vec<u8> {
    let mut packet = vec![
        0x01,
        opcode.0 as u8,
        (opcode.0 >> 8) as u8,
        params.len() as u8,
    ];
    packet.extend_from_slice(params);
    packet
}
