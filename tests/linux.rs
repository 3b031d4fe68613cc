#![cfg(target_os = "linux")]

extern crate hci_config as hci;

use hci::transport::linux::{parse_device_info, DEVICE_INFO_LENGTH};
use hci::types::*;
use hci::{BdAddr, DeviceId};

fn put_u16(bytes: &mut [u8], at: usize, value: u16) {
    bytes[at..at + 2].copy_from_slice(&value.to_ne_bytes());
}

fn put_u32(bytes: &mut [u8], at: usize, value: u32) {
    bytes[at..at + 4].copy_from_slice(&value.to_ne_bytes());
}

#[test]
fn device_info_layout() {
    let mut bytes = [0; DEVICE_INFO_LENGTH];
    put_u16(&mut bytes, 0, 1);
    bytes[2..6].copy_from_slice(b"hci1");
    bytes[10..16].copy_from_slice(&[0x66, 0x55, 0x44, 0x33, 0x22, 0x11]);
    put_u32(&mut bytes, 16, 0x0d);
    bytes[20] = 0x01;
    bytes[21..29].copy_from_slice(&[0xff, 0xfe, 0x0d, 0x38, 0x08, 0x08, 0x59, 0x83]);
    put_u32(&mut bytes, 32, 0xcc18);
    put_u32(&mut bytes, 36, 0x0f);
    put_u32(&mut bytes, 40, 0x8000);
    put_u16(&mut bytes, 44, 1021);
    put_u16(&mut bytes, 46, 8);
    put_u16(&mut bytes, 48, 64);
    put_u16(&mut bytes, 50, 1);
    for i in 0..10 {
        put_u32(&mut bytes, 52 + 4 * i, i as u32 + 1);
    }

    let info = parse_device_info(&bytes);
    assert_eq!(info.id, DeviceId(1));
    assert_eq!(info.name, "hci1");
    assert_eq!(info.bdaddr, BdAddr([0x66, 0x55, 0x44, 0x33, 0x22, 0x11]));
    assert_eq!(
        info.flags,
        DeviceFlags::UP | DeviceFlags::RUNNING | DeviceFlags::PSCAN
    );
    assert_eq!(info.device_type, DeviceType::Usb);
    assert_eq!(info.features.to_bytes(), [0xff, 0xfe, 0x0d, 0x38]);
    assert_eq!(
        info.packet_type,
        PacketType::DM1
            | PacketType::DH1
            | PacketType::DM3
            | PacketType::DH3
            | PacketType::DM5
            | PacketType::DH5
    );
    assert_eq!(info.link_policy.names(), "RSWITCH HOLD SNIFF PARK");
    assert_eq!(info.link_mode, LinkMode::ACCEPT);
    assert_eq!(info.acl, Mtu { mtu: 1021, packets: 8 });
    assert_eq!(info.sco, Mtu { mtu: 64, packets: 1 });
    assert_eq!(info.stats.err_rx, 1);
    assert_eq!(info.stats.cmd_tx, 3);
    assert_eq!(info.stats.byte_tx, 10);
}

#[test]
fn name_fills_field() {
    let mut bytes = [0; DEVICE_INFO_LENGTH];
    bytes[2..10].copy_from_slice(b"hci12345");

    assert_eq!(parse_device_info(&bytes).name, "hci12345");
}
