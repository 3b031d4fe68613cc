extern crate hci_config as hci;

use hci::types::*;
use hci::{BdAddr, DeviceId};
use std::time::Duration;

#[test]
fn slots_to_milliseconds() {
    assert_eq!(Slots(10).as_millis(), 6.25);
    assert_eq!(Slots(0x10).as_millis(), 10.0);
    assert_eq!(Slots(0x0800).as_millis(), 1280.0);
    assert_eq!(Slots(0x0012).as_duration(), Duration::from_micros(11250));
    assert_eq!(Slots(0x2000).to_string(), "8192 slots (5120.00 ms)");
}

#[test]
fn scan_activity_round_trip() {
    for (window, interval) in [(0x12, 0x800), (0x1000, 0x1000), (0, 0xffff)] {
        let activity = ScanActivity::parse(&format!("{}:{}", window, interval)).unwrap();
        let mut bytes = [0; ScanActivity::LENGTH];
        activity.copy_into_slice(&mut bytes);

        let decoded = ScanActivity::from_bytes(&bytes);
        assert_eq!(decoded.window, Slots(window));
        assert_eq!(decoded.interval, Slots(interval));
    }
}

#[test]
fn scan_activity_range_warnings() {
    assert!(ScanActivity::parse("18:4096").unwrap().out_of_range().is_empty());
    assert_eq!(
        ScanActivity::parse("17:4096").unwrap().out_of_range(),
        ["window"]
    );
    assert_eq!(
        ScanActivity::parse("18:4097").unwrap().out_of_range(),
        ["interval"]
    );
    assert_eq!(
        ScanActivity::parse("0:0").unwrap().out_of_range(),
        ["window", "interval"]
    );
}

#[test]
fn scan_activity_rejects_malformed() {
    assert_eq!(
        ScanActivity::parse("18"),
        Err(ParseError::BadPair("18".to_string()))
    );
    assert_eq!(
        ScanActivity::parse("18:x"),
        Err(ParseError::BadNumber("x".to_string()))
    );
    assert_eq!(
        ScanActivity::parse("18:70000"),
        Err(ParseError::BadNumber("70000".to_string()))
    );
}

#[test]
fn page_timeout_range() {
    assert!(PageTimeout::parse("1").unwrap().is_in_range());
    assert!(PageTimeout::parse("65535").unwrap().is_in_range());
    assert!(!PageTimeout::parse("0").unwrap().is_in_range());
    assert!(PageTimeout::parse("-1").is_err());
}

#[test]
fn mtu_packs_mtu_in_high_half() {
    let mtu = Mtu::parse("100:5").unwrap();
    assert_eq!(mtu.mtu, 100);
    assert_eq!(mtu.packets, 5);

    let word = mtu.option_word();
    if cfg!(target_endian = "little") {
        assert_eq!(word >> 16, 100);
        assert_eq!(word & 0xffff, 5);
    }
    assert_eq!(Mtu::from_option_word(word), mtu);
    assert_eq!(mtu.to_string(), "100:5");
}

#[test]
fn class_of_device_parse() {
    assert_eq!(ClassOfDevice::parse("1F00").unwrap().value(), 0x001f00);
    assert_eq!(ClassOfDevice::parse("0x5a020c").unwrap().value(), 0x5a020c);
    assert_eq!(
        ClassOfDevice::parse("1000000"),
        Err(ParseError::ClassTooLarge(0x100_0000))
    );
    assert_eq!(
        ClassOfDevice::parse("zz"),
        Err(ParseError::BadHex("zz".to_string()))
    );
}

#[test]
fn class_of_device_bytes() {
    let class = ClassOfDevice::parse("1F00").unwrap();
    let mut bytes = [0; 3];
    class.copy_into_slice(&mut bytes);
    assert_eq!(bytes, [0x00, 0x1F, 0x00]);
    assert_eq!(ClassOfDevice::from_bytes(&bytes), class);
    assert_eq!(class.to_string(), "0x001f00");
}

#[test]
fn local_name_limits() {
    let longest = "x".repeat(LocalName::LENGTH);
    assert!(LocalName::new(&longest).is_ok());
    assert_eq!(
        LocalName::new(&format!("{}y", longest)),
        Err(ParseError::NameTooLong(249, 248))
    );
}

#[test]
fn local_name_from_field() {
    let mut field = [0; LocalName::LENGTH];
    field[..5].copy_from_slice(b"phone");
    assert_eq!(LocalName::from_bytes(&field).as_str(), "phone");

    let full = [b'a'; LocalName::LENGTH];
    assert_eq!(LocalName::from_bytes(&full).as_str().len(), 248);
}

#[test]
fn packet_type_lists() {
    assert_eq!(
        PacketType::parse("DM1,DH1").unwrap(),
        PacketType::DM1 | PacketType::DH1
    );
    assert_eq!(
        PacketType::parse("dm3 , hv3").unwrap(),
        PacketType::DM3 | PacketType::HV3
    );
    assert_eq!(
        PacketType::parse("DM1,XYZ"),
        Err(ParseError::UnknownName {
            kind: "packet type",
            name: "XYZ".to_string()
        })
    );
    assert_eq!(
        PacketType::parse(" , "),
        Err(ParseError::EmptyList("packet type"))
    );
    assert_eq!(
        (PacketType::DH5 | PacketType::DM1).names(),
        "DM1 DH5"
    );
}

#[test]
fn link_policy_lists() {
    assert_eq!(LinkPolicy::parse("none").unwrap(), LinkPolicy::empty());
    assert_eq!(
        LinkPolicy::parse("rswitch sniff").unwrap(),
        LinkPolicy::RSWITCH | LinkPolicy::SNIFF
    );
    assert_eq!(LinkPolicy::empty().names(), "NONE");
    assert_eq!(
        (LinkPolicy::HOLD | LinkPolicy::PARK).names(),
        "HOLD PARK"
    );
}

#[test]
fn link_mode_names() {
    assert_eq!(LinkMode::ACCEPT.names(), "SLAVE ACCEPT");
    assert_eq!(
        (LinkMode::ACCEPT | LinkMode::MASTER).names(),
        "ACCEPT MASTER"
    );
    assert_eq!(
        LinkMode::parse("master,auth").unwrap(),
        LinkMode::MASTER | LinkMode::AUTH
    );
}

#[test]
fn device_flag_names() {
    assert_eq!(
        (DeviceFlags::UP | DeviceFlags::RUNNING | DeviceFlags::PSCAN).names(),
        "UP RUNNING PSCAN"
    );
    assert_eq!(DeviceFlags::empty().names(), "DOWN");
    assert_eq!(DeviceFlags::RAW.names(), "DOWN RAW");
}

#[test]
fn device_type_from_kernel() {
    assert_eq!(DeviceType::from_raw(1).name(), "USB");
    assert_eq!(DeviceType::from_raw(0x13).name(), "UART");
    assert_eq!(DeviceType::from_raw(0x0f), DeviceType::Unknown(0x0f));
}

#[test]
fn scan_mode_option_words() {
    assert_eq!(ScanMode::DISABLED.option_word(), 0);
    assert_eq!(ScanMode::INQUIRY.option_word(), 1);
    assert_eq!(ScanMode::PAGE.option_word(), 2);
    assert_eq!((ScanMode::INQUIRY | ScanMode::PAGE).option_word(), 3);
    assert_eq!(AuthMode::Enabled.option_word(), 1);
    assert_eq!(EncryptMode::Disabled.option_word(), 0);
}

#[test]
fn features_keep_controller_order() {
    let features = LmpFeatures::from_bytes(&[0xff, 0xfe, 0x0d, 0x38]);
    assert_eq!(features.to_bytes(), [0xff, 0xfe, 0x0d, 0x38]);
    assert!(features.contains(LmpFeatures::THREE_SLOT_PACKETS));
    assert!(!features.contains(LmpFeatures::PARK_STATE));
}

#[test]
fn address_is_printed_most_significant_first() {
    let addr = BdAddr([0x66, 0x55, 0x44, 0x33, 0x22, 0x11]);
    assert_eq!(addr.to_string(), "11:22:33:44:55:66");
    assert_eq!(BdAddr([0xab, 0, 0, 0, 0, 0x0c]).to_string(), "0C:00:00:00:00:AB");
}

#[test]
fn device_token() {
    assert_eq!("hci0".parse::<DeviceId>().unwrap(), DeviceId(0));
    assert_eq!("hci12".parse::<DeviceId>().unwrap(), DeviceId(12));
    assert_eq!(DeviceId(3).to_string(), "hci3");
    for bad in ["hci", "hcix", "0", "hci-1", "usb0", "hci99999"] {
        assert!(bad.parse::<DeviceId>().is_err(), "{} accepted", bad);
    }
}
