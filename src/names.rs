//! Human-readable names for numeric codes the controller reports: core versions, company
//! identifiers and LMP feature bits.

use crate::types::LmpFeatures;

/// Returns the name of a Bluetooth Core version as reported in the HCI and LMP version fields
/// (Bluetooth Assigned Numbers, Link Manager).
pub fn core_version(version: u8) -> &'static str {
    match version {
        0x00 => "1.0b",
        0x01 => "1.1",
        0x02 => "1.2",
        0x03 => "2.0",
        0x04 => "2.1",
        0x05 => "3.0",
        0x06 => "4.0",
        0x07 => "4.1",
        0x08 => "4.2",
        0x09 => "5.0",
        0x0a => "5.1",
        0x0b => "5.2",
        0x0c => "5.3",
        0x0d => "5.4",
        _ => "n/a",
    }
}

/// Returns the name of a company identifier (Bluetooth Assigned Numbers, Company Identifiers).
pub fn company(id: u16) -> &'static str {
    match id {
        0 => "Ericsson Technology Licensing",
        1 => "Nokia Mobile Phones",
        2 => "Intel Corp.",
        3 => "IBM Corp.",
        4 => "Toshiba Corp.",
        5 => "3Com",
        6 => "Microsoft",
        7 => "Lucent",
        8 => "Motorola",
        9 => "Infineon Technologies AG",
        10 => "Cambridge Silicon Radio",
        11 => "Silicon Wave",
        12 => "Digianswer A/S",
        13 => "Texas Instruments Inc.",
        14 => "Parthus Technologies Inc.",
        15 => "Broadcom Corporation",
        16 => "Mitel Semiconductor",
        17 => "Widcomm, Inc.",
        18 => "Zeevo, Inc.",
        19 => "Atmel Corporation",
        20 => "Mitsubishi Electric Corporation",
        21 => "RTX Telecom A/S",
        22 => "KC Technology Inc.",
        23 => "Newlogic",
        24 => "Transilica, Inc.",
        25 => "Rohde & Schwarz GmbH & Co. KG",
        26 => "TTPCom Limited",
        27 => "Signia Technologies, Inc.",
        28 => "Conexant Systems Inc.",
        29 => "Qualcomm",
        30 => "Inventel",
        31 => "AVM Berlin",
        32 => "BandSpeed, Inc.",
        33 => "Mansella Ltd",
        34 => "NEC Corporation",
        35 => "WavePlus Technology Co., Ltd.",
        36 => "Alcatel",
        37 => "NXP Semiconductors",
        38 => "C Technologies",
        39 => "Open Interface",
        40 => "R F Micro Devices",
        41 => "Hitachi Ltd",
        42 => "Symbol Technologies, Inc.",
        43 => "Tenovis",
        44 => "Macronix International Co. Ltd.",
        45 => "GCT Semiconductor",
        46 => "Norwood Systems",
        47 => "MewTel Technology Inc.",
        48 => "ST Microelectronics",
        49 => "Synopsys, Inc.",
        93 => "Realtek Semiconductor Corporation",
        305 => "Cypress Semiconductor",
        0xffff => "internal use",
        _ => "not assigned",
    }
}

const FEATURE_NAMES: &[(LmpFeatures, &str)] = &[
    (LmpFeatures::THREE_SLOT_PACKETS, "<3-slot packets>"),
    (LmpFeatures::FIVE_SLOT_PACKETS, "<5-slot packets>"),
    (LmpFeatures::ENCRYPTION, "<encryption>"),
    (LmpFeatures::SLOT_OFFSET, "<slot offset>"),
    (LmpFeatures::TIMING_ACCURACY, "<timing accuracy>"),
    (LmpFeatures::ROLE_SWITCH, "<role switch>"),
    (LmpFeatures::HOLD_MODE, "<hold mode>"),
    (LmpFeatures::SNIFF_MODE, "<sniff mode>"),
    (LmpFeatures::PARK_STATE, "<park state>"),
    (LmpFeatures::POWER_CONTROL_REQUESTS, "<power control req>"),
    (LmpFeatures::CHANNEL_QUALITY_DRIVEN_DATA_RATE, "<CQDDR>"),
    (LmpFeatures::SCO_LINK, "<SCO link>"),
    (LmpFeatures::HV2_PACKETS, "<HV2 packets>"),
    (LmpFeatures::HV3_PACKETS, "<HV3 packets>"),
    (LmpFeatures::MU_LAW_LOG, "<u-law log>"),
    (LmpFeatures::A_LAW_LOG, "<A-law log>"),
    (LmpFeatures::CVSD, "<CVSD>"),
    (LmpFeatures::PAGING_PARAMETER_NEGOTIATION, "<paging scheme>"),
    (LmpFeatures::POWER_CONTROL, "<power control>"),
    (LmpFeatures::TRANSPARENT_SYNCHRONOUS_DATA, "<transparent SCO>"),
    (LmpFeatures::FLOW_CONTROL_LAG_LSB, "<flow control lag lsb>"),
    (LmpFeatures::FLOW_CONTROL_LAG_MID, "<flow control lag mb>"),
    (LmpFeatures::FLOW_CONTROL_LAG_MSB, "<flow control lag msb>"),
    (LmpFeatures::BROADCAST_ENCRYPTION, "<broadcast encrypt>"),
    (LmpFeatures::EDR_ACL_2_MBPS, "<EDR ACL 2 Mbps>"),
    (LmpFeatures::EDR_ACL_3_MBPS, "<EDR ACL 3 Mbps>"),
    (LmpFeatures::ENHANCED_INQUIRY_SCAN, "<enhanced iscan>"),
    (LmpFeatures::INTERLACED_INQUIRY_SCAN, "<interlaced iscan>"),
    (LmpFeatures::INTERLACED_PAGE_SCAN, "<interlaced pscan>"),
    (LmpFeatures::RSSI_WITH_INQUIRY_RESULTS, "<inquiry with RSSI>"),
    (LmpFeatures::EXTENDED_SCO_LINK, "<extended SCO>"),
];

/// Lists the names of the supported features, `per_line` to a line, every line starting with
/// `prefix`.
pub fn features(features: LmpFeatures, prefix: &str, per_line: usize) -> String {
    let names: Vec<&str> = FEATURE_NAMES
        .iter()
        .filter(|(flag, _)| features.contains(*flag))
        .map(|(_, name)| *name)
        .collect();

    names
        .chunks(per_line.max(1))
        .map(|line| format!("{}{}", prefix, line.join(" ")))
        .collect::<Vec<_>>()
        .join("\n")
}
