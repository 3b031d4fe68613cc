//! Device report formatting.
//!
//! Every report about a device is preceded by its header block. The header is printed once per
//! change of device: [`InfoFormatter`] remembers the last device it printed a header for and
//! suppresses the header for consecutive reports about the same device.

use crate::event::command::LocalVersionInfo;
use crate::names;
use crate::types::{
    ClassOfDevice, DeviceInfo, LinkMode, LinkPolicy, LmpFeatures, LocalName, PacketType,
    PageTimeout, ScanActivity,
};
use crate::DeviceId;
use std::io::{self, Write};

/// Prints device reports, keeping track of which device's header was printed last.
#[derive(Debug, Default)]
pub struct InfoFormatter {
    last_header: Option<DeviceId>,
}

impl InfoFormatter {
    /// Returns a formatter that has not printed any header yet.
    pub fn new() -> InfoFormatter {
        InfoFormatter::default()
    }

    /// Forgets the last printed header, so the next report prints one again.
    pub fn reset(&mut self) {
        self.last_header = None;
    }

    /// The device whose header was printed last.
    pub fn last_header(&self) -> Option<DeviceId> {
        self.last_header
    }

    /// Prints the header block for `info`, unless it was the last header printed.
    pub fn print_header<W: Write>(&mut self, out: &mut W, info: &DeviceInfo) -> io::Result<()> {
        if self.last_header == Some(info.id) {
            return Ok(());
        }
        self.last_header = Some(info.id);

        writeln!(out, "{}:\tType: {}", info.name, info.device_type.name())?;
        writeln!(
            out,
            "\tBD Address: {} ACL MTU: {}:{}  SCO MTU: {}:{}",
            info.bdaddr, info.acl.mtu, info.acl.packets, info.sco.mtu, info.sco.packets
        )
    }

    /// Prints the header, the flags and the traffic counters. In verbose mode, the features and
    /// the default link settings follow.
    ///
    /// Live queries to an up device and the closing blank line are the caller's business.
    pub fn print_summary<W: Write>(
        &mut self,
        out: &mut W,
        info: &DeviceInfo,
        verbose: bool,
    ) -> io::Result<()> {
        self.print_header(out, info)?;

        let st = &info.stats;
        writeln!(out, "\t{}", info.flags.names())?;
        writeln!(
            out,
            "\tRX bytes:{} acl:{} sco:{} events:{} errors:{}",
            st.byte_rx, st.acl_rx, st.sco_rx, st.evt_rx, st.err_rx
        )?;
        writeln!(
            out,
            "\tTX bytes:{} acl:{} sco:{} commands:{} errors:{}",
            st.byte_tx, st.acl_tx, st.sco_tx, st.cmd_tx, st.err_tx
        )?;

        if verbose {
            print_features(out, info.features, false)?;
            print_packet_type(out, info.packet_type)?;
            print_link_policy(out, info.link_policy)?;
            print_link_mode(out, info.link_mode)?;
        }

        Ok(())
    }
}

/// Prints the four feature octets, and with `names` the supported features, three to a line.
pub fn print_features<W: Write>(out: &mut W, features: LmpFeatures, names: bool) -> io::Result<()> {
    let b = features.to_bytes();
    writeln!(
        out,
        "\tFeatures: 0x{:02x} 0x{:02x} 0x{:02x} 0x{:02x}",
        b[0], b[1], b[2], b[3]
    )?;
    if names {
        writeln!(out, "{}", names::features(features, "\t\t", 3))?;
    }

    Ok(())
}

/// `\tPacket type: DM1 DH1 ...`
pub fn print_packet_type<W: Write>(out: &mut W, ptype: PacketType) -> io::Result<()> {
    writeln!(out, "\tPacket type: {}", ptype.names())
}

/// `\tLink policy: RSWITCH HOLD ...`
pub fn print_link_policy<W: Write>(out: &mut W, policy: LinkPolicy) -> io::Result<()> {
    writeln!(out, "\tLink policy: {}", policy.names())
}

/// `\tLink mode: SLAVE ACCEPT ...`
pub fn print_link_mode<W: Write>(out: &mut W, mode: LinkMode) -> io::Result<()> {
    writeln!(out, "\tLink mode: {}", mode.names())
}

pub(crate) fn print_name<W: Write>(out: &mut W, name: &LocalName) -> io::Result<()> {
    writeln!(out, "\tName: '{}'", name)
}

pub(crate) fn print_class<W: Write>(out: &mut W, class: ClassOfDevice) -> io::Result<()> {
    writeln!(out, "\tClass: 0x{:06x}", class.value())
}

pub(crate) fn print_version<W: Write>(out: &mut W, version: &LocalVersionInfo) -> io::Result<()> {
    writeln!(
        out,
        "\tHCI Ver: {} (0x{:x}) HCI Rev: 0x{:x} LMP Ver: {} (0x{:x}) LMP Subver: 0x{:x}",
        names::core_version(version.hci_version),
        version.hci_version,
        version.hci_revision,
        names::core_version(version.lmp_version),
        version.lmp_version,
        version.lmp_subversion
    )?;
    writeln!(
        out,
        "\tManufacturer: {} ({})",
        names::company(version.manufacturer_name),
        version.manufacturer_name
    )
}

pub(crate) fn print_activity<W: Write>(
    out: &mut W,
    label: &str,
    activity: ScanActivity,
) -> io::Result<()> {
    writeln!(
        out,
        "\t{} interval: {}, window: {}",
        label, activity.interval, activity.window
    )
}

pub(crate) fn print_page_timeout<W: Write>(out: &mut W, timeout: PageTimeout) -> io::Result<()> {
    writeln!(out, "\tPage timeout: {}", timeout.0)
}
