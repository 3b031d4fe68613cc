//! Handlers for the tool's commands.
//!
//! A [`Configurator`] owns the raw control handle, the report output and the header memo. Its
//! handlers either issue a control request (see [`crate::control`]) or open a short-lived session
//! on the device and run one command/response exchange on it (see [`crate::host::Hci`]).
//!
//! Settings that can be both read and changed take an [`Access`]: `Read` prints the current value
//! under the device header, `Write` changes it and prints nothing.

use crate::control::{self, Transition};
use crate::error::{Error, ExchangeError, Result};
use crate::host::Hci;
use crate::info::{self, InfoFormatter};
use crate::transport::Transport;
use crate::types::{
    AuthMode, ClassOfDevice, DeviceInfo, EncryptMode, LinkMode, LinkPolicy, LocalName, Mtu,
    PacketType, PageTimeout, ScanActivity, ScanMode,
};
use crate::{DeviceId, COMMAND_TIMEOUT, MAX_DEVICES};
use std::io::Write;
use std::time::Duration;

/// Manufacturer whose controllers answer the vendor revision query.
const REVISION_MANUFACTURER: u16 = 0;

/// Whether a handler reports the current value or changes it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Access<T> {
    /// Print the current value.
    Read,
    /// Change the value.
    Write(T),
}

/// Invocation-wide settings.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Options {
    /// Print the full device report: features, default link settings and, for an up device, the
    /// name, class and version read from the controller.
    pub verbose: bool,
    /// Bound on each command/response exchange.
    pub timeout: Duration,
}

impl Default for Options {
    fn default() -> Options {
        Options {
            verbose: false,
            timeout: COMMAND_TIMEOUT,
        }
    }
}

/// Runs commands against the controllers reachable through one transport, printing reports to
/// `out`.
#[derive(Debug)]
pub struct Configurator<T, W> {
    transport: T,
    out: W,
    formatter: InfoFormatter,
    options: Options,
}

impl<T, W> Configurator<T, W>
where
    T: Transport,
    W: Write,
{
    /// Returns a configurator that has not printed anything yet.
    pub fn new(transport: T, out: W, options: Options) -> Configurator<T, W> {
        Configurator {
            transport,
            out,
            formatter: InfoFormatter::new(),
            options,
        }
    }

    /// The transport.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// The report output.
    pub fn output(&self) -> &W {
        &self.out
    }

    /// Fetches the current information for a device.
    pub fn device_info(&mut self, device: DeviceId) -> Result<DeviceInfo> {
        self.transport
            .device_info(device)
            .map_err(|source| Error::DeviceInfo { device, source })
    }

    fn print_header(&mut self, device: DeviceId) -> Result<()> {
        let info = self.device_info(device)?;
        self.formatter.print_header(&mut self.out, &info)?;
        Ok(())
    }

    fn exchange<R, F>(&mut self, device: DeviceId, op: &'static str, f: F) -> Result<R>
    where
        F: FnOnce(&mut T::Session, Duration) -> std::result::Result<R, ExchangeError>,
    {
        let mut session = self
            .transport
            .open_session(device)
            .map_err(|source| Error::Session { device, source })?;

        f(&mut session, self.options.timeout).map_err(|e| Error::exchange(device, op, e))
    }

    /// Prints the report for every device the transport knows, each followed by a blank line.
    /// Devices whose information cannot be fetched are skipped.
    pub fn list_devices(&mut self) -> Result<()> {
        let devices = self
            .transport
            .device_list(MAX_DEVICES)
            .map_err(Error::DeviceList)?;

        for device in devices {
            match self.transport.device_info(device) {
                Ok(info) => self.print_device_info(&info)?,
                Err(e) => tracing::warn!(%device, error = %e, "skipping device"),
            }
        }

        Ok(())
    }

    /// Prints the report for one device, followed by a blank line.
    pub fn print_info(&mut self, device: DeviceId) -> Result<()> {
        let info = self.device_info(device)?;
        self.print_device_info(&info)
    }

    fn print_device_info(&mut self, info: &DeviceInfo) -> Result<()> {
        self.formatter
            .print_summary(&mut self.out, info, self.options.verbose)?;

        if self.options.verbose && info.is_up() {
            self.name(info.id, Access::Read)?;
            self.class(info.id, Access::Read)?;
            self.version(info.id)?;
        }

        writeln!(self.out)?;
        Ok(())
    }

    /// `up`
    pub fn up(&mut self, device: DeviceId) -> Result<Transition> {
        control::bring_up(&mut self.transport, device)
    }

    /// `down`
    pub fn down(&mut self, device: DeviceId) -> Result<()> {
        control::bring_down(&mut self.transport, device)
    }

    /// `reset`
    pub fn reset(&mut self, device: DeviceId) -> Result<Transition> {
        control::reset(&mut self.transport, device)
    }

    /// `rstat`
    pub fn reset_statistics(&mut self, device: DeviceId) -> Result<()> {
        control::reset_statistics(&mut self.transport, device)
    }

    /// `piscan`, `iscan`, `pscan`, `noscan`
    pub fn scan(&mut self, device: DeviceId, mode: ScanMode) -> Result<()> {
        control::set_scan_mode(&mut self.transport, device, mode)
    }

    /// `auth`, `noauth`
    pub fn auth(&mut self, device: DeviceId, mode: AuthMode) -> Result<()> {
        control::set_auth(&mut self.transport, device, mode)
    }

    /// `encrypt`, `noencrypt`
    pub fn encrypt(&mut self, device: DeviceId, mode: EncryptMode) -> Result<()> {
        control::set_encrypt(&mut self.transport, device, mode)
    }

    /// `ptype [type]`
    pub fn packet_type(&mut self, device: DeviceId, access: Access<PacketType>) -> Result<()> {
        match access {
            Access::Write(ptype) => control::set_packet_type(&mut self.transport, device, ptype),
            Access::Read => {
                let info = self.device_info(device)?;
                self.formatter.print_header(&mut self.out, &info)?;
                info::print_packet_type(&mut self.out, info.packet_type)?;
                Ok(())
            }
        }
    }

    /// `lp [policy]`
    pub fn link_policy(&mut self, device: DeviceId, access: Access<LinkPolicy>) -> Result<()> {
        match access {
            Access::Write(policy) => control::set_link_policy(&mut self.transport, device, policy),
            Access::Read => {
                let info = self.device_info(device)?;
                self.formatter.print_header(&mut self.out, &info)?;
                info::print_link_policy(&mut self.out, info.link_policy)?;
                Ok(())
            }
        }
    }

    /// `lm [mode]`
    pub fn link_mode(&mut self, device: DeviceId, access: Access<LinkMode>) -> Result<()> {
        match access {
            Access::Write(mode) => control::set_link_mode(&mut self.transport, device, mode),
            Access::Read => {
                let info = self.device_info(device)?;
                self.formatter.print_header(&mut self.out, &info)?;
                info::print_link_mode(&mut self.out, info.link_mode)?;
                Ok(())
            }
        }
    }

    /// `aclmtu <mtu:pkt>`
    pub fn acl_mtu(&mut self, device: DeviceId, mtu: Mtu) -> Result<()> {
        control::set_acl_mtu(&mut self.transport, device, mtu)
    }

    /// `scomtu <mtu:pkt>`
    pub fn sco_mtu(&mut self, device: DeviceId, mtu: Mtu) -> Result<()> {
        control::set_sco_mtu(&mut self.transport, device, mtu)
    }

    /// `name [name]`
    pub fn name(&mut self, device: DeviceId, access: Access<LocalName>) -> Result<()> {
        match access {
            Access::Write(name) => self.exchange(device, "change local name", |s, t| {
                s.change_local_name(&name, t)
            }),
            Access::Read => {
                let name = self.exchange(device, "read local name", |s, t| s.read_local_name(t))?;
                self.print_header(device)?;
                info::print_name(&mut self.out, &name)?;
                Ok(())
            }
        }
    }

    /// `class [class]`
    pub fn class(&mut self, device: DeviceId, access: Access<ClassOfDevice>) -> Result<()> {
        match access {
            Access::Write(class) => self.exchange(device, "write class of device", |s, t| {
                s.write_class_of_device(class, t)
            }),
            Access::Read => {
                let class = self.exchange(device, "read class of device", |s, t| {
                    s.read_class_of_device(t)
                })?;
                self.print_header(device)?;
                info::print_class(&mut self.out, class)?;
                Ok(())
            }
        }
    }

    /// `version`
    pub fn version(&mut self, device: DeviceId) -> Result<()> {
        let version = self.exchange(device, "read version info", |s, t| {
            s.read_local_version_information(t)
        })?;
        self.print_header(device)?;
        info::print_version(&mut self.out, &version)?;
        Ok(())
    }

    /// `revision`
    pub fn revision(&mut self, device: DeviceId) -> Result<()> {
        let version = self.exchange(device, "read version info", |s, t| {
            s.read_local_version_information(t)
        })?;
        self.print_header(device)?;

        if version.manufacturer_name != REVISION_MANUFACTURER {
            writeln!(self.out, "\tUnsupported manufacturer")?;
            return Ok(());
        }

        let revision = self.exchange(device, "read revision info", |s, t| {
            s.read_vendor_revision(t)
        })?;
        writeln!(self.out, "\t{}", revision)?;
        Ok(())
    }

    /// `features`
    pub fn features(&mut self, device: DeviceId) -> Result<()> {
        let info = self.device_info(device)?;
        self.formatter.print_header(&mut self.out, &info)?;
        info::print_features(&mut self.out, info.features, true)?;
        Ok(())
    }

    /// `inqparms [win:int]`
    pub fn inquiry_activity(
        &mut self,
        device: DeviceId,
        access: Access<ScanActivity>,
    ) -> Result<()> {
        match access {
            Access::Write(activity) => {
                self.warn_out_of_range("inquiry", &activity)?;
                self.exchange(device, "set inquiry parameters", |s, t| {
                    s.write_inquiry_scan_activity(activity, t)
                })
            }
            Access::Read => {
                let activity = self.exchange(device, "read inquiry parameters", |s, t| {
                    s.read_inquiry_scan_activity(t)
                })?;
                self.print_header(device)?;
                info::print_activity(&mut self.out, "Inquiry", activity)?;
                Ok(())
            }
        }
    }

    /// `pageparms [win:int]`
    pub fn page_activity(&mut self, device: DeviceId, access: Access<ScanActivity>) -> Result<()> {
        match access {
            Access::Write(activity) => {
                self.warn_out_of_range("page", &activity)?;
                self.exchange(device, "set page parameters", |s, t| {
                    s.write_page_scan_activity(activity, t)
                })
            }
            Access::Read => {
                let activity = self.exchange(device, "read page parameters", |s, t| {
                    s.read_page_scan_activity(t)
                })?;
                self.print_header(device)?;
                info::print_activity(&mut self.out, "Page", activity)?;
                Ok(())
            }
        }
    }

    /// `pageto [to]`
    pub fn page_timeout(&mut self, device: DeviceId, access: Access<PageTimeout>) -> Result<()> {
        match access {
            Access::Write(timeout) => {
                if !timeout.is_in_range() {
                    writeln!(self.out, "Warning: page timeout out of range!")?;
                }
                self.exchange(device, "set page timeout", |s, t| {
                    s.write_page_timeout(timeout, t)
                })
            }
            Access::Read => {
                let timeout =
                    self.exchange(device, "read page timeout", |s, t| s.read_page_timeout(t))?;
                self.print_header(device)?;
                info::print_page_timeout(&mut self.out, timeout)?;
                Ok(())
            }
        }
    }

    fn warn_out_of_range(&mut self, scan: &str, activity: &ScanActivity) -> Result<()> {
        for field in activity.out_of_range() {
            writeln!(self.out, "Warning: {} {} out of range!", scan, field)?;
        }
        Ok(())
    }
}
