//! Control-plane requests: one option word, addressed by device index, answered with success or an
//! OS error.
//!
//! Every function blocks until the transport acknowledges the request. Nothing is retried; a
//! failure carries the device and the attempted operation.

use crate::error::{Error, Result};
use crate::transport::{ControlOp, ControlRequest, Transport};
use crate::types::{AuthMode, EncryptMode, LinkMode, LinkPolicy, Mtu, PacketType, ScanMode};
use crate::DeviceId;

/// Outcome of [`bring_up`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Transition {
    /// The device was down and is now up, with page and inquiry scan enabled.
    Up,
    /// The device was already up. Nothing was changed.
    AlreadyUp,
}

fn request<T: Transport>(
    transport: &mut T,
    device: DeviceId,
    op: ControlOp,
    what: &'static str,
) -> Result<()> {
    tracing::debug!(%device, ?op, option = op.option_word(), "control request");
    transport
        .control(ControlRequest { device, op })
        .map_err(|source| Error::Control {
            device,
            op: what,
            source,
        })
}

/// Opens and initializes the device.
///
/// A device that is already up is left alone. A device that comes up from down additionally gets
/// page and inquiry scan enabled.
pub fn bring_up<T: Transport>(transport: &mut T, device: DeviceId) -> Result<Transition> {
    match transport.control(ControlRequest {
        device,
        op: ControlOp::Up,
    }) {
        Ok(()) => {
            set_scan_mode(transport, device, ScanMode::INQUIRY | ScanMode::PAGE)?;
            Ok(Transition::Up)
        }
        Err(e) if e.raw_os_error() == Some(libc::EALREADY) => {
            tracing::debug!(%device, "already up");
            Ok(Transition::AlreadyUp)
        }
        Err(source) => Err(Error::Control {
            device,
            op: "init device",
            source,
        }),
    }
}

/// Closes the device, whatever its state.
pub fn bring_down<T: Transport>(transport: &mut T, device: DeviceId) -> Result<()> {
    request(transport, device, ControlOp::Down, "down device")
}

/// Closes and reopens the device. There is no dedicated reset request.
pub fn reset<T: Transport>(transport: &mut T, device: DeviceId) -> Result<Transition> {
    bring_down(transport, device)?;
    bring_up(transport, device)
}

/// Zeroes the device's traffic counters.
pub fn reset_statistics<T: Transport>(transport: &mut T, device: DeviceId) -> Result<()> {
    request(
        transport,
        device,
        ControlOp::ResetStats,
        "reset stats counters on",
    )
}

/// Sets which scans the device performs.
pub fn set_scan_mode<T: Transport>(
    transport: &mut T,
    device: DeviceId,
    mode: ScanMode,
) -> Result<()> {
    request(transport, device, ControlOp::Scan(mode), "set scan mode on")
}

/// Enables or disables authentication.
pub fn set_auth<T: Transport>(transport: &mut T, device: DeviceId, mode: AuthMode) -> Result<()> {
    request(transport, device, ControlOp::Auth(mode), "set auth on")
}

/// Enables or disables encryption.
pub fn set_encrypt<T: Transport>(
    transport: &mut T,
    device: DeviceId,
    mode: EncryptMode,
) -> Result<()> {
    request(transport, device, ControlOp::Encrypt(mode), "set encrypt on")
}

/// Sets the default packet types.
pub fn set_packet_type<T: Transport>(
    transport: &mut T,
    device: DeviceId,
    ptype: PacketType,
) -> Result<()> {
    request(transport, device, ControlOp::PacketType(ptype), "set pkttype on")
}

/// Sets the default link policy.
pub fn set_link_policy<T: Transport>(
    transport: &mut T,
    device: DeviceId,
    policy: LinkPolicy,
) -> Result<()> {
    request(
        transport,
        device,
        ControlOp::LinkPolicy(policy),
        "set link policy on",
    )
}

/// Sets the default link mode.
pub fn set_link_mode<T: Transport>(
    transport: &mut T,
    device: DeviceId,
    mode: LinkMode,
) -> Result<()> {
    request(
        transport,
        device,
        ControlOp::LinkMode(mode),
        "set default link mode on",
    )
}

/// Sets the ACL buffer size.
pub fn set_acl_mtu<T: Transport>(transport: &mut T, device: DeviceId, mtu: Mtu) -> Result<()> {
    request(transport, device, ControlOp::AclMtu(mtu), "set ACL mtu on")
}

/// Sets the SCO buffer size.
pub fn set_sco_mtu<T: Transport>(transport: &mut T, device: DeviceId, mtu: Mtu) -> Result<()> {
    request(transport, device, ControlOp::ScoMtu(mtu), "set SCO mtu on")
}
