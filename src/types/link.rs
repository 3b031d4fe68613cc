//! Default packet types, link policy and link mode of a controller.
//!
//! All three are bit sets with a name for every bit. On the command line they are written as a
//! list of names separated by commas and/or whitespace, in any case (`DM1,DH1` or `"hold sniff"`).
//! Link policy and link mode also accept `NONE`, which contributes no bits.

use super::ParseError;
use bitflags::Flags;

bitflags::bitflags! {
    /// ACL and SCO packet types the controller may use by default.
    #[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
    pub struct PacketType : u32 {
        /// 1-slot, FEC-protected ACL packets.
        const DM1 = 0x0008;
        /// 3-slot, FEC-protected ACL packets.
        const DM3 = 0x0400;
        /// 5-slot, FEC-protected ACL packets.
        const DM5 = 0x4000;
        /// 1-slot, unprotected ACL packets.
        const DH1 = 0x0010;
        /// 3-slot, unprotected ACL packets.
        const DH3 = 0x0800;
        /// 5-slot, unprotected ACL packets.
        const DH5 = 0x8000;
        /// HV1 voice packets.
        const HV1 = 0x0020;
        /// HV2 voice packets.
        const HV2 = 0x0040;
        /// HV3 voice packets.
        const HV3 = 0x0080;
    }
}

bitflags::bitflags! {
    /// Link policy applied to new connections.
    #[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
    pub struct LinkPolicy : u32 {
        /// Role switch is allowed.
        const RSWITCH = 0x0001;
        /// Hold mode is allowed.
        const HOLD = 0x0002;
        /// Sniff mode is allowed.
        const SNIFF = 0x0004;
        /// Park state is allowed.
        const PARK = 0x0008;
    }
}

bitflags::bitflags! {
    /// Link mode applied to new connections.
    #[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
    pub struct LinkMode : u32 {
        /// Accept incoming connections.
        const ACCEPT = 0x8000;
        /// Become master of incoming connections. Without it the controller stays slave.
        const MASTER = 0x0001;
        /// Require authentication.
        const AUTH = 0x0002;
        /// Require encryption.
        const ENCRYPT = 0x0004;
        /// Only accept trusted devices.
        const TRUSTED = 0x0008;
        /// Reliable link.
        const RELIABLE = 0x0010;
        /// Secure link.
        const SECURE = 0x0020;
    }
}

impl PacketType {
    /// Parses a list of packet type names.
    pub fn parse(s: &str) -> Result<PacketType, ParseError> {
        parse_list(s, "packet type", false)
    }

    /// Returns the names of all set bits, separated by spaces.
    pub fn names(&self) -> String {
        join_names(self)
    }
}

impl LinkPolicy {
    /// Parses a list of link policy names.
    pub fn parse(s: &str) -> Result<LinkPolicy, ParseError> {
        parse_list(s, "link policy", true)
    }

    /// Returns the names of all set bits separated by spaces, or `NONE`.
    pub fn names(&self) -> String {
        if self.is_empty() {
            return "NONE".to_string();
        }
        join_names(self)
    }
}

impl LinkMode {
    /// Parses a list of link mode names.
    pub fn parse(s: &str) -> Result<LinkMode, ParseError> {
        parse_list(s, "link mode", true)
    }

    /// Returns the names of all set bits separated by spaces. `SLAVE` leads the list when
    /// `MASTER` is not set.
    pub fn names(&self) -> String {
        let mut names = Vec::new();
        if !self.contains(LinkMode::MASTER) {
            names.push("SLAVE");
        }
        names.extend(self.iter_names().map(|(name, _)| name));
        names.join(" ")
    }
}

fn parse_list<F: Flags>(
    s: &str,
    kind: &'static str,
    allow_none: bool,
) -> Result<F, ParseError> {
    let mut flags = F::empty();
    let mut any = false;

    for token in s.split(|c: char| c == ',' || c.is_whitespace()) {
        if token.is_empty() {
            continue;
        }

        let upper = token.to_ascii_uppercase();
        if allow_none && upper == "NONE" {
            any = true;
            continue;
        }

        let flag = F::from_name(&upper).ok_or_else(|| ParseError::UnknownName {
            kind,
            name: token.to_string(),
        })?;
        flags.insert(flag);
        any = true;
    }

    if !any {
        return Err(ParseError::EmptyList(kind));
    }

    Ok(flags)
}

fn join_names<F: Flags>(flags: &F) -> String {
    flags
        .iter_names()
        .map(|(name, _)| name)
        .collect::<Vec<_>>()
        .join(" ")
}
