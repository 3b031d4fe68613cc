//! The command table: which tokens the tool understands, which of them take an option, and what
//! they do.
//!
//! A token selects an entry either by its full name or by an abbreviation. An abbreviation must be
//! at least as long as the entry's minimum unique prefix, the shortest prefix no other entry
//! shares, which is computed when the table is built. Tokens that select nothing are skipped.
//!
//! All tokens of an invocation are parsed into [`Action`]s before the first one runs, so a
//! malformed option stops the invocation before the device is touched.

use crate::command::{Access, Configurator};
use crate::error::{Error, Result};
use crate::transport::Transport;
use crate::types::{
    AuthMode, ClassOfDevice, EncryptMode, LinkMode, LinkPolicy, LocalName, Mtu, PacketType,
    PageTimeout, ParseError, ScanActivity, ScanMode,
};
use crate::DeviceId;
use std::fmt::Write as _;
use std::io::Write;

/// Whether a command consumes the following token as its option.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ArgKind {
    /// The command takes no option.
    None,
    /// The following token, if any, is the option; without it the command reports the current
    /// value. Includes the usage placeholder.
    Optional(&'static str),
    /// The following token is the option and must be present. Includes the usage placeholder.
    Required(&'static str),
}

impl ArgKind {
    fn placeholder(&self) -> &'static str {
        match self {
            ArgKind::None => "",
            ArgKind::Optional(p) | ArgKind::Required(p) => p,
        }
    }
}

/// One parsed command, ready to run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Action {
    /// `up`
    Up,
    /// `down`
    Down,
    /// `reset`
    Reset,
    /// `rstat`
    ResetStats,
    /// `auth`, `noauth`
    Auth(AuthMode),
    /// `encrypt`, `noencrypt`
    Encrypt(EncryptMode),
    /// `piscan`, `noscan`, `iscan`, `pscan`
    Scan(ScanMode),
    /// `ptype`
    PacketType(Access<PacketType>),
    /// `lm`
    LinkMode(Access<LinkMode>),
    /// `lp`
    LinkPolicy(Access<LinkPolicy>),
    /// `name`
    Name(Access<LocalName>),
    /// `class`
    Class(Access<ClassOfDevice>),
    /// `inqparms`
    InquiryActivity(Access<ScanActivity>),
    /// `pageparms`
    PageActivity(Access<ScanActivity>),
    /// `pageto`
    PageTimeout(Access<PageTimeout>),
    /// `aclmtu`
    AclMtu(Mtu),
    /// `scomtu`
    ScoMtu(Mtu),
    /// `features`
    Features,
    /// `version`
    Version,
    /// `revision`
    Revision,
}

impl Action {
    /// Runs the command against `device`.
    pub fn execute<T, W>(self, config: &mut Configurator<T, W>, device: DeviceId) -> Result<()>
    where
        T: Transport,
        W: Write,
    {
        match self {
            Action::Up => config.up(device).map(|_| ()),
            Action::Down => config.down(device),
            Action::Reset => config.reset(device).map(|_| ()),
            Action::ResetStats => config.reset_statistics(device),
            Action::Auth(mode) => config.auth(device, mode),
            Action::Encrypt(mode) => config.encrypt(device, mode),
            Action::Scan(mode) => config.scan(device, mode),
            Action::PacketType(access) => config.packet_type(device, access),
            Action::LinkMode(access) => config.link_mode(device, access),
            Action::LinkPolicy(access) => config.link_policy(device, access),
            Action::Name(access) => config.name(device, access),
            Action::Class(access) => config.class(device, access),
            Action::InquiryActivity(access) => config.inquiry_activity(device, access),
            Action::PageActivity(access) => config.page_activity(device, access),
            Action::PageTimeout(access) => config.page_timeout(device, access),
            Action::AclMtu(mtu) => config.acl_mtu(device, mtu),
            Action::ScoMtu(mtu) => config.sco_mtu(device, mtu),
            Action::Features => config.features(device),
            Action::Version => config.version(device),
            Action::Revision => config.revision(device),
        }
    }
}

type Builder = fn(Option<&str>) -> std::result::Result<Action, ParseError>;

fn read_or_write<T>(
    arg: Option<&str>,
    parse: fn(&str) -> std::result::Result<T, ParseError>,
) -> std::result::Result<Access<T>, ParseError> {
    match arg {
        None => Ok(Access::Read),
        Some(arg) => parse(arg).map(Access::Write),
    }
}

fn entry(token: &'static str, arg: ArgKind, doc: &'static str, build: Builder) -> CommandEntry {
    CommandEntry {
        token,
        arg,
        doc,
        min_prefix: token.len(),
        build,
    }
}

/// One row of the command table.
#[derive(Clone)]
pub struct CommandEntry {
    /// Full command name.
    pub token: &'static str,
    /// Whether the command takes an option.
    pub arg: ArgKind,
    /// One-line description for the usage text.
    pub doc: &'static str,
    min_prefix: usize,
    build: Builder,
}

impl core::fmt::Debug for CommandEntry {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        f.debug_struct("CommandEntry")
            .field("token", &self.token)
            .field("arg", &self.arg)
            .field("min_prefix", &self.min_prefix)
            .finish()
    }
}

impl CommandEntry {
    /// Length of the shortest abbreviation that selects this entry.
    pub fn min_prefix(&self) -> usize {
        self.min_prefix
    }

    fn matches(&self, token: &str) -> bool {
        token == self.token || (token.len() >= self.min_prefix && self.token.starts_with(token))
    }
}

/// The ordered list of commands.
#[derive(Clone, Debug)]
pub struct CommandTable {
    entries: Vec<CommandEntry>,
}

impl Default for CommandTable {
    fn default() -> CommandTable {
        CommandTable::new()
    }
}

impl CommandTable {
    /// Builds the table of every command the tool supports, in usage order.
    pub fn new() -> CommandTable {
        let mut entries = vec![
            entry(
                "up",
                ArgKind::None,
                "Open and initialize HCI device",
                |_| Ok(Action::Up),
            ),
            entry(
                "down",
                ArgKind::None,
                "Close HCI device",
                |_| Ok(Action::Down),
            ),
            entry(
                "reset",
                ArgKind::None,
                "Reset HCI device",
                |_| Ok(Action::Reset),
            ),
            entry(
                "rstat",
                ArgKind::None,
                "Reset statistic counters",
                |_| Ok(Action::ResetStats),
            ),
            entry(
                "auth",
                ArgKind::None,
                "Enable Authentication",
                |_| Ok(Action::Auth(AuthMode::Enabled)),
            ),
            entry(
                "noauth",
                ArgKind::None,
                "Disable Authentication",
                |_| Ok(Action::Auth(AuthMode::Disabled)),
            ),
            entry(
                "encrypt",
                ArgKind::None,
                "Enable Encryption",
                |_| Ok(Action::Encrypt(EncryptMode::PointToPoint)),
            ),
            entry(
                "noencrypt",
                ArgKind::None,
                "Disable Encryption",
                |_| Ok(Action::Encrypt(EncryptMode::Disabled)),
            ),
            entry(
                "piscan",
                ArgKind::None,
                "Enable Page and Inquiry scan",
                |_| Ok(Action::Scan(ScanMode::INQUIRY | ScanMode::PAGE)),
            ),
            entry(
                "noscan",
                ArgKind::None,
                "Disable scan",
                |_| Ok(Action::Scan(ScanMode::DISABLED)),
            ),
            entry(
                "iscan",
                ArgKind::None,
                "Enable Inquiry scan",
                |_| Ok(Action::Scan(ScanMode::INQUIRY)),
            ),
            entry(
                "pscan",
                ArgKind::None,
                "Enable Page scan",
                |_| Ok(Action::Scan(ScanMode::PAGE)),
            ),
            entry(
                "ptype",
                ArgKind::Optional("[type]"),
                "Get/Set default packet type",
                |arg| read_or_write(arg, PacketType::parse).map(Action::PacketType),
            ),
            entry(
                "lm",
                ArgKind::Optional("[mode]"),
                "Get/Set default link mode",
                |arg| read_or_write(arg, LinkMode::parse).map(Action::LinkMode),
            ),
            entry(
                "lp",
                ArgKind::Optional("[policy]"),
                "Get/Set default link policy",
                |arg| read_or_write(arg, LinkPolicy::parse).map(Action::LinkPolicy),
            ),
            entry(
                "name",
                ArgKind::Optional("[name]"),
                "Get/Set local name",
                |arg| read_or_write(arg, LocalName::new).map(Action::Name),
            ),
            entry(
                "class",
                ArgKind::Optional("[class]"),
                "Get/Set class of device",
                |arg| read_or_write(arg, ClassOfDevice::parse).map(Action::Class),
            ),
            entry(
                "inqparms",
                ArgKind::Optional("[win:int]"),
                "Get/Set inquiry scan window and interval",
                |arg| read_or_write(arg, ScanActivity::parse).map(Action::InquiryActivity),
            ),
            entry(
                "pageparms",
                ArgKind::Optional("[win:int]"),
                "Get/Set page scan window and interval",
                |arg| read_or_write(arg, ScanActivity::parse).map(Action::PageActivity),
            ),
            entry(
                "pageto",
                ArgKind::Optional("[to]"),
                "Get/Set page timeout",
                |arg| read_or_write(arg, PageTimeout::parse).map(Action::PageTimeout),
            ),
            entry(
                "aclmtu",
                ArgKind::Required("<mtu:pkt>"),
                "Set ACL MTU and number of packets",
                |arg| Mtu::parse(arg.unwrap_or_default()).map(Action::AclMtu),
            ),
            entry(
                "scomtu",
                ArgKind::Required("<mtu:pkt>"),
                "Set SCO MTU and number of packets",
                |arg| Mtu::parse(arg.unwrap_or_default()).map(Action::ScoMtu),
            ),
            entry(
                "features",
                ArgKind::None,
                "Display device features",
                |_| Ok(Action::Features),
            ),
            entry(
                "version",
                ArgKind::None,
                "Display version information",
                |_| Ok(Action::Version),
            ),
            entry(
                "revision",
                ArgKind::None,
                "Display revision information",
                |_| Ok(Action::Revision),
            ),
        ];

        let tokens: Vec<&'static str> = entries.iter().map(|e| e.token).collect();
        for e in &mut entries {
            e.min_prefix = min_unique_prefix(e.token, &tokens);
        }

        CommandTable { entries }
    }

    /// The entries, in usage order.
    pub fn entries(&self) -> &[CommandEntry] {
        &self.entries
    }

    /// Finds the entry a token selects: the entry of that name, or else the single entry the
    /// token abbreviates.
    pub fn resolve(&self, token: &str) -> Option<&CommandEntry> {
        if let Some(entry) = self.entries.iter().find(|e| e.token == token) {
            return Some(entry);
        }

        let mut candidates = self.entries.iter().filter(|e| e.matches(token));
        match (candidates.next(), candidates.next()) {
            (Some(entry), None) => Some(entry),
            _ => None,
        }
    }

    /// Parses a token sequence into actions. An entry that takes an option consumes the next
    /// token as that option. Unknown tokens are skipped.
    ///
    /// # Errors
    ///
    /// - [`Error::MissingArgument`] if a command that requires an option ends the sequence.
    /// - [`Error::InvalidOption`] if an option cannot be parsed.
    pub fn parse<'a, I>(&self, tokens: I) -> Result<Vec<Action>>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut tokens = tokens.into_iter();
        let mut actions = Vec::new();

        while let Some(token) = tokens.next() {
            let entry = match self.resolve(token) {
                Some(entry) => entry,
                None => {
                    tracing::warn!(token, "ignoring unknown command");
                    continue;
                }
            };

            let arg = match entry.arg {
                ArgKind::None => None,
                ArgKind::Optional(_) => tokens.next(),
                ArgKind::Required(placeholder) => {
                    Some(tokens.next().ok_or(Error::MissingArgument {
                        command: entry.token,
                        placeholder,
                    })?)
                }
            };

            let action = (entry.build)(arg).map_err(|source| Error::InvalidOption {
                command: entry.token,
                source,
            })?;
            actions.push(action);
        }

        Ok(actions)
    }

    /// Parses `tokens` and runs the resulting actions against `device`, left to right. Without
    /// any action, prints the device report instead.
    ///
    /// The device must exist; its information is fetched before anything else happens.
    pub fn run<'a, I, T, W>(
        &self,
        config: &mut Configurator<T, W>,
        device: DeviceId,
        tokens: I,
    ) -> Result<()>
    where
        I: IntoIterator<Item = &'a str>,
        T: Transport,
        W: Write,
    {
        let actions = self.parse(tokens)?;
        config.device_info(device)?;

        if actions.is_empty() {
            return config.print_info(device);
        }

        for action in actions {
            tracing::debug!(%device, ?action, "running");
            action.execute(config, device)?;
        }

        Ok(())
    }

    /// The command list for the usage text: one line per entry with its option placeholder and
    /// description.
    pub fn usage(&self) -> String {
        let mut text = String::from("Commands:\n");
        for entry in &self.entries {
            let placeholder = match entry.arg.placeholder() {
                "" => " ",
                p => p,
            };
            let _ = writeln!(text, "\t{:<10} {:<8}\t{}", entry.token, placeholder, entry.doc);
        }
        text
    }
}

/// Length of the shortest prefix of `token` that is not also a prefix of any other token. A token
/// that is itself a prefix of another can only be selected in full.
fn min_unique_prefix(token: &str, tokens: &[&str]) -> usize {
    (1..=token.len())
        .find(|&n| {
            let prefix = &token[..n];
            tokens
                .iter()
                .filter(|&&other| other != token)
                .all(|other| !other.starts_with(prefix))
        })
        .unwrap_or(token.len())
}
