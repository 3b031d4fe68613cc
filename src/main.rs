//! hciconfig - HCI device configuration utility.

use clap::{CommandFactory, FromArgMatches, Parser};
use hci_config::dispatch::CommandTable;
use std::io;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Configure and query local Bluetooth HCI controllers.
#[derive(Debug, Parser)]
#[command(name = "hciconfig", version)]
struct Cli {
    /// Print the full report: features, link settings, and name, class and version of up devices
    #[arg(short, long)]
    all: bool,

    /// Device to work on (hci0, hci1, ...). Without one, every device is listed
    device: Option<String>,

    /// Commands, each followed by its option if it takes one
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    commands: Vec<String>,
}

fn main() -> ExitCode {
    let table = CommandTable::new();
    let matches = Cli::command().after_help(table.usage()).get_matches();
    let cli = Cli::from_arg_matches(&matches).unwrap_or_else(|e| e.exit());

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    match run(cli, &table) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            println!("{}", e);
            ExitCode::FAILURE
        }
    }
}

#[cfg(target_os = "linux")]
fn run(cli: Cli, table: &CommandTable) -> hci_config::Result<()> {
    use hci_config::command::{Configurator, Options};
    use hci_config::transport::linux::HciSocket;
    use hci_config::DeviceId;

    let device = cli
        .device
        .as_deref()
        .map(str::parse::<DeviceId>)
        .transpose()?;

    let socket = HciSocket::open().map_err(hci_config::Error::Open)?;
    let options = Options {
        verbose: cli.all,
        ..Options::default()
    };
    let mut config = Configurator::new(socket, io::stdout().lock(), options);

    match device {
        None => config.list_devices(),
        Some(device) => table.run(
            &mut config,
            device,
            cli.commands.iter().map(String::as_str),
        ),
    }
}

#[cfg(not(target_os = "linux"))]
fn run(_cli: Cli, _table: &CommandTable) -> hci_config::Result<()> {
    Err(hci_config::Error::Open(io::Error::new(
        io::ErrorKind::Unsupported,
        "HCI sockets are only available on Linux",
    )))
}
