// This file is part of colord-client, a client library for devices managed by the colord daemon.
//
// Copyright 2025 Canonical Ltd.
//
// SPDX-License-Identifier: GPL-3.0-only
//
// colord-client is free software: you can redistribute it and/or modify it under the terms of the GNU General Public License version 3, as published by the Free Software Foundation.
//
// colord-client is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranties of MERCHANTABILITY, SATISFACTORY QUALITY, or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License along with this program.  If not, see http://www.gnu.org/licenses/.

//! `cd-device`: inspect and configure one colord device from the command line.
//!
//! # Common Concepts
//!
//! ## Device paths
//!
//! Every command operates on the device given with `--device`, using its full object path as
//! exported by colord, e.g. `/org/freedesktop/ColorManager/devices/xrandr_hp_lp2480zx`.
//! Profile arguments are object paths as well.
//!
//! ## Error Handling
//!
//! Errors are printed as the library's `ColordError` messages, which start with the failure
//! class (e.g. `ColordError::RemoteCall:`), and the process exits with a non-zero status.
//!
//! ## Logging
//!
//! `RUST_LOG` controls the log level (`trace`, `debug`, `info`, `warn`, `error` or `off`) and
//! defaults to `info`.

mod profile;
mod set;
mod show;
mod watch;

use clap::{Parser, Subcommand};
use colord_client::{BusType, ClientConfig, ColordError, Device, ZbusColorBus};
use log::debug;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(name = "cd-device")]
#[command(bin_name = "cd-device")]
#[command(about = "Inspect and configure a device managed by colord")]
struct Cli {
    #[arg(
        long = "device",
        value_name = "OBJECT_PATH",
        help = "object path of the colord device, e.g. /org/freedesktop/ColorManager/devices/xrandr_hp_lp2480zx"
    )]
    device: String,
    #[arg(long, help = "connect to the session bus instead of the system bus")]
    session: bool,
    #[arg(
        long,
        value_name = "MS",
        help = "give up on any daemon call after this many milliseconds (0 waits forever)"
    )]
    timeout: Option<u64>,
    #[arg(long, value_name = "PATH", help = "client config file to use")]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the cached state of the device and its profiles
    Show,
    /// Ask colord to change the device model
    SetModel { model: String },
    /// Ask colord to change the device kind (display, scanner, printer, camera)
    SetKind { kind: String },
    /// Attach a profile to the device
    AddProfile {
        #[arg(value_name = "PROFILE_PATH")]
        profile_path: String,
    },
    /// Make an attached profile the device default
    MakeDefault {
        #[arg(value_name = "PROFILE_PATH")]
        profile_path: String,
    },
    /// Ask colord for the profile best matching a qualifier such as "RGB.*.*"
    BestProfile { qualifier: String },
    /// Print device events until the daemon goes away or Ctrl-C is pressed
    Watch,
}

/// Build the effective client config: the config file (or the default one), then the command
/// line flags on top.
fn client_config(cli: &Cli) -> ClientConfig {
    let mut config = ClientConfig::load(cli.config.as_deref());
    if cli.session {
        config.bus = BusType::Session;
    }
    if let Some(ms) = cli.timeout {
        config.call_timeout = (ms > 0).then(|| Duration::from_millis(ms));
    }
    debug!("using client config {config:?}");
    config
}

/// Connect to the configured bus and bind the device named on the command line.
async fn bound_device(cli: &Cli) -> Result<Device, ColordError> {
    let config = client_config(cli);
    let bus = ZbusColorBus::connect(&config).await?;
    let mut device = Device::new(Arc::new(bus), &config);
    device.bind(&cli.device).await?;
    Ok(device)
}

async fn run(cli: &Cli) -> Result<String, ColordError> {
    let device = bound_device(cli).await?;
    match &cli.command {
        Commands::Show => Ok(show::show_handler(&device)),
        Commands::SetModel { model } => set::set_model_handler(&device, model).await,
        Commands::SetKind { kind } => set::set_kind_handler(&device, kind).await,
        Commands::AddProfile { profile_path } => {
            profile::add_profile_handler(&device, profile_path).await
        }
        Commands::MakeDefault { profile_path } => {
            profile::make_default_handler(&device, profile_path).await
        }
        Commands::BestProfile { qualifier } => {
            profile::best_profile_handler(&device, qualifier).await
        }
        Commands::Watch => watch::watch_handler(&device).await,
    }
}

/// The text to print for a finished command and the process exit status.
fn outcome(result: Result<String, ColordError>) -> (String, u8) {
    match result {
        Ok(message) => (message, 0),
        Err(e) => (e.to_string(), 1),
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();
    debug!("parsed cli command with {cli:?}");
    let (message, status) = outcome(run(&cli).await);
    if status == 0 {
        println!("{message}");
    } else {
        eprintln!("{message}");
    }
    ExitCode::from(status)
}
