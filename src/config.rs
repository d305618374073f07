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

//! Bus names and client configuration.
//!
//! The well-known names are fixed by colord. Everything else can be overridden through a TOML
//! file at [`CONFIG_FILE_PATH`]:
//!
//! ```toml
//! [client]
//! bus = "session"
//! service = "org.freedesktop.ColorManager"
//! call_timeout_ms = 5000
//! ```
//!
//! A `call_timeout_ms` of `0`, or no value at all, waits indefinitely for the daemon.

use crate::error::ColordError;
use log::{trace, warn};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// The well-known name the colord daemon owns on the bus.
pub static COLORD_DBUS_SERVICE: &str = "org.freedesktop.ColorManager";

/// Interface implemented by every colord device object.
pub static COLORD_DBUS_INTERFACE_DEVICE: &str = "org.freedesktop.ColorManager.Device";

/// Interface implemented by every colord profile object.
pub static COLORD_DBUS_INTERFACE_PROFILE: &str = "org.freedesktop.ColorManager.Profile";

/// Default location of the optional client config file.
pub static CONFIG_FILE_PATH: &str = "/etc/colord-client/config.toml";

/// Which message bus to connect to. colord runs on the system bus; the session bus is useful
/// for running against a private test daemon.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BusType {
    #[default]
    System,
    Session,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub bus: BusType,
    pub service: String,
    /// Upper bound for every remote call and bind. `None` waits indefinitely.
    pub call_timeout: Option<Duration>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        ClientConfig {
            bus: BusType::System,
            service: COLORD_DBUS_SERVICE.to_string(),
            call_timeout: None,
        }
    }
}

/// This is the top level struct which holds all sections
#[derive(Debug, Deserialize)]
struct TomlConfig {
    client: Option<ClientToml>,
}

/// This is the "client" section
#[derive(Debug, Deserialize)]
struct ClientToml {
    bus: Option<BusType>,
    service: Option<String>,
    call_timeout_ms: Option<u64>,
}

impl From<ClientToml> for ClientConfig {
    fn from(value: ClientToml) -> Self {
        trace!("User provided config: {value:?}");
        let defaults = ClientConfig::default();
        ClientConfig {
            bus: value.bus.unwrap_or(defaults.bus),
            service: value.service.unwrap_or_else(|| {
                trace!("No service provided. Using {COLORD_DBUS_SERVICE}.");
                defaults.service
            }),
            call_timeout: match value.call_timeout_ms {
                None | Some(0) => None,
                Some(ms) => Some(Duration::from_millis(ms)),
            },
        }
    }
}

impl ClientConfig {
    /// Parse a config from TOML text. `file` is only used for error reporting.
    pub fn from_toml_str(toml_string: &str, file: &Path) -> Result<ClientConfig, ColordError> {
        let config: TomlConfig = toml::from_str(toml_string).map_err(|e| ColordError::TomlDe {
            file: file.to_path_buf(),
            e,
        })?;
        match config.client {
            Some(client_toml) => Ok(client_toml.into()),
            None => Err(ColordError::Argument(format!(
                "config file {file:?} did not contain a `[client]` section."
            ))),
        }
    }

    /// Read and parse the config file at `config_path`.
    pub fn from_file(config_path: &Path) -> Result<ClientConfig, ColordError> {
        let toml_string =
            std::fs::read_to_string(config_path).map_err(|e| ColordError::IORead {
                file: config_path.to_path_buf(),
                e,
            })?;
        ClientConfig::from_toml_str(&toml_string, config_path)
    }

    /// Load the config from `config_path` (or [`CONFIG_FILE_PATH`]), falling back to the defaults
    /// when the file is absent or unusable.
    pub fn load(config_path: Option<&Path>) -> ClientConfig {
        let config_path = config_path
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from(CONFIG_FILE_PATH));
        if !config_path.is_file() {
            trace!("No config file at {config_path:?}. Using defaults.");
            return ClientConfig::default();
        }
        match ClientConfig::from_file(&config_path) {
            Ok(config) => {
                trace!("Successfully loaded config: {config:?}");
                config
            }
            Err(e) => {
                warn!("Using default client config because failed to load config: {e}");
                ClientConfig::default()
            }
        }
    }
}
