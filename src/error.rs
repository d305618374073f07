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

//! Error type shared by the whole client library.
//!
//! Every message starts with the variant name (e.g. `ColordError::RemoteCall:`) so that callers
//! and log readers can match on the failure class without downcasting.

use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, thiserror::Error)]
pub enum ColordError {
    #[error("ColordError::Bus: Failed to connect to the message bus: {0}")]
    Bus(zbus::Error),
    #[error("ColordError::Connection: Failed to connect to device {object_path}: {e}")]
    Connection {
        object_path: String,
        e: zbus::Error,
    },
    #[error("ColordError::AlreadyBound: Device is already bound to {0}")]
    AlreadyBound(String),
    #[error("ColordError::NotBound: {0} requires a bound device")]
    NotBound(&'static str),
    #[error("ColordError::RemoteCall: {method} failed: {e}")]
    RemoteCall {
        method: &'static str,
        e: zbus::Error,
    },
    #[error("ColordError::ProfileResolution: Failed to set profile object path {object_path}: {e}")]
    ProfileResolution {
        object_path: String,
        e: zbus::Error,
    },
    #[error("ColordError::Timeout: {method} did not complete within {timeout:?}")]
    Timeout {
        method: &'static str,
        timeout: Duration,
    },
    #[error("ColordError::Argument: {0}")]
    Argument(String),
    #[error("ColordError::IORead: An IO error occurred when reading from {file:?}: {e}")]
    IORead { file: PathBuf, e: std::io::Error },
    #[error("ColordError::TomlDe: Failed to parse {file:?}: {e}")]
    TomlDe { file: PathBuf, e: toml::de::Error },
}
