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

//! Set command implementations.
//!
//! Both commands only send the request. colord applies the change and notifies every client,
//! so the output of a later `show` is the place to confirm it.

use colord_client::{ColordError, Device, DeviceKind};

/// Main handler for the set-model command.
pub async fn set_model_handler(device: &Device, model: &str) -> Result<String, ColordError> {
    device.set_model(model).await?;
    Ok(format!("Requested model change to '{model}'"))
}

/// Main handler for the set-kind command.
///
/// # Returns: `Result<String, ColordError>`
/// * `Ok(String)` - Confirmation that the request was sent
/// * `Err(ColordError::Argument)` - `kind` is not a kind colord knows
/// * `Err(ColordError)` - The daemon rejected the request
pub async fn set_kind_handler(device: &Device, kind: &str) -> Result<String, ColordError> {
    let parsed = parse_kind(kind)?;
    device.set_kind(parsed).await?;
    Ok(format!("Requested kind change to '{parsed}'"))
}

fn parse_kind(kind: &str) -> Result<DeviceKind, ColordError> {
    match DeviceKind::from(kind) {
        DeviceKind::Unknown if kind != DeviceKind::Unknown.as_str() => Err(ColordError::Argument(
            format!("'{kind}' is not a device kind. Expected display, scanner, printer or camera."),
        )),
        parsed => Ok(parsed),
    }
}
