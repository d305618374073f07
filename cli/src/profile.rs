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

//! Profile command implementations: add-profile, make-default and best-profile.
//!
//! Profile arguments are object paths. They are resolved against the daemon first, so a typo
//! fails with `ColordError::ProfileResolution` before the device is asked to do anything.

use colord_client::{ColordError, Device};

/// Main handler for the add-profile command.
pub async fn add_profile_handler(
    device: &Device,
    profile_path: &str,
) -> Result<String, ColordError> {
    let profile = device.resolve_profile(profile_path).await?;
    device.add_profile(&profile).await?;
    Ok(format!("Requested adding profile {profile}"))
}

/// Main handler for the make-default command.
pub async fn make_default_handler(
    device: &Device,
    profile_path: &str,
) -> Result<String, ColordError> {
    let profile = device.resolve_profile(profile_path).await?;
    device.make_profile_default(&profile).await?;
    Ok(format!("Requested {profile} as default profile"))
}

/// Main handler for the best-profile command.
///
/// # Examples
///
/// ```bash
/// cd-device --device /org/freedesktop/ColorManager/devices/cups_hp_laserjet best-profile "*.CMYK.*"
/// ```
pub async fn best_profile_handler(
    device: &Device,
    qualifier: &str,
) -> Result<String, ColordError> {
    let profile = device.get_best_profile_for_qualifier(qualifier).await?;
    Ok(format!(
        "{profile}\n  filename:  {}\n  qualifier: {}",
        profile.filename().unwrap_or("(unset)"),
        profile.qualifier().unwrap_or("(unset)")
    ))
}
