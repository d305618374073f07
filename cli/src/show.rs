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

//! Show command implementation.
//!
//! Renders the device snapshot taken right after binding. Nothing here calls the daemon; the
//! values are whatever colord reported when the device was bound.

use colord_client::{Device, Profile};

fn or_unset(value: Option<&str>) -> &str {
    value.unwrap_or("(unset)")
}

fn profile_line(index: usize, profile: &Profile) -> String {
    format!(
        "  {index}: {} | {} | {}\n",
        profile.object_path(),
        or_unset(profile.id()),
        or_unset(profile.filename())
    )
}

/// Main handler for the show command.
///
/// # Returns: `String`
/// The description block followed by the scalar properties and one line per profile.
///
/// # Examples
///
/// ```bash
/// cd-device --device /org/freedesktop/ColorManager/devices/xrandr_hp_lp2480zx show
/// ```
pub fn show_handler(device: &Device) -> String {
    let snapshot = device.snapshot();
    let mut message = String::from("---- DEVICE ----\n");
    message.push_str(&snapshot.describe());
    message.push_str(&format!(
        "  device-id:            {}\n  model:                {}\n  kind:                 {}\n",
        or_unset(snapshot.id.as_deref()),
        or_unset(snapshot.model.as_deref()),
        snapshot.kind
    ));
    message.push_str("---- PROFILES ----\n");
    if snapshot.profiles.is_empty() {
        message.push_str("  (none)\n");
    }
    for (index, profile) in snapshot.profiles.iter().enumerate() {
        message.push_str(&profile_line(index, profile));
    }
    message
}
