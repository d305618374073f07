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

//! Watch command implementation.

use colord_client::{ColordError, Device, DeviceEvent};
use log::info;

fn event_line(device: &Device, event: &DeviceEvent) -> String {
    match event {
        DeviceEvent::Changed => "changed".to_string(),
        DeviceEvent::PropertiesUpdated(properties) => {
            let names: Vec<&str> = properties.iter().map(|property| property.name()).collect();
            let snapshot = device.snapshot();
            format!(
                "updated {} (model: {}, kind: {}, profiles: {})",
                names.join(", "),
                snapshot.model.as_deref().unwrap_or("(unset)"),
                snapshot.kind,
                snapshot.profiles.len()
            )
        }
        DeviceEvent::ProfilesUpdateFailed {
            object_path,
            message,
        } => format!("profile update for {object_path} dropped: {message}"),
        DeviceEvent::Disconnected => "disconnected".to_string(),
    }
}

/// Main handler for the watch command. Prints one line per event until the notification stream
/// ends or Ctrl-C is pressed.
pub async fn watch_handler(device: &Device) -> Result<String, ColordError> {
    let mut events = device.subscribe();
    info!("Watching {}", device.object_path().unwrap_or_default());
    loop {
        tokio::select! {
            event = events.recv() => match event {
                Some(DeviceEvent::Disconnected) | None => {
                    return Ok("Device disconnected".to_string());
                }
                Some(event) => println!("{}", event_line(device, &event)),
            },
            _ = tokio::signal::ctrl_c() => return Ok("Stopped watching".to_string()),
        }
    }
}
