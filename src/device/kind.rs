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

use std::fmt;

/// The category of a color-managed device, as reported in the `Kind` property.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeviceKind {
    /// Sentinel for anything the daemon reports that we do not recognise.
    #[default]
    Unknown,
    Display,
    Scanner,
    Printer,
    Camera,
}

impl DeviceKind {
    /// The string colord uses on the bus for this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            DeviceKind::Unknown => "unknown",
            DeviceKind::Display => "display",
            DeviceKind::Scanner => "scanner",
            DeviceKind::Printer => "printer",
            DeviceKind::Camera => "camera",
        }
    }
}

/// Never fails: unrecognised strings map to [`DeviceKind::Unknown`].
impl From<&str> for DeviceKind {
    fn from(value: &str) -> Self {
        match value {
            "display" => DeviceKind::Display,
            "scanner" => DeviceKind::Scanner,
            "printer" => DeviceKind::Printer,
            "camera" => DeviceKind::Camera,
            _ => DeviceKind::Unknown,
        }
    }
}

impl fmt::Display for DeviceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
