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

//! Remote attribute names and values.
//!
//! Property names arriving from the bus are mapped onto the closed [`DeviceProperty`] set once,
//! at the edge, so the rest of the crate matches exhaustively instead of comparing strings.

use std::fmt;

/// The device attributes this client understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeviceProperty {
    DeviceId,
    Kind,
    Model,
    Created,
    Profiles,
}

impl DeviceProperty {
    /// The property name on the bus.
    pub fn name(&self) -> &'static str {
        match self {
            DeviceProperty::DeviceId => "DeviceId",
            DeviceProperty::Kind => "Kind",
            DeviceProperty::Model => "Model",
            DeviceProperty::Created => "Created",
            DeviceProperty::Profiles => "Profiles",
        }
    }

    /// Map a bus property name onto a known attribute. `None` means the name is not one we
    /// handle; callers decide whether that is worth a warning.
    pub fn from_name(name: &str) -> Option<DeviceProperty> {
        match name {
            "DeviceId" => Some(DeviceProperty::DeviceId),
            "Kind" => Some(DeviceProperty::Kind),
            "Model" => Some(DeviceProperty::Model),
            "Created" => Some(DeviceProperty::Created),
            "Profiles" => Some(DeviceProperty::Profiles),
            _ => None,
        }
    }
}

impl fmt::Display for DeviceProperty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A property value as delivered by the transport.
///
/// colord only exposes strings, `u64` timestamps and object path arrays on the objects this
/// crate talks to. Anything else is kept as [`PropertyValue::Unsupported`] with its D-Bus
/// signature so it can be reported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PropertyValue {
    Str(String),
    U64(u64),
    ObjectPaths(Vec<String>),
    Unsupported(String),
}

impl PropertyValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            PropertyValue::Str(s) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn as_u64(&self) -> Option<u64> {
        match self {
            PropertyValue::U64(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_object_paths(&self) -> Option<&[String]> {
        match self {
            PropertyValue::ObjectPaths(paths) => Some(paths.as_slice()),
            _ => None,
        }
    }
}

impl From<&str> for PropertyValue {
    fn from(value: &str) -> Self {
        PropertyValue::Str(value.to_string())
    }
}

impl From<u64> for PropertyValue {
    fn from(value: u64) -> Self {
        PropertyValue::U64(value)
    }
}
