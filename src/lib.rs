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

//! Client library for devices managed by the colord color management daemon.
//!
//! [`Device`] mirrors one `org.freedesktop.ColorManager.Device` object: it caches the device's
//! identity, model, kind, creation time and attached profiles, keeps that cache current from the
//! daemon's change notifications, and forwards mutations to the daemon. Profiles are referenced
//! through [`Profile`] values resolved from their object paths.
//!
//! The transport sits behind the [`ColorBus`] trait. [`ZbusColorBus`] talks to a real daemon
//! over D-Bus; any other implementation can be used to drive a [`Device`] without one.

pub mod comm;
pub mod config;
pub mod device;
pub mod error;
pub mod profile;
mod timeout;

pub use comm::bus::{ColorBus, DeviceBinding, ProfileBinding, RemoteEvent, RemoteEvents};
pub use comm::dbus::ZbusColorBus;
pub use config::{BusType, ClientConfig};
pub use device::events::{DeviceEvent, DeviceEvents};
pub use device::kind::DeviceKind;
pub use device::property::{DeviceProperty, PropertyValue};
pub use device::{Device, DeviceSnapshot};
pub use error::ColordError;
pub use profile::Profile;
