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

//! Transport abstraction between the device proxy and the message bus.
//!
//! [`Device`](crate::device::Device) only ever talks to these traits. The production
//! implementation is [`ZbusColorBus`](crate::comm::dbus::ZbusColorBus); tests plug in an
//! in-memory bus instead.
//!
//! Errors are plain [`zbus::Error`]s so that transport failures keep the daemon's error name and
//! message all the way up to [`ColordError`](crate::error::ColordError).

use crate::device::property::PropertyValue;
use async_trait::async_trait;
use futures::stream::BoxStream;

/// Something received from a bound remote object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoteEvent {
    /// A signal on the object's own interface, by member name.
    Signal(String),
    /// `org.freedesktop.DBus.Properties.PropertiesChanged` for the object's interface.
    PropertiesChanged {
        changed: Vec<(String, PropertyValue)>,
        invalidated: Vec<String>,
    },
}

/// Ordered stream of everything a bound object emits. Ends when the binding goes away.
pub type RemoteEvents = BoxStream<'static, RemoteEvent>;

/// Entry point of a transport: turns object paths into bindings.
#[async_trait]
pub trait ColorBus: Send + Sync {
    /// Bind to the device object at `object_path` and populate its property cache.
    async fn bind_device(&self, object_path: &str) -> zbus::Result<Box<dyn DeviceBinding>>;

    /// Bind to the profile object at `object_path` and populate its property cache.
    async fn bind_profile(&self, object_path: &str) -> zbus::Result<Box<dyn ProfileBinding>>;
}

/// A live binding to one `org.freedesktop.ColorManager.Device` object.
#[async_trait]
pub trait DeviceBinding: Send + Sync {
    /// Read a property from the local cache of the binding. `None` if the object does not
    /// expose it.
    fn cached_property(&self, name: &str) -> Option<PropertyValue>;

    async fn set_property(&self, name: &str, value: &str) -> zbus::Result<()>;

    async fn add_profile(&self, profile_object_path: &str) -> zbus::Result<()>;

    async fn make_profile_default(&self, profile_id: &str) -> zbus::Result<()>;

    /// Returns the object path of the profile the daemon picked.
    async fn get_profile_for_qualifier(&self, qualifier: &str) -> zbus::Result<String>;

    /// Start receiving signals and property changes of this object, in arrival order.
    async fn subscribe(&self) -> zbus::Result<RemoteEvents>;
}

/// A binding to one `org.freedesktop.ColorManager.Profile` object.
pub trait ProfileBinding: Send + Sync {
    fn cached_property(&self, name: &str) -> Option<PropertyValue>;
}
