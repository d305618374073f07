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

//! zbus implementation of the [`ColorBus`] transport.
//!
//! Device and profile objects are reached through the `#[proxy]` traits in [`device_proxy`] and
//! [`profile_proxy`], built with property caching enabled so the initial snapshot can be read
//! from the cache without extra round trips.
//!
//! Notifications are read from a single [`MessageStream`] matching every signal the daemon sends
//! from the bound object path. Using one stream for both `PropertiesChanged` and the device's
//! own signals keeps them in the order the daemon sent them.
//!
//! # DBus Service Information
//!
//! - **Service Name**: `org.freedesktop.ColorManager`
//! - **Device Interface**: `org.freedesktop.ColorManager.Device`
//! - **Profile Interface**: `org.freedesktop.ColorManager.Profile`

pub mod device_proxy;
pub mod profile_proxy;

use crate::comm::bus::{ColorBus, DeviceBinding, ProfileBinding, RemoteEvent, RemoteEvents};
use crate::config::{
    BusType, COLORD_DBUS_INTERFACE_DEVICE, COLORD_DBUS_INTERFACE_PROFILE, ClientConfig,
};
use crate::device::property::PropertyValue;
use crate::error::ColordError;
use async_trait::async_trait;
use device_proxy::ColordDeviceProxy;
use futures::StreamExt;
use futures::future;
use log::{debug, trace, warn};
use profile_proxy::ColordProfileProxy;
use std::collections::HashMap;
use zbus::message::Type as MessageType;
use zbus::proxy::CacheProperties;
use zbus::zvariant::{ObjectPath, OwnedValue, Value};
use zbus::{Connection, MatchRule, Message, MessageStream};

static PROPERTIES_INTERFACE: &str = "org.freedesktop.DBus.Properties";

/// A [`ColorBus`] backed by a real D-Bus connection.
#[derive(Debug, Clone)]
pub struct ZbusColorBus {
    connection: Connection,
    service: String,
}

impl ZbusColorBus {
    /// Wrap an existing connection. `service` is the bus name of the colord daemon.
    pub fn new(connection: Connection, service: &str) -> ZbusColorBus {
        ZbusColorBus {
            connection,
            service: service.to_string(),
        }
    }

    /// Open a connection to the bus selected in `config`.
    pub async fn connect(config: &ClientConfig) -> Result<ZbusColorBus, ColordError> {
        let connection = match config.bus {
            BusType::System => Connection::system().await,
            BusType::Session => Connection::session().await,
        }
        .map_err(ColordError::Bus)?;
        debug!("Connected to the {:?} bus for {}", config.bus, config.service);
        Ok(ZbusColorBus::new(connection, &config.service))
    }
}

#[async_trait]
impl ColorBus for ZbusColorBus {
    async fn bind_device(&self, object_path: &str) -> zbus::Result<Box<dyn DeviceBinding>> {
        trace!("Binding device proxy to {object_path}");
        let proxy: ColordDeviceProxy<'static> = ColordDeviceProxy::builder(&self.connection)
            .destination(self.service.clone())?
            .interface(COLORD_DBUS_INTERFACE_DEVICE)?
            .path(object_path.to_string())?
            .cache_properties(CacheProperties::Yes)
            .build()
            .await?;
        Ok(Box::new(ZbusDeviceBinding { proxy }))
    }

    async fn bind_profile(&self, object_path: &str) -> zbus::Result<Box<dyn ProfileBinding>> {
        trace!("Binding profile proxy to {object_path}");
        let proxy: ColordProfileProxy<'static> = ColordProfileProxy::builder(&self.connection)
            .destination(self.service.clone())?
            .interface(COLORD_DBUS_INTERFACE_PROFILE)?
            .path(object_path.to_string())?
            .cache_properties(CacheProperties::Yes)
            .build()
            .await?;
        Ok(Box::new(ZbusProfileBinding { proxy }))
    }
}

struct ZbusDeviceBinding {
    proxy: ColordDeviceProxy<'static>,
}

#[async_trait]
impl DeviceBinding for ZbusDeviceBinding {
    fn cached_property(&self, name: &str) -> Option<PropertyValue> {
        self.proxy
            .inner()
            .cached_property_raw(name)
            .map(|value| PropertyValue::from(&*value))
    }

    async fn set_property(&self, name: &str, value: &str) -> zbus::Result<()> {
        self.proxy.set_property(name, value).await
    }

    async fn add_profile(&self, profile_object_path: &str) -> zbus::Result<()> {
        let object_path = ObjectPath::try_from(profile_object_path)?;
        self.proxy.add_profile(&object_path).await
    }

    async fn make_profile_default(&self, profile_id: &str) -> zbus::Result<()> {
        self.proxy.make_profile_default(profile_id).await
    }

    async fn get_profile_for_qualifier(&self, qualifier: &str) -> zbus::Result<String> {
        let object_path = self.proxy.get_profile_for_qualifier(qualifier).await?;
        Ok(object_path.as_str().to_string())
    }

    async fn subscribe(&self) -> zbus::Result<RemoteEvents> {
        let proxy = self.proxy.inner();
        let rule = MatchRule::builder()
            .msg_type(MessageType::Signal)
            .sender(proxy.destination().as_str())?
            .path(proxy.path().as_str())?
            .build();
        let stream = MessageStream::for_match_rule(rule, proxy.connection(), None).await?;
        debug!("Listening for signals from {}", proxy.path());

        let events = stream.filter_map(move |message| {
            let event = match message {
                Ok(message) => remote_event_from_message(&message, COLORD_DBUS_INTERFACE_DEVICE),
                Err(e) => {
                    warn!("Dropping unreadable message: {e}");
                    None
                }
            };
            future::ready(event)
        });
        Ok(events.boxed())
    }
}

struct ZbusProfileBinding {
    proxy: ColordProfileProxy<'static>,
}

impl ProfileBinding for ZbusProfileBinding {
    fn cached_property(&self, name: &str) -> Option<PropertyValue> {
        self.proxy
            .inner()
            .cached_property_raw(name)
            .map(|value| PropertyValue::from(&*value))
    }
}

/// Turn a signal from the bound object into a [`RemoteEvent`]. Messages for other interfaces
/// are skipped.
fn remote_event_from_message(message: &Message, interface: &str) -> Option<RemoteEvent> {
    let header = message.header();
    let member = header.member()?.to_string();
    let message_interface = header.interface()?.to_string();

    if message_interface == PROPERTIES_INTERFACE && member == "PropertiesChanged" {
        let body: (String, HashMap<String, OwnedValue>, Vec<String>) =
            match message.body().deserialize() {
                Ok(body) => body,
                Err(e) => {
                    warn!("Malformed PropertiesChanged signal: {e}");
                    return None;
                }
            };
        let (changed_interface, changed, invalidated) = body;
        if changed_interface != interface {
            trace!("Ignoring property changes for {changed_interface}");
            return None;
        }
        let mut changed: Vec<(String, PropertyValue)> = changed
            .iter()
            .map(|(name, value)| (name.clone(), PropertyValue::from(&**value)))
            .collect();
        changed.sort_by(|a, b| a.0.cmp(&b.0));
        Some(RemoteEvent::PropertiesChanged {
            changed,
            invalidated,
        })
    } else if message_interface == interface {
        Some(RemoteEvent::Signal(member))
    } else {
        None
    }
}

impl From<&Value<'_>> for PropertyValue {
    fn from(value: &Value<'_>) -> Self {
        match value {
            Value::Str(s) => PropertyValue::Str(s.as_str().to_string()),
            Value::U64(n) => PropertyValue::U64(*n),
            Value::Array(array) => {
                let mut paths = Vec::new();
                for element in array.iter() {
                    match element {
                        Value::ObjectPath(path) => paths.push(path.as_str().to_string()),
                        _ => return PropertyValue::Unsupported(value.value_signature().to_string()),
                    }
                }
                PropertyValue::ObjectPaths(paths)
            }
            other => PropertyValue::Unsupported(other.value_signature().to_string()),
        }
    }
}
