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

//! In-memory stand-in for the colord daemon.
//!
//! Devices and profiles are registered up front with their properties. Every remote call a
//! device binding makes is recorded in order, and tests push notifications into bound devices
//! with [`FakeBus::emit`].

use async_trait::async_trait;
use colord_client::{
    ColorBus, DeviceBinding, ProfileBinding, PropertyValue, RemoteEvent, RemoteEvents,
};
use futures::StreamExt;
use futures::channel::mpsc::{self, UnboundedSender};
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

#[derive(Default)]
struct FakeState {
    devices: HashMap<String, HashMap<String, PropertyValue>>,
    profiles: HashMap<String, HashMap<String, PropertyValue>>,
    calls: Vec<String>,
    subscribers: HashMap<String, Vec<UnboundedSender<RemoteEvent>>>,
    qualifier_replies: HashMap<String, String>,
    failing: HashMap<String, String>,
    stalling: HashSet<String>,
}

#[derive(Clone, Default)]
pub struct FakeBus {
    state: Arc<Mutex<FakeState>>,
}

impl FakeBus {
    pub fn new() -> FakeBus {
        FakeBus::default()
    }

    pub fn add_device(&self, object_path: &str, properties: &[(&str, PropertyValue)]) {
        self.lock().devices.insert(object_path.to_string(), to_map(properties));
    }

    /// Register a profile with the given id, a filename derived from it and an RGB qualifier.
    pub fn add_profile(&self, object_path: &str, id: &str) {
        let properties = [
            ("ProfileId", PropertyValue::from(id)),
            (
                "Filename",
                PropertyValue::from(format!("/usr/share/color/icc/{id}.icc").as_str()),
            ),
            ("Qualifier", PropertyValue::from("RGB.Plain.300dpi")),
        ];
        self.lock().profiles.insert(object_path.to_string(), to_map(&properties));
    }

    /// Register a profile that exposes no properties at all.
    pub fn add_bare_profile(&self, object_path: &str) {
        self.lock().profiles.insert(object_path.to_string(), HashMap::new());
    }

    pub fn remove_profile(&self, object_path: &str) {
        self.lock().profiles.remove(object_path);
    }

    /// Make `GetProfileForQualifier(qualifier)` answer with `profile_path`.
    pub fn reply_to_qualifier(&self, qualifier: &str, profile_path: &str) {
        self.lock()
            .qualifier_replies
            .insert(qualifier.to_string(), profile_path.to_string());
    }

    /// Make every later call of `method` fail with `message`. `method` is a D-Bus method name,
    /// `"bind_device"`, `"bind_profile"` or `"subscribe"`.
    pub fn fail_method(&self, method: &str, message: &str) {
        self.lock()
            .failing
            .insert(method.to_string(), message.to_string());
    }

    /// Make every later call of `method` hang forever.
    pub fn stall_method(&self, method: &str) {
        self.lock().stalling.insert(method.to_string());
    }

    /// Deliver `event` to every subscription on `object_path`.
    pub fn emit(&self, object_path: &str, event: RemoteEvent) {
        if let Some(subscribers) = self.lock().subscribers.get_mut(object_path) {
            subscribers.retain(|tx| tx.unbounded_send(event.clone()).is_ok());
        }
    }

    /// End every subscription on `object_path`, as if the daemon went away.
    pub fn disconnect(&self, object_path: &str) {
        self.lock().subscribers.remove(object_path);
    }

    pub fn subscriber_count(&self, object_path: &str) -> usize {
        self.lock()
            .subscribers
            .get(object_path)
            .map_or(0, |subscribers| subscribers.iter().filter(|tx| !tx.is_closed()).count())
    }

    /// Remote method calls in the order they were received, e.g. `SetProperty(Model, LP2480zx)`.
    pub fn calls(&self) -> Vec<String> {
        self.lock().calls.clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, FakeState> {
        self.state.lock().expect("fake bus state poisoned")
    }

    /// Apply the configured stall and failure for `method`, then record `call` if it goes through.
    async fn enter(&self, method: &str, call: Option<String>) -> zbus::Result<()> {
        let stalled = self.lock().stalling.contains(method);
        if stalled {
            std::future::pending::<()>().await;
        }
        let mut state = self.lock();
        if let Some(message) = state.failing.get(method) {
            return Err(zbus::Error::Failure(message.clone()));
        }
        if let Some(call) = call {
            state.calls.push(call);
        }
        Ok(())
    }
}

fn to_map(properties: &[(&str, PropertyValue)]) -> HashMap<String, PropertyValue> {
    properties
        .iter()
        .map(|(name, value)| (name.to_string(), value.clone()))
        .collect()
}

#[async_trait]
impl ColorBus for FakeBus {
    async fn bind_device(&self, object_path: &str) -> zbus::Result<Box<dyn DeviceBinding>> {
        self.enter("bind_device", None).await?;
        if !self.lock().devices.contains_key(object_path) {
            return Err(zbus::Error::Failure(format!(
                "org.freedesktop.DBus.Error.UnknownObject: no device at {object_path}"
            )));
        }
        Ok(Box::new(FakeDeviceBinding {
            bus: self.clone(),
            object_path: object_path.to_string(),
        }))
    }

    async fn bind_profile(&self, object_path: &str) -> zbus::Result<Box<dyn ProfileBinding>> {
        self.enter("bind_profile", None).await?;
        match self.lock().profiles.get(object_path) {
            Some(properties) => Ok(Box::new(FakeProfileBinding {
                properties: properties.clone(),
            })),
            None => Err(zbus::Error::Failure(format!(
                "org.freedesktop.DBus.Error.UnknownObject: no profile at {object_path}"
            ))),
        }
    }
}

struct FakeDeviceBinding {
    bus: FakeBus,
    object_path: String,
}

#[async_trait]
impl DeviceBinding for FakeDeviceBinding {
    fn cached_property(&self, name: &str) -> Option<PropertyValue> {
        self.bus
            .lock()
            .devices
            .get(&self.object_path)
            .and_then(|properties| properties.get(name).cloned())
    }

    async fn set_property(&self, name: &str, value: &str) -> zbus::Result<()> {
        self.bus
            .enter("SetProperty", Some(format!("SetProperty({name}, {value})")))
            .await
    }

    async fn add_profile(&self, profile_object_path: &str) -> zbus::Result<()> {
        self.bus
            .enter("AddProfile", Some(format!("AddProfile({profile_object_path})")))
            .await
    }

    async fn make_profile_default(&self, profile_id: &str) -> zbus::Result<()> {
        self.bus
            .enter("MakeProfileDefault", Some(format!("MakeProfileDefault({profile_id})")))
            .await
    }

    async fn get_profile_for_qualifier(&self, qualifier: &str) -> zbus::Result<String> {
        self.bus
            .enter(
                "GetProfileForQualifier",
                Some(format!("GetProfileForQualifier({qualifier})")),
            )
            .await?;
        self.bus
            .lock()
            .qualifier_replies
            .get(qualifier)
            .cloned()
            .ok_or_else(|| {
                zbus::Error::Failure(format!(
                    "org.freedesktop.ColorManager.Device.NothingMatched: nothing matched {qualifier}"
                ))
            })
    }

    async fn subscribe(&self) -> zbus::Result<RemoteEvents> {
        self.bus.enter("subscribe", None).await?;
        let (tx, rx) = mpsc::unbounded();
        self.bus
            .lock()
            .subscribers
            .entry(self.object_path.clone())
            .or_default()
            .push(tx);
        Ok(rx.boxed())
    }
}

struct FakeProfileBinding {
    properties: HashMap<String, PropertyValue>,
}

impl ProfileBinding for FakeProfileBinding {
    fn cached_property(&self, name: &str) -> Option<PropertyValue> {
        self.properties.get(name).cloned()
    }
}
