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

//! Client-side proxy for a colord device.
//!
//! A [`Device`] starts out unbound. [`Device::bind`] connects it to one remote device object,
//! reads the initial snapshot from the binding's property cache and spawns a listener task that
//! keeps the snapshot current. The listener is the only writer after bind; accessors read a copy
//! under a short lock.
//!
//! Remote mutations ([`Device::set_model`], [`Device::add_profile`], ...) never touch the local
//! snapshot. Their effect shows up once the daemon reports the change, as a
//! [`DeviceEvent::PropertiesUpdated`] on every [`DeviceEvents`] subscription.
//!
//! # Example
//!
//! ```rust,no_run
//! # use colord_client::{ClientConfig, Device, ZbusColorBus};
//! # use std::sync::Arc;
//! # async fn example() -> Result<(), colord_client::ColordError> {
//! let config = ClientConfig::load(None);
//! let bus = ZbusColorBus::connect(&config).await?;
//! let mut device = Device::new(Arc::new(bus), &config);
//! device.bind("/org/freedesktop/ColorManager/devices/xrandr_hp_lp2480zx").await?;
//! println!("{}", device.describe());
//! # Ok(())
//! # }
//! ```

pub mod events;
pub mod kind;
pub mod property;

use crate::comm::bus::{ColorBus, DeviceBinding, RemoteEvent, RemoteEvents};
use crate::config::ClientConfig;
use crate::error::ColordError;
use crate::profile::{Profile, resolve_profiles};
use crate::timeout::with_timeout;
use chrono::{Local, TimeZone};
use events::{DeviceEvent, DeviceEvents, Observers};
use futures::StreamExt;
use kind::DeviceKind;
use log::{debug, trace, warn};
use property::{DeviceProperty, PropertyValue};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::task::JoinHandle;

/// The locally cached state of a remote device.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeviceSnapshot {
    pub object_path: Option<String>,
    pub id: Option<String>,
    pub model: Option<String>,
    pub kind: DeviceKind,
    /// Seconds since the epoch, `0` if the daemon did not report it.
    pub created: u64,
    pub profiles: Vec<Profile>,
}

impl DeviceSnapshot {
    /// Two-line human readable summary: object path and creation time in local time.
    pub fn describe(&self) -> String {
        format!(
            "  object-path:          {}\n  created:              {}\n",
            self.object_path.as_deref().unwrap_or_default(),
            format_created(self.created)
        )
    }
}

fn format_created(created: u64) -> String {
    i64::try_from(created)
        .ok()
        .and_then(|secs| Local.timestamp_opt(secs, 0).single())
        .map(|time| time.format("%c").to_string())
        .unwrap_or_default()
}

/// Proxy for one `org.freedesktop.ColorManager.Device` object.
pub struct Device {
    bus: Arc<dyn ColorBus>,
    call_timeout: Option<Duration>,
    binding: Option<Arc<dyn DeviceBinding>>,
    snapshot: Arc<Mutex<DeviceSnapshot>>,
    observers: Observers,
    listener: Option<JoinHandle<()>>,
}

impl Device {
    /// Create an unbound device that will use `bus` for every remote operation.
    pub fn new(bus: Arc<dyn ColorBus>, config: &ClientConfig) -> Device {
        Device {
            bus,
            call_timeout: config.call_timeout,
            binding: None,
            snapshot: Arc::new(Mutex::new(DeviceSnapshot::default())),
            observers: Observers::default(),
            listener: None,
        }
    }

    /// Bind to the device at `object_path` and load its initial state.
    ///
    /// The object path and binding are stored once the bus has bound and subscribed. If a
    /// profile path then fails to resolve, the device stays bound with its scalar properties
    /// read, an empty profile list and no listener, and the error is returned.
    ///
    /// # Returns: `Result<(), ColordError>`
    /// * `Ok(())` - Bound, snapshot loaded, listener running
    /// * `Err(ColordError::AlreadyBound)` - This device was bound before; nothing changed
    /// * `Err(ColordError::Connection)` - The bus could not bind `object_path`
    /// * `Err(ColordError::ProfileResolution)` - One of the device's profiles could not be bound
    /// * `Err(ColordError::Timeout)` - The configured call timeout elapsed
    pub async fn bind(&mut self, object_path: &str) -> Result<(), ColordError> {
        if self.binding.is_some() {
            let bound_path = self.lock_snapshot().object_path.clone().unwrap_or_default();
            return Err(ColordError::AlreadyBound(bound_path));
        }

        let binding: Arc<dyn DeviceBinding> =
            with_timeout(self.call_timeout, "bind device", self.bus.bind_device(object_path))
                .await?
                .map_err(|e| ColordError::Connection {
                    object_path: object_path.to_string(),
                    e,
                })?
                .into();

        // Subscribe before reading the cache so nothing emitted in between is lost. Events
        // queue up in the stream until the listener starts.
        let events = with_timeout(self.call_timeout, "subscribe", binding.subscribe())
            .await?
            .map_err(|e| ColordError::Connection {
                object_path: object_path.to_string(),
                e,
            })?;
        self.binding = Some(binding.clone());

        let profile_paths = {
            let mut snapshot = self.lock_snapshot();
            snapshot.object_path = Some(object_path.to_string());
            read_initial_properties(binding.as_ref(), &mut snapshot);
            binding
                .cached_property(DeviceProperty::Profiles.name())
                .and_then(|value| value.as_object_paths().map(<[String]>::to_vec))
                .unwrap_or_default()
        };

        let profiles =
            resolve_profiles(self.bus.as_ref(), &profile_paths, self.call_timeout).await?;
        let id = {
            let mut snapshot = self.lock_snapshot();
            snapshot.profiles = profiles;
            snapshot.id.clone().unwrap_or_default()
        };

        let listener = Listener {
            bus: self.bus.clone(),
            call_timeout: self.call_timeout,
            snapshot: self.snapshot.clone(),
            observers: self.observers.clone(),
        };
        self.listener = Some(tokio::spawn(listener.run(events)));

        debug!("Connected to device {id}");
        Ok(())
    }

    pub fn is_bound(&self) -> bool {
        self.binding.is_some()
    }

    /// Register an observer. Events are delivered in the order the daemon sent them.
    pub fn subscribe(&self) -> DeviceEvents {
        self.observers.subscribe()
    }

    pub fn object_path(&self) -> Option<String> {
        self.lock_snapshot().object_path.clone()
    }

    pub fn id(&self) -> Option<String> {
        self.lock_snapshot().id.clone()
    }

    pub fn model(&self) -> Option<String> {
        self.lock_snapshot().model.clone()
    }

    pub fn kind(&self) -> DeviceKind {
        self.lock_snapshot().kind
    }

    pub fn created(&self) -> u64 {
        self.lock_snapshot().created
    }

    pub fn profiles(&self) -> Vec<Profile> {
        self.lock_snapshot().profiles.clone()
    }

    /// A consistent copy of every cached field.
    pub fn snapshot(&self) -> DeviceSnapshot {
        self.lock_snapshot().clone()
    }

    pub fn describe(&self) -> String {
        self.lock_snapshot().describe()
    }

    /// Ask the daemon to change the device model. The snapshot is updated only when the daemon
    /// reports the change.
    pub async fn set_model(&self, value: &str) -> Result<(), ColordError> {
        self.set_property(DeviceProperty::Model, value).await
    }

    /// Ask the daemon to change the device kind. The snapshot is updated only when the daemon
    /// reports the change.
    pub async fn set_kind(&self, kind: DeviceKind) -> Result<(), ColordError> {
        self.set_property(DeviceProperty::Kind, kind.as_str()).await
    }

    async fn set_property(&self, property: DeviceProperty, value: &str) -> Result<(), ColordError> {
        let binding = self.binding("SetProperty")?;
        trace!("SetProperty {property}={value}");
        with_timeout(
            self.call_timeout,
            "SetProperty",
            binding.set_property(property.name(), value),
        )
        .await?
        .map_err(|e| ColordError::RemoteCall {
            method: "SetProperty",
            e,
        })
    }

    /// Attach `profile` to the device.
    pub async fn add_profile(&self, profile: &Profile) -> Result<(), ColordError> {
        let binding = self.binding("AddProfile")?;
        trace!("AddProfile {}", profile.object_path());
        with_timeout(
            self.call_timeout,
            "AddProfile",
            binding.add_profile(profile.object_path()),
        )
        .await?
        .map_err(|e| ColordError::RemoteCall {
            method: "AddProfile",
            e,
        })
    }

    /// Make an already added `profile` the device default.
    pub async fn make_profile_default(&self, profile: &Profile) -> Result<(), ColordError> {
        let binding = self.binding("MakeProfileDefault")?;
        let Some(profile_id) = profile.id() else {
            return Err(ColordError::Argument(format!(
                "Profile {} has no ProfileId and cannot be made default.",
                profile.object_path()
            )));
        };
        trace!("MakeProfileDefault {profile_id}");
        with_timeout(
            self.call_timeout,
            "MakeProfileDefault",
            binding.make_profile_default(profile_id),
        )
        .await?
        .map_err(|e| ColordError::RemoteCall {
            method: "MakeProfileDefault",
            e,
        })
    }

    /// Ask the daemon for the best profile matching `qualifier` (wildcards allowed, e.g.
    /// `"RGB.*.*"`) and resolve it into a new [`Profile`], independent of the cached list.
    ///
    /// # Returns: `Result<Profile, ColordError>`
    /// * `Ok(Profile)` - The daemon's choice, freshly resolved
    /// * `Err(ColordError::Argument)` - `qualifier` is empty
    /// * `Err(ColordError::RemoteCall)` - The daemon rejected the query
    /// * `Err(ColordError::ProfileResolution)` - The returned path could not be bound
    pub async fn get_best_profile_for_qualifier(
        &self,
        qualifier: &str,
    ) -> Result<Profile, ColordError> {
        let binding = self.binding("GetProfileForQualifier")?;
        if qualifier.is_empty() {
            return Err(ColordError::Argument(
                "A qualifier is required. Provided qualifier is empty.".into(),
            ));
        }
        trace!("GetProfileForQualifier {qualifier}");
        let object_path = with_timeout(
            self.call_timeout,
            "GetProfileForQualifier",
            binding.get_profile_for_qualifier(qualifier),
        )
        .await?
        .map_err(|e| ColordError::RemoteCall {
            method: "GetProfileForQualifier",
            e,
        })?;
        Profile::resolve(self.bus.as_ref(), &object_path, self.call_timeout).await
    }

    /// Resolve any profile path into a [`Profile`]. Does not need a bound device.
    pub async fn resolve_profile(&self, object_path: &str) -> Result<Profile, ColordError> {
        Profile::resolve(self.bus.as_ref(), object_path, self.call_timeout).await
    }

    fn binding(&self, method: &'static str) -> Result<&Arc<dyn DeviceBinding>, ColordError> {
        self.binding.as_ref().ok_or(ColordError::NotBound(method))
    }

    fn lock_snapshot(&self) -> MutexGuard<'_, DeviceSnapshot> {
        self.snapshot.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Drop for Device {
    fn drop(&mut self) {
        if let Some(listener) = self.listener.take() {
            listener.abort();
        }
    }
}

fn read_initial_properties(binding: &dyn DeviceBinding, snapshot: &mut DeviceSnapshot) {
    let cached = |property: DeviceProperty| binding.cached_property(property.name());

    if let Some(id) = cached(DeviceProperty::DeviceId) {
        snapshot.id = id.as_str().map(str::to_string);
    }
    if let Some(kind) = cached(DeviceProperty::Kind) {
        snapshot.kind = kind.as_str().map(DeviceKind::from).unwrap_or_default();
    }
    if let Some(model) = cached(DeviceProperty::Model) {
        snapshot.model = model.as_str().map(str::to_string);
    }
    if let Some(created) = cached(DeviceProperty::Created) {
        snapshot.created = created.as_u64().unwrap_or_default();
    }
}

/// Applies notifications from one bound device to its snapshot.
struct Listener {
    bus: Arc<dyn ColorBus>,
    call_timeout: Option<Duration>,
    snapshot: Arc<Mutex<DeviceSnapshot>>,
    observers: Observers,
}

impl Listener {
    async fn run(self, mut events: RemoteEvents) {
        while let Some(event) = events.next().await {
            match event {
                RemoteEvent::Signal(name) => self.handle_signal(&name),
                RemoteEvent::PropertiesChanged {
                    changed,
                    invalidated,
                } => {
                    if !invalidated.is_empty() {
                        debug!("Ignoring invalidated properties {invalidated:?}");
                    }
                    self.apply_changes(changed).await;
                }
            }
        }
        debug!("Notification stream ended");
        self.observers.emit(DeviceEvent::Disconnected);
    }

    fn handle_signal(&self, name: &str) {
        if name == "Changed" {
            debug!("emit Changed on {}", self.object_path());
            self.observers.emit(DeviceEvent::Changed);
        } else {
            warn!("unhandled signal '{name}'");
        }
    }

    async fn apply_changes(&self, changed: Vec<(String, PropertyValue)>) {
        let mut updated = Vec::new();
        for (name, value) in changed {
            let Some(property) = DeviceProperty::from_name(&name) else {
                warn!("{name} property unhandled");
                continue;
            };
            match property {
                DeviceProperty::Model => match value.as_str() {
                    Some(model) => {
                        self.lock_snapshot().model = Some(model.to_string());
                        updated.push(property);
                    }
                    None => warn!("Ignoring Model update of unexpected type: {value:?}"),
                },
                DeviceProperty::Kind => match value.as_str() {
                    Some(kind) => {
                        self.lock_snapshot().kind = DeviceKind::from(kind);
                        updated.push(property);
                    }
                    None => warn!("Ignoring Kind update of unexpected type: {value:?}"),
                },
                DeviceProperty::Profiles => match value.as_object_paths() {
                    Some(paths) => {
                        if self.replace_profiles(paths).await {
                            updated.push(property);
                        }
                    }
                    None => warn!("Ignoring Profiles update of unexpected type: {value:?}"),
                },
                DeviceProperty::DeviceId | DeviceProperty::Created => {
                    warn!("{property} is fixed at bind time, ignoring update");
                }
            }
        }
        if !updated.is_empty() {
            self.observers.emit(DeviceEvent::PropertiesUpdated(updated));
        }
    }

    /// Resolve the whole new list before touching the snapshot. On failure the old list stays.
    async fn replace_profiles(&self, paths: &[String]) -> bool {
        match resolve_profiles(self.bus.as_ref(), paths, self.call_timeout).await {
            Ok(profiles) => {
                self.lock_snapshot().profiles = profiles;
                true
            }
            Err(e) => {
                warn!("Keeping previous profile list of {}: {e}", self.object_path());
                self.observers.emit(DeviceEvent::ProfilesUpdateFailed {
                    object_path: self.object_path(),
                    message: e.to_string(),
                });
                false
            }
        }
    }

    fn object_path(&self) -> String {
        self.lock_snapshot().object_path.clone().unwrap_or_default()
    }

    fn lock_snapshot(&self) -> MutexGuard<'_, DeviceSnapshot> {
        self.snapshot.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
