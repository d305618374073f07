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

//! Observer side of a [`Device`](crate::device::Device).
//!
//! Each call to [`Device::subscribe`](crate::device::Device::subscribe) registers one unbounded
//! queue. Events are pushed to every live queue in the order the listener produces them, so two
//! `Changed` signals from the daemon always show up as two [`DeviceEvent::Changed`]. Dropping a
//! [`DeviceEvents`] unregisters it the next time an event is emitted.

use crate::device::property::DeviceProperty;
use std::sync::{Arc, Mutex, PoisonError};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender, error::TryRecvError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeviceEvent {
    /// The daemon emitted `Changed`. Re-read whatever accessors you care about.
    Changed,
    /// A properties-changed notification was applied to the snapshot.
    PropertiesUpdated(Vec<DeviceProperty>),
    /// A new profile list arrived but one of its paths did not resolve. The previous list is
    /// still in place.
    ProfilesUpdateFailed { object_path: String, message: String },
    /// The notification stream from the daemon ended. No further updates will be applied.
    Disconnected,
}

/// A subscription to device events. Drop it to unsubscribe.
#[derive(Debug)]
pub struct DeviceEvents {
    rx: UnboundedReceiver<DeviceEvent>,
}

impl DeviceEvents {
    /// Wait for the next event. Returns `None` once the device is gone.
    pub async fn recv(&mut self) -> Option<DeviceEvent> {
        self.rx.recv().await
    }

    /// Take the next event if one is already queued.
    pub fn try_recv(&mut self) -> Option<DeviceEvent> {
        match self.rx.try_recv() {
            Ok(event) => Some(event),
            Err(TryRecvError::Empty | TryRecvError::Disconnected) => None,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub(crate) struct Observers {
    senders: Arc<Mutex<Vec<UnboundedSender<DeviceEvent>>>>,
}

impl Observers {
    pub(crate) fn subscribe(&self) -> DeviceEvents {
        let (tx, rx) = mpsc::unbounded_channel();
        self.senders
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(tx);
        DeviceEvents { rx }
    }

    pub(crate) fn emit(&self, event: DeviceEvent) {
        let mut senders = self.senders.lock().unwrap_or_else(PoisonError::into_inner);
        senders.retain(|tx| tx.send(event.clone()).is_ok());
    }
}
