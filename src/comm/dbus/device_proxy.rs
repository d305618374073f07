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

use zbus::zvariant::{ObjectPath, OwnedObjectPath};
use zbus::{Result, proxy};

// Device objects live at daemon-chosen paths, so there is no default_path. Build with
// `ColordDeviceProxy::builder(..).path(..)`.
#[proxy(
    default_service = "org.freedesktop.ColorManager",
    interface = "org.freedesktop.ColorManager.Device"
)]
pub trait ColordDevice {
    async fn set_property(&self, property_name: &str, property_value: &str) -> Result<()>;
    async fn add_profile(&self, object_path: &ObjectPath<'_>) -> Result<()>;
    async fn make_profile_default(&self, profile_id: &str) -> Result<()>;
    async fn get_profile_for_qualifier(&self, qualifier: &str) -> Result<OwnedObjectPath>;

    #[zbus(property, name = "DeviceId")]
    fn device_id(&self) -> Result<String>;
    #[zbus(property, name = "Kind")]
    fn kind(&self) -> Result<String>;
    #[zbus(property, name = "Model")]
    fn model(&self) -> Result<String>;
    #[zbus(property, name = "Created")]
    fn created(&self) -> Result<u64>;
    #[zbus(property, name = "Profiles")]
    fn profiles(&self) -> Result<Vec<OwnedObjectPath>>;
}
