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

//! Profile references.
//!
//! A [`Profile`] can only be obtained by resolving an object path against the bus, so holding
//! one means the path was bound successfully at least once. Profile lists are always rebuilt
//! from scratch; nothing is shared between two lists.

use crate::comm::bus::{ColorBus, ProfileBinding};
use crate::error::ColordError;
use crate::timeout::with_timeout;
use log::trace;
use std::fmt;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    object_path: String,
    id: Option<String>,
    filename: Option<String>,
    qualifier: Option<String>,
}

impl Profile {
    /// Bind to the profile at `object_path` and read its properties.
    ///
    /// # Returns: `Result<Profile, ColordError>`
    /// * `Ok(Profile)` - The profile was bound and its cached properties read
    /// * `Err(ColordError::ProfileResolution)` - The bus could not bind the path
    /// * `Err(ColordError::Timeout)` - `timeout` elapsed before the bind completed
    pub(crate) async fn resolve(
        bus: &dyn ColorBus,
        object_path: &str,
        timeout: Option<Duration>,
    ) -> Result<Profile, ColordError> {
        trace!("Resolving profile {object_path}");
        let binding = with_timeout(timeout, "bind profile", bus.bind_profile(object_path))
            .await?
            .map_err(|e| ColordError::ProfileResolution {
                object_path: object_path.to_string(),
                e,
            })?;
        Ok(Profile::from_binding(object_path, binding.as_ref()))
    }

    fn from_binding(object_path: &str, binding: &dyn ProfileBinding) -> Profile {
        let string_property = |name: &str| {
            binding
                .cached_property(name)
                .and_then(|value| value.as_str().map(str::to_string))
        };
        Profile {
            object_path: object_path.to_string(),
            id: string_property("ProfileId"),
            filename: string_property("Filename"),
            qualifier: string_property("Qualifier"),
        }
    }

    pub fn object_path(&self) -> &str {
        &self.object_path
    }

    /// The `ProfileId`, needed to make the profile a device default.
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn filename(&self) -> Option<&str> {
        self.filename.as_deref()
    }

    pub fn qualifier(&self) -> Option<&str> {
        self.qualifier.as_deref()
    }
}

impl fmt::Display for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({})",
            self.object_path,
            self.id.as_deref().unwrap_or("no id")
        )
    }
}

/// Resolve every path in order. The first failure aborts the whole list.
pub(crate) async fn resolve_profiles(
    bus: &dyn ColorBus,
    object_paths: &[String],
    timeout: Option<Duration>,
) -> Result<Vec<Profile>, ColordError> {
    let mut profiles = Vec::with_capacity(object_paths.len());
    for object_path in object_paths {
        profiles.push(Profile::resolve(bus, object_path, timeout).await?);
    }
    Ok(profiles)
}
