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

use crate::error::ColordError;
use std::future::Future;
use std::time::Duration;

/// Await `call`, giving up after `timeout` if one is set. `method` names the call in the error.
pub(crate) async fn with_timeout<F: Future>(
    timeout: Option<Duration>,
    method: &'static str,
    call: F,
) -> Result<F::Output, ColordError> {
    match timeout {
        None => Ok(call.await),
        Some(limit) => tokio::time::timeout(limit, call)
            .await
            .map_err(|_| ColordError::Timeout {
                method,
                timeout: limit,
            }),
    }
}
