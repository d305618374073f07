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

use crate::common::fake_bus::FakeBus;
use crate::common::test_functions::{
    CREATED, DEVICE_PATH, PROFILE_1, PROFILE_2, bound_device, display_bus, next_event,
    unbound_device, unbound_device_with_timeout,
};
use colord_client::{DeviceEvent, DeviceKind, RemoteEvent};
use googletest::prelude::*;
use rstest::*;
use std::time::Duration;

#[gtest]
#[tokio::test]
async fn initial_snapshot_matches_remote() {
    let bus = display_bus();
    let device = bound_device(&bus).await;

    assert_that!(device.is_bound(), eq(true));
    assert_that!(device.object_path(), some(eq(DEVICE_PATH)));
    assert_that!(device.id(), some(eq("xrandr-HP-LP2480zx")));
    assert_that!(device.model(), some(eq("LP2480zx")));
    assert_that!(device.kind(), eq(DeviceKind::Display));
    assert_that!(device.created(), eq(CREATED));

    let paths: Vec<String> = device
        .profiles()
        .iter()
        .map(|profile| profile.object_path().to_string())
        .collect();
    assert_that!(paths, eq(&vec![PROFILE_1.to_string(), PROFILE_2.to_string()]));
    assert_that!(device.profiles()[0].id(), some(eq("icc-lp2480zx-d50")));
}

#[gtest]
#[tokio::test]
async fn missing_properties_keep_defaults() {
    let bus = FakeBus::new();
    bus.add_device(DEVICE_PATH, &[]);
    let mut device = unbound_device(&bus);

    let result = device.bind(DEVICE_PATH).await;
    assert_that!(result, ok(eq(&())));
    assert_that!(device.id(), none());
    assert_that!(device.model(), none());
    assert_that!(device.kind(), eq(DeviceKind::Unknown));
    assert_that!(device.created(), eq(0));
    assert_that!(device.profiles(), is_empty());
}

#[gtest]
#[tokio::test]
async fn second_bind_keeps_original_binding() {
    let bus = display_bus();
    bus.add_device("/org/freedesktop/ColorManager/devices/other", &[]);
    let mut device = bound_device(&bus).await;
    let mut events = device.subscribe();

    let result = device
        .bind("/org/freedesktop/ColorManager/devices/other")
        .await;
    assert_that!(
        result,
        err(displays_as(contains_substring(format!(
            "ColordError::AlreadyBound: Device is already bound to {DEVICE_PATH}"
        ))))
    );
    assert_that!(device.object_path(), some(eq(DEVICE_PATH)));
    assert_that!(device.id(), some(eq("xrandr-HP-LP2480zx")));

    // The listener of the first binding is still running.
    bus.emit(DEVICE_PATH, RemoteEvent::Signal("Changed".into()));
    let event = next_event(&mut events).await;
    assert_that!(event, eq(&DeviceEvent::Changed));
}

#[gtest]
#[tokio::test]
#[rstest]
#[case::unknown_object(
    "/org/freedesktop/ColorManager/devices/missing",
    None,
    "ColordError::Connection"
)]
#[case::bind_refused(
    DEVICE_PATH,
    Some(("bind_device", "org.freedesktop.DBus.Error.AccessDenied")),
    "AccessDenied"
)]
#[case::subscribe_refused(
    DEVICE_PATH,
    Some(("subscribe", "org.freedesktop.DBus.Error.LimitsExceeded")),
    "LimitsExceeded"
)]
async fn connection_failures(
    #[case] object_path: &str,
    #[case] failure: Option<(&str, &str)>,
    #[case] expected: &str,
) {
    let bus = display_bus();
    if let Some((method, message)) = failure {
        bus.fail_method(method, message);
    }
    let mut device = unbound_device(&bus);

    let result = device.bind(object_path).await;
    assert_that!(result, err(displays_as(contains_substring("ColordError::Connection"))));
    assert_that!(result, err(displays_as(contains_substring(expected))));
    assert_that!(device.is_bound(), eq(false));
    assert_that!(device.object_path(), none());
}

#[gtest]
#[tokio::test]
async fn unresolvable_profile_leaves_partial_snapshot() {
    let bus = display_bus();
    bus.remove_profile(PROFILE_2);
    let mut device = unbound_device(&bus);

    let result = device.bind(DEVICE_PATH).await;
    assert_that!(
        result,
        err(displays_as(contains_substring(format!(
            "ColordError::ProfileResolution: Failed to set profile object path {PROFILE_2}"
        ))))
    );

    assert_that!(device.is_bound(), eq(true));
    assert_that!(device.object_path(), some(eq(DEVICE_PATH)));
    assert_that!(device.model(), some(eq("LP2480zx")));
    assert_that!(device.kind(), eq(DeviceKind::Display));
    assert_that!(device.created(), eq(CREATED));
    assert_that!(device.profiles(), is_empty());
    // No listener: the subscription taken during bind was dropped with the error.
    assert_that!(bus.subscriber_count(DEVICE_PATH), eq(0));
}

#[gtest]
#[tokio::test]
async fn stalled_bind_times_out() {
    let bus = display_bus();
    bus.stall_method("bind_device");
    let mut device = unbound_device_with_timeout(&bus, Duration::from_millis(20));

    let result = device.bind(DEVICE_PATH).await;
    assert_that!(
        result,
        err(displays_as(contains_substring(
            "ColordError::Timeout: bind device did not complete within 20ms"
        )))
    );
    assert_that!(device.is_bound(), eq(false));
}

#[gtest]
#[tokio::test]
async fn describe_after_bind() {
    let bus = display_bus();
    let device = bound_device(&bus).await;

    let description = device.describe();
    assert_that!(
        description,
        starts_with(format!("  object-path:          {DEVICE_PATH}\n  created:              "))
    );
    assert_that!(description, contains_substring("2011"));
    assert_that!(description, ends_with("\n"));
}
