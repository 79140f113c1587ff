// SPDX-FileCopyrightText: 2025 All contributors
//
// SPDX-License-Identifier: GPL-2.0-or-later

use common::config::CourseConfig;
use common::status::SessionState;
use common::test_helper::course::*;
use course_session::CourseSession;
use module_core::test_helper::{expect_no_event, stop_module, wait_for_event};
use module_core::{
    Event, EventBus, EventKind, EventKindType, FixBatchPtr, Module, Request, payload_ref,
};
use std::time::Duration;

const TIMEOUT: Duration = Duration::from_millis(100);

fn start_session(event_bus: &EventBus) -> tokio::task::JoinHandle<Result<(), ()>> {
    let mut session = CourseSession::new(event_bus.context(), CourseConfig::default()).unwrap();
    tokio::spawn(async move { session.run().await })
}

fn publish(event_bus: &EventBus, kind: EventKind) {
    event_bus.publish(&Event { kind });
}

fn publish_fixes(event_bus: &EventBus, fixes: &[common::coordinate::GpsFix]) {
    publish(event_bus, EventKind::FixBatchEvent(FixBatchPtr::new(fixes.to_vec())));
}

#[tokio::test]
#[test_log::test]
async fn publish_live_status_for_every_batch() {
    let event_bus = EventBus::default();
    let mut rx = event_bus.subscribe();
    let mut handle = start_session(&event_bus);

    publish(&event_bus, EventKind::StartTrackingEvent);
    publish_fixes(&event_bus, &loop_course()[..4]);

    let event = wait_for_event(&mut rx, TIMEOUT, EventKindType::LiveStatusEvent).await;
    let status = payload_ref!(event.kind, EventKind::LiveStatusEvent).unwrap();
    assert_eq!(status.state, SessionState::Tracking);
    assert_eq!(status.fix_count, 4);

    stop_module(&event_bus, &mut handle).await;
}

#[tokio::test]
#[test_log::test]
async fn no_live_status_before_start() {
    let event_bus = EventBus::default();
    let mut rx = event_bus.subscribe();
    let mut handle = start_session(&event_bus);

    publish_fixes(&event_bus, &loop_course()[..4]);

    expect_no_event(&mut rx, Duration::from_millis(30), EventKindType::LiveStatusEvent).await;
    stop_module(&event_bus, &mut handle).await;
}

#[tokio::test]
#[test_log::test]
async fn completed_course_publishes_summary_and_stops_tracking() {
    let event_bus = EventBus::default();
    let mut rx = event_bus.subscribe();
    let mut handle = start_session(&event_bus);

    publish(&event_bus, EventKind::StartTrackingEvent);
    for batch in loop_course().chunks(5) {
        publish_fixes(&event_bus, batch);
    }

    let event = wait_for_event(&mut rx, TIMEOUT, EventKindType::CourseCompletedEvent).await;
    let summary = payload_ref!(event.kind, EventKind::CourseCompletedEvent).unwrap();
    assert_eq!(summary.fix_count, LOOP_COURSE_FINISH_INDEX + 1);
    assert_eq!(summary.max_speed, Some(4.0));
    wait_for_event(&mut rx, TIMEOUT, EventKindType::StopTrackingEvent).await;

    stop_module(&event_bus, &mut handle).await;
}

#[tokio::test]
#[test_log::test]
async fn answer_summary_request() {
    let event_bus = EventBus::default();
    let mut rx = event_bus.subscribe();
    let mut handle = start_session(&event_bus);

    publish(&event_bus, EventKind::StartTrackingEvent);
    publish_fixes(&event_bus, &loop_course()[..6]);
    wait_for_event(&mut rx, TIMEOUT, EventKindType::LiveStatusEvent).await;
    publish(&event_bus, EventKind::SummaryRequestEvent(Request::empty_request(7, 42)));

    let event = wait_for_event(&mut rx, TIMEOUT, EventKindType::SummaryResponseEvent).await;
    let response = payload_ref!(event.kind, EventKind::SummaryResponseEvent).unwrap();
    assert_eq!(response.id, 7);
    assert_eq!(response.receiver_addr, 42);
    assert_eq!(response.data.fix_count, 6);

    stop_module(&event_bus, &mut handle).await;
}

#[tokio::test]
#[test_log::test]
async fn reset_clears_the_track() {
    let event_bus = EventBus::default();
    let mut rx = event_bus.subscribe();
    let mut handle = start_session(&event_bus);

    publish(&event_bus, EventKind::StartTrackingEvent);
    publish_fixes(&event_bus, &loop_course()[..6]);
    wait_for_event(&mut rx, TIMEOUT, EventKindType::LiveStatusEvent).await;
    publish(&event_bus, EventKind::ResetEvent);
    publish(&event_bus, EventKind::SummaryRequestEvent(Request::empty_request(1, 1)));

    let event = wait_for_event(&mut rx, TIMEOUT, EventKindType::SummaryResponseEvent).await;
    let response = payload_ref!(event.kind, EventKind::SummaryResponseEvent).unwrap();
    assert_eq!(response.data.fix_count, 0);

    stop_module(&event_bus, &mut handle).await;
}
