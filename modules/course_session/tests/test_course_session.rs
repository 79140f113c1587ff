// SPDX-FileCopyrightText: 2025 All contributors
//
// SPDX-License-Identifier: GPL-2.0-or-later

use algorithm::distance;
use chrono::TimeDelta;
use common::config::CourseConfig;
use common::coordinate::Coordinate;
use common::geofence::GeofenceError;
use common::status::SessionState;
use common::test_helper::course::*;
use common::track::TrackError;
use course_session::CourseSession;
use module_core::EventBus;

fn create_session(event_bus: &EventBus) -> CourseSession {
    CourseSession::new(event_bus.context(), CourseConfig::default()).unwrap()
}

#[test]
fn reject_invalid_fence_radius() {
    let event_bus = EventBus::default();
    let config = CourseConfig {
        fence_radius_meters: -5.0,
        ..CourseConfig::default()
    };

    let result = CourseSession::new(event_bus.context(), config);

    assert!(matches!(result, Err(GeofenceError::InvalidRadius(r)) if r == -5.0));
}

#[test]
fn new_session_is_idle_and_empty() {
    let event_bus = EventBus::default();
    let session = create_session(&event_bus);

    assert_eq!(session.state(), SessionState::Idle);
    assert!(session.track().is_empty());
    assert!(session.fence().is_none());
    assert_eq!(session.live_status().fix_count, 0);
}

#[test]
fn fixes_are_ignored_while_idle() {
    let event_bus = EventBus::default();
    let mut session = create_session(&event_bus);

    let status = session.on_fixes_received(&loop_course()[..3]).unwrap();

    assert_eq!(status, None);
    assert!(session.track().is_empty());
}

#[test]
fn first_fix_becomes_the_fence_center() {
    let event_bus = EventBus::default();
    let mut session = create_session(&event_bus);
    session.start();

    session.on_fixes_received(&loop_course()[..2]).unwrap();

    let fence = session.fence().unwrap();
    assert_eq!(*fence.center(), START);
    assert_eq!(fence.radius_meters(), 10.0);
    assert_eq!(session.track().len(), 2);
}

#[test]
fn invalid_batch_is_dropped_as_a_whole() {
    let event_bus = EventBus::default();
    let mut session = create_session(&event_bus);
    session.start();
    session.on_fixes_received(&loop_course()[..2]).unwrap();

    let mut batch = loop_course()[2..5].to_vec();
    batch[1].coordinate = Coordinate::new(f64::NAN, START.longitude);

    assert_eq!(
        session.on_fixes_received(&batch),
        Err(TrackError::NonFiniteCoordinate { index: 1 })
    );
    assert_eq!(session.track().len(), 2);
    assert_eq!(session.state(), SessionState::Tracking);
}

#[test]
fn live_status_while_approaching_the_finish() {
    let event_bus = EventBus::default();
    let mut session = create_session(&event_bus);
    session.start();

    let status = session.on_fixes_received(&loop_course()[..16]).unwrap().unwrap();

    assert_eq!(status.state, SessionState::Tracking);
    assert!(!status.inside_boundary);
    assert!(status.approaching_finish);
    assert!(status.heading_consistent);
    assert_eq!(status.fix_count, 16);
    let predicted = status.predicted_position.unwrap();
    assert!((distance(&predicted, &offset(0.0, 30.0))).abs() < 0.5);
}

#[test]
fn unknown_heading_has_no_prediction() {
    let event_bus = EventBus::default();
    let mut session = create_session(&event_bus);
    session.start();

    let status = session
        .on_fixes_received(&[fix_at(0.0, 0.0, None, None, 0)])
        .unwrap()
        .unwrap();

    assert!(status.inside_boundary);
    assert!(!status.approaching_finish);
    assert_eq!(status.predicted_position, None);
}

#[test]
fn course_completes_when_returning_to_the_start() {
    let event_bus = EventBus::default();
    let mut session = create_session(&event_bus);
    session.start();
    let course = loop_course();

    for batch in course.chunks(4) {
        session.on_fixes_received(batch).unwrap();
    }

    assert_eq!(session.state(), SessionState::Completed);
    let summary = session.summary();
    assert_eq!(summary.fix_count, LOOP_COURSE_FINISH_INDEX + 1);
    assert!((summary.total_distance_meters - 797.0).abs() < 1.0);
    assert!((summary.displacement_meters - 3.0).abs() < 0.1);
    assert_eq!(summary.max_speed, Some(4.0));
    assert_eq!(summary.min_speed, Some(0.0));
    assert_eq!(summary.duration, Some(TimeDelta::seconds(170)));
}

#[test]
fn fixes_after_completion_are_ignored() {
    let event_bus = EventBus::default();
    let mut session = create_session(&event_bus);
    session.start();
    let course = loop_course();
    session
        .on_fixes_received(&course[..=LOOP_COURSE_FINISH_INDEX])
        .unwrap();

    let status = session
        .on_fixes_received(&course[LOOP_COURSE_FINISH_INDEX + 1..])
        .unwrap();

    assert_eq!(status, None);
    assert_eq!(session.track().len(), LOOP_COURSE_FINISH_INDEX + 1);
}

#[test]
fn u_turn_at_the_start_keeps_tracking() {
    let event_bus = EventBus::default();
    let mut session = create_session(&event_bus);
    session.start();

    session.on_fixes_received(&loop_course_with_u_turn()).unwrap();

    assert_eq!(session.state(), SessionState::Tracking);
}

#[test]
fn stop_keeps_the_track() {
    let event_bus = EventBus::default();
    let mut session = create_session(&event_bus);
    session.start();
    session.on_fixes_received(&loop_course()[..5]).unwrap();

    session.stop();

    assert_eq!(session.state(), SessionState::Idle);
    assert_eq!(session.track().len(), 5);
    assert_eq!(session.summary().fix_count, 5);
}

#[test]
fn start_while_tracking_is_ignored() {
    let event_bus = EventBus::default();
    let mut session = create_session(&event_bus);
    session.start();
    session.on_fixes_received(&loop_course()[..5]).unwrap();

    session.start();

    assert_eq!(session.track().len(), 5);
}

#[test]
fn restart_after_completion_begins_a_new_track() {
    let event_bus = EventBus::default();
    let mut session = create_session(&event_bus);
    session.start();
    session.on_fixes_received(&loop_course()).unwrap();
    assert_eq!(session.state(), SessionState::Completed);

    session.start();

    assert_eq!(session.state(), SessionState::Tracking);
    assert!(session.track().is_empty());
    assert!(session.fence().is_none());
}

#[test]
fn reset_clears_everything() {
    let event_bus = EventBus::default();
    let mut session = create_session(&event_bus);
    session.start();
    session.on_fixes_received(&loop_course()[..5]).unwrap();

    session.reset();

    assert_eq!(session.state(), SessionState::Idle);
    assert!(session.track().is_empty());
    assert!(session.fence().is_none());
    assert_eq!(session.summary().fix_count, 0);
}
