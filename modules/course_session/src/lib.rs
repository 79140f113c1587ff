// SPDX-FileCopyrightText: 2025 All contributors
//
// SPDX-License-Identifier: GPL-2.0-or-later

//! Course session Modul
//!
//! Records the track of one course, decides when the user returned to the
//! start point and publishes the derived state after every batch of fixes.

use algorithm::finish_line::{CrossingParams, find_crossing, is_approaching};
use algorithm::{geofence::is_inside, is_heading_consistent, predict, summarize};
use async_trait::async_trait;
use common::config::CourseConfig;
use common::coordinate::GpsFix;
use common::geofence::{Geofence, GeofenceError};
use common::status::{LiveStatus, SessionState};
use common::summary::TrackSummary;
use common::track::{Track, TrackError};
use module_core::{
    EmptyRequestPtr, Event, EventKind, LiveStatusPtr, Module, ModuleCtx, Response,
    SummaryResponsePtr, TrackSummaryPtr,
};
use tracing::{debug, error, info};

/// A single course session.
///
/// The session owns the recorded [`Track`] and is its only writer. The first
/// fix after a start becomes the start point and the center of the
/// start/finish geofence.
///
/// State machine:
/// - `Idle -> Tracking` on start, the previous track is discarded.
/// - `Tracking -> Completed` once the track crossed the finish line.
/// - `Tracking -> Idle` on stop, the track is kept for review.
/// - any state `-> Idle` on reset, the track is cleared.
pub struct CourseSession {
    ctx: ModuleCtx,
    config: CourseConfig,
    params: CrossingParams,
    state: SessionState,
    track: Track,
    fence: Option<Geofence>,
    finish_index: Option<usize>,
}

impl CourseSession {
    /// Creates an idle session.
    ///
    /// # Errors
    ///
    /// Returns [`GeofenceError::InvalidRadius`] if the configured fence radius
    /// can't be used.
    pub fn new(ctx: ModuleCtx, config: CourseConfig) -> Result<Self, GeofenceError> {
        Geofence::check_radius(config.fence_radius_meters)?;
        Ok(CourseSession {
            ctx,
            params: CrossingParams::from(&config),
            config,
            state: SessionState::Idle,
            track: Track::default(),
            fence: None,
            finish_index: None,
        })
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn track(&self) -> &Track {
        &self.track
    }

    /// The start/finish geofence, available once the first fix was recorded.
    pub fn fence(&self) -> Option<&Geofence> {
        self.fence.as_ref()
    }

    /// Starts a new session. Does nothing while already tracking.
    pub fn start(&mut self) {
        if self.state == SessionState::Tracking {
            debug!("Start ignored, session is already tracking");
            return;
        }
        self.clear();
        self.state = SessionState::Tracking;
        info!("Course session started");
    }

    /// Stops tracking and keeps the recorded track.
    pub fn stop(&mut self) {
        if self.state == SessionState::Tracking {
            self.state = SessionState::Idle;
            info!("Course session stopped after {} fixes", self.track.len());
        }
    }

    /// Returns to idle and clears the recorded track.
    pub fn reset(&mut self) {
        self.clear();
        self.state = SessionState::Idle;
        info!("Course session reset");
    }

    fn clear(&mut self) {
        self.track.clear();
        self.fence = None;
        self.finish_index = None;
    }

    /// Appends a batch of fixes delivered by the location source.
    ///
    /// Batches are only recorded while tracking, otherwise they are ignored and
    /// `Ok(None)` is returned. An invalid batch is dropped as a whole.
    ///
    /// Returns the live status after the batch was applied.
    pub fn on_fixes_received(&mut self, fixes: &[GpsFix]) -> Result<Option<LiveStatus>, TrackError> {
        if self.state != SessionState::Tracking {
            debug!("Ignoring {} fixes, session is {:?}", fixes.len(), self.state);
            return Ok(None);
        }
        self.track.append_batch(fixes)?;
        if self.fence.is_none() {
            self.fence = self.create_fence();
        }
        if let Some(fence) = &self.fence
            && let Some(index) = find_crossing(self.track.fixes(), fence, &self.params)
        {
            self.finish_index = Some(index);
            self.state = SessionState::Completed;
            info!("Course completed at fix {} of {}", index, self.track.len());
        }
        Ok(Some(self.live_status()))
    }

    fn create_fence(&self) -> Option<Geofence> {
        let start = self.track.start_point()?;
        match Geofence::new(start.coordinate, self.config.fence_radius_meters) {
            Ok(fence) => {
                info!(
                    "Start point set to lat: {}, long: {}",
                    start.latitude(),
                    start.longitude()
                );
                Some(fence)
            }
            Err(e) => {
                error!("Failed to create start geofence. Error: {}", e);
                None
            }
        }
    }

    /// Derives the state shown while the user is moving from the latest fixes.
    pub fn live_status(&self) -> LiveStatus {
        let fixes = self.track.fixes();
        let (Some(latest), Some(fence)) = (fixes.last(), self.fence.as_ref()) else {
            return LiveStatus {
                state: self.state,
                ..LiveStatus::default()
            };
        };
        let approaching_finish = fixes.len() >= 2
            && is_approaching(
                &fixes[fixes.len() - 2],
                latest,
                fence,
                self.config.near_threshold_meters,
            );
        let window_start = fixes.len().saturating_sub(self.config.heading_window);
        LiveStatus {
            state: self.state,
            inside_boundary: is_inside(latest, fence, self.config.containment),
            approaching_finish,
            heading_consistent: is_heading_consistent(
                &fixes[window_start..],
                self.config.heading_tolerance_degrees,
            ),
            predicted_position: predict(latest, self.config.prediction_ahead_meters),
            fix_count: fixes.len(),
        }
    }

    /// Summarizes the recorded track.
    ///
    /// For a completed course only the fixes up to the finish are considered.
    pub fn summary(&self) -> TrackSummary {
        let fixes = self.track.fixes();
        match self.finish_index {
            Some(index) => summarize(&fixes[..=index]),
            None => summarize(fixes),
        }
    }

    fn on_fix_batch(&mut self, fixes: &[GpsFix]) {
        let previous_state = self.state;
        let status = match self.on_fixes_received(fixes) {
            Ok(Some(status)) => status,
            Ok(None) => return,
            Err(e) => {
                error!("Dropped batch of {} fixes. Error: {}", fixes.len(), e);
                return;
            }
        };
        self.notify_consumer(EventKind::LiveStatusEvent(LiveStatusPtr::new(status)));
        if previous_state == SessionState::Tracking && self.state == SessionState::Completed {
            let summary = self.summary();
            info!(
                "Course distance {:.1} m, max speed {:?}, min speed {:?}",
                summary.total_distance_meters, summary.max_speed, summary.min_speed
            );
            self.notify_consumer(EventKind::CourseCompletedEvent(TrackSummaryPtr::new(summary)));
            self.notify_consumer(EventKind::StopTrackingEvent);
        }
    }

    fn on_summary_request(&self, request: EmptyRequestPtr) {
        let response = SummaryResponsePtr::new(Response::new(
            request.id,
            request.sender_addr,
            self.summary(),
        ));
        self.notify_consumer(EventKind::SummaryResponseEvent(response));
    }

    fn notify_consumer(&self, kind: EventKind) {
        let _ = self.ctx.sender.send(Event { kind });
    }
}

#[async_trait]
impl Module for CourseSession {
    async fn run(&mut self) -> std::result::Result<(), ()> {
        let mut run = true;
        while run {
            tokio::select! {
                event = self.ctx.receiver.recv() => {
                    match event {
                        Ok(event) => {
                            match event.kind {
                                EventKind::QuitEvent => run = false,
                                EventKind::StartTrackingEvent => self.start(),
                                EventKind::StopTrackingEvent => self.stop(),
                                EventKind::ResetEvent => self.reset(),
                                EventKind::FixBatchEvent(fixes) => self.on_fix_batch(&fixes),
                                EventKind::LocationErrorEvent(e) => {
                                    error!("Location source reported an error: {}", e);
                                }
                                EventKind::SummaryRequestEvent(request) => {
                                    self.on_summary_request(request);
                                }
                                _ => (),
                            }
                        },
                        Err(e) => {
                            error!("Failed to receive event in module CourseSession. Error:{e}");
                        }
                    }
                }
            }
        }
        Ok(())
    }
}
