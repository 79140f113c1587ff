// SPDX-FileCopyrightText: 2025 All contributors
//
// SPDX-License-Identifier: GPL-2.0-or-later

use crate::coordinate::Coordinate;
use serde::{Deserialize, Serialize};

/// Lifecycle of a course session.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    /// No fixes are recorded.
    #[default]
    Idle,

    /// The location source is running and every batch is appended to the track.
    Tracking,

    /// The user returned to the start point, the course is calibrated.
    Completed,
}

/// Derived state of a running session, computed after every applied batch.
///
/// This is what a presentation layer shows while the user is moving.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct LiveStatus {
    pub state: SessionState,
    /// The latest fix lies within the start/finish geofence.
    pub inside_boundary: bool,
    /// The user gets closer to the start point and is already near it.
    pub approaching_finish: bool,
    /// The recent fixes share a consistent heading.
    pub heading_consistent: bool,
    /// Anticipated position a few meters ahead, `None` while the heading is unknown.
    pub predicted_position: Option<Coordinate>,
    pub fix_count: usize,
}
