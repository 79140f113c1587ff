// SPDX-FileCopyrightText: 2025 All contributors
//
// SPDX-License-Identifier: GPL-2.0-or-later

use crate::serde::duration;
use chrono::TimeDelta;
use serde::{Deserialize, Serialize};

/// Review statistics of a recorded track.
///
/// Speed values are `None` when no fix of the track reported a speed. They are
/// never replaced by a sentinel number.
///
/// # Fields
///
/// - `total_distance_meters` – Length of the path over all consecutive fixes.
/// - `displacement_meters` – Straight distance between the first and the last fix.
/// - `max_speed` – Highest known speed in meters per second.
/// - `min_speed` – Lowest known speed in meters per second.
/// - `duration` – Time between the earliest and the latest fix timestamp.
/// - `fix_count` – Number of fixes the summary was computed from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TrackSummary {
    pub total_distance_meters: f64,
    pub displacement_meters: f64,
    pub max_speed: Option<f64>,
    pub min_speed: Option<f64>,
    #[serde(with = "duration")]
    pub duration: Option<TimeDelta>,
    pub fix_count: usize,
}

impl TrackSummary {
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    pub fn to_json(summary: &TrackSummary) -> serde_json::Result<String> {
        serde_json::to_string(summary)
    }
}
