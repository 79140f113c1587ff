// SPDX-FileCopyrightText: 2025 All contributors
//
// SPDX-License-Identifier: GPL-2.0-or-later

use crate::geofence::Containment;
use serde::{Deserialize, Serialize};

/// Tunables of a course session.
///
/// Every field has a default, so a JSON configuration only needs to contain
/// the values that differ.
///
/// # Fields
///
/// - `fence_radius_meters` – Radius of the start/finish geofence.
/// - `near_threshold_meters` – Distance to the start point below which the user counts as approaching.
/// - `departure_meters` – Distance to the start point a fix needs before the user counts as departed.
/// - `heading_tolerance_degrees` – Largest heading change between two fixes that is still consistent.
/// - `heading_window` – Number of trailing fixes checked for a consistent heading.
/// - `prediction_ahead_meters` – How far ahead of the user the predicted position is placed.
/// - `containment` – Membership test used for the geofence.
/// - `batch_interval_ms` – Interval in which the location source delivers batches.
/// - `batch_size` – Number of fixes per delivered batch.
///
/// # Example
///
/// ```rust
/// use common::config::CourseConfig;
///
/// let config = CourseConfig::from_json(r#"{ "fence_radius_meters": 15.0 }"#).unwrap();
/// assert_eq!(config.fence_radius_meters, 15.0);
/// assert_eq!(config.near_threshold_meters, 100.0);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CourseConfig {
    pub fence_radius_meters: f64,
    pub near_threshold_meters: f64,
    pub departure_meters: f64,
    pub heading_tolerance_degrees: f64,
    pub heading_window: usize,
    pub prediction_ahead_meters: f64,
    pub containment: Containment,
    pub batch_interval_ms: u64,
    pub batch_size: usize,
}

impl Default for CourseConfig {
    fn default() -> Self {
        CourseConfig {
            fence_radius_meters: 10.0,
            near_threshold_meters: 100.0,
            departure_meters: 20.0,
            heading_tolerance_degrees: 45.0,
            heading_window: 3,
            prediction_ahead_meters: 20.0,
            containment: Containment::BoundingBox,
            batch_interval_ms: 1000,
            batch_size: 1,
        }
    }
}

impl CourseConfig {
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}
