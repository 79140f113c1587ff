// SPDX-FileCopyrightText: 2025 All contributors
//
// SPDX-License-Identifier: GPL-2.0-or-later

//! Recorded fixes of a square loop course around a start point in Austin, TX.
//!
//! The loop runs 200 m north, 200 m east, 200 m south and then west back to
//! the start point. Offsets are given in meters relative to [`START`].

use crate::coordinate::{Coordinate, GpsFix};
use chrono::{DateTime, TimeDelta, Utc};

const EARTH_RADIUS_METERS: f64 = 6_371_000.0;

pub const START: Coordinate = Coordinate {
    latitude: 30.1325735,
    longitude: -97.6408249,
};

pub const NORTH: f64 = 0.0;
pub const EAST: f64 = 90.0;
pub const SOUTH: f64 = 180.0;
pub const WEST: f64 = 270.0;

pub fn base_time() -> DateTime<Utc> {
    DateTime::from_timestamp(1_714_564_800, 0).unwrap_or_default()
}

/// Coordinate `north` and `east` meters away from [`START`].
pub fn offset(north: f64, east: f64) -> Coordinate {
    let latitude = START.latitude + (north / EARTH_RADIUS_METERS).to_degrees();
    let longitude = START.longitude
        + (east / (EARTH_RADIUS_METERS * START.latitude.to_radians().cos())).to_degrees();
    Coordinate::new(latitude, longitude)
}

pub fn fix_at(north: f64, east: f64, heading: Option<f64>, speed: Option<f64>, secs: i64) -> GpsFix {
    GpsFix::new(
        offset(north, east),
        heading,
        speed,
        base_time() + TimeDelta::seconds(secs),
    )
}

fn leg(points: &[(f64, f64)], heading: f64, first_sec: i64) -> Vec<GpsFix> {
    points
        .iter()
        .enumerate()
        .map(|(i, (north, east))| fix_at(*north, *east, Some(heading), Some(4.0), first_sec + i as i64 * 10))
        .collect()
}

/// Start point, the loop and an exact sample inside the fence when returning.
pub fn loop_course() -> Vec<GpsFix> {
    let mut fixes = vec![fix_at(0.0, 0.0, Some(NORTH), Some(0.0), 0)];
    fixes.extend(leg(&[(50.0, 0.0), (100.0, 0.0), (150.0, 0.0), (200.0, 0.0)], NORTH, 10));
    fixes.extend(leg(&[(200.0, 50.0), (200.0, 100.0), (200.0, 150.0), (200.0, 200.0)], EAST, 50));
    fixes.extend(leg(&[(150.0, 200.0), (100.0, 200.0), (50.0, 200.0), (0.0, 200.0)], SOUTH, 90));
    fixes.extend(leg(
        &[(0.0, 150.0), (0.0, 100.0), (0.0, 50.0), (0.0, 25.0), (0.0, 3.0), (0.0, -20.0)],
        WEST,
        130,
    ));
    fixes
}

/// Index of the first fix of [`loop_course`] inside the start/finish fence.
pub const LOOP_COURSE_FINISH_INDEX: usize = 17;

/// Like [`loop_course`], but the sampling skips the fence when returning.
pub fn loop_course_with_gap() -> Vec<GpsFix> {
    let mut fixes = loop_course();
    fixes.truncate(LOOP_COURSE_FINISH_INDEX);
    fixes.extend(leg(&[(0.0, -15.0), (0.0, -40.0)], WEST, 180));
    fixes
}

/// Like [`loop_course`], but the user turns around inside the fence.
pub fn loop_course_with_u_turn() -> Vec<GpsFix> {
    let mut fixes = loop_course();
    fixes.truncate(LOOP_COURSE_FINISH_INDEX);
    fixes.extend(leg(&[(0.0, 3.0), (0.0, 25.0), (0.0, 50.0)], EAST, 180));
    fixes
}
