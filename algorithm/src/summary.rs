// SPDX-FileCopyrightText: 2025 All contributors
//
// SPDX-License-Identifier: GPL-2.0-or-later

use crate::geo_math::distance;
use common::coordinate::GpsFix;
use common::summary::TrackSummary;

/// Computes the review statistics of a recorded track.
///
/// The distance is the length of the path through all fixes in arrival order.
/// Minimum and maximum speed only consider fixes with a known speed and stay
/// `None` if there is none. A known speed of `0.0` is a valid minimum.
///
/// # Example
///
/// ```rust
/// use algorithm::summary::summarize;
///
/// let summary = summarize(&[]);
/// assert_eq!(summary.total_distance_meters, 0.0);
/// assert_eq!(summary.max_speed, None);
/// ```
pub fn summarize(track: &[GpsFix]) -> TrackSummary {
    let total_distance_meters = track
        .windows(2)
        .map(|pair| distance(&pair[0].coordinate, &pair[1].coordinate))
        .sum();
    let displacement_meters = match (track.first(), track.last()) {
        (Some(first), Some(last)) => distance(&first.coordinate, &last.coordinate),
        _ => 0.0,
    };

    let speeds = track.iter().filter_map(|fix| fix.speed);
    let max_speed = speeds.clone().reduce(f64::max);
    let min_speed = speeds.reduce(f64::min);

    let earliest = track.iter().map(|fix| fix.timestamp).min();
    let latest = track.iter().map(|fix| fix.timestamp).max();
    let duration = earliest.zip(latest).map(|(earliest, latest)| latest - earliest);

    TrackSummary {
        total_distance_meters,
        displacement_meters,
        max_speed,
        min_speed,
        duration,
        fix_count: track.len(),
    }
}
