// SPDX-FileCopyrightText: 2025 All contributors
//
// SPDX-License-Identifier: GPL-2.0-or-later

use crate::direction::{DEFAULT_HEADING_TOLERANCE_DEGREES, is_heading_consistent};
use crate::geo_math::{distance, local_offset};
use crate::geofence::is_inside;
use common::config::CourseConfig;
use common::coordinate::GpsFix;
use common::geofence::{Containment, Geofence};
use tracing::debug;

/// Default distance to the fence center below which a user counts as near the finish.
pub const DEFAULT_NEAR_THRESHOLD_METERS: f64 = 100.0;

/// Default distance to the fence center a fix needs before the user counts as departed.
pub const DEFAULT_DEPARTURE_METERS: f64 = 20.0;

/// Parameters of the finish line detection.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CrossingParams {
    pub near_threshold_meters: f64,
    /// A fix outside the fence only departs once it is at least this far
    /// from the center. Keeps position jitter around the start from
    /// completing a lap.
    pub departure_meters: f64,
    pub heading_tolerance_degrees: f64,
    pub heading_window: usize,
    pub containment: Containment,
}

impl Default for CrossingParams {
    fn default() -> Self {
        CrossingParams {
            near_threshold_meters: DEFAULT_NEAR_THRESHOLD_METERS,
            departure_meters: DEFAULT_DEPARTURE_METERS,
            heading_tolerance_degrees: DEFAULT_HEADING_TOLERANCE_DEGREES,
            heading_window: 3,
            containment: Containment::BoundingBox,
        }
    }
}

impl From<&CourseConfig> for CrossingParams {
    fn from(config: &CourseConfig) -> Self {
        CrossingParams {
            near_threshold_meters: config.near_threshold_meters,
            departure_meters: config.departure_meters,
            heading_tolerance_degrees: config.heading_tolerance_degrees,
            heading_window: config.heading_window,
            containment: config.containment,
        }
    }
}

/// Returns `true` if the user moved closer to the fence center and is already
/// within `near_threshold_meters` of it.
///
/// A decreasing distance alone is not enough, far away from the fence GPS
/// noise easily produces one.
pub fn is_approaching(
    previous: &GpsFix,
    current: &GpsFix,
    fence: &Geofence,
    near_threshold_meters: f64,
) -> bool {
    let previous_distance = distance(&previous.coordinate, fence.center());
    let current_distance = distance(&current.coordinate, fence.center());
    current_distance < previous_distance && current_distance < near_threshold_meters
}

/// Returns `true` if the track returned to the fence after leaving it.
///
/// See [`find_crossing`] for the rule.
pub fn has_crossed_finish_line(track: &[GpsFix], fence: &Geofence, params: &CrossingParams) -> bool {
    find_crossing(track, fence, params).is_some()
}

/// Searches the track for the fix that completes the lap and returns its index.
///
/// The track counts as departed once a fix lies outside the fence and at least
/// `departure_meters` away from the center, nothing before that can complete
/// the lap. After departure a pair of consecutive fixes `(previous, current)`
/// enters the fence if either
///
/// - `previous` is outside the fence and `current` inside, or
/// - the boundary sample was missed: `previous` is outside and approaching,
///   `current` is inside or moving away from the center, and the straight path
///   between both passes within the fence radius.
///
/// The entry completes the lap if the heading over the trailing
/// `heading_window` fixes up to `current` is consistent. If it isn't, every
/// following fix inside the fence is checked again until the track leaves the
/// fence. Turning around at the fence is no lap.
///
/// Returns `None` for tracks with fewer than two fixes.
pub fn find_crossing(track: &[GpsFix], fence: &Geofence, params: &CrossingParams) -> Option<usize> {
    if track.len() < 2 {
        return None;
    }
    let mut departed = false;
    let mut pending_entry = false;
    let mut previous_inside = is_inside(&track[0], fence, params.containment);
    for index in 1..track.len() {
        let current = &track[index];
        let current_inside = is_inside(current, fence, params.containment);
        let entering = departed
            && !previous_inside
            && is_crossing_candidate(track, index, current_inside, fence, params);
        if entering || (pending_entry && current_inside) {
            let window_start = (index + 1).saturating_sub(params.heading_window);
            if is_heading_consistent(&track[window_start..=index], params.heading_tolerance_degrees) {
                debug!("Finish line crossed at fix {}", index);
                return Some(index);
            }
            debug!("Ignoring finish line candidate at fix {}, heading is not consistent", index);
            pending_entry = current_inside;
        } else if !current_inside {
            pending_entry = false;
        }
        departed |= !current_inside
            && distance(&current.coordinate, fence.center()) >= params.departure_meters;
        previous_inside = current_inside;
    }
    None
}

/// Decides whether the pair ending at `index` enters the fence. The fix before
/// `index` is known to be outside.
fn is_crossing_candidate(
    track: &[GpsFix],
    index: usize,
    current_inside: bool,
    fence: &Geofence,
    params: &CrossingParams,
) -> bool {
    if current_inside {
        return true;
    }
    if index < 2 {
        return false;
    }
    let (before, previous, current) = (&track[index - 2], &track[index - 1], &track[index]);
    if !is_approaching(before, previous, fence, params.near_threshold_meters) {
        return false;
    }
    is_receding(previous, current, fence) && passes_through(previous, current, fence)
}

/// The motion from `previous` to `current` points away from the center at
/// `current`, i.e. the user already passed the point closest to the center.
///
/// This is a direction test, the distance to the center may still have
/// shrunk between both fixes.
fn is_receding(previous: &GpsFix, current: &GpsFix, fence: &Geofence) -> bool {
    let (motion_east, motion_north) = local_offset(&previous.coordinate, &current.coordinate);
    let (east, north) = local_offset(fence.center(), &current.coordinate);
    motion_east * east + motion_north * north > 0.0
}

/// The straight segment between both fixes comes within the fence radius of the center.
fn passes_through(previous: &GpsFix, current: &GpsFix, fence: &Geofence) -> bool {
    let (ax, ay) = local_offset(fence.center(), &previous.coordinate);
    let (bx, by) = local_offset(fence.center(), &current.coordinate);
    let (dx, dy) = (bx - ax, by - ay);
    let length_squared = dx * dx + dy * dy;
    let t = if length_squared > 0.0 {
        (-(ax * dx + ay * dy) / length_squared).clamp(0.0, 1.0)
    } else {
        0.0
    };
    let (cx, cy) = (ax + t * dx, ay + t * dy);
    (cx * cx + cy * cy).sqrt() <= fence.radius_meters()
}
