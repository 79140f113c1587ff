// SPDX-FileCopyrightText: 2025 All contributors
//
// SPDX-License-Identifier: GPL-2.0-or-later

use crate::geo_math::distance;
use common::coordinate::GpsFix;
use common::geofence::{Containment, Geofence};

/// Returns `true` if the fix lies within the fence's degree radius of the
/// center in latitude and in longitude.
///
/// Both axes are tested independently, so this is a bounding box test and not
/// a circle: a fix close to a corner of the box is inside although it is
/// farther away than the radius. The bounds are exclusive. Use
/// [`contains_radial`] for a true distance test.
pub fn contains(fix: &GpsFix, fence: &Geofence) -> bool {
    let center = fence.center();
    let radius = fence.radius_degrees();
    between(fix.latitude(), center.latitude - radius, center.latitude + radius)
        && between(fix.longitude(), center.longitude - radius, center.longitude + radius)
}

/// Returns `true` if the great circle distance between the fix and the fence
/// center is at most the fence radius in meters.
pub fn contains_radial(fix: &GpsFix, fence: &Geofence) -> bool {
    distance(&fix.coordinate, fence.center()) <= fence.radius_meters()
}

/// Membership test selected by `containment`.
pub fn is_inside(fix: &GpsFix, fence: &Geofence, containment: Containment) -> bool {
    match containment {
        Containment::BoundingBox => contains(fix, fence),
        Containment::Radial => contains_radial(fix, fence),
    }
}

fn between(value: f64, min: f64, max: f64) -> bool {
    value > min && value < max
}
