// SPDX-FileCopyrightText: 2025 All contributors
//
// SPDX-License-Identifier: GPL-2.0-or-later

use crate::geo_math::heading_delta;
use common::coordinate::GpsFix;

/// Default largest heading change between two fixes that still counts as consistent.
pub const DEFAULT_HEADING_TOLERANCE_DEGREES: f64 = 45.0;

/// Checks whether a window of recent fixes shares a consistent heading.
///
/// Every adjacent pair is compared: if the heading changes by more than
/// `tolerance_degrees` the motion is erratic (e.g. the user turned around) and
/// `false` is returned. A fix without heading makes the window inconsistent
/// as well, since nothing can be said about the direction.
///
/// A window with fewer than two fixes has no pair to contradict and is
/// consistent.
///
/// # Example
///
/// ```rust
/// use algorithm::direction::is_heading_consistent;
///
/// assert!(is_heading_consistent(&[], 45.0));
/// ```
pub fn is_heading_consistent(recent: &[GpsFix], tolerance_degrees: f64) -> bool {
    if recent.len() < 2 {
        return true;
    }
    recent.windows(2).all(|pair| match (pair[0].heading, pair[1].heading) {
        (Some(previous), Some(current)) => heading_delta(previous, current) <= tolerance_degrees,
        _ => false,
    })
}
