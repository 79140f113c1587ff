// SPDX-FileCopyrightText: 2025 All contributors
//
// SPDX-License-Identifier: GPL-2.0-or-later

use crate::geo_math::destination;
use common::coordinate::{Coordinate, GpsFix};

/// Default distance of the predicted position ahead of the user.
pub const DEFAULT_AHEAD_METERS: f64 = 20.0;

/// Predicts where the user will be after moving `ahead_meters` along the
/// current heading.
///
/// Returns `None` if the fix has no heading. Only meant for display, e.g. a
/// marker of the anticipated position.
pub fn predict(current: &GpsFix, ahead_meters: f64) -> Option<Coordinate> {
    current
        .heading
        .map(|heading| destination(&current.coordinate, heading, ahead_meters))
}
