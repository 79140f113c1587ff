// SPDX-FileCopyrightText: 2025 All contributors
//
// SPDX-License-Identifier: GPL-2.0-or-later

use crate::coordinate::Coordinate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Linear meter to degree approximation: 11.1 m equal 0.0001 degrees.
///
/// Only accurate near the equator. For longitude the error grows with the
/// latitude, which is an accepted limitation of the bounding box test.
pub const DEGREES_PER_METER: f64 = 0.0001 / 11.1;

#[derive(Debug, Error, PartialEq)]
pub enum GeofenceError {
    #[error("geofence radius must be a positive finite number of meters, got {0}")]
    InvalidRadius(f64),
}

/// Selects how membership in a [`Geofence`] is tested.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Containment {
    /// Latitude and longitude are compared independently against the degree
    /// radius. The fence is effectively a square, so points near its corners
    /// count as inside although they are farther away than the radius.
    #[default]
    BoundingBox,

    /// Great circle distance to the center compared against the meter radius.
    Radial,
}

/// A circular boundary around a center point, e.g. the start/finish line of a course.
///
/// # Example
///
/// ```rust
/// use common::{coordinate::Coordinate, geofence::Geofence};
///
/// let fence = Geofence::new(Coordinate::new(30.1325735, -97.6408249), 10.0).unwrap();
/// assert!(fence.radius_degrees() > 0.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Geofence {
    center: Coordinate,
    radius_meters: f64,
    radius_degrees: f64,
}

impl Geofence {
    /// Creates a geofence around `center` with a radius given in meters.
    ///
    /// The radius is converted to degrees with [`DEGREES_PER_METER`].
    ///
    /// # Errors
    ///
    /// Returns [`GeofenceError::InvalidRadius`] if the radius is not a positive
    /// finite number.
    pub fn new(center: Coordinate, radius_meters: f64) -> Result<Self, GeofenceError> {
        Geofence::check_radius(radius_meters)?;
        Ok(Geofence {
            center,
            radius_meters,
            radius_degrees: radius_meters * DEGREES_PER_METER,
        })
    }

    /// Checks that `radius_meters` can be used for a geofence.
    pub fn check_radius(radius_meters: f64) -> Result<(), GeofenceError> {
        if !radius_meters.is_finite() || radius_meters <= 0.0 {
            return Err(GeofenceError::InvalidRadius(radius_meters));
        }
        Ok(())
    }

    pub fn center(&self) -> &Coordinate {
        &self.center
    }

    pub fn radius_meters(&self) -> f64 {
        self.radius_meters
    }

    pub fn radius_degrees(&self) -> f64 {
        self.radius_degrees
    }
}
