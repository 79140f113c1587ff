// SPDX-FileCopyrightText: 2025 All contributors
//
// SPDX-License-Identifier: GPL-2.0-or-later

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Represents a geographical coordinate with latitude and longitude.
///
/// The `Coordinate` struct stores a point on Earth in decimal degrees.
/// Latitude values range from -90.0 to 90.0, and longitude values range
/// from -180.0 to 180.0.
///
/// # Example
///
/// ```rust
/// use common::coordinate::Coordinate;
///
/// let start = Coordinate {
///     latitude: 30.1325735,
///     longitude: -97.6408249,
/// };
///
/// println!("{:?}", start);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    /// Creates a new [`Coordinate`] with the given latitude and longitude in decimal degrees.
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Coordinate {
            latitude,
            longitude,
        }
    }

    /// Returns `true` if both latitude and longitude are finite numbers.
    pub fn is_finite(&self) -> bool {
        self.latitude.is_finite() && self.longitude.is_finite()
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

/// A single position sample reported by the location provider.
///
/// Heading and speed are optional: a missing value means the sensor could not
/// provide it and is never the same as `0.0`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct GpsFix {
    pub coordinate: Coordinate,
    /// Compass bearing of travel in degrees clockwise from north, `[0, 360)`.
    pub heading: Option<f64>,
    /// Ground speed in meters per second.
    pub speed: Option<f64>,
    pub timestamp: DateTime<Utc>,
}

impl GpsFix {
    /// Creates a new [`GpsFix`].
    ///
    /// # Arguments
    ///
    /// * `coordinate` – Position of the fix.
    /// * `heading` – Heading in degrees, `None` if unknown.
    /// * `speed` – Speed in meters per second, `None` if unknown.
    /// * `timestamp` – Time the fix was taken.
    pub fn new(
        coordinate: Coordinate,
        heading: Option<f64>,
        speed: Option<f64>,
        timestamp: DateTime<Utc>,
    ) -> Self {
        GpsFix {
            coordinate,
            heading,
            speed,
            timestamp,
        }
    }

    /// Creates a [`GpsFix`] from the raw values of a platform location provider.
    ///
    /// Providers report an unavailable heading or speed as a negative number
    /// (usually `-1`), some also as `NaN`. Those are mapped to `None`. The heading
    /// is normalized into `[0, 360)`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use common::coordinate::{Coordinate, GpsFix};
    ///
    /// let fix = GpsFix::from_raw(Coordinate::new(30.13, -97.64), -1.0, 0.0, chrono::Utc::now());
    /// assert_eq!(fix.heading, None);
    /// assert_eq!(fix.speed, Some(0.0));
    /// ```
    pub fn from_raw(
        coordinate: Coordinate,
        raw_heading: f64,
        raw_speed: f64,
        timestamp: DateTime<Utc>,
    ) -> Self {
        let heading = known_value(raw_heading).map(|heading| heading.rem_euclid(360.0));
        GpsFix::new(coordinate, heading, known_value(raw_speed), timestamp)
    }

    pub fn latitude(&self) -> f64 {
        self.coordinate.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.coordinate.longitude
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

fn known_value(raw: f64) -> Option<f64> {
    if raw.is_finite() && raw >= 0.0 {
        Some(raw)
    } else {
        None
    }
}
