// SPDX-FileCopyrightText: 2025 All contributors
//
// SPDX-License-Identifier: GPL-2.0-or-later

use common::coordinate::Coordinate;

/// Mean earth radius of the spherical earth model in meters.
pub const EARTH_RADIUS_METERS: f64 = 6_371_000.0;

/// Calculates the great circle distance in meters between two coordinates.
///
/// Uses the haversine formula on a spherical earth with
/// [`EARTH_RADIUS_METERS`]. The result is symmetric and `0.0` for equal
/// coordinates.
///
/// # Example
///
/// ```rust
/// use algorithm::geo_math::distance;
/// use common::coordinate::Coordinate;
///
/// let a = Coordinate::new(30.1325735, -97.6408249);
/// assert_eq!(distance(&a, &a), 0.0);
/// ```
pub fn distance(a: &Coordinate, b: &Coordinate) -> f64 {
    let lat1 = a.latitude.to_radians();
    let lat2 = b.latitude.to_radians();
    let delta_lat = (b.latitude - a.latitude).to_radians();
    let delta_lon = (b.longitude - a.longitude).to_radians();

    let h = (delta_lat / 2.0).sin().powi(2)
        + lat1.cos() * lat2.cos() * (delta_lon / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    EARTH_RADIUS_METERS * c
}

/// Calculates the coordinate reached by traveling `distance_meters` from
/// `origin` along the great circle starting with `bearing_degrees`.
///
/// The returned longitude is normalized into `[-180, 180)`.
pub fn destination(origin: &Coordinate, bearing_degrees: f64, distance_meters: f64) -> Coordinate {
    let angular_distance = distance_meters / EARTH_RADIUS_METERS;
    let bearing = bearing_degrees.to_radians();
    let lat1 = origin.latitude.to_radians();
    let lon1 = origin.longitude.to_radians();

    let lat2 = (lat1.sin() * angular_distance.cos()
        + lat1.cos() * angular_distance.sin() * bearing.cos())
    .asin();
    let lon2 = lon1
        + (bearing.sin() * angular_distance.sin() * lat1.cos())
            .atan2(angular_distance.cos() - lat1.sin() * lat2.sin());

    Coordinate::new(
        lat2.to_degrees(),
        (lon2.to_degrees() + 540.0).rem_euclid(360.0) - 180.0,
    )
}

/// Returns the initial great circle bearing from `a` to `b` in degrees `[0, 360)`.
pub fn bearing(a: &Coordinate, b: &Coordinate) -> f64 {
    let lat1 = a.latitude.to_radians();
    let lat2 = b.latitude.to_radians();
    let delta_lon = (b.longitude - a.longitude).to_radians();

    let y = delta_lon.sin() * lat2.cos();
    let x = lat1.cos() * lat2.sin() - lat1.sin() * lat2.cos() * delta_lon.cos();

    y.atan2(x).to_degrees().rem_euclid(360.0)
}

/// Returns the smallest angle in degrees `[0, 180]` between two compass headings.
///
/// Wraps around north, so `350°` and `10°` are `20°` apart.
pub fn heading_delta(a: f64, b: f64) -> f64 {
    let delta = (a - b).rem_euclid(360.0);
    delta.min(360.0 - delta)
}

/// Projects `point` onto a local plane around `origin`.
///
/// Returns the `(east, north)` offset in meters using an equirectangular
/// approximation, which is only suitable for short distances like the few
/// hundred meters around a geofence.
pub fn local_offset(origin: &Coordinate, point: &Coordinate) -> (f64, f64) {
    let mean_lat = ((origin.latitude + point.latitude) / 2.0).to_radians();
    let east = (point.longitude - origin.longitude).to_radians() * mean_lat.cos() * EARTH_RADIUS_METERS;
    let north = (point.latitude - origin.latitude).to_radians() * EARTH_RADIUS_METERS;
    (east, north)
}
