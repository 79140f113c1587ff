use crate::geofence::*;
use common::coordinate::GpsFix;
use common::geofence::{Containment, DEGREES_PER_METER, Geofence, GeofenceError};
use common::test_helper::course::{START, base_time, fix_at};

fn start_fence() -> Geofence {
    Geofence::new(START, 10.0).unwrap()
}

#[test]
fn radius_is_converted_to_degrees() {
    let fence = start_fence();
    assert_eq!(fence.radius_meters(), 10.0);
    assert!((fence.radius_degrees() - 10.0 * 0.0001 / 11.1).abs() < 1e-15);
    assert_eq!(fence.radius_degrees(), 10.0 * DEGREES_PER_METER);
}

#[test]
fn reject_invalid_radius() {
    assert_eq!(
        Geofence::new(START, 0.0),
        Err(GeofenceError::InvalidRadius(0.0))
    );
    assert_eq!(
        Geofence::new(START, -5.0),
        Err(GeofenceError::InvalidRadius(-5.0))
    );
    assert!(Geofence::new(START, f64::NAN).is_err());
    assert!(Geofence::new(START, f64::INFINITY).is_err());
}

#[test]
fn center_is_contained() {
    let fence = start_fence();
    let fix = GpsFix::new(START, None, None, base_time());
    assert!(contains(&fix, &fence));
    assert!(contains_radial(&fix, &fence));
}

#[test]
fn fix_far_away_is_not_contained() {
    let fence = start_fence();
    let fix = fix_at(200.0, 0.0, None, None, 0);
    assert!(!contains(&fix, &fence));
    assert!(!contains_radial(&fix, &fence));
}

#[test]
fn bounding_box_includes_corners_outside_the_radius() {
    let fence = start_fence();
    let corner = fix_at(8.0, 7.0, None, None, 0);
    assert!(contains(&corner, &fence));
    assert!(!contains_radial(&corner, &fence));
    assert!(is_inside(&corner, &fence, Containment::BoundingBox));
    assert!(!is_inside(&corner, &fence, Containment::Radial));
}

#[test]
fn bounding_box_bounds_are_exclusive() {
    let fence = start_fence();
    let mut fix = GpsFix::new(START, None, None, base_time());
    fix.coordinate.latitude += fence.radius_degrees();
    assert!(!contains(&fix, &fence));
}
