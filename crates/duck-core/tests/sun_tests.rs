// Host-side tests for the sun direction math.

use duck_core::*;
use glam::Vec3;

#[test]
fn sun_direction_is_unit_length_over_full_range() {
    let mut elevation = 0.0_f32;
    while elevation <= 90.0 {
        let mut azimuth = -180.0_f32;
        while azimuth <= 180.0 {
            let d = sun_direction(elevation, azimuth);
            assert!(
                (d.length() - 1.0).abs() < 1e-5,
                "not unit at elevation {elevation} azimuth {azimuth}: {d:?}"
            );
            azimuth += 7.5;
        }
        elevation += 2.5;
    }
}

#[test]
fn sun_direction_known_points() {
    // zenith
    let up = sun_direction(90.0, 0.0);
    assert!((up - Vec3::Y).length() < 1e-5);

    // on the horizon, azimuth 0 points down +Z, 90 down +X
    let south = sun_direction(0.0, 0.0);
    assert!((south - Vec3::Z).length() < 1e-5);
    let east = sun_direction(0.0, 90.0);
    assert!((east - Vec3::X).length() < 1e-5);
}

#[test]
fn default_sun_sits_low_behind_negative_z() {
    let d = sun_direction(DEFAULT_ELEVATION_DEG, DEFAULT_AZIMUTH_DEG);
    assert!(d.y > 0.0 && d.y < 0.05, "elevation 2 deg should be barely above horizon");
    assert!(d.z < -0.99);
    assert!(d.x.abs() < 1e-4);
}

#[test]
fn elevation_matches_vertical_component() {
    for e in [0.0_f32, 15.0, 30.0, 45.0, 60.0, 89.0] {
        let d = sun_direction(e, 33.0);
        assert!((d.y - e.to_radians().sin()).abs() < 1e-5);
    }
}

#[test]
fn tracker_is_idempotent_for_unchanged_inputs() {
    let mut tracker = SunTracker::new(2.0, 180.0);
    let first = tracker.direction();
    let again = tracker.update(2.0, 180.0);
    assert_eq!(first, again);
    let moved = tracker.update(45.0, 180.0);
    assert_ne!(first, moved);
    assert_eq!(tracker.update(45.0, 180.0), moved);
}
