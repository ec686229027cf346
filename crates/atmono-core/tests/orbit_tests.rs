use atmono_core::constants::{SATELLITE_COUNT, SATELLITE_EMISSIVE_BASE, SATELLITE_EMISSIVE_GLOW};
use atmono_core::{build_ring, satellite_for_payload};
use glam::Vec3;

#[test]
fn ring_is_reproducible_from_the_seed() {
    let a = build_ring(SATELLITE_COUNT, 42);
    let b = build_ring(SATELLITE_COUNT, 42);
    assert_eq!(a.len(), SATELLITE_COUNT);
    for (x, y) in a.iter().zip(&b) {
        assert_eq!(x.angle, y.angle);
        assert_eq!(x.orbit_radius, y.orbit_radius);
        assert_eq!(x.orbit_speed, y.orbit_speed);
        assert_eq!(x.inclination, y.inclination);
    }
}

#[test]
fn position_is_derived_and_at_orbit_radius() {
    let ring = build_ring(SATELLITE_COUNT, 7);
    let center = Vec3::new(1.0, -2.0, 3.0);
    for sat in &ring {
        let d = (sat.position(center) - center).length();
        assert!(
            (d - sat.orbit_radius).abs() < 1e-4,
            "satellite must stay on its orbit sphere"
        );
    }
}

#[test]
fn angle_integration_is_linear_in_dt() {
    let mut once = build_ring(1, 1).remove(0);
    let mut twice = once.clone();

    once.advance(0.2);
    twice.advance(0.1);
    twice.advance(0.1);

    assert!((once.angle - twice.angle).abs() < 1e-6);
    let pos_a = once.position(Vec3::ZERO);
    let pos_b = twice.position(Vec3::ZERO);
    assert!((pos_a - pos_b).length() < 1e-5);
}

#[test]
fn payload_selection_rejects_out_of_range() {
    assert_eq!(satellite_for_payload(0, SATELLITE_COUNT), None);
    assert_eq!(satellite_for_payload(-3, SATELLITE_COUNT), None);
    assert_eq!(
        satellite_for_payload(SATELLITE_COUNT as i64 + 1, SATELLITE_COUNT),
        None
    );
    assert_eq!(satellite_for_payload(1, SATELLITE_COUNT), Some(0));
    assert_eq!(
        satellite_for_payload(SATELLITE_COUNT as i64, SATELLITE_COUNT),
        Some(SATELLITE_COUNT - 1)
    );
}

#[test]
fn glow_restores_only_for_the_latest_generation() {
    let mut sat = build_ring(1, 9).remove(0);
    assert_eq!(sat.emissive, SATELLITE_EMISSIVE_BASE);

    let first = sat.begin_glow();
    assert_eq!(sat.emissive, SATELLITE_EMISSIVE_GLOW);

    // A second trigger lands before the first revert fires.
    let second = sat.begin_glow();

    // The stale timer must not restore while a newer glow is active.
    sat.restore_glow(first);
    assert_eq!(sat.emissive, SATELLITE_EMISSIVE_GLOW);

    sat.restore_glow(second);
    assert_eq!(sat.emissive, SATELLITE_EMISSIVE_BASE);
}
