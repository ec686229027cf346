use atmono_core::morph::{displace, sphere_vertices, sphere_wire_indices};
use glam::Vec3;

#[test]
fn displacement_is_a_pure_function_of_its_inputs() {
    let rest = Vec3::new(0.4, -1.1, 0.7);
    let a = displace(rest, 3.2, 4.0, 0.1, 0.3);
    let b = displace(rest, 3.2, 4.0, 0.1, 0.3);
    assert_eq!(a, b, "no hidden mutable accumulation");
}

#[test]
fn zero_parameters_leave_every_vertex_at_rest() {
    for rest in sphere_vertices(1.5, 16, 8) {
        for t in [0.0_f32, 1.0, 17.3, 1000.0] {
            let p = displace(rest, t, 0.0, 0.0, 0.0);
            assert_eq!(p, rest);
        }
    }
}

#[test]
fn displacement_is_radial_from_the_rest_position() {
    // rest + rest * k keeps the vertex on its own radial line
    let rest = Vec3::new(1.0, 0.5, -0.25);
    let p = displace(rest, 2.0, 4.0, 0.1, 0.3);
    let cross = rest.cross(p);
    assert!(cross.length() < 1e-5, "displaced point left the radial line");
}

#[test]
fn sphere_vertices_sit_on_the_sphere() {
    let radius = 1.5;
    for v in sphere_vertices(radius, 24, 12) {
        assert!((v.length() - radius).abs() < 1e-4);
    }
}

#[test]
fn wire_indices_stay_in_bounds() {
    let segments = 24;
    let rings = 12;
    let verts = sphere_vertices(1.0, segments, rings);
    let idx = sphere_wire_indices(segments, rings);
    assert!(!idx.is_empty());
    assert_eq!(idx.len() % 2, 0, "line list needs index pairs");
    for i in idx {
        assert!((i as usize) < verts.len());
    }
}
