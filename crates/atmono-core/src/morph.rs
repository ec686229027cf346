//! Radial displacement of the morph sphere.
//!
//! Displacement is a pure function of the immutable rest position and the
//! current smoothed parameters; it is recomputed from the rest pose every
//! frame, so there is no accumulation or drift.

use glam::Vec3;

/// Offset factor blending the primary sinusoid with a secondary noise-phase
/// sinusoid. With `intensity == 0` the vertex stays at its rest position.
#[inline]
pub fn displacement_offset(rest: Vec3, time: f32, frequency: f32, noise: f32) -> f32 {
    let sin_offset = (time + (rest.x + rest.y + rest.z) * frequency).sin();
    let noise_offset = noise * (time * 0.5 + (rest.x - rest.y + rest.z)).sin();
    sin_offset + noise_offset
}

/// Displaced vertex position, radial from the rest position.
#[inline]
pub fn displace(rest: Vec3, time: f32, frequency: f32, noise: f32, intensity: f32) -> Vec3 {
    rest + rest * (displacement_offset(rest, time, frequency, noise) * intensity)
}

/// Tessellate a lat-long sphere; returns rest positions ring-major.
/// Poles are included as full rings so the wireframe index helper below can
/// treat the grid uniformly.
pub fn sphere_vertices(radius: f32, segments: usize, rings: usize) -> Vec<Vec3> {
    let mut verts = Vec::with_capacity((rings + 1) * (segments + 1));
    for r in 0..=rings {
        let phi = std::f32::consts::PI * r as f32 / rings as f32;
        let (sin_phi, cos_phi) = phi.sin_cos();
        for s in 0..=segments {
            let theta = std::f32::consts::TAU * s as f32 / segments as f32;
            let (sin_theta, cos_theta) = theta.sin_cos();
            verts.push(Vec3::new(
                radius * sin_phi * cos_theta,
                radius * cos_phi,
                radius * sin_phi * sin_theta,
            ));
        }
    }
    verts
}

/// Line-list indices for a wireframe over the lat-long grid produced by
/// [`sphere_vertices`]: one segment along each parallel and each meridian.
pub fn sphere_wire_indices(segments: usize, rings: usize) -> Vec<u32> {
    let stride = (segments + 1) as u32;
    let mut idx = Vec::new();
    for r in 0..=rings as u32 {
        for s in 0..segments as u32 {
            idx.push(r * stride + s);
            idx.push(r * stride + s + 1);
        }
    }
    for r in 0..rings as u32 {
        for s in 0..=segments as u32 {
            idx.push(r * stride + s);
            idx.push((r + 1) * stride + s);
        }
    }
    idx
}
