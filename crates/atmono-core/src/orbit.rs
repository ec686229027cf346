//! Orbital state for the satellites circling the morph sphere.
//!
//! Positions are derived, never stored: each frame recomputes the Cartesian
//! position from `(angle, inclination, orbit_radius)` relative to the center,
//! so orbital motion cannot drift. Angles integrate measured frame time.

use crate::constants::*;
use glam::Vec3;
use rand::prelude::*;

#[derive(Clone, Debug)]
pub struct Satellite {
    pub angle: f32,
    pub inclination: f32,
    pub orbit_radius: f32,
    pub orbit_speed: f32,
    pub self_rotation_speed: f32,
    pub spin: f32,
    /// Base emissive intensity, restored after glow triggers.
    pub emissive_base: f32,
    /// Live emissive intensity read by the renderer.
    pub emissive: f32,
    /// Bumped on every glow trigger; only the timer carrying the latest
    /// generation is allowed to restore `emissive`, so overlapping triggers
    /// cannot clobber each other's revert.
    pub glow_generation: u32,
}

impl Satellite {
    pub fn advance(&mut self, dt_sec: f32) {
        self.angle += self.orbit_speed * dt_sec;
        self.spin += self.self_rotation_speed * dt_sec;
    }

    /// Cartesian position on the inclined orbit, relative to `center`.
    pub fn position(&self, center: Vec3) -> Vec3 {
        let (sin_a, cos_a) = self.angle.sin_cos();
        center
            + Vec3::new(
                cos_a * self.orbit_radius,
                sin_a * self.orbit_radius * self.inclination.sin(),
                sin_a * self.orbit_radius * self.inclination.cos(),
            )
    }

    /// Elevate the emissive intensity and return the generation token the
    /// caller's revert timer must present to [`Satellite::restore_glow`].
    pub fn begin_glow(&mut self) -> u32 {
        self.glow_generation = self.glow_generation.wrapping_add(1);
        self.emissive = SATELLITE_EMISSIVE_GLOW;
        self.glow_generation
    }

    /// Restore the base intensity iff `generation` is still the latest.
    pub fn restore_glow(&mut self, generation: u32) {
        if self.glow_generation == generation {
            self.emissive = self.emissive_base;
        }
    }
}

/// Build the fixed satellite ring from a seed. Per-satellite parameters are
/// derived from independent draws so the ring looks irregular but is
/// reproducible across reloads.
pub fn build_ring(count: usize, seed: u64) -> Vec<Satellite> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count)
        .map(|i| {
            let angle = i as f32 / count as f32 * std::f32::consts::TAU;
            Satellite {
                angle,
                inclination: rng.gen_range(-SATELLITE_INCLINATION_MAX..SATELLITE_INCLINATION_MAX),
                orbit_radius: rng.gen_range(ORBIT_RADIUS_MIN..ORBIT_RADIUS_MAX),
                orbit_speed: rng.gen_range(ORBIT_SPEED_MIN..ORBIT_SPEED_MAX),
                self_rotation_speed: rng.gen_range(0.5..2.0),
                spin: 0.0,
                emissive_base: SATELLITE_EMISSIVE_BASE,
                emissive: SATELLITE_EMISSIVE_BASE,
                glow_generation: 0,
            }
        })
        .collect()
}

/// Map a 1-based `planetlight` payload onto a satellite index.
/// Out-of-range payloads (0, negative, > count) are no-ops.
#[inline]
pub fn satellite_for_payload(payload: i64, count: usize) -> Option<usize> {
    (1..=count as i64).contains(&payload).then(|| (payload - 1) as usize)
}
