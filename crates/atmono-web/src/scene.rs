//! CPU-side scene state: the deformable wire sphere, its satellites,
//! ephemeral planets and the outline-flash pool. The renderer consumes
//! this every frame; inbound events and timers mutate it in between.

use atmono_core::constants::{
    GRID_PANEL_COUNT, MESH_ROTATION_STEP, SATELLITE_COUNT, SPHERE_RADIUS, SPHERE_RINGS,
    SPHERE_SEGMENTS, STAR_COUNT, STAR_VOLUME,
};
use atmono_core::morph::{displace, sphere_vertices, sphere_wire_indices};
use atmono_core::{build_ring, Channel, Satellite, SmoothedParams};
use glam::{Mat3, Vec3};

use crate::constants::RING_SEED;

pub struct Planet {
    pub id: u64,
    pub position: Vec3,
}

pub struct SceneState {
    pub rest_vertices: Vec<Vec3>,
    pub deformed: Vec<Vec3>,
    pub wire_indices: Vec<u32>,
    pub rotation_x: f32,
    pub rotation_y: f32,

    pub satellites: Vec<Satellite>,
    pub planets: Vec<Planet>,
    next_planet_id: u64,

    pub stars: Vec<Vec3>,

    pub glitch_enabled: bool,
    pub flash_index: Option<usize>,
    flash_generation: u32,

    pub params: SmoothedParams,
    pub time: f32,
}

impl SceneState {
    pub fn new() -> Self {
        let rest_vertices = sphere_vertices(SPHERE_RADIUS, SPHERE_SEGMENTS, SPHERE_RINGS);
        let deformed = rest_vertices.clone();
        let wire_indices = sphere_wire_indices(SPHERE_SEGMENTS, SPHERE_RINGS);

        Self {
            rest_vertices,
            deformed,
            wire_indices,
            rotation_x: 0.0,
            rotation_y: 0.0,
            satellites: build_ring(SATELLITE_COUNT, RING_SEED),
            planets: Vec::new(),
            next_planet_id: 0,
            stars: scatter_stars(STAR_COUNT, RING_SEED ^ 0x5f5f),
            glitch_enabled: false,
            flash_index: None,
            flash_generation: 0,
            params: SmoothedParams::default(),
            time: 0.0,
        }
    }

    /// Per-frame advance: smooth parameters, recompute the deformed mesh
    /// from the rest pose, step rotation and orbits.
    pub fn advance(&mut self, dt: f32) {
        self.time += dt;
        self.params.advance();

        let intensity = self.params.current(Channel::MorphIntensity);
        let frequency = self.params.current(Channel::MorphFrequency);
        let noise = self.params.current(Channel::NoiseFactor);

        // Displacement is always from the rest pose, so it never drifts.
        let rot = Mat3::from_rotation_y(self.rotation_y) * Mat3::from_rotation_x(self.rotation_x);
        for (out, rest) in self.deformed.iter_mut().zip(&self.rest_vertices) {
            *out = rot * displace(*rest, self.time, frequency, noise, intensity);
        }

        self.rotation_x += MESH_ROTATION_STEP;
        self.rotation_y += MESH_ROTATION_STEP;

        for sat in &mut self.satellites {
            sat.advance(dt);
        }
    }

    pub fn spawn_planet(&mut self, position: Vec3) -> u64 {
        let id = self.next_planet_id;
        self.next_planet_id += 1;
        self.planets.push(Planet { id, position });
        id
    }

    pub fn remove_planet(&mut self, id: u64) {
        self.planets.retain(|p| p.id != id);
    }

    pub fn begin_flash(&mut self, index: usize) -> u32 {
        self.flash_generation = self.flash_generation.wrapping_add(1);
        self.flash_index = Some(index.min(GRID_PANEL_COUNT - 1));
        self.flash_generation
    }

    /// Clears the flash only if no newer one replaced it.
    pub fn end_flash(&mut self, generation: u32) {
        if self.flash_generation == generation {
            self.flash_index = None;
        }
    }
}

fn scatter_stars(count: usize, seed: u64) -> Vec<Vec3> {
    use rand::{Rng, SeedableRng};
    let mut rng = rand::rngs::StdRng::seed_from_u64(seed);
    let half = STAR_VOLUME * 0.5;
    (0..count)
        .map(|_| {
            Vec3::new(
                rng.gen_range(-half..half),
                rng.gen_range(-half..half),
                rng.gen_range(-half..half),
            )
        })
        .collect()
}
