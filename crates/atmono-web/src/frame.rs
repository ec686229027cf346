//! Per-frame driver: measures real frame delta, advances the scene and
//! hands the composed frame to the renderer.

use std::cell::RefCell;
use std::rc::Rc;

use atmono_core::constants::{
    CAMERA_SWAY_AMPLITUDE, CAMERA_SWAY_RATE, CAMERA_YAW_AMPLITUDE, CAMERA_YAW_RATE, CAMERA_Z,
    GRID_PANEL_COUNT,
};
use atmono_core::Channel;
use glam::Vec3;
use instant::Instant;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

use crate::constants::{FLASH_SCALE, PLANET_SCALE, SATELLITE_SCALE};
use crate::render::{FrameView, GpuState, SpriteInstance};
use crate::scene::SceneState;

pub struct FrameContext<'a> {
    pub scene: Rc<RefCell<SceneState>>,
    pub canvas: web::HtmlCanvasElement,
    pub gpu: GpuState<'a>,
    pub last_instant: Instant,
}

impl<'a> FrameContext<'a> {
    pub fn frame(&mut self) {
        let now = Instant::now();
        let dt = (now - self.last_instant).as_secs_f32();
        self.last_instant = now;

        let mut scene = self.scene.borrow_mut();
        // Orbits integrate the measured delta; a dropped frame must not
        // slow the satellites down.
        scene.advance(dt);
        let time = scene.time;

        let eye = Vec3::new(
            (time * CAMERA_SWAY_RATE).sin() * CAMERA_SWAY_AMPLITUDE,
            0.0,
            CAMERA_Z,
        );
        let target = Vec3::new(
            (time * CAMERA_YAW_RATE).sin() * CAMERA_YAW_AMPLITUDE,
            0.0,
            0.0,
        );

        let mut sprites = Vec::with_capacity(scene.satellites.len() + scene.planets.len() + 1);
        for sat in &scene.satellites {
            sprites.push(SpriteInstance {
                pos: sat.position(Vec3::ZERO).to_array(),
                scale: SATELLITE_SCALE,
                color: [0.65, 0.8, 1.0, sat.emissive],
            });
        }
        for planet in &scene.planets {
            sprites.push(SpriteInstance {
                pos: planet.position.to_array(),
                scale: PLANET_SCALE,
                color: [1.0, 0.7, 0.35, 1.2],
            });
        }
        if let Some(index) = scene.flash_index {
            sprites.push(SpriteInstance {
                pos: panel_position(index).to_array(),
                scale: FLASH_SCALE,
                color: [1.0, 1.0, 1.0, 2.0],
            });
        }

        let view = FrameView {
            eye,
            target,
            bloom_strength: scene.params.current(Channel::BloomStrength),
            bloom_radius: scene.params.current(Channel::BloomRadius),
            glitch: scene.glitch_enabled,
            time,
        };

        let w = self.canvas.width();
        let h = self.canvas.height();
        self.gpu.resize_if_needed(w, h);
        if let Err(e) = self.gpu.render(&scene.deformed, &sprites, &view) {
            log::error!("render error: {:?}", e);
        }
    }
}

/// Fixed pool positions for the outline-flash panels, spread in a row
/// behind the sphere.
fn panel_position(index: usize) -> Vec3 {
    let i = index.min(GRID_PANEL_COUNT - 1) as f32;
    let half = (GRID_PANEL_COUNT - 1) as f32 * 0.5;
    Vec3::new((i - half) * 1.6, -2.4, -1.0)
}

pub async fn init_gpu(
    canvas: &web::HtmlCanvasElement,
    scene: &Rc<RefCell<SceneState>>,
) -> Option<GpuState<'static>> {
    // Copy the geometry out before the adapter/device awaits; the device
    // setup task may need to borrow the scene while those are in flight.
    let (vertices, indices, stars) = {
        let s = scene.borrow();
        (s.deformed.clone(), s.wire_indices.clone(), s.stars.clone())
    };
    // leak a canvas clone to satisfy 'static lifetime for surface
    let leaked_canvas = Box::leak(Box::new(canvas.clone()));
    match GpuState::new(leaked_canvas, &vertices, &indices, &stars).await {
        Ok(g) => Some(g),
        Err(e) => {
            log::error!("WebGPU init error: {:?}", e);
            None
        }
    }
}

pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext<'static>>>) {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    let frame_ctx_tick = frame_ctx.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        frame_ctx_tick.borrow_mut().frame();
        if let Some(w) = web::window() {
            let _ = w.request_animation_frame(
                tick_clone
                    .borrow()
                    .as_ref()
                    .unwrap()
                    .as_ref()
                    .unchecked_ref(),
            );
        }
    }) as Box<dyn FnMut()>));
    if let Some(w) = web::window() {
        let _ = w.request_animation_frame(tick.borrow().as_ref().unwrap().as_ref().unchecked_ref());
    }
}
