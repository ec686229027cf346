//! Executes routed inbound actions: one-shot visual stingers, UI mirror
//! updates and visual toggles. Every self-reverting effect goes through a
//! generation counter so a stale timer can never undo a newer trigger.

use std::cell::RefCell;
use std::rc::Rc;

use atmono_core::constants::{
    FLASH_HOLD_MS, GLOW_HOLD_MS, GRID_PANEL_COUNT, LIGHT_BANK_SIZE, PLANET_LIFETIME_MS,
    PLANET_VOLUME, SATELLITE_COUNT,
};
use atmono_core::{light_opacity, satellite_for_payload, Action, Actions};
use glam::Vec3;
use wasm_bindgen::JsCast;
use web_sys as web;

use crate::constants::BLINK_SELECTOR;
use crate::device::AudioDevice;
use crate::dom;
use crate::scene::SceneState;
use crate::scope::{self, Scope};
use crate::widgets::ControlSurface;

pub struct Effects {
    pub document: web::Document,
    pub scene: Rc<RefCell<SceneState>>,
    pub surface: Rc<ControlSurface>,
    pub scope: Rc<Option<Scope>>,
    pub device: Rc<RefCell<Option<AudioDevice>>>,
}

impl Effects {
    pub fn apply(&self, actions: &Actions) {
        for action in actions {
            self.apply_one(action);
        }
    }

    fn apply_one(&self, action: &Action) {
        match action {
            Action::SetChannel(channel, value) => {
                self.scene.borrow_mut().params.set_target(*channel, *value);
            }
            Action::SatelliteGlow(payload) => self.satellite_glow(*payload),
            Action::SpawnPlanet(payload) => self.spawn_planet(*payload),
            Action::RandomBlink(payload) => self.random_blink(*payload),
            Action::OutlineFlash(payload) => self.outline_flash(*payload),
            Action::MirrorKnob { index, value } => self.surface.mirror_knob(*index, *value),
            Action::MirrorButton { id, on } => self.surface.mirror_button(id, *on),
            Action::MirrorVolume(value) => self.surface.mirror_volume(*value),
            Action::MirrorPlaystat(value) => self.surface.mirror_playstat(*value),
            Action::SetGlitch(on) => self.scene.borrow_mut().glitch_enabled = *on,
            Action::SetLights { bank, index } => self.update_light_bank(bank, *index),
            Action::PullRecording => scope::schedule_recording_pull(self.device.clone()),
            Action::ScopeFrame => {
                if let Some(scope) = self.scope.as_ref() {
                    scope.redraw();
                }
            }
        }
    }

    fn satellite_glow(&self, payload: i64) {
        let index = match satellite_for_payload(payload, SATELLITE_COUNT) {
            Some(i) => i,
            None => return,
        };
        let generation = self.scene.borrow_mut().satellites[index].begin_glow();
        let scene = self.scene.clone();
        dom::set_timeout(GLOW_HOLD_MS, move || {
            scene.borrow_mut().satellites[index].restore_glow(generation);
        });
    }

    fn spawn_planet(&self, payload: i64) {
        if payload != 1 {
            return;
        }
        let half = PLANET_VOLUME * 0.5;
        let coord = || (js_sys::Math::random() as f32 * 2.0 - 1.0) * half;
        let position = Vec3::new(coord(), coord(), coord());
        let id = self.scene.borrow_mut().spawn_planet(position);
        let scene = self.scene.clone();
        dom::set_timeout(PLANET_LIFETIME_MS, move || {
            scene.borrow_mut().remove_planet(id);
        });
    }

    fn random_blink(&self, payload: i64) {
        let nodes = match self.document.query_selector_all(BLINK_SELECTOR) {
            Ok(n) => n,
            Err(_) => return,
        };
        for i in 0..nodes.length() {
            let el = match nodes
                .item(i)
                .and_then(|n| n.dyn_into::<web::HtmlElement>().ok())
            {
                Some(el) => el,
                None => continue,
            };
            let visible = payload == 1 && js_sys::Math::random() < 0.5;
            dom::set_opacity(&el, if visible { 1.0 } else { 0.0 });
        }
    }

    fn outline_flash(&self, payload: i64) {
        if payload != 1 {
            return;
        }
        let index = (js_sys::Math::random() * GRID_PANEL_COUNT as f64) as usize;
        let generation = self.scene.borrow_mut().begin_flash(index);
        let scene = self.scene.clone();
        dom::set_timeout(FLASH_HOLD_MS, move || {
            scene.borrow_mut().end_flash(generation);
        });
    }

    /// Illuminates exactly the 1-based `index` element of the bank and
    /// makes the rest fully transparent; index 0 darkens all.
    fn update_light_bank(&self, bank: &str, index: i64) {
        for i in 1..=LIGHT_BANK_SIZE {
            let id = format!("{}-{}", bank, i);
            if let Some(el) = dom::html_element(&self.document, &id) {
                dom::set_opacity(&el, light_opacity(index, i));
            }
        }
    }
}
