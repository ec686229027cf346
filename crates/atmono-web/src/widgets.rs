//! Pointer-controlled DOM widgets: rotary knobs, linear faders and toggle
//! buttons. Each widget owns an explicit [`ControlState`]; the DOM is a
//! pure render target and is never read back for values.

use std::cell::RefCell;
use std::rc::Rc;

use atmono_core::constants::INITIAL_VOLUME;
use atmono_core::{
    fader_travel_px, rotary_degrees, thumb_offset_px, ControlState, Dispatcher,
};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

use crate::constants::{
    BUTTON_IDS, KNOB_IDS, PLAYSTAT_THUMB_ID, PLAYSTAT_TRACK_ID, VOLUME_THUMB_ID, VOLUME_TRACK_ID,
};
use crate::device::AudioDevice;
use crate::dom;

/// Outbound side of the device boundary: widget values go through the
/// dispatcher, which queues them until the device is attached.
#[derive(Clone)]
pub struct Outbound {
    dispatcher: Rc<RefCell<Dispatcher>>,
    device: Rc<RefCell<Option<AudioDevice>>>,
}

impl Outbound {
    pub fn new() -> Self {
        Self {
            dispatcher: Rc::new(RefCell::new(Dispatcher::new())),
            device: Rc::new(RefCell::new(None)),
        }
    }

    /// Shared handle used by code that talks to the device directly
    /// (recording pulls) rather than through parameter writes.
    pub fn device_handle(&self) -> Rc<RefCell<Option<AudioDevice>>> {
        self.device.clone()
    }

    pub fn send(&self, id: &str, value: f64) {
        let device = self.device.borrow();
        self.dispatcher.borrow_mut().send(device.as_ref(), id, value);
    }

    /// Makes the device visible to subsequent sends and flushes everything
    /// queued while it was absent. Called exactly once.
    pub fn attach_device(&self, device: AudioDevice) {
        *self.device.borrow_mut() = Some(device);
        let guard = self.device.borrow();
        if let Some(d) = guard.as_ref() {
            self.dispatcher.borrow_mut().flush_pending(d);
        }
    }
}

pub struct Knob {
    pub el: web::HtmlElement,
    pub state: Rc<RefCell<ControlState>>,
}

pub struct Fader {
    pub track: web::HtmlElement,
    pub thumb: web::HtmlElement,
    pub state: Rc<RefCell<ControlState>>,
    pub vertical: bool,
}

pub struct Toggle {
    pub el: web::HtmlElement,
    pub state: Rc<RefCell<ControlState>>,
}

/// Handles to every wired widget, kept so inbound mirror events can update
/// visuals without touching drag sessions.
pub struct ControlSurface {
    pub knobs: Vec<Option<Knob>>,
    pub buttons: Vec<(String, Toggle)>,
    pub volume: Option<Fader>,
    pub playstat: Option<Fader>,
}

impl ControlSurface {
    pub fn mirror_knob(&self, index: usize, value: f32) {
        if let Some(Some(knob)) = self.knobs.get(index) {
            knob.state.borrow_mut().set_mirrored(value);
            dom::set_rotation(&knob.el, rotary_degrees(value));
        }
    }

    pub fn mirror_button(&self, id: &str, on: bool) {
        if let Some((_, toggle)) = self.buttons.iter().find(|(bid, _)| bid == id) {
            toggle
                .state
                .borrow_mut()
                .set_mirrored(if on { 1.0 } else { 0.0 });
            dom::set_opacity(&toggle.el, if on { 1.0 } else { 0.0 });
        }
    }

    pub fn mirror_volume(&self, value: f32) {
        if let Some(f) = &self.volume {
            mirror_fader(f, value);
        }
    }

    pub fn mirror_playstat(&self, value: f32) {
        if let Some(f) = &self.playstat {
            mirror_fader(f, value);
        }
    }

    pub fn rec_is_on(&self) -> bool {
        self.buttons
            .iter()
            .find(|(id, _)| id == "rec")
            .map(|(_, t)| t.state.borrow().value >= 0.5)
            .unwrap_or(false)
    }
}

fn mirror_fader(fader: &Fader, value: f32) {
    fader.state.borrow_mut().set_mirrored(value);
    position_thumb(fader, value);
}

fn fader_travel(fader: &Fader) -> f32 {
    if fader.vertical {
        fader_travel_px(
            fader.track.offset_height() as f32,
            fader.thumb.offset_height() as f32,
        )
    } else {
        fader_travel_px(
            fader.track.offset_width() as f32,
            fader.thumb.offset_width() as f32,
        )
    }
}

fn position_thumb(fader: &Fader, value: f32) {
    let offset = thumb_offset_px(value, fader_travel(fader));
    let property = if fader.vertical { "top" } else { "left" };
    dom::set_offset_px(&fader.thumb, property, offset);
}

/// Wires every control it can find. Missing elements get a warning and
/// are skipped; the rest of the surface still comes up.
pub fn wire_controls(document: &web::Document, outbound: &Outbound) -> ControlSurface {
    let knobs = KNOB_IDS
        .iter()
        .map(|id| wire_knob(document, id, outbound))
        .collect();

    let mut buttons = Vec::new();
    for id in BUTTON_IDS {
        if let Some(toggle) = wire_toggle(document, id, outbound) {
            buttons.push((id.to_string(), toggle));
        }
    }

    let volume = wire_fader(
        document,
        VOLUME_TRACK_ID,
        VOLUME_THUMB_ID,
        "vol",
        false,
        outbound,
    );
    if let Some(f) = &volume {
        // Startup default; queued by the dispatcher if the device is not
        // up yet.
        mirror_fader(f, INITIAL_VOLUME as f32);
        outbound.send("vol", INITIAL_VOLUME);
    }
    let playstat = wire_fader(
        document,
        PLAYSTAT_TRACK_ID,
        PLAYSTAT_THUMB_ID,
        "playstat",
        true,
        outbound,
    );

    ControlSurface {
        knobs,
        buttons,
        volume,
        playstat,
    }
}

fn wire_knob(document: &web::Document, control_id: &str, outbound: &Outbound) -> Option<Knob> {
    let element_id = format!("slider-{}", control_id);
    let el = match dom::html_element(document, &element_id) {
        Some(el) => el,
        None => {
            log::warn!("knob element #{} not found, skipping", element_id);
            return None;
        }
    };
    let state = Rc::new(RefCell::new(ControlState::with_value(0.0)));

    {
        let state = state.clone();
        let target = el.clone();
        let closure = Closure::wrap(Box::new(move |ev: web::PointerEvent| {
            let _ = target.set_pointer_capture(ev.pointer_id());
            state
                .borrow_mut()
                .begin_drag(ev.client_x() as f32, ev.client_y() as f32);
            ev.prevent_default();
        }) as Box<dyn FnMut(_)>);
        let _ = el.add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref());
        closure.forget();
    }
    {
        let state = state.clone();
        let visual = el.clone();
        let outbound = outbound.clone();
        let id = control_id.to_string();
        let closure = Closure::wrap(Box::new(move |ev: web::PointerEvent| {
            let updated = state
                .borrow_mut()
                .drag_rotary(ev.client_x() as f32, ev.client_y() as f32);
            if let Some(v) = updated {
                dom::set_rotation(&visual, rotary_degrees(v));
                outbound.send(&id, v as f64);
            }
        }) as Box<dyn FnMut(_)>);
        let _ = el.add_event_listener_with_callback("pointermove", closure.as_ref().unchecked_ref());
        closure.forget();
    }
    for end_event in ["pointerup", "pointercancel"] {
        let state = state.clone();
        let target = el.clone();
        let closure = Closure::wrap(Box::new(move |ev: web::PointerEvent| {
            let _ = target.release_pointer_capture(ev.pointer_id());
            state.borrow_mut().end_drag();
        }) as Box<dyn FnMut(_)>);
        let _ = el.add_event_listener_with_callback(end_event, closure.as_ref().unchecked_ref());
        closure.forget();
    }

    Some(Knob { el, state })
}

fn wire_fader(
    document: &web::Document,
    track_id: &str,
    thumb_id: &str,
    control_id: &str,
    vertical: bool,
    outbound: &Outbound,
) -> Option<Fader> {
    let track = dom::html_element(document, track_id);
    let thumb = dom::html_element(document, thumb_id);
    let (track, thumb) = match (track, thumb) {
        (Some(track), Some(thumb)) => (track, thumb),
        _ => {
            log::warn!("fader {}/{} not found, skipping", track_id, thumb_id);
            return None;
        }
    };
    let state = Rc::new(RefCell::new(ControlState::with_value(0.0)));
    let fader = Fader {
        track,
        thumb,
        state,
        vertical,
    };

    {
        let state = fader.state.clone();
        let thumb = fader.thumb.clone();
        let closure = Closure::wrap(Box::new(move |ev: web::PointerEvent| {
            let _ = thumb.set_pointer_capture(ev.pointer_id());
            state
                .borrow_mut()
                .begin_drag(ev.client_x() as f32, ev.client_y() as f32);
            ev.prevent_default();
        }) as Box<dyn FnMut(_)>);
        let _ = fader
            .thumb
            .add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref());
        closure.forget();
    }
    {
        let state = fader.state.clone();
        let track = fader.track.clone();
        let thumb = fader.thumb.clone();
        let outbound = outbound.clone();
        let id = control_id.to_string();
        let closure = Closure::wrap(Box::new(move |ev: web::PointerEvent| {
            let delta = {
                let s = state.borrow();
                match s.origin {
                    Some((ox, oy)) => {
                        if vertical {
                            ev.client_y() as f32 - oy
                        } else {
                            ev.client_x() as f32 - ox
                        }
                    }
                    None => return,
                }
            };
            let travel = if vertical {
                fader_travel_px(track.offset_height() as f32, thumb.offset_height() as f32)
            } else {
                fader_travel_px(track.offset_width() as f32, thumb.offset_width() as f32)
            };
            if let Some(v) = state.borrow_mut().drag_linear(delta, travel) {
                let property = if vertical { "top" } else { "left" };
                dom::set_offset_px(&thumb, property, thumb_offset_px(v, travel));
                outbound.send(&id, v as f64);
            }
        }) as Box<dyn FnMut(_)>);
        let _ = fader
            .thumb
            .add_event_listener_with_callback("pointermove", closure.as_ref().unchecked_ref());
        closure.forget();
    }
    for end_event in ["pointerup", "pointercancel"] {
        let state = fader.state.clone();
        let thumb = fader.thumb.clone();
        let closure = Closure::wrap(Box::new(move |ev: web::PointerEvent| {
            let _ = thumb.release_pointer_capture(ev.pointer_id());
            state.borrow_mut().end_drag();
        }) as Box<dyn FnMut(_)>);
        let _ = fader
            .thumb
            .add_event_listener_with_callback(end_event, closure.as_ref().unchecked_ref());
        closure.forget();
    }

    Some(fader)
}

fn wire_toggle(document: &web::Document, id: &'static str, outbound: &Outbound) -> Option<Toggle> {
    let el = match dom::html_element(document, id) {
        Some(el) => el,
        None => {
            log::warn!("button #{} not found, skipping", id);
            return None;
        }
    };
    dom::set_opacity(&el, 0.0);
    let _ = el.style().set_property("cursor", "pointer");

    let state = Rc::new(RefCell::new(ControlState::with_value(0.0)));
    {
        let state = state.clone();
        let visual = el.clone();
        let outbound = outbound.clone();
        let closure = Closure::wrap(Box::new(move || {
            let v = state.borrow_mut().toggle();
            dom::set_opacity(&visual, v);
            outbound.send(id, v as f64);
        }) as Box<dyn FnMut()>);
        let _ = el.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    Some(Toggle { el, state })
}
