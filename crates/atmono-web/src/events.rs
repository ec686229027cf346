//! Inbound event wiring: device stream -> router -> effects.

use std::cell::RefCell;
use std::rc::Rc;

use atmono_core::Router;
use web_sys as web;

use crate::device::AudioDevice;
use crate::dom;
use crate::effects::Effects;
use crate::scope;
use crate::widgets::ControlSurface;

/// Subscribes the device's event stream. Events are classified one at a
/// time; all actions for one event run synchronously before the next.
pub fn wire_inbound(device: &AudioDevice, effects: Rc<Effects>) {
    let router = Rc::new(RefCell::new(Router::new()));
    device.subscribe(move |ev| {
        let actions = router.borrow_mut().route(&ev);
        if actions.is_empty() {
            log::debug!("ignoring inbound id `{}`", ev.id());
        } else {
            effects.apply(&actions);
        }
    });
}

/// The rec button's stop transition also schedules a recording pull when
/// toggled locally, not just when mirrored from the device. Runs after the
/// toggle listener, so the state already reflects the new value.
pub fn wire_rec_stop_pull(
    document: &web::Document,
    surface: Rc<ControlSurface>,
    device: Rc<RefCell<Option<AudioDevice>>>,
) {
    dom::add_click_listener(document, "rec", move || {
        if !surface.rec_is_on() {
            scope::schedule_recording_pull(device.clone());
        }
    });
}
