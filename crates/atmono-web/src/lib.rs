#![cfg(target_arch = "wasm32")]

mod audio;
mod constants;
mod device;
mod dom;
mod effects;
mod events;
mod frame;
mod render;
mod scene;
mod scope;
mod widgets;

use std::cell::RefCell;
use std::rc::Rc;

use instant::Instant;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

use crate::constants::APP_CANVAS_ID;
use crate::effects::Effects;
use crate::frame::FrameContext;
use crate::scene::SceneState;
use crate::scope::Scope;
use crate::widgets::Outbound;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("atmono-web starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

async fn init() -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;

    let canvas = dom::canvas_by_id(&document, APP_CANVAS_ID)
        .ok_or_else(|| anyhow::anyhow!("missing #{}", APP_CANVAS_ID))?;
    dom::sync_canvas_backing_size(&canvas);
    {
        let canvas_resize = canvas.clone();
        let resize_closure = Closure::wrap(Box::new(move || {
            dom::sync_canvas_backing_size(&canvas_resize);
        }) as Box<dyn FnMut()>);
        window
            .add_event_listener_with_callback("resize", resize_closure.as_ref().unchecked_ref())
            .ok();
        resize_closure.forget();
    }

    let scene = Rc::new(RefCell::new(SceneState::new()));

    // UI comes up before the device; values queue in the dispatcher until
    // the flush after device construction.
    let outbound = Outbound::new();
    let surface = Rc::new(widgets::wire_controls(&document, &outbound));
    events::wire_rec_stop_pull(&document, surface.clone(), outbound.device_handle());

    // The context starts suspended; any click on the page resumes it.
    let audio = Rc::new(audio::AudioGraph::new()?);
    if let Some(body) = document.body() {
        let audio_resume = audio.clone();
        let closure = Closure::wrap(Box::new(move || {
            audio_resume.resume();
        }) as Box<dyn FnMut()>);
        let _ = body.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    let scope = Rc::new(Scope::new(&document, audio.analyser.clone()));
    if scope.is_none() {
        log::warn!("oscilloscope canvas missing, scope disabled");
    }

    // Device setup is fully asynchronous; a failure leaves the render loop
    // and UI functional, just silent.
    {
        let audio = audio.clone();
        let outbound = outbound.clone();
        let scene = scene.clone();
        let surface = surface.clone();
        let scope = scope.clone();
        let document = document.clone();
        spawn_local(async move {
            let dev = match device::create_device(&audio.ctx).await {
                Ok(d) => d,
                Err(e) => {
                    log::error!("device setup failed: {}", e);
                    return;
                }
            };
            match dev.node() {
                Ok(node) => {
                    if let Err(e) = audio.connect_device(&node) {
                        log::error!("audio wiring failed: {}", e);
                    }
                }
                Err(e) => log::error!("{}", e),
            }

            let effects = Rc::new(Effects {
                document,
                scene,
                surface,
                scope,
                device: outbound.device_handle(),
            });
            events::wire_inbound(&dev, effects);

            // Flushes everything queued while the device was coming up.
            outbound.attach_device(dev);
        });
    }

    if let Some(gpu) = frame::init_gpu(&canvas, &scene).await {
        let ctx = Rc::new(RefCell::new(FrameContext {
            scene: scene.clone(),
            canvas,
            gpu,
            last_instant: Instant::now(),
        }));
        frame::start_loop(ctx);
    }

    Ok(())
}
