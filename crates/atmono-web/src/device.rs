//! Bridge to the RNBO audio device: patch loading, parameter writes,
//! event-stream subscription and recorded-buffer retrieval.
//!
//! The device object comes from a dynamically loaded script and is only
//! known at runtime, so everything here is duck-typed through `js_sys`.

use anyhow::{anyhow, Result};
use atmono_core::{validate_runtime_version, InboundEvent, ParamSink};
use js_sys::{Function, Promise, Reflect};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys as web;

use crate::constants::{PATCH_EXPORT_URL, RUNTIME_SCRIPT_BASE};

/// Instantiated audio-processing device.
#[derive(Clone)]
pub struct AudioDevice {
    inner: JsValue,
}

fn get(target: &JsValue, key: &str) -> Result<JsValue> {
    Reflect::get(target, &JsValue::from_str(key)).map_err(|e| anyhow!("missing `{}`: {:?}", key, e))
}

fn call_method(target: &JsValue, name: &str, args: &[&JsValue]) -> Result<JsValue> {
    let f: Function = get(target, name)?
        .dyn_into()
        .map_err(|_| anyhow!("`{}` is not callable", name))?;
    let out = match args {
        [] => f.call0(target),
        [a] => f.call1(target, a),
        [a, b] => f.call2(target, a, b),
        _ => return Err(anyhow!("too many args for `{}`", name)),
    };
    out.map_err(|e| anyhow!("`{}` call failed: {:?}", name, e))
}

impl AudioDevice {
    pub fn node(&self) -> Result<web::AudioNode> {
        get(&self.inner, "node")?
            .dyn_into::<web::AudioNode>()
            .map_err(|_| anyhow!("device node is not an AudioNode"))
    }

    fn parameter(&self, id: &str) -> Option<JsValue> {
        let map = get(&self.inner, "parametersById").ok()?;
        let key = JsValue::from_str(id);
        let present = call_method(&map, "has", &[&key]).ok()?;
        if !present.is_truthy() {
            return None;
        }
        call_method(&map, "get", &[&key]).ok()
    }

    /// Subscribes the handler to both event-stream shapes the device may
    /// expose. Parameter-change events and tagged messages are normalized
    /// into [`InboundEvent`] before the handler sees them.
    pub fn subscribe(&self, handler: impl Fn(InboundEvent) + 'static) {
        let handler = std::rc::Rc::new(handler);

        if let Ok(port) = get(&self.inner, "parameterChangeEvent") {
            let h = handler.clone();
            let cb = Closure::wrap(Box::new(move |param: JsValue| {
                if let Some(ev) = normalize_parameter_event(&param) {
                    h(ev);
                }
            }) as Box<dyn FnMut(JsValue)>);
            if call_method(&port, "subscribe", &[cb.as_ref()]).is_ok() {
                cb.forget();
            }
        }

        if let Ok(port) = get(&self.inner, "messageEvent") {
            let h = handler.clone();
            let cb = Closure::wrap(Box::new(move |msg: JsValue| {
                if let Some(ev) = normalize_message_event(&msg) {
                    h(ev);
                }
            }) as Box<dyn FnMut(JsValue)>);
            if call_method(&port, "subscribe", &[cb.as_ref()]).is_ok() {
                cb.forget();
            }
        }
    }

    /// Pulls channel 0 of a named data buffer back from the device. The
    /// buffer is re-attached afterwards so the device can keep recording
    /// into it.
    pub async fn release_recording(&self, buffer_id: &str) -> Result<Vec<f32>> {
        let key = JsValue::from_str(buffer_id);
        let promise: Promise = call_method(&self.inner, "releaseDataBuffer", &[&key])?
            .dyn_into()
            .map_err(|_| anyhow!("releaseDataBuffer did not return a promise"))?;
        let buf = JsFuture::from(promise)
            .await
            .map_err(|e| anyhow!("buffer release failed: {:?}", e))?;

        let channel = call_method(&buf, "getChannelData", &[&JsValue::from_f64(0.0)])?;
        let samples: Vec<f32> = js_sys::Float32Array::new(&channel).to_vec();

        // Hand the buffer back; a failure here only stops future recordings.
        if let Err(e) = call_method(&self.inner, "setDataBuffer", &[&key, &buf]) {
            log::warn!("could not re-attach {}: {}", buffer_id, e);
        }
        Ok(samples)
    }
}

impl ParamSink for AudioDevice {
    fn has_param(&self, id: &str) -> bool {
        self.parameter(id).is_some()
    }

    fn set_param(&self, id: &str, value: f64) {
        if let Some(param) = self.parameter(id) {
            let _ = Reflect::set(&param, &JsValue::from_str("value"), &JsValue::from_f64(value));
        }
    }
}

fn event_value(raw: &JsValue) -> Option<f64> {
    if let Some(n) = raw.as_f64() {
        return Some(n);
    }
    if let Some(s) = raw.as_string() {
        return s.trim().parse::<f64>().ok();
    }
    if js_sys::Array::is_array(raw) {
        let arr = js_sys::Array::from(raw);
        if arr.length() > 0 {
            return event_value(&arr.get(0));
        }
    }
    None
}

fn normalize_parameter_event(param: &JsValue) -> Option<InboundEvent> {
    let id = get(param, "name")
        .ok()
        .and_then(|v| v.as_string())
        .or_else(|| get(param, "id").ok().and_then(|v| v.as_string()))?;
    let value = get(param, "value").ok().and_then(|v| event_value(&v))?;
    Some(InboundEvent::Parameter { id, value })
}

fn normalize_message_event(msg: &JsValue) -> Option<InboundEvent> {
    let tag = get(msg, "tag").ok().and_then(|v| v.as_string())?;
    let raw = get(msg, "payload").ok()?;
    let payload = match event_value(&raw) {
        Some(p) => p,
        None => {
            log::warn!("uncoercible payload on `{}`", tag);
            return None;
        }
    };
    Some(InboundEvent::Message { tag, payload })
}

/// Fetches the patch description, loads the matching runtime script if it
/// is not already present, and constructs the device against the given
/// audio context.
pub async fn create_device(audio_ctx: &web::AudioContext) -> Result<AudioDevice> {
    let window = web::window().ok_or_else(|| anyhow!("no window"))?;

    let resp: web::Response = JsFuture::from(window.fetch_with_str(PATCH_EXPORT_URL))
        .await
        .map_err(|e| anyhow!("patch fetch failed: {:?}", e))?
        .dyn_into()
        .map_err(|_| anyhow!("fetch did not return a Response"))?;
    let patcher = JsFuture::from(
        resp.json()
            .map_err(|e| anyhow!("patch body unreadable: {:?}", e))?,
    )
    .await
    .map_err(|e| anyhow!("patch JSON malformed: {:?}", e))?;

    let runtime = get(&window, "RNBO").unwrap_or(JsValue::UNDEFINED);
    let runtime = if runtime.is_undefined() || runtime.is_null() {
        let desc = get(&patcher, "desc")?;
        let meta = get(&desc, "meta")?;
        let version = get(&meta, "rnboversion")?
            .as_string()
            .ok_or_else(|| anyhow!("patch has no runtime version"))?;
        validate_runtime_version(&version)?;
        load_runtime_script(&version).await?;
        get(&window, "RNBO")?
    } else {
        runtime
    };

    let options = js_sys::Object::new();
    Reflect::set(&options, &JsValue::from_str("context"), audio_ctx)
        .map_err(|e| anyhow!("{:?}", e))?;
    Reflect::set(&options, &JsValue::from_str("patcher"), &patcher)
        .map_err(|e| anyhow!("{:?}", e))?;

    let promise: Promise = call_method(&runtime, "createDevice", &[&options])?
        .dyn_into()
        .map_err(|_| anyhow!("createDevice did not return a promise"))?;
    let inner = JsFuture::from(promise)
        .await
        .map_err(|e| anyhow!("device construction failed: {:?}", e))?;

    log::info!("audio device ready");
    Ok(AudioDevice { inner })
}

/// Injects the versioned runtime script and resolves once it has loaded.
async fn load_runtime_script(version: &str) -> Result<()> {
    let document = crate::dom::window_document().ok_or_else(|| anyhow!("no document"))?;
    let body = document.body().ok_or_else(|| anyhow!("no body"))?;

    let url = format!(
        "{}{}/rnbo.min.js",
        RUNTIME_SCRIPT_BASE,
        js_sys::encode_uri_component(version)
    );
    let script: web::HtmlScriptElement = document
        .create_element("script")
        .map_err(|e| anyhow!("{:?}", e))?
        .dyn_into()
        .map_err(|_| anyhow!("not a script element"))?;
    script.set_src(&url);

    let promise = Promise::new(&mut |resolve, reject| {
        script.set_onload(Some(&resolve));
        script.set_onerror(Some(&reject));
    });
    body.append_child(&script).map_err(|e| anyhow!("{:?}", e))?;
    JsFuture::from(promise)
        .await
        .map_err(|_| anyhow!("runtime script {} failed to load", version))?;
    Ok(())
}
