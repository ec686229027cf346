//! Canvas 2D scopes: a live oscilloscope fed by the analyser and a static
//! waveform view of the last recording pulled back from the device.

use std::cell::RefCell;
use std::rc::Rc;

use atmono_core::constants::REC_FETCH_DELAY_MS;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

use crate::constants::{OSCILLOSCOPE_CANVAS_ID, REC_BUFFER_ID, WAVEFORM_CANVAS_ID};
use crate::device::AudioDevice;
use crate::dom;

pub struct Scope {
    canvas: web::HtmlCanvasElement,
    ctx: web::CanvasRenderingContext2d,
    analyser: web::AnalyserNode,
    samples: RefCell<Vec<f32>>,
}

impl Scope {
    pub fn new(document: &web::Document, analyser: web::AnalyserNode) -> Option<Self> {
        let canvas = dom::canvas_by_id(document, OSCILLOSCOPE_CANVAS_ID)?;
        let ctx = dom::canvas_2d(&canvas)?;
        let bins = analyser.fft_size() as usize;
        Some(Self {
            canvas,
            ctx,
            analyser,
            samples: RefCell::new(vec![0.0; bins]),
        })
    }

    /// One pull-based redraw: reads the current time-domain block and
    /// paints it. No history is kept between calls.
    pub fn redraw(&self) {
        let mut samples = self.samples.borrow_mut();
        let want = self.analyser.fft_size() as usize;
        if samples.len() != want {
            samples.resize(want, 0.0);
        }
        self.analyser.get_float_time_domain_data(&mut samples);
        draw_trace(&self.ctx, &self.canvas, &samples, "#6df2c1");
    }
}

/// Paints a sample trace across the full canvas width, centered vertically.
fn draw_trace(
    ctx: &web::CanvasRenderingContext2d,
    canvas: &web::HtmlCanvasElement,
    samples: &[f32],
    stroke: &str,
) {
    let w = canvas.width() as f64;
    let h = canvas.height() as f64;
    ctx.clear_rect(0.0, 0.0, w, h);
    if samples.is_empty() {
        return;
    }

    ctx.begin_path();
    ctx.set_line_width(2.0);
    ctx.set_stroke_style_str(stroke);

    let step = w / samples.len() as f64;
    let mid = h / 2.0;
    for (i, s) in samples.iter().enumerate() {
        let x = i as f64 * step;
        let y = mid - (*s as f64).clamp(-1.0, 1.0) * mid;
        if i == 0 {
            ctx.move_to(x, y);
        } else {
            ctx.line_to(x, y);
        }
    }
    ctx.stroke();
}

/// Recorded-audio view. Decimates the channel down to one min/max column
/// per pixel so long takes still render in one pass.
pub fn draw_recording(document: &web::Document, samples: &[f32]) {
    let canvas = match dom::canvas_by_id(document, WAVEFORM_CANVAS_ID) {
        Some(c) => c,
        None => {
            log::warn!("waveform canvas missing, skipping draw");
            return;
        }
    };
    let ctx = match dom::canvas_2d(&canvas) {
        Some(c) => c,
        None => return,
    };
    let w = canvas.width() as f64;
    let h = canvas.height() as f64;
    ctx.clear_rect(0.0, 0.0, w, h);
    if samples.is_empty() || w < 1.0 {
        return;
    }

    ctx.begin_path();
    ctx.set_line_width(1.0);
    ctx.set_stroke_style_str("#e0b24a");
    let mid = h / 2.0;
    let per_column = (samples.len() as f64 / w).max(1.0) as usize;
    for col in 0..w as usize {
        let start = col * per_column;
        if start >= samples.len() {
            break;
        }
        let end = (start + per_column).min(samples.len());
        let mut lo = f32::MAX;
        let mut hi = f32::MIN;
        for s in &samples[start..end] {
            lo = lo.min(*s);
            hi = hi.max(*s);
        }
        let x = col as f64 + 0.5;
        ctx.move_to(x, mid - (hi as f64).clamp(-1.0, 1.0) * mid);
        ctx.line_to(x, mid - (lo as f64).clamp(-1.0, 1.0) * mid);
    }
    ctx.stroke();
}

/// Waits a fixed delay for the recording to settle, then pulls the named
/// buffer and paints it. The device gives no completion signal, so the
/// delay is an approximation rather than a guarantee.
pub fn schedule_recording_pull(device: Rc<RefCell<Option<AudioDevice>>>) {
    dom::set_timeout(REC_FETCH_DELAY_MS, move || {
        let device = match device.borrow().clone() {
            Some(d) => d,
            None => return,
        };
        spawn_local(async move {
            match device.release_recording(REC_BUFFER_ID).await {
                Ok(samples) => {
                    if let Some(document) = dom::window_document() {
                        draw_recording(&document, &samples);
                    }
                }
                Err(e) => log::warn!("recording pull failed: {}", e),
            }
        });
    });
}
