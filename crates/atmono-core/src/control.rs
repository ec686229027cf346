//! On-screen control value state and drag math.
//!
//! The `ControlState` value object is the single source of truth for each
//! widget; the DOM visual (knob rotation, thumb offset, button opacity) is a
//! pure function of it and is never read back.

use crate::constants::{ROTARY_SENSITIVITY, ROTARY_SWEEP_DEGREES};

#[derive(Clone, Copy, Debug, Default)]
pub struct ControlState {
    pub value: f32,
    pub dragging: bool,
    pub origin: Option<(f32, f32)>,
    pub origin_value: f32,
}

impl ControlState {
    pub fn with_value(value: f32) -> Self {
        Self {
            value: value.clamp(0.0, 1.0),
            ..Self::default()
        }
    }

    pub fn begin_drag(&mut self, x: f32, y: f32) {
        self.dragging = true;
        self.origin = Some((x, y));
        self.origin_value = self.value;
    }

    /// Rotary mapping: both axes combined, right/up increases.
    /// Returns the new clamped value, or None outside a drag session.
    pub fn drag_rotary(&mut self, x: f32, y: f32) -> Option<f32> {
        let (ox, oy) = self.origin?;
        if !self.dragging {
            return None;
        }
        let delta = ((x - ox) - (y - oy)) * ROTARY_SENSITIVITY;
        self.value = (self.origin_value + delta).clamp(0.0, 1.0);
        Some(self.value)
    }

    /// Linear mapping: one axis, normalized by the track travel in pixels
    /// (track length minus thumb length). Positive `delta_px` increases.
    pub fn drag_linear(&mut self, delta_px: f32, travel_px: f32) -> Option<f32> {
        if !self.dragging || travel_px <= 0.0 {
            return None;
        }
        self.value = (self.origin_value + delta_px / travel_px).clamp(0.0, 1.0);
        Some(self.value)
    }

    /// End unconditionally: release or cancel must always clear drag state,
    /// even when the pointer left the element.
    pub fn end_drag(&mut self) {
        self.dragging = false;
        self.origin = None;
    }

    /// Binary toggle for buttons; returns the new 0/1 value.
    pub fn toggle(&mut self) -> f32 {
        self.value = if self.value >= 0.5 { 0.0 } else { 1.0 };
        self.value
    }

    /// Idempotent mirror update from an inbound event (visual-only path).
    pub fn set_mirrored(&mut self, value: f32) {
        self.value = value.clamp(0.0, 1.0);
    }
}

/// Knob visual: 0..1 maps onto a 270-degree sweep.
#[inline]
pub fn rotary_degrees(value: f32) -> f32 {
    value.clamp(0.0, 1.0) * ROTARY_SWEEP_DEGREES
}

/// Fader visual: thumb offset along the available travel.
#[inline]
pub fn thumb_offset_px(value: f32, travel_px: f32) -> f32 {
    value.clamp(0.0, 1.0) * travel_px.max(0.0)
}

/// Travel distance of a fader track.
#[inline]
pub fn fader_travel_px(track_px: f32, thumb_px: f32) -> f32 {
    (track_px - thumb_px).max(0.0)
}

/// Indicator bank visual: only the 1-based selected slot is lit, every
/// other slot is fully transparent. A selection of 0 darkens the bank.
#[inline]
pub fn light_opacity(selected: i64, slot: usize) -> f32 {
    if selected == slot as i64 {
        1.0
    } else {
        0.0
    }
}
