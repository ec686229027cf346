//! Smoothed continuous visual parameters.
//!
//! Each channel holds a `target`/`current` pair. Targets are overwritten by
//! the inbound router; `advance` is called once per render frame and pulls
//! every `current` toward its target with a shared exponential smoothing
//! factor (a discrete one-pole low-pass, no history window).

use crate::constants::*;

/// Fixed set of continuous channels. Enum-indexed storage makes an unknown
/// channel a structural impossibility rather than a runtime lookup failure.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Channel {
    MorphIntensity,
    MorphFrequency,
    NoiseFactor,
    BloomStrength,
    BloomRadius,
}

pub const CHANNEL_COUNT: usize = 5;

impl Channel {
    #[inline]
    fn index(self) -> usize {
        match self {
            Channel::MorphIntensity => 0,
            Channel::MorphFrequency => 1,
            Channel::NoiseFactor => 2,
            Channel::BloomStrength => 3,
            Channel::BloomRadius => 4,
        }
    }
}

#[derive(Clone, Copy, Debug)]
struct Smoothed {
    target: f32,
    current: f32,
}

#[derive(Clone, Debug)]
pub struct SmoothedParams {
    values: [Smoothed; CHANNEL_COUNT],
    smoothing: f32,
}

impl Default for SmoothedParams {
    fn default() -> Self {
        Self::new(SMOOTHING_FACTOR)
    }
}

impl SmoothedParams {
    pub fn new(smoothing: f32) -> Self {
        let at = |v: f32| Smoothed {
            target: v,
            current: v,
        };
        Self {
            values: [
                at(DEFAULT_MORPH_INTENSITY),
                at(DEFAULT_MORPH_FREQUENCY),
                at(DEFAULT_NOISE_FACTOR),
                at(DEFAULT_BLOOM_STRENGTH),
                at(DEFAULT_BLOOM_RADIUS),
            ],
            smoothing,
        }
    }

    /// Unconditional overwrite; values arrive pre-normalized from the device
    /// and pass through uncapped.
    pub fn set_target(&mut self, channel: Channel, value: f32) {
        self.values[channel.index()].target = value;
    }

    /// One smoothing step for every channel. Called once per frame.
    pub fn advance(&mut self) {
        for v in &mut self.values {
            v.current += (v.target - v.current) * self.smoothing;
        }
    }

    #[inline]
    pub fn current(&self, channel: Channel) -> f32 {
        self.values[channel.index()].current
    }

    #[inline]
    pub fn target(&self, channel: Channel) -> f32 {
        self.values[channel.index()].target
    }
}
