//! Inbound event routing.
//!
//! The audio device exposes one of two event-stream shapes depending on its
//! build: a structured parameter-change stream (`{id, value}`) or a generic
//! tagged-message stream (`{tag, payload}`). Both are normalized into
//! [`InboundEvent`] at the device boundary so the router's dispatch logic is
//! shape-agnostic. Classification turns each event into a short list of
//! [`Action`]s for the front-end to execute; unrecognized identifiers yield
//! an empty list and are logged by the caller, never treated as an error.

use crate::params::Channel;
use smallvec::SmallVec;

/// An event from the device, normalized from either stream shape.
#[derive(Clone, Debug)]
pub enum InboundEvent {
    Parameter { id: String, value: f64 },
    Message { tag: String, payload: f64 },
}

impl InboundEvent {
    #[inline]
    pub fn id(&self) -> &str {
        match self {
            InboundEvent::Parameter { id, .. } => id,
            InboundEvent::Message { tag, .. } => tag,
        }
    }

    #[inline]
    pub fn value(&self) -> f64 {
        match self {
            InboundEvent::Parameter { value, .. } => *value,
            InboundEvent::Message { payload, .. } => *payload,
        }
    }
}

/// What the front-end should do in response to one inbound event.
///
/// Mirror actions are visual-only by contract: executing them must never
/// re-enter the outbound dispatcher, or device -> UI -> device feedback
/// loops would form.
#[derive(Clone, Debug, PartialEq)]
pub enum Action {
    SetChannel(Channel, f32),
    SatelliteGlow(i64),
    SpawnPlanet(i64),
    RandomBlink(i64),
    OutlineFlash(i64),
    MirrorKnob { index: usize, value: f32 },
    MirrorButton { id: String, on: bool },
    MirrorVolume(f32),
    MirrorPlaystat(f32),
    SetGlitch(bool),
    SetLights { bank: String, index: i64 },
    PullRecording,
    ScopeFrame,
}

pub type Actions = SmallVec<[Action; 2]>;

/// Identifier-based dispatch with the fixed precedence of the patch page.
/// Holds only the previous `rec` value, needed to detect the 1 -> 0 stop
/// transition that schedules the recording pull.
#[derive(Default)]
pub struct Router {
    last_rec: f64,
}

impl Router {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn route(&mut self, ev: &InboundEvent) -> Actions {
        self.classify(ev.id(), ev.value())
    }

    pub fn classify(&mut self, id: &str, value: f64) -> Actions {
        let mut out = Actions::new();

        if let Some(channel) = continuous_channel(id) {
            out.push(Action::SetChannel(channel, value as f32));
            return out;
        }

        let int_payload = value.round() as i64;
        match id {
            "planetlight" => {
                out.push(Action::SatelliteGlow(int_payload));
                return out;
            }
            "seqlight" => {
                out.push(Action::SpawnPlanet(int_payload));
                return out;
            }
            "rndmblink" => {
                out.push(Action::RandomBlink(int_payload));
                return out;
            }
            "grider" => {
                out.push(Action::OutlineFlash(int_payload));
                return out;
            }
            _ => {}
        }

        if let Some(index) = knob_index(id) {
            out.push(Action::MirrorKnob {
                index,
                value: value as f32,
            });
            return out;
        }

        if id == "rndm" || id == "rec" || id.starts_with('b') {
            out.push(Action::MirrorButton {
                id: id.to_owned(),
                on: int_payload == 1,
            });
            if id == "rec" {
                // Stop transition schedules the delayed buffer pull.
                if self.last_rec >= 0.5 && value < 0.5 {
                    out.push(Action::PullRecording);
                }
                self.last_rec = value;
            }
            return out;
        }

        match id {
            "vol" => out.push(Action::MirrorVolume(value as f32)),
            "playstat" => out.push(Action::MirrorPlaystat(value as f32)),
            "glitchy" => out.push(Action::SetGlitch(int_payload != 0)),
            "trig16th" => out.push(Action::ScopeFrame),
            _ if id.starts_with("light1") || id.starts_with("light2") => {
                out.push(Action::SetLights {
                    bank: id.to_owned(),
                    index: int_payload,
                })
            }
            _ => {}
        }
        out
    }
}

fn continuous_channel(id: &str) -> Option<Channel> {
    match id {
        "morph" => Some(Channel::MorphIntensity),
        "morphFrequency" => Some(Channel::MorphFrequency),
        "noiseFactor" => Some(Channel::NoiseFactor),
        "bloomStrength" => Some(Channel::BloomStrength),
        "bloomRadius" => Some(Channel::BloomRadius),
        _ => None,
    }
}

/// `s1`..`s10` -> zero-based knob index.
fn knob_index(id: &str) -> Option<usize> {
    let n: usize = id.strip_prefix('s')?.parse().ok()?;
    (1..=crate::constants::KNOB_COUNT).contains(&n).then(|| n - 1)
}
