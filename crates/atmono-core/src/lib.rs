//! Reactive core for the atmono front-end.
//!
//! Everything here is platform-neutral and host-testable: the smoothed
//! parameter store, the outbound dispatcher with its pending queue, the
//! inbound event router, control-widget value math, orbital satellite state,
//! and the mesh displacement function. The wasm front-end crate executes the
//! actions this crate produces.

pub mod constants;
pub mod control;
pub mod dispatch;
pub mod morph;
pub mod orbit;
pub mod params;
pub mod patch;
pub mod route;

pub use constants::*;
pub use control::{fader_travel_px, light_opacity, rotary_degrees, thumb_offset_px, ControlState};
pub use dispatch::{Dispatcher, ParamSink};
pub use morph::{displace, sphere_vertices, sphere_wire_indices};
pub use orbit::{build_ring, satellite_for_payload, Satellite};
pub use params::{Channel, SmoothedParams};
pub use patch::{validate_runtime_version, PatchError};
pub use route::{Action, Actions, InboundEvent, Router};
