//! Front-end wiring constants: external URLs, DOM ids, render tuning.

// Patch description document and the versioned runtime script host
pub const PATCH_EXPORT_URL: &str =
    "https://atmono-philtreezs-projects.vercel.app/export/patch.export.json";
pub const RUNTIME_SCRIPT_BASE: &str = "https://c74-public.nyc3.digitaloceanspaces.com/rnbo/";

// Canvas the renderer draws into
pub const APP_CANVAS_ID: &str = "app-canvas";

// Control surface element ids. Knob elements are `slider-<id>`.
pub const KNOB_IDS: [&str; 10] = ["s1", "s2", "s3", "s4", "s5", "s6", "s7", "s8", "s9", "s10"];
pub const BUTTON_IDS: [&str; 10] = ["b1", "b2", "b3", "b4", "b5", "b6", "b7", "b8", "rndm", "rec"];
pub const VOLUME_TRACK_ID: &str = "volume-slider";
pub const VOLUME_THUMB_ID: &str = "volume-thumb";
pub const PLAYSTAT_TRACK_ID: &str = "playstat-slider";
pub const PLAYSTAT_THUMB_ID: &str = "playstat-thumb";

// Indicator banks are `<bank>-1` .. `<bank>-8`, blink elements live in a
// dedicated container.
pub const BLINK_SELECTOR: &str = "#rndmcont .rndmblink";

// Scope canvases
pub const OSCILLOSCOPE_CANVAS_ID: &str = "oscilloscope";
pub const WAVEFORM_CANVAS_ID: &str = "waveform";

// Name of the device data buffer holding the last recording
pub const REC_BUFFER_ID: &str = "recbuf";

// Satellite ring seed (fixed so reloads look identical)
pub const RING_SEED: u64 = 42;

// Render tuning
pub const SATELLITE_SCALE: f32 = 0.22;
pub const PLANET_SCALE: f32 = 0.45;
pub const FLASH_SCALE: f32 = 1.5;
pub const BLOOM_THRESHOLD: f32 = 0.35;
pub const MESH_EMISSIVE: f32 = 0.9;
pub const STAR_BRIGHTNESS: f32 = 0.75;
