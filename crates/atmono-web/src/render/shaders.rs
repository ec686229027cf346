//! WGSL sources for the scene layers and the bloom/glitch post chain.

pub(crate) const SCENE_WGSL: &str = r#"
struct SceneUniforms {
  view_proj: mat4x4<f32>,
  cam_right: vec4<f32>,
  cam_up: vec4<f32>,
  line_color: vec4<f32>,   // rgb + emissive
  misc: vec4<f32>,         // x = time, y = star brightness
};
@group(0) @binding(0) var<uniform> u: SceneUniforms;

// ---- wire sphere (line list) ----

struct LineOut {
  @builtin(position) pos: vec4<f32>,
};

@vertex
fn vs_line(@location(0) v_pos: vec3<f32>) -> LineOut {
  var out: LineOut;
  out.pos = u.view_proj * vec4<f32>(v_pos, 1.0);
  return out;
}

@fragment
fn fs_line() -> @location(0) vec4<f32> {
  let rgb = u.line_color.rgb * (1.0 + u.line_color.a);
  return vec4<f32>(rgb, 1.0);
}

// ---- starfield (point list) ----

struct StarOut {
  @builtin(position) pos: vec4<f32>,
};

@vertex
fn vs_star(@location(0) v_pos: vec3<f32>) -> StarOut {
  var out: StarOut;
  out.pos = u.view_proj * vec4<f32>(v_pos, 1.0);
  return out;
}

@fragment
fn fs_star() -> @location(0) vec4<f32> {
  let b = u.misc.y;
  return vec4<f32>(b, b, b, 1.0);
}

// ---- sprites: satellites, planets, flash panels (instanced quads) ----

struct SpriteOut {
  @builtin(position) pos: vec4<f32>,
  @location(0) color: vec4<f32>,
  @location(1) local: vec2<f32>,
};

@vertex
fn vs_sprite(
  @location(0) v_pos: vec2<f32>,
  @location(1) i_pos: vec3<f32>,
  @location(2) i_scale: f32,
  @location(3) i_color: vec4<f32>,   // rgb + emissive
) -> SpriteOut {
  let world = i_pos
    + u.cam_right.xyz * (v_pos.x * i_scale)
    + u.cam_up.xyz * (v_pos.y * i_scale);
  var out: SpriteOut;
  out.pos = u.view_proj * vec4<f32>(world, 1.0);
  out.color = i_color;
  out.local = v_pos;
  return out;
}

@fragment
fn fs_sprite(inf: SpriteOut) -> @location(0) vec4<f32> {
  // Circular mask within the unit quad
  let r = length(inf.local);
  let shape_alpha = 1.0 - smoothstep(0.48, 0.5, r);
  let rgb = inf.color.rgb * (1.0 + inf.color.a);
  return vec4<f32>(rgb, shape_alpha);
}
"#;

pub(crate) const POST_WGSL: &str = r#"
struct PostUniforms {
  resolution: vec2<f32>,
  blur_dir: vec2<f32>,
  bloom_strength: f32,
  bloom_radius: f32,
  threshold: f32,
  glitch: f32,
  time: f32,
  _pad0: f32,
  _pad1: f32,
  _pad2: f32,
};
@group(0) @binding(0) var src_tex: texture_2d<f32>;
@group(0) @binding(1) var src_samp: sampler;
@group(0) @binding(2) var<uniform> u: PostUniforms;
@group(1) @binding(0) var bloom_tex: texture_2d<f32>;
@group(1) @binding(1) var bloom_samp: sampler;

struct FsIn {
  @builtin(position) pos: vec4<f32>,
  @location(0) uv: vec2<f32>,
};

@vertex
fn vs_fullscreen(@builtin(vertex_index) vi: u32) -> FsIn {
  var out: FsIn;
  let x = f32(i32(vi & 1u) * 4 - 1);
  let y = f32(i32(vi >> 1u) * 4 - 1);
  out.pos = vec4<f32>(x, y, 0.0, 1.0);
  out.uv = vec2<f32>(x * 0.5 + 0.5, 0.5 - y * 0.5);
  return out;
}

@fragment
fn fs_bright(inf: FsIn) -> @location(0) vec4<f32> {
  let c = textureSample(src_tex, src_samp, inf.uv).rgb;
  let luma = dot(c, vec3<f32>(0.2126, 0.7152, 0.0722));
  let keep = max(luma - u.threshold, 0.0) / max(luma, 1e-4);
  return vec4<f32>(c * keep, 1.0);
}

@fragment
fn fs_blur(inf: FsIn) -> @location(0) vec4<f32> {
  // 9-tap gaussian; bloom_radius widens the tap spacing
  let texel = (1.0 / u.resolution) * u.blur_dir * (1.0 + u.bloom_radius * 8.0);
  var acc = textureSample(src_tex, src_samp, inf.uv).rgb * 0.227027;
  var w = array<f32, 4>(0.194594, 0.121621, 0.054054, 0.016216);
  for (var i = 1; i <= 4; i = i + 1) {
    let off = texel * f32(i);
    acc = acc + textureSample(src_tex, src_samp, inf.uv + off).rgb * w[i - 1];
    acc = acc + textureSample(src_tex, src_samp, inf.uv - off).rgb * w[i - 1];
  }
  return vec4<f32>(acc, 1.0);
}

fn hash1(n: f32) -> f32 {
  return fract(sin(n) * 43758.5453);
}

@fragment
fn fs_composite(inf: FsIn) -> @location(0) vec4<f32> {
  var uv = inf.uv;
  var split = 0.0;
  if (u.glitch > 0.5) {
    // Horizontal band displacement, re-randomized over time
    let band = floor(uv.y * 24.0);
    let jitter = hash1(band + floor(u.time * 14.0)) - 0.5;
    uv.x = fract(uv.x + jitter * 0.08);
    split = 0.004;
  }
  var scene = textureSample(src_tex, src_samp, uv).rgb;
  if (split > 0.0) {
    scene.r = textureSample(src_tex, src_samp, uv + vec2<f32>(split, 0.0)).r;
    scene.b = textureSample(src_tex, src_samp, uv - vec2<f32>(split, 0.0)).b;
  }
  let bloom = textureSample(bloom_tex, bloom_samp, uv).rgb;
  var c = scene + bloom * u.bloom_strength;
  // Filmic-ish rolloff keeps the HDR highlights from clipping hard
  c = c / (c + vec3<f32>(1.0));
  c = pow(c, vec3<f32>(1.0 / 2.2));
  return vec4<f32>(c, 1.0);
}
"#;
