//! WebGPU renderer: wire sphere, starfield and billboard sprites drawn
//! into an HDR target, then a bright/blur/composite bloom chain with an
//! optional glitch stage on the way to the swapchain.

pub(crate) mod helpers;
pub(crate) mod post;
pub(crate) mod shaders;
pub(crate) mod targets;

use glam::{Mat4, Vec3};
use web_sys as web;
use wgpu::util::DeviceExt;

use crate::constants::{MESH_EMISSIVE, STAR_BRIGHTNESS};
use targets::{RenderTargets, HDR_FORMAT};

const MAX_SPRITES: usize = 64;

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct SceneUniforms {
    view_proj: [[f32; 4]; 4],
    cam_right: [f32; 4],
    cam_up: [f32; 4],
    line_color: [f32; 4], // rgb + emissive
    misc: [f32; 4],       // x = time, y = star brightness
}

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct PostUniforms {
    resolution: [f32; 2],
    blur_dir: [f32; 2],
    bloom_strength: f32,
    bloom_radius: f32,
    threshold: f32,
    glitch: f32,
    time: f32,
    _pad: [f32; 3],
}

/// One billboard quad: satellites, ephemeral planets, flash panels.
#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct SpriteInstance {
    pub pos: [f32; 3],
    pub scale: f32,
    pub color: [f32; 4], // rgb + emissive
}

/// Per-frame camera and post settings.
pub struct FrameView {
    pub eye: Vec3,
    pub target: Vec3,
    pub bloom_strength: f32,
    pub bloom_radius: f32,
    pub glitch: bool,
    pub time: f32,
}

pub struct GpuState<'a> {
    surface: wgpu::Surface<'a>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,

    scene_uniform_buffer: wgpu::Buffer,
    scene_bind_group: wgpu::BindGroup,
    line_pipeline: wgpu::RenderPipeline,
    star_pipeline: wgpu::RenderPipeline,
    sprite_pipeline: wgpu::RenderPipeline,

    mesh_vb: wgpu::Buffer,
    mesh_ib: wgpu::Buffer,
    mesh_index_count: u32,
    star_vb: wgpu::Buffer,
    star_count: u32,
    quad_vb: wgpu::Buffer,
    sprite_vb: wgpu::Buffer,

    targets: RenderTargets,
    linear_sampler: wgpu::Sampler,
    post: post::PostChain,

    width: u32,
    height: u32,
    clear_color: wgpu::Color,
}

impl<'a> GpuState<'a> {
    pub async fn new(
        canvas: &'a web::HtmlCanvasElement,
        mesh_vertices: &[Vec3],
        wire_indices: &[u32],
        stars: &[Vec3],
    ) -> anyhow::Result<Self> {
        let width = canvas.width();
        let height = canvas.height();

        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("No WebGPU adapter"))?;
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::Performance,
                    label: None,
                },
                None,
            )
            .await
            .map_err(|e| anyhow::anyhow!(format!("request_device error: {:?}", e)))?;
        let caps = surface.get_capabilities(&adapter);
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|f| {
                matches!(
                    f,
                    wgpu::TextureFormat::Bgra8UnormSrgb | wgpu::TextureFormat::Rgba8UnormSrgb
                )
            })
            .unwrap_or(caps.formats[0]);
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        // Scene layer shared uniforms and pipelines
        let scene_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("scene_shader"),
            source: wgpu::ShaderSource::Wgsl(shaders::SCENE_WGSL.into()),
        });
        let scene_uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("scene_uniforms"),
            size: std::mem::size_of::<SceneUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let scene_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("scene_bgl"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });
        let scene_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("scene_bg"),
            layout: &scene_bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: scene_uniform_buffer.as_entire_binding(),
            }],
        });
        let scene_pl = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("scene_pl"),
            bind_group_layouts: &[&scene_bgl],
            push_constant_ranges: &[],
        });

        let pos3_layout = wgpu::VertexBufferLayout {
            array_stride: (std::mem::size_of::<f32>() * 3) as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[wgpu::VertexAttribute {
                format: wgpu::VertexFormat::Float32x3,
                offset: 0,
                shader_location: 0,
            }],
        };
        let line_pipeline = helpers::make_scene_pipeline(
            &device,
            &scene_pl,
            &scene_shader,
            "vs_line",
            "fs_line",
            &[pos3_layout.clone()],
            wgpu::PrimitiveTopology::LineList,
            HDR_FORMAT,
        );
        let star_pipeline = helpers::make_scene_pipeline(
            &device,
            &scene_pl,
            &scene_shader,
            "vs_star",
            "fs_star",
            &[pos3_layout],
            wgpu::PrimitiveTopology::PointList,
            HDR_FORMAT,
        );
        let sprite_layouts = [
            wgpu::VertexBufferLayout {
                array_stride: (std::mem::size_of::<f32>() * 2) as u64,
                step_mode: wgpu::VertexStepMode::Vertex,
                attributes: &[wgpu::VertexAttribute {
                    format: wgpu::VertexFormat::Float32x2,
                    offset: 0,
                    shader_location: 0,
                }],
            },
            wgpu::VertexBufferLayout {
                array_stride: std::mem::size_of::<SpriteInstance>() as u64,
                step_mode: wgpu::VertexStepMode::Instance,
                attributes: &[
                    wgpu::VertexAttribute {
                        format: wgpu::VertexFormat::Float32x3,
                        offset: 0,
                        shader_location: 1,
                    },
                    wgpu::VertexAttribute {
                        format: wgpu::VertexFormat::Float32,
                        offset: 12,
                        shader_location: 2,
                    },
                    wgpu::VertexAttribute {
                        format: wgpu::VertexFormat::Float32x4,
                        offset: 16,
                        shader_location: 3,
                    },
                ],
            },
        ];
        let sprite_pipeline = helpers::make_scene_pipeline(
            &device,
            &scene_pl,
            &scene_shader,
            "vs_sprite",
            "fs_sprite",
            &sprite_layouts,
            wgpu::PrimitiveTopology::TriangleList,
            HDR_FORMAT,
        );

        // Geometry buffers. The mesh vertex buffer is rewritten every frame
        // with the deformed pose; indices and stars never change.
        let mesh_vb = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("mesh_vb"),
            contents: bytemuck::cast_slice(mesh_vertices),
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        });
        let mesh_ib = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("mesh_ib"),
            contents: bytemuck::cast_slice(wire_indices),
            usage: wgpu::BufferUsages::INDEX,
        });
        let star_vb = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("star_vb"),
            contents: bytemuck::cast_slice(stars),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let quad_vertices: [f32; 12] = [
            -0.5, -0.5, 0.5, -0.5, 0.5, 0.5, -0.5, -0.5, 0.5, 0.5, -0.5, 0.5,
        ];
        let quad_vb = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("quad_vb"),
            contents: bytemuck::cast_slice(&quad_vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let sprite_vb = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("sprite_vb"),
            size: (std::mem::size_of::<SpriteInstance>() * MAX_SPRITES) as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        // Post chain
        let post_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("post_shader"),
            source: wgpu::ShaderSource::Wgsl(shaders::POST_WGSL.into()),
        });
        let linear_sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("linear_sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::FilterMode::Linear,
            ..Default::default()
        });
        let targets = RenderTargets::new(&device, width, height);
        let mut post = post::PostChain::new(&device, &post_shader, HDR_FORMAT, format);
        post.bind(&device, &targets, &linear_sampler);

        Ok(Self {
            surface,
            device,
            queue,
            config,
            scene_uniform_buffer,
            scene_bind_group,
            line_pipeline,
            star_pipeline,
            sprite_pipeline,
            mesh_vb,
            mesh_ib,
            mesh_index_count: wire_indices.len() as u32,
            star_vb,
            star_count: stars.len() as u32,
            quad_vb,
            sprite_vb,
            targets,
            linear_sampler,
            post,
            width,
            height,
            clear_color: wgpu::Color {
                r: 0.01,
                g: 0.012,
                b: 0.03,
                a: 1.0,
            },
        })
    }

    pub fn resize_if_needed(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        if width != self.width || height != self.height {
            self.width = width;
            self.height = height;
            self.config.width = width;
            self.config.height = height;
            self.surface.configure(&self.device, &self.config);
            self.targets.recreate(&self.device, width, height);
            self.post.bind(&self.device, &self.targets, &self.linear_sampler);
        }
    }

    pub fn render(
        &mut self,
        vertices: &[Vec3],
        sprites: &[SpriteInstance],
        view: &FrameView,
    ) -> Result<(), wgpu::SurfaceError> {
        let frame = self.surface.get_current_texture()?;
        let swap_view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("encoder"),
            });

        self.queue
            .write_buffer(&self.mesh_vb, 0, bytemuck::cast_slice(vertices));
        let sprite_count = sprites.len().min(MAX_SPRITES);
        if sprite_count > 0 {
            self.queue.write_buffer(
                &self.sprite_vb,
                0,
                bytemuck::cast_slice(&sprites[..sprite_count]),
            );
        }

        let aspect = self.width as f32 / self.height.max(1) as f32;
        let proj = Mat4::perspective_rh(std::f32::consts::FRAC_PI_4, aspect, 0.1, 4000.0);
        let look = Mat4::look_at_rh(view.eye, view.target, Vec3::Y);
        let forward = (view.target - view.eye).normalize();
        let right = forward.cross(Vec3::Y).normalize();
        let up = right.cross(forward);
        let scene = SceneUniforms {
            view_proj: (proj * look).to_cols_array_2d(),
            cam_right: [right.x, right.y, right.z, 0.0],
            cam_up: [up.x, up.y, up.z, 0.0],
            line_color: [0.45, 0.85, 1.0, MESH_EMISSIVE],
            misc: [view.time, STAR_BRIGHTNESS, 0.0, 0.0],
        };
        self.queue
            .write_buffer(&self.scene_uniform_buffer, 0, bytemuck::bytes_of(&scene));

        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("scene_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &self.targets.hdr_view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear_color),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            rpass.set_bind_group(0, &self.scene_bind_group, &[]);

            rpass.set_pipeline(&self.star_pipeline);
            rpass.set_vertex_buffer(0, self.star_vb.slice(..));
            rpass.draw(0..self.star_count, 0..1);

            rpass.set_pipeline(&self.line_pipeline);
            rpass.set_vertex_buffer(0, self.mesh_vb.slice(..));
            rpass.set_index_buffer(self.mesh_ib.slice(..), wgpu::IndexFormat::Uint32);
            rpass.draw_indexed(0..self.mesh_index_count, 0, 0..1);

            if sprite_count > 0 {
                rpass.set_pipeline(&self.sprite_pipeline);
                rpass.set_vertex_buffer(0, self.quad_vb.slice(..));
                rpass.set_vertex_buffer(1, self.sprite_vb.slice(..));
                rpass.draw(0..6, 0..sprite_count as u32);
            }
        }

        let uniforms = PostUniforms {
            resolution: [self.width as f32 / 2.0, self.height as f32 / 2.0],
            blur_dir: [0.0, 0.0],
            bloom_strength: view.bloom_strength,
            bloom_radius: view.bloom_radius,
            threshold: crate::constants::BLOOM_THRESHOLD,
            glitch: if view.glitch { 1.0 } else { 0.0 },
            time: view.time,
            _pad: [0.0; 3],
        };
        self.post.encode(
            &self.queue,
            &mut encoder,
            &self.targets,
            &swap_view,
            &uniforms,
            self.clear_color,
        );

        self.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }
}
