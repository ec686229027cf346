//! Bloom/glitch post chain, encoded as four fullscreen passes:
//! bright -> blur_h -> blur_v -> composite.
//!
//! Every stage owns its uniform slot and its source bind group. All stage
//! uniforms are staged before encoding; queued buffer writes land before
//! the submitted passes execute, so per-pass rewrites of one shared buffer
//! would leave every pass reading the final values.

use super::targets::RenderTargets;
use super::{helpers, PostUniforms};

const BRIGHT: usize = 0;
const BLUR_H: usize = 1;
const BLUR_V: usize = 2;
const COMPOSITE: usize = 3;
const STAGE_COUNT: usize = 4;

pub(crate) struct PostChain {
    src_layout: wgpu::BindGroupLayout,
    bloom_layout: wgpu::BindGroupLayout,
    stage_uniforms: Vec<wgpu::Buffer>,
    bright_pipeline: wgpu::RenderPipeline,
    blur_pipeline: wgpu::RenderPipeline,
    composite_pipeline: wgpu::RenderPipeline,
    inputs: Option<StageInputs>,
}

/// Source bindings, rebuilt whenever the offscreen targets change size.
struct StageInputs {
    bright: wgpu::BindGroup,
    blur_h: wgpu::BindGroup,
    blur_v: wgpu::BindGroup,
    composite: wgpu::BindGroup,
    composite_bloom: wgpu::BindGroup,
}

fn sampled_texture_entries() -> [wgpu::BindGroupLayoutEntry; 2] {
    [
        wgpu::BindGroupLayoutEntry {
            binding: 0,
            visibility: wgpu::ShaderStages::FRAGMENT,
            ty: wgpu::BindingType::Texture {
                multisampled: false,
                view_dimension: wgpu::TextureViewDimension::D2,
                sample_type: wgpu::TextureSampleType::Float { filterable: true },
            },
            count: None,
        },
        wgpu::BindGroupLayoutEntry {
            binding: 1,
            visibility: wgpu::ShaderStages::FRAGMENT,
            ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
            count: None,
        },
    ]
}

impl PostChain {
    pub(crate) fn new(
        device: &wgpu::Device,
        shader: &wgpu::ShaderModule,
        bloom_format: wgpu::TextureFormat,
        swap_format: wgpu::TextureFormat,
    ) -> Self {
        let [tex_entry, samp_entry] = sampled_texture_entries();
        let src_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("post_src_layout"),
            entries: &[
                tex_entry,
                samp_entry,
                wgpu::BindGroupLayoutEntry {
                    binding: 2,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                },
            ],
        });
        let bloom_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("post_bloom_layout"),
            entries: &sampled_texture_entries(),
        });

        let stage_uniforms = (0..STAGE_COUNT)
            .map(|_| {
                device.create_buffer(&wgpu::BufferDescriptor {
                    label: Some("post_stage_uniforms"),
                    size: std::mem::size_of::<PostUniforms>() as u64,
                    usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
                    mapped_at_creation: false,
                })
            })
            .collect();

        let single_input = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("post_single_input"),
            bind_group_layouts: &[&src_layout],
            push_constant_ranges: &[],
        });
        // Composite reads the scene and the blurred bloom at once.
        let dual_input = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("post_dual_input"),
            bind_group_layouts: &[&src_layout, &bloom_layout],
            push_constant_ranges: &[],
        });

        let bright_pipeline =
            helpers::make_post_pipeline(device, &single_input, shader, "fs_bright", bloom_format, None);
        let blur_pipeline =
            helpers::make_post_pipeline(device, &single_input, shader, "fs_blur", bloom_format, None);
        let composite_pipeline = helpers::make_post_pipeline(
            device,
            &dual_input,
            shader,
            "fs_composite",
            swap_format,
            Some(wgpu::BlendState::REPLACE),
        );

        Self {
            src_layout,
            bloom_layout,
            stage_uniforms,
            bright_pipeline,
            blur_pipeline,
            composite_pipeline,
            inputs: None,
        }
    }

    pub(crate) fn bind(
        &mut self,
        device: &wgpu::Device,
        targets: &RenderTargets,
        sampler: &wgpu::Sampler,
    ) {
        let src = |label: &str, view: &wgpu::TextureView, stage: usize| {
            device.create_bind_group(&wgpu::BindGroupDescriptor {
                label: Some(label),
                layout: &self.src_layout,
                entries: &[
                    wgpu::BindGroupEntry {
                        binding: 0,
                        resource: wgpu::BindingResource::TextureView(view),
                    },
                    wgpu::BindGroupEntry {
                        binding: 1,
                        resource: wgpu::BindingResource::Sampler(sampler),
                    },
                    wgpu::BindGroupEntry {
                        binding: 2,
                        resource: self.stage_uniforms[stage].as_entire_binding(),
                    },
                ],
            })
        };
        let composite_bloom = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("post_composite_bloom"),
            layout: &self.bloom_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&targets.bloom_a_view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(sampler),
                },
            ],
        });
        self.inputs = Some(StageInputs {
            bright: src("post_bright", &targets.hdr_view, BRIGHT),
            blur_h: src("post_blur_h", &targets.bloom_a_view, BLUR_H),
            blur_v: src("post_blur_v", &targets.bloom_b_view, BLUR_V),
            composite: src("post_composite", &targets.hdr_view, COMPOSITE),
            composite_bloom,
        });
    }

    /// Stages all four uniform slots for this frame, then encodes the
    /// chain. The blur passes ping-pong bloom A -> B -> A; the composite
    /// pass lands on the swapchain.
    pub(crate) fn encode(
        &self,
        queue: &wgpu::Queue,
        encoder: &mut wgpu::CommandEncoder,
        targets: &RenderTargets,
        swap_view: &wgpu::TextureView,
        frame: &PostUniforms,
        clear: wgpu::Color,
    ) {
        let inputs = match &self.inputs {
            Some(i) => i,
            None => return,
        };

        let mut stage = *frame;
        stage.blur_dir = [0.0, 0.0];
        queue.write_buffer(&self.stage_uniforms[BRIGHT], 0, bytemuck::bytes_of(&stage));
        queue.write_buffer(&self.stage_uniforms[COMPOSITE], 0, bytemuck::bytes_of(&stage));
        stage.blur_dir = [1.0, 0.0];
        queue.write_buffer(&self.stage_uniforms[BLUR_H], 0, bytemuck::bytes_of(&stage));
        stage.blur_dir = [0.0, 1.0];
        queue.write_buffer(&self.stage_uniforms[BLUR_V], 0, bytemuck::bytes_of(&stage));

        let passes: [(
            &str,
            &wgpu::TextureView,
            &wgpu::RenderPipeline,
            &wgpu::BindGroup,
            Option<&wgpu::BindGroup>,
            wgpu::Color,
        ); STAGE_COUNT] = [
            (
                "bright_pass",
                &targets.bloom_a_view,
                &self.bright_pipeline,
                &inputs.bright,
                None,
                wgpu::Color::BLACK,
            ),
            (
                "blur_h",
                &targets.bloom_b_view,
                &self.blur_pipeline,
                &inputs.blur_h,
                None,
                wgpu::Color::BLACK,
            ),
            (
                "blur_v",
                &targets.bloom_a_view,
                &self.blur_pipeline,
                &inputs.blur_v,
                None,
                wgpu::Color::BLACK,
            ),
            (
                "composite",
                swap_view,
                &self.composite_pipeline,
                &inputs.composite,
                Some(&inputs.composite_bloom),
                clear,
            ),
        ];

        for (label, target, pipeline, group0, group1, load) in passes {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some(label),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: target,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(load),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            pass.set_pipeline(pipeline);
            pass.set_bind_group(0, group0, &[]);
            if let Some(g) = group1 {
                pass.set_bind_group(1, g, &[]);
            }
            pass.draw(0..3, 0..1);
        }
    }
}
