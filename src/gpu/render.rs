use wgpu::{BindGroupLayout, CommandEncoder, Device, ShaderStages, TextureFormat, TextureView};

use crate::gpu::GridBuffers;

const BACKGROUND: wgpu::Color = wgpu::Color::BLACK;

/// Fullscreen-triangle pipeline that samples the cell buffer per pixel
pub struct RenderPipeline {
    pipeline: wgpu::RenderPipeline,
    layout: BindGroupLayout,
}

impl RenderPipeline {
    pub fn new(device: &Device, format: TextureFormat) -> Self {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("board-shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("../shaders/render.wgsl").into()),
        });

        // binding 0: cells, binding 1: RenderParams
        let layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("board-layout"),
            entries: &[
                fragment_buffer_entry(0, wgpu::BufferBindingType::Storage { read_only: true }),
                fragment_buffer_entry(1, wgpu::BufferBindingType::Uniform),
            ],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("board-pipeline-layout"),
            bind_group_layouts: &[&layout],
            push_constant_ranges: &[],
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("board-pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(format.into())],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState::default(),
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
            cache: None,
        });

        Self { pipeline, layout }
    }

    /// Layout every `GridBuffers` bind group must be created against
    pub fn layout(&self) -> &BindGroupLayout {
        &self.layout
    }

    /// Clear the target and paint the board held by `board`
    pub fn draw(&self, encoder: &mut CommandEncoder, target: &TextureView, board: &GridBuffers) {
        let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("board-pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: target,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(BACKGROUND),
                    store: wgpu::StoreOp::Store,
                },
            })],
            ..Default::default()
        });

        pass.set_pipeline(&self.pipeline);
        pass.set_bind_group(0, board.bind_group(), &[]);
        pass.draw(0..3, 0..1);
    }
}

fn fragment_buffer_entry(
    binding: u32,
    ty: wgpu::BufferBindingType,
) -> wgpu::BindGroupLayoutEntry {
    wgpu::BindGroupLayoutEntry {
        binding,
        visibility: ShaderStages::FRAGMENT,
        ty: wgpu::BindingType::Buffer {
            ty,
            has_dynamic_offset: false,
            min_binding_size: None,
        },
        count: None,
    }
}
