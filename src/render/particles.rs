use super::helpers;
use crate::core::{
    SMOKE_BASE_Y, SMOKE_HEIGHT, SMOKE_OPACITY, SMOKE_PARTICLE_COUNT, SMOKE_SIZE, SMOKE_SPREAD_XZ,
};
use glam::{Mat4, Vec3, Vec4};
use rand::Rng;
use wgpu::util::DeviceExt;

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct ParticleUniforms {
    pub(crate) view_proj: [[f32; 4]; 4],
    pub(crate) camera_right: [f32; 4],
    pub(crate) camera_up: [f32; 4],
    pub(crate) camera_pos: [f32; 4],
    pub(crate) color: [f32; 4],
    pub(crate) fog: [f32; 4],
}

pub(crate) struct ParticleResources {
    pipeline: wgpu::RenderPipeline,
    uniform_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    instances: wgpu::Buffer,
    count: u32,
}

/// Random positions inside the smoke volume above the stage.
pub(crate) fn scatter_smoke(rng: &mut impl Rng, count: usize) -> Vec<[f32; 3]> {
    (0..count)
        .map(|_| {
            [
                (rng.gen::<f32>() - 0.5) * SMOKE_SPREAD_XZ,
                rng.gen::<f32>() * SMOKE_HEIGHT + SMOKE_BASE_Y,
                (rng.gen::<f32>() - 0.5) * SMOKE_SPREAD_XZ,
            ]
        })
        .collect()
}

impl ParticleResources {
    pub(crate) fn new(device: &wgpu::Device, color_format: wgpu::TextureFormat) -> Self {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("particles_shader"),
            source: wgpu::ShaderSource::Wgsl(crate::core::PARTICLES_WGSL.into()),
        });
        let bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("particles_bgl"),
            entries: &[helpers::uniform_entry(
                0,
                wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
            )],
        });
        let pl = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("particles_pl"),
            bind_group_layouts: &[&bgl],
            push_constant_ranges: &[],
        });
        const INSTANCE_ATTRS: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x3];
        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("particles_pipeline"),
            layout: Some(&pl),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[wgpu::VertexBufferLayout {
                    array_stride: std::mem::size_of::<[f32; 3]>() as wgpu::BufferAddress,
                    step_mode: wgpu::VertexStepMode::Instance,
                    attributes: &INSTANCE_ATTRS,
                }],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            primitive: wgpu::PrimitiveState::default(),
            depth_stencil: Some(helpers::depth_state(false)),
            multisample: wgpu::MultisampleState::default(),
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: color_format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            cache: None,
            multiview: None,
        });

        let positions = scatter_smoke(&mut rand::thread_rng(), SMOKE_PARTICLE_COUNT);
        let instances = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("smoke_instances"),
            contents: bytemuck::cast_slice(&positions),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let uniform_buffer = helpers::create_uniform_buffer(
            device,
            "particles_uniforms",
            &ParticleUniforms {
                view_proj: Mat4::IDENTITY.to_cols_array_2d(),
                camera_right: [1.0, 0.0, 0.0, SMOKE_SIZE * 0.5],
                camera_up: [0.0, 1.0, 0.0, 0.0],
                camera_pos: [0.0; 4],
                color: [1.0, 1.0, 1.0, SMOKE_OPACITY],
                fog: [0.0; 4],
            },
        );
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("particles_bg"),
            layout: &bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        Self {
            pipeline,
            uniform_buffer,
            bind_group,
            instances,
            count: positions.len() as u32,
        }
    }

    #[allow(clippy::too_many_arguments)]
    pub(crate) fn update(
        &self,
        queue: &wgpu::Queue,
        view_proj: Mat4,
        view: Mat4,
        camera_pos: Vec3,
        color: Vec3,
        fog: Vec4,
        offset_y: f32,
    ) {
        // Rows of the view rotation are the camera axes in world space.
        let right = view.row(0).truncate();
        let up = view.row(1).truncate();
        let u = ParticleUniforms {
            view_proj: view_proj.to_cols_array_2d(),
            camera_right: right.extend(SMOKE_SIZE * 0.5).to_array(),
            camera_up: up.extend(offset_y).to_array(),
            camera_pos: camera_pos.extend(1.0).to_array(),
            color: color.extend(SMOKE_OPACITY).to_array(),
            fog: fog.to_array(),
        };
        queue.write_buffer(&self.uniform_buffer, 0, bytemuck::bytes_of(&u));
    }

    pub(crate) fn draw(&self, rpass: &mut wgpu::RenderPass<'_>) {
        rpass.set_pipeline(&self.pipeline);
        rpass.set_bind_group(0, &self.bind_group, &[]);
        rpass.set_vertex_buffer(0, self.instances.slice(..));
        rpass.draw(0..6, 0..self.count);
    }
}
