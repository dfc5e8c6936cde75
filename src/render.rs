use crate::core::*;
use glam::{Mat4, Vec3, Vec4};
use reog_core::{Camera, SceneAnimation, TargetModel};
use web_sys as web;
use wgpu::util::DeviceExt;

pub(crate) mod geometry;
mod helpers;
mod particles;

use geometry::{MeshData, Vertex};
use particles::ParticleResources;

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct SpotUniform {
    position_range: [f32; 4],
    direction_outer: [f32; 4],
    color_inner: [f32; 4],
}

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct GlobalUniforms {
    view_proj: [[f32; 4]; 4],
    camera_pos: [f32; 4],
    fog: [f32; 4],
    hemi_sky: [f32; 4],
    hemi_ground: [f32; 4],
    key_spot: SpotUniform,
    moving_spot: SpotUniform,
}

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct ObjectUniforms {
    model: [[f32; 4]; 4],
    base_color: [f32; 4],
    emissive: [f32; 4],
}

/// One drawable mesh with its own uniforms and base-colour texture.
struct MeshGpu {
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    index_count: u32,
    uniform_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
}

pub struct GpuState {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    depth_view: wgpu::TextureView,

    scene_pipeline: wgpu::RenderPipeline,
    globals_buffer: wgpu::Buffer,
    globals_bind_group: wgpu::BindGroup,
    object_bgl: wgpu::BindGroupLayout,
    sampler: wgpu::Sampler,
    white_view: wgpu::TextureView,

    stage: MeshGpu,
    model_parts: Option<Vec<MeshGpu>>,
    particles: ParticleResources,

    width: u32,
    height: u32,
    clear_color: wgpu::Color,
}

impl GpuState {
    pub async fn new(canvas: &web::HtmlCanvasElement) -> anyhow::Result<Self> {
        let width = canvas.width().max(1);
        let height = canvas.height().max(1);

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
            .or_else(|| caps.formats.first().copied())
            .ok_or_else(|| anyhow::anyhow!("surface reports no formats"))?;
        let alpha_mode = caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);
        let (_, depth_view) = helpers::create_depth_texture(&device, width, height);

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("scene_shader"),
            source: wgpu::ShaderSource::Wgsl(SCENE_WGSL.into()),
        });
        let globals_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("globals_bgl"),
            entries: &[helpers::uniform_entry(
                0,
                wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
            )],
        });
        let object_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("object_bgl"),
            entries: &[
                helpers::uniform_entry(0, wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT),
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 2,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        });
        let pl = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("scene_pl"),
            bind_group_layouts: &[&globals_bgl, &object_bgl],
            push_constant_ranges: &[],
        });
        let scene_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("scene_pipeline"),
            layout: Some(&pl),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[Vertex::layout()],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            // Model triangles are double-sided, matching the picking test.
            primitive: wgpu::PrimitiveState {
                cull_mode: None,
                ..Default::default()
            },
            depth_stencil: Some(helpers::depth_state(true)),
            multisample: wgpu::MultisampleState::default(),
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            cache: None,
            multiview: None,
        });

        let globals_buffer = helpers::create_uniform_buffer(
            &device,
            "globals",
            &<GlobalUniforms as bytemuck::Zeroable>::zeroed(),
        );
        let globals_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("globals_bg"),
            layout: &globals_bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: globals_buffer.as_entire_binding(),
            }],
        });
        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("base_sampler"),
            address_mode_u: wgpu::AddressMode::Repeat,
            address_mode_v: wgpu::AddressMode::Repeat,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            ..Default::default()
        });
        let (_, white_view) =
            helpers::create_rgba_texture(&device, &queue, "white_tex", 1, 1, &[255; 4]);

        let stage_mesh = geometry::cylinder(STAGE_RADIUS, STAGE_HEIGHT, STAGE_SEGMENTS);
        let stage = upload_mesh(
            &device,
            &object_bgl,
            &sampler,
            &white_view,
            "stage",
            &stage_mesh,
        );
        let particles = ParticleResources::new(&device, format);

        let bg = srgb_hex_to_linear(BACKGROUND_HEX);
        Ok(Self {
            surface,
            device,
            queue,
            config,
            depth_view,
            scene_pipeline,
            globals_buffer,
            globals_bind_group,
            object_bgl,
            sampler,
            white_view,
            stage,
            model_parts: None,
            particles,
            width,
            height,
            clear_color: wgpu::Color {
                r: bg.x as f64,
                g: bg.y as f64,
                b: bg.z as f64,
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
            self.reconfigure();
        }
    }

    /// Reconfigure the surface at the current size, e.g. after it was lost.
    pub fn reconfigure(&mut self) {
        self.config.width = self.width;
        self.config.height = self.height;
        self.surface.configure(&self.device, &self.config);
        let (_, depth_view) = helpers::create_depth_texture(&self.device, self.width, self.height);
        self.depth_view = depth_view;
    }

    /// Upload the model's meshes and textures the first time it is seen.
    pub fn sync_model(&mut self, model: Option<&TargetModel>) {
        let Some(model) = model else { return };
        if self.model_parts.is_some() {
            return;
        }
        let texture_views: Vec<wgpu::TextureView> = model
            .textures()
            .iter()
            .enumerate()
            .map(|(i, t)| {
                let label = format!("model_tex_{}", i);
                let (_, view) = helpers::create_rgba_texture(
                    &self.device,
                    &self.queue,
                    &label,
                    t.width,
                    t.height,
                    &t.rgba,
                );
                view
            })
            .collect();
        let parts = model
            .parts()
            .iter()
            .map(|part| {
                let view = part
                    .base_color_texture
                    .and_then(|i| texture_views.get(i))
                    .unwrap_or(&self.white_view);
                upload_mesh(
                    &self.device,
                    &self.object_bgl,
                    &self.sampler,
                    view,
                    &part.name,
                    &geometry::part_mesh(part),
                )
            })
            .collect::<Vec<_>>();
        log::info!("[assets] uploaded {} model parts to the GPU", parts.len());
        self.model_parts = Some(parts);
    }

    pub fn render(
        &mut self,
        camera: &Camera,
        model: Option<&TargetModel>,
        animation: &SceneAnimation,
    ) -> Result<(), wgpu::SurfaceError> {
        let view = camera.view_matrix();
        let view_proj = camera.projection_matrix() * view;
        let fog = srgb_hex_to_linear(BACKGROUND_HEX).extend(FOG_DENSITY);
        self.write_globals(view_proj, camera.position, fog, animation);

        let stage_color = srgb_hex_to_linear(STAGE_HEX).extend(1.0);
        write_object(
            &self.queue,
            &self.stage,
            Mat4::from_translation(Vec3::new(0.0, STAGE_CENTER_Y, 0.0)),
            stage_color,
            Vec3::ZERO,
        );
        if let (Some(model), Some(parts)) = (model, &self.model_parts) {
            let matrix = model.transform.matrix();
            for (part, gpu) in model.parts().iter().zip(parts) {
                write_object(&self.queue, gpu, matrix, part.base_color, part.emphasis.radiance());
            }
        }
        self.particles.update(
            &self.queue,
            view_proj,
            view,
            camera.position,
            srgb_hex_to_linear(SMOKE_HEX),
            fog,
            animation.smoke_offset_y,
        );

        let frame = self.surface.get_current_texture()?;
        let target = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("encoder"),
            });
        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("scene_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &target,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear_color),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            rpass.set_pipeline(&self.scene_pipeline);
            rpass.set_bind_group(0, &self.globals_bind_group, &[]);
            draw_mesh(&mut rpass, &self.stage);
            if model.is_some() {
                for part in self.model_parts.iter().flatten() {
                    draw_mesh(&mut rpass, part);
                }
            }
            self.particles.draw(&mut rpass);
        }
        self.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }

    fn write_globals(&self, view_proj: Mat4, eye: Vec3, fog: Vec4, animation: &SceneAnimation) {
        let hemi_sky = srgb_hex_to_linear(HEMI_SKY_HEX) * HEMI_INTENSITY;
        let hemi_ground = srgb_hex_to_linear(HEMI_GROUND_HEX) * HEMI_INTENSITY;
        let g = GlobalUniforms {
            view_proj: view_proj.to_cols_array_2d(),
            camera_pos: eye.extend(1.0).to_array(),
            fog: fog.to_array(),
            hemi_sky: hemi_sky.extend(1.0).to_array(),
            hemi_ground: hemi_ground.extend(1.0).to_array(),
            key_spot: spot_uniform(
                KEY_SPOT_POSITION,
                KEY_SPOT_HEX,
                KEY_SPOT_INTENSITY,
                KEY_SPOT_RANGE,
                KEY_SPOT_ANGLE,
                KEY_SPOT_PENUMBRA,
            ),
            moving_spot: spot_uniform(
                animation.moving_spot_position,
                MOVING_SPOT_HEX,
                MOVING_SPOT_INTENSITY,
                MOVING_SPOT_RANGE,
                MOVING_SPOT_ANGLE,
                MOVING_SPOT_PENUMBRA,
            ),
        };
        self.queue
            .write_buffer(&self.globals_buffer, 0, bytemuck::bytes_of(&g));
    }
}

fn spot_uniform(
    position: Vec3,
    hex: u32,
    intensity: f32,
    range: f32,
    angle: f32,
    penumbra: f32,
) -> SpotUniform {
    let (cos_inner, cos_outer) = spot_cone_cosines(angle, penumbra);
    let direction = (SPOT_TARGET - position).normalize_or_zero();
    SpotUniform {
        position_range: position.extend(range).to_array(),
        direction_outer: direction.extend(cos_outer).to_array(),
        color_inner: (srgb_hex_to_linear(hex) * intensity).extend(cos_inner).to_array(),
    }
}

fn upload_mesh(
    device: &wgpu::Device,
    layout: &wgpu::BindGroupLayout,
    sampler: &wgpu::Sampler,
    texture: &wgpu::TextureView,
    label: &str,
    mesh: &MeshData,
) -> MeshGpu {
    let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some(label),
        contents: bytemuck::cast_slice(&mesh.vertices),
        usage: wgpu::BufferUsages::VERTEX,
    });
    let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some(label),
        contents: bytemuck::cast_slice(&mesh.indices),
        usage: wgpu::BufferUsages::INDEX,
    });
    let uniform_buffer = helpers::create_uniform_buffer(
        device,
        label,
        &ObjectUniforms {
            model: Mat4::IDENTITY.to_cols_array_2d(),
            base_color: [1.0; 4],
            emissive: [0.0; 4],
        },
    );
    let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some(label),
        layout,
        entries: &[
            wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            },
            wgpu::BindGroupEntry {
                binding: 1,
                resource: wgpu::BindingResource::TextureView(texture),
            },
            wgpu::BindGroupEntry {
                binding: 2,
                resource: wgpu::BindingResource::Sampler(sampler),
            },
        ],
    });
    MeshGpu {
        vertex_buffer,
        index_buffer,
        index_count: mesh.indices.len() as u32,
        uniform_buffer,
        bind_group,
    }
}

fn write_object(queue: &wgpu::Queue, mesh: &MeshGpu, model: Mat4, base_color: Vec4, emissive: Vec3) {
    let u = ObjectUniforms {
        model: model.to_cols_array_2d(),
        base_color: base_color.to_array(),
        emissive: emissive.extend(0.0).to_array(),
    };
    queue.write_buffer(&mesh.uniform_buffer, 0, bytemuck::bytes_of(&u));
}

fn draw_mesh(rpass: &mut wgpu::RenderPass<'_>, mesh: &MeshGpu) {
    rpass.set_bind_group(1, &mesh.bind_group, &[]);
    rpass.set_vertex_buffer(0, mesh.vertex_buffer.slice(..));
    rpass.set_index_buffer(mesh.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
    rpass.draw_indexed(0..mesh.index_count, 0, 0..1);
}
