use glam::Vec3;
use reog_core::ModelPart;
use std::f32::consts::TAU;

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
}

impl Vertex {
    pub const ATTRIBUTES: [wgpu::VertexAttribute; 3] =
        wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3, 2 => Float32x2];

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBUTES,
        }
    }
}

pub struct MeshData {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
}

/// Interleave a model part's attribute streams. Missing normals or UVs fall
/// back to +Y and the origin.
pub fn part_mesh(part: &ModelPart) -> MeshData {
    let vertices = part
        .positions
        .iter()
        .enumerate()
        .map(|(i, p)| Vertex {
            position: p.to_array(),
            normal: part.normals.get(i).copied().unwrap_or(Vec3::Y).to_array(),
            uv: part.uvs.get(i).copied().unwrap_or([0.0, 0.0]),
        })
        .collect();
    MeshData {
        vertices,
        indices: part.indices.clone(),
    }
}

/// Closed cylinder centred on the origin, axis along +Y, counter-clockwise
/// front faces.
pub fn cylinder(radius: f32, height: f32, segments: u32) -> MeshData {
    let segments = segments.max(3);
    let half = height * 0.5;
    let mut vertices = Vec::with_capacity((segments as usize + 1) * 4 + 2);
    let mut indices = Vec::with_capacity(segments as usize * 12);

    // Side: two rings with outward normals; the seam vertex is duplicated so
    // UVs wrap cleanly.
    for i in 0..=segments {
        let u = i as f32 / segments as f32;
        let (s, c) = (u * TAU).sin_cos();
        let normal = [s, 0.0, c];
        vertices.push(Vertex {
            position: [radius * s, half, radius * c],
            normal,
            uv: [u, 0.0],
        });
        vertices.push(Vertex {
            position: [radius * s, -half, radius * c],
            normal,
            uv: [u, 1.0],
        });
    }
    for i in 0..segments {
        let top = i * 2;
        let bottom = top + 1;
        let next_top = top + 2;
        let next_bottom = top + 3;
        indices.extend_from_slice(&[top, bottom, next_bottom, top, next_bottom, next_top]);
    }

    for (y, ny) in [(half, 1.0_f32), (-half, -1.0_f32)] {
        let center = vertices.len() as u32;
        vertices.push(Vertex {
            position: [0.0, y, 0.0],
            normal: [0.0, ny, 0.0],
            uv: [0.5, 0.5],
        });
        for i in 0..=segments {
            let (s, c) = (i as f32 / segments as f32 * TAU).sin_cos();
            vertices.push(Vertex {
                position: [radius * s, y, radius * c],
                normal: [0.0, ny, 0.0],
                uv: [0.5 + 0.5 * s, 0.5 + 0.5 * c],
            });
        }
        for i in 0..segments {
            let a = center + 1 + i;
            let b = a + 1;
            if ny > 0.0 {
                indices.extend_from_slice(&[center, a, b]);
            } else {
                indices.extend_from_slice(&[center, b, a]);
            }
        }
    }

    MeshData { vertices, indices }
}
