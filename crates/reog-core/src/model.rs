//! The target model: baked mesh parts, their bounds, and ray picking.

use crate::camera::Ray;
use crate::error::{Result, ShowcaseError};
use glam::{Mat4, Quat, Vec3, Vec4};

/// Stable identifier of a mesh part; index into [`TargetModel::parts`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PartId(pub u32);

/// Self-illumination of a part, added on top of lit shading.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Emphasis {
    pub color: Vec3,
    pub intensity: f32,
}

impl Emphasis {
    pub const NONE: Emphasis = Emphasis {
        color: Vec3::ZERO,
        intensity: 1.0,
    };

    /// Colour multiplied by intensity, as the shader consumes it.
    pub fn radiance(&self) -> Vec3 {
        self.color * self.intensity
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    pub const EMPTY: Aabb = Aabb {
        min: Vec3::splat(f32::INFINITY),
        max: Vec3::splat(f32::NEG_INFINITY),
    };

    pub fn from_points<'a>(points: impl IntoIterator<Item = &'a Vec3>) -> Self {
        let mut b = Self::EMPTY;
        for p in points {
            b.include(*p);
        }
        b
    }

    pub fn include(&mut self, p: Vec3) {
        self.min = self.min.min(p);
        self.max = self.max.max(p);
    }

    pub fn union(&self, other: &Aabb) -> Aabb {
        Aabb {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y || self.min.z > self.max.z
    }

    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Slab test. Returns the entry distance (0 when the origin is inside).
    pub fn ray_entry(&self, ray: &Ray) -> Option<f32> {
        let mut t_min = 0.0_f32;
        let mut t_max = f32::INFINITY;
        for axis in 0..3 {
            let o = ray.origin[axis];
            let d = ray.dir[axis];
            if d.abs() < 1e-12 {
                if o < self.min[axis] || o > self.max[axis] {
                    return None;
                }
                continue;
            }
            let inv = 1.0 / d;
            let mut t0 = (self.min[axis] - o) * inv;
            let mut t1 = (self.max[axis] - o) * inv;
            if t0 > t1 {
                std::mem::swap(&mut t0, &mut t1);
            }
            t_min = t_min.max(t0);
            t_max = t_max.min(t1);
            if t_min > t_max {
                return None;
            }
        }
        Some(t_min)
    }
}

/// Decoded RGBA8 image referenced by parts.
#[derive(Clone, Debug, PartialEq)]
pub struct TextureImage {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

/// One triangle mesh primitive with node transforms already applied.
#[derive(Clone, Debug)]
pub struct ModelPart {
    pub id: PartId,
    pub name: String,
    pub positions: Vec<Vec3>,
    pub normals: Vec<Vec3>,
    pub uvs: Vec<[f32; 2]>,
    pub indices: Vec<u32>,
    pub base_color: Vec4,
    /// Index into [`TargetModel::textures`].
    pub base_color_texture: Option<usize>,
    pub emphasis: Emphasis,
}

impl ModelPart {
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    fn triangles(&self) -> impl Iterator<Item = [Vec3; 3]> + '_ {
        self.indices.chunks_exact(3).filter_map(|tri| {
            let a = *self.positions.get(tri[0] as usize)?;
            let b = *self.positions.get(tri[1] as usize)?;
            let c = *self.positions.get(tri[2] as usize)?;
            Some([a, b, c])
        })
    }
}

/// Placement of the whole model in the scene; rotation is about +Y only.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ModelTransform {
    pub translation: Vec3,
    pub rotation_y: f32,
    pub scale: f32,
}

impl Default for ModelTransform {
    fn default() -> Self {
        Self {
            translation: Vec3::ZERO,
            rotation_y: 0.0,
            scale: 1.0,
        }
    }
}

impl ModelTransform {
    pub fn matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(
            Vec3::splat(self.scale),
            Quat::from_rotation_y(self.rotation_y),
            self.translation,
        )
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hit {
    pub part: PartId,
    pub distance: f32,
    pub point_world: Vec3,
    /// Hit point in the model's own frame, comparable with [`TargetModel::bounds`].
    pub point_local: Vec3,
}

/// The loaded artifact. Parts share one [`ModelTransform`].
#[derive(Clone, Debug)]
pub struct TargetModel {
    parts: Vec<ModelPart>,
    textures: Vec<TextureImage>,
    bounds: Aabb,
    pub transform: ModelTransform,
}

impl TargetModel {
    /// Fails with [`ShowcaseError::EmptyModel`] when no part has a triangle.
    pub fn new(mut parts: Vec<ModelPart>, textures: Vec<TextureImage>) -> Result<Self> {
        parts.retain(|p| p.triangle_count() > 0);
        if parts.is_empty() {
            return Err(ShowcaseError::EmptyModel);
        }
        for (i, part) in parts.iter_mut().enumerate() {
            part.id = PartId(i as u32);
        }
        let bounds = parts
            .iter()
            .map(|p| Aabb::from_points(&p.positions))
            .fold(Aabb::EMPTY, |acc, b| acc.union(&b));
        Ok(Self {
            parts,
            textures,
            bounds,
            transform: ModelTransform::default(),
        })
    }

    pub fn parts(&self) -> &[ModelPart] {
        &self.parts
    }

    pub fn parts_mut(&mut self) -> &mut [ModelPart] {
        &mut self.parts
    }

    pub fn part(&self, id: PartId) -> Option<&ModelPart> {
        self.parts.get(id.0 as usize)
    }

    pub fn textures(&self) -> &[TextureImage] {
        &self.textures
    }

    /// Bounds in the model's local frame.
    pub fn bounds(&self) -> Aabb {
        self.bounds
    }

    /// Nearest triangle hit along `ray` (world space). Triangles are
    /// double-sided.
    pub fn hit_test(&self, ray: &Ray) -> Option<Hit> {
        let to_local = self.transform.matrix().inverse();
        let origin = to_local.transform_point3(ray.origin);
        let dir = to_local.transform_vector3(ray.dir);
        let local_ray = Ray { origin, dir };
        // The slab test is only a rejection filter; `t` is measured along
        // `dir`, which may be scaled, so it converts back via world points.
        self.bounds.ray_entry(&local_ray)?;

        let mut best: Option<(PartId, f32)> = None;
        for part in &self.parts {
            for [a, b, c] in part.triangles() {
                if let Some(t) = intersect_triangle(&local_ray, a, b, c) {
                    if best.map_or(true, |(_, bt)| t < bt) {
                        best = Some((part.id, t));
                    }
                }
            }
        }
        let (part, t) = best?;
        let point_local = local_ray.at(t);
        let point_world = self.transform.matrix().transform_point3(point_local);
        Some(Hit {
            part,
            distance: (point_world - ray.origin).length(),
            point_world,
            point_local,
        })
    }
}

/// Möller–Trumbore; returns `t` along `ray.dir` for hits in front of the origin.
pub fn intersect_triangle(ray: &Ray, a: Vec3, b: Vec3, c: Vec3) -> Option<f32> {
    const EPS: f32 = 1e-7;
    let e1 = b - a;
    let e2 = c - a;
    let p = ray.dir.cross(e2);
    let det = e1.dot(p);
    if det.abs() < EPS {
        return None;
    }
    let inv_det = 1.0 / det;
    let s = ray.origin - a;
    let u = s.dot(p) * inv_det;
    if !(0.0..=1.0).contains(&u) {
        return None;
    }
    let q = s.cross(e1);
    let v = ray.dir.dot(q) * inv_det;
    if v < 0.0 || u + v > 1.0 {
        return None;
    }
    let t = e2.dot(q) * inv_det;
    (t > EPS).then_some(t)
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    /// Axis-aligned box part spanning `min..max`, outward-wound.
    pub fn box_part(name: &str, min: Vec3, max: Vec3) -> ModelPart {
        let corners = [
            Vec3::new(min.x, min.y, min.z),
            Vec3::new(max.x, min.y, min.z),
            Vec3::new(max.x, max.y, min.z),
            Vec3::new(min.x, max.y, min.z),
            Vec3::new(min.x, min.y, max.z),
            Vec3::new(max.x, min.y, max.z),
            Vec3::new(max.x, max.y, max.z),
            Vec3::new(min.x, max.y, max.z),
        ];
        let indices = vec![
            0, 2, 1, 0, 3, 2, // -z
            4, 5, 6, 4, 6, 7, // +z
            0, 4, 7, 0, 7, 3, // -x
            1, 2, 6, 1, 6, 5, // +x
            0, 1, 5, 0, 5, 4, // -y
            3, 7, 6, 3, 6, 2, // +y
        ];
        ModelPart {
            id: PartId(0),
            name: name.to_string(),
            positions: corners.to_vec(),
            normals: corners.iter().map(|c| (*c - (min + max) * 0.5).normalize()).collect(),
            uvs: vec![[0.0, 0.0]; 8],
            indices,
            base_color: Vec4::ONE,
            base_color_texture: None,
            emphasis: Emphasis::NONE,
        }
    }
}
