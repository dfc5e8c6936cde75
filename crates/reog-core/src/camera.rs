//! Perspective camera with a yaw/pitch orientation.
//!
//! Orbit mode keeps the camera aimed at the controller target through
//! [`Camera::look_at`]; first-person mode integrates yaw and pitch directly.

use crate::config::CameraConfig;
use glam::{Mat4, Vec2, Vec3, Vec4};
use std::f32::consts::FRAC_PI_2;

/// Pitch stays just short of straight up/down so the view basis never
/// degenerates.
pub const PITCH_LIMIT: f32 = FRAC_PI_2 - 0.01;

/// A half-line in world space. `dir` is unit length.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub dir: Vec3,
}

impl Ray {
    #[inline]
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.dir * t
    }
}

/// Right-handed camera; yaw 0 and pitch 0 look down -Z.
#[derive(Clone, Debug)]
pub struct Camera {
    pub position: Vec3,
    /// Radians around +Y; positive turns left.
    pub yaw: f32,
    /// Radians above the horizon.
    pub pitch: f32,
    pub aspect: f32,
    pub fovy_radians: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Camera {
    pub fn new(config: &CameraConfig, aspect: f32) -> Self {
        let mut camera = Self {
            position: config.default_position,
            yaw: 0.0,
            pitch: 0.0,
            aspect: sanitize_aspect(aspect),
            fovy_radians: config.fov_y_degrees.to_radians(),
            znear: config.near,
            zfar: config.far,
        };
        camera.look_at(config.default_target);
        camera
    }

    /// Unit view direction.
    pub fn forward(&self) -> Vec3 {
        let (sy, cy) = self.yaw.sin_cos();
        let (sp, cp) = self.pitch.sin_cos();
        Vec3::new(-sy * cp, sp, -cy * cp)
    }

    /// Aim at `target`. A target at the camera position leaves the
    /// orientation unchanged.
    pub fn look_at(&mut self, target: Vec3) {
        let d = target - self.position;
        if d.length_squared() < 1e-12 {
            return;
        }
        let d = d.normalize();
        self.pitch = d.y.clamp(-1.0, 1.0).asin().clamp(-PITCH_LIMIT, PITCH_LIMIT);
        self.yaw = (-d.x).atan2(-d.z);
    }

    pub fn clamp_pitch(&mut self) {
        self.pitch = self.pitch.clamp(-PITCH_LIMIT, PITCH_LIMIT);
    }

    pub fn set_viewport(&mut self, width: f32, height: f32) {
        if width > 0.0 && height > 0.0 {
            self.aspect = width / height;
        }
    }

    /// Compute the clip-space projection matrix.
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fovy_radians, self.aspect, self.znear, self.zfar)
    }

    /// Compute the view matrix that transforms world to view space.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_to_rh(self.position, self.forward(), Vec3::Y)
    }

    pub fn view_proj(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// World-space ray through a point in normalized device coordinates
    /// (x right, y up, both in [-1, 1]).
    pub fn ray_from_ndc(&self, ndc: Vec2) -> Ray {
        let inv = self.view_proj().inverse();
        let p_far = inv * Vec4::new(ndc.x, ndc.y, 1.0, 1.0);
        let far: Vec3 = p_far.truncate() / p_far.w;
        let dir = (far - self.position).normalize_or_zero();
        Ray {
            origin: self.position,
            dir: if dir == Vec3::ZERO { self.forward() } else { dir },
        }
    }

    /// Project a world point to normalized device coordinates. `None` when the
    /// point is behind the camera.
    pub fn project_to_ndc(&self, point: Vec3) -> Option<Vec2> {
        let clip = self.view_proj() * point.extend(1.0);
        (clip.w > 1e-6).then(|| Vec2::new(clip.x / clip.w, clip.y / clip.w))
    }
}

fn sanitize_aspect(aspect: f32) -> f32 {
    if aspect.is_finite() && aspect > 0.0 {
        aspect
    } else {
        1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn camera() -> Camera {
        Camera::new(&CameraConfig::default(), 1.5)
    }

    #[test]
    fn look_at_points_forward_at_target() {
        let mut cam = camera();
        cam.position = Vec3::new(0.0, 0.0, 5.0);
        cam.look_at(Vec3::ZERO);
        assert!((cam.forward() - Vec3::NEG_Z).length() < 1e-5);

        cam.look_at(Vec3::new(-10.0, 0.0, 5.0));
        assert!((cam.forward() - Vec3::NEG_X).length() < 1e-5);
    }

    #[test]
    fn center_ray_follows_forward() {
        let cam = camera();
        let ray = cam.ray_from_ndc(Vec2::ZERO);
        assert!((ray.dir - cam.forward()).length() < 1e-3);
        assert_eq!(ray.origin, cam.position);
    }

    #[test]
    fn projected_point_round_trips_through_ray() {
        let cam = camera();
        let p = Vec3::new(0.3, 1.4, 0.5);
        let ndc = cam.project_to_ndc(p).unwrap();
        let ray = cam.ray_from_ndc(ndc);
        let t = (p - ray.origin).length();
        assert!((ray.at(t) - p).length() < 1e-3);
    }

    #[test]
    fn zero_viewport_keeps_aspect() {
        let mut cam = camera();
        cam.set_viewport(0.0, 600.0);
        assert_eq!(cam.aspect, 1.5);
        cam.set_viewport(800.0, 400.0);
        assert_eq!(cam.aspect, 2.0);
    }
}
