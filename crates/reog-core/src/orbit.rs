use crate::camera::Camera;
use crate::config::OrbitConfig;
use glam::Vec3;
use std::f32::consts::{PI, TAU};

// Keeps the polar angle away from the poles.
const POLAR_EPSILON: f32 = 1e-3;

/// Pointer-driven orbit/dolly around a target point.
///
/// Input accumulates as pending spherical motion and is applied by
/// [`OrbitController::update`], once per frame. With damping enabled the
/// pending rotation decays geometrically, giving the drag some inertia.
#[derive(Clone, Debug)]
pub struct OrbitController {
    pub target: Vec3,
    enabled: bool,
    damping: bool,
    damping_factor: f32,
    rotate_speed: f32,
    min_distance: f32,
    max_distance: f32,
    pending_theta: f32,
    pending_phi: f32,
    pending_scale: f32,
}

impl OrbitController {
    pub fn new(config: &OrbitConfig, target: Vec3) -> Self {
        Self {
            target,
            enabled: true,
            damping: config.damping,
            damping_factor: config.damping_factor,
            rotate_speed: config.rotate_speed,
            min_distance: config.min_distance,
            max_distance: config.max_distance,
            pending_theta: 0.0,
            pending_phi: 0.0,
            pending_scale: 1.0,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Queue a rotation from a pointer drag of `dx`/`dy` pixels. A drag across
    /// the full viewport height turns one full revolution.
    pub fn rotate_by_pixels(&mut self, dx: f32, dy: f32, viewport_height: f32) {
        if !self.enabled {
            return;
        }
        let h = viewport_height.max(1.0);
        self.pending_theta -= TAU * dx / h * self.rotate_speed;
        self.pending_phi -= TAU * dy / h * self.rotate_speed;
    }

    /// Move toward the target by `factor`. Returns false when ignored.
    pub fn dolly_in(&mut self, factor: f32) -> bool {
        if !self.enabled || !(factor > 0.0) {
            return false;
        }
        self.pending_scale /= factor;
        true
    }

    /// Move away from the target by `factor`. Returns false when ignored.
    pub fn dolly_out(&mut self, factor: f32) -> bool {
        if !self.enabled || !(factor > 0.0) {
            return false;
        }
        self.pending_scale *= factor;
        true
    }

    /// Jump to `target` and drop any queued motion.
    pub fn reset(&mut self, target: Vec3) {
        self.target = target;
        self.pending_theta = 0.0;
        self.pending_phi = 0.0;
        self.pending_scale = 1.0;
    }

    pub fn has_pending_motion(&self) -> bool {
        self.pending_theta.abs() > 1e-6
            || self.pending_phi.abs() > 1e-6
            || (self.pending_scale - 1.0).abs() > 1e-6
    }

    /// Apply queued motion to `camera` and re-aim it at the target.
    /// Does nothing while disabled. Without queued motion the position is
    /// left alone, so a camera parked outside the distance limits (after a
    /// first-person walk) stays put until the next drag or dolly.
    pub fn update(&mut self, camera: &mut Camera) -> bool {
        if !self.enabled {
            return false;
        }
        if !self.has_pending_motion() {
            self.pending_theta = 0.0;
            self.pending_phi = 0.0;
            self.pending_scale = 1.0;
            camera.look_at(self.target);
            return true;
        }
        let offset = camera.position - self.target;
        let radius = offset.length();
        let (mut theta, mut phi) = if radius > 1e-6 {
            (
                offset.x.atan2(offset.z),
                (offset.y / radius).clamp(-1.0, 1.0).acos(),
            )
        } else {
            (0.0, PI / 2.0)
        };

        let step = if self.damping { self.damping_factor } else { 1.0 };
        theta += self.pending_theta * step;
        phi += self.pending_phi * step;
        phi = phi.clamp(POLAR_EPSILON, PI - POLAR_EPSILON);

        let radius = if (self.pending_scale - 1.0).abs() > 1e-6 {
            (radius.max(self.min_distance) * self.pending_scale)
                .clamp(self.min_distance, self.max_distance)
        } else {
            radius
        };
        let sin_phi = phi.sin();
        let offset = Vec3::new(
            radius * sin_phi * theta.sin(),
            radius * phi.cos(),
            radius * sin_phi * theta.cos(),
        );
        camera.position = self.target + offset;
        camera.look_at(self.target);

        if self.damping {
            self.pending_theta *= 1.0 - self.damping_factor;
            self.pending_phi *= 1.0 - self.damping_factor;
        } else {
            self.pending_theta = 0.0;
            self.pending_phi = 0.0;
        }
        self.pending_scale = 1.0;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CameraConfig;

    fn setup() -> (OrbitController, Camera) {
        let controller = OrbitController::new(&OrbitConfig::default(), Vec3::new(0.0, 1.0, 0.0));
        let camera = Camera::new(&CameraConfig::default(), 1.0);
        (controller, camera)
    }

    #[test]
    fn idle_update_keeps_position() {
        let (mut orbit, mut cam) = setup();
        let before = cam.position;
        orbit.update(&mut cam);
        assert!((cam.position - before).length() < 1e-4);
    }

    #[test]
    fn dolly_in_moves_closer() {
        let (mut orbit, mut cam) = setup();
        let before = (cam.position - orbit.target).length();
        assert!(orbit.dolly_in(1.1));
        orbit.update(&mut cam);
        let after = (cam.position - orbit.target).length();
        assert!((before / after - 1.1).abs() < 1e-4);
    }

    #[test]
    fn disabled_controller_ignores_input_and_update() {
        let (mut orbit, mut cam) = setup();
        orbit.set_enabled(false);
        assert!(!orbit.dolly_out(1.1));
        orbit.rotate_by_pixels(100.0, 0.0, 500.0);
        assert!(!orbit.has_pending_motion());
        cam.position = Vec3::new(9.0, 9.0, 9.0);
        assert!(!orbit.update(&mut cam));
        assert_eq!(cam.position, Vec3::new(9.0, 9.0, 9.0));
    }

    #[test]
    fn damped_rotation_settles() {
        let (mut orbit, mut cam) = setup();
        let radius = (cam.position - orbit.target).length();
        orbit.rotate_by_pixels(50.0, 0.0, 500.0);
        for _ in 0..400 {
            orbit.update(&mut cam);
        }
        assert!(!orbit.has_pending_motion());
        assert!(((cam.position - orbit.target).length() - radius).abs() < 1e-3);
    }

    #[test]
    fn idle_update_leaves_out_of_range_camera_alone() {
        let (mut orbit, mut cam) = setup();
        cam.position = Vec3::new(0.0, 1.0, 60.0);
        orbit.update(&mut cam);
        assert_eq!(cam.position, Vec3::new(0.0, 1.0, 60.0));
        cam.position = Vec3::new(0.0, 1.2, 0.1);
        orbit.update(&mut cam);
        assert_eq!(cam.position, Vec3::new(0.0, 1.2, 0.1));
    }

    #[test]
    fn distance_is_clamped() {
        let (mut orbit, mut cam) = setup();
        for _ in 0..100 {
            orbit.dolly_in(2.0);
            orbit.update(&mut cam);
        }
        let d = (cam.position - orbit.target).length();
        assert!((d - OrbitConfig::default().min_distance).abs() < 1e-4);
    }
}
