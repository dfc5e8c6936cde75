use glam::Vec3;

/// Decorative motion sampled once per frame; depends only on elapsed time.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SceneAnimation {
    pub moving_spot_position: Vec3,
    /// Vertical offset applied to every smoke particle.
    pub smoke_offset_y: f32,
}

impl SceneAnimation {
    pub fn at(elapsed_secs: f32) -> Self {
        let e = elapsed_secs;
        Self {
            moving_spot_position: Vec3::new((0.5 * e).sin() * 6.0, 6.0, (0.5 * e).cos() * 6.0),
            smoke_offset_y: (0.3 * e).sin() * 0.2,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_behind_the_stage() {
        let a = SceneAnimation::at(0.0);
        assert_eq!(a.moving_spot_position, Vec3::new(0.0, 6.0, 6.0));
        assert_eq!(a.smoke_offset_y, 0.0);
    }

    #[test]
    fn spot_stays_on_circle() {
        for i in 0..20 {
            let p = SceneAnimation::at(i as f32 * 0.7).moving_spot_position;
            assert!(((p.x * p.x + p.z * p.z).sqrt() - 6.0).abs() < 1e-4);
            assert_eq!(p.y, 6.0);
        }
    }
}
