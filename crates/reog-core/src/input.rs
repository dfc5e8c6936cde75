use glam::Vec2;

/// Keys read by first-person navigation, identified by physical key code.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FpsKey {
    Forward,
    Back,
    StrafeLeft,
    StrafeRight,
    TurnLeft,
    TurnRight,
    LookUp,
    LookDown,
}

impl FpsKey {
    pub const ALL: [FpsKey; 8] = [
        FpsKey::Forward,
        FpsKey::Back,
        FpsKey::StrafeLeft,
        FpsKey::StrafeRight,
        FpsKey::TurnLeft,
        FpsKey::TurnRight,
        FpsKey::LookUp,
        FpsKey::LookDown,
    ];

    /// Map a `KeyboardEvent.code` value.
    pub fn from_code(code: &str) -> Option<FpsKey> {
        Some(match code {
            "KeyW" => FpsKey::Forward,
            "KeyS" => FpsKey::Back,
            "KeyA" => FpsKey::StrafeLeft,
            "KeyD" => FpsKey::StrafeRight,
            "ArrowLeft" => FpsKey::TurnLeft,
            "ArrowRight" => FpsKey::TurnRight,
            "ArrowUp" => FpsKey::LookUp,
            "ArrowDown" => FpsKey::LookDown,
            _ => return None,
        })
    }

    fn index(self) -> usize {
        self as usize
    }
}

/// Held state of the eight navigation keys.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FpsKeys([bool; 8]);

impl FpsKeys {
    pub fn set(&mut self, key: FpsKey, down: bool) {
        self.0[key.index()] = down;
    }

    pub fn is_down(&self, key: FpsKey) -> bool {
        self.0[key.index()]
    }

    pub fn any_down(&self) -> bool {
        self.0.iter().any(|k| *k)
    }

    /// +1, -1, or 0 for a pair of opposing keys.
    pub fn axis(&self, positive: FpsKey, negative: FpsKey) -> f32 {
        (self.is_down(positive) as i32 - self.is_down(negative) as i32) as f32
    }
}

/// Convert a pixel position inside a viewport of `size` pixels to normalized
/// device coordinates (y up). `None` for an empty viewport.
pub fn pixel_to_ndc(px: Vec2, size: Vec2) -> Option<Vec2> {
    if !(size.x > 0.0 && size.y > 0.0) {
        return None;
    }
    Some(Vec2::new(
        px.x / size.x * 2.0 - 1.0,
        -(px.y / size.y * 2.0 - 1.0),
    ))
}

/// Tracks one pressed pointer so drags can orbit and a drag that travelled
/// far enough does not also count as a click.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PointerDrag {
    active: bool,
    last: Vec2,
    travelled: f32,
}

impl PointerDrag {
    pub fn press(&mut self, at: Vec2) {
        self.active = true;
        self.last = at;
        self.travelled = 0.0;
    }

    /// Movement since the previous sample, or `None` when no button is held.
    pub fn motion(&mut self, at: Vec2) -> Option<Vec2> {
        if !self.active {
            return None;
        }
        let delta = at - self.last;
        self.last = at;
        self.travelled += delta.length();
        Some(delta)
    }

    pub fn release(&mut self) {
        self.active = false;
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Whether the last press moved less than `threshold` pixels in total.
    pub fn was_click(&self, threshold: f32) -> bool {
        self.travelled < threshold
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_map_to_keys() {
        assert_eq!(FpsKey::from_code("KeyW"), Some(FpsKey::Forward));
        assert_eq!(FpsKey::from_code("ArrowDown"), Some(FpsKey::LookDown));
        assert_eq!(FpsKey::from_code("KeyQ"), None);
        assert_eq!(FpsKey::from_code("w"), None);
    }

    #[test]
    fn opposing_keys_cancel() {
        let mut keys = FpsKeys::default();
        keys.set(FpsKey::Forward, true);
        assert_eq!(keys.axis(FpsKey::Forward, FpsKey::Back), 1.0);
        keys.set(FpsKey::Back, true);
        assert_eq!(keys.axis(FpsKey::Forward, FpsKey::Back), 0.0);
    }

    #[test]
    fn ndc_corners() {
        let size = Vec2::new(800.0, 600.0);
        assert_eq!(pixel_to_ndc(Vec2::ZERO, size), Some(Vec2::new(-1.0, 1.0)));
        assert_eq!(pixel_to_ndc(size, size), Some(Vec2::new(1.0, -1.0)));
        assert_eq!(pixel_to_ndc(Vec2::ZERO, Vec2::new(0.0, 10.0)), None);
    }

    #[test]
    fn drag_accumulates_travel() {
        let mut drag = PointerDrag::default();
        assert_eq!(drag.motion(Vec2::new(5.0, 5.0)), None);

        drag.press(Vec2::new(10.0, 10.0));
        assert_eq!(drag.motion(Vec2::new(13.0, 14.0)), Some(Vec2::new(3.0, 4.0)));
        drag.release();
        assert!(!drag.is_active());
        assert!(!drag.was_click(4.0));

        drag.press(Vec2::ZERO);
        drag.motion(Vec2::new(1.0, 0.0));
        drag.release();
        assert!(drag.was_click(4.0));
    }
}
