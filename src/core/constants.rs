use glam::Vec3;
use std::f32::consts::{FRAC_PI_6, PI};

// Stage dressing shared by the renderer. Colours are sRGB hex, converted with
// `srgb_hex_to_linear` before they reach a shader.

// Backdrop and fog
pub const BACKGROUND_HEX: u32 = 0xcccccc; // light grey, fog fades into it
pub const FOG_DENSITY: f32 = 0.08; // exponential-squared fog

// Hemisphere fill
pub const HEMI_SKY_HEX: u32 = 0xffffff;
pub const HEMI_GROUND_HEX: u32 = 0x444444;
pub const HEMI_INTENSITY: f32 = 1.2;

// Warm key spotlight above the stage
pub const KEY_SPOT_HEX: u32 = 0xffddaa;
pub const KEY_SPOT_INTENSITY: f32 = 3.0;
pub const KEY_SPOT_RANGE: f32 = 30.0;
pub const KEY_SPOT_ANGLE: f32 = FRAC_PI_6; // half-angle of the cone
pub const KEY_SPOT_PENUMBRA: f32 = 0.3; // fraction of the cone that fades
pub const KEY_SPOT_POSITION: Vec3 = Vec3::new(4.0, 8.0, 4.0);

// Red spotlight circling the stage; position comes from the scene animation
pub const MOVING_SPOT_HEX: u32 = 0xff6666;
pub const MOVING_SPOT_INTENSITY: f32 = 1.5;
pub const MOVING_SPOT_RANGE: f32 = 25.0;
pub const MOVING_SPOT_ANGLE: f32 = PI / 7.0;
pub const MOVING_SPOT_PENUMBRA: f32 = 0.4;

// Both spots aim here
pub const SPOT_TARGET: Vec3 = Vec3::new(0.0, 1.0, 0.0);

// Smoke particles
pub const SMOKE_PARTICLE_COUNT: usize = 200;
pub const SMOKE_SPREAD_XZ: f32 = 6.0; // box width and depth, centred on the stage
pub const SMOKE_HEIGHT: f32 = 3.0;
pub const SMOKE_BASE_Y: f32 = 0.5; // lowest particle, above the floor
pub const SMOKE_SIZE: f32 = 0.08; // world units
pub const SMOKE_HEX: u32 = 0xffcccc;
pub const SMOKE_OPACITY: f32 = 0.7;

// Stage cylinder
pub const STAGE_RADIUS: f32 = 2.5;
pub const STAGE_HEIGHT: f32 = 0.2;
pub const STAGE_SEGMENTS: u32 = 64;
pub const STAGE_HEX: u32 = 0x332222;
pub const STAGE_CENTER_Y: f32 = -0.1; // top face sits just under the model's feet

/// Convert a 0xRRGGBB sRGB colour to linear RGB.
pub fn srgb_hex_to_linear(hex: u32) -> Vec3 {
    let channel = |shift: u32| {
        let c = ((hex >> shift) & 0xff) as f32 / 255.0;
        if c <= 0.04045 {
            c / 12.92
        } else {
            ((c + 0.055) / 1.055).powf(2.4)
        }
    };
    Vec3::new(channel(16), channel(8), channel(0))
}

/// Cosines of the inner (full-strength) and outer cone angles of a spotlight.
pub fn spot_cone_cosines(angle: f32, penumbra: f32) -> (f32, f32) {
    let inner = angle * (1.0 - penumbra.clamp(0.0, 1.0));
    (inner.cos(), angle.cos())
}
