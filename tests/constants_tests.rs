// Host-side tests for constants and their relationships.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod constants {
    include!("../src/constants.rs");
}
mod core_constants {
    include!("../src/core/constants.rs");
}

use constants::*;
use core_constants::*;

#[test]
#[allow(clippy::assertions_on_constants)]
fn interaction_limits_are_sane() {
    assert!(MAX_FRAME_DELTA_SEC > 0.0 && MAX_FRAME_DELTA_SEC < 1.0);
    assert!(CLICK_DRAG_THRESHOLD_PX > 0.0);
    assert!(CONFIG_PATH.ends_with(".toml"));
    assert_ne!(CANVAS_ID, INFO_PANEL_ID);
}

#[test]
fn hex_colours_convert_to_linear() {
    assert_eq!(srgb_hex_to_linear(0x000000), glam::Vec3::ZERO);
    assert!((srgb_hex_to_linear(0xffffff) - glam::Vec3::ONE).length() < 1e-5);
    let red = srgb_hex_to_linear(0xff0000);
    assert_eq!((red.y, red.z), (0.0, 0.0));
    // sRGB mid-grey is about 21% linear.
    let grey = srgb_hex_to_linear(0x808080);
    assert!((grey.x - 0.2158).abs() < 1e-3);
    assert!(grey.x == grey.y && grey.y == grey.z);
}

#[test]
fn spot_cones_fade_inward() {
    for (angle, penumbra) in [
        (KEY_SPOT_ANGLE, KEY_SPOT_PENUMBRA),
        (MOVING_SPOT_ANGLE, MOVING_SPOT_PENUMBRA),
    ] {
        let (inner, outer) = spot_cone_cosines(angle, penumbra);
        assert!(inner > outer, "inner cone must be narrower");
        assert!(outer > 0.0);
    }
    let (inner, outer) = spot_cone_cosines(0.5, 0.0);
    assert_eq!(inner, outer);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn smoke_box_sits_above_the_stage() {
    assert!(SMOKE_BASE_Y > STAGE_CENTER_Y + STAGE_HEIGHT * 0.5);
    assert!(SMOKE_PARTICLE_COUNT > 0);
    assert!((0.0..=1.0).contains(&SMOKE_OPACITY));
    assert!(STAGE_SEGMENTS >= 3);
}
