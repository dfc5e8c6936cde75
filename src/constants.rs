// Front-end timing and interaction constants.
// Scene dressing lives in `core::constants`; tuning that users may change
// lives in `showcase.toml`.

// DOM
pub const CANVAS_ID: &str = "app-canvas";
pub const INFO_PANEL_ID: &str = "reog-info-box";
pub const CONFIG_PATH: &str = "showcase.toml";

// Longest frame step fed to the simulation; a backgrounded tab resumes
// without the camera jumping.
pub const MAX_FRAME_DELTA_SEC: f32 = 0.25;

// A press that travels less than this many CSS pixels is still a click.
pub const CLICK_DRAG_THRESHOLD_PX: f32 = 4.0;
