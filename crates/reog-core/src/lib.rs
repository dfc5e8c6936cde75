//! Platform-neutral core of the Reog showcase.
//!
//! Everything here is free of browser APIs so it can be exercised by host-side
//! tests: the interaction state machine ([`Showcase`]), camera and orbit
//! control, the target model with its hit-testing, and the tuning config.

pub mod animation;
pub mod audio;
pub mod camera;
pub mod commands;
pub mod config;
pub mod error;
pub mod highlight;
pub mod input;
pub mod loader;
pub mod model;
pub mod orbit;
pub mod region;
pub mod showcase;

pub use animation::*;
pub use audio::*;
pub use camera::*;
pub use commands::*;
pub use config::*;
pub use error::ShowcaseError;
pub use highlight::*;
pub use input::*;
pub use loader::load_model;
pub use model::*;
pub use orbit::*;
pub use region::*;
pub use showcase::*;
