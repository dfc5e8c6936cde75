//! Interaction state machine and per-frame driver.
//!
//! [`Showcase`] owns every piece of mutable session state: camera, orbit
//! controller, camera mode, hover and auto-orbit state, held navigation keys,
//! the target model (once loaded), and the cue player. Browser event handlers
//! call the `on_*`/command methods; the animation loop calls
//! [`Showcase::advance`] once per frame and then renders.

use crate::animation::SceneAnimation;
use crate::audio::{Cue, CuePlayer};
use crate::camera::Camera;
use crate::commands::{CommandOutcome, UiCommand};
use crate::config::ShowcaseConfig;
use crate::error::ShowcaseError;
use crate::highlight::EmphasisBaseline;
use crate::input::{FpsKey, FpsKeys};
use crate::model::TargetModel;
use crate::orbit::OrbitController;
use crate::region::{InfoRequest, Region};
use glam::{Vec2, Vec3};
use std::f32::consts::TAU;
use std::fmt::Display;
use std::time::Duration;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum CameraMode {
    #[default]
    Orbit,
    FirstPerson,
}

impl CameraMode {
    pub fn toggled(self) -> Self {
        match self {
            CameraMode::Orbit => CameraMode::FirstPerson,
            CameraMode::FirstPerson => CameraMode::Orbit,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HoverState {
    pub is_hovering: bool,
    /// Session time of the last hover cue that actually played.
    pub last_cue_at: Option<Duration>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct AutoOrbit {
    pub enabled: bool,
    /// Radians; keeps accumulating across toggles.
    pub angle: f32,
}

/// Result of a pointer move over the canvas.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HoverChange {
    Unchanged,
    Entered { cue_played: bool },
    Left,
}

/// Timing for one animation frame.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FrameTime {
    /// Time since the previous frame.
    pub delta: Duration,
    /// Time since the session started.
    pub elapsed: Duration,
}

pub struct Showcase<A: CuePlayer> {
    config: ShowcaseConfig,
    camera: Camera,
    orbit: OrbitController,
    mode: CameraMode,
    hover: HoverState,
    auto_orbit: AutoOrbit,
    keys: FpsKeys,
    last_region: Option<Region>,
    model: Option<TargetModel>,
    baseline: EmphasisBaseline,
    audio: A,
    viewport: Vec2,
}

impl<A: CuePlayer> Showcase<A> {
    pub fn new(config: ShowcaseConfig, audio: A, viewport: Vec2) -> Self {
        let aspect = if viewport.y > 0.0 { viewport.x / viewport.y } else { 1.0 };
        let camera = Camera::new(&config.camera, aspect);
        let orbit = OrbitController::new(&config.orbit, config.camera.default_target);
        Self {
            config,
            camera,
            orbit,
            mode: CameraMode::Orbit,
            hover: HoverState::default(),
            auto_orbit: AutoOrbit::default(),
            keys: FpsKeys::default(),
            last_region: None,
            model: None,
            baseline: EmphasisBaseline::default(),
            audio,
            viewport,
        }
    }

    // ---------------------------------------------------------------------
    // Accessors

    pub fn config(&self) -> &ShowcaseConfig {
        &self.config
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    pub fn orbit(&self) -> &OrbitController {
        &self.orbit
    }

    pub fn mode(&self) -> CameraMode {
        self.mode
    }

    pub fn hover(&self) -> HoverState {
        self.hover
    }

    pub fn auto_orbit(&self) -> AutoOrbit {
        self.auto_orbit
    }

    pub fn keys(&self) -> &FpsKeys {
        &self.keys
    }

    pub fn last_region(&self) -> Option<Region> {
        self.last_region
    }

    pub fn model(&self) -> Option<&TargetModel> {
        self.model.as_ref()
    }

    pub fn audio(&self) -> &A {
        &self.audio
    }

    pub fn audio_mut(&mut self) -> &mut A {
        &mut self.audio
    }

    pub fn viewport(&self) -> Vec2 {
        self.viewport
    }

    // ---------------------------------------------------------------------
    // Mode and camera commands

    /// Switch between orbit and first-person. The camera pose is kept.
    pub fn toggle_mode(&mut self) -> CameraMode {
        self.mode = self.mode.toggled();
        self.orbit.set_enabled(self.mode == CameraMode::Orbit);
        log::info!("[mode] {:?}", self.mode);
        self.mode
    }

    pub fn toggle_auto_orbit(&mut self) -> bool {
        self.auto_orbit.enabled = !self.auto_orbit.enabled;
        log::info!(
            "[mode] auto orbit {}",
            if self.auto_orbit.enabled { "on" } else { "off" }
        );
        self.auto_orbit.enabled
    }

    pub fn zoom_in(&mut self) -> bool {
        let factor = self.config.orbit.zoom_factor;
        self.zoom(|orbit| orbit.dolly_in(factor))
    }

    pub fn zoom_out(&mut self) -> bool {
        let factor = self.config.orbit.zoom_factor;
        self.zoom(|orbit| orbit.dolly_out(factor))
    }

    fn zoom(&mut self, dolly: impl FnOnce(&mut OrbitController) -> bool) -> bool {
        if !dolly(&mut self.orbit) {
            log::debug!("[mode] zoom ignored while orbit control is disabled");
            return false;
        }
        self.orbit.update(&mut self.camera);
        true
    }

    /// Snap back to the default pose; queued orbit motion is dropped.
    pub fn reset_camera(&mut self) {
        let cam = &self.config.camera;
        self.camera.position = cam.default_position;
        self.orbit.reset(cam.default_target);
        self.camera.look_at(cam.default_target);
        log::debug!("[mode] camera reset");
    }

    /// Start or stop the ambient loop. Returns whether it is now playing.
    pub fn toggle_music(&mut self) -> bool {
        if !self.audio.is_loaded(Cue::Ambient) {
            log::debug!("[audio] ambient track not loaded yet");
            return false;
        }
        if self.audio.is_playing(Cue::Ambient) {
            self.audio.stop(Cue::Ambient);
            false
        } else {
            self.audio.restart(Cue::Ambient);
            true
        }
    }

    pub fn command(&mut self, command: UiCommand) -> CommandOutcome {
        match command {
            UiCommand::ZoomIn => CommandOutcome::Camera {
                applied: self.zoom_in(),
            },
            UiCommand::ZoomOut => CommandOutcome::Camera {
                applied: self.zoom_out(),
            },
            UiCommand::ResetCamera => {
                self.reset_camera();
                CommandOutcome::Camera { applied: true }
            }
            UiCommand::ToggleAutoOrbit => CommandOutcome::AutoOrbit(self.toggle_auto_orbit()),
            UiCommand::ToggleMode => CommandOutcome::Mode(self.toggle_mode()),
            UiCommand::ToggleMusic => CommandOutcome::Music(self.toggle_music()),
        }
    }

    // ---------------------------------------------------------------------
    // Pointer and keyboard

    /// Hover hit-test at `ndc`. `now` is the session time used for the cue
    /// rate limit.
    pub fn on_pointer_move(&mut self, ndc: Vec2, now: Duration) -> HoverChange {
        let Some(model) = self.model.as_mut() else {
            return HoverChange::Unchanged;
        };
        let ray = self.camera.ray_from_ndc(ndc);
        let over = model.hit_test(&ray).is_some();

        match (over, self.hover.is_hovering) {
            (true, false) => {
                self.hover.is_hovering = true;
                self.baseline.apply(model.parts_mut(), true);
                let cooldown = self.config.hover.cue_cooldown();
                let cue_played = play_hover_cue(&mut self.audio, &mut self.hover, cooldown, now);
                log::debug!("[hover] enter (cue played: {})", cue_played);
                HoverChange::Entered { cue_played }
            }
            (false, true) => {
                self.hover.is_hovering = false;
                self.baseline.apply(model.parts_mut(), false);
                log::debug!("[hover] leave");
                HoverChange::Left
            }
            _ => HoverChange::Unchanged,
        }
    }

    /// Select the model at `ndc`. A miss changes nothing.
    pub fn on_click(&mut self, ndc: Vec2) -> Option<InfoRequest> {
        let model = self.model.as_ref()?;
        let hit = model.hit_test(&self.camera.ray_from_ndc(ndc))?;
        let region = Region::from_hit(hit.point_local.y, &model.bounds());

        if self.audio.is_loaded(Cue::Click) {
            self.audio.restart(Cue::Click);
        }
        self.last_region = Some(region);
        log::info!("[click] {:?} at y={:.3}", region, hit.point_local.y);
        Some(region.info())
    }

    /// Record a key edge. Returns false for codes that are not navigation keys.
    pub fn on_key(&mut self, code: &str, is_down: bool) -> bool {
        match FpsKey::from_code(code) {
            Some(key) => {
                self.keys.set(key, is_down);
                true
            }
            None => false,
        }
    }

    /// Forget every held key, e.g. when the window loses focus.
    pub fn release_keys(&mut self) {
        self.keys = FpsKeys::default();
    }

    /// Pointer drag in pixels, forwarded to the orbit controller.
    pub fn orbit_drag(&mut self, dx: f32, dy: f32) {
        self.orbit.rotate_by_pixels(dx, dy, self.viewport.y);
    }

    /// Wheel notch; negative `delta_y` (scroll up) moves closer.
    pub fn orbit_wheel(&mut self, delta_y: f32) -> bool {
        let factor = self.config.orbit.wheel_zoom_factor;
        if delta_y < 0.0 {
            self.orbit.dolly_in(factor)
        } else if delta_y > 0.0 {
            self.orbit.dolly_out(factor)
        } else {
            false
        }
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        if width > 0.0 && height > 0.0 {
            self.viewport = Vec2::new(width, height);
            self.camera.set_viewport(width, height);
        }
    }

    // ---------------------------------------------------------------------
    // Asset completion

    /// Install the loaded model and record its emphasis baseline.
    pub fn attach_model(&mut self, model: TargetModel) {
        self.baseline = EmphasisBaseline::capture(model.parts());
        log::info!(
            "[assets] model ready: {} parts, height {:.2}",
            model.parts().len(),
            model.bounds().height()
        );
        self.hover.is_hovering = false;
        self.model = Some(model);
    }

    pub fn model_failed(&self, err: &ShowcaseError) {
        log::error!("[assets] model failed to load: {}", err);
    }

    pub fn cue_loaded(&self, cue: Cue) {
        log::info!("[audio] {} cue loaded", cue.label());
    }

    pub fn cue_failed(&self, cue: Cue, err: &dyn Display) {
        log::error!("[audio] {} cue failed to load: {}", cue.label(), err);
    }

    // ---------------------------------------------------------------------
    // Frame

    /// Advance one frame. Returns the decorative motion for the renderer.
    pub fn advance(&mut self, frame: FrameTime) -> SceneAnimation {
        let dt = frame.delta.as_secs_f32();
        let animation = SceneAnimation::at(frame.elapsed.as_secs_f32());

        if self.auto_orbit.enabled && self.mode == CameraMode::Orbit {
            let orbit = &self.config.orbit;
            self.auto_orbit.angle += dt * orbit.auto_orbit_speed;
            let a = self.auto_orbit.angle;
            self.camera.position = Vec3::new(
                a.cos() * orbit.auto_orbit_radius,
                orbit.auto_orbit_height,
                a.sin() * orbit.auto_orbit_radius,
            );
            self.orbit.target = orbit.auto_orbit_focus;
        }

        if let Some(model) = self.model.as_mut() {
            let spin = self.config.model.spin_per_tick;
            model.transform.rotation_y = (model.transform.rotation_y + spin).rem_euclid(TAU);
        }

        if self.mode == CameraMode::FirstPerson {
            self.step_first_person(dt);
        }

        self.orbit.update(&mut self.camera);
        animation
    }

    fn step_first_person(&mut self, dt: f32) {
        let fp = &self.config.first_person;
        let keys = self.keys;

        let forward = self.camera.forward();
        let flat = Vec3::new(forward.x, 0.0, forward.z).normalize_or_zero();
        let right = flat.cross(Vec3::Y).normalize_or_zero();
        let step = dt * fp.move_speed;
        self.camera.position += flat * (step * keys.axis(FpsKey::Forward, FpsKey::Back));
        self.camera.position +=
            right * (step * keys.axis(FpsKey::StrafeRight, FpsKey::StrafeLeft));

        let turn = dt * fp.turn_speed;
        self.camera.yaw += turn * keys.axis(FpsKey::TurnLeft, FpsKey::TurnRight);
        self.camera.pitch +=
            turn * fp.pitch_turn_factor * keys.axis(FpsKey::LookUp, FpsKey::LookDown);
        self.camera.clamp_pitch();
    }
}

/// Restart the hover cue unless one played less than `cooldown` ago.
fn play_hover_cue<A: CuePlayer>(
    audio: &mut A,
    hover: &mut HoverState,
    cooldown: Duration,
    now: Duration,
) -> bool {
    if !audio.is_loaded(Cue::Hover) {
        return false;
    }
    let ready = match hover.last_cue_at {
        None => true,
        Some(last) => now.checked_sub(last).is_some_and(|gap| gap >= cooldown),
    };
    if ready {
        audio.restart(Cue::Hover);
        hover.last_cue_at = Some(now);
    }
    ready
}
