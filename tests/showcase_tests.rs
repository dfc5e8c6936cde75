// Host-side tests for the interaction state machine, driven the way the
// browser event handlers and the frame loop drive it.

use glam::{Vec2, Vec3, Vec4};
use reog_core::{
    CameraMode, CommandOutcome, Cue, CuePlayer, Emphasis, FrameTime, HoverChange, ModelPart,
    PartId, Region, Showcase, ShowcaseConfig, TargetModel, UiCommand, HIGHLIGHT, PITCH_LIMIT,
};
use std::time::Duration;

#[derive(Default)]
struct RecordingCues {
    loaded: [bool; 3],
    playing: [bool; 3],
    restarts: [u32; 3],
    stops: [u32; 3],
}

impl RecordingCues {
    fn all_loaded() -> Self {
        Self {
            loaded: [true; 3],
            ..Self::default()
        }
    }
}

impl CuePlayer for RecordingCues {
    fn is_loaded(&self, cue: Cue) -> bool {
        self.loaded[cue.index()]
    }

    fn is_playing(&self, cue: Cue) -> bool {
        self.playing[cue.index()]
    }

    fn restart(&mut self, cue: Cue) {
        self.restarts[cue.index()] += 1;
        self.playing[cue.index()] = true;
    }

    fn stop(&mut self, cue: Cue) {
        self.stops[cue.index()] += 1;
        self.playing[cue.index()] = false;
    }
}

const GLOW: Vec3 = Vec3::new(0.1, 0.0, 0.0);

/// Box spanning [-1, 1] x [0, 2] x [-1, 1], split into two parts.
fn box_model() -> TargetModel {
    let slab = |name: &str, y0: f32, y1: f32| {
        let (min, max) = (Vec3::new(-1.0, y0, -1.0), Vec3::new(1.0, y1, 1.0));
        let positions = vec![
            Vec3::new(min.x, min.y, min.z),
            Vec3::new(max.x, min.y, min.z),
            Vec3::new(max.x, max.y, min.z),
            Vec3::new(min.x, max.y, min.z),
            Vec3::new(min.x, min.y, max.z),
            Vec3::new(max.x, min.y, max.z),
            Vec3::new(max.x, max.y, max.z),
            Vec3::new(min.x, max.y, max.z),
        ];
        ModelPart {
            id: PartId(0),
            name: name.to_string(),
            normals: vec![Vec3::Y; positions.len()],
            uvs: vec![[0.0, 0.0]; positions.len()],
            positions,
            indices: vec![
                0, 2, 1, 0, 3, 2, 4, 5, 6, 4, 6, 7, 0, 4, 7, 0, 7, 3, 1, 2, 6, 1, 6, 5, 0, 1, 5,
                0, 5, 4, 3, 7, 6, 3, 6, 2,
            ],
            base_color: Vec4::ONE,
            base_color_texture: None,
            emphasis: Emphasis {
                color: GLOW,
                intensity: 1.0,
            },
        }
    };
    TargetModel::new(vec![slab("costume", 0.0, 1.0), slab("crown", 1.0, 2.0)], vec![])
        .expect("box model")
}

fn showcase() -> Showcase<RecordingCues> {
    let mut s = Showcase::new(
        ShowcaseConfig::default(),
        RecordingCues::all_loaded(),
        Vec2::new(800.0, 600.0),
    );
    s.attach_model(box_model());
    s
}

fn ndc_of(s: &Showcase<RecordingCues>, point: Vec3) -> Vec2 {
    s.camera().project_to_ndc(point).expect("point in front of camera")
}

const MISS: Vec2 = Vec2::new(0.95, 0.95);

fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

fn second() -> FrameTime {
    FrameTime {
        delta: Duration::from_secs(1),
        elapsed: Duration::from_secs(1),
    }
}

#[test]
fn hover_enter_highlights_and_leave_restores() {
    let mut s = showcase();
    let over = ndc_of(&s, Vec3::new(0.0, 1.1, 1.0));

    assert_eq!(
        s.on_pointer_move(over, ms(0)),
        HoverChange::Entered { cue_played: true }
    );
    assert!(s.hover().is_hovering);
    let model = s.model().unwrap();
    assert!(model.parts().iter().all(|p| p.emphasis == HIGHLIGHT));

    assert_eq!(s.on_pointer_move(MISS, ms(10)), HoverChange::Left);
    assert!(!s.hover().is_hovering);
    let model = s.model().unwrap();
    assert!(model
        .parts()
        .iter()
        .all(|p| p.emphasis.color == GLOW && p.emphasis.intensity == 1.0));
}

#[test]
fn staying_over_the_model_is_idempotent() {
    let mut s = showcase();
    let a = ndc_of(&s, Vec3::new(0.0, 1.1, 1.0));
    let b = ndc_of(&s, Vec3::new(0.2, 1.2, 1.0));

    s.on_pointer_move(a, ms(0));
    assert_eq!(s.on_pointer_move(b, ms(1000)), HoverChange::Unchanged);
    assert_eq!(s.on_pointer_move(a, ms(2000)), HoverChange::Unchanged);
    assert_eq!(s.audio().restarts[Cue::Hover.index()], 1);
}

#[test]
fn hover_cue_is_rate_limited() {
    let mut s = showcase();
    let over = ndc_of(&s, Vec3::new(0.0, 1.1, 1.0));

    assert_eq!(
        s.on_pointer_move(over, ms(0)),
        HoverChange::Entered { cue_played: true }
    );
    s.on_pointer_move(MISS, ms(100));
    assert_eq!(
        s.on_pointer_move(over, ms(500)),
        HoverChange::Entered { cue_played: false }
    );
    s.on_pointer_move(MISS, ms(600));
    // Measured from the last cue that played, not from the skipped one.
    assert_eq!(
        s.on_pointer_move(over, ms(900)),
        HoverChange::Entered { cue_played: true }
    );
    assert_eq!(s.audio().restarts[Cue::Hover.index()], 2);
    assert_eq!(s.hover().last_cue_at, Some(ms(900)));
}

#[test]
fn hover_without_cue_still_highlights() {
    let mut s = Showcase::new(
        ShowcaseConfig::default(),
        RecordingCues::default(),
        Vec2::new(800.0, 600.0),
    );
    s.attach_model(box_model());
    let over = ndc_of(&s, Vec3::new(0.0, 1.1, 1.0));
    assert_eq!(
        s.on_pointer_move(over, ms(0)),
        HoverChange::Entered { cue_played: false }
    );
    assert!(s.hover().is_hovering);
    assert_eq!(s.hover().last_cue_at, None);
}

#[test]
fn click_selects_region_by_height() {
    let mut s = showcase();

    let top = ndc_of(&s, Vec3::new(0.0, 1.6, 1.0));
    let info = s.on_click(top).expect("hit");
    assert_eq!(info.region, Region::Headpiece);
    assert_eq!(info.title, "Dadak Merak");
    assert_eq!(s.last_region(), Some(Region::Headpiece));

    let mid = ndc_of(&s, Vec3::new(0.0, 1.1, 1.0));
    assert_eq!(s.on_click(mid).map(|i| i.region), Some(Region::Middle));

    let low = ndc_of(&s, Vec3::new(0.0, 0.5, 1.0));
    assert_eq!(s.on_click(low).map(|i| i.region), Some(Region::Lower));

    assert_eq!(s.audio().restarts[Cue::Click.index()], 3);
}

#[test]
fn click_on_empty_space_changes_nothing() {
    let mut s = showcase();
    assert!(s.on_click(MISS).is_none());
    assert_eq!(s.last_region(), None);
    assert_eq!(s.audio().restarts[Cue::Click.index()], 0);
}

#[test]
fn region_band_edges() {
    assert_eq!(Region::classify(0.9), Region::Headpiece);
    assert_eq!(Region::classify(0.7), Region::Middle);
    assert_eq!(Region::classify(0.5), Region::Middle);
    assert_eq!(Region::classify(0.35), Region::Middle);
    assert_eq!(Region::classify(0.0), Region::Lower);
}

#[test]
fn mode_toggle_round_trips() {
    let mut s = showcase();
    assert_eq!(s.toggle_mode(), CameraMode::FirstPerson);
    assert!(!s.orbit().is_enabled());
    assert_eq!(s.toggle_mode(), CameraMode::Orbit);
    assert!(s.orbit().is_enabled());
    assert_eq!(
        s.command(UiCommand::ToggleMode).label(),
        Some("Mode: First Person")
    );
}

#[test]
fn zoom_moves_toward_and_away_from_target() {
    let mut s = showcase();
    let target = s.orbit().target;
    let start = (s.camera().position - target).length();

    assert!(s.zoom_in());
    let closer = (s.camera().position - target).length();
    assert!((closer - start / 1.1).abs() < 1e-3);

    assert_eq!(
        s.command(UiCommand::ZoomOut),
        CommandOutcome::Camera { applied: true }
    );
    let back = (s.camera().position - target).length();
    assert!((back - start).abs() < 1e-3);
}

#[test]
fn zoom_is_ignored_in_first_person() {
    let mut s = showcase();
    s.toggle_mode();
    let before = s.camera().position;
    assert!(!s.zoom_in());
    assert_eq!(
        s.command(UiCommand::ZoomOut),
        CommandOutcome::Camera { applied: false }
    );
    assert!(!s.orbit_wheel(-100.0));
    assert_eq!(s.camera().position, before);
}

#[test]
fn reset_restores_default_pose() {
    let mut s = showcase();
    s.zoom_in();
    s.orbit_drag(120.0, -40.0);
    s.advance(second());

    s.reset_camera();
    assert_eq!(s.camera().position, Vec3::new(2.0, 2.0, 4.0));
    assert_eq!(s.orbit().target, Vec3::new(0.0, 1.0, 0.0));
    assert!(!s.orbit().has_pending_motion());
    let aim = (Vec3::new(0.0, 1.0, 0.0) - s.camera().position).normalize();
    assert!((s.camera().forward() - aim).length() < 1e-4);
}

#[test]
fn auto_orbit_runs_only_when_enabled_in_orbit_mode() {
    let mut s = showcase();
    s.advance(second());
    assert_eq!(s.auto_orbit().angle, 0.0);

    assert!(s.toggle_auto_orbit());
    s.advance(second());
    assert!((s.auto_orbit().angle - 0.3).abs() < 1e-6);
    let expected = Vec3::new(0.3f32.cos() * 6.0, 2.5, 0.3f32.sin() * 6.0);
    assert!((s.camera().position - expected).length() < 1e-3);
    assert_eq!(s.orbit().target, Vec3::new(0.0, 1.0, 0.0));

    s.toggle_mode();
    s.advance(second());
    assert!((s.auto_orbit().angle - 0.3).abs() < 1e-6);
    s.toggle_mode();

    assert!(!s.toggle_auto_orbit());
    s.advance(second());
    assert!(s.toggle_auto_orbit());
    s.advance(second());
    assert!((s.auto_orbit().angle - 0.6).abs() < 1e-5);
}

#[test]
fn first_person_walks_on_the_ground_plane() {
    let mut s = showcase();
    s.toggle_mode();
    let start = s.camera().position;
    let flat = {
        let f = s.camera().forward();
        Vec3::new(f.x, 0.0, f.z).normalize()
    };

    s.on_key("KeyW", true);
    s.advance(second());
    let moved = s.camera().position - start;
    assert!((moved - flat * 3.0).length() < 1e-4);
    s.on_key("KeyW", false);

    let here = s.camera().position;
    s.on_key("KeyD", true);
    s.advance(second());
    let strafe = s.camera().position - here;
    assert!(strafe.y.abs() < 1e-6);
    assert!(strafe.dot(flat).abs() < 1e-4);
    assert!(strafe.dot(flat.cross(Vec3::Y)) > 2.9);
}

#[test]
fn first_person_pitch_is_clamped() {
    let mut s = showcase();
    s.toggle_mode();
    s.on_key("ArrowUp", true);
    for _ in 0..10 {
        s.advance(second());
    }
    assert!((s.camera().pitch - PITCH_LIMIT).abs() < 1e-6);

    let yaw = s.camera().yaw;
    s.on_key("ArrowUp", false);
    s.on_key("ArrowLeft", true);
    s.advance(second());
    assert!((s.camera().yaw - (yaw + 1.5)).abs() < 1e-5);
}

#[test]
fn keys_are_ignored_in_orbit_mode() {
    let mut s = showcase();
    s.on_key("KeyW", true);
    let before = s.camera().position;
    s.advance(FrameTime {
        delta: ms(16),
        elapsed: ms(16),
    });
    assert!((s.camera().position - before).length() < 1e-4);
}

#[test]
fn model_spins_every_frame() {
    let mut s = showcase();
    s.advance(FrameTime::default());
    s.advance(FrameTime::default());
    let yaw = s.model().unwrap().transform.rotation_y;
    assert!((yaw - 0.006).abs() < 1e-6);
}

#[test]
fn music_toggles_when_loaded() {
    let mut s = showcase();
    assert_eq!(
        s.command(UiCommand::ToggleMusic).label(),
        Some("Stop Reog Music")
    );
    assert!(s.audio().is_playing(Cue::Ambient));
    assert!(!s.toggle_music());
    assert_eq!(s.audio().stops[Cue::Ambient.index()], 1);
}

fn frame(delta_ms: u64, elapsed_ms: u64) -> FrameTime {
    FrameTime {
        delta: ms(delta_ms),
        elapsed: ms(elapsed_ms),
    }
}

#[test]
fn returning_to_orbit_keeps_a_far_walked_camera_in_place() {
    let mut s = showcase();
    s.toggle_mode();
    s.on_key("KeyS", true);
    let mut elapsed = 0;
    for _ in 0..60 {
        elapsed += 250;
        s.advance(frame(250, elapsed));
    }
    let walked = s.camera().position;
    let max = ShowcaseConfig::default().orbit.max_distance;
    assert!((walked - s.orbit().target).length() > max);

    assert_eq!(s.toggle_mode(), CameraMode::Orbit);
    s.advance(frame(16, elapsed + 16));
    assert_eq!(s.camera().position, walked);
}

#[test]
fn frames_advance_with_no_assets_loaded() {
    let mut s = Showcase::new(
        ShowcaseConfig::default(),
        RecordingCues::default(),
        Vec2::new(800.0, 600.0),
    );
    s.advance(frame(16, 16));
    assert!(s.model().is_none());

    assert!(s.toggle_auto_orbit());
    s.advance(second());
    let radius = ShowcaseConfig::default().orbit.auto_orbit_radius;
    let p = s.camera().position;
    assert!((Vec2::new(p.x, p.z).length() - radius).abs() < 1e-3);
    s.toggle_auto_orbit();

    s.toggle_mode();
    s.on_key("KeyW", true);
    let before = s.camera().position;
    s.advance(frame(100, 1100));
    assert_ne!(s.camera().position, before);
    assert!(s.model().is_none());
    assert!(s.on_click(Vec2::ZERO).is_none());
    assert_eq!(s.audio().restarts, [0; 3]);
}

#[test]
fn click_before_cue_loads_still_opens_info() {
    let mut s = Showcase::new(
        ShowcaseConfig::default(),
        RecordingCues::default(),
        Vec2::new(800.0, 600.0),
    );
    s.attach_model(box_model());
    let top = ndc_of(&s, Vec3::new(0.0, 1.6, 1.0));
    let info = s.on_click(top).expect("hit");
    assert_eq!(info.region, Region::Headpiece);
    assert_eq!(s.audio().restarts[Cue::Click.index()], 0);
    assert!(!s.audio().playing[Cue::Click.index()]);
}
