use crate::showcase::CameraMode;

/// Actions offered by the on-screen control panel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum UiCommand {
    ZoomIn,
    ZoomOut,
    ResetCamera,
    ToggleAutoOrbit,
    ToggleMode,
    ToggleMusic,
}

impl UiCommand {
    /// Buttons of the camera panel, in display order.
    pub const PANEL: [UiCommand; 5] = [
        UiCommand::ZoomIn,
        UiCommand::ZoomOut,
        UiCommand::ResetCamera,
        UiCommand::ToggleAutoOrbit,
        UiCommand::ToggleMode,
    ];

    pub fn element_id(self) -> &'static str {
        match self {
            UiCommand::ZoomIn => "btn-zoom-in",
            UiCommand::ZoomOut => "btn-zoom-out",
            UiCommand::ResetCamera => "btn-reset",
            UiCommand::ToggleAutoOrbit => "btn-auto-orbit",
            UiCommand::ToggleMode => "btn-mode",
            UiCommand::ToggleMusic => "btn-music",
        }
    }

    /// Label shown before any interaction.
    pub fn initial_label(self) -> &'static str {
        match self {
            UiCommand::ZoomIn => "Zoom In",
            UiCommand::ZoomOut => "Zoom Out",
            UiCommand::ResetCamera => "Reset Camera",
            UiCommand::ToggleAutoOrbit => CommandOutcome::AutoOrbit(false).label().unwrap_or(""),
            UiCommand::ToggleMode => CommandOutcome::Mode(CameraMode::Orbit).label().unwrap_or(""),
            UiCommand::ToggleMusic => CommandOutcome::Music(false).label().unwrap_or(""),
        }
    }
}

/// What a command changed; toggles carry the new state so the button can be
/// relabelled.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CommandOutcome {
    /// Zoom or reset; `applied` is false when the command was ignored.
    Camera { applied: bool },
    AutoOrbit(bool),
    Mode(CameraMode),
    Music(bool),
}

impl CommandOutcome {
    /// New label for the originating button, if it changes.
    pub fn label(&self) -> Option<&'static str> {
        match self {
            CommandOutcome::Camera { .. } => None,
            CommandOutcome::AutoOrbit(true) => Some("Auto Orbit: ON"),
            CommandOutcome::AutoOrbit(false) => Some("Auto Orbit: OFF"),
            CommandOutcome::Mode(CameraMode::Orbit) => Some("Mode: Orbit (Default)"),
            CommandOutcome::Mode(CameraMode::FirstPerson) => Some("Mode: First Person"),
            CommandOutcome::Music(true) => Some("Stop Reog Music"),
            CommandOutcome::Music(false) => Some("Play Reog Music"),
        }
    }
}
