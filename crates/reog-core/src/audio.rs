/// The three independent playback slots.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Cue {
    /// Background gamelan track, looped.
    Ambient,
    /// Gong struck when the model is clicked.
    Click,
    /// Kendang hit when the pointer enters the model.
    Hover,
}

impl Cue {
    pub const ALL: [Cue; 3] = [Cue::Ambient, Cue::Click, Cue::Hover];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn is_looping(self) -> bool {
        matches!(self, Cue::Ambient)
    }

    pub fn label(self) -> &'static str {
        match self {
            Cue::Ambient => "ambient",
            Cue::Click => "click",
            Cue::Hover => "hover",
        }
    }
}

/// Playback backend for cue slots. Each slot holds at most one live voice.
pub trait CuePlayer {
    fn is_loaded(&self, cue: Cue) -> bool;
    fn is_playing(&self, cue: Cue) -> bool;
    /// Stop any current playback of `cue`, then start it from the beginning.
    fn restart(&mut self, cue: Cue);
    fn stop(&mut self, cue: Cue);
}

/// Backend that never has anything loaded.
#[derive(Clone, Copy, Debug, Default)]
pub struct SilentCues;

impl CuePlayer for SilentCues {
    fn is_loaded(&self, _cue: Cue) -> bool {
        false
    }

    fn is_playing(&self, _cue: Cue) -> bool {
        false
    }

    fn restart(&mut self, _cue: Cue) {}

    fn stop(&mut self, _cue: Cue) {}
}
