//! Outbound events for the presentation layer.
//!
//! The simulation queues these during a tick; the host drains them
//! afterwards. They are fire-and-forget: nothing in the simulation
//! depends on whether a collaborator honored them.

/// One-shot sound effect cues.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundCue {
    TractorBeam,
    Cow,
    Chicken,
}

/// Background music transitions. Fading and channel plumbing are the
/// audio collaborator's concern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MusicCue {
    FadeToGame,
    FadeToMenu,
    Pause,
    Resume,
    Stop,
}

/// Visual tone of a floating text popup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextTone {
    Reward,
    Warning,
    Currency,
    Info,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SimEvent {
    Sound(SoundCue),
    Music(MusicCue),
    FloatingText {
        x: f32,
        y: f32,
        text: String,
        tone: TextTone,
    },
    /// Combo streak worth showing on the HUD badge.
    ComboShown { multiplier: f32 },
    /// Combo lapsed; clear the badge.
    ComboHidden,
    CrashStarted,
    RunEnded,
}
