use bevy::prelude::*;
use saucer_sim::{MusicCue, Simulation, SoundCue, TargetId};

/// Presentation mirror of the simulation's phase machine. The sim is
/// authoritative; [`crate::gameplay::sync_screen`] keeps this in step
/// so screens can hang their systems off Bevy state transitions.
#[derive(Clone, Eq, PartialEq, Debug, Hash, Default, States)]
pub enum Screen {
    #[default]
    Menu,
    Playing,
    Paused,
    Crashing,
    GameOver,
}

/// The authoritative simulation, advanced once per display frame.
#[derive(Resource)]
pub struct SimState(pub Simulation);

/// Combo badge contents mirrored from sim events.
#[derive(Resource, Default)]
pub struct ComboBadge {
    pub multiplier: f32,
    pub visible: bool,
}

/// Whether the upgrade shop overlay is open.
#[derive(Resource, Default)]
pub struct ShopOpen(pub bool);

/// One-shot sound effect forwarded out of the simulation.
#[derive(Event)]
pub struct SoundCueEvent(pub SoundCue);

/// Music transition forwarded out of the simulation.
#[derive(Event)]
pub struct MusicCueEvent(pub MusicCue);

/// Converts a simulation-space point (origin top-left, y down) to a
/// Bevy world point (origin center, y up).
pub fn sim_to_world(sim: &Simulation, x: f32, y: f32) -> Vec2 {
    let bounds = sim.bounds();
    Vec2::new(x - bounds.width / 2.0, bounds.height / 2.0 - y)
}

pub fn species_color(species: saucer_sim::Species) -> Color {
    let (r, g, b) = species.stats().color;
    Color::srgb_u8(r, g, b)
}

/// Marker tying a target sprite to its simulation id.
#[derive(Component)]
pub struct TargetSprite {
    pub id: TargetId,
}

/// Root entity of the saucer's mesh assembly.
#[derive(Component)]
pub struct ShipSprite;

/// Falling, twinkling background star.
#[derive(Component)]
pub struct Star {
    pub speed: f32,
    pub brightness: f32,
}

/// Static backdrop element (ground strip, fence posts).
#[derive(Component)]
pub struct Backdrop;
