//! Real-time simulation core for the saucer abduction clicker.
//!
//! This crate is the authoritative game: the per-tick update loop,
//! the target pool and its abduction state machine, combo scoring,
//! the weight/altitude flight model, the crash sequence and the
//! upgrade economy. It is framework-free and deterministic (seedable
//! RNG, explicit clock), so the whole game can be driven from tests.
//! Rendering, audio and input plumbing live in the presentation
//! crate, which talks to this one through [`Simulation`]'s operations,
//! the drained [`events::SimEvent`] queue and the per-tick
//! [`snapshot::HudSnapshot`].

pub mod constants;
pub mod economy;
pub mod effects;
pub mod events;
pub mod settings;
pub mod sim;
pub mod snapshot;
pub mod species;
pub mod target;

pub use economy::{PurchaseError, ShopItem, UpgradeKind};
pub use events::{MusicCue, SimEvent, SoundCue, TextTone};
pub use settings::{Difficulty, Settings};
pub use sim::{Phase, Simulation};
pub use snapshot::{HudSnapshot, WeightStatus};
pub use species::Species;
pub use target::{Target, TargetId};

#[cfg(test)]
mod tests;
