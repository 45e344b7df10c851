//! User preferences carried across runs.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    #[default]
    Normal,
    Hard,
}

/// Sound/music/difficulty preferences. These survive both run resets
/// and quitting back to the menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    pub sounds_enabled: bool,
    pub music_enabled: bool,
    pub difficulty: Difficulty,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            sounds_enabled: true,
            music_enabled: true,
            difficulty: Difficulty::Normal,
        }
    }
}
