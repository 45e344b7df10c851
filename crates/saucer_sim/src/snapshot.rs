//! Read-only state snapshot handed to the HUD once per tick.

use serde::Serialize;

use crate::constants::{WEIGHT_CRITICAL_PERCENT, WEIGHT_WARNING_PERCENT};

/// Cargo load tier shown next to the weight bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum WeightStatus {
    Optimal,
    Warning,
    Critical,
}

impl WeightStatus {
    #[must_use]
    pub fn from_percent(percent: f32) -> Self {
        if percent < WEIGHT_WARNING_PERCENT {
            Self::Optimal
        } else if percent < WEIGHT_CRITICAL_PERCENT {
            Self::Warning
        } else {
            Self::Critical
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Optimal => "OPTIMAL",
            Self::Warning => "WARNING",
            Self::Critical => "CRITICAL",
        }
    }
}

/// Everything the HUD renders, computed fresh each tick.
#[derive(Debug, Clone, Serialize)]
pub struct HudSnapshot {
    pub specimens: u64,
    pub currency: u64,
    pub cows_abducted: u32,
    pub chickens_abducted: u32,
    pub farmers_abducted: u32,
    pub total_abducted: u32,
    /// Floored for display.
    pub altitude: u32,
    pub weight_percent: f32,
    pub weight_status: WeightStatus,
    pub combo_multiplier: f32,
    /// Whether the combo badge should be lit.
    pub combo_visible: bool,
}
