//! Currency, upgrade definitions and the shop view.

use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum PurchaseError {
    #[error("not enough currency: need {needed}, have {have}")]
    InsufficientFunds { needed: u64, have: u64 },
}

/// Closed set of permanent upgrades.
///
/// [`UpgradeKind::ALL`] fixes the shop listing order; cost ladders are
/// linear per kind (`base + level * increment`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum UpgradeKind {
    CargoCapacity,
    EnginePower,
    BeamPower,
    ComboTime,
    TradeBonus,
}

impl UpgradeKind {
    pub const ALL: [Self; 5] = [
        Self::CargoCapacity,
        Self::EnginePower,
        Self::BeamPower,
        Self::ComboTime,
        Self::TradeBonus,
    ];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::CargoCapacity => "CARGO CAPACITY",
            Self::EnginePower => "ENGINE POWER",
            Self::BeamPower => "BEAM POWER",
            Self::ComboTime => "COMBO EXTENDER",
            Self::TradeBonus => "TRADE BONUS",
        }
    }

    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::CargoCapacity => "Increase max weight capacity by 5",
            Self::EnginePower => "Reduce weight impact on altitude",
            Self::BeamPower => "Increase specimens per click",
            Self::ComboTime => "Longer combo window",
            Self::TradeBonus => "+20% currency from trades",
        }
    }

    #[must_use]
    pub const fn base_cost(self) -> u64 {
        match self {
            Self::CargoCapacity => 50,
            Self::EnginePower => 100,
            Self::BeamPower => 75,
            Self::ComboTime => 150,
            Self::TradeBonus => 200,
        }
    }

    #[must_use]
    pub const fn cost_increment(self) -> u64 {
        match self {
            Self::CargoCapacity => 25,
            Self::EnginePower => 50,
            Self::BeamPower => 40,
            Self::ComboTime => 75,
            Self::TradeBonus => 100,
        }
    }

    const fn index(self) -> usize {
        match self {
            Self::CargoCapacity => 0,
            Self::EnginePower => 1,
            Self::BeamPower => 2,
            Self::ComboTime => 3,
            Self::TradeBonus => 4,
        }
    }
}

/// Purchased upgrade levels. Monotonically non-decreasing; they carry
/// over across run resets.
#[derive(Debug, Clone, Copy, Default)]
pub struct Upgrades {
    levels: [u32; UpgradeKind::ALL.len()],
}

impl Upgrades {
    #[must_use]
    pub fn level(&self, kind: UpgradeKind) -> u32 {
        self.levels[kind.index()]
    }

    pub fn bump(&mut self, kind: UpgradeKind) {
        self.levels[kind.index()] += 1;
    }

    /// Cost of the next level of `kind`.
    #[must_use]
    pub fn cost(&self, kind: UpgradeKind) -> u64 {
        kind.base_cost() + u64::from(self.level(kind)) * kind.cost_increment()
    }
}

/// One row of the shop listing, ready for a UI layer to render.
#[derive(Debug, Clone, Serialize)]
pub struct ShopItem {
    pub kind: UpgradeKind,
    pub name: &'static str,
    pub description: &'static str,
    pub level: u32,
    pub cost: u64,
    pub affordable: bool,
}

/// Builds the ordered shop listing with affordability flags.
#[must_use]
pub fn shop_items(upgrades: &Upgrades, currency: u64) -> Vec<ShopItem> {
    UpgradeKind::ALL
        .iter()
        .map(|&kind| {
            let cost = upgrades.cost(kind);
            ShopItem {
                kind,
                name: kind.name(),
                description: kind.description(),
                level: upgrades.level(kind),
                cost,
                affordable: currency >= cost,
            }
        })
        .collect()
}
