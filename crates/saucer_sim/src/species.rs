//! The three abductable species and their balance table.

/// Closed set of abductable species.
///
/// The declaration order doubles as the tie-break order of the
/// weighted spawn pick, so it is part of the balance, not cosmetics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Species {
    Cow,
    Chicken,
    Farmer,
}

/// Per-species balance constants. `speed` is in pixels per tick and
/// `size` is the sprite diameter, which is also the hit radius
/// (deliberately generous: the full width, not half of it).
#[derive(Debug, Clone, Copy)]
pub struct SpeciesStats {
    pub value: u32,
    pub weight: u32,
    pub speed: f32,
    pub size: f32,
    pub spawn_weight: u32,
    pub color: (u8, u8, u8),
}

const COW: SpeciesStats = SpeciesStats {
    value: 1,
    weight: 2,
    speed: 0.5,
    size: 45.0,
    spawn_weight: 50,
    color: (0xff, 0xff, 0xff),
};

const CHICKEN: SpeciesStats = SpeciesStats {
    value: 2,
    weight: 1,
    speed: 1.2,
    size: 35.0,
    spawn_weight: 35,
    color: (0xff, 0xee, 0xcc),
};

const FARMER: SpeciesStats = SpeciesStats {
    value: 5,
    weight: 3,
    speed: 0.7,
    size: 50.0,
    spawn_weight: 15,
    color: (0x8b, 0x45, 0x13),
};

impl Species {
    /// Spawn-pick order. Keep in sync with the declaration order.
    pub const ALL: [Self; 3] = [Self::Cow, Self::Chicken, Self::Farmer];

    #[must_use]
    pub const fn stats(self) -> &'static SpeciesStats {
        match self {
            Self::Cow => &COW,
            Self::Chicken => &CHICKEN,
            Self::Farmer => &FARMER,
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Cow => "cow",
            Self::Chicken => "chicken",
            Self::Farmer => "farmer",
        }
    }

    /// Weighted pick over the spawn-weight table.
    ///
    /// `roll` is a uniform draw in `[0, 1)`. The first species whose
    /// cumulative spawn weight meets the scaled draw wins, so ties go
    /// to the earlier entry of [`Species::ALL`].
    #[must_use]
    pub fn pick_weighted(roll: f32) -> Self {
        let total: u32 = Self::ALL.iter().map(|s| s.stats().spawn_weight).sum();
        let mut draw = roll * total as f32;
        for species in Self::ALL {
            draw -= species.stats().spawn_weight as f32;
            if draw <= 0.0 {
                return species;
            }
        }
        Self::Cow
    }
}
