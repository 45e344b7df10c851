//! Target pool: the arena of abductable entities.

use crate::constants::{ASCENT_WOBBLE_STEP, IDLE_WOBBLE_STEP, SPAWN_PADDING};
use crate::species::Species;

/// Stable handle to a live target. Ids are never reused within a run,
/// so presentation code can key sprites by them across swap-removes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TargetId(pub u32);

#[derive(Debug, Clone)]
pub struct Target {
    pub id: TargetId,
    pub species: Species,
    pub x: f32,
    pub y: f32,
    /// Horizontal patrol direction, `-1.0` or `1.0`.
    pub direction: f32,
    pub is_abducted: bool,
    /// Vertical position while riding the capture beam.
    pub beam_y: f32,
    /// Idle sway / ascent spin phase.
    pub wobble: f32,
}

impl Target {
    /// Advances one tick. Returns `false` once an abducted target has
    /// reached the ship and should be retired from the arena.
    fn advance(&mut self, width: f32, ship_y: f32, ascent_speed: f32) -> bool {
        if self.is_abducted {
            self.beam_y = (self.beam_y - ascent_speed).max(ship_y);
            self.y = self.beam_y;
            self.wobble += ASCENT_WOBBLE_STEP;
            return self.beam_y > ship_y;
        }

        self.x += self.species.stats().speed * self.direction;
        self.wobble += IDLE_WOBBLE_STEP;
        if self.x < SPAWN_PADDING || self.x > width - SPAWN_PADDING {
            self.direction = -self.direction;
        }
        true
    }
}

/// Owning pool of targets, compacted by swap-remove so the per-tick
/// sweep never fights iterator invalidation.
#[derive(Debug, Default)]
pub struct TargetArena {
    slots: Vec<Target>,
    next_id: u32,
}

impl TargetArena {
    pub fn spawn(&mut self, species: Species, x: f32, y: f32, direction: f32) -> TargetId {
        let id = TargetId(self.next_id);
        self.next_id += 1;
        self.slots.push(Target {
            id,
            species,
            x,
            y,
            direction,
            is_abducted: false,
            beam_y: 0.0,
            wobble: 0.0,
        });
        id
    }

    /// Advances every target one tick and swap-removes the ones whose
    /// ascent completed. Returns the retired ids.
    pub fn advance_all(&mut self, width: f32, ship_y: f32, ascent_speed: f32) -> Vec<TargetId> {
        let mut retired = Vec::new();
        let mut index = 0;
        while index < self.slots.len() {
            let keep = match self.slots.get_mut(index) {
                Some(target) => target.advance(width, ship_y, ascent_speed),
                None => break,
            };
            if keep {
                index += 1;
            } else {
                retired.push(self.slots.swap_remove(index).id);
            }
        }
        retired
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn clear(&mut self) {
        self.slots.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &Target> {
        self.slots.iter()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Target> {
        self.slots.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Target> {
        self.slots.get_mut(index)
    }
}
