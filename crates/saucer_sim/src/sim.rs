//! The simulation aggregate and its per-tick update pipeline.
//!
//! One [`Simulation`] owns the entire mutable state graph: game
//! scalars, the target arena, effect pools, the ship and the phase
//! machine. A tick is a single synchronous pass in a fixed order
//! (flight model first, then beams, targets, spawning, combo timer,
//! crash check); all suspension happens between ticks in the host's
//! frame scheduler. There are no hidden timers: everything is driven
//! by the accumulated simulation clock and per-tick counters, which
//! is what makes the whole core advanceable from tests.

use tracing::{debug, info};

use crate::constants::{
    ALTITUDE_RECOVERY_PER_TICK, ALTITUDE_RECOVERY_RATIO, BASE_ALTITUDE_DECREASE, BASE_BEAM_ASCENT,
    BASE_MAX_WEIGHT, BASE_SPECIMENS_PER_CLICK, BEAM_ASCENT_PER_LEVEL, BEAM_ORIGIN_OFFSET,
    CARGO_CAPACITY_STEP, COMBO_BASE_WINDOW_MS, COMBO_DISPLAY_THRESHOLD, COMBO_MULTIPLIER_STEP,
    COMBO_TIMER_TICKS, COMBO_WINDOW_PER_LEVEL_MS, CRASH_DESCENT_PER_TICK, CRASH_DURATION_TICKS,
    ENGINE_POWER_FACTOR, GROUND_BAND_OFFSET, GROUND_BAND_RANGE, HIT_BEAM_LIFE, INITIAL_TARGETS,
    MAX_ALTITUDE, MAX_TARGETS, MISS_BEAM_LIFE, SHIP_BASE_Y, SHIP_BOB_AMPLITUDE,
    SHIP_BOB_PERIOD_MS, SHIP_EASING, SHIP_HEIGHT, SHIP_MAX_DESCENT, SHIP_TILT_DECAY,
    SHIP_TILT_FACTOR, SHIP_WIDTH, SPAWN_INTERVAL_MS, SPAWN_PADDING, TRADE_ALTITUDE_RESTORE,
    TRADE_BONUS_STEP,
};
use crate::economy::{self, PurchaseError, ShopItem, UpgradeKind, Upgrades};
use crate::effects::{self, Beam, ExplosionParticle};
use crate::events::{MusicCue, SimEvent, SoundCue, TextTone};
use crate::settings::Settings;
use crate::snapshot::{HudSnapshot, WeightStatus};
use crate::species::Species;
use crate::target::TargetArena;

/// Lifecycle phase machine.
///
/// `Menu -> Playing <-> Paused`, `Playing -> Crashing -> GameOver`,
/// `GameOver -> Playing` via [`Simulation::reset`], and
/// `Playing | Paused -> Menu` via [`Simulation::quit`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Menu,
    Playing,
    Paused,
    Crashing,
    GameOver,
}

/// Simulation-space canvas extents (y grows downward, origin top-left).
#[derive(Debug, Clone, Copy)]
pub struct Bounds {
    pub width: f32,
    pub height: f32,
}

/// The flying saucer. Horizontal position eases toward the last
/// pointer x; vertical position is derived from cargo weight plus a
/// sinusoidal bob.
#[derive(Debug, Clone)]
pub struct Ship {
    pub x: f32,
    pub y: f32,
    pub base_y: f32,
    pub target_x: f32,
    pub rotation: f32,
    pub width: f32,
    pub height: f32,
}

impl Ship {
    fn centered(bounds: Bounds) -> Self {
        Self {
            x: bounds.width / 2.0,
            y: SHIP_BASE_Y,
            base_y: SHIP_BASE_Y,
            target_x: bounds.width / 2.0,
            rotation: 0.0,
            width: SHIP_WIDTH,
            height: SHIP_HEIGHT,
        }
    }
}

pub struct Simulation {
    pub(crate) phase: Phase,
    /// Accumulated simulation time in milliseconds. Frozen while
    /// paused, so the combo window never expires under a pause modal.
    pub(crate) clock_ms: f64,

    pub(crate) specimens: u64,
    pub(crate) currency: u64,
    pub(crate) specimens_per_click: u32,
    pub(crate) cows_abducted: u32,
    pub(crate) chickens_abducted: u32,
    pub(crate) farmers_abducted: u32,
    pub(crate) total_abducted: u32,

    pub(crate) max_weight: u32,
    pub(crate) cargo_weight: u32,
    pub(crate) altitude: f32,
    pub(crate) altitude_decrease: f32,

    pub(crate) combo: u32,
    pub(crate) combo_timer: u32,
    pub(crate) combo_multiplier: f32,
    pub(crate) last_abduct_ms: Option<f64>,

    pub(crate) upgrades: Upgrades,
    pub(crate) settings: Settings,

    pub(crate) crash_frame: u32,
    pub(crate) bounds: Bounds,
    pub(crate) ship: Ship,
    pub(crate) arena: TargetArena,
    pub(crate) beams: Vec<Beam>,
    pub(crate) particles: Vec<ExplosionParticle>,
    pub(crate) last_spawn_ms: f64,

    pub(crate) rng: fastrand::Rng,
    pub(crate) events: Vec<SimEvent>,
}

impl Simulation {
    #[must_use]
    pub fn new(width: f32, height: f32) -> Self {
        Self::with_rng(width, height, fastrand::Rng::new())
    }

    /// Deterministic constructor for tests and replays.
    #[must_use]
    pub fn with_seed(width: f32, height: f32, seed: u64) -> Self {
        Self::with_rng(width, height, fastrand::Rng::with_seed(seed))
    }

    fn with_rng(width: f32, height: f32, rng: fastrand::Rng) -> Self {
        let bounds = Bounds { width, height };
        Self {
            phase: Phase::Menu,
            clock_ms: 0.0,
            specimens: 0,
            currency: 0,
            specimens_per_click: BASE_SPECIMENS_PER_CLICK,
            cows_abducted: 0,
            chickens_abducted: 0,
            farmers_abducted: 0,
            total_abducted: 0,
            max_weight: BASE_MAX_WEIGHT,
            cargo_weight: 0,
            altitude: MAX_ALTITUDE,
            altitude_decrease: BASE_ALTITUDE_DECREASE,
            combo: 0,
            combo_timer: 0,
            combo_multiplier: 1.0,
            last_abduct_ms: None,
            upgrades: Upgrades::default(),
            settings: Settings::default(),
            crash_frame: 0,
            bounds,
            ship: Ship::centered(bounds),
            arena: TargetArena::default(),
            beams: Vec::new(),
            particles: Vec::new(),
            last_spawn_ms: 0.0,
            rng,
            events: Vec::new(),
        }
    }

    // --- Read access for the presentation layer ---

    #[must_use]
    pub const fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub const fn ship(&self) -> &Ship {
        &self.ship
    }

    #[must_use]
    pub const fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn targets(&self) -> impl Iterator<Item = &crate::target::Target> {
        self.arena.iter()
    }

    #[must_use]
    pub fn beams(&self) -> &[Beam] {
        &self.beams
    }

    #[must_use]
    pub fn particles(&self) -> &[ExplosionParticle] {
        &self.particles
    }

    #[must_use]
    pub const fn settings(&self) -> Settings {
        self.settings
    }

    #[must_use]
    pub const fn currency(&self) -> u64 {
        self.currency
    }

    #[must_use]
    pub const fn specimens(&self) -> u64 {
        self.specimens
    }

    #[must_use]
    pub fn shop_items(&self) -> Vec<ShopItem> {
        economy::shop_items(&self.upgrades, self.currency)
    }

    /// Drains the events queued since the last drain.
    pub fn drain_events(&mut self) -> Vec<SimEvent> {
        core::mem::take(&mut self.events)
    }

    #[must_use]
    pub fn snapshot(&self) -> HudSnapshot {
        let weight_percent = self.cargo_weight as f32 / self.max_weight as f32 * 100.0;
        HudSnapshot {
            specimens: self.specimens,
            currency: self.currency,
            cows_abducted: self.cows_abducted,
            chickens_abducted: self.chickens_abducted,
            farmers_abducted: self.farmers_abducted,
            total_abducted: self.total_abducted,
            altitude: self.altitude.max(0.0) as u32,
            weight_percent,
            weight_status: WeightStatus::from_percent(weight_percent),
            combo_multiplier: self.combo_multiplier,
            combo_visible: self.combo > COMBO_DISPLAY_THRESHOLD,
        }
    }

    // --- Lifecycle operations ---

    /// Starts a run from the menu.
    pub fn start(&mut self) {
        if self.phase == Phase::Menu {
            self.begin_run();
        }
    }

    /// Starts a fresh run after a game over. Currency, upgrade levels
    /// and settings carry over; everything else goes back to initial
    /// values.
    pub fn reset(&mut self) {
        if self.phase == Phase::GameOver {
            self.begin_run();
        }
    }

    fn begin_run(&mut self) {
        info!("starting run");
        self.reset_run_state();
        self.seed_targets();
        self.phase = Phase::Playing;
        self.events.push(SimEvent::Music(MusicCue::FadeToGame));
    }

    /// Abandons the current run and returns to the menu. Same
    /// carry-over rules as [`Simulation::reset`].
    pub fn quit(&mut self) {
        if matches!(self.phase, Phase::Playing | Phase::Paused) {
            info!("quitting to menu");
            self.reset_run_state();
            self.phase = Phase::Menu;
            self.events.push(SimEvent::Music(MusicCue::FadeToMenu));
        }
    }

    fn reset_run_state(&mut self) {
        // Derived stats are recomputed from upgrade levels, which is
        // how purchases persist across runs.
        self.specimens = 0;
        self.specimens_per_click =
            BASE_SPECIMENS_PER_CLICK + self.upgrades.level(UpgradeKind::BeamPower);
        self.cows_abducted = 0;
        self.chickens_abducted = 0;
        self.farmers_abducted = 0;
        self.total_abducted = 0;
        self.max_weight = BASE_MAX_WEIGHT
            + CARGO_CAPACITY_STEP * self.upgrades.level(UpgradeKind::CargoCapacity);
        self.cargo_weight = 0;
        self.altitude = MAX_ALTITUDE;
        self.altitude_decrease = BASE_ALTITUDE_DECREASE
            * ENGINE_POWER_FACTOR.powi(self.upgrades.level(UpgradeKind::EnginePower) as i32);
        self.combo = 0;
        self.combo_timer = 0;
        self.combo_multiplier = 1.0;
        self.last_abduct_ms = None;
        self.crash_frame = 0;
        self.ship = Ship::centered(self.bounds);
        self.arena.clear();
        self.beams.clear();
        self.particles.clear();
        self.last_spawn_ms = self.clock_ms;
    }

    fn seed_targets(&mut self) {
        for _ in 0..INITIAL_TARGETS {
            self.spawn_target();
        }
    }

    pub fn toggle_pause(&mut self) {
        match self.phase {
            Phase::Playing => {
                self.phase = Phase::Paused;
                self.events.push(SimEvent::Music(MusicCue::Pause));
            }
            Phase::Paused => {
                self.phase = Phase::Playing;
                self.events.push(SimEvent::Music(MusicCue::Resume));
            }
            _ => {}
        }
    }

    pub fn set_settings(&mut self, settings: Settings) {
        self.settings = settings;
    }

    /// The host canvas was resized; recenter the ship's travel target.
    pub fn resize(&mut self, width: f32, height: f32) {
        self.bounds = Bounds { width, height };
        if self.phase == Phase::Playing {
            self.ship.target_x = width / 2.0;
        }
    }

    // --- Per-frame tick ---

    /// Advances the simulation by one frame. `dt_ms` feeds the clock
    /// that gates combo windows and spawning; per-tick counters
    /// (combo timer, crash frames, effect lifetimes) advance by one.
    pub fn tick(&mut self, dt_ms: f32) {
        match self.phase {
            // Paused is an early return with no mutation at all.
            Phase::Menu | Phase::GameOver | Phase::Paused => {}
            Phase::Crashing => {
                self.clock_ms += f64::from(dt_ms);
                self.tick_crashing();
            }
            Phase::Playing => {
                self.clock_ms += f64::from(dt_ms);
                self.tick_playing();
            }
        }
    }

    fn tick_playing(&mut self) {
        // Flight first: target ascent and the crash check both depend
        // on the ship position computed this tick.
        self.integrate_flight();
        effects::step_beams(&mut self.beams);

        let ascent_speed = BASE_BEAM_ASCENT
            + BEAM_ASCENT_PER_LEVEL * self.upgrades.level(UpgradeKind::BeamPower) as f32;
        self.arena
            .advance_all(self.bounds.width, self.ship.y, ascent_speed);

        self.maybe_spawn();
        self.step_combo_timer();
        self.check_crash();
    }

    fn tick_crashing(&mut self) {
        self.crash_frame += 1;
        self.ship.y += CRASH_DESCENT_PER_TICK;
        effects::step_particles(&mut self.particles);

        if self.crash_frame >= CRASH_DURATION_TICKS {
            info!(
                specimens = self.specimens,
                total_abducted = self.total_abducted,
                "run ended"
            );
            self.phase = Phase::GameOver;
            self.events.push(SimEvent::Music(MusicCue::Stop));
            self.events.push(SimEvent::RunEnded);
        }
    }

    fn weight_ratio(&self) -> f32 {
        self.cargo_weight as f32 / self.max_weight as f32
    }

    fn integrate_flight(&mut self) {
        let ratio = self.weight_ratio();

        // Quadratic-ish easing so the late-game descent feels dramatic.
        self.ship.base_y = SHIP_BASE_Y + SHIP_MAX_DESCENT * ratio.powf(1.5);

        let dx = self.ship.target_x - self.ship.x;
        if dx.abs() > 1.0 {
            self.ship.x += dx * SHIP_EASING;
            self.ship.rotation = dx * SHIP_TILT_FACTOR;
        } else {
            self.ship.rotation *= SHIP_TILT_DECAY;
        }

        self.ship.y = self.ship.base_y
            + (self.clock_ms as f32 / SHIP_BOB_PERIOD_MS).sin() * SHIP_BOB_AMPLITUDE;

        self.altitude -= self.altitude_decrease * ratio * 0.5;
        if ratio < ALTITUDE_RECOVERY_RATIO && self.altitude < MAX_ALTITUDE {
            self.altitude += ALTITUDE_RECOVERY_PER_TICK;
        }
        self.altitude = self.altitude.clamp(0.0, MAX_ALTITUDE);
    }

    fn maybe_spawn(&mut self) {
        if self.clock_ms - self.last_spawn_ms > SPAWN_INTERVAL_MS && self.arena.len() < MAX_TARGETS
        {
            self.spawn_target();
            self.last_spawn_ms = self.clock_ms;
        }
    }

    fn spawn_target(&mut self) {
        let species = Species::pick_weighted(self.rng.f32());
        let x = self.rng.f32() * (self.bounds.width - 2.0 * SPAWN_PADDING) + SPAWN_PADDING;
        let y = self.bounds.height - GROUND_BAND_OFFSET - self.rng.f32() * GROUND_BAND_RANGE;
        let direction = if self.rng.bool() { 1.0 } else { -1.0 };
        self.arena.spawn(species, x, y, direction);
    }

    fn step_combo_timer(&mut self) {
        if self.combo == 0 {
            return;
        }
        self.combo_timer = self.combo_timer.saturating_sub(1);
        if self.combo_timer == 0 {
            self.combo = 0;
            self.combo_multiplier = 1.0;
            self.events.push(SimEvent::ComboHidden);
        }
    }

    fn check_crash(&mut self) {
        if self.altitude <= 0.0 && self.phase == Phase::Playing {
            debug!("altitude depleted, crashing");
            self.phase = Phase::Crashing;
            self.crash_frame = 0;
            self.particles = effects::explosion_burst(&mut self.rng, self.ship.x, self.ship.y);
            self.events.push(SimEvent::CrashStarted);
        }
    }

    // --- Abduction engine ---

    /// Resolves a pointer press in simulation space.
    ///
    /// The ship always retargets toward the pointer, hit or not.
    /// Every non-abducted target within its hit radius is processed
    /// independently; a press that hits nothing at all spawns a short
    /// miss beam as feedback.
    pub fn pointer_pressed(&mut self, x: f32, y: f32) {
        if self.phase != Phase::Playing {
            return;
        }

        self.ship.target_x = x;
        self.events.push(SimEvent::Sound(SoundCue::TractorBeam));

        let mut any_hit = false;
        for index in 0..self.arena.len() {
            let Some(target) = self.arena.get(index) else {
                continue;
            };
            if target.is_abducted {
                continue;
            }
            let (species, tx, ty) = (target.species, target.x, target.y);
            let stats = species.stats();

            let distance = (tx - x).hypot(ty - y);
            if distance >= stats.size {
                continue;
            }
            any_hit = true;

            if self.cargo_weight + stats.weight > self.max_weight {
                self.events.push(SimEvent::FloatingText {
                    x: tx,
                    y: ty,
                    text: "TOO HEAVY!".to_owned(),
                    tone: TextTone::Warning,
                });
                continue;
            }

            if let Some(target) = self.arena.get_mut(index) {
                target.is_abducted = true;
                target.beam_y = target.y;
            }
            self.complete_abduction(species, tx, ty);
        }

        if !any_hit {
            self.beams.push(Beam {
                x: self.ship.x,
                y: self.ship.y + BEAM_ORIGIN_OFFSET,
                target_x: x,
                target_y: y,
                life: MISS_BEAM_LIFE,
            });
        }
    }

    fn complete_abduction(&mut self, species: Species, x: f32, y: f32) {
        let stats = species.stats();
        let reward = self.score_abduction(stats.value);

        self.cargo_weight += stats.weight;
        self.total_abducted += 1;
        match species {
            Species::Cow => {
                self.cows_abducted += 1;
                self.events.push(SimEvent::Sound(SoundCue::Cow));
            }
            Species::Chicken => {
                self.chickens_abducted += 1;
                self.events.push(SimEvent::Sound(SoundCue::Chicken));
            }
            Species::Farmer => self.farmers_abducted += 1,
        }

        self.beams.push(Beam {
            x: self.ship.x,
            y: self.ship.y + BEAM_ORIGIN_OFFSET,
            target_x: x,
            target_y: y,
            life: HIT_BEAM_LIFE,
        });

        let text = if self.combo > 1 {
            format!("+{reward} x{:.1}", self.combo_multiplier)
        } else {
            format!("+{reward}")
        };
        self.events.push(SimEvent::FloatingText {
            x,
            y,
            text,
            tone: TextTone::Reward,
        });

        if self.combo > COMBO_DISPLAY_THRESHOLD {
            self.events.push(SimEvent::ComboShown {
                multiplier: self.combo_multiplier,
            });
        }
    }

    /// Combo scorer: extends the streak when the previous successful
    /// abduction is still inside the window, otherwise restarts it.
    /// Returns the specimen reward for this abduction.
    fn score_abduction(&mut self, value: u32) -> u64 {
        let window = COMBO_BASE_WINDOW_MS
            + COMBO_WINDOW_PER_LEVEL_MS * f64::from(self.upgrades.level(UpgradeKind::ComboTime));
        let within_window = self
            .last_abduct_ms
            .is_some_and(|last| self.clock_ms - last < window);

        if within_window {
            self.combo += 1;
            self.combo_multiplier = 1.0 + COMBO_MULTIPLIER_STEP * self.combo as f32;
        } else {
            self.combo = 1;
            self.combo_multiplier = 1.0;
        }
        // Updated after the window comparison, so the fresh timestamp
        // governs the next press.
        self.last_abduct_ms = Some(self.clock_ms);
        self.combo_timer = COMBO_TIMER_TICKS;

        let reward = ((value * self.specimens_per_click) as f32 * self.combo_multiplier).floor()
            as u64;
        self.specimens += reward;
        reward
    }

    // --- Economy ---

    /// Converts all specimens to currency, empties the cargo bay and
    /// recovers some altitude. Emptying the hold is what makes trading
    /// the designed escape from a weight-driven crash.
    pub fn trade(&mut self) {
        if self.phase != Phase::Playing || self.specimens == 0 {
            return;
        }

        let rate =
            1.0 + TRADE_BONUS_STEP * self.upgrades.level(UpgradeKind::TradeBonus) as f32;
        let gained = (self.specimens as f64 * f64::from(rate)).floor() as u64;
        self.currency += gained;
        self.specimens = 0;
        self.cargo_weight = 0;
        self.altitude = (self.altitude + TRADE_ALTITUDE_RESTORE).min(MAX_ALTITUDE);

        debug!(gained, "traded specimens");
        self.events.push(SimEvent::FloatingText {
            x: self.bounds.width / 2.0,
            y: self.bounds.height / 2.0,
            text: format!("+{gained} CURRENCY"),
            tone: TextTone::Currency,
        });
    }

    /// Buys the next level of an upgrade and applies its effect once.
    pub fn purchase(&mut self, kind: UpgradeKind) -> Result<(), PurchaseError> {
        let cost = self.upgrades.cost(kind);
        if self.currency < cost {
            return Err(PurchaseError::InsufficientFunds {
                needed: cost,
                have: self.currency,
            });
        }

        self.currency -= cost;
        self.upgrades.bump(kind);
        match kind {
            UpgradeKind::CargoCapacity => self.max_weight += CARGO_CAPACITY_STEP,
            UpgradeKind::EnginePower => self.altitude_decrease *= ENGINE_POWER_FACTOR,
            UpgradeKind::BeamPower => {
                self.specimens_per_click =
                    BASE_SPECIMENS_PER_CLICK + self.upgrades.level(UpgradeKind::BeamPower);
            }
            // Passive: read from the level where they apply.
            UpgradeKind::ComboTime | UpgradeKind::TradeBonus => {}
        }

        info!(upgrade = kind.name(), level = self.upgrades.level(kind), "purchased upgrade");
        self.events.push(SimEvent::FloatingText {
            x: self.bounds.width / 2.0,
            y: 150.0,
            text: "UPGRADED!".to_owned(),
            tone: TextTone::Info,
        });
        Ok(())
    }
}
