//! Balance constants for the simulation.
//!
//! Everything here is expressed either per tick (the nominal 60 Hz
//! frame) or in simulation-clock milliseconds. Tick-counted values
//! stay tick-counted on purpose: the game is frame-paced and the
//! original balancing was tuned against frames, not wall time.

// Cargo and altitude
pub const BASE_MAX_WEIGHT: u32 = 20;
pub const BASE_ALTITUDE_DECREASE: f32 = 0.5;
pub const MAX_ALTITUDE: f32 = 100.0;
pub const ALTITUDE_RECOVERY_PER_TICK: f32 = 0.15;
/// Below this weight ratio the ship slowly regains altitude.
pub const ALTITUDE_RECOVERY_RATIO: f32 = 0.3;
pub const TRADE_ALTITUDE_RESTORE: f32 = 30.0;

// Ship flight
pub const SHIP_BASE_Y: f32 = 100.0;
/// Extra descent at 100% cargo, scaled by `ratio^1.5`.
pub const SHIP_MAX_DESCENT: f32 = 300.0;
pub const SHIP_EASING: f32 = 0.1;
pub const SHIP_TILT_FACTOR: f32 = 0.001;
pub const SHIP_TILT_DECAY: f32 = 0.95;
pub const SHIP_BOB_AMPLITUDE: f32 = 8.0;
pub const SHIP_BOB_PERIOD_MS: f32 = 500.0;
pub const SHIP_WIDTH: f32 = 100.0;
pub const SHIP_HEIGHT: f32 = 50.0;

// Abduction beam
pub const BASE_BEAM_ASCENT: f32 = 3.0;
pub const BEAM_ASCENT_PER_LEVEL: f32 = 0.5;
/// Beam drawn from slightly below the hull.
pub const BEAM_ORIGIN_OFFSET: f32 = 20.0;
pub const HIT_BEAM_LIFE: u32 = 30;
pub const MISS_BEAM_LIFE: u32 = 15;

// Combo scoring
pub const COMBO_BASE_WINDOW_MS: f64 = 2000.0;
pub const COMBO_WINDOW_PER_LEVEL_MS: f64 = 500.0;
pub const COMBO_TIMER_TICKS: u32 = 120;
pub const COMBO_MULTIPLIER_STEP: f32 = 0.1;
/// HUD combo badge only lights up past this streak.
pub const COMBO_DISPLAY_THRESHOLD: u32 = 2;

// Target pool
pub const MAX_TARGETS: usize = 10;
pub const INITIAL_TARGETS: usize = 6;
pub const SPAWN_INTERVAL_MS: f64 = 1800.0;
pub const SPAWN_PADDING: f32 = 50.0;
/// Targets roam a band this far above the bottom edge.
pub const GROUND_BAND_OFFSET: f32 = 120.0;
pub const GROUND_BAND_RANGE: f32 = 120.0;
pub const IDLE_WOBBLE_STEP: f32 = 0.1;
pub const ASCENT_WOBBLE_STEP: f32 = 0.2;

// Crash sequence
pub const CRASH_DURATION_TICKS: u32 = 60;
pub const CRASH_DESCENT_PER_TICK: f32 = 3.0;
pub const EXPLOSION_PARTICLE_COUNT: usize = 50;
pub const EXPLOSION_PARTICLE_LIFE: u32 = 60;
pub const PARTICLE_GRAVITY: f32 = 0.2;

// Economy
pub const BASE_SPECIMENS_PER_CLICK: u32 = 1;
pub const TRADE_BONUS_STEP: f32 = 0.2;
pub const CARGO_CAPACITY_STEP: u32 = 5;
pub const ENGINE_POWER_FACTOR: f32 = 0.8;

// Weight status tiers, in percent of capacity
pub const WEIGHT_WARNING_PERCENT: f32 = 50.0;
pub const WEIGHT_CRITICAL_PERCENT: f32 = 80.0;
