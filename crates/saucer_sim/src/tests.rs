use crate::constants::{
    COMBO_TIMER_TICKS, CRASH_DURATION_TICKS, EXPLOSION_PARTICLE_COUNT, INITIAL_TARGETS,
    MISS_BEAM_LIFE,
};
use crate::economy::{PurchaseError, UpgradeKind};
use crate::events::{MusicCue, SimEvent, SoundCue, TextTone};
use crate::settings::{Difficulty, Settings};
use crate::sim::{Phase, Simulation};
use crate::snapshot::WeightStatus;
use crate::species::Species;

/// Nominal 60 Hz frame.
const DT: f32 = 1000.0 / 60.0;

fn playing_sim() -> Simulation {
    let mut sim = Simulation::with_seed(800.0, 600.0, 7);
    sim.start();
    sim.drain_events();
    sim
}

/// A playing sim with an empty field, so tests place targets exactly
/// where they want them.
fn empty_field() -> Simulation {
    let mut sim = playing_sim();
    sim.arena.clear();
    sim
}

fn place(sim: &mut Simulation, species: Species, x: f32, y: f32) {
    sim.arena.spawn(species, x, y, 1.0);
}

#[test]
fn run_starts_with_seeded_targets() {
    let sim = playing_sim();
    assert_eq!(sim.phase(), Phase::Playing, "start() should enter Playing");
    assert_eq!(sim.arena.len(), INITIAL_TARGETS, "initial pool seeding");
}

#[test]
fn weighted_pick_breaks_ties_in_declaration_order() {
    // Cumulative spawn weights: cow 50, chicken 85, farmer 100.
    assert_eq!(Species::pick_weighted(0.0), Species::Cow);
    assert_eq!(Species::pick_weighted(0.49), Species::Cow);
    assert_eq!(Species::pick_weighted(0.5), Species::Cow, "tie goes to the earlier species");
    assert_eq!(Species::pick_weighted(0.51), Species::Chicken);
    assert_eq!(Species::pick_weighted(0.85), Species::Chicken);
    assert_eq!(Species::pick_weighted(0.86), Species::Farmer);
    assert_eq!(Species::pick_weighted(0.999), Species::Farmer);
}

#[test]
fn first_abduction_starts_streak_at_one() {
    let mut sim = empty_field();
    place(&mut sim, Species::Cow, 400.0, 500.0);

    sim.pointer_pressed(400.0, 500.0);

    assert_eq!(sim.specimens(), 1, "cow value 1 x 1 click x 1.0 multiplier");
    assert_eq!(sim.cargo_weight, 2);
    assert_eq!(sim.combo, 1);
    assert!((sim.combo_multiplier - 1.0).abs() < f32::EPSILON);
    assert_eq!(sim.cows_abducted, 1);
    let events = sim.drain_events();
    assert!(events.contains(&SimEvent::Sound(SoundCue::TractorBeam)), "beam sound on every press");
    assert!(events.contains(&SimEvent::Sound(SoundCue::Cow)), "species sound on success");
}

#[test]
fn second_abduction_inside_window_multiplies() {
    let mut sim = empty_field();
    place(&mut sim, Species::Cow, 200.0, 500.0);
    place(&mut sim, Species::Cow, 600.0, 500.0);

    sim.pointer_pressed(200.0, 500.0);
    for _ in 0..10 {
        sim.tick(DT); // ~167 ms, well inside the 2000 ms window
    }
    sim.pointer_pressed(600.0, 500.0);

    assert_eq!(sim.combo, 2);
    assert!((sim.combo_multiplier - 1.2).abs() < 1e-6);
    // floor(1 * 1 * 1.2) = 1, so 1 + 1 specimens total.
    assert_eq!(sim.specimens(), 2);
}

#[test]
fn gap_beyond_window_restarts_streak() {
    let mut sim = empty_field();
    place(&mut sim, Species::Cow, 200.0, 500.0);
    place(&mut sim, Species::Cow, 600.0, 500.0);

    sim.pointer_pressed(200.0, 500.0);
    for _ in 0..130 {
        sim.tick(DT); // ~2167 ms > 2000 ms window
    }
    sim.pointer_pressed(600.0, 500.0);

    assert_eq!(sim.combo, 1, "stale window restarts the streak");
    assert!((sim.combo_multiplier - 1.0).abs() < f32::EPSILON);
}

#[test]
fn combo_timer_expires_after_fixed_ticks() {
    let mut sim = empty_field();
    place(&mut sim, Species::Cow, 400.0, 500.0);
    sim.pointer_pressed(400.0, 500.0);
    sim.drain_events();

    for _ in 0..COMBO_TIMER_TICKS - 1 {
        sim.tick(DT);
    }
    assert_eq!(sim.combo, 1, "one tick early the streak still stands");

    sim.tick(DT);
    assert_eq!(sim.combo, 0);
    assert!((sim.combo_multiplier - 1.0).abs() < f32::EPSILON);
    assert!(
        sim.drain_events().contains(&SimEvent::ComboHidden),
        "HUD badge cleared exactly when the timer runs out"
    );
}

#[test]
fn one_press_can_abduct_several_targets() {
    let mut sim = empty_field();
    place(&mut sim, Species::Chicken, 400.0, 500.0);
    place(&mut sim, Species::Chicken, 410.0, 505.0);

    sim.pointer_pressed(405.0, 502.0);

    assert_eq!(sim.chickens_abducted, 2, "hits are processed independently");
    assert_eq!(sim.cargo_weight, 2);
    assert_eq!(sim.combo, 2, "the second hit extends the streak");
    // 2 + floor(2 * 1.2) = 4
    assert_eq!(sim.specimens(), 4);
    assert_eq!(sim.beams().len(), 2);
    assert!(sim.targets().all(|t| t.is_abducted));
}

#[test]
fn over_capacity_hit_is_rejected_without_state_change() {
    let mut sim = empty_field();
    sim.cargo_weight = 19;
    place(&mut sim, Species::Cow, 400.0, 500.0); // weight 2 would exceed 20
    sim.drain_events();

    sim.pointer_pressed(400.0, 500.0);

    assert_eq!(sim.cargo_weight, 19, "rejected hit leaves cargo untouched");
    assert_eq!(sim.specimens(), 0);
    assert!(sim.targets().all(|t| !t.is_abducted), "target stays clickable");
    assert!(
        sim.beams().is_empty(),
        "a rejected hit is still a hit, so no miss beam"
    );
    let warned = sim.drain_events().iter().any(|event| {
        matches!(event, SimEvent::FloatingText { tone: TextTone::Warning, .. })
    });
    assert!(warned, "too-heavy feedback emitted");
}

#[test]
fn empty_press_spawns_short_miss_beam_only() {
    let mut sim = empty_field();
    sim.pointer_pressed(100.0, 100.0);

    assert_eq!(sim.specimens(), 0);
    assert_eq!(sim.beams().len(), 1);
    assert_eq!(sim.beams()[0].life, MISS_BEAM_LIFE);
    assert!((sim.ship.target_x - 100.0).abs() < f32::EPSILON, "ship retargets even on a miss");
}

#[test]
fn beams_expire_by_lifetime() {
    let mut sim = empty_field();
    sim.pointer_pressed(100.0, 100.0);
    for _ in 0..MISS_BEAM_LIFE {
        sim.tick(DT);
    }
    assert!(sim.beams().is_empty());
}

#[test]
fn abducted_target_rides_beam_up_and_retires() {
    let mut sim = empty_field();
    place(&mut sim, Species::Chicken, 400.0, 500.0);
    sim.pointer_pressed(400.0, 500.0);

    // Base ascent is 3 px/tick and the ship sits near y=100, so the
    // ride takes roughly (500 - 100) / 3 ticks. The spawn gate may
    // repopulate the field meanwhile; only the rider matters here.
    for _ in 0..200 {
        sim.tick(DT);
    }
    assert!(
        sim.targets().all(|target| !target.is_abducted),
        "rider retired once it reached the ship"
    );
    assert_eq!(sim.chickens_abducted, 1);
}

#[test]
fn spawn_gate_waits_out_the_interval() {
    let mut sim = playing_sim();
    assert_eq!(sim.arena.len(), INITIAL_TARGETS);

    // 110 ticks ~ 1833 ms, just past the 1800 ms gate.
    for _ in 0..110 {
        sim.tick(DT);
    }
    assert_eq!(sim.arena.len(), INITIAL_TARGETS + 1);

    for _ in 0..5 {
        sim.tick(DT);
    }
    assert_eq!(sim.arena.len(), INITIAL_TARGETS + 1, "gate re-arms after each spawn");
}

#[test]
fn pool_is_capped() {
    let mut sim = playing_sim();
    for _ in 0..4 {
        place(&mut sim, Species::Cow, 400.0, 500.0);
    }
    assert_eq!(sim.arena.len(), 10);

    for _ in 0..250 {
        sim.tick(DT);
    }
    assert_eq!(sim.arena.len(), 10, "no spawns while the pool is full");
}

#[test]
fn descent_target_follows_weight_ratio() {
    let mut sim = empty_field();
    sim.tick(DT);
    assert!((sim.ship.base_y - 100.0).abs() < f32::EPSILON, "empty hold hovers at base");

    sim.cargo_weight = sim.max_weight;
    sim.tick(DT);
    assert!((sim.ship.base_y - 400.0).abs() < 1e-3, "full hold descends 300");
    assert!((sim.ship.y - sim.ship.base_y).abs() <= 8.0 + 1e-3, "bob stays within amplitude");
}

#[test]
fn altitude_recovers_when_hold_is_light() {
    let mut sim = empty_field();
    sim.altitude = 50.0;
    sim.tick(DT);
    assert!((sim.altitude - 50.15).abs() < 1e-4);

    sim.altitude = 99.99;
    sim.tick(DT);
    assert!((sim.altitude - 100.0).abs() < f32::EPSILON, "recovery caps at 100");
}

#[test]
fn crash_fires_once_and_ends_sixty_ticks_later() {
    let mut sim = empty_field();
    sim.cargo_weight = sim.max_weight;
    sim.altitude = 0.2; // full hold drains 0.25 per tick
    sim.drain_events();

    sim.tick(DT);
    assert_eq!(sim.phase(), Phase::Crashing);
    assert_eq!(sim.particles().len(), EXPLOSION_PARTICLE_COUNT);
    assert!(sim.drain_events().contains(&SimEvent::CrashStarted));

    let ship_y = sim.ship.y;
    for _ in 0..CRASH_DURATION_TICKS - 1 {
        sim.tick(DT);
    }
    assert_eq!(sim.phase(), Phase::Crashing, "still falling one tick before the end");
    assert!(sim.ship.y > ship_y, "ship keeps descending through the crash");

    sim.tick(DT);
    assert_eq!(sim.phase(), Phase::GameOver);
    let events = sim.drain_events();
    assert!(events.contains(&SimEvent::RunEnded));
    assert!(events.contains(&SimEvent::Music(MusicCue::Stop)));
}

#[test]
fn trade_converts_and_recovers_altitude() {
    let mut sim = empty_field();
    sim.specimens = 10;
    sim.cargo_weight = 15;
    sim.altitude = 50.0;
    sim.upgrades.bump(UpgradeKind::TradeBonus);
    sim.upgrades.bump(UpgradeKind::TradeBonus);

    sim.trade();

    assert_eq!(sim.currency(), 14, "floor(10 * 1.4)");
    assert_eq!(sim.specimens(), 0);
    assert_eq!(sim.cargo_weight, 0);
    assert!((sim.altitude - 80.0).abs() < f32::EPSILON);

    // Altitude restore is capped at 100.
    sim.specimens = 1;
    sim.altitude = 90.0;
    sim.trade();
    assert!((sim.altitude - 100.0).abs() < f32::EPSILON);
}

#[test]
fn trade_with_empty_hold_is_a_no_op() {
    let mut sim = empty_field();
    sim.altitude = 50.0;
    sim.trade();
    assert_eq!(sim.currency(), 0);
    assert!((sim.altitude - 50.0).abs() < f32::EPSILON, "no free altitude from empty trades");
}

#[test]
fn cargo_capacity_purchase_raises_max_weight() {
    let mut sim = empty_field();
    sim.currency = 50;

    assert_eq!(sim.upgrades.cost(UpgradeKind::CargoCapacity), 50);
    sim.purchase(UpgradeKind::CargoCapacity).expect("affordable");

    assert_eq!(sim.max_weight, 25);
    assert_eq!(sim.currency(), 0);
    assert_eq!(sim.upgrades.cost(UpgradeKind::CargoCapacity), 75, "linear cost ladder");

    let err = sim.purchase(UpgradeKind::CargoCapacity).expect_err("broke now");
    assert_eq!(err, PurchaseError::InsufficientFunds { needed: 75, have: 0 });
}

#[test]
fn upgrade_cost_ladders_are_linear_per_kind() {
    let mut sim = empty_field();
    sim.currency = 10_000;
    let expected = [
        (UpgradeKind::CargoCapacity, 50, 75),
        (UpgradeKind::EnginePower, 100, 150),
        (UpgradeKind::BeamPower, 75, 115),
        (UpgradeKind::ComboTime, 150, 225),
        (UpgradeKind::TradeBonus, 200, 300),
    ];
    for (kind, first, second) in expected {
        assert_eq!(sim.upgrades.cost(kind), first, "{} base cost", kind.name());
        sim.purchase(kind).expect("bankrolled");
        assert_eq!(sim.upgrades.cost(kind), second, "{} next cost", kind.name());
    }
}

#[test]
fn upgrade_effects_apply_once_per_purchase() {
    let mut sim = empty_field();
    sim.currency = 10_000;

    sim.purchase(UpgradeKind::EnginePower).expect("bankrolled");
    assert!((sim.altitude_decrease - 0.4).abs() < 1e-6, "0.5 * 0.8");

    sim.purchase(UpgradeKind::BeamPower).expect("bankrolled");
    assert_eq!(sim.specimens_per_click, 2);
}

#[test]
fn shop_listing_orders_and_flags_affordability() {
    let mut sim = empty_field();
    sim.currency = 80;
    let items = sim.shop_items();

    let kinds: Vec<_> = items.iter().map(|item| item.kind).collect();
    assert_eq!(kinds, UpgradeKind::ALL.to_vec(), "fixed listing order");
    let affordable: Vec<_> = items.iter().map(|item| item.affordable).collect();
    assert_eq!(affordable, vec![true, false, true, false, false]);
}

#[test]
fn paused_tick_mutates_nothing() {
    let mut sim = playing_sim();
    for _ in 0..30 {
        sim.tick(DT);
    }
    sim.toggle_pause();
    assert_eq!(sim.phase(), Phase::Paused);

    let clock = sim.clock_ms;
    let altitude = sim.altitude;
    let ship_y = sim.ship.y;
    let targets = sim.arena.len();
    for _ in 0..60 {
        sim.tick(DT);
    }
    sim.pointer_pressed(400.0, 500.0);

    assert!((sim.clock_ms - clock).abs() < f64::EPSILON, "clock frozen while paused");
    assert!((sim.altitude - altitude).abs() < f32::EPSILON);
    assert!((sim.ship.y - ship_y).abs() < f32::EPSILON);
    assert_eq!(sim.arena.len(), targets);
    assert_eq!(sim.specimens(), 0, "input ignored while paused");

    sim.toggle_pause();
    assert_eq!(sim.phase(), Phase::Playing);
}

#[test]
fn reset_carries_currency_upgrades_and_settings() {
    let mut sim = empty_field();
    sim.currency = 200;
    sim.purchase(UpgradeKind::CargoCapacity).expect("affordable");
    sim.set_settings(Settings {
        sounds_enabled: false,
        music_enabled: false,
        difficulty: Difficulty::Hard,
    });
    sim.specimens = 42;

    // Force the crash path to reach GameOver legitimately.
    sim.cargo_weight = sim.max_weight;
    sim.altitude = 0.1;
    sim.tick(DT);
    for _ in 0..CRASH_DURATION_TICKS {
        sim.tick(DT);
    }
    assert_eq!(sim.phase(), Phase::GameOver);

    sim.reset();

    assert_eq!(sim.phase(), Phase::Playing);
    assert_eq!(sim.currency(), 150, "currency survives the reset");
    assert_eq!(sim.max_weight, 25, "upgrade effect recomputed from level");
    assert_eq!(sim.specimens(), 0);
    assert_eq!(sim.cargo_weight, 0);
    assert!((sim.altitude - 100.0).abs() < f32::EPSILON);
    assert_eq!(sim.arena.len(), INITIAL_TARGETS);
    assert!(!sim.settings().sounds_enabled, "settings survive the reset");
    assert_eq!(sim.settings().difficulty, Difficulty::Hard);
}

#[test]
fn quit_returns_to_menu_and_keeps_currency() {
    let mut sim = empty_field();
    sim.currency = 77;
    sim.specimens = 9;

    sim.quit();

    assert_eq!(sim.phase(), Phase::Menu);
    assert_eq!(sim.currency(), 77);
    assert_eq!(sim.specimens(), 0);
    assert!(sim.arena.is_empty());
    assert!(sim.drain_events().contains(&SimEvent::Music(MusicCue::FadeToMenu)));

    // Menu ignores gameplay input and ticks.
    sim.pointer_pressed(400.0, 500.0);
    sim.tick(DT);
    assert_eq!(sim.specimens(), 0);
}

#[test]
fn combo_badge_lights_past_threshold() {
    let mut sim = empty_field();
    for offset in [0.0_f32, 20.0, 40.0] {
        place(&mut sim, Species::Cow, 300.0 + offset, 500.0);
    }
    sim.drain_events();

    sim.pointer_pressed(320.0, 500.0);

    let shown = sim.drain_events().into_iter().find_map(|event| match event {
        SimEvent::ComboShown { multiplier } => Some(multiplier),
        _ => None,
    });
    assert!((shown.expect("combo of 3 shows the badge") - 1.3).abs() < 1e-6);
}

#[test]
fn weight_status_tiers() {
    assert_eq!(WeightStatus::from_percent(0.0), WeightStatus::Optimal);
    assert_eq!(WeightStatus::from_percent(49.9), WeightStatus::Optimal);
    assert_eq!(WeightStatus::from_percent(50.0), WeightStatus::Warning);
    assert_eq!(WeightStatus::from_percent(79.9), WeightStatus::Warning);
    assert_eq!(WeightStatus::from_percent(80.0), WeightStatus::Critical);
    assert_eq!(WeightStatus::from_percent(100.0), WeightStatus::Critical);
}

#[test]
fn snapshot_serializes() {
    let sim = playing_sim();
    let snapshot = sim.snapshot();
    let json = serde_json::to_string(&snapshot).expect("snapshot is serializable");
    assert!(json.contains("\"altitude\":100"));

    let settings = Settings::default();
    let json = serde_json::to_string(&settings).expect("settings serialize");
    let back: Settings = serde_json::from_str(&json).expect("settings deserialize");
    assert_eq!(back, settings);
}

/// Clamped invariants hold under sustained random play.
#[test]
fn invariants_hold_under_random_play() {
    let mut sim = playing_sim();
    let mut rng = fastrand::Rng::with_seed(99);

    for frame in 0..1200 {
        if frame % 7 == 0 {
            let x = rng.f32() * 800.0;
            let y = rng.f32() * 600.0;
            sim.pointer_pressed(x, y);
        }
        if frame % 211 == 0 {
            sim.trade();
        }
        sim.tick(DT);

        assert!(sim.cargo_weight <= sim.max_weight, "cargo never exceeds capacity");
        assert!((0.0..=100.0).contains(&sim.altitude), "altitude stays clamped");
        assert!(sim.arena.len() <= 10, "pool stays capped");
        if sim.phase() == Phase::GameOver {
            break;
        }
        sim.drain_events();
    }
}
