use bevy::prelude::*;
use bevy::utils::HashSet;
use saucer_sim::{Phase, SimEvent};

use crate::core::{
    Backdrop, ComboBadge, MusicCueEvent, Screen, ShipSprite, ShopOpen, SimState, SoundCueEvent,
    Star, TargetSprite, sim_to_world, species_color,
};
use crate::floating_text::spawn_floating_text;
use crate::hud::{HudAction, HudButton};
use crate::input::just_pressed_canvas_position;
use crate::{WINDOW_HEIGHT, WINDOW_WIDTH};

const STAR_COUNT: usize = 60;

/// Advances the authoritative simulation by one frame. The sim itself
/// decides what a tick means in its current phase (paused ticks are
/// no-ops, menu ticks do nothing, and so on).
pub fn drive_simulation(time: Res<Time>, mut sim: ResMut<SimState>) {
    sim.0.tick(time.delta_secs() * 1000.0);
}

/// Drains the simulation's event queue: floating feedback text is
/// spawned directly, sound and music cues are forwarded to the audio
/// collaborator, combo badge events update the HUD mirror.
pub fn process_sim_events(
    mut commands: Commands,
    mut sim: ResMut<SimState>,
    mut badge: ResMut<ComboBadge>,
    mut sound_events: EventWriter<SoundCueEvent>,
    mut music_events: EventWriter<MusicCueEvent>,
    asset_server: Res<AssetServer>,
) {
    for event in sim.0.drain_events() {
        match event {
            SimEvent::Sound(cue) => {
                sound_events.send(SoundCueEvent(cue));
            }
            SimEvent::Music(cue) => {
                music_events.send(MusicCueEvent(cue));
            }
            SimEvent::FloatingText { x, y, text, tone } => {
                spawn_floating_text(&mut commands, Vec2::new(x, y), &text, tone, &asset_server);
            }
            SimEvent::ComboShown { multiplier } => {
                badge.multiplier = multiplier;
                badge.visible = true;
            }
            SimEvent::ComboHidden => {
                badge.visible = false;
            }
            SimEvent::CrashStarted => debug!("crash sequence started"),
            SimEvent::RunEnded => debug!("run ended"),
        }
    }
}

/// Mirrors the sim's phase into the Bevy state machine so screens can
/// use OnEnter/OnExit transitions.
pub fn sync_screen(
    sim: Res<SimState>,
    current: Res<State<Screen>>,
    mut next_state: ResMut<NextState<Screen>>,
) {
    let screen = match sim.0.phase() {
        Phase::Menu => Screen::Menu,
        Phase::Playing => Screen::Playing,
        Phase::Paused => Screen::Paused,
        Phase::Crashing => Screen::Crashing,
        Phase::GameOver => Screen::GameOver,
    };
    if *current.get() != screen {
        next_state.set(screen);
    }
}

/// Keeps the sim's canvas bounds in step with the window.
pub fn handle_window_resize(
    mut resize_events: EventReader<bevy::window::WindowResized>,
    mut sim: ResMut<SimState>,
) {
    if let Some(event) = resize_events.read().last() {
        sim.0.resize(event.width, event.height);
    }
}

/// Pointer input during play: HUD buttons are checked first, anything
/// else is an abduction attempt handed to the sim in canvas space.
pub fn handle_playing_input(
    mouse_button_input: Res<ButtonInput<MouseButton>>,
    touch_input: Res<Touches>,
    windows: Query<&Window>,
    buttons: Query<&HudButton>,
    mut shop_open: ResMut<ShopOpen>,
    mut sim: ResMut<SimState>,
) {
    // The shop overlay owns input while it is up, and a press that
    // just closed it should not fall through to the field.
    if shop_open.0 || shop_open.is_changed() {
        return;
    }
    let Some(position) =
        just_pressed_canvas_position(&mouse_button_input, &touch_input, &windows)
    else {
        return;
    };

    for button in &buttons {
        if button.contains(position) {
            match button.action {
                HudAction::Trade => sim.0.trade(),
                HudAction::Shop => shop_open.0 = true,
                HudAction::Pause => sim.0.toggle_pause(),
            }
            return;
        }
    }

    sim.0.pointer_pressed(position.x, position.y);
}

/// Spawns the play-field entities once per visit to the play screen.
/// Re-entering from pause finds them already present and does nothing.
pub fn try_spawn_world(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<ColorMaterial>>,
    existing: Query<(), With<ShipSprite>>,
) {
    if !existing.is_empty() {
        return;
    }

    spawn_ship(&mut commands, &mut meshes, &mut materials);
    spawn_backdrop(&mut commands);
    spawn_starfield(&mut commands);
}

fn spawn_ship(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<ColorMaterial>,
) {
    let hull = materials.add(ColorMaterial::from(Color::srgb_u8(0x00, 0xff, 0x88)));
    let band = materials.add(ColorMaterial::from(Color::srgb_u8(0x00, 0xcc, 0x70)));
    let dome = materials.add(ColorMaterial::from(Color::srgb_u8(0x00, 0xff, 0xaa)));
    let cockpit = materials.add(ColorMaterial::from(Color::srgba(0.0, 0.78, 1.0, 0.6)));

    commands
        .spawn((
            ShipSprite,
            Transform::from_xyz(0.0, WINDOW_HEIGHT / 2.0 - 100.0, 3.0),
            Visibility::default(),
        ))
        .with_children(|parent| {
            // Bottom saucer hull
            parent.spawn((
                Mesh2d(meshes.add(Ellipse::new(55.0, 20.0))),
                MeshMaterial2d(hull),
                Transform::from_xyz(0.0, -5.0, 0.0),
            ));
            // Middle band
            parent.spawn((
                Mesh2d(meshes.add(Rectangle::new(100.0, 10.0))),
                MeshMaterial2d(band),
                Transform::from_xyz(0.0, 0.0, 0.1),
            ));
            // Top dome
            parent.spawn((
                Mesh2d(meshes.add(Ellipse::new(25.0, 18.0))),
                MeshMaterial2d(dome),
                Transform::from_xyz(0.0, 8.0, 0.2),
            ));
            // Cockpit window
            parent.spawn((
                Mesh2d(meshes.add(Ellipse::new(15.0, 12.0))),
                MeshMaterial2d(cockpit),
                Transform::from_xyz(0.0, 10.0, 0.3),
            ));
        });
}

fn spawn_backdrop(commands: &mut Commands) {
    // Ground strip along the bottom edge.
    commands.spawn((
        Backdrop,
        Sprite::from_color(
            Color::srgb_u8(0x1a, 0x4d, 0x2e),
            Vec2::new(WINDOW_WIDTH * 4.0, 100.0),
        ),
        Transform::from_xyz(0.0, -WINDOW_HEIGHT / 2.0 + 50.0, 0.2),
    ));

    // Fence posts
    let mut x = -WINDOW_WIDTH / 2.0 + 20.0;
    while x < WINDOW_WIDTH / 2.0 {
        commands.spawn((
            Backdrop,
            Sprite::from_color(Color::srgb_u8(0x8b, 0x45, 0x13), Vec2::new(4.0, 40.0)),
            Transform::from_xyz(x, -WINDOW_HEIGHT / 2.0 + 115.0, 0.25),
        ));
        x += 80.0;
    }
}

fn spawn_starfield(commands: &mut Commands) {
    for _ in 0..STAR_COUNT {
        let x = fastrand::f32() * WINDOW_WIDTH - WINDOW_WIDTH / 2.0;
        let y = fastrand::f32() * WINDOW_HEIGHT - WINDOW_HEIGHT / 2.0;
        let size = fastrand::f32() * 2.5 + 0.5;
        commands.spawn((
            Star {
                speed: fastrand::f32() * 0.3 + 0.1,
                brightness: fastrand::f32(),
            },
            Sprite::from_color(Color::WHITE, Vec2::splat(size)),
            Transform::from_xyz(x, y, 0.1),
        ));
    }
}

/// Drifts stars downward with a twinkle, wrapping at the bottom.
pub fn update_starfield(mut stars: Query<(&mut Star, &mut Transform, &mut Sprite)>) {
    for (mut star, mut transform, mut sprite) in &mut stars {
        star.brightness = (star.brightness + (fastrand::f32() - 0.5) * 0.1).clamp(0.3, 1.0);
        sprite.color = Color::WHITE.with_alpha(star.brightness);

        transform.translation.y -= star.speed;
        if transform.translation.y < -WINDOW_HEIGHT / 2.0 {
            transform.translation.y = WINDOW_HEIGHT / 2.0;
            transform.translation.x = fastrand::f32() * WINDOW_WIDTH - WINDOW_WIDTH / 2.0;
        }
    }
}

/// Moves the saucer assembly to the sim's ship position. Canvas-space
/// tilt flips sign going to world space.
pub fn sync_ship(sim: Res<SimState>, mut ships: Query<&mut Transform, With<ShipSprite>>) {
    let Ok(mut transform) = ships.get_single_mut() else {
        return;
    };
    let ship = sim.0.ship();
    let position = sim_to_world(&sim.0, ship.x, ship.y);
    transform.translation.x = position.x;
    transform.translation.y = position.y;
    transform.rotation = Quat::from_rotation_z(-ship.rotation);
}

/// Reconciles target sprites with the arena: spawns circles for new
/// targets, follows positions and wobble for live ones, despawns the
/// retired.
pub fn sync_targets(
    mut commands: Commands,
    sim: Res<SimState>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<ColorMaterial>>,
    mut sprites: Query<(Entity, &TargetSprite, &mut Transform)>,
) {
    let mut seen = HashSet::new();

    for (entity, sprite, mut transform) in &mut sprites {
        let Some(target) = sim.0.targets().find(|target| target.id == sprite.id) else {
            commands.entity(entity).despawn_recursive();
            continue;
        };
        seen.insert(target.id);
        let position = sim_to_world(&sim.0, target.x, target.y);
        transform.translation.x = position.x;
        transform.translation.y = position.y;
        transform.rotation = Quat::from_rotation_z(target.wobble.sin() * 0.1);
    }

    for target in sim.0.targets() {
        if seen.contains(&target.id) {
            continue;
        }
        let stats = target.species.stats();
        let position = sim_to_world(&sim.0, target.x, target.y);
        commands.spawn((
            TargetSprite { id: target.id },
            Mesh2d(meshes.add(Circle::new(stats.size / 2.0))),
            MeshMaterial2d(materials.add(ColorMaterial::from(species_color(target.species)))),
            Transform::from_xyz(position.x, position.y, 0.5),
        ));
    }
}

/// Immediate-mode overlays: selection rings, capture beams, saucer
/// running lights and explosion particles.
pub fn draw_effects(mut gizmos: Gizmos, sim: Res<SimState>, time: Res<Time>) {
    // Selection rings around idle targets
    for target in sim.0.targets() {
        if target.is_abducted {
            continue;
        }
        let center = sim_to_world(&sim.0, target.x, target.y);
        gizmos.circle_2d(
            center,
            target.species.stats().size / 2.0 + 5.0,
            Color::srgba(0.0, 1.0, 0.53, 0.5),
        );
    }

    // Capture beams with a few riding sparks
    for beam in sim.0.beams() {
        let alpha = beam.life as f32 / 30.0;
        let from = sim_to_world(&sim.0, beam.x, beam.y);
        let to = sim_to_world(&sim.0, beam.target_x, beam.target_y);
        gizmos.line_2d(from, to, Color::srgba(0.0, 1.0, 0.53, 0.6 * alpha));
        for i in 0..3 {
            let t = i as f32 / 3.0;
            gizmos.circle_2d(from.lerp(to, t), 3.0, Color::srgba(0.0, 1.0, 0.78, 0.8 * alpha));
        }
    }

    // Saucer running lights
    if sim.0.phase() != Phase::Menu {
        let ship = sim.0.ship();
        let center = sim_to_world(&sim.0, ship.x, ship.y);
        let spin = time.elapsed_secs() * 5.0;
        for i in 0..6 {
            let angle = i as f32 / 6.0 * core::f32::consts::TAU + spin;
            let offset = Vec2::new(angle.cos() * 40.0, -5.0);
            let color = if i % 2 == 0 {
                Color::srgb(0.0, 1.0, 1.0)
            } else {
                Color::srgb(1.0, 0.0, 1.0)
            };
            gizmos.circle_2d(center + offset, 4.0, color);
        }
    }

    // Explosion particles during the crash sequence
    for particle in sim.0.particles() {
        let center = sim_to_world(&sim.0, particle.x, particle.y);
        let (r, g, b) = particle.color.rgb();
        gizmos.circle_2d(
            center,
            particle.size,
            Color::srgb_u8(r, g, b).with_alpha(particle.alpha()),
        );
    }
}

/// Tears the play field down when returning to the menu.
pub fn cleanup_world(
    mut commands: Commands,
    query: Query<Entity, Or<(With<ShipSprite>, With<TargetSprite>, With<Star>, With<Backdrop>)>>,
) {
    for entity in &query {
        commands.entity(entity).despawn_recursive();
    }
}
