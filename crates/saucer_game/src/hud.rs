use bevy::prelude::*;
use saucer_sim::WeightStatus;

use crate::core::{ComboBadge, SimState};
use crate::{FONT, WINDOW_HEIGHT, WINDOW_WIDTH};

const WEIGHT_BAR_WIDTH: f32 = 200.0;
const WEIGHT_BAR_HEIGHT: f32 = 10.0;

/// Marker for every HUD entity, for bulk teardown.
#[derive(Component)]
pub struct Hud;

#[derive(Component)]
pub struct SpecimensText;

#[derive(Component)]
pub struct CurrencyText;

#[derive(Component)]
pub struct CountsText;

#[derive(Component)]
pub struct AltitudeText;

#[derive(Component)]
pub struct WeightFill;

#[derive(Component)]
pub struct WeightStatusText;

#[derive(Component)]
pub struct ComboText;

#[derive(Clone, Copy, PartialEq, Eq)]
pub enum HudAction {
    Trade,
    Shop,
    Pause,
}

/// Tap region in canvas space. The HUD is laid out in world space but
/// hit-tested in the same coordinates the sim uses for input.
#[derive(Component)]
pub struct HudButton {
    pub action: HudAction,
    center: Vec2,
    half_extents: Vec2,
}

impl HudButton {
    pub fn contains(&self, canvas_position: Vec2) -> bool {
        (canvas_position.x - self.center.x).abs() <= self.half_extents.x
            && (canvas_position.y - self.center.y).abs() <= self.half_extents.y
    }
}

/// Canvas position to a world translation at the HUD layer.
fn hud_point(x: f32, y: f32) -> Vec3 {
    Vec3::new(x - WINDOW_WIDTH / 2.0, WINDOW_HEIGHT / 2.0 - y, 5.0)
}

fn hud_text(text: &str, size: f32, asset_server: &AssetServer) -> (Text2d, TextFont, TextColor) {
    (
        Text2d::new(text),
        TextFont {
            font: asset_server.load(FONT),
            font_size: size,
            ..default()
        },
        TextColor(Color::srgb(0.0, 1.0, 0.53)),
    )
}

pub fn try_spawn_hud(
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    existing: Query<(), With<Hud>>,
) {
    if !existing.is_empty() {
        return;
    }

    commands.spawn((
        Hud,
        SpecimensText,
        hud_text("SPECIMENS 0", 16.0, &asset_server),
        Transform::from_translation(hud_point(70.0, 18.0)),
    ));
    commands.spawn((
        Hud,
        CurrencyText,
        hud_text("CURRENCY 0", 16.0, &asset_server),
        Transform::from_translation(hud_point(70.0, 40.0)),
    ));
    commands.spawn((
        Hud,
        CountsText,
        hud_text("COWS 0  CHICKENS 0  FARMERS 0", 12.0, &asset_server),
        Transform::from_translation(hud_point(110.0, 60.0)),
    ));
    commands.spawn((
        Hud,
        AltitudeText,
        hud_text("ALT 100", 16.0, &asset_server),
        Transform::from_translation(hud_point(310.0, 18.0)),
    ));

    // Weight bar: dark backing with a status-colored fill on top.
    commands.spawn((
        Hud,
        Sprite::from_color(
            Color::srgb(0.1, 0.1, 0.15),
            Vec2::new(WEIGHT_BAR_WIDTH, WEIGHT_BAR_HEIGHT),
        ),
        Transform::from_translation(hud_point(WINDOW_WIDTH / 2.0, 85.0)),
    ));
    commands.spawn((
        Hud,
        WeightFill,
        Sprite::from_color(Color::srgb(0.0, 1.0, 0.53), Vec2::new(0.0, WEIGHT_BAR_HEIGHT)),
        Transform::from_translation(hud_point(WINDOW_WIDTH / 2.0, 85.0) + Vec3::Z * 0.1),
    ));
    commands.spawn((
        Hud,
        WeightStatusText,
        hud_text("OPTIMAL", 12.0, &asset_server),
        Transform::from_translation(hud_point(WINDOW_WIDTH / 2.0, 102.0)),
    ));

    commands.spawn((
        Hud,
        ComboText,
        Text2d::new(""),
        TextFont {
            font: asset_server.load(FONT),
            font_size: 20.0,
            ..default()
        },
        TextColor(Color::srgb(1.0, 0.84, 0.0)),
        Transform::from_translation(hud_point(WINDOW_WIDTH / 2.0, 130.0)),
    ));

    spawn_button(&mut commands, &asset_server, "TRADE", HudAction::Trade, 65.0);
    spawn_button(&mut commands, &asset_server, "SHOP", HudAction::Shop, 180.0);
    spawn_button(&mut commands, &asset_server, "PAUSE", HudAction::Pause, 295.0);
}

fn spawn_button(
    commands: &mut Commands,
    asset_server: &AssetServer,
    label: &str,
    action: HudAction,
    center_x: f32,
) {
    let center = Vec2::new(center_x, WINDOW_HEIGHT - 30.0);
    let half_extents = Vec2::new(52.0, 22.0);
    commands
        .spawn((
            Hud,
            HudButton {
                action,
                center,
                half_extents,
            },
            Sprite::from_color(Color::srgba(0.0, 1.0, 0.53, 0.15), half_extents * 2.0),
            Transform::from_translation(hud_point(center.x, center.y)),
        ))
        .with_children(|parent| {
            parent.spawn((
                hud_text(label, 16.0, asset_server),
                Transform::from_xyz(0.0, 0.0, 0.1),
            ));
        });
}

/// Refreshes HUD text and the weight bar from the sim snapshot. Cheap
/// enough to run every frame.
pub fn update_hud(
    sim: Res<SimState>,
    badge: Res<ComboBadge>,
    mut specimens: Query<
        &mut Text2d,
        (
            With<SpecimensText>,
            Without<CurrencyText>,
            Without<CountsText>,
            Without<AltitudeText>,
            Without<WeightStatusText>,
            Without<ComboText>,
        ),
    >,
    mut currency: Query<
        &mut Text2d,
        (
            With<CurrencyText>,
            Without<CountsText>,
            Without<AltitudeText>,
            Without<WeightStatusText>,
            Without<ComboText>,
        ),
    >,
    mut counts: Query<
        &mut Text2d,
        (
            With<CountsText>,
            Without<AltitudeText>,
            Without<WeightStatusText>,
            Without<ComboText>,
        ),
    >,
    mut altitude: Query<
        &mut Text2d,
        (With<AltitudeText>, Without<WeightStatusText>, Without<ComboText>),
    >,
    mut status: Query<(&mut Text2d, &mut TextColor), (With<WeightStatusText>, Without<ComboText>)>,
    mut combo: Query<&mut Text2d, With<ComboText>>,
    mut fill: Query<(&mut Sprite, &mut Transform), With<WeightFill>>,
) {
    let snapshot = sim.0.snapshot();

    if let Ok(mut text) = specimens.get_single_mut() {
        text.0 = format!("SPECIMENS {}", snapshot.specimens);
    }
    if let Ok(mut text) = currency.get_single_mut() {
        text.0 = format!("CURRENCY {}", snapshot.currency);
    }
    if let Ok(mut text) = counts.get_single_mut() {
        text.0 = format!(
            "COWS {}  CHICKENS {}  FARMERS {}",
            snapshot.cows_abducted, snapshot.chickens_abducted, snapshot.farmers_abducted
        );
    }
    if let Ok(mut text) = altitude.get_single_mut() {
        text.0 = format!("ALT {}", snapshot.altitude);
    }

    let status_color = match snapshot.weight_status {
        WeightStatus::Optimal => Color::srgb(0.0, 1.0, 0.53),
        WeightStatus::Warning => Color::srgb(1.0, 0.84, 0.0),
        WeightStatus::Critical => Color::srgb(1.0, 0.27, 0.27),
    };
    if let Ok((mut text, mut color)) = status.get_single_mut() {
        text.0 = snapshot.weight_status.label().to_owned();
        color.0 = status_color;
    }
    if let Ok((mut sprite, mut transform)) = fill.get_single_mut() {
        let fraction = (snapshot.weight_percent as f32 / 100.0).min(1.0);
        let width = WEIGHT_BAR_WIDTH * fraction;
        sprite.custom_size = Some(Vec2::new(width, WEIGHT_BAR_HEIGHT));
        sprite.color = status_color;
        // Keep the fill anchored to the bar's left edge.
        transform.translation.x = -WEIGHT_BAR_WIDTH / 2.0 + width / 2.0;
    }

    if let Ok(mut text) = combo.get_single_mut() {
        text.0 = if badge.visible {
            format!("COMBO x{:.1}", badge.multiplier)
        } else {
            String::new()
        };
    }
}

pub fn cleanup_hud(mut commands: Commands, query: Query<Entity, With<Hud>>) {
    for entity in &query {
        commands.entity(entity).despawn_recursive();
    }
}
