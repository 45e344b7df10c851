use core::time::Duration;

use bevy::prelude::*;
use saucer_sim::TextTone;

use crate::FONT;

/// Short-lived popup text in canvas space: rises and shrinks away
/// over one second.
#[derive(Component)]
pub struct FloatingText {
    timer: Timer,
    origin: Vec2,
}

const RISE_DISTANCE: f32 = 50.0;

pub const fn tone_color(tone: TextTone) -> Color {
    match tone {
        TextTone::Reward | TextTone::Info => Color::srgb(0.0, 1.0, 0.53),
        TextTone::Warning => Color::srgb(1.0, 0.27, 0.27),
        TextTone::Currency => Color::srgb(1.0, 0.67, 0.0),
    }
}

/// `position` is in canvas space, matching UI node coordinates.
pub fn spawn_floating_text(
    commands: &mut Commands,
    position: Vec2,
    text: &str,
    tone: TextTone,
    asset_server: &Res<AssetServer>,
) {
    commands.spawn((
        Text::new(text),
        TextFont {
            font: asset_server.load(FONT),
            font_size: 24.0,
            ..default()
        },
        TextColor(tone_color(tone)),
        Node {
            position_type: PositionType::Absolute,
            left: Val::Px(position.x),
            top: Val::Px(position.y),
            ..default()
        },
        FloatingText {
            timer: Timer::new(Duration::from_secs(1), TimerMode::Once),
            origin: position,
        },
    ));
}

pub fn animate_floating_texts(
    mut commands: Commands,
    time: Res<Time>,
    mut query: Query<(Entity, &mut Node, &mut TextColor, &mut FloatingText)>,
) {
    for (entity, mut node, mut color, mut floating) in &mut query {
        floating.timer.tick(time.delta());
        let progress = floating.timer.fraction();

        // Drift upwards and fade out.
        node.top = Val::Px(RISE_DISTANCE.mul_add(-progress, floating.origin.y));
        color.0 = color.0.with_alpha(1.0 - progress);

        if floating.timer.finished() {
            commands.entity(entity).despawn();
        }
    }
}
