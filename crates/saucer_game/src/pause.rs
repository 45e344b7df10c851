use bevy::prelude::*;

use crate::core::SimState;
use crate::input::just_pressed_canvas_position;
use crate::{FONT, WINDOW_HEIGHT, WINDOW_WIDTH};

#[derive(Component)]
pub struct PauseScreen;

#[derive(Clone, Copy, PartialEq, Eq)]
pub enum PauseAction {
    Resume,
    ToggleSounds,
    ToggleMusic,
    Quit,
}

#[derive(Component)]
pub struct PauseButton {
    action: PauseAction,
    center: Vec2,
}

const BUTTON_HALF_EXTENTS: Vec2 = Vec2::new(110.0, 24.0);

fn modal_point(x: f32, y: f32) -> Vec3 {
    Vec3::new(x - WINDOW_WIDTH / 2.0, WINDOW_HEIGHT / 2.0 - y, 10.0)
}

pub fn spawn_pause_menu(mut commands: Commands, asset_server: Res<AssetServer>) {
    commands.spawn((
        PauseScreen,
        Sprite::from_color(Color::srgba(0.0, 0.0, 0.05, 0.88), Vec2::new(280.0, 360.0)),
        Transform::from_translation(modal_point(WINDOW_WIDTH / 2.0, 320.0) - Vec3::Z * 0.5),
    ));
    commands.spawn((
        PauseScreen,
        Text2d::new("PAUSED"),
        TextFont {
            font: asset_server.load(FONT),
            font_size: 30.0,
            ..default()
        },
        TextColor(Color::srgb(0.0, 1.0, 0.53)),
        Transform::from_translation(modal_point(WINDOW_WIDTH / 2.0, 190.0)),
    ));

    let entries = [
        (PauseAction::Resume, 260.0),
        (PauseAction::ToggleSounds, 320.0),
        (PauseAction::ToggleMusic, 380.0),
        (PauseAction::Quit, 440.0),
    ];
    for (action, y) in entries {
        let center = Vec2::new(WINDOW_WIDTH / 2.0, y);
        commands
            .spawn((
                PauseScreen,
                PauseButton { action, center },
                Sprite::from_color(Color::srgba(0.0, 1.0, 0.53, 0.12), BUTTON_HALF_EXTENTS * 2.0),
                Transform::from_translation(modal_point(center.x, center.y)),
            ))
            .with_children(|parent| {
                parent.spawn((
                    Text2d::new(""),
                    TextFont {
                        font: asset_server.load(FONT),
                        font_size: 18.0,
                        ..default()
                    },
                    TextColor(Color::WHITE),
                    Transform::from_xyz(0.0, 0.0, 0.1),
                ));
            });
    }
}

/// Button labels reflect the live settings, so toggles read back their
/// state immediately.
pub fn update_pause_labels(
    sim: Res<SimState>,
    buttons: Query<(&PauseButton, &Children)>,
    mut texts: Query<&mut Text2d>,
) {
    let settings = sim.0.settings();
    for (button, children) in &buttons {
        let label = match button.action {
            PauseAction::Resume => "RESUME".to_owned(),
            PauseAction::ToggleSounds => {
                format!("SOUNDS {}", if settings.sounds_enabled { "ON" } else { "OFF" })
            }
            PauseAction::ToggleMusic => {
                format!("MUSIC {}", if settings.music_enabled { "ON" } else { "OFF" })
            }
            PauseAction::Quit => "QUIT TO MENU".to_owned(),
        };
        for &child in children {
            if let Ok(mut text) = texts.get_mut(child) {
                text.0 = label.clone();
            }
        }
    }
}

pub fn handle_pause_input(
    mouse_button_input: Res<ButtonInput<MouseButton>>,
    touch_input: Res<Touches>,
    windows: Query<&Window>,
    buttons: Query<&PauseButton>,
    mut sim: ResMut<SimState>,
) {
    let Some(position) =
        just_pressed_canvas_position(&mouse_button_input, &touch_input, &windows)
    else {
        return;
    };

    for button in &buttons {
        let inside = (position.x - button.center.x).abs() <= BUTTON_HALF_EXTENTS.x
            && (position.y - button.center.y).abs() <= BUTTON_HALF_EXTENTS.y;
        if !inside {
            continue;
        }
        match button.action {
            PauseAction::Resume => sim.0.toggle_pause(),
            PauseAction::ToggleSounds => {
                let mut settings = sim.0.settings();
                settings.sounds_enabled = !settings.sounds_enabled;
                sim.0.set_settings(settings);
            }
            PauseAction::ToggleMusic => {
                let mut settings = sim.0.settings();
                settings.music_enabled = !settings.music_enabled;
                sim.0.set_settings(settings);
            }
            PauseAction::Quit => sim.0.quit(),
        }
        return;
    }
}

pub fn cleanup_pause_menu(mut commands: Commands, query: Query<Entity, With<PauseScreen>>) {
    for entity in &query {
        commands.entity(entity).despawn_recursive();
    }
}
