use bevy::prelude::*;

use crate::core::SimState;
use crate::input::any_just_pressed;
use crate::{FONT, WINDOW_HEIGHT};

#[derive(Component)]
pub struct GameOverScreen;

pub fn spawn_game_over(
    mut commands: Commands,
    sim: Res<SimState>,
    asset_server: Res<AssetServer>,
) {
    let snapshot = sim.0.snapshot();

    commands.spawn((
        GameOverScreen,
        Sprite::from_color(Color::srgba(0.0, 0.0, 0.05, 0.88), Vec2::new(300.0, 380.0)),
        Transform::from_xyz(0.0, 0.0, 9.5),
    ));
    commands.spawn((
        GameOverScreen,
        Text2d::new("SHIP DOWN"),
        TextFont {
            font: asset_server.load(FONT),
            font_size: 32.0,
            ..default()
        },
        TextColor(Color::srgb(1.0, 0.27, 0.27)),
        Transform::from_xyz(0.0, WINDOW_HEIGHT / 5.0, 10.0),
    ));
    commands.spawn((
        GameOverScreen,
        Text2d::new(format!(
            "The hold was too heavy.\n\nCOWS {}\nCHICKENS {}\nFARMERS {}\nCURRENCY {}",
            snapshot.cows_abducted,
            snapshot.chickens_abducted,
            snapshot.farmers_abducted,
            snapshot.currency
        )),
        TextFont {
            font: asset_server.load(FONT),
            font_size: 16.0,
            ..default()
        },
        TextColor(Color::WHITE),
        TextLayout::new_with_justify(JustifyText::Center),
        Transform::from_xyz(0.0, 0.0, 10.0),
    ));
    commands.spawn((
        GameOverScreen,
        Text2d::new("TAP TO FLY AGAIN"),
        TextFont {
            font: asset_server.load(FONT),
            font_size: 20.0,
            ..default()
        },
        TextColor(Color::srgb(1.0, 0.84, 0.0)),
        Transform::from_xyz(0.0, -WINDOW_HEIGHT / 5.0, 10.0),
    ));
}

pub fn handle_game_over_input(
    mouse_button_input: Res<ButtonInput<MouseButton>>,
    touch_input: Res<Touches>,
    mut sim: ResMut<SimState>,
) {
    if any_just_pressed(&mouse_button_input, &touch_input) {
        sim.0.reset();
    }
}

pub fn cleanup_game_over(mut commands: Commands, query: Query<Entity, With<GameOverScreen>>) {
    for entity in &query {
        commands.entity(entity).despawn_recursive();
    }
}
