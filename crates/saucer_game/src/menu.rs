use bevy::prelude::*;

use crate::core::SimState;
use crate::input::any_just_pressed;
use crate::{FONT, WINDOW_HEIGHT};

#[derive(Component)]
pub struct MenuScreen;

pub fn spawn_menu(mut commands: Commands, asset_server: Res<AssetServer>) {
    commands.spawn((
        MenuScreen,
        Text2d::new("COSMIC ABDUCTOR"),
        TextFont {
            font: asset_server.load(FONT),
            font_size: 34.0,
            ..default()
        },
        TextColor(Color::srgb(0.0, 1.0, 0.53)),
        Transform::from_xyz(0.0, WINDOW_HEIGHT / 4.0, 5.0),
    ));
    commands.spawn((
        MenuScreen,
        Text2d::new("Snatch livestock. Trade specimens.\nDon't overload the beam."),
        TextFont {
            font: asset_server.load(FONT),
            font_size: 16.0,
            ..default()
        },
        TextColor(Color::WHITE),
        TextLayout::new_with_justify(JustifyText::Center),
        Transform::from_xyz(0.0, WINDOW_HEIGHT / 8.0, 5.0),
    ));
    commands.spawn((
        MenuScreen,
        Text2d::new("TAP TO START"),
        TextFont {
            font: asset_server.load(FONT),
            font_size: 22.0,
            ..default()
        },
        TextColor(Color::srgb(1.0, 0.84, 0.0)),
        Transform::from_xyz(0.0, -WINDOW_HEIGHT / 6.0, 5.0),
    ));
}

pub fn handle_menu_input(
    mouse_button_input: Res<ButtonInput<MouseButton>>,
    touch_input: Res<Touches>,
    mut sim: ResMut<SimState>,
) {
    if any_just_pressed(&mouse_button_input, &touch_input) {
        sim.0.start();
    }
}

pub fn cleanup_menu(mut commands: Commands, query: Query<Entity, With<MenuScreen>>) {
    for entity in &query {
        commands.entity(entity).despawn_recursive();
    }
}
