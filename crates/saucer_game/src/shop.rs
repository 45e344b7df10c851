use bevy::prelude::*;
use saucer_sim::UpgradeKind;

use crate::core::{ShopOpen, SimState};
use crate::input::just_pressed_canvas_position;
use crate::{FONT, WINDOW_HEIGHT, WINDOW_WIDTH};

const ROW_START_Y: f32 = 190.0;
const ROW_STEP_Y: f32 = 78.0;
const ROW_HALF_EXTENTS: Vec2 = Vec2::new(140.0, 34.0);

/// Marker for every shop overlay entity.
#[derive(Component)]
pub struct ShopScreen;

/// One purchasable row, hit-tested in canvas space.
#[derive(Component)]
pub struct ShopRow {
    kind: UpgradeKind,
    center: Vec2,
}

#[derive(Component)]
pub struct ShopCloseButton {
    center: Vec2,
}

#[derive(Component)]
pub struct ShopCurrencyText;

fn overlay_point(x: f32, y: f32) -> Vec3 {
    Vec3::new(x - WINDOW_WIDTH / 2.0, WINDOW_HEIGHT / 2.0 - y, 10.0)
}

fn row_contains(center: Vec2, position: Vec2) -> bool {
    (position.x - center.x).abs() <= ROW_HALF_EXTENTS.x
        && (position.y - center.y).abs() <= ROW_HALF_EXTENTS.y
}

/// Spawns or tears down the overlay to match [`ShopOpen`].
pub fn sync_shop_overlay(
    mut commands: Commands,
    shop_open: Res<ShopOpen>,
    asset_server: Res<AssetServer>,
    existing: Query<Entity, With<ShopScreen>>,
) {
    if shop_open.0 && existing.is_empty() {
        spawn_overlay(&mut commands, &asset_server);
    } else if !shop_open.0 {
        for entity in &existing {
            commands.entity(entity).despawn_recursive();
        }
    }
}

fn spawn_overlay(commands: &mut Commands, asset_server: &AssetServer) {
    commands.spawn((
        ShopScreen,
        Sprite::from_color(Color::srgba(0.0, 0.0, 0.05, 0.92), Vec2::new(330.0, 530.0)),
        Transform::from_translation(overlay_point(WINDOW_WIDTH / 2.0, 345.0) - Vec3::Z * 0.5),
    ));
    commands.spawn((
        ShopScreen,
        Text2d::new("UPGRADE SHOP"),
        TextFont {
            font: asset_server.load(FONT),
            font_size: 26.0,
            ..default()
        },
        TextColor(Color::srgb(0.0, 1.0, 0.53)),
        Transform::from_translation(overlay_point(WINDOW_WIDTH / 2.0, 115.0)),
    ));
    commands.spawn((
        ShopScreen,
        ShopCurrencyText,
        Text2d::new("CURRENCY 0"),
        TextFont {
            font: asset_server.load(FONT),
            font_size: 16.0,
            ..default()
        },
        TextColor(Color::srgb(1.0, 0.67, 0.0)),
        Transform::from_translation(overlay_point(WINDOW_WIDTH / 2.0, 148.0)),
    ));

    for (index, kind) in UpgradeKind::ALL.into_iter().enumerate() {
        let center = Vec2::new(
            WINDOW_WIDTH / 2.0,
            ROW_STEP_Y.mul_add(index as f32, ROW_START_Y),
        );
        commands
            .spawn((
                ShopScreen,
                ShopRow { kind, center },
                Sprite::from_color(Color::srgba(0.0, 1.0, 0.53, 0.08), ROW_HALF_EXTENTS * 2.0),
                Transform::from_translation(overlay_point(center.x, center.y)),
            ))
            .with_children(|parent| {
                parent.spawn((
                    Text2d::new(""),
                    TextFont {
                        font: asset_server.load(FONT),
                        font_size: 13.0,
                        ..default()
                    },
                    TextColor(Color::WHITE),
                    TextLayout::new_with_justify(JustifyText::Center),
                    Transform::from_xyz(0.0, 0.0, 0.1),
                ));
            });
    }

    let close_center = Vec2::new(WINDOW_WIDTH / 2.0, 585.0);
    commands
        .spawn((
            ShopScreen,
            ShopCloseButton {
                center: close_center,
            },
            Sprite::from_color(Color::srgba(1.0, 0.27, 0.27, 0.2), Vec2::new(120.0, 40.0)),
            Transform::from_translation(overlay_point(close_center.x, close_center.y)),
        ))
        .with_children(|parent| {
            parent.spawn((
                Text2d::new("CLOSE"),
                TextFont {
                    font: asset_server.load(FONT),
                    font_size: 16.0,
                    ..default()
                },
                TextColor(Color::srgb(1.0, 0.27, 0.27)),
                Transform::from_xyz(0.0, 0.0, 0.1),
            ));
        });
}

/// Keeps row labels and affordability colors current while the
/// overlay is up.
pub fn update_shop(
    sim: Res<SimState>,
    rows: Query<(&ShopRow, &Children)>,
    mut texts: Query<(&mut Text2d, &mut TextColor), Without<ShopCurrencyText>>,
    mut currency: Query<&mut Text2d, With<ShopCurrencyText>>,
) {
    let items = sim.0.shop_items();

    for (row, children) in &rows {
        let Some(item) = items.iter().find(|item| item.kind == row.kind) else {
            continue;
        };
        for &child in children {
            if let Ok((mut text, mut color)) = texts.get_mut(child) {
                text.0 = format!(
                    "{}  LV {}\n{}\nCOST {}",
                    item.name, item.level, item.description, item.cost
                );
                color.0 = if item.affordable {
                    Color::WHITE
                } else {
                    Color::srgb(0.45, 0.45, 0.45)
                };
            }
        }
    }

    if let Ok(mut text) = currency.get_single_mut() {
        text.0 = format!("CURRENCY {}", sim.0.currency());
    }
}

/// Presses while the overlay is up: rows buy, the close button (or a
/// press outside the panel) dismisses.
pub fn handle_shop_input(
    mouse_button_input: Res<ButtonInput<MouseButton>>,
    touch_input: Res<Touches>,
    windows: Query<&Window>,
    rows: Query<&ShopRow>,
    close: Query<&ShopCloseButton>,
    mut shop_open: ResMut<ShopOpen>,
    mut sim: ResMut<SimState>,
) {
    if !shop_open.0 {
        return;
    }
    let Some(position) =
        just_pressed_canvas_position(&mouse_button_input, &touch_input, &windows)
    else {
        return;
    };

    if close
        .get_single()
        .is_ok_and(|button| row_contains(button.center, position))
    {
        shop_open.0 = false;
        return;
    }

    for row in &rows {
        if row_contains(row.center, position) {
            match sim.0.purchase(row.kind) {
                Ok(()) => info!(upgrade = row.kind.name(), "upgrade purchased"),
                Err(error) => debug!(%error, "purchase rejected"),
            }
            return;
        }
    }
}

/// Leaving the play screen always closes the shop.
pub fn close_shop(mut shop_open: ResMut<ShopOpen>) {
    shop_open.0 = false;
}
