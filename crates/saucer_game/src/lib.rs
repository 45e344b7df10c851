#![allow(
    clippy::allow_attributes,
    reason = "allow attributes are needed for wasm"
)]

use bevy::asset::AssetMetaCheck;
use bevy::prelude::*;
use bevy::render::RenderPlugin;
use bevy::render::settings::{WgpuSettings, WgpuSettingsPriority};
use bevy::window::{WindowMode, WindowResolution};
use saucer_sim::Simulation;

mod audio;
mod core;
mod floating_text;
mod game_over;
mod gameplay;
mod hud;
mod input;
mod menu;
mod pause;
mod shop;
mod window_resizing;

use crate::audio::GameAudioPlugin;
use crate::core::{ComboBadge, MusicCueEvent, Screen, ShopOpen, SimState, SoundCueEvent};
use crate::floating_text::animate_floating_texts;
use crate::game_over::{cleanup_game_over, handle_game_over_input, spawn_game_over};
use crate::gameplay::{
    cleanup_world, draw_effects, drive_simulation, handle_playing_input, handle_window_resize,
    process_sim_events, sync_screen, sync_ship, sync_targets, try_spawn_world, update_starfield,
};
use crate::hud::{cleanup_hud, try_spawn_hud, update_hud};
use crate::menu::{cleanup_menu, handle_menu_input, spawn_menu};
use crate::pause::{cleanup_pause_menu, handle_pause_input, spawn_pause_menu, update_pause_labels};
use crate::shop::{close_shop, handle_shop_input, sync_shop_overlay, update_shop};

pub const FONT: &str = "fonts/FiraSans-Bold.ttf";

// typical smartphone screen ratio (9:16)
pub const WINDOW_WIDTH: f32 = 360.0;
pub const WINDOW_HEIGHT: f32 = 640.0;

/// Entry point for the game
pub fn run() {
    let mut app = build_app();

    app.add_plugins(GameAudioPlugin)
        .init_state::<Screen>()
        .insert_resource(SimState(Simulation::new(WINDOW_WIDTH, WINDOW_HEIGHT)))
        .init_resource::<ComboBadge>()
        .init_resource::<ShopOpen>()
        .add_event::<SoundCueEvent>()
        .add_event::<MusicCueEvent>()
        .add_systems(Startup, setup_camera)
        // The simulation ticks first; everything downstream reads the
        // state it produced this frame.
        .add_systems(
            Update,
            (
                drive_simulation,
                process_sim_events,
                sync_screen,
                handle_window_resize,
            )
                .chain(),
        )
        // Presentation sync runs in every screen; each system is a
        // no-op when its entities are absent.
        .add_systems(
            Update,
            (
                sync_ship,
                sync_targets,
                draw_effects,
                update_starfield,
                update_hud,
                animate_floating_texts,
            )
                .after(sync_screen),
        )
        // Menu screen
        .add_systems(OnEnter(Screen::Menu), (spawn_menu, cleanup_world, cleanup_hud))
        .add_systems(Update, handle_menu_input.run_if(in_state(Screen::Menu)))
        .add_systems(OnExit(Screen::Menu), cleanup_menu)
        // Play screen
        .add_systems(OnEnter(Screen::Playing), (try_spawn_world, try_spawn_hud))
        .add_systems(
            Update,
            (
                handle_shop_input,
                handle_playing_input,
                sync_shop_overlay,
                update_shop,
            )
                .chain()
                .run_if(in_state(Screen::Playing)),
        )
        .add_systems(OnExit(Screen::Playing), close_shop)
        // Pause overlay
        .add_systems(OnEnter(Screen::Paused), spawn_pause_menu)
        .add_systems(
            Update,
            (handle_pause_input, update_pause_labels).run_if(in_state(Screen::Paused)),
        )
        .add_systems(OnExit(Screen::Paused), cleanup_pause_menu)
        // Game over screen
        .add_systems(OnEnter(Screen::GameOver), spawn_game_over)
        .add_systems(
            Update,
            handle_game_over_input.run_if(in_state(Screen::GameOver)),
        )
        .add_systems(OnExit(Screen::GameOver), cleanup_game_over);

    app.run();
}

fn build_app() -> App {
    let mut app = App::new();

    let asset_plugin = bevy::asset::AssetPlugin {
        mode: bevy::asset::AssetMode::Unprocessed,
        file_path: "assets".to_string(),
        processed_file_path: "imported_assets/Default".to_string(),
        watch_for_changes_override: None,
        meta_check: AssetMetaCheck::Never,
    };

    let window_plugin = WindowPlugin {
        primary_window: Some(Window {
            title: "Cosmic Abductor".to_string(),
            present_mode: bevy::window::PresentMode::Fifo,
            resolution: WindowResolution::new(WINDOW_WIDTH, WINDOW_HEIGHT),
            canvas: Some("#game".into()),
            fit_canvas_to_parent: true,
            mode: WindowMode::Windowed,
            // Tells wasm not to override default event handling, like F5, Ctrl+R etc.
            prevent_default_event_handling: false,
            ..default()
        }),
        ..default()
    };

    let render_plugin = RenderPlugin {
        render_creation: bevy::render::settings::RenderCreation::Automatic(WgpuSettings {
            backends: Some(
                bevy::render::settings::Backends::BROWSER_WEBGPU
                    | bevy::render::settings::Backends::GL,
            ),
            power_preference: bevy::render::settings::PowerPreference::HighPerformance,
            priority: WgpuSettingsPriority::Functionality,
            ..Default::default()
        }),
        ..Default::default()
    };

    app.add_plugins(
        DefaultPlugins
            .set(asset_plugin)
            .set(window_plugin)
            .set(render_plugin),
    );

    // This plugin is useful to preserve battery life on mobile.
    // https://github.com/aevyrie/bevy_framepace
    app.add_plugins(bevy_framepace::FramepacePlugin);

    // Night sky behind the starfield.
    app.insert_resource(ClearColor(Color::srgb_u8(0x05, 0x05, 0x1a)));

    #[cfg(target_arch = "wasm32")]
    app.add_systems(PreUpdate, window_resizing::handle_browser_resize);

    app
}

/// Sets up the main 2D camera
fn setup_camera(mut commands: Commands) {
    commands.spawn(Camera2d);
}
