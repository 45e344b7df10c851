use core::time::Duration;

use bevy::prelude::*;
use bevy_asset_loader::prelude::*;
use bevy_kira_audio::prelude::*;
use saucer_sim::{MusicCue, SoundCue};

use crate::core::{MusicCueEvent, Screen, SimState, SoundCueEvent};

#[derive(Clone, Eq, PartialEq, Debug, Hash, Default, States)]
enum AssetState {
    #[default]
    Loading,
    Loaded,
}

#[derive(AssetCollection, Resource)]
struct AudioAssets {
    #[asset(path = "audio/tractor_beam.ogg")]
    tractor_beam: Handle<bevy_kira_audio::prelude::AudioSource>,
    #[asset(path = "audio/cow.ogg")]
    cow: Handle<bevy_kira_audio::prelude::AudioSource>,
    #[asset(path = "audio/chicken.ogg")]
    chicken: Handle<bevy_kira_audio::prelude::AudioSource>,
    #[asset(path = "audio/menu_theme.ogg")]
    menu_theme: Handle<bevy_kira_audio::prelude::AudioSource>,
    #[asset(path = "audio/game_theme.ogg")]
    game_theme: Handle<bevy_kira_audio::prelude::AudioSource>,
}

/// Ambient loop for the menu and the pause overlay.
#[derive(Resource)]
struct MenuMusic;

/// Driving loop for the run itself.
#[derive(Resource)]
struct GameMusic;

const GAME_MUSIC_VOLUME: f64 = 0.5;
const MENU_MUSIC_VOLUME: f64 = 0.35;
const TRACTOR_VOLUME: f64 = 0.18;

pub struct GameAudioPlugin;

impl Plugin for GameAudioPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(AudioPlugin)
            .init_state::<AssetState>()
            .add_audio_channel::<MenuMusic>()
            .add_audio_channel::<GameMusic>()
            .add_loading_state(
                LoadingState::new(AssetState::Loading)
                    .continue_to_state(AssetState::Loaded)
                    .load_collection::<AudioAssets>(),
            )
            .add_systems(
                Update,
                (start_menu_music, sound_cues, music_cues, apply_music_setting)
                    .run_if(in_state(AssetState::Loaded)),
            );
    }
}

/// The menu theme starts once assets land, since the app boots
/// straight into the menu without a music cue.
fn start_menu_music(
    mut started: Local<bool>,
    screen: Res<State<Screen>>,
    sim: Res<SimState>,
    audio_assets: Res<AudioAssets>,
    menu_channel: Res<AudioChannel<MenuMusic>>,
) {
    if *started || *screen.get() != Screen::Menu {
        return;
    }
    *started = true;
    if sim.0.settings().music_enabled {
        menu_channel
            .play(audio_assets.menu_theme.clone_weak())
            .looped()
            .with_volume(MENU_MUSIC_VOLUME)
            .fade_in(AudioTween::linear(Duration::from_millis(1000)));
    }
}

fn sound_cues(
    mut events: EventReader<SoundCueEvent>,
    sim: Res<SimState>,
    audio_assets: Res<AudioAssets>,
    audio: Res<Audio>,
) {
    for SoundCueEvent(cue) in events.read() {
        if !sim.0.settings().sounds_enabled {
            continue;
        }
        match cue {
            SoundCue::TractorBeam => {
                audio
                    .play(audio_assets.tractor_beam.clone_weak())
                    .with_volume(TRACTOR_VOLUME);
            }
            SoundCue::Cow => {
                audio.play(audio_assets.cow.clone_weak());
            }
            SoundCue::Chicken => {
                audio.play(audio_assets.chicken.clone_weak());
            }
        }
    }
}

fn music_cues(
    mut events: EventReader<MusicCueEvent>,
    sim: Res<SimState>,
    audio_assets: Res<AudioAssets>,
    menu_channel: Res<AudioChannel<MenuMusic>>,
    game_channel: Res<AudioChannel<GameMusic>>,
) {
    let music_enabled = sim.0.settings().music_enabled;
    for MusicCueEvent(cue) in events.read() {
        match cue {
            MusicCue::FadeToGame => {
                menu_channel
                    .stop()
                    .fade_out(AudioTween::linear(Duration::from_millis(800)));
                if music_enabled {
                    game_channel
                        .play(audio_assets.game_theme.clone_weak())
                        .looped()
                        .with_volume(GAME_MUSIC_VOLUME)
                        .fade_in(AudioTween::linear(Duration::from_millis(1500)));
                }
            }
            MusicCue::FadeToMenu => {
                game_channel
                    .stop()
                    .fade_out(AudioTween::linear(Duration::from_millis(500)));
                if music_enabled {
                    menu_channel
                        .play(audio_assets.menu_theme.clone_weak())
                        .looped()
                        .with_volume(MENU_MUSIC_VOLUME)
                        .fade_in(AudioTween::linear(Duration::from_millis(1000)));
                }
            }
            MusicCue::Pause => {
                game_channel.pause();
                if music_enabled {
                    menu_channel
                        .play(audio_assets.menu_theme.clone_weak())
                        .looped()
                        .with_volume(MENU_MUSIC_VOLUME)
                        .fade_in(AudioTween::linear(Duration::from_millis(500)));
                }
            }
            MusicCue::Resume => {
                menu_channel
                    .stop()
                    .fade_out(AudioTween::linear(Duration::from_millis(500)));
                if music_enabled {
                    game_channel.resume();
                }
            }
            MusicCue::Stop => {
                game_channel
                    .stop()
                    .fade_out(AudioTween::linear(Duration::from_millis(500)));
            }
        }
    }
}

/// Toggling music off in the pause menu silences both channels at
/// once; turning it back on restores whichever loop fits the screen.
fn apply_music_setting(
    mut last_enabled: Local<Option<bool>>,
    sim: Res<SimState>,
    screen: Res<State<Screen>>,
    audio_assets: Res<AudioAssets>,
    menu_channel: Res<AudioChannel<MenuMusic>>,
    game_channel: Res<AudioChannel<GameMusic>>,
) {
    let enabled = sim.0.settings().music_enabled;
    let changed = last_enabled.is_some_and(|last| last != enabled);
    *last_enabled = Some(enabled);
    if !changed {
        return;
    }

    if enabled {
        match screen.get() {
            Screen::Menu | Screen::Paused => {
                menu_channel
                    .play(audio_assets.menu_theme.clone_weak())
                    .looped()
                    .with_volume(MENU_MUSIC_VOLUME)
                    .fade_in(AudioTween::linear(Duration::from_millis(500)));
            }
            Screen::Playing => {
                game_channel
                    .play(audio_assets.game_theme.clone_weak())
                    .looped()
                    .with_volume(GAME_MUSIC_VOLUME)
                    .fade_in(AudioTween::linear(Duration::from_millis(500)));
            }
            Screen::Crashing | Screen::GameOver => {}
        }
    } else {
        menu_channel
            .stop()
            .fade_out(AudioTween::linear(Duration::from_millis(300)));
        game_channel
            .stop()
            .fade_out(AudioTween::linear(Duration::from_millis(300)));
    }
}
