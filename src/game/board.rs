//! Drive the snake game from Bevy: collect keyboard input, run one game tick
//! every 100ms, and turn what the game drew and played into sprites, text
//! and audio.

use std::time::Duration;
use bevy::input::{keyboard::KeyboardInput, ButtonState};
use bevy::prelude::*;
use bevy::sprite::Anchor;
use bevy::window::WindowCloseRequested;

use crate::cmdline::Args;
use crate::game::assets::{HandleMap, ImageKey, SfxKey, SoundtrackKey};
use crate::game::audio::sfx::PlaySfx;
use crate::game::audio::soundtrack::PlaySoundtrack;
use crate::snake_game::{
    AudioCue, Control, CueRecorder, DrawCommand, FrameRecorder, Graphic, InputEvent, Key,
    Position, SnakeGame, SIZE, TICK_MILLIS,
};
use crate::{AppSet, WINDOW_SIZE_X, WINDOW_SIZE_Y};


pub(super) fn plugin(app: &mut App) {
    app.init_resource::<Board>();
    app.init_resource::<PendingInput>();
    app.insert_resource(TickTimer(Timer::new(Duration::from_millis(TICK_MILLIS), TimerMode::Repeating)));

    app.add_systems(Update, tick_timer.in_set(AppSet::TickTimers));
    app.add_systems(Update, record_input.in_set(AppSet::RecordInput));
    app.add_systems(
        Update,
        (start_when_loaded, advance_game, present_frames, forward_cues)
            .chain()
            .in_set(AppSet::Update),
    );
}

/// The one game this app plays, plus what it has drawn and asked to hear
/// since the last frame.
#[derive(Resource)]
pub(crate) struct Board {
    pub game: SnakeGame,
    frame: FrameRecorder,
    mixer: CueRecorder,
    started: bool,
}

impl FromWorld for Board {
    fn from_world(world: &mut World) -> Self {
        let seed = world.get_resource::<Args>().and_then(|args| args.seed);
        Self {
            game: SnakeGame::from_seed(seed),
            frame: FrameRecorder::new(),
            mixer: CueRecorder::new(),
            started: false,
        }
    }
}

#[derive(Resource, Default)]
struct PendingInput(Vec<InputEvent>);

#[derive(Resource)]
struct TickTimer(Timer);

/// Marks everything spawned for the frame currently on screen.
#[derive(Component)]
struct FrameItem;

fn tick_timer(time: Res<Time>, mut timer: ResMut<TickTimer>) {
    timer.0.tick(time.delta());
}

pub(crate) fn key_of(key_code: KeyCode) -> Option<Key> {
    match key_code {
        KeyCode::ArrowUp    | KeyCode::KeyW => Some(Key::Up),
        KeyCode::ArrowDown  | KeyCode::KeyS => Some(Key::Down),
        KeyCode::ArrowLeft  | KeyCode::KeyA => Some(Key::Left),
        KeyCode::ArrowRight | KeyCode::KeyD => Some(Key::Right),
        KeyCode::Enter | KeyCode::NumpadEnter => Some(Key::Resume),
        KeyCode::Space  => Some(Key::Pause),
        KeyCode::Escape => Some(Key::Quit),
        _ => None,
    }
}

fn record_input(
    mut keyboard: EventReader<KeyboardInput>,
    mut close_requests: EventReader<WindowCloseRequested>,
    mut pending: ResMut<PendingInput>,
) {
    for event in keyboard.read() {
        if event.state != ButtonState::Pressed { continue; }
        if let Some(key) = key_of(event.key_code) {
            pending.0.push(InputEvent::KeyDown(key));
        }
    }
    if close_requests.read().count() > 0 {
        pending.0.push(InputEvent::Quit);
    }
}

fn start_when_loaded(
    mut board: ResMut<Board>,
    asset_server: Res<AssetServer>,
    images: Res<HandleMap<ImageKey>>,
    sfx: Res<HandleMap<SfxKey>>,
    soundtracks: Res<HandleMap<SoundtrackKey>>,
) {
    if board.started { return; }
    if !(images.all_loaded(&asset_server) && sfx.all_loaded(&asset_server) && soundtracks.all_loaded(&asset_server)) {
        return;
    }
    let board = &mut *board;
    board.game.start(&mut board.frame, &mut board.mixer);
    board.started = true;
}

fn advance_game(
    mut board: ResMut<Board>,
    mut pending: ResMut<PendingInput>,
    timer: Res<TickTimer>,
    mut exit: EventWriter<AppExit>,
) {
    if !board.started {
        // Still loading: only a quit gets through, everything else is dropped.
        let quit = pending.0.drain(..).any(|event| {
            matches!(event, InputEvent::Quit | InputEvent::KeyDown(Key::Quit))
        });
        if quit {
            info!("Quit requested while loading");
            exit.send(AppExit::Success);
        }
        return;
    }
    if !timer.0.just_finished() { return; }
    let board = &mut *board;
    let events = pending.0.drain(..);
    if board.game.run_tick(events, &mut board.frame, &mut board.mixer) == Control::Quit {
        exit.send(AppExit::Success);
    }
}

/// Top-left board coordinates to world space, where the origin is the
/// centre of the window and y points up.
pub(crate) fn board_to_world(at: Position, z: f32) -> Vec3 {
    Vec3::new(
        at.x as f32 - WINDOW_SIZE_X / 2.0,
        WINDOW_SIZE_Y / 2.0 - at.y as f32,
        z,
    )
}

fn graphic_size(graphic: Graphic) -> Vec2 {
    match graphic {
        Graphic::Background => Vec2::new(WINDOW_SIZE_X, WINDOW_SIZE_Y),
        Graphic::Apple | Graphic::Block => Vec2::splat(SIZE as f32),
    }
}

fn present_frames(
    mut commands: Commands,
    mut board: ResMut<Board>,
    images: Res<HandleMap<ImageKey>>,
    on_screen: Query<Entity, With<FrameItem>>,
) {
    // Only the newest flipped frame matters; older ones would be covered anyway.
    let Some(frame) = board.frame.take_presented().pop() else { return; };
    for entity in &on_screen {
        commands.entity(entity).despawn_recursive();
    }
    for (i, command) in frame.into_iter().enumerate() {
        // Later draws land on top.
        let z = i as f32 * 0.01;
        match command {
            DrawCommand::Blit(graphic, at) => {
                commands.spawn((
                    SpriteBundle {
                        texture: images[&ImageKey::from(graphic)].clone_weak(),
                        sprite: Sprite {
                            anchor: Anchor::TopLeft,
                            custom_size: Some(graphic_size(graphic)),
                            ..default()
                        },
                        transform: Transform::from_translation(board_to_world(at, z)),
                        ..default()
                    },
                    FrameItem,
                ));
            }
            DrawCommand::Text(line) => {
                commands.spawn((
                    Text2dBundle {
                        text: Text::from_section(
                            line.text,
                            TextStyle {
                                font_size: line.font_size,
                                color: Color::WHITE,
                                ..default()
                            },
                        ),
                        text_anchor: Anchor::TopLeft,
                        transform: Transform::from_translation(board_to_world(line.at, z)),
                        ..default()
                    },
                    FrameItem,
                ));
            }
        }
    }
}

fn forward_cues(mut commands: Commands, mut board: ResMut<Board>, args: Option<Res<Args>>) {
    let muted = args.map_or(false, |args| args.mute);
    for cue in board.mixer.take_cues() {
        match cue {
            AudioCue::Sound(sound) => commands.trigger(PlaySfx::Key(sound.into())),
            AudioCue::PlayMusic if !muted => commands.trigger(PlaySoundtrack::Key(SoundtrackKey::Gameplay)),
            AudioCue::PlayMusic => {}
            AudioCue::PauseMusic => commands.trigger(PlaySoundtrack::Pause),
            AudioCue::UnpauseMusic => commands.trigger(PlaySoundtrack::Resume),
        }
    }
}
