pub mod cmdline;
#[cfg(feature = "dev")]
mod dev_tools;
mod game;
pub mod snake_game;

use bevy::{
    asset::AssetMetaCheck, audio::{AudioPlugin, Volume}, prelude::*, render::camera::ScalingMode, window::WindowResolution
};

use cmdline::Args;
use snake_game::{BOARD_HEIGHT, BOARD_WIDTH};

pub const WINDOW_SIZE_X: f32 = BOARD_WIDTH as f32;
pub const WINDOW_SIZE_Y: f32 = BOARD_HEIGHT as f32;

pub struct AppPlugin {
    pub args: Args,
}

impl Plugin for AppPlugin {
    fn build(&self, app: &mut App) {
        // Order new `AppStep` variants by adding them here:
        app.configure_sets(
            Update,
            (AppSet::TickTimers, AppSet::RecordInput, AppSet::Update).chain(),
        );

        app.insert_resource(self.args.clone());

        // Spawn the main camera.
        app.add_systems(Startup, spawn_camera);

        // Add Bevy plugins.
        app.add_plugins(
            DefaultPlugins
                .set(AssetPlugin {
                    // Wasm builds will check for meta files (that don't exist) if this isn't set.
                    // This causes errors and even panics on web build on itch.
                    // See https://github.com/bevyengine/bevy_github_ci_template/issues/48.
                    meta_check: AssetMetaCheck::Never,
                    ..default()
                })
                .set(WindowPlugin {
                    primary_window: Window {
                        title: "Apple Snake".to_string(),
                        canvas: Some("#bevy".to_string()),
                        fit_canvas_to_parent: true,
                        prevent_default_event_handling: true,
                        resizable: false,
                        resolution: WindowResolution::new(WINDOW_SIZE_X, WINDOW_SIZE_Y).with_scale_factor_override(1.0),
                        ..default()
                    }
                    .into(),
                    ..default()
                })
                .set(AudioPlugin {
                    global_volume: GlobalVolume {
                        volume: Volume::new(self.args.volume),
                    },
                    ..default()
                }),
        );

        app.insert_resource(ClearColor(Color::BLACK));

        // Add other plugins.
        app.add_plugins(game::plugin);

        // Enable dev tools for dev builds.
        #[cfg(feature = "dev")]
        app.add_plugins(dev_tools::plugin);
    }
}

/// High-level groupings of systems for the app in the `Update` schedule.
/// When adding a new variant, make sure to order it in the `configure_sets`
/// call above.
#[derive(SystemSet, Debug, Clone, Copy, Eq, PartialEq, Hash)]
enum AppSet {
    /// Tick timers.
    TickTimers,
    /// Record player input.
    RecordInput,
    /// Do everything else (consider splitting this into further variants).
    Update,
}

fn spawn_camera(mut commands: Commands) {
    let mut camera = Camera2dBundle::default();

    // Keep the whole board in view whatever the window does.
    camera.projection.scaling_mode = ScalingMode::Fixed { width: WINDOW_SIZE_X, height: WINDOW_SIZE_Y };

    commands.spawn((
        Name::new("Camera"),
        camera,
        IsDefaultUiCamera,
    ));
}
