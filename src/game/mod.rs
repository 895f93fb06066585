//! Everything Bevy needs to put the snake game on screen and through the speakers.

use bevy::prelude::*;

pub mod assets;
pub mod audio;
pub mod board;

pub(super) fn plugin(app: &mut App) {
    app.add_plugins((
        audio::plugin,
        assets::plugin,

        board::plugin,
    ));
}
