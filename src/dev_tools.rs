//! Development tools for the game. This plugin is only enabled in dev builds.

use bevy::prelude::*;

use crate::game::board::Board;
use crate::snake_game::GameState;

pub(super) fn plugin(app: &mut App) {
    app.add_systems(Update, log_transitions);
}

fn log_transitions(board: Res<Board>, mut last: Local<Option<GameState>>) {
    let state = board.game.state;
    if *last != Some(state) {
        debug!("Game state: {:?} -> {:?}", *last, state);
        *last = Some(state);
    }
}
