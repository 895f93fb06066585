use bevy::{audio::PlaybackMode, prelude::*};

use crate::game::assets::{HandleMap, SoundtrackKey};

pub(super) fn plugin(app: &mut App) {
    app.register_type::<IsSoundtrack>();
    app.observe(play_soundtrack);
}

fn play_soundtrack(
    trigger: Trigger<PlaySoundtrack>,
    mut commands: Commands,
    soundtrack_handles: Res<HandleMap<SoundtrackKey>>,
    soundtrack_query: Query<(Entity, Option<&AudioSink>), With<IsSoundtrack>>,
) {
    let soundtrack_key = match trigger.event() {
        PlaySoundtrack::Key(key) => *key,
        PlaySoundtrack::Pause => {
            for (_, sink) in &soundtrack_query {
                if let Some(sink) = sink { sink.pause(); }
            }
            return;
        }
        PlaySoundtrack::Resume => {
            for (_, sink) in &soundtrack_query {
                if let Some(sink) = sink { sink.play(); }
            }
            return;
        }
    };

    for (entity, _) in &soundtrack_query {
        commands.entity(entity).despawn_recursive();
    }
    commands.spawn((
        AudioSourceBundle {
            source: soundtrack_handles[&soundtrack_key].clone_weak(),
            settings: PlaybackSettings {
                mode: PlaybackMode::Loop,
                ..default()
            },
        },
        IsSoundtrack,
    ));
}

/// Trigger this event to start, pause or resume the background music.
/// Starting a track replaces whatever was playing.
#[derive(Event)]
pub enum PlaySoundtrack {
    Key(SoundtrackKey),
    Pause,
    Resume,
}

/// Marker for the entity playing the background music.
#[derive(Component, Reflect)]
#[reflect(Component)]
struct IsSoundtrack;
