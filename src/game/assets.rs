use bevy::{
    prelude::*,
    utils::HashMap,
};

use crate::snake_game::{Graphic, Sound};

pub(super) fn plugin(app: &mut App) {
    app.register_type::<HandleMap<ImageKey>>();
    app.init_resource::<HandleMap<ImageKey>>();

    app.register_type::<HandleMap<SfxKey>>();
    app.init_resource::<HandleMap<SfxKey>>();

    app.register_type::<HandleMap<SoundtrackKey>>();
    app.init_resource::<HandleMap<SoundtrackKey>>();
}

#[derive(Copy, Clone, Eq, PartialEq, Hash, Reflect, Debug)]
pub enum ImageKey {
    Background,
    Apple,
    Block,
}

impl From<Graphic> for ImageKey {
    fn from(graphic: Graphic) -> Self {
        match graphic {
            Graphic::Background => ImageKey::Background,
            Graphic::Apple      => ImageKey::Apple,
            Graphic::Block      => ImageKey::Block,
        }
    }
}

impl AssetKey for ImageKey {
    type Asset = Image;
}

impl FromWorld for HandleMap<ImageKey> {
    fn from_world(world: &mut World) -> Self {
        let asset_server = world.resource::<AssetServer>();
        [
            ( ImageKey::Background, asset_server.load("images/background.png") ),
            ( ImageKey::Apple,      asset_server.load("images/apple.png") ),
            ( ImageKey::Block,      asset_server.load("images/block.png") ),
        ]
        .into()
    }
}

#[derive(Copy, Clone, Eq, PartialEq, Hash, Reflect, Debug)]
pub enum SfxKey {
    Eating,
    Collision,
}

impl From<Sound> for SfxKey {
    fn from(sound: Sound) -> Self {
        match sound {
            Sound::Eat       => SfxKey::Eating,
            Sound::Collision => SfxKey::Collision,
        }
    }
}

impl AssetKey for SfxKey {
    type Asset = AudioSource;
}

impl FromWorld for HandleMap<SfxKey> {
    fn from_world(world: &mut World) -> Self {
        let asset_server = world.resource::<AssetServer>();
        [
            ( SfxKey::Eating,    asset_server.load("audio/sfx/apple_eating.ogg") ),
            ( SfxKey::Collision, asset_server.load("audio/sfx/snake_collision.ogg") ),
        ]
        .into()
    }
}

#[derive(Copy, Clone, Eq, PartialEq, Hash, Reflect, Debug)]
pub enum SoundtrackKey {
    Gameplay,
}

impl AssetKey for SoundtrackKey {
    type Asset = AudioSource;
}

impl FromWorld for HandleMap<SoundtrackKey> {
    fn from_world(world: &mut World) -> Self {
        let asset_server = world.resource::<AssetServer>();
        [(
            SoundtrackKey::Gameplay,
            asset_server.load("audio/soundtracks/background.ogg"),
        )]
        .into()
    }
}

pub trait AssetKey: Sized {
    type Asset: Asset;
}

#[derive(Resource, Reflect, Deref, DerefMut)]
#[reflect(Resource)]
pub struct HandleMap<K: AssetKey>(HashMap<K, Handle<K::Asset>>);

impl<K: AssetKey, T> From<T> for HandleMap<K>
where
    T: Into<HashMap<K, Handle<K::Asset>>>,
{
    fn from(value: T) -> Self {
        Self(value.into())
    }
}

impl<K: AssetKey> HandleMap<K> {
    pub fn all_loaded(&self, asset_server: &AssetServer) -> bool {
        self.values()
            .all(|x| asset_server.is_loaded_with_dependencies(x))
    }
}
