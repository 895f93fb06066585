use bevy::prelude::Resource;
use clap::Parser;

#[derive(Parser, Resource, Clone, Debug)]
#[command(version, about = "Eat apples, grow, don't bite yourself")]
pub struct Args {
    /// Seed for apple placement, for reproducible games
    #[arg(long)]
    pub seed: Option<u64>,

    /// Global volume
    #[arg(long, default_value_t = 0.3)]
    pub volume: f32,

    /// Don't play background music
    #[arg(long)]
    pub mute: bool,
}
