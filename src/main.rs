// Disable console on Windows for non-dev builds.
#![cfg_attr(not(feature = "dev"), windows_subsystem = "windows")]

use bevy::prelude::*;
use clap::Parser;
use apple_snake::{cmdline::Args, AppPlugin};


fn main() -> AppExit {
    let args = Args::parse();
    App::new().add_plugins(AppPlugin { args }).run()
}
