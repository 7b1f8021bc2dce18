//! Windowed demo for the Revolt engine.
//!
//! Run: `cargo run -p revolt-viewer -- --scene assets/demo_scene.json`

mod camera;
mod loader;
mod mesh;

use std::path::PathBuf;

use bevy::prelude::*;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use camera::OrbitControlsPlugin;
use loader::SceneLoaderPlugin;

#[derive(Debug, Parser)]
#[command(about = "Render a Revolt scene in a window")]
struct Args {
    /// Scene description to load. Falls back to the built-in demo.
    #[arg(long, default_value = "assets/demo_scene.json")]
    scene: PathBuf,

    /// Spin applied to every object, in degrees per second.
    #[arg(long, default_value_t = 180.0)]
    rotation_speed: f32,

    #[arg(long, default_value_t = 1280)]
    width: u32,

    #[arg(long, default_value_t = 720)]
    height: u32,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    tracing::info!("Starting viewer with scene {}", args.scene.display());

    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Revolt Engine".into(),
                resolution: (args.width, args.height).into(),
                ..Default::default()
            }),
            ..Default::default()
        }))
        .insert_resource(ClearColor(Color::srgb(0.2, 0.3, 0.3)))
        .add_plugins((
            OrbitControlsPlugin,
            SceneLoaderPlugin {
                path: args.scene,
                rotation_speed: args.rotation_speed,
            },
        ))
        .run();
}
