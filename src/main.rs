use std::path::PathBuf;

use bevy::log::LogPlugin;
use bevy::prelude::*;
use clap::Parser;

use tumbledice::dice3d::{
    advance_dice, handle_drag_input, handle_roll_input, setup, update_results_display,
    update_roll_button, DiceAnimator, FaceLabels, LastRoll, PointerDrag,
};

/// The Dice - an interactive 3D dice-rolling widget
#[derive(Parser)]
#[command(name = "tumbledice")]
#[command(author, version, about = "Interactive 3D dice roller")]
struct Cli {
    /// Path to a JSON file with six custom face labels:
    /// {"faces": ["...", "...", "...", "...", "...", "..."]}
    #[arg(short = 'l', long = "labels")]
    labels_file: Option<PathBuf>,
}

fn main() {
    let cli = Cli::parse();

    let labels = match &cli.labels_file {
        Some(path) => FaceLabels::load_from_file(path),
        None => FaceLabels::default(),
    };

    App::new()
        .add_plugins(
            DefaultPlugins
                .set(WindowPlugin {
                    primary_window: Some(Window {
                        title: "The Dice".to_string(),
                        resolution: (480u32, 800u32).into(),
                        ..default()
                    }),
                    ..default()
                })
                // Keep app logs at info, quiet the renderer internals.
                .set(LogPlugin {
                    level: bevy::log::Level::INFO,
                    filter: "info,wgpu=error".to_string(),
                    ..default()
                }),
        )
        .insert_resource(ClearColor(Color::srgb(0.102, 0.102, 0.18)))
        .insert_resource(labels)
        .insert_resource(DiceAnimator::default())
        .insert_resource(LastRoll::default())
        .insert_resource(PointerDrag::default())
        .add_systems(Startup, setup)
        .add_systems(
            Update,
            (
                handle_roll_input,
                handle_drag_input,
                advance_dice,
                update_results_display,
                update_roll_button,
            )
                .chain(),
        )
        .run();
}
