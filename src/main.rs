use bevy::log::LogPlugin;
use bevy::prelude::*;
use clap::Parser;
use holiday_postcard::config::resolve_config;
use holiday_postcard::plugins::*;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "holiday-postcard")]
#[command(about = "Interactive 3D holiday postcard")]
struct Args {
    /// Config file to use instead of the one in the user config directory
    #[arg(long)]
    config: Option<PathBuf>,

    /// Seed for the ground noise and hut layout
    #[arg(long)]
    seed: Option<u64>,

    /// Log filter, e.g. "info,wgpu=error"
    #[arg(long)]
    log_filter: Option<String>,
}

fn main() {
    let args = Args::parse();

    let (mut config, origin) = resolve_config(args.config.as_deref());
    if args.seed.is_some() {
        config.seed = args.seed;
    }
    if let Some(filter) = args.log_filter {
        config.log_filter = filter;
    }

    App::new()
        .add_plugins(
            DefaultPlugins
                .set(WindowPlugin {
                    primary_window: Some(Window {
                        title: config.window.title.clone(),
                        resolution: (config.window.width, config.window.height).into(),
                        ..default()
                    }),
                    ..default()
                })
                .set(LogPlugin {
                    filter: config.log_filter.clone(),
                    ..default()
                }),
        )
        .insert_resource(config)
        .insert_resource(origin)
        .add_plugins((
            ScenePlugin,
            EnvironmentPlugin,
            ModelPlugin,
            GreetingTextPlugin,
            OrbitCameraPlugin,
            ControlPanelPlugin,
            ScreenshotPlugin,
            WindowControlsPlugin,
        ))
        .run();
}
