use std::path::PathBuf;

use anyhow::{Context, Result};
use bevy::log::LogPlugin;
use bevy::prelude::*;
use clap::Parser;
use log::info;
use tilehop::config::{DeadZoneMode, GameConfig};
use tilehop::map::{DirectoryMapSource, DEFAULT_LEVEL};
use tilehop::{init_logging, PresentationPlugin, Session};

/// A tile-based side-scrolling platformer
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
    /// Directory holding `<level>.json` maps
    #[arg(long, default_value = "assets/maps")]
    maps: PathBuf,
    /// Level to start in
    #[arg(long, default_value = DEFAULT_LEVEL)]
    level: String,
    /// JSON configuration file
    #[arg(long)]
    config: Option<PathBuf>,
    /// Camera dead-zone behaviour
    #[arg(long, value_enum)]
    camera: Option<DeadZoneMode>,
    /// Seed for item easing and coin scatter
    #[arg(long)]
    seed: Option<u64>,
}

impl Args {
    fn game_config(&self) -> Result<GameConfig> {
        let mut config = match &self.config {
            Some(path) => GameConfig::from_path(path)
                .with_context(|| format!("loading configuration {}", path.display()))?,
            None => GameConfig::default(),
        };
        if let Some(mode) = self.camera {
            config.dead_zone = mode;
        }
        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        Ok(config)
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let config = args.game_config()?;
    let screen = config.screen;
    let source = DirectoryMapSource::new(&args.maps);
    let session = Session::start(config, Box::new(source), &args.level)
        .with_context(|| format!("starting level `{}` from {}", args.level, args.maps.display()))?;
    info!("starting `{}` at {}x{}", args.level, screen.width, screen.height);

    App::new()
        .add_plugins(
            DefaultPlugins
                .set(WindowPlugin {
                    primary_window: Some(Window {
                        title: format!("tilehop ({}x{})", screen.width, screen.height),
                        ..default()
                    }),
                    ..default()
                })
                .disable::<LogPlugin>(),
        )
        .insert_resource(session)
        .add_plugins(PresentationPlugin)
        .run();
    Ok(())
}
