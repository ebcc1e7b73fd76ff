#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that boots the Nightmare Maze experience.

mod config;
mod session;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use nightmare_maze_rendering::{Color, Presentation, RenderingBackend, TileGridPresentation};
use nightmare_maze_rendering_macroquad::MacroquadBackend;
use nightmare_maze_system_bootstrap::Bootstrap;
use nightmare_maze_system_generation::Connector;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::{config::GameConfig, session::Session};

const WINDOW_TITLE: &str = "Nightmare Maze";
const BACKGROUND: Color = Color::from_rgb_u8(0x00, 0x00, 0x00);
const GRID_LINE_COLOR: Color = Color::from_rgb_u8(0x80, 0x80, 0x80);

#[derive(Debug, Parser)]
#[command(name = "nightmare-maze", about = "Explore a fog-shrouded procedural maze")]
struct CliArgs {
    /// Seed for maze generation; drawn from entropy when omitted.
    #[arg(long)]
    seed: Option<u64>,
    /// TOML file overriding maze, rule and display defaults.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Number of maze columns.
    #[arg(long)]
    columns: Option<u32>,
    /// Number of maze rows.
    #[arg(long)]
    rows: Option<u32>,
    /// Corridor strategy joining consecutive rooms.
    #[arg(long, value_enum)]
    connector: Option<ConnectorArg>,
    /// Leave stranded open regions unconnected.
    #[arg(long)]
    no_repair: bool,
    /// Synchronise presentation with the display refresh rate.
    #[arg(long)]
    vsync: bool,
    /// Log frame timings once per second.
    #[arg(long)]
    show_fps: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum ConnectorArg {
    LPath,
    Meander,
}

impl From<ConnectorArg> for Connector {
    fn from(value: ConnectorArg) -> Self {
        match value {
            ConnectorArg::LPath => Connector::LPath,
            ConnectorArg::Meander => Connector::Meander,
        }
    }
}

impl CliArgs {
    /// Loads the configuration file, if any, and layers command-line flags on top.
    fn game_config(&self) -> Result<GameConfig> {
        let mut config = match &self.config {
            Some(path) => GameConfig::load(path)
                .with_context(|| format!("failed to load settings from {}", path.display()))?,
            None => GameConfig::default(),
        };

        if let Some(columns) = self.columns {
            config.maze.columns = columns;
        }
        if let Some(rows) = self.rows {
            config.maze.rows = rows;
        }
        if let Some(connector) = self.connector {
            config.maze.connector = connector.into();
        }
        if self.no_repair {
            config.maze.repair_connectivity = false;
        }

        Ok(config)
    }
}

/// Entry point for the Nightmare Maze command-line interface.
fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = CliArgs::parse();
    let config = args.game_config()?;

    let seed = args.seed.unwrap_or_else(rand::random);
    log::info!("maze seed: {seed} (pass --seed {seed} to replay)");

    let rules = config.rules.to_rules();
    let tile_grid = TileGridPresentation::new(
        config.maze.columns,
        config.maze.rows,
        rules.tile_length,
        config.display.visible_rows,
        GRID_LINE_COLOR,
    )
    .context("invalid display settings")?;

    let bootstrap = Bootstrap::new(config.maze, rules);
    let mut session = Session::start(bootstrap, ChaCha8Rng::seed_from_u64(seed))?;
    let presentation = Presentation::new(WINDOW_TITLE, BACKGROUND, session.scene(tile_grid));

    let mut backend = MacroquadBackend::new().with_show_fps(args.show_fps);
    if args.vsync {
        backend = backend.with_vsync(true);
    }

    backend.run(presentation, move |dt, input, scene| {
        session.advance(dt, &input);
        session.populate_scene(scene);
    })
}
