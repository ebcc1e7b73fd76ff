#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Procedural room-and-corridor maze generation.
//!
//! [`MazeGenerator`] places rooms, joins consecutive room centers with the
//! configured [`Connector`], carves the start and exit stubs, optionally
//! repairs stranded regions, and hands the result over as a
//! [`MazeLayout`]. Every random draw comes from the caller's RNG so a seed
//! reproduces the same maze.

pub mod connectivity;
pub mod corridors;
pub mod rooms;

use nightmare_maze_core::{CellCoord, EnemySpawn, Grid, MazeLayout, Patrol};
use rand::Rng;
use serde::Deserialize;
use thiserror::Error;

use corridors::{carve_meander, carve_straight, connect};

/// Strategy used to join consecutive room centers.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Connector {
    /// Width-1 L-shaped corridors filtered by the path-width validator.
    #[default]
    LPath,
    /// Randomly jittered corridors without a width filter.
    Meander,
}

/// Tunable knobs that shape generated mazes.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct MazeConfig {
    /// Number of columns in the grid.
    pub columns: u32,
    /// Number of rows in the grid.
    pub rows: u32,
    /// Smallest number of rooms to attempt.
    pub min_rooms: u32,
    /// Largest number of rooms to attempt.
    pub max_rooms: u32,
    /// Narrowest room width in cells.
    pub min_room_width: u32,
    /// Widest room width in cells.
    pub max_room_width: u32,
    /// Shortest room height in cells.
    pub min_room_height: u32,
    /// Tallest room height in cells.
    pub max_room_height: u32,
    /// Wall margin, in cells, kept clear around every room.
    pub room_buffer: u32,
    /// Placement attempts per room before it is skipped.
    pub placement_attempts: u32,
    /// Corridor strategy joining consecutive rooms.
    pub connector: Connector,
    /// Whether stranded open regions are joined to the start after carving.
    pub repair_connectivity: bool,
}

impl Default for MazeConfig {
    fn default() -> Self {
        Self {
            columns: 20,
            rows: 75,
            min_rooms: 12,
            max_rooms: 18,
            min_room_width: 2,
            max_room_width: 10,
            min_room_height: 2,
            max_room_height: 4,
            room_buffer: 1,
            placement_attempts: 200,
            connector: Connector::LPath,
            repair_connectivity: true,
        }
    }
}

impl MazeConfig {
    /// Checks that every range is well formed and the grid is non-empty.
    pub fn validate(&self) -> Result<(), GenerationError> {
        let invalid = |reason: &'static str| Err(GenerationError::InvalidConfig { reason });

        if self.columns == 0 || self.rows == 0 {
            return invalid("grid dimensions must be non-zero");
        }
        if self.min_rooms == 0 || self.min_rooms > self.max_rooms {
            return invalid("room count range must be non-empty and start above zero");
        }
        if self.min_room_width == 0 || self.min_room_width > self.max_room_width {
            return invalid("room width range must be non-empty and start above zero");
        }
        if self.min_room_height == 0 || self.min_room_height > self.max_room_height {
            return invalid("room height range must be non-empty and start above zero");
        }
        if self.placement_attempts == 0 {
            return invalid("placement attempts must be non-zero");
        }

        Ok(())
    }
}

/// Errors surfaced while generating a maze.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GenerationError {
    /// The configuration cannot produce a maze.
    #[error("invalid maze configuration: {reason}")]
    InvalidConfig {
        /// Description of the offending setting.
        reason: &'static str,
    },
    /// Every room placement failed.
    #[error("no rooms could be placed in a {columns}x{rows} grid")]
    NoRoomsPlaced {
        /// Number of columns in the grid.
        columns: u32,
        /// Number of rows in the grid.
        rows: u32,
    },
}

/// Builds room-and-corridor mazes from a [`MazeConfig`].
#[derive(Clone, Debug, Default)]
pub struct MazeGenerator {
    config: MazeConfig,
}

impl MazeGenerator {
    /// Creates a generator using the supplied configuration.
    #[must_use]
    pub fn new(config: MazeConfig) -> Self {
        Self { config }
    }

    /// Generates a maze, drawing every random decision from `rng`.
    pub fn generate<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<MazeLayout, GenerationError> {
        let config = &self.config;
        config.validate()?;

        let mut grid = Grid::new(config.columns, config.rows);
        let rooms = rooms::place_rooms(&mut grid, config, rng);
        let (Some(first), Some(last)) = (rooms.first().copied(), rooms.last().copied()) else {
            return Err(GenerationError::NoRoomsPlaced {
                columns: config.columns,
                rows: config.rows,
            });
        };
        log::debug!("placed {} rooms", rooms.len());

        let enemy_spawns = rooms
            .iter()
            .map(|room| EnemySpawn {
                cell: room.center(),
                room: *room,
                patrol: if rng.gen_bool(0.5) {
                    Patrol::horizontal()
                } else {
                    Patrol::vertical()
                },
            })
            .collect();

        for pair in rooms.windows(2) {
            let (from, to) = (pair[0].center(), pair[1].center());
            let report = match config.connector {
                Connector::LPath => connect(&mut grid, from, to, rng),
                Connector::Meander => carve_meander(&mut grid, from, to, rng),
            };
            if report.rejected > 0 {
                log::debug!(
                    "corridor ({}, {}) -> ({}, {}) carved {} cells, width filter rejected {}",
                    from.column(),
                    from.row(),
                    to.column(),
                    to.row(),
                    report.carved.len(),
                    report.rejected
                );
            }
        }

        let start = CellCoord::new(0, 0);
        let exit = CellCoord::new(config.columns - 1, config.rows - 1);
        let _ = carve_straight(&mut grid, start, first.center());
        let _ = carve_straight(&mut grid, exit, last.center());

        if config.repair_connectivity {
            let repairs = connectivity::repair(&mut grid, start);
            log::debug!("connectivity repair carved {repairs} corridors");
        } else {
            let stranded = connectivity::unreachable_cells(&grid, start).len();
            if stranded > 0 {
                log::warn!("{stranded} open cells are unreachable from the start");
            }
        }

        Ok(MazeLayout {
            grid,
            rooms,
            start,
            exit,
            enemy_spawns,
        })
    }
}
