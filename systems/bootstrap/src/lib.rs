#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Bootstrap system that prepares a playable Nightmare Maze session.

use nightmare_maze_core::Rules;
use nightmare_maze_system_generation::{GenerationError, MazeConfig, MazeGenerator};
use nightmare_maze_world::{query, World};
use rand::Rng;
use thiserror::Error;

/// Generation attempts made before giving up on a configuration.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 8;

/// Errors surfaced while preparing a world.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BootstrapError {
    /// The maze configuration was rejected outright.
    #[error("maze generation failed")]
    Generation(#[from] GenerationError),
    /// Every generation attempt produced a degenerate maze.
    #[error("maze generation placed no rooms in {attempts} attempts")]
    GenerationExhausted {
        /// Number of attempts that were made.
        attempts: u32,
    },
}

/// Produces worlds and the data required to greet the player.
#[derive(Debug)]
pub struct Bootstrap {
    generator: MazeGenerator,
    rules: Rules,
    max_attempts: u32,
}

impl Bootstrap {
    /// Creates a bootstrap system for the provided generation and gameplay settings.
    #[must_use]
    pub fn new(config: MazeConfig, rules: Rules) -> Self {
        Self {
            generator: MazeGenerator::new(config),
            rules,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }

    /// Overrides how many generation attempts are made before failing.
    #[must_use]
    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts.max(1);
        self
    }

    /// Derives the banner that should be shown when the experience starts.
    #[must_use]
    pub fn welcome_banner<'world>(&self, world: &'world World) -> &'world str {
        query::welcome_banner(world)
    }

    /// Generates a maze and wraps it in a fresh world.
    ///
    /// Draws that place no rooms are retried with further draws from `rng`.
    pub fn build_world<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<World, BootstrapError> {
        for attempt in 1..=self.max_attempts {
            match self.generator.generate(rng) {
                Ok(layout) => {
                    log::info!(
                        "maze ready: {} rooms, {} open cells",
                        layout.rooms.len(),
                        layout.grid.open_count()
                    );
                    return Ok(World::new(layout, self.rules.clone()));
                }
                Err(error @ GenerationError::NoRoomsPlaced { .. }) => {
                    log::warn!("generation attempt {attempt} failed: {error}; retrying");
                }
                Err(error) => return Err(error.into()),
            }
        }

        Err(BootstrapError::GenerationExhausted {
            attempts: self.max_attempts,
        })
    }
}

impl Default for Bootstrap {
    fn default() -> Self {
        Self::new(MazeConfig::default(), Rules::default())
    }
}
