#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared rendering contracts for Nightmare Maze adapters.

use anyhow::Result as AnyResult;
use glam::Vec2;
use nightmare_maze_core::{CellCoord, Direction};
use std::{error::Error, fmt, time::Duration};

/// RGBA color used when presenting frames.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    /// Red channel intensity in the range 0.0..=1.0.
    pub red: f32,
    /// Green channel intensity in the range 0.0..=1.0.
    pub green: f32,
    /// Blue channel intensity in the range 0.0..=1.0.
    pub blue: f32,
    /// Alpha channel intensity in the range 0.0..=1.0.
    pub alpha: f32,
}

impl Color {
    /// Creates a new color from floating point channels.
    #[must_use]
    pub const fn new(red: f32, green: f32, blue: f32, alpha: f32) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    /// Creates an opaque color from byte RGB values.
    #[must_use]
    pub const fn from_rgb_u8(red: u8, green: u8, blue: u8) -> Self {
        Self {
            red: red as f32 / 255.0,
            green: green as f32 / 255.0,
            blue: blue as f32 / 255.0,
            alpha: 1.0,
        }
    }

    /// Returns a new color darkened towards black by the provided amount.
    #[must_use]
    pub fn darken(self, amount: f32) -> Self {
        let keep = 1.0 - amount.clamp(0.0, 1.0);

        Self {
            red: self.red * keep,
            green: self.green * keep,
            blue: self.blue * keep,
            alpha: self.alpha,
        }
    }
}

/// Input snapshot gathered by adapters before updating the scene.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct FrameInput {
    /// Direction of a held movement key, if any.
    pub movement: Option<Direction>,
    /// Direction of a shoot key pressed on this frame, if any.
    pub shoot: Option<Direction>,
    /// Whether the adapter detected a restart request on this frame.
    pub restart: bool,
}

/// Describes the square tile grid and the window onto it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TileGridPresentation {
    /// Number of columns contained in the grid.
    pub columns: u32,
    /// Number of rows contained in the grid.
    pub rows: u32,
    /// Side length of a single tile expressed in screen pixels.
    pub tile_length: f32,
    /// Number of rows shown on screen at once.
    pub visible_rows: u32,
    /// Color used when drawing grid lines.
    pub line_color: Color,
}

impl TileGridPresentation {
    /// Creates a new tile grid descriptor.
    ///
    /// Returns an error when the tile length or the visible row count is not positive.
    pub fn new(
        columns: u32,
        rows: u32,
        tile_length: f32,
        visible_rows: u32,
        line_color: Color,
    ) -> std::result::Result<Self, RenderingError> {
        if tile_length.is_nan() || tile_length <= 0.0 {
            return Err(RenderingError::InvalidTileLength { tile_length });
        }
        if visible_rows == 0 {
            return Err(RenderingError::InvalidVisibleRows { visible_rows });
        }

        Ok(Self {
            columns,
            rows,
            tile_length,
            visible_rows: visible_rows.min(rows.max(1)),
            line_color,
        })
    }

    /// Width of the grid, which is also the window width.
    #[must_use]
    pub const fn width(&self) -> f32 {
        self.columns as f32 * self.tile_length
    }

    /// Height of the visible window onto the grid.
    #[must_use]
    pub const fn viewport_height(&self) -> f32 {
        self.visible_rows as f32 * self.tile_length
    }
}

/// Window onto the maze that pages a full screen at a time.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Viewport {
    rows: u32,
    first_row: u32,
}

impl Viewport {
    /// Creates a viewport showing `rows` rows starting at the top of the maze.
    #[must_use]
    pub const fn new(rows: u32) -> Self {
        Self {
            rows: if rows == 0 { 1 } else { rows },
            first_row: 0,
        }
    }

    /// First grid row shown on screen.
    #[must_use]
    pub const fn first_row(&self) -> u32 {
        self.first_row
    }

    /// Number of rows shown on screen.
    #[must_use]
    pub const fn rows(&self) -> u32 {
        self.rows
    }

    /// Pages down when the player walks below the screen and back up when
    /// they climb above it.
    pub fn follow(&mut self, player_row: u32) {
        while player_row >= self.first_row + self.rows {
            self.first_row += self.rows;
        }
        while player_row < self.first_row {
            self.first_row = self.first_row.saturating_sub(self.rows);
        }
    }

    /// Reports whether the grid row is on screen.
    #[must_use]
    pub const fn shows_row(&self, row: u32) -> bool {
        row >= self.first_row && row < self.first_row + self.rows
    }

    /// Converts a world-space point into screen space for this viewport.
    #[must_use]
    pub fn to_screen(&self, point: Vec2, tile_length: f32) -> Vec2 {
        Vec2::new(point.x, point.y - self.first_row as f32 * tile_length)
    }
}

/// How a single maze tile should be drawn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum TileVisual {
    /// The player never saw this tile.
    #[default]
    Hidden,
    /// Solid rock.
    Wall {
        /// Whether the tile is inside the player's current sight radius.
        lit: bool,
    },
    /// Carved floor.
    Floor {
        /// Whether the tile is inside the player's current sight radius.
        lit: bool,
    },
}

/// Round state shown on top of the maze.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Outcome {
    /// The round is still being played.
    #[default]
    Playing,
    /// The player reached the exit.
    Escaped,
    /// A monster caught the player.
    Caught,
}

impl Outcome {
    /// Banner announcing a decided round.
    #[must_use]
    pub const fn banner(self) -> Option<&'static str> {
        match self {
            Self::Playing => None,
            Self::Escaped => Some("You escaped the nightmare! Press R to play again."),
            Self::Caught => Some("A monster caught you! Press R to try again."),
        }
    }

    /// Reports whether the round has ended.
    #[must_use]
    pub const fn is_decided(self) -> bool {
        !matches!(self, Self::Playing)
    }
}

/// Scene description combining the fogged maze and its inhabitants.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    /// Tile grid that composes the play area.
    pub tile_grid: TileGridPresentation,
    /// Portion of the grid currently on screen.
    pub viewport: Viewport,
    /// Row-major tile visuals covering the whole grid.
    pub tiles: Vec<TileVisual>,
    /// Cell occupied by the player.
    pub player: CellCoord,
    /// Exit cell, drawn once the player has seen it.
    pub exit: Option<CellCoord>,
    /// Monsters standing in currently visible cells.
    pub enemies: Vec<CellCoord>,
    /// Bullets in flight, in world units.
    pub bullets: Vec<Vec2>,
    /// Banner shown briefly when a round starts.
    pub banner: Option<String>,
    /// Current round state.
    pub outcome: Outcome,
}

impl Scene {
    /// Creates an empty scene with every tile hidden.
    #[must_use]
    pub fn new(tile_grid: TileGridPresentation, player: CellCoord) -> Self {
        let tile_count = tile_grid.columns as usize * tile_grid.rows as usize;
        Self {
            viewport: Viewport::new(tile_grid.visible_rows),
            tile_grid,
            tiles: vec![TileVisual::Hidden; tile_count],
            player,
            exit: None,
            enemies: Vec::new(),
            bullets: Vec::new(),
            banner: None,
            outcome: Outcome::Playing,
        }
    }

    /// Visual for the tile at `cell`; tiles outside the grid are hidden.
    #[must_use]
    pub fn tile(&self, cell: CellCoord) -> TileVisual {
        if cell.column() >= self.tile_grid.columns || cell.row() >= self.tile_grid.rows {
            return TileVisual::Hidden;
        }
        let index = cell.row() as usize * self.tile_grid.columns as usize + cell.column() as usize;
        self.tiles.get(index).copied().unwrap_or_default()
    }
}

/// Presentation descriptor consumed by rendering backends.
#[derive(Clone, Debug, PartialEq)]
pub struct Presentation {
    /// Title used by the created window.
    pub window_title: String,
    /// Solid color used to clear each frame.
    pub clear_color: Color,
    /// Scene content that should be displayed.
    pub scene: Scene,
}

impl Presentation {
    /// Constructs a new presentation descriptor.
    #[must_use]
    pub fn new<T>(window_title: T, clear_color: Color, scene: Scene) -> Self
    where
        T: Into<String>,
    {
        Self {
            window_title: window_title.into(),
            clear_color,
            scene,
        }
    }
}

/// Rendering backend capable of presenting Nightmare Maze scenes.
pub trait RenderingBackend {
    /// Runs the rendering backend until it is requested to exit.
    ///
    /// The provided `update_scene` closure receives the frame delta, per-frame
    /// input captured by the adapter, and may mutate the scene before it is
    /// rendered.
    fn run<F>(self, presentation: Presentation, update_scene: F) -> AnyResult<()>
    where
        F: FnMut(Duration, FrameInput, &mut Scene) + 'static;
}

/// Errors that can occur when constructing rendering descriptors.
#[derive(Debug, PartialEq)]
pub enum RenderingError {
    /// Tiles must have a positive side length.
    InvalidTileLength {
        /// Provided tile length that failed validation.
        tile_length: f32,
    },
    /// At least one row must be visible.
    InvalidVisibleRows {
        /// Provided row count that failed validation.
        visible_rows: u32,
    },
}

impl fmt::Display for RenderingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidTileLength { tile_length } => {
                write!(f, "tile_length must be positive (received {tile_length})")
            }
            Self::InvalidVisibleRows { visible_rows } => {
                write!(f, "visible_rows must be positive (received {visible_rows})")
            }
        }
    }
}

impl Error for RenderingError {}
