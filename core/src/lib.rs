#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Nightmare Maze engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and pure systems. Adapters submit [`Command`] values
//! describing desired mutations, the world executes those commands via its
//! `apply` entry point, and then broadcasts [`Event`] values for systems to
//! react to. Systems consume event streams, query immutable snapshots, and
//! respond exclusively with new command batches.
//!
//! The maze itself travels between the generator and the world as a
//! [`MazeLayout`], a dense [`Grid`] plus the rooms, spawns and endpoints that
//! were carved into it.

use std::time::Duration;

/// Canonical banner emitted when the experience boots.
pub const WELCOME_BANNER: &str = "Welcome to the Nightmare Maze.";

/// Commands that express all permissible world mutations.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Advances the simulation clock by the provided delta time.
    ///
    /// Entities marked dead during the previous frame are compacted away and
    /// every active bullet advances once.
    Tick {
        /// Duration of simulated time that elapsed since the previous tick.
        dt: Duration,
    },
    /// Requests that the player step one cell in the provided direction.
    MovePlayer {
        /// Direction of travel for the attempted step.
        direction: Direction,
    },
    /// Requests that the player fire a bullet in the provided direction.
    FireBullet {
        /// Direction the bullet travels in.
        direction: Direction,
    },
    /// Requests that an enemy advance to an adjacent cell along its patrol.
    StepEnemy {
        /// Identifier of the enemy attempting to move.
        enemy: EnemyId,
        /// Destination cell proposed by the patrol rule.
        to: CellCoord,
    },
    /// Requests that an enemy flip its patrol heading without moving.
    ReversePatrol {
        /// Identifier of the enemy reaching the end of its patrol.
        enemy: EnemyId,
    },
    /// Requests that a bullet and an enemy it reached are both destroyed.
    ResolveHit {
        /// Bullet that reached the enemy.
        bullet: BulletId,
        /// Enemy struck by the bullet.
        enemy: EnemyId,
    },
    /// Recomputes the fog-of-war around the player's current cell.
    UpdateVisibility,
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    /// Indicates that the simulation clock advanced.
    TimeAdvanced {
        /// Duration of simulated time that elapsed in the tick.
        dt: Duration,
        /// Clock value after applying the tick.
        now: Duration,
    },
    /// Confirms that the player moved between two cells.
    PlayerMoved {
        /// Cell the player occupied before moving.
        from: CellCoord,
        /// Cell the player occupies after moving.
        to: CellCoord,
    },
    /// Reports that a movement request was refused.
    PlayerMoveRejected {
        /// Direction the player attempted to move in.
        direction: Direction,
        /// Specific reason the move failed.
        reason: MoveRejection,
    },
    /// Confirms that the player fired a bullet.
    BulletFired {
        /// Identifier assigned to the new bullet.
        bullet: BulletId,
        /// Position the bullet starts from, in world units.
        origin: WorldPoint,
        /// Direction the bullet travels in.
        direction: Direction,
    },
    /// Announces that a bullet stopped without striking an enemy.
    BulletExpired {
        /// Identifier of the bullet that stopped.
        bullet: BulletId,
        /// Reason the bullet stopped.
        reason: BulletExpiry,
    },
    /// Confirms that an enemy moved along its patrol.
    EnemyAdvanced {
        /// Identifier of the enemy that moved.
        enemy: EnemyId,
        /// Cell the enemy occupied before moving.
        from: CellCoord,
        /// Cell the enemy occupies after moving.
        to: CellCoord,
    },
    /// Announces that an enemy reached a room edge and turned around.
    PatrolReversed {
        /// Identifier of the enemy that turned.
        enemy: EnemyId,
        /// Patrol state after the reversal.
        patrol: Patrol,
    },
    /// Confirms that a bullet destroyed an enemy.
    EnemyDestroyed {
        /// Identifier of the destroyed enemy.
        enemy: EnemyId,
        /// Identifier of the bullet that was consumed by the hit.
        bullet: BulletId,
        /// Cell the enemy occupied when it was destroyed.
        cell: CellCoord,
    },
}

/// Reasons a movement request may be rejected by the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MoveRejection {
    /// The destination lies outside the grid.
    OutOfBounds,
    /// The destination is a wall.
    Blocked,
}

/// Reasons a bullet stops without hitting an enemy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BulletExpiry {
    /// The bullet entered a wall cell.
    HitWall,
    /// The bullet left the grid.
    OutOfBounds,
}

/// Cardinal directions used for movement and shooting.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Movement toward decreasing row indices ("up" on screen).
    North,
    /// Movement toward increasing column indices.
    East,
    /// Movement toward increasing row indices ("down" on screen).
    South,
    /// Movement toward decreasing column indices.
    West,
}

impl Direction {
    /// All four directions in clockwise order starting at north.
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    /// Column and row delta produced by a single step.
    #[must_use]
    pub const fn offset(self) -> (i64, i64) {
        match self {
            Self::North => (0, -1),
            Self::East => (1, 0),
            Self::South => (0, 1),
            Self::West => (-1, 0),
        }
    }

    /// Unit vector pointing along the direction in world space.
    #[must_use]
    pub const fn unit_vector(self) -> (f32, f32) {
        match self {
            Self::North => (0.0, -1.0),
            Self::East => (1.0, 0.0),
            Self::South => (0.0, 1.0),
            Self::West => (-1.0, 0.0),
        }
    }
}

/// Unique identifier assigned to an enemy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EnemyId(u32);

impl EnemyId {
    /// Creates a new enemy identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Unique identifier assigned to a bullet.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BulletId(u32);

impl BulletId {
    /// Creates a new bullet identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Location of a single grid cell expressed as column and row coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellCoord {
    column: u32,
    row: u32,
}

impl CellCoord {
    /// Creates a new grid cell coordinate.
    #[must_use]
    pub const fn new(column: u32, row: u32) -> Self {
        Self { column, row }
    }

    /// Zero-based column index of the cell.
    #[must_use]
    pub const fn column(&self) -> u32 {
        self.column
    }

    /// Zero-based row index of the cell.
    #[must_use]
    pub const fn row(&self) -> u32 {
        self.row
    }

    /// Computes the Manhattan distance between two cell coordinates.
    #[must_use]
    pub fn manhattan_distance(self, other: CellCoord) -> u32 {
        self.column().abs_diff(other.column()) + self.row().abs_diff(other.row())
    }

    /// Returns the neighbouring cell in `direction` when it lies inside a
    /// `columns` by `rows` grid.
    #[must_use]
    pub fn step(self, direction: Direction, columns: u32, rows: u32) -> Option<CellCoord> {
        let (dc, dr) = direction.offset();
        let column = i64::from(self.column) + dc;
        let row = i64::from(self.row) + dr;
        if column < 0 || row < 0 || column >= i64::from(columns) || row >= i64::from(rows) {
            return None;
        }

        Some(CellCoord::new(
            u32::try_from(column).ok()?,
            u32::try_from(row).ok()?,
        ))
    }

    /// Center of the cell in world units for a grid of `tile_length` sized cells.
    #[must_use]
    pub fn center(self, tile_length: f32) -> WorldPoint {
        WorldPoint::new(
            self.column as f32 * tile_length + tile_length / 2.0,
            self.row as f32 * tile_length + tile_length / 2.0,
        )
    }
}

/// Continuous position expressed in world units.
///
/// One grid cell spans [`Rules::tile_length`] world units along each axis,
/// with the origin at the top-left corner of cell `(0, 0)`.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct WorldPoint {
    /// Horizontal coordinate, growing with the column index.
    pub x: f32,
    /// Vertical coordinate, growing with the row index.
    pub y: f32,
}

impl WorldPoint {
    /// Creates a new world-space point.
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance between two points.
    #[must_use]
    pub fn distance(self, other: WorldPoint) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Grid cell containing the point, or `None` when it lies outside a
    /// `columns` by `rows` grid.
    #[must_use]
    pub fn to_cell(self, tile_length: f32, columns: u32, rows: u32) -> Option<CellCoord> {
        if tile_length <= f32::EPSILON {
            return None;
        }

        let column = (self.x / tile_length).floor();
        let row = (self.y / tile_length).floor();
        if column < 0.0 || row < 0.0 || column >= columns as f32 || row >= rows as f32 {
            return None;
        }

        Some(CellCoord::new(column as u32, row as u32))
    }
}

/// Axis-aligned rectangle expressed in cell coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CellRect {
    origin: CellCoord,
    size: CellRectSize,
}

impl CellRect {
    /// Constructs a rectangle from an origin cell and size.
    #[must_use]
    pub const fn from_origin_and_size(origin: CellCoord, size: CellRectSize) -> Self {
        Self { origin, size }
    }

    /// Upper-left cell that anchors the rectangle.
    #[must_use]
    pub const fn origin(&self) -> CellCoord {
        self.origin
    }

    /// Dimensions of the rectangle measured in whole cells.
    #[must_use]
    pub const fn size(&self) -> CellRectSize {
        self.size
    }

    /// Leftmost column covered by the rectangle.
    #[must_use]
    pub const fn left(&self) -> u32 {
        self.origin.column()
    }

    /// Topmost row covered by the rectangle.
    #[must_use]
    pub const fn top(&self) -> u32 {
        self.origin.row()
    }

    /// Rightmost column covered by the rectangle (inclusive).
    #[must_use]
    pub const fn right(&self) -> u32 {
        self.left() + self.size.width().saturating_sub(1)
    }

    /// Bottom row covered by the rectangle (inclusive).
    #[must_use]
    pub const fn bottom(&self) -> u32 {
        self.top() + self.size.height().saturating_sub(1)
    }

    /// Cell at the rectangle's center, rounding toward the origin.
    #[must_use]
    pub const fn center(&self) -> CellCoord {
        CellCoord::new(
            self.left() + self.size.width() / 2,
            self.top() + self.size.height() / 2,
        )
    }

    /// Reports whether the cell lies inside the rectangle.
    #[must_use]
    pub fn contains(&self, cell: CellCoord) -> bool {
        (self.left()..=self.right()).contains(&cell.column())
            && (self.top()..=self.bottom()).contains(&cell.row())
            && !self.size.is_empty()
    }

    /// Reports whether any cell of `other` lies within this rectangle grown by
    /// `buffer` cells on every side.
    #[must_use]
    pub fn buffer_touches(&self, other: &CellRect, buffer: u32) -> bool {
        if self.size.is_empty() || other.size.is_empty() {
            return false;
        }

        let buffer = i64::from(buffer);
        let left = i64::from(self.left()) - buffer;
        let top = i64::from(self.top()) - buffer;
        let right = i64::from(self.right()) + buffer;
        let bottom = i64::from(self.bottom()) + buffer;

        i64::from(other.left()) <= right
            && i64::from(other.right()) >= left
            && i64::from(other.top()) <= bottom
            && i64::from(other.bottom()) >= top
    }

    /// Iterates over every cell of the rectangle in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = CellCoord> {
        let left = self.left();
        let width = self.size.width();
        let top = self.top();
        let height = self.size.height();
        (top..top + height)
            .flat_map(move |row| (left..left + width).map(move |column| CellCoord::new(column, row)))
    }
}

/// Size of a [`CellRect`] measured in whole cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CellRectSize {
    width: u32,
    height: u32,
}

impl CellRectSize {
    /// Creates a new size descriptor with explicit dimensions.
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Width of the rectangle in cells.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Height of the rectangle in cells.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Reports whether the size covers no cells.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Occupancy of a single maze cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum Cell {
    /// Solid rock; blocks movement and bullets.
    #[default]
    Wall,
    /// Carved floor belonging to a room or corridor.
    Open,
}

/// Dense row-major occupancy grid describing the maze.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    columns: u32,
    rows: u32,
    cells: Vec<Cell>,
}

impl Grid {
    /// Creates a grid of the provided dimensions with every cell set to [`Cell::Wall`].
    #[must_use]
    pub fn new(columns: u32, rows: u32) -> Self {
        let capacity_u64 = u64::from(columns) * u64::from(rows);
        let capacity = usize::try_from(capacity_u64).unwrap_or(0);
        Self {
            columns,
            rows,
            cells: vec![Cell::Wall; capacity],
        }
    }

    /// Number of columns contained in the grid.
    #[must_use]
    pub const fn columns(&self) -> u32 {
        self.columns
    }

    /// Number of rows contained in the grid.
    #[must_use]
    pub const fn rows(&self) -> u32 {
        self.rows
    }

    /// Reports whether the cell lies inside the grid.
    #[must_use]
    pub const fn contains(&self, cell: CellCoord) -> bool {
        cell.column() < self.columns && cell.row() < self.rows
    }

    /// Returns the occupancy of the cell, or `None` when it lies outside the grid.
    #[must_use]
    pub fn cell(&self, cell: CellCoord) -> Option<Cell> {
        self.index(cell)
            .and_then(|index| self.cells.get(index).copied())
    }

    /// Reports whether the cell is carved. Cells outside the grid are never open.
    #[must_use]
    pub fn is_open(&self, cell: CellCoord) -> bool {
        self.cell(cell) == Some(Cell::Open)
    }

    /// Overwrites the occupancy of a cell. Cells outside the grid are ignored.
    pub fn set(&mut self, cell: CellCoord, value: Cell) {
        if let Some(index) = self.index(cell) {
            if let Some(slot) = self.cells.get_mut(index) {
                *slot = value;
            }
        }
    }

    /// Carves the cell open.
    pub fn open(&mut self, cell: CellCoord) {
        self.set(cell, Cell::Open);
    }

    /// Row-major slice of every cell in the grid.
    #[must_use]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Iterates over every open cell in row-major order.
    pub fn open_cells(&self) -> impl Iterator<Item = CellCoord> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| **cell == Cell::Open)
            .filter_map(|(index, _)| self.coord_of(index))
    }

    /// Number of open cells in the grid.
    #[must_use]
    pub fn open_count(&self) -> usize {
        self.cells.iter().filter(|cell| **cell == Cell::Open).count()
    }

    /// Iterates over the in-bounds orthogonal neighbours of a cell.
    pub fn neighbors(&self, cell: CellCoord) -> impl Iterator<Item = CellCoord> {
        let columns = self.columns;
        let rows = self.rows;
        Direction::ALL
            .into_iter()
            .filter_map(move |direction| cell.step(direction, columns, rows))
    }

    /// Counts the open orthogonal neighbours of a cell.
    #[must_use]
    pub fn open_neighbor_count(&self, cell: CellCoord) -> usize {
        self.neighbors(cell)
            .filter(|neighbor| self.is_open(*neighbor))
            .count()
    }

    /// Converts a cell coordinate into its row-major index.
    #[must_use]
    pub fn index(&self, cell: CellCoord) -> Option<usize> {
        if self.contains(cell) {
            let row = usize::try_from(cell.row()).ok()?;
            let column = usize::try_from(cell.column()).ok()?;
            let width = usize::try_from(self.columns).ok()?;
            Some(row * width + column)
        } else {
            None
        }
    }

    /// Converts a row-major index back into a cell coordinate.
    #[must_use]
    pub fn coord_of(&self, index: usize) -> Option<CellCoord> {
        if index >= self.cells.len() || self.columns == 0 {
            return None;
        }

        let width = usize::try_from(self.columns).ok()?;
        let column = u32::try_from(index % width).ok()?;
        let row = u32::try_from(index / width).ok()?;
        Some(CellCoord::new(column, row))
    }
}

/// Visibility state of a single cell under the fog-of-war.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum FogCell {
    /// Never observed by the player.
    #[default]
    Unseen,
    /// Observed earlier but currently outside the player's sight radius.
    Seen,
    /// Inside the player's sight radius this frame.
    Visible,
}

/// Read-only view into the fog-of-war grid.
#[derive(Clone, Copy, Debug)]
pub struct FogView<'a> {
    cells: &'a [FogCell],
    columns: u32,
    rows: u32,
}

impl<'a> FogView<'a> {
    /// Captures a new fog view backed by the provided row-major cell slice.
    #[must_use]
    pub fn new(cells: &'a [FogCell], columns: u32, rows: u32) -> Self {
        Self {
            cells,
            columns,
            rows,
        }
    }

    /// Visibility of the cell. Cells outside the grid report [`FogCell::Unseen`].
    #[must_use]
    pub fn state(&self, cell: CellCoord) -> FogCell {
        if cell.column() >= self.columns || cell.row() >= self.rows {
            return FogCell::Unseen;
        }

        let index = cell.row() as usize * self.columns as usize + cell.column() as usize;
        self.cells.get(index).copied().unwrap_or_default()
    }

    /// Reports whether the cell is inside the player's sight radius.
    #[must_use]
    pub fn is_visible(&self, cell: CellCoord) -> bool {
        self.state(cell) == FogCell::Visible
    }

    /// Returns an iterator over all cells in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = FogCell> + 'a {
        self.cells.iter().copied()
    }
}

/// Direction of travel along a patrol axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Heading {
    /// Toward increasing column or row indices.
    Forward,
    /// Toward decreasing column or row indices.
    Backward,
}

impl Heading {
    /// Heading pointing the other way along the same axis.
    #[must_use]
    pub const fn reversed(self) -> Self {
        match self {
            Self::Forward => Self::Backward,
            Self::Backward => Self::Forward,
        }
    }
}

/// Ping-pong patrol followed by an enemy inside its room.
///
/// The axis is fixed when the enemy is created; only the heading changes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Patrol {
    /// Walks back and forth along the enemy's row.
    Horizontal {
        /// Current direction of travel along the row.
        heading: Heading,
    },
    /// Walks back and forth along the enemy's column.
    Vertical {
        /// Current direction of travel along the column.
        heading: Heading,
    },
}

impl Patrol {
    /// Horizontal patrol heading toward increasing columns.
    #[must_use]
    pub const fn horizontal() -> Self {
        Self::Horizontal {
            heading: Heading::Forward,
        }
    }

    /// Vertical patrol heading toward increasing rows.
    #[must_use]
    pub const fn vertical() -> Self {
        Self::Vertical {
            heading: Heading::Forward,
        }
    }

    /// Current heading along the patrol axis.
    #[must_use]
    pub const fn heading(self) -> Heading {
        match self {
            Self::Horizontal { heading } | Self::Vertical { heading } => heading,
        }
    }

    /// Same patrol axis travelling the opposite way.
    #[must_use]
    pub const fn reversed(self) -> Self {
        match self {
            Self::Horizontal { heading } => Self::Horizontal {
                heading: heading.reversed(),
            },
            Self::Vertical { heading } => Self::Vertical {
                heading: heading.reversed(),
            },
        }
    }

    /// Decides the next patrol action for an enemy standing at `cell` inside `room`.
    ///
    /// Returns [`PatrolStep::Advance`] when one step along the heading stays
    /// inside the room, and [`PatrolStep::Reverse`] otherwise.
    #[must_use]
    pub fn next_step(self, cell: CellCoord, room: CellRect) -> PatrolStep {
        let destination = match self {
            Self::Horizontal { heading } => {
                step_within(cell.column(), heading, room.left(), room.right())
                    .map(|column| CellCoord::new(column, cell.row()))
            }
            Self::Vertical { heading } => step_within(cell.row(), heading, room.top(), room.bottom())
                .map(|row| CellCoord::new(cell.column(), row)),
        };

        match destination {
            Some(to) if room.contains(to) => PatrolStep::Advance { to },
            _ => PatrolStep::Reverse,
        }
    }
}

fn step_within(value: u32, heading: Heading, low: u32, high: u32) -> Option<u32> {
    let next = match heading {
        Heading::Forward => value.checked_add(1)?,
        Heading::Backward => value.checked_sub(1)?,
    };
    (low..=high).contains(&next).then_some(next)
}

/// Outcome of evaluating a patrol for a single step.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PatrolStep {
    /// Move to the adjacent cell.
    Advance {
        /// Destination of the step.
        to: CellCoord,
    },
    /// Stay put and flip the heading.
    Reverse,
}

/// Gameplay timing and geometry shared by the world and its systems.
#[derive(Clone, Debug, PartialEq)]
pub struct Rules {
    /// Side length of a single cell expressed in world units.
    pub tile_length: f32,
    /// Minimum time that must strictly elapse between two player steps.
    pub player_move_delay: Duration,
    /// Minimum time between two accepted shots.
    pub shot_cooldown: Duration,
    /// Time an enemy waits between patrol actions.
    pub enemy_step_interval: Duration,
    /// Distance a bullet travels per tick, in world units.
    pub bullet_speed: f32,
    /// Bullet-to-enemy-center distance below which a hit registers, in world units.
    pub hit_radius: f32,
    /// Sight radius around the player measured in cells.
    pub visibility_radius: f32,
}

impl Rules {
    /// Default side length of a cell in world units.
    pub const DEFAULT_TILE_LENGTH: f32 = 40.0;
    /// Default delay between player steps.
    pub const DEFAULT_PLAYER_MOVE_DELAY: Duration = Duration::from_millis(200);
    /// Default cooldown between shots.
    pub const DEFAULT_SHOT_COOLDOWN: Duration = Duration::from_millis(250);
    /// Default interval between enemy patrol actions.
    pub const DEFAULT_ENEMY_STEP_INTERVAL: Duration = Duration::from_millis(300);
    /// Default bullet travel per tick.
    pub const DEFAULT_BULLET_SPEED: f32 = 20.0;
    /// Default hit radius.
    pub const DEFAULT_HIT_RADIUS: f32 = 20.0;
    /// Default sight radius in cells.
    pub const DEFAULT_VISIBILITY_RADIUS: f32 = 3.0;
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            tile_length: Self::DEFAULT_TILE_LENGTH,
            player_move_delay: Self::DEFAULT_PLAYER_MOVE_DELAY,
            shot_cooldown: Self::DEFAULT_SHOT_COOLDOWN,
            enemy_step_interval: Self::DEFAULT_ENEMY_STEP_INTERVAL,
            bullet_speed: Self::DEFAULT_BULLET_SPEED,
            hit_radius: Self::DEFAULT_HIT_RADIUS,
            visibility_radius: Self::DEFAULT_VISIBILITY_RADIUS,
        }
    }
}

/// Enemy placement produced by the maze generator.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EnemySpawn {
    /// Cell the enemy starts in.
    pub cell: CellCoord,
    /// Room whose bounds confine the enemy's patrol.
    pub room: CellRect,
    /// Initial patrol axis and heading.
    pub patrol: Patrol,
}

/// Finished maze handed from the generator to the world.
#[derive(Clone, Debug, PartialEq)]
pub struct MazeLayout {
    /// Carved occupancy grid.
    pub grid: Grid,
    /// Rooms in placement order.
    pub rooms: Vec<CellRect>,
    /// Cell the player starts in.
    pub start: CellCoord,
    /// Cell the player must reach to win.
    pub exit: CellCoord,
    /// One enemy per placed room, in room order.
    pub enemy_spawns: Vec<EnemySpawn>,
}

/// Immutable representation of a single enemy's state used for queries.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EnemySnapshot {
    /// Unique identifier assigned to the enemy.
    pub id: EnemyId,
    /// Grid cell currently occupied by the enemy.
    pub cell: CellCoord,
    /// Room confining the enemy's patrol.
    pub room: CellRect,
    /// Current patrol axis and heading.
    pub patrol: Patrol,
    /// Center of the enemy's cell in world units.
    pub center: WorldPoint,
    /// Indicates whether the enemy's step interval elapsed.
    pub ready_for_step: bool,
}

/// Read-only snapshot describing all live enemies within the maze.
#[derive(Clone, Debug, Default)]
pub struct EnemyView {
    snapshots: Vec<EnemySnapshot>,
}

impl EnemyView {
    /// Creates a new enemy view from the provided snapshots.
    #[must_use]
    pub fn from_snapshots(mut snapshots: Vec<EnemySnapshot>) -> Self {
        snapshots.sort_by_key(|snapshot| snapshot.id);
        Self { snapshots }
    }

    /// Iterator over the captured enemy snapshots in identifier order.
    pub fn iter(&self) -> impl Iterator<Item = &EnemySnapshot> {
        self.snapshots.iter()
    }

    /// Number of live enemies captured by the view.
    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Reports whether the view captured no enemies.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }
}

/// Immutable representation of a single bullet's state used for queries.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BulletSnapshot {
    /// Unique identifier assigned to the bullet.
    pub id: BulletId,
    /// Current position in world units.
    pub position: WorldPoint,
    /// Direction the bullet travels in.
    pub direction: Direction,
}

/// Read-only snapshot describing all active bullets.
#[derive(Clone, Debug, Default)]
pub struct BulletView {
    snapshots: Vec<BulletSnapshot>,
}

impl BulletView {
    /// Creates a new bullet view from the provided snapshots.
    #[must_use]
    pub fn from_snapshots(mut snapshots: Vec<BulletSnapshot>) -> Self {
        snapshots.sort_by_key(|snapshot| snapshot.id);
        Self { snapshots }
    }

    /// Iterator over the captured bullet snapshots in identifier order.
    pub fn iter(&self) -> impl Iterator<Item = &BulletSnapshot> {
        self.snapshots.iter()
    }

    /// Number of active bullets captured by the view.
    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Reports whether the view captured no bullets.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }
}
