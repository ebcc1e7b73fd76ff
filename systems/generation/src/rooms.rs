//! Room placement.

use nightmare_maze_core::{CellCoord, CellRect, CellRectSize, Grid};
use rand::Rng;

use crate::MazeConfig;

/// Reports whether `room` can be carved without any open cell inside its
/// box grown by `buffer` cells. Parts of the buffered box that fall outside
/// the grid are ignored.
#[must_use]
pub fn room_fits(grid: &Grid, room: CellRect, buffer: u32) -> bool {
    let buffer = i64::from(buffer);
    let left = i64::from(room.left()) - buffer;
    let right = i64::from(room.right()) + buffer;
    let top = i64::from(room.top()) - buffer;
    let bottom = i64::from(room.bottom()) + buffer;

    for row in top..=bottom {
        for column in left..=right {
            let (Ok(column), Ok(row)) = (u32::try_from(column), u32::try_from(row)) else {
                continue;
            };
            if grid.is_open(CellCoord::new(column, row)) {
                return false;
            }
        }
    }

    true
}

/// Opens every cell covered by the room.
pub fn carve_room(grid: &mut Grid, room: CellRect) {
    for cell in room.cells() {
        grid.open(cell);
    }
}

/// Draws a room count from the configuration and tries to place that many
/// rooms, carving each one as soon as it fits.
///
/// Rooms never touch the outermost rows and columns, so size ranges are
/// clamped to what the grid interior can hold. Each room draws its size once
/// and retries only its position; a room that exhausts its placement attempts
/// is skipped.
pub fn place_rooms<R: Rng + ?Sized>(grid: &mut Grid, config: &MazeConfig, rng: &mut R) -> Vec<CellRect> {
    let target = rng.gen_range(config.min_rooms..=config.max_rooms);
    let mut rooms = Vec::new();

    let widest = config.max_room_width.min(grid.columns().saturating_sub(3));
    let tallest = config.max_room_height.min(grid.rows().saturating_sub(3));
    if widest < config.min_room_width.max(1) || tallest < config.min_room_height.max(1) {
        log::debug!(
            "no {}x{} room fits inside a {}x{} grid",
            config.min_room_width,
            config.min_room_height,
            grid.columns(),
            grid.rows()
        );
        return rooms;
    }

    for index in 0..target {
        let size = CellRectSize::new(
            rng.gen_range(config.min_room_width..=widest),
            rng.gen_range(config.min_room_height..=tallest),
        );
        match try_place_room(grid, size, config, rng) {
            Some(room) => {
                carve_room(grid, room);
                rooms.push(room);
            }
            None => log::debug!(
                "room {index} skipped after {} placement attempts",
                config.placement_attempts
            ),
        }
    }

    rooms
}

/// Tries random positions for a room of `size`, which must fit the interior.
fn try_place_room<R: Rng + ?Sized>(
    grid: &Grid,
    size: CellRectSize,
    config: &MazeConfig,
    rng: &mut R,
) -> Option<CellRect> {
    let max_left = grid.columns() - size.width() - 2;
    let max_top = grid.rows() - size.height() - 2;

    for _ in 0..config.placement_attempts {
        let left = rng.gen_range(1..=max_left);
        let top = rng.gen_range(1..=max_top);
        let room = CellRect::from_origin_and_size(CellCoord::new(left, top), size);

        if room_fits(grid, room, config.room_buffer) {
            return Some(room);
        }
    }

    None
}
