//! Corridor carving between room centers.
//!
//! [`connect`] lays a width-1 L-shaped corridor, filtering every candidate
//! through [`is_valid_path_cell`]. [`carve_meander`] walks a jittered path
//! without any width filter, and [`carve_straight`] lays an unfiltered L used
//! for stubs and connectivity repair.

use std::collections::HashSet;

use nightmare_maze_core::{CellCoord, Direction, Grid};
use rand::Rng;

/// Cells carved by a single corridor operation.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CorridorReport {
    /// Cells opened by the operation in carve order.
    pub carved: Vec<CellCoord>,
    /// Wall cells the width filter refused to open.
    pub rejected: usize,
}

impl CorridorReport {
    fn absorb(&mut self, other: CorridorReport) {
        self.carved.extend(other.carved);
        self.rejected += other.rejected;
    }
}

/// Reports whether opening `cell` keeps corridors one cell wide.
///
/// A cell is rejected when it is already open, when both cells of its
/// left/right or up/down pair are open, or when any open neighbour already
/// has more than one open neighbour of its own.
#[must_use]
pub fn is_valid_path_cell(grid: &Grid, cell: CellCoord) -> bool {
    if !grid.contains(cell) || grid.is_open(cell) {
        return false;
    }

    let open_toward = |direction: Direction| {
        cell.step(direction, grid.columns(), grid.rows())
            .map_or(0, |neighbor| usize::from(grid.is_open(neighbor)))
    };

    if open_toward(Direction::West) + open_toward(Direction::East) > 1 {
        return false;
    }
    if open_toward(Direction::North) + open_toward(Direction::South) > 1 {
        return false;
    }

    !grid
        .neighbors(cell)
        .filter(|neighbor| grid.is_open(*neighbor))
        .any(|neighbor| grid.open_neighbor_count(neighbor) > 1)
}

/// Carves a width-1 L-shaped corridor from `from` to `to`, picking the bend
/// order at random. Cells failing the width filter stay walls, so the
/// corridor may be broken.
pub fn connect<R: Rng + ?Sized>(grid: &mut Grid, from: CellCoord, to: CellCoord, rng: &mut R) -> CorridorReport {
    let mut report = CorridorReport::default();
    let horizontal_first = rng.gen_bool(0.5);

    let cells: Vec<CellCoord> = if horizontal_first {
        horizontal_leg(from.row(), from.column(), to.column())
            .chain(vertical_leg(to.column(), from.row(), to.row()))
            .collect()
    } else {
        vertical_leg(from.column(), from.row(), to.row())
            .chain(horizontal_leg(to.row(), from.column(), to.column()))
            .collect()
    };

    let mut visited = HashSet::with_capacity(cells.len());
    for cell in cells {
        if !visited.insert(cell) {
            continue;
        }
        if is_valid_path_cell(grid, cell) {
            grid.open(cell);
            report.carved.push(cell);
        } else if grid.contains(cell) && !grid.is_open(cell) {
            report.rejected += 1;
        }
    }

    report
}

/// Carves an unfiltered L: along `from`'s row to `to`'s column, then along
/// that column to `to`'s row.
pub fn carve_straight(grid: &mut Grid, from: CellCoord, to: CellCoord) -> CorridorReport {
    let mut report = CorridorReport::default();
    let cells = horizontal_leg(from.row(), from.column(), to.column())
        .chain(vertical_leg(to.column(), from.row(), to.row()));
    for cell in cells {
        open_unfiltered(grid, cell, &mut report);
    }
    report
}

/// Walks from `from` toward `to` with random axis choice and sideways jitter,
/// opening every visited cell.
///
/// Walks that take longer than `4 * columns * rows` steps are finished with
/// [`carve_straight`].
pub fn carve_meander<R: Rng + ?Sized>(grid: &mut Grid, from: CellCoord, to: CellCoord, rng: &mut R) -> CorridorReport {
    let mut report = CorridorReport::default();
    if !grid.contains(from) || !grid.contains(to) {
        return report;
    }

    let step_limit = 4 * u64::from(grid.columns()) * u64::from(grid.rows());
    let max_column = grid.columns() - 1;
    let max_row = grid.rows() - 1;
    let mut current = from;
    let mut steps = 0_u64;
    open_unfiltered(grid, current, &mut report);

    while current != to {
        if steps >= step_limit {
            log::debug!(
                "meander from ({}, {}) exceeded {step_limit} steps; finishing straight",
                from.column(),
                from.row()
            );
            report.absorb(carve_straight(grid, current, to));
            break;
        }
        steps += 1;

        let prefer_columns = rng.gen_bool(0.5);
        let move_columns = if current.column() == to.column() {
            false
        } else if current.row() == to.row() {
            true
        } else {
            prefer_columns
        };

        current = if move_columns {
            CellCoord::new(toward(current.column(), to.column()), current.row())
        } else {
            CellCoord::new(current.column(), toward(current.row(), to.row()))
        };
        open_unfiltered(grid, current, &mut report);

        if rng.gen_bool(0.5) {
            let jittered = if move_columns && current.row() != to.row() {
                Some(CellCoord::new(
                    current.column(),
                    jitter(current.row(), max_row, rng),
                ))
            } else if !move_columns && current.column() != to.column() {
                Some(CellCoord::new(
                    jitter(current.column(), max_column, rng),
                    current.row(),
                ))
            } else {
                None
            };

            if let Some(next) = jittered {
                current = next;
                open_unfiltered(grid, current, &mut report);
            }
        }
    }

    report
}

fn open_unfiltered(grid: &mut Grid, cell: CellCoord, report: &mut CorridorReport) {
    if grid.contains(cell) && !grid.is_open(cell) {
        grid.open(cell);
        report.carved.push(cell);
    }
}

fn toward(value: u32, target: u32) -> u32 {
    match value.cmp(&target) {
        std::cmp::Ordering::Less => value + 1,
        std::cmp::Ordering::Greater => value - 1,
        std::cmp::Ordering::Equal => value,
    }
}

fn jitter<R: Rng + ?Sized>(value: u32, max: u32, rng: &mut R) -> u32 {
    if rng.gen_bool(0.5) {
        value.saturating_add(1).min(max)
    } else {
        value.saturating_sub(1)
    }
}

fn horizontal_leg(row: u32, a: u32, b: u32) -> impl Iterator<Item = CellCoord> {
    (a.min(b)..=a.max(b)).map(move |column| CellCoord::new(column, row))
}

fn vertical_leg(column: u32, a: u32, b: u32) -> impl Iterator<Item = CellCoord> {
    (a.min(b)..=a.max(b)).map(move |row| CellCoord::new(column, row))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn open_cells_are_never_valid() {
        let mut grid = Grid::new(5, 5);
        grid.open(CellCoord::new(2, 2));
        assert!(!is_valid_path_cell(&grid, CellCoord::new(2, 2)));
        assert!(!is_valid_path_cell(&grid, CellCoord::new(7, 2)));
    }

    #[test]
    fn cell_between_two_open_cells_is_rejected() {
        let mut grid = Grid::new(5, 5);
        grid.open(CellCoord::new(1, 2));
        grid.open(CellCoord::new(3, 2));
        assert!(!is_valid_path_cell(&grid, CellCoord::new(2, 2)));

        let mut grid = Grid::new(5, 5);
        grid.open(CellCoord::new(2, 1));
        grid.open(CellCoord::new(2, 3));
        assert!(!is_valid_path_cell(&grid, CellCoord::new(2, 2)));
    }

    #[test]
    fn cell_beside_a_corridor_bend_is_rejected() {
        let mut grid = Grid::new(5, 5);
        grid.open(CellCoord::new(1, 1));
        grid.open(CellCoord::new(2, 1));
        grid.open(CellCoord::new(2, 2));

        assert!(!is_valid_path_cell(&grid, CellCoord::new(3, 1)));
        assert!(is_valid_path_cell(&grid, CellCoord::new(2, 3)));
    }

    #[test]
    fn connect_on_solid_grid_carves_full_l() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let mut grid = Grid::new(10, 10);
        let from = CellCoord::new(1, 1);
        let to = CellCoord::new(6, 4);

        let report = connect(&mut grid, from, to, &mut rng);

        assert_eq!(report.rejected, 0);
        assert_eq!(report.carved.len(), 9);
        assert!(grid.is_open(from));
        assert!(grid.is_open(to));
    }

    #[test]
    fn connect_refuses_to_widen_existing_corridor() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let mut grid = Grid::new(10, 5);
        let _ = carve_straight(&mut grid, CellCoord::new(0, 1), CellCoord::new(9, 1));

        let report = connect(&mut grid, CellCoord::new(2, 2), CellCoord::new(7, 2), &mut rng);

        assert!(report.carved.is_empty());
        assert_eq!(report.rejected, 6);
        assert!((0..10).all(|column| !grid.is_open(CellCoord::new(column, 2))));
    }

    #[test]
    fn carve_straight_runs_along_row_then_column() {
        let mut grid = Grid::new(6, 6);
        let report = carve_straight(&mut grid, CellCoord::new(5, 5), CellCoord::new(2, 1));

        assert_eq!(report.carved.len(), 8);
        assert!(grid.is_open(CellCoord::new(2, 5)));
        assert!(grid.is_open(CellCoord::new(2, 1)));
        assert!(!grid.is_open(CellCoord::new(5, 1)));
    }

    #[test]
    fn meander_reaches_its_target() {
        for seed in 0..16 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let mut grid = Grid::new(20, 30);
            let from = CellCoord::new(2, 3);
            let to = CellCoord::new(17, 25);

            let report = carve_meander(&mut grid, from, to, &mut rng);

            assert!(grid.is_open(from));
            assert!(grid.is_open(to));
            assert_eq!(report.rejected, 0);
            assert_eq!(report.carved.len(), grid.open_count());
        }
    }
}
