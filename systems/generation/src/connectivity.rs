//! Flood-fill reachability and repair of stranded maze regions.

use std::collections::VecDeque;

use nightmare_maze_core::{CellCoord, Grid};

use crate::corridors::carve_straight;

/// Marks every open cell reachable from `start` through orthogonal steps.
///
/// The returned vector is indexed like [`Grid::cells`]. A closed or
/// out-of-bounds start reaches nothing.
#[must_use]
pub fn reachable(grid: &Grid, start: CellCoord) -> Vec<bool> {
    let mut visited = vec![false; grid.cells().len()];
    let Some(start_index) = grid.index(start) else {
        return visited;
    };
    if !grid.is_open(start) {
        return visited;
    }

    let mut frontier = VecDeque::new();
    visited[start_index] = true;
    frontier.push_back(start);

    while let Some(cell) = frontier.pop_front() {
        for neighbor in grid.neighbors(cell) {
            if !grid.is_open(neighbor) {
                continue;
            }
            let Some(index) = grid.index(neighbor) else {
                continue;
            };
            if let Some(seen) = visited.get_mut(index) {
                if !*seen {
                    *seen = true;
                    frontier.push_back(neighbor);
                }
            }
        }
    }

    visited
}

/// Open cells that cannot be reached from `start`, in row-major order.
#[must_use]
pub fn unreachable_cells(grid: &Grid, start: CellCoord) -> Vec<CellCoord> {
    let visited = reachable(grid, start);
    grid.open_cells()
        .filter(|cell| {
            grid.index(*cell)
                .and_then(|index| visited.get(index).copied())
                .map_or(true, |seen| !seen)
        })
        .collect()
}

/// Joins every stranded open region to the region containing `start`.
///
/// Each pass carves an unfiltered L from the first unreachable cell to the
/// nearest reachable one (Manhattan distance, ties broken in row-major
/// order). Returns the number of corridors carved.
pub fn repair(grid: &mut Grid, start: CellCoord) -> usize {
    let mut repairs = 0;

    loop {
        let visited = reachable(grid, start);
        let is_reached = |cell: &CellCoord| {
            grid.index(*cell)
                .and_then(|index| visited.get(index).copied())
                .unwrap_or(false)
        };

        let Some(stranded) = grid.open_cells().find(|cell| !is_reached(cell)) else {
            break;
        };
        let Some(anchor) = grid
            .open_cells()
            .filter(|cell| is_reached(cell))
            .min_by_key(|cell| stranded.manhattan_distance(*cell))
        else {
            log::warn!("connectivity repair has no reachable anchor; start cell is closed");
            break;
        };

        let report = carve_straight(grid, stranded, anchor);
        log::debug!(
            "joined stranded cell ({}, {}) to ({}, {}) with {} new cells",
            stranded.column(),
            stranded.row(),
            anchor.column(),
            anchor.row(),
            report.carved.len()
        );
        repairs += 1;
    }

    repairs
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reachability_stops_at_walls() {
        let mut grid = Grid::new(5, 1);
        grid.open(CellCoord::new(0, 0));
        grid.open(CellCoord::new(1, 0));
        grid.open(CellCoord::new(3, 0));

        assert_eq!(
            unreachable_cells(&grid, CellCoord::new(0, 0)),
            vec![CellCoord::new(3, 0)]
        );
    }

    #[test]
    fn closed_start_reaches_nothing() {
        let mut grid = Grid::new(3, 3);
        grid.open(CellCoord::new(1, 1));
        assert!(reachable(&grid, CellCoord::new(0, 0)).iter().all(|seen| !seen));
        assert_eq!(repair(&mut grid, CellCoord::new(0, 0)), 0);
    }

    #[test]
    fn repair_links_every_island() {
        let mut grid = Grid::new(9, 9);
        grid.open(CellCoord::new(0, 0));
        grid.open(CellCoord::new(4, 4));
        grid.open(CellCoord::new(5, 4));
        grid.open(CellCoord::new(8, 8));

        let repairs = repair(&mut grid, CellCoord::new(0, 0));

        assert_eq!(repairs, 2);
        assert!(unreachable_cells(&grid, CellCoord::new(0, 0)).is_empty());
    }
}
