use nightmare_maze_core::{CellCoord, FogCell, FogView};

/// Per-cell visibility memory for the player.
#[derive(Clone, Debug)]
pub(crate) struct FogOfWar {
    columns: u32,
    rows: u32,
    cells: Vec<FogCell>,
    lit: Vec<usize>,
}

impl FogOfWar {
    pub(crate) fn new(columns: u32, rows: u32) -> Self {
        let capacity = usize::try_from(u64::from(columns) * u64::from(rows)).unwrap_or(0);
        Self {
            columns,
            rows,
            cells: vec![FogCell::Unseen; capacity],
            lit: Vec::new(),
        }
    }

    /// Demotes last frame's visible cells and lights every cell within
    /// `radius` cells of `center`.
    pub(crate) fn update(&mut self, center: CellCoord, radius: f32) {
        for index in self.lit.drain(..) {
            if let Some(cell) = self.cells.get_mut(index) {
                *cell = FogCell::Seen;
            }
        }

        if !radius.is_finite() || radius < 0.0 {
            return;
        }

        let reach = radius.floor() as i64;
        let limit = radius * radius;
        let columns = i64::from(self.columns);
        let rows = i64::from(self.rows);
        let center_column = i64::from(center.column());
        let center_row = i64::from(center.row());

        for dy in -reach..=reach {
            for dx in -reach..=reach {
                if ((dx * dx + dy * dy) as f32) > limit {
                    continue;
                }

                let column = center_column + dx;
                let row = center_row + dy;
                if column < 0 || row < 0 || column >= columns || row >= rows {
                    continue;
                }

                let Ok(index) = usize::try_from(row * columns + column) else {
                    continue;
                };
                if let Some(cell) = self.cells.get_mut(index) {
                    *cell = FogCell::Visible;
                    self.lit.push(index);
                }
            }
        }
    }

    pub(crate) fn view(&self) -> FogView<'_> {
        FogView::new(&self.cells, self.columns, self.rows)
    }
}
