use nightmare_maze_core::{BulletExpiry, BulletId, BulletSnapshot, Cell, Direction, Grid, WorldPoint};

/// Shot travelling in a straight line from the player's cell.
#[derive(Clone, Debug)]
pub(crate) struct Bullet {
    pub(crate) id: BulletId,
    pub(crate) position: WorldPoint,
    pub(crate) direction: Direction,
    pub(crate) active: bool,
}

impl Bullet {
    pub(crate) fn new(id: BulletId, position: WorldPoint, direction: Direction) -> Self {
        Self {
            id,
            position,
            direction,
            active: true,
        }
    }

    /// Moves the bullet `speed` units and deactivates it when it lands outside
    /// the grid or inside a wall.
    pub(crate) fn advance(&mut self, speed: f32, tile_length: f32, grid: &Grid) -> Option<BulletExpiry> {
        if !self.active {
            return None;
        }

        let (dx, dy) = self.direction.unit_vector();
        self.position = WorldPoint::new(
            self.position.x + dx * speed,
            self.position.y + dy * speed,
        );

        let expiry = match self
            .position
            .to_cell(tile_length, grid.columns(), grid.rows())
        {
            None => Some(BulletExpiry::OutOfBounds),
            Some(cell) => match grid.cell(cell) {
                Some(Cell::Open) => None,
                Some(Cell::Wall) => Some(BulletExpiry::HitWall),
                None => Some(BulletExpiry::OutOfBounds),
            },
        };

        if expiry.is_some() {
            self.active = false;
        }
        expiry
    }

    pub(crate) fn snapshot(&self) -> BulletSnapshot {
        BulletSnapshot {
            id: self.id,
            position: self.position,
            direction: self.direction,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nightmare_maze_core::CellCoord;

    fn corridor() -> Grid {
        let mut grid = Grid::new(4, 1);
        for column in 0..3 {
            grid.open(CellCoord::new(column, 0));
        }
        grid
    }

    #[test]
    fn bullet_travels_through_open_cells() {
        let grid = corridor();
        let mut bullet = Bullet::new(
            BulletId::new(0),
            CellCoord::new(0, 0).center(40.0),
            Direction::East,
        );

        assert_eq!(bullet.advance(20.0, 40.0, &grid), None);
        assert_eq!(bullet.position, WorldPoint::new(40.0, 20.0));
        assert!(bullet.active);
    }

    #[test]
    fn bullet_stops_inside_wall() {
        let grid = corridor();
        let mut bullet = Bullet::new(
            BulletId::new(0),
            CellCoord::new(2, 0).center(40.0),
            Direction::East,
        );

        assert_eq!(bullet.advance(20.0, 40.0, &grid), Some(BulletExpiry::HitWall));
        assert!(!bullet.active);
        assert_eq!(bullet.advance(20.0, 40.0, &grid), None, "inactive bullets stay put");
    }

    #[test]
    fn bullet_leaving_grid_expires() {
        let grid = corridor();
        let mut bullet = Bullet::new(
            BulletId::new(3),
            CellCoord::new(1, 0).center(40.0),
            Direction::North,
        );

        assert_eq!(bullet.advance(20.0, 40.0, &grid), None);
        assert_eq!(
            bullet.advance(20.0, 40.0, &grid),
            Some(BulletExpiry::OutOfBounds)
        );
    }
}
