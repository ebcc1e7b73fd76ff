use std::time::Duration;

use nightmare_maze_core::{CellCoord, CellRect, EnemyId, EnemySnapshot, Patrol, WorldPoint};

/// Patrolling monster confined to a single room.
#[derive(Clone, Debug)]
pub(crate) struct Enemy {
    pub(crate) id: EnemyId,
    pub(crate) cell: CellCoord,
    pub(crate) room: CellRect,
    pub(crate) patrol: Patrol,
    pub(crate) last_step: Duration,
    pub(crate) alive: bool,
}

impl Enemy {
    pub(crate) fn new(id: EnemyId, cell: CellCoord, room: CellRect, patrol: Patrol) -> Self {
        Self {
            id,
            cell,
            room,
            patrol,
            last_step: Duration::ZERO,
            alive: true,
        }
    }

    pub(crate) fn ready(&self, now: Duration, interval: Duration) -> bool {
        self.alive && now.saturating_sub(self.last_step) >= interval
    }

    pub(crate) fn center(&self, tile_length: f32) -> WorldPoint {
        self.cell.center(tile_length)
    }

    pub(crate) fn snapshot(&self, now: Duration, interval: Duration, tile_length: f32) -> EnemySnapshot {
        EnemySnapshot {
            id: self.id,
            cell: self.cell,
            room: self.room,
            patrol: self.patrol,
            center: self.center(tile_length),
            ready_for_step: self.ready(now, interval),
        }
    }
}
