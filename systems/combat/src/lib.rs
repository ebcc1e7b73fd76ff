#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure system that detects bullets reaching enemies.

use nightmare_maze_core::{BulletView, Command, EnemyId, EnemyView, Event};

/// Combat system that queues hit resolutions for bullets near enemies.
#[derive(Debug)]
pub struct Combat {
    hit_radius: f32,
    claimed: Vec<EnemyId>,
}

impl Combat {
    /// Creates a combat system that registers hits closer than `hit_radius`
    /// world units to an enemy's center.
    #[must_use]
    pub fn new(hit_radius: f32) -> Self {
        Self {
            hit_radius,
            claimed: Vec::new(),
        }
    }

    /// Emits `Command::ResolveHit` entries for bullets within range of an enemy.
    ///
    /// Each bullet claims the first unclaimed enemy in identifier order, so no
    /// enemy is hit twice in one frame.
    pub fn handle(
        &mut self,
        events: &[Event],
        bullets: &BulletView,
        enemies: &EnemyView,
        out: &mut Vec<Command>,
    ) {
        let active_frame = events.iter().any(|event| {
            matches!(
                event,
                Event::TimeAdvanced { .. } | Event::BulletFired { .. }
            )
        });
        if !active_frame || bullets.is_empty() || enemies.is_empty() {
            return;
        }

        self.claimed.clear();
        for bullet in bullets.iter() {
            let target = enemies.iter().find(|enemy| {
                !self.claimed.contains(&enemy.id)
                    && bullet.position.distance(enemy.center) < self.hit_radius
            });

            if let Some(enemy) = target {
                self.claimed.push(enemy.id);
                out.push(Command::ResolveHit {
                    bullet: bullet.id,
                    enemy: enemy.id,
                });
            }
        }
    }
}

impl Default for Combat {
    fn default() -> Self {
        Self::new(nightmare_maze_core::Rules::DEFAULT_HIT_RADIUS)
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use nightmare_maze_core::{
        BulletId, BulletSnapshot, CellCoord, CellRect, CellRectSize, Direction, EnemySnapshot,
        Patrol, WorldPoint,
    };

    fn enemy(id: u32, center: WorldPoint) -> EnemySnapshot {
        EnemySnapshot {
            id: EnemyId::new(id),
            cell: CellCoord::new(0, 0),
            room: CellRect::from_origin_and_size(CellCoord::new(0, 0), CellRectSize::new(1, 1)),
            patrol: Patrol::horizontal(),
            center,
            ready_for_step: false,
        }
    }

    fn bullet(id: u32, position: WorldPoint) -> BulletSnapshot {
        BulletSnapshot {
            id: BulletId::new(id),
            position,
            direction: Direction::East,
        }
    }

    fn frame() -> Vec<Event> {
        vec![Event::TimeAdvanced {
            dt: Duration::from_millis(16),
            now: Duration::from_millis(16),
        }]
    }

    #[test]
    fn bullet_within_radius_hits() {
        let bullets = BulletView::from_snapshots(vec![bullet(0, WorldPoint::new(100.0, 100.0))]);
        let enemies = EnemyView::from_snapshots(vec![
            enemy(0, WorldPoint::new(140.0, 100.0)),
            enemy(1, WorldPoint::new(110.0, 105.0)),
        ]);
        let mut commands = Vec::new();

        Combat::default().handle(&frame(), &bullets, &enemies, &mut commands);

        assert_eq!(
            commands,
            vec![Command::ResolveHit {
                bullet: BulletId::new(0),
                enemy: EnemyId::new(1),
            }]
        );
    }

    #[test]
    fn radius_is_exclusive() {
        let bullets = BulletView::from_snapshots(vec![bullet(0, WorldPoint::new(100.0, 100.0))]);
        let enemies = EnemyView::from_snapshots(vec![enemy(0, WorldPoint::new(120.0, 100.0))]);
        let mut commands = Vec::new();

        Combat::new(20.0).handle(&frame(), &bullets, &enemies, &mut commands);

        assert!(commands.is_empty());
    }

    #[test]
    fn enemy_is_claimed_once_per_frame() {
        let bullets = BulletView::from_snapshots(vec![
            bullet(4, WorldPoint::new(100.0, 100.0)),
            bullet(2, WorldPoint::new(102.0, 100.0)),
        ]);
        let enemies = EnemyView::from_snapshots(vec![enemy(7, WorldPoint::new(101.0, 100.0))]);
        let mut commands = Vec::new();

        Combat::default().handle(&frame(), &bullets, &enemies, &mut commands);

        assert_eq!(
            commands,
            vec![Command::ResolveHit {
                bullet: BulletId::new(2),
                enemy: EnemyId::new(7),
            }]
        );
    }
}
