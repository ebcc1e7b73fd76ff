#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state management for the Nightmare Maze.
//!
//! The world owns the carved grid, the player, every enemy and bullet, the
//! fog-of-war and the simulation clock. It is mutated exclusively through
//! [`apply`] and observed through the [`query`] module.

mod enemies;
mod fog;
mod projectiles;

use std::time::Duration;

use nightmare_maze_core::{
    BulletId, CellCoord, CellRect, Command, Direction, EnemyId, Event, Grid, MazeLayout,
    MoveRejection, PatrolStep, Rules, WELCOME_BANNER,
};

use enemies::Enemy;
use fog::FogOfWar;
use projectiles::Bullet;

#[derive(Clone, Debug)]
struct Player {
    cell: CellCoord,
    last_move: Duration,
    last_shot: Option<Duration>,
}

impl Player {
    fn new(cell: CellCoord) -> Self {
        Self {
            cell,
            last_move: Duration::ZERO,
            last_shot: None,
        }
    }

    fn may_move(&self, now: Duration, delay: Duration) -> bool {
        now.saturating_sub(self.last_move) > delay
    }

    fn may_shoot(&self, now: Duration, cooldown: Duration) -> bool {
        self.last_shot
            .map_or(true, |last| now.saturating_sub(last) >= cooldown)
    }
}

/// Represents the authoritative Nightmare Maze world state.
#[derive(Clone, Debug)]
pub struct World {
    banner: &'static str,
    grid: Grid,
    rooms: Vec<CellRect>,
    start: CellCoord,
    exit: CellCoord,
    rules: Rules,
    player: Player,
    enemies: Vec<Enemy>,
    bullets: Vec<Bullet>,
    fog: FogOfWar,
    clock: Duration,
    next_bullet_id: u32,
}

impl World {
    /// Creates a world from a generated layout, placing the player on the
    /// start cell and spawning one enemy per layout spawn.
    #[must_use]
    pub fn new(layout: MazeLayout, rules: Rules) -> Self {
        let MazeLayout {
            grid,
            rooms,
            start,
            exit,
            enemy_spawns,
        } = layout;

        let enemies = enemy_spawns
            .into_iter()
            .zip(0_u32..)
            .map(|(spawn, id)| Enemy::new(EnemyId::new(id), spawn.cell, spawn.room, spawn.patrol))
            .collect();
        let fog = FogOfWar::new(grid.columns(), grid.rows());

        Self {
            banner: WELCOME_BANNER,
            player: Player::new(start),
            fog,
            grid,
            rooms,
            start,
            exit,
            rules,
            enemies,
            bullets: Vec::new(),
            clock: Duration::ZERO,
            next_bullet_id: 0,
        }
    }

    fn enemy_mut(&mut self, enemy: EnemyId) -> Option<&mut Enemy> {
        self.enemies
            .iter_mut()
            .find(|candidate| candidate.id == enemy && candidate.alive)
    }

    fn compact(&mut self) {
        self.enemies.retain(|enemy| enemy.alive);
        self.bullets.retain(|bullet| bullet.active);
    }

    fn advance_bullets(&mut self, out_events: &mut Vec<Event>) {
        let speed = self.rules.bullet_speed;
        let tile_length = self.rules.tile_length;
        for bullet in &mut self.bullets {
            if let Some(reason) = bullet.advance(speed, tile_length, &self.grid) {
                out_events.push(Event::BulletExpired {
                    bullet: bullet.id,
                    reason,
                });
            }
        }
    }

    fn move_player(&mut self, direction: Direction, out_events: &mut Vec<Event>) {
        if !self.player.may_move(self.clock, self.rules.player_move_delay) {
            return;
        }

        let from = self.player.cell;
        let Some(to) = from.step(direction, self.grid.columns(), self.grid.rows()) else {
            out_events.push(Event::PlayerMoveRejected {
                direction,
                reason: MoveRejection::OutOfBounds,
            });
            return;
        };

        if !self.grid.is_open(to) {
            out_events.push(Event::PlayerMoveRejected {
                direction,
                reason: MoveRejection::Blocked,
            });
            return;
        }

        self.player.cell = to;
        self.player.last_move = self.clock;
        out_events.push(Event::PlayerMoved { from, to });
    }

    fn fire_bullet(&mut self, direction: Direction, out_events: &mut Vec<Event>) {
        if !self.player.may_shoot(self.clock, self.rules.shot_cooldown) {
            return;
        }

        let bullet = BulletId::new(self.next_bullet_id);
        self.next_bullet_id = self.next_bullet_id.wrapping_add(1);
        let origin = self.player.cell.center(self.rules.tile_length);
        self.bullets.push(Bullet::new(bullet, origin, direction));
        self.player.last_shot = Some(self.clock);
        out_events.push(Event::BulletFired {
            bullet,
            origin,
            direction,
        });
    }

    fn step_enemy(&mut self, enemy: EnemyId, to: CellCoord, out_events: &mut Vec<Event>) {
        let now = self.clock;
        let interval = self.rules.enemy_step_interval;
        let Some(actor) = self.enemy_mut(enemy) else {
            return;
        };
        if !actor.ready(now, interval) {
            return;
        }
        if actor.patrol.next_step(actor.cell, actor.room) != (PatrolStep::Advance { to }) {
            return;
        }

        let from = actor.cell;
        actor.cell = to;
        actor.last_step = now;
        out_events.push(Event::EnemyAdvanced { enemy, from, to });
    }

    fn reverse_patrol(&mut self, enemy: EnemyId, out_events: &mut Vec<Event>) {
        let now = self.clock;
        let interval = self.rules.enemy_step_interval;
        let Some(actor) = self.enemy_mut(enemy) else {
            return;
        };
        if !actor.ready(now, interval) {
            return;
        }
        if actor.patrol.next_step(actor.cell, actor.room) != PatrolStep::Reverse {
            return;
        }

        actor.patrol = actor.patrol.reversed();
        actor.last_step = now;
        out_events.push(Event::PatrolReversed {
            enemy,
            patrol: actor.patrol,
        });
    }

    fn resolve_hit(&mut self, bullet: BulletId, enemy: EnemyId, out_events: &mut Vec<Event>) {
        let tile_length = self.rules.tile_length;
        let hit_radius = self.rules.hit_radius;
        let Some(shot) = self
            .bullets
            .iter_mut()
            .find(|candidate| candidate.id == bullet && candidate.active)
        else {
            return;
        };
        let Some(target) = self
            .enemies
            .iter_mut()
            .find(|candidate| candidate.id == enemy && candidate.alive)
        else {
            return;
        };

        if shot.position.distance(target.center(tile_length)) >= hit_radius {
            return;
        }

        shot.active = false;
        target.alive = false;
        log::debug!(
            "enemy {} destroyed by bullet {} at ({}, {})",
            enemy.get(),
            bullet.get(),
            target.cell.column(),
            target.cell.row()
        );
        out_events.push(Event::EnemyDestroyed {
            enemy,
            bullet,
            cell: target.cell,
        });
    }
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::Tick { dt } => {
            world.clock = world.clock.saturating_add(dt);
            world.compact();
            out_events.push(Event::TimeAdvanced {
                dt,
                now: world.clock,
            });
            world.advance_bullets(out_events);
        }
        Command::MovePlayer { direction } => world.move_player(direction, out_events),
        Command::FireBullet { direction } => world.fire_bullet(direction, out_events),
        Command::StepEnemy { enemy, to } => world.step_enemy(enemy, to, out_events),
        Command::ReversePatrol { enemy } => world.reverse_patrol(enemy, out_events),
        Command::ResolveHit { bullet, enemy } => world.resolve_hit(bullet, enemy, out_events),
        Command::UpdateVisibility => {
            world
                .fog
                .update(world.player.cell, world.rules.visibility_radius);
        }
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use std::time::Duration;

    use super::World;
    use nightmare_maze_core::{
        BulletSnapshot, BulletView, CellCoord, CellRect, EnemySnapshot, EnemyView, FogView, Grid,
        Rules,
    };

    /// Retrieves the welcome banner that adapters may display to players.
    #[must_use]
    pub fn welcome_banner(world: &World) -> &'static str {
        world.banner
    }

    /// Provides read-only access to the carved maze grid.
    #[must_use]
    pub fn grid(world: &World) -> &Grid {
        &world.grid
    }

    /// Rooms carved into the maze in placement order.
    #[must_use]
    pub fn rooms(world: &World) -> &[CellRect] {
        &world.rooms
    }

    /// Cell the player started the round on.
    #[must_use]
    pub fn start(world: &World) -> CellCoord {
        world.start
    }

    /// Cell the player must reach to win.
    #[must_use]
    pub fn exit(world: &World) -> CellCoord {
        world.exit
    }

    /// Gameplay rules the world was built with.
    #[must_use]
    pub fn rules(world: &World) -> &Rules {
        &world.rules
    }

    /// Current value of the simulation clock.
    #[must_use]
    pub fn now(world: &World) -> Duration {
        world.clock
    }

    /// Cell currently occupied by the player.
    #[must_use]
    pub fn player_cell(world: &World) -> CellCoord {
        world.player.cell
    }

    /// Exposes a read-only view of the fog-of-war.
    #[must_use]
    pub fn fog_view(world: &World) -> FogView<'_> {
        world.fog.view()
    }

    /// Captures a read-only view of the live enemies.
    #[must_use]
    pub fn enemy_view(world: &World) -> EnemyView {
        let now = world.clock;
        let interval = world.rules.enemy_step_interval;
        let tile_length = world.rules.tile_length;
        let snapshots: Vec<EnemySnapshot> = world
            .enemies
            .iter()
            .filter(|enemy| enemy.alive)
            .map(|enemy| enemy.snapshot(now, interval, tile_length))
            .collect();
        EnemyView::from_snapshots(snapshots)
    }

    /// Captures a read-only view of the bullets still in flight.
    #[must_use]
    pub fn bullet_view(world: &World) -> BulletView {
        let snapshots: Vec<BulletSnapshot> = world
            .bullets
            .iter()
            .filter(|bullet| bullet.active)
            .map(|bullet| bullet.snapshot())
            .collect();
        BulletView::from_snapshots(snapshots)
    }

    /// Reports whether a live enemy shares the player's cell.
    #[must_use]
    pub fn player_caught(world: &World) -> bool {
        world
            .enemies
            .iter()
            .any(|enemy| enemy.alive && enemy.cell == world.player.cell)
    }

    /// Reports whether the player stands on the exit cell.
    #[must_use]
    pub fn player_at_exit(world: &World) -> bool {
        world.player.cell == world.exit
    }
}
