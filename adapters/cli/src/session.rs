use std::time::Duration;

use anyhow::{Context, Result};
use glam::Vec2;
use nightmare_maze_core::{Cell, Command, Event, FogCell};
use nightmare_maze_rendering::{FrameInput, Outcome, Scene, TileGridPresentation, TileVisual};
use nightmare_maze_system_bootstrap::Bootstrap;
use nightmare_maze_system_combat::Combat;
use nightmare_maze_system_patrol::Patrolling;
use nightmare_maze_world::{self as world, query, World};
use rand_chacha::ChaCha8Rng;

/// How long the welcome banner stays up after a round starts.
const BANNER_DURATION: Duration = Duration::from_secs(3);

/// One game of Nightmare Maze, restartable with a fresh maze.
#[derive(Debug)]
pub(crate) struct Session {
    bootstrap: Bootstrap,
    rng: ChaCha8Rng,
    world: World,
    patrolling: Patrolling,
    combat: Combat,
    events: Vec<Event>,
    commands: Vec<Command>,
    outcome: Outcome,
    banner_remaining: Duration,
}

impl Session {
    /// Generates the first maze and starts a round in it.
    pub(crate) fn start(bootstrap: Bootstrap, mut rng: ChaCha8Rng) -> Result<Self> {
        let world = bootstrap
            .build_world(&mut rng)
            .context("failed to build the first maze")?;
        Ok(Self::with_world(bootstrap, rng, world))
    }

    fn with_world(bootstrap: Bootstrap, rng: ChaCha8Rng, world: World) -> Self {
        let mut session = Self {
            bootstrap,
            rng,
            combat: Combat::new(query::rules(&world).hit_radius),
            world,
            patrolling: Patrolling::new(),
            events: Vec::new(),
            commands: Vec::new(),
            outcome: Outcome::Playing,
            banner_remaining: BANNER_DURATION,
        };
        session.begin_round();
        session
    }

    fn begin_round(&mut self) {
        self.events.clear();
        self.commands.clear();
        self.outcome = Outcome::Playing;
        self.banner_remaining = BANNER_DURATION;
        self.apply(Command::UpdateVisibility);
    }

    /// Runs one frame of the game.
    ///
    /// A decided round is frozen until the player asks for a restart.
    pub(crate) fn advance(&mut self, dt: Duration, input: &FrameInput) {
        self.banner_remaining = self.banner_remaining.saturating_sub(dt);

        if self.outcome.is_decided() {
            if input.restart {
                self.restart();
            }
            return;
        }

        self.events.clear();
        self.apply(Command::Tick { dt });
        if let Some(direction) = input.movement {
            self.apply(Command::MovePlayer { direction });
        }
        if let Some(direction) = input.shoot {
            self.apply(Command::FireBullet { direction });
        }

        self.patrolling.handle(
            &self.events,
            &query::enemy_view(&self.world),
            &mut self.commands,
        );
        self.flush_commands();

        self.combat.handle(
            &self.events,
            &query::bullet_view(&self.world),
            &query::enemy_view(&self.world),
            &mut self.commands,
        );
        self.flush_commands();

        self.apply(Command::UpdateVisibility);
        self.decide_outcome();
    }

    /// Builds a scene showing the current round.
    pub(crate) fn scene(&self, tile_grid: TileGridPresentation) -> Scene {
        let mut scene = Scene::new(tile_grid, query::player_cell(&self.world));
        self.populate_scene(&mut scene);
        scene
    }

    /// Copies the player's view of the world into the scene.
    pub(crate) fn populate_scene(&self, scene: &mut Scene) {
        let grid = query::grid(&self.world);
        let fog = query::fog_view(&self.world);

        scene.tiles.clear();
        scene
            .tiles
            .extend(grid.cells().iter().zip(fog.iter()).map(|(cell, fog)| {
                let lit = fog == FogCell::Visible;
                match (fog, cell) {
                    (FogCell::Unseen, _) => TileVisual::Hidden,
                    (_, Cell::Wall) => TileVisual::Wall { lit },
                    (_, Cell::Open) => TileVisual::Floor { lit },
                }
            }));

        let player = query::player_cell(&self.world);
        scene.player = player;
        scene.viewport.follow(player.row());

        let exit = query::exit(&self.world);
        scene.exit = (fog.state(exit) != FogCell::Unseen).then_some(exit);

        scene.enemies.clear();
        scene.enemies.extend(
            query::enemy_view(&self.world)
                .iter()
                .map(|enemy| enemy.cell)
                .filter(|cell| fog.is_visible(*cell)),
        );

        scene.bullets.clear();
        scene.bullets.extend(
            query::bullet_view(&self.world)
                .iter()
                .map(|bullet| Vec2::new(bullet.position.x, bullet.position.y)),
        );

        scene.banner = (!self.banner_remaining.is_zero())
            .then(|| self.bootstrap.welcome_banner(&self.world).to_owned());
        scene.outcome = self.outcome;
    }

    fn apply(&mut self, command: Command) {
        world::apply(&mut self.world, command, &mut self.events);
    }

    fn flush_commands(&mut self) {
        let commands = std::mem::take(&mut self.commands);
        for command in commands {
            self.apply(command);
        }
    }

    fn decide_outcome(&mut self) {
        let destroyed = self
            .events
            .iter()
            .filter(|event| matches!(event, Event::EnemyDestroyed { .. }))
            .count();
        if destroyed > 0 {
            log::debug!(
                "{destroyed} monster(s) destroyed, {} remaining",
                query::enemy_view(&self.world).len()
            );
        }

        self.outcome = if query::player_caught(&self.world) {
            Outcome::Caught
        } else if query::player_at_exit(&self.world) {
            Outcome::Escaped
        } else {
            Outcome::Playing
        };

        if self.outcome.is_decided() {
            log::info!(
                "round over after {:.1}s: {:?}",
                query::now(&self.world).as_secs_f32(),
                self.outcome
            );
        }
    }

    fn restart(&mut self) {
        match self.bootstrap.build_world(&mut self.rng) {
            Ok(world) => {
                log::info!("starting a new round");
                self.combat = Combat::new(query::rules(&world).hit_radius);
                self.patrolling = Patrolling::new();
                self.world = world;
                self.begin_round();
            }
            Err(error) => log::error!("could not generate a new maze: {error}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nightmare_maze_core::{
        CellCoord, CellRect, CellRectSize, Direction, EnemySpawn, Grid, MazeLayout, Patrol, Rules,
    };
    use nightmare_maze_rendering::Color;
    use rand::SeedableRng;

    const FRAME: Duration = Duration::from_millis(16);

    fn session_with(layout: MazeLayout) -> Session {
        let world = World::new(layout, Rules::default());
        Session::with_world(Bootstrap::default(), ChaCha8Rng::seed_from_u64(5), world)
    }

    fn corridor_session(enemy_column: u32) -> Session {
        let mut grid = Grid::new(12, 3);
        for column in 0..12 {
            grid.open(CellCoord::new(column, 1));
        }
        let room = CellRect::from_origin_and_size(
            CellCoord::new(enemy_column, 1),
            CellRectSize::new(1, 1),
        );
        session_with(MazeLayout {
            grid,
            rooms: vec![room],
            start: CellCoord::new(1, 1),
            exit: CellCoord::new(11, 1),
            enemy_spawns: vec![EnemySpawn {
                cell: room.origin(),
                room,
                patrol: Patrol::vertical(),
            }],
        })
    }

    fn tile_grid(columns: u32, rows: u32) -> TileGridPresentation {
        TileGridPresentation::new(
            columns,
            rows,
            Rules::DEFAULT_TILE_LENGTH,
            15,
            Color::from_rgb_u8(0x80, 0x80, 0x80),
        )
        .expect("valid grid")
    }

    fn idle() -> FrameInput {
        FrameInput::default()
    }

    #[test]
    fn scene_hides_unseen_terrain_and_distant_monsters() {
        let session = corridor_session(9);

        let scene = session.scene(tile_grid(12, 3));

        assert_eq!(scene.player, CellCoord::new(1, 1));
        assert_eq!(scene.tile(CellCoord::new(1, 1)), TileVisual::Floor { lit: true });
        assert_eq!(scene.tile(CellCoord::new(1, 0)), TileVisual::Wall { lit: true });
        assert_eq!(scene.tile(CellCoord::new(8, 1)), TileVisual::Hidden);
        assert_eq!(scene.exit, None);
        assert!(scene.enemies.is_empty());
        assert_eq!(
            scene.banner.as_deref(),
            Some(nightmare_maze_core::WELCOME_BANNER)
        );
    }

    #[test]
    fn walked_past_tiles_stay_remembered() {
        let mut session = corridor_session(9);
        let east = FrameInput {
            movement: Some(Direction::East),
            ..FrameInput::default()
        };

        for _ in 0..60 {
            session.advance(FRAME, &east);
        }
        let scene = session.scene(tile_grid(12, 3));

        assert!(scene.player.column() > 4);
        assert_eq!(scene.tile(CellCoord::new(0, 1)), TileVisual::Floor { lit: false });
        assert!(scene.banner.is_some());
    }

    #[test]
    fn visible_monster_is_drawn() {
        let session = corridor_session(3);

        let scene = session.scene(tile_grid(12, 3));

        assert_eq!(scene.enemies, vec![CellCoord::new(3, 1)]);
    }

    #[test]
    fn shooting_down_the_corridor_kills_the_monster() {
        let mut session = corridor_session(6);
        let shoot = FrameInput {
            shoot: Some(Direction::East),
            ..FrameInput::default()
        };

        session.advance(FRAME, &shoot);
        for _ in 0..20 {
            session.advance(FRAME, &idle());
        }

        assert!(query::enemy_view(&session.world).is_empty());
        assert_eq!(session.outcome, Outcome::Playing);
    }

    #[test]
    fn walking_into_a_monster_ends_the_round() {
        let mut session = corridor_session(2);
        let east = FrameInput {
            movement: Some(Direction::East),
            ..FrameInput::default()
        };

        session.advance(FRAME, &east);
        assert_eq!(session.outcome, Outcome::Playing, "first step waits for the delay");
        for _ in 0..20 {
            session.advance(FRAME, &east);
        }

        assert_eq!(session.outcome, Outcome::Caught);
        assert_eq!(query::player_cell(&session.world), CellCoord::new(2, 1));

        let frozen_at = query::now(&session.world);
        session.advance(FRAME, &idle());
        assert_eq!(query::now(&session.world), frozen_at);
        assert_eq!(session.outcome, Outcome::Caught);
    }

    #[test]
    fn reaching_the_exit_wins_and_restart_builds_a_new_maze() {
        let mut grid = Grid::new(3, 1);
        grid.open(CellCoord::new(0, 0));
        grid.open(CellCoord::new(1, 0));
        let mut session = session_with(MazeLayout {
            grid,
            rooms: Vec::new(),
            start: CellCoord::new(0, 0),
            exit: CellCoord::new(1, 0),
            enemy_spawns: Vec::new(),
        });
        let east = FrameInput {
            movement: Some(Direction::East),
            ..FrameInput::default()
        };

        for _ in 0..20 {
            session.advance(FRAME, &east);
        }
        assert_eq!(session.outcome, Outcome::Escaped);

        session.advance(
            FRAME,
            &FrameInput {
                restart: true,
                ..FrameInput::default()
            },
        );

        assert_eq!(session.outcome, Outcome::Playing);
        assert_eq!(query::grid(&session.world).columns(), 20);
        assert_eq!(query::player_cell(&session.world), query::start(&session.world));
    }
}
