use std::time::Duration;

use nightmare_maze_core::{
    CellCoord, CellRect, CellRectSize, Command, Direction, EnemySpawn, Event, Grid, MazeLayout,
    Patrol, Rules,
};
use nightmare_maze_system_combat::Combat;
use nightmare_maze_world::{self as world, query, World};

const FRAME: Duration = Duration::from_millis(16);

fn corridor_world(enemy_column: u32) -> World {
    let mut grid = Grid::new(12, 3);
    for column in 0..12 {
        grid.open(CellCoord::new(column, 1));
    }
    let room = CellRect::from_origin_and_size(
        CellCoord::new(enemy_column, 1),
        CellRectSize::new(1, 1),
    );

    World::new(
        MazeLayout {
            grid,
            rooms: vec![room],
            start: CellCoord::new(1, 1),
            exit: CellCoord::new(11, 1),
            enemy_spawns: vec![EnemySpawn {
                cell: room.origin(),
                room,
                patrol: Patrol::vertical(),
            }],
        },
        Rules::default(),
    )
}

fn run_frame(world: &mut World, combat: &mut Combat, fire: Option<Direction>) -> Vec<Event> {
    let mut events = Vec::new();
    world::apply(world, Command::Tick { dt: FRAME }, &mut events);
    if let Some(direction) = fire {
        world::apply(world, Command::FireBullet { direction }, &mut events);
    }

    let mut commands = Vec::new();
    combat.handle(
        &events,
        &query::bullet_view(world),
        &query::enemy_view(world),
        &mut commands,
    );
    for command in commands {
        world::apply(world, command, &mut events);
    }
    events
}

#[test]
fn bullet_destroys_enemy_down_the_corridor() {
    let mut world = corridor_world(6);
    let mut combat = Combat::new(query::rules(&world).hit_radius);

    let mut destroyed = Vec::new();
    let mut fire = Some(Direction::East);
    for _ in 0..20 {
        for event in run_frame(&mut world, &mut combat, fire.take()) {
            if let Event::EnemyDestroyed { enemy, cell, .. } = event {
                destroyed.push((enemy, cell));
            }
        }
    }

    assert_eq!(destroyed.len(), 1);
    assert_eq!(destroyed[0].1, CellCoord::new(6, 1));
    assert!(query::enemy_view(&world).is_empty());
    assert!(query::bullet_view(&world).is_empty());
    assert!(!query::player_caught(&world));
}

#[test]
fn bullet_fired_away_from_enemy_hits_the_grid_edge() {
    let mut world = corridor_world(6);
    let mut combat = Combat::default();

    let mut expired = 0;
    let mut fire = Some(Direction::West);
    for _ in 0..10 {
        expired += run_frame(&mut world, &mut combat, fire.take())
            .iter()
            .filter(|event| matches!(event, Event::BulletExpired { .. }))
            .count();
    }

    assert_eq!(expired, 1);
    assert_eq!(query::enemy_view(&world).len(), 1);
}
