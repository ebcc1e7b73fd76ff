use std::time::Duration;

use nightmare_maze_core::{
    CellCoord, CellRect, CellRectSize, Command, EnemySpawn, Event, Grid, Heading, MazeLayout,
    Patrol, Rules,
};
use nightmare_maze_system_patrol::Patrolling;
use nightmare_maze_world::{self as world, query, World};

const FRAME: Duration = Duration::from_millis(50);

fn single_room_world(patrol: Patrol) -> World {
    let room = CellRect::from_origin_and_size(CellCoord::new(2, 2), CellRectSize::new(4, 3));
    let mut grid = Grid::new(8, 7);
    for cell in room.cells() {
        grid.open(cell);
    }
    grid.open(CellCoord::new(0, 0));

    World::new(
        MazeLayout {
            grid,
            rooms: vec![room],
            start: CellCoord::new(0, 0),
            exit: CellCoord::new(7, 6),
            enemy_spawns: vec![EnemySpawn {
                cell: room.center(),
                room,
                patrol,
            }],
        },
        Rules::default(),
    )
}

fn run_frame(world: &mut World, patrolling: &mut Patrolling) -> Vec<Event> {
    let mut events = Vec::new();
    world::apply(world, Command::Tick { dt: FRAME }, &mut events);

    let mut commands = Vec::new();
    patrolling.handle(&events, &query::enemy_view(world), &mut commands);
    for command in commands {
        world::apply(world, command, &mut events);
    }
    events
}

#[test]
fn enemy_ping_pongs_within_room_bounds() {
    let mut world = single_room_world(Patrol::horizontal());
    let room = query::rooms(&world)[0];
    let mut patrolling = Patrolling::new();
    let mut visited_columns = Vec::new();

    for _ in 0..200 {
        let events = run_frame(&mut world, &mut patrolling);
        for event in events {
            match event {
                Event::EnemyAdvanced { to, .. } => {
                    assert!(room.contains(to), "enemy left its room at {to:?}");
                    visited_columns.push(to.column());
                }
                Event::PatrolReversed { patrol, .. } => {
                    let enemy = query::enemy_view(&world)
                        .iter()
                        .next()
                        .copied()
                        .expect("enemy alive");
                    let edge = match patrol.heading() {
                        Heading::Backward => room.right(),
                        Heading::Forward => room.left(),
                    };
                    assert_eq!(enemy.cell.column(), edge, "reversal happens only at an edge");
                }
                _ => {}
            }
        }
    }

    assert!(visited_columns.contains(&room.left()));
    assert!(visited_columns.contains(&room.right()));
}

#[test]
fn enemy_waits_for_step_interval() {
    let mut world = single_room_world(Patrol::vertical());
    let mut patrolling = Patrolling::new();
    let mut steps = 0;

    for _ in 0..30 {
        let events = run_frame(&mut world, &mut patrolling);
        steps += events
            .iter()
            .filter(|event| {
                matches!(
                    event,
                    Event::EnemyAdvanced { .. } | Event::PatrolReversed { .. }
                )
            })
            .count();
    }

    // 1.5 seconds at one action every 300 ms.
    assert_eq!(query::now(&world), Duration::from_millis(1500));
    assert_eq!(steps, 5);
}
