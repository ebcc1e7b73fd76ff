use nightmare_maze_core::{CellCoord, Grid, PatrolStep};
use nightmare_maze_system_generation::{
    connectivity::unreachable_cells,
    corridors::{connect, is_valid_path_cell},
    rooms::place_rooms,
    Connector, MazeConfig, MazeGenerator,
};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn fifteen_room_config() -> MazeConfig {
    MazeConfig {
        min_rooms: 15,
        max_rooms: 15,
        ..MazeConfig::default()
    }
}

#[test]
fn seeded_maze_has_one_enemy_per_room_and_open_corners() {
    let config = fifteen_room_config();
    let mut rng = ChaCha8Rng::seed_from_u64(0x5eed);
    let layout = MazeGenerator::new(config.clone())
        .generate(&mut rng)
        .expect("default grid fits rooms");

    assert!(!layout.rooms.is_empty());
    assert!(layout.rooms.len() <= 15);
    assert_eq!(layout.enemy_spawns.len(), layout.rooms.len());
    assert_eq!(layout.start, CellCoord::new(0, 0));
    assert_eq!(
        layout.exit,
        CellCoord::new(config.columns - 1, config.rows - 1)
    );
    assert!(layout.grid.is_open(layout.start));
    assert!(layout.grid.is_open(layout.exit));

    for (room, spawn) in layout.rooms.iter().zip(&layout.enemy_spawns) {
        let size = room.size();
        assert!((2..=10).contains(&size.width()));
        assert!((2..=4).contains(&size.height()));
        assert_eq!(spawn.room, *room);
        assert_eq!(spawn.cell, room.center());
        assert!(room.contains(spawn.cell));
        assert!(room.cells().all(|cell| layout.grid.is_open(cell)));
    }
}

#[test]
fn same_seed_reproduces_the_same_maze() {
    let generator = MazeGenerator::new(MazeConfig::default());
    let first = generator.generate(&mut ChaCha8Rng::seed_from_u64(42));
    let second = generator.generate(&mut ChaCha8Rng::seed_from_u64(42));
    assert_eq!(first, second);
}

#[test]
fn every_open_cell_is_reachable_from_start() {
    for connector in [Connector::LPath, Connector::Meander] {
        let generator = MazeGenerator::new(MazeConfig {
            connector,
            ..MazeConfig::default()
        });

        for seed in 0..48 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let layout = generator.generate(&mut rng).expect("maze generated");
            assert!(
                unreachable_cells(&layout.grid, layout.start).is_empty(),
                "seed {seed} with {connector:?} left stranded cells"
            );
        }
    }
}

#[test]
fn disabling_repair_leaves_stranded_regions() {
    let generator = MazeGenerator::new(MazeConfig {
        repair_connectivity: false,
        ..MazeConfig::default()
    });

    let stranded = (0..16)
        .map(|seed| {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let layout = generator.generate(&mut rng).expect("maze generated");
            unreachable_cells(&layout.grid, layout.start).len()
        })
        .filter(|count| *count > 0)
        .count();

    assert!(stranded > 0, "width-1 corridors should strand some rooms");
}

#[test]
fn rooms_never_intrude_on_buffered_neighbours() {
    let config = MazeConfig::default();
    let generator = MazeGenerator::new(config.clone());

    for seed in 0..32 {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let layout = generator.generate(&mut rng).expect("maze generated");

        for (index, room) in layout.rooms.iter().enumerate() {
            for other in layout.rooms.iter().skip(index + 1) {
                assert!(
                    !room.buffer_touches(other, config.room_buffer),
                    "seed {seed}: {room:?} intrudes on {other:?}"
                );
            }
        }
    }
}

#[test]
fn width_filter_accepted_every_carved_cell() {
    let config = MazeConfig::default();

    for seed in 0..32 {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut grid = Grid::new(config.columns, config.rows);
        let rooms = place_rooms(&mut grid, &config, &mut rng);

        for pair in rooms.windows(2) {
            let mut replay = grid.clone();
            let report = connect(&mut grid, pair[0].center(), pair[1].center(), &mut rng);

            for cell in &report.carved {
                assert!(
                    is_valid_path_cell(&replay, *cell),
                    "seed {seed}: {cell:?} violated the width filter when carved"
                );
                replay.open(*cell);
            }
            assert_eq!(replay, grid);
        }
    }
}

#[test]
fn spawned_patrols_start_inside_their_room() {
    let mut rng = ChaCha8Rng::seed_from_u64(9);
    let layout = MazeGenerator::default()
        .generate(&mut rng)
        .expect("maze generated");

    for spawn in &layout.enemy_spawns {
        match spawn.patrol.next_step(spawn.cell, spawn.room) {
            PatrolStep::Advance { to } => assert!(spawn.room.contains(to)),
            PatrolStep::Reverse => {}
        }
    }
}
