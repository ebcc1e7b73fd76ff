use nightmare_maze_core::{FogCell, Rules, WELCOME_BANNER};
use nightmare_maze_system_bootstrap::{Bootstrap, BootstrapError};
use nightmare_maze_system_generation::{GenerationError, MazeConfig};
use nightmare_maze_world::query;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

#[test]
fn builds_world_with_player_on_start() {
    let bootstrap = Bootstrap::default();
    let mut rng = ChaCha8Rng::seed_from_u64(21);

    let world = bootstrap.build_world(&mut rng).expect("world builds");

    assert_eq!(bootstrap.welcome_banner(&world), WELCOME_BANNER);
    assert_eq!(query::player_cell(&world), query::start(&world));
    assert_eq!(
        query::enemy_view(&world).len(),
        query::rooms(&world).len()
    );
    assert!(query::fog_view(&world)
        .iter()
        .all(|cell| cell == FogCell::Unseen));
    assert!(!query::player_caught(&world));
}

#[test]
fn degenerate_configuration_exhausts_attempts() {
    let config = MazeConfig {
        columns: 4,
        rows: 4,
        ..MazeConfig::default()
    };
    let bootstrap = Bootstrap::new(config, Rules::default()).with_max_attempts(3);
    let mut rng = ChaCha8Rng::seed_from_u64(0);

    assert_eq!(
        bootstrap.build_world(&mut rng).err(),
        Some(BootstrapError::GenerationExhausted { attempts: 3 })
    );
}

#[test]
fn invalid_configuration_fails_without_retrying() {
    let config = MazeConfig {
        columns: 0,
        ..MazeConfig::default()
    };
    let bootstrap = Bootstrap::new(config, Rules::default());
    let mut rng = ChaCha8Rng::seed_from_u64(0);

    assert!(matches!(
        bootstrap.build_world(&mut rng),
        Err(BootstrapError::Generation(GenerationError::InvalidConfig { .. }))
    ));
}
