use std::collections::HashSet;

use snake_arcade_core::{GridPoint, GridSpace};
use snake_arcade_system_spawning::{Config, Spawner};

fn grid() -> GridSpace {
    GridSpace::new(120, 120, 20).expect("valid geometry")
}

#[test]
fn spawned_apples_never_land_on_snake_or_rocks() {
    let grid = grid();
    let snake = vec![
        GridPoint::new(40, 40),
        GridPoint::new(20, 40),
        GridPoint::new(0, 40),
    ];
    let rocks = vec![GridPoint::new(100, 0), GridPoint::new(60, 80)];
    let mut spawner = Spawner::new(Config::new(42));

    for _ in 0..200 {
        let apple = spawner
            .spawn_apple(&grid, &snake, &rocks)
            .expect("grid has free cells");
        assert!(!snake.contains(&apple), "apple spawned on the snake");
        assert!(!rocks.contains(&apple), "apple spawned on a rock");
        assert!(grid.contains(apple), "apple left the lattice");
    }
}

#[test]
fn repeated_draws_cover_the_whole_free_pool() {
    let grid = GridSpace::new(60, 60, 20).expect("valid geometry");
    let blocked: HashSet<GridPoint> = [GridPoint::new(0, 0)].into_iter().collect();
    let mut spawner = Spawner::new(Config::new(3));

    let mut seen: HashSet<GridPoint> = HashSet::new();
    for _ in 0..500 {
        let position = spawner
            .random_free(&grid, &blocked)
            .expect("grid has free cells");
        let _ = seen.insert(position);
    }

    // A uniform draw over 8 free cells visits all of them well within 500 tries.
    assert_eq!(seen.len(), grid.cell_count() - 1);
    assert!(!seen.contains(&GridPoint::new(0, 0)));
}
