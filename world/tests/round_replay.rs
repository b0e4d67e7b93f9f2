use std::time::Duration;

use snake_arcade_core::{Command, Direction, Event, GridPoint, GridSpace, RoundConfig};
use snake_arcade_world::{apply, query, World, DEFAULT_SPAWN_SEED};

fn default_config() -> RoundConfig {
    let grid = GridSpace::new(640, 480, 20).expect("valid geometry");
    RoundConfig::new(grid, 3, Duration::from_millis(120)).expect("valid config")
}

fn script() -> Vec<Command> {
    vec![
        Command::Tick,
        Command::SetDirection {
            direction: Direction::Down,
        },
        Command::Tick,
        Command::Tick,
        Command::SetDirection {
            direction: Direction::Left,
        },
        Command::Tick,
        Command::SetDirection {
            direction: Direction::Up,
        },
        Command::Tick,
        Command::Tick,
    ]
}

#[test]
fn identical_seeds_replay_identical_rounds() {
    let mut first = World::with_config(default_config(), 97);
    let mut second = World::with_config(default_config(), 97);
    assert_eq!(query::round_view(&first), query::round_view(&second));

    for command in script() {
        let mut first_events = Vec::new();
        let mut second_events = Vec::new();
        apply(&mut first, command.clone(), &mut first_events);
        apply(&mut second, command, &mut second_events);
        assert_eq!(first_events, second_events);
        assert_eq!(query::round_view(&first), query::round_view(&second));
    }
}

#[test]
fn reconfiguring_replays_the_initial_state() {
    let mut world = World::with_config(default_config(), DEFAULT_SPAWN_SEED);
    let initial = query::round_view(&world);

    let mut events = Vec::new();
    for command in script() {
        apply(&mut world, command, &mut events);
    }

    events.clear();
    apply(
        &mut world,
        Command::ConfigureRound {
            config: default_config(),
        },
        &mut events,
    );
    assert_eq!(events, vec![Event::RoundStarted]);
    assert_eq!(
        query::round_view(&world),
        initial,
        "reseeding the spawner reproduces the opening placement"
    );
}

#[test]
fn default_round_fills_the_rock_field_away_from_the_snake() {
    let world = World::new();
    let view = query::round_view(&world);

    assert_eq!(view.head(), Some(GridPoint::new(320, 240)));
    assert_eq!(view.rocks().len(), 3);
    for window in view.rocks().windows(2) {
        assert!(window[0] < window[1], "rocks are reported sorted and unique");
    }
    for rock in view.rocks() {
        assert_ne!(*rock, GridPoint::new(320, 240));
        assert_ne!(*rock, view.apple());
    }
}

#[test]
fn first_tick_moves_the_default_snake_to_its_neighbor_cell() {
    let mut world = World::new();
    let mut events = Vec::new();
    apply(&mut world, Command::Tick, &mut events);

    assert!(events.contains(&Event::SnakeAdvanced {
        from: GridPoint::new(320, 240),
        to: GridPoint::new(340, 240),
    }));
}
