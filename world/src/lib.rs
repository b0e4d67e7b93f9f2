#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative round state for the Snake Arcade engine.
//!
//! The [`World`] owns the snake, the rock field, the apple, and the score.
//! Adapters never mutate it directly: they submit [`Command`] values through
//! [`apply`], which executes the mutation and pushes resulting [`Event`]
//! values for them to react to. Rendering reads immutable snapshots through
//! the [`query`] module.

mod rocks;
mod snake;

use std::collections::HashSet;

use snake_arcade_core::{Command, Direction, Event, GridPoint, RoundConfig, RoundEndCause};
use snake_arcade_system_spawning::{Config as SpawnerConfig, NoFreeSpaceError, Spawner};

use crate::rocks::RockField;
use crate::snake::Snake;

/// Seed used by [`World::new`] when the caller does not supply one.
pub const DEFAULT_SPAWN_SEED: u64 = 0x9e37_79b9_7f4a_7c15;

/// Authoritative state of a running round.
#[derive(Clone, Debug)]
pub struct World {
    config: RoundConfig,
    snake: Snake,
    rocks: RockField,
    apple: GridPoint,
    score: u32,
    running: bool,
    rng_seed: u64,
    spawner: Spawner,
}

impl World {
    /// Creates a world with the default configuration and spawn seed.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(RoundConfig::default(), DEFAULT_SPAWN_SEED)
    }

    /// Creates a world from an explicit configuration and RNG seed.
    ///
    /// Identical configurations and seeds produce identical worlds, and
    /// feeding them identical command sequences keeps them identical.
    #[must_use]
    pub fn with_config(config: RoundConfig, rng_seed: u64) -> Self {
        let center = config.grid().center();
        let mut world = Self {
            config,
            snake: Snake::new(center, Direction::Right),
            rocks: RockField::new(config.rock_count()),
            apple: center,
            score: 0,
            running: true,
            rng_seed,
            spawner: Spawner::new(SpawnerConfig::new(rng_seed)),
        };
        world.reset_round();
        world
    }

    /// Configuration the current round runs under.
    #[must_use]
    pub const fn config(&self) -> &RoundConfig {
        &self.config
    }

    /// Rebuilds the canonical start state: a single-segment snake at the
    /// grid center heading right, a full rock field, a fresh apple, and a
    /// zeroed score. The spawner keeps its RNG stream so consecutive rounds
    /// stay on one deterministic trajectory.
    fn reset_round(&mut self) {
        let grid = *self.config.grid();
        self.snake = Snake::new(grid.center(), Direction::Right);
        self.score = 0;
        self.rocks = RockField::new(self.config.rock_count());
        while self.rocks.len() < self.rocks.target() {
            let mut blocked: HashSet<GridPoint> = self.snake.segments().collect();
            blocked.extend(self.rocks.positions().iter().copied());
            match self.spawner.random_free(&grid, &blocked) {
                Ok(position) => self.rocks.insert(position),
                Err(NoFreeSpaceError) => break,
            }
        }
        let segments: Vec<GridPoint> = self.snake.segments().collect();
        if let Ok(apple) = self
            .spawner
            .spawn_apple(&grid, &segments, self.rocks.positions())
        {
            self.apple = apple;
        }
    }

    /// Tops the rock field back up to its target, treating the snake and
    /// the apple as blocked. A grid with no free cells left skips the
    /// top-up for this tick instead of failing the simulation.
    fn ensure_rock_count(&mut self) {
        while self.rocks.len() < self.rocks.target() {
            let mut blocked: HashSet<GridPoint> = self.snake.segments().collect();
            blocked.extend(self.rocks.positions().iter().copied());
            let _ = blocked.insert(self.apple);
            match self.spawner.random_free(self.config.grid(), &blocked) {
                Ok(position) => self.rocks.insert(position),
                Err(NoFreeSpaceError) => break,
            }
        }
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

/// Executes a command against the world, appending resulting events.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::ConfigureRound { config } => {
            world.config = config;
            world.spawner = Spawner::new(SpawnerConfig::new(world.rng_seed));
            world.running = true;
            world.reset_round();
            out_events.push(Event::RoundStarted);
        }
        Command::SetDirection { direction } => world.snake.set_direction(direction),
        Command::Tick => tick(world, out_events),
        Command::Quit => {
            if world.running {
                world.running = false;
                out_events.push(Event::Stopped);
            }
        }
    }
}

/// Advances the simulation by one discrete step.
///
/// The step order is fixed: move the snake, resolve a rock strike at the
/// new head cell, end the round if the snake was erased or folded into
/// itself, resolve the apple, and finally top the rock field back up.
fn tick(world: &mut World, out_events: &mut Vec<Event>) {
    if !world.running {
        return;
    }
    let Some((from, to)) = world.snake.advance(world.config.grid()) else {
        return;
    };
    out_events.push(Event::SnakeAdvanced { from, to });

    if world.rocks.remove(to) {
        world.snake.shorten();
        out_events.push(Event::RockStruck { at: to });
    }

    if world.snake.is_destroyed() {
        out_events.push(Event::RoundEnded {
            cause: RoundEndCause::SnakeDestroyed,
            final_score: world.score,
        });
        world.reset_round();
        out_events.push(Event::RoundStarted);
        return;
    }

    if world.snake.collides_with_self() {
        out_events.push(Event::RoundEnded {
            cause: RoundEndCause::SelfCollision,
            final_score: world.score,
        });
        world.reset_round();
        out_events.push(Event::RoundStarted);
        return;
    }

    if world.snake.head() == Some(world.apple) {
        world.score += 1;
        world.snake.grow();
        out_events.push(Event::AppleEaten {
            at: world.apple,
            score: world.score,
        });
        let segments: Vec<GridPoint> = world.snake.segments().collect();
        // A saturated grid leaves the apple where it was eaten; the guard
        // in RoundConfig keeps this from occurring at sane settings.
        if let Ok(apple) =
            world
                .spawner
                .spawn_apple(world.config.grid(), &segments, world.rocks.positions())
        {
            world.apple = apple;
        }
    }

    world.ensure_rock_count();
}

/// Read-only snapshot views over the world.
pub mod query {
    use snake_arcade_core::GridPoint;

    use crate::World;

    /// Immutable, presentation-ready view of the current round.
    #[derive(Clone, Debug, PartialEq, Eq)]
    pub struct RoundSnapshot {
        segments: Vec<GridPoint>,
        rocks: Vec<GridPoint>,
        apple: GridPoint,
        score: u32,
        length: usize,
        running: bool,
    }

    impl RoundSnapshot {
        /// Snake body segments ordered head first.
        #[must_use]
        pub fn segments(&self) -> &[GridPoint] {
            &self.segments
        }

        /// Current head position, if the snake exists.
        #[must_use]
        pub fn head(&self) -> Option<GridPoint> {
            self.segments.first().copied()
        }

        /// Rock positions in ascending lattice order.
        #[must_use]
        pub fn rocks(&self) -> &[GridPoint] {
            &self.rocks
        }

        /// Position of the apple.
        #[must_use]
        pub const fn apple(&self) -> GridPoint {
            self.apple
        }

        /// Apples eaten since the round started.
        #[must_use]
        pub const fn score(&self) -> u32 {
            self.score
        }

        /// Number of segments composing the snake.
        #[must_use]
        pub const fn length(&self) -> usize {
            self.length
        }

        /// Whether the simulation is still accepting ticks.
        #[must_use]
        pub const fn running(&self) -> bool {
            self.running
        }
    }

    /// Captures a presentation-ready snapshot of the round.
    #[must_use]
    pub fn round_view(world: &World) -> RoundSnapshot {
        let mut rocks: Vec<GridPoint> = world.rocks.positions().to_vec();
        rocks.sort_unstable();
        RoundSnapshot {
            segments: world.snake.segments().collect(),
            rocks,
            apple: world.apple,
            score: world.score,
            length: world.snake.len(),
            running: world.running,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use snake_arcade_core::{
        Command, Direction, Event, GridPoint, GridSpace, RoundConfig, RoundEndCause,
    };

    use crate::query::round_view;
    use crate::rocks::RockField;
    use crate::{apply, World};

    const TICK: Duration = Duration::from_millis(120);

    fn rockless_world() -> World {
        let grid = GridSpace::new(640, 480, 20).expect("valid geometry");
        let config = RoundConfig::new(grid, 0, TICK).expect("valid config");
        World::with_config(config, 11)
    }

    fn drive(world: &mut World, commands: impl IntoIterator<Item = Command>) -> Vec<Event> {
        let mut events = Vec::new();
        for command in commands {
            apply(world, command, &mut events);
        }
        events
    }

    #[test]
    fn round_starts_at_the_canonical_state() {
        let world = World::new();
        let view = round_view(&world);
        assert_eq!(view.head(), Some(GridPoint::new(320, 240)));
        assert_eq!(view.length(), 1);
        assert_eq!(view.score(), 0);
        assert_eq!(view.rocks().len(), 3);
        assert!(view.running());
        assert!(!view.segments().contains(&view.apple()));
        assert!(!view.rocks().contains(&view.apple()));
    }

    #[test]
    fn tick_advances_the_head_one_cell_right() {
        let mut world = rockless_world();
        world.apple = GridPoint::new(0, 0);
        let events = drive(&mut world, [Command::Tick]);
        assert_eq!(
            events,
            vec![Event::SnakeAdvanced {
                from: GridPoint::new(320, 240),
                to: GridPoint::new(340, 240),
            }]
        );
        assert_eq!(round_view(&world).head(), Some(GridPoint::new(340, 240)));
    }

    #[test]
    fn eating_an_apple_scores_defers_growth_and_respawns_it() {
        let mut world = rockless_world();
        world.apple = GridPoint::new(340, 240);

        let events = drive(&mut world, [Command::Tick]);
        assert!(events.contains(&Event::AppleEaten {
            at: GridPoint::new(340, 240),
            score: 1,
        }));
        let view = round_view(&world);
        assert_eq!(view.score(), 1);
        assert_eq!(view.length(), 1, "growth is deferred to the next move");
        assert_ne!(view.apple(), GridPoint::new(340, 240), "apple respawned");

        world.apple = GridPoint::new(0, 0);
        let _ = drive(&mut world, [Command::Tick]);
        assert_eq!(round_view(&world).length(), 2, "growth lands one move later");
    }

    #[test]
    fn striking_a_rock_costs_one_segment_and_recycles_the_rock() {
        let mut world = rockless_world();
        // Grow to three segments, flushing pending growth with a plain tick.
        world.apple = GridPoint::new(340, 240);
        let _ = drive(&mut world, [Command::Tick]);
        world.apple = GridPoint::new(360, 240);
        let _ = drive(&mut world, [Command::Tick]);
        world.apple = GridPoint::new(0, 0);
        let _ = drive(&mut world, [Command::Tick]);
        assert_eq!(round_view(&world).length(), 3);

        world.rocks = RockField::new(1);
        world.rocks.insert(GridPoint::new(400, 240));

        let events = drive(&mut world, [Command::Tick]);
        assert!(events.contains(&Event::RockStruck {
            at: GridPoint::new(400, 240),
        }));
        let view = round_view(&world);
        assert_eq!(view.length(), 2, "a strike costs exactly one net segment");
        assert_eq!(view.score(), 2, "the score is untouched by rock strikes");
        assert!(view.running());
        assert_eq!(view.rocks().len(), 1, "the field topped back up");
        assert!(!view.rocks().contains(&GridPoint::new(400, 240)));
    }

    #[test]
    fn rock_strike_on_a_lone_head_ends_the_round() {
        let mut world = rockless_world();
        world.rocks = RockField::new(1);
        world.rocks.insert(GridPoint::new(340, 240));

        let events = drive(&mut world, [Command::Tick]);
        assert_eq!(
            events,
            vec![
                Event::SnakeAdvanced {
                    from: GridPoint::new(320, 240),
                    to: GridPoint::new(340, 240),
                },
                Event::RockStruck {
                    at: GridPoint::new(340, 240),
                },
                Event::RoundEnded {
                    cause: RoundEndCause::SnakeDestroyed,
                    final_score: 0,
                },
                Event::RoundStarted,
            ]
        );
        let view = round_view(&world);
        assert_eq!(view.head(), Some(GridPoint::new(320, 240)));
        assert_eq!(view.length(), 1);
        assert_eq!(view.score(), 0);
        assert!(view.running());
    }

    #[test]
    fn folding_into_the_body_ends_the_round() {
        let mut world = rockless_world();
        for x in [340, 360, 380, 400] {
            world.apple = GridPoint::new(x, 240);
            let _ = drive(&mut world, [Command::Tick]);
        }
        world.apple = GridPoint::new(0, 0);
        assert_eq!(round_view(&world).length(), 4);

        let events = drive(
            &mut world,
            [
                Command::SetDirection {
                    direction: Direction::Down,
                },
                Command::Tick,
                Command::SetDirection {
                    direction: Direction::Left,
                },
                Command::Tick,
                Command::SetDirection {
                    direction: Direction::Up,
                },
                Command::Tick,
            ],
        );
        assert!(events.contains(&Event::RoundEnded {
            cause: RoundEndCause::SelfCollision,
            final_score: 4,
        }));
        assert!(events.contains(&Event::RoundStarted));
        let view = round_view(&world);
        assert_eq!(view.head(), Some(GridPoint::new(320, 240)));
        assert_eq!(view.length(), 1);
        assert_eq!(view.score(), 0);
    }

    #[test]
    fn reversing_into_the_neck_is_rejected() {
        let mut world = rockless_world();
        world.apple = GridPoint::new(340, 240);
        let _ = drive(&mut world, [Command::Tick]);
        world.apple = GridPoint::new(0, 0);
        let _ = drive(&mut world, [Command::Tick]);
        assert_eq!(round_view(&world).length(), 2);

        let events = drive(
            &mut world,
            [
                Command::SetDirection {
                    direction: Direction::Left,
                },
                Command::Tick,
            ],
        );
        assert_eq!(round_view(&world).head(), Some(GridPoint::new(380, 240)));
        assert!(!events
            .iter()
            .any(|event| matches!(event, Event::RoundEnded { .. })));
    }

    #[test]
    fn saturated_grid_keeps_the_apple_in_place() {
        let grid = GridSpace::new(40, 40, 20).expect("valid geometry");
        let config = RoundConfig::new(grid, 0, TICK).expect("valid config");
        let mut world = World::with_config(config, 5);

        // Walk the four cells in a loop, eating an apple on every step.
        let path = [
            (GridPoint::new(0, 20), Direction::Up),
            (GridPoint::new(0, 0), Direction::Right),
            (GridPoint::new(20, 0), Direction::Down),
            (GridPoint::new(20, 20), Direction::Down),
        ];
        let mut last_events = Vec::new();
        for (apple, next_direction) in path {
            world.apple = apple;
            last_events = drive(&mut world, [Command::Tick]);
            let _ = drive(
                &mut world,
                [Command::SetDirection {
                    direction: next_direction,
                }],
            );
        }

        let view = round_view(&world);
        assert!(last_events.contains(&Event::AppleEaten {
            at: GridPoint::new(20, 20),
            score: 4,
        }));
        assert_eq!(view.length(), 4, "the snake fills the whole grid");
        assert_eq!(
            view.apple(),
            GridPoint::new(20, 20),
            "with no free cell the apple stays where it was eaten"
        );
        assert!(view.running(), "a failed spawn never stops the round");
    }

    #[test]
    fn quit_stops_the_simulation_idempotently() {
        let mut world = rockless_world();
        let events = drive(&mut world, [Command::Quit, Command::Quit]);
        assert_eq!(events, vec![Event::Stopped]);
        assert!(!round_view(&world).running());

        let before = round_view(&world);
        let events = drive(&mut world, [Command::Tick]);
        assert!(events.is_empty(), "ticks are ignored after quitting");
        assert_eq!(round_view(&world), before);
    }

    #[test]
    fn configure_round_restarts_from_scratch() {
        let mut world = rockless_world();
        world.apple = GridPoint::new(340, 240);
        let _ = drive(&mut world, [Command::Tick, Command::Quit]);
        assert!(!round_view(&world).running());

        let config = *world.config();
        let events = drive(&mut world, [Command::ConfigureRound { config }]);
        assert_eq!(events, vec![Event::RoundStarted]);
        let view = round_view(&world);
        assert!(view.running());
        assert_eq!(view.head(), Some(GridPoint::new(320, 240)));
        assert_eq!(view.score(), 0);
    }
}
