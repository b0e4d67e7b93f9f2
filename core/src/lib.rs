#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Snake Arcade engine.
//!
//! This crate defines the message surface that connects adapters and the
//! authoritative round state. Adapters submit [`Command`] values describing
//! desired mutations, the world executes those commands via its `apply`
//! entry point, and then broadcasts [`Event`] values for adapters to react
//! to deterministically. Adapters query immutable snapshots and respond
//! exclusively with new command batches.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Number of segments a freshly created snake starts with.
pub const INITIAL_SNAKE_LENGTH: usize = 1;

/// Default width of the playfield in world units.
pub const DEFAULT_GRID_WIDTH: i32 = 640;

/// Default height of the playfield in world units.
pub const DEFAULT_GRID_HEIGHT: i32 = 480;

/// Default side length of a single square cell in world units.
pub const DEFAULT_CELL_SIZE: i32 = 20;

/// Default number of rock obstacles maintained on the grid.
pub const DEFAULT_ROCK_COUNT: usize = 3;

/// Default real-time interval between simulation ticks.
pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_millis(120);

/// Commands that express all permissible world mutations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// Replaces the round configuration and restarts the round from scratch.
    ConfigureRound {
        /// Validated configuration the round should adopt.
        config: RoundConfig,
    },
    /// Buffers a new travel direction for the snake's next movement step.
    SetDirection {
        /// Requested direction of travel.
        direction: Direction,
    },
    /// Advances the simulation by exactly one discrete step.
    Tick,
    /// Requests that the simulation stop running.
    Quit,
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Event {
    /// Confirms that the snake's head moved between two lattice points.
    SnakeAdvanced {
        /// Lattice point the head occupied before moving.
        from: GridPoint,
        /// Lattice point the head occupies after completing the move.
        to: GridPoint,
    },
    /// Reports that the snake's head landed on a rock and paid the penalty.
    RockStruck {
        /// Lattice point of the rock consumed by the impact.
        at: GridPoint,
    },
    /// Confirms that the snake ate the apple and scored.
    AppleEaten {
        /// Lattice point where the apple was eaten.
        at: GridPoint,
        /// Score total after the apple was counted.
        score: u32,
    },
    /// Announces that the round reached a terminal collision.
    RoundEnded {
        /// Terminal condition that ended the round.
        cause: RoundEndCause,
        /// Score accumulated before the reset wiped it.
        final_score: u32,
    },
    /// Announces that a fresh round began at the canonical start state.
    RoundStarted,
    /// Confirms that the simulation acknowledged a quit request.
    Stopped,
}

/// Terminal conditions that end a round.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoundEndCause {
    /// The head re-entered the snake's own body.
    SelfCollision,
    /// Rock penalties shortened the snake out of existence.
    SnakeDestroyed,
}

/// Axis-aligned travel directions available to the snake.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Movement toward decreasing y coordinates.
    Up,
    /// Movement toward increasing y coordinates.
    Down,
    /// Movement toward decreasing x coordinates.
    Left,
    /// Movement toward increasing x coordinates.
    Right,
}

impl Direction {
    /// Returns the direction pointing exactly opposite to this one.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    /// Converts the direction into a lattice offset scaled by the cell size.
    #[must_use]
    pub const fn vector(self, cell_size: i32) -> (i32, i32) {
        match self {
            Self::Up => (0, -cell_size),
            Self::Down => (0, cell_size),
            Self::Left => (-cell_size, 0),
            Self::Right => (cell_size, 0),
        }
    }
}

/// Lattice point on the playfield, both components multiples of the cell size.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
pub struct GridPoint {
    x: i32,
    y: i32,
}

impl GridPoint {
    /// Creates a new lattice point from world-unit coordinates.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Horizontal coordinate in world units.
    #[must_use]
    pub const fn x(&self) -> i32 {
        self.x
    }

    /// Vertical coordinate in world units.
    #[must_use]
    pub const fn y(&self) -> i32 {
        self.y
    }

    /// Returns the point displaced by the provided offset, without wrapping.
    #[must_use]
    pub const fn offset_by(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

/// Errors detected while validating grid geometry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum GridError {
    /// The cell size must be a positive number of world units.
    #[error("cell size must be positive (received {cell_size})")]
    ZeroCellSize {
        /// Cell size that failed validation.
        cell_size: i32,
    },
    /// Both playfield dimensions must be positive.
    #[error("grid dimensions must be positive (received {width}x{height})")]
    NonPositiveDimension {
        /// Width supplied by the caller.
        width: i32,
        /// Height supplied by the caller.
        height: i32,
    },
    /// The cell size must divide both playfield dimensions evenly.
    #[error("cell size {cell_size} does not divide {width}x{height} evenly")]
    UnalignedDimension {
        /// Width supplied by the caller.
        width: i32,
        /// Height supplied by the caller.
        height: i32,
        /// Cell size supplied by the caller.
        cell_size: i32,
    },
}

/// Immutable description of the toroidal playfield lattice.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GridSpace {
    width: i32,
    height: i32,
    cell_size: i32,
}

impl GridSpace {
    /// Creates a new grid space, validating that the cell size divides both
    /// dimensions evenly.
    pub fn new(width: i32, height: i32, cell_size: i32) -> Result<Self, GridError> {
        if cell_size <= 0 {
            return Err(GridError::ZeroCellSize { cell_size });
        }
        if width <= 0 || height <= 0 {
            return Err(GridError::NonPositiveDimension { width, height });
        }
        if width % cell_size != 0 || height % cell_size != 0 {
            return Err(GridError::UnalignedDimension {
                width,
                height,
                cell_size,
            });
        }

        Ok(Self {
            width,
            height,
            cell_size,
        })
    }

    /// Total width of the playfield in world units.
    #[must_use]
    pub const fn width(&self) -> i32 {
        self.width
    }

    /// Total height of the playfield in world units.
    #[must_use]
    pub const fn height(&self) -> i32 {
        self.height
    }

    /// Side length of a single square cell in world units.
    #[must_use]
    pub const fn cell_size(&self) -> i32 {
        self.cell_size
    }

    /// Number of cell columns laid out across the playfield.
    #[must_use]
    pub const fn cells_x(&self) -> i32 {
        self.width / self.cell_size
    }

    /// Number of cell rows laid out down the playfield.
    #[must_use]
    pub const fn cells_y(&self) -> i32 {
        self.height / self.cell_size
    }

    /// Total number of lattice cells on the playfield.
    #[must_use]
    pub const fn cell_count(&self) -> usize {
        (self.cells_x() * self.cells_y()) as usize
    }

    /// Maps an arbitrarily offset point back into grid bounds on both axes.
    #[must_use]
    pub fn wrap(&self, point: GridPoint) -> GridPoint {
        GridPoint::new(
            point.x().rem_euclid(self.width),
            point.y().rem_euclid(self.height),
        )
    }

    /// Advances a lattice point one cell in the given direction, wrapping
    /// toroidally at the playfield edges.
    #[must_use]
    pub fn step(&self, point: GridPoint, direction: Direction) -> GridPoint {
        let (dx, dy) = direction.vector(self.cell_size);
        self.wrap(point.offset_by(dx, dy))
    }

    /// Reports whether the point is an in-bounds lattice point of this grid.
    #[must_use]
    pub fn contains(&self, point: GridPoint) -> bool {
        (0..self.width).contains(&point.x())
            && (0..self.height).contains(&point.y())
            && point.x() % self.cell_size == 0
            && point.y() % self.cell_size == 0
    }

    /// Converts a lattice point into zero-based cell column/row indices.
    #[must_use]
    pub const fn cell_index(&self, point: GridPoint) -> (i32, i32) {
        (point.x() / self.cell_size, point.y() / self.cell_size)
    }

    /// Center of the playfield snapped down onto the lattice.
    #[must_use]
    pub const fn center(&self) -> GridPoint {
        GridPoint::new(
            (self.width / 2 / self.cell_size) * self.cell_size,
            (self.height / 2 / self.cell_size) * self.cell_size,
        )
    }

    /// Enumerates every lattice point of the grid in deterministic x-major
    /// order. Spawning builds its free-position pool from this sequence.
    pub fn all_positions(&self) -> impl Iterator<Item = GridPoint> {
        let cell = self.cell_size;
        let cells_x = self.cells_x();
        let cells_y = self.cells_y();
        (0..cells_x)
            .flat_map(move |cx| (0..cells_y).map(move |cy| GridPoint::new(cx * cell, cy * cell)))
    }
}

/// Errors detected while validating a round configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// The rock target leaves no room for the snake and apple to spawn.
    #[error("rock count {rock_count} too large for a grid of {capacity} cells")]
    RockCountTooLarge {
        /// Rock target supplied by the caller.
        rock_count: usize,
        /// Total number of lattice cells on the grid.
        capacity: usize,
    },
}

/// Configuration fixed at round construction time.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RoundConfig {
    grid: GridSpace,
    rock_count: usize,
    tick_interval: Duration,
}

impl RoundConfig {
    /// Creates a new round configuration, guarding against rock targets that
    /// would leave the spawner without eligible cells.
    pub fn new(
        grid: GridSpace,
        rock_count: usize,
        tick_interval: Duration,
    ) -> Result<Self, ConfigError> {
        let capacity = grid.cell_count();
        if capacity <= rock_count + INITIAL_SNAKE_LENGTH + 1 {
            return Err(ConfigError::RockCountTooLarge {
                rock_count,
                capacity,
            });
        }

        Ok(Self {
            grid,
            rock_count,
            tick_interval,
        })
    }

    /// Playfield lattice the round runs on.
    #[must_use]
    pub const fn grid(&self) -> &GridSpace {
        &self.grid
    }

    /// Number of rocks the round keeps on the grid.
    #[must_use]
    pub const fn rock_count(&self) -> usize {
        self.rock_count
    }

    /// Real-time interval between simulation ticks.
    #[must_use]
    pub const fn tick_interval(&self) -> Duration {
        self.tick_interval
    }
}

impl Default for RoundConfig {
    fn default() -> Self {
        Self {
            grid: GridSpace {
                width: DEFAULT_GRID_WIDTH,
                height: DEFAULT_GRID_HEIGHT,
                cell_size: DEFAULT_CELL_SIZE,
            },
            rock_count: DEFAULT_ROCK_COUNT,
            tick_interval: DEFAULT_TICK_INTERVAL,
        }
    }
}

/// Flat color applied to an entity when it is presented.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct EntityColor {
    red: u8,
    green: u8,
    blue: u8,
}

impl EntityColor {
    /// Creates a new entity color from byte RGB components.
    #[must_use]
    pub const fn from_rgb(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    /// Red component of the color.
    #[must_use]
    pub const fn red(&self) -> u8 {
        self.red
    }

    /// Green component of the color.
    #[must_use]
    pub const fn green(&self) -> u8 {
        self.green
    }

    /// Blue component of the color.
    #[must_use]
    pub const fn blue(&self) -> u8 {
        self.blue
    }
}

/// Canonical flat-color palette shared by presentation adapters.
pub mod palette {
    use super::EntityColor;

    /// Fill color of the snake's body segments.
    pub const SNAKE_BODY: EntityColor = EntityColor::from_rgb(0x00, 0xc8, 0x00);
    /// Fill color of the snake's head segment.
    pub const SNAKE_HEAD: EntityColor = EntityColor::from_rgb(0x1e, 0xe6, 0x1e);
    /// Fill color of rock obstacles.
    pub const ROCK: EntityColor = EntityColor::from_rgb(0x5a, 0x5a, 0x5a);
    /// Fill color of the apple.
    pub const APPLE: EntityColor = EntityColor::from_rgb(0xdc, 0x1e, 0x1e);
    /// Solid background color behind the playfield.
    pub const BACKGROUND: EntityColor = EntityColor::from_rgb(0x12, 0x12, 0x12);
    /// Color of the lattice grid lines.
    pub const GRID_LINE: EntityColor = EntityColor::from_rgb(0x1e, 0x1e, 0x1e);
    /// Color of HUD text overlays.
    pub const HUD_TEXT: EntityColor = EntityColor::from_rgb(0xe1, 0xe1, 0xe1);
}
