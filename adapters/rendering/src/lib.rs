#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared rendering contracts for Snake Arcade adapters.

use std::time::Duration;

use anyhow::Result as AnyResult;
use snake_arcade_core::{Direction, EntityColor, GridSpace};
use thiserror::Error;

/// RGBA color used when presenting frames.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    /// Red channel intensity in the range 0.0..=1.0.
    pub red: f32,
    /// Green channel intensity in the range 0.0..=1.0.
    pub green: f32,
    /// Blue channel intensity in the range 0.0..=1.0.
    pub blue: f32,
    /// Alpha channel intensity in the range 0.0..=1.0.
    pub alpha: f32,
}

impl Color {
    /// Creates a new color from floating point channels.
    #[must_use]
    pub const fn new(red: f32, green: f32, blue: f32, alpha: f32) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    /// Creates an opaque color from byte RGB values.
    #[must_use]
    pub const fn from_rgb_u8(red: u8, green: u8, blue: u8) -> Self {
        Self {
            red: red as f32 / 255.0,
            green: green as f32 / 255.0,
            blue: blue as f32 / 255.0,
            alpha: 1.0,
        }
    }

    /// Converts one of the engine's palette entries into a backend color.
    #[must_use]
    pub const fn from_entity(color: EntityColor) -> Self {
        Self::from_rgb_u8(color.red(), color.green(), color.blue())
    }
}

/// Input snapshot gathered by adapters before updating the scene.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct FrameInput {
    /// Direction requested by the player on this frame, if any.
    pub direction: Option<Direction>,
    /// Whether the adapter detected a quit request on this frame.
    pub quit: bool,
}

/// Describes the square cell lattice that can be rendered by adapters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridPresentation {
    /// Number of cell columns contained in the playfield.
    pub columns: u32,
    /// Number of cell rows contained in the playfield.
    pub rows: u32,
    /// Side length of a single cell expressed in world units.
    pub cell_length: f32,
    /// Color used when drawing grid lines.
    pub line_color: Color,
}

impl GridPresentation {
    /// Creates a new grid descriptor.
    ///
    /// Returns an error when either dimension is zero or the cell length
    /// is not positive.
    pub fn new(
        columns: u32,
        rows: u32,
        cell_length: f32,
        line_color: Color,
    ) -> Result<Self, RenderingError> {
        if columns == 0 || rows == 0 {
            return Err(RenderingError::EmptyGrid { columns, rows });
        }
        if cell_length <= f32::EPSILON {
            return Err(RenderingError::InvalidCellLength { cell_length });
        }

        Ok(Self {
            columns,
            rows,
            cell_length,
            line_color,
        })
    }

    /// Derives a grid descriptor from validated engine geometry.
    #[must_use]
    pub fn from_grid(grid: &GridSpace, line_color: Color) -> Self {
        Self {
            columns: grid.cells_x() as u32,
            rows: grid.cells_y() as u32,
            cell_length: grid.cell_size() as f32,
            line_color,
        }
    }

    /// Calculates the total width of the playfield.
    #[must_use]
    pub const fn width(&self) -> f32 {
        self.columns as f32 * self.cell_length
    }

    /// Calculates the total height of the playfield.
    #[must_use]
    pub const fn height(&self) -> f32 {
        self.rows as f32 * self.cell_length
    }
}

/// Single filled cell to be drawn onto the playfield.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SceneCell {
    /// Zero-based column index of the cell.
    pub column: u32,
    /// Zero-based row index of the cell.
    pub row: u32,
    /// Fill color of the cell.
    pub color: Color,
}

impl SceneCell {
    /// Creates a new scene cell descriptor.
    #[must_use]
    pub const fn new(column: u32, row: u32, color: Color) -> Self {
        Self { column, row, color }
    }
}

/// Score and length readout drawn above the playfield.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HudPresentation {
    /// Apples eaten since the round started.
    pub score: u32,
    /// Number of segments composing the snake.
    pub length: usize,
    /// Color used when drawing the readout text.
    pub text_color: Color,
}

impl HudPresentation {
    /// Creates a new HUD descriptor.
    #[must_use]
    pub const fn new(score: u32, length: usize, text_color: Color) -> Self {
        Self {
            score,
            length,
            text_color,
        }
    }
}

/// Dimmed banner drawn over the playfield after a round ends.
#[derive(Clone, Debug, PartialEq)]
pub struct RoundEndOverlay {
    /// Large centered line, typically "GAME OVER".
    pub headline: String,
    /// Smaller line naming the cause and the final score.
    pub detail: String,
    /// Translucent color drawn over the whole playfield behind the text.
    pub backdrop: Color,
    /// Color used when drawing both text lines.
    pub text_color: Color,
}

impl RoundEndOverlay {
    /// Creates a new overlay descriptor.
    #[must_use]
    pub fn new<H, D>(headline: H, detail: D, backdrop: Color, text_color: Color) -> Self
    where
        H: Into<String>,
        D: Into<String>,
    {
        Self {
            headline: headline.into(),
            detail: detail.into(),
            backdrop,
            text_color,
        }
    }
}

/// Scene description combining the lattice, its occupants and the HUD.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    /// Cell lattice that composes the play area.
    pub grid: GridPresentation,
    /// Filled cells currently visible, drawn in order.
    pub cells: Vec<SceneCell>,
    /// Score readout drawn over the playfield.
    pub hud: HudPresentation,
    /// End-of-round banner, if one is currently displayed.
    pub overlay: Option<RoundEndOverlay>,
}

impl Scene {
    /// Creates a new scene descriptor.
    #[must_use]
    pub fn new(
        grid: GridPresentation,
        cells: Vec<SceneCell>,
        hud: HudPresentation,
        overlay: Option<RoundEndOverlay>,
    ) -> Self {
        Self {
            grid,
            cells,
            hud,
            overlay,
        }
    }
}

/// Presentation descriptor consumed by rendering backends.
#[derive(Clone, Debug, PartialEq)]
pub struct Presentation {
    /// Title used by the created window.
    pub window_title: String,
    /// Solid color used to clear each frame.
    pub clear_color: Color,
    /// Scene content that should be displayed.
    pub scene: Scene,
}

impl Presentation {
    /// Constructs a new presentation descriptor.
    #[must_use]
    pub fn new<T>(window_title: T, clear_color: Color, scene: Scene) -> Self
    where
        T: Into<String>,
    {
        Self {
            window_title: window_title.into(),
            clear_color,
            scene,
        }
    }
}

/// Fixed-cadence accumulator that converts frame deltas into whole ticks.
///
/// Rendering runs at whatever rate the backend delivers frames; the timer
/// banks the elapsed real time and releases one tick per full interval so
/// the simulation cadence stays independent of the frame rate.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TickTimer {
    interval: Duration,
    accumulated: Duration,
}

impl TickTimer {
    /// Creates a timer that releases one tick per `interval` of real time.
    ///
    /// Returns an error when the interval is zero, which would release
    /// unbounded ticks on every frame.
    pub fn new(interval: Duration) -> Result<Self, RenderingError> {
        if interval.is_zero() {
            return Err(RenderingError::ZeroTickInterval);
        }

        Ok(Self {
            interval,
            accumulated: Duration::ZERO,
        })
    }

    /// Interval between released ticks.
    #[must_use]
    pub const fn interval(&self) -> Duration {
        self.interval
    }

    /// Drops any banked time so the next tick is a full interval away.
    pub fn reset(&mut self) {
        self.accumulated = Duration::ZERO;
    }

    /// Banks `elapsed` real time and returns the number of ticks now due.
    pub fn advance(&mut self, elapsed: Duration) -> u32 {
        self.accumulated += elapsed;
        let mut ticks = 0;
        while self.accumulated >= self.interval {
            self.accumulated -= self.interval;
            ticks += 1;
        }
        ticks
    }
}

/// Rendering backend capable of presenting Snake Arcade scenes.
pub trait RenderingBackend {
    /// Runs the rendering backend until it is requested to exit.
    ///
    /// The provided `update_scene` closure receives the simulated frame
    /// delta and per-frame input captured by the adapter, and may mutate
    /// the scene before it is rendered, allowing adapters to animate world
    /// snapshots deterministically.
    fn run<F>(self, presentation: Presentation, update_scene: F) -> AnyResult<()>
    where
        F: FnMut(Duration, FrameInput, &mut Scene) + 'static;
}

/// Errors that can occur when constructing rendering descriptors.
#[derive(Clone, Copy, Debug, PartialEq, Error)]
pub enum RenderingError {
    /// Both lattice dimensions must be positive to present anything.
    #[error("grid must have positive dimensions (received {columns}x{rows})")]
    EmptyGrid {
        /// Provided column count that failed validation.
        columns: u32,
        /// Provided row count that failed validation.
        rows: u32,
    },
    /// Cell length must be positive to avoid zero-sized cells.
    #[error("cell length must be positive (received {cell_length})")]
    InvalidCellLength {
        /// Provided cell length that failed validation.
        cell_length: f32,
    },
    /// A zero tick interval would release unbounded ticks per frame.
    #[error("tick interval must be non-zero")]
    ZeroTickInterval,
}
