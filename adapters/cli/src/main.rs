#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that boots the Snake Arcade experience.

mod scene;

use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use snake_arcade_core::{
    palette, Command, Event, GridSpace, RoundConfig, RoundEndCause, DEFAULT_CELL_SIZE,
    DEFAULT_GRID_HEIGHT, DEFAULT_GRID_WIDTH, DEFAULT_ROCK_COUNT,
};
use snake_arcade_rendering::{
    Color, Presentation, RenderingBackend, RoundEndOverlay, TickTimer,
};
use snake_arcade_rendering_macroquad::MacroquadBackend;
use snake_arcade_world::{apply, query, World, DEFAULT_SPAWN_SEED};

/// Command-line options accepted by the Snake Arcade binary.
#[derive(Debug, Parser)]
#[command(name = "snake-arcade", about = "Grid-based snake arcade")]
struct Args {
    /// Playfield width in world units; must be a multiple of the cell size.
    #[arg(long, default_value_t = DEFAULT_GRID_WIDTH)]
    width: i32,

    /// Playfield height in world units; must be a multiple of the cell size.
    #[arg(long, default_value_t = DEFAULT_GRID_HEIGHT)]
    height: i32,

    /// Side length of a single square cell in world units.
    #[arg(long, default_value_t = DEFAULT_CELL_SIZE)]
    cell_size: i32,

    /// Number of rock obstacles maintained on the grid.
    #[arg(long, default_value_t = DEFAULT_ROCK_COUNT)]
    rocks: usize,

    /// Real-time milliseconds between simulation ticks.
    #[arg(long, default_value_t = 120)]
    tick_ms: u64,

    /// Seed for deterministic apple and rock placement.
    #[arg(long)]
    seed: Option<u64>,

    /// Renders as fast as possible instead of syncing to the display.
    #[arg(long)]
    no_vsync: bool,

    /// Prints frame timing metrics once per second.
    #[arg(long)]
    show_fps: bool,
}

/// Suppresses simulation ticks for a short spell after a round ends,
/// keeping the game-over banner readable before the next round moves.
#[derive(Clone, Debug, Default)]
struct RoundPause {
    remaining: Duration,
    overlay: Option<RoundEndOverlay>,
}

impl RoundPause {
    const DURATION: Duration = Duration::from_millis(1200);

    fn trigger(&mut self, cause: RoundEndCause, final_score: u32) {
        self.remaining = Self::DURATION;
        self.overlay = Some(scene::round_end_overlay(cause, final_score));
    }

    /// Burns `frame_dt` off the pause. Returns whether ticks stay suppressed
    /// for this frame; the banner is dropped once the pause runs out.
    fn advance(&mut self, frame_dt: Duration) -> bool {
        if self.remaining.is_zero() {
            return false;
        }
        self.remaining = self.remaining.saturating_sub(frame_dt);
        if self.remaining.is_zero() {
            self.overlay = None;
        }
        true
    }

    fn overlay(&self) -> Option<&RoundEndOverlay> {
        self.overlay.as_ref()
    }
}

/// Entry point for the Snake Arcade command-line interface.
fn main() -> Result<()> {
    let args = Args::parse();

    let grid = GridSpace::new(args.width, args.height, args.cell_size)
        .context("invalid playfield geometry")?;
    let config = RoundConfig::new(grid, args.rocks, Duration::from_millis(args.tick_ms))
        .context("invalid round configuration")?;
    let seed = args.seed.unwrap_or(DEFAULT_SPAWN_SEED);

    let mut world = World::with_config(config, seed);
    let mut timer =
        TickTimer::new(config.tick_interval()).context("invalid tick interval")?;
    let mut pause = RoundPause::default();

    let presentation = Presentation::new(
        "Snake Arcade",
        Color::from_entity(palette::BACKGROUND),
        scene::populate(&query::round_view(&world), config.grid(), None),
    );

    let backend = MacroquadBackend::new()
        .with_vsync(!args.no_vsync)
        .with_show_fps(args.show_fps);

    let mut events = Vec::new();
    backend.run(presentation, move |frame_dt, input, scene| {
        events.clear();
        if let Some(direction) = input.direction {
            apply(&mut world, Command::SetDirection { direction }, &mut events);
        }
        if input.quit {
            apply(&mut world, Command::Quit, &mut events);
        }

        if pause.advance(frame_dt) {
            timer.reset();
        } else {
            for _ in 0..timer.advance(frame_dt) {
                apply(&mut world, Command::Tick, &mut events);
            }
        }

        for event in &events {
            if let Event::RoundEnded { cause, final_score } = event {
                println!("round over ({cause:?}) with a score of {final_score}");
                pause.trigger(*cause, *final_score);
            }
        }

        *scene = scene::populate(
            &query::round_view(&world),
            config.grid(),
            pause.overlay().cloned(),
        );
    })
}
