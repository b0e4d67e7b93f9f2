#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Macroquad-backed rendering adapter for Snake Arcade.
//!
//! Macroquad's optional audio stack depends on native ALSA development
//! libraries, which are unavailable in the containerised CI environment.
//! To keep `cargo test` usable everywhere we depend on macroquad without its
//! default `audio` feature. Consumers that need sound playback can opt back
//! in by enabling `macroquad/audio` in their own `Cargo.toml` dependency
//! specification.

use std::{collections::VecDeque, time::Duration};

use anyhow::Result;
use macroquad::input::{is_key_pressed, KeyCode};
use snake_arcade_core::Direction;
use snake_arcade_rendering::{
    FrameInput, GridPresentation, HudPresentation, Presentation, RenderingBackend,
    RoundEndOverlay, Scene, SceneCell,
};

/// Snapshot of edge-triggered keyboard input observed during a single frame.
#[derive(Clone, Copy, Debug, Default)]
struct KeyboardShortcuts {
    /// `Q` or `Escape` to quit the game loop.
    quit_requested: bool,
    /// Most recent direction key pressed this frame, if any.
    direction: Option<Direction>,
}

impl KeyboardShortcuts {
    fn poll() -> Self {
        let quit_requested = is_key_pressed(KeyCode::Escape) || is_key_pressed(KeyCode::Q);
        let direction = direction_from_keys(
            is_key_pressed(KeyCode::Up) || is_key_pressed(KeyCode::W),
            is_key_pressed(KeyCode::Down) || is_key_pressed(KeyCode::S),
            is_key_pressed(KeyCode::Left) || is_key_pressed(KeyCode::A),
            is_key_pressed(KeyCode::Right) || is_key_pressed(KeyCode::D),
        );

        Self {
            quit_requested,
            direction,
        }
    }
}

/// Resolves the pressed direction keys into at most one travel direction.
///
/// Opposing keys pressed on the same frame cancel out; the vertical axis is
/// consulted before the horizontal one so diagonal presses stay stable.
fn direction_from_keys(up: bool, down: bool, left: bool, right: bool) -> Option<Direction> {
    match (up, down) {
        (true, false) => return Some(Direction::Up),
        (false, true) => return Some(Direction::Down),
        _ => {}
    }
    match (left, right) {
        (true, false) => Some(Direction::Left),
        (false, true) => Some(Direction::Right),
        _ => None,
    }
}

/// Rendering backend implemented on top of macroquad.
#[derive(Debug, Default)]
pub struct MacroquadBackend {
    swap_interval: Option<i32>,
    show_fps: bool,
}

impl MacroquadBackend {
    /// Returns a backend that requests the platform's default swap interval.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Configures the backend to request a specific swap interval from the platform.
    #[must_use]
    pub fn with_swap_interval(mut self, swap_interval: Option<i32>) -> Self {
        self.swap_interval = swap_interval;
        self
    }

    /// Configures the backend to either synchronise presentation with the display refresh rate
    /// or render as fast as possible.
    #[must_use]
    pub fn with_vsync(self, enabled: bool) -> Self {
        let swap_interval = if enabled { Some(1) } else { Some(0) };
        self.with_swap_interval(swap_interval)
    }

    /// Configures whether the backend prints frame timing metrics once per second.
    #[must_use]
    pub fn with_show_fps(mut self, show: bool) -> Self {
        self.show_fps = show;
        self
    }
}

/// Tracks the average frames-per-second produced by the render loop.
#[derive(Debug, Default)]
struct FpsCounter {
    elapsed: Duration,
    frames: u32,
    frame_times: VecDeque<Duration>,
    window_duration: Duration,
}

#[derive(Clone, Copy, Debug)]
struct FpsMetrics {
    per_second: f32,
    trailing_ten_seconds: f32,
}

impl FpsCounter {
    /// Records a rendered frame and returns the per-second and trailing
    /// ten-second averages once one second has elapsed.
    fn record_frame(&mut self, frame: Duration) -> Option<FpsMetrics> {
        self.elapsed += frame;
        self.frames = self.frames.saturating_add(1);
        self.frame_times.push_back(frame);
        self.window_duration += frame;

        let trailing_window = Duration::from_secs(10);
        while self.window_duration > trailing_window {
            if let Some(removed) = self.frame_times.pop_front() {
                self.window_duration = self.window_duration.saturating_sub(removed);
            } else {
                break;
            }
        }

        if self.elapsed < Duration::from_secs(1) {
            return None;
        }

        let seconds = self.elapsed.as_secs_f32();
        if seconds <= f32::EPSILON {
            self.elapsed = Duration::ZERO;
            self.frames = 0;
            return None;
        }

        let per_second = self.frames as f32 / seconds;
        let window_seconds = self.window_duration.as_secs_f32();
        let trailing_ten_seconds = if window_seconds <= f32::EPSILON {
            per_second
        } else {
            self.frame_times.len() as f32 / window_seconds
        };
        self.elapsed = Duration::ZERO;
        self.frames = 0;
        Some(FpsMetrics {
            per_second,
            trailing_ten_seconds,
        })
    }
}

impl RenderingBackend for MacroquadBackend {
    fn run<F>(self, presentation: Presentation, mut update_scene: F) -> Result<()>
    where
        F: FnMut(Duration, FrameInput, &mut Scene) + 'static,
    {
        let Self {
            swap_interval,
            show_fps,
        } = self;

        let Presentation {
            window_title,
            clear_color,
            scene,
        } = presentation;

        let mut config = macroquad::window::Conf {
            window_title,
            window_width: scene.grid.width() as i32,
            window_height: scene.grid.height() as i32,
            ..macroquad::window::Conf::default()
        };
        if let Some(swap_interval) = swap_interval {
            config.platform.swap_interval = Some(swap_interval);
        }

        macroquad::Window::from_config(config, async move {
            let mut scene = scene;
            let background = to_macroquad_color(clear_color);
            let mut fps_counter = FpsCounter::default();

            loop {
                let keyboard = KeyboardShortcuts::poll();

                macroquad::window::clear_background(background);

                let screen_width = macroquad::window::screen_width();
                let screen_height = macroquad::window::screen_height();

                let dt_seconds = macroquad::time::get_frame_time();
                let frame_dt = Duration::from_secs_f32(dt_seconds.max(0.0));
                let frame_input = FrameInput {
                    direction: keyboard.direction,
                    quit: keyboard.quit_requested,
                };

                update_scene(frame_dt, frame_input, &mut scene);

                let metrics = SceneMetrics::from_scene(&scene, screen_width, screen_height);

                draw_grid_lines(&metrics, &scene.grid);
                draw_cells(&scene.cells, &metrics);
                draw_hud(&scene.hud, &metrics);
                if let Some(overlay) = &scene.overlay {
                    draw_overlay(overlay, &metrics, &scene.grid);
                }

                if let Some(FpsMetrics {
                    per_second,
                    trailing_ten_seconds,
                }) = fps_counter.record_frame(frame_dt)
                {
                    if show_fps {
                        println!("FPS: {per_second:.2} (10s avg: {trailing_ten_seconds:.2})");
                    }
                }

                if keyboard.quit_requested {
                    break;
                }

                macroquad::window::next_frame().await;
            }
        });

        Ok(())
    }
}

/// Scaling and placement of the playfield within the current window.
#[derive(Clone, Copy, Debug)]
struct SceneMetrics {
    scale: f32,
    offset_x: f32,
    offset_y: f32,
    cell_step: f32,
}

impl SceneMetrics {
    fn from_scene(scene: &Scene, screen_width: f32, screen_height: f32) -> Self {
        let grid = scene.grid;
        let world_width = grid.width();
        let world_height = grid.height();
        let scale = if world_width <= f32::EPSILON || world_height <= f32::EPSILON {
            1.0
        } else {
            (screen_width / world_width).min(screen_height / world_height)
        };

        let offset_x = (screen_width - world_width * scale) * 0.5;
        let offset_y = (screen_height - world_height * scale) * 0.5;

        Self {
            scale,
            offset_x,
            offset_y,
            cell_step: grid.cell_length * scale,
        }
    }
}

fn draw_grid_lines(metrics: &SceneMetrics, grid: &GridPresentation) {
    if metrics.cell_step <= f32::EPSILON {
        return;
    }

    let line_color = to_macroquad_color(grid.line_color);
    let width_scaled = grid.width() * metrics.scale;
    let height_scaled = grid.height() * metrics.scale;

    for column in 0..=grid.columns {
        let x = metrics.offset_x + column as f32 * metrics.cell_step;
        macroquad::shapes::draw_line(
            x,
            metrics.offset_y,
            x,
            metrics.offset_y + height_scaled,
            1.0,
            line_color,
        );
    }

    for row in 0..=grid.rows {
        let y = metrics.offset_y + row as f32 * metrics.cell_step;
        macroquad::shapes::draw_line(
            metrics.offset_x,
            y,
            metrics.offset_x + width_scaled,
            y,
            1.0,
            line_color,
        );
    }
}

fn draw_cells(cells: &[SceneCell], metrics: &SceneMetrics) {
    if metrics.cell_step <= f32::EPSILON {
        return;
    }

    for cell in cells {
        let x = metrics.offset_x + cell.column as f32 * metrics.cell_step;
        let y = metrics.offset_y + cell.row as f32 * metrics.cell_step;
        macroquad::shapes::draw_rectangle(
            x,
            y,
            metrics.cell_step,
            metrics.cell_step,
            to_macroquad_color(cell.color),
        );
    }
}

fn draw_hud(hud: &HudPresentation, metrics: &SceneMetrics) {
    let font_size = (metrics.cell_step * 1.2).max(16.0);
    let text = format!("score: {}  length: {}", hud.score, hud.length);
    macroquad::text::draw_text(
        &text,
        metrics.offset_x + metrics.cell_step * 0.25,
        metrics.offset_y + font_size,
        font_size,
        to_macroquad_color(hud.text_color),
    );
}

fn draw_overlay(overlay: &RoundEndOverlay, metrics: &SceneMetrics, grid: &GridPresentation) {
    let width = grid.width() * metrics.scale;
    let height = grid.height() * metrics.scale;
    macroquad::shapes::draw_rectangle(
        metrics.offset_x,
        metrics.offset_y,
        width,
        height,
        to_macroquad_color(overlay.backdrop),
    );

    let text_color = to_macroquad_color(overlay.text_color);
    let headline_size = (metrics.cell_step * 2.5).max(32.0);
    let detail_size = (metrics.cell_step * 1.2).max(16.0);

    let headline_dims =
        macroquad::text::measure_text(&overlay.headline, None, headline_size as u16, 1.0);
    macroquad::text::draw_text(
        &overlay.headline,
        metrics.offset_x + (width - headline_dims.width) * 0.5,
        metrics.offset_y + height * 0.45,
        headline_size,
        text_color,
    );

    let detail_dims =
        macroquad::text::measure_text(&overlay.detail, None, detail_size as u16, 1.0);
    macroquad::text::draw_text(
        &overlay.detail,
        metrics.offset_x + (width - detail_dims.width) * 0.5,
        metrics.offset_y + height * 0.45 + headline_size,
        detail_size,
        text_color,
    );
}

fn to_macroquad_color(color: snake_arcade_rendering::Color) -> macroquad::color::Color {
    macroquad::color::Color::new(color.red, color.green, color.blue, color.alpha)
}
