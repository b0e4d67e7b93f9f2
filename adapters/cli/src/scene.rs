//! Builds presentation scenes from world snapshots.

use snake_arcade_core::{palette, EntityColor, GridPoint, GridSpace, RoundEndCause};
use snake_arcade_rendering::{
    Color, GridPresentation, HudPresentation, RoundEndOverlay, Scene, SceneCell,
};
use snake_arcade_world::query::RoundSnapshot;

/// Translates a round snapshot into a drawable scene.
///
/// Cells are emitted rocks first, then the apple, then the snake, so the
/// snake is drawn on top whenever the playfield is saturated enough for
/// entities to share a cell.
pub(crate) fn populate(
    view: &RoundSnapshot,
    grid: &GridSpace,
    overlay: Option<RoundEndOverlay>,
) -> Scene {
    let grid_presentation =
        GridPresentation::from_grid(grid, Color::from_entity(palette::GRID_LINE));

    let mut cells = Vec::with_capacity(view.rocks().len() + view.segments().len() + 1);
    for rock in view.rocks() {
        cells.push(cell_at(grid, *rock, palette::ROCK));
    }
    cells.push(cell_at(grid, view.apple(), palette::APPLE));
    for (index, segment) in view.segments().iter().enumerate() {
        let color = if index == 0 {
            palette::SNAKE_HEAD
        } else {
            palette::SNAKE_BODY
        };
        cells.push(cell_at(grid, *segment, color));
    }

    let hud = HudPresentation::new(
        view.score(),
        view.length(),
        Color::from_entity(palette::HUD_TEXT),
    );
    Scene::new(grid_presentation, cells, hud, overlay)
}

/// Builds the banner shown while ticks are paused after a round ends.
pub(crate) fn round_end_overlay(cause: RoundEndCause, final_score: u32) -> RoundEndOverlay {
    let detail = match cause {
        RoundEndCause::SelfCollision => format!("the snake bit itself, score {final_score}"),
        RoundEndCause::SnakeDestroyed => format!("the rocks won, score {final_score}"),
    };
    RoundEndOverlay::new(
        "GAME OVER",
        detail,
        Color::new(0.0, 0.0, 0.0, 0.55),
        Color::from_entity(palette::HUD_TEXT),
    )
}

fn cell_at(grid: &GridSpace, position: GridPoint, color: EntityColor) -> SceneCell {
    let (column, row) = grid.cell_index(position);
    SceneCell::new(column as u32, row as u32, Color::from_entity(color))
}
