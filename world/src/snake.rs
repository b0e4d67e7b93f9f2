//! Snake body state: ordered segments, buffered direction, deferred growth.

use std::collections::VecDeque;

use snake_arcade_core::{Direction, GridPoint, GridSpace};

/// Ordered head-first segment sequence with its movement state.
#[derive(Clone, Debug)]
pub(crate) struct Snake {
    segments: VecDeque<GridPoint>,
    direction: Direction,
    buffered: Option<Direction>,
    pending_growth: u32,
}

impl Snake {
    /// Creates a snake with a single head segment heading in `direction`.
    pub(crate) fn new(head: GridPoint, direction: Direction) -> Self {
        let mut segments = VecDeque::new();
        segments.push_back(head);
        Self {
            segments,
            direction,
            buffered: None,
            pending_growth: 0,
        }
    }

    /// Buffers a new travel direction for the next movement step.
    ///
    /// The exact reverse of the currently applied direction is silently
    /// ignored so the head can never fold back into the second segment.
    /// Repeated calls between ticks overwrite the buffer (last write wins).
    pub(crate) fn set_direction(&mut self, direction: Direction) {
        if self.segments.is_empty() {
            return;
        }
        if direction == self.direction.opposite() {
            return;
        }
        self.buffered = Some(direction);
    }

    /// Applies the buffered direction and advances the head one cell,
    /// wrapping at the grid edges. Pending growth retains the tail for one
    /// step instead of dropping it. Returns the head's `(from, to)` movement,
    /// or `None` when the snake is already destroyed.
    pub(crate) fn advance(&mut self, grid: &GridSpace) -> Option<(GridPoint, GridPoint)> {
        let from = *self.segments.front()?;
        if let Some(next) = self.buffered.take() {
            self.direction = next;
        }

        let to = grid.step(from, self.direction);
        self.segments.push_front(to);
        if self.pending_growth > 0 {
            self.pending_growth -= 1;
        } else {
            let _ = self.segments.pop_back();
        }

        Some((from, to))
    }

    /// Defers a length increase to the next movement step.
    pub(crate) fn grow(&mut self) {
        self.pending_growth += 1;
    }

    /// Drops the tail segment immediately, leaving pending growth untouched.
    pub(crate) fn shorten(&mut self) {
        let _ = self.segments.pop_back();
    }

    /// Reports whether the head re-entered the remainder of the body.
    pub(crate) fn collides_with_self(&self) -> bool {
        let Some(head) = self.segments.front() else {
            return false;
        };
        self.segments.iter().skip(1).any(|segment| segment == head)
    }

    /// Current head position, if the snake still exists.
    pub(crate) fn head(&self) -> Option<GridPoint> {
        self.segments.front().copied()
    }

    /// Number of segments currently composing the body.
    pub(crate) fn len(&self) -> usize {
        self.segments.len()
    }

    /// Reports whether rock penalties erased the snake entirely.
    pub(crate) fn is_destroyed(&self) -> bool {
        self.segments.is_empty()
    }

    /// Iterates the body segments head first.
    pub(crate) fn segments(&self) -> impl Iterator<Item = GridPoint> + '_ {
        self.segments.iter().copied()
    }
}
