//! Bounded collection of rock obstacles.

use snake_arcade_core::GridPoint;

/// Rock positions capped at the configured target count.
///
/// Insertion appends first and then trims back down to the target, so the
/// newest excess entries are the ones discarded and the collection can never
/// exceed its bound even transiently across callers.
#[derive(Clone, Debug)]
pub(crate) struct RockField {
    positions: Vec<GridPoint>,
    target: usize,
}

impl RockField {
    /// Creates an empty field with the given target count.
    pub(crate) fn new(target: usize) -> Self {
        Self {
            positions: Vec::with_capacity(target),
            target,
        }
    }

    /// Number of rocks the field tops itself up to.
    pub(crate) fn target(&self) -> usize {
        self.target
    }

    /// Number of rocks currently on the grid.
    pub(crate) fn len(&self) -> usize {
        self.positions.len()
    }

    /// Appends a rock, then trims any excess beyond the target.
    pub(crate) fn insert(&mut self, position: GridPoint) {
        self.positions.push(position);
        self.positions.truncate(self.target);
    }

    /// Removes the rock at `position`. Returns whether one was present.
    pub(crate) fn remove(&mut self, position: GridPoint) -> bool {
        match self.positions.iter().position(|rock| *rock == position) {
            Some(index) => {
                let _ = self.positions.remove(index);
                true
            }
            None => false,
        }
    }

    /// All rock positions in insertion order.
    pub(crate) fn positions(&self) -> &[GridPoint] {
        &self.positions
    }
}
