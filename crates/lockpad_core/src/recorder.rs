//! Path recorder
//!
//! Accumulates the ordered, duplicate-free sequence of cells selected during
//! one gesture, plus the last pointer sample for the live trailing segment.

use smallvec::SmallVec;

use crate::geometry::Point;
use crate::grid::Grid;

/// Ordered cell indices of one attempt
pub type Attempt = SmallVec<[usize; 16]>;

#[derive(Clone, Debug, Default)]
pub struct PathRecorder {
    indices: Attempt,
    pointer: Option<Point>,
}

impl PathRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `index` unless it is already part of the path.
    /// Returns `true` if the path grew.
    pub fn append(&mut self, index: usize) -> bool {
        if self.indices.contains(&index) {
            return false;
        }
        self.indices.push(index);
        true
    }

    /// The selected indices, oldest first
    pub fn current(&self) -> &[usize] {
        &self.indices
    }

    pub fn contains(&self, index: usize) -> bool {
        self.indices.contains(&index)
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Record the latest pointer sample
    pub fn set_pointer(&mut self, position: Point) {
        self.pointer = Some(position);
    }

    pub fn pointer(&self) -> Option<Point> {
        self.pointer
    }

    /// Center of the most recently selected cell
    pub fn last_selected_cell(&self, grid: &Grid) -> Option<Point> {
        let index = *self.indices.last()?;
        grid.cell(index).map(|cell| cell.center)
    }

    /// Clear the path and the pointer sample
    pub fn reset(&mut self) {
        self.indices.clear();
        self.pointer = None;
    }

    /// Hand the finished path over, leaving the recorder empty
    pub fn take(&mut self) -> Attempt {
        self.pointer = None;
        std::mem::take(&mut self.indices)
    }
}
