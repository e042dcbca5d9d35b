//! Hit testing
//!
//! Decides which unselected cells lie under the pointer. The default
//! acceptance region is the axis-aligned square `|dx| < r && |dy| < r`
//! around each center, which is larger than the drawn circle near the
//! corners. [`HitShape::Circle`] narrows it to the circle itself.

use smallvec::SmallVec;

use crate::config::HitShape;
use crate::geometry::Point;
use crate::grid::{Cell, Grid};

/// Cell indices hit by a single pointer sample, in grid order
pub type Hits = SmallVec<[usize; 4]>;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HitTester {
    shape: HitShape,
}

impl HitTester {
    pub fn new(shape: HitShape) -> Self {
        Self { shape }
    }

    pub fn shape(&self) -> HitShape {
        self.shape
    }

    /// Whether `position` falls inside the capture region of `cell`
    pub fn contains(&self, cell: &Cell, position: Point) -> bool {
        let dx = position.x - cell.center.x;
        let dy = position.y - cell.center.y;
        match self.shape {
            HitShape::Square => dx.abs() < cell.radius && dy.abs() < cell.radius,
            HitShape::Circle => dx * dx + dy * dy < cell.radius * cell.radius,
        }
    }

    /// All cells under `position` that are not in `selected`, in grid order
    ///
    /// A fast swipe may cross more than one new cell between two samples;
    /// every one of them is reported so they can be appended in one pass.
    pub fn hits(&self, position: Point, grid: &Grid, selected: &[usize]) -> Hits {
        grid.cells()
            .iter()
            .filter(|cell| !selected.contains(&cell.index) && self.contains(cell, position))
            .map(|cell| cell.index)
            .collect()
    }

    /// First unselected cell under `position`, if any
    pub fn test(&self, position: Point, grid: &Grid, selected: &[usize]) -> Option<usize> {
        grid.cells()
            .iter()
            .find(|cell| !selected.contains(&cell.index) && self.contains(cell, position))
            .map(|cell| cell.index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Size;

    fn grid() -> Grid {
        // radius 20, centers at 60/140/220 on both axes
        Grid::compute(Size::new(280.0, 400.0), 3, 0.0).unwrap()
    }

    #[test]
    fn test_center_is_a_hit() {
        let grid = grid();
        let tester = HitTester::default();
        for cell in grid.cells() {
            assert_eq!(tester.test(cell.center, &grid, &[]), Some(cell.index));
        }
    }

    #[test]
    fn test_selected_cells_are_skipped() {
        let grid = grid();
        let tester = HitTester::default();
        assert_eq!(tester.test(Point::new(140.0, 140.0), &grid, &[4]), None);
        assert!(tester.hits(Point::new(140.0, 140.0), &grid, &[0, 4]).is_empty());
    }

    #[test]
    fn test_radius_boundary_is_exclusive() {
        let grid = grid();
        let tester = HitTester::default();
        assert_eq!(tester.test(Point::new(80.0, 60.0), &grid, &[]), None);
        assert_eq!(tester.test(Point::new(60.0, 40.0), &grid, &[]), None);
        assert_eq!(tester.test(Point::new(79.9, 60.0), &grid, &[]), Some(0));
    }

    #[test]
    fn test_gap_between_cells_hits_nothing() {
        let grid = grid();
        let tester = HitTester::default();
        assert_eq!(tester.test(Point::new(100.0, 100.0), &grid, &[]), None);
        assert_eq!(tester.test(Point::new(10.0, 10.0), &grid, &[]), None);
    }

    #[test]
    fn test_square_accepts_corners_circle_does_not() {
        let grid = grid();
        let corner = Point::new(60.0 + 18.0, 60.0 + 18.0);
        assert_eq!(HitTester::new(HitShape::Square).test(corner, &grid, &[]), Some(0));
        assert_eq!(HitTester::new(HitShape::Circle).test(corner, &grid, &[]), None);
    }

    #[test]
    fn test_hits_matches_single_test() {
        let grid = grid();
        let tester = HitTester::default();
        let hits = tester.hits(Point::new(225.0, 130.0), &grid, &[0]);
        assert_eq!(hits.as_slice(), &[5]);
        assert_eq!(tester.test(Point::new(225.0, 130.0), &grid, &[0]), Some(5));
    }
}
