//! Render descriptors
//!
//! A [`Frame`] describes everything the renderer must draw for one state of
//! the widget: the grid with per-cell marks, the traced polyline with an
//! optional trailing point under the pointer, and the title. It says nothing
//! about how pixels are produced; see [`Renderer`].

use smallvec::SmallVec;

use crate::color::Color;
use crate::config::LockConfig;
use crate::geometry::{Point, Size};
use crate::grid::Grid;
use crate::lock::LockPhase;

/// How a cell is drawn
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CellMark {
    /// Outline in the normal color
    Outline,
    /// Outline plus a filled dot, in the frame's accent color
    Selected,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CellFrame {
    pub index: usize,
    pub center: Point,
    pub radius: f32,
    pub mark: CellMark,
}

/// Horizontal placement of the title
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TitleAnchor {
    /// Centered on the surface; the renderer measures the text
    Centered,
    /// Left edge at the given x
    Left(f32),
}

#[derive(Clone, Debug, PartialEq)]
pub struct TitleFrame {
    pub text: String,
    pub anchor: TitleAnchor,
    pub baseline_y: f32,
    pub max_width: f32,
    pub font_size: f32,
    pub color: Color,
}

/// Everything needed to draw the widget once
#[derive(Clone, Debug, PartialEq)]
pub struct Frame {
    pub phase: LockPhase,
    pub surface: Size,
    pub cells: Vec<CellFrame>,
    /// Centers of the selected cells, in selection order
    pub trace: SmallVec<[Point; 16]>,
    /// Live pointer position the trace extends to while drawing
    pub live_point: Option<Point>,
    pub title: TitleFrame,
    pub normal_color: Color,
    /// Color of selected cells and connecting lines
    pub accent: Color,
}

impl Frame {
    /// Build the frame for a grid, a (possibly empty) path and a title
    #[allow(clippy::too_many_arguments)]
    pub fn compose(
        phase: LockPhase,
        surface: Size,
        grid: &Grid,
        selected: &[usize],
        live_point: Option<Point>,
        title: &str,
        accent: Color,
        config: &LockConfig,
    ) -> Self {
        let cells = grid
            .cells()
            .iter()
            .map(|cell| CellFrame {
                index: cell.index,
                center: cell.center,
                radius: cell.radius,
                mark: if selected.contains(&cell.index) {
                    CellMark::Selected
                } else {
                    CellMark::Outline
                },
            })
            .collect();

        let trace: SmallVec<[Point; 16]> = selected
            .iter()
            .filter_map(|&index| grid.cell(index).map(|cell| cell.center))
            .collect();

        // A trailing segment needs an anchor cell
        let live_point = if trace.is_empty() { None } else { live_point };

        Self {
            phase,
            surface,
            cells,
            trace,
            live_point,
            title: TitleFrame {
                text: title.to_string(),
                // A zero offset counts as unset
                anchor: match config.text.offset_x {
                    Some(x) if x > 0.0 => TitleAnchor::Left(x),
                    _ => TitleAnchor::Centered,
                },
                baseline_y: config.text.offset_y,
                max_width: config.text.max_width,
                font_size: config.font_size,
                color: config.normal_color,
            },
            normal_color: config.normal_color,
            accent,
        }
    }

    /// Line segments to draw, including the trailing segment to the pointer
    pub fn segments(&self) -> impl Iterator<Item = (Point, Point)> + '_ {
        let joined = self.trace.windows(2).map(|pair| (pair[0], pair[1]));
        let trailing = match (self.trace.last(), self.live_point) {
            (Some(&last), Some(live)) => Some((last, live)),
            _ => None,
        };
        joined.chain(trailing)
    }

    pub fn selected_count(&self) -> usize {
        self.trace.len()
    }
}

/// Consumer of frames; performs the actual drawing
///
/// Drawing the same frame twice must produce the same output.
pub trait Renderer {
    fn draw_frame(&mut self, frame: &Frame);
}

impl<F> Renderer for F
where
    F: FnMut(&Frame),
{
    fn draw_frame(&mut self, frame: &Frame) {
        self(frame)
    }
}
