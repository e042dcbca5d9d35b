//! Grid layout
//!
//! The grid is a pure function of the surface width, the dimension and the
//! vertical offset. Cells are indexed row-major; the index is the identity
//! every other component uses.
//!
//! With radius `r = floor(width / (2 + 4n))` each row spans `(4n + 2)` radii:
//! one radius of margin on each side, `2r` per cell, and `2r` gaps between
//! neighbours. Cell `(row, col)` is centered at
//! `(col·4r + 3r, row·4r + 3r + offset_y)`.

use crate::error::{ConfigError, Result};
use crate::geometry::{Point, Size};

/// One target on the grid
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Cell {
    /// Row-major index in `0..n²`
    pub index: usize,
    pub center: Point,
    pub radius: f32,
}

/// Inputs the grid is derived from; equal keys yield identical grids
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridKey {
    pub surface: Size,
    pub dimension: u32,
    pub offset_y: f32,
}

/// The full, ordered set of cells for one surface size
#[derive(Clone, Debug, PartialEq)]
pub struct Grid {
    key: GridKey,
    radius: f32,
    cells: Vec<Cell>,
}

/// Largest grid dimension a layout will accept
pub const MAX_DIMENSION: u32 = 256;

/// Capture radius for a surface width and dimension
pub fn cell_radius(width: f32, dimension: u32) -> f32 {
    let divisor = 2.0 + 4.0 * f64::from(dimension);
    (f64::from(width) / divisor).floor() as f32
}

impl Grid {
    /// Compute the grid for a surface
    pub fn compute(surface: Size, dimension: u32, offset_y: f32) -> Result<Self> {
        if dimension == 0 || dimension > MAX_DIMENSION {
            return Err(ConfigError::InvalidDimension(dimension));
        }
        if !surface.width.is_finite() || !surface.height.is_finite() || surface.is_empty() {
            return Err(ConfigError::InvalidSurface {
                width: surface.width,
                height: surface.height,
            });
        }
        if !offset_y.is_finite() {
            return Err(ConfigError::NonFiniteValue {
                field: "circle.offset_y",
            });
        }
        if offset_y < 0.0 {
            return Err(ConfigError::NegativeOffset {
                field: "circle.offset_y",
                value: offset_y,
            });
        }

        let radius = cell_radius(surface.width, dimension);
        if radius <= 0.0 {
            return Err(ConfigError::DegenerateGrid {
                width: surface.width,
                dimension,
            });
        }

        let n = dimension as usize;
        let count = n
            .checked_mul(n)
            .ok_or(ConfigError::InvalidDimension(dimension))?;
        let mut cells = Vec::with_capacity(count);
        for row in 0..n {
            for col in 0..n {
                cells.push(Cell {
                    index: row * n + col,
                    center: Point::new(
                        col as f32 * 4.0 * radius + 3.0 * radius,
                        row as f32 * 4.0 * radius + 3.0 * radius + offset_y,
                    ),
                    radius,
                });
            }
        }

        tracing::debug!(
            "Grid::compute - {}x{} cells, radius {} on {}x{} surface",
            n,
            n,
            radius,
            surface.width,
            surface.height
        );

        Ok(Self {
            key: GridKey {
                surface,
                dimension,
                offset_y,
            },
            radius,
            cells,
        })
    }

    /// Whether this grid was derived from `key`
    pub fn matches(&self, key: &GridKey) -> bool {
        self.key == *key
    }

    pub fn key(&self) -> GridKey {
        self.key
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn dimension(&self) -> u32 {
        self.key.dimension
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn cell(&self, index: usize) -> Option<&Cell> {
        self.cells.get(index)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}
