// Copyright 2026 the Tessella Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Mapping grid cells to canvas-space geometry.
//!
//! A renderer that draws each layer inside its grid cell needs the cell's
//! offset from the canvas origin. [`GridFrame`] computes that from a uniform
//! cell extent (usually the largest layer extent) and the gap between cells.
//! It knows nothing about cameras or viewports; callers translate the result
//! into whatever coordinate space they render in.

use kurbo::{Point, Rect, Size, Vec2};

use crate::error::GridConfigError;
use crate::grid::{GridCell, GridSize};

/// Uniform cell extent and spacing for a grid.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridFrame {
    cell: Size,
    spacing: f64,
}

impl GridFrame {
    /// Creates a frame with the given cell extent and gap between cells.
    ///
    /// # Errors
    ///
    /// Returns [`GridConfigError::InvalidFrame`] if any value is negative,
    /// NaN, or infinite.
    pub fn new(cell: Size, spacing: f64) -> Result<Self, GridConfigError> {
        let valid = |v: f64| v.is_finite() && v >= 0.0;
        if !(valid(cell.width) && valid(cell.height) && valid(spacing)) {
            return Err(GridConfigError::InvalidFrame);
        }
        Ok(Self { cell, spacing })
    }

    /// Returns the cell extent.
    #[inline]
    #[must_use]
    pub const fn cell(&self) -> Size {
        self.cell
    }

    /// Returns the gap between adjacent cells.
    #[inline]
    #[must_use]
    pub const fn spacing(&self) -> f64 {
        self.spacing
    }

    /// Distance between the origins of adjacent columns and rows.
    #[inline]
    fn pitch(&self) -> Vec2 {
        Vec2::new(
            self.cell.width + self.spacing,
            self.cell.height + self.spacing,
        )
    }

    /// Returns the translation that moves a layer drawn at the origin into
    /// `cell`.
    #[must_use]
    pub fn offset(&self, cell: GridCell) -> Vec2 {
        let pitch = self.pitch();
        Vec2::new(cell.col as f64 * pitch.x, cell.row as f64 * pitch.y)
    }

    /// Returns the rectangle covered by `cell`.
    #[must_use]
    pub fn cell_rect(&self, cell: GridCell) -> Rect {
        Rect::from_origin_size(self.offset(cell).to_point(), self.cell)
    }

    /// Returns the total extent of a grid of `size`, without trailing
    /// spacing.
    #[must_use]
    pub fn bounds(&self, size: GridSize) -> Size {
        let pitch = self.pitch();
        Size::new(
            size.cols as f64 * pitch.x - self.spacing,
            size.rows as f64 * pitch.y - self.spacing,
        )
    }

    /// Returns the cell containing `point`, or `None` if it lies outside the
    /// grid or in the gap between cells.
    #[must_use]
    pub fn hit_test(&self, size: GridSize, point: Point) -> Option<GridCell> {
        if point.x < 0.0 || point.y < 0.0 {
            return None;
        }
        let pitch = self.pitch();
        if pitch.x <= 0.0 || pitch.y <= 0.0 {
            return None;
        }
        #[expect(
            clippy::cast_possible_truncation,
            reason = "both quotients are non-negative and saturate on overflow"
        )]
        let (col, row) = ((point.x / pitch.x) as usize, (point.y / pitch.y) as usize);
        let cell = GridCell::new(row, col);
        if !size.contains(cell) {
            return None;
        }
        let local = point - self.offset(cell);
        (local.x <= self.cell.width && local.y <= self.cell.height).then_some(cell)
    }
}
