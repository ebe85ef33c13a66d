// Copyright 2026 the Tessella Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Grid dimension and cell coordinate types.

use core::fmt;
use core::num::NonZeroUsize;

use crate::error::GridConfigError;

/// One axis of a requested grid size.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum GridExtent {
    /// Compute this axis from the layer count and the other axis.
    #[default]
    Auto,
    /// Use exactly this many rows or columns.
    Fixed(NonZeroUsize),
}

impl GridExtent {
    /// Raw value used for [`Auto`](Self::Auto) by integer-based callers.
    pub const AUTO_SENTINEL: i64 = -1;

    /// Returns a fixed extent, or `None` if `n` is zero.
    #[inline]
    #[must_use]
    pub const fn fixed(n: usize) -> Option<Self> {
        match NonZeroUsize::new(n) {
            Some(n) => Some(Self::Fixed(n)),
            None => None,
        }
    }

    /// Returns whether this axis is computed automatically.
    #[inline]
    #[must_use]
    pub const fn is_auto(self) -> bool {
        matches!(self, Self::Auto)
    }

    /// Returns the integer form: `-1` for auto, the count otherwise.
    #[must_use]
    pub fn to_raw(self) -> i64 {
        match self {
            Self::Auto => Self::AUTO_SENTINEL,
            Self::Fixed(n) => i64::try_from(n.get()).unwrap_or(i64::MAX),
        }
    }
}

impl TryFrom<i64> for GridExtent {
    type Error = GridConfigError;

    /// Accepts `-1` as auto and any positive count as fixed.
    fn try_from(raw: i64) -> Result<Self, Self::Error> {
        if raw == Self::AUTO_SENTINEL {
            return Ok(Self::Auto);
        }
        usize::try_from(raw)
            .ok()
            .and_then(Self::fixed)
            .ok_or(GridConfigError::InvalidExtent(raw))
    }
}

impl fmt::Display for GridExtent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Auto => f.write_str("auto"),
            Self::Fixed(n) => write!(f, "{n}"),
        }
    }
}

/// The effective number of rows and columns of a grid.
///
/// Both dimensions are always at least 1.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct GridSize {
    /// Number of rows.
    pub rows: usize,
    /// Number of columns.
    pub cols: usize,
}

impl GridSize {
    /// A single cell; the size of a disabled grid.
    pub const SINGLE: Self = Self { rows: 1, cols: 1 };

    /// Total number of cells, saturating at `usize::MAX`.
    #[inline]
    #[must_use]
    pub const fn cell_count(self) -> usize {
        self.rows.saturating_mul(self.cols)
    }

    /// Returns whether `cell` lies inside this grid.
    #[inline]
    #[must_use]
    pub const fn contains(self, cell: GridCell) -> bool {
        cell.row < self.rows && cell.col < self.cols
    }
}

impl From<GridSize> for (usize, usize) {
    fn from(size: GridSize) -> Self {
        (size.rows, size.cols)
    }
}

/// A zero-based `(row, col)` cell coordinate.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GridCell {
    /// Row index, top to bottom.
    pub row: usize,
    /// Column index, left to right.
    pub col: usize,
}

impl GridCell {
    /// The top-left cell.
    pub const ORIGIN: Self = Self { row: 0, col: 0 };

    /// Creates a cell coordinate.
    #[inline]
    #[must_use]
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl From<GridCell> for (usize, usize) {
    fn from(cell: GridCell) -> Self {
        (cell.row, cell.col)
    }
}
