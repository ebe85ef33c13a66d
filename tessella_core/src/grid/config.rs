// Copyright 2026 the Tessella Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Grid settings and the sizing/placement arithmetic.

use core::iter::FusedIterator;
use core::num::NonZeroI32;

use super::extent::{GridCell, GridExtent, GridSize};
use super::math::ceil_sqrt;
use crate::error::GridConfigError;

const STRIDE_ONE: NonZeroI32 = NonZeroI32::new(1).unwrap();

/// Grid settings: enabled flag, requested size, and stride.
///
/// The default is disabled, auto-sized on both axes, with a stride of 1.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct GridConfig {
    enabled: bool,
    rows: GridExtent,
    cols: GridExtent,
    stride: NonZeroI32,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl GridConfig {
    /// Disabled, `auto × auto`, stride 1.
    pub const DEFAULT: Self = Self {
        enabled: false,
        rows: GridExtent::Auto,
        cols: GridExtent::Auto,
        stride: STRIDE_ONE,
    };

    /// Creates a configuration.
    ///
    /// # Errors
    ///
    /// Returns [`GridConfigError::ZeroStride`] if `stride` is zero.
    pub fn new(
        enabled: bool,
        rows: GridExtent,
        cols: GridExtent,
        stride: i32,
    ) -> Result<Self, GridConfigError> {
        let stride = NonZeroI32::new(stride).ok_or(GridConfigError::ZeroStride)?;
        Ok(Self {
            enabled,
            rows,
            cols,
            stride,
        })
    }

    /// Returns whether grid mode is on.
    #[inline]
    #[must_use]
    pub const fn enabled(&self) -> bool {
        self.enabled
    }

    /// Returns the requested `(rows, cols)`.
    #[inline]
    #[must_use]
    pub const fn size(&self) -> (GridExtent, GridExtent) {
        (self.rows, self.cols)
    }

    /// Returns the stride. Never zero.
    #[inline]
    #[must_use]
    pub const fn stride(&self) -> i32 {
        self.stride.get()
    }

    /// Returns a copy with grid mode switched on or off.
    #[must_use]
    pub const fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Returns a copy with the requested size replaced.
    #[must_use]
    pub const fn with_size(mut self, rows: GridExtent, cols: GridExtent) -> Self {
        self.rows = rows;
        self.cols = cols;
        self
    }

    /// Returns a copy with the stride replaced.
    ///
    /// # Errors
    ///
    /// Returns [`GridConfigError::ZeroStride`] if `stride` is zero.
    pub fn with_stride(mut self, stride: i32) -> Result<Self, GridConfigError> {
        self.stride = NonZeroI32::new(stride).ok_or(GridConfigError::ZeroStride)?;
        Ok(self)
    }

    /// Number of consecutive layers that share one cell.
    #[inline]
    fn layers_per_cell(&self) -> usize {
        self.stride.unsigned_abs().get() as usize
    }

    /// Returns the number of rows and columns used to place `nlayers` layers.
    ///
    /// A disabled grid is always `1 × 1`. Otherwise the number of occupied
    /// cells is `ceil(nlayers / |stride|)` and auto axes are sized to hold
    /// them:
    ///
    /// - both auto: `cols = ceil(sqrt(cells))`, `rows = ceil(cells / cols)`;
    /// - one auto: that axis is `ceil(cells / other)`;
    /// - none auto: the requested size, even if too small or too large.
    ///
    /// Both dimensions are clamped to at least 1, so zero layers still yield a
    /// `1 × 1` grid.
    #[must_use]
    pub fn effective_size(&self, nlayers: usize) -> GridSize {
        if !self.enabled {
            return GridSize::SINGLE;
        }

        let cells = nlayers.div_ceil(self.layers_per_cell());
        let (rows, cols) = match (self.rows, self.cols) {
            (GridExtent::Auto, GridExtent::Auto) => {
                let cols = ceil_sqrt(cells);
                // `cols` is only zero when `cells` is, and then rows is too.
                (cells.div_ceil(cols.max(1)), cols)
            }
            (GridExtent::Auto, GridExtent::Fixed(cols)) => {
                (cells.div_ceil(cols.get()), cols.get())
            }
            (GridExtent::Fixed(rows), GridExtent::Auto) => {
                (rows.get(), cells.div_ceil(rows.get()))
            }
            (GridExtent::Fixed(rows), GridExtent::Fixed(cols)) => (rows.get(), cols.get()),
        };

        GridSize {
            rows: rows.max(1),
            cols: cols.max(1),
        }
    }

    /// Returns the cell for the layer at `index` in a list of `nlayers`.
    ///
    /// A disabled grid places every layer at `(0, 0)`. Otherwise, for a
    /// negative stride the index is first reversed to `nlayers - index - 1`;
    /// the (possibly reversed) index is then divided by `|stride|` to get a
    /// slot, the slot wraps modulo the number of cells, and the result is
    /// decomposed row-major.
    ///
    /// Reversal happens before grouping, so groups are formed along the
    /// reversed order: five layers with stride `-2` group as `(4, 3)`,
    /// `(2, 1)`, `(0)`.
    ///
    /// # Panics
    ///
    /// Panics if the grid is enabled and `index >= nlayers` (which includes
    /// `nlayers == 0`).
    #[must_use]
    pub fn position(&self, index: usize, nlayers: usize) -> GridCell {
        if !self.enabled {
            return GridCell::ORIGIN;
        }
        assert!(
            index < nlayers,
            "layer index {index} out of range for {nlayers} layers"
        );

        let size = self.effective_size(nlayers);
        let ordered = if self.stride.is_negative() {
            nlayers - index - 1
        } else {
            index
        };
        let slot = (ordered / self.layers_per_cell()) % size.cell_count();

        GridCell {
            row: slot / size.cols,
            col: slot % size.cols,
        }
    }

    /// Returns an iterator over the cell of every layer, in list order.
    #[must_use]
    pub fn positions(&self, nlayers: usize) -> Positions {
        Positions {
            config: *self,
            nlayers,
            next: 0,
        }
    }
}

/// Iterator over per-layer cells, returned by [`GridConfig::positions`].
#[derive(Clone, Debug)]
pub struct Positions {
    config: GridConfig,
    nlayers: usize,
    next: usize,
}

impl Iterator for Positions {
    type Item = GridCell;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next >= self.nlayers {
            return None;
        }
        let cell = self.config.position(self.next, self.nlayers);
        self.next += 1;
        Some(cell)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.nlayers - self.next;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Positions {}

impl FusedIterator for Positions {}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    fn grid(rows: i64, cols: i64, stride: i32) -> GridConfig {
        GridConfig::new(
            true,
            GridExtent::try_from(rows).unwrap(),
            GridExtent::try_from(cols).unwrap(),
            stride,
        )
        .unwrap()
    }

    fn size(rows: usize, cols: usize) -> GridSize {
        GridSize { rows, cols }
    }

    #[test]
    fn default_is_disabled_auto_stride_one() {
        let config = GridConfig::default();
        assert!(!config.enabled());
        assert_eq!(config.size(), (GridExtent::Auto, GridExtent::Auto));
        assert_eq!(config.stride(), 1);
    }

    #[test]
    fn zero_stride_rejected() {
        assert_eq!(
            GridConfig::new(true, GridExtent::Auto, GridExtent::Auto, 0),
            Err(GridConfigError::ZeroStride)
        );
        assert_eq!(
            GridConfig::default().with_stride(0),
            Err(GridConfigError::ZeroStride)
        );
    }

    #[test]
    fn disabled_is_single_cell() {
        let config = GridConfig::default().with_stride(-3).unwrap();
        for nlayers in 0..20 {
            assert_eq!(config.effective_size(nlayers), GridSize::SINGLE);
            for i in 0..nlayers {
                assert_eq!(config.position(i, nlayers), GridCell::ORIGIN);
            }
        }
    }

    #[test]
    fn disabled_position_ignores_out_of_range_index() {
        let config = GridConfig::default();
        assert_eq!(config.position(5, 0), GridCell::ORIGIN);
    }

    #[test]
    fn auto_auto_five_layers() {
        let config = grid(-1, -1, 1);
        assert_eq!(config.effective_size(5), size(2, 3));
        assert_eq!(config.position(0, 5), GridCell::new(0, 0));
        assert_eq!(config.position(2, 5), GridCell::new(0, 2));
        assert_eq!(config.position(3, 5), GridCell::new(1, 0));
        assert_eq!(config.position(4, 5), GridCell::new(1, 1));
    }

    #[test]
    fn auto_auto_perfect_square() {
        let config = grid(-1, -1, 1);
        assert_eq!(config.effective_size(4), size(2, 2));
        assert_eq!(config.effective_size(9), size(3, 3));
        assert_eq!(config.effective_size(10), size(3, 4));
    }

    #[test]
    fn fixed_rows_auto_cols() {
        let config = grid(2, -1, 1);
        assert_eq!(config.effective_size(5), size(2, 3));
    }

    #[test]
    fn auto_rows_fixed_cols() {
        let config = grid(-1, 4, 1);
        assert_eq!(config.effective_size(5), size(2, 4));
        assert_eq!(config.effective_size(8), size(2, 4));
        assert_eq!(config.effective_size(9), size(3, 4));
    }

    #[test]
    fn fixed_size_is_not_adjusted() {
        let config = grid(3, 5, 1);
        assert_eq!(config.effective_size(1), size(3, 5));
        assert_eq!(config.effective_size(100), size(3, 5));
    }

    #[test]
    fn zero_layers_yield_single_cell() {
        for config in [grid(-1, -1, 1), grid(-1, 3, 2), grid(3, -1, -1)] {
            let s = config.effective_size(0);
            assert!(s.rows >= 1 && s.cols >= 1, "{config:?} -> {s:?}");
        }
        assert_eq!(grid(-1, -1, 1).effective_size(0), GridSize::SINGLE);
        assert_eq!(grid(-1, 3, 1).effective_size(0), size(1, 3));
    }

    #[test]
    fn stride_groups_layers() {
        let config = grid(-1, -1, 3);
        // 7 layers / 3 per cell = 3 cells -> 2 cols, 2 rows.
        assert_eq!(config.effective_size(7), size(2, 2));
        let cells: Vec<_> = config.positions(7).collect();
        assert_eq!(
            cells,
            [
                GridCell::new(0, 0),
                GridCell::new(0, 0),
                GridCell::new(0, 0),
                GridCell::new(0, 1),
                GridCell::new(0, 1),
                GridCell::new(0, 1),
                GridCell::new(1, 0),
            ]
        );
    }

    #[test]
    fn negative_stride_reverses() {
        let forward = grid(-1, -1, 1);
        let reverse = grid(-1, -1, -1);
        assert_eq!(reverse.position(0, 3), forward.position(2, 3));
        assert_eq!(reverse.position(2, 3), GridCell::ORIGIN);
    }

    #[test]
    fn reversal_property_holds_for_all_strides() {
        for s in 1..5 {
            let forward = grid(-1, -1, s);
            let reverse = grid(-1, -1, -s);
            for nlayers in 1..30 {
                assert_eq!(
                    forward.effective_size(nlayers),
                    reverse.effective_size(nlayers)
                );
                for i in 0..nlayers {
                    assert_eq!(
                        reverse.position(i, nlayers),
                        forward.position(nlayers - 1 - i, nlayers),
                        "stride {s}, nlayers {nlayers}, index {i}"
                    );
                }
            }
        }
    }

    #[test]
    fn negative_stride_reverses_before_grouping() {
        // 5 layers, stride -2: reversed indices 4,3,2,1,0 -> slots 2,1,1,0,0.
        let config = grid(1, -1, -2);
        let cols: Vec<_> = config.positions(5).map(|c| c.col).collect();
        assert_eq!(cols, [2, 1, 1, 0, 0]);
    }

    #[test]
    fn wraps_when_grid_is_full() {
        let config = grid(2, 2, 2);
        let nlayers = 10;
        let origin = config.position(0, nlayers);
        assert_eq!(origin, GridCell::ORIGIN);
        assert_eq!(config.position(1, nlayers), origin);
        assert_eq!(config.position(8, nlayers), origin);
        assert_eq!(config.position(9, nlayers), origin);
        assert_eq!(config.position(7, nlayers), GridCell::new(1, 1));
    }

    #[test]
    fn positions_stay_in_bounds() {
        let extents = [-1, 1, 2, 3, 5];
        for rows in extents {
            for cols in extents {
                for stride in [-3, -2, -1, 1, 2, 3] {
                    let config = grid(rows, cols, stride);
                    for nlayers in 1..25 {
                        let s = config.effective_size(nlayers);
                        assert!(s.rows >= 1 && s.cols >= 1, "{config:?} -> {s:?}");
                        for cell in config.positions(nlayers) {
                            assert!(s.contains(cell), "{config:?}: {cell:?} outside {s:?}");
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn overfull_fixed_grid_shares_cells() {
        for stride in [1, 2, -2] {
            let config = grid(2, 1, stride);
            let nlayers: usize = 7;
            let cells = nlayers.div_ceil(stride.unsigned_abs() as usize);
            assert!(config.effective_size(nlayers).cell_count() < cells);
            let mut seen: Vec<GridCell> = Vec::new();
            let mut shared = false;
            for i in (0..nlayers).step_by(stride.unsigned_abs() as usize) {
                let cell = config.position(i, nlayers);
                shared |= seen.contains(&cell);
                seen.push(cell);
            }
            assert!(shared, "stride {stride}: no cell reused");
        }
    }

    #[test]
    fn auto_square_shape() {
        let config = grid(-1, -1, 1);
        for nlayers in 1..200_usize {
            let s = config.effective_size(nlayers);
            assert!(s.cell_count() >= nlayers, "{nlayers} -> {s:?}");
            assert!(s.cols * s.cols >= nlayers, "{nlayers} -> {s:?}");
            assert!((s.cols - 1) * (s.cols - 1) < nlayers, "{nlayers} -> {s:?}");
            assert!(s.rows <= s.cols, "{nlayers} -> {s:?}");
        }
    }

    #[test]
    fn positions_iterator_len() {
        let config = grid(-1, -1, 1);
        let mut it = config.positions(4);
        assert_eq!(it.len(), 4);
        it.next();
        assert_eq!(it.len(), 3);
        assert_eq!(it.count(), 3);
        assert_eq!(config.positions(0).next(), None);
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn enabled_position_rejects_index_past_end() {
        let _ = grid(-1, -1, 1).position(3, 3);
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn enabled_position_rejects_empty_list() {
        let _ = grid(-1, -1, 1).position(0, 0);
    }

    #[test]
    fn extreme_inputs_stay_in_bounds() {
        let huge = GridExtent::fixed(usize::MAX).unwrap();
        let configs = [
            grid(-1, -1, 1),
            grid(-1, -1, i32::MIN),
            grid(-1, -1, i32::MAX),
            grid(3, -1, i32::MIN),
            GridConfig::new(true, huge, huge, 1).unwrap(),
            GridConfig::new(true, huge, huge, -1).unwrap(),
        ];
        let nlayers = usize::MAX;
        for config in configs {
            let s = config.effective_size(nlayers);
            assert!(s.rows >= 1 && s.cols >= 1, "{config:?} -> {s:?}");
            for index in [0, 1, nlayers / 2, nlayers - 2, nlayers - 1] {
                let cell = config.position(index, nlayers);
                assert!(s.contains(cell), "{config:?}: {cell:?} outside {s:?}");
            }
        }
    }

    #[cfg(target_pointer_width = "64")]
    #[test]
    fn auto_square_for_max_layers() {
        let s = grid(-1, -1, 1).effective_size(usize::MAX);
        assert_eq!(s, size(1 << 32, 1 << 32));
    }
}
