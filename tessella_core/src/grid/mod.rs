// Copyright 2026 the Tessella Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Grid configuration and layer placement.
//!
//! A *grid canvas* partitions the view into rows and columns and assigns each
//! layer of an ordered list to one cell. Three settings control placement:
//!
//! - **Enabled**: when off, every layer shares the single cell `(0, 0)` and
//!   the grid reports a size of `1 × 1`.
//! - **Requested size**: each axis is either [`GridExtent::Fixed`] or
//!   [`GridExtent::Auto`]. Auto axes are computed from the layer count so that
//!   all occupied cells fit; with both axes auto the grid is near-square,
//!   columns first.
//! - **Stride**: `|stride|` consecutive layers share one cell before the next
//!   cell is used. A negative stride places layers in reverse list order, so
//!   the last (topmost) layer lands in the first cell.
//!
//! Once the grid is full, placement wraps: slot `rows * cols` maps back onto
//! cell `(0, 0)`.
//!
//! [`GridConfig`] is the plain value holding those settings along with the
//! arithmetic. [`GridCanvas`] owns a config for a viewer session and notifies
//! subscribers whenever a setter runs.

mod canvas;
mod config;
mod extent;
mod math;

pub use canvas::{GridCanvas, GridPlan, ListenerId};
pub use config::{GridConfig, Positions};
pub use extent::{GridCell, GridExtent, GridSize};
