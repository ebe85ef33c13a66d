// Copyright 2026 the Tessella Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Grid-canvas layout engine.
//!
//! `tessella_core` decides which grid cell each layer of an ordered layer
//! list lands in when a viewer shows its layers side by side instead of
//! stacked. It is `no_std` compatible (with `alloc`) and holds no reference to
//! the layer collection: every query takes the layer count from the caller.
//!
//! # Architecture
//!
//! ```text
//!   setters ──► GridConfig ──► listeners (synchronous)
//!                  │              │
//!                  │              └─► TraceSink (optional)
//!                  ▼
//!   effective_size(nlayers) ──► GridSize
//!   position(index, nlayers) ──► GridCell ──► GridFrame::offset()
//! ```
//!
//! **[`grid`]**: [`GridCanvas`](grid::GridCanvas) owns the configuration
//! (enabled flag, requested size, stride) and notifies subscribers on every
//! mutation. [`GridConfig`](grid::GridConfig) carries the pure sizing and
//! placement arithmetic.
//!
//! **[`frame`]**: maps cell coordinates to canvas-space offsets and
//! rectangles for a caller-supplied cell extent.
//!
//! **[`error`]**: [`GridConfigError`](error::GridConfigError), returned by
//! setters that reject a value.
//!
//! **[`trace`]**: the [`TraceSink`](trace::TraceSink) trait and event
//! types for configuration and layout instrumentation, with a zero-overhead
//! [`Tracer`](trace::Tracer) wrapper.
//!
//! # Crate features
//!
//! - `std` (disabled by default): Enables `std` support in dependencies.
//! - `trace` (disabled by default): Enables `Tracer` method bodies (one branch
//!   per call site).

#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

extern crate alloc;

pub mod error;
pub mod frame;
pub mod grid;
pub mod trace;
