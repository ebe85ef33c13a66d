// Copyright 2026 the Tessella Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Recording, pretty-printing, and JSON export for tessella diagnostics.
//!
//! This crate provides [`TraceSink`](tessella_core::trace::TraceSink)
//! implementations for development and post-mortem analysis:
//!
//! - [`pretty::PrettyPrintSink`] writes human-readable one-line-per-event output.
//! - [`recorder::RecorderSink`] writes a compact binary recording with
//!   [`recorder::decode`] for playback.
//! - [`json::export`] writes recorded bytes as a JSON array.
//! - [`shared::SharedSink`] keeps a handle on a sink after handing it to a
//!   canvas.

pub mod json;
pub mod pretty;
pub mod recorder;
pub mod shared;
