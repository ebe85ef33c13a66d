// Copyright 2026 the Tessella Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tracing and diagnostics for grid configuration and layout.
//!
//! This module provides a [`TraceSink`] trait with per-event methods that the
//! [`GridCanvas`](crate::grid::GridCanvas) calls when its configuration
//! changes, when a setter rejects a value, and when a layout plan is built.
//! All method bodies default to no-ops, so implementing only the events you
//! care about is fine.
//!
//! [`Tracer`] wraps an optional `&mut dyn TraceSink`. When the `trace` feature
//! is **off**, every `Tracer` method compiles to nothing (zero overhead). When
//! **on**, each method performs a single `Option` branch before dispatching.

use crate::error::GridConfigError;
use crate::grid::{GridConfig, GridSize};

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// Which setting a configuration event concerns.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ConfigField {
    /// The enabled flag.
    Enabled,
    /// The requested `(rows, cols)`.
    Size,
    /// The stride.
    Stride,
    /// The whole configuration, replaced at once.
    All,
}

impl ConfigField {
    /// Returns a short lowercase label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Enabled => "enabled",
            Self::Size => "size",
            Self::Stride => "stride",
            Self::All => "all",
        }
    }
}

// ---------------------------------------------------------------------------
// Event structs
// ---------------------------------------------------------------------------

/// Emitted after a setter has written the configuration and notified
/// listeners.
#[derive(Clone, Copy, Debug)]
pub struct ConfigChangedEvent {
    /// Monotonic change counter of the canvas.
    pub revision: u64,
    /// Which setting was written.
    pub field: ConfigField,
    /// The configuration after the write.
    pub config: GridConfig,
}

/// Emitted when a setter rejects its argument.
#[derive(Clone, Copy, Debug)]
pub struct ConfigRejectedEvent {
    /// Revision of the (unchanged) configuration.
    pub revision: u64,
    /// Which setting the caller tried to write.
    pub field: ConfigField,
    /// Why it was rejected.
    pub error: GridConfigError,
}

/// Emitted when a layout plan is built for a layer count.
#[derive(Clone, Copy, Debug)]
pub struct LayoutEvent {
    /// Revision of the configuration the plan was computed from.
    pub revision: u64,
    /// Number of layers placed.
    pub nlayers: usize,
    /// Effective grid size.
    pub size: GridSize,
    /// Stride in effect.
    pub stride: i32,
    /// Whether grid mode was on.
    pub enabled: bool,
}

// ---------------------------------------------------------------------------
// TraceSink trait
// ---------------------------------------------------------------------------

/// Receives trace events from a grid canvas.
///
/// All methods have default no-op implementations, so you only need to
/// override the events you care about.
pub trait TraceSink {
    /// Called after a configuration write.
    fn on_config_changed(&mut self, e: &ConfigChangedEvent) {
        _ = e;
    }

    /// Called when a setter rejects a value.
    fn on_config_rejected(&mut self, e: &ConfigRejectedEvent) {
        _ = e;
    }

    /// Called when a layout plan is built.
    fn on_layout(&mut self, e: &LayoutEvent) {
        _ = e;
    }
}

// ---------------------------------------------------------------------------
// NoopSink
// ---------------------------------------------------------------------------

/// A [`TraceSink`] that discards all events.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopSink;

impl TraceSink for NoopSink {}

// ---------------------------------------------------------------------------
// Tracer wrapper
// ---------------------------------------------------------------------------

/// Thin wrapper around an optional [`TraceSink`].
///
/// When the `trace` feature is **off**, every method compiles to nothing. When
/// **on**, each method checks the inner `Option` (one branch) before
/// dispatching to the sink.
pub struct Tracer<'a> {
    #[cfg(feature = "trace")]
    sink: Option<&'a mut dyn TraceSink>,
    #[cfg(not(feature = "trace"))]
    _marker: core::marker::PhantomData<&'a mut dyn TraceSink>,
}

impl core::fmt::Debug for Tracer<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Tracer").finish_non_exhaustive()
    }
}

impl<'a> Tracer<'a> {
    /// Creates a tracer that dispatches to the given sink.
    #[inline]
    #[must_use]
    pub fn new(sink: &'a mut dyn TraceSink) -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: Some(sink) }
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = sink;
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Creates a tracer that discards all events.
    #[inline]
    #[must_use]
    pub fn none() -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: None }
        }
        #[cfg(not(feature = "trace"))]
        {
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Emits a [`ConfigChangedEvent`].
    #[inline]
    pub fn config_changed(&mut self, e: &ConfigChangedEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_config_changed(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`ConfigRejectedEvent`].
    #[inline]
    pub fn config_rejected(&mut self, e: &ConfigRejectedEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_config_rejected(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`LayoutEvent`].
    #[inline]
    pub fn layout(&mut self, e: &LayoutEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_layout(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
