// Copyright 2026 the Tessella Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Sharing one sink between a canvas and its owner.
//!
//! [`GridCanvas::set_trace_sink`](tessella_core::grid::GridCanvas::set_trace_sink)
//! takes ownership of a boxed sink. Wrapping the sink in [`SharedSink`] keeps a
//! second handle so the caller can read a recording while the canvas is still
//! writing to it.

use std::sync::{Arc, Mutex, PoisonError};

use tessella_core::trace::{ConfigChangedEvent, ConfigRejectedEvent, LayoutEvent, TraceSink};

/// A cloneable, thread-safe handle to a [`TraceSink`].
#[derive(Debug, Default)]
pub struct SharedSink<S> {
    inner: Arc<Mutex<S>>,
}

impl<S> Clone for SharedSink<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S> SharedSink<S> {
    /// Wraps `sink`.
    #[must_use]
    pub fn new(sink: S) -> Self {
        Self {
            inner: Arc::new(Mutex::new(sink)),
        }
    }

    /// Runs `f` with exclusive access to the wrapped sink.
    pub fn with<R>(&self, f: impl FnOnce(&mut S) -> R) -> R {
        let mut guard = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut guard)
    }
}

impl<S: TraceSink> TraceSink for SharedSink<S> {
    fn on_config_changed(&mut self, e: &ConfigChangedEvent) {
        self.with(|s| s.on_config_changed(e));
    }

    fn on_config_rejected(&mut self, e: &ConfigRejectedEvent) {
        self.with(|s| s.on_config_rejected(e));
    }

    fn on_layout(&mut self, e: &LayoutEvent) {
        self.with(|s| s.on_layout(e));
    }
}
