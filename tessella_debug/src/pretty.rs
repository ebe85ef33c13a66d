// Copyright 2026 the Tessella Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Human-readable trace output.
//!
//! [`PrettyPrintSink`] implements [`TraceSink`] and writes one line per event
//! to a [`Write`](std::io::Write) destination (default: stderr).

use std::io::Write;

use tessella_core::grid::GridConfig;
use tessella_core::trace::{ConfigChangedEvent, ConfigRejectedEvent, LayoutEvent, TraceSink};

/// Writes human-readable trace lines to a [`Write`](std::io::Write) destination.
pub struct PrettyPrintSink<W: Write = Box<dyn Write + Send>> {
    writer: W,
}

impl<W: Write> std::fmt::Debug for PrettyPrintSink<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrettyPrintSink").finish_non_exhaustive()
    }
}

impl PrettyPrintSink {
    /// Creates a sink that writes to stderr.
    #[must_use]
    pub fn stderr() -> Self {
        Self {
            writer: Box::new(std::io::stderr()),
        }
    }

    /// Creates a sink that writes to a boxed writer.
    #[must_use]
    pub fn new(writer: Box<dyn Write + Send>) -> Self {
        Self { writer }
    }
}

impl<W: Write> PrettyPrintSink<W> {
    /// Creates a sink that writes to the given destination.
    #[must_use]
    pub fn with_writer(writer: W) -> Self {
        Self { writer }
    }

    /// Consumes the sink and returns the destination.
    #[must_use]
    pub fn into_writer(self) -> W {
        self.writer
    }
}

fn describe(config: &GridConfig) -> String {
    let (rows, cols) = config.size();
    format!(
        "enabled={} size={rows}x{cols} stride={}",
        config.enabled(),
        config.stride(),
    )
}

impl<W: Write> TraceSink for PrettyPrintSink<W> {
    fn on_config_changed(&mut self, e: &ConfigChangedEvent) {
        let _ = writeln!(
            self.writer,
            "[config] rev={} field={} {}",
            e.revision,
            e.field.as_str(),
            describe(&e.config),
        );
    }

    fn on_config_rejected(&mut self, e: &ConfigRejectedEvent) {
        let _ = writeln!(
            self.writer,
            "[config:rejected] rev={} field={} error=\"{}\"",
            e.revision,
            e.field.as_str(),
            e.error,
        );
    }

    fn on_layout(&mut self, e: &LayoutEvent) {
        let mode = if e.enabled { "grid" } else { "stacked" };
        let _ = writeln!(
            self.writer,
            "[layout] rev={} layers={} {mode} {}x{} stride={}",
            e.revision, e.nlayers, e.size.rows, e.size.cols, e.stride,
        );
    }
}
