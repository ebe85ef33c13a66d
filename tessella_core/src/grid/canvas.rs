// Copyright 2026 the Tessella Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Session-owned grid state with synchronous change notification.

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt;

use super::config::{GridConfig, Positions};
use super::extent::{GridCell, GridExtent, GridSize};
use crate::error::GridConfigError;
use crate::trace::{
    ConfigChangedEvent, ConfigField, ConfigRejectedEvent, LayoutEvent, TraceSink, Tracer,
};

type Listener = Box<dyn FnMut(&GridConfig) + Send>;

/// Handle returned by [`GridCanvas::subscribe`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// Grid configuration for one viewer session.
///
/// Every setter writes the new value and then, before returning, calls each
/// subscribed listener in subscription order with the updated
/// [`GridConfig`]. Listeners fire on every successful setter call, including
/// ones that write the value already present. A setter that rejects its
/// argument leaves the configuration untouched and notifies nobody.
///
/// Setters take `&mut self`, so the write and the notification form one
/// exclusive step; hosts that share a canvas across threads put it behind a
/// lock.
///
/// The canvas never stores the layer count. Sizing and placement queries take
/// `nlayers` from the caller and delegate to [`GridConfig`].
pub struct GridCanvas {
    config: GridConfig,
    revision: u64,
    listeners: Vec<(ListenerId, Listener)>,
    next_listener: u64,
    sink: Option<Box<dyn TraceSink + Send>>,
}

impl fmt::Debug for GridCanvas {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GridCanvas")
            .field("config", &self.config)
            .field("revision", &self.revision)
            .field("listeners", &self.listeners.len())
            .finish_non_exhaustive()
    }
}

impl Default for GridCanvas {
    fn default() -> Self {
        Self::new(GridConfig::DEFAULT)
    }
}

impl GridCanvas {
    /// Creates a canvas with the given initial configuration.
    #[must_use]
    pub fn new(config: GridConfig) -> Self {
        Self {
            config,
            revision: 0,
            listeners: Vec::new(),
            next_listener: 0,
            sink: None,
        }
    }

    // -- Queries --

    /// Returns the current configuration.
    #[inline]
    #[must_use]
    pub fn config(&self) -> GridConfig {
        self.config
    }

    /// Returns whether grid mode is on.
    #[inline]
    #[must_use]
    pub fn enabled(&self) -> bool {
        self.config.enabled()
    }

    /// Returns the requested `(rows, cols)`.
    #[inline]
    #[must_use]
    pub fn size(&self) -> (GridExtent, GridExtent) {
        self.config.size()
    }

    /// Returns the stride.
    #[inline]
    #[must_use]
    pub fn stride(&self) -> i32 {
        self.config.stride()
    }

    /// Returns the number of successful setter calls so far.
    #[inline]
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// See [`GridConfig::effective_size`].
    #[inline]
    #[must_use]
    pub fn effective_size(&self, nlayers: usize) -> GridSize {
        self.config.effective_size(nlayers)
    }

    /// See [`GridConfig::position`].
    ///
    /// # Panics
    ///
    /// Panics if the grid is enabled and `index >= nlayers`.
    #[inline]
    #[must_use]
    pub fn position(&self, index: usize, nlayers: usize) -> GridCell {
        self.config.position(index, nlayers)
    }

    /// See [`GridConfig::positions`].
    #[inline]
    #[must_use]
    pub fn positions(&self, nlayers: usize) -> Positions {
        self.config.positions(nlayers)
    }

    /// Computes the grid size and every layer's cell in one pass, reporting a
    /// [`LayoutEvent`] to the trace sink.
    pub fn plan(&mut self, nlayers: usize) -> GridPlan {
        let size = self.config.effective_size(nlayers);
        let cells = self.config.positions(nlayers).collect();
        let event = LayoutEvent {
            revision: self.revision,
            nlayers,
            size,
            stride: self.config.stride(),
            enabled: self.config.enabled(),
        };
        self.tracer().layout(&event);
        GridPlan { size, cells }
    }

    // -- Setters --

    /// Turns grid mode on or off.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.commit(ConfigField::Enabled, self.config.with_enabled(enabled));
    }

    /// Sets the requested number of rows and columns.
    pub fn set_size(&mut self, rows: GridExtent, cols: GridExtent) {
        self.commit(ConfigField::Size, self.config.with_size(rows, cols));
    }

    /// Sets the requested size from raw integers, `-1` meaning auto.
    ///
    /// # Errors
    ///
    /// Returns [`GridConfigError::InvalidExtent`] if either value is zero or
    /// below `-1`.
    pub fn set_size_raw(&mut self, rows: i64, cols: i64) -> Result<(), GridConfigError> {
        let extents = GridExtent::try_from(rows).and_then(|rows| {
            GridExtent::try_from(cols).map(|cols| (rows, cols))
        });
        match extents {
            Ok((rows, cols)) => {
                self.set_size(rows, cols);
                Ok(())
            }
            Err(error) => Err(self.reject(ConfigField::Size, error)),
        }
    }

    /// Sets how many consecutive layers share a cell; negative reverses the
    /// placement order.
    ///
    /// # Errors
    ///
    /// Returns [`GridConfigError::ZeroStride`] if `stride` is zero.
    pub fn set_stride(&mut self, stride: i32) -> Result<(), GridConfigError> {
        match self.config.with_stride(stride) {
            Ok(config) => {
                self.commit(ConfigField::Stride, config);
                Ok(())
            }
            Err(error) => Err(self.reject(ConfigField::Stride, error)),
        }
    }

    /// Replaces the whole configuration, notifying listeners once.
    pub fn set_config(&mut self, config: GridConfig) {
        self.commit(ConfigField::All, config);
    }

    // -- Listeners --

    /// Registers a listener called after every configuration write.
    pub fn subscribe(&mut self, listener: impl FnMut(&GridConfig) + Send + 'static) -> ListenerId {
        let id = ListenerId(self.next_listener);
        self.next_listener += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Removes a listener. Returns `false` if it was not registered.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(other, _)| *other != id);
        self.listeners.len() != before
    }

    /// Returns the number of registered listeners.
    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    // -- Tracing --

    /// Installs (or with `None`, removes) the trace sink, returning the
    /// previous one.
    pub fn set_trace_sink(
        &mut self,
        sink: Option<Box<dyn TraceSink + Send>>,
    ) -> Option<Box<dyn TraceSink + Send>> {
        core::mem::replace(&mut self.sink, sink)
    }

    // -- Internals --

    fn commit(&mut self, field: ConfigField, config: GridConfig) {
        self.config = config;
        self.revision += 1;
        for (_, listener) in &mut self.listeners {
            listener(&self.config);
        }
        let event = ConfigChangedEvent {
            revision: self.revision,
            field,
            config: self.config,
        };
        self.tracer().config_changed(&event);
    }

    fn reject(&mut self, field: ConfigField, error: GridConfigError) -> GridConfigError {
        let event = ConfigRejectedEvent {
            revision: self.revision,
            field,
            error,
        };
        self.tracer().config_rejected(&event);
        error
    }

    fn tracer(&mut self) -> Tracer<'_> {
        match self.sink.as_deref_mut() {
            Some(sink) => Tracer::new(sink),
            None => Tracer::none(),
        }
    }
}

/// Grid size plus the cell of every layer, produced by [`GridCanvas::plan`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GridPlan {
    /// Effective grid size.
    pub size: GridSize,
    /// Cell of layer `i` at index `i`.
    pub cells: Vec<GridCell>,
}

impl GridPlan {
    /// Returns the cell of the layer at `index`.
    #[must_use]
    pub fn cell(&self, index: usize) -> Option<GridCell> {
        self.cells.get(index).copied()
    }

    /// Returns the indices of the layers placed in `cell`, in list order.
    pub fn layers_in(&self, cell: GridCell) -> impl Iterator<Item = usize> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(move |(_, c)| **c == cell)
            .map(|(i, _)| i)
    }

    /// Returns the number of cells holding at least one layer.
    #[must_use]
    pub fn occupied_cells(&self) -> usize {
        let mut cells = self.cells.clone();
        cells.sort_unstable();
        cells.dedup();
        cells.len()
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use alloc::sync::Arc;
    use core::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    fn recorder(canvas: &mut GridCanvas) -> Arc<Mutex<Vec<GridConfig>>> {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        canvas.subscribe(move |config| sink.lock().unwrap().push(*config));
        seen
    }

    #[test]
    fn default_configuration() {
        let canvas = GridCanvas::default();
        assert!(!canvas.enabled());
        assert_eq!(canvas.size(), (GridExtent::Auto, GridExtent::Auto));
        assert_eq!(canvas.stride(), 1);
        assert_eq!(canvas.revision(), 0);
        assert_eq!(canvas.effective_size(12), GridSize::SINGLE);
    }

    #[test]
    fn every_setter_notifies_with_new_value() {
        let mut canvas = GridCanvas::default();
        let seen = recorder(&mut canvas);

        canvas.set_enabled(true);
        canvas.set_size(GridExtent::fixed(2).unwrap(), GridExtent::Auto);
        canvas.set_stride(-2).unwrap();

        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 3);
        assert!(seen[0].enabled());
        assert_eq!(seen[1].size().0, GridExtent::fixed(2).unwrap());
        assert_eq!(seen[2].stride(), -2);
        assert_eq!(canvas.revision(), 3);
    }

    #[test]
    fn listener_sees_value_already_written() {
        let mut canvas = GridCanvas::default();
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&hits);
        canvas.subscribe(move |config| {
            assert!(config.enabled(), "notified before write");
            counter.fetch_add(1, Ordering::SeqCst);
        });
        canvas.set_enabled(true);
        // Notification is synchronous.
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn unchanged_value_still_notifies() {
        let mut canvas = GridCanvas::default();
        let seen = recorder(&mut canvas);
        canvas.set_enabled(false);
        canvas.set_stride(1).unwrap();
        assert_eq!(seen.lock().unwrap().len(), 2);
    }

    #[test]
    fn zero_stride_is_rejected_without_notification() {
        let mut canvas = GridCanvas::default();
        canvas.set_stride(3).unwrap();
        let seen = recorder(&mut canvas);

        assert_eq!(canvas.set_stride(0), Err(GridConfigError::ZeroStride));
        assert_eq!(canvas.stride(), 3);
        assert_eq!(canvas.revision(), 1);
        assert!(seen.lock().unwrap().is_empty());
    }

    #[test]
    fn raw_size_accepts_sentinel_and_rejects_zero() {
        let mut canvas = GridCanvas::default();
        canvas.set_size_raw(2, -1).unwrap();
        assert_eq!(
            canvas.size(),
            (GridExtent::fixed(2).unwrap(), GridExtent::Auto)
        );

        assert_eq!(
            canvas.set_size_raw(0, 3),
            Err(GridConfigError::InvalidExtent(0))
        );
        assert_eq!(
            canvas.set_size_raw(3, -5),
            Err(GridConfigError::InvalidExtent(-5))
        );
        assert_eq!(
            canvas.size(),
            (GridExtent::fixed(2).unwrap(), GridExtent::Auto)
        );
    }

    #[test]
    fn set_config_notifies_once() {
        let mut canvas = GridCanvas::default();
        let seen = recorder(&mut canvas);
        let config = GridConfig::new(true, GridExtent::Auto, GridExtent::Auto, -1).unwrap();
        canvas.set_config(config);
        assert_eq!(*seen.lock().unwrap(), [config]);
        assert_eq!(canvas.config(), config);
    }

    #[test]
    fn unsubscribe_stops_delivery() {
        let mut canvas = GridCanvas::default();
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&hits);
        let id = canvas.subscribe(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        canvas.set_enabled(true);
        assert!(canvas.unsubscribe(id));
        assert!(!canvas.unsubscribe(id));
        canvas.set_enabled(false);
        assert_eq!(hits.load(Ordering::SeqCst), 1);
        assert_eq!(canvas.listener_count(), 0);
    }

    #[test]
    fn listeners_called_in_subscription_order() {
        let mut canvas = GridCanvas::default();
        let order = Arc::new(Mutex::new(Vec::new()));
        for tag in 0..3 {
            let order = Arc::clone(&order);
            canvas.subscribe(move |_| order.lock().unwrap().push(tag));
        }
        canvas.set_enabled(true);
        assert_eq!(*order.lock().unwrap(), [0, 1, 2]);
    }

    #[test]
    fn queries_follow_configuration() {
        let mut canvas = GridCanvas::default();
        assert_eq!(canvas.position(4, 5), GridCell::ORIGIN);
        canvas.set_enabled(true);
        assert_eq!(canvas.effective_size(5), GridSize { rows: 2, cols: 3 });
        assert_eq!(canvas.position(4, 5), GridCell::new(1, 1));
        canvas.set_stride(-1).unwrap();
        assert_eq!(canvas.position(4, 5), GridCell::ORIGIN);
    }

    #[test]
    fn plan_matches_positions() {
        let mut canvas = GridCanvas::new(
            GridConfig::new(
                true,
                GridExtent::fixed(2).unwrap(),
                GridExtent::fixed(2).unwrap(),
                2,
            )
            .unwrap(),
        );
        let plan = canvas.plan(10);
        assert_eq!(plan.size, GridSize { rows: 2, cols: 2 });
        assert_eq!(plan.cells.len(), 10);
        for (i, cell) in canvas.positions(10).enumerate() {
            assert_eq!(plan.cell(i), Some(cell));
        }
        assert_eq!(plan.cell(10), None);
        assert_eq!(
            plan.layers_in(GridCell::ORIGIN).collect::<Vec<_>>(),
            [0, 1, 8, 9]
        );
        assert_eq!(plan.occupied_cells(), 4);
    }

    #[test]
    fn plan_for_empty_list() {
        let mut canvas = GridCanvas::default();
        canvas.set_enabled(true);
        let plan = canvas.plan(0);
        assert_eq!(plan.size, GridSize::SINGLE);
        assert!(plan.cells.is_empty());
        assert_eq!(plan.occupied_cells(), 0);
    }

    #[cfg(feature = "trace")]
    #[test]
    fn trace_sink_sees_changes_rejections_and_layouts() {
        #[derive(Default)]
        struct Counts {
            changed: Vec<(u64, ConfigField)>,
            rejected: Vec<ConfigField>,
            layouts: Vec<usize>,
        }
        struct Sink(Arc<Mutex<Counts>>);
        impl TraceSink for Sink {
            fn on_config_changed(&mut self, e: &ConfigChangedEvent) {
                self.0.lock().unwrap().changed.push((e.revision, e.field));
            }
            fn on_config_rejected(&mut self, e: &ConfigRejectedEvent) {
                self.0.lock().unwrap().rejected.push(e.field);
            }
            fn on_layout(&mut self, e: &LayoutEvent) {
                self.0.lock().unwrap().layouts.push(e.nlayers);
            }
        }

        let counts = Arc::new(Mutex::new(Counts::default()));
        let mut canvas = GridCanvas::default();
        assert!(canvas
            .set_trace_sink(Some(Box::new(Sink(Arc::clone(&counts)))))
            .is_none());

        canvas.set_enabled(true);
        let _ = canvas.set_stride(0);
        let _ = canvas.plan(6);

        let counts = counts.lock().unwrap();
        assert_eq!(counts.changed, [(1, ConfigField::Enabled)]);
        assert_eq!(counts.rejected, [ConfigField::Stride]);
        assert_eq!(counts.layouts, [6]);
    }
}
