// Copyright 2026 the Tessella Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Compact binary event recording and decoding.
//!
//! [`RecorderSink`] implements [`TraceSink`] and encodes events into a
//! `Vec<u8>` as fixed-size little-endian records. [`decode`] reads them back
//! as an iterator of [`RecordedEvent`].
//!
//! Grid extents are stored in their raw integer form (`-1` for auto).

use tessella_core::error::GridConfigError;
use tessella_core::grid::{GridConfig, GridExtent, GridSize};
use tessella_core::trace::{
    ConfigChangedEvent, ConfigField, ConfigRejectedEvent, LayoutEvent, TraceSink,
};

// ---------------------------------------------------------------------------
// Event type discriminants
// ---------------------------------------------------------------------------

const TAG_CONFIG_CHANGED: u8 = 1;
const TAG_CONFIG_REJECTED: u8 = 2;
const TAG_LAYOUT: u8 = 3;

// ---------------------------------------------------------------------------
// RecorderSink
// ---------------------------------------------------------------------------

/// A [`TraceSink`] that encodes events into a compact binary buffer.
#[derive(Debug, Default)]
pub struct RecorderSink {
    buf: Vec<u8>,
}

impl RecorderSink {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a view of the recorded bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Consumes the recorder and returns the recorded bytes.
    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    // -- encoding helpers --------------------------------------------------

    fn write_u8(&mut self, v: u8) {
        self.buf.push(v);
    }

    fn write_i32(&mut self, v: i32) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    fn write_u64(&mut self, v: u64) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    fn write_i64(&mut self, v: i64) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    fn write_usize(&mut self, v: usize) {
        self.write_u64(u64::try_from(v).unwrap_or(u64::MAX));
    }

    fn write_field(&mut self, field: ConfigField) {
        self.write_u8(match field {
            ConfigField::Enabled => 0,
            ConfigField::Size => 1,
            ConfigField::Stride => 2,
            ConfigField::All => 3,
        });
    }

    fn write_config(&mut self, config: &GridConfig) {
        let (rows, cols) = config.size();
        self.write_u8(u8::from(config.enabled()));
        self.write_i64(rows.to_raw());
        self.write_i64(cols.to_raw());
        self.write_i32(config.stride());
    }

    fn write_error(&mut self, error: GridConfigError) {
        let (kind, payload) = match error {
            GridConfigError::ZeroStride => (0, 0),
            GridConfigError::InvalidExtent(raw) => (1, raw),
            GridConfigError::InvalidFrame => (2, 0),
        };
        self.write_u8(kind);
        self.write_i64(payload);
    }
}

impl TraceSink for RecorderSink {
    fn on_config_changed(&mut self, e: &ConfigChangedEvent) {
        self.write_u8(TAG_CONFIG_CHANGED);
        self.write_u64(e.revision);
        self.write_field(e.field);
        self.write_config(&e.config);
    }

    fn on_config_rejected(&mut self, e: &ConfigRejectedEvent) {
        self.write_u8(TAG_CONFIG_REJECTED);
        self.write_u64(e.revision);
        self.write_field(e.field);
        self.write_error(e.error);
    }

    fn on_layout(&mut self, e: &LayoutEvent) {
        self.write_u8(TAG_LAYOUT);
        self.write_u64(e.revision);
        self.write_usize(e.nlayers);
        self.write_usize(e.size.rows);
        self.write_usize(e.size.cols);
        self.write_i32(e.stride);
        self.write_u8(u8::from(e.enabled));
    }
}

// ---------------------------------------------------------------------------
// Decoder
// ---------------------------------------------------------------------------

/// A decoded event from a binary recording.
#[derive(Clone, Debug)]
pub enum RecordedEvent {
    /// A [`ConfigChangedEvent`].
    ConfigChanged(ConfigChangedEvent),
    /// A [`ConfigRejectedEvent`].
    ConfigRejected(ConfigRejectedEvent),
    /// A [`LayoutEvent`].
    Layout(LayoutEvent),
}

/// Decodes a byte slice produced by [`RecorderSink`] into an iterator of
/// [`RecordedEvent`].
///
/// Iteration stops at the first truncated or malformed record.
pub fn decode(bytes: &[u8]) -> DecodeIter<'_> {
    DecodeIter {
        data: bytes,
        pos: 0,
    }
}

/// Iterator over decoded events.
#[derive(Debug)]
pub struct DecodeIter<'a> {
    data: &'a [u8],
    pos: usize,
}

impl DecodeIter<'_> {
    fn take<const N: usize>(&mut self) -> Option<[u8; N]> {
        let bytes = self.data.get(self.pos..self.pos + N)?.try_into().ok()?;
        self.pos += N;
        Some(bytes)
    }

    fn read_u8(&mut self) -> Option<u8> {
        self.take::<1>().map(|[v]| v)
    }

    fn read_i32(&mut self) -> Option<i32> {
        self.take().map(i32::from_le_bytes)
    }

    fn read_u64(&mut self) -> Option<u64> {
        self.take().map(u64::from_le_bytes)
    }

    fn read_i64(&mut self) -> Option<i64> {
        self.take().map(i64::from_le_bytes)
    }

    fn read_usize(&mut self) -> Option<usize> {
        usize::try_from(self.read_u64()?).ok()
    }

    fn read_field(&mut self) -> Option<ConfigField> {
        Some(match self.read_u8()? {
            0 => ConfigField::Enabled,
            1 => ConfigField::Size,
            2 => ConfigField::Stride,
            3 => ConfigField::All,
            _ => return None,
        })
    }

    fn read_config(&mut self) -> Option<GridConfig> {
        let enabled = self.read_u8()? != 0;
        let rows = GridExtent::try_from(self.read_i64()?).ok()?;
        let cols = GridExtent::try_from(self.read_i64()?).ok()?;
        let stride = self.read_i32()?;
        GridConfig::new(enabled, rows, cols, stride).ok()
    }

    fn read_error(&mut self) -> Option<GridConfigError> {
        let kind = self.read_u8()?;
        let payload = self.read_i64()?;
        Some(match kind {
            0 => GridConfigError::ZeroStride,
            1 => GridConfigError::InvalidExtent(payload),
            2 => GridConfigError::InvalidFrame,
            _ => return None,
        })
    }

    fn decode_config_changed(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::ConfigChanged(ConfigChangedEvent {
            revision: self.read_u64()?,
            field: self.read_field()?,
            config: self.read_config()?,
        }))
    }

    fn decode_config_rejected(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::ConfigRejected(ConfigRejectedEvent {
            revision: self.read_u64()?,
            field: self.read_field()?,
            error: self.read_error()?,
        }))
    }

    fn decode_layout(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::Layout(LayoutEvent {
            revision: self.read_u64()?,
            nlayers: self.read_usize()?,
            size: GridSize {
                rows: self.read_usize()?,
                cols: self.read_usize()?,
            },
            stride: self.read_i32()?,
            enabled: self.read_u8()? != 0,
        }))
    }
}

impl Iterator for DecodeIter<'_> {
    type Item = RecordedEvent;

    fn next(&mut self) -> Option<Self::Item> {
        let tag = self.read_u8()?;
        match tag {
            TAG_CONFIG_CHANGED => self.decode_config_changed(),
            TAG_CONFIG_REJECTED => self.decode_config_rejected(),
            TAG_LAYOUT => self.decode_layout(),
            _ => None, // unknown tag → stop iteration
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
