// Copyright 2026 the Tessella Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! JSON exporter for recorded grid events.
//!
//! [`export`] reads recorded bytes from a [`RecorderSink`](super::recorder::RecorderSink)
//! and writes a JSON array with one object per event, in recording order.
//! Extents use their raw form: `-1` for auto.

use std::io::{self, Write};

use serde_json::{Value, json};

use tessella_core::grid::GridConfig;

use crate::recorder::{RecordedEvent, decode};

/// Exports recorded events as a pretty-printed JSON array.
pub fn export(bytes: &[u8], writer: &mut dyn Write) -> io::Result<()> {
    let events: Vec<Value> = decode(bytes).map(|recorded| to_value(&recorded)).collect();
    serde_json::to_writer_pretty(writer, &events)?;
    Ok(())
}

fn config_value(config: &GridConfig) -> Value {
    let (rows, cols) = config.size();
    json!({
        "enabled": config.enabled(),
        "rows": rows.to_raw(),
        "cols": cols.to_raw(),
        "stride": config.stride(),
    })
}

fn to_value(recorded: &RecordedEvent) -> Value {
    match recorded {
        RecordedEvent::ConfigChanged(e) => json!({
            "event": "config_changed",
            "revision": e.revision,
            "field": e.field.as_str(),
            "config": config_value(&e.config),
        }),
        RecordedEvent::ConfigRejected(e) => json!({
            "event": "config_rejected",
            "revision": e.revision,
            "field": e.field.as_str(),
            "error": e.error.to_string(),
        }),
        RecordedEvent::Layout(e) => json!({
            "event": "layout",
            "revision": e.revision,
            "nlayers": e.nlayers,
            "rows": e.size.rows,
            "cols": e.size.cols,
            "stride": e.stride,
            "enabled": e.enabled,
        }),
    }
}
