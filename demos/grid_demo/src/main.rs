// Copyright 2026 the Tessella Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Lays out synthetic layer lists on a grid canvas.
//!
//! Walks a handful of configurations (auto sizing, fixed rows, reversed
//! stride, an over-full grid), printing each layout as an ASCII table and the
//! canvas-space offset of every layer. Events go to a
//! [`PrettyPrintSink`](tessella_debug::pretty::PrettyPrintSink) on stdout and
//! a [`RecorderSink`](tessella_debug::recorder::RecorderSink), which is
//! exported as `grid_trace.json` at the end.

use std::fs::File;
use std::io::{self, BufWriter, Write};

use kurbo::Size;
use tessella_core::error::GridConfigError;
use tessella_core::frame::GridFrame;
use tessella_core::grid::{GridCanvas, GridCell, GridConfig, GridExtent, GridPlan};
use tessella_core::trace::{ConfigChangedEvent, ConfigRejectedEvent, LayoutEvent, TraceSink};

use tessella_debug::pretty::PrettyPrintSink;
use tessella_debug::recorder::RecorderSink;
use tessella_debug::shared::SharedSink;

/// Extent of every synthetic layer, in canvas units.
const LAYER_SIZE: Size = Size::new(64.0, 48.0);
/// Gap between grid cells.
const SPACING: f64 = 8.0;

/// Forwards every event to two sinks.
struct Tee<A, B>(A, B);

impl<A: TraceSink, B: TraceSink> TraceSink for Tee<A, B> {
    fn on_config_changed(&mut self, e: &ConfigChangedEvent) {
        self.0.on_config_changed(e);
        self.1.on_config_changed(e);
    }

    fn on_config_rejected(&mut self, e: &ConfigRejectedEvent) {
        self.0.on_config_rejected(e);
        self.1.on_config_rejected(e);
    }

    fn on_layout(&mut self, e: &LayoutEvent) {
        self.0.on_layout(e);
        self.1.on_layout(e);
    }
}

fn main() -> io::Result<()> {
    // -- sinks -------------------------------------------------------------
    let recorder = SharedSink::new(RecorderSink::new());
    let pretty = PrettyPrintSink::new(Box::new(io::stdout()));

    // -- canvas ------------------------------------------------------------
    let mut canvas = GridCanvas::new(GridConfig::DEFAULT);
    canvas.set_trace_sink(Some(Box::new(Tee(pretty, recorder.clone()))));
    canvas.subscribe(|config| {
        println!("[listener] grid configuration changed (enabled={})", config.enabled());
    });

    let frame = GridFrame::new(LAYER_SIZE, SPACING).map_err(invalid_input)?;

    // 1. Disabled: everything stacks in one cell.
    show(&mut canvas, &frame, 5)?;

    // 2. Auto × auto.
    canvas.set_enabled(true);
    show(&mut canvas, &frame, 5)?;

    // 3. Two fixed rows, auto columns.
    canvas.set_size_raw(2, -1).map_err(invalid_input)?;
    show(&mut canvas, &frame, 5)?;

    // 4. Reversed placement: the last layer takes the first cell.
    canvas.set_size(GridExtent::Auto, GridExtent::Auto);
    canvas.set_stride(-1).map_err(invalid_input)?;
    show(&mut canvas, &frame, 3)?;

    // 5. Over-full 2×2 grid with two layers per cell wraps around.
    canvas.set_size_raw(2, 2).map_err(invalid_input)?;
    canvas.set_stride(2).map_err(invalid_input)?;
    show(&mut canvas, &frame, 10)?;

    // 6. A zero stride is refused and the grid is unchanged.
    if let Err(e) = canvas.set_stride(0) {
        println!("set_stride(0) rejected: {e}; stride is still {}", canvas.stride());
    }

    // -- export ------------------------------------------------------------
    let bytes = recorder.with(|rec| rec.as_bytes().to_vec());
    let file = File::create("grid_trace.json")?;
    let mut writer = BufWriter::new(file);
    tessella_debug::json::export(&bytes, &mut writer)?;
    writer.flush()?;
    println!("Wrote grid_trace.json ({} bytes recorded)", bytes.len());

    Ok(())
}

fn invalid_input(e: GridConfigError) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidInput, e)
}

/// Plans `nlayers` layers and prints the grid and per-layer offsets.
fn show(canvas: &mut GridCanvas, frame: &GridFrame, nlayers: usize) -> io::Result<()> {
    let plan = canvas.plan(nlayers);
    let mut out = io::stdout().lock();
    writeln!(
        out,
        "\n{nlayers} layers, stride {} -> {}x{} grid, bounds {:?}",
        canvas.stride(),
        plan.size.rows,
        plan.size.cols,
        frame.bounds(plan.size),
    )?;
    write_table(&mut out, &plan)?;
    for (index, cell) in plan.cells.iter().enumerate() {
        let offset = frame.offset(*cell);
        writeln!(
            out,
            "  layer {index} -> ({}, {}) at ({:.0}, {:.0})",
            cell.row, cell.col, offset.x, offset.y,
        )?;
    }
    Ok(())
}

/// Prints one row per grid row, each cell listing the layers it holds.
fn write_table(out: &mut impl Write, plan: &GridPlan) -> io::Result<()> {
    for row in 0..plan.size.rows {
        let cells: Vec<String> = (0..plan.size.cols)
            .map(|col| {
                let layers: Vec<String> = plan
                    .layers_in(GridCell::new(row, col))
                    .map(|i| i.to_string())
                    .collect();
                if layers.is_empty() {
                    "-".to_owned()
                } else {
                    layers.join(",")
                }
            })
            .collect();
        writeln!(out, "  | {} |", cells.join(" | "))?;
    }
    Ok(())
}
