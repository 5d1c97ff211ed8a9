use std::io::{self, Write};

use crate::config::ModelKind;
use crate::simulation::Grid;

/// Intensity ramp, lowest to highest.
pub const LEVELS: &[u8] = b" .-=coaA@#";

/// Ramp character for a cell value. Values outside `[0, 1]` saturate.
#[inline]
pub fn level_char(value: f64) -> char {
    let top = LEVELS.len() - 1;
    let index = (value * LEVELS.len() as f64).floor();
    let index = if index.is_nan() || index < 0.0 {
        0
    } else {
        (index as usize).min(top)
    };
    LEVELS[index] as char
}

/// Render one frame: two characters per cell, one line per row.
pub fn render_frame(grid: &Grid) -> String {
    let mut out = String::with_capacity((grid.width() * 2 + 1) * grid.height());
    for row in grid.rows() {
        for &value in row {
            let c = level_char(value);
            out.push(c);
            out.push(c);
        }
        out.push('\n');
    }
    out
}

/// Write a frame to `out`.
pub fn display<W: Write>(out: &mut W, grid: &Grid) -> io::Result<()> {
    out.write_all(render_frame(grid).as_bytes())?;
    out.flush()
}

/// Completion notice for the given model.
pub fn finished_message(kind: ModelKind) -> &'static str {
    match kind {
        ModelKind::SmoothLife => {
            "Simulation finished. All cells have reached the end state (value 0)."
        }
        ModelKind::Conway => "Simulation finished. The grid stopped changing.",
    }
}
