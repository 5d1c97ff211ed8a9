//! Self-contained SVG animation of a recorded history.
//!
//! Every frame is a hidden `<g>` of 1x1 rectangles, switched on by a `<set>`
//! at `index * SVG_FRAME_MS`. The last frame stays visible once the
//! animation ends.

use std::fs;
use std::path::Path;

use crate::config::{Config, SVG_FRAME_MS};
use crate::error::SimError;
use crate::simulation::{Grid, History};

/// Grey `#rrggbb` for `value` normalised by `max`. A zero `max` maps to black.
pub fn grey_hex(value: f64, max: f64) -> String {
    let normalised = if max > 0.0 { (value / max).clamp(0.0, 1.0) } else { 0.0 };
    let grey = (255.0 * normalised) as u8;
    format!("#{grey:02x}{grey:02x}{grey:02x}")
}

fn write_frame(svg: &mut String, index: usize, grid: &Grid, max: f64, last: bool) {
    svg.push_str(r#"<g display="none">"#);
    for (y, row) in grid.rows().enumerate() {
        for (x, &value) in row.iter().enumerate() {
            svg.push_str(&format!(
                r#"<rect x="{}" y="{}" width="1" height="1" fill="{}"/>"#,
                x,
                y,
                grey_hex(value, max)
            ));
        }
    }
    let fill = if last { "freeze" } else { "remove" };
    svg.push_str(&format!(
        r#"<set attributeName="display" to="inline" begin="{}ms" dur="{}ms" fill="{}"/>"#,
        index as u64 * SVG_FRAME_MS,
        SVG_FRAME_MS,
        fill
    ));
    svg.push_str("</g>");
}

/// Build the SVG document for `history`.
pub fn render_animation(history: &History, config: &Config) -> String {
    let max = history.max_value();
    let frames = history.frames();

    let mut svg = format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}" viewBox="0 0 {} {}">"#,
        config.width, config.height, config.width, config.height
    );
    for (index, grid) in frames.iter().enumerate() {
        write_frame(&mut svg, index, grid, max, index + 1 == frames.len());
    }
    svg.push_str("</svg>\n");
    svg
}

/// Render `history` and write it to `path`.
pub fn export_animation(history: &History, config: &Config, path: &Path) -> Result<(), SimError> {
    let svg = render_animation(history, config);
    fs::write(path, svg).map_err(|source| SimError::RenderExport {
        path: path.to_path_buf(),
        source,
    })?;
    log::info!(
        "Wrote {} frame(s) to {}",
        history.len(),
        path.display()
    );
    Ok(())
}
