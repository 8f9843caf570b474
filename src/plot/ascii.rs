//! ASCII plotting for terminal output.
//!
//! This is intentionally "dumb" (fixed-size grid), optimized for:
//! - quick visual sanity checks in a terminal
//! - deterministic output (helpful for golden tests)
//!
//! Plot elements:
//! - flux samples: `.`
//! - flagged dips: `v` (drawn last, so they stay visible)

use crate::domain::LightCurvePoint;

/// Render a light curve with the given dip indices highlighted.
pub fn render_light_curve(points: &[LightCurvePoint], dips: &[usize], width: usize, height: usize) -> String {
    let width = width.max(10);
    let height = height.max(5);

    let (t_min, t_max) = axis_range(points.iter().map(|p| p.t)).unwrap_or((0.0, 1.0));
    let (f_min, f_max) = axis_range(points.iter().map(|p| p.flux)).unwrap_or((0.0, 1.0));
    let (f_min, f_max) = pad_range(f_min, f_max, 0.05);

    let mut grid = vec![vec![' '; width]; height];

    for p in points {
        let x = map_x(p.t, t_min, t_max, width);
        let y = map_y(p.flux, f_min, f_max, height);
        grid[y][x] = '.';
    }
    for p in dips.iter().filter_map(|&i| points.get(i)) {
        let x = map_x(p.t, t_min, t_max, width);
        let y = map_y(p.flux, f_min, f_max, height);
        grid[y][x] = 'v';
    }

    let mut out = String::new();
    out.push_str(&format!(
        "Plot: t=[{t_min:.3}, {t_max:.3}] | flux=[{f_min:.4}, {f_max:.4}] | dips={}\n",
        dips.len()
    ));
    for row in grid {
        out.push_str(row.into_iter().collect::<String>().trim_end());
        out.push('\n');
    }
    out
}

fn axis_range(values: impl Iterator<Item = f64>) -> Option<(f64, f64)> {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for v in values {
        min = min.min(v);
        max = max.max(v);
    }
    if !(min.is_finite() && max.is_finite()) {
        return None;
    }
    if max > min {
        Some((min, max))
    } else {
        // Flat axis: open it up so every point lands mid-grid.
        Some((min - 0.5, max + 0.5))
    }
}

fn pad_range(min: f64, max: f64, frac: f64) -> (f64, f64) {
    let span = (max - min).abs();
    let pad = (span * frac).max(1e-12);
    (min - pad, max + pad)
}

fn map_x(t: f64, t_min: f64, t_max: f64, width: usize) -> usize {
    let width = width.max(2);
    let u = ((t - t_min) / (t_max - t_min)).clamp(0.0, 1.0);
    (u * (width as f64 - 1.0)).round() as usize
}

fn map_y(y: f64, y_min: f64, y_max: f64, height: usize) -> usize {
    let height = height.max(2);
    let u = ((y - y_min) / (y_max - y_min)).clamp(0.0, 1.0);
    // y=top is max -> row 0
    (height as f64 - 1.0 - (u * (height as f64 - 1.0))).round() as usize
}
