//! Screen geometry shared by the terminal views.

use ratatui::layout::Rect;

/// Terminal cells are roughly twice as tall as they are wide.
pub const CELL_ASPECT: u16 = 2;

/// Largest rect inside `area` that shows a square world region, centered.
///
/// With half-block pixels every cell is one pixel wide and two pixels tall,
/// so a square of `n` pixels is `n` columns by `n / 2` rows.
pub fn fit_square(area: Rect) -> Rect {
    let side = area.width.min(area.height.saturating_mul(CELL_ASPECT));
    let width = side - side % CELL_ASPECT;
    let height = width / CELL_ASPECT;
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

/// Fixed-size rect centered in `area`, shrunk to fit if needed.
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

/// Grid spacing from the 1-2-5 series giving at most `max_lines` lines
/// across `span`.
pub fn grid_step(span: f64, max_lines: usize) -> f64 {
    if !(span > 0.0) || max_lines == 0 {
        return 1.0;
    }
    let raw = span / max_lines as f64;
    let magnitude = 10f64.powf(raw.log10().floor());
    for factor in [1.0, 2.0, 5.0, 10.0] {
        let step = factor * magnitude;
        if step >= raw {
            return step;
        }
    }
    10.0 * magnitude
}

/// Multiples of `step` inside `[low, high]`.
pub fn grid_lines(low: f64, high: f64, step: f64) -> Vec<f64> {
    let first = (low / step).ceil() as i64;
    let last = (high / step).floor() as i64;
    (first..=last).map(|n| n as f64 * step).collect()
}
