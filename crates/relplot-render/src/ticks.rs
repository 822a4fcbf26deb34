//! Coordinate grid lines and their labels.
//!
//! Grid spacing follows the horizontal span: half of the largest power of
//! ten not exceeding it. The same spacing is used vertically so grid cells
//! stay square in plane units.

use crate::view::ViewRange;

/// Grid lines intersecting a view range, excluding the axes themselves.
#[derive(Debug, Clone, PartialEq)]
pub struct GridLines {
    /// Distance between neighbouring lines in plane units.
    pub spacing: f64,
    /// Fractional digits to use when labelling a line.
    pub precision: usize,
    /// `x` positions of the vertical lines.
    pub vertical: Vec<f64>,
    /// `y` positions of the horizontal lines.
    pub horizontal: Vec<f64>,
}

impl GridLines {
    pub fn for_range(range: &ViewRange) -> Self {
        let span = range.x_span();
        if !(span.is_finite() && span > 0.0) {
            return Self {
                spacing: 0.0,
                precision: 0,
                vertical: Vec::new(),
                horizontal: Vec::new(),
            };
        }
        let spacing = 10f64.powf(span.log10().floor()) / 2.0;
        let precision = (3 - spacing.log10() as i64).max(0) as usize;
        Self {
            spacing,
            precision,
            vertical: ticks(range.x_min, range.x_max, spacing),
            horizontal: ticks(range.y_min, range.y_max, spacing),
        }
    }

    /// Label for a line at `value`.
    pub fn label(&self, value: f64) -> String {
        format_tick(value, self.precision)
    }
}

/// Upper bound on lines per direction; a very tall view with a narrow
/// horizontal span would otherwise produce millions.
const MAX_LINES: i64 = 1000;

/// Multiples of `spacing` within `[min, max]`, skipping zero.
fn ticks(min: f64, max: f64, spacing: f64) -> Vec<f64> {
    let first = (min / spacing).ceil() as i64;
    let last = (max / spacing).floor() as i64;
    if last.saturating_sub(first) > MAX_LINES {
        return Vec::new();
    }
    (first..=last)
        .map(|k| k as f64 * spacing)
        .filter(|v| v.abs() >= 1e-10)
        .collect()
}

/// Render a coordinate for display.
///
/// Very large and very small magnitudes use scientific notation with
/// `precision - 1` fractional digits (at least one) and a signed exponent of
/// at least two digits, as in `1.50e+04`. Everything else is
/// fixed-point with `precision` digits and trailing zeros removed.
/// Non-finite values render as `NaN`.
pub fn format_tick(value: f64, precision: usize) -> String {
    if !value.is_finite() {
        return "NaN".to_string();
    }
    let magnitude = value.abs();
    if magnitude >= 1e4 || (magnitude > 0.0 && magnitude <= 1e-4) {
        let digits = precision.saturating_sub(1).max(1);
        return scientific(value, digits);
    }
    let fixed = format!("{value:.precision$}");
    if fixed.contains('.') {
        fixed.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        fixed
    }
}

/// `d.ddde+XX` with `digits` fractional digits.
fn scientific(value: f64, digits: usize) -> String {
    let formatted = format!("{value:.digits$e}");
    let Some((mantissa, exponent)) = formatted.split_once('e') else {
        return formatted;
    };
    let Ok(exponent) = exponent.parse::<i32>() else {
        return formatted;
    };
    let sign = if exponent < 0 { '-' } else { '+' };
    format!("{mantissa}e{sign}{:02}", exponent.unsigned_abs())
}
