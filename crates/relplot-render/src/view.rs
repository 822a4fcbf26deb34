//! Mapping between pixel and mathematical coordinates.
//!
//! Screen coordinates grow right and *down*; mathematical coordinates grow
//! right and up. Pixel `(0, 0)` is the top-left corner of the plot and maps
//! to `(x_min, y_max)`.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Visible window of the plane.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewRange {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

impl Default for ViewRange {
    fn default() -> Self {
        Self {
            x_min: -15.0,
            x_max: 15.0,
            y_min: -10.0,
            y_max: 10.0,
        }
    }
}

impl ViewRange {
    pub fn new(x_min: f64, x_max: f64, y_min: f64, y_max: f64) -> Self {
        Self {
            x_min,
            x_max,
            y_min,
            y_max,
        }
    }

    pub fn x_span(&self) -> f64 {
        self.x_max - self.x_min
    }

    pub fn y_span(&self) -> f64 {
        self.y_max - self.y_min
    }

    /// Both spans must be finite and positive.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let ok = |span: f64| span.is_finite() && span > 0.0;
        if !ok(self.x_span()) {
            return Err(ConfigError::Invalid(format!(
                "x range [{}, {}] is empty",
                self.x_min, self.x_max
            )));
        }
        if !ok(self.y_span()) {
            return Err(ConfigError::Invalid(format!(
                "y range [{}, {}] is empty",
                self.y_min, self.y_max
            )));
        }
        Ok(())
    }
}

/// A point of the plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// A view range projected onto a pixel rectangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub range: ViewRange,
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub fn new(range: ViewRange, width: u32, height: u32) -> Self {
        Self {
            range,
            width,
            height,
        }
    }

    #[inline]
    pub fn screen_to_math(&self, sx: f64, sy: f64) -> Point {
        Point {
            x: self.range.x_min + sx * self.range.x_span() / f64::from(self.width),
            y: self.range.y_max - sy * self.range.y_span() / f64::from(self.height),
        }
    }

    #[inline]
    pub fn math_to_screen(&self, point: Point) -> (f64, f64) {
        (
            (point.x - self.range.x_min) * f64::from(self.width) / self.range.x_span(),
            (self.range.y_max - point.y) * f64::from(self.height) / self.range.y_span(),
        )
    }
}
