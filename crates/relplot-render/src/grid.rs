//! Sampling grid storage.

use crate::config::SamplerConfig;
use crate::view::Viewport;

/// Marks a grid point not yet evaluated this pass.
///
/// A relation can legitimately evaluate to NaN or infinity, so the sentinel
/// is the largest finite `f64` rather than a non-finite value.
pub const UNSAMPLED: f64 = f64::MAX;

/// Row-major grid of relation values at fine-step spacing.
///
/// The buffer is reused across frames and relations; [`resize`](Self::resize)
/// only reallocates when the point count grows.
#[derive(Debug, Clone, Default)]
pub struct SamplingGrid {
    rows: usize,
    cols: usize,
    values: Vec<f64>,
}

impl SamplingGrid {
    pub fn new() -> Self {
        Self::default()
    }

    /// Point counts covering `viewport` at `config.fine_step` spacing.
    ///
    /// Both counts span whole coarse cells, so the last row and column may
    /// lie past the far edge of the viewport.
    pub fn dimensions(viewport: &Viewport, config: &SamplerConfig) -> (usize, usize) {
        let refinement = config.refinement.max(1);
        let coarse = config.fine_step.max(1) * refinement;
        let points = |pixels: u32| (pixels.div_ceil(coarse) * refinement) as usize + 1;
        (points(viewport.height), points(viewport.width))
    }

    /// Set the shape and mark every point unsampled.
    pub fn resize(&mut self, rows: usize, cols: usize) {
        self.rows = rows;
        self.cols = cols;
        self.values.clear();
        self.values.resize(rows * cols, UNSAMPLED);
    }

    /// Mark every point unsampled, keeping the shape.
    pub fn reset(&mut self) {
        self.values.fill(UNSAMPLED);
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.values[self.index(row, col)]
    }

    #[inline]
    pub fn set(&mut self, row: usize, col: usize, value: f64) {
        let index = self.index(row, col);
        self.values[index] = value;
    }

    #[inline]
    pub fn is_sampled(&self, row: usize, col: usize) -> bool {
        self.get(row, col) != UNSAMPLED
    }

    /// Number of points holding a value.
    pub fn sampled_count(&self) -> usize {
        self.values.iter().filter(|v| **v != UNSAMPLED).count()
    }

    #[inline]
    fn index(&self, row: usize, col: usize) -> usize {
        debug_assert!(row < self.rows && col < self.cols);
        row * self.cols + col
    }
}
