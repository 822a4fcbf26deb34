//! Two-pass implicit curve tracer.
//!
//! # Passes
//!
//! 1. **Coarse**: the relation is evaluated at every fine-grid point that
//!    lies on a coarse-grid intersection (every `refinement`-th row and
//!    column). All other points are marked [`UNSAMPLED`].
//! 2. **Contour**: each coarse cell is classified by the signs of its four
//!    corners. Uniform cells are skipped. Inside an ambiguous cell every
//!    fine point still unsampled is evaluated on demand, and each fine
//!    sub-cell is passed to [`march_cell`].
//!
//! Fine points shared between neighbouring ambiguous cells are evaluated
//! once per frame. Smooth regions away from the curve only pay for the
//! coarse lattice.
//!
//! # Limitations
//!
//! A curve that enters and leaves a coarse cell through the same edge
//! without changing any corner sign is missed. This is inherent to sampling
//! at a fixed resolution.
//!
//! [`UNSAMPLED`]: crate::grid::UNSAMPLED

use relplot_expr::{Axes, EvalError, Evaluator, Program, Relation};
use tracing::{debug, instrument};

use crate::config::SamplerConfig;
use crate::error::{ConfigError, SampleError};
use crate::grid::SamplingGrid;
use crate::marching::{march_cell, Corners, PixelPoint};
use crate::view::Viewport;

/// Per-frame work counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SampleStats {
    /// Segments passed to the draw callback.
    pub segments: usize,
    /// Program evaluations performed.
    pub evaluations: usize,
    /// Coarse cells that needed refinement.
    pub refined_cells: usize,
}

/// Traces relations over a viewport, reusing its grid between calls.
///
/// A sampler drives the axis variables it was built with. Two samplers
/// sharing an [`Environment`](relplot_expr::Environment) must not run
/// concurrently.
#[derive(Debug)]
pub struct Sampler {
    axes: Axes,
    config: SamplerConfig,
    grid: SamplingGrid,
    evaluator: Evaluator,
    stats: SampleStats,
}

impl Sampler {
    pub fn new(axes: Axes, config: SamplerConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            axes,
            config,
            grid: SamplingGrid::new(),
            evaluator: Evaluator::new(),
            stats: SampleStats::default(),
        })
    }

    pub fn config(&self) -> &SamplerConfig {
        &self.config
    }

    /// Values from the most recent call.
    pub fn grid(&self) -> &SamplingGrid {
        &self.grid
    }

    /// Counters from the most recent call.
    pub fn stats(&self) -> SampleStats {
        self.stats
    }

    /// Trace `relation` over `viewport`, calling `draw` for every segment.
    ///
    /// Returns the number of segments drawn. If evaluation fails the
    /// relation is invalidated and the error returned; segments drawn before
    /// the failure stand.
    #[instrument(skip_all, fields(relation = %relation.text()))]
    pub fn sample_and_draw<F>(
        &mut self,
        relation: &mut Relation,
        viewport: &Viewport,
        mut draw: F,
    ) -> Result<usize, SampleError>
    where
        F: FnMut(PixelPoint, PixelPoint),
    {
        if !relation.is_valid() {
            return Err(SampleError::InvalidRelation);
        }
        self.stats = SampleStats::default();
        let (rows, cols) = SamplingGrid::dimensions(viewport, &self.config);
        self.grid.resize(rows, cols);

        let mut pass = Pass {
            axes: &self.axes,
            evaluator: &mut self.evaluator,
            grid: &mut self.grid,
            stats: &mut self.stats,
            program: relation.program(),
            viewport,
            fine_step: self.config.fine_step as usize,
            refinement: self.config.refinement as usize,
        };
        let result = pass.coarse().and_then(|()| pass.contour(&mut draw));

        match result {
            Ok(()) => {
                debug!(
                    segments = self.stats.segments,
                    evaluations = self.stats.evaluations,
                    refined_cells = self.stats.refined_cells,
                    "traced relation"
                );
                Ok(self.stats.segments)
            }
            Err(error) => {
                debug!(
                    %error,
                    segments = self.stats.segments,
                    "evaluation failed, invalidating relation"
                );
                relation.invalidate();
                Err(SampleError::Evaluation(error))
            }
        }
    }
}

/// Borrowed state for one call of [`Sampler::sample_and_draw`].
struct Pass<'a> {
    axes: &'a Axes,
    evaluator: &'a mut Evaluator,
    grid: &'a mut SamplingGrid,
    stats: &'a mut SampleStats,
    program: &'a Program,
    viewport: &'a Viewport,
    fine_step: usize,
    refinement: usize,
}

impl Pass<'_> {
    fn sample(&mut self, row: usize, col: usize) -> Result<f64, EvalError> {
        let point = self
            .viewport
            .screen_to_math((col * self.fine_step) as f64, (row * self.fine_step) as f64);
        self.axes.set(point.x, point.y);
        let value = self.evaluator.evaluate(self.program)?;
        self.grid.set(row, col, value);
        self.stats.evaluations += 1;
        Ok(value)
    }

    fn coarse(&mut self) -> Result<(), EvalError> {
        for row in (0..self.grid.rows()).step_by(self.refinement) {
            for col in (0..self.grid.cols()).step_by(self.refinement) {
                self.sample(row, col)?;
            }
        }
        Ok(())
    }

    fn contour<F>(&mut self, draw: &mut F) -> Result<(), EvalError>
    where
        F: FnMut(PixelPoint, PixelPoint),
    {
        let r = self.refinement;
        let last_row = self.grid.rows().saturating_sub(r);
        let last_col = self.grid.cols().saturating_sub(r);
        for row in (0..last_row).step_by(r) {
            for col in (0..last_col).step_by(r) {
                let corners = Corners {
                    top_left: self.grid.get(row, col),
                    top_right: self.grid.get(row, col + r),
                    bottom_left: self.grid.get(row + r, col),
                    bottom_right: self.grid.get(row + r, col + r),
                };
                if corners.has_crossing() {
                    self.stats.refined_cells += 1;
                    self.refine(row, col, draw)?;
                }
            }
        }
        Ok(())
    }

    /// Sample the fine block of the coarse cell at (`row`, `col`) and march
    /// its sub-cells.
    fn refine<F>(&mut self, row: usize, col: usize, draw: &mut F) -> Result<(), EvalError>
    where
        F: FnMut(PixelPoint, PixelPoint),
    {
        let r = self.refinement;
        let step = self.fine_step as i32;
        for fine_row in row..=row + r {
            for fine_col in col..=col + r {
                if !self.grid.is_sampled(fine_row, fine_col) {
                    self.sample(fine_row, fine_col)?;
                }
                if fine_row == row || fine_col == col {
                    continue;
                }
                let corners = Corners {
                    top_left: self.grid.get(fine_row - 1, fine_col - 1),
                    top_right: self.grid.get(fine_row - 1, fine_col),
                    bottom_left: self.grid.get(fine_row, fine_col - 1),
                    bottom_right: self.grid.get(fine_row, fine_col),
                };
                let origin = PixelPoint::new(
                    (fine_col - 1) as i32 * step,
                    (fine_row - 1) as i32 * step,
                );
                self.stats.segments += march_cell(origin, step, &corners, &mut |segment| {
                    draw(segment.start, segment.end)
                });
            }
        }
        Ok(())
    }
}
