//! Relplot Renderer.
//!
//! Turns a compiled [`Relation`](relplot_expr::Relation) into line segments
//! approximating its zero contour.
//!
//! # Architecture
//!
//! ```text
//! Relation ──► Sampler ──► SamplingGrid ──► march_cell ──► draw(a, b)
//!                 │
//!                 └── Viewport (pixel <-> plane mapping)
//! ```
//!
//! - [`view`]: view range and pixel mapping
//! - [`grid`]: reusable value grid with an unsampled sentinel
//! - [`marching`]: per-cell sign classification and interpolation
//! - [`sampler`]: coarse lattice pass, then refinement of ambiguous cells
//! - [`ticks`]: coordinate grid lines and labels for a host to draw
//! - [`config`]: sampling resolution and YAML plot files
//!
//! Drawing itself is left to the host through a callback.

pub mod config;
pub mod error;
pub mod grid;
pub mod marching;
pub mod sampler;
pub mod ticks;
pub mod view;

pub use config::{PlotConfig, SamplerConfig};
pub use error::{ConfigError, SampleError};
pub use grid::{SamplingGrid, UNSAMPLED};
pub use marching::{march_cell, Corners, PixelPoint, Segment};
pub use sampler::{SampleStats, Sampler};
pub use ticks::{format_tick, GridLines};
pub use view::{Point, ViewRange, Viewport};
