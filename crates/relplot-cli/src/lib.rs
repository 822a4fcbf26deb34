//! Relplot command-line host.
//!
//! Compiles relations given on the command line or in a plot file, traces
//! them and writes the result as SVG.

pub mod svg;

use relplot_expr::RelationError;
use relplot_render::ViewRange;
use tracing_subscriber::{fmt, EnvFilter};

/// Initialize logging with a default filter.
///
/// Use `RUST_LOG` environment variable to override the default filter.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new("info,relplot_cli=debug,relplot_render=info,relplot_expr=info")
    });

    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Parse `XMIN,XMAX,YMIN,YMAX`.
pub fn parse_view(arg: &str) -> Result<ViewRange, String> {
    let parts: Vec<f64> = arg
        .split(',')
        .map(|part| {
            part.trim()
                .parse::<f64>()
                .map_err(|e| format!("'{}': {}", part.trim(), e))
        })
        .collect::<Result<_, _>>()?;
    let &[x_min, x_max, y_min, y_max] = parts.as_slice() else {
        return Err(format!(
            "expected XMIN,XMAX,YMIN,YMAX, got {} value(s)",
            parts.len()
        ));
    };
    let range = ViewRange::new(x_min, x_max, y_min, y_max);
    range.validate().map_err(|e| e.to_string())?;
    Ok(range)
}

/// Two-line diagnostic with a caret under the failing offset.
pub fn format_diagnostic(text: &str, error: &RelationError) -> String {
    let offset = error.offset().min(text.len());
    let column = text
        .get(..offset)
        .map(|prefix| prefix.chars().count())
        .unwrap_or(offset);
    format!("{error}\n  {text}\n  {:>width$}", "^", width = column + 1)
}
