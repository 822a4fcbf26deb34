//! Plot implicit relations to SVG.
//!
//! Usage: `relplot [RELATION]... [--config FILE] [--view X0,X1,Y0,Y1] [--output FILE]`

use std::fs;
use std::io::Write;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing::{error, info, warn};

use relplot_cli::svg::{SvgDocument, PALETTE};
use relplot_cli::{format_diagnostic, init_logging, parse_view};
use relplot_expr::{Environment, Relation};
use relplot_render::{PlotConfig, Sampler, ViewRange};

#[derive(Parser, Debug)]
#[command(name = "relplot")]
#[command(about = "Plot implicit relations such as 'x^2 + y^2 = 25' to SVG")]
struct Args {
    /// Relations to plot, e.g. "y = sin(x)" or "x^2 + y^2 < 9"
    relations: Vec<String>,

    /// Plot file (YAML) with view, size, sampler settings and relations
    #[arg(long)]
    config: Option<PathBuf>,

    /// Visible range as XMIN,XMAX,YMIN,YMAX
    #[arg(long, value_parser = parse_view, allow_hyphen_values = true)]
    view: Option<ViewRange>,

    /// Plot width in pixels
    #[arg(long)]
    width: Option<u32>,

    /// Plot height in pixels
    #[arg(long)]
    height: Option<u32>,

    /// Draw coordinate grid lines and labels
    #[arg(long)]
    grid: bool,

    /// Output file (stdout when omitted)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn main() -> Result<()> {
    init_logging();
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => PlotConfig::load(path)
            .with_context(|| format!("loading plot file {}", path.display()))?,
        None => PlotConfig::default(),
    };
    if let Some(view) = args.view {
        config.view = view;
    }
    if let Some(width) = args.width {
        config.width = width;
    }
    if let Some(height) = args.height {
        config.height = height;
    }
    config.relations.extend(args.relations.iter().cloned());
    config.validate()?;

    if config.relations.is_empty() {
        bail!("no relations given");
    }

    let mut env = Environment::standard();
    config.register_constants(&mut env)?;
    let axes = env.axes().context("environment has no x/y axes")?;

    let mut relations = Vec::with_capacity(config.relations.len());
    for text in &config.relations {
        let mut relation = Relation::new(text.as_str());
        match relation.compile(&env) {
            Ok(()) => relations.push(relation),
            Err(e) => error!("{}", format_diagnostic(text, &e)),
        }
    }
    if relations.is_empty() {
        bail!("none of {} relation(s) compiled", config.relations.len());
    }

    let viewport = config.viewport();
    let mut sampler = Sampler::new(axes, config.sampler)?;
    let mut doc = SvgDocument::new(config.width, config.height);
    if args.grid {
        doc.grid(&viewport);
    }

    for (i, relation) in relations.iter_mut().enumerate() {
        doc.begin_relation(relation.text(), PALETTE[i % PALETTE.len()]);
        match sampler.sample_and_draw(relation, &viewport, |a, b| doc.segment(a, b)) {
            Ok(segments) => info!(relation = %relation.text(), segments, "plotted"),
            Err(e) => warn!(relation = %relation.text(), "skipped: {}", e),
        }
        doc.end_relation();
    }

    let svg = doc.finish();
    match &args.output {
        Some(path) => {
            fs::write(path, svg).with_context(|| format!("writing {}", path.display()))?;
            info!("wrote {}", path.display());
        }
        None => std::io::stdout()
            .lock()
            .write_all(svg.as_bytes())
            .context("writing to stdout")?,
    }
    Ok(())
}
