// File: crates/streamgraph-demo/src/main.rs
// Summary: Upload a CSV of series scores, render the streamgraph and write SVG/PNG snapshots.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use stream_core::svg::write_svg;
use stream_core::{theme, CsvUpload, PointerEvent, Scene, SeriesConfig, StreamView, Streamgraph};
use stream_render_skia::{RasterOptions, SkiaRenderer};

#[derive(Parser, Debug)]
#[command(name = "streamgraph-demo", about = "Render a CSV of series scores as a streamgraph")]
struct Args {
    /// Input `.csv` file with a Date column and one column per series.
    input: PathBuf,

    /// Directory receiving `<stem>.svg` and `<stem>.png`.
    #[arg(long, default_value = "target/out")]
    out_dir: PathBuf,

    /// JSON series configuration (date column, series names and colors).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Chrome theme preset (`light` or `dark`).
    #[arg(long, default_value = "light")]
    theme: String,

    /// Open the tooltip on this series before writing snapshots.
    #[arg(long)]
    hover: Option<String>,

    /// Skip PNG rasterization.
    #[arg(long)]
    no_png: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => SeriesConfig::load(path)
            .with_context(|| format!("failed to load series config '{}'", path.display()))?,
        None => SeriesConfig::default(),
    };
    let config = Arc::new(config);

    let mut view = StreamView::new(Streamgraph::new(Arc::clone(&config)), Scene::new());
    let mut upload = CsvUpload::new(Arc::clone(&config));
    upload.select(&args.input)?;
    upload
        .submit(|data| {
            view.set_data(data);
        })
        .with_context(|| format!("failed to upload '{}'", args.input.display()))?;

    if view.renders() == 0 {
        anyhow::bail!("no records loaded from '{}'; check the header names", args.input.display());
    }

    if let Some(series) = &args.hover {
        let anchor = view.layout().and_then(|l| l.anchor_of(series));
        match anchor {
            Some(at) => view.dispatch(PointerEvent::At(at)),
            None => warn!(series = %series, "unknown series; no tooltip opened"),
        }
    }

    let theme = theme::find(&args.theme);
    let svg_path = out_path(&args.out_dir, &args.input, "svg");
    write_svg(view.surface(), &theme, &svg_path)
        .with_context(|| format!("failed to write '{}'", svg_path.display()))?;
    info!(path = %svg_path.display(), "wrote svg");

    if !args.no_png {
        let png_path = out_path(&args.out_dir, &args.input, "png");
        SkiaRenderer::new()
            .render_to_png(view.surface(), &theme, &RasterOptions::default(), &png_path)
            .with_context(|| format!("failed to write '{}'", png_path.display()))?;
        info!(path = %png_path.display(), "wrote png");
    }
    Ok(())
}

fn out_path(dir: &Path, input: &Path, ext: &str) -> PathBuf {
    let stem = input.file_stem().and_then(|s| s.to_str()).unwrap_or("streamgraph");
    dir.join(format!("{stem}.{ext}"))
}
