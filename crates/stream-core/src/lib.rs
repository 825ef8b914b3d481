// File: crates/stream-core/src/lib.rs
// Summary: Core library entry point; CSV ingestion, streamgraph layout and backend-free drawing.

pub mod axis;
pub mod color;
pub mod config;
pub mod curve;
pub mod geometry;
pub mod ingest;
pub mod minibar;
pub mod record;
pub mod scale;
pub mod scene;
pub mod stack;
pub mod streamgraph;
pub mod surface;
pub mod svg;
pub mod theme;
pub mod ticks;
pub mod tooltip;
pub mod types;
pub mod upload;
pub mod view;

pub use axis::{AxisModel, Orientation};
pub use color::Color;
pub use config::{SeriesConfig, SeriesEntry};
pub use ingest::{parse, parse_with};
pub use minibar::{mini_bar_chart, MiniBarChart, MiniOptions};
pub use record::{Dataset, Record};
pub use scene::Scene;
pub use stack::{stack_wiggle, Layer};
pub use streamgraph::{LayerShape, LegendEntry, RenderOptions, RenderOutcome, StreamLayout, Streamgraph};
pub use surface::DrawingSurface;
pub use theme::Theme;
pub use tooltip::{PointerEvent, TooltipPanel};
pub use upload::{CsvUpload, UploadError};
pub use view::StreamView;
