// File: crates/stream-core/src/streamgraph.rs
// Summary: Streamgraph layout (wiggle stack, scales, smoothed layer paths, axis, legend) and rendering.

use std::sync::Arc;

use chrono::NaiveDate;
use tracing::{debug, error};

use crate::axis::{AxisModel, Orientation};
use crate::color::Color;
use crate::config::SeriesConfig;
use crate::curve::{cardinal_area, Path};
use crate::geometry::{lerp, Point};
use crate::minibar::{mini_bar_chart, MiniOptions};
use crate::record::Dataset;
use crate::scale::{LinearScale, Scale, TimeScale};
use crate::stack::{extent, stack_wiggle, Layer};
use crate::surface::DrawingSurface;
use crate::tooltip::{Handlers, TooltipPanel, TOOLTIP_OFFSET};
use crate::types::Frame;

/// Fill used for a series the configuration has no color for.
pub const FALLBACK_COLOR: Color = Color::rgb(0xcc, 0xcc, 0xcc);

pub struct RenderOptions {
    pub frame: Frame,
    /// Horizontal inset of the time range inside the plot area.
    pub x_pad: f64,
    /// Gap between the plot bottom and the time axis.
    pub axis_gap: f64,
    pub layer_opacity: f64,
    /// Cardinal spline tension; 0 is the smoothest.
    pub tension: f64,
    pub tooltip_offset: Point,
    pub mini: MiniOptions,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            frame: Frame::default(),
            x_pad: 10.0,
            axis_gap: 5.0,
            layer_opacity: 0.8,
            tension: 0.0,
            tooltip_offset: TOOLTIP_OFFSET,
            mini: MiniOptions::default(),
        }
    }
}

/// One filled series region, in plot-local pixels.
#[derive(Clone, Debug, PartialEq)]
pub struct LayerShape {
    pub key: String,
    pub color: Color,
    pub opacity: f64,
    pub path: Path,
}

#[derive(Clone, Debug, PartialEq)]
pub struct LegendEntry {
    pub name: String,
    pub color: Color,
}

/// Everything computed for one render; pure data, no surface involved.
#[derive(Clone, Debug, PartialEq)]
pub struct StreamLayout {
    pub frame: Frame,
    /// Parsed record dates; `None` marks an unparseable date that still holds its stack slot.
    pub dates: Vec<Option<NaiveDate>>,
    pub layers: Vec<Layer>,
    /// Absent when no record has a parseable date.
    pub x: Option<TimeScale>,
    pub y: LinearScale,
    pub shapes: Vec<LayerShape>,
    pub x_axis: AxisModel,
    pub legend: Vec<LegendEntry>,
}

impl StreamLayout {
    fn to_local(&self, at: Point) -> Point {
        Point::new(at.x - self.frame.margin.left as f64, at.y - self.frame.margin.top as f64)
    }

    /// Series whose region contains `at` (frame coordinates), using straight lines between columns.
    pub fn series_at(&self, at: Point) -> Option<&str> {
        let x = self.x.as_ref()?;
        let local = self.to_local(at);
        let cols: Vec<(usize, f64)> = self
            .dates
            .iter()
            .enumerate()
            .filter_map(|(i, d)| d.map(|d| (i, x.to_px(d))))
            .collect();

        for pair in cols.windows(2) {
            let ((i0, x0), (i1, x1)) = (pair[0], pair[1]);
            if i1 != i0 + 1 {
                continue;
            }
            if local.x < x0.min(x1) || local.x > x0.max(x1) {
                continue;
            }
            let t = if x1 == x0 { 0.0 } else { (local.x - x0) / (x1 - x0) };
            if let Some(key) = self.layer_hit(i0, i1, t, local.y) {
                return Some(key);
            }
        }
        cols.iter()
            .find(|(_, cx)| (cx - local.x).abs() < 0.5)
            .and_then(|&(i, _)| self.layer_hit(i, i, 0.0, local.y))
    }

    fn layer_hit(&self, i0: usize, i1: usize, t: f64, py: f64) -> Option<&str> {
        self.layers.iter().find_map(|layer| {
            let lo = lerp(layer.points[i0].0, layer.points[i1].0, t);
            let hi = lerp(layer.points[i0].1, layer.points[i1].1, t);
            let (a, b) = (self.y.to_px(hi), self.y.to_px(lo));
            (hi > lo && py >= a.min(b) && py <= a.max(b)).then_some(layer.key.as_str())
        })
    }

    /// Visual center of `key`'s layer at its thickest dated column, in frame coordinates.
    pub fn anchor_of(&self, key: &str) -> Option<Point> {
        let x = self.x.as_ref()?;
        let layer = self.layers.iter().find(|l| l.key == key)?;
        let (date, (lo, hi)) = self
            .dates
            .iter()
            .zip(&layer.points)
            .filter_map(|(d, p)| d.map(|d| (d, *p)))
            .max_by(|a, b| (a.1 .1 - a.1 .0).total_cmp(&(b.1 .1 - b.1 .0)))?;
        let m = self.frame.margin;
        Some(Point::new(x.to_px(date) + m.left as f64, self.y.to_px((lo + hi) / 2.0) + m.top as f64))
    }
}

#[derive(Debug)]
pub enum RenderOutcome {
    Drawn(StreamLayout),
    /// Empty input; the surface was left untouched.
    Skipped,
}

/// Streamgraph renderer bound to a series configuration.
pub struct Streamgraph {
    config: Arc<SeriesConfig>,
    options: RenderOptions,
}

impl Streamgraph {
    pub fn new(config: Arc<SeriesConfig>) -> Self {
        Self { config, options: RenderOptions::default() }
    }

    pub fn with_options(mut self, options: RenderOptions) -> Self {
        self.options = options;
        self
    }

    pub fn config(&self) -> &SeriesConfig { &self.config }
    pub fn options(&self) -> &RenderOptions { &self.options }

    fn color_of(&self, key: &str) -> Color {
        self.config.color_of(key).unwrap_or(FALLBACK_COLOR)
    }

    /// Compute the full chart geometry for `dataset`.
    pub fn layout(&self, dataset: &Dataset) -> StreamLayout {
        let opts = &self.options;
        let frame = opts.frame;
        let (w, h) = (frame.inner_width(), frame.inner_height());

        let dates: Vec<Option<NaiveDate>> = dataset.records().iter().map(|r| r.parsed_date()).collect();
        let layers = stack_wiggle(dataset);

        let x_range = (opts.x_pad, w - opts.x_pad);
        let x = TimeScale::from_extent(dates.iter().flatten().copied(), x_range);
        let y = LinearScale::new(extent(&layers).unwrap_or((0.0, 0.0)), (h, 0.0));

        let shapes = layers
            .iter()
            .map(|layer| LayerShape {
                key: layer.key.clone(),
                color: self.color_of(&layer.key),
                opacity: opts.layer_opacity,
                path: layer_path(layer, &dates, x.as_ref(), &y, opts.tension),
            })
            .collect();

        let axis_origin = Point::new(0.0, h + opts.axis_gap);
        let x_axis = match &x {
            Some(scale) => AxisModel::months(scale, axis_origin),
            None => AxisModel { orientation: Orientation::Bottom, origin: axis_origin, range: x_range, ticks: Vec::new() },
        };

        let legend = dataset
            .keys()
            .iter()
            .rev()
            .map(|k| LegendEntry { name: k.clone(), color: self.color_of(k) })
            .collect();

        StreamLayout { frame, dates, layers, x, y, shapes, x_axis, legend }
    }

    /// Clear `surface` and draw the streamgraph of `dataset` onto it.
    ///
    /// An empty dataset logs one diagnostic and leaves the surface (and any earlier chart) untouched.
    pub fn render<S: DrawingSurface + ?Sized>(&self, dataset: &Dataset, surface: &mut S) -> RenderOutcome {
        if dataset.is_empty() {
            error!("no data available or invalid format; skipping render");
            return RenderOutcome::Skipped;
        }

        surface.clear();
        let layout = self.layout(dataset);
        surface.begin(layout.frame);
        for shape in &layout.shapes {
            surface.draw_layer(shape, Handlers::hover(shape.key.clone()));
        }
        surface.draw_axis(&layout.x_axis);
        surface.draw_legend(&layout.legend);

        let undated = layout.dates.iter().filter(|d| d.is_none()).count();
        debug!(records = dataset.len(), layers = layout.shapes.len(), undated, "rendered streamgraph");
        RenderOutcome::Drawn(layout)
    }

    /// Fresh tooltip panel for `key`: its raw values as a mini bar chart in the series color.
    pub fn tooltip(&self, dataset: &Dataset, key: &str, position: Point) -> Option<TooltipPanel> {
        let values = dataset.series_values(key)?;
        let chart = mini_bar_chart(key, &values, self.color_of(key), &self.options.mini);
        Some(TooltipPanel { chart, position })
    }
}

/// Closed smoothed region per run of consecutive dated records; undated records break the run.
fn layer_path(layer: &Layer, dates: &[Option<NaiveDate>], x: Option<&TimeScale>, y: &LinearScale, tension: f64) -> Path {
    let mut path = Path::new();
    let Some(x) = x else { return path };
    let mut top = Vec::new();
    let mut bottom = Vec::new();
    for (date, &(lo, hi)) in dates.iter().zip(&layer.points) {
        match date {
            Some(d) => {
                let px = x.to_px(*d);
                top.push(Point::new(px, y.to_px(hi)));
                bottom.push(Point::new(px, y.to_px(lo)));
            }
            None => {
                cardinal_area(&mut path, &top, &bottom, tension);
                top.clear();
                bottom.clear();
            }
        }
    }
    cardinal_area(&mut path, &top, &bottom, tension);
    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curve::PathCmd;
    use crate::ingest::parse;
    use crate::scene::Scene;

    const TEXT: &str = "Date,GPT-4,Gemini,PaLM-2,Claude,LLaMA-3.1\n\
2024-01-01,10,20,5,15,8\n\
2024-02-01,11,22,6,16,9\n\
2024-03-01,12,24,7,17,10\n";

    fn graph() -> Streamgraph { Streamgraph::new(Arc::new(SeriesConfig::default())) }

    #[test]
    fn layout_spans_domain_and_layers() {
        let layout = graph().layout(&parse(TEXT));
        let x = layout.x.unwrap();
        assert_eq!(x.range(), (10.0, 520.0));
        assert_eq!(x.to_px(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()), 10.0);
        assert_eq!(layout.shapes.len(), 5);
        assert_eq!(layout.y.r0, 350.0);
        assert_eq!(layout.x_axis.labels().collect::<Vec<_>>(), ["Jan", "Feb", "Mar"]);
        assert_eq!(layout.x_axis.origin, Point::new(0.0, 355.0));
        let names: Vec<_> = layout.legend.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["LLaMA-3.1", "Claude", "PaLM-2", "Gemini", "GPT-4"]);
    }

    #[test]
    fn layers_fill_the_whole_vertical_range() {
        let layout = graph().layout(&parse(TEXT));
        let lo = layout.layers.iter().filter_map(Layer::lower_min).fold(f64::INFINITY, f64::min);
        let hi = layout.layers.iter().filter_map(Layer::upper_max).fold(f64::NEG_INFINITY, f64::max);
        assert_eq!((layout.y.d0, layout.y.d1), (lo, hi));
    }

    #[test]
    fn undated_rows_keep_their_slot_but_break_the_path() {
        let text = "Date,GPT-4,Gemini,PaLM-2,Claude,LLaMA-3.1\n\
2024-01-01,1,1,1,1,1\n\
2024-01-15,1,1,1,1,1\n\
not-a-date,1,1,1,1,1\n\
2024-03-01,1,1,1,1,1\n";
        let layout = graph().layout(&parse(text));
        assert_eq!(layout.layers[0].points.len(), 4);
        assert_eq!(layout.dates[2], None);
        let moves = layout.shapes[0].path.cmds.iter().filter(|c| matches!(c, PathCmd::MoveTo(_))).count();
        assert_eq!(moves, 2);
        assert!(!layout.shapes[0].path.to_svg_d().contains("NaN"));
    }

    #[test]
    fn no_parseable_dates_draws_empty_paths() {
        let text = "Date,GPT-4,Gemini,PaLM-2,Claude,LLaMA-3.1\nsoon,1,2,3,4,5\n";
        let layout = graph().layout(&parse(text));
        assert!(layout.x.is_none());
        assert!(layout.shapes.iter().all(|s| s.path.is_empty()));
        assert!(layout.x_axis.ticks.is_empty());
    }

    #[test]
    fn render_draws_layers_axis_and_legend() {
        let mut scene = Scene::new();
        let outcome = graph().render(&parse(TEXT), &mut scene);
        assert!(matches!(outcome, RenderOutcome::Drawn(_)));
        assert_eq!(scene.layers().count(), 5);
        assert_eq!(scene.axes().count(), 1);
        assert_eq!(scene.legend().len(), 5);
        let (shape, handlers) = scene.layers().next().unwrap();
        assert_eq!(shape.key, "GPT-4");
        assert_eq!(shape.color.to_hex(), "#e41a1c");
        assert_eq!(shape.opacity, 0.8);
        assert_eq!(handlers, &Handlers::hover("GPT-4"));
    }

    #[test]
    fn hit_test_and_anchor_agree() {
        let layout = graph().layout(&parse(TEXT));
        for key in ["GPT-4", "Gemini", "PaLM-2", "Claude", "LLaMA-3.1"] {
            let anchor = layout.anchor_of(key).unwrap();
            assert_eq!(layout.series_at(anchor), Some(key));
        }
        assert_eq!(layout.series_at(Point::new(0.0, 0.0)), None);
    }

    #[test]
    fn tooltip_uses_raw_values_and_series_color() {
        let ds = parse(TEXT);
        let panel = graph().tooltip(&ds, "Gemini", Point::new(5.0, 6.0)).unwrap();
        assert_eq!(panel.title(), "Gemini");
        assert_eq!(panel.chart.color.to_hex(), "#377eb8");
        let values: Vec<f64> = panel.chart.bars.iter().map(|b| b.value).collect();
        assert_eq!(values, vec![20.0, 22.0, 24.0]);
        assert!(graph().tooltip(&ds, "Mistral", Point::default()).is_none());
    }
}
