// File: crates/stream-core/src/scene.rs
// Summary: Retained scene implementing DrawingSurface; the element tree backends serialize.

use crate::axis::AxisModel;
use crate::geometry::Point;
use crate::streamgraph::{LayerShape, LegendEntry};
use crate::surface::DrawingSurface;
use crate::tooltip::{Handlers, TooltipPanel};
use crate::types::{Frame, LEGEND_ROW, LEGEND_WIDTH};

#[derive(Clone, Debug, PartialEq)]
pub enum ChartElement {
    Layer { shape: LayerShape, handlers: Handlers },
    Axis(AxisModel),
}

/// Element tree of one chart view. Every mutating call bumps `revision`.
#[derive(Clone, Debug, Default)]
pub struct Scene {
    frame: Frame,
    chart: Vec<ChartElement>,
    legend: Vec<LegendEntry>,
    tooltip: Option<TooltipPanel>,
    revision: u64,
}

impl Scene {
    pub fn new() -> Self { Self::default() }

    pub fn frame(&self) -> Frame { self.frame }
    pub fn chart(&self) -> &[ChartElement] { &self.chart }
    pub fn legend(&self) -> &[LegendEntry] { &self.legend }
    pub fn tooltip(&self) -> Option<&TooltipPanel> { self.tooltip.as_ref() }
    pub fn revision(&self) -> u64 { self.revision }

    pub fn layers(&self) -> impl Iterator<Item = (&LayerShape, &Handlers)> + '_ {
        self.chart.iter().filter_map(|e| match e {
            ChartElement::Layer { shape, handlers } => Some((shape, handlers)),
            ChartElement::Axis(_) => None,
        })
    }

    pub fn axes(&self) -> impl Iterator<Item = &AxisModel> + '_ {
        self.chart.iter().filter_map(|e| match e {
            ChartElement::Axis(a) => Some(a),
            ChartElement::Layer { .. } => None,
        })
    }

    /// Chart elements, legend items and the tooltip (when shown).
    pub fn element_count(&self) -> usize {
        self.chart.len() + self.legend.len() + usize::from(self.tooltip.is_some())
    }

    pub fn is_blank(&self) -> bool { self.element_count() == 0 }

    /// Canvas size covering the chart frame and the legend column beside it.
    pub fn canvas_size(&self) -> (u32, u32) {
        let legend_h = (self.frame.margin.top as f64 + self.legend.len() as f64 * LEGEND_ROW).ceil() as u32;
        (self.frame.width + LEGEND_WIDTH, self.frame.height.max(legend_h))
    }

    /// Top-left of the legend column in canvas coordinates.
    pub fn legend_origin(&self) -> Point {
        Point::new(self.frame.width as f64 + 10.0, self.frame.margin.top as f64)
    }

    /// Top-left of the plot area in canvas coordinates.
    pub fn plot_origin(&self) -> Point {
        Point::new(self.frame.margin.left as f64, self.frame.margin.top as f64)
    }
}

impl DrawingSurface for Scene {
    fn clear(&mut self) {
        self.chart.clear();
        self.legend.clear();
        self.tooltip = None;
        self.revision += 1;
    }

    fn begin(&mut self, frame: Frame) {
        self.frame = frame;
        self.revision += 1;
    }

    fn draw_layer(&mut self, shape: &LayerShape, handlers: Handlers) {
        self.chart.push(ChartElement::Layer { shape: shape.clone(), handlers });
        self.revision += 1;
    }

    fn draw_axis(&mut self, axis: &AxisModel) {
        self.chart.push(ChartElement::Axis(axis.clone()));
        self.revision += 1;
    }

    fn draw_legend(&mut self, entries: &[LegendEntry]) {
        self.legend = entries.to_vec();
        self.revision += 1;
    }

    fn show_tooltip(&mut self, panel: TooltipPanel) {
        self.tooltip = Some(panel);
        self.revision += 1;
    }

    fn move_tooltip(&mut self, to: Point) {
        if let Some(panel) = self.tooltip.as_mut() {
            panel.position = to;
            self.revision += 1;
        }
    }

    fn hide_tooltip(&mut self) {
        if self.tooltip.take().is_some() {
            self.revision += 1;
        }
    }
}
