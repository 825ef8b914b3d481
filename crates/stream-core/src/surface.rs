// File: crates/stream-core/src/surface.rs
// Summary: Drawing surface trait the streamgraph renders through; keeps layout independent of backends.

use crate::axis::AxisModel;
use crate::geometry::Point;
use crate::streamgraph::{LayerShape, LegendEntry};
use crate::tooltip::{Handlers, TooltipPanel};
use crate::types::Frame;

/// A destructively rebuilt drawing target (chart area, legend and a floating tooltip).
///
/// Chart coordinates passed to `draw_layer`/`draw_axis` are plot-local; the surface applies
/// the frame margins. Tooltip positions are frame coordinates.
pub trait DrawingSurface {
    /// Remove every chart, legend and tooltip element.
    fn clear(&mut self);
    fn begin(&mut self, frame: Frame);
    fn draw_layer(&mut self, shape: &LayerShape, handlers: Handlers);
    fn draw_axis(&mut self, axis: &AxisModel);
    fn draw_legend(&mut self, entries: &[LegendEntry]);
    fn show_tooltip(&mut self, panel: TooltipPanel);
    fn move_tooltip(&mut self, to: Point);
    /// Hide the panel and drop its contents.
    fn hide_tooltip(&mut self);
}
