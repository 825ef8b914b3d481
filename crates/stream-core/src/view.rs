// File: crates/stream-core/src/view.rs
// Summary: Stateful view owning the surface; re-renders on dataset hand-off and drives the tooltip.

use std::sync::Arc;

use tracing::trace;

use crate::geometry::Point;
use crate::record::Dataset;
use crate::streamgraph::{RenderOutcome, StreamLayout, Streamgraph};
use crate::surface::DrawingSurface;
use crate::tooltip::PointerEvent;

pub struct StreamView<S: DrawingSurface> {
    renderer: Streamgraph,
    surface: S,
    /// Last dataset handed over, used for change detection.
    received: Option<Arc<Dataset>>,
    /// Dataset behind the chart currently on the surface.
    shown: Option<Arc<Dataset>>,
    layout: Option<StreamLayout>,
    hovered: Option<String>,
    pointer: Point,
    renders: usize,
}

impl<S: DrawingSurface> StreamView<S> {
    pub fn new(renderer: Streamgraph, surface: S) -> Self {
        Self {
            renderer,
            surface,
            received: None,
            shown: None,
            layout: None,
            hovered: None,
            pointer: Point::default(),
            renders: 0,
        }
    }

    pub fn surface(&self) -> &S { &self.surface }
    pub fn renderer(&self) -> &Streamgraph { &self.renderer }
    pub fn layout(&self) -> Option<&StreamLayout> { self.layout.as_ref() }
    pub fn dataset(&self) -> Option<&Arc<Dataset>> { self.shown.as_ref() }
    pub fn hovered(&self) -> Option<&str> { self.hovered.as_deref() }
    /// Number of completed (non-skipped) renders.
    pub fn renders(&self) -> usize { self.renders }

    /// Hand over a new dataset. Renders only when `data` is a different allocation than the
    /// previous hand-off; returns whether a render was attempted.
    pub fn set_data(&mut self, data: Arc<Dataset>) -> bool {
        if let Some(prev) = &self.received {
            if Arc::ptr_eq(prev, &data) {
                trace!("dataset unchanged; not re-rendering");
                return false;
            }
        }
        self.received = Some(Arc::clone(&data));
        match self.renderer.render(&data, &mut self.surface) {
            RenderOutcome::Drawn(layout) => {
                self.layout = Some(layout);
                self.shown = Some(data);
                self.hovered = None;
                self.renders += 1;
            }
            RenderOutcome::Skipped => {}
        }
        true
    }

    pub fn dispatch(&mut self, event: PointerEvent) {
        match event {
            PointerEvent::Enter { series } => self.enter(series),
            PointerEvent::Move { at } => self.move_to(at),
            PointerEvent::Leave { .. } => self.leave(),
            PointerEvent::At(at) => {
                let hit = self.layout.as_ref().and_then(|l| l.series_at(at)).map(str::to_string);
                if hit != self.hovered {
                    if self.hovered.is_some() {
                        self.leave();
                    }
                    self.pointer = at;
                    if let Some(series) = hit {
                        self.enter(series);
                    }
                }
                if self.hovered.is_some() {
                    self.move_to(at);
                }
            }
        }
    }

    fn enter(&mut self, series: String) {
        let Some(data) = self.shown.as_ref() else { return };
        let position = self.pointer + self.renderer.options().tooltip_offset;
        if let Some(panel) = self.renderer.tooltip(data, &series, position) {
            self.surface.show_tooltip(panel);
            self.hovered = Some(series);
        }
    }

    fn move_to(&mut self, at: Point) {
        self.pointer = at;
        if self.hovered.is_some() {
            self.surface.move_tooltip(at + self.renderer.options().tooltip_offset);
        }
    }

    fn leave(&mut self) {
        self.surface.hide_tooltip();
        self.hovered = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SeriesConfig;
    use crate::ingest::parse;
    use crate::scene::Scene;

    const TEXT: &str = "Date,GPT-4,Gemini,PaLM-2,Claude,LLaMA-3.1\n\
2024-01-01,10,20,5,15,8\n\
2024-03-01,12,24,7,17,10\n";

    fn view() -> StreamView<Scene> {
        StreamView::new(Streamgraph::new(Arc::new(SeriesConfig::default())), Scene::new())
    }

    #[test]
    fn same_dataset_reference_does_not_rerender() {
        let mut v = view();
        let data = Arc::new(parse(TEXT));
        assert!(v.set_data(Arc::clone(&data)));
        let rev = v.surface().revision();
        assert!(!v.set_data(Arc::clone(&data)));
        assert_eq!(v.surface().revision(), rev);
        // equal contents but a new allocation counts as a change
        assert!(v.set_data(Arc::new(parse(TEXT))));
        assert_eq!(v.renders(), 2);
    }

    #[test]
    fn empty_dataset_keeps_previous_chart() {
        let mut v = view();
        v.set_data(Arc::new(parse(TEXT)));
        let count = v.surface().element_count();
        let rev = v.surface().revision();
        assert!(v.set_data(Arc::new(parse(""))));
        assert_eq!(v.surface().element_count(), count);
        assert_eq!(v.surface().revision(), rev);
        assert_eq!(v.dataset().unwrap().len(), 2);
    }

    #[test]
    fn enter_move_leave_cycle() {
        let mut v = view();
        v.set_data(Arc::new(parse(TEXT)));
        v.dispatch(PointerEvent::Enter { series: "Claude".into() });
        assert_eq!(v.surface().tooltip().unwrap().title(), "Claude");
        v.dispatch(PointerEvent::Move { at: Point::new(100.0, 40.0) });
        assert_eq!(v.surface().tooltip().unwrap().position, Point::new(115.0, 55.0));
        v.dispatch(PointerEvent::Leave { series: "Claude".into() });
        assert!(v.surface().tooltip().is_none());
        assert_eq!(v.hovered(), None);
    }

    #[test]
    fn entering_a_new_series_rebuilds_the_panel() {
        let mut v = view();
        v.set_data(Arc::new(parse(TEXT)));
        v.dispatch(PointerEvent::Enter { series: "Claude".into() });
        v.dispatch(PointerEvent::Leave { series: "Claude".into() });
        v.dispatch(PointerEvent::Enter { series: "GPT-4".into() });
        let panel = v.surface().tooltip().unwrap();
        assert_eq!(panel.title(), "GPT-4");
        assert_eq!(panel.chart.bars.iter().map(|b| b.value).collect::<Vec<_>>(), vec![10.0, 12.0]);
    }

    #[test]
    fn raw_pointer_positions_resolve_to_series() {
        let mut v = view();
        v.set_data(Arc::new(parse(TEXT)));
        let anchor = v.layout().unwrap().anchor_of("PaLM-2").unwrap();
        v.dispatch(PointerEvent::At(anchor));
        assert_eq!(v.hovered(), Some("PaLM-2"));
        let panel = v.surface().tooltip().unwrap();
        assert_eq!(panel.position, anchor + Point::new(15.0, 15.0));
        v.dispatch(PointerEvent::At(Point::new(1.0, 1.0)));
        assert_eq!(v.hovered(), None);
        assert!(v.surface().tooltip().is_none());
    }

    /// Scene wrapper that records which surface calls arrive, in order.
    #[derive(Default)]
    struct Recorder {
        scene: Scene,
        calls: Vec<&'static str>,
    }

    impl DrawingSurface for Recorder {
        fn clear(&mut self) { self.calls.push("clear"); self.scene.clear(); }
        fn begin(&mut self, frame: crate::types::Frame) { self.scene.begin(frame); }
        fn draw_layer(&mut self, shape: &crate::streamgraph::LayerShape, handlers: crate::tooltip::Handlers) {
            self.scene.draw_layer(shape, handlers);
        }
        fn draw_axis(&mut self, axis: &crate::axis::AxisModel) { self.scene.draw_axis(axis); }
        fn draw_legend(&mut self, entries: &[crate::streamgraph::LegendEntry]) { self.scene.draw_legend(entries); }
        fn show_tooltip(&mut self, panel: crate::tooltip::TooltipPanel) {
            self.calls.push("show");
            self.scene.show_tooltip(panel);
        }
        fn move_tooltip(&mut self, to: Point) { self.calls.push("move"); self.scene.move_tooltip(to); }
        fn hide_tooltip(&mut self) { self.calls.push("hide"); self.scene.hide_tooltip(); }
    }

    #[test]
    fn pointer_crossing_between_series_leaves_before_entering() {
        let mut v = StreamView::new(Streamgraph::new(Arc::new(SeriesConfig::default())), Recorder::default());
        v.set_data(Arc::new(parse(TEXT)));
        let layout = v.layout().unwrap();
        let (a, b) = (layout.anchor_of("Gemini").unwrap(), layout.anchor_of("Claude").unwrap());
        v.dispatch(PointerEvent::At(a));
        assert_eq!(v.hovered(), Some("Gemini"));
        let before = v.surface().calls.len();
        v.dispatch(PointerEvent::At(b));
        assert_eq!(v.hovered(), Some("Claude"));
        assert_eq!(&v.surface().calls[before..], ["hide", "show", "move"]);
        let panel = v.surface().scene.tooltip().unwrap();
        assert_eq!(panel.title(), "Claude");
        assert_eq!(panel.position, b + Point::new(15.0, 15.0));
    }

    #[test]
    fn pointer_events_before_data_are_ignored() {
        let mut v = view();
        v.dispatch(PointerEvent::Enter { series: "Claude".into() });
        v.dispatch(PointerEvent::At(Point::new(100.0, 100.0)));
        assert!(v.surface().is_blank());
    }
}
