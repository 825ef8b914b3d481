// File: crates/stream-core/tests/render.rs
// Purpose: Render-path properties: destructive re-render, degenerate inputs, empty-input diagnostic.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use stream_core::{parse, DrawingSurface, RenderOutcome, Scene, SeriesConfig, StreamView, Streamgraph};
use tracing::{Event, Subscriber};
use tracing_subscriber::layer::{Context, Layer, SubscriberExt};

const TEXT_A: &str = "Date,GPT-4,Gemini,PaLM-2,Claude,LLaMA-3.1\n\
2024-01-01,10,20,5,15,8\n\
2024-02-01,11,22,6,16,9\n\
2024-03-01,12,24,7,17,10\n";

const TEXT_B: &str = "Date,GPT-4,Gemini,PaLM-2,Claude,LLaMA-3.1\n\
2024-04-01,1,2,3,4,5\n\
2024-05-01,2,3,4,5,6\n";

/// Counts every event that reaches the subscriber.
struct CountEvents(Arc<AtomicUsize>);

impl<S: Subscriber> Layer<S> for CountEvents {
    fn on_event(&self, _event: &Event<'_>, _ctx: Context<'_, S>) {
        self.0.fetch_add(1, Ordering::SeqCst);
    }
}

fn graph() -> Streamgraph {
    Streamgraph::new(Arc::new(SeriesConfig::default()))
}

#[test]
fn rerender_leaves_no_stale_elements() {
    let g = graph();
    let mut scene = Scene::new();
    g.render(&parse(TEXT_A), &mut scene);
    let after_first = scene.element_count();
    g.render(&parse(TEXT_B), &mut scene);
    assert_eq!(scene.element_count(), after_first);
    assert_eq!(scene.layers().count(), 5);
    assert_eq!(scene.legend().len(), 5);
    assert_eq!(scene.axes().count(), 1);
    let labels: Vec<&str> = scene.axes().next().unwrap().labels().collect();
    assert_eq!(labels, ["Apr", "May"]);
}

#[test]
fn rerender_removes_open_tooltip() {
    let mut view = StreamView::new(graph(), Scene::new());
    view.set_data(Arc::new(parse(TEXT_A)));
    view.dispatch(stream_core::PointerEvent::Enter { series: "Gemini".into() });
    assert!(view.surface().tooltip().is_some());
    view.set_data(Arc::new(parse(TEXT_B)));
    assert!(view.surface().tooltip().is_none());
}

#[test]
fn single_record_renders_without_panicking() {
    let mut scene = Scene::new();
    let ds = parse("Date,GPT-4,Gemini,PaLM-2,Claude,LLaMA-3.1\n2024-02-01,1,2,3,4,5\n");
    let outcome = graph().render(&ds, &mut scene);
    let RenderOutcome::Drawn(layout) = outcome else { panic!("expected a drawn chart") };
    let x = layout.x.unwrap();
    assert_eq!(x.range(), (10.0, 520.0));
    for (shape, _) in scene.layers() {
        let d = shape.path.to_svg_d();
        assert!(!d.is_empty());
        assert!(!d.contains("NaN") && !d.contains("inf"));
    }
}

#[test]
fn empty_dataset_emits_one_diagnostic_and_no_mutation() {
    let counter = Arc::new(AtomicUsize::new(0));
    let subscriber = tracing_subscriber::registry().with(CountEvents(Arc::clone(&counter)));
    let empty = parse("Date,GPT-4,Gemini,PaLM-2,Claude,LLaMA-3.1\n");
    let g = graph();
    let mut scene = Scene::new();
    let outcome = tracing::subscriber::with_default(subscriber, || g.render(&empty, &mut scene));
    assert!(matches!(outcome, RenderOutcome::Skipped));
    assert_eq!(counter.load(Ordering::SeqCst), 1);
    assert_eq!(scene.revision(), 0);
    assert!(scene.is_blank());
}

/// Surface that only records the order of calls.
#[derive(Default)]
struct CallLog(Vec<&'static str>);

impl DrawingSurface for CallLog {
    fn clear(&mut self) { self.0.push("clear"); }
    fn begin(&mut self, _frame: stream_core::types::Frame) { self.0.push("begin"); }
    fn draw_layer(&mut self, _shape: &stream_core::LayerShape, _handlers: stream_core::tooltip::Handlers) { self.0.push("layer"); }
    fn draw_axis(&mut self, _axis: &stream_core::AxisModel) { self.0.push("axis"); }
    fn draw_legend(&mut self, _entries: &[stream_core::LegendEntry]) { self.0.push("legend"); }
    fn show_tooltip(&mut self, _panel: stream_core::TooltipPanel) { self.0.push("show"); }
    fn move_tooltip(&mut self, _to: stream_core::geometry::Point) { self.0.push("move"); }
    fn hide_tooltip(&mut self) { self.0.push("hide"); }
}

#[test]
fn clear_precedes_all_drawing() {
    let mut log = CallLog::default();
    graph().render(&parse(TEXT_A), &mut log);
    assert_eq!(log.0, ["clear", "begin", "layer", "layer", "layer", "layer", "layer", "axis", "legend"]);
}

#[test]
fn dates_at_the_calendar_limit_render() {
    let text = "Date,GPT-4,Gemini,PaLM-2,Claude,LLaMA-3.1\n\
+262142-12-01,1,2,3,4,5\n\
+262142-12-31,2,3,4,5,6\n";
    let ds = parse(text);
    assert_eq!(ds.len(), 2);
    let mut scene = Scene::new();
    let RenderOutcome::Drawn(layout) = graph().render(&ds, &mut scene) else { panic!("expected a drawn chart") };
    assert_eq!(layout.x_axis.labels().collect::<Vec<_>>(), ["Dec"]);
    assert_eq!(scene.layers().count(), 5);
}
