// File: crates/stream-render-skia/src/lib.rs
// Summary: Skia CPU raster backend; paints a Scene (streamgraph, legend, tooltip) and encodes PNG.

pub mod text;

use anyhow::Result;
use skia_safe as skia;
use tracing::debug;

use stream_core::axis::{AxisModel, Orientation, TICK_SIZE};
use stream_core::color::Color;
use stream_core::curve::{Path, PathCmd};
use stream_core::geometry::Point;
use stream_core::minibar::MiniBarChart;
use stream_core::scene::{ChartElement, Scene};
use stream_core::tooltip::TooltipPanel;
use stream_core::types::{LEGEND_ROW, LEGEND_SWATCH};
use stream_core::Theme;

pub use text::{Anchor, LabelStyle, TextShaper};

pub struct RasterOptions {
    /// Device pixel ratio; the canvas is scaled by this factor.
    pub dpr: f32,
    /// Skip all text (keeps output deterministic across font setups).
    pub draw_labels: bool,
}

impl Default for RasterOptions {
    fn default() -> Self {
        Self { dpr: 1.0, draw_labels: true }
    }
}

#[inline]
fn sk(c: Color) -> skia::Color {
    skia::Color::from_argb(c.a, c.r, c.g, c.b)
}

#[inline]
fn pt(p: Point) -> (f32, f32) {
    (p.x as f32, p.y as f32)
}

fn to_sk_path(path: &Path) -> skia::Path {
    let mut out = skia::Path::new();
    for cmd in &path.cmds {
        match *cmd {
            PathCmd::MoveTo(p) => { out.move_to(pt(p)); }
            PathCmd::LineTo(p) => { out.line_to(pt(p)); }
            PathCmd::CubicTo(a, b, p) => { out.cubic_to(pt(a), pt(b), pt(p)); }
            PathCmd::Close => { out.close(); }
        }
    }
    out
}

pub struct SkiaRenderer {
    shaper: TextShaper,
}

impl Default for SkiaRenderer {
    fn default() -> Self { Self::new() }
}

impl SkiaRenderer {
    pub fn new() -> Self {
        Self { shaper: TextShaper::new() }
    }

    /// Rasterize `scene` and return PNG bytes.
    pub fn render_png_bytes(&self, scene: &Scene, theme: &Theme, opts: &RasterOptions) -> Result<Vec<u8>> {
        let (w, h) = scene.canvas_size();
        let dpr = opts.dpr.max(0.1);
        let pw = ((w as f32) * dpr).round() as i32;
        let ph = ((h as f32) * dpr).round() as i32;
        let mut surface = skia::surfaces::raster_n32_premul((pw.max(1), ph.max(1)))
            .ok_or_else(|| anyhow::anyhow!("failed to create raster surface"))?;
        let canvas = surface.canvas();
        canvas.clear(sk(theme.background));
        canvas.save();
        canvas.scale((dpr, dpr));
        self.paint(canvas, scene, theme, opts);
        canvas.restore();

        let image = surface.image_snapshot();
        #[allow(deprecated)]
        let data = image
            .encode_to_data(skia::EncodedImageFormat::PNG)
            .ok_or_else(|| anyhow::anyhow!("encode PNG failed"))?;
        debug!(width = pw, height = ph, bytes = data.len(), "rasterized scene");
        Ok(data.as_bytes().to_vec())
    }

    /// Rasterize `scene` to a PNG file at `output_png_path`.
    pub fn render_to_png(
        &self,
        scene: &Scene,
        theme: &Theme,
        opts: &RasterOptions,
        output_png_path: impl AsRef<std::path::Path>,
    ) -> Result<()> {
        let bytes = self.render_png_bytes(scene, theme, opts)?;
        if let Some(parent) = output_png_path.as_ref().parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(output_png_path, bytes)?;
        Ok(())
    }

    fn paint(&self, canvas: &skia::Canvas, scene: &Scene, theme: &Theme, opts: &RasterOptions) {
        canvas.save();
        canvas.translate(pt(scene.plot_origin()));
        for el in scene.chart() {
            match el {
                ChartElement::Layer { shape, .. } => {
                    let mut fill = skia::Paint::default();
                    fill.set_anti_alias(true);
                    fill.set_style(skia::paint::Style::Fill);
                    fill.set_color(sk(shape.color));
                    fill.set_alpha_f(shape.opacity as f32);
                    canvas.draw_path(&to_sk_path(&shape.path), &fill);
                }
                ChartElement::Axis(axis) => self.draw_axis(canvas, axis, theme, opts),
            }
        }
        canvas.restore();

        self.draw_legend(canvas, scene, theme, opts);
        if let Some(panel) = scene.tooltip() {
            self.draw_tooltip(canvas, panel, theme, opts);
        }
    }

    fn draw_legend(&self, canvas: &skia::Canvas, scene: &Scene, theme: &Theme, opts: &RasterOptions) {
        let origin = scene.legend_origin();
        let mut swatch = skia::Paint::default();
        swatch.set_anti_alias(true);
        for (i, entry) in scene.legend().iter().enumerate() {
            let top = origin.y + i as f64 * LEGEND_ROW;
            swatch.set_color(sk(entry.color));
            let rect = skia::Rect::from_xywh(origin.x as f32, top as f32, LEGEND_SWATCH as f32, LEGEND_SWATCH as f32);
            canvas.draw_rect(rect, &swatch);
            if opts.draw_labels {
                let x = (origin.x + LEGEND_SWATCH + 6.0) as f32;
                let y = (top + LEGEND_SWATCH - 2.0) as f32;
                self.shaper.draw(canvas, &entry.name, x, y, LabelStyle::new(12.0, sk(theme.legend_label)));
            }
        }
    }

    fn draw_tooltip(&self, canvas: &skia::Canvas, panel: &TooltipPanel, theme: &Theme, opts: &RasterOptions) {
        let (pw, ph) = panel.size();
        canvas.save();
        canvas.translate(pt(panel.position));

        let rect = skia::RRect::new_rect_xy(skia::Rect::from_wh(pw as f32, ph as f32), 4.0, 4.0);
        let mut bg = skia::Paint::default();
        bg.set_anti_alias(true);
        bg.set_color(sk(theme.tooltip_background));
        canvas.draw_rrect(&rect, &bg);
        let mut border = skia::Paint::default();
        border.set_anti_alias(true);
        border.set_style(skia::paint::Style::Stroke);
        border.set_stroke_width(1.0);
        border.set_color(sk(theme.tooltip_border));
        canvas.draw_rrect(&rect, &border);

        if opts.draw_labels {
            let pad = TooltipPanel::PADDING as f32;
            self.shaper.draw(canvas, panel.title(), pad, pad + 14.0, LabelStyle::new(14.0, sk(theme.tooltip_title)).bold());
        }
        self.draw_mini(canvas, &panel.chart, panel.chart_offset(), theme, opts);
        canvas.restore();
    }

    fn draw_mini(&self, canvas: &skia::Canvas, chart: &MiniBarChart, at: Point, theme: &Theme, opts: &RasterOptions) {
        canvas.save();
        canvas.translate(pt(at + chart.plot_origin()));
        let mut bar = skia::Paint::default();
        bar.set_anti_alias(true);
        bar.set_color(sk(chart.color));
        for b in &chart.bars {
            let r = b.rect;
            if r.height() > 0.0 {
                canvas.draw_rect(skia::Rect::from_ltrb(r.left as f32, r.top as f32, r.right as f32, r.bottom as f32), &bar);
            }
        }
        self.draw_axis(canvas, &chart.x_axis, theme, opts);
        self.draw_axis(canvas, &chart.y_axis, theme, opts);
        canvas.restore();
    }

    fn draw_axis(&self, canvas: &skia::Canvas, axis: &AxisModel, theme: &Theme, opts: &RasterOptions) {
        let mut line = skia::Paint::default();
        line.set_anti_alias(true);
        line.set_style(skia::paint::Style::Stroke);
        line.set_stroke_width(1.0);
        line.set_color(sk(theme.axis_line));
        let mut tick_paint = line.clone();
        tick_paint.set_color(sk(theme.tick));

        let (r0, r1) = (axis.range.0 as f32, axis.range.1 as f32);
        let t = TICK_SIZE as f32;
        canvas.save();
        canvas.translate(pt(axis.origin));
        match axis.orientation {
            Orientation::Bottom => canvas.draw_line((r0, 0.0), (r1, 0.0), &line),
            Orientation::Left => canvas.draw_line((0.0, r0), (0.0, r1), &line),
        };
        let label = LabelStyle::new(10.0, sk(theme.axis_label));
        for tick in &axis.ticks {
            let p = tick.pos as f32;
            match axis.orientation {
                Orientation::Bottom => {
                    canvas.draw_line((p, 0.0), (p, t), &tick_paint);
                    if let (true, Some(text)) = (opts.draw_labels, tick.label.as_deref()) {
                        self.shaper.draw(canvas, text, p, t + 13.0, label.anchored(Anchor::Middle));
                    }
                }
                Orientation::Left => {
                    canvas.draw_line((0.0, p), (-t, p), &tick_paint);
                    if let (true, Some(text)) = (opts.draw_labels, tick.label.as_deref()) {
                        self.shaper.draw(canvas, text, -(t + 3.0), p + 3.5, label.anchored(Anchor::End));
                    }
                }
            }
        }
        canvas.restore();
    }
}
