// File: crates/stream-core/src/svg.rs
// Summary: Serialize a Scene (chart, legend column, tooltip overlay) to a standalone SVG document.

use std::fmt::Write as _;
use std::path::Path as FsPath;

use crate::axis::{AxisModel, Orientation, TICK_SIZE};
use crate::color::Color;
use crate::geometry::Point;
use crate::minibar::MiniBarChart;
use crate::scene::{ChartElement, Scene};
use crate::theme::Theme;
use crate::tooltip::{PointerKind, TooltipPanel};
use crate::types::{LEGEND_ROW, LEGEND_SWATCH};

const FONT: &str = "font-family=\"sans-serif\"";

/// Render `scene` as an SVG document string.
pub fn to_svg(scene: &Scene, theme: &Theme) -> String {
    let (w, h) = scene.canvas_size();
    let mut out = String::new();
    let _ = writeln!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#
    );
    let _ = writeln!(out, r#"<rect width="100%" height="100%" fill="{}"/>"#, theme.background);

    let o = scene.plot_origin();
    let _ = writeln!(out, r#"<g id="streamgraph" transform="translate({},{})">"#, num(o.x), num(o.y));
    for el in scene.chart() {
        match el {
            ChartElement::Layer { shape, handlers } => {
                let on: Vec<&str> = handlers
                    .kinds
                    .iter()
                    .map(|k| match k {
                        PointerKind::Enter => "enter",
                        PointerKind::Move => "move",
                        PointerKind::Leave => "leave",
                    })
                    .collect();
                let _ = writeln!(
                    out,
                    r#"<path class="layer" data-series="{}" data-on="{}" d="{}" fill="{}" fill-opacity="{}"/>"#,
                    escape(&handlers.series),
                    on.join(" "),
                    shape.path.to_svg_d(),
                    shape.color,
                    shape.opacity
                );
            }
            ChartElement::Axis(axis) => write_axis(&mut out, axis, theme, "x-axis"),
        }
    }
    out.push_str("</g>\n");

    let lo = scene.legend_origin();
    let _ = writeln!(out, r#"<g id="legend" transform="translate({},{})">"#, num(lo.x), num(lo.y));
    for (i, entry) in scene.legend().iter().enumerate() {
        let _ = writeln!(
            out,
            r#"<g class="legend-item" transform="translate(0,{})"><rect width="{s}" height="{s}" fill="{}"/><text x="{}" y="{}" {FONT} font-size="12" fill="{}">{}</text></g>"#,
            num(i as f64 * LEGEND_ROW),
            entry.color,
            num(LEGEND_SWATCH + 6.0),
            num(LEGEND_SWATCH - 2.0),
            theme.legend_label,
            escape(&entry.name),
            s = num(LEGEND_SWATCH),
        );
    }
    out.push_str("</g>\n");

    if let Some(panel) = scene.tooltip() {
        write_tooltip(&mut out, panel, theme);
    }
    out.push_str("</svg>\n");
    out
}

/// Write `to_svg` output to `path`, creating parent directories.
pub fn write_svg(scene: &Scene, theme: &Theme, path: impl AsRef<FsPath>) -> std::io::Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, to_svg(scene, theme))
}

fn write_tooltip(out: &mut String, panel: &TooltipPanel, theme: &Theme) {
    let (pw, ph) = panel.size();
    let p = panel.position;
    let _ = writeln!(out, r#"<g class="tooltip" transform="translate({},{})">"#, num(p.x), num(p.y));
    let _ = writeln!(
        out,
        r#"<rect width="{}" height="{}" rx="4" fill="{}" fill-opacity="{}" stroke="{}"/>"#,
        num(pw),
        num(ph),
        theme.tooltip_background,
        alpha(theme.tooltip_background),
        theme.tooltip_border
    );
    let _ = writeln!(
        out,
        r#"<text x="{}" y="{}" {FONT} font-size="14" font-weight="bold" fill="{}">{}</text>"#,
        num(TooltipPanel::PADDING),
        num(TooltipPanel::PADDING + 14.0),
        theme.tooltip_title,
        escape(panel.title())
    );
    write_mini(out, &panel.chart, panel.chart_offset(), theme);
    out.push_str("</g>\n");
}

fn write_mini(out: &mut String, chart: &MiniBarChart, at: Point, theme: &Theme) {
    let o = at + chart.plot_origin();
    let _ = writeln!(out, r#"<g class="mini-chart" transform="translate({},{})">"#, num(o.x), num(o.y));
    for bar in &chart.bars {
        let r = bar.rect;
        let _ = writeln!(
            out,
            r#"<rect class="bar" x="{}" y="{}" width="{}" height="{}" fill="{}"/>"#,
            num(r.left),
            num(r.top),
            num(r.width()),
            num(r.height()),
            chart.color
        );
    }
    write_axis(out, &chart.x_axis, theme, "x-axis");
    write_axis(out, &chart.y_axis, theme, "y-axis");
    out.push_str("</g>\n");
}

fn write_axis(out: &mut String, axis: &AxisModel, theme: &Theme, class: &str) {
    let (r0, r1) = axis.range;
    let t = TICK_SIZE;
    let _ = writeln!(
        out,
        r#"<g class="{class}" transform="translate({},{})" {FONT} font-size="10" fill="{}">"#,
        num(axis.origin.x),
        num(axis.origin.y),
        theme.axis_label
    );
    let domain = match axis.orientation {
        Orientation::Bottom => format!("M{},{}V0H{}V{}", num(r0), num(t), num(r1), num(t)),
        Orientation::Left => format!("M{},{}H0V{}H{}", num(-t), num(r0), num(r1), num(-t)),
    };
    let _ = writeln!(out, r#"<path class="domain" d="{domain}" fill="none" stroke="{}"/>"#, theme.axis_line);
    for tick in &axis.ticks {
        let label = tick.label.as_deref().map(escape);
        match axis.orientation {
            Orientation::Bottom => {
                let _ = write!(
                    out,
                    r#"<g class="tick" transform="translate({},0)"><line y2="{}" stroke="{}"/>"#,
                    num(tick.pos),
                    num(t),
                    theme.tick
                );
                if let Some(label) = label {
                    let _ = write!(out, r#"<text y="{}" dy="0.71em" text-anchor="middle">{label}</text>"#, num(t + 3.0));
                }
            }
            Orientation::Left => {
                let _ = write!(
                    out,
                    r#"<g class="tick" transform="translate(0,{})"><line x2="{}" stroke="{}"/>"#,
                    num(tick.pos),
                    num(-t),
                    theme.tick
                );
                if let Some(label) = label {
                    let _ = write!(out, r#"<text x="{}" dy="0.32em" text-anchor="end">{label}</text>"#, num(-(t + 3.0)));
                }
            }
        }
        out.push_str("</g>\n");
    }
    out.push_str("</g>\n");
}

fn alpha(c: Color) -> String {
    num(c.a as f64 / 255.0)
}

fn num(v: f64) -> String {
    let r = (v * 1000.0).round() / 1000.0;
    let r = if r == 0.0 { 0.0 } else { r };
    format!("{r}")
}

fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_markup() {
        assert_eq!(escape(r#"<a & "b">"#), "&lt;a &amp; &quot;b&quot;&gt;");
    }

    #[test]
    fn blank_scene_is_a_valid_empty_document() {
        let svg = to_svg(&Scene::new(), &Theme::light());
        assert!(svg.starts_with("<svg"));
        assert!(svg.trim_end().ends_with("</svg>"));
        assert!(!svg.contains("<path"));
    }
}
