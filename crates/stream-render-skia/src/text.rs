// File: crates/stream-render-skia/src/text.rs
// Summary: Label drawing for axes, legend and tooltip title via Skia textlayout.

use skia_safe as skia;
use skia::textlayout::{FontCollection, Paragraph, ParagraphBuilder, ParagraphStyle, TextStyle};

const FAMILIES: &[&str] = &["Helvetica", "Arial", "DejaVu Sans", "Liberation Sans", "sans-serif"];

/// Horizontal placement of a label relative to its anchor x.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Anchor {
    Start,
    Middle,
    End,
}

/// Font size, fill and weight of one label.
#[derive(Clone, Copy, Debug)]
pub struct LabelStyle {
    pub size: f32,
    pub color: skia::Color,
    pub bold: bool,
    pub anchor: Anchor,
}

impl LabelStyle {
    pub fn new(size: f32, color: skia::Color) -> Self {
        Self { size, color, bold: false, anchor: Anchor::Start }
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn anchored(mut self, anchor: Anchor) -> Self {
        self.anchor = anchor;
        self
    }
}

pub struct TextShaper {
    fonts: FontCollection,
}

impl Default for TextShaper {
    fn default() -> Self { Self::new() }
}

impl TextShaper {
    pub fn new() -> Self {
        let mut fonts = FontCollection::new();
        fonts.set_default_font_manager(skia::FontMgr::default(), None);
        Self { fonts }
    }

    fn paragraph(&self, text: &str, style: &LabelStyle) -> Paragraph {
        let mut ts = TextStyle::new();
        ts.set_font_size(style.size.max(1.0));
        ts.set_color(style.color);
        ts.set_font_families(FAMILIES);
        if style.bold {
            ts.set_font_style(skia::FontStyle::bold());
        }
        let mut builder = ParagraphBuilder::new(&ParagraphStyle::new(), &self.fonts);
        builder.push_style(&ts);
        builder.add_text(text);
        let mut paragraph = builder.build();
        paragraph.layout(1.0e4);
        paragraph
    }

    /// Draw `text` with its baseline at `y`, placed around `x` by the style's anchor.
    pub fn draw(&self, canvas: &skia::Canvas, text: &str, x: f32, y: f32, style: LabelStyle) {
        let mut p = self.paragraph(text, &style);
        let w = p.longest_line();
        let left = match style.anchor {
            Anchor::Start => x,
            Anchor::Middle => x - w / 2.0,
            Anchor::End => x - w,
        };
        p.paint(canvas, (left, y - p.alphabetic_baseline()));
    }
}
