// File: crates/stream-core/src/theme.rs
// Summary: Light/Dark theming for chart chrome (background, axes, legend, tooltip).

use crate::color::Color;

#[derive(Clone, Copy, Debug)]
pub struct Theme {
    pub name: &'static str,
    pub background: Color,
    pub axis_line: Color,
    pub axis_label: Color,
    pub tick: Color,
    pub legend_label: Color,
    pub tooltip_background: Color,
    pub tooltip_border: Color,
    pub tooltip_title: Color,
}

impl Theme {
    pub fn light() -> Self {
        Self {
            name: "light",
            background: Color::from_argb(255, 255, 255, 255),
            axis_line: Color::from_argb(255, 60, 60, 70),
            axis_label: Color::from_argb(255, 20, 20, 30),
            tick: Color::from_argb(255, 100, 100, 110),
            legend_label: Color::from_argb(255, 20, 20, 30),
            tooltip_background: Color::from_argb(240, 255, 255, 255),
            tooltip_border: Color::from_argb(255, 204, 204, 204),
            tooltip_title: Color::from_argb(255, 20, 20, 30),
        }
    }

    pub fn dark() -> Self {
        Self {
            name: "dark",
            background: Color::from_argb(255, 18, 18, 20),
            axis_line: Color::from_argb(255, 180, 180, 190),
            axis_label: Color::from_argb(255, 235, 235, 245),
            tick: Color::from_argb(255, 150, 150, 160),
            legend_label: Color::from_argb(255, 235, 235, 245),
            tooltip_background: Color::from_argb(240, 32, 32, 36),
            tooltip_border: Color::from_argb(255, 80, 80, 90),
            tooltip_title: Color::from_argb(255, 235, 235, 245),
        }
    }
}

/// Return a list of built-in theme presets.
pub fn presets() -> Vec<Theme> {
    vec![Theme::light(), Theme::dark()]
}

/// Find a theme by its `name`, falling back to light.
pub fn find(name: &str) -> Theme {
    for t in presets() { if t.name.eq_ignore_ascii_case(name) { return t; } }
    Theme::light()
}
