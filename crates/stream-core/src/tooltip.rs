// File: crates/stream-core/src/tooltip.rs
// Summary: Floating tooltip panel and the pointer events that drive it.

use crate::geometry::Point;
use crate::minibar::MiniBarChart;

/// Offset between the pointer and the panel's top-left corner.
pub const TOOLTIP_OFFSET: Point = Point::new(15.0, 15.0);

/// Contents and placement of the hover panel. Rebuilt from scratch on every enter.
#[derive(Clone, Debug, PartialEq)]
pub struct TooltipPanel {
    pub chart: MiniBarChart,
    /// Top-left corner in frame coordinates.
    pub position: Point,
}

impl TooltipPanel {
    /// Inner padding of the panel box.
    pub const PADDING: f64 = 8.0;
    /// Height reserved for the title line above the mini chart.
    pub const TITLE_HEIGHT: f64 = 24.0;

    pub fn title(&self) -> &str { &self.chart.title }

    /// Outer size of the panel box.
    pub fn size(&self) -> (f64, f64) {
        let (w, h) = self.chart.outer_size();
        (w + 2.0 * Self::PADDING, h + 2.0 * Self::PADDING + Self::TITLE_HEIGHT)
    }

    /// Top-left of the mini chart's outer box, relative to the panel.
    pub fn chart_offset(&self) -> Point {
        Point::new(Self::PADDING, Self::PADDING + Self::TITLE_HEIGHT)
    }
}

/// Pointer input in frame coordinates (x/y are pixels, not chart values).
#[derive(Clone, Debug, PartialEq)]
pub enum PointerEvent {
    /// Pointer entered the region of `series`.
    Enter { series: String },
    /// Pointer moved while over a region.
    Move { at: Point },
    /// Pointer left the region of `series`.
    Leave { series: String },
    /// Raw pointer position; the view resolves which region, if any, is under it.
    At(Point),
}

/// Which pointer interactions a drawn region responds to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerKind {
    Enter,
    Move,
    Leave,
}

/// Interaction binding attached to one drawn series region.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Handlers {
    pub series: String,
    pub kinds: Vec<PointerKind>,
}

impl Handlers {
    /// Enter shows the panel, move follows the pointer, leave hides and clears it.
    pub fn hover(series: impl Into<String>) -> Self {
        Self { series: series.into(), kinds: vec![PointerKind::Enter, PointerKind::Move, PointerKind::Leave] }
    }
}
