// File: crates/stream-core/src/types.rs
// Summary: Shared types and constants (frame sizes, margins, paddings).

/// Default outer frame width in pixels.
pub const WIDTH: u32 = 600;
/// Default outer frame height in pixels.
pub const HEIGHT: u32 = 400;

/// Width of the legend column to the right of the chart frame.
pub const LEGEND_WIDTH: u32 = 120;
/// Vertical distance between legend rows.
pub const LEGEND_ROW: f64 = 20.0;
/// Side of a legend color swatch.
pub const LEGEND_SWATCH: f64 = 12.0;

/// Screen margins, in pixels.
/// Contract: all fields are non-negative.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Insets {
    pub left: u32,
    pub right: u32,
    pub top: u32,
    pub bottom: u32,
}

impl Insets {
    /// Create new insets (non-negative by type).
    pub const fn new(left: u32, right: u32, top: u32, bottom: u32) -> Self {
        Self { left, right, top, bottom }
    }
    /// Total horizontal inset (left + right).
    pub const fn hsum(&self) -> u32 { self.left + self.right }
    /// Total vertical inset (top + bottom).
    pub const fn vsum(&self) -> u32 { self.top + self.bottom }
}

impl Default for Insets {
    fn default() -> Self {
        Self::new(50, 20, 20, 30)
    }
}

/// Outer drawing frame: total size plus the margins around the plot area.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Frame {
    pub width: u32,
    pub height: u32,
    pub margin: Insets,
}

impl Frame {
    pub const fn new(width: u32, height: u32, margin: Insets) -> Self {
        Self { width, height, margin }
    }
    /// Plot width inside the margins (never negative).
    pub fn inner_width(&self) -> f64 {
        self.width.saturating_sub(self.margin.hsum()) as f64
    }
    /// Plot height inside the margins (never negative).
    pub fn inner_height(&self) -> f64 {
        self.height.saturating_sub(self.margin.vsum()) as f64
    }
}

impl Default for Frame {
    fn default() -> Self {
        Self::new(WIDTH, HEIGHT, Insets::default())
    }
}
