// File: crates/stream-core/src/minibar.rs
// Summary: Per-series mini bar chart shown inside the hover tooltip.

use crate::axis::{AxisModel, Orientation};
use crate::color::Color;
use crate::geometry::{Point, Rect};
use crate::record::parse_date;
use crate::scale::{BandScale, LinearScale, Scale};
use crate::types::Insets;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MiniOptions {
    /// Plot width inside the margins.
    pub width: f64,
    /// Plot height inside the margins.
    pub height: f64,
    pub margin: Insets,
    /// Band padding, inner and outer.
    pub padding: f64,
    /// Target number of y ticks.
    pub y_ticks: usize,
}

impl Default for MiniOptions {
    fn default() -> Self {
        Self { width: 200.0, height: 150.0, margin: Insets::new(30, 10, 10, 30), padding: 0.2, y_ticks: 8 }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Bar {
    pub key: String,
    pub value: f64,
    /// Plot-local rectangle (origin at the top-left of the plot area).
    pub rect: Rect,
}

#[derive(Clone, Debug, PartialEq)]
pub struct MiniBarChart {
    pub title: String,
    pub color: Color,
    pub options: MiniOptions,
    pub bars: Vec<Bar>,
    pub x_axis: AxisModel,
    pub y_axis: AxisModel,
    pub y: LinearScale,
}

impl MiniBarChart {
    /// Outer size including margins.
    pub fn outer_size(&self) -> (f64, f64) {
        let m = self.options.margin;
        (self.options.width + m.hsum() as f64, self.options.height + m.vsum() as f64)
    }

    /// Offset of the plot area inside the outer box.
    pub fn plot_origin(&self) -> Point {
        Point::new(self.options.margin.left as f64, self.options.margin.top as f64)
    }
}

/// Build the bar breakdown for one series from its raw values over time.
///
/// Bars sit on a band scale keyed by date text; the y scale runs from zero to the series
/// maximum, niced. A series with no positive value gets a `[0, 1]` domain so bars stay flat.
pub fn mini_bar_chart(title: &str, points: &[(&str, f64)], color: Color, options: &MiniOptions) -> MiniBarChart {
    let (w, h) = (options.width, options.height);
    let band = BandScale::new(points.iter().map(|(k, _)| *k), (0.0, w), options.padding);

    let max = points.iter().map(|p| p.1).filter(|v| v.is_finite()).reduce(f64::max).unwrap_or(0.0);
    let top = if max > 0.0 { max } else { 1.0 };
    let y = LinearScale::new((0.0, top), (h, 0.0)).nice();

    let bars = points
        .iter()
        .filter_map(|(key, value)| {
            let x = band.position(key)?;
            let y_top = y.to_px(*value).min(h);
            Some(Bar { key: key.to_string(), value: *value, rect: Rect::from_ltrb(x, y_top, x + band.bandwidth(), h) })
        })
        .collect();

    let dates: Vec<_> = band.domain().iter().map(|k| (k.clone(), parse_date(k))).collect();
    let x_axis = AxisModel::band_months(&band, &dates, (0.0, w), Point::new(0.0, h));
    let y_axis = AxisModel::linear(&y, options.y_ticks, Orientation::Left, Point::default());

    MiniBarChart { title: title.to_string(), color, options: *options, bars, x_axis, y_axis, y }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn red() -> Color { Color::rgb(0xe4, 0x1a, 0x1c) }

    #[test]
    fn one_bar_per_point_scaled_to_niced_max() {
        let pts = [("2024-01-01", 10.0), ("2024-02-01", 23.5), ("2024-03-01", 12.0)];
        let chart = mini_bar_chart("GPT-4", &pts, red(), &MiniOptions::default());
        assert_eq!(chart.bars.len(), 3);
        assert_eq!((chart.y.d0, chart.y.d1), (0.0, 24.0));
        let tallest = &chart.bars[1].rect;
        assert!((tallest.height() - 150.0 * 23.5 / 24.0).abs() < 1e-9);
        assert_eq!(tallest.bottom, 150.0);
        assert_eq!(chart.title, "GPT-4");
        assert_eq!(chart.color, red());
    }

    #[test]
    fn axes_follow_band_and_tick_target() {
        let pts = [("2024-01-01", 10.0), ("2024-02-01", 40.0), ("2024-03-01", 12.0)];
        let chart = mini_bar_chart("Gemini", &pts, red(), &MiniOptions::default());
        assert_eq!(chart.x_axis.labels().collect::<Vec<_>>(), ["Jan", "Feb"]);
        assert_eq!(chart.y_axis.labels().count(), 9);
        assert_eq!(chart.outer_size(), (240.0, 190.0));
    }

    #[test]
    fn zero_series_and_empty_input_do_not_panic() {
        let chart = mini_bar_chart("Claude", &[("2024-01-01", 0.0)], red(), &MiniOptions::default());
        assert_eq!(chart.bars[0].rect.height(), 0.0);
        let empty = mini_bar_chart("Claude", &[], red(), &MiniOptions::default());
        assert!(empty.bars.is_empty());
        assert!(empty.x_axis.ticks.is_empty());
    }

    #[test]
    fn negative_values_collapse_to_baseline() {
        let chart = mini_bar_chart("PaLM-2", &[("a", -3.0), ("b", 6.0)], red(), &MiniOptions::default());
        assert_eq!(chart.bars[0].rect.height(), 0.0);
        assert!(chart.bars[1].rect.height() > 0.0);
    }
}
