// File: crates/stream-core/src/axis.rs
// Summary: Axis model (orientation, placement, ticks with labels) built from scales.

use chrono::NaiveDate;

use crate::geometry::Point;
use crate::scale::{BandScale, LinearScale, Scale, TimeScale};
use crate::ticks::month_label;

/// Length of tick marks in pixels.
pub const TICK_SIZE: f64 = 6.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Orientation {
    /// Horizontal line, ticks and labels below it.
    Bottom,
    /// Vertical line, ticks and labels to its left.
    Left,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Tick {
    /// Position along the axis, relative to `AxisModel::origin`.
    pub pos: f64,
    /// `None` keeps the tick mark but hides its label.
    pub label: Option<String>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct AxisModel {
    pub orientation: Orientation,
    /// Translation of the axis group in its parent's coordinates.
    pub origin: Point,
    /// Extent of the domain line along the axis.
    pub range: (f64, f64),
    pub ticks: Vec<Tick>,
}

impl AxisModel {
    pub fn labels(&self) -> impl Iterator<Item = &str> + '_ {
        self.ticks.iter().filter_map(|t| t.label.as_deref())
    }

    /// Bottom time axis with one tick per calendar month, labeled `Jan`, `Feb`, ...
    pub fn months(scale: &TimeScale, origin: Point) -> Self {
        let ticks = scale
            .month_ticks()
            .into_iter()
            .map(|d| Tick { pos: scale.to_px(d), label: Some(month_label(d)) })
            .collect();
        Self { orientation: Orientation::Bottom, origin, range: scale.range(), ticks }
    }

    /// Bottom band axis: one centered tick per band, labeled by month of the band's date.
    /// The final label is dropped so it does not clip at the right edge.
    pub fn band_months(scale: &BandScale, dates: &[(String, Option<NaiveDate>)], range: (f64, f64), origin: Point) -> Self {
        let half = scale.bandwidth() / 2.0;
        let mut ticks: Vec<Tick> = scale
            .domain()
            .iter()
            .filter_map(|key| {
                let pos = scale.position(key)? + half;
                let date = dates.iter().find(|(k, _)| k == key).and_then(|(_, d)| *d);
                Some(Tick { pos, label: Some(date.map(month_label).unwrap_or_default()) })
            })
            .collect();
        if let Some(last) = ticks.last_mut() {
            last.label = None;
        }
        Self { orientation: Orientation::Bottom, origin, range, ticks }
    }

    /// Linear axis with roughly `count` round ticks.
    pub fn linear(scale: &LinearScale, count: usize, orientation: Orientation, origin: Point) -> Self {
        let ticks = scale
            .tick_labels(count)
            .into_iter()
            .map(|(v, label)| Tick { pos: scale.to_px(v), label: Some(label) })
            .collect();
        Self { orientation, origin, range: (scale.r0, scale.r1), ticks }
    }
}
