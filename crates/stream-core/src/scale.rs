// File: crates/stream-core/src/scale.rs
// Summary: Time (X), linear value (Y) and categorical band scales mapping data to pixels.

use chrono::{Datelike, NaiveDate};

use crate::ticks;

/// Maps a domain value to a pixel coordinate.
pub trait Scale {
    type Domain;
    fn to_px(&self, v: Self::Domain) -> f64;
}

/// Normalized position of `v` in `[d0, d1]`; a zero-width domain maps everything to the middle.
#[inline]
fn normalize(v: f64, d0: f64, d1: f64) -> f64 {
    let span = d1 - d0;
    if span == 0.0 || !span.is_finite() { 0.5 } else { (v - d0) / span }
}

/// Continuous linear scale from `[d0, d1]` onto `[r0, r1]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LinearScale {
    pub d0: f64,
    pub d1: f64,
    pub r0: f64,
    pub r1: f64,
}

impl LinearScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self { d0: domain.0, d1: domain.1, r0: range.0, r1: range.1 }
    }

    /// Extend the domain to round values (default count of 10).
    pub fn nice(mut self) -> Self {
        let (d0, d1) = ticks::nice(self.d0, self.d1, 10);
        self.d0 = d0;
        self.d1 = d1;
        self
    }

    pub fn ticks(&self, count: usize) -> Vec<f64> {
        ticks::ticks(self.d0, self.d1, count)
    }

    /// Tick labels formatted with just enough precision for the tick step.
    pub fn tick_labels(&self, count: usize) -> Vec<(f64, String)> {
        let step = ticks::tick_step(self.d0, self.d1, count);
        self.ticks(count).into_iter().map(|t| (t, ticks::format_tick(t, step))).collect()
    }
}

impl Scale for LinearScale {
    type Domain = f64;
    #[inline]
    fn to_px(&self, v: f64) -> f64 {
        self.r0 + normalize(v, self.d0, self.d1) * (self.r1 - self.r0)
    }
}

/// Days since the common era, the continuous unit of the time scale.
#[inline]
pub fn date_to_f64(d: NaiveDate) -> f64 {
    d.num_days_from_ce() as f64
}

/// Linear time scale over calendar dates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TimeScale {
    pub start: NaiveDate,
    pub stop: NaiveDate,
    inner: LinearScale,
}

impl TimeScale {
    pub fn new(start: NaiveDate, stop: NaiveDate, range: (f64, f64)) -> Self {
        Self { start, stop, inner: LinearScale::new((date_to_f64(start), date_to_f64(stop)), range) }
    }

    /// Scale spanning the earliest to latest of `dates`; `None` when there are none.
    pub fn from_extent(dates: impl IntoIterator<Item = NaiveDate>, range: (f64, f64)) -> Option<Self> {
        let mut it = dates.into_iter();
        let first = it.next()?;
        let (lo, hi) = it.fold((first, first), |(lo, hi), d| (lo.min(d), hi.max(d)));
        Some(Self::new(lo, hi, range))
    }

    pub fn range(&self) -> (f64, f64) { (self.inner.r0, self.inner.r1) }

    /// One tick per calendar month start inside the domain.
    pub fn month_ticks(&self) -> Vec<NaiveDate> {
        ticks::month_starts(self.start, self.stop)
    }
}

impl Scale for TimeScale {
    type Domain = NaiveDate;
    #[inline]
    fn to_px(&self, d: NaiveDate) -> f64 {
        self.inner.to_px(date_to_f64(d))
    }
}

/// Categorical scale dividing a range into equal bands with inner/outer padding.
#[derive(Clone, Debug, PartialEq)]
pub struct BandScale {
    domain: Vec<String>,
    start: f64,
    step: f64,
    bandwidth: f64,
}

impl BandScale {
    /// Duplicate keys collapse onto the band of their first occurrence.
    pub fn new<I, S>(keys: I, range: (f64, f64), padding: f64) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut domain: Vec<String> = Vec::new();
        for k in keys {
            let k = k.into();
            if !domain.contains(&k) {
                domain.push(k);
            }
        }
        let n = domain.len() as f64;
        let (r0, r1) = range;
        let padding = padding.clamp(0.0, 1.0);
        let step = (r1 - r0) / (n - padding + padding * 2.0).max(1.0);
        let start = r0 + (r1 - r0 - step * (n - padding)) * 0.5;
        Self { domain, start, step, bandwidth: step * (1.0 - padding) }
    }

    pub fn domain(&self) -> &[String] { &self.domain }
    pub fn bandwidth(&self) -> f64 { self.bandwidth }
    pub fn step(&self) -> f64 { self.step }

    /// Left edge of the band for `key`.
    pub fn position(&self, key: &str) -> Option<f64> {
        self.domain.iter().position(|k| k == key).map(|i| self.start + self.step * i as f64)
    }
}
