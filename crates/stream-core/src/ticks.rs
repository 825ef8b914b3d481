// File: crates/stream-core/src/ticks.rs
// Summary: Tick layout helpers: round linear ticks, domain "nicing" and calendar-month ticks.

use chrono::{Datelike, NaiveDate};

const E10: f64 = 7.0710678118654755; // sqrt(50)
const E5: f64 = 3.1622776601683795; // sqrt(10)
const E2: f64 = std::f64::consts::SQRT_2;

/// `(i1, i2, inc)` where ticks are `i * inc` for positive `inc`, or `i / -inc` for negative.
fn tick_spec(start: f64, stop: f64, count: f64) -> (f64, f64, f64) {
    let step = (stop - start) / count.max(0.0);
    let power = step.log10().floor();
    let error = step / 10f64.powf(power);
    let factor = if error >= E10 { 10.0 } else if error >= E5 { 5.0 } else if error >= E2 { 2.0 } else { 1.0 };
    let (mut i1, mut i2, inc);
    if power < 0.0 {
        let k = 10f64.powf(-power) / factor;
        i1 = (start * k).round();
        i2 = (stop * k).round();
        if i1 / k < start { i1 += 1.0; }
        if i2 / k > stop { i2 -= 1.0; }
        inc = -k;
    } else {
        let k = 10f64.powf(power) * factor;
        i1 = (start / k).round();
        i2 = (stop / k).round();
        if i1 * k < start { i1 += 1.0; }
        if i2 * k > stop { i2 -= 1.0; }
        inc = k;
    }
    if i2 < i1 && (0.5..2.0).contains(&count) {
        return tick_spec(start, stop, count * 2.0);
    }
    (i1, i2, inc)
}

/// Signed tick step for `[start, stop]`; negative values encode the reciprocal of the step.
pub fn tick_increment(start: f64, stop: f64, count: usize) -> f64 {
    tick_spec(start, stop, count as f64).2
}

/// Real step between ticks (always positive for a non-degenerate domain).
pub fn tick_step(start: f64, stop: f64, count: usize) -> f64 {
    let (lo, hi) = if stop < start { (stop, start) } else { (start, stop) };
    let inc = tick_increment(lo, hi, count);
    if inc < 0.0 { -1.0 / inc } else { inc }
}

/// Roughly `count` round values spanning `[start, stop]`, in domain order.
pub fn ticks(start: f64, stop: f64, count: usize) -> Vec<f64> {
    if count == 0 || !start.is_finite() || !stop.is_finite() {
        return Vec::new();
    }
    if start == stop {
        return vec![start];
    }
    let reverse = stop < start;
    let (lo, hi) = if reverse { (stop, start) } else { (start, stop) };
    let (i1, i2, inc) = tick_spec(lo, hi, count as f64);
    if !(i2 >= i1) {
        return Vec::new();
    }
    let n = (i2 - i1) as usize + 1;
    let mut out: Vec<f64> = (0..n)
        .map(|i| {
            let k = i1 + i as f64;
            if inc < 0.0 { k / -inc } else { k * inc }
        })
        .collect();
    if reverse {
        out.reverse();
    }
    out
}

/// Extend `[start, stop]` outward to round values, iterating until the step settles.
pub fn nice(start: f64, stop: f64, count: usize) -> (f64, f64) {
    let reverse = stop < start;
    let (mut lo, mut hi) = if reverse { (stop, start) } else { (start, stop) };
    if !(lo < hi) || !lo.is_finite() || !hi.is_finite() {
        return (start, stop);
    }
    let mut prestep = f64::NAN;
    for _ in 0..10 {
        let step = tick_increment(lo, hi, count);
        if step == prestep {
            break;
        } else if step > 0.0 {
            lo = (lo / step).floor() * step;
            hi = (hi / step).ceil() * step;
        } else if step < 0.0 {
            lo = (lo * step).ceil() / step;
            hi = (hi * step).floor() / step;
        } else {
            break;
        }
        prestep = step;
    }
    if reverse { (hi, lo) } else { (lo, hi) }
}

/// Decimal places needed to print ticks spaced `step` apart.
pub fn precision_for_step(step: f64) -> usize {
    if !(step > 0.0) || !step.is_finite() {
        return 0;
    }
    (-step.log10().floor()).max(0.0) as usize
}

/// Fixed-point label with `,` thousands separators, e.g. `1,250` or `0.4`.
pub fn format_tick(value: f64, step: f64) -> String {
    let v = if value == 0.0 { 0.0 } else { value };
    let text = format!("{:.*}", precision_for_step(step), v.abs());
    let (int, frac) = match text.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (text.as_str(), None),
    };
    let mut out = String::with_capacity(text.len() + int.len() / 3 + 1);
    if v < 0.0 && text.bytes().any(|c| c != b'0' && c != b'.') {
        out.push('-');
    }
    for (i, c) in int.chars().enumerate() {
        if i > 0 && (int.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    if let Some(frac) = frac {
        out.push('.');
        out.push_str(frac);
    }
    out
}

/// First day of every calendar month inside `[start, stop]`, inclusive.
pub fn month_starts(start: NaiveDate, stop: NaiveDate) -> Vec<NaiveDate> {
    let mut out = Vec::new();
    if stop < start {
        return out;
    }
    let first = first_of_month(start);
    let mut cur = if first < start { next_month(first) } else { Some(first) };
    while let Some(d) = cur.filter(|d| *d <= stop) {
        out.push(d);
        cur = next_month(d);
    }
    out
}

fn first_of_month(d: NaiveDate) -> NaiveDate {
    d.with_day(1).unwrap_or(d)
}

/// `None` past the last representable month.
fn next_month(d: NaiveDate) -> Option<NaiveDate> {
    let (y, m) = if d.month() == 12 { (d.year() + 1, 1) } else { (d.year(), d.month() + 1) };
    NaiveDate::from_ymd_opt(y, m, 1)
}

/// Month abbreviation, e.g. `Jan`.
pub fn month_label(d: NaiveDate) -> String {
    d.format("%b").to_string()
}
