// File: crates/stream-core/src/curve.rs
// Summary: Backend-neutral path commands and cardinal-spline area construction.

use std::fmt::Write as _;

use crate::geometry::Point;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PathCmd {
    MoveTo(Point),
    LineTo(Point),
    CubicTo(Point, Point, Point),
    Close,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Path {
    pub cmds: Vec<PathCmd>,
}

impl Path {
    pub fn new() -> Self { Self::default() }
    pub fn is_empty(&self) -> bool { self.cmds.is_empty() }
    pub fn move_to(&mut self, p: Point) { self.cmds.push(PathCmd::MoveTo(p)); }
    pub fn line_to(&mut self, p: Point) { self.cmds.push(PathCmd::LineTo(p)); }
    pub fn cubic_to(&mut self, c1: Point, c2: Point, p: Point) { self.cmds.push(PathCmd::CubicTo(c1, c2, p)); }
    pub fn close(&mut self) { self.cmds.push(PathCmd::Close); }

    /// SVG path data, coordinates rounded to 3 decimals.
    pub fn to_svg_d(&self) -> String {
        let mut d = String::new();
        for cmd in &self.cmds {
            let _ = match *cmd {
                PathCmd::MoveTo(p) => write!(d, "M{},{}", fmt(p.x), fmt(p.y)),
                PathCmd::LineTo(p) => write!(d, "L{},{}", fmt(p.x), fmt(p.y)),
                PathCmd::CubicTo(a, b, p) => write!(
                    d,
                    "C{},{},{},{},{},{}",
                    fmt(a.x), fmt(a.y), fmt(b.x), fmt(b.y), fmt(p.x), fmt(p.y)
                ),
                PathCmd::Close => write!(d, "Z"),
            };
        }
        d
    }
}

fn fmt(v: f64) -> String {
    let r = (v * 1000.0).round() / 1000.0;
    let r = if r == 0.0 { 0.0 } else { r };
    format!("{r}")
}

/// Append a cardinal spline through `points` to `path`.
///
/// With `continue_line` the first point is joined with a line instead of starting a sub-path.
/// Tension 0 gives a Catmull-Rom-like curve; 1 gives straight segments.
pub fn cardinal(path: &mut Path, points: &[Point], tension: f64, continue_line: bool) {
    let k = (1.0 - tension) / 6.0;
    match points {
        [] => {}
        [p0] => start(path, *p0, continue_line),
        [p0, p1] => {
            start(path, *p0, continue_line);
            path.line_to(*p1);
        }
        _ => {
            start(path, points[0], continue_line);
            let n = points.len();
            for i in 0..n - 1 {
                // neighbours: the curve mirrors the end points so end tangents flatten
                let prev = if i == 0 { points[1] } else { points[i - 1] };
                let cur = points[i];
                let next = points[i + 1];
                let after = if i + 2 < n { points[i + 2] } else { points[i] };
                let c1 = Point::new(cur.x + k * (next.x - prev.x), cur.y + k * (next.y - prev.y));
                let c2 = Point::new(next.x + k * (cur.x - after.x), next.y + k * (cur.y - after.y));
                path.cubic_to(c1, c2, next);
            }
        }
    }
}

fn start(path: &mut Path, p: Point, continue_line: bool) {
    if continue_line { path.line_to(p) } else { path.move_to(p) }
}

/// Closed area between `top` (drawn left to right) and `bottom` (drawn right to left).
/// Contract: `top.len() == bottom.len()`.
pub fn cardinal_area(path: &mut Path, top: &[Point], bottom: &[Point], tension: f64) {
    if top.is_empty() {
        return;
    }
    cardinal(path, top, tension, false);
    let reversed: Vec<Point> = bottom.iter().rev().copied().collect();
    cardinal(path, &reversed, tension, true);
    path.close();
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: f64, y: f64) -> Point { Point::new(x, y) }

    #[test]
    fn two_points_are_a_straight_segment() {
        let mut path = Path::new();
        cardinal(&mut path, &[p(0.0, 0.0), p(10.0, 5.0)], 0.0, false);
        assert_eq!(path.to_svg_d(), "M0,0L10,5");
    }

    #[test]
    fn three_points_produce_two_cubics_with_flat_ends() {
        let mut path = Path::new();
        cardinal(&mut path, &[p(0.0, 0.0), p(6.0, 6.0), p(12.0, 0.0)], 0.0, false);
        assert_eq!(path.cmds.len(), 3);
        // first control point coincides with the start, last with the end
        assert_eq!(path.to_svg_d(), "M0,0C0,0,4,6,6,6C8,6,12,0,12,0");
    }

    #[test]
    fn area_joins_top_and_reversed_bottom_then_closes() {
        let mut path = Path::new();
        cardinal_area(&mut path, &[p(0.0, 0.0), p(10.0, 0.0)], &[p(0.0, 5.0), p(10.0, 5.0)], 0.0);
        assert_eq!(path.to_svg_d(), "M0,0L10,0L10,5L0,5Z");
    }

    #[test]
    fn single_point_area_is_degenerate_but_valid() {
        let mut path = Path::new();
        cardinal_area(&mut path, &[p(5.0, 1.0)], &[p(5.0, 4.0)], 0.0);
        assert_eq!(path.to_svg_d(), "M5,1L5,4Z");
    }
}
