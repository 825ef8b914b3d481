// File: crates/stream-core/src/stack.rs
// Summary: Stacked layout with the symmetric "wiggle" baseline used by streamgraphs.

use crate::record::Dataset;

/// One stacked series: `(lower, upper)` edge per record, in record order.
#[derive(Clone, Debug, PartialEq)]
pub struct Layer {
    pub key: String,
    pub points: Vec<(f64, f64)>,
}

impl Layer {
    pub fn lower_min(&self) -> Option<f64> {
        self.points.iter().map(|p| p.0).reduce(f64::min)
    }
    pub fn upper_max(&self) -> Option<f64> {
        self.points.iter().map(|p| p.1).reduce(f64::max)
    }
}

/// Stack every dataset series in key order, offsetting the first layer so the weighted slope
/// of the whole stream is minimized, then piling the remaining layers on top of it.
pub fn stack_wiggle(dataset: &Dataset) -> Vec<Layer> {
    let mut layers: Vec<Layer> = dataset
        .keys()
        .iter()
        .enumerate()
        .map(|(i, key)| Layer {
            key: key.clone(),
            points: dataset.records().iter().map(|r| (0.0, r.values[i])).collect(),
        })
        .collect();
    offset_wiggle(&mut layers);
    offset_none(&mut layers);
    layers
}

/// Expects raw values in `.1` and zero in `.0`. Writes the baseline into the first layer.
fn offset_wiggle(layers: &mut [Layer]) {
    let n = layers.len();
    let m = match layers.first() {
        Some(l) if n > 0 => l.points.len(),
        _ => return,
    };
    if m == 0 {
        return;
    }

    let mut baseline = 0.0f64;
    for j in 1..m {
        let mut weight = 0.0f64;
        let mut slope = 0.0f64;
        let mut below = 0.0f64;
        for layer in layers.iter() {
            let cur = layer.points[j].1;
            let prev = layer.points[j - 1].1;
            let delta = cur - prev;
            // slope of this layer's center: half its own change plus the full change below it
            let center = delta / 2.0 + below;
            below += delta;
            weight += cur;
            slope += center * cur;
        }
        let first = &mut layers[0].points[j - 1];
        first.0 = baseline;
        first.1 += baseline;
        if weight != 0.0 {
            baseline -= slope / weight;
        }
    }
    let first = &mut layers[0].points[m - 1];
    first.0 = baseline;
    first.1 += baseline;
}

/// Pile each layer on the upper edge of the one before it.
fn offset_none(layers: &mut [Layer]) {
    for i in 1..layers.len() {
        let (done, rest) = layers.split_at_mut(i);
        let below = &done[i - 1];
        for (p, b) in rest[0].points.iter_mut().zip(&below.points) {
            let base = if b.1.is_nan() { b.0 } else { b.1 };
            p.0 = base;
            p.1 += base;
        }
    }
}

/// Lowest lower edge and highest upper edge across all layers.
pub fn extent(layers: &[Layer]) -> Option<(f64, f64)> {
    let lo = layers.iter().filter_map(Layer::lower_min).reduce(f64::min)?;
    let hi = layers.iter().filter_map(Layer::upper_max).reduce(f64::max)?;
    Some((lo, hi))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Record;

    fn ds(keys: &[&str], rows: &[(&str, &[f64])]) -> Dataset {
        Dataset::new(
            keys.iter().map(|k| k.to_string()).collect(),
            rows.iter().map(|(d, v)| Record::new(*d, v.to_vec())).collect(),
        )
    }

    fn close(a: f64, b: f64) -> bool { (a - b).abs() < 1e-9 }

    #[test]
    fn single_column_stacks_from_zero() {
        let layers = stack_wiggle(&ds(&["a", "b"], &[("2024-01-01", &[2.0, 3.0])]));
        assert_eq!(layers[0].points, vec![(0.0, 2.0)]);
        assert_eq!(layers[1].points, vec![(2.0, 5.0)]);
    }

    #[test]
    fn wiggle_matches_hand_computed_baseline() {
        // j=1: deltas a=+2, b=0; centers a=1, b=2; weights a=3, b=1
        // slope = 1*3 + 2*1 = 5, weight = 4 -> baseline -= 1.25
        let layers = stack_wiggle(&ds(&["a", "b"], &[("d0", &[1.0, 1.0]), ("d1", &[3.0, 1.0])]));
        assert_eq!(layers[0].points[0], (0.0, 1.0));
        assert!(close(layers[0].points[1].0, -1.25));
        assert!(close(layers[0].points[1].1, 1.75));
        assert!(close(layers[1].points[1].0, 1.75));
        assert!(close(layers[1].points[1].1, 2.75));
    }

    #[test]
    fn constant_series_keep_flat_baseline() {
        let layers = stack_wiggle(&ds(&["a", "b"], &[("d0", &[1.0, 2.0]), ("d1", &[1.0, 2.0]), ("d2", &[1.0, 2.0])]));
        for p in &layers[0].points { assert_eq!(*p, (0.0, 1.0)); }
        for p in &layers[1].points { assert_eq!(*p, (1.0, 3.0)); }
        assert_eq!(extent(&layers), Some((0.0, 3.0)));
    }

    #[test]
    fn all_zero_column_does_not_divide_by_zero() {
        let layers = stack_wiggle(&ds(&["a"], &[("d0", &[0.0]), ("d1", &[0.0])]));
        assert!(layers[0].points.iter().all(|p| p.0.is_finite() && p.1.is_finite()));
    }

    #[test]
    fn empty_dataset_yields_empty_layers() {
        let layers = stack_wiggle(&Dataset::empty(vec!["a".into()]));
        assert_eq!(layers.len(), 1);
        assert!(layers[0].points.is_empty());
        assert_eq!(extent(&layers), None);
    }
}
