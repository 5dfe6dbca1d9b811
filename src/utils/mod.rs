//! Numeric helpers shared across agents and the runner

pub mod softmax;

/// Index of the largest value, ties broken by the lowest index
///
/// Standard max-search semantics: a later entry replaces the current best
/// only when strictly greater. Returns 0 for an empty slice.
pub fn argmax(values: &[f64]) -> usize {
    let mut best_idx = 0;
    let mut best = f64::NEG_INFINITY;
    for (idx, &v) in values.iter().enumerate() {
        if v > best {
            best = v;
            best_idx = idx;
        }
    }
    best_idx
}

/// Fold a sample into a running mean, in place
///
/// Applies `agg[i] += (1/count) * (sample[i] - agg[i])` entrywise, where
/// `count` is the 1-based number of samples folded so far (this one
/// included). With `count = 1` the aggregate becomes an exact copy of the
/// sample.
pub fn fold_running_mean(agg: &mut [f64], sample: &[f64], count: usize) {
    debug_assert_eq!(agg.len(), sample.len());
    let weight = 1.0 / count as f64;
    for (a, &s) in agg.iter_mut().zip(sample.iter()) {
        *a += weight * (s - *a);
    }
}
