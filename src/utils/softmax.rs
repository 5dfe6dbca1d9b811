//! Numerically stable softmax
//!
//! Naive softmax overflows once scores pass ~709 (the limit of `exp` in
//! f64). Subtracting the maximum score first keeps every exponent at or
//! below zero, which is safe for inputs spanning arbitrary magnitudes and
//! leaves the distribution unchanged (softmax is shift invariant).

/// Map real-valued scores to a probability distribution
///
/// Returns a vector of the same length with entries in `(0, 1]` summing
/// to 1. The maximum entry always maps to a strictly positive
/// probability; entries far below the maximum underflow to a hard 0.0 in
/// f64 only beyond a gap of ~745, at which point the distribution is
/// degenerate anyway.
///
/// An empty input degenerates to an empty output.
pub fn stable_softmax(scores: &[f64]) -> Vec<f64> {
    let Some(max) = scores.iter().copied().reduce(f64::max) else {
        return Vec::new();
    };

    let exps: Vec<f64> = scores.iter().map(|&s| (s - max).exp()).collect();
    let total: f64 = exps.iter().sum();
    exps.into_iter().map(|e| e / total).collect()
}
