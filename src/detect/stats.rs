//! Flux statistics.
//!
//! Both statistics stay finite for any finite input. When a running sum
//! overflows, it is redone on values divided by a power of two, which is exact
//! for normal floats.

/// Arithmetic mean with compensated (Neumaier) summation.
///
/// Returns `0.0` for an empty slice and exactly the common value when all
/// values are identical.
pub fn mean(values: &[f64]) -> f64 {
    let Some(&first) = values.first() else {
        return 0.0;
    };
    if values.iter().all(|&v| v == first) {
        return first;
    }

    let n = values.len() as f64;
    let sum = compensated_sum(values.iter().copied());
    if sum.is_finite() {
        return sum / n;
    }

    let scale = overflow_scale(values);
    compensated_sum(values.iter().map(|v| v / scale)) / n * scale
}

/// Population standard deviation (divides by `n`).
///
/// Exactly `0.0` when all values are identical or fewer than two are given.
pub fn population_std(values: &[f64], mean: f64) -> f64 {
    let Some(&first) = values.first() else {
        return 0.0;
    };
    if values.len() < 2 || values.iter().all(|&v| v == first) {
        return 0.0;
    }

    let n = values.len() as f64;
    let variance = compensated_sum(values.iter().map(|v| (v - mean) * (v - mean))) / n;
    if variance.is_finite() {
        return variance.sqrt();
    }

    let scale = overflow_scale(values);
    let scaled_mean = mean / scale;
    let variance = compensated_sum(values.iter().map(|v| {
        let d = v / scale - scaled_mean;
        d * d
    })) / n;
    variance.sqrt() * scale
}

/// Power of two (at least `1`) that brings the largest magnitude into `[1, 2)`.
fn overflow_scale(values: &[f64]) -> f64 {
    let max_abs = values.iter().fold(0.0_f64, |m, v| m.max(v.abs()));
    let exponent = max_abs.log2().floor().clamp(0.0, f64::MAX_EXP as f64 - 1.0);
    2.0_f64.powi(exponent as i32)
}

fn compensated_sum(values: impl IntoIterator<Item = f64>) -> f64 {
    let mut sum = 0.0_f64;
    let mut c = 0.0_f64;
    for v in values {
        let t = sum + v;
        if sum.abs() >= v.abs() {
            c += (sum - t) + v;
        } else {
            c += (v - t) + sum;
        }
        sum = t;
    }
    sum + c
}
