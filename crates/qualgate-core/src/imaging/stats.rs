//! Population statistics over signed pixel responses.

/// Arithmetic mean. Zero for an empty slice.
#[allow(clippy::cast_precision_loss)]
#[must_use]
pub fn mean<T: Copy + Into<f64>>(values: &[T]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().map(|&v| v.into()).sum::<f64>() / values.len() as f64
}

/// Population variance (divides by `n`), computed in two passes.
#[allow(clippy::cast_precision_loss)]
#[must_use]
pub fn variance<T: Copy + Into<f64>>(values: &[T]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mean = mean(values);
    values
        .iter()
        .map(|&v| {
            let diff = v.into() - mean;
            diff * diff
        })
        .sum::<f64>()
        / values.len() as f64
}

/// Population standard deviation.
#[must_use]
pub fn std_dev<T: Copy + Into<f64>>(values: &[T]) -> f64 {
    variance(values).sqrt()
}
