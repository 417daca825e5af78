//! Rolling-window primitives over weekly series.
//!
//! Every output has the same length as its input and slot `t` only reads
//! slots `<= t`. Slots without enough history are `None`.

/// Simple moving average over `window` consecutive values.
pub fn rolling_mean(values: &[f64], window: usize) -> Vec<Option<f64>> {
    if window == 0 {
        return vec![None; values.len()];
    }

    (0..values.len())
        .map(|t| {
            if t + 1 < window {
                return None;
            }
            let slice = &values[t + 1 - window..=t];
            Some(slice.iter().sum::<f64>() / window as f64)
        })
        .collect()
}

/// `series[t] - series[t - lag]`, `None` when either side is missing.
pub fn lagged_difference(series: &[Option<f64>], lag: usize) -> Vec<Option<f64>> {
    (0..series.len())
        .map(|t| {
            if lag == 0 || t < lag {
                return None;
            }
            match (series[t], series[t - lag]) {
                (Some(now), Some(then)) => Some(now - then),
                _ => None,
            }
        })
        .collect()
}

/// Highest value in `values[start..end]`, `None` for an empty range.
pub fn window_max(values: &[f64], start: usize, end: usize) -> Option<f64> {
    values
        .get(start..end)?
        .iter()
        .copied()
        .fold(None, |acc: Option<f64>, v| match acc {
            Some(a) => Some(a.max(v)),
            None => Some(v),
        })
}
