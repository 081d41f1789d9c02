//! Simple moving average over a fixed window.
//!
//! Output has one entry per input value. Positions before the first full
//! window are `None`.

use crate::dataset::random_values;
use crate::harness::{BenchConfig, Cost};
use crate::recorder::Recorder;

pub const DEFAULT_WINDOW: usize = 20;

/// O(n·m): each window is re-summed.
pub fn slow_moving_average(values: &[f64], window: usize) -> Vec<Option<f64>> {
    if window == 0 {
        return vec![None; values.len()];
    }
    (0..values.len())
        .map(|i| {
            (i + 1 >= window)
                .then(|| values[i + 1 - window..=i].iter().sum::<f64>() / window as f64)
        })
        .collect()
}

/// O(n): a running sum drops the value leaving the window and adds the new one.
pub fn fast_moving_average(values: &[f64], window: usize) -> Vec<Option<f64>> {
    let mut out = vec![None; values.len()];
    if window == 0 || values.len() < window {
        return out;
    }

    let mut acc: f64 = values[..window].iter().sum();
    out[window - 1] = Some(acc / window as f64);
    for i in window..values.len() {
        acc += values[i] - values[i - window];
        out[i] = Some(acc / window as f64);
    }
    out
}

/// O(n): differences of a prefix-sum array.
pub fn prefix_moving_average(values: &[f64], window: usize) -> Vec<Option<f64>> {
    if window == 0 {
        return vec![None; values.len()];
    }
    let mut prefix = Vec::with_capacity(values.len() + 1);
    prefix.push(0.0);
    for v in values {
        prefix.push(prefix[prefix.len() - 1] + v);
    }
    (0..values.len())
        .map(|i| {
            (i + 1 >= window).then(|| (prefix[i + 1] - prefix[i + 1 - window]) / window as f64)
        })
        .collect()
}

pub fn run(cfg: &BenchConfig, rec: &Recorder) {
    let slow = rec.wrap(slow_moving_average);
    for n in cfg.sizes(Cost::Slow) {
        let values = random_values(n, cfg.seed.wrapping_add(n as u64));
        slow.call_with(values.as_slice(), DEFAULT_WINDOW);
    }

    let fast = rec.wrap(fast_moving_average);
    let prefix = rec.wrap(prefix_moving_average);
    for n in cfg.sizes(Cost::Fast) {
        let values = random_values(n, cfg.seed.wrapping_add(n as u64));
        fast.call_with(values.as_slice(), DEFAULT_WINDOW);
        prefix.call_with(values.as_slice(), DEFAULT_WINDOW);
    }
}
