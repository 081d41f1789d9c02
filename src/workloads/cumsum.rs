//! Running totals of a numeric sequence.

use crate::dataset::random_values;
use crate::harness::{BenchConfig, Cost};
use crate::recorder::Recorder;

/// O(n²): every prefix is summed from scratch.
pub fn slow_cumulative_sum(values: &[f64]) -> Vec<f64> {
    (0..values.len())
        .map(|i| values[..=i].iter().sum())
        .collect()
}

/// Same cost as [`slow_cumulative_sum`] with the inner sum written out.
pub fn slow_cumulative_sum_expanded(values: &[f64]) -> Vec<f64> {
    let mut out = Vec::with_capacity(values.len());
    for i in 0..values.len() {
        let mut acc = 0.0;
        for v in &values[..=i] {
            acc += v;
        }
        out.push(acc);
    }
    out
}

/// O(n): one accumulator.
pub fn fast_cumulative_sum(values: &[f64]) -> Vec<f64> {
    let mut out = Vec::with_capacity(values.len());
    let mut acc = 0.0;
    for v in values {
        acc += v;
        out.push(acc);
    }
    out
}

pub fn scan_cumulative_sum(values: &[f64]) -> Vec<f64> {
    values
        .iter()
        .scan(0.0, |acc, v| {
            *acc += v;
            Some(*acc)
        })
        .collect()
}

pub fn run(cfg: &BenchConfig, rec: &Recorder) {
    let slow = rec.wrap(slow_cumulative_sum);
    let expanded = rec.wrap(slow_cumulative_sum_expanded);
    for n in cfg.sizes(Cost::Slow) {
        let values = random_values(n, cfg.seed.wrapping_add(n as u64));
        slow.call(values.as_slice());
        expanded.call(values.as_slice());
    }

    let fast = rec.wrap(fast_cumulative_sum);
    let scan = rec.wrap(scan_cumulative_sum);
    for n in cfg.sizes(Cost::Fast) {
        let values = random_values(n, cfg.seed.wrapping_add(n as u64));
        fast.call(values.as_slice());
        scan.call(values.as_slice());
    }
}
