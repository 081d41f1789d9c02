//! Example workloads: slow and fast variants of a few sequence algorithms.
//!
//! Each family's `run` times every variant at `10^1 ..= 10^k` items, with
//! fewer steps for the quadratic variants.

pub mod count;
pub mod cumsum;
pub mod moving_average;
pub mod within;

use crate::harness::BenchConfig;
use crate::recorder::Recorder;
use crate::WorkloadFamily;

pub fn run(cfg: &BenchConfig, family: WorkloadFamily, rec: &Recorder) {
    let all = family == WorkloadFamily::All;
    if all || family == WorkloadFamily::Count {
        count::run(cfg, rec);
    }
    if all || family == WorkloadFamily::Within {
        within::run(cfg, rec);
    }
    if all || family == WorkloadFamily::Cumsum {
        cumsum::run(cfg, rec);
    }
    if all || family == WorkloadFamily::MovingAverage {
        moving_average::run(cfg, rec);
    }
}
