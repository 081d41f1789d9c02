use clap::ValueEnum;

pub mod chart;
pub mod dataset;
pub mod error;
pub mod harness;
pub mod pivot;
pub mod recorder;
pub mod report;
pub mod schema;
pub mod session;
pub mod store;
pub mod workloads;

pub use error::{Error, Result};
pub use recorder::{InputLen, Notice, Recorder, Timed};
pub use report::{Report, ReportBuilder, ReportConfig};
pub use schema::Sample;
pub use session::Session;
pub use store::SampleStore;

/// Workload family to benchmark.
#[derive(Clone, Copy, Debug, Default, ValueEnum, PartialEq, Eq)]
pub enum WorkloadFamily {
    /// Run every family.
    #[default]
    All,
    /// Count occurrences of each word.
    Count,
    /// Words of one list found in another (scan, hash set, intersection).
    Within,
    /// Cumulative sum.
    Cumsum,
    /// Simple moving average, window 20.
    MovingAverage,
}
