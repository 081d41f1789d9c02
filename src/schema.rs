use serde::Serialize;
use std::time::Duration;

/// Smallest elapsed time, in milliseconds, a sample can carry.
///
/// This is the display resolution of `elapsed_ms` (three decimals, 1µs). Calls
/// that finish faster are recorded at this floor so throughput stays finite.
pub const EPSILON_MS: f64 = 0.001;

fn round3(ms: f64) -> f64 {
    (ms * 1000.0).round() / 1000.0
}

/// One timed invocation of one workload at one input size.
///
/// Fields are read-only; throughput is always derived from the other two.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Sample {
    #[serde(rename = "function")]
    function_name: String,
    #[serde(rename = "n_values")]
    input_size: usize,
    #[serde(rename = "t_milliseconds")]
    elapsed_ms: f64,
    #[serde(rename = "values_per_ms")]
    throughput: u64,
}

impl Sample {
    /// Build a sample from a measured duration, flooring it at [`EPSILON_MS`].
    pub fn from_duration(
        function_name: impl Into<String>,
        input_size: usize,
        elapsed: Duration,
    ) -> Self {
        Self::from_millis(function_name, input_size, elapsed.as_secs_f64() * 1000.0)
    }

    /// Build a sample from milliseconds. Values below [`EPSILON_MS`], zero,
    /// negative or NaN are stored as [`EPSILON_MS`].
    pub fn from_millis(
        function_name: impl Into<String>,
        input_size: usize,
        elapsed_ms: f64,
    ) -> Self {
        let elapsed_ms = round3(elapsed_ms.max(EPSILON_MS));
        let throughput = (input_size as f64 / elapsed_ms.max(EPSILON_MS)).round() as u64;
        Self {
            function_name: function_name.into(),
            input_size,
            elapsed_ms,
            throughput,
        }
    }

    pub fn function_name(&self) -> &str {
        &self.function_name
    }

    pub fn input_size(&self) -> usize {
        self.input_size
    }

    pub fn elapsed_ms(&self) -> f64 {
        self.elapsed_ms
    }

    /// Items processed per millisecond.
    pub fn throughput(&self) -> u64 {
        self.throughput
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RunMeta {
    pub schema_version: u32,
    pub bench_version: String,
    pub profile: String,
    pub seed: u64,
    pub timestamp_utc: String,
    pub git_sha: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ScalingBenchReport {
    pub run: RunMeta,
    pub samples: Vec<Sample>,
}
