use std::hint::black_box;
use std::time::{Duration, Instant};

use rand_chacha::rand_core::SeedableRng;
use rand_chacha::ChaCha8Rng;

#[derive(Clone, Copy, Debug)]
pub enum Profile {
    Quick,
    Full,
}

impl Profile {
    pub fn as_str(&self) -> &'static str {
        match self {
            Profile::Quick => "quick",
            Profile::Full => "full",
        }
    }
}

/// Rough cost class of a workload variant.
///
/// Quadratic variants get fewer size steps so a run finishes in reasonable
/// time; the caller knows which class each variant is in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Cost {
    Slow,
    Fast,
}

#[derive(Clone, Debug)]
pub struct BenchConfig {
    pub profile: Profile,
    pub seed: u64,
}

impl BenchConfig {
    pub fn rng(&self) -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(self.seed)
    }

    /// Largest power of ten to run for a variant of the given cost.
    pub fn max_exponent(&self, cost: Cost) -> u32 {
        match (self.profile, cost) {
            (Profile::Quick, Cost::Slow) => 3,
            (Profile::Quick, Cost::Fast) => 5,
            (Profile::Full, Cost::Slow) => 4,
            (Profile::Full, Cost::Fast) => 7,
        }
    }

    /// Input sizes `10^1 ..= 10^k`.
    pub fn sizes(&self, cost: Cost) -> Vec<usize> {
        (1..=self.max_exponent(cost))
            .map(|exp| 10usize.pow(exp))
            .collect()
    }
}

/// Time a single call on the monotonic clock.
///
/// The result passes through `black_box` so the call cannot be elided.
pub fn measure_once<R>(f: impl FnOnce() -> R) -> (R, Duration) {
    let start = Instant::now();
    let result = black_box(f());
    let elapsed = start.elapsed();
    (result, elapsed)
}
