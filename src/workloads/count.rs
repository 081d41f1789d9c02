//! Count occurrences of each word.

use std::collections::{HashMap, HashSet};

use crate::dataset::random_words;
use crate::harness::{BenchConfig, Cost};
use crate::recorder::Recorder;

/// O(n·u) for n words and u unique words: one full scan per unique word.
pub fn slow_count_occurrences(words: &[String]) -> Vec<(String, usize)> {
    let unique: HashSet<&String> = words.iter().collect();
    unique
        .into_iter()
        .map(|word| {
            let count = words.iter().filter(|w| *w == word).count();
            (word.clone(), count)
        })
        .collect()
}

/// O(n): a single pass into a hash map.
pub fn fast_count_occurrences(words: &[String]) -> HashMap<String, usize> {
    let mut counts: HashMap<String, usize> = HashMap::new();
    for word in words {
        *counts.entry(word.clone()).or_insert(0) += 1;
    }
    counts
}

/// Counts ordered most frequent first, ties broken alphabetically.
pub fn ranked_count_occurrences(words: &[String]) -> Vec<(String, usize)> {
    let mut ranked: Vec<(String, usize)> = fast_count_occurrences(words).into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    ranked
}

pub fn run(cfg: &BenchConfig, rec: &Recorder) {
    let slow = rec.wrap(slow_count_occurrences);
    for n in cfg.sizes(Cost::Slow) {
        let words = random_words(n, cfg.seed.wrapping_add(n as u64));
        slow.call(words.as_slice());
    }

    let fast = rec.wrap(fast_count_occurrences);
    let ranked = rec.wrap(ranked_count_occurrences);
    for n in cfg.sizes(Cost::Fast) {
        let words = random_words(n, cfg.seed.wrapping_add(n as u64));
        fast.call(words.as_slice());
        ranked.call(words.as_slice());
    }
}
