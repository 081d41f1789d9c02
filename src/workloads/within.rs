//! Words of the first list that also appear in the second.

use std::collections::HashSet;

use crate::dataset::random_words;
use crate::harness::{BenchConfig, Cost};
use crate::recorder::Recorder;

/// O(u·m): a linear search of `second` for each unique word of `first`.
pub fn slow_match_within(first: &[String], second: &[String]) -> Vec<String> {
    let unique: HashSet<&String> = first.iter().collect();
    unique
        .into_iter()
        .filter(|word| second.contains(word))
        .cloned()
        .collect()
}

/// O(n + m): `second` is hashed once, lookups are O(1).
pub fn fast_match_within(first: &[String], second: &[String]) -> Vec<String> {
    let unique: HashSet<&String> = first.iter().collect();
    let lookup: HashSet<&String> = second.iter().collect();
    unique
        .into_iter()
        .filter(|word| lookup.contains(word))
        .cloned()
        .collect()
}

pub fn fast_intersection(first: &[String], second: &[String]) -> HashSet<String> {
    let a: HashSet<&String> = first.iter().collect();
    let b: HashSet<&String> = second.iter().collect();
    a.intersection(&b).map(|w| (*w).clone()).collect()
}

/// O(n log n + m log m): sort and dedup both sides, then merge.
pub fn sorted_intersection(first: &[String], second: &[String]) -> Vec<String> {
    let mut a: Vec<&String> = first.iter().collect();
    let mut b: Vec<&String> = second.iter().collect();
    a.sort_unstable();
    a.dedup();
    b.sort_unstable();
    b.dedup();

    let (mut i, mut j) = (0, 0);
    let mut out = Vec::new();
    while i < a.len() && j < b.len() {
        match a[i].cmp(b[j]) {
            std::cmp::Ordering::Less => i += 1,
            std::cmp::Ordering::Greater => j += 1,
            std::cmp::Ordering::Equal => {
                out.push(a[i].clone());
                i += 1;
                j += 1;
            }
        }
    }
    out
}

fn inputs(cfg: &BenchConfig, n: usize) -> (Vec<String>, Vec<String>) {
    let seed = cfg.seed.wrapping_add(n as u64);
    (random_words(n, seed), random_words(n, !seed))
}

pub fn run(cfg: &BenchConfig, rec: &Recorder) {
    let slow = rec.wrap(slow_match_within);
    for n in cfg.sizes(Cost::Slow) {
        let (first, second) = inputs(cfg, n);
        slow.call_with(first.as_slice(), second.as_slice());
    }

    let fast = rec.wrap(fast_match_within);
    let set = rec.wrap(fast_intersection);
    let sorted = rec.wrap(sorted_intersection);
    for n in cfg.sizes(Cost::Fast) {
        let (first, second) = inputs(cfg, n);
        fast.call_with(first.as_slice(), second.as_slice());
        set.call_with(first.as_slice(), second.as_slice());
        sorted.call_with(first.as_slice(), second.as_slice());
    }
}
