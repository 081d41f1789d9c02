//! Deterministic inputs for the example workloads.
//!
//! Inputs are generated in fixed-size chunks, each from its own `ChaCha8Rng`
//! seeded from the master seed and chunk index, so large inputs build in
//! parallel and still come out identical for a given seed.

use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;

/// Length of every generated word.
pub const WORD_LEN: usize = 7;

const ALPHABET: &[u8; 36] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

const CHUNK: usize = 4096;

fn per_chunk_seed(master_seed: u64, index: usize) -> u64 {
    master_seed
        .wrapping_add(index as u64)
        .wrapping_mul(0x517cc1b727220a95)
}

fn chunked<T: Send>(
    count: usize,
    seed: u64,
    item: impl Fn(&mut ChaCha8Rng) -> T + Sync,
) -> Vec<T> {
    let chunks = count.div_ceil(CHUNK);
    (0..chunks)
        .into_par_iter()
        .flat_map_iter(|c| {
            let mut rng = ChaCha8Rng::seed_from_u64(per_chunk_seed(seed, c));
            let len = CHUNK.min(count - c * CHUNK);
            let item = &item;
            (0..len).map(move |_| item(&mut rng))
        })
        .collect()
}

fn random_word(rng: &mut ChaCha8Rng) -> String {
    (0..WORD_LEN)
        .map(|_| ALPHABET[rng.gen_range(0..ALPHABET.len())] as char)
        .collect()
}

/// `count` random words of [`WORD_LEN`] characters from `A-Z0-9`.
pub fn random_words(count: usize, seed: u64) -> Vec<String> {
    chunked(count, seed, random_word)
}

/// `count` uniform values in `[0, 1)`.
pub fn random_values(count: usize, seed: u64) -> Vec<f64> {
    chunked(count, seed, |rng| rng.gen::<f64>())
}
