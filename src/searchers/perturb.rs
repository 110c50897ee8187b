//! Mutation moves for the hill-climber
//!
//! Keyword alphabets move by swapping two prefix letters (80%) or trading a
//! prefix letter for a suffix letter (20%), which keeps the keyword prefix
//! length and the sorted-suffix invariant intact. Cyclewords move by point
//! mutation. An optional variant biases the position draws towards
//! high-frequency English letters.

use crate::alphabet::{KeyedAlphabet, ALPHABET_SIZE};
use crate::cryptanalysis::ENGLISH_MONOGRAMS;
use rand::Rng;

/// Probability of the swap-within move (vs. swap-with-suffix).
const P_SWAP_WITHIN: f64 = 0.8;

/// Apply one keyword move to the alphabet, positions drawn uniformly.
pub fn perturb_keyword<R: Rng + ?Sized>(alphabet: &mut KeyedAlphabet, rng: &mut R) {
    let prefix = alphabet.prefix_len();
    let swap_within = if prefix < 2 {
        false
    } else if prefix >= ALPHABET_SIZE {
        true
    } else {
        rng.random_bool(P_SWAP_WITHIN)
    };

    if swap_within {
        let i = rng.random_range(0..prefix);
        let j = rng.random_range(0..prefix);
        alphabet.swap_positions(i, j);
    } else {
        let i = rng.random_range(0..prefix);
        let j = rng.random_range(prefix..ALPHABET_SIZE);
        alphabet.swap_with_suffix(i, j);
    }
}

/// Apply one keyword move with positions drawn proportionally to the
/// English frequency of the letter currently held there. Biasing the moves
/// towards E/T/A-class letters concentrates search effort where the
/// fitness is most sensitive.
pub fn perturb_keyword_weighted<R: Rng + ?Sized>(alphabet: &mut KeyedAlphabet, rng: &mut R) {
    let prefix = alphabet.prefix_len();
    let swap_within = if prefix < 2 {
        false
    } else if prefix >= ALPHABET_SIZE {
        true
    } else {
        rng.random_bool(P_SWAP_WITHIN)
    };

    if swap_within {
        let i = weighted_position(alphabet, 0, prefix, rng);
        let j = weighted_position(alphabet, 0, prefix, rng);
        alphabet.swap_positions(i, j);
    } else {
        let i = weighted_position(alphabet, 0, prefix, rng);
        let j = weighted_position(alphabet, prefix, ALPHABET_SIZE, rng);
        alphabet.swap_with_suffix(i, j);
    }
}

/// Draw a position in `[start, end)` with probability proportional to the
/// English monogram frequency of the letter at that position.
fn weighted_position<R: Rng + ?Sized>(
    alphabet: &KeyedAlphabet,
    start: usize,
    end: usize,
    rng: &mut R,
) -> usize {
    let total: f64 = (start..end)
        .map(|p| ENGLISH_MONOGRAMS[alphabet.letter_at(p) as usize])
        .sum();
    let mut target = rng.random_range(0.0..total);
    for p in start..end {
        target -= ENGLISH_MONOGRAMS[alphabet.letter_at(p) as usize];
        if target <= 0.0 {
            return p;
        }
    }
    end - 1
}

/// Point-mutate the cycleword: one uniform slot gets one uniform letter.
pub fn perturb_cycleword<R: Rng + ?Sized>(cycleword: &mut [u8], rng: &mut R) {
    let slot = rng.random_range(0..cycleword.len());
    cycleword[slot] = rng.random_range(0..ALPHABET_SIZE as u8);
}

/// Draw a uniform random cycleword of length `l`.
pub fn random_cycleword<R: Rng + ?Sized>(l: usize, rng: &mut R) -> Vec<u8> {
    (0..l)
        .map(|_| rng.random_range(0..ALPHABET_SIZE as u8))
        .collect()
}
