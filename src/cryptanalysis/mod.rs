//! Statistical machinery for cipher breaking
//!
//! This module provides the letter-level statistics the solver runs on:
//! - Frequency tallies, Index of Coincidence, entropy and chi-squared
//! - The English monogram table used by fitness and the cycleword deriver
//! - Periodic-key length estimation from columnar IoC
//!
//! All functions take letter indices in [0,26) (A=0..Z=25) rather than
//! strings; conversion happens once at the session boundary.

use crate::alphabet::ALPHABET_SIZE;
use log::{debug, trace};
use once_cell::sync::Lazy;

/// English letter frequencies (A-Z) as percentages.
pub const ENGLISH_LETTER_FREQ: [f64; ALPHABET_SIZE] = [
    8.167, 1.492, 2.782, 4.253, 12.702, 2.228, 2.015, // A-G
    6.094, 6.966, 0.153, 0.772, 4.025, 2.406, 6.749, // H-N
    7.507, 1.929, 0.095, 5.987, 6.327, 9.056, 2.758, // O-U
    0.978, 2.360, 0.150, 1.974, 0.074, // V-Z
];

/// English monogram probabilities (frequencies normalised to sum to 1).
/// The cycleword deriver and the fitness IoC/entropy terms read this.
pub static ENGLISH_MONOGRAMS: Lazy<[f64; ALPHABET_SIZE]> = Lazy::new(|| {
    let total: f64 = ENGLISH_LETTER_FREQ.iter().sum();
    let mut probs = [0.0; ALPHABET_SIZE];
    for (p, f) in probs.iter_mut().zip(ENGLISH_LETTER_FREQ.iter()) {
        *p = f / total;
    }
    probs
});

/// Index of Coincidence of English text, scaled by 26.
pub const ENGLISH_IOC_TIMES_26: f64 = 1.742;

/// Shannon entropy (natural log) of English letter frequencies.
pub const ENGLISH_ENTROPY: f64 = 2.85;

/// Count each letter index in the slice.
pub fn frequency_counts(indices: &[u8]) -> [u32; ALPHABET_SIZE] {
    let mut freq = [0u32; ALPHABET_SIZE];
    for &i in indices {
        freq[i as usize] += 1;
    }
    freq
}

/// Friedman's Index of Coincidence, unbiased form
/// `sum f_i (f_i - 1) / (n (n - 1))`.
///
/// IoC is about 0.067 for English and 0.0385 for uniform random letters.
/// Defined as 0 when fewer than two letters are given.
pub fn index_of_coincidence(indices: &[u8]) -> f64 {
    let n = indices.len();
    if n < 2 {
        return 0.0;
    }
    let freq = frequency_counts(indices);
    let sum: f64 = freq
        .iter()
        .map(|&f| (f as f64) * (f as f64 - 1.0))
        .sum();
    sum / ((n as f64) * (n as f64 - 1.0))
}

/// Shannon entropy `-sum p_i ln p_i` of the letter distribution, in nats.
pub fn entropy(indices: &[u8]) -> f64 {
    if indices.is_empty() {
        return 0.0;
    }
    let freq = frequency_counts(indices);
    let n = indices.len() as f64;
    freq.iter()
        .filter(|&&f| f > 0)
        .map(|&f| {
            let p = f as f64 / n;
            -p * p.ln()
        })
        .sum()
}

/// Chi-squared statistic of the letter distribution against English.
/// Lower values indicate a closer match.
pub fn chi_squared(indices: &[u8]) -> f64 {
    if indices.is_empty() {
        return f64::MAX;
    }
    let freq = frequency_counts(indices);
    let n = indices.len() as f64;
    let mut chi_sq = 0.0;
    for i in 0..ALPHABET_SIZE {
        let observed = freq[i] as f64;
        let expected = n * (ENGLISH_LETTER_FREQ[i] / 100.0);
        if expected > 0.0 {
            chi_sq += (observed - expected).powi(2) / expected;
        }
    }
    chi_sq
}

/// Mean columnar IoC for a candidate period: split the ciphertext into
/// `period` columns and average their IoCs. A period equal to the true
/// cycleword length turns every column into a simple substitution, so the
/// average jumps towards the English IoC.
pub fn columnar_ioc(ciphertext: &[u8], period: usize) -> f64 {
    if period == 0 || ciphertext.is_empty() {
        return 0.0;
    }
    let mut total = 0.0;
    let mut column = Vec::with_capacity(ciphertext.len() / period + 1);
    for k in 0..period {
        column.clear();
        column.extend(ciphertext.iter().skip(k).step_by(period));
        total += index_of_coincidence(&column);
    }
    total / period as f64
}

/// Estimate plausible cycleword lengths for a periodic cipher.
///
/// Scores every length in `1..=max_len` by mean columnar IoC, normalises the
/// scores to z-scores (population standard deviation), and accepts a length
/// when its z-score reaches `sigma_threshold` and its raw score reaches
/// `ioc_threshold`. Accepted lengths come back in descending order of raw
/// IoC, ties kept in ascending length order.
///
/// Returns an empty vector when nothing passes, including the degenerate
/// case of zero standard deviation; the orchestrator falls back to a fixed
/// range in that case.
pub fn estimate_periods(
    ciphertext: &[u8],
    max_len: usize,
    sigma_threshold: f64,
    ioc_threshold: f64,
) -> Vec<usize> {
    let scores: Vec<f64> = (1..=max_len)
        .map(|period| columnar_ioc(ciphertext, period))
        .collect();
    if scores.is_empty() {
        return Vec::new();
    }

    let mean: f64 = scores.iter().sum::<f64>() / scores.len() as f64;
    let variance: f64 = scores
        .iter()
        .map(|s| (s - mean).powi(2))
        .sum::<f64>()
        / scores.len() as f64;
    let std_dev = variance.sqrt();

    let mut accepted: Vec<(usize, f64)> = Vec::new();
    for (i, &score) in scores.iter().enumerate() {
        let period = i + 1;
        // Zero spread means no length stands out; z-scores degrade to 0.
        let z = if std_dev > 0.0 {
            (score - mean) / std_dev
        } else {
            0.0
        };
        trace!(
            "period {} has columnar IoC {:.5} (z = {:.2})",
            period,
            score,
            z
        );
        if z >= sigma_threshold && score >= ioc_threshold {
            accepted.push((period, score));
        }
    }

    // Descending raw IoC; ascending length breaks ties because sort_by is
    // stable and candidates were pushed in ascending length order.
    accepted.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
    let lengths: Vec<usize> = accepted.into_iter().map(|(p, _)| p).collect();
    debug!("accepted period candidates: {:?}", lengths);
    lengths
}
