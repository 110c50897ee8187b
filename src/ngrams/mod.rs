//! English n-gram statistics
//!
//! Loads a `GRAM\tCOUNT` table from disk, log-scales and normalises it, and
//! scores candidate decryptions against it. The table is built once at the
//! session boundary and shared read-only with the search.

use crate::alphabet::ALPHABET_SIZE;
use crate::error::SolverError;
use log::{debug, info};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// A normalised log-frequency table over all 26^n grams of a fixed size.
///
/// Entries hold `log(1 + count)` divided by the table total, so the entries
/// sum to 1 and grams that never occurred contribute exactly zero. Scoring
/// never underflows.
pub struct NgramModel {
    /// Gram size (2 for bigrams, 3 for trigrams, ...).
    n: usize,
    /// Flat table of length 26^n; see [`NgramModel::gram_index`].
    table: Vec<f64>,
}

impl NgramModel {
    /// Load an n-gram table from a file of `GRAM<tab>COUNT` lines.
    ///
    /// # Errors
    /// Returns an error when the file cannot be read, a gram has the wrong
    /// length or holds non-alphabetic characters, or a count fails to parse.
    pub fn from_file(path: &Path, n: usize) -> Result<Self, SolverError> {
        let file = File::open(path)?;
        let reader = BufReader::new(file);

        let mut counts = vec![0.0f64; ALPHABET_SIZE.pow(n as u32)];
        let mut loaded = 0usize;
        for line in reader.lines() {
            let line = line?;
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let mut parts = line.split_whitespace();
            let gram = parts.next().ok_or_else(|| {
                SolverError::Input(format!("malformed n-gram line: {:?}", line))
            })?;
            let count: f64 = parts
                .next()
                .and_then(|c| c.parse().ok())
                .ok_or_else(|| {
                    SolverError::Input(format!("malformed n-gram count: {:?}", line))
                })?;

            let indices: Vec<u8> = gram
                .chars()
                .filter(|c| c.is_ascii_alphabetic())
                .map(|c| c.to_ascii_uppercase() as u8 - b'A')
                .collect();
            if indices.len() != n {
                return Err(SolverError::Input(format!(
                    "expected {}-letter gram, got {:?}",
                    n, gram
                )));
            }
            counts[Self::index_of(&indices)] += count;
            loaded += 1;
        }
        if loaded == 0 {
            return Err(SolverError::Input(format!(
                "n-gram file {} held no grams",
                path.display()
            )));
        }
        info!("loaded {} {}-grams from {}", loaded, n, path.display());
        Ok(Self::from_raw_counts(n, counts))
    }

    /// Build a model from raw counts already arranged in gram-index order.
    /// Used by `from_file` and directly by tests.
    ///
    /// # Panics
    /// Panics when `counts` is not exactly 26^n long.
    pub fn from_raw_counts(n: usize, counts: Vec<f64>) -> Self {
        assert_eq!(counts.len(), ALPHABET_SIZE.pow(n as u32));
        let mut table: Vec<f64> = counts.into_iter().map(|c| (1.0 + c).ln()).collect();
        let total: f64 = table.iter().sum();
        if total > 0.0 {
            for entry in table.iter_mut() {
                *entry /= total;
            }
        }
        debug!("n-gram table normalised over {} entries", table.len());
        NgramModel { n, table }
    }

    /// Gram size this model was built for.
    pub fn size(&self) -> usize {
        self.n
    }

    /// Sum of all table entries; 1 for any non-empty table.
    pub fn total_mass(&self) -> f64 {
        self.table.iter().sum()
    }

    /// Index of a gram `(g0..g_{n-1})` as `sum g_i * 26^i`.
    fn index_of(gram: &[u8]) -> usize {
        let mut idx = 0usize;
        let mut scale = 1usize;
        for &g in gram {
            idx += g as usize * scale;
            scale *= ALPHABET_SIZE;
        }
        idx
    }

    /// Score a decrypted sequence: the sum of table entries over all
    /// length-n windows, normalised by N - n and scaled by 26^n so typical
    /// English lands near 2-4 instead of 1e-5. Higher is more English-like.
    pub fn score(&self, indices: &[u8]) -> f64 {
        let n = self.n;
        if indices.len() <= n {
            return 0.0;
        }
        let windows = indices.len() - n;
        let scale = ALPHABET_SIZE.pow(n as u32) as f64;

        // Rolling index over every window, the final one included: drop the
        // low digit, shift, add the new high digit.
        let high = ALPHABET_SIZE.pow(n as u32 - 1);
        let mut idx = Self::index_of(&indices[..n]);
        let mut sum = self.table[idx];
        for i in n..indices.len() {
            idx = idx / ALPHABET_SIZE + indices[i] as usize * high;
            sum += self.table[idx];
        }
        sum * scale / windows as f64
    }
}
