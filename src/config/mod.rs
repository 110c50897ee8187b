//! Global configuration for a solver session
//!
//! The CLI turns its arguments into this struct; library callers can build
//! one directly. Defaults match the documented CLI defaults, so
//! `Config { cipher, ..Config::default() }` is a sensible starting point.

use crate::ciphers::CipherFamily;
use crate::searchers::fitness::FitnessWeights;

/// All solver tunables for one session.
#[derive(Debug, Clone)]
pub struct Config {
    /// Cipher family under attack.
    pub cipher: CipherFamily,
    /// Attack the reciprocal ("variant") direction of the tableau.
    pub variant: bool,
    /// Force the ciphertext alphabet to mirror the plaintext alphabet.
    pub same_key: bool,
    /// User-pinned plaintext keyword; fixes that alphabet outright.
    pub pt_keyword: Option<String>,
    /// User-pinned ciphertext keyword.
    pub ct_keyword: Option<String>,
    /// Fixed plaintext keyword prefix length, when the user knows it.
    pub pt_keyword_len: Option<usize>,
    /// Fixed ciphertext keyword prefix length.
    pub ct_keyword_len: Option<usize>,
    /// Lower bound of the keyword-length scan when no length is fixed.
    pub min_keyword_len: usize,
    /// Upper bound (exclusive) of the keyword-length scan.
    pub max_keyword_len: usize,
    /// Fixed cycleword length; skips period estimation entirely.
    pub cycleword_len: Option<usize>,
    /// Upper bound of the period scan.
    pub max_cycleword_len: usize,
    /// Inner iterations per restart.
    pub n_hill_climbs: usize,
    /// Number of shotgun restarts.
    pub n_restarts: usize,
    /// Probability of restarting from the best state instead of a fresh one.
    pub backtrack_probability: f64,
    /// Probability that an iteration mutates a keyword instead of the
    /// cycleword (stochastic-cycleword mode only).
    pub keyword_perm_probability: f64,
    /// Probability of accepting a non-improving move.
    pub slip_probability: f64,
    /// Minimum z-score for a period candidate.
    pub sigma_threshold: f64,
    /// Minimum raw columnar IoC for a period candidate.
    pub ioc_threshold: f64,
    /// Fitness component weights.
    pub weights: FitnessWeights,
    /// Derive the cycleword per column instead of searching it.
    pub optimal_cycleword: bool,
    /// Bias keyword moves towards high-frequency letters.
    pub freq_weighted_perturbation: bool,
    /// Human-readable progress output.
    pub verbose: bool,
    /// Fixed PRNG seed for reproducible runs.
    pub seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            cipher: CipherFamily::Vigenere,
            variant: false,
            same_key: false,
            pt_keyword: None,
            ct_keyword: None,
            pt_keyword_len: None,
            ct_keyword_len: None,
            min_keyword_len: 5,
            max_keyword_len: 12,
            cycleword_len: None,
            max_cycleword_len: 20,
            n_hill_climbs: 1000,
            n_restarts: 1,
            backtrack_probability: 0.15,
            keyword_perm_probability: 0.95,
            slip_probability: 0.01,
            sigma_threshold: 1.0,
            ioc_threshold: 0.047,
            weights: FitnessWeights::default(),
            optimal_cycleword: true,
            freq_weighted_perturbation: false,
            verbose: false,
            seed: None,
        }
    }
}
