//! Quagmire is an automated solver for the ACA polyalphabetic cipher
//! family: Vigenere, Quagmire I-IV, Beaufort, Porta and their Autokey
//! variants. Given a ciphertext (A-Z only) and an optional crib it recovers
//! the plaintext together with the keyed alphabets and the periodic key.
// Warns in case we forget to include documentation
#![warn(
    missing_docs,
    clippy::missing_docs_in_private_items,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc
)]

/// Keyed alphabets and text/index conversion.
pub mod alphabet;
/// The cipher family: tableau and autokey engines behind one entry point.
pub mod ciphers;
/// CLI arg parsing library.
pub mod cli;
/// CLI pretty printing module for consistent output formatting.
pub mod cli_pretty_printing;
/// The Config module enables a configuration struct,
/// like a global API to access every solver tunable.
pub mod config;
/// Crib (partial known-plaintext) handling.
pub mod crib;
/// Letter statistics: IoC, entropy, chi-squared, period estimation.
pub mod cryptanalysis;
/// Error types for the session boundary.
pub mod error;
/// The n-gram language model used for scoring.
pub mod ngrams;
/// The search core: orchestrator, hill-climber, fitness, perturbation.
pub mod searchers;
/// Corpus loading: ciphertext, crib, batch and dictionary files.
pub mod storage;

use crib::Crib;
use log::debug;
use ngrams::NgramModel;
use rayon::prelude::*;
use std::sync::atomic::AtomicBool;

pub use config::Config;
pub use searchers::SolveOutcome;

/// The main function to call which performs the cryptanalysis.
///
/// ```rust
/// use quagmire::alphabet::{text_to_indices, KeyedAlphabet};
/// use quagmire::ciphers::{self, CipherFamily, SolverState};
/// use quagmire::crib::Crib;
/// use quagmire::ngrams::NgramModel;
/// use quagmire::{perform_solve, Config};
///
/// let plain = text_to_indices(
///     "It is a truth universally acknowledged that a single man in \
///      possession of a good fortune must be in want of a wife However \
///      little known the feelings or views of such a man may be on his \
///      first entering a neighbourhood this truth is so well fixed in the \
///      minds of the surrounding families that he is considered the \
///      rightful property of some one or other of their daughters",
/// );
///
/// // Encrypt the passage with a length-5 Vigenere key...
/// let state = SolverState {
///     pt_alphabet: KeyedAlphabet::straight(),
///     ct_alphabet: KeyedAlphabet::straight(),
///     cycleword: text_to_indices("CRYPT"),
/// };
/// let ciphertext = ciphers::encrypt(CipherFamily::Vigenere, false, &state, &plain);
///
/// // ...and recover it. Any English-counted bigram table works; here the
/// // counts come straight from the passage itself.
/// let mut counts = vec![0.0; 26 * 26];
/// for w in plain.windows(2) {
///     counts[w[0] as usize + 26 * w[1] as usize] += 1.0;
/// }
/// let ngrams = NgramModel::from_raw_counts(2, counts);
///
/// let config = Config {
///     n_hill_climbs: 10,
///     seed: Some(1),
///     ..Config::default()
/// };
/// let outcome = perform_solve(&ciphertext, &Crib::empty(), &ngrams, &config).unwrap();
/// assert_eq!(outcome.plaintext, plain);
/// ```
pub fn perform_solve(
    ciphertext: &[u8],
    crib: &Crib,
    ngrams: &NgramModel,
    config: &Config,
) -> Option<SolveOutcome> {
    let stop = AtomicBool::new(false);
    perform_solve_with_stop(ciphertext, crib, ngrams, config, &stop)
}

/// [`perform_solve`] with a caller-owned cancellation flag. The flag is
/// checked between climber restarts; there is no mid-iteration preemption.
pub fn perform_solve_with_stop(
    ciphertext: &[u8],
    crib: &Crib,
    ngrams: &NgramModel,
    config: &Config,
    stop: &AtomicBool,
) -> Option<SolveOutcome> {
    debug!(
        "solving {} letters of {} ciphertext",
        ciphertext.len(),
        config.cipher
    );
    searchers::search_for_plaintext(ciphertext, crib, ngrams, config, stop)
}

/// Solve a batch of independent ciphertexts, sharded across threads.
/// Each item runs the full single-ciphertext search with no crib; results
/// keep the input order.
pub fn perform_solve_batch(
    ciphertexts: &[Vec<u8>],
    ngrams: &NgramModel,
    config: &Config,
) -> Vec<Option<SolveOutcome>> {
    let crib = Crib::empty();
    ciphertexts
        .par_iter()
        .map(|ciphertext| {
            let stop = AtomicBool::new(false);
            searchers::search_for_plaintext(ciphertext, &crib, ngrams, config, &stop)
        })
        .collect()
}
