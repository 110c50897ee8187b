//! Closed-form cycleword derivation for periodic ciphers
//!
//! With the alphabets fixed, each column of a periodic cipher is a simple
//! substitution, so the best key character for a column can be found by
//! exhaustion: decrypt the column under all 26 candidates and keep the one
//! whose letter distribution correlates best with English monograms. This
//! removes the entire cycleword dimension from the stochastic search at a
//! cost of O(26 * N / L) per column.
//!
//! Autokey ciphers are excluded: their key stream is not periodic over the
//! ciphertext, so columns are not substitutions and the climber mutates
//! the primer stochastically instead.

use crate::ciphers::tableau::{beaufort_char, porta_char};
use crate::ciphers::{CipherFamily, SolverState};
use crate::cryptanalysis::ENGLISH_MONOGRAMS;

/// Replace the cycleword of `state` by the per-column optimum under the
/// current alphabets. `state` must belong to a periodic family.
pub fn derive_optimal_cycleword(
    family: CipherFamily,
    variant: bool,
    state: &mut SolverState,
    ciphertext: &[u8],
) {
    debug_assert!(family.is_periodic());
    let period = state.period();

    for column in 0..period {
        let mut best_candidate = 0u8;
        let mut best_score = f64::MIN;

        for candidate in 0..26u8 {
            let mut freq = [0u32; 26];
            let mut count = 0u32;
            for pos in (column..ciphertext.len()).step_by(period) {
                let x = ciphertext[pos];
                let plain = match family {
                    CipherFamily::Beaufort => beaufort_char(candidate, x),
                    CipherFamily::Porta => porta_char(candidate, x),
                    // Quagmire rule with the candidate as the key's
                    // position in the ciphertext alphabet.
                    _ => {
                        let p = state.ct_alphabet.position_of(x) as i32;
                        let d = if variant {
                            p + candidate as i32
                        } else {
                            p - candidate as i32
                        }
                        .rem_euclid(26);
                        state.pt_alphabet.letter_at(d as usize)
                    }
                };
                freq[plain as usize] += 1;
                count += 1;
            }
            if count == 0 {
                continue;
            }
            let score: f64 = freq
                .iter()
                .zip(ENGLISH_MONOGRAMS.iter())
                .map(|(&f, &m)| f as f64 * m)
                .sum::<f64>()
                / count as f64;
            if score > best_score {
                best_score = score;
                best_candidate = candidate;
            }
        }

        state.cycleword[column] = match family {
            // The candidate ranged over key letters directly.
            CipherFamily::Beaufort | CipherFamily::Porta => best_candidate,
            // The candidate was a position; the stored key is the letter of
            // the ciphertext alphabet found there. Straight alphabets
            // (Vigenere) make the two identical.
            _ => state.ct_alphabet.letter_at(best_candidate as usize),
        };
    }
}
