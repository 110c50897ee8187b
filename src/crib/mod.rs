//! Crib handling: partial known-plaintext masks
//!
//! A crib pins known plaintext letters to known positions. It is used three
//! ways: a cheap per-period compatibility precheck that can rule a period
//! out before any search happens, constraint propagation that turns a
//! keyword candidate directly into cycleword slots (or exposes the
//! candidate as contradictory), and a plain match ratio inside the fitness
//! function.

use crate::alphabet::ALPHABET_SIZE;
use crate::ciphers::{SolverState, MAX_PERIOD};
use crate::error::SolverError;
use log::trace;

/// Sentinel for "no mapping seen yet" in the precheck tables.
const UNSET: u8 = u8::MAX;

/// A partial known-plaintext mask: parallel arrays of strictly increasing
/// positions and the plaintext letter known at each. Empty means no crib.
#[derive(Debug, Clone, Default)]
pub struct Crib {
    /// Ciphertext positions with known plaintext, strictly increasing.
    positions: Vec<usize>,
    /// Known plaintext letter index at each position.
    values: Vec<u8>,
}

impl Crib {
    /// The empty crib.
    pub fn empty() -> Self {
        Crib::default()
    }

    /// Parse a crib mask: one symbol per ciphertext letter, `_` for unknown
    /// positions, A-Z for known plaintext. Whitespace is ignored.
    ///
    /// # Errors
    /// Returns `CribLengthMismatch` when the mask length differs from the
    /// ciphertext length, and `Input` on any other symbol.
    pub fn from_mask(mask: &str, ciphertext_len: usize) -> Result<Self, SolverError> {
        let mut positions = Vec::new();
        let mut values = Vec::new();
        let mut len = 0usize;

        for c in mask.chars() {
            if c.is_whitespace() {
                continue;
            }
            if c == '_' {
                len += 1;
            } else if c.is_ascii_alphabetic() {
                positions.push(len);
                values.push(c.to_ascii_uppercase() as u8 - b'A');
                len += 1;
            } else {
                return Err(SolverError::Input(format!(
                    "unexpected symbol {:?} in crib mask",
                    c
                )));
            }
        }

        if len != ciphertext_len {
            return Err(SolverError::CribLengthMismatch {
                crib: len,
                ciphertext: ciphertext_len,
            });
        }
        Ok(Crib { positions, values })
    }

    /// Number of known plaintext letters.
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// True when no plaintext is known.
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// How many crib letters the candidate plaintext agrees with.
    pub fn match_count(&self, plaintext: &[u8]) -> usize {
        self.positions
            .iter()
            .zip(self.values.iter())
            .filter(|(&pos, &val)| plaintext.get(pos) == Some(&val))
            .count()
    }

    /// Crib match ratio in [0,1]; 0 when there is no crib.
    pub fn match_ratio(&self, plaintext: &[u8]) -> f64 {
        if self.is_empty() {
            return 0.0;
        }
        self.match_count(plaintext) as f64 / self.len() as f64
    }

    /// Period compatibility precheck.
    ///
    /// Under any periodic cipher of this family, one column is one simple
    /// substitution, so within a column each plaintext letter must pair
    /// with exactly one ciphertext letter and vice-versa. A crib pair that
    /// breaks that rules the period out before any search is spent on it.
    /// Vacuously true for the empty crib.
    pub fn satisfiable_at_period(&self, ciphertext: &[u8], period: usize) -> bool {
        if self.is_empty() {
            return true;
        }
        for column in 0..period {
            let mut plain_to_ct = [UNSET; ALPHABET_SIZE];
            let mut ct_to_plain = [UNSET; ALPHABET_SIZE];
            for (&pos, &plain) in self.positions.iter().zip(self.values.iter()) {
                if pos % period != column || pos >= ciphertext.len() {
                    continue;
                }
                let ct = ciphertext[pos];
                if plain_to_ct[plain as usize] == UNSET {
                    plain_to_ct[plain as usize] = ct;
                } else if plain_to_ct[plain as usize] != ct {
                    trace!(
                        "period {} rejected: plaintext {} maps to two ciphertext letters in column {}",
                        period, plain, column
                    );
                    return false;
                }
                if ct_to_plain[ct as usize] == UNSET {
                    ct_to_plain[ct as usize] = plain;
                } else if ct_to_plain[ct as usize] != plain {
                    trace!(
                        "period {} rejected: ciphertext {} maps to two plaintext letters in column {}",
                        period, ct, column
                    );
                    return false;
                }
            }
        }
        true
    }

    /// Propagate crib constraints into the cycleword of `state`.
    ///
    /// For fixed keyed alphabets each crib pair pins its cycleword slot
    /// outright: `rot = (variant ? q - p : p - q) mod 26` with `p` the
    /// ciphertext letter's position and `q` the plaintext letter's position,
    /// and the slot must hold `C[rot]`. Slots untouched by cribs keep their
    /// current values.
    ///
    /// Returns `true` on contradiction (two cribs demand different letters
    /// in one slot), which tells the climber this keyword candidate is
    /// hopeless and the next perturbation must hit the keyword.
    pub fn constrain_cycleword(
        &self,
        state: &mut SolverState,
        variant: bool,
        ciphertext: &[u8],
    ) -> bool {
        if self.is_empty() {
            return false;
        }
        let period = state.period();
        debug_assert!(period <= MAX_PERIOD);
        let mut implied = [UNSET; MAX_PERIOD];

        for (&pos, &plain) in self.positions.iter().zip(self.values.iter()) {
            if pos >= ciphertext.len() {
                continue;
            }
            let p = state.ct_alphabet.position_of(ciphertext[pos]) as i32;
            let q = state.pt_alphabet.position_of(plain) as i32;
            let rot = if variant { q - p } else { p - q }.rem_euclid(ALPHABET_SIZE as i32);
            let letter = state.ct_alphabet.letter_at(rot as usize);

            let slot = pos % period;
            if implied[slot] == UNSET {
                implied[slot] = letter;
                state.cycleword[slot] = letter;
            } else if implied[slot] != letter {
                trace!(
                    "crib contradiction in cycleword slot {}: {} vs {}",
                    slot, implied[slot], letter
                );
                return true;
            }
        }
        false
    }
}
