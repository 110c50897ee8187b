//! Keyed alphabet construction and text/index conversion
//!
//! Every cipher in the Quagmire family is parameterised by one or two keyed
//! alphabets: permutations of A-Z built by writing the distinct letters of a
//! keyword first and the remaining letters in ascending order after them.
//! This module owns that type plus the A-Z <-> [0,26) conversions used
//! everywhere else.

use rand::seq::SliceRandom;
use rand::Rng;
use std::fmt;

/// Number of letters in the Latin alphabet.
pub const ALPHABET_SIZE: usize = 26;

/// A permutation of the 26 letter indices, with the keyword prefix length
/// remembered so perturbation can respect the sorted-suffix invariant.
///
/// `letters[p]` is the letter index found at position `p`; `positions[l]` is
/// the inverse map. Both are kept in sync by every mutating method, so
/// position lookups in the decryption hot loop are a single array read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyedAlphabet {
    /// The permutation itself, position -> letter.
    letters: [u8; ALPHABET_SIZE],
    /// Inverse permutation, letter -> position.
    positions: [u8; ALPHABET_SIZE],
    /// How many leading positions came from the keyword.
    /// The suffix `[prefix_len..26)` is always sorted ascending.
    prefix_len: usize,
}

impl KeyedAlphabet {
    /// The straight A-Z alphabet (identity permutation, empty keyword).
    pub fn straight() -> Self {
        let mut letters = [0u8; ALPHABET_SIZE];
        for (i, letter) in letters.iter_mut().enumerate() {
            *letter = i as u8;
        }
        KeyedAlphabet {
            letters,
            positions: letters,
            prefix_len: 1,
        }
    }

    /// Build a keyed alphabet from a keyword: each distinct letter of the
    /// keyword in order of first appearance, then the unused letters in
    /// ascending order. Non-alphabetic characters in the keyword are skipped.
    ///
    /// `KeyedAlphabet::from_keyword("KRYPTOS")` yields
    /// `KRYPTOSABCDEFGHIJLMNQUVWXZ` with a prefix length of 7.
    pub fn from_keyword(keyword: &str) -> Self {
        let mut letters = [0u8; ALPHABET_SIZE];
        let mut seen = [false; ALPHABET_SIZE];
        let mut n = 0;

        for c in keyword.chars() {
            if !c.is_ascii_alphabetic() {
                continue;
            }
            let idx = (c.to_ascii_uppercase() as u8 - b'A') as usize;
            if !seen[idx] {
                seen[idx] = true;
                letters[n] = idx as u8;
                n += 1;
            }
        }
        let prefix_len = n.max(1);

        for idx in 0..ALPHABET_SIZE {
            if !seen[idx] {
                letters[n] = idx as u8;
                n += 1;
            }
        }

        let mut out = KeyedAlphabet {
            letters,
            positions: [0; ALPHABET_SIZE],
            prefix_len,
        };
        out.rebuild_positions();
        out
    }

    /// Draw a random keyed alphabet with the given keyword prefix length:
    /// `prefix_len` distinct random letters followed by the rest in
    /// ascending order.
    pub fn random<R: Rng + ?Sized>(prefix_len: usize, rng: &mut R) -> Self {
        let prefix_len = prefix_len.clamp(1, ALPHABET_SIZE);
        let mut pool: [u8; ALPHABET_SIZE] = [0; ALPHABET_SIZE];
        for (i, letter) in pool.iter_mut().enumerate() {
            *letter = i as u8;
        }
        pool.shuffle(rng);

        let mut letters = [0u8; ALPHABET_SIZE];
        letters[..prefix_len].copy_from_slice(&pool[..prefix_len]);
        let mut suffix: Vec<u8> = pool[prefix_len..].to_vec();
        suffix.sort_unstable();
        letters[prefix_len..].copy_from_slice(&suffix);

        let mut out = KeyedAlphabet {
            letters,
            positions: [0; ALPHABET_SIZE],
            prefix_len,
        };
        out.rebuild_positions();
        out
    }

    /// Letter index stored at position `pos`.
    #[inline]
    pub fn letter_at(&self, pos: usize) -> u8 {
        self.letters[pos]
    }

    /// Position of letter index `letter` within the permutation.
    #[inline]
    pub fn position_of(&self, letter: u8) -> usize {
        self.positions[letter as usize] as usize
    }

    /// How many leading positions were set by the keyword.
    #[inline]
    pub fn prefix_len(&self) -> usize {
        self.prefix_len
    }

    /// Swap the letters at two positions. Used by the swap-within move, so
    /// callers keep both positions inside the keyword prefix.
    pub fn swap_positions(&mut self, i: usize, j: usize) {
        self.letters.swap(i, j);
        self.positions[self.letters[i] as usize] = i as u8;
        self.positions[self.letters[j] as usize] = j as u8;
    }

    /// Move the suffix letter at position `j` into prefix position `i` and
    /// re-insert the displaced prefix letter at its sorted position within
    /// the suffix, preserving the sorted-suffix invariant.
    pub fn swap_with_suffix(&mut self, i: usize, j: usize) {
        debug_assert!(i < self.prefix_len && j >= self.prefix_len);
        let outgoing = self.letters[i];
        self.letters[i] = self.letters[j];
        self.letters[j] = outgoing;
        self.letters[self.prefix_len..].sort_unstable();
        self.rebuild_positions();
    }

    /// True when the alphabet holds each letter index exactly once.
    pub fn is_permutation(&self) -> bool {
        let mut seen = [false; ALPHABET_SIZE];
        for &l in &self.letters {
            if (l as usize) >= ALPHABET_SIZE || seen[l as usize] {
                return false;
            }
            seen[l as usize] = true;
        }
        true
    }

    /// Recompute the inverse permutation after direct edits to `letters`.
    fn rebuild_positions(&mut self) {
        for (pos, &letter) in self.letters.iter().enumerate() {
            self.positions[letter as usize] = pos as u8;
        }
    }
}

impl Default for KeyedAlphabet {
    fn default() -> Self {
        KeyedAlphabet::straight()
    }
}

impl fmt::Display for KeyedAlphabet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &l in &self.letters {
            write!(f, "{}", (b'A' + l) as char)?;
        }
        Ok(())
    }
}

/// Convert text to letter indices, keeping only A-Z (case folded).
pub fn text_to_indices(text: &str) -> Vec<u8> {
    text.chars()
        .filter(|c| c.is_ascii_alphabetic())
        .map(|c| c.to_ascii_uppercase() as u8 - b'A')
        .collect()
}

/// Render letter indices back to an uppercase string.
pub fn indices_to_text(indices: &[u8]) -> String {
    indices.iter().map(|&i| (b'A' + i) as char).collect()
}
