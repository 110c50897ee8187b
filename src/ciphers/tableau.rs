//! The periodic tableau engine
//!
//! One rule covers Vigenere and all four Quagmires: look the ciphertext
//! letter and the key letter up in the ciphertext alphabet, take the
//! difference (or sum, for the reciprocal variant) of their positions mod
//! 26, and read the plaintext letter out of the plaintext alphabet at that
//! offset. Vigenere is the special case where both alphabets are straight.
//! Beaufort and Porta are small self-inverse special cases that ignore the
//! alphabets.

use super::{CipherFamily, SolverState};
use crate::alphabet::{KeyedAlphabet, ALPHABET_SIZE};

/// Modulus for position arithmetic.
const M: i32 = ALPHABET_SIZE as i32;

/// Decrypt one letter under the Quagmire rule.
#[inline]
pub(crate) fn quagmire_decrypt_char(
    pt_alphabet: &KeyedAlphabet,
    ct_alphabet: &KeyedAlphabet,
    key_letter: u8,
    cipher_letter: u8,
    variant: bool,
) -> u8 {
    let p = ct_alphabet.position_of(cipher_letter) as i32;
    let q = ct_alphabet.position_of(key_letter) as i32;
    let d = if variant { p + q } else { p - q }.rem_euclid(M);
    pt_alphabet.letter_at(d as usize)
}

/// Encrypt one letter under the Quagmire rule; inverse of
/// [`quagmire_decrypt_char`].
#[inline]
pub(crate) fn quagmire_encrypt_char(
    pt_alphabet: &KeyedAlphabet,
    ct_alphabet: &KeyedAlphabet,
    key_letter: u8,
    plain_letter: u8,
    variant: bool,
) -> u8 {
    let p = pt_alphabet.position_of(plain_letter) as i32;
    let q = ct_alphabet.position_of(key_letter) as i32;
    let e = if variant { p - q } else { p + q }.rem_euclid(M);
    ct_alphabet.letter_at(e as usize)
}

/// Beaufort: plaintext = key - ciphertext mod 26. Self-inverse.
#[inline]
pub(crate) fn beaufort_char(key_letter: u8, letter: u8) -> u8 {
    (key_letter + 26 - letter) % 26
}

/// Porta: the key letter selects one of 13 half-alphabet swaps.
/// Self-inverse; the keyed alphabets play no part.
#[inline]
pub(crate) fn porta_char(key_letter: u8, letter: u8) -> u8 {
    let s = key_letter / 2;
    if letter < 13 {
        (letter + s) % 13 + 13
    } else {
        (letter - s + 13) % 13
    }
}

/// Decrypt a periodic-key ciphertext into a caller-allocated buffer of the
/// same length.
pub fn decrypt_into(
    family: CipherFamily,
    variant: bool,
    state: &SolverState,
    ciphertext: &[u8],
    plaintext: &mut [u8],
) {
    debug_assert_eq!(ciphertext.len(), plaintext.len());
    let l = state.cycleword.len();
    debug_assert!(l > 0);

    match family {
        CipherFamily::Beaufort => {
            for (i, (&x, out)) in ciphertext.iter().zip(plaintext.iter_mut()).enumerate() {
                *out = beaufort_char(state.cycleword[i % l], x);
            }
        }
        CipherFamily::Porta => {
            for (i, (&x, out)) in ciphertext.iter().zip(plaintext.iter_mut()).enumerate() {
                *out = porta_char(state.cycleword[i % l], x);
            }
        }
        _ => {
            for (i, (&x, out)) in ciphertext.iter().zip(plaintext.iter_mut()).enumerate() {
                *out = quagmire_decrypt_char(
                    &state.pt_alphabet,
                    &state.ct_alphabet,
                    state.cycleword[i % l],
                    x,
                    variant,
                );
            }
        }
    }
}

/// Encrypt a plaintext into a caller-allocated buffer of the same length.
/// Exact inverse of [`decrypt_into`].
pub fn encrypt_into(
    family: CipherFamily,
    variant: bool,
    state: &SolverState,
    plaintext: &[u8],
    ciphertext: &mut [u8],
) {
    debug_assert_eq!(ciphertext.len(), plaintext.len());
    let l = state.cycleword.len();
    debug_assert!(l > 0);

    match family {
        // Beaufort and Porta are their own inverses.
        CipherFamily::Beaufort => {
            for (i, (&m, out)) in plaintext.iter().zip(ciphertext.iter_mut()).enumerate() {
                *out = beaufort_char(state.cycleword[i % l], m);
            }
        }
        CipherFamily::Porta => {
            for (i, (&m, out)) in plaintext.iter().zip(ciphertext.iter_mut()).enumerate() {
                *out = porta_char(state.cycleword[i % l], m);
            }
        }
        _ => {
            for (i, (&m, out)) in plaintext.iter().zip(ciphertext.iter_mut()).enumerate() {
                *out = quagmire_encrypt_char(
                    &state.pt_alphabet,
                    &state.ct_alphabet,
                    state.cycleword[i % l],
                    m,
                    variant,
                );
            }
        }
    }
}
