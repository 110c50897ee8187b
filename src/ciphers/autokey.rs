//! The running-key (autokey) engine
//!
//! The key stream is the primer followed by the plaintext as it is
//! recovered, so the key for position `i` is `primer[i]` for `i < L` and
//! `plaintext[i - L]` after that. The stream is never restarted, which is
//! why periodic-key analysis (columnar IoC, the cycleword deriver) does not
//! apply to this family.
//!
//! Alphabet lookups are total here because [`KeyedAlphabet`] is always a
//! full permutation; the partial-tableau fallback some historical tools
//! carry cannot be reached.
//!
//! [`KeyedAlphabet`]: crate::alphabet::KeyedAlphabet

use super::tableau::{
    beaufort_char, porta_char, quagmire_decrypt_char, quagmire_encrypt_char,
};
use super::{AutokeySub, SolverState};

/// Recover one plaintext letter from a (key, ciphertext) pair under the
/// given sub-tableau.
#[inline]
fn sub_decrypt_char(
    sub: AutokeySub,
    variant: bool,
    state: &SolverState,
    key_letter: u8,
    cipher_letter: u8,
) -> u8 {
    match sub {
        AutokeySub::Straight => {
            let d = cipher_letter as i32 - key_letter as i32;
            d.rem_euclid(26) as u8
        }
        AutokeySub::Beaufort => beaufort_char(key_letter, cipher_letter),
        AutokeySub::Porta => porta_char(key_letter, cipher_letter),
        AutokeySub::Quagmire1
        | AutokeySub::Quagmire2
        | AutokeySub::Quagmire3
        | AutokeySub::Quagmire4 => quagmire_decrypt_char(
            &state.pt_alphabet,
            &state.ct_alphabet,
            key_letter,
            cipher_letter,
            variant,
        ),
    }
}

/// Inverse of [`sub_decrypt_char`].
#[inline]
fn sub_encrypt_char(
    sub: AutokeySub,
    variant: bool,
    state: &SolverState,
    key_letter: u8,
    plain_letter: u8,
) -> u8 {
    match sub {
        AutokeySub::Straight => (plain_letter + key_letter) % 26,
        AutokeySub::Beaufort => beaufort_char(key_letter, plain_letter),
        AutokeySub::Porta => porta_char(key_letter, plain_letter),
        AutokeySub::Quagmire1
        | AutokeySub::Quagmire2
        | AutokeySub::Quagmire3
        | AutokeySub::Quagmire4 => quagmire_encrypt_char(
            &state.pt_alphabet,
            &state.ct_alphabet,
            key_letter,
            plain_letter,
            variant,
        ),
    }
}

/// Decrypt an autokey ciphertext. The recovered plaintext doubles as the
/// tail of the key stream, so no separate key buffer is needed.
pub fn decrypt_into(
    sub: AutokeySub,
    variant: bool,
    state: &SolverState,
    ciphertext: &[u8],
    plaintext: &mut [u8],
) {
    debug_assert_eq!(ciphertext.len(), plaintext.len());
    let l = state.cycleword.len();
    debug_assert!(l > 0);

    for i in 0..ciphertext.len() {
        let key_letter = if i < l {
            state.cycleword[i]
        } else {
            plaintext[i - l]
        };
        plaintext[i] = sub_decrypt_char(sub, variant, state, key_letter, ciphertext[i]);
    }
}

/// Encrypt a plaintext under an autokey cipher; inverse of [`decrypt_into`].
pub fn encrypt_into(
    sub: AutokeySub,
    variant: bool,
    state: &SolverState,
    plaintext: &[u8],
    ciphertext: &mut [u8],
) {
    debug_assert_eq!(ciphertext.len(), plaintext.len());
    let l = state.cycleword.len();
    debug_assert!(l > 0);

    for i in 0..plaintext.len() {
        let key_letter = if i < l {
            state.cycleword[i]
        } else {
            plaintext[i - l]
        };
        ciphertext[i] = sub_encrypt_char(sub, variant, state, key_letter, plaintext[i]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alphabet::{indices_to_text, text_to_indices, KeyedAlphabet};

    fn state_with_primer(primer: &str) -> SolverState {
        SolverState {
            pt_alphabet: KeyedAlphabet::straight(),
            ct_alphabet: KeyedAlphabet::straight(),
            cycleword: text_to_indices(primer),
        }
    }

    #[test]
    fn test_autokey_straight_known_vector() {
        // Classic autokey example: ATTACKATDAWN with primer QUEENLY.
        // Key stream is QUEENLY + ATTAC, giving QNXEPVYTWTWP.
        let state = state_with_primer("QUEENLY");
        let plain = text_to_indices("ATTACKATDAWN");
        let mut cipher = vec![0u8; plain.len()];
        encrypt_into(AutokeySub::Straight, false, &state, &plain, &mut cipher);
        assert_eq!(indices_to_text(&cipher), "QNXEPVYTWTWP");

        let mut back = vec![0u8; cipher.len()];
        decrypt_into(AutokeySub::Straight, false, &state, &cipher, &mut back);
        assert_eq!(back, plain);
    }

    #[test]
    fn test_autokey_primer_longer_than_text() {
        // The primer alone keys the whole message when L >= N.
        let state = state_with_primer("JAMESHERBERTSANBORNJR");
        let plain = text_to_indices("CIAMARKER");
        let mut cipher = vec![0u8; plain.len()];
        encrypt_into(AutokeySub::Straight, false, &state, &plain, &mut cipher);
        let mut back = vec![0u8; cipher.len()];
        decrypt_into(AutokeySub::Straight, false, &state, &cipher, &mut back);
        assert_eq!(back, plain);
    }

    #[test]
    fn test_autokey_quagmire_round_trips() {
        let plain = text_to_indices("CIAMARKERONTHEGROUNDSOFTHELANGLEYHEADQUARTERS");
        for sub in [
            AutokeySub::Quagmire1,
            AutokeySub::Quagmire2,
            AutokeySub::Quagmire3,
            AutokeySub::Quagmire4,
        ] {
            for variant in [false, true] {
                let state = SolverState {
                    pt_alphabet: KeyedAlphabet::from_keyword("SCULPTURE"),
                    ct_alphabet: KeyedAlphabet::from_keyword("PALIMPSEST"),
                    cycleword: text_to_indices("ABSCISSA"),
                };
                let mut cipher = vec![0u8; plain.len()];
                encrypt_into(sub, variant, &state, &plain, &mut cipher);
                let mut back = vec![0u8; cipher.len()];
                decrypt_into(sub, variant, &state, &cipher, &mut back);
                assert_eq!(back, plain, "round trip failed for {:?}", sub);
            }
        }
    }

    #[test]
    fn test_autokey_beaufort_and_porta_subs() {
        let plain = text_to_indices("BETWEENSUBTLESHADINGANDTHEABSENCE");
        for sub in [AutokeySub::Beaufort, AutokeySub::Porta] {
            let state = state_with_primer("IQLUSION");
            let mut cipher = vec![0u8; plain.len()];
            encrypt_into(sub, false, &state, &plain, &mut cipher);
            let mut back = vec![0u8; cipher.len()];
            decrypt_into(sub, false, &state, &cipher, &mut back);
            assert_eq!(back, plain, "round trip failed for {:?}", sub);
        }
    }
}
