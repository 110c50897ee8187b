//! Cipher family definitions and the shared decrypt/encrypt entry points
//!
//! The whole ACA polyalphabetic family is one tagged sum: Vigenere, the four
//! Quagmires, Beaufort, Porta, and Autokey running-key variants over each of
//! those tableaux. The periodic engine lives in [`tableau`], the running-key
//! engine in [`autokey`]; everything routes through [`decrypt_into`] /
//! [`encrypt_into`] here.

pub mod autokey;
pub mod tableau;

use crate::alphabet::KeyedAlphabet;
use crate::error::SolverError;
use std::fmt;

/// Upper bound on the cycleword length (and autokey primer length) the
/// solver will search. Scratch buffers that index by cycleword slot are
/// sized to this.
pub const MAX_PERIOD: usize = 64;

/// Sub-tableau used by an autokey cipher to combine a key character with a
/// ciphertext character.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AutokeySub {
    /// Straight-alphabet Vigenere rule.
    Straight,
    /// Quagmire I alphabets (keyed PT, straight CT).
    Quagmire1,
    /// Quagmire II alphabets (straight PT, keyed CT).
    Quagmire2,
    /// Quagmire III alphabets (PT = CT, both keyed).
    Quagmire3,
    /// Quagmire IV alphabets (independent keyed PT and CT).
    Quagmire4,
    /// Beaufort rule (reciprocal Vigenere).
    Beaufort,
    /// Porta rule (half-alphabet reciprocal tableau).
    Porta,
}

/// The cipher family under attack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CipherFamily {
    /// Straight-alphabet periodic cipher.
    Vigenere,
    /// Keyed plaintext alphabet, straight ciphertext alphabet.
    Quagmire1,
    /// Straight plaintext alphabet, keyed ciphertext alphabet.
    Quagmire2,
    /// One keyword for both alphabets.
    Quagmire3,
    /// Independent plaintext and ciphertext keywords.
    Quagmire4,
    /// Reciprocal Vigenere; self-inverse.
    Beaufort,
    /// Half-alphabet reciprocal cipher; self-inverse, alphabets unused.
    Porta,
    /// Running-key cipher: primer followed by recovered plaintext.
    Autokey(AutokeySub),
}

impl CipherFamily {
    /// Parse the `-type` argument: a number 0-11 or a case-insensitive
    /// alias (`vig`, `q1`..`q4`, `beau`, `porta`, `auto`, `auto0`..`auto4`).
    ///
    /// # Errors
    /// Returns `SolverError::UnknownCipher` for anything else.
    pub fn from_arg(arg: &str) -> Result<Self, SolverError> {
        let lowered = arg.trim().to_ascii_lowercase();
        let family = match lowered.as_str() {
            "0" | "vig" | "vigenere" => CipherFamily::Vigenere,
            "1" | "q1" | "quagmire1" => CipherFamily::Quagmire1,
            "2" | "q2" | "quagmire2" => CipherFamily::Quagmire2,
            "3" | "q3" | "quagmire3" => CipherFamily::Quagmire3,
            "4" | "q4" | "quagmire4" => CipherFamily::Quagmire4,
            "5" | "beau" | "beaufort" => CipherFamily::Beaufort,
            "6" | "porta" => CipherFamily::Porta,
            "7" | "auto" | "auto0" | "autokey" => CipherFamily::Autokey(AutokeySub::Straight),
            "8" | "auto1" => CipherFamily::Autokey(AutokeySub::Quagmire1),
            "9" | "auto2" => CipherFamily::Autokey(AutokeySub::Quagmire2),
            "10" | "auto3" => CipherFamily::Autokey(AutokeySub::Quagmire3),
            "11" | "auto4" => CipherFamily::Autokey(AutokeySub::Quagmire4),
            _ => return Err(SolverError::UnknownCipher(arg.to_string())),
        };
        Ok(family)
    }

    /// True for the running-key variants.
    pub fn is_autokey(&self) -> bool {
        matches!(self, CipherFamily::Autokey(_))
    }

    /// True when the periodic-key deriver applies: the key repeats over the
    /// ciphertext, which autokey keys never do.
    pub fn is_periodic(&self) -> bool {
        !self.is_autokey()
    }

    /// True when the plaintext alphabet is searched (not pinned straight).
    pub fn pt_alphabet_is_keyed(&self) -> bool {
        matches!(
            self,
            CipherFamily::Quagmire1
                | CipherFamily::Quagmire3
                | CipherFamily::Quagmire4
                | CipherFamily::Autokey(AutokeySub::Quagmire1)
                | CipherFamily::Autokey(AutokeySub::Quagmire3)
                | CipherFamily::Autokey(AutokeySub::Quagmire4)
        )
    }

    /// True when the ciphertext alphabet is searched (not pinned straight).
    pub fn ct_alphabet_is_keyed(&self) -> bool {
        matches!(
            self,
            CipherFamily::Quagmire2
                | CipherFamily::Quagmire3
                | CipherFamily::Quagmire4
                | CipherFamily::Autokey(AutokeySub::Quagmire2)
                | CipherFamily::Autokey(AutokeySub::Quagmire3)
                | CipherFamily::Autokey(AutokeySub::Quagmire4)
        )
    }

    /// True when the two alphabets are a single keyword (Quagmire III rule).
    pub fn alphabets_are_tied(&self) -> bool {
        matches!(
            self,
            CipherFamily::Quagmire3 | CipherFamily::Autokey(AutokeySub::Quagmire3)
        )
    }
}

impl fmt::Display for CipherFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CipherFamily::Vigenere => "Vigenere",
            CipherFamily::Quagmire1 => "Quagmire I",
            CipherFamily::Quagmire2 => "Quagmire II",
            CipherFamily::Quagmire3 => "Quagmire III",
            CipherFamily::Quagmire4 => "Quagmire IV",
            CipherFamily::Beaufort => "Beaufort",
            CipherFamily::Porta => "Porta",
            CipherFamily::Autokey(AutokeySub::Straight) => "Autokey",
            CipherFamily::Autokey(AutokeySub::Quagmire1) => "Autokey (Quagmire I)",
            CipherFamily::Autokey(AutokeySub::Quagmire2) => "Autokey (Quagmire II)",
            CipherFamily::Autokey(AutokeySub::Quagmire3) => "Autokey (Quagmire III)",
            CipherFamily::Autokey(AutokeySub::Quagmire4) => "Autokey (Quagmire IV)",
            CipherFamily::Autokey(AutokeySub::Beaufort) => "Autokey (Beaufort)",
            CipherFamily::Autokey(AutokeySub::Porta) => "Autokey (Porta)",
        };
        write!(f, "{}", name)
    }
}

/// One point in the search space: two keyed alphabets plus a cycleword
/// (the autokey primer for running-key ciphers).
///
/// The climber keeps a `best`, a `current` and a `local` copy and moves data
/// between them with `clone_from`, so the per-iteration copies reuse the
/// cycleword allocation instead of growing the heap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolverState {
    /// Plaintext-side keyed alphabet.
    pub pt_alphabet: KeyedAlphabet,
    /// Ciphertext-side keyed alphabet.
    pub ct_alphabet: KeyedAlphabet,
    /// The periodic key (or autokey primer), letters in [0,26).
    pub cycleword: Vec<u8>,
}

impl SolverState {
    /// A state with straight alphabets and an all-A cycleword of length `l`.
    pub fn new(l: usize) -> Self {
        SolverState {
            pt_alphabet: KeyedAlphabet::straight(),
            ct_alphabet: KeyedAlphabet::straight(),
            cycleword: vec![0; l],
        }
    }

    /// Cycleword length, i.e. the period under trial.
    pub fn period(&self) -> usize {
        self.cycleword.len()
    }

    /// Feasibility check used by debug assertions and tests: alphabets are
    /// permutations, cycleword letters are in range.
    pub fn is_well_formed(&self) -> bool {
        self.pt_alphabet.is_permutation()
            && self.ct_alphabet.is_permutation()
            && !self.cycleword.is_empty()
            && self.cycleword.iter().all(|&c| c < 26)
    }
}

/// Decrypt `ciphertext` into `plaintext` (same length, caller-allocated).
pub fn decrypt_into(
    family: CipherFamily,
    variant: bool,
    state: &SolverState,
    ciphertext: &[u8],
    plaintext: &mut [u8],
) {
    match family {
        CipherFamily::Autokey(sub) => {
            autokey::decrypt_into(sub, variant, state, ciphertext, plaintext)
        }
        _ => tableau::decrypt_into(family, variant, state, ciphertext, plaintext),
    }
}

/// Encrypt `plaintext` into `ciphertext` (same length, caller-allocated).
/// The inverse of [`decrypt_into`] for every family.
pub fn encrypt_into(
    family: CipherFamily,
    variant: bool,
    state: &SolverState,
    plaintext: &[u8],
    ciphertext: &mut [u8],
) {
    match family {
        CipherFamily::Autokey(sub) => {
            autokey::encrypt_into(sub, variant, state, plaintext, ciphertext)
        }
        _ => tableau::encrypt_into(family, variant, state, plaintext, ciphertext),
    }
}

/// Allocating convenience wrapper over [`decrypt_into`].
pub fn decrypt(
    family: CipherFamily,
    variant: bool,
    state: &SolverState,
    ciphertext: &[u8],
) -> Vec<u8> {
    let mut plaintext = vec![0u8; ciphertext.len()];
    decrypt_into(family, variant, state, ciphertext, &mut plaintext);
    plaintext
}

/// Allocating convenience wrapper over [`encrypt_into`].
pub fn encrypt(
    family: CipherFamily,
    variant: bool,
    state: &SolverState,
    plaintext: &[u8],
) -> Vec<u8> {
    let mut ciphertext = vec![0u8; plaintext.len()];
    encrypt_into(family, variant, state, plaintext, &mut ciphertext);
    ciphertext
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_arg_numbers() {
        assert_eq!(CipherFamily::from_arg("0").unwrap(), CipherFamily::Vigenere);
        assert_eq!(CipherFamily::from_arg("4").unwrap(), CipherFamily::Quagmire4);
        assert_eq!(CipherFamily::from_arg("6").unwrap(), CipherFamily::Porta);
        assert_eq!(
            CipherFamily::from_arg("11").unwrap(),
            CipherFamily::Autokey(AutokeySub::Quagmire4)
        );
    }

    #[test]
    fn test_from_arg_aliases_case_insensitive() {
        assert_eq!(
            CipherFamily::from_arg("VIG").unwrap(),
            CipherFamily::Vigenere
        );
        assert_eq!(
            CipherFamily::from_arg("Beau").unwrap(),
            CipherFamily::Beaufort
        );
        assert_eq!(
            CipherFamily::from_arg("auto3").unwrap(),
            CipherFamily::Autokey(AutokeySub::Quagmire3)
        );
    }

    #[test]
    fn test_from_arg_unknown() {
        assert!(CipherFamily::from_arg("enigma").is_err());
        assert!(CipherFamily::from_arg("12").is_err());
    }

    #[test]
    fn test_alphabet_constraints() {
        assert!(!CipherFamily::Vigenere.pt_alphabet_is_keyed());
        assert!(!CipherFamily::Vigenere.ct_alphabet_is_keyed());
        assert!(CipherFamily::Quagmire1.pt_alphabet_is_keyed());
        assert!(!CipherFamily::Quagmire1.ct_alphabet_is_keyed());
        assert!(!CipherFamily::Quagmire2.pt_alphabet_is_keyed());
        assert!(CipherFamily::Quagmire2.ct_alphabet_is_keyed());
        assert!(CipherFamily::Quagmire3.alphabets_are_tied());
        assert!(CipherFamily::Quagmire4.pt_alphabet_is_keyed());
        assert!(CipherFamily::Quagmire4.ct_alphabet_is_keyed());
        assert!(!CipherFamily::Quagmire4.alphabets_are_tied());
    }

    #[test]
    fn test_solver_state_well_formed() {
        let state = SolverState::new(5);
        assert!(state.is_well_formed());
        let mut bad = state.clone();
        bad.cycleword[2] = 26;
        assert!(!bad.is_well_formed());
    }
}
