//! Corpus loading: ciphertext, crib, batch and dictionary files
//!
//! Everything here runs once at the session boundary; the search core only
//! ever sees the parsed, index-based forms. All files are plain ASCII.

use crate::alphabet::text_to_indices;
use crate::crib::Crib;
use crate::error::SolverError;
use log::{debug, info};
use std::fs;
use std::path::Path;

/// Dictionary file picked up from the working directory when the user
/// names none.
pub const DEFAULT_DICTIONARY: &str = "OxfordEnglishWords.txt";

/// Shortest dictionary word worth reporting; anything shorter matches
/// almost any text by accident.
const MIN_REPORT_WORD_LEN: usize = 4;

/// Read a ciphertext file: the first whitespace-delimited token, A-Z only.
///
/// # Errors
/// Fails on unreadable files and on files with no usable token.
pub fn read_ciphertext_file(path: &Path) -> Result<Vec<u8>, SolverError> {
    let contents = fs::read_to_string(path)?;
    let token = contents
        .split_whitespace()
        .next()
        .ok_or_else(|| SolverError::Input(format!("{} holds no ciphertext", path.display())))?;
    let indices = text_to_indices(token);
    if indices.is_empty() {
        return Err(SolverError::Input(format!(
            "{} holds no A-Z ciphertext letters",
            path.display()
        )));
    }
    info!("read {} ciphertext letters from {}", indices.len(), path.display());
    Ok(indices)
}

/// Read a batch file: one ciphertext per line, blank lines skipped.
///
/// # Errors
/// Fails on unreadable files or when no line holds any letters.
pub fn read_batch_file(path: &Path) -> Result<Vec<Vec<u8>>, SolverError> {
    let contents = fs::read_to_string(path)?;
    let ciphertexts: Vec<Vec<u8>> = contents
        .lines()
        .map(text_to_indices)
        .filter(|c| !c.is_empty())
        .collect();
    if ciphertexts.is_empty() {
        return Err(SolverError::Input(format!(
            "{} holds no ciphertext lines",
            path.display()
        )));
    }
    info!("read {} ciphertexts from {}", ciphertexts.len(), path.display());
    Ok(ciphertexts)
}

/// Read a crib mask file (`_` for unknown positions) and check it against
/// the ciphertext length.
///
/// # Errors
/// Fails on unreadable files, stray symbols, or a length mismatch.
pub fn read_crib_file(path: &Path, ciphertext_len: usize) -> Result<Crib, SolverError> {
    let contents = fs::read_to_string(path)?;
    let crib = Crib::from_mask(&contents, ciphertext_len)?;
    info!("read crib with {} known letters from {}", crib.len(), path.display());
    Ok(crib)
}

/// Load the word-report dictionary. An explicitly named file must exist;
/// with no path the default file is used when present and silently skipped
/// otherwise.
///
/// # Errors
/// Fails only when an explicitly named dictionary cannot be read.
pub fn load_dictionary(path: Option<&Path>) -> Result<Vec<String>, SolverError> {
    let contents = match path {
        Some(p) => fs::read_to_string(p)?,
        None => {
            let default = Path::new(DEFAULT_DICTIONARY);
            if !default.exists() {
                debug!("no dictionary found, word report disabled");
                return Ok(Vec::new());
            }
            fs::read_to_string(default)?
        }
    };
    let words: Vec<String> = contents
        .lines()
        .map(|w| w.trim().to_ascii_uppercase())
        .filter(|w| !w.is_empty() && w.chars().all(|c| c.is_ascii_alphabetic()))
        .collect();
    info!("loaded {} dictionary words", words.len());
    Ok(words)
}

/// Dictionary words of reportable length found inside the plaintext by
/// substring search, in dictionary order.
pub fn dictionary_words_in<'a>(plaintext: &str, dictionary: &'a [String]) -> Vec<&'a str> {
    dictionary
        .iter()
        .filter(|w| w.len() >= MIN_REPORT_WORD_LEN && plaintext.contains(w.as_str()))
        .map(|w| w.as_str())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn temp_file(name: &str, contents: &str) -> PathBuf {
        let mut path = std::env::temp_dir();
        path.push(name);
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_read_ciphertext_first_token() {
        let path = temp_file("quagmire_test_ct.txt", "MFABBM NNQEYE\n");
        let ct = read_ciphertext_file(&path).unwrap();
        assert_eq!(ct.len(), 6);
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_read_ciphertext_empty_file() {
        let path = temp_file("quagmire_test_ct_empty.txt", "\n  \n");
        assert!(read_ciphertext_file(&path).is_err());
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_read_batch_lines() {
        let path = temp_file("quagmire_test_batch.txt", "ABCDEF\n\nGHIJKL\n");
        let batch = read_batch_file(&path).unwrap();
        assert_eq!(batch.len(), 2);
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_dictionary_word_report() {
        let dictionary = vec![
            "BERLIN".to_string(),
            "CLOCK".to_string(),
            "EAST".to_string(),
            "THE".to_string(), // too short to report
            "ZEBRA".to_string(),
        ];
        let found = dictionary_words_in("XXBERLINCLOCKYY", &dictionary);
        assert_eq!(found, vec!["BERLIN", "CLOCK"]);
    }

    #[test]
    fn test_load_dictionary_missing_default_is_empty() {
        // No explicit path and (presumably) no default file in cwd.
        let words = load_dictionary(None).unwrap();
        let _ = words; // may be empty or populated depending on cwd; just must not error
    }
}
