//! Unified error types for quagmire.
//!
//! This module provides a central `SolverError` enum that covers the fatal
//! input-error category, enabling consistent `Result`-based error propagation
//! with the `?` operator. Everything past the session boundary is total: the
//! solver core itself never returns errors and never panics.

use std::fmt;

/// Central error type for session-boundary failures.
#[derive(Debug)]
pub enum SolverError {
    /// I/O errors (ciphertext, crib, n-gram or dictionary files).
    Io(std::io::Error),
    /// A required argument is missing or malformed.
    Input(String),
    /// The cipher type was not a known number or alias.
    UnknownCipher(String),
    /// The crib file length does not match the ciphertext length.
    CribLengthMismatch {
        /// Number of A-Z/`_` symbols in the crib file.
        crib: usize,
        /// Number of A-Z symbols in the ciphertext.
        ciphertext: usize,
    },
}

impl fmt::Display for SolverError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SolverError::Io(e) => write!(f, "I/O error: {}", e),
            SolverError::Input(msg) => write!(f, "Input error: {}", msg),
            SolverError::UnknownCipher(name) => {
                write!(f, "Unknown cipher type: {}", name)
            }
            SolverError::CribLengthMismatch { crib, ciphertext } => write!(
                f,
                "Crib length {} does not match ciphertext length {}",
                crib, ciphertext
            ),
        }
    }
}

impl std::error::Error for SolverError {}

impl From<std::io::Error> for SolverError {
    fn from(e: std::io::Error) -> Self {
        SolverError::Io(e)
    }
}
