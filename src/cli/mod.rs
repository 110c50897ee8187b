//! CLI argument parsing
//!
//! Turns clap arguments into the library [`Config`] plus the parsed session
//! corpora (ciphertexts, crib, n-gram table, dictionary). Doc comments on
//! the `Opts` fields double as the `--help` text.

use crate::ciphers::{CipherFamily, MAX_PERIOD};
use crate::config::Config;
use crate::crib::Crib;
use crate::error::SolverError;
use crate::ngrams::NgramModel;
use crate::searchers::fitness::FitnessWeights;
use crate::storage;
use clap::Parser;
use log::trace;
use std::path::PathBuf;

/// The struct for clap CLI arguments.
#[derive(Parser)]
#[command(about, long_about = None)]
pub struct Opts {
    /// Cipher type: 0 Vigenere, 1-4 Quagmire I-IV, 5 Beaufort, 6 Porta,
    /// 7-11 Autokey (straight / Quagmire I-IV tableau); or an alias such as
    /// vig, q1..q4, beau, porta, auto, auto1..auto4 (case-insensitive)
    #[arg(long = "type")]
    cipher_type: String,

    /// Ciphertext file; the first whitespace-delimited token is read
    #[arg(long)]
    cipher: Option<PathBuf>,

    /// Batch file with one ciphertext per line
    #[arg(long)]
    batch: Option<PathBuf>,

    /// Crib file, same length as the ciphertext, `_` for unknown positions
    #[arg(long)]
    crib: Option<PathBuf>,

    /// N-gram statistics file of GRAM<tab>COUNT lines
    #[arg(long)]
    ngramfile: PathBuf,

    /// Gram size of the n-gram file (e.g. 4 for quadgrams)
    #[arg(long)]
    ngramsize: usize,

    /// Dictionary file for the word-count report, one word per line.
    /// Defaults to OxfordEnglishWords.txt when that file is present
    #[arg(long)]
    dictionary: Option<PathBuf>,

    /// Fix both keyword prefix lengths at once
    #[arg(long)]
    keywordlen: Option<usize>,

    /// Fix the plaintext keyword prefix length
    #[arg(long)]
    plaintextkeywordlen: Option<usize>,

    /// Fix the ciphertext keyword prefix length
    #[arg(long)]
    ciphertextkeywordlen: Option<usize>,

    /// Upper bound of the keyword-length scan when no length is fixed
    #[arg(long, default_value_t = 12)]
    maxkeywordlen: usize,

    /// Fix the cycleword length (period); 0 means estimate it
    #[arg(long, default_value_t = 0)]
    cyclewordlen: usize,

    /// Upper bound of the period scan
    #[arg(long, default_value_t = 20)]
    maxcyclewordlen: usize,

    /// Fix the plaintext keyed alphabet to this keyword
    #[arg(long)]
    plaintextkeyword: Option<String>,

    /// Fix the ciphertext keyed alphabet to this keyword
    #[arg(long)]
    ciphertextkeyword: Option<String>,

    /// Hill-climbing iterations per restart
    #[arg(long, default_value_t = 1000)]
    nhillclimbs: usize,

    /// Number of shotgun restarts
    #[arg(long, default_value_t = 1)]
    nrestarts: usize,

    /// Probability of restarting from the best state seen so far
    #[arg(long, default_value_t = 0.15)]
    backtrackprob: f64,

    /// Probability that an iteration perturbs a keyword instead of the
    /// cycleword (stochastic-cycleword mode)
    #[arg(long, default_value_t = 0.95)]
    keywordpermprob: f64,

    /// Probability of accepting a non-improving move
    #[arg(long, default_value_t = 0.01)]
    slipprob: f64,

    /// Minimum z-score for a period candidate
    #[arg(long, default_value_t = 1.0)]
    nsigmathreshold: f64,

    /// Minimum raw columnar IoC for a period candidate
    #[arg(long, default_value_t = 0.047)]
    iocthreshold: f64,

    /// Weight of the n-gram fitness component
    #[arg(long, default_value_t = 12.0)]
    weightngram: f64,

    /// Weight of the crib-match fitness component
    #[arg(long, default_value_t = 36.0)]
    weightcrib: f64,

    /// Weight of the IoC-distance fitness component
    #[arg(long, default_value_t = 0.0)]
    weightioc: f64,

    /// Weight of the entropy-distance fitness component
    #[arg(long, default_value_t = 0.0)]
    weightentropy: f64,

    /// Derive the cycleword per column from the alphabets (default)
    #[arg(long, conflicts_with = "stochasticcycle")]
    optimalcycle: bool,

    /// Search the cycleword stochastically instead of deriving it
    #[arg(long)]
    stochasticcycle: bool,

    /// Attack the reciprocal ("variant") direction of the tableau
    #[arg(long)]
    variant: bool,

    /// Force the ciphertext alphabet to mirror the plaintext alphabet
    #[arg(long)]
    samekey: bool,

    /// Bias keyword perturbation towards high-frequency letters
    #[arg(long)]
    freqperturb: bool,

    /// Fix the PRNG seed for a reproducible run
    #[arg(long)]
    seed: Option<u64>,

    /// A level of verbosity, and can be used multiple times
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// Everything read from disk for one session.
pub struct SessionInput {
    /// One ciphertext normally; several in batch mode.
    pub ciphertexts: Vec<Vec<u8>>,
    /// True when `--batch` was used.
    pub batch: bool,
    /// Parsed crib (empty when none was given).
    pub crib: Crib,
    /// The n-gram scoring table.
    pub ngrams: NgramModel,
    /// Dictionary words for the report; empty disables the report.
    pub dictionary: Vec<String>,
}

/// Parse CLI arguments into the session corpora and the library `Config`.
///
/// # Errors
/// Any missing or malformed input aborts the session with a `SolverError`;
/// `main` prints it and exits nonzero.
pub fn parse_cli_args() -> Result<(SessionInput, Config), SolverError> {
    let opts = Opts::parse();
    init_logging(opts.verbose);
    trace!("parsed CLI arguments");
    opts_into_session(opts)
}

/// Map the verbosity count onto env_logger's filter.
fn init_logging(verbose: u8) {
    let min_log_level = match verbose {
        0 => "Warn",
        1 => "Info",
        2 => "Debug",
        _ => "Trace",
    };
    env_logger::init_from_env(
        env_logger::Env::default().filter_or(env_logger::DEFAULT_FILTER_ENV, min_log_level),
    );
}

/// Validate the argument combination and load every file it names.
fn opts_into_session(opts: Opts) -> Result<(SessionInput, Config), SolverError> {
    let cipher = CipherFamily::from_arg(&opts.cipher_type)?;

    let (ciphertexts, batch) = match (&opts.cipher, &opts.batch) {
        (Some(_), Some(_)) => {
            return Err(SolverError::Input(
                "use either -cipher or -batch, not both".to_string(),
            ))
        }
        (Some(path), None) => (vec![storage::read_ciphertext_file(path)?], false),
        (None, Some(path)) => (storage::read_batch_file(path)?, true),
        (None, None) => {
            return Err(SolverError::Input(
                "no ciphertext given; use -cipher or -batch".to_string(),
            ))
        }
    };

    let crib = match &opts.crib {
        Some(path) => {
            if batch {
                return Err(SolverError::Input(
                    "a crib cannot be combined with batch mode".to_string(),
                ));
            }
            storage::read_crib_file(path, ciphertexts[0].len())?
        }
        None => Crib::empty(),
    };

    let ngrams = NgramModel::from_file(&opts.ngramfile, opts.ngramsize)?;
    let dictionary = storage::load_dictionary(opts.dictionary.as_deref())?;

    let config = Config {
        cipher,
        variant: opts.variant,
        same_key: opts.samekey,
        pt_keyword: opts.plaintextkeyword,
        ct_keyword: opts.ciphertextkeyword,
        pt_keyword_len: opts.plaintextkeywordlen.or(opts.keywordlen),
        ct_keyword_len: opts.ciphertextkeywordlen.or(opts.keywordlen),
        min_keyword_len: 5,
        max_keyword_len: opts.maxkeywordlen,
        cycleword_len: match opts.cyclewordlen {
            0 => None,
            l => Some(l.min(MAX_PERIOD)),
        },
        max_cycleword_len: opts.maxcyclewordlen.min(MAX_PERIOD),
        n_hill_climbs: opts.nhillclimbs,
        n_restarts: opts.nrestarts,
        backtrack_probability: opts.backtrackprob.clamp(0.0, 1.0),
        keyword_perm_probability: opts.keywordpermprob.clamp(0.0, 1.0),
        slip_probability: opts.slipprob.clamp(0.0, 1.0),
        sigma_threshold: opts.nsigmathreshold,
        ioc_threshold: opts.iocthreshold,
        weights: FitnessWeights {
            ngram: opts.weightngram,
            crib: opts.weightcrib,
            ioc: opts.weightioc,
            entropy: opts.weightentropy,
        },
        optimal_cycleword: !opts.stochasticcycle,
        freq_weighted_perturbation: opts.freqperturb,
        verbose: opts.verbose > 0,
        seed: opts.seed,
    };

    Ok((
        SessionInput {
            ciphertexts,
            batch,
            crib,
            ngrams,
            dictionary,
        },
        config,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opts_parse_minimal() {
        let opts = Opts::try_parse_from([
            "quagmire",
            "--type",
            "q3",
            "--cipher",
            "ct.txt",
            "--ngramfile",
            "grams.txt",
            "--ngramsize",
            "4",
        ])
        .unwrap();
        assert_eq!(opts.cipher_type, "q3");
        assert_eq!(opts.ngramsize, 4);
        assert_eq!(opts.nhillclimbs, 1000);
        assert!((opts.backtrackprob - 0.15).abs() < f64::EPSILON);
    }

    #[test]
    fn test_opts_reject_conflicting_cycle_flags() {
        let result = Opts::try_parse_from([
            "quagmire",
            "--type",
            "0",
            "--ngramfile",
            "grams.txt",
            "--ngramsize",
            "4",
            "--optimalcycle",
            "--stochasticcycle",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_opts_require_type_and_ngram() {
        assert!(Opts::try_parse_from(["quagmire"]).is_err());
        assert!(Opts::try_parse_from(["quagmire", "--type", "0"]).is_err());
    }
}
