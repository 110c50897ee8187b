//! The search core: orchestrator over the hill-climber
//!
//! For each plausible (period, PT-keyword-length, CT-keyword-length) triple
//! the orchestrator applies the cipher family's structural constraints,
//! runs the crib precheck, and hands the cell to the shotgun climber. The
//! best-scoring state over all cells wins and is decrypted one final time
//! for the report.

pub mod climber;
pub mod cycleword;
pub mod fitness;
pub mod perturb;

use crate::alphabet::KeyedAlphabet;
use crate::ciphers::{self, CipherFamily, SolverState, MAX_PERIOD};
use crate::config::Config;
use crate::crib::Crib;
use crate::cryptanalysis::estimate_periods;
use crate::ngrams::NgramModel;
use self::climber::Climber;
use self::fitness::Fitness;
use log::{debug, info};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::atomic::AtomicBool;

/// Fallback period range when the estimator accepts nothing.
const FALLBACK_PERIODS: std::ops::RangeInclusive<usize> = 1..=15;

/// The winning state over the whole search, plus its provenance.
#[derive(Debug, Clone)]
pub struct SolveOutcome {
    /// Best composite fitness seen.
    pub score: f64,
    /// The state that produced it.
    pub state: SolverState,
    /// Final decryption of the ciphertext under that state.
    pub plaintext: Vec<u8>,
    /// Period of the winning cell.
    pub period: usize,
    /// Plaintext keyword prefix length of the winning cell.
    pub pt_keyword_len: usize,
    /// Ciphertext keyword prefix length of the winning cell.
    pub ct_keyword_len: usize,
}

/// Run the full search and return the best solution found, or `None` when
/// the constraint set admits no cells at all.
pub fn search_for_plaintext(
    ciphertext: &[u8],
    crib: &Crib,
    ngrams: &NgramModel,
    config: &Config,
    stop: &AtomicBool,
) -> Option<SolveOutcome> {
    let family = config.cipher;
    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    let periods = period_candidates(ciphertext, config);
    let (pt_lengths, ct_lengths) = keyword_length_sets(config);
    info!(
        "searching {} with {} period candidate(s), {}x{} keyword lengths",
        family,
        periods.len(),
        pt_lengths.len(),
        ct_lengths.len()
    );

    let fixed_pt = config
        .pt_keyword
        .as_deref()
        .map(KeyedAlphabet::from_keyword);
    let fixed_ct = config
        .ct_keyword
        .as_deref()
        .map(KeyedAlphabet::from_keyword);

    let fitness = Fitness::new(ngrams, crib, config.weights);
    let climber = Climber {
        family,
        variant: config.variant,
        ciphertext,
        crib,
        fitness: &fitness,
        config,
        fixed_pt,
        fixed_ct,
        stop,
    };

    let mut best: Option<SolveOutcome> = None;
    for &period in &periods {
        if family.is_periodic() && !crib.satisfiable_at_period(ciphertext, period) {
            debug!("period {} is incompatible with the crib, skipping", period);
            continue;
        }
        for &pt_len in &pt_lengths {
            for &ct_len in ct_length_choices(family, config, pt_len, &ct_lengths).iter() {
                let climb = climber.run(period, pt_len, ct_len, &mut rng);
                if !climb.score.is_finite() {
                    continue;
                }
                let is_better = best
                    .as_ref()
                    .map(|b| climb.score > b.score)
                    .unwrap_or(true);
                if is_better {
                    info!(
                        "new best {:.4} at period {}, keyword lengths {}/{}",
                        climb.score, period, pt_len, ct_len
                    );
                    // The report decrypts with the winning state's own
                    // period, whatever the cell's nominal length was.
                    let plaintext =
                        ciphers::decrypt(family, config.variant, &climb.state, ciphertext);
                    best = Some(SolveOutcome {
                        score: climb.score,
                        state: climb.state,
                        plaintext,
                        period,
                        pt_keyword_len: pt_len,
                        ct_keyword_len: ct_len,
                    });
                }
            }
        }
    }
    best
}

/// Period candidates per the configuration: a fixed length when the user
/// gave one, the full range for autokey ciphers (columnar IoC says nothing
/// about aperiodic key streams), or the IoC estimate with a 1..=15
/// fallback.
fn period_candidates(ciphertext: &[u8], config: &Config) -> Vec<usize> {
    let mut periods = if let Some(l) = config.cycleword_len {
        vec![l]
    } else if config.cipher.is_autokey() {
        (1..=config.max_cycleword_len).collect()
    } else {
        let estimated = estimate_periods(
            ciphertext,
            config.max_cycleword_len,
            config.sigma_threshold,
            config.ioc_threshold,
        );
        if estimated.is_empty() {
            debug!("period estimator accepted nothing, falling back to 1..=15");
            FALLBACK_PERIODS.collect()
        } else {
            estimated
        }
    };
    periods.retain(|&l| l >= 1 && l <= MAX_PERIOD);
    periods
}

/// The PT and CT keyword-length sets before per-family tying. Families
/// whose alphabet is structurally straight get the singleton `[1]`; pinned
/// keywords and fixed lengths collapse the scan likewise.
fn keyword_length_sets(config: &Config) -> (Vec<usize>, Vec<usize>) {
    let family = config.cipher;
    let scan = || -> Vec<usize> {
        (config.min_keyword_len..config.max_keyword_len.max(config.min_keyword_len + 1))
            .collect()
    };

    let pt_lengths = if !family.pt_alphabet_is_keyed() {
        vec![1]
    } else if let Some(kw) = &config.pt_keyword {
        vec![KeyedAlphabet::from_keyword(kw).prefix_len()]
    } else if let Some(w) = config.pt_keyword_len {
        vec![w]
    } else {
        scan()
    };

    let ct_lengths = if !family.ct_alphabet_is_keyed() {
        vec![1]
    } else if let Some(kw) = &config.ct_keyword {
        vec![KeyedAlphabet::from_keyword(kw).prefix_len()]
    } else if let Some(w) = config.ct_keyword_len {
        vec![w]
    } else {
        scan()
    };

    (pt_lengths, ct_lengths)
}

/// CT lengths actually visited for a given PT length: tied families
/// (Quagmire III and `-samekey`) pin the CT length to the PT length.
fn ct_length_choices<'a>(
    family: CipherFamily,
    config: &Config,
    pt_len: usize,
    ct_lengths: &'a [usize],
) -> std::borrow::Cow<'a, [usize]> {
    if family.alphabets_are_tied() || config.same_key {
        std::borrow::Cow::Owned(vec![pt_len])
    } else {
        std::borrow::Cow::Borrowed(ct_lengths)
    }
}
