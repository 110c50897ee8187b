//! The "slippery shotgun" hill-climber
//!
//! Outer loop: restarts, each starting from a fresh random state or (with
//! `backtrack_probability`, once a positive best exists) from the best
//! state found so far. Inner loop: mutate a scratch copy, optionally pin
//! the cycleword from cribs or rederive it per column, score, and accept
//! on strict improvement or with a small slip probability to escape local
//! maxima. The best state seen never regresses.

use crate::ciphers::{self, CipherFamily, SolverState};
use crate::config::Config;
use crate::crib::Crib;
use crate::searchers::cycleword::derive_optimal_cycleword;
use crate::searchers::fitness::Fitness;
use crate::searchers::perturb::{
    perturb_cycleword, perturb_keyword, perturb_keyword_weighted, random_cycleword,
};
use crate::alphabet::KeyedAlphabet;
use log::{debug, trace};
use rand::rngs::StdRng;
use rand::Rng;
use std::sync::atomic::{AtomicBool, Ordering};

/// Result of one climber invocation: the best state and its score.
#[derive(Debug, Clone)]
pub struct Climb {
    /// Best feasible state found.
    pub state: SolverState,
    /// Its fitness score; never decreases over the life of a run.
    pub score: f64,
}

/// One hill-climbing session over a fixed (cipher, period, keyword-length)
/// cell of the search space.
pub struct Climber<'a> {
    /// Cipher family under attack.
    pub family: CipherFamily,
    /// Reciprocal-direction flag.
    pub variant: bool,
    /// Ciphertext letter indices.
    pub ciphertext: &'a [u8],
    /// Known-plaintext constraints (may be empty).
    pub crib: &'a Crib,
    /// Scorer shared across the session.
    pub fitness: &'a Fitness<'a>,
    /// Search tunables.
    pub config: &'a Config,
    /// Plaintext alphabet pinned by the user, if any.
    pub fixed_pt: Option<KeyedAlphabet>,
    /// Ciphertext alphabet pinned by the user, if any.
    pub fixed_ct: Option<KeyedAlphabet>,
    /// Cooperative cancellation, checked between restarts.
    pub stop: &'a AtomicBool,
}

impl<'a> Climber<'a> {
    /// Run the full restart budget and return the best state seen.
    pub fn run(
        &self,
        period: usize,
        pt_keyword_len: usize,
        ct_keyword_len: usize,
        rng: &mut StdRng,
    ) -> Climb {
        let cfg = self.config;
        let p_backtrack = cfg.backtrack_probability.clamp(0.0, 1.0);
        let p_slip = cfg.slip_probability.clamp(0.0, 1.0);
        let derive_on = cfg.optimal_cycleword && self.family.is_periodic();
        let propagate_cribs = !derive_on
            && self.family.is_periodic()
            && (self.family.pt_alphabet_is_keyed() || self.family.ct_alphabet_is_keyed())
            && !self.crib.is_empty();

        let mut plaintext = vec![0u8; self.ciphertext.len()];
        let mut best = SolverState::new(period);
        let mut best_score = f64::NEG_INFINITY;
        let mut current = SolverState::new(period);
        let mut local = SolverState::new(period);

        for restart in 0..cfg.n_restarts {
            if self.stop.load(Ordering::Relaxed) {
                debug!("stop requested, abandoning remaining restarts");
                break;
            }

            // INIT: backtrack to the best state or shotgun a fresh one.
            if best_score > 0.0 && rng.random_bool(p_backtrack) {
                current.clone_from(&best);
            } else {
                current = self.random_state(period, pt_keyword_len, ct_keyword_len, rng);
            }
            if derive_on {
                derive_optimal_cycleword(self.family, self.variant, &mut current, self.ciphertext);
            }
            ciphers::decrypt_into(
                self.family,
                self.variant,
                &current,
                self.ciphertext,
                &mut plaintext,
            );
            let mut current_score = self.fitness.score(&plaintext);
            if current_score > best_score {
                best.clone_from(&current);
                best_score = current_score;
            }

            let mut must_perturb_keyword = false;
            for _ in 0..cfg.n_hill_climbs {
                local.clone_from(&current);
                let mutated_keyword = self.mutate(&mut local, must_perturb_keyword, rng);
                if mutated_keyword {
                    must_perturb_keyword = false;
                }

                if propagate_cribs
                    && self
                        .crib
                        .constrain_cycleword(&mut local, self.variant, self.ciphertext)
                {
                    // The keyword candidate contradicts the cribs; only a
                    // keyword move can fix that.
                    must_perturb_keyword = true;
                    continue;
                }

                if derive_on {
                    derive_optimal_cycleword(
                        self.family,
                        self.variant,
                        &mut local,
                        self.ciphertext,
                    );
                }

                ciphers::decrypt_into(
                    self.family,
                    self.variant,
                    &local,
                    self.ciphertext,
                    &mut plaintext,
                );
                let score = self.fitness.score(&plaintext);

                if score > current_score || rng.random_bool(p_slip) {
                    std::mem::swap(&mut current, &mut local);
                    current_score = score;
                    if current_score > best_score {
                        best.clone_from(&current);
                        best_score = current_score;
                        trace!(
                            "restart {}: new best {:.4} at period {}",
                            restart,
                            best_score,
                            period
                        );
                    }
                }
            }
        }

        debug_assert!(best.is_well_formed());
        Climb {
            state: best,
            score: best_score,
        }
    }

    /// With tied alphabets a pin on either side pins the shared keyword.
    fn pinned_pt(&self) -> Option<KeyedAlphabet> {
        let tied = self.family.alphabets_are_tied() || self.config.same_key;
        self.fixed_pt
            .or(if tied { self.fixed_ct } else { None })
    }

    /// Draw a fresh state respecting the cipher's alphabet constraints and
    /// any user-pinned alphabets.
    fn random_state(
        &self,
        period: usize,
        pt_keyword_len: usize,
        ct_keyword_len: usize,
        rng: &mut StdRng,
    ) -> SolverState {
        let pt_alphabet = match self.pinned_pt() {
            Some(a) => a,
            None if self.family.pt_alphabet_is_keyed() => {
                KeyedAlphabet::random(pt_keyword_len, rng)
            }
            None => KeyedAlphabet::straight(),
        };
        let ct_alphabet = if self.family.alphabets_are_tied() || self.config.same_key {
            pt_alphabet
        } else {
            match self.fixed_ct {
                Some(a) => a,
                None if self.family.ct_alphabet_is_keyed() => {
                    KeyedAlphabet::random(ct_keyword_len, rng)
                }
                None => KeyedAlphabet::straight(),
            }
        };
        SolverState {
            pt_alphabet,
            ct_alphabet,
            cycleword: random_cycleword(period, rng),
        }
    }

    /// Apply one mutation to `local`. Returns true when a keyword moved
    /// (as opposed to the cycleword/primer).
    fn mutate(&self, local: &mut SolverState, force_keyword: bool, rng: &mut StdRng) -> bool {
        let pt_free = self.pinned_pt().is_none() && self.family.pt_alphabet_is_keyed();
        let ct_free = self.fixed_ct.is_none()
            && self.family.ct_alphabet_is_keyed()
            && !self.family.alphabets_are_tied()
            && !self.config.same_key;

        let keyword_possible = pt_free || ct_free;
        let derive_on = self.config.optimal_cycleword && self.family.is_periodic();

        // With the deriver active the cycleword is recomputed from the
        // alphabets every iteration, so the keyword is the only dimension
        // worth moving.
        let move_keyword = keyword_possible
            && (derive_on
                || force_keyword
                || rng.random_bool(self.config.keyword_perm_probability.clamp(0.0, 1.0)));

        if move_keyword {
            let mutate_pt = if pt_free && ct_free {
                rng.random_bool(0.5)
            } else {
                pt_free
            };
            if mutate_pt {
                self.perturb_alphabet(&mut local.pt_alphabet, rng);
                if self.family.alphabets_are_tied() || self.config.same_key {
                    local.ct_alphabet = local.pt_alphabet;
                }
            } else {
                self.perturb_alphabet(&mut local.ct_alphabet, rng);
            }
            true
        } else {
            perturb_cycleword(&mut local.cycleword, rng);
            false
        }
    }

    /// Uniform or frequency-weighted keyword move, per configuration.
    fn perturb_alphabet(&self, alphabet: &mut KeyedAlphabet, rng: &mut StdRng) {
        if self.config.freq_weighted_perturbation {
            perturb_keyword_weighted(alphabet, rng);
        } else {
            perturb_keyword(alphabet, rng);
        }
    }
}
