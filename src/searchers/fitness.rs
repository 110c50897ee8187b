//! Composite fitness for candidate decryptions
//!
//! The score blends n-gram log-likelihood, crib agreement, and distance
//! from English IoC/entropy, each weighted and normalised by the weight
//! total. With no crib loaded the n-gram and IoC/entropy terms are the
//! whole signal, and with the default zero IoC/entropy weights the score
//! collapses to the n-gram component alone.

use crate::crib::Crib;
use crate::cryptanalysis::{
    entropy, index_of_coincidence, ENGLISH_ENTROPY, ENGLISH_IOC_TIMES_26,
};
use crate::ngrams::NgramModel;

/// Weights for the four fitness components.
#[derive(Debug, Clone, Copy)]
pub struct FitnessWeights {
    /// Weight of the n-gram log-likelihood term.
    pub ngram: f64,
    /// Weight of the crib match ratio.
    pub crib: f64,
    /// Weight of the IoC-distance term.
    pub ioc: f64,
    /// Weight of the entropy-distance term.
    pub entropy: f64,
}

impl Default for FitnessWeights {
    fn default() -> Self {
        FitnessWeights {
            ngram: 12.0,
            crib: 36.0,
            ioc: 0.0,
            entropy: 0.0,
        }
    }
}

/// Scores candidate plaintexts. Pure in its inputs: identical plaintext,
/// crib and table give bit-identical output.
pub struct Fitness<'a> {
    ngrams: &'a NgramModel,
    crib: &'a Crib,
    weights: FitnessWeights,
}

impl<'a> Fitness<'a> {
    /// Bundle the session's n-gram table, crib and weights.
    pub fn new(ngrams: &'a NgramModel, crib: &'a Crib, weights: FitnessWeights) -> Self {
        Fitness {
            ngrams,
            crib,
            weights,
        }
    }

    /// Score a candidate decryption; higher is more plausible.
    pub fn score(&self, plaintext: &[u8]) -> f64 {
        let w = &self.weights;
        let ngram = self.ngrams.score(plaintext);

        // Without a crib that term carries no information, so it drops out
        // of the weighted mean entirely rather than dragging the total down.
        if self.crib.is_empty() {
            if w.ioc == 0.0 && w.entropy == 0.0 {
                return ngram;
            }
            let total = w.ngram + w.ioc + w.entropy;
            if total == 0.0 {
                return ngram;
            }
            return (w.ngram * ngram
                + w.ioc * self.ioc_score(plaintext)
                + w.entropy * self.entropy_score(plaintext))
                / total;
        }

        let crib_match = self.crib.match_ratio(plaintext);
        let total = w.ngram + w.crib + w.ioc + w.entropy;
        if total == 0.0 {
            return ngram;
        }
        (w.ngram * ngram
            + w.crib * crib_match
            + w.ioc * self.ioc_score(plaintext)
            + w.entropy * self.entropy_score(plaintext))
            / total
    }

    /// Closeness of the candidate's IoC to English, in (0,1].
    fn ioc_score(&self, plaintext: &[u8]) -> f64 {
        let delta = 26.0 * index_of_coincidence(plaintext) - ENGLISH_IOC_TIMES_26;
        1.0 / (1.0 + delta * delta)
    }

    /// Closeness of the candidate's entropy to English, in (0,1].
    fn entropy_score(&self, plaintext: &[u8]) -> f64 {
        let delta = entropy(plaintext) - ENGLISH_ENTROPY;
        1.0 / (1.0 + delta * delta)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alphabet::text_to_indices;

    fn english_bigram_model() -> NgramModel {
        let mut counts = vec![0.0; 26 * 26];
        let grams = [
            ("TH", 2400.0),
            ("HE", 2300.0),
            ("IN", 2000.0),
            ("ER", 1900.0),
            ("AN", 1800.0),
            ("RE", 1700.0),
            ("ES", 1500.0),
            ("ON", 1400.0),
            ("ST", 1300.0),
            ("EN", 1200.0),
        ];
        for (gram, count) in grams {
            let g = text_to_indices(gram);
            counts[g[0] as usize + 26 * g[1] as usize] = count;
        }
        NgramModel::from_raw_counts(2, counts)
    }

    #[test]
    fn test_no_crib_short_circuits_to_ngram() {
        let model = english_bigram_model();
        let crib = Crib::empty();
        let fitness = Fitness::new(&model, &crib, FitnessWeights::default());
        let text = text_to_indices("THERESTON");
        assert_eq!(fitness.score(&text), model.score(&text));
    }

    #[test]
    fn test_crib_agreement_raises_score() {
        let model = english_bigram_model();
        let matching = text_to_indices("THEREIN");
        let crib = Crib::from_mask("THE____", 7).unwrap();
        let fitness = Fitness::new(&model, &crib, FitnessWeights::default());

        let disagreeing = text_to_indices("XQZREIN");
        assert!(fitness.score(&matching) > fitness.score(&disagreeing));
    }

    #[test]
    fn test_english_outscores_gibberish() {
        let model = english_bigram_model();
        let crib = Crib::empty();
        let fitness = Fitness::new(&model, &crib, FitnessWeights::default());
        let english = text_to_indices("THEREINTHESTONE");
        let gibberish = text_to_indices("XQZJKWVBGFPYDMC");
        assert!(fitness.score(&english) > fitness.score(&gibberish));
    }

    #[test]
    fn test_ioc_entropy_terms_bounded() {
        let model = english_bigram_model();
        let crib = Crib::empty();
        let weights = FitnessWeights {
            ngram: 0.0,
            crib: 0.0,
            ioc: 1.0,
            entropy: 1.0,
        };
        let fitness = Fitness::new(&model, &crib, weights);
        let text = text_to_indices("THEQUICKBROWNFOXJUMPSOVERTHELAZYDOG");
        let score = fitness.score(&text);
        assert!(score > 0.0 && score <= 1.0, "score was {}", score);
    }
}
