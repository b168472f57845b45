//! Spelling normalization of free prescription text against the drug vocabulary.
//!
//! Each whitespace-delimited token is replaced by the closest vocabulary term
//! within `max_edit_distance`, unless the token is left alone because it:
//!
//! - is not purely alphabetic (dosages, punctuation-attached words, numbers),
//! - contains non-ASCII characters (localized names must not be bent toward
//!   an ASCII vocabulary),
//! - is already a vocabulary term (compared case-insensitively), or
//! - is shorter than `min_token_len`.
//!
//! Output tokens are joined with single spaces; the original whitespace is
//! not preserved.

use std::borrow::Cow;

use strsim::levenshtein;
use tracing::debug;

use rxcheck_contracts::{policy::SpellingPolicy, reference::Vocabulary};

/// Edit-distance corrector over a vocabulary supplied per call.
///
/// The normalizer holds only its settings; the vocabulary comes from the
/// reference snapshot of the request being validated.
#[derive(Debug, Clone, Default)]
pub struct SpellingNormalizer {
    policy: SpellingPolicy,
}

impl SpellingNormalizer {
    pub fn new(policy: SpellingPolicy) -> Self {
        Self { policy }
    }

    /// Correct every token of `text` and rejoin with single spaces.
    pub fn normalize(&self, text: &str, vocabulary: &Vocabulary) -> String {
        text.split_whitespace()
            .map(|token| self.correct_token(token, vocabulary))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Correct a single token, returning it unchanged when it is exempt or
    /// no vocabulary term is close enough.
    pub fn correct_token<'t>(&self, token: &'t str, vocabulary: &Vocabulary) -> Cow<'t, str> {
        if !self.is_correctable(token, vocabulary) {
            return Cow::Borrowed(token);
        }

        match self.best_correction(token, vocabulary) {
            Some(term) => {
                debug!(token = %token, correction = %term, "spelling corrected");
                Cow::Owned(term.to_string())
            }
            None => Cow::Borrowed(token),
        }
    }

    fn is_correctable(&self, token: &str, vocabulary: &Vocabulary) -> bool {
        token.is_ascii()
            && token.chars().count() >= self.policy.min_token_len.max(1)
            && token.chars().all(|c| c.is_ascii_alphabetic())
            && !vocabulary.contains(token)
    }

    /// Closest single-word term within the distance budget.
    /// Ties go to the term seen first in the vocabulary.
    fn best_correction<'v>(&self, token: &str, vocabulary: &'v Vocabulary) -> Option<&'v str> {
        let folded = token.to_lowercase();
        let folded_len = folded.chars().count();
        let max = self.policy.max_edit_distance;
        let mut best: Option<(usize, &'v str)> = None;

        for term in vocabulary.terms() {
            if term.contains(char::is_whitespace) {
                continue;
            }
            if term.chars().count().abs_diff(folded_len) > max {
                continue;
            }
            let distance = levenshtein(&folded, term);
            if distance > max {
                continue;
            }
            if best.map_or(true, |(d, _)| distance < d) {
                best = Some((distance, term));
            }
        }

        best.map(|(_, term)| term)
    }
}

// ── Tests ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use rxcheck_contracts::{policy::SpellingPolicy, reference::Vocabulary};

    use super::SpellingNormalizer;

    fn vocab() -> Vocabulary {
        Vocabulary::from_terms(["Budesonide", "Salbutamol", "Metformin", "Ferrous sulfate"])
    }

    fn normalizer() -> SpellingNormalizer {
        SpellingNormalizer::new(SpellingPolicy::default())
    }

    #[test]
    fn misspelled_drug_is_corrected_to_vocabulary_term() {
        let out = normalizer().normalize("take Salbutamoll daily", &vocab());
        assert_eq!(out, "take salbutamol daily");
    }

    #[test]
    fn punctuation_attached_token_is_left_alone() {
        let out = normalizer().normalize("prescribed Salbutamoll.", &vocab());
        assert_eq!(out, "prescribed Salbutamoll.");
    }

    #[test]
    fn numeric_and_dosage_tokens_are_left_alone() {
        let out = normalizer().normalize("Metformn 500mg 2", &vocab());
        assert_eq!(out, "metformin 500mg 2");
    }

    #[test]
    fn non_ascii_token_is_left_alone() {
        let out = normalizer().normalize("Парацетамол Budesonid", &vocab());
        assert_eq!(out, "Парацетамол budesonide");
    }

    #[test]
    fn non_ascii_term_is_measured_in_characters() {
        let policy = SpellingPolicy {
            max_edit_distance: 1,
            min_token_len: 4,
        };
        let vocab = Vocabulary::from_terms(["Ömeprazol"]);
        let out = SpellingNormalizer::new(policy).normalize("meprazol", &vocab);
        assert_eq!(out, "ömeprazol");
    }

    #[test]
    fn known_term_keeps_its_casing() {
        let out = normalizer().normalize("BUDESONIDE", &vocab());
        assert_eq!(out, "BUDESONIDE");
    }

    #[test]
    fn distant_token_passes_through() {
        let out = normalizer().normalize("Budsnd", &vocab());
        assert_eq!(out, "Budsnd");
    }

    #[test]
    fn short_tokens_are_never_corrected() {
        let policy = SpellingPolicy {
            max_edit_distance: 2,
            min_token_len: 4,
        };
        let vocab = Vocabulary::from_terms(["was"]);
        let out = SpellingNormalizer::new(policy).normalize("wax", &vocab);
        assert_eq!(out, "wax");
    }

    #[test]
    fn whitespace_is_collapsed_and_order_kept() {
        let out = normalizer().normalize("  one\ttwo \n three ", &vocab());
        assert_eq!(out, "one two three");
    }

    #[test]
    fn tie_goes_to_first_vocabulary_term() {
        let vocab = Vocabulary::from_terms(["abcde", "abcdf"]);
        let out = normalizer().normalize("abcdx", &vocab);
        assert_eq!(out, "abcde");
    }

    #[test]
    fn multi_word_terms_are_not_used_as_corrections() {
        let vocab = Vocabulary::from_terms(["Ferrous sulfate"]);
        let out = normalizer().normalize("Ferrus", &vocab);
        assert_eq!(out, "Ferrus");
    }

    #[test]
    fn empty_text_normalizes_to_empty() {
        assert_eq!(normalizer().normalize("   ", &vocab()), "");
    }
}
