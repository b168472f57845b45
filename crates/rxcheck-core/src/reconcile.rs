//! Reconciliation of candidates against a diagnosis' reference drugs.
//!
//! Per candidate, in order:
//!
//! 1. Case-insensitive exact membership in the reference list → `Exact`.
//! 2. Otherwise the most similar reference drug is found. Similarity is the
//!    Levenshtein distance normalized by the longer string, scaled to
//!    `[0, 100]`. Ties keep the reference drug that appears first.
//! 3. A best score at or above the threshold → `FuzzyMatch`; anything lower,
//!    or an empty reference list → `NoMatch`.
//!
//! An empty reference list never fuzzy-matches: without a reference set
//! nothing can be validated.

use strsim::levenshtein;
use tracing::debug;

use rxcheck_contracts::{
    outcome::{FuzzyMatch, MatchOutcome},
    policy::MatchingPolicy,
    reference::normalize_key,
};

/// Similarity of two drug names in `[0, 100]`, compared case-insensitively.
///
/// `100 * (L - d) / L` where `d` is the character-level Levenshtein distance
/// and `L` the longer length. Two empty strings are identical (100).
pub fn similarity(a: &str, b: &str) -> f64 {
    let a = normalize_key(a);
    let b = normalize_key(b);
    let longest = a.chars().count().max(b.chars().count());
    if longest == 0 {
        return 100.0;
    }
    let distance = levenshtein(&a, &b);
    ((longest - distance) * 100) as f64 / longest as f64
}

/// The most similar reference drug and its score, first-occurring on ties.
pub fn best_match<'r>(candidate: &str, reference: &'r [String]) -> Option<(&'r str, f64)> {
    let mut best: Option<(&'r str, f64)> = None;
    for drug in reference {
        let score = similarity(candidate, drug);
        if best.map_or(true, |(_, s)| score > s) {
            best = Some((drug.as_str(), score));
        }
    }
    best
}

/// Applies the fuzzy threshold to turn candidates into outcomes.
#[derive(Debug, Clone)]
pub struct Reconciler {
    fuzzy_threshold: f64,
}

impl Reconciler {
    pub fn new(policy: &MatchingPolicy) -> Self {
        Self::with_threshold(policy.fuzzy_threshold)
    }

    pub fn with_threshold(fuzzy_threshold: f64) -> Self {
        Self { fuzzy_threshold }
    }

    pub fn threshold(&self) -> f64 {
        self.fuzzy_threshold
    }

    /// One outcome per candidate, in candidate order.
    pub fn reconcile<S: AsRef<str>>(&self, candidates: &[S], reference: &[String]) -> Vec<MatchOutcome> {
        candidates
            .iter()
            .map(|c| self.reconcile_one(c.as_ref(), reference))
            .collect()
    }

    pub fn reconcile_one(&self, candidate: &str, reference: &[String]) -> MatchOutcome {
        let folded = normalize_key(candidate);
        if reference.iter().any(|r| normalize_key(r) == folded) {
            return MatchOutcome::Exact {
                drug: candidate.to_string(),
            };
        }

        match best_match(candidate, reference) {
            Some((drug, score)) if score >= self.fuzzy_threshold => {
                debug!(candidate = %candidate, reference = %drug, score, "fuzzy match");
                MatchOutcome::FuzzyMatch(FuzzyMatch {
                    candidate: candidate.to_string(),
                    matched_reference: drug.to_string(),
                    similarity_score: score,
                })
            }
            best => {
                debug!(
                    candidate = %candidate,
                    best_score = best.map(|(_, s)| s).unwrap_or(0.0),
                    "no reference match"
                );
                MatchOutcome::NoMatch {
                    candidate: candidate.to_string(),
                }
            }
        }
    }
}

impl Default for Reconciler {
    fn default() -> Self {
        Self::new(&MatchingPolicy::default())
    }
}

// ── Tests ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use rxcheck_contracts::outcome::{FuzzyMatch, MatchOutcome};

    use super::{best_match, similarity, Reconciler};

    fn asthma() -> Vec<String> {
        vec!["Budesonide".to_string(), "Salbutamol".to_string()]
    }

    #[test]
    fn exact_match_ignores_case() {
        let outcomes = Reconciler::default().reconcile(&["salbutamol", "BUDESONIDE"], &asthma());
        assert_eq!(
            outcomes,
            vec![
                MatchOutcome::Exact { drug: "salbutamol".to_string() },
                MatchOutcome::Exact { drug: "BUDESONIDE".to_string() },
            ]
        );
    }

    #[test]
    fn misspelled_asthma_drug_fuzzy_matches() {
        let outcome = Reconciler::default().reconcile_one("Budeosonid", &asthma());
        match outcome {
            MatchOutcome::FuzzyMatch(FuzzyMatch { candidate, matched_reference, similarity_score }) => {
                assert_eq!(candidate, "Budeosonid");
                assert_eq!(matched_reference, "Budesonide");
                assert!(similarity_score >= 80.0, "score was {similarity_score}");
            }
            other => panic!("expected FuzzyMatch, got {:?}", other),
        }
    }

    #[test]
    fn unrelated_drug_is_no_match() {
        let outcome = Reconciler::default().reconcile_one("Warfarin", &asthma());
        assert_eq!(outcome, MatchOutcome::NoMatch { candidate: "Warfarin".to_string() });
    }

    #[test]
    fn threshold_is_inclusive_at_80_and_excludes_79() {
        let reference = vec!["a".repeat(100)];
        let at_80 = format!("{}{}", "a".repeat(80), "b".repeat(20));
        let at_79 = format!("{}{}", "a".repeat(79), "b".repeat(21));

        assert_eq!(similarity(&at_80, &reference[0]), 80.0);
        assert_eq!(similarity(&at_79, &reference[0]), 79.0);

        let reconciler = Reconciler::default();
        assert!(matches!(
            reconciler.reconcile_one(&at_80, &reference),
            MatchOutcome::FuzzyMatch(_)
        ));
        assert!(matches!(
            reconciler.reconcile_one(&at_79, &reference),
            MatchOutcome::NoMatch { .. }
        ));
    }

    #[test]
    fn empty_reference_forces_no_match() {
        let outcomes = Reconciler::with_threshold(0.0).reconcile(&["Budesonide"], &[]);
        assert_eq!(outcomes, vec![MatchOutcome::NoMatch { candidate: "Budesonide".to_string() }]);
    }

    #[test]
    fn empty_candidates_yield_empty_outcomes() {
        let none: [&str; 0] = [];
        assert!(Reconciler::default().reconcile(&none, &asthma()).is_empty());
    }

    #[test]
    fn tie_resolves_to_first_reference_entry() {
        let reference = vec!["Salbutamol".to_string(), "Salbutamox".to_string()];
        let outcomes = Reconciler::default().reconcile(&["Salbutamol", "Salbutamox", "Salbutamoq"], &reference);

        assert!(outcomes[0].is_exact());
        assert!(outcomes[1].is_exact());
        match &outcomes[2] {
            MatchOutcome::FuzzyMatch(m) => {
                assert_eq!(m.matched_reference, "Salbutamol");
                assert_eq!(m.similarity_score, 90.0);
            }
            other => panic!("expected FuzzyMatch, got {:?}", other),
        }
    }

    #[test]
    fn best_match_reports_score_even_below_threshold() {
        let reference = asthma();
        let (drug, score) = best_match("Budes", &reference).unwrap();
        assert_eq!(drug, "Budesonide");
        assert_eq!(score, 50.0);
        assert!(best_match("Budes", &[]).is_none());
    }

    #[test]
    fn reconciliation_is_deterministic() {
        let reconciler = Reconciler::default();
        let candidates = ["Budeosonid", "Salbutamol", "Aspirin"];
        assert_eq!(
            reconciler.reconcile(&candidates, &asthma()),
            reconciler.reconcile(&candidates, &asthma())
        );
    }
}
