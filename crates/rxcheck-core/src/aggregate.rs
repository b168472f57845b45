//! Scoring aggregation over reconciliation outcomes.
//!
//! Rules (product policy, configured through `ScoringPolicy`):
//!
//! - A candidate is correct when its outcome is `Exact`, or when a scorer
//!   probability for it is strictly above `appropriateness_threshold`.
//!   A fuzzy match alone is reported but does not count as correct.
//! - The score is `round(100 * correct / candidates)`. When probabilities are
//!   available and `cap_with_confidence` is set, it is capped by
//!   `round(100 * mean probability of the correct candidates)`.
//! - No candidates scores 0.

use std::collections::HashSet;

use rxcheck_contracts::{
    outcome::MatchOutcome,
    policy::ScoringPolicy,
    reference::normalize_key,
    report::MedicationConfidence,
};

/// Everything the aggregator derives for the report.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScoreSummary {
    pub correct_meds: Vec<String>,
    pub incorrect_meds: Vec<String>,
    pub essential_meds: Vec<String>,
    pub non_essential_meds: Vec<String>,
    pub confidence: Vec<MedicationConfidence>,
    pub aggregate_score: u8,
}

/// Applies the scoring policy to a full outcome sequence.
#[derive(Debug, Clone, Default)]
pub struct Aggregator {
    policy: ScoringPolicy,
}

impl Aggregator {
    pub fn new(policy: ScoringPolicy) -> Self {
        Self { policy }
    }

    /// Summarize `outcomes` against `reference`.
    ///
    /// `probabilities`, when given, holds one scorer probability per outcome
    /// in the same order.
    pub fn aggregate(
        &self,
        outcomes: &[MatchOutcome],
        probabilities: Option<&[f64]>,
        reference: &[String],
    ) -> ScoreSummary {
        let mut summary = ScoreSummary {
            essential_meds: reference.to_vec(),
            ..ScoreSummary::default()
        };
        let mut correct_probabilities = Vec::new();

        for (idx, outcome) in outcomes.iter().enumerate() {
            let medication = outcome.candidate().to_string();
            let probability = probabilities.and_then(|p| p.get(idx).copied());

            let likely = probability.is_some_and(|p| p > self.policy.appropriateness_threshold);
            if outcome.is_exact() || likely {
                if let Some(p) = probability {
                    correct_probabilities.push(p);
                }
                summary.correct_meds.push(medication.clone());
            } else {
                summary.incorrect_meds.push(medication.clone());
            }

            if let Some(p) = probability {
                summary.confidence.push(MedicationConfidence {
                    medication,
                    probability: p,
                });
            }
        }

        let reference_keys: HashSet<String> = reference.iter().map(|r| normalize_key(r)).collect();
        summary.non_essential_meds = outcomes
            .iter()
            .map(MatchOutcome::candidate)
            .filter(|c| !reference_keys.contains(&normalize_key(c)))
            .map(str::to_string)
            .collect();

        let cap = match probabilities {
            Some(_) if self.policy.cap_with_confidence => Some(correct_probabilities.as_slice()),
            _ => None,
        };
        summary.aggregate_score = aggregate_score(summary.correct_meds.len(), outcomes.len(), cap);
        summary
    }
}

/// The prescription score in `[0, 100]`.
///
/// `confidence_cap` holds the probabilities of the correct candidates when
/// the cap applies; an empty cap leaves the ratio untouched.
pub fn aggregate_score(correct: usize, total: usize, confidence_cap: Option<&[f64]>) -> u8 {
    if total == 0 {
        return 0;
    }
    let ratio = percent(correct as f64 / total as f64);
    let score = match confidence_cap {
        Some(probs) if !probs.is_empty() => {
            let mean = probs.iter().sum::<f64>() / probs.len() as f64;
            ratio.min(percent(mean))
        }
        _ => ratio,
    };
    score as u8
}

fn percent(fraction: f64) -> f64 {
    (100.0 * fraction).round().clamp(0.0, 100.0)
}

// ── Tests ────────────────────────────────────────────────────────────────────
