//! Per-candidate reconciliation outcomes.

use serde::{Deserialize, Serialize};

/// A candidate that resolved to a reference drug by string similarity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FuzzyMatch {
    /// The candidate as written.
    pub candidate: String,
    /// The closest reference drug, display casing.
    pub matched_reference: String,
    /// Similarity in `[0, 100]`.
    pub similarity_score: f64,
}

/// The result of reconciling one candidate against a reference list.
///
/// Exactly one outcome is produced per candidate, in candidate order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum MatchOutcome {
    /// Case-insensitive member of the reference list.
    Exact { drug: String },
    /// Close enough to a reference drug to be read as a spelling slip.
    FuzzyMatch(FuzzyMatch),
    /// No plausible reference drug.
    NoMatch { candidate: String },
}

impl MatchOutcome {
    /// The candidate text this outcome was produced for.
    pub fn candidate(&self) -> &str {
        match self {
            MatchOutcome::Exact { drug } => drug,
            MatchOutcome::FuzzyMatch(m) => &m.candidate,
            MatchOutcome::NoMatch { candidate } => candidate,
        }
    }

    pub fn is_exact(&self) -> bool {
        matches!(self, MatchOutcome::Exact { .. })
    }
}
