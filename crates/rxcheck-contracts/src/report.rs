//! The validation report handed to persistence and presentation layers.
//!
//! The report is the only artifact that leaves the pipeline. Its lists do not
//! overlap within a partition, and the status fields say explicitly when a
//! collaborator was missing or failed, so callers never have to infer that
//! from an empty list.

use serde::{Deserialize, Serialize};

use crate::{
    outcome::{FuzzyMatch, MatchOutcome},
    prescription::Candidate,
};

/// What happened to the free-text extraction step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExtractionStatus {
    /// The request carried no raw text.
    NotRequested,
    /// Text was tagged; `count` candidates were assembled from it.
    Extracted { count: usize },
    /// The tagger produced an invalid sequence; nothing was extracted.
    Malformed,
    /// Raw text was present but the tagger was missing, failed, or timed out.
    Unavailable { reason: String },
}

/// Whether appropriateness probabilities fed into the score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScoringStatus {
    /// No scorer is configured; only exact matches count as correct.
    NotConfigured,
    /// Every candidate received a probability.
    Applied,
    /// The scorer failed for this request; exact-only rule was used.
    Unavailable { reason: String },
}

/// A scorer probability for one candidate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MedicationConfidence {
    pub medication: String,
    /// Probability in `[0, 1]` that the drug fits the diagnosis.
    pub probability: f64,
}

/// Full result of validating one prescription.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrescriptionReport {
    /// Diagnosis as submitted.
    pub diagnosis: String,
    /// True when the reference table knows the diagnosis.
    pub diagnosis_known: bool,
    pub extraction: ExtractionStatus,
    pub scoring: ScoringStatus,

    /// Every candidate in order: listed first, then extracted.
    pub candidates: Vec<Candidate>,
    /// One outcome per candidate, same order.
    pub outcomes: Vec<MatchOutcome>,

    // Reconciliation partition (reporting view).
    pub exact_matches: Vec<String>,
    pub fuzzy_matches: Vec<FuzzyMatch>,
    pub unmatched: Vec<String>,

    // Scoring partition.
    pub correct_meds: Vec<String>,
    pub incorrect_meds: Vec<String>,

    /// The full reference list for the diagnosis, prescribed or not.
    pub essential_meds: Vec<String>,
    /// Prescribed candidates absent from the reference list.
    pub non_essential_meds: Vec<String>,

    /// Scorer probabilities, empty unless `scoring` is `Applied`.
    pub confidence: Vec<MedicationConfidence>,

    /// Prescription score in `[0, 100]`; 0 when there are no candidates.
    pub aggregate_score: u8,

    /// Recovered problems worth showing next to the result.
    pub warnings: Vec<String>,
}

impl PrescriptionReport {
    /// True when the prescription listed no medications at all.
    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    /// True when there were candidates and none counted as correct.
    pub fn all_incorrect(&self) -> bool {
        !self.candidates.is_empty() && self.correct_meds.is_empty()
    }
}
