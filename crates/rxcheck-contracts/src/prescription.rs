//! Prescription identity, request, and candidate types.
//!
//! These are the inputs flowing into the validator and the transient values
//! it derives from them. Nothing here outlives a single validation call
//! except the identifiers.

use serde::{Deserialize, Serialize};

/// Stable identifier for the doctor who wrote a prescription.
///
/// Used only to group scores in the rating ledger.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DoctorId(pub String);

/// Unique identifier for one scored prescription.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PrescriptionId(pub uuid::Uuid);

impl PrescriptionId {
    /// Create a new, unique prescription ID.
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4())
    }
}

impl Default for PrescriptionId {
    fn default() -> Self {
        Self::new()
    }
}

/// Everything the validator needs for one prescription.
///
/// `medications` holds names the doctor entered as a list; they are taken as
/// written. `raw_text` holds free prescription text that still has to go
/// through spelling normalization and tagging.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PrescriptionRequest {
    /// Diagnosis as entered; matched against the reference table case-insensitively.
    pub diagnosis: String,
    /// Optional symptoms, appended to the diagnosis for the appropriateness scorer.
    #[serde(default)]
    pub symptoms: Option<String>,
    /// Medications entered as a list.
    #[serde(default)]
    pub medications: Vec<String>,
    /// Free prescription text to extract further drug names from.
    #[serde(default)]
    pub raw_text: Option<String>,
}

impl PrescriptionRequest {
    /// Build a request from a diagnosis and a medication list.
    pub fn new(diagnosis: impl Into<String>, medications: Vec<String>) -> Self {
        Self {
            diagnosis: diagnosis.into(),
            medications,
            ..Self::default()
        }
    }

    /// Attach free prescription text.
    pub fn with_raw_text(mut self, text: impl Into<String>) -> Self {
        self.raw_text = Some(text.into());
        self
    }

    /// Attach symptoms.
    pub fn with_symptoms(mut self, symptoms: impl Into<String>) -> Self {
        self.symptoms = Some(symptoms.into());
        self
    }

    /// The context string handed to the appropriateness scorer:
    /// the diagnosis, followed by the symptoms when present.
    pub fn scoring_context(&self) -> String {
        match self.symptoms.as_deref().map(str::trim) {
            Some(s) if !s.is_empty() => format!("{} {}", self.diagnosis.trim(), s),
            _ => self.diagnosis.trim().to_string(),
        }
    }
}

/// Where a candidate came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CandidateSource {
    /// Entered in the medication list.
    Listed,
    /// Assembled from tagged prescription text.
    Extracted,
}

/// A drug-name string awaiting reconciliation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    /// The drug name as extracted.
    pub text: String,
    /// Zero-based position in the request's candidate sequence.
    pub position: usize,
    /// How the candidate was obtained.
    pub source: CandidateSource,
}

/// Marker prefix a tagger puts on sub-word continuation tokens.
pub const CONTINUATION_MARKER: &str = "##";

/// One token emitted by a tagger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaggedToken {
    /// Token text; continuation tokens may still carry `CONTINUATION_MARKER`.
    pub text: String,
    /// True when this token continues the word started by its predecessor.
    pub is_continuation: bool,
}

impl TaggedToken {
    /// A token that starts a new word.
    pub fn word(text: impl Into<String>) -> Self {
        Self { text: text.into(), is_continuation: false }
    }

    /// A sub-word continuation of the preceding token.
    pub fn continuation(text: impl Into<String>) -> Self {
        Self { text: text.into(), is_continuation: true }
    }

    /// Classify a raw token by its marker prefix (`"##ide"` is a continuation).
    pub fn from_marked(raw: &str) -> Self {
        match raw.strip_prefix(CONTINUATION_MARKER) {
            Some(_) => Self::continuation(raw),
            None => Self::word(raw),
        }
    }

    /// The token text, minus the continuation marker on continuation tokens.
    pub fn stripped(&self) -> &str {
        if !self.is_continuation {
            return &self.text;
        }
        self.text
            .strip_prefix(CONTINUATION_MARKER)
            .unwrap_or(&self.text)
    }
}
