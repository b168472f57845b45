//! Validation policy: the tunable constants of the pipeline.
//!
//! Every field has a default so a policy file only needs to name what it
//! changes. The thresholds here are product decisions, not derived values;
//! `rxcheck-policy` loads and range-checks them.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Top-level policy, deserialized from TOML.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationPolicy {
    pub matching: MatchingPolicy,
    pub scoring: ScoringPolicy,
    pub spelling: SpellingPolicy,
    pub reference: ReferenceTableLayout,
    pub collaborators: CollaboratorPolicy,
}

/// Fuzzy reconciliation settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchingPolicy {
    /// Minimum similarity (0–100) for a `FuzzyMatch`. Inclusive.
    pub fuzzy_threshold: f64,
}

impl Default for MatchingPolicy {
    fn default() -> Self {
        Self { fuzzy_threshold: 80.0 }
    }
}

/// Aggregate scoring settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringPolicy {
    /// A scorer probability strictly above this counts the drug as correct.
    pub appropriateness_threshold: f64,
    /// Cap the ratio score by the mean probability of correct drugs.
    pub cap_with_confidence: bool,
}

impl Default for ScoringPolicy {
    fn default() -> Self {
        Self {
            appropriateness_threshold: 0.7,
            cap_with_confidence: true,
        }
    }
}

/// Spelling normalizer settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpellingPolicy {
    /// Largest edit distance a correction may span.
    pub max_edit_distance: usize,
    /// Tokens shorter than this are never corrected.
    pub min_token_len: usize,
}

impl Default for SpellingPolicy {
    fn default() -> Self {
        Self {
            max_edit_distance: 2,
            min_token_len: 4,
        }
    }
}

/// Column layout of the reference table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReferenceTableLayout {
    pub diagnosis_column: String,
    pub drugs_column: String,
    /// Separator between drug names inside the drugs column.
    pub drug_separator: char,
}

impl Default for ReferenceTableLayout {
    fn default() -> Self {
        Self {
            diagnosis_column: "diagnosis".to_string(),
            drugs_column: "recommended_drugs".to_string(),
            drug_separator: ',',
        }
    }
}

/// Deadlines for external collaborators, in milliseconds. 0 waits indefinitely.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CollaboratorPolicy {
    pub tagger_timeout_ms: u64,
    pub scorer_timeout_ms: u64,
}

impl CollaboratorPolicy {
    pub fn tagger_timeout(&self) -> Option<Duration> {
        non_zero_millis(self.tagger_timeout_ms)
    }

    pub fn scorer_timeout(&self) -> Option<Duration> {
        non_zero_millis(self.scorer_timeout_ms)
    }
}

impl Default for CollaboratorPolicy {
    fn default() -> Self {
        Self {
            tagger_timeout_ms: 2000,
            scorer_timeout_ms: 2000,
        }
    }
}

fn non_zero_millis(ms: u64) -> Option<Duration> {
    (ms > 0).then(|| Duration::from_millis(ms))
}
