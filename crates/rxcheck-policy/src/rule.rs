//! Range rules for validation policies.
//!
//! TOML parsing only guarantees types. The rules here reject values that
//! parse but would make the pipeline meaningless: a fuzzy threshold outside
//! the similarity scale, a probability threshold that no probability can
//! exceed, blank column names.

use std::fmt;

use serde::Serialize;

use rxcheck_contracts::policy::ValidationPolicy;

/// One out-of-range policy value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PolicyViolation {
    /// Dotted TOML path of the offending key, e.g. `matching.fuzzy_threshold`.
    pub field: &'static str,
    pub reason: String,
}

impl fmt::Display for PolicyViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.reason)
    }
}

/// Every range violation in `policy`, in declaration order of the sections.
pub fn violations(policy: &ValidationPolicy) -> Vec<PolicyViolation> {
    let mut found = Vec::new();
    let mut check = |ok: bool, field: &'static str, reason: String| {
        if !ok {
            found.push(PolicyViolation { field, reason });
        }
    };

    let threshold = policy.matching.fuzzy_threshold;
    check(
        (0.0..=100.0).contains(&threshold),
        "matching.fuzzy_threshold",
        format!("{} is outside 0..=100", threshold),
    );

    let probability = policy.scoring.appropriateness_threshold;
    check(
        (0.0..1.0).contains(&probability),
        "scoring.appropriateness_threshold",
        format!("{} is outside 0..1; no probability could exceed it", probability),
    );

    check(
        policy.spelling.max_edit_distance < policy.spelling.min_token_len,
        "spelling.max_edit_distance",
        format!(
            "{} is not below min_token_len {}; any short token could be rewritten",
            policy.spelling.max_edit_distance, policy.spelling.min_token_len
        ),
    );

    let layout = &policy.reference;
    check(
        !layout.diagnosis_column.trim().is_empty(),
        "reference.diagnosis_column",
        "must not be blank".to_string(),
    );
    check(
        !layout.drugs_column.trim().is_empty(),
        "reference.drugs_column",
        "must not be blank".to_string(),
    );
    check(
        !layout.drug_separator.is_alphanumeric() && !layout.drug_separator.is_whitespace(),
        "reference.drug_separator",
        format!("'{}' would split drug names apart", layout.drug_separator),
    );

    found
}
