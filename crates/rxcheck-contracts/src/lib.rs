//! # rxcheck-contracts
//!
//! Shared types, report shapes, and error contracts for the rxcheck
//! prescription validator.
//!
//! All crates in the workspace import from here. No pipeline logic lives in
//! this crate: only data definitions, the reference data model, and error
//! types.

pub mod error;
pub mod outcome;
pub mod policy;
pub mod prescription;
pub mod reference;
pub mod report;

#[cfg(test)]
mod tests {
    use super::*;
    use error::RxError;
    use outcome::{FuzzyMatch, MatchOutcome};
    use policy::ValidationPolicy;
    use prescription::{PrescriptionId, PrescriptionRequest, TaggedToken};
    use reference::{ReferenceEntry, ReferenceStore, Vocabulary};

    fn asthma_and_flu() -> ReferenceStore {
        ReferenceStore::from_entries(vec![
            ReferenceEntry::new("Asthma", ["Budesonide", "Salbutamol"]),
            ReferenceEntry::new("Flu", ["Oseltamivir", "Paracetamol"]),
        ])
    }

    // ── ReferenceStore ───────────────────────────────────────────────────────

    #[test]
    fn lookup_is_case_insensitive_and_trimmed() {
        let store = asthma_and_flu();
        assert_eq!(store.lookup("asthma"), ["Budesonide", "Salbutamol"]);
        assert_eq!(store.lookup("  ASTHMA "), ["Budesonide", "Salbutamol"]);
    }

    #[test]
    fn unknown_diagnosis_yields_empty_slice() {
        let store = asthma_and_flu();
        assert!(store.lookup("gout").is_empty());
        assert!(!store.contains_diagnosis("gout"));
    }

    #[test]
    fn first_entry_wins_on_duplicate_diagnosis() {
        let store = ReferenceStore::from_entries(vec![
            ReferenceEntry::new("Asthma", ["Budesonide"]),
            ReferenceEntry::new("asthma", ["Montelukast"]),
        ]);
        assert_eq!(store.len(), 1);
        assert_eq!(store.lookup("asthma"), ["Budesonide"]);
    }

    #[test]
    fn entry_drops_blank_and_repeated_drugs() {
        let entry = ReferenceEntry::new(" Flu ", ["Paracetamol", " ", "paracetamol", "Oseltamivir "]);
        assert_eq!(entry.diagnosis, "Flu");
        assert_eq!(entry.drugs, vec!["Paracetamol", "Oseltamivir"]);
    }

    #[test]
    fn entries_iterate_in_source_order() {
        let store = asthma_and_flu();
        let names: Vec<&str> = store.entries().map(|e| e.diagnosis.as_str()).collect();
        assert_eq!(names, vec!["Asthma", "Flu"]);
    }

    // ── Vocabulary ───────────────────────────────────────────────────────────

    #[test]
    fn vocabulary_is_the_folded_union_of_all_drugs() {
        let store = asthma_and_flu();
        let vocab = store.vocabulary();
        let terms: Vec<&str> = vocab.terms().collect();
        assert_eq!(terms, vec!["budesonide", "salbutamol", "oseltamivir", "paracetamol"]);
        assert!(vocab.contains("BUDESONIDE"));
        assert!(!vocab.contains("aspirin"));
    }

    #[test]
    fn vocabulary_ignores_duplicates() {
        let vocab = Vocabulary::from_terms(["Metformin", "metformin", "METFORMIN"]);
        assert_eq!(vocab.len(), 1);
    }

    // ── Tagged tokens ────────────────────────────────────────────────────────

    #[test]
    fn marked_tokens_are_classified_and_stripped() {
        let token = TaggedToken::from_marked("##nide");
        assert!(token.is_continuation);
        assert_eq!(token.stripped(), "nide");

        let word = TaggedToken::from_marked("Budeso");
        assert!(!word.is_continuation);
        assert_eq!(word.stripped(), "Budeso");
    }

    // ── Requests ─────────────────────────────────────────────────────────────

    #[test]
    fn scoring_context_appends_symptoms() {
        let req = PrescriptionRequest::new("asthma", vec![]).with_symptoms("wheezing");
        assert_eq!(req.scoring_context(), "asthma wheezing");

        let bare = PrescriptionRequest::new(" asthma ", vec![]).with_symptoms("   ");
        assert_eq!(bare.scoring_context(), "asthma");
    }

    #[test]
    fn prescription_ids_are_unique() {
        let ids: std::collections::HashSet<String> =
            (0..100).map(|_| PrescriptionId::new().0.to_string()).collect();
        assert_eq!(ids.len(), 100);
    }

    // ── MatchOutcome ─────────────────────────────────────────────────────────

    #[test]
    fn outcome_candidate_accessor() {
        let fuzzy = MatchOutcome::FuzzyMatch(FuzzyMatch {
            candidate: "Budeosonid".to_string(),
            matched_reference: "Budesonide".to_string(),
            similarity_score: 80.0,
        });
        assert_eq!(fuzzy.candidate(), "Budeosonid");
        assert!(!fuzzy.is_exact());
        assert!(MatchOutcome::Exact { drug: "Salbutamol".to_string() }.is_exact());
    }

    #[test]
    fn fuzzy_outcome_serializes_with_reference_and_score() {
        let fuzzy = MatchOutcome::FuzzyMatch(FuzzyMatch {
            candidate: "Budeosonid".to_string(),
            matched_reference: "Budesonide".to_string(),
            similarity_score: 80.0,
        });
        let json = serde_json::to_value(&fuzzy).unwrap();
        assert_eq!(json["FuzzyMatch"]["matched_reference"], "Budesonide");
        assert_eq!(json["FuzzyMatch"]["similarity_score"], 80.0);
    }

    // ── Policy defaults ──────────────────────────────────────────────────────

    #[test]
    fn policy_defaults_match_documented_constants() {
        let policy = ValidationPolicy::default();
        assert_eq!(policy.matching.fuzzy_threshold, 80.0);
        assert_eq!(policy.scoring.appropriateness_threshold, 0.7);
        assert!(policy.scoring.cap_with_confidence);
        assert_eq!(policy.reference.drug_separator, ',');
        assert_eq!(
            policy.collaborators.tagger_timeout(),
            Some(std::time::Duration::from_millis(2000))
        );
    }

    #[test]
    fn zero_timeout_disables_deadline() {
        let mut policy = ValidationPolicy::default();
        policy.collaborators.scorer_timeout_ms = 0;
        assert_eq!(policy.collaborators.scorer_timeout(), None);
    }

    // ── RxError display messages ─────────────────────────────────────────────

    #[test]
    fn error_data_load_display() {
        let err = RxError::DataLoad {
            reason: "missing column 'diagnosis'".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("reference data load failed"));
        assert!(msg.contains("missing column 'diagnosis'"));
    }

    #[test]
    fn error_malformed_sequence_display() {
        let err = RxError::MalformedTokenSequence {
            token: "##nide".to_string(),
        };
        assert!(err.to_string().contains("##nide"));
    }

    #[test]
    fn error_timeout_display() {
        let err = RxError::Timeout {
            capability: "tagger".to_string(),
            timeout_ms: 250,
        };
        let msg = err.to_string();
        assert!(msg.contains("tagger"));
        assert!(msg.contains("250 ms"));
    }

    #[test]
    fn error_config_display() {
        let err = RxError::ConfigError {
            reason: "fuzzy_threshold out of range".to_string(),
        };
        assert!(err.to_string().contains("configuration error"));
    }

    #[test]
    fn error_rating_write_display() {
        let err = RxError::RatingWriteFailed {
            reason: "lock poisoned".to_string(),
        };
        assert_eq!(err.to_string(), "rating ledger write failed: lock poisoned");
    }
}
