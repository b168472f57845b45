//! Scenario 4: Degraded Collaborators
//!
//! The same asthma prescription is validated twice: once with healthy
//! collaborators and once with a tagger that stalls past its deadline and a
//! scorer whose model is missing. The degraded run still produces a report;
//! it just knows less, and says so.
//!
//! Pipeline walk-through for the degraded run:
//!   1. Listed: Salbutamol, Montelukast
//!   2. Tagger call abandoned after 50 ms → extraction Unavailable
//!   3. Scorer fails → scoring Unavailable, exact-only rule
//!   4. Salbutamol exact, Montelukast no match → score 50, two warnings

use std::{sync::Arc, time::Duration};

use rxcheck_contracts::{
    error::RxResult,
    prescription::PrescriptionRequest,
    report::PrescriptionReport,
};
use rxcheck_core::{traits::ReferenceSource, Validator};

use crate::{
    collaborators::{LexiconTagger, OfflineScorer, StalledTagger, TableScorer},
    mock_data::{clinic_policy, reference_store},
};

use super::print_report;

fn request() -> PrescriptionRequest {
    PrescriptionRequest::new(
        "Asthma",
        vec!["Salbutamol".to_string(), "Montelukast".to_string()],
    )
    .with_raw_text("Budesonide 200 mcg twice daily")
}

/// Validate with working tagger and scorer.
pub fn validate_healthy() -> RxResult<PrescriptionReport> {
    let policy = clinic_policy()?;
    let reference: Arc<dyn ReferenceSource> = Arc::new(Arc::new(reference_store()?));
    let validator = Validator::new(Arc::clone(&reference), &policy)
        .with_tagger(Arc::new(LexiconTagger::new(reference)))
        .with_scorer(Arc::new(TableScorer));
    Ok(validator.validate(&request()))
}

/// Validate with a stalled tagger and an offline scorer.
pub fn validate_degraded() -> RxResult<PrescriptionReport> {
    let mut policy = clinic_policy()?;
    policy.collaborators.tagger_timeout_ms = 50;
    let reference: Arc<dyn ReferenceSource> = Arc::new(Arc::new(reference_store()?));
    let validator = Validator::new(reference, &policy)
        .with_tagger(Arc::new(StalledTagger {
            delay: Duration::from_millis(300),
        }))
        .with_scorer(Arc::new(OfflineScorer));
    Ok(validator.validate(&request()))
}

/// Run Scenario 4: Degraded Collaborators.
pub fn run_scenario() -> RxResult<()> {
    println!("=== Scenario 4: Degraded Collaborators ===");
    println!();
    println!("  Prescription: Asthma → Salbutamol, Montelukast");
    println!("  Text:         \"Budesonide 200 mcg twice daily\"");
    println!();

    println!("  -- Healthy tagger and scorer --");
    print_report(&validate_healthy()?);
    println!();

    println!("  -- Stalled tagger (50 ms deadline) and offline scorer --");
    print_report(&validate_degraded()?);

    println!();
    println!("  Scenario 4 complete.");
    println!();

    Ok(())
}

#[cfg(test)]
mod tests {
    use rxcheck_contracts::report::{ExtractionStatus, ScoringStatus};

    use super::{validate_degraded, validate_healthy};

    #[test]
    fn test_healthy_run_rescues_montelukast() {
        let report = validate_healthy().unwrap();
        assert_eq!(report.extraction, ExtractionStatus::Extracted { count: 1 });
        assert_eq!(report.correct_meds, vec!["Salbutamol", "Montelukast", "Budesonide"]);
        assert_eq!(report.aggregate_score, 88);
    }

    #[test]
    fn test_degraded_run_still_reports() {
        let report = validate_degraded().unwrap();
        assert!(matches!(report.extraction, ExtractionStatus::Unavailable { .. }));
        assert!(matches!(report.scoring, ScoringStatus::Unavailable { .. }));
        assert_eq!(report.candidates.len(), 2);
        assert_eq!(report.correct_meds, vec!["Salbutamol"]);
        assert_eq!(report.aggregate_score, 50);
        assert_eq!(report.warnings.len(), 2);
    }
}
