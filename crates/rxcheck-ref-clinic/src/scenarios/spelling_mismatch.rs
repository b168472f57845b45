//! Scenario 1: Spelling Mismatch
//!
//! An asthma prescription lists "Budeosonid", a misspelling of the reference
//! drug Budesonide. The validator must surface the likely intended drug
//! without rewarding the prescription for it.
//!
//! Pipeline walk-through for the demo run:
//!   1. Reference lookup for "Asthma" → [Budesonide, Salbutamol]
//!   2. "Budeosonid" is not an exact member → best similarity 80 → FuzzyMatch
//!   3. "Salbutamol" is an exact member → Exact
//!   4. No scorer configured → only the exact match counts → score 50

use std::sync::Arc;

use rxcheck_contracts::{error::RxResult, report::PrescriptionReport};
use rxcheck_core::{traits::ReferenceSource, Validator};

use crate::mock_data::{clinic_policy, reference_store};

use super::print_report;

/// Validate the misspelled asthma prescription.
pub fn validate_sample() -> RxResult<PrescriptionReport> {
    let policy = clinic_policy()?;
    let reference: Arc<dyn ReferenceSource> = Arc::new(Arc::new(reference_store()?));
    let validator = Validator::new(reference, &policy);

    let medications = vec!["Budeosonid".to_string(), "Salbutamol".to_string()];
    Ok(validator.validate_prescription("Asthma", &medications, None))
}

/// Run Scenario 1: Spelling Mismatch.
pub fn run_scenario() -> RxResult<()> {
    println!("=== Scenario 1: Spelling Mismatch ===");
    println!();
    println!("  Prescription: Asthma → Budeosonid, Salbutamol");
    println!();

    let report = validate_sample()?;
    print_report(&report);

    println!();
    if let Some(m) = report.fuzzy_matches.first() {
        println!(
            "  Did you mean {} for '{}'? (similarity {:.0})",
            m.matched_reference, m.candidate, m.similarity_score
        );
    }
    println!();
    println!("  Scenario 1 complete.");
    println!();

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::validate_sample;

    #[test]
    fn test_misspelling_is_fuzzy_at_threshold() {
        let report = validate_sample().unwrap();
        assert_eq!(report.fuzzy_matches.len(), 1);
        assert_eq!(report.fuzzy_matches[0].matched_reference, "Budesonide");
        assert_eq!(report.fuzzy_matches[0].similarity_score, 80.0);
        assert_eq!(report.exact_matches, vec!["Salbutamol"]);
    }

    #[test]
    fn test_fuzzy_match_does_not_count() {
        let report = validate_sample().unwrap();
        assert_eq!(report.correct_meds, vec!["Salbutamol"]);
        assert_eq!(report.incorrect_meds, vec!["Budeosonid"]);
        assert_eq!(report.non_essential_meds, vec!["Budeosonid"]);
        assert_eq!(report.aggregate_score, 50);
    }
}
