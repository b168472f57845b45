//! Scenario 2: Unknown Diagnosis
//!
//! The diagnosis is not in the reference table. With no reference drugs,
//! nothing can be validated: every candidate is NoMatch, even one that is
//! spelled like a real drug, and the appropriateness model has nothing to
//! recognise the diagnosis by.
//!
//! Pipeline walk-through for the demo run:
//!   1. Reference lookup for "Dragon pox" → empty
//!   2. Every candidate → NoMatch (no fuzzy fallback against an empty list)
//!   3. Scorer returns the unknown-pair probability → nothing is correct
//!   4. Score 0; essential list empty

use std::sync::Arc;

use rxcheck_contracts::{error::RxResult, report::PrescriptionReport};
use rxcheck_core::{traits::ReferenceSource, Validator};

use crate::{
    collaborators::TableScorer,
    mock_data::{clinic_policy, reference_store},
};

use super::print_report;

pub fn validate_sample() -> RxResult<PrescriptionReport> {
    let policy = clinic_policy()?;
    let reference: Arc<dyn ReferenceSource> = Arc::new(Arc::new(reference_store()?));
    let validator = Validator::new(reference, &policy).with_scorer(Arc::new(TableScorer));

    let medications = vec!["Salbutamol".to_string(), "Amoxicillin".to_string()];
    Ok(validator.validate_prescription("Dragon pox", &medications, None))
}

/// Run Scenario 2: Unknown Diagnosis.
pub fn run_scenario() -> RxResult<()> {
    println!("=== Scenario 2: Unknown Diagnosis ===");
    println!();
    println!("  Prescription: Dragon pox → Salbutamol, Amoxicillin");
    println!();

    let report = validate_sample()?;
    print_report(&report);

    println!();
    println!("  Scenario 2 complete.");
    println!();

    Ok(())
}
