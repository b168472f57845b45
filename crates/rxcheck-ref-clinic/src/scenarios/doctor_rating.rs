//! Scenario 5: Doctor Rating
//!
//! A week of prescriptions from two doctors is validated and every score is
//! recorded in the rating ledger. Each doctor's rating is the mean of all
//! their prescription scores so far.

use std::sync::Arc;

use rxcheck_contracts::{error::RxResult, prescription::DoctorId};
use rxcheck_core::{traits::ReferenceSource, RatingLedger, Validator};

use crate::{
    collaborators::{LexiconTagger, TableScorer},
    mock_data::{clinic_policy, reference_store, weekly_prescriptions},
};

/// Validate and record the week; returns the ledger.
pub fn rate_week() -> RxResult<RatingLedger> {
    let policy = clinic_policy()?;
    let reference: Arc<dyn ReferenceSource> = Arc::new(Arc::new(reference_store()?));
    let validator = Validator::new(Arc::clone(&reference), &policy)
        .with_tagger(Arc::new(LexiconTagger::new(reference)))
        .with_scorer(Arc::new(TableScorer));

    let ledger = RatingLedger::new();
    for sample in weekly_prescriptions() {
        let report = validator.validate(&sample.to_request());
        let rating = ledger.record(&sample.doctor_id(), &report)?;
        println!(
            "  {:<12} {:<16} score {:>3}  → rating {:.1}",
            sample.doctor, sample.diagnosis, report.aggregate_score, rating
        );
    }
    Ok(ledger)
}

/// Run Scenario 5: Doctor Rating.
pub fn run_scenario() -> RxResult<()> {
    println!("=== Scenario 5: Doctor Rating ===");
    println!();

    let ledger = rate_week()?;

    println!();
    for doctor in ["dr-a-rivera", "dr-k-osei"] {
        let id = DoctorId(doctor.to_string());
        let history = ledger.history(&id)?;
        println!(
            "  {:<12} {} prescription(s), rating {:.1}",
            doctor,
            history.len(),
            ledger.rating(&id)?
        );
    }

    println!();
    println!("  Scenario 5 complete.");
    println!();

    Ok(())
}
