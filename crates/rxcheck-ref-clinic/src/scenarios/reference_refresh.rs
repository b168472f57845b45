//! Scenario 6: Reference Refresh
//!
//! The clinic adds Montelukast to its asthma guideline. The new table is
//! published through the reference handle while a snapshot of the old one is
//! still held; the old snapshot is untouched and new validations see the
//! new data.

use std::sync::Arc;

use rxcheck_contracts::{
    error::RxResult,
    policy::ReferenceTableLayout,
    report::PrescriptionReport,
};
use rxcheck_core::{traits::ReferenceSource, Validator};
use rxcheck_reference::{load_csv_str, ReferenceHandle};

use crate::mock_data::{clinic_policy, reference_store, REFERENCE_CSV};

use super::print_report;

/// Reports before and after the refresh, plus the asthma drugs seen by the
/// snapshot taken before it.
pub struct RefreshOutcome {
    pub before: PrescriptionReport,
    pub after: PrescriptionReport,
    pub held_snapshot_drugs: Vec<String>,
}

pub fn refresh_and_validate() -> RxResult<RefreshOutcome> {
    let policy = clinic_policy()?;
    let handle = Arc::new(ReferenceHandle::new(reference_store()?));
    let source: Arc<dyn ReferenceSource> = handle.clone();
    let validator = Validator::new(source, &policy);
    let medications = vec!["Montelukast".to_string()];

    let before = validator.validate_prescription("Asthma", &medications, None);
    let held = handle.snapshot();

    let updated = REFERENCE_CSV.replace(
        "Asthma,\"Budesonide, Salbutamol\"",
        "Asthma,\"Budesonide, Salbutamol, Montelukast\"",
    );
    handle.publish(load_csv_str(&updated, &ReferenceTableLayout::default())?);

    let after = validator.validate_prescription("Asthma", &medications, None);

    Ok(RefreshOutcome {
        before,
        after,
        held_snapshot_drugs: held.lookup("Asthma").to_vec(),
    })
}

/// Run Scenario 6: Reference Refresh.
pub fn run_scenario() -> RxResult<()> {
    println!("=== Scenario 6: Reference Refresh ===");
    println!();
    println!("  Prescription: Asthma → Montelukast");
    println!();

    let outcome = refresh_and_validate()?;

    println!("  -- Before publishing the updated guideline --");
    print_report(&outcome.before);
    println!();
    println!("  -- After publishing --");
    print_report(&outcome.after);
    println!();
    println!(
        "  Snapshot held across the publish still lists: {}",
        outcome.held_snapshot_drugs.join(", ")
    );

    println!();
    println!("  Scenario 6 complete.");
    println!();

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::refresh_and_validate;

    #[test]
    fn test_publish_changes_new_validations_only() {
        let outcome = refresh_and_validate().unwrap();

        assert_eq!(outcome.before.aggregate_score, 0);
        assert_eq!(outcome.after.aggregate_score, 100);
        assert_eq!(outcome.after.exact_matches, vec!["Montelukast"]);
        assert_eq!(outcome.held_snapshot_drugs, vec!["Budesonide", "Salbutamol"]);
    }
}
