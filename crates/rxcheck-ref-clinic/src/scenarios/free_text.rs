//! Scenario 3: Free-Text Extraction
//!
//! A diabetes prescription lists one drug and writes two more in free text,
//! one of them misspelled. The text goes through the full extraction path
//! and all three drugs are scored by the appropriateness model.
//!
//! Pipeline walk-through for the demo run:
//!   1. Listed: Sitagliptin
//!   2. Spelling: "Metforminn" → "metformin"; dosage tokens left alone
//!   3. Tagger emits word pieces ("metf", "##ormi", "##n", ...)
//!   4. Assembly rebuilds "metformin" and "Gliclazide"
//!   5. All three are exact; model probabilities 0.81, 0.93, 0.88
//!   6. Ratio 100, capped by mean confidence → score 87

use std::sync::Arc;

use rxcheck_contracts::{
    error::RxResult,
    prescription::PrescriptionRequest,
    report::PrescriptionReport,
};
use rxcheck_core::{traits::ReferenceSource, Validator};

use crate::{
    collaborators::{LexiconTagger, TableScorer},
    mock_data::{clinic_policy, reference_store},
};

use super::print_report;

const PRESCRIPTION_TEXT: &str = "Metforminn 500 mg twice daily with Gliclazide 40 mg before breakfast";

pub fn validate_sample() -> RxResult<PrescriptionReport> {
    let policy = clinic_policy()?;
    let reference: Arc<dyn ReferenceSource> = Arc::new(Arc::new(reference_store()?));
    let tagger = LexiconTagger::new(Arc::clone(&reference)).with_word_pieces(4);
    let validator = Validator::new(reference, &policy)
        .with_tagger(Arc::new(tagger))
        .with_scorer(Arc::new(TableScorer));

    let request = PrescriptionRequest::new("Type 2 diabetes", vec!["Sitagliptin".to_string()])
        .with_symptoms("polyuria, fatigue")
        .with_raw_text(PRESCRIPTION_TEXT);
    Ok(validator.validate(&request))
}

/// Run Scenario 3: Free-Text Extraction.
pub fn run_scenario() -> RxResult<()> {
    println!("=== Scenario 3: Free-Text Extraction ===");
    println!();
    println!("  Diagnosis: Type 2 diabetes (polyuria, fatigue)");
    println!("  Listed:    Sitagliptin");
    println!("  Text:      \"{}\"", PRESCRIPTION_TEXT);
    println!();

    let report = validate_sample()?;
    print_report(&report);

    println!();
    println!("  Scenario 3 complete.");
    println!();

    Ok(())
}

#[cfg(test)]
mod tests {
    use rxcheck_contracts::{
        prescription::CandidateSource,
        report::{ExtractionStatus, ScoringStatus},
    };

    use super::validate_sample;

    #[test]
    fn test_text_candidates_follow_listed_ones() {
        let report = validate_sample().unwrap();
        let texts: Vec<&str> = report.candidates.iter().map(|c| c.text.as_str()).collect();
        assert_eq!(texts, vec!["Sitagliptin", "metformin", "Gliclazide"]);
        assert_eq!(report.candidates[0].source, CandidateSource::Listed);
        assert_eq!(report.candidates[2].source, CandidateSource::Extracted);
        assert_eq!(report.extraction, ExtractionStatus::Extracted { count: 2 });
    }

    #[test]
    fn test_score_is_capped_by_confidence() {
        let report = validate_sample().unwrap();
        assert_eq!(report.scoring, ScoringStatus::Applied);
        assert_eq!(report.exact_matches.len(), 3);
        assert_eq!(report.correct_meds.len(), 3);
        assert_eq!(report.aggregate_score, 87);
        assert!(report.warnings.is_empty());
    }
}
