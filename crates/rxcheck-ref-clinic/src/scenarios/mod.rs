//! Clinic reference runtime demo scenarios.
//!
//! Each scenario is a self-contained module that wires up real rxcheck
//! components (reference store, policy, validator, rating ledger) with mock
//! clinic data and demonstrates one behavior of the pipeline.

use rxcheck_contracts::{
    outcome::MatchOutcome,
    report::{ExtractionStatus, PrescriptionReport, ScoringStatus},
};

pub mod degraded_collaborators;
pub mod doctor_rating;
pub mod free_text;
pub mod reference_refresh;
pub mod spelling_mismatch;
pub mod unknown_diagnosis;

/// Print a report the way every scenario and the CLI show it.
pub fn print_report(report: &PrescriptionReport) {
    println!(
        "  Diagnosis:              {} ({})",
        report.diagnosis,
        if report.diagnosis_known { "known" } else { "NOT IN REFERENCE" }
    );
    println!("  Essential medications:  {}", list(&report.essential_meds));

    for (candidate, outcome) in report.candidates.iter().zip(&report.outcomes) {
        let verdict = match outcome {
            MatchOutcome::Exact { .. } => "exact".to_string(),
            MatchOutcome::FuzzyMatch(m) => {
                format!("fuzzy → {} ({:.0})", m.matched_reference, m.similarity_score)
            }
            MatchOutcome::NoMatch { .. } => "no match".to_string(),
        };
        println!(
            "    [{}] {:<20} {:?}, {}",
            candidate.position, candidate.text, candidate.source, verdict
        );
    }

    match &report.extraction {
        ExtractionStatus::NotRequested => {}
        ExtractionStatus::Extracted { count } => {
            println!("  Free-text extraction:   {} candidate(s)", count)
        }
        ExtractionStatus::Malformed => println!("  Free-text extraction:   MALFORMED (discarded)"),
        ExtractionStatus::Unavailable { reason } => {
            println!("  Free-text extraction:   UNAVAILABLE ({})", reason)
        }
    }
    match &report.scoring {
        ScoringStatus::NotConfigured => println!("  Appropriateness model:  not configured"),
        ScoringStatus::Applied => {
            for c in &report.confidence {
                println!("    p({}) = {:.2}", c.medication, c.probability);
            }
        }
        ScoringStatus::Unavailable { reason } => {
            println!("  Appropriateness model:  UNAVAILABLE ({})", reason)
        }
    }

    println!("  Correct:                {}", list(&report.correct_meds));
    println!("  Incorrect:              {}", list(&report.incorrect_meds));
    println!("  Non-essential:          {}", list(&report.non_essential_meds));
    println!("  Prescription score:     {}/100", report.aggregate_score);
    for w in &report.warnings {
        println!("  WARNING: {}", w);
    }
}

fn list(items: &[String]) -> String {
    if items.is_empty() {
        "-".to_string()
    } else {
        items.join(", ")
    }
}
