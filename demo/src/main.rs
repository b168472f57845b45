//! rxcheck Clinic Reference Runtime — Demo CLI
//!
//! Runs the clinic demo scenarios, or validates a single prescription given
//! on the command line.  Scenarios use real rxcheck components (reference
//! store, policy loader, validator, rating ledger) wired together with mock
//! clinic data.
//!
//! Usage:
//!   cargo run -p demo -- run-all
//!   cargo run -p demo -- spelling-mismatch
//!   cargo run -p demo -- validate --diagnosis Asthma --medications Budeosonid,Salbutamol
//!   cargo run -p demo -- validate --reference table.csv --policy policy.toml \
//!       --diagnosis "Type 2 diabetes" --text "Metforminn 500 mg" --mock-models --json

use std::{path::PathBuf, sync::Arc};

use clap::{Args, Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use rxcheck_contracts::{
    error::{RxError, RxResult},
    prescription::PrescriptionRequest,
    reference::ReferenceStore,
};
use rxcheck_core::{traits::ReferenceSource, Validator};
use rxcheck_ref_clinic::{
    collaborators::{LexiconTagger, TableScorer},
    mock_data,
    scenarios::{
        degraded_collaborators, doctor_rating, free_text, print_report, reference_refresh,
        spelling_mismatch, unknown_diagnosis,
    },
};

// ── CLI definition ────────────────────────────────────────────────────────────

/// rxcheck — prescription validation against clinical reference data.
///
/// Each scenario subcommand runs one demo; `validate` checks one prescription.
#[derive(Parser)]
#[command(
    name = "rxcheck",
    about = "rxcheck prescription validator demo",
    long_about = "Runs rxcheck clinic demo scenarios showing drug-name reconciliation,\n\
                  free-text extraction, appropriateness scoring, and doctor ratings."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    #[command(flatten)]
    Scenario(Scenario),
    /// Validate one prescription.
    Validate(ValidateArgs),
}

#[derive(Subcommand)]
enum Scenario {
    /// Run all six clinic scenarios in sequence.
    RunAll,
    /// Scenario 1: Spelling Mismatch (fuzzy match that does not count).
    SpellingMismatch,
    /// Scenario 2: Unknown Diagnosis (nothing to validate against).
    UnknownDiagnosis,
    /// Scenario 3: Free-Text Extraction (spelling, word pieces, scoring).
    FreeText,
    /// Scenario 4: Degraded Collaborators (timeout and offline model).
    DegradedCollaborators,
    /// Scenario 5: Doctor Rating (mean score per doctor).
    DoctorRating,
    /// Scenario 6: Reference Refresh (publish while a snapshot is held).
    ReferenceRefresh,
}

#[derive(Args)]
struct ValidateArgs {
    /// Reference table CSV. Defaults to the embedded clinic table.
    #[arg(long)]
    reference: Option<PathBuf>,
    /// Validation policy TOML. Defaults to the embedded clinic policy.
    #[arg(long)]
    policy: Option<PathBuf>,
    /// Diagnosis to validate against.
    #[arg(long)]
    diagnosis: String,
    /// Comma-separated medication list.
    #[arg(long, value_delimiter = ',')]
    medications: Vec<String>,
    /// Free prescription text to extract further drugs from.
    #[arg(long)]
    text: Option<String>,
    /// Symptoms passed to the appropriateness model with the diagnosis.
    #[arg(long)]
    symptoms: Option<String>,
    /// Attach the clinic's mock tagger and appropriateness model.
    #[arg(long)]
    mock_models: bool,
    /// Print the report as JSON.
    #[arg(long)]
    json: bool,
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() {
    // Initialize structured logging.  Set RUST_LOG=debug for verbose output.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .compact()
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Command::Validate(args) => run_validate(args),
        Command::Scenario(scenario) => {
            print_banner();
            let result = run_scenario(scenario);
            if result.is_ok() {
                println!("All selected scenarios completed successfully.");
            }
            result
        }
    };

    if let Err(e) = result {
        eprintln!("rxcheck error: {}", e);
        std::process::exit(1);
    }
}

// ── Scenario dispatch ─────────────────────────────────────────────────────────

fn run_scenario(scenario: Scenario) -> RxResult<()> {
    match scenario {
        Scenario::RunAll => run_all(),
        Scenario::SpellingMismatch => spelling_mismatch::run_scenario(),
        Scenario::UnknownDiagnosis => unknown_diagnosis::run_scenario(),
        Scenario::FreeText => free_text::run_scenario(),
        Scenario::DegradedCollaborators => degraded_collaborators::run_scenario(),
        Scenario::DoctorRating => doctor_rating::run_scenario(),
        Scenario::ReferenceRefresh => reference_refresh::run_scenario(),
    }
}

fn run_all() -> RxResult<()> {
    spelling_mismatch::run_scenario()?;
    unknown_diagnosis::run_scenario()?;
    free_text::run_scenario()?;
    degraded_collaborators::run_scenario()?;
    doctor_rating::run_scenario()?;
    reference_refresh::run_scenario()?;
    Ok(())
}

// ── Single validation ─────────────────────────────────────────────────────────

fn run_validate(args: ValidateArgs) -> RxResult<()> {
    let policy = match &args.policy {
        Some(path) => rxcheck_policy::from_file(path)?,
        None => mock_data::clinic_policy()?,
    };
    let store: ReferenceStore = match &args.reference {
        Some(path) => rxcheck_reference::from_path(path, &policy.reference)?,
        None => rxcheck_reference::load_csv_str(mock_data::REFERENCE_CSV, &policy.reference)?,
    };
    info!(diagnoses = store.len(), "reference ready");

    let reference: Arc<dyn ReferenceSource> = Arc::new(Arc::new(store));
    let mut validator = Validator::new(Arc::clone(&reference), &policy);
    if args.mock_models {
        validator = validator
            .with_tagger(Arc::new(LexiconTagger::new(reference)))
            .with_scorer(Arc::new(TableScorer));
    }

    let request = PrescriptionRequest {
        diagnosis: args.diagnosis,
        symptoms: args.symptoms,
        medications: args.medications,
        raw_text: args.text,
    };
    let report = validator.validate(&request);

    if args.json {
        let json = serde_json::to_string_pretty(&report).map_err(|e| RxError::ConfigError {
            reason: format!("failed to serialize report: {}", e),
        })?;
        println!("{}", json);
    } else {
        println!();
        print_report(&report);
        println!();
    }
    Ok(())
}

// ── Banner ────────────────────────────────────────────────────────────────────

fn print_banner() {
    println!();
    println!("rxcheck — Prescription Validation");
    println!("Clinic Reference Demo");
    println!("=================================");
    println!();
    println!("rxcheck pipeline per prescription:");
    println!("  [1] Reference snapshot: diagnosis → recommended drugs");
    println!("  [2] Free text spell-corrected against the drug vocabulary, then tagged");
    println!("  [3] Word pieces reassembled into drug names");
    println!("  [4] Every drug reconciled: Exact / FuzzyMatch (≥ threshold) / NoMatch");
    println!("  [5] Appropriateness model scores each drug (if configured)");
    println!("  [6] Score = correct / total, capped by mean confidence");
    println!();
}
