//! The rxcheck validator: the prescription reconciliation pipeline.
//!
//! The validator runs one prescription through:
//!
//!   Snapshot → Spelling → Tagging → Assembly → Reconcile → Score → Report
//!
//! Every step after the snapshot is a pure in-memory transformation except
//! the tagger and scorer calls, which run under deadlines. Collaborator
//! problems never fail a validation: they are recorded as report status and
//! warnings, and the pipeline continues with what it has.

use std::sync::Arc;

use tracing::{debug, info, warn};

use rxcheck_contracts::{
    error::{RxError, RxResult},
    outcome::MatchOutcome,
    policy::{CollaboratorPolicy, ValidationPolicy},
    prescription::{Candidate, CandidateSource, PrescriptionRequest},
    reference::ReferenceStore,
    report::{ExtractionStatus, PrescriptionReport, ScoringStatus},
};

use crate::{
    aggregate::Aggregator,
    assemble::assemble_tokens,
    boundary::{call_with_deadline, Collaborator},
    reconcile::Reconciler,
    spelling::SpellingNormalizer,
    traits::{AppropriatenessScorer, ReferenceSource, Tagger},
};

/// Validates prescriptions against the current reference snapshot.
///
/// A validator is shared across requests and threads. It holds no
/// per-request state; each call takes its own snapshot and builds its report
/// from scratch.
pub struct Validator {
    reference: Arc<dyn ReferenceSource>,
    tagger: Option<Arc<dyn Tagger>>,
    scorer: Option<Arc<dyn AppropriatenessScorer>>,
    normalizer: SpellingNormalizer,
    reconciler: Reconciler,
    aggregator: Aggregator,
    collaborators: CollaboratorPolicy,
}

impl Validator {
    /// Create a validator with no tagger and no scorer.
    pub fn new(reference: Arc<dyn ReferenceSource>, policy: &ValidationPolicy) -> Self {
        Self {
            reference,
            tagger: None,
            scorer: None,
            normalizer: SpellingNormalizer::new(policy.spelling.clone()),
            reconciler: Reconciler::new(&policy.matching),
            aggregator: Aggregator::new(policy.scoring.clone()),
            collaborators: policy.collaborators.clone(),
        }
    }

    /// Use `tagger` to extract drug names from raw prescription text.
    pub fn with_tagger(mut self, tagger: Arc<dyn Tagger>) -> Self {
        self.tagger = Some(tagger);
        self
    }

    /// Use `scorer` for appropriateness probabilities.
    pub fn with_scorer(mut self, scorer: Arc<dyn AppropriatenessScorer>) -> Self {
        self.scorer = Some(scorer);
        self
    }

    /// Validate a diagnosis, a medication list, and optional free text.
    pub fn validate_prescription(
        &self,
        diagnosis: &str,
        medications: &[String],
        raw_text: Option<&str>,
    ) -> PrescriptionReport {
        let request = PrescriptionRequest {
            diagnosis: diagnosis.to_string(),
            symptoms: None,
            medications: medications.to_vec(),
            raw_text: raw_text.map(str::to_string),
        };
        self.validate(&request)
    }

    /// Run the full pipeline for one request.
    ///
    /// # Pipeline
    ///
    /// 1. Take the current reference snapshot and look up the diagnosis
    /// 2. Keep listed medications as written (trimmed, blanks dropped)
    /// 3. Spell-correct the raw text, tag it, and assemble extracted names
    /// 4. Reconcile every candidate against the reference list
    /// 5. Ask the scorer for probabilities, if one is configured
    /// 6. Aggregate into correctness lists and the prescription score
    pub fn validate(&self, request: &PrescriptionRequest) -> PrescriptionReport {
        // ── Step 1: Reference snapshot ───────────────────────────────────────
        //
        // Held for the whole request; a concurrent publish does not affect it.
        let snapshot = self.reference.snapshot();
        let diagnosis_known = snapshot.contains_diagnosis(&request.diagnosis);
        let reference = snapshot.lookup(&request.diagnosis).to_vec();

        debug!(
            diagnosis = %request.diagnosis,
            diagnosis_known,
            reference_drugs = reference.len(),
            "validation starting"
        );

        let mut warnings = Vec::new();

        // ── Step 2: Listed medications ───────────────────────────────────────
        let mut candidates: Vec<Candidate> = Vec::new();
        for med in &request.medications {
            push_candidate(&mut candidates, med, CandidateSource::Listed);
        }

        // ── Step 3: Free-text extraction ─────────────────────────────────────
        let extraction = match request.raw_text.as_deref().map(str::trim) {
            Some(text) if !text.is_empty() => {
                self.extract(text, &snapshot, &mut candidates, &mut warnings)
            }
            _ => ExtractionStatus::NotRequested,
        };

        // ── Step 4: Reconciliation ───────────────────────────────────────────
        let texts: Vec<&str> = candidates.iter().map(|c| c.text.as_str()).collect();
        let outcomes = self.reconciler.reconcile(&texts, &reference);

        // ── Step 5: Appropriateness scoring ──────────────────────────────────
        let (scoring, probabilities) = self.score(request, &candidates, &mut warnings);

        // ── Step 6: Aggregation ──────────────────────────────────────────────
        let summary = self
            .aggregator
            .aggregate(&outcomes, probabilities.as_deref(), &reference);

        let mut exact_matches = Vec::new();
        let mut fuzzy_matches = Vec::new();
        let mut unmatched = Vec::new();
        for outcome in &outcomes {
            match outcome {
                MatchOutcome::Exact { drug } => exact_matches.push(drug.clone()),
                MatchOutcome::FuzzyMatch(m) => fuzzy_matches.push(m.clone()),
                MatchOutcome::NoMatch { candidate } => unmatched.push(candidate.clone()),
            }
        }

        info!(
            diagnosis = %request.diagnosis,
            candidates = candidates.len(),
            exact = exact_matches.len(),
            fuzzy = fuzzy_matches.len(),
            unmatched = unmatched.len(),
            score = summary.aggregate_score,
            "prescription validated"
        );

        PrescriptionReport {
            diagnosis: request.diagnosis.clone(),
            diagnosis_known,
            extraction,
            scoring,
            candidates,
            outcomes,
            exact_matches,
            fuzzy_matches,
            unmatched,
            correct_meds: summary.correct_meds,
            incorrect_meds: summary.incorrect_meds,
            essential_meds: summary.essential_meds,
            non_essential_meds: summary.non_essential_meds,
            confidence: summary.confidence,
            aggregate_score: summary.aggregate_score,
            warnings,
        }
    }

    /// Spell-correct, tag, and assemble `text`, appending extracted candidates.
    fn extract(
        &self,
        text: &str,
        snapshot: &ReferenceStore,
        candidates: &mut Vec<Candidate>,
        warnings: &mut Vec<String>,
    ) -> ExtractionStatus {
        let Some(tagger) = self.tagger.as_ref().map(Arc::clone) else {
            let reason = "no tagger configured".to_string();
            warn!(%reason, "raw prescription text ignored");
            warnings.push(format!("free-text extraction skipped: {reason}"));
            return ExtractionStatus::Unavailable { reason };
        };

        let corrected = self.normalizer.normalize(text, snapshot.vocabulary());
        debug!(corrected = %corrected, "prescription text normalized");

        let tagged = call_with_deadline(Collaborator::Tagger, self.collaborators.tagger_timeout(), move || {
            tagger.tag(&corrected)
        });

        let tokens = match tagged {
            Ok(tokens) => tokens,
            Err(e) => {
                warn!(error = %e, "tagger failed; no candidates extracted");
                warnings.push(format!("free-text extraction failed: {e}"));
                return ExtractionStatus::Unavailable { reason: e.to_string() };
            }
        };

        match assemble_tokens(&tokens) {
            Ok(words) => {
                let before = candidates.len();
                for word in &words {
                    push_candidate(candidates, word, CandidateSource::Extracted);
                }
                ExtractionStatus::Extracted {
                    count: candidates.len() - before,
                }
            }
            Err(e) => {
                warn!(error = %e, "discarding malformed tagger output");
                warnings.push(format!("free-text extraction discarded: {e}"));
                ExtractionStatus::Malformed
            }
        }
    }

    /// Collect one probability per candidate, or none at all.
    ///
    /// A single failed or out-of-range answer discards the whole set so the
    /// score never mixes probability-backed and exact-only judgments.
    fn score(
        &self,
        request: &PrescriptionRequest,
        candidates: &[Candidate],
        warnings: &mut Vec<String>,
    ) -> (ScoringStatus, Option<Vec<f64>>) {
        let Some(scorer) = self.scorer.as_ref() else {
            return (ScoringStatus::NotConfigured, None);
        };

        let context = request.scoring_context();
        let mut probabilities = Vec::with_capacity(candidates.len());
        for candidate in candidates {
            match self.score_one(scorer, &context, &candidate.text) {
                Ok(p) => probabilities.push(p),
                Err(e) => {
                    warn!(
                        medication = %candidate.text,
                        error = %e,
                        "scorer failed; falling back to exact-match scoring"
                    );
                    warnings.push(format!("appropriateness scoring skipped: {e}"));
                    return (ScoringStatus::Unavailable { reason: e.to_string() }, None);
                }
            }
        }

        (ScoringStatus::Applied, Some(probabilities))
    }

    fn score_one(
        &self,
        scorer: &Arc<dyn AppropriatenessScorer>,
        context: &str,
        drug: &str,
    ) -> RxResult<f64> {
        let scorer = Arc::clone(scorer);
        let context = context.to_string();
        let drug_owned = drug.to_string();
        let p = call_with_deadline(Collaborator::Scorer, self.collaborators.scorer_timeout(), move || {
            scorer.score(&context, &drug_owned)
        })?;

        if !(0.0..=1.0).contains(&p) {
            return Err(RxError::ScorerUnavailable {
                reason: format!("probability {p} for '{drug}' is outside [0, 1]"),
            });
        }
        Ok(p)
    }
}

fn push_candidate(candidates: &mut Vec<Candidate>, text: &str, source: CandidateSource) {
    let text = text.trim();
    if text.is_empty() {
        return;
    }
    candidates.push(Candidate {
        text: text.to_string(),
        position: candidates.len(),
        source,
    });
}

// ── Tests ────────────────────────────────────────────────────────────────────
