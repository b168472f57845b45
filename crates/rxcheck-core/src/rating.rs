//! Doctor rating ledger.
//!
//! Each validated prescription contributes its `aggregate_score` to the
//! prescribing doctor's history. A doctor's rating is the arithmetic mean of
//! every score in that history, recomputed in full on each write so the
//! stored value can never drift from the scores it summarizes.
//!
//! `RatingLedger` keeps history in memory behind a `Mutex`; it is safe to
//! share between threads that validate concurrently.

use std::{
    collections::HashMap,
    sync::{Mutex, MutexGuard},
};

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;

use rxcheck_contracts::{
    error::{RxError, RxResult},
    prescription::{DoctorId, PrescriptionId},
    report::PrescriptionReport,
};

/// Mean of `scores`, or 0 for a doctor with no scored prescriptions.
pub fn doctor_rating(scores: &[u8]) -> f64 {
    if scores.is_empty() {
        return 0.0;
    }
    let total: u64 = scores.iter().map(|&s| u64::from(s)).sum();
    total as f64 / scores.len() as f64
}

/// One scored prescription in a doctor's history.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredPrescription {
    pub id: PrescriptionId,
    pub doctor_id: DoctorId,
    pub score: u8,
    pub recorded_at: DateTime<Utc>,
}

/// In-memory, append-only per-doctor score history.
#[derive(Default)]
pub struct RatingLedger {
    history: Mutex<HashMap<DoctorId, Vec<ScoredPrescription>>>,
}

impl RatingLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `report`'s score to `doctor`'s history and return the new rating.
    pub fn record(&self, doctor: &DoctorId, report: &PrescriptionReport) -> RxResult<f64> {
        let mut history = self.lock()?;
        let entries = history.entry(doctor.clone()).or_default();
        entries.push(ScoredPrescription {
            id: PrescriptionId::new(),
            doctor_id: doctor.clone(),
            score: report.aggregate_score,
            recorded_at: Utc::now(),
        });

        let scores: Vec<u8> = entries.iter().map(|e| e.score).collect();
        let rating = doctor_rating(&scores);

        info!(
            doctor_id = %doctor.0,
            score = report.aggregate_score,
            prescriptions = scores.len(),
            rating,
            "doctor rating updated"
        );

        Ok(rating)
    }

    /// Current rating for `doctor`; 0 when nothing has been recorded.
    pub fn rating(&self, doctor: &DoctorId) -> RxResult<f64> {
        let history = self.lock()?;
        let scores: Vec<u8> = history
            .get(doctor)
            .map(|entries| entries.iter().map(|e| e.score).collect())
            .unwrap_or_default();
        Ok(doctor_rating(&scores))
    }

    /// Every scored prescription for `doctor`, oldest first.
    pub fn history(&self, doctor: &DoctorId) -> RxResult<Vec<ScoredPrescription>> {
        let history = self.lock()?;
        Ok(history.get(doctor).cloned().unwrap_or_default())
    }

    fn lock(&self) -> RxResult<MutexGuard<'_, HashMap<DoctorId, Vec<ScoredPrescription>>>> {
        self.history.lock().map_err(|e| RxError::RatingWriteFailed {
            reason: format!("rating ledger lock poisoned: {}", e),
        })
    }
}

#[cfg(test)]
mod tests {
    use std::{sync::Arc, thread};

    use rxcheck_contracts::{
        prescription::DoctorId,
        report::{ExtractionStatus, PrescriptionReport, ScoringStatus},
    };

    use super::{doctor_rating, RatingLedger};

    fn report_with_score(score: u8) -> PrescriptionReport {
        PrescriptionReport {
            diagnosis: "asthma".to_string(),
            diagnosis_known: true,
            extraction: ExtractionStatus::NotRequested,
            scoring: ScoringStatus::NotConfigured,
            candidates: vec![],
            outcomes: vec![],
            exact_matches: vec![],
            fuzzy_matches: vec![],
            unmatched: vec![],
            correct_meds: vec![],
            incorrect_meds: vec![],
            essential_meds: vec![],
            non_essential_meds: vec![],
            confidence: vec![],
            aggregate_score: score,
            warnings: vec![],
        }
    }

    fn doctor(name: &str) -> DoctorId {
        DoctorId(name.to_string())
    }

    #[test]
    fn rating_is_mean_of_scores() {
        assert_eq!(doctor_rating(&[100, 50, 0]), 50.0);
        assert_eq!(doctor_rating(&[85]), 85.0);
        assert_eq!(doctor_rating(&[]), 0.0);
    }

    #[test]
    fn record_recomputes_from_full_history() {
        let ledger = RatingLedger::new();
        let dr = doctor("dr-okafor");

        assert_eq!(ledger.record(&dr, &report_with_score(100)).unwrap(), 100.0);
        assert_eq!(ledger.record(&dr, &report_with_score(0)).unwrap(), 50.0);
        assert_eq!(ledger.record(&dr, &report_with_score(50)).unwrap(), 50.0);
        assert_eq!(ledger.rating(&dr).unwrap(), 50.0);

        let history = ledger.history(&dr).unwrap();
        assert_eq!(history.len(), 3);
        assert_eq!(
            history.iter().map(|h| h.score).collect::<Vec<_>>(),
            vec![100, 0, 50]
        );
        assert!(history.iter().all(|h| h.doctor_id == dr));
        assert_ne!(history[0].id, history[1].id);
    }

    #[test]
    fn doctors_are_rated_independently() {
        let ledger = RatingLedger::new();
        ledger.record(&doctor("a"), &report_with_score(100)).unwrap();
        ledger.record(&doctor("b"), &report_with_score(20)).unwrap();

        assert_eq!(ledger.rating(&doctor("a")).unwrap(), 100.0);
        assert_eq!(ledger.rating(&doctor("b")).unwrap(), 20.0);
    }

    #[test]
    fn unknown_doctor_rates_zero_with_empty_history() {
        let ledger = RatingLedger::new();
        assert_eq!(ledger.rating(&doctor("nobody")).unwrap(), 0.0);
        assert!(ledger.history(&doctor("nobody")).unwrap().is_empty());
    }

    #[test]
    fn concurrent_records_are_all_kept() {
        let ledger = Arc::new(RatingLedger::new());
        let dr = doctor("dr-shared");
        let handles: Vec<_> = (0..10)
            .map(|i| {
                let ledger = Arc::clone(&ledger);
                let dr = dr.clone();
                thread::spawn(move || {
                    let score = if i % 2 == 0 { 100 } else { 0 };
                    ledger.record(&dr, &report_with_score(score)).unwrap();
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }

        assert_eq!(ledger.history(&dr).unwrap().len(), 10);
        assert_eq!(ledger.rating(&dr).unwrap(), 50.0);
    }
}
