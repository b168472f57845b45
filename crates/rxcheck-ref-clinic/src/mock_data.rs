//! Simulated clinic data for the rxcheck reference runtime.
//!
//! All data in this module is hardcoded and fictional. No external systems are
//! contacted. The reference table stands in for the clinic's guideline
//! database, and the probability table stands in for a trained
//! appropriateness model.

use rxcheck_contracts::{
    error::RxResult,
    policy::{ReferenceTableLayout, ValidationPolicy},
    prescription::{DoctorId, PrescriptionRequest},
    reference::ReferenceStore,
};

// ── Embedded files ────────────────────────────────────────────────────────────

/// Diagnosis → recommended drugs, in the default table layout.
pub const REFERENCE_CSV: &str = include_str!("../data/reference.csv");

/// The clinic's validation policy.
pub const CLINIC_POLICY: &str = include_str!("../policies/clinic.toml");

/// Load the embedded reference table.
pub fn reference_store() -> RxResult<ReferenceStore> {
    rxcheck_reference::load_csv_str(REFERENCE_CSV, &ReferenceTableLayout::default())
}

/// Load the embedded clinic policy.
pub fn clinic_policy() -> RxResult<ValidationPolicy> {
    rxcheck_policy::from_toml_str(CLINIC_POLICY)
}

// ── Appropriateness model (mock) ──────────────────────────────────────────────

/// Probability that a drug is appropriate for a diagnosis.
///
/// Includes a few drugs outside the reference table that are still
/// reasonable choices (Montelukast for asthma), so the scorer can rescue
/// them, and a few that are clearly wrong.
pub const APPROPRIATENESS: &[(&str, &str, f64)] = &[
    ("asthma", "budesonide", 0.91),
    ("asthma", "salbutamol", 0.95),
    ("asthma", "montelukast", 0.78),
    ("asthma", "propranolol", 0.02),
    ("type 2 diabetes", "metformin", 0.93),
    ("type 2 diabetes", "gliclazide", 0.88),
    ("type 2 diabetes", "sitagliptin", 0.81),
    ("type 2 diabetes", "prednisolone", 0.04),
    ("hypertension", "amlodipine", 0.90),
    ("hypertension", "lisinopril", 0.88),
    ("hypertension", "hydrochlorothiazide", 0.84),
    ("hypertension", "ibuprofen", 0.06),
    ("migraine", "sumatriptan", 0.92),
    ("migraine", "ibuprofen", 0.80),
    ("migraine", "paracetamol", 0.76),
];

/// Probability returned for any pair not in `APPROPRIATENESS`.
pub const UNKNOWN_PAIR_PROBABILITY: f64 = 0.10;

// ── Sample prescriptions ──────────────────────────────────────────────────────

/// A fictional prescription used by the scenarios.
#[derive(Debug, Clone)]
pub struct SamplePrescription {
    pub doctor: &'static str,
    pub diagnosis: &'static str,
    pub symptoms: Option<&'static str>,
    pub medications: &'static [&'static str],
    pub raw_text: Option<&'static str>,
}

impl SamplePrescription {
    pub fn doctor_id(&self) -> DoctorId {
        DoctorId(self.doctor.to_string())
    }

    pub fn to_request(&self) -> PrescriptionRequest {
        PrescriptionRequest {
            diagnosis: self.diagnosis.to_string(),
            symptoms: self.symptoms.map(str::to_string),
            medications: self.medications.iter().map(|m| m.to_string()).collect(),
            raw_text: self.raw_text.map(str::to_string),
        }
    }
}

/// A week of prescriptions from two doctors, for the rating scenario.
pub fn weekly_prescriptions() -> Vec<SamplePrescription> {
    vec![
        SamplePrescription {
            doctor: "dr-a-rivera",
            diagnosis: "Asthma",
            symptoms: Some("wheezing, night cough"),
            medications: &["Budesonide", "Salbutamol"],
            raw_text: None,
        },
        SamplePrescription {
            doctor: "dr-a-rivera",
            diagnosis: "Hypertension",
            symptoms: None,
            medications: &["Amlodipine"],
            raw_text: Some("Lisinoprill 10 mg once daily"),
        },
        SamplePrescription {
            doctor: "dr-a-rivera",
            diagnosis: "Migraine",
            symptoms: Some("photophobia"),
            medications: &["Sumatriptan", "Codeine"],
            raw_text: None,
        },
        SamplePrescription {
            doctor: "dr-k-osei",
            diagnosis: "Type 2 diabetes",
            symptoms: None,
            medications: &["Prednisolone"],
            raw_text: None,
        },
        SamplePrescription {
            doctor: "dr-k-osei",
            diagnosis: "Asthma",
            symptoms: None,
            medications: &["Propranolol", "Salbutamol"],
            raw_text: None,
        },
    ]
}
