//! # rxcheck-ref-clinic
//!
//! Clinic reference runtime for the rxcheck prescription validator.
//!
//! Demonstrates the validator on fictional clinic data:
//!
//! 1. **Spelling Mismatch** — a misspelled listed drug is reported as a fuzzy
//!    match but does not count toward the score.
//! 2. **Unknown Diagnosis** — nothing can be validated without reference data.
//! 3. **Free-Text Extraction** — prescription text is spell-corrected, tagged
//!    as word pieces, reassembled, and scored for appropriateness.
//! 4. **Degraded Collaborators** — a stalled tagger and an offline scorer
//!    leave a usable report with explicit warnings.
//! 5. **Doctor Rating** — a week of prescriptions rolled up per doctor.
//! 6. **Reference Refresh** — new reference data is published while an
//!    older snapshot is still in use.
//!
//! All data is hardcoded and fictional. No external API calls are made.

pub mod collaborators;
pub mod mock_data;
pub mod scenarios;
