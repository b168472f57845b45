//! # rxcheck-core
//!
//! The deterministic prescription validation pipeline.
//!
//! This crate provides:
//! - The collaborator traits (`ReferenceSource`, `Tagger`, `AppropriatenessScorer`)
//! - The pipeline stages: spelling normalization, token assembly,
//!   reconciliation, and score aggregation
//! - The `Validator` that runs them in order for one prescription
//! - The `RatingLedger` that turns prescription scores into doctor ratings
//!
//! ## Usage
//!
//! ```rust,ignore
//! use rxcheck_core::{Validator, traits::{ReferenceSource, Tagger, AppropriatenessScorer}};
//! ```

pub mod aggregate;
pub mod assemble;
pub mod boundary;
pub mod rating;
pub mod reconcile;
pub mod spelling;
pub mod traits;
pub mod validator;

pub use rating::RatingLedger;
pub use validator::Validator;
