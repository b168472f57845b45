//! # rxcheck-policy
//!
//! TOML loading for the rxcheck validation policy.
//!
//! ## Overview
//!
//! A policy file sets the pipeline's tunable constants: the fuzzy-match
//! threshold, the appropriateness threshold, spelling limits, the reference
//! table layout, and collaborator deadlines. Every key is optional. Values
//! that parse but fall outside their meaningful range are rejected with a
//! `ConfigError` naming each offending key.
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use std::path::Path;
//!
//! let policy = rxcheck_policy::from_file(Path::new("crates/rxcheck-ref-clinic/policies/clinic.toml"))?;
//! // Pass `&policy` to `rxcheck_core::Validator::new(...)`.
//! ```

pub mod engine;
pub mod rule;

pub use engine::{check, from_file, from_toml_str};
pub use rule::{violations, PolicyViolation};

// ── Tests ─────────────────────────────────────────────────────────────────────
