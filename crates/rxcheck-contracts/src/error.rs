//! Error types for the rxcheck validation pipeline.
//!
//! All fallible operations return `RxResult<T>`. Only construction-time
//! failures (`DataLoad`, `ConfigError`) are meant to reach callers of the
//! validator; the remaining variants are recovered inside the pipeline and
//! surface as report status flags and warnings.

use thiserror::Error;

/// The unified error type for rxcheck.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RxError {
    /// The reference table could not be read or is unusable.
    ///
    /// Fatal to reference store construction: the validator must not start
    /// with an empty store in place of a broken one.
    #[error("reference data load failed: {reason}")]
    DataLoad { reason: String },

    /// The tagger emitted a continuation token with nothing to attach it to.
    #[error("malformed token sequence: leading continuation token '{token}'")]
    MalformedTokenSequence { token: String },

    /// The tagging collaborator failed to produce tokens.
    #[error("tagger unavailable: {reason}")]
    TaggerUnavailable { reason: String },

    /// The appropriateness scorer failed or returned an unusable value.
    #[error("appropriateness scorer unavailable: {reason}")]
    ScorerUnavailable { reason: String },

    /// A collaborator call exceeded its deadline.
    #[error("{capability} did not answer within {timeout_ms} ms")]
    Timeout { capability: String, timeout_ms: u64 },

    /// A required configuration value is missing or invalid.
    #[error("configuration error: {reason}")]
    ConfigError { reason: String },

    /// The doctor rating ledger could not record a score.
    #[error("rating ledger write failed: {reason}")]
    RatingWriteFailed { reason: String },
}

/// Convenience alias used throughout the rxcheck crates.
pub type RxResult<T> = Result<T, RxError>;
