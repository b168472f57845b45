//! Collaborator trait definitions for the rxcheck pipeline.
//!
//! These three traits are the whole boundary between the validator and the
//! outside world:
//!
//! - `ReferenceSource`       — hands out immutable reference snapshots
//! - `Tagger`                — finds drug-name tokens in free text
//! - `AppropriatenessScorer` — estimates how well a drug fits a diagnosis
//!
//! Taggers and scorers are untrusted in the sense that they are probabilistic
//! and may fail or hang; the validator calls them under a deadline and
//! degrades instead of failing the request.

use std::sync::Arc;

use rxcheck_contracts::{error::RxResult, prescription::TaggedToken, reference::ReferenceStore};

/// Source of the reference snapshot a validation runs against.
///
/// Implementations must never mutate a snapshot once handed out. Publishing
/// new data means swapping in a new `Arc`; callers holding the old one keep
/// using it until they drop it.
pub trait ReferenceSource: Send + Sync {
    /// The current snapshot. Cheap; called once per validation.
    fn snapshot(&self) -> Arc<ReferenceStore>;
}

/// A fixed snapshot is its own source.
impl ReferenceSource for Arc<ReferenceStore> {
    fn snapshot(&self) -> Arc<ReferenceStore> {
        Arc::clone(self)
    }
}

/// A named-entity tagger that picks drug-name tokens out of text.
///
/// Implementations must follow the continuation convention: a token with
/// `is_continuation = true` extends the token before it. A sequence may not
/// start with a continuation token.
pub trait Tagger: Send + Sync {
    /// Tag `text`, returning drug-name tokens in text order.
    fn tag(&self, text: &str) -> RxResult<Vec<TaggedToken>>;
}

/// A trained binary classifier judging drug appropriateness.
///
/// Only the predict-probability contract matters here; how the model was
/// built is outside the pipeline.
pub trait AppropriatenessScorer: Send + Sync {
    /// Probability in `[0, 1]` that `drug` is appropriate given `context`
    /// (the diagnosis, followed by symptoms when known).
    fn score(&self, context: &str, drug: &str) -> RxResult<f64>;
}
