//! Stand-in tagger and scorer implementations.
//!
//! `LexiconTagger` and `TableScorer` behave like well-trained models on the
//! mock clinic data. `StalledTagger` and `OfflineScorer` behave like models
//! that are deployed but broken, for the degraded-collaborator scenario.

use std::{sync::Arc, thread, time::Duration};

use tracing::debug;

use rxcheck_contracts::{
    error::{RxError, RxResult},
    prescription::{TaggedToken, CONTINUATION_MARKER},
    reference::normalize_key,
};
use rxcheck_core::traits::{AppropriatenessScorer, ReferenceSource, Tagger};

use crate::mock_data::{APPROPRIATENESS, UNKNOWN_PAIR_PROBABILITY};

// ── Lexicon tagger ────────────────────────────────────────────────────────────

/// Tags every word of the text that is a known drug name.
///
/// The lexicon is the current reference vocabulary, read on each call. With
/// `piece_len` set, long names come out as a word-piece sequence
/// (`"metf"`, `"##ormi"`, `"##n"`), the way sub-word NER models emit them.
pub struct LexiconTagger {
    reference: Arc<dyn ReferenceSource>,
    piece_len: Option<usize>,
}

impl LexiconTagger {
    pub fn new(reference: Arc<dyn ReferenceSource>) -> Self {
        Self {
            reference,
            piece_len: None,
        }
    }

    /// Emit names longer than `len` characters as word pieces.
    pub fn with_word_pieces(mut self, len: usize) -> Self {
        self.piece_len = Some(len.max(1));
        self
    }

    fn emit(&self, word: &str, out: &mut Vec<TaggedToken>) {
        let Some(len) = self.piece_len else {
            out.push(TaggedToken::word(word));
            return;
        };
        let chars: Vec<char> = word.chars().collect();
        for (i, piece) in chars.chunks(len).enumerate() {
            let piece: String = piece.iter().collect();
            if i == 0 {
                out.push(TaggedToken::word(piece));
            } else {
                out.push(TaggedToken::continuation(format!("{CONTINUATION_MARKER}{piece}")));
            }
        }
    }
}

impl Tagger for LexiconTagger {
    fn tag(&self, text: &str) -> RxResult<Vec<TaggedToken>> {
        let snapshot = self.reference.snapshot();
        let vocabulary = snapshot.vocabulary();

        let mut tokens = Vec::new();
        for raw in text.split_whitespace() {
            let word = raw.trim_matches(|c: char| !c.is_alphanumeric());
            if !word.is_empty() && vocabulary.contains(word) {
                self.emit(word, &mut tokens);
            }
        }
        debug!(tokens = tokens.len(), "lexicon tagger finished");
        Ok(tokens)
    }
}

// ── Table scorer ──────────────────────────────────────────────────────────────

/// Answers from the fixed `APPROPRIATENESS` table.
///
/// The context starts with the diagnosis, so a table row applies when the
/// normalized context starts with its diagnosis.
#[derive(Debug, Default)]
pub struct TableScorer;

impl AppropriatenessScorer for TableScorer {
    fn score(&self, context: &str, drug: &str) -> RxResult<f64> {
        let context = normalize_key(context);
        let drug = normalize_key(drug);
        let p = APPROPRIATENESS
            .iter()
            .find(|(diagnosis, d, _)| context.starts_with(diagnosis) && *d == drug)
            .map(|(_, _, p)| *p)
            .unwrap_or(UNKNOWN_PAIR_PROBABILITY);
        Ok(p)
    }
}

// ── Broken collaborators ──────────────────────────────────────────────────────

/// A tagger that takes `delay` before answering with nothing.
pub struct StalledTagger {
    pub delay: Duration,
}

impl Tagger for StalledTagger {
    fn tag(&self, _text: &str) -> RxResult<Vec<TaggedToken>> {
        thread::sleep(self.delay);
        Ok(vec![])
    }
}

/// A scorer whose model never loaded.
#[derive(Debug, Default)]
pub struct OfflineScorer;

impl AppropriatenessScorer for OfflineScorer {
    fn score(&self, _context: &str, _drug: &str) -> RxResult<f64> {
        Err(RxError::ScorerUnavailable {
            reason: "model artifact not found".to_string(),
        })
    }
}
