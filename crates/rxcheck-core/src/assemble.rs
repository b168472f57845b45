//! Reassembly of sub-word tagged tokens into whole drug-name candidates.

use rxcheck_contracts::{
    error::{RxError, RxResult},
    prescription::TaggedToken,
};

/// Fold a tagged token sequence into whole words.
///
/// A continuation token is appended, marker stripped, to the word before it;
/// any other token starts a new word. Fails with `MalformedTokenSequence`
/// when the first token is a continuation.
pub fn assemble_tokens(tokens: &[TaggedToken]) -> RxResult<Vec<String>> {
    tokens.iter().try_fold(Vec::new(), |mut words: Vec<String>, token| {
        if token.is_continuation {
            match words.last_mut() {
                Some(last) => last.push_str(token.stripped()),
                None => {
                    return Err(RxError::MalformedTokenSequence {
                        token: token.text.clone(),
                    })
                }
            }
        } else {
            words.push(token.stripped().to_string());
        }
        Ok(words)
    })
}
