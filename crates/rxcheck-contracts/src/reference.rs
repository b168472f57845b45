//! Reference data model: diagnosis → sanctioned drugs, and the drug vocabulary.
//!
//! A `ReferenceStore` is built once from tabular input and never mutated
//! afterwards. Refreshing reference data means building a new store and
//! publishing it in place of the old one; see `rxcheck-reference`.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

/// Normalize a diagnosis or drug name for comparison: trimmed and case-folded.
pub fn normalize_key(s: &str) -> String {
    s.trim().to_lowercase()
}

/// The reference drugs sanctioned for one diagnosis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceEntry {
    /// Diagnosis name as it appeared in the source table.
    pub diagnosis: String,
    /// Drug names in source order, display casing preserved.
    pub drugs: Vec<String>,
}

impl ReferenceEntry {
    /// Build an entry, trimming names and dropping empty or repeated drugs.
    ///
    /// Repeats are detected case-insensitively; the first spelling is kept.
    pub fn new<I, S>(diagnosis: impl Into<String>, drugs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut seen = HashSet::new();
        let drugs = drugs
            .into_iter()
            .map(|d| d.as_ref().trim().to_string())
            .filter(|d| !d.is_empty())
            .filter(|d| seen.insert(normalize_key(d)))
            .collect();
        Self {
            diagnosis: diagnosis.into().trim().to_string(),
            drugs,
        }
    }

    /// The normalized lookup key for this entry.
    pub fn key(&self) -> String {
        normalize_key(&self.diagnosis)
    }
}

/// Every known drug name, case-folded, in first-seen order.
///
/// The order is kept so that spelling corrections resolve ties the same way
/// on every run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Vocabulary {
    terms: Vec<String>,
    index: HashSet<String>,
}

impl Vocabulary {
    /// Build a vocabulary from drug names. Duplicates are ignored.
    pub fn from_terms<I, S>(terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut vocab = Self::default();
        for term in terms {
            let folded = normalize_key(term.as_ref());
            if !folded.is_empty() && vocab.index.insert(folded.clone()) {
                vocab.terms.push(folded);
            }
        }
        vocab
    }

    /// Return true if `word` (compared case-insensitively) is a known drug name.
    pub fn contains(&self, word: &str) -> bool {
        self.index.contains(&normalize_key(word))
    }

    /// Iterate the case-folded terms in first-seen order.
    pub fn terms(&self) -> impl Iterator<Item = &str> {
        self.terms.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}

/// Immutable mapping from normalized diagnosis to its reference entry.
#[derive(Debug, Clone, Default)]
pub struct ReferenceStore {
    entries: HashMap<String, ReferenceEntry>,
    order: Vec<String>,
    vocabulary: Vocabulary,
}

impl ReferenceStore {
    /// Build a store from entries in source order.
    ///
    /// When two entries share a normalized diagnosis the first one wins.
    /// Loaders that want to report duplicates should check `key()` before
    /// handing entries over.
    pub fn from_entries(entries: impl IntoIterator<Item = ReferenceEntry>) -> Self {
        let mut map = HashMap::new();
        let mut order = Vec::new();
        for entry in entries {
            let key = entry.key();
            if key.is_empty() || map.contains_key(&key) {
                continue;
            }
            order.push(key.clone());
            map.insert(key, entry);
        }

        let vocabulary = Vocabulary::from_terms(
            order
                .iter()
                .filter_map(|k| map.get(k))
                .flat_map(|e: &ReferenceEntry| e.drugs.iter()),
        );

        Self {
            entries: map,
            order,
            vocabulary,
        }
    }

    /// Reference drugs for `diagnosis`, matched trimmed and case-insensitively.
    ///
    /// An unknown diagnosis yields an empty slice, not an error.
    pub fn lookup(&self, diagnosis: &str) -> &[String] {
        self.entry(diagnosis)
            .map(|e| e.drugs.as_slice())
            .unwrap_or(&[])
    }

    /// The full entry for `diagnosis`, if known.
    pub fn entry(&self, diagnosis: &str) -> Option<&ReferenceEntry> {
        self.entries.get(&normalize_key(diagnosis))
    }

    pub fn contains_diagnosis(&self, diagnosis: &str) -> bool {
        self.entry(diagnosis).is_some()
    }

    /// Entries in source order.
    pub fn entries(&self) -> impl Iterator<Item = &ReferenceEntry> {
        self.order.iter().filter_map(|k| self.entries.get(k))
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
