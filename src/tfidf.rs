//! TF-IDF term space shared between a query and its candidate documents.
//!
//! A [`TermSpace`] is fitted fresh for every ranking call. IDF weights are
//! relative to the exact corpus they were fitted over (the query counts as
//! one corpus document), so adding or removing a single document
//! legitimately changes every score. Never cache a fitted space across
//! calls.

use std::collections::{HashMap, HashSet};

use crate::tokenizer::tokenize;

/// Vocabulary and inverse document frequency weights fitted over one corpus.
pub struct TermSpace {
    vocabulary: HashMap<String, usize>,
    idf: Vec<f32>,
}

impl TermSpace {
    /// Fit a term space over a corpus of already-normalized texts.
    ///
    /// Vocabulary indices follow first-seen order. IDF uses the smoothed
    /// formula `ln((1 + n) / (1 + df)) + 1`, which keeps every weight
    /// strictly positive, even for terms present in all documents.
    pub fn fit<'a, I>(corpus: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut vocabulary: HashMap<String, usize> = HashMap::new();
        let mut document_frequency: Vec<u32> = Vec::new();
        let mut document_count: u32 = 0;

        for text in corpus {
            document_count += 1;
            let mut seen: HashSet<usize> = HashSet::new();
            for token in tokenize(text) {
                let next = vocabulary.len();
                let index = *vocabulary.entry(token).or_insert(next);
                if index == document_frequency.len() {
                    document_frequency.push(0);
                }
                if seen.insert(index) {
                    document_frequency[index] += 1;
                }
            }
        }

        let n = document_count as f32;
        let idf = document_frequency
            .iter()
            .map(|&df| ((1.0 + n) / (1.0 + df as f32)).ln() + 1.0)
            .collect();

        Self { vocabulary, idf }
    }

    /// Number of distinct terms in the fitted vocabulary.
    pub fn len(&self) -> usize {
        self.vocabulary.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vocabulary.is_empty()
    }

    /// IDF weight of a term, if it is in the vocabulary.
    pub fn idf(&self, term: &str) -> Option<f32> {
        self.vocabulary.get(term).map(|&index| self.idf[index])
    }

    /// Raw `tf * idf` vector for `text` in this space.
    ///
    /// Term frequency is the plain occurrence count. Terms outside the
    /// fitted vocabulary are ignored; a text with no in-vocabulary tokens
    /// yields the zero vector.
    pub fn weigh(&self, text: &str) -> Vec<f32> {
        let mut vector = vec![0.0f32; self.idf.len()];
        for token in tokenize(text) {
            if let Some(&index) = self.vocabulary.get(&token) {
                vector[index] += self.idf[index];
            }
        }
        vector
    }
}

/// Cosine similarity of two equal-length vectors.
///
/// Returns 0.0 when either vector has zero norm, and clamps the result to
/// `[0, 1]` so float drift cannot push a score past the bounds. With
/// non-negative inputs the clamp only ever trims noise.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    debug_assert_eq!(a.len(), b.len());
    let mut dot = 0.0f32;
    let mut norm_a = 0.0f32;
    let mut norm_b = 0.0f32;
    for (&x, &y) in a.iter().zip(b) {
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    (dot / (norm_a.sqrt() * norm_b.sqrt())).clamp(0.0, 1.0)
}
