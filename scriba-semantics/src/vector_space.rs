//! Bag-of-words TF-IDF space over a small corpus.
//!
//! Term weights are `tf * log2(N / df)`, each document vector is L2
//! normalised and terms whose weight comes out as zero are dropped. A term
//! present in every document therefore carries no weight, and a corpus of a
//! single document scores zero against any query.

use std::collections::{BTreeMap, HashMap};

const STOPLIST: &[&str] = &["for", "a", "of", "the", "and", "to", "in"];

type SparseVector = BTreeMap<usize, f64>;

fn corpus_words(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split_whitespace()
        .filter(|w| !STOPLIST.contains(w))
        .map(str::to_string)
        .collect()
}

#[derive(Debug, Clone, Default)]
pub struct VectorSpace {
    vocabulary: HashMap<String, usize>,
    idf: Vec<f64>,
    documents: Vec<SparseVector>,
}

impl VectorSpace {
    pub fn new<I, S>(documents: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let tokenized: Vec<Vec<String>> = documents
            .into_iter()
            .map(|doc| corpus_words(doc.as_ref()))
            .collect();

        let mut vocabulary = HashMap::new();
        let mut document_frequency: Vec<usize> = Vec::new();
        for words in &tokenized {
            let mut seen = Vec::new();
            for word in words {
                let next = vocabulary.len();
                let id = *vocabulary.entry(word.clone()).or_insert(next);
                if id == document_frequency.len() {
                    document_frequency.push(0);
                }
                if !seen.contains(&id) {
                    seen.push(id);
                    document_frequency[id] += 1;
                }
            }
        }

        let total = tokenized.len() as f64;
        let idf = document_frequency
            .iter()
            .map(|&df| (total / df as f64).log2())
            .collect();

        let mut space = Self {
            vocabulary,
            idf,
            documents: Vec::new(),
        };
        let weighted = tokenized
            .iter()
            .map(|words| space.weigh(words.iter().map(String::as_str)))
            .collect();
        space.documents = weighted;
        space
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Normalised TF-IDF vector of `words`; words outside the vocabulary are
    /// ignored.
    fn weigh<'w>(&self, words: impl Iterator<Item = &'w str>) -> SparseVector {
        let mut counts: SparseVector = BTreeMap::new();
        for word in words {
            if let Some(&id) = self.vocabulary.get(word) {
                *counts.entry(id).or_default() += 1.0;
            }
        }

        let mut weights: SparseVector = counts
            .into_iter()
            .map(|(id, tf)| (id, tf * self.idf[id]))
            .filter(|(_, w)| *w != 0.0)
            .collect();
        let norm = weights.values().map(|w| w * w).sum::<f64>().sqrt();
        if norm > 0.0 {
            for w in weights.values_mut() {
                *w /= norm;
            }
        }
        weights
    }

    /// Cosine similarity of `query` against every corpus document, in corpus
    /// order.
    pub fn similarities(&self, query: &str) -> Vec<f64> {
        let lowered = query.to_lowercase();
        let vector = self.weigh(lowered.split_whitespace());
        self.documents
            .iter()
            .map(|doc| {
                vector
                    .iter()
                    .filter_map(|(id, w)| doc.get(id).map(|d| w * d))
                    .sum::<f64>()
            })
            .collect()
    }

    /// Mean of [`similarities`](Self::similarities); zero for an empty corpus.
    pub fn mean_similarity(&self, query: &str) -> f64 {
        let sims = self.similarities(query);
        if sims.is_empty() {
            return 0.0;
        }
        sims.iter().sum::<f64>() / sims.len() as f64
    }
}
