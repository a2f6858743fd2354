//! Similarity fallback classification using TF-IDF.
//!
//! Fits a uni+bigram TF-IDF space over one synthetic document per problem
//! category (its keywords and system names) and answers nearest-neighbour
//! queries by cosine similarity. Used when keyword detection finds nothing.
//!
//! The space is fitted once, at construction, and never mutated afterwards.
//! Lookups fail soft: `nearest` returns an empty match instead of an error.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::LazyLock;
use thiserror::Error;
use tracing::{debug, info, warn};

use super::taxonomy::{ProblemCategory, TAXONOMY};

/// Tokens of two or more word characters
static TOKEN_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b\w\w+\b").expect("Invalid regex: token pattern"));

/// Best-effort category guess
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SimilarityMatch {
    /// Nearest category, None when the lookup degraded
    pub category: Option<ProblemCategory>,
    /// 1 - cosine distance, never negative
    pub similarity: f32,
}

impl SimilarityMatch {
    /// The degraded result: no label, zero similarity
    pub fn none() -> Self {
        Self::default()
    }
}

/// Why a similarity lookup could not produce a match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SimilarityError {
    #[error("similarity corpus is empty")]
    EmptyCorpus,
    #[error("query text is blank")]
    EmptyQuery,
    #[error("query shares no term with the corpus vocabulary")]
    OutOfVocabulary,
}

/// Fitted TF-IDF vector space
#[derive(Debug, Clone)]
struct TfidfSpace {
    vocabulary: HashMap<String, usize>,
    idf: Vec<f32>,
}

impl TfidfSpace {
    /// Lowercased tokens, then unigrams followed by bigrams
    fn terms(text: &str) -> Vec<String> {
        let lower = text.to_lowercase();
        let tokens: Vec<&str> = TOKEN_PATTERN.find_iter(&lower).map(|m| m.as_str()).collect();

        let mut terms: Vec<String> = tokens.iter().map(|t| t.to_string()).collect();
        terms.extend(tokens.windows(2).map(|pair| pair.join(" ")));
        terms
    }

    /// Fit vocabulary and smoothed idf over the documents.
    ///
    /// Terms are indexed in lexical order, so vectors are identical across runs.
    fn fit(documents: &[String]) -> Option<Self> {
        let mut document_frequency: BTreeMap<String, usize> = BTreeMap::new();
        for document in documents {
            let unique: BTreeSet<String> = Self::terms(document).into_iter().collect();
            for term in unique {
                *document_frequency.entry(term).or_insert(0) += 1;
            }
        }

        if document_frequency.is_empty() {
            return None;
        }

        let n = documents.len() as f32;
        let mut vocabulary = HashMap::with_capacity(document_frequency.len());
        let mut idf = Vec::with_capacity(document_frequency.len());
        for (index, (term, df)) in document_frequency.into_iter().enumerate() {
            vocabulary.insert(term, index);
            idf.push(((1.0 + n) / (1.0 + df as f32)).ln() + 1.0);
        }

        Some(Self { vocabulary, idf })
    }

    /// L2-normalized tf-idf vector; None when no term is in the vocabulary
    fn transform(&self, text: &str) -> Option<Vec<f32>> {
        let mut vector = vec![0.0f32; self.idf.len()];
        for term in Self::terms(text) {
            if let Some(&index) = self.vocabulary.get(&term) {
                vector[index] += 1.0;
            }
        }

        for (value, idf) in vector.iter_mut().zip(&self.idf) {
            *value *= idf;
        }

        let norm = vector.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm == 0.0 {
            return None;
        }
        vector.iter_mut().for_each(|x| *x /= norm);
        Some(vector)
    }

    fn term_count(&self) -> usize {
        self.vocabulary.len()
    }
}

/// Nearest-neighbour category classifier over a fixed synthetic corpus
#[derive(Debug, Clone)]
pub struct SimilarityFallbackClassifier {
    space: Option<TfidfSpace>,
    documents: Vec<(ProblemCategory, Vec<f32>)>,
}

impl Default for SimilarityFallbackClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl SimilarityFallbackClassifier {
    /// Build from the problem taxonomy
    pub fn new() -> Self {
        let corpus = TAXONOMY
            .iter()
            .map(|spec| (spec.category, spec.document()))
            .collect();
        Self::from_corpus(corpus)
    }

    /// Build from an explicit corpus (one document per category)
    pub fn from_corpus(corpus: Vec<(ProblemCategory, String)>) -> Self {
        let texts: Vec<String> = corpus.iter().map(|(_, text)| text.clone()).collect();

        let Some(space) = TfidfSpace::fit(&texts) else {
            warn!("Similarity corpus is empty, fallback classification disabled");
            return Self {
                space: None,
                documents: Vec::new(),
            };
        };

        let documents: Vec<(ProblemCategory, Vec<f32>)> = corpus
            .iter()
            .filter_map(|(category, text)| {
                space.transform(text).map(|vector| (*category, vector))
            })
            .collect();

        info!(
            "Fitted similarity space: {} documents, {} terms",
            documents.len(),
            space.term_count()
        );

        Self {
            space: Some(space),
            documents,
        }
    }

    /// Nearest category, or the reason there is none
    pub fn try_nearest(&self, text: &str) -> Result<(ProblemCategory, f32), SimilarityError> {
        let space = self.space.as_ref().ok_or(SimilarityError::EmptyCorpus)?;
        if self.documents.is_empty() {
            return Err(SimilarityError::EmptyCorpus);
        }
        if text.trim().is_empty() {
            return Err(SimilarityError::EmptyQuery);
        }

        let query = space
            .transform(text)
            .ok_or(SimilarityError::OutOfVocabulary)?;

        let mut best: Option<(ProblemCategory, f32)> = None;
        for (category, document) in &self.documents {
            let similarity = cosine_similarity(&query, document);
            if best.map_or(true, |(_, best_similarity)| similarity > best_similarity) {
                best = Some((*category, similarity));
            }
        }

        best.map(|(category, similarity)| (category, similarity.max(0.0)))
            .ok_or(SimilarityError::EmptyCorpus)
    }

    /// Nearest category, degrading to an empty zero-similarity match
    pub fn nearest(&self, text: &str) -> SimilarityMatch {
        match self.try_nearest(text) {
            Ok((category, similarity)) => SimilarityMatch {
                category: Some(category),
                similarity,
            },
            Err(e) => {
                debug!("Similarity fallback degraded: {}", e);
                SimilarityMatch::none()
            }
        }
    }
}

/// Calculate cosine similarity between two vectors
fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let dot_product: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let magnitude_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let magnitude_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if magnitude_a == 0.0 || magnitude_b == 0.0 {
        return 0.0;
    }

    dot_product / (magnitude_a * magnitude_b)
}
