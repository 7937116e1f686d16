//! Corpus-statistics rankers: BM25 and TF-IDF.
//!
//! Both treat documents as lowercase whitespace-separated terms and compute
//! document frequencies over the corpus they are built from.

use ahash::{AHashMap, AHashSet};

/// Lowercase whitespace tokenization shared by both rankers.
fn terms(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

/// Number of documents containing each term.
fn document_frequencies<S: AsRef<str>>(corpus: &[S]) -> AHashMap<String, usize> {
    let mut doc_freq: AHashMap<String, usize> = AHashMap::new();
    for doc in corpus {
        let unique: AHashSet<String> = terms(doc.as_ref()).into_iter().collect();
        for term in unique {
            *doc_freq.entry(term).or_insert(0) += 1;
        }
    }
    doc_freq
}

/// Raw term counts for one document.
fn term_counts(words: &[String]) -> AHashMap<&str, usize> {
    let mut counts: AHashMap<&str, usize> = AHashMap::with_capacity(words.len());
    for word in words {
        *counts.entry(word.as_str()).or_insert(0) += 1;
    }
    counts
}

/// Indices of `scores` ordered by score descending; ties keep corpus order.
fn order_by_score(scores: &[f64]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..scores.len()).collect();
    order.sort_by(|&a, &b| scores[b].total_cmp(&scores[a]));
    order
}

/// Okapi BM25 with IDF `ln((N - df + 0.5) / (df + 0.5) + 1)`.
#[derive(Debug, Clone)]
pub struct Bm25 {
    k1: f64,
    b: f64,
    avg_doc_len: f64,
    idf: AHashMap<String, f64>,
}

impl Bm25 {
    pub const K1: f64 = 1.5;
    pub const B: f64 = 0.75;

    pub fn new<S: AsRef<str>>(corpus: &[S]) -> Self {
        Self::with_params(corpus, Self::K1, Self::B)
    }

    pub fn with_params<S: AsRef<str>>(corpus: &[S], k1: f64, b: f64) -> Self {
        let total_docs = corpus.len() as f64;
        let total_len: usize = corpus.iter().map(|doc| terms(doc.as_ref()).len()).sum();
        let avg_doc_len = if corpus.is_empty() {
            0.0
        } else {
            total_len as f64 / total_docs
        };

        let idf = document_frequencies(corpus)
            .into_iter()
            .map(|(term, df)| {
                let df = df as f64;
                (term, ((total_docs - df + 0.5) / (df + 0.5) + 1.0).ln())
            })
            .collect();

        Self {
            k1,
            b,
            avg_doc_len,
            idf,
        }
    }

    pub fn idf(&self, term: &str) -> f64 {
        self.idf.get(term).copied().unwrap_or(0.0)
    }

    /// BM25 score of `document` for `query`. Terms unseen in the corpus contribute 0.
    pub fn score(&self, query: &str, document: &str) -> f64 {
        let words = terms(document);
        let counts = term_counts(&words);
        let length_ratio = if self.avg_doc_len > 0.0 {
            words.len() as f64 / self.avg_doc_len
        } else {
            1.0
        };
        let norm = self.k1 * (1.0 - self.b + self.b * length_ratio);

        terms(query)
            .iter()
            .map(|term| {
                let count = counts.get(term.as_str()).copied().unwrap_or(0);
                if count == 0 {
                    return 0.0;
                }
                let tf = count as f64;
                self.idf(term) * (tf * (self.k1 + 1.0)) / (tf + norm)
            })
            .sum()
    }

    /// Indices of `documents` ordered by BM25 score, best first.
    pub fn rank<S: AsRef<str>>(&self, query: &str, documents: &[S]) -> Vec<usize> {
        let scores: Vec<f64> = documents
            .iter()
            .map(|doc| self.score(query, doc.as_ref()))
            .collect();
        order_by_score(&scores)
    }
}

/// Length-normalized TF times IDF `ln(N / (df + 1))`.
#[derive(Debug, Clone)]
pub struct TfIdf {
    idf: AHashMap<String, f64>,
}

impl TfIdf {
    pub fn new<S: AsRef<str>>(corpus: &[S]) -> Self {
        let total_docs = corpus.len() as f64;
        let idf = document_frequencies(corpus)
            .into_iter()
            .map(|(term, df)| (term, (total_docs / (df as f64 + 1.0)).ln()))
            .collect();
        Self { idf }
    }

    pub fn idf(&self, term: &str) -> f64 {
        self.idf.get(term).copied().unwrap_or(0.0)
    }

    /// Term frequencies normalized by word count.
    pub fn term_frequencies(text: &str) -> AHashMap<String, f64> {
        let words = terms(text);
        let total = words.len() as f64;
        term_counts(&words)
            .into_iter()
            .map(|(term, count)| (term.to_string(), count as f64 / total))
            .collect()
    }

    /// Sum of `tf(document) * idf` over distinct query terms present in the document.
    ///
    /// Can be negative: a term found in every document has a negative IDF.
    pub fn score(&self, query: &str, document: &str) -> f64 {
        let doc_tf = Self::term_frequencies(document);
        let mut seen = AHashSet::new();
        // Query order, not map order, so the float sum is reproducible.
        terms(query)
            .into_iter()
            .filter(|term| seen.insert(term.clone()))
            .filter_map(|term| doc_tf.get(&term).map(|tf| tf * self.idf(&term)))
            .sum()
    }

    /// Indices of `documents` ordered by TF-IDF score, best first.
    pub fn rank<S: AsRef<str>>(&self, query: &str, documents: &[S]) -> Vec<usize> {
        let scores: Vec<f64> = documents
            .iter()
            .map(|doc| self.score(query, doc.as_ref()))
            .collect();
        order_by_score(&scores)
    }
}
