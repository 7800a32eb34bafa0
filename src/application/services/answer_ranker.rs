use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::LazyLock;

use regex::Regex;
use unicode_normalization::UnicodeNormalization;

static TOKEN_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b\w\w+\b").expect("token pattern is valid"));

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RankingError {
    #[error("no candidate answers to rank")]
    EmptyCandidates,
}

/// Picks the candidate most similar to `query`.
///
/// Term weights are TF-IDF over the joint corpus of the query plus every
/// candidate, compared by cosine similarity. Ties go to the earliest
/// candidate. A query with no usable terms scores every candidate zero, so
/// the first candidate is returned.
pub fn rank_answers<S: AsRef<str>>(query: &str, candidates: &[S]) -> Result<String, RankingError> {
    match candidates {
        [] => Err(RankingError::EmptyCandidates),
        [only] => Ok(only.as_ref().to_string()),
        _ => {
            let scores = score_candidates(query, candidates);
            let best = first_max_index(&scores);
            Ok(candidates[best].as_ref().to_string())
        }
    }
}

/// Cosine similarity of each candidate to `query`, in candidate order.
pub fn score_candidates<S: AsRef<str>>(query: &str, candidates: &[S]) -> Vec<f64> {
    let query_tokens = tokenize(query);
    let candidate_tokens: Vec<Vec<String>> =
        candidates.iter().map(|c| tokenize(c.as_ref())).collect();

    let corpus = std::iter::once(&query_tokens).chain(candidate_tokens.iter());
    let vectorizer = TfIdfVectorizer::fit(corpus);

    let query_vector = vectorizer.transform(&query_tokens);
    candidate_tokens
        .iter()
        .map(|tokens| query_vector.cosine_similarity(&vectorizer.transform(tokens)))
        .collect()
}

fn first_max_index(scores: &[f64]) -> usize {
    scores
        .iter()
        .enumerate()
        .fold(0, |best, (i, &score)| if score > scores[best] { i } else { best })
}

fn tokenize(text: &str) -> Vec<String> {
    let normalized = text.nfkc().collect::<String>().to_lowercase();
    TOKEN_PATTERN
        .find_iter(&normalized)
        .map(|m| m.as_str().to_string())
        .collect()
}

struct TfIdfVectorizer {
    vocabulary: HashMap<String, usize>,
    idf: Vec<f64>,
}

impl TfIdfVectorizer {
    /// Smoothed idf: `ln((1 + n) / (1 + df)) + 1`.
    fn fit<'a>(documents: impl Iterator<Item = &'a Vec<String>>) -> Self {
        let mut vocabulary: HashMap<String, usize> = HashMap::new();
        let mut document_frequency: Vec<usize> = Vec::new();
        let mut document_count = 0usize;

        for tokens in documents {
            document_count += 1;
            let unique: HashSet<&str> = tokens.iter().map(String::as_str).collect();
            for term in unique {
                let next_index = vocabulary.len();
                let index = *vocabulary.entry(term.to_string()).or_insert(next_index);
                if index == document_frequency.len() {
                    document_frequency.push(0);
                }
                document_frequency[index] += 1;
            }
        }

        let n = document_count as f64;
        let idf = document_frequency
            .iter()
            .map(|&df| ((1.0 + n) / (1.0 + df as f64)).ln() + 1.0)
            .collect();

        Self { vocabulary, idf }
    }

    fn transform(&self, tokens: &[String]) -> TermVector {
        let mut weights: BTreeMap<usize, f64> = BTreeMap::new();
        for token in tokens {
            if let Some(&index) = self.vocabulary.get(token) {
                *weights.entry(index).or_insert(0.0) += 1.0;
            }
        }
        for (index, weight) in weights.iter_mut() {
            *weight *= self.idf[*index];
        }
        TermVector(weights)
    }
}

// Ordered map keeps float summation order stable, so identical texts score identically.
struct TermVector(BTreeMap<usize, f64>);

impl TermVector {
    fn norm(&self) -> f64 {
        self.0.values().map(|w| w * w).sum::<f64>().sqrt()
    }

    fn dot(&self, other: &TermVector) -> f64 {
        self.0
            .iter()
            .filter_map(|(index, weight)| other.0.get(index).map(|o| weight * o))
            .sum()
    }

    fn cosine_similarity(&self, other: &TermVector) -> f64 {
        let denominator = self.norm() * other.norm();
        if denominator == 0.0 {
            0.0
        } else {
            self.dot(other) / denominator
        }
    }
}
