//! Word similarity metrics for fuzzy matching.

pub mod dice;
pub mod levenshtein;

pub use dice::DiceCoefficient;
pub use levenshtein::{levenshtein_distance, NormalizedLevenshtein};

use crate::types::SimilarityMetric;

/// Trait for normalized string similarity scores.
pub trait Similarity: Send + Sync {
    /// Metric identifier.
    fn name(&self) -> &'static str;

    /// Similarity between 0.0 and 1.0, where 1.0 means identical.
    fn similarity(&self, a: &str, b: &str) -> f64;
}

/// Get similarity metric by name.
pub fn get_similarity(name: &str) -> Option<Box<dyn Similarity>> {
    SimilarityMetric::from_str(name).map(for_metric)
}

/// Build the implementation for a configured metric.
pub fn for_metric(metric: SimilarityMetric) -> Box<dyn Similarity> {
    match metric {
        SimilarityMetric::Dice => Box::new(DiceCoefficient),
        SimilarityMetric::Levenshtein => Box::new(NormalizedLevenshtein),
    }
}
