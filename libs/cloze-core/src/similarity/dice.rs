//! Sørensen–Dice coefficient over character bigrams.
//!
//! Bigrams are compared as multisets, so a repeated pair only matches as
//! many times as it occurs in both strings. Comparison is case-insensitive.

use super::Similarity;
use std::collections::HashMap;

/// Bigram Dice coefficient.
#[derive(Debug, Clone, Copy, Default)]
pub struct DiceCoefficient;

impl Similarity for DiceCoefficient {
    fn name(&self) -> &'static str {
        "dice"
    }

    fn similarity(&self, a: &str, b: &str) -> f64 {
        let a: Vec<char> = a.to_lowercase().chars().collect();
        let b: Vec<char> = b.to_lowercase().chars().collect();

        if a == b {
            return 1.0;
        }
        // No bigrams to compare.
        if a.len() < 2 || b.len() < 2 {
            return 0.0;
        }

        let mut counts: HashMap<(char, char), usize> = HashMap::new();
        for pair in a.windows(2) {
            *counts.entry((pair[0], pair[1])).or_insert(0) += 1;
        }

        let mut common = 0;
        for pair in b.windows(2) {
            if let Some(count) = counts.get_mut(&(pair[0], pair[1])) {
                if *count > 0 {
                    *count -= 1;
                    common += 1;
                }
            }
        }

        (2 * common) as f64 / (a.len() + b.len() - 2) as f64
    }
}
