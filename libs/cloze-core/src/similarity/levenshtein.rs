//! Edit distance similarity.

use super::Similarity;

/// `1 - distance / longest length`, measured in characters.
#[derive(Debug, Clone, Copy, Default)]
pub struct NormalizedLevenshtein;

impl Similarity for NormalizedLevenshtein {
    fn name(&self) -> &'static str {
        "levenshtein"
    }

    fn similarity(&self, a: &str, b: &str) -> f64 {
        let longest = a.chars().count().max(b.chars().count());
        if longest == 0 {
            return 1.0;
        }
        1.0 - levenshtein_distance(a, b) as f64 / longest as f64
    }
}

/// Edit distance in characters, kept in a single row.
///
/// `row[j]` is the distance between the prefix of `a` read so far and the
/// first `j` characters of `b`.
pub fn levenshtein_distance(a: &str, b: &str) -> usize {
    let target: Vec<char> = b.chars().collect();
    let mut row: Vec<usize> = (0..=target.len()).collect();

    for (i, source) in a.chars().enumerate() {
        let mut diagonal = row[0];
        row[0] = i + 1;

        for (j, &ch) in target.iter().enumerate() {
            let replace = diagonal + usize::from(source != ch);
            diagonal = row[j + 1];
            row[j + 1] = replace.min(diagonal + 1).min(row[j] + 1);
        }
    }

    row[target.len()]
}
