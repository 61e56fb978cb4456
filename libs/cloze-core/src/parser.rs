//! Cloze parser for authored quiz text.
//!
//! # Format
//! ```text
//! The capital of Japan is [Tokyo].
//! OpenAI owns [ChatGPT] while Meta owns [Meta AI].<br>Water freezes at [0] degrees Celsius.
//! ```
//!
//! Each line is one question. Every `[...]` span is an answer; the bracketed
//! text stays in the display sentence and is blanked out once per problem.

use crate::types::{Collection, Problem, SentenceWithClozes, BLANK};

/// Explicit line separator accepted in free text.
const BREAK_TAG: &str = "<br>";

/// Parse free text into sentences, one per non-blank line.
pub fn parse(text: &str) -> Vec<SentenceWithClozes> {
    split_lines(text)
        .filter(|line| !line.trim().is_empty())
        .map(parse_sentence)
        .collect()
}

/// Parse a stored collection. Each raw entry is already one line.
pub fn parse_collection(collection: &Collection) -> Vec<SentenceWithClozes> {
    collection
        .raw_problems
        .iter()
        .filter(|line| !line.trim().is_empty())
        .map(|line| parse_sentence(line))
        .collect()
}

/// Parse free text straight into a flat list of problems.
pub fn parse_problems(text: &str) -> Vec<Problem> {
    parse(text)
        .into_iter()
        .flat_map(|sentence| sentence.problems)
        .collect()
}

/// Split authored text into trimmed, non-empty raw lines for storage.
pub fn parse_raw_lines(text: &str) -> Vec<String> {
    text.split('\n')
        .map(|line| line.trim())
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Parse a single authored line.
pub fn parse_sentence(line: &str) -> SentenceWithClozes {
    let clozes: Vec<String> = extract_clozes(line)
        .into_iter()
        .map(str::to_string)
        .collect();
    let display_sentence: String = line.chars().filter(|c| !matches!(c, '[' | ']')).collect();

    // Substitution is by text, so repeated clozes blank the same first occurrence.
    let problems = clozes
        .iter()
        .map(|cloze| Problem {
            text: display_sentence.replacen(cloze.as_str(), BLANK, 1),
            answer: cloze.clone(),
        })
        .collect();

    SentenceWithClozes {
        original: line.to_string(),
        display_sentence,
        clozes,
        problems,
    }
}

/// Extract bracketed spans left to right, each closed by the first `]` after it.
///
/// An opening bracket without a closing one on the same line is ignored.
pub fn extract_clozes(line: &str) -> Vec<&str> {
    let mut clozes = Vec::new();
    let mut rest = line;

    while let Some(open) = rest.find('[') {
        let after = &rest[open + 1..];
        let Some(close) = after.find(']') else {
            break;
        };

        let inner = &after[..close];
        if inner.chars().any(is_line_terminator) {
            // A span cannot cross a line terminator; retry from the next bracket.
            rest = after;
            continue;
        }

        clozes.push(inner);
        rest = &after[close + 1..];
    }

    clozes
}

/// Split on `\n`, `\r\n` and `<br>`.
fn split_lines(text: &str) -> impl Iterator<Item = &str> {
    text.split(BREAK_TAG)
        .flat_map(|chunk| chunk.split('\n'))
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
}

fn is_line_terminator(c: char) -> bool {
    matches!(c, '\n' | '\r' | '\u{2028}' | '\u{2029}')
}
