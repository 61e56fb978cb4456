//! Conversion of remote flashcard decks into cloze text.
//!
//! Remote cards carry a plain statement plus index-annotated answer segments.
//! Segments are turned into `[answer]` spans, then the statement is split into
//! paragraphs on the `U+2028 U+000A` pair used by the deck service.
//!
//! Segment indices are UTF-16 code unit offsets into the statement.

use crate::types::Collection;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Paragraph separator inside deck statements.
pub const PARAGRAPH_SEPARATOR: &str = "\u{2028}\n";

/// Top-level deck payload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeckDocument {
    pub cards: Vec<DeckCard>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeckCard {
    pub statement: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub testable_segments: Option<Vec<TestableSegment>>,
}

/// Answer span within a statement, `[start_index, end_index)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestableSegment {
    pub segment_text: String,
    pub start_index: usize,
    pub end_index: usize,
}

/// Statement with every segment replaced by `[segment_text]`.
///
/// Segments are applied from the highest start index down so earlier offsets
/// stay valid. Out-of-range indices are clamped to the statement.
pub fn apply_segments(card: &DeckCard) -> String {
    let mut text = card.statement.clone();

    let mut segments: Vec<&TestableSegment> = card.testable_segments.iter().flatten().collect();
    segments.sort_by(|a, b| b.start_index.cmp(&a.start_index));

    for segment in segments {
        let start = utf16_to_byte_offset(&text, segment.start_index);
        let end = utf16_to_byte_offset(&text, segment.end_index);
        text = format!("{}[{}]{}", &text[..start], segment.segment_text, &text[end..]);
    }

    text
}

/// Cleaned, non-empty paragraphs of a card with clozes applied.
pub fn card_paragraphs(card: &DeckCard) -> Vec<String> {
    apply_segments(card)
        .split(PARAGRAPH_SEPARATOR)
        .map(|part| part.replace(['\u{2028}', '\n'], " ").trim().to_string())
        .filter(|part| !part.is_empty())
        .collect()
}

/// Card as `<p>`-wrapped HTML paragraphs.
pub fn card_to_paragraph_html(card: &DeckCard) -> String {
    card_paragraphs(card)
        .iter()
        .map(|p| format!("<p>{}</p>", p))
        .collect()
}

/// Card as a single plain authored line, paragraphs joined by a space.
pub fn card_to_cloze_line(card: &DeckCard) -> String {
    card_paragraphs(card).join(" ")
}

/// Map of card index to its paragraph HTML.
pub fn deck_to_structured_output(deck: &DeckDocument) -> BTreeMap<usize, String> {
    deck.cards
        .iter()
        .enumerate()
        .map(|(i, card)| (i, card_to_paragraph_html(card)))
        .collect()
}

/// Unsaved collection with one line per non-empty card.
pub fn deck_to_collection(title: Option<String>, deck: &DeckDocument) -> Collection {
    let raw_problems = deck
        .cards
        .iter()
        .map(card_to_cloze_line)
        .filter(|line| !line.is_empty())
        .collect();
    Collection::new(title, raw_problems)
}

/// Byte offset of the first character at or after `offset` UTF-16 units.
fn utf16_to_byte_offset(text: &str, offset: usize) -> usize {
    let mut units = 0;
    for (byte, c) in text.char_indices() {
        if units >= offset {
            return byte;
        }
        units += c.len_utf16();
    }
    text.len()
}
