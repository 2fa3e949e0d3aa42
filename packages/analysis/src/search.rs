//! # Search & Filter
//!
//! Literal, case-insensitive substring search over block text.
//!
//! The query is plain text, never a pattern: `.`, `*`, `(` and friends
//! match themselves. Matching runs on a lowercase fold of both sides; every
//! folded byte remembers which source character produced it so match
//! ranges always land on char boundaries of the original text, even when
//! lowercasing changes the byte length (`İ` → `i̇`).
//!
//! ## Semantics
//!
//! - Empty query: every block passes, nothing is highlighted.
//! - Non-empty query: a block passes if any searchable field contains the
//!   query. Occurrences are found left to right without overlap; adjacent
//!   occurrences are separate matches.

use scriptpad_model::Block;
use serde::Serialize;
use std::ops::Range;
use tracing::debug;

/// Piece of a displayed string, either plain or matching the query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "text", rename_all = "camelCase")]
pub enum Segment<'a> {
    Plain(&'a str),
    Match(&'a str),
}

impl<'a> Segment<'a> {
    pub fn text(&self) -> &'a str {
        match self {
            Segment::Plain(text) | Segment::Match(text) => text,
        }
    }

    pub fn is_match(&self) -> bool {
        matches!(self, Segment::Match(_))
    }
}

/// Searchable field of a block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    SceneLabel,
    Location,
    TimeOfDay,
    Text,
    Character,
    Dialogue,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldHighlight<'a> {
    pub field: Field,
    pub segments: Vec<Segment<'a>>,
}

/// A visible block plus its annotated text
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BlockHighlights<'a> {
    pub block: &'a Block,
    /// Empty when no query is active
    pub fields: Vec<FieldHighlight<'a>>,
}

impl<'a> BlockHighlights<'a> {
    pub fn field(&self, field: Field) -> Option<&[Segment<'a>]> {
        self.fields
            .iter()
            .find(|f| f.field == field)
            .map(|f| f.segments.as_slice())
    }
}

/// Outcome of filtering a block sequence
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilterResult<'a> {
    pub query: String,
    pub entries: Vec<BlockHighlights<'a>>,
}

impl<'a> FilterResult<'a> {
    /// Whether a non-empty query narrowed the view
    pub fn is_active(&self) -> bool {
        !self.query.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn blocks(&self) -> impl Iterator<Item = &'a Block> + '_ {
        self.entries.iter().map(|e| e.block)
    }
}

/// Lowercase fold of a string, with the source char range of every byte
struct Folded {
    text: String,
    origin: Vec<(usize, usize)>,
}

fn fold(text: &str) -> Folded {
    let mut folded = String::with_capacity(text.len());
    let mut origin = Vec::with_capacity(text.len());
    let mut buf = [0u8; 4];

    for (start, c) in text.char_indices() {
        let end = start + c.len_utf8();
        for lower in c.to_lowercase() {
            let encoded = lower.encode_utf8(&mut buf);
            folded.push_str(encoded);
            origin.extend(std::iter::repeat((start, end)).take(encoded.len()));
        }
    }

    Folded {
        text: folded,
        origin,
    }
}

fn fold_query(query: &str) -> String {
    fold(query).text
}

fn find_folded(text: &str, needle: &str) -> Vec<Range<usize>> {
    if needle.is_empty() || text.is_empty() {
        return Vec::new();
    }

    let folded = fold(text);
    let mut ranges = Vec::new();
    let mut from = 0;
    let mut last_end = 0;

    while let Some(pos) = folded.text[from..].find(needle) {
        let start = from + pos;
        let end = start + needle.len();

        let source_start = folded.origin[start].0.max(last_end);
        let source_end = folded.origin[end - 1].1;
        if source_start < source_end {
            ranges.push(source_start..source_end);
            last_end = source_end;
        }

        from = end;
    }

    ranges
}

/// Byte ranges of every case-insensitive occurrence of `query` in `text`
pub fn find_matches(text: &str, query: &str) -> Vec<Range<usize>> {
    find_folded(text, &fold_query(query))
}

/// Split `text` into plain and matching segments
pub fn highlight<'a>(text: &'a str, query: &str) -> Vec<Segment<'a>> {
    segments_for(text, &fold_query(query))
}

fn segments_for<'a>(text: &'a str, needle: &str) -> Vec<Segment<'a>> {
    let mut segments = Vec::new();
    let mut cursor = 0;

    for range in find_folded(text, needle) {
        if range.start > cursor {
            segments.push(Segment::Plain(&text[cursor..range.start]));
        }
        segments.push(Segment::Match(&text[range.clone()]));
        cursor = range.end;
    }

    if cursor < text.len() {
        segments.push(Segment::Plain(&text[cursor..]));
    }

    segments
}

fn searchable_fields(block: &Block) -> Vec<(Field, &str)> {
    match block {
        Block::SceneHeading(scene) => vec![
            (Field::SceneLabel, scene.scene_label.as_str()),
            (Field::Location, scene.location.as_str()),
            (Field::TimeOfDay, scene.time_of_day.as_str()),
        ],
        Block::Action(action) => vec![(Field::Text, action.text.as_str())],
        Block::DialogueLine(line) => vec![
            (Field::Character, line.character.as_str()),
            (Field::Dialogue, line.dialogue.as_str()),
        ],
        Block::Transition(transition) => vec![(Field::Text, transition.text.as_str())],
    }
}

fn contains_folded(text: &str, needle: &str) -> bool {
    fold(text).text.contains(needle)
}

/// Whether any searchable field of `block` contains `query`
pub fn matches(block: &Block, query: &str) -> bool {
    let needle = fold_query(query);
    needle.is_empty()
        || searchable_fields(block)
            .into_iter()
            .any(|(_, text)| contains_folded(text, &needle))
}

/// Filter `blocks` by `query` and annotate the survivors
pub fn filter<'a>(blocks: &'a [Block], query: &str) -> FilterResult<'a> {
    let needle = fold_query(query);

    if needle.is_empty() {
        return FilterResult {
            query: String::new(),
            entries: blocks
                .iter()
                .map(|block| BlockHighlights {
                    block,
                    fields: Vec::new(),
                })
                .collect(),
        };
    }

    let entries: Vec<BlockHighlights<'a>> = blocks
        .iter()
        .filter_map(|block| {
            let fields = searchable_fields(block);
            if !fields
                .iter()
                .any(|(_, text)| contains_folded(text, &needle))
            {
                return None;
            }

            Some(BlockHighlights {
                block,
                fields: fields
                    .into_iter()
                    .map(|(field, text)| FieldHighlight {
                        field,
                        segments: segments_for(text, &needle),
                    })
                    .collect(),
            })
        })
        .collect();

    debug!(query = %query, total = blocks.len(), visible = entries.len(), "Filtered blocks");

    FilterResult {
        query: query.to_string(),
        entries,
    }
}
