//! # Draft Snapshots
//!
//! A snapshot is the JSON array of blocks in document order. Loading is
//! lenient: elements that are not recognizable blocks are skipped, and
//! missing or duplicate ids are re-issued so identity stays unique.

use scriptpad_model::{Block, BlockId};
use serde::Serialize;
use serde_json::Value;
use std::collections::HashSet;
use thiserror::Error;

/// How a restore attempt went. Restoring never fails the caller; this is a
/// signal for hosts that want to surface a warning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum RestoreOutcome {
    /// The document now holds `blocks` blocks; `skipped` elements were
    /// dropped and `reissued` blocks got a fresh id
    Restored {
        blocks: usize,
        skipped: usize,
        reissued: usize,
    },
    /// Valid JSON but not an array; the previous sequence was kept
    NotAList,
    /// Not valid JSON; the previous sequence was kept
    Unparseable,
}

impl RestoreOutcome {
    pub fn is_restored(&self) -> bool {
        matches!(self, RestoreOutcome::Restored { .. })
    }

    /// True when the restored blocks differ from the stored snapshot, so
    /// the snapshot should be written back
    pub fn needs_write_back(&self) -> bool {
        matches!(
            self,
            RestoreOutcome::Restored { skipped, reissued, .. } if *skipped > 0 || *reissued > 0
        )
    }
}

#[derive(Error, Debug)]
pub enum SnapshotError {
    #[error("Snapshot is not valid JSON: {0}")]
    Unparseable(#[from] serde_json::Error),

    #[error("Snapshot is not a list")]
    NotAList,
}

/// Blocks recovered from a snapshot
#[derive(Debug)]
pub struct ParsedSnapshot {
    pub blocks: Vec<Block>,
    pub skipped: usize,
    pub reissued: usize,
}

/// Serialize blocks to the snapshot format
pub fn serialize_blocks(blocks: &[Block]) -> Result<String, serde_json::Error> {
    serde_json::to_string(blocks)
}

/// Parse a raw snapshot string
pub fn parse_snapshot(raw: &str) -> Result<ParsedSnapshot, SnapshotError> {
    let value: Value = serde_json::from_str(raw)?;
    parse_snapshot_value(value)
}

/// Parse an already decoded snapshot
pub fn parse_snapshot_value(value: Value) -> Result<ParsedSnapshot, SnapshotError> {
    let Value::Array(elements) = value else {
        return Err(SnapshotError::NotAList);
    };

    let mut blocks = Vec::with_capacity(elements.len());
    let mut skipped = 0;
    for element in elements {
        match serde_json::from_value::<Block>(element) {
            Ok(block) => blocks.push(block),
            Err(err) => {
                tracing::debug!(error = %err, "skipping unrecognized snapshot element");
                skipped += 1;
            }
        }
    }

    let reissued = ensure_unique_ids(&mut blocks);
    Ok(ParsedSnapshot {
        blocks,
        skipped,
        reissued,
    })
}

/// Give every block without an id, or with an id already taken earlier in
/// the sequence, a fresh one. First occurrence keeps its id. Returns the
/// number of ids issued.
pub(crate) fn ensure_unique_ids(blocks: &mut [Block]) -> usize {
    let mut seen: HashSet<BlockId> = HashSet::with_capacity(blocks.len());
    let mut reissued = 0;
    for block in blocks.iter_mut() {
        if block.id().is_unassigned() || seen.contains(block.id()) {
            block.set_id(BlockId::generate());
            reissued += 1;
        }
        seen.insert(block.id().clone());
    }
    reissued
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reads_legacy_wire_format() {
        let raw = r#"[
            {"id":"a","type":"SceneHeading","sceneNo":"SCENE: 1","location":"Kitchen","time":"Night"},
            {"id":"b","type":"CharDialogueInline","character":"JOHN","dialogue":null},
            {"id":"c","type":"Transition"}
        ]"#;
        let parsed = parse_snapshot(raw).unwrap();
        assert_eq!(parsed.skipped, 0);
        assert_eq!(parsed.reissued, 0);
        assert_eq!(parsed.blocks.len(), 3);
        match &parsed.blocks[1] {
            Block::DialogueLine(line) => {
                assert_eq!(line.id.as_str(), "b");
                assert_eq!(line.dialogue, "");
            }
            other => panic!("Expected dialogue, got {:?}", other),
        }
    }

    #[test]
    fn test_skips_unrecognized_elements() {
        let raw = r#"[{"id":"a","type":"Action","text":"x"}, 42, {"type":"Montage"}, "hi"]"#;
        let parsed = parse_snapshot(raw).unwrap();
        assert_eq!(parsed.blocks.len(), 1);
        assert_eq!(parsed.skipped, 3);
    }

    #[test]
    fn test_write_back_needed_only_after_repairs() {
        let clean = RestoreOutcome::Restored {
            blocks: 2,
            skipped: 0,
            reissued: 0,
        };
        let repaired = RestoreOutcome::Restored {
            blocks: 2,
            skipped: 0,
            reissued: 1,
        };
        let pruned = RestoreOutcome::Restored {
            blocks: 1,
            skipped: 1,
            reissued: 0,
        };
        assert!(!clean.needs_write_back());
        assert!(repaired.needs_write_back());
        assert!(pruned.needs_write_back());
        assert!(!RestoreOutcome::NotAList.needs_write_back());
    }

    #[test]
    fn test_non_list_rejected() {
        assert!(matches!(
            parse_snapshot(r#"{"blocks":[]}"#),
            Err(SnapshotError::NotAList)
        ));
        assert!(matches!(
            parse_snapshot("not json"),
            Err(SnapshotError::Unparseable(_))
        ));
    }

    #[test]
    fn test_missing_and_duplicate_ids_reissued() {
        let raw = r#"[
            {"id":"a","type":"Action","text":"1"},
            {"id":"a","type":"Action","text":"2"},
            {"type":"Action","text":"3"},
            {"id":"  ","type":"Action","text":"4"}
        ]"#;
        let parsed = parse_snapshot(raw).unwrap();
        assert_eq!(parsed.reissued, 3);
        let ids: Vec<&str> = parsed.blocks.iter().map(|b| b.id().as_str()).collect();
        assert_eq!(ids[0], "a");
        let unique: HashSet<&str> = ids.iter().copied().collect();
        assert_eq!(unique.len(), 4);
        assert!(ids.iter().all(|id| !id.trim().is_empty()));
    }
}
