//! # Document Store
//!
//! The ordered block sequence, the active block and a version counter.
//!
//! Every edit goes through here. Operations are total: an unknown id or a
//! move past either end leaves the document untouched instead of failing.
//! The `try_*` variants report why an edit was ignored.
//!
//! ## Lifecycle
//!
//! ```text
//! seed / restore → add / update / delete / move → serialize
//!                       ↓
//!                 version += 1  (only when the sequence changed)
//! ```

use crate::mutations::{Direction, Mutation, MutationError, MutationOutcome};
use crate::navigation::NavigationIntent;
use crate::persistence::{
    ensure_unique_ids, parse_snapshot, parse_snapshot_value, serialize_blocks, ParsedSnapshot,
    RestoreOutcome, SnapshotError,
};
use scriptpad_model::{seed_blocks, Block, BlockId, BlockKind};
use serde_json::Value;
use tracing::{debug, warn};

/// Editable script document
#[derive(Debug, Clone)]
pub struct Document {
    blocks: Vec<Block>,

    /// Block whose field last received focus
    active: Option<BlockId>,

    /// Current version number (increments on each effective change)
    version: u64,

    /// Side effects waiting for the host
    intents: Vec<NavigationIntent>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// New document holding the seed blocks
    pub fn new() -> Self {
        Self::from_blocks(seed_blocks())
    }

    /// Document with no blocks
    pub fn empty() -> Self {
        Self::from_blocks(Vec::new())
    }

    pub fn from_blocks(mut blocks: Vec<Block>) -> Self {
        ensure_unique_ids(&mut blocks);
        Self {
            blocks,
            active: None,
            version: 0,
            intents: Vec::new(),
        }
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn active(&self) -> Option<&BlockId> {
        self.active.as_ref()
    }

    pub fn get(&self, id: &BlockId) -> Option<&Block> {
        self.position(id).map(|index| &self.blocks[index])
    }

    pub fn position(&self, id: &BlockId) -> Option<usize> {
        self.blocks.iter().position(|block| block.id() == id)
    }

    pub fn contains(&self, id: &BlockId) -> bool {
        self.position(id).is_some()
    }

    /// Append a block and focus it. Returns the id the block was stored under.
    pub fn add(&mut self, mut block: Block) -> BlockId {
        if block.id().is_unassigned() || self.contains(block.id()) {
            block.set_id(BlockId::generate());
        }
        let id = block.id().clone();
        debug!(block_id = %id, kind = ?block.kind(), "add block");

        self.blocks.push(block);
        self.active = Some(id.clone());
        self.intents.push(NavigationIntent::Focus {
            block_id: id.clone(),
        });
        self.bump();
        id
    }

    /// Append a template block of `kind`
    pub fn add_kind(&mut self, kind: BlockKind) -> BlockId {
        self.add(kind.template())
    }

    /// Replace the block at `id`, keeping `id`. Unknown ids are ignored.
    pub fn update(&mut self, id: &BlockId, block: Block) -> bool {
        self.try_update(id, block).is_ok()
    }

    pub fn try_update(&mut self, id: &BlockId, mut block: Block) -> Result<BlockId, MutationError> {
        // active follows the edited field even when the id is stale
        self.active = Some(id.clone());

        let index = self
            .position(id)
            .ok_or_else(|| MutationError::BlockNotFound(id.clone()))?;
        block.set_id(id.clone());
        if self.blocks[index] != block {
            self.blocks[index] = block;
            self.bump();
        }
        Ok(id.clone())
    }

    /// Remove the block at `id`. Unknown ids are ignored.
    pub fn delete(&mut self, id: &BlockId) -> bool {
        self.try_delete(id).is_ok()
    }

    pub fn try_delete(&mut self, id: &BlockId) -> Result<BlockId, MutationError> {
        let index = self
            .position(id)
            .ok_or_else(|| MutationError::BlockNotFound(id.clone()))?;
        let removed = self.blocks.remove(index);
        debug!(block_id = %id, kind = ?removed.kind(), "delete block");
        self.active = None;
        self.bump();
        Ok(id.clone())
    }

    /// Swap the block with its neighbor. Ignored at the boundaries.
    pub fn move_block(&mut self, id: &BlockId, direction: Direction) -> bool {
        self.try_move(id, direction).is_ok()
    }

    pub fn try_move(&mut self, id: &BlockId, direction: Direction) -> Result<BlockId, MutationError> {
        let index = self
            .position(id)
            .ok_or_else(|| MutationError::BlockNotFound(id.clone()))?;
        self.active = Some(id.clone());

        let target = match direction {
            Direction::Previous => index.checked_sub(1),
            Direction::Next => Some(index + 1).filter(|next| *next < self.blocks.len()),
        };
        let target = target.ok_or_else(|| MutationError::AtBoundary {
            id: id.clone(),
            direction,
        })?;

        self.blocks.swap(index, target);
        self.bump();
        Ok(id.clone())
    }

    /// Mark a block active. No version change.
    pub fn focus(&mut self, id: &BlockId) -> bool {
        if !self.contains(id) {
            return false;
        }
        self.active = Some(id.clone());
        true
    }

    /// Select a block from the scene index: activate it, scroll it into
    /// view and close the panel.
    pub fn navigate_to(&mut self, id: &BlockId) -> bool {
        if !self.focus(id) {
            return false;
        }
        self.intents.push(NavigationIntent::Reveal {
            block_id: id.clone(),
        });
        self.intents.push(NavigationIntent::ClosePanel);
        true
    }

    pub fn apply(&mut self, mutation: Mutation) -> MutationOutcome {
        let result = match mutation {
            Mutation::Add { block } => Ok(self.add(block)),
            Mutation::Update { id, block } => self.try_update(&id, block),
            Mutation::Delete { id } => self.try_delete(&id),
            Mutation::Move { id, direction } => self.try_move(&id, direction),
        };
        if let Err(reason) = &result {
            debug!(%reason, "mutation ignored");
        }
        result.into()
    }

    /// Pending side effects, oldest first
    pub fn drain_intents(&mut self) -> Vec<NavigationIntent> {
        std::mem::take(&mut self.intents)
    }

    pub fn pending_intents(&self) -> &[NavigationIntent] {
        &self.intents
    }

    /// Snapshot of the ordered blocks as a JSON array
    pub fn serialize(&self) -> String {
        match serialize_blocks(&self.blocks) {
            Ok(json) => json,
            Err(err) => {
                warn!(error = %err, "failed to serialize document");
                "[]".to_string()
            }
        }
    }

    /// Replace the sequence from a raw snapshot. A snapshot that is not a
    /// JSON list leaves the document as it was.
    pub fn restore(&mut self, raw: &str) -> RestoreOutcome {
        let parsed = parse_snapshot(raw);
        self.finish_restore(parsed)
    }

    pub fn restore_value(&mut self, value: Value) -> RestoreOutcome {
        let parsed = parse_snapshot_value(value);
        self.finish_restore(parsed)
    }

    fn finish_restore(&mut self, parsed: Result<ParsedSnapshot, SnapshotError>) -> RestoreOutcome {
        match parsed {
            Ok(ParsedSnapshot {
                blocks,
                skipped,
                reissued,
            }) => {
                if skipped > 0 {
                    warn!(skipped, "dropped unrecognized blocks from snapshot");
                }
                if reissued > 0 {
                    warn!(reissued, "issued fresh ids for snapshot blocks");
                }
                let outcome = RestoreOutcome::Restored {
                    blocks: blocks.len(),
                    skipped,
                    reissued,
                };
                self.blocks = blocks;
                if let Some(active) = &self.active {
                    if !self.contains(active) {
                        self.active = None;
                    }
                }
                self.bump();
                outcome
            }
            Err(SnapshotError::NotAList) => {
                warn!("snapshot is not a list, keeping current blocks");
                RestoreOutcome::NotAList
            }
            Err(SnapshotError::Unparseable(err)) => {
                warn!(error = %err, "snapshot is not valid JSON, keeping current blocks");
                RestoreOutcome::Unparseable
            }
        }
    }

    fn bump(&mut self) {
        self.version += 1;
    }
}
