//! # Block Mutations
//!
//! Edits of the block sequence as plain data, so a host can ship them as
//! JSON and the document can apply them uniformly.
//!
//! ## Mutation Semantics
//!
//! ### Add
//! - Appends at the end
//! - A missing or colliding id is replaced with a fresh one
//!
//! ### Update
//! - Atomic replacement of the whole block (the variant may change)
//! - The stored block keeps the target id
//!
//! ### Move
//! - Swap with the previous or next neighbor
//! - Ignored at the first/last position
//!
//! ### Delete
//! - Removes the block; its id is never reused by this document

use scriptpad_model::{Block, BlockId};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Neighbor to swap with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Direction {
    Previous,
    Next,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "camelCase")]
pub enum Mutation {
    Add { block: Block },
    Update { id: BlockId, block: Block },
    Delete { id: BlockId },
    Move { id: BlockId, direction: Direction },
}

#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
pub enum MutationError {
    #[error("Block not found: {0}")]
    BlockNotFound(BlockId),

    #[error("Block {id} is already at the {direction:?} boundary")]
    AtBoundary { id: BlockId, direction: Direction },
}

/// Result of applying a mutation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum MutationOutcome {
    /// The sequence changed; carries the affected block id
    Applied { id: BlockId },
    /// Nothing changed
    Ignored { reason: MutationError },
}

impl MutationOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, MutationOutcome::Applied { .. })
    }
}

impl From<Result<BlockId, MutationError>> for MutationOutcome {
    fn from(result: Result<BlockId, MutationError>) -> Self {
        match result {
            Ok(id) => MutationOutcome::Applied { id },
            Err(reason) => MutationOutcome::Ignored { reason },
        }
    }
}
