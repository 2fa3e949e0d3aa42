//! # Scriptpad Model
//!
//! Content blocks and page geometry shared by every Scriptpad crate.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ model: Block variants, ids, page geometry   │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ editor: Document store + persistence        │
//! └─────────────────────────────────────────────┘
//!          ↓                 ↓                ↓
//!    analysis           screen            print
//! (search, stats,    (editable VDOM)   (print flow,
//!  scene index)                          HTML + CSS)
//! ```
//!
//! The model is pure data. Everything that reads a block matches on the
//! [`Block`] sum type exhaustively, so a new block kind is a compile error
//! at every consumer until it is handled.

mod block;
mod geometry;
mod id;

pub use block::{
    seed_blocks, Action, Block, BlockKind, DialogueLine, SceneHeading, Transition,
    DEFAULT_SCENE_LABEL, DEFAULT_TRANSITION,
};
pub use geometry::{Margins, PageGeometry};
pub use id::BlockId;
