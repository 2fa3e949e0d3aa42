//! # Scriptpad Editor
//!
//! Document store and editing session for Scriptpad.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ host: input events, timers, view            │
//! └─────────────────────────────────────────────┘
//!          ↓ mutations, tick(now)     ↑ intents, views
//! ┌─────────────────────────────────────────────┐
//! │ editor: ScriptSession                       │
//! │  - Document (ordered blocks, active block)  │
//! │  - Debounced autosave to DraftStorage       │
//! │  - Search query                             │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ analysis / screen / print: derived views    │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Core Principles
//!
//! 1. **Blocks are the source of truth**: search results, stats, the scene
//!    index and both renderings are recomputed from them
//! 2. **Ids are stable**: assigned once, never recomputed or reused
//! 3. **Edits never fail**: unknown ids and boundary moves are no-ops
//! 4. **No side effects in the core**: focus and scroll are
//!    [`NavigationIntent`] values the host applies
//!
//! ## Usage
//!
//! ```rust,ignore
//! use scriptpad_editor::{EditorConfig, MemoryStorage, ScriptSession};
//! use scriptpad_model::BlockKind;
//!
//! let mut session = ScriptSession::open(MemoryStorage::new(), EditorConfig::default());
//! let id = session.add_kind(BlockKind::Action);
//!
//! // Host timer
//! session.tick(elapsed);
//!
//! // Apply view effects
//! for intent in session.drain_intents() { /* ... */ }
//!
//! let html = session.print_html();
//! ```

mod autosave;
mod config;
mod document;
mod errors;
mod mutations;
mod navigation;
mod persistence;
mod session;
mod storage;

pub use autosave::{Debouncer, DEFAULT_AUTOSAVE_DELAY};
pub use config::{EditorConfig, CONFIG_FILE_NAME};
pub use document::Document;
pub use errors::{ConfigError, EditorError, StorageError};
pub use mutations::{Direction, Mutation, MutationError, MutationOutcome};
pub use navigation::NavigationIntent;
pub use persistence::{parse_snapshot, serialize_blocks, ParsedSnapshot, RestoreOutcome, SnapshotError};
pub use session::ScriptSession;
pub use storage::{DraftStorage, FileStorage, MemoryStorage, DEFAULT_DRAFT_KEY};
