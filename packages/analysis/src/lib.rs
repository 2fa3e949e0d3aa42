//! # Scriptpad Analysis
//!
//! Views derived from the block sequence. Every function here is pure:
//! recomputed from the current blocks on each change, no caches, no
//! hidden state.
//!
//! - [`search`]: case-insensitive literal filtering and match highlighting
//! - [`stats`]: scene, speaker and word counts
//! - [`scene_index`]: numbered scene list for navigation

pub mod scene_index;
pub mod search;
pub mod stats;

pub use scene_index::{
    build_scene_index, CategorizerKind, SceneCategorizer, SceneCategory, SceneEntry,
    TimeOfDayCategorizer, UniformCategorizer,
};
pub use search::{
    filter, find_matches, highlight, matches, BlockHighlights, Field, FieldHighlight,
    FilterResult, Segment,
};
pub use stats::{compute_stats, ScriptStats};
