//! # Scriptpad Screen
//!
//! Editable on-screen view of a (possibly filtered) block sequence.
//!
//! The renderer emits a virtual DOM ([`VNode`]) that the host reconciles
//! into real elements, keyed by block id. Blocks are chunked into
//! fixed-size screen pages for scroll comfort only; screen pages have no
//! relation to printed pages.

mod render;
mod vdom;

pub use render::{
    paginate, render_screen, textarea_rows, ScreenOptions, ScreenView, SearchBanner,
    DEFAULT_BLOCKS_PER_PAGE,
};
pub use vdom::VNode;
