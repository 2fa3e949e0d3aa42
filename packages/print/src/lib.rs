//! # Scriptpad Print
//!
//! Print flow of the full, unfiltered document.
//!
//! ```text
//! blocks ──layout──▶ PrintFlow ──compile──▶ HTML fragment
//!                                  + print_stylesheet(geometry)
//!                                  = standalone print document
//! ```
//!
//! The host hands the document to its native print/PDF pipeline. Content
//! is never clipped: every item may break across physical pages.

mod compiler;
mod layout;
mod stylesheet;

pub use compiler::{compile_print_html, render_print_document, PrintOptions, PRINT_CONTAINER_ID};
pub use layout::{layout, PrintFlow, PrintItem, DIALOGUE_SEPARATOR};
pub use stylesheet::{print_stylesheet, MID_GAP_IN};
