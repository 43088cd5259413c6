//! MkDocs admonition to container conversion.
//!
//! Rewrites rentry/MkDocs callouts into the `:::` container syntax used by
//! VitePress-style renderers:
//!
//! ```text
//! !!! note Remember this.        ::: tip Note
//!                          →     Remember this.
//!                                :::
//! ```
//!
//! # Modules
//!
//! - [`heading`]: fixes `###Title` style headings that lack a space
//! - [`parser`]: classifies the text after `!!! type` into title and content
//! - [`tables`]: keyword → container type and default title lookups
//! - converter: the line scanner that assembles blocks and emits fences
//!
//! `???` openers always produce a `details` container. Continuation lines are
//! those indented deeper than the opener; four columns are stripped from them
//! relative to the opener's indent.

mod converter;
mod fence;
pub mod heading;
pub mod parser;
pub mod tables;

pub use converter::{
    AdmonitionConverter, ConvertOptions, Conversion, ConvertedBlock, convert_admonitions,
};
pub use heading::normalize_headings;
pub use parser::{Admonition, InlineForm, parse_admonition};
