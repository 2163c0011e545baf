//! Markdown document parsing.
//!
//! This module handles:
//! - Splitting source into block nodes (headings, fences, lists, quotes, paragraphs)
//! - Scanning block text for inline markup
//! - Extracting document structure (headings, links, images)
//! - Serializing a tree back to markdown

mod inline;
mod markdown;
mod outline;
mod parser;
mod types;

pub use inline::parse_inline;
pub use markdown::to_markdown;
pub use outline::{
    HeadingRef, ImageRef, LinkRef, document_text, headings, images, links, normalize_anchor,
    plain_text,
};
pub use parser::parse;
pub use types::{Node, NodeKind};
