// Only allow lints that are either transitive-dependency noise or
// genuinely opinionated style choices that don't indicate real issues.
#![allow(
    // Transitive dependency version mismatches we can't control
    clippy::multiple_crate_versions,
    // module_name_repetitions is pure style preference (e.g. render::render_text)
    clippy::module_name_repetitions
)]

//! # Marknote
//!
//! A small markdown engine for notes.
//!
//! Marknote turns markdown source into an immutable node tree and renders
//! that tree as:
//! - HTML, with all user content escaped
//! - An abstract [`render::Element`] tree through per-kind component overrides
//! - Wrapped plain text for terminals
//! - Markdown again
//!
//! ## Architecture
//!
//! source → block scanner → inline scanner → node tree → renderer
//!
//! Both scanners are driven by ordered rule tables. Parsing never fails:
//! anything unrecognized becomes paragraph text.
//!
//! ## Modules
//!
//! - [`document`]: Node types, parsing, outline, markdown serialization
//! - [`render`]: HTML, component and text renderers
//! - [`config`]: Saved command-line defaults
//! - [`convert`]: Input loading and output format dispatch
//! - [`watcher`]: Re-parsing a note when it changes on disk
//!
//! ```
//! use marknote::{parse, render};
//!
//! let html = render(&parse("Hello **world**"));
//! assert_eq!(html, "<p>Hello <strong>world</strong></p>");
//! ```

pub mod config;
pub mod convert;
pub mod document;
pub mod error;
pub mod perf;
pub mod render;
pub mod watcher;

pub use document::{Node, NodeKind, parse};
pub use render::{Components, Element, render, render_with_components};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::document::{Node, NodeKind, parse, parse_inline, to_markdown};
    pub use crate::render::{
        Components, Element, Escape, render, render_text, render_with_components,
    };
}
