//! Rendering of parsed documents.
//!
//! - [`render`]: HTML string output with mandatory escaping
//! - [`render_with_components`]: per-kind component dispatch into an [`Element`] tree
//! - [`render_text`]: wrapped plain text for terminals

mod components;
mod escape;
mod html;
mod text;

pub use components::{
    ComponentFn, Components, Element, default_component, render_with_components,
};
pub use escape::{Escape, HtmlEscaper, escape_html};
pub use html::{HtmlRenderer, render, render_with};
pub use text::render_text;
