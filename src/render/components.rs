//! Pluggable component rendering.
//!
//! Walks the same tree as the HTML renderer, but every node goes through a
//! component function chosen by its [`NodeKind`]: a caller override when
//! one is registered, the built-in default otherwise. Components produce
//! [`Element`] trees that a host can map onto its own UI primitives.

use std::collections::HashMap;
use std::fmt;

use crate::document::{Node, NodeKind};

use super::escape::escape_html;

/// Abstract, host-independent UI tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Element {
    /// A named element with attributes and children
    Tag {
        name: String,
        attributes: Vec<(String, String)>,
        children: Vec<Element>,
    },
    /// Raw text; escaped when serialized
    Text(String),
    /// Explicit visual line break
    LineBreak,
    /// A group of siblings with no wrapper
    Fragment(Vec<Element>),
}

/// Elements serialized without a closing tag.
const VOID_TAGS: &[&str] = &["br", "hr", "img"];

impl Element {
    pub fn tag(name: impl Into<String>) -> Self {
        Self::Tag {
            name: name.into(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn text(content: impl Into<String>) -> Self {
        Self::Text(content.into())
    }

    /// Add an attribute; no-op on anything but a tag.
    #[must_use]
    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        if let Self::Tag { attributes, .. } = &mut self {
            attributes.push((key.into(), value.into()));
        }
        self
    }

    /// Replace the children of a tag or fragment.
    #[must_use]
    pub fn with_children(mut self, new_children: Vec<Self>) -> Self {
        match &mut self {
            Self::Tag { children, .. } | Self::Fragment(children) => *children = new_children,
            Self::Text(_) | Self::LineBreak => {}
        }
        self
    }

    /// Look up an attribute on a tag.
    pub fn attr(&self, key: &str) -> Option<&str> {
        match self {
            Self::Tag { attributes, .. } => attributes
                .iter()
                .find(|(k, _)| k == key)
                .map(|(_, v)| v.as_str()),
            _ => None,
        }
    }

    /// Concatenated text, with line breaks as `\n`.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        match self {
            Self::Text(text) => out.push_str(text),
            Self::LineBreak => out.push('\n'),
            Self::Tag { children, .. } | Self::Fragment(children) => {
                for child in children {
                    child.collect_text(out);
                }
            }
        }
    }

    /// Serialize to HTML, escaping all text and attribute values.
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out);
        out
    }

    fn write_html(&self, out: &mut String) {
        match self {
            Self::Text(text) => out.push_str(&escape_html(text)),
            Self::LineBreak => out.push_str("<br>"),
            Self::Fragment(children) => {
                for child in children {
                    child.write_html(out);
                }
            }
            Self::Tag {
                name,
                attributes,
                children,
            } => {
                out.push('<');
                out.push_str(name);
                for (key, value) in attributes {
                    out.push(' ');
                    out.push_str(key);
                    out.push_str("=\"");
                    out.push_str(&escape_html(value));
                    out.push('"');
                }
                if VOID_TAGS.contains(&name.as_str()) {
                    out.push_str(" />");
                    return;
                }
                out.push('>');
                for child in children {
                    child.write_html(out);
                }
                out.push_str("</");
                out.push_str(name);
                out.push('>');
            }
        }
    }
}

/// Signature of a component: the node plus its already-rendered children.
pub type ComponentFn<'a> = dyn Fn(&Node, Vec<Element>) -> Element + 'a;

/// Per-kind component overrides.
#[derive(Default)]
pub struct Components<'a> {
    overrides: HashMap<NodeKind, Box<ComponentFn<'a>>>,
}

impl fmt::Debug for Components<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut kinds: Vec<_> = self.overrides.keys().collect();
        kinds.sort();
        f.debug_struct("Components")
            .field("overrides", &kinds)
            .finish()
    }
}

impl<'a> Components<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`Components::insert`].
    #[must_use]
    pub fn with(
        mut self,
        kind: NodeKind,
        component: impl Fn(&Node, Vec<Element>) -> Element + 'a,
    ) -> Self {
        self.insert(kind, component);
        self
    }

    /// Register an override, replacing any previous one for `kind`.
    pub fn insert(
        &mut self,
        kind: NodeKind,
        component: impl Fn(&Node, Vec<Element>) -> Element + 'a,
    ) {
        self.overrides.insert(kind, Box::new(component));
    }

    /// Drop the override for `kind`, falling back to the default.
    pub fn remove(&mut self, kind: NodeKind) -> bool {
        self.overrides.remove(&kind).is_some()
    }

    pub fn has_override(&self, kind: NodeKind) -> bool {
        self.overrides.contains_key(&kind)
    }

    /// Render one node and its subtree.
    pub fn render_node(&self, node: &Node) -> Element {
        let children = node
            .children()
            .unwrap_or_default()
            .iter()
            .map(|child| self.render_node(child))
            .collect();
        match self.overrides.get(&node.kind()) {
            Some(component) => component(node, children),
            None => default_component(node, children),
        }
    }
}

/// Render a document through `components`, wrapped in a fragment.
pub fn render_with_components(nodes: &[Node], components: &Components<'_>) -> Element {
    Element::Fragment(nodes.iter().map(|n| components.render_node(n)).collect())
}

/// Built-in component for each node kind.
///
/// Serializing the result with [`Element::to_html`] gives the same markup
/// as [`crate::render::render`].
pub fn default_component(node: &Node, children: Vec<Element>) -> Element {
    match node {
        Node::Heading { level, .. } => {
            Element::tag(format!("h{}", (*level).clamp(1, 6))).with_children(children)
        }
        Node::Paragraph { .. } => Element::tag("p").with_children(children),
        Node::Bold { .. } => Element::tag("strong").with_children(children),
        Node::Italic { .. } => Element::tag("em").with_children(children),
        Node::ListItem { .. } => Element::tag("li").with_children(children),
        Node::Blockquote { .. } => Element::tag("blockquote").with_children(children),
        Node::Code { content } => Element::tag("code").with_children(vec![Element::text(content)]),
        Node::CodeBlock { language, content } => Element::tag("pre").with_children(vec![
            Element::tag("code")
                .with_attr("class", format!("language-{language}"))
                .with_children(vec![Element::text(content)]),
        ]),
        Node::Link { href, .. } => Element::tag("a")
            .with_attr("href", href.as_str())
            .with_children(children),
        Node::Image { src, alt } => Element::tag("img")
            .with_attr("src", src.as_str())
            .with_attr("alt", alt.as_str()),
        Node::Text { content } => text_with_breaks(content),
        Node::EmptyLine => Element::Fragment(Vec::new()),
    }
}

fn text_with_breaks(content: &str) -> Element {
    let mut parts = Vec::new();
    for (i, line) in content.split('\n').enumerate() {
        if i > 0 {
            parts.push(Element::LineBreak);
        }
        if !line.is_empty() {
            parts.push(Element::text(line));
        }
    }
    Element::Fragment(parts)
}
