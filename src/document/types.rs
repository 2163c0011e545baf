//! Core document types.

use std::collections::BTreeMap;
use std::fmt;

use serde::ser::{Serialize, SerializeStruct, Serializer};

/// Syntactic category of a [`Node`].
///
/// Used as the dispatch key for component overrides and as the `type`
/// tag in serialized trees.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum NodeKind {
    Heading,
    Paragraph,
    Bold,
    Italic,
    Code,
    CodeBlock,
    Link,
    Image,
    ListItem,
    Blockquote,
    Text,
    EmptyLine,
}

impl NodeKind {
    /// All kinds, in declaration order.
    pub const ALL: [Self; 12] = [
        Self::Heading,
        Self::Paragraph,
        Self::Bold,
        Self::Italic,
        Self::Code,
        Self::CodeBlock,
        Self::Link,
        Self::Image,
        Self::ListItem,
        Self::Blockquote,
        Self::Text,
        Self::EmptyLine,
    ];

    /// The camelCase tag name (`"codeBlock"`, `"listItem"`, ...).
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Heading => "heading",
            Self::Paragraph => "paragraph",
            Self::Bold => "bold",
            Self::Italic => "italic",
            Self::Code => "code",
            Self::CodeBlock => "codeBlock",
            Self::Link => "link",
            Self::Image => "image",
            Self::ListItem => "listItem",
            Self::Blockquote => "blockquote",
            Self::Text => "text",
            Self::EmptyLine => "emptyLine",
        }
    }

    /// Look up a kind by its tag name.
    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.as_str() == tag)
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A node in the parsed document tree.
///
/// Leaves (`Text`, `Code`, `CodeBlock`) own their raw content; containers
/// own their children. `Image` and `EmptyLine` carry neither. The enum
/// makes it impossible to build a node that is both or (for containers)
/// neither.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// Heading with level 1-6
    Heading { level: u8, children: Vec<Node> },
    Paragraph { children: Vec<Node> },
    Bold { children: Vec<Node> },
    Italic { children: Vec<Node> },
    /// Inline code span
    Code { content: String },
    /// Fenced code block
    CodeBlock { language: String, content: String },
    Link { href: String, children: Vec<Node> },
    Image { src: String, alt: String },
    ListItem { ordered: bool, children: Vec<Node> },
    Blockquote { children: Vec<Node> },
    Text { content: String },
    /// Blank separator line; the parser never emits it
    EmptyLine,
}

impl Node {
    pub fn text(content: impl Into<String>) -> Self {
        Self::Text {
            content: content.into(),
        }
    }

    pub fn paragraph(children: Vec<Self>) -> Self {
        Self::Paragraph { children }
    }

    /// Heading with the level clamped into 1..=6.
    pub fn heading(level: u8, children: Vec<Self>) -> Self {
        Self::Heading {
            level: level.clamp(1, 6),
            children,
        }
    }

    pub const fn kind(&self) -> NodeKind {
        match self {
            Self::Heading { .. } => NodeKind::Heading,
            Self::Paragraph { .. } => NodeKind::Paragraph,
            Self::Bold { .. } => NodeKind::Bold,
            Self::Italic { .. } => NodeKind::Italic,
            Self::Code { .. } => NodeKind::Code,
            Self::CodeBlock { .. } => NodeKind::CodeBlock,
            Self::Link { .. } => NodeKind::Link,
            Self::Image { .. } => NodeKind::Image,
            Self::ListItem { .. } => NodeKind::ListItem,
            Self::Blockquote { .. } => NodeKind::Blockquote,
            Self::Text { .. } => NodeKind::Text,
            Self::EmptyLine => NodeKind::EmptyLine,
        }
    }

    /// Raw content of a leaf node.
    pub fn content(&self) -> Option<&str> {
        match self {
            Self::Text { content } | Self::Code { content } | Self::CodeBlock { content, .. } => {
                Some(content)
            }
            _ => None,
        }
    }

    /// Children of a container node.
    pub fn children(&self) -> Option<&[Self]> {
        match self {
            Self::Heading { children, .. }
            | Self::Paragraph { children }
            | Self::Bold { children }
            | Self::Italic { children }
            | Self::Link { children, .. }
            | Self::ListItem { children, .. }
            | Self::Blockquote { children } => Some(children),
            _ => None,
        }
    }

    /// Leaves have no children: text, code and code blocks carry
    /// `content`, images carry only their `src`/`alt` attributes.
    pub fn is_leaf(&self) -> bool {
        self.content().is_some() || matches!(self, Self::Image { .. })
    }

    pub fn is_container(&self) -> bool {
        self.children().is_some()
    }

    /// Node metadata as a string map.
    ///
    /// Heading `level`, code block `language`, link `href`, image
    /// `src`/`alt`, and `ordered = "true"` for ordered list items.
    pub fn attributes(&self) -> BTreeMap<&'static str, String> {
        let mut attrs = BTreeMap::new();
        match self {
            Self::Heading { level, .. } => {
                attrs.insert("level", level.to_string());
            }
            Self::CodeBlock { language, .. } => {
                attrs.insert("language", language.clone());
            }
            Self::Link { href, .. } => {
                attrs.insert("href", href.clone());
            }
            Self::Image { src, alt } => {
                attrs.insert("src", src.clone());
                attrs.insert("alt", alt.clone());
            }
            Self::ListItem { ordered: true, .. } => {
                attrs.insert("ordered", "true".to_string());
            }
            _ => {}
        }
        attrs
    }

    /// Look up a single attribute.
    pub fn attribute(&self, key: &str) -> Option<String> {
        self.attributes().remove(key)
    }
}

// Serialized as `{ type, content?, children?, attributes? }`.
impl Serialize for Node {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let content = self.content();
        let children = self.children();
        let attributes = self.attributes();

        let field_count = 1
            + usize::from(content.is_some())
            + usize::from(children.is_some())
            + usize::from(!attributes.is_empty());
        let mut state = serializer.serialize_struct("Node", field_count)?;
        state.serialize_field("type", self.kind().as_str())?;
        if let Some(content) = content {
            state.serialize_field("content", content)?;
        } else {
            state.skip_field("content")?;
        }
        if let Some(children) = children {
            state.serialize_field("children", children)?;
        } else {
            state.skip_field("children")?;
        }
        if attributes.is_empty() {
            state.skip_field("attributes")?;
        } else {
            state.serialize_field("attributes", &attributes)?;
        }
        state.end()
    }
}
