//! Document structure: headings, links and images.
//!
//! Used for tables of contents and note previews.

use super::types::Node;

/// Reference to a heading in the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadingRef {
    /// Heading level (1-6)
    pub level: u8,
    /// Heading text (plain, no formatting)
    pub text: String,
    /// Index of the heading among the top-level blocks
    pub block: usize,
    /// Anchor slug derived from the text
    pub anchor: String,
}

/// Reference to a link in the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkRef {
    /// Link text
    pub text: String,
    /// Link URL
    pub url: String,
    /// Index of the containing top-level block
    pub block: usize,
}

/// Reference to an image in the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRef {
    /// Alt text
    pub alt: String,
    /// Image source (path or URL)
    pub src: String,
    /// Index of the containing top-level block
    pub block: usize,
}

/// All headings, in document order.
pub fn headings(nodes: &[Node]) -> Vec<HeadingRef> {
    nodes
        .iter()
        .enumerate()
        .filter_map(|(block, node)| match node {
            Node::Heading { level, .. } => {
                let text = plain_text(node);
                Some(HeadingRef {
                    level: (*level).clamp(1, 6),
                    anchor: normalize_anchor(&text),
                    text,
                    block,
                })
            }
            _ => None,
        })
        .collect()
}

/// All links, in document order.
pub fn links(nodes: &[Node]) -> Vec<LinkRef> {
    let mut out = Vec::new();
    for (block, node) in nodes.iter().enumerate() {
        walk(node, &mut |n| {
            if let Node::Link { href, .. } = n {
                out.push(LinkRef {
                    text: plain_text(n),
                    url: href.clone(),
                    block,
                });
            }
        });
    }
    out
}

/// All images, in document order.
pub fn images(nodes: &[Node]) -> Vec<ImageRef> {
    let mut out = Vec::new();
    for (block, node) in nodes.iter().enumerate() {
        walk(node, &mut |n| {
            if let Node::Image { src, alt } = n {
                out.push(ImageRef {
                    alt: alt.clone(),
                    src: src.clone(),
                    block,
                });
            }
        });
    }
    out
}

/// Text content of a node with all markup removed.
///
/// Images contribute their alt text.
pub fn plain_text(node: &Node) -> String {
    let mut text = String::new();
    collect_text(node, &mut text);
    text
}

/// Plain text of a whole document, one block per line.
///
/// Used for note previews and search indexing.
pub fn document_text(nodes: &[Node]) -> String {
    nodes
        .iter()
        .map(plain_text)
        .filter(|text| !text.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

fn collect_text(node: &Node, text: &mut String) {
    match node {
        Node::Text { content } | Node::Code { content } | Node::CodeBlock { content, .. } => {
            text.push_str(content);
        }
        Node::Image { alt, .. } => text.push_str(alt),
        Node::EmptyLine => {}
        container => {
            for child in container.children().unwrap_or_default() {
                collect_text(child, text);
            }
        }
    }
}

fn walk<'a>(node: &'a Node, visit: &mut impl FnMut(&'a Node)) {
    visit(node);
    for child in node.children().unwrap_or_default() {
        walk(child, visit);
    }
}

/// Lowercase ASCII slug with runs of other characters collapsed to `-`.
pub fn normalize_anchor(s: &str) -> String {
    let mut out = String::new();
    let mut last_dash = false;
    for ch in s.chars() {
        let lower = ch.to_ascii_lowercase();
        if lower.is_ascii_alphanumeric() {
            out.push(lower);
            last_dash = false;
        } else if !last_dash {
            out.push('-');
            last_dash = true;
        }
    }
    out.trim_matches('-').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::parse;

    #[test]
    fn test_headings_collects_levels_and_blocks() {
        let nodes = parse("# One\n\ntext\n\n## Two *b*");
        let heads = headings(&nodes);
        assert_eq!(heads.len(), 2);
        assert_eq!(heads[0].level, 1);
        assert_eq!(heads[0].block, 0);
        assert_eq!(heads[1].text, "Two b");
        assert_eq!(heads[1].block, 2);
        assert_eq!(heads[1].anchor, "two-b");
    }

    #[test]
    fn test_links_found_inside_list_items() {
        let nodes = parse("- see [docs](https://docs.rs)");
        let found = links(&nodes);
        assert_eq!(
            found,
            vec![LinkRef {
                text: "docs".to_string(),
                url: "https://docs.rs".to_string(),
                block: 0,
            }]
        );
    }

    #[test]
    fn test_images_collected() {
        let nodes = parse("intro\n\n![Alt text](image.png)");
        let found = images(&nodes);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].alt, "Alt text");
        assert_eq!(found[0].src, "image.png");
        assert_eq!(found[0].block, 1);
    }

    #[test]
    fn test_plain_text_strips_markup() {
        let nodes = parse("a **b** `c` [d](e)");
        assert_eq!(plain_text(&nodes[0]), "a b c d");
    }

    #[test]
    fn test_document_text_skips_empty_blocks() {
        let nodes = parse("# Title\n\nbody");
        assert_eq!(document_text(&nodes), "Title\nbody");
        assert_eq!(document_text(&parse("")), "");
    }

    #[test]
    fn test_normalize_anchor() {
        assert_eq!(normalize_anchor("Hello, World!"), "hello-world");
        assert_eq!(normalize_anchor("  --x--  "), "x");
    }
}
