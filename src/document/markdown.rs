//! Serialize a node tree back to markdown source.

use super::types::Node;

/// Convert a document back to markdown.
///
/// Blocks are separated by a blank line, except consecutive list items
/// which stay on adjacent lines. Ordered items are renumbered from 1 within
/// each run. Parsing the output yields the same tree.
pub fn to_markdown(nodes: &[Node]) -> String {
    let mut out = String::new();
    // Orderedness of the previous block when it was a list item.
    let mut prev_item: Option<bool> = None;
    let mut number = 0usize;

    for node in nodes {
        let (block, item) = match node {
            Node::ListItem { ordered, children } => {
                number = if prev_item == Some(*ordered) { number + 1 } else { 1 };
                let marker = if *ordered {
                    format!("{number}. ")
                } else {
                    "- ".to_string()
                };
                (format!("{marker}{}", inline_markdown(children)), Some(*ordered))
            }
            other => (block_markdown(other), None),
        };
        if block.is_empty() {
            prev_item = None;
            continue;
        }

        if !out.is_empty() {
            let adjacent = item.is_some() && prev_item.is_some();
            out.push_str(if adjacent { "\n" } else { "\n\n" });
        }
        out.push_str(&block);
        prev_item = item;
    }
    out
}

fn block_markdown(node: &Node) -> String {
    match node {
        Node::Heading { level, children } => {
            let hashes = "#".repeat(usize::from((*level).clamp(1, 6)));
            format!("{hashes} {}", inline_markdown(children))
        }
        Node::CodeBlock { language, content } => {
            let tag = if language == "text" { "" } else { language };
            format!("```{tag}\n{content}\n```")
        }
        Node::Blockquote { children } => format!("> {}", inline_markdown(children)),
        Node::EmptyLine => String::new(),
        other => inline_markdown(std::slice::from_ref(other)),
    }
}

fn inline_markdown(nodes: &[Node]) -> String {
    let mut out = String::new();
    for node in nodes {
        match node {
            Node::Text { content } => out.push_str(content),
            Node::Code { content } => {
                out.push('`');
                out.push_str(content);
                out.push('`');
            }
            Node::Bold { children } => {
                out.push_str("**");
                out.push_str(&inline_markdown(children));
                out.push_str("**");
            }
            Node::Italic { children } => {
                out.push('*');
                out.push_str(&inline_markdown(children));
                out.push('*');
            }
            Node::Link { href, children } => {
                out.push_str(&format!("[{}]({href})", inline_markdown(children)));
            }
            Node::Image { src, alt } => out.push_str(&format!("![{alt}]({src})")),
            Node::Paragraph { children } | Node::ListItem { children, .. } => {
                out.push_str(&inline_markdown(children));
            }
            block => out.push_str(&block_markdown(block)),
        }
    }
    out
}
