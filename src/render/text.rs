//! Plain terminal text output with word wrapping.

use unicode_width::UnicodeWidthStr;

use crate::document::Node;

/// Render a document as wrapped plain text.
///
/// Inline markup is reduced to its text. Blocks are separated by a blank
/// line except runs of list items. `width` is measured in display columns.
pub fn render_text(nodes: &[Node], width: usize) -> String {
    let width = width.max(1);
    let mut lines: Vec<String> = Vec::new();
    let mut number = 0usize;
    let mut prev_item: Option<bool> = None;

    for node in nodes {
        let item = match node {
            Node::ListItem { ordered, .. } => Some(*ordered),
            _ => None,
        };
        if matches!(node, Node::EmptyLine) {
            continue;
        }
        let joins_run = item.is_some() && prev_item.is_some();
        if !lines.is_empty() && !joins_run {
            lines.push(String::new());
        }

        match node {
            Node::Heading { level, children } => {
                let hashes = "#".repeat(usize::from((*level).clamp(1, 6)));
                let prefix = format!("{hashes} ");
                let continuation = " ".repeat(prefix.len());
                lines.extend(wrap(&inline_text(children), width, &prefix, &continuation));
            }
            Node::ListItem { ordered, children } => {
                number = if prev_item == Some(*ordered) { number + 1 } else { 1 };
                let marker = if *ordered {
                    format!("{number}. ")
                } else {
                    "• ".to_string()
                };
                let continuation = " ".repeat(UnicodeWidthStr::width(marker.as_str()));
                lines.extend(wrap(&inline_text(children), width, &marker, &continuation));
            }
            Node::Blockquote { children } => {
                lines.extend(wrap(&inline_text(children), width, "│ ", "│ "));
            }
            Node::CodeBlock { content, .. } => {
                lines.extend(content.split('\n').map(|line| format!("    {line}")));
            }
            other => {
                let text = inline_text(std::slice::from_ref(other));
                lines.extend(wrap(&text, width, "", ""));
            }
        }
        prev_item = item;
    }

    lines.join("\n")
}

fn inline_text(nodes: &[Node]) -> String {
    let mut out = String::new();
    for node in nodes {
        match node {
            Node::Text { content } | Node::CodeBlock { content, .. } => out.push_str(content),
            Node::Code { content } => {
                out.push('`');
                out.push_str(content);
                out.push('`');
            }
            Node::Image { src, alt } => {
                let label = if alt.is_empty() { src } else { alt };
                out.push_str(&format!("[Image: {label}]"));
            }
            Node::EmptyLine => {}
            container => out.push_str(&inline_text(container.children().unwrap_or_default())),
        }
    }
    out
}

/// Wrap text to `width` columns. Hard newlines in the text are kept; the
/// first output line gets `prefix_first`, the rest `prefix_next`.
fn wrap(text: &str, width: usize, prefix_first: &str, prefix_next: &str) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = prefix_first.to_string();
    let mut has_word = false;

    for (i, hard_line) in text.split('\n').enumerate() {
        if i > 0 {
            lines.push(std::mem::replace(&mut current, prefix_next.to_string()));
            has_word = false;
        }
        for word in hard_line.split_whitespace() {
            let needed = usize::from(has_word) + UnicodeWidthStr::width(word);
            if has_word && UnicodeWidthStr::width(current.as_str()) + needed > width {
                lines.push(std::mem::replace(&mut current, prefix_next.to_string()));
                has_word = false;
            }
            if has_word {
                current.push(' ');
            }
            current.push_str(word);
            has_word = true;
        }
    }

    lines.push(current.trim_end().to_string());
    lines
}
