//! Node tree to HTML string.

use crate::document::Node;

use super::escape::{Escape, HtmlEscaper};

/// Render a document to HTML using the default escaper.
///
/// # Example
///
/// ```
/// use marknote::document::parse;
/// use marknote::render::render;
///
/// assert_eq!(render(&parse("# Hi *there*")), "<h1>Hi <em>there</em></h1>");
/// ```
pub fn render(nodes: &[Node]) -> String {
    HtmlRenderer::<HtmlEscaper>::default().render(nodes)
}

/// Render a document to HTML with a caller-supplied escaper.
pub fn render_with<E: Escape>(nodes: &[Node], escaper: E) -> String {
    HtmlRenderer::new(escaper).render(nodes)
}

/// Deterministic tree walk producing HTML.
#[derive(Debug, Clone, Default)]
pub struct HtmlRenderer<E = HtmlEscaper> {
    escaper: E,
}

impl<E: Escape> HtmlRenderer<E> {
    pub const fn new(escaper: E) -> Self {
        Self { escaper }
    }

    pub fn render(&self, nodes: &[Node]) -> String {
        let mut out = String::new();
        for node in nodes {
            self.write_node(node, &mut out);
        }
        out
    }

    fn write_children(&self, children: &[Node], out: &mut String) {
        for child in children {
            self.write_node(child, out);
        }
    }

    fn wrap(&self, tag: &str, children: &[Node], out: &mut String) {
        out.push('<');
        out.push_str(tag);
        out.push('>');
        self.write_children(children, out);
        out.push_str("</");
        out.push_str(tag);
        out.push('>');
    }

    fn write_node(&self, node: &Node, out: &mut String) {
        let esc = |s: &str| self.escaper.escape(s).into_owned();
        match node {
            Node::Heading { level, children } => {
                let tag = format!("h{}", (*level).clamp(1, 6));
                self.wrap(&tag, children, out);
            }
            Node::Paragraph { children } => self.wrap("p", children, out),
            Node::Bold { children } => self.wrap("strong", children, out),
            Node::Italic { children } => self.wrap("em", children, out),
            Node::ListItem { children, .. } => self.wrap("li", children, out),
            Node::Blockquote { children } => self.wrap("blockquote", children, out),
            Node::Code { content } => {
                out.push_str("<code>");
                out.push_str(&esc(content));
                out.push_str("</code>");
            }
            Node::CodeBlock { language, content } => {
                out.push_str(&format!(
                    "<pre><code class=\"language-{}\">{}</code></pre>",
                    esc(language),
                    esc(content)
                ));
            }
            Node::Link { href, children } => {
                out.push_str(&format!("<a href=\"{}\">", esc(href)));
                self.write_children(children, out);
                out.push_str("</a>");
            }
            Node::Image { src, alt } => {
                out.push_str(&format!(
                    "<img src=\"{}\" alt=\"{}\" />",
                    esc(src),
                    esc(alt)
                ));
            }
            Node::Text { content } => {
                out.push_str(&esc(content).replace('\n', "<br>"));
            }
            Node::EmptyLine => {}
        }
    }
}
