//! Block scanning.
//!
//! The source is split into lines and scanned top to bottom. Each trimmed
//! line is tried against [`BLOCK_RULES`] in order and the first match
//! wins. Lines no rule claims are gathered into paragraphs.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use super::inline::parse_inline;
use super::types::Node;

/// What a block rule produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BlockSyntax {
    Heading(u8),
    Fence,
    Bullet,
    Ordered,
    Quote,
    Blank,
}

#[derive(Debug)]
struct BlockRule {
    syntax: BlockSyntax,
    pattern: Regex,
}

/// A block produced by a rule along with the number of lines it used.
struct Scanned {
    node: Option<Node>,
    consumed: usize,
}

impl BlockRule {
    fn new(syntax: BlockSyntax, pattern: &str) -> Self {
        Self {
            syntax,
            pattern: Regex::new(pattern).unwrap_or_else(|err| panic!("bad block rule: {err}")),
        }
    }

    fn matches(&self, trimmed: &str) -> bool {
        self.pattern.is_match(trimmed)
    }

    /// Build the block starting at `lines[at]`, whose trimmed form matched.
    fn scan(&self, caps: &Captures<'_>, lines: &[&str], at: usize) -> Scanned {
        let body = || caps.get(1).map_or("", |m| m.as_str());
        let single = |node| Scanned {
            node: Some(node),
            consumed: 1,
        };
        match self.syntax {
            BlockSyntax::Heading(level) => single(Node::heading(level, parse_inline(body()))),
            BlockSyntax::Fence => scan_fence(body(), lines, at),
            BlockSyntax::Bullet => single(Node::ListItem {
                ordered: false,
                children: parse_inline(body()),
            }),
            BlockSyntax::Ordered => single(Node::ListItem {
                ordered: true,
                children: parse_inline(body()),
            }),
            BlockSyntax::Quote => single(Node::Blockquote {
                children: parse_inline(body()),
            }),
            BlockSyntax::Blank => Scanned {
                node: None,
                consumed: 1,
            },
        }
    }
}

// Headings are listed six hashes first so a deeper heading is never read
// as a shallower one with leftover hashes in its text.
static BLOCK_RULES: Lazy<Vec<BlockRule>> = Lazy::new(|| {
    let mut rules: Vec<BlockRule> = (1..=6u8)
        .rev()
        .map(|level| {
            BlockRule::new(
                BlockSyntax::Heading(level),
                &format!(r"^#{{{level}}}\s+(.+)$"),
            )
        })
        .collect();
    rules.extend([
        BlockRule::new(BlockSyntax::Fence, r"^```\s*([^`\s]*)\s*$"),
        BlockRule::new(BlockSyntax::Bullet, r"^[-*]\s+(.*)$"),
        BlockRule::new(BlockSyntax::Ordered, r"^\d+\.\s+(.*)$"),
        BlockRule::new(BlockSyntax::Quote, r"^>\s+(.*)$"),
        BlockRule::new(BlockSyntax::Blank, r"^$"),
    ]);
    rules
});

const DEFAULT_LANGUAGE: &str = "text";
const FENCE: &str = "```";

/// Parse markdown source into an ordered list of block nodes.
///
/// Never fails and never returns an empty list: blank input produces a
/// single empty paragraph.
///
/// # Example
///
/// ```
/// use marknote::document::{parse, Node};
///
/// let nodes = parse("### Hello");
/// assert_eq!(nodes, vec![Node::heading(3, vec![Node::text("Hello")])]);
/// ```
pub fn parse(source: &str) -> Vec<Node> {
    let lines: Vec<&str> = source
        .split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .collect();
    let mut nodes = Vec::new();
    let mut i = 0;

    while i < lines.len() {
        let trimmed = lines[i].trim();
        let scanned = BLOCK_RULES
            .iter()
            .find_map(|rule| {
                rule.pattern
                    .captures(trimmed)
                    .map(|caps| rule.scan(&caps, &lines, i))
            })
            .unwrap_or_else(|| scan_paragraph(&lines, i));

        if let Some(node) = scanned.node {
            nodes.push(node);
        }
        i += scanned.consumed.max(1);
    }

    tracing::debug!(lines = lines.len(), blocks = nodes.len(), "parsed markdown");

    if nodes.is_empty() {
        nodes.push(Node::paragraph(Vec::new()));
    }
    nodes
}

/// Collect a fenced code block. The body is kept verbatim; a fence that is
/// never closed runs to the end of input.
fn scan_fence(language: &str, lines: &[&str], at: usize) -> Scanned {
    let body_start = at + 1;
    let close = lines[body_start..]
        .iter()
        .position(|line| line.trim() == FENCE)
        .map(|offset| body_start + offset);
    let body_end = close.unwrap_or(lines.len());
    let consumed = close.map_or(lines.len(), |c| c + 1) - at;

    let language = if language.is_empty() {
        DEFAULT_LANGUAGE
    } else {
        language
    };
    Scanned {
        node: Some(Node::CodeBlock {
            language: language.to_string(),
            content: lines[body_start..body_end].join("\n"),
        }),
        consumed,
    }
}

/// Gather trimmed lines until a blank line or any other block construct.
fn scan_paragraph(lines: &[&str], at: usize) -> Scanned {
    let mut content = String::new();
    let mut i = at;
    while i < lines.len() {
        let trimmed = lines[i].trim();
        if i > at && BLOCK_RULES.iter().any(|rule| rule.matches(trimmed)) {
            break;
        }
        if !content.is_empty() {
            content.push('\n');
        }
        content.push_str(trimmed);
        i += 1;
    }
    Scanned {
        node: Some(Node::paragraph(parse_inline(&content))),
        consumed: i - at,
    }
}
