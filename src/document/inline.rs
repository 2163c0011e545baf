//! Inline scanning: code spans, emphasis, links and images.
//!
//! Every step searches the unconsumed suffix with each rule in the table
//! and keeps the match that starts earliest. Ties go to the rule declared
//! first, so the table order matters only for matches at the same index.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use super::types::Node;

/// What an inline rule produces from its captures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum InlineSyntax {
    Code,
    Bold,
    Italic,
    Image,
    Link,
}

#[derive(Debug)]
struct InlineRule {
    syntax: InlineSyntax,
    pattern: Regex,
}

impl InlineRule {
    fn new(syntax: InlineSyntax, pattern: &str) -> Self {
        Self {
            syntax,
            pattern: Regex::new(pattern).unwrap_or_else(|err| panic!("bad inline rule: {err}")),
        }
    }

    fn build(&self, caps: &Captures<'_>) -> Node {
        let group = |i: usize| caps.get(i).map_or("", |m| m.as_str()).to_string();
        match self.syntax {
            InlineSyntax::Code => Node::Code { content: group(1) },
            InlineSyntax::Bold => Node::Bold {
                children: vec![Node::text(group(1))],
            },
            InlineSyntax::Italic => Node::Italic {
                children: vec![Node::text(group(1))],
            },
            InlineSyntax::Image => Node::Image {
                alt: group(1),
                src: group(2),
            },
            InlineSyntax::Link => Node::Link {
                children: vec![Node::text(group(1))],
                href: group(2),
            },
        }
    }
}

static INLINE_RULES: Lazy<Vec<InlineRule>> = Lazy::new(|| {
    vec![
        InlineRule::new(InlineSyntax::Code, r"`([^`]+)`"),
        InlineRule::new(InlineSyntax::Bold, r"\*\*([^*]+)\*\*"),
        InlineRule::new(InlineSyntax::Italic, r"\*([^*]+)\*"),
        InlineRule::new(InlineSyntax::Image, r"!\[([^\]]*)\]\(([^)]+)\)"),
        InlineRule::new(InlineSyntax::Link, r"\[([^\]]+)\]\(([^)]+)\)"),
    ]
});

/// Split a block's raw text into inline nodes.
///
/// Text between recognized constructs becomes `Text` nodes; adjacent text
/// is coalesced. Empty input yields no nodes.
///
/// ```
/// use marknote::document::{parse_inline, Node};
///
/// let nodes = parse_inline("see `x`");
/// assert_eq!(nodes[0], Node::text("see "));
/// assert_eq!(nodes[1], Node::Code { content: "x".to_string() });
/// ```
pub fn parse_inline(text: &str) -> Vec<Node> {
    scan_with(&INLINE_RULES, text)
}

/// Scan `text` against an ordered rule table.
fn scan_with(rules: &[InlineRule], text: &str) -> Vec<Node> {
    let mut nodes = Vec::new();
    let mut pending = String::new();
    let mut rest = text;

    while !rest.is_empty() {
        let Some((start, rule, caps)) = earliest_match(rules, rest) else {
            pending.push_str(rest);
            break;
        };

        let whole = caps.get(0).map_or(0..0, |m| m.range());
        pending.push_str(&rest[..start]);

        if whole.is_empty() {
            // Guarantee forward progress on an empty match.
            let step = rest[start..].chars().next().map_or(0, char::len_utf8);
            pending.push_str(&rest[start..start + step]);
            rest = &rest[start + step..];
            continue;
        }

        flush_text(&mut pending, &mut nodes);
        tracing::trace!(rule = ?rule.syntax, at = start, "inline match");
        nodes.push(rule.build(&caps));
        rest = &rest[whole.end..];
    }

    flush_text(&mut pending, &mut nodes);
    nodes
}

fn earliest_match<'r, 'h>(
    rules: &'r [InlineRule],
    haystack: &'h str,
) -> Option<(usize, &'r InlineRule, Captures<'h>)> {
    let mut best: Option<(usize, &'r InlineRule, Captures<'h>)> = None;
    for rule in rules {
        let Some(caps) = rule.pattern.captures(haystack) else {
            continue;
        };
        let start = caps.get(0).map_or(0, |m| m.start());
        if best.as_ref().is_none_or(|(best_start, _, _)| start < *best_start) {
            best = Some((start, rule, caps));
        }
    }
    best
}

fn flush_text(pending: &mut String, nodes: &mut Vec<Node>) {
    if !pending.is_empty() {
        nodes.push(Node::text(std::mem::take(pending)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bold(s: &str) -> Node {
        Node::Bold {
            children: vec![Node::text(s)],
        }
    }

    fn italic(s: &str) -> Node {
        Node::Italic {
            children: vec![Node::text(s)],
        }
    }

    #[test]
    fn test_empty_input_yields_no_nodes() {
        assert!(parse_inline("").is_empty());
    }

    #[test]
    fn test_plain_text_is_single_text_node() {
        assert_eq!(parse_inline("just words"), vec![Node::text("just words")]);
    }

    #[test]
    fn test_leftmost_match_wins_over_rule_order() {
        let nodes = parse_inline("a *b* **c** d");
        assert_eq!(
            nodes,
            vec![
                Node::text("a "),
                italic("b"),
                Node::text(" "),
                bold("c"),
                Node::text(" d"),
            ]
        );
    }

    #[test]
    fn test_bold_beats_italic_at_same_position() {
        assert_eq!(parse_inline("**x**"), vec![bold("x")]);
    }

    #[test]
    fn test_triple_star_is_consumed_as_bold_with_stray_stars() {
        let nodes = parse_inline("***both***");
        assert_eq!(nodes, vec![Node::text("*"), bold("both"), Node::text("*")]);
    }

    #[test]
    fn test_code_span_content_is_raw() {
        assert_eq!(
            parse_inline("`**not bold**`"),
            vec![Node::Code {
                content: "**not bold**".to_string()
            }]
        );
    }

    #[test]
    fn test_image_is_not_a_link_with_bang() {
        let nodes = parse_inline("![alt](x.png)");
        assert_eq!(
            nodes,
            vec![Node::Image {
                src: "x.png".to_string(),
                alt: "alt".to_string()
            }]
        );
    }

    #[test]
    fn test_image_with_empty_alt() {
        let nodes = parse_inline("![](pic.jpg)");
        assert_eq!(nodes[0].attribute("alt").as_deref(), Some(""));
        assert_eq!(nodes[0].attribute("src").as_deref(), Some("pic.jpg"));
    }

    #[test]
    fn test_link_has_text_child_and_href() {
        let nodes = parse_inline("go [home](https://example.com) now");
        assert_eq!(nodes.len(), 3);
        assert_eq!(
            nodes[1],
            Node::Link {
                href: "https://example.com".to_string(),
                children: vec![Node::text("home")],
            }
        );
        assert_eq!(nodes[2], Node::text(" now"));
    }

    #[test]
    fn test_unclosed_delimiters_stay_text() {
        assert_eq!(
            parse_inline("2 * 3 and `tick"),
            vec![Node::text("2 * 3 and `tick")]
        );
    }

    #[test]
    fn test_whitespace_runs_between_matches_are_kept() {
        let nodes = parse_inline("`a` `b`");
        assert_eq!(nodes[1], Node::text(" "));
        assert_eq!(nodes.len(), 3);
    }

    #[test]
    fn test_multibyte_text_around_matches() {
        let nodes = parse_inline("héllo *wörld* ✓");
        assert_eq!(
            nodes,
            vec![Node::text("héllo "), italic("wörld"), Node::text(" ✓")]
        );
    }

    #[test]
    fn test_empty_matches_step_over_text_and_terminate() {
        let rules = [InlineRule::new(InlineSyntax::Code, "(x*)")];

        assert_eq!(scan_with(&rules, "ab"), vec![Node::text("ab")]);
        assert_eq!(scan_with(&rules, "日本"), vec![Node::text("日本")]);
        assert_eq!(
            scan_with(&rules, "axb"),
            vec![
                Node::text("a"),
                Node::Code {
                    content: "x".to_string()
                },
                Node::text("b"),
            ]
        );
    }

    #[test]
    fn test_scan_with_shipped_rules_matches_parse_inline() {
        let text = "a `b` **c** [d](e)";
        assert_eq!(scan_with(&INLINE_RULES, text), parse_inline(text));
    }
}
