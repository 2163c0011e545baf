//! End-to-end behavior of parsing and rendering.

use marknote::document::{Node, NodeKind, headings, parse, to_markdown};
use marknote::render::{Components, Element, render, render_text, render_with_components};

fn text(s: &str) -> Node {
    Node::text(s)
}

#[test]
fn test_heading_level_three() {
    let nodes = parse("### Hello");
    assert_eq!(nodes.len(), 1);
    assert_eq!(nodes[0].kind(), NodeKind::Heading);
    assert_eq!(nodes[0].attribute("level").as_deref(), Some("3"));
    assert_eq!(nodes[0].children(), Some(&[text("Hello")][..]));
}

#[test]
fn test_seven_hashes_fall_through_to_paragraph() {
    let nodes = parse("####### Hello");
    assert_eq!(nodes, vec![Node::paragraph(vec![text("####### Hello")])]);
}

#[test]
fn test_inline_leftmost_match_wins() {
    let nodes = parse("a *b* **c** d");
    assert_eq!(nodes.len(), 1);
    let children = nodes[0].children().expect("paragraph children");
    assert_eq!(
        children,
        &[
            text("a "),
            Node::Italic {
                children: vec![text("b")]
            },
            text(" "),
            Node::Bold {
                children: vec![text("c")]
            },
            text(" d"),
        ]
    );
}

#[test]
fn test_script_is_escaped() {
    let html = render(&parse("<script>alert(1)</script>"));
    assert!(!html.contains("<script>"), "unescaped script in {html}");
}

#[test]
fn test_image_and_link_disambiguation() {
    let image = parse("![alt](x.png)");
    let children = image[0].children().expect("paragraph");
    assert_eq!(children.len(), 1);
    assert_eq!(children[0].kind(), NodeKind::Image);

    let link = parse("[text](url)");
    let children = link[0].children().expect("paragraph");
    assert_eq!(children.len(), 1);
    assert_eq!(children[0].kind(), NodeKind::Link);
    assert_eq!(children[0].attribute("href").as_deref(), Some("url"));
}

#[test]
fn test_paragraph_boundary_before_heading() {
    let nodes = parse("para one\n# Heading\npara two");
    let kinds: Vec<_> = nodes.iter().map(Node::kind).collect();
    assert_eq!(
        kinds,
        vec![NodeKind::Paragraph, NodeKind::Heading, NodeKind::Paragraph]
    );
    assert_eq!(nodes[0].children(), Some(&[text("para one")][..]));
    assert_eq!(nodes[2].children(), Some(&[text("para two")][..]));
}

#[test]
fn test_fixture_renders_every_block_kind() {
    let source = include_str!("fixtures/simple.md");
    let nodes = parse(source);
    let html = render(&nodes);

    assert!(html.starts_with("<h1>Weekly notes</h1>"));
    assert!(html.contains("<strong>calendar</strong>"));
    assert!(html.contains("<code>task_id</code>"));
    assert!(html.contains("<a href=\"https://example.com/tickets/42\">support</a>"));
    assert!(html.contains("<li>Review <em>pull requests</em></li>"));
    assert!(html.contains("<blockquote>Done is better than perfect.</blockquote>"));
    assert!(html.contains("<pre><code class=\"language-rust\">fn main() {\n"));
    assert!(html.contains("hello &lt;notes&gt;"));
    assert!(html.contains("<img src=\"images/flow.png\" alt=\"diagram\" />"));
    assert!(html.ends_with("unclosed `tick.</p>"));

    let toc: Vec<_> = headings(&nodes).into_iter().map(|h| h.text).collect();
    assert_eq!(toc, vec!["Weekly notes", "Tasks", "Snippet"]);

    let ordered = nodes
        .iter()
        .filter(|n| n.attribute("ordered").is_some())
        .count();
    assert_eq!(ordered, 3);
}

#[test]
fn test_fixture_survives_markdown_round_trip() {
    let nodes = parse(include_str!("fixtures/simple.md"));
    assert_eq!(parse(&to_markdown(&nodes)), nodes);
}

#[test]
fn test_components_override_for_host_widgets() {
    let components = Components::new()
        .with(NodeKind::CodeBlock, |node, _| {
            Element::tag("CodeView")
                .with_attr("lang", node.attribute("language").unwrap_or_default())
                .with_children(vec![Element::text(node.content().unwrap_or_default())])
        })
        .with(NodeKind::Image, |node, _| {
            Element::tag("Thumbnail").with_attr("uri", node.attribute("src").unwrap_or_default())
        });
    let nodes = parse("```py\nprint(1)\n```\n\n![x](a.png)");
    let tree = render_with_components(&nodes, &components);

    let Element::Fragment(blocks) = &tree else {
        panic!("expected fragment root, got {tree:?}");
    };
    assert_eq!(blocks[0].attr("lang"), Some("py"));
    assert_eq!(blocks[0].text_content(), "print(1)");
    assert_eq!(
        tree.to_html(),
        "<CodeView lang=\"py\">print(1)</CodeView><p><Thumbnail uri=\"a.png\"></Thumbnail></p>"
    );
}

#[test]
fn test_text_output_for_fixture_wraps() {
    let nodes = parse(include_str!("fixtures/simple.md"));
    let out = render_text(&nodes, 40);
    for line in out.lines().filter(|l| !l.starts_with("    ")) {
        assert!(
            unicode_width::UnicodeWidthStr::width(line) <= 40 || !line.contains(' '),
            "line exceeds width: {line}"
        );
    }
    assert!(out.contains("• Review pull requests"));
    assert!(out.contains("3. Publish"));
}

mod property_tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn parse_is_never_empty(source in any::<String>()) {
            prop_assert!(!parse(&source).is_empty());
        }

        #[test]
        fn blank_input_is_one_empty_paragraph(source in "[ \t\r\n]{0,40}") {
            prop_assert_eq!(parse(&source), vec![Node::paragraph(vec![])]);
        }

        #[test]
        fn render_is_deterministic(source in any::<String>()) {
            prop_assert_eq!(render(&parse(&source)), render(&parse(&source)));
        }

        #[test]
        fn script_never_survives(
            before in "[-#*>`!\\[\\]()a-z \n]{0,40}",
            after in "[-#*>`!\\[\\]()a-z \n]{0,40}",
        ) {
            let source = format!("{before}<script>x</script>{after}");
            let html = render(&parse(&source));
            prop_assert!(!html.contains("<script"));
        }

        #[test]
        fn default_components_match_html(source in "[-#*>`!\\[\\]()a-z0-9 .\n]{0,120}") {
            let nodes = parse(&source);
            let element = render_with_components(&nodes, &Components::new());
            prop_assert_eq!(element.to_html(), render(&nodes));
        }

        #[test]
        fn markdown_round_trip_is_stable(source in "[-#*>`!\\[\\]()a-z0-9 .\n]{0,120}") {
            let nodes = parse(&source);
            prop_assert_eq!(parse(&to_markdown(&nodes)), nodes);
        }

        #[test]
        fn nodes_are_leaf_or_container(source in "[-#*>`!\\[\\]()a-z \n]{0,80}") {
            fn check(node: &Node) -> bool {
                !(node.is_leaf() && node.is_container())
                    && node.children().unwrap_or_default().iter().all(check)
            }
            prop_assert!(parse(&source).iter().all(check));
        }
    }
}
