//! Cross-construct parser tests.
//!
//! Single-construct behaviour is covered next to each parser; these tests mix
//! constructs and check the document-level invariants.

use rstest::rstest;

use crate::parsing::{MarkupNode, ProjectionMode, Span, parse_markup, snapshot};

fn reconstruct(src: &str) -> String {
    parse_markup(src)
        .nodes
        .iter()
        .map(|n| n.span().slice(src))
        .collect()
}

#[rstest]
#[case("")]
#[case("plain text only")]
#[case("The [[Sun]] is a {{star|G2V}}.<ref>NASA</ref>")]
#[case("== A ==\n{|\n| x || y\n|}\n'''b''' <!-- c -->")]
#[case("[[unclosed {{also <ref> '''")]
#[case("}}]]|}</ref>-->")]
#[case("Ünïcödé [[Zürich|Zürich]] &amp; ''mäh''")]
#[case("{|\n|-\n{|\n|}\n|}")]
fn top_level_spans_reconstruct_input(#[case] src: &str) {
    assert_eq!(reconstruct(src), src);
    snapshot::invariants(src, &parse_markup(src).nodes);
}

/// Test empty document produces no nodes.
#[test]
fn empty_document() {
    assert!(parse_markup("").nodes.is_empty());
}

/// Test that raw zones don't produce links.
#[test]
fn raw_zones_suppress_parsing() {
    let src = "<pre>[[not a link]] {{nor a template}}</pre>";
    let doc = parse_markup(src);
    assert_eq!(doc.nodes.len(), 1);
    let children = doc.nodes[0].children();
    assert_eq!(children.len(), 1);
    assert!(matches!(children[0], MarkupNode::Text(_)));
}

#[test]
fn link_inside_ref_inside_table_cell() {
    let src = "{|\n| a<ref>[[B]]</ref>\n|}";
    let doc = parse_markup(src);
    snapshot::invariants(src, &doc.nodes);
    assert_eq!(doc.render_plain(src, ProjectionMode::Full), "aB");
    assert_eq!(doc.render_plain(src, ProjectionMode::Stripped), "");
}

#[test]
fn heading_inside_paragraph_flow() {
    let src = "intro\n=== Sub ===\nbody";
    let kinds: Vec<_> = parse_markup(src)
        .nodes
        .iter()
        .map(|n| n.kind_name())
        .collect();
    assert_eq!(kinds, vec!["Text", "Heading", "Text"]);
}

#[test]
fn parse_range_respects_line_start_context() {
    let src = "x\n== H ==";
    let nodes = crate::parsing::parse_range(src, Span::new(2, src.len()));
    assert_eq!(nodes[0].kind_name(), "Heading");

    let nodes = crate::parsing::parse_range(src, Span::new(3, src.len()));
    assert_eq!(nodes[0].kind_name(), "Text");
}
