use crate::parsing::{MarkupNode, Span};

/// Validates parser output invariants.
///
/// Asserts that:
/// - Top-level node spans tile the document with no gaps or overlaps
/// - Every span is in bounds and sits on char boundaries
/// - Child, row and cell spans are contained within their parent span
///
/// # Panics
/// Panics with a descriptive message if any invariant is violated.
pub fn check(src: &str, nodes: &[MarkupNode]) {
    let mut expected = 0usize;
    for node in nodes {
        let sp = node.span();
        assert_eq!(
            sp.start, expected,
            "top-level spans not contiguous at {:?} (expected start {})",
            sp, expected
        );
        expected = sp.end;
        check_node(src, node, Span::new(0, src.len()));
    }
    assert_eq!(
        expected,
        src.len(),
        "top-level spans end at {} but document length is {}",
        expected,
        src.len()
    );
}

fn check_node(src: &str, node: &MarkupNode, parent: Span) {
    let sp = node.span();
    check_span(src, sp, parent, node.kind_name());

    if let MarkupNode::Table { rows, .. } = node {
        for row in rows {
            check_span(src, row.span, sp, "Row");
            for cell in &row.cells {
                check_span(src, cell.span, row.span, "Cell");
                check_span(src, cell.content, cell.span, "CellContent");
                for child in &cell.children {
                    check_node(src, child, cell.content);
                }
            }
        }
        return;
    }

    for child in node.children() {
        check_node(src, child, sp);
    }
}

fn check_span(src: &str, sp: Span, parent: Span, what: &str) {
    assert!(
        sp.start <= sp.end && sp.end <= src.len(),
        "{what} span out of bounds: {:?} (doc len: {})",
        sp,
        src.len()
    );
    assert!(
        src.is_char_boundary(sp.start) && src.is_char_boundary(sp.end),
        "{what} span splits a char: {:?}",
        sp
    );
    assert!(
        parent.contains(sp),
        "{what} span not contained in parent: {:?}, parent {:?}",
        sp,
        parent
    );
}
