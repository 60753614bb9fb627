use std::{collections::BTreeMap, fmt};

use serde::Serialize;

use crate::parsing::{MarkupNode, Span, TableRow};

/// Snapshot of a parsed document for testing with `insta`.
///
/// Renders as an indented outline, one node per line.
#[derive(Debug, Serialize)]
pub struct Snap {
    /// Top-level nodes in document order.
    pub nodes: Vec<NodeSnap>,
}

/// Snapshot of a single node.
#[derive(Debug, Serialize)]
pub struct NodeSnap {
    /// Node kind (e.g. "Text", "Link", "Tag(ref)", "Heading(2)", "Row").
    pub kind: String,
    /// Byte span as (start, end) tuple.
    pub span: (usize, usize),
    /// Preview of the source text (truncated for readability).
    pub text: String,
    /// Named sub-spans (e.g. target, display, name).
    pub parts: BTreeMap<String, (usize, usize)>,
    pub children: Vec<NodeSnap>,
}

const PREVIEW_MAX: usize = 60;

/// Extracts text for a span, truncating to `max` bytes (on a char boundary)
/// with a "..." suffix if needed.
pub fn preview(src: &str, sp: Span, max: usize) -> String {
    let text = sp.slice(src);
    if text.len() <= max {
        return text.to_string();
    }
    let mut cut = max;
    while !text.is_char_boundary(cut) {
        cut -= 1;
    }
    format!("{}...", &text[..cut])
}

pub fn normalize(src: &str, nodes: &[MarkupNode]) -> Snap {
    Snap {
        nodes: nodes.iter().map(|n| node_snap(src, n)).collect(),
    }
}

fn node_snap(src: &str, node: &MarkupNode) -> NodeSnap {
    let sp = node.span();
    let mut parts = BTreeMap::new();
    let mut kind = node.kind_name().to_string();
    let mut children: Vec<NodeSnap> = vec![];

    match node {
        MarkupNode::Link {
            target, display, ..
        } => {
            parts.insert("target".into(), (target.start, target.end));
            if let Some(d) = display {
                parts.insert("display".into(), (d.start, d.end));
            }
        }
        MarkupNode::Macro { name, args, .. } => {
            parts.insert("name".into(), (name.start, name.end));
            for (i, arg) in args.iter().enumerate() {
                parts.insert(format!("arg{i}"), (arg.start, arg.end));
            }
        }
        MarkupNode::Tag { name, inner, .. } => {
            kind = format!("Tag({name})");
            if let Some(inner) = inner {
                parts.insert("inner".into(), (inner.start, inner.end));
            }
        }
        MarkupNode::Heading { level, .. } => {
            kind = format!("Heading({level})");
        }
        MarkupNode::Table { rows, .. } => {
            children = rows.iter().map(|r| row_snap(src, r)).collect();
        }
        MarkupNode::Text(_) | MarkupNode::Comment(_) | MarkupNode::Format(_) => {}
    }

    if !matches!(node, MarkupNode::Table { .. }) {
        children = node
            .children()
            .into_iter()
            .map(|c| node_snap(src, c))
            .collect();
    }

    NodeSnap {
        kind,
        span: (sp.start, sp.end),
        text: preview(src, sp, PREVIEW_MAX),
        parts,
        children,
    }
}

fn row_snap(src: &str, row: &TableRow) -> NodeSnap {
    let cells = row
        .cells
        .iter()
        .map(|cell| {
            let mut parts = BTreeMap::new();
            parts.insert("content".into(), (cell.content.start, cell.content.end));
            NodeSnap {
                kind: if cell.header { "HeaderCell" } else { "Cell" }.into(),
                span: (cell.span.start, cell.span.end),
                text: preview(src, cell.span, PREVIEW_MAX),
                parts,
                children: cell.children.iter().map(|c| node_snap(src, c)).collect(),
            }
        })
        .collect();

    NodeSnap {
        kind: "Row".into(),
        span: (row.span.start, row.span.end),
        text: preview(src, row.span, PREVIEW_MAX),
        parts: BTreeMap::new(),
        children: cells,
    }
}

impl fmt::Display for Snap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for node in &self.nodes {
            node.write_outline(f, 0)?;
        }
        Ok(())
    }
}

impl NodeSnap {
    fn write_outline(&self, f: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
        write!(
            f,
            "{:indent$}{} {}..{}",
            "",
            self.kind,
            self.span.0,
            self.span.1,
            indent = depth * 2
        )?;
        for (name, (start, end)) in &self.parts {
            write!(f, " {name}={start}..{end}")?;
        }
        writeln!(f, " {:?}", self.text)?;
        for child in &self.children {
            child.write_outline(f, depth + 1)?;
        }
        Ok(())
    }
}
