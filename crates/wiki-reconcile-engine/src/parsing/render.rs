use html_escape::decode_html_entities;
use serde::{Deserialize, Serialize};

use super::{
    kinds::{HtmlTag, Table, WikiLink},
    types::{MarkupNode, TableRow},
};

/// How markup is rendered to plain text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectionMode {
    /// Tables flattened to `" | "`-joined rows, citation content kept.
    #[default]
    Full,
    /// Tables and citation/reference tags dropped with their content.
    Stripped,
}

impl MarkupNode {
    /// Renders this node to plain text.
    ///
    /// Wrapping markup is discarded; templates, comments and quote runs render
    /// nothing. Text is entity-decoded.
    pub fn render_plain(&self, src: &str, mode: ProjectionMode) -> String {
        let mut out = String::new();
        self.render_into(src, mode, &mut out);
        out
    }

    fn render_into(&self, src: &str, mode: ProjectionMode, out: &mut String) {
        match self {
            MarkupNode::Text(sp) => out.push_str(&decode_html_entities(sp.slice(src))),
            MarkupNode::Link {
                target,
                display,
                external,
                children,
                ..
            } => {
                let target = target.slice(src);
                if !external && WikiLink::is_silent(target) {
                    return;
                }
                if display.is_some() {
                    render_all(children, src, mode, out);
                } else if *external {
                    out.push_str(target);
                } else {
                    out.push_str(target.strip_prefix(WikiLink::ESCAPE).unwrap_or(target));
                }
            }
            MarkupNode::Tag { name, children, .. } => {
                if mode == ProjectionMode::Stripped && HtmlTag::is_citation(name) {
                    return;
                }
                render_all(children, src, mode, out);
            }
            MarkupNode::Table { rows, .. } => {
                if mode == ProjectionMode::Full {
                    out.push_str(&render_rows(rows, src, mode));
                }
            }
            MarkupNode::Heading { title, .. } => render_all(title, src, mode, out),
            MarkupNode::Macro { .. } | MarkupNode::Comment(_) | MarkupNode::Format(_) => {}
        }
    }
}

/// Renders a node sequence, concatenating each node's plain text.
pub fn render_nodes(nodes: &[MarkupNode], src: &str, mode: ProjectionMode) -> String {
    let mut out = String::new();
    render_all(nodes, src, mode, &mut out);
    out
}

fn render_all(nodes: &[MarkupNode], src: &str, mode: ProjectionMode, out: &mut String) {
    for node in nodes {
        node.render_into(src, mode, out);
    }
}

/// Flattens table rows: cells trimmed and joined, rows without cells skipped.
fn render_rows(rows: &[TableRow], src: &str, mode: ProjectionMode) -> String {
    rows.iter()
        .filter(|row| !row.cells.is_empty())
        .map(|row| {
            row.cells
                .iter()
                .map(|cell| render_nodes(&cell.children, src, mode).trim().to_string())
                .collect::<Vec<_>>()
                .join(Table::RENDER_CELL_JOIN)
        })
        .collect::<Vec<_>>()
        .join(Table::RENDER_ROW_JOIN)
}
