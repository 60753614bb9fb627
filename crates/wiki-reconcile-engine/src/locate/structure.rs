//! Cut points that keep markup constructs whole.
//!
//! A located span may only start and end between the children of one
//! [`Region`]: the document itself, a link's display text, a tag's content, a
//! table cell or a heading title. Splicing over such a span never leaves half
//! a construct behind.

use crate::{
    parsing::{MarkupNode, ParsedDoc, Span},
    projection::entity_spans,
};

/// A stretch of markup whose children may be cut between but not through.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Region {
    pub bounds: Span,
    /// Child constructs and character references, sorted and disjoint.
    atoms: Vec<Span>,
}

impl Region {
    fn new(src: &str, bounds: Span, children: &[MarkupNode]) -> Self {
        let mut atoms = vec![];
        for child in children {
            match child {
                MarkupNode::Text(sp) => atoms.extend(entity_spans(src, *sp)),
                other => atoms.push(other.span()),
            }
        }
        Self { bounds, atoms }
    }

    /// The atom `offset` falls strictly inside, if any.
    fn atom_around(&self, offset: usize) -> Option<Span> {
        let idx = self.atoms.partition_point(|a| a.end <= offset);
        self.atoms.get(idx).copied().filter(|a| a.start < offset)
    }

    /// Whether `offset` lies in the region without splitting a child.
    pub fn is_cut(&self, offset: usize) -> bool {
        self.bounds.start <= offset && offset <= self.bounds.end && self.atom_around(offset).is_none()
    }

    /// `offset`, moved back to the start of the child it splits.
    pub fn floor_cut(&self, offset: usize) -> usize {
        self.atom_around(offset).map_or(offset, |a| a.start)
    }

    /// `offset`, moved forward to the end of the child it splits.
    pub fn ceil_cut(&self, offset: usize) -> usize {
        self.atom_around(offset).map_or(offset, |a| a.end)
    }
}

/// The document region plus every nested region, in document order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Structure {
    document: Region,
    inner: Vec<Region>,
}

impl Structure {
    pub fn new(src: &str, doc: &ParsedDoc) -> Self {
        let mut inner = vec![];
        collect(src, &doc.nodes, &mut inner);
        Self {
            document: Region::new(src, Span::new(0, src.len()), &doc.nodes),
            inner,
        }
    }

    pub fn document(&self) -> &Region {
        &self.document
    }

    /// Nested regions lying wholly inside `span` and smaller than it.
    pub fn inner_within(&self, span: Span) -> impl Iterator<Item = &Region> {
        self.inner
            .iter()
            .filter(move |r| span.contains(r.bounds) && r.bounds.len() < span.len())
    }
}

fn collect(src: &str, nodes: &[MarkupNode], out: &mut Vec<Region>) {
    for node in nodes {
        match node {
            MarkupNode::Link {
                display: Some(display),
                children,
                ..
            } => {
                out.push(Region::new(src, *display, children));
                collect(src, children, out);
            }
            MarkupNode::Tag {
                inner: Some(inner),
                children,
                ..
            } => {
                out.push(Region::new(src, *inner, children));
                collect(src, children, out);
            }
            MarkupNode::Table { rows, .. } => {
                for cell in rows.iter().flat_map(|r| r.cells.iter()) {
                    out.push(Region::new(src, cell.content, &cell.children));
                    collect(src, &cell.children, out);
                }
            }
            MarkupNode::Heading { title, .. } => {
                if let (Some(first), Some(last)) = (title.first(), title.last()) {
                    let bounds = Span::new(first.span().start, last.span().end);
                    out.push(Region::new(src, bounds, title));
                }
                collect(src, title, out);
            }
            _ => {}
        }
    }
}
