//! # Markup Model
//!
//! Lossless, span-based parsing of wiki markup. Nodes never copy text: every
//! node stores byte spans into the source, and the top-level spans tile the
//! document exactly. Malformed constructs degrade to text, so parsing is total.
//!
//! - [`parser`]: the cursor-driven main loop and inline constructs
//! - [`blocks`]: line-start constructs (headings, tables)
//! - [`kinds`]: delimiter constants per construct
//! - [`render`]: plain-text rendering per node
//! - [`snapshot`]: outline and invariant helpers for tests

pub mod blocks;
pub mod cursor;
pub mod kinds;
pub mod parser;
pub mod render;
pub mod snapshot;
pub mod span;
pub mod types;

#[cfg(test)]
mod tests;

pub use parser::parse_range;
pub use render::{ProjectionMode, render_nodes};
pub use span::Span;
pub use types::{MarkupNode, TableCell, TableRow};

/// Result of parsing a whole document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedDoc {
    pub nodes: Vec<MarkupNode>,
}

impl ParsedDoc {
    /// Renders the whole document to plain text.
    pub fn render_plain(&self, src: &str, mode: ProjectionMode) -> String {
        render_nodes(&self.nodes, src, mode)
    }
}

/// Parses an entire markup document.
pub fn parse_markup(src: &str) -> ParsedDoc {
    ParsedDoc {
        nodes: parse_range(src, Span::new(0, src.len())),
    }
}
