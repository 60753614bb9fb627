//! # Plaintext Projector
//!
//! Renders a markup document to plain text in one left-to-right walk and
//! records, per rendered piece, which plain range came from which markup
//! range. The map is built from the raw per-node renderings; whitespace
//! normalization is a separate derived view ([`NormalizedText`]).

pub mod normalize;

use std::sync::OnceLock;

use html_escape::decode_html_entities;
use regex::Regex;
use serde::Serialize;

use crate::parsing::{MarkupNode, ParsedDoc, Span, parse_markup};

pub use crate::parsing::ProjectionMode;
pub use normalize::{NormalizedText, normalize_whitespace};

/// One rendered piece of the projection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Segment {
    /// Range in the plain text.
    pub plain: Span,
    /// Range in the markup that produced it.
    pub markup: Span,
    /// Rendered text is byte-identical to the markup, so offsets inside the
    /// segment map one to one.
    pub verbatim: bool,
}

/// Ordered correspondence between plain-text and markup offsets.
///
/// Plain ranges are contiguous from 0; markup ranges are non-overlapping and
/// non-decreasing, with gaps where markup rendered to nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProjectionMap {
    segments: Vec<Segment>,
    markup_len: usize,
}

impl ProjectionMap {
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Total length of the plain text.
    pub fn plain_len(&self) -> usize {
        self.segments.last().map_or(0, |s| s.plain.end)
    }

    fn push(&mut self, rendered: &str, markup: Span, verbatim: bool) {
        if rendered.is_empty() {
            return;
        }
        let start = self.plain_len();
        self.segments.push(Segment {
            plain: Span::new(start, start + rendered.len()),
            markup,
            verbatim,
        });
    }

    /// Maps a plain-text start offset to the markup offset where the piece
    /// containing it begins. Inside verbatim segments the mapping is exact.
    pub fn to_markup_start(&self, plain: usize) -> usize {
        let idx = self.segments.partition_point(|s| s.plain.end <= plain);
        match self.segments.get(idx) {
            Some(seg) if seg.verbatim => seg.markup.start + (plain - seg.plain.start),
            Some(seg) => seg.markup.start,
            None => self.markup_len,
        }
    }

    /// Maps an exclusive plain-text end offset to the markup offset where the
    /// piece containing it ends. Inside verbatim segments the mapping is exact.
    pub fn to_markup_end(&self, plain: usize) -> usize {
        if plain == 0 {
            return self.segments.first().map_or(0, |s| s.markup.start);
        }
        let idx = self.segments.partition_point(|s| s.plain.end < plain);
        match self.segments.get(idx) {
            Some(seg) if seg.verbatim => seg.markup.start + (plain - seg.plain.start),
            Some(seg) => seg.markup.end,
            None => self.markup_len,
        }
    }
}

/// Plain text plus the map back to the markup it came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Projection {
    pub text: String,
    pub map: ProjectionMap,
}

impl Projection {
    /// Whitespace-normalized comparison view of the text.
    pub fn normalized(&self) -> NormalizedText {
        NormalizedText::new(&self.text)
    }
}

/// Matches a single HTML character reference.
fn entity_regex() -> &'static Regex {
    static ENTITY_REGEX: OnceLock<Regex> = OnceLock::new();
    ENTITY_REGEX.get_or_init(|| {
        Regex::new(r"&(?:#[0-9]+|#[xX][0-9a-fA-F]+|[A-Za-z][A-Za-z0-9]*);")
            .expect("Invalid entity regex")
    })
}

/// Spans of the character references inside a text span.
pub(crate) fn entity_spans(src: &str, sp: Span) -> impl Iterator<Item = Span> + '_ {
    entity_regex()
        .find_iter(sp.slice(src))
        .map(move |m| Span::new(sp.start + m.start(), sp.start + m.end()))
}

/// Projects `markup` to plain text, recording the offset map.
pub fn project(markup: &str, mode: ProjectionMode) -> Projection {
    project_parsed(markup, &parse_markup(markup), mode)
}

/// Projects an already-parsed document.
pub fn project_parsed(markup: &str, doc: &ParsedDoc, mode: ProjectionMode) -> Projection {
    let mut text = String::with_capacity(markup.len());
    let mut map = ProjectionMap {
        segments: vec![],
        markup_len: markup.len(),
    };

    for node in &doc.nodes {
        match node {
            MarkupNode::Text(sp) => {
                for (piece, rendered) in split_entities(markup, *sp) {
                    let verbatim = rendered == piece.slice(markup);
                    map.push(&rendered, piece, verbatim);
                    text.push_str(&rendered);
                }
            }
            other => {
                let rendered = other.render_plain(markup, mode);
                let verbatim = rendered == other.span().slice(markup);
                map.push(&rendered, other.span(), verbatim);
                text.push_str(&rendered);
            }
        }
    }

    Projection { text, map }
}

/// Plain text only.
pub fn project_text(markup: &str, mode: ProjectionMode) -> String {
    project(markup, mode).text
}

/// Splits a text span into alternating literal runs and character
/// references, each with its decoded rendering.
fn split_entities(src: &str, sp: Span) -> Vec<(Span, String)> {
    let text = sp.slice(src);
    let mut out = vec![];
    let mut last = 0usize;

    for m in entity_regex().find_iter(text) {
        if m.start() > last {
            out.push((
                Span::new(sp.start + last, sp.start + m.start()),
                decode_html_entities(&text[last..m.start()]).into_owned(),
            ));
        }
        out.push((
            Span::new(sp.start + m.start(), sp.start + m.end()),
            decode_html_entities(m.as_str()).into_owned(),
        ));
        last = m.end();
    }
    if last < text.len() {
        out.push((
            Span::new(sp.start + last, sp.end),
            decode_html_entities(&text[last..]).into_owned(),
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsing::render_nodes;
    use pretty_assertions::assert_eq;

    #[test]
    fn link_renders_display_and_maps_to_whole_link() {
        let src = "The [[Sun]] is hot";
        let p = project(src, ProjectionMode::Full);
        assert_eq!(p.text, "The Sun is hot");

        let segs = p.map.segments();
        assert_eq!(segs.len(), 3);
        assert_eq!(segs[1].plain, Span::new(4, 7));
        assert_eq!(segs[1].markup, Span::new(4, 11));
        assert!(!segs[1].verbatim);

        assert_eq!(p.map.to_markup_start(5), 4);
        assert_eq!(p.map.to_markup_end(6), 11);
        assert_eq!(p.map.to_markup_start(8), 12);
        assert_eq!(p.map.to_markup_end(14), 18);
    }

    #[test]
    fn macros_leave_markup_gaps() {
        let src = "a{{x}}b";
        let p = project(src, ProjectionMode::Full);
        assert_eq!(p.text, "ab");
        let segs = p.map.segments();
        assert_eq!(segs.len(), 2);
        assert_eq!(segs[0].markup, Span::new(0, 1));
        assert_eq!(segs[1].markup, Span::new(6, 7));
        assert_eq!(p.map.to_markup_start(1), 6);
    }

    #[test]
    fn entities_are_their_own_segments() {
        let src = "a &amp; b";
        let p = project(src, ProjectionMode::Full);
        assert_eq!(p.text, "a & b");
        let segs = p.map.segments();
        assert_eq!(segs.len(), 3);
        assert!(segs[0].verbatim);
        assert!(!segs[1].verbatim);
        assert_eq!(segs[1].markup, Span::new(2, 7));
        assert_eq!(p.map.to_markup_start(4), 8);
    }

    #[test]
    fn projection_text_matches_rendering() {
        let src = "''a'' [[b|c]] &lt;{{d}}<ref>e</ref>\n{|\n| f\n|}";
        for mode in [ProjectionMode::Full, ProjectionMode::Stripped] {
            let doc = parse_markup(src);
            assert_eq!(project_text(src, mode), render_nodes(&doc.nodes, src, mode));
        }
    }

    #[test]
    fn end_past_text_maps_to_document_end() {
        let src = "abc{{x}}";
        let p = project(src, ProjectionMode::Full);
        assert_eq!(p.map.to_markup_start(3), 8);
        assert_eq!(p.map.to_markup_end(3), 3);
    }

    #[test]
    fn empty_document_has_empty_map() {
        let p = project("", ProjectionMode::Full);
        assert!(p.text.is_empty());
        assert!(p.map.segments().is_empty());
        assert_eq!(p.map.to_markup_start(0), 0);
        assert_eq!(p.map.to_markup_end(0), 0);
    }
}
