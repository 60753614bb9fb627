//! # Excerpt Locator
//!
//! Finds the markup span whose rendering contains a plain-text excerpt.
//! Three strategies are tried in order and the first hit wins:
//!
//! 1. [`exact`]: the excerpt occurs in the normalized projection; map its start
//!    through the projection map and shrink the end.
//! 2. [`boundary`]: pair raw occurrences of the excerpt's first and last words.
//! 3. [`chunked`]: scan overlapping windows and shrink inside matching ones.
//!
//! Every candidate is verified by re-projecting the raw markup substring, so a
//! returned span always renders to text containing the normalized excerpt.
//! Spans only start and end on [`structure`] cut points. When the excerpt lies
//! wholly inside a link's display text, a tag, a table cell or a heading title,
//! the hit is narrowed into that region.

pub mod boundary;
pub mod chunked;
pub mod exact;
pub mod structure;

use serde::{Deserialize, Serialize};

use crate::{
    parsing::{ParsedDoc, Span, parse_markup},
    projection::{ProjectionMode, normalize_whitespace, project_text},
};
use structure::{Region, Structure};

/// Which strategy produced a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Strategy {
    ExactProjection,
    BoundaryWords,
    ChunkedWindow,
}

/// A byte span into the markup whose rendering contains the excerpt.
///
/// Only valid for the document snapshot it was computed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ExcerptMatch {
    pub markup_start: usize,
    pub markup_end: usize,
    pub strategy: Strategy,
}

impl ExcerptMatch {
    pub fn span(&self) -> Span {
        Span::new(self.markup_start, self.markup_end)
    }

    /// The matched markup.
    pub fn slice<'a>(&self, markup: &'a str) -> &'a str {
        &markup[self.markup_start..self.markup_end]
    }
}

/// Tunable constants of the locator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocatorConfig {
    /// Over-estimate of the markup end, as a multiple of the excerpt length.
    pub exact_end_multiplier: usize,
    /// Longest span the fallback strategies accept, as a multiple of the
    /// excerpt length.
    pub max_span_multiplier: usize,
    /// Window length in bytes for the chunked scan.
    pub window_size: usize,
    /// Overlap between consecutive windows in bytes.
    pub window_overlap: usize,
    /// Projection used for matching and verification.
    pub mode: ProjectionMode,
}

impl Default for LocatorConfig {
    fn default() -> Self {
        Self {
            exact_end_multiplier: 3,
            max_span_multiplier: 5,
            window_size: 1000,
            window_overlap: 200,
            mode: ProjectionMode::Full,
        }
    }
}

/// Excerpt locator with its tuning.
#[derive(Debug, Clone, Default)]
pub struct Locator {
    config: LocatorConfig,
}

impl Locator {
    pub fn new(config: LocatorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &LocatorConfig {
        &self.config
    }

    /// Locates `excerpt` in `markup`.
    ///
    /// Returns `None` when the excerpt is empty after normalization, the
    /// document is empty, or no strategy finds it.
    pub fn locate(&self, excerpt: &str, markup: &str) -> Option<ExcerptMatch> {
        let needle = normalize_whitespace(excerpt);
        if needle.is_empty() || markup.is_empty() {
            log::debug!("locate: empty excerpt or document, nothing to find");
            return None;
        }
        let search = Search::new(markup, &needle, &self.config);

        let hit = exact::locate(&search)
            .or_else(|| {
                log::debug!("locate: exact projection missed {needle:?}");
                boundary::locate(&search)
            })
            .or_else(|| {
                log::debug!("locate: boundary words missed {needle:?}");
                chunked::locate(&search)
            });

        match hit {
            Some(m) => {
                log::debug!("locate: {:?} hit at {:?}", m.strategy, m.span());
                Some(narrow(&search, m))
            }
            None => {
                log::debug!("locate: no strategy found {needle:?}");
                None
            }
        }
    }
}

/// Moves a hit into the smallest nested region that still renders the needle.
fn narrow(search: &Search<'_>, m: ExcerptMatch) -> ExcerptMatch {
    let Some(region) = search
        .structure
        .inner_within(m.span())
        .filter(|r| search.renders(r.bounds.start, r.bounds.end))
        .min_by_key(|r| r.bounds.len())
    else {
        return m;
    };

    let start = sweep_start(search, region, region.bounds.start, region.bounds.end);
    let end = sweep_end(search, region, start, region.bounds.end);
    log::debug!("locate: narrowed {:?} to {start}..{end}", m.span());
    search.matched(start, end, m.strategy)
}

/// Locates `excerpt` in `markup` with the default tuning.
pub fn locate(excerpt: &str, markup: &str) -> Option<ExcerptMatch> {
    Locator::default().locate(excerpt, markup)
}

/// State shared by the strategies for one locate call.
pub(crate) struct Search<'a> {
    pub markup: &'a str,
    /// Whitespace-normalized, non-empty excerpt.
    pub needle: &'a str,
    pub config: &'a LocatorConfig,
    pub doc: ParsedDoc,
    pub structure: Structure,
}

impl<'a> Search<'a> {
    pub fn new(markup: &'a str, needle: &'a str, config: &'a LocatorConfig) -> Self {
        let doc = parse_markup(markup);
        let structure = Structure::new(markup, &doc);
        Self {
            markup,
            needle,
            config,
            doc,
            structure,
        }
    }

    /// Whether `markup[start..end]` renders to text containing the needle.
    pub fn renders(&self, start: usize, end: usize) -> bool {
        renders_excerpt(self.markup, start, end, self.needle, self.config.mode)
    }

    /// Upper bound on a fallback span length.
    pub fn max_span(&self) -> usize {
        self.config.max_span_multiplier * self.needle.len()
    }

    fn matched(&self, start: usize, end: usize, strategy: Strategy) -> ExcerptMatch {
        ExcerptMatch {
            markup_start: start,
            markup_end: end,
            strategy,
        }
    }
}

/// Re-projects `markup[start..end]` and checks that its normalized text
/// contains `needle` (which must already be normalized).
pub fn renders_excerpt(
    markup: &str,
    start: usize,
    end: usize,
    needle: &str,
    mode: ProjectionMode,
) -> bool {
    if start >= end {
        return false;
    }
    normalize_whitespace(&project_text(&markup[start..end], mode)).contains(needle)
}

/// Sweeps `start` forward over the region's cut points while
/// `start..end` still renders the needle.
pub(crate) fn sweep_start(search: &Search<'_>, region: &Region, start: usize, end: usize) -> usize {
    let mut start = start;
    loop {
        let candidate = region.ceil_cut(next_boundary(search.markup, start));
        if candidate >= end || !search.renders(candidate, end) {
            return start;
        }
        start = candidate;
    }
}

/// Sweeps `end` backward over the region's cut points while `start..end`
/// still renders the needle.
pub(crate) fn sweep_end(search: &Search<'_>, region: &Region, start: usize, end: usize) -> usize {
    let mut end = end;
    loop {
        let candidate = region.floor_cut(prev_boundary(search.markup, end));
        if candidate <= start || !search.renders(start, candidate) {
            return end;
        }
        end = candidate;
    }
}

/// Largest char boundary `<= i` (clamped to the string).
pub(crate) fn floor_boundary(s: &str, i: usize) -> usize {
    let mut i = i.min(s.len());
    while !s.is_char_boundary(i) {
        i -= 1;
    }
    i
}

/// Smallest char boundary `>= i` (clamped to the string).
pub(crate) fn ceil_boundary(s: &str, i: usize) -> usize {
    let mut i = i.min(s.len());
    while !s.is_char_boundary(i) {
        i += 1;
    }
    i
}

/// The char boundary just before `i`, or 0.
pub(crate) fn prev_boundary(s: &str, i: usize) -> usize {
    if i == 0 {
        return 0;
    }
    floor_boundary(s, i - 1)
}

/// The char boundary just after `i`, or the string length.
pub(crate) fn next_boundary(s: &str, i: usize) -> usize {
    ceil_boundary(s, i + 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_inputs_find_nothing() {
        assert_eq!(locate("", "some text"), None);
        assert_eq!(locate("   \n", "some text"), None);
        assert_eq!(locate("text", ""), None);
    }

    #[test]
    fn boundaries_step_over_multibyte_chars() {
        let s = "aéb";
        assert_eq!(floor_boundary(s, 2), 1);
        assert_eq!(ceil_boundary(s, 2), 3);
        assert_eq!(prev_boundary(s, 3), 1);
        assert_eq!(next_boundary(s, 1), 3);
        assert_eq!(next_boundary(s, 4), 4);
        assert_eq!(prev_boundary(s, 0), 0);
    }

    #[test]
    fn renders_excerpt_normalizes_whitespace() {
        let src = "a [[b]]\n\n c";
        assert!(renders_excerpt(src, 0, src.len(), "a b c", ProjectionMode::Full));
        assert!(!renders_excerpt(src, 0, 3, "a b", ProjectionMode::Full));
        assert!(!renders_excerpt(src, 3, 3, "b", ProjectionMode::Full));
    }

    #[test]
    fn default_config_values() {
        let c = LocatorConfig::default();
        assert_eq!(c.exact_end_multiplier, 3);
        assert_eq!(c.max_span_multiplier, 5);
        assert_eq!(c.window_size, 1000);
        assert_eq!(c.window_overlap, 200);
        assert_eq!(c.mode, ProjectionMode::Full);
    }
}
