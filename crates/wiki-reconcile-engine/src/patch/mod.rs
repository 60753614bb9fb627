//! # Patch Engine
//!
//! Deferred edits against a markup document. A [`Patch`] is a plain value; it
//! re-locates its anchor every time it is applied, so the same patch can be
//! applied, undone and re-applied against any snapshot. A patch whose anchor
//! is gone returns the document unchanged.

pub mod section;

use serde::{Deserialize, Serialize};

use crate::locate::{ExcerptMatch, Locator};

/// An edit that can be applied to a markup document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum Patch {
    /// Replace the markup that renders `excerpt` with `replacement`.
    Replace { excerpt: String, replacement: String },
    /// Replace the body of the section titled `title`.
    Section { title: String, content: String },
    /// Insert a citation right after the markup that renders `context`.
    Citation { context: String, citation: String },
}

impl Patch {
    pub fn replace(excerpt: impl Into<String>, replacement: impl Into<String>) -> Self {
        Patch::Replace {
            excerpt: excerpt.into(),
            replacement: replacement.into(),
        }
    }

    pub fn section(title: impl Into<String>, content: impl Into<String>) -> Self {
        Patch::Section {
            title: title.into(),
            content: content.into(),
        }
    }

    pub fn citation(context: impl Into<String>, citation: impl Into<String>) -> Self {
        Patch::Citation {
            context: context.into(),
            citation: citation.into(),
        }
    }

    /// Applies the patch with the default locator tuning.
    pub fn apply(&self, doc: &str) -> String {
        self.apply_with(&Locator::default(), doc)
    }

    /// Applies the patch, returning a new document. `doc` is never modified.
    pub fn apply_with(&self, locator: &Locator, doc: &str) -> String {
        match self {
            Patch::Replace {
                excerpt,
                replacement,
            } => match locator.locate(excerpt, doc) {
                Some(m) => splice(doc, &m, replacement),
                None => skipped(self, doc),
            },
            Patch::Section { title, content } => {
                section::replace_section(doc, title, content).unwrap_or_else(|| skipped(self, doc))
            }
            Patch::Citation { context, citation } => match locator.locate(context, doc) {
                Some(m) => {
                    let marker = citation_markup(citation);
                    let mut out = String::with_capacity(doc.len() + marker.len());
                    out.push_str(&doc[..m.markup_end]);
                    out.push_str(&marker);
                    out.push_str(&doc[m.markup_end..]);
                    out
                }
                None => skipped(self, doc),
            },
        }
    }

    /// Turns the patch into a reusable function of the document.
    pub fn into_fn(self, locator: Locator) -> impl Fn(&str) -> String + Clone + Send + Sync {
        move |doc: &str| self.apply_with(&locator, doc)
    }
}

fn splice(doc: &str, m: &ExcerptMatch, replacement: &str) -> String {
    let mut out = String::with_capacity(doc.len() + replacement.len());
    out.push_str(&doc[..m.markup_start]);
    out.push_str(replacement);
    out.push_str(&doc[m.markup_end..]);
    out
}

fn skipped(patch: &Patch, doc: &str) -> String {
    log::warn!("Was not patched, anchor not found: {patch:?}");
    doc.to_string()
}

/// Wraps citation text in a `<ref>` tag unless it already is one.
pub fn citation_markup(citation: &str) -> String {
    let citation = citation.trim();
    if citation.starts_with("<ref") {
        citation.to_string()
    } else {
        format!("<ref>{citation}</ref>")
    }
}

/// Patch replacing the markup that renders `excerpt`.
pub fn make_replacement_patch(
    excerpt: impl Into<String>,
    replacement: impl Into<String>,
) -> impl Fn(&str) -> String + Clone + Send + Sync {
    Patch::replace(excerpt, replacement).into_fn(Locator::default())
}

/// Patch replacing the body of a section.
pub fn make_section_patch(
    title: impl Into<String>,
    content: impl Into<String>,
) -> impl Fn(&str) -> String + Clone + Send + Sync {
    Patch::section(title, content).into_fn(Locator::default())
}

/// Patch inserting a citation after the markup that renders `context`.
pub fn make_citation_patch(
    context: impl Into<String>,
    citation: impl Into<String>,
) -> impl Fn(&str) -> String + Clone + Send + Sync {
    Patch::citation(context, citation).into_fn(Locator::default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn replacement_splices_located_span() {
        let doc = "The [[Sun]] is a star. {{cite|x}}";
        let patch = make_replacement_patch("Sun is a star", "Sun is the nearest star");
        assert_eq!(patch(doc), "The Sun is the nearest star. {{cite|x}}");
    }

    #[test]
    fn miss_leaves_document_unchanged() {
        let doc = "Nothing relevant here.";
        let patch = make_replacement_patch("absent words", "x");
        assert_eq!(patch(doc), doc);
    }

    #[test]
    fn patch_is_reusable_across_snapshots() {
        let patch = make_replacement_patch("old", "new");
        assert_eq!(patch("an old thing"), "an new thing");
        assert_eq!(patch("old"), "new");
        assert_eq!(patch("nothing"), "nothing");
    }

    #[test]
    fn citation_inserted_after_context() {
        let doc = "The sky is blue. Grass is green.";
        let patch = make_citation_patch("sky is blue.", "Smith 2020");
        assert_eq!(
            patch(doc),
            "The sky is blue.<ref>Smith 2020</ref> Grass is green."
        );
    }

    #[test]
    fn citation_already_wrapped_is_verbatim() {
        assert_eq!(citation_markup("<ref name=a/>"), "<ref name=a/>");
        assert_eq!(citation_markup(" web "), "<ref>web</ref>");
    }

    #[test]
    fn section_patch_keeps_heading() {
        let doc = "== A ==\nold\n== B ==\nkeep\n";
        let patch = make_section_patch("A", "new");
        assert_eq!(patch(doc), "== A ==\nnew\n\n== B ==\nkeep\n");
        let patch = make_section_patch("Z", "new");
        assert_eq!(patch(doc), doc);
    }
}
