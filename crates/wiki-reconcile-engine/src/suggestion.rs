//! Reviewable suggestion records and the guardrails that filter their inputs.
//!
//! A suggestion pairs a human-facing description with the [`Patch`] that
//! applies it. The kind carries exactly the typed fields its refinement flow
//! needs.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::{
    diff::{ChangeDescriptor, ChangeKind, EditAnchor, SegmentConfig, anchor},
    parsing::kinds::WikiLink,
    patch::Patch,
};

/// Review state of a suggestion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    #[default]
    Pending,
    Accepted,
    Rejected,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum SuggestionKind {
    /// A change found by diffing the article against a revision derived from
    /// source `source_index`. `anchor` is the change widened to text that
    /// occurs once in the article.
    ContentEdit {
        source_index: usize,
        change: ChangeDescriptor,
        #[serde(default)]
        anchor: Option<EditAnchor>,
    },
    /// A non-neutral term and its neutral alternative (may be empty).
    Neutrality { term: String, alternative: String },
    /// A term to link to an article.
    Hyperlink {
        term: String,
        article: String,
        reasoning: String,
    },
    /// A citation to insert after `context`.
    Citation { context: String, citation: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    pub id: Uuid,
    pub status: Status,
    /// Surrounding text shown to the reviewer.
    pub context: String,
    pub kind: SuggestionKind,
}

impl Suggestion {
    pub fn new(kind: SuggestionKind, context: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            status: Status::Pending,
            context: context.into(),
            kind,
        }
    }

    /// One suggestion per reviewable change of `original`, with the
    /// original-side context (revised-side for insertions).
    pub fn content_edits(
        source_index: usize,
        original: &str,
        changes: Vec<ChangeDescriptor>,
    ) -> Vec<Self> {
        let width = SegmentConfig::default().context_width;
        changes
            .into_iter()
            .map(|change| {
                let context = match change.kind {
                    ChangeKind::Insert => change.rev_context.clone(),
                    ChangeKind::Delete | ChangeKind::Replace => change.orig_context.clone(),
                };
                let anchor = anchor(original, &change, width);
                Self::new(
                    SuggestionKind::ContentEdit {
                        source_index,
                        change,
                        anchor,
                    },
                    context,
                )
            })
            .collect()
    }

    /// A hyperlink suggestion for `term`, if the guardrail accepts it.
    ///
    /// The context is the first sentence of `markup` containing the term.
    pub fn hyperlink(
        markup: &str,
        term: &str,
        article: &str,
        reasoning: &str,
    ) -> Result<Self, LinkRejection> {
        check_link_candidate(markup, term)?;
        let sentence = sentences_containing(markup, term)
            .into_iter()
            .next()
            .unwrap_or_default();
        Ok(Self::new(
            SuggestionKind::Hyperlink {
                term: term.to_string(),
                article: article.to_string(),
                reasoning: reasoning.to_string(),
            },
            format!("Featured in this sentence: {sentence}.\nReasoning: {reasoning}"),
        ))
    }

    /// Short label for the kind of suggestion.
    pub fn label(&self) -> String {
        match &self.kind {
            SuggestionKind::ContentEdit { source_index, .. } => {
                format!("Edit (with source {source_index})")
            }
            SuggestionKind::Neutrality { .. } => "Neutrality".to_string(),
            SuggestionKind::Hyperlink { .. } => "Add hyperlinking".to_string(),
            SuggestionKind::Citation { .. } => "Add citation".to_string(),
        }
    }

    /// Human-readable description of the edit.
    pub fn summary(&self) -> String {
        match &self.kind {
            SuggestionKind::ContentEdit { change, .. } => match change.kind {
                ChangeKind::Replace => {
                    format!("Replace '{}' with '{}'", change.original, change.revised)
                }
                ChangeKind::Delete => format!("Delete '{}'", change.original),
                ChangeKind::Insert => format!("Insert '{}'", change.revised),
            },
            SuggestionKind::Neutrality { term, alternative } if alternative.is_empty() => {
                format!("Remove '{term}'")
            }
            SuggestionKind::Neutrality { term, alternative } => {
                format!("Replace '{term}' with '{alternative}'")
            }
            SuggestionKind::Hyperlink { term, article, .. } => {
                format!("Link '{term}' to article '{article}'")
            }
            SuggestionKind::Citation { citation, .. } => format!("Add citation '{citation}'"),
        }
    }

    /// The executable edit, if the suggestion has an anchor in the article.
    ///
    /// Insertions found by diffing, and changes whose text stays ambiguous,
    /// have no anchor and yield `None`.
    pub fn patch(&self) -> Option<Patch> {
        match &self.kind {
            SuggestionKind::ContentEdit { anchor, .. } => anchor
                .as_ref()
                .map(|a| Patch::replace(&a.excerpt, &a.replacement)),
            SuggestionKind::Neutrality { term, alternative } => {
                Some(Patch::replace(term, alternative))
            }
            SuggestionKind::Hyperlink { term, article, .. } => {
                Some(Patch::replace(term, link_markup(term, article)))
            }
            SuggestionKind::Citation { context, citation } => {
                Some(Patch::citation(context, citation))
            }
        }
    }

    pub fn accept(&mut self) {
        self.status = Status::Accepted;
    }

    pub fn reject(&mut self) {
        self.status = Status::Rejected;
    }

    /// A follow-up suggestion after reviewer feedback: fresh id, pending, the
    /// reviewer's note appended to the context.
    pub fn refined(&self, kind: SuggestionKind, note: &str) -> Self {
        Self::new(kind, format!("{}\n> User: {note}", self.context))
    }
}

/// Markup linking `term` to `article`.
pub fn link_markup(term: &str, article: &str) -> String {
    WikiLink::markup(article, term)
}

/// Why a hyperlink candidate was refused.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LinkRejection {
    #[error("Term '{term}' was not found in the article")]
    TermNotFound { term: String },

    #[error("Term '{term}' is already linked")]
    AlreadyLinked { term: String },

    #[error("Term '{term}' is already the target of a link")]
    AlreadyLinkTarget { term: String },
}

/// Refuses link candidates absent from the markup or already linked.
pub fn check_link_candidate(markup: &str, term: &str) -> Result<(), LinkRejection> {
    let rejection = if !markup.contains(term) {
        LinkRejection::TermNotFound {
            term: term.to_string(),
        }
    } else if markup.contains(&WikiLink::closing(term)) {
        LinkRejection::AlreadyLinked {
            term: term.to_string(),
        }
    } else if markup.contains(&WikiLink::opening(term)) {
        LinkRejection::AlreadyLinkTarget {
            term: term.to_string(),
        }
    } else {
        return Ok(());
    };
    log::debug!("{rejection}");
    Err(rejection)
}

/// Keeps only the items whose term occurs in `text`.
pub fn retain_present_terms<T>(text: &str, items: Vec<T>, term: impl Fn(&T) -> &str) -> Vec<T> {
    items
        .into_iter()
        .filter(|item| {
            let present = text.contains(term(item));
            if !present {
                log::debug!("Term '{}' was not found in original text", term(item));
            }
            present
        })
        .collect()
}

/// The trimmed `.`-delimited sentences of `text` that contain `words`.
pub fn sentences_containing(text: &str, words: &str) -> Vec<String> {
    text.split('.')
        .filter(|sentence| sentence.contains(words))
        .map(|sentence| sentence.trim().to_string())
        .collect()
}
