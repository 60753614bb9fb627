//! # Diff Segmentation Engine
//!
//! Turns an (original, revised) pair of plain texts into a short list of
//! reviewable changes:
//!
//! 1. [`opcodes`]: character-level diff as a gapless opcode cover
//! 2. [`merge`]: one pass folding `change, short equal, change` into one change
//! 3. [`descriptor`]: whitespace filtering, classification and context strings
//!
//! [`anchor`] then turns a change into a replacement that can be applied to
//! the document the original text was rendered from.

pub mod anchor;
pub mod descriptor;
pub mod merge;
pub mod opcodes;

use std::ops::Range;

use serde::{Deserialize, Serialize};

use crate::parsing::Span;

pub use anchor::{EditAnchor, anchor};

/// Opcode kind of the character-level diff.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OpKind {
    Equal,
    Insert,
    Delete,
    Replace,
}

/// One opcode; `orig` and `rev` are char-index ranges.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeOpcode {
    pub kind: OpKind,
    pub orig: Range<usize>,
    pub rev: Range<usize>,
}

/// Kind of a reviewable change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeKind {
    Insert,
    Delete,
    Replace,
}

/// A reviewable change between two texts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeDescriptor {
    pub kind: ChangeKind,
    /// Byte span of the change in the original text.
    pub orig_span: Span,
    /// Byte span of the change in the revised text.
    pub rev_span: Span,
    pub original: String,
    pub revised: String,
    /// Original text around the change, the change marked `[-...-]`.
    pub orig_context: String,
    /// Revised text around the change, the change marked `{+...+}`.
    pub rev_context: String,
}

/// Tunable constants of the segmenter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SegmentConfig {
    /// Longest equal run (in chars) absorbed between two changes.
    pub merge_gap: usize,
    /// Chars of context shown on each side of a change.
    pub context_width: usize,
}

impl Default for SegmentConfig {
    fn default() -> Self {
        Self {
            merge_gap: 10,
            context_width: 60,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Segmenter {
    config: SegmentConfig,
}

impl Segmenter {
    pub fn new(config: SegmentConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SegmentConfig {
        &self.config
    }

    /// Diff opcodes after short-gap merging; still a gapless cover.
    pub fn opcodes(&self, original: &str, revised: &str) -> Vec<ChangeOpcode> {
        merge::merge_short_gaps(
            opcodes::diff_opcodes(original, revised),
            self.config.merge_gap,
        )
    }

    /// Reviewable changes from `original` to `revised`.
    pub fn segment(&self, original: &str, revised: &str) -> Vec<ChangeDescriptor> {
        let ops = self.opcodes(original, revised);
        let changes = descriptor::describe(original, revised, &ops, self.config.context_width);
        log::debug!(
            "segment: {} opcodes, {} reviewable changes",
            ops.len(),
            changes.len()
        );
        changes
    }
}

/// Segments with the default tuning.
pub fn segment(original: &str, revised: &str) -> Vec<ChangeDescriptor> {
    Segmenter::default().segment(original, revised)
}
