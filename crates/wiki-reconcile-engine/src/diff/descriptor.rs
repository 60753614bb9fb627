use std::ops::Range;

use super::{ChangeDescriptor, ChangeKind, ChangeOpcode, OpKind};
use crate::parsing::Span;

const ORIG_OPEN: &str = "[-";
const ORIG_CLOSE: &str = "-]";
const REV_OPEN: &str = "{+";
const REV_CLOSE: &str = "+}";
const ELLIPSIS: &str = "...";

/// Byte offsets of every char start, plus the total length.
fn char_offsets(s: &str) -> Vec<usize> {
    s.char_indices()
        .map(|(i, _)| i)
        .chain(std::iter::once(s.len()))
        .collect()
}

/// Turns merged opcodes into descriptors, dropping whitespace-only changes.
pub fn describe(
    original: &str,
    revised: &str,
    ops: &[ChangeOpcode],
    context_width: usize,
) -> Vec<ChangeDescriptor> {
    let orig_offsets = char_offsets(original);
    let rev_offsets = char_offsets(revised);

    ops.iter()
        .filter(|op| op.kind != OpKind::Equal)
        .filter_map(|op| {
            let orig_span = byte_span(&orig_offsets, &op.orig);
            let rev_span = byte_span(&rev_offsets, &op.rev);
            let orig_text = orig_span.slice(original);
            let rev_text = rev_span.slice(revised);

            let kind = match (orig_text.trim().is_empty(), rev_text.trim().is_empty()) {
                (true, true) => {
                    log::trace!("segment: dropping whitespace-only change at {:?}", op.orig);
                    return None;
                }
                (true, false) => ChangeKind::Insert,
                (false, true) => ChangeKind::Delete,
                (false, false) => ChangeKind::Replace,
            };

            Some(ChangeDescriptor {
                kind,
                orig_span,
                rev_span,
                original: orig_text.to_string(),
                revised: rev_text.to_string(),
                orig_context: context(
                    original,
                    &orig_offsets,
                    &op.orig,
                    context_width,
                    (ORIG_OPEN, ORIG_CLOSE),
                ),
                rev_context: context(
                    revised,
                    &rev_offsets,
                    &op.rev,
                    context_width,
                    (REV_OPEN, REV_CLOSE),
                ),
            })
        })
        .collect()
}

fn byte_span(offsets: &[usize], chars: &Range<usize>) -> Span {
    Span::new(offsets[chars.start], offsets[chars.end])
}

/// Renders `width` chars either side of the change with the change marked.
fn context(
    text: &str,
    offsets: &[usize],
    chars: &Range<usize>,
    width: usize,
    (open, close): (&str, &str),
) -> String {
    let char_count = offsets.len() - 1;
    let before = chars.start.saturating_sub(width);
    let after = (chars.end + width).min(char_count);

    let mut out = String::new();
    if before > 0 {
        out.push_str(ELLIPSIS);
    }
    out.push_str(&text[offsets[before]..offsets[chars.start]]);
    out.push_str(open);
    out.push_str(&text[offsets[chars.start]..offsets[chars.end]]);
    out.push_str(close);
    out.push_str(&text[offsets[chars.end]..offsets[after]]);
    if after < char_count {
        out.push_str(ELLIPSIS);
    }
    out
}
