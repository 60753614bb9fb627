use serde::{Deserialize, Serialize};

use super::{ChangeDescriptor, ChangeKind};
use crate::projection::normalize_whitespace;

/// A change rewritten as a replacement whose excerpt occurs exactly once in
/// the original text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditAnchor {
    pub excerpt: String,
    pub replacement: String,
}

/// Grows a delete or replace by whole words of `original` on both sides
/// until its excerpt is unique, carrying the same words into the
/// replacement. Gives up once either side has grown past `width` bytes.
///
/// Insertions have nothing to grow from and yield `None`. Deletions anchor on
/// the deleted text without its surrounding whitespace.
pub fn anchor(original: &str, change: &ChangeDescriptor, width: usize) -> Option<EditAnchor> {
    let span = change.orig_span;
    let (core_start, core_end, middle) = match change.kind {
        ChangeKind::Insert => return None,
        ChangeKind::Delete => {
            let text = span.slice(original);
            let lead = text.len() - text.trim_start().len();
            let trail = text.len() - text.trim_end().len();
            (span.start + lead, span.end - trail, "")
        }
        ChangeKind::Replace => (span.start, span.end, change.revised.as_str()),
    };

    let haystack = normalize_whitespace(original);
    let (mut lo, mut hi) = (core_start, core_end);
    loop {
        let excerpt = &original[lo..hi];
        match occurrences(&haystack, &normalize_whitespace(excerpt)) {
            0 => return None,
            1 => {
                return Some(EditAnchor {
                    excerpt: excerpt.to_string(),
                    replacement: format!(
                        "{}{middle}{}",
                        &original[lo..core_start],
                        &original[core_end..hi]
                    ),
                });
            }
            _ => {}
        }

        let (next_lo, next_hi) = (word_before(original, lo), word_after(original, hi));
        if (next_lo, next_hi) == (lo, hi)
            || core_start - next_lo > width
            || next_hi - core_end > width
        {
            log::debug!("anchor: {excerpt:?} is still ambiguous, change left unanchored");
            return None;
        }
        lo = next_lo;
        hi = next_hi;
    }
}

/// Start of the word before `i`, skipping whitespace first.
fn word_before(s: &str, i: usize) -> usize {
    s[..i]
        .trim_end()
        .trim_end_matches(|c: char| !c.is_whitespace())
        .len()
}

/// End of the word after `i`, skipping whitespace first.
fn word_after(s: &str, i: usize) -> usize {
    let rest = s[i..]
        .trim_start()
        .trim_start_matches(|c: char| !c.is_whitespace());
    s.len() - rest.len()
}

/// Counts possibly overlapping occurrences, stopping at two.
fn occurrences(haystack: &str, needle: &str) -> usize {
    let Some(first) = needle.chars().next() else {
        return 0;
    };
    let mut count = 0;
    let mut from = 0;
    while let Some(i) = haystack[from..].find(needle) {
        count += 1;
        if count > 1 {
            break;
        }
        from += i + first.len_utf8();
    }
    count
}
