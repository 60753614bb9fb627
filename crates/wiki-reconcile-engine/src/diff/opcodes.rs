use std::ops::Range;

use similar::{DiffTag, TextDiff};

use super::{ChangeOpcode, OpKind};

/// Character-level opcodes covering both strings without gaps.
///
/// Ranges are char indices. Adjacent non-equal ops are folded into one, so
/// changes and equal runs strictly alternate.
pub fn diff_opcodes(original: &str, revised: &str) -> Vec<ChangeOpcode> {
    let diff = TextDiff::from_chars(original, revised);
    let mut out: Vec<ChangeOpcode> = Vec::with_capacity(diff.ops().len());

    for op in diff.ops() {
        let (tag, orig, rev) = op.as_tag_tuple();
        if orig.is_empty() && rev.is_empty() {
            continue;
        }
        let kind = match tag {
            DiffTag::Equal => OpKind::Equal,
            DiffTag::Delete => OpKind::Delete,
            DiffTag::Insert => OpKind::Insert,
            DiffTag::Replace => OpKind::Replace,
        };
        push_folded(&mut out, ChangeOpcode { kind, orig, rev });
    }
    out
}

fn push_folded(out: &mut Vec<ChangeOpcode>, op: ChangeOpcode) {
    if let Some(last) = out.last_mut()
        && (last.kind == OpKind::Equal) == (op.kind == OpKind::Equal)
    {
        last.orig.end = op.orig.end;
        last.rev.end = op.rev.end;
        if last.kind != OpKind::Equal {
            last.kind = change_kind(&last.orig, &last.rev);
        }
        return;
    }
    out.push(op);
}

/// Kind of a non-equal op from the sizes of its two sides.
pub(crate) fn change_kind(orig: &Range<usize>, rev: &Range<usize>) -> OpKind {
    match (orig.is_empty(), rev.is_empty()) {
        (true, _) => OpKind::Insert,
        (false, true) => OpKind::Delete,
        (false, false) => OpKind::Replace,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(a: &str, b: &str) -> Vec<OpKind> {
        diff_opcodes(a, b).iter().map(|op| op.kind).collect()
    }

    #[test]
    fn identical_strings_are_one_equal_run() {
        assert_eq!(kinds("same", "same"), vec![OpKind::Equal]);
    }

    #[test]
    fn empty_inputs() {
        assert!(diff_opcodes("", "").is_empty());
        assert_eq!(kinds("", "ab"), vec![OpKind::Insert]);
        assert_eq!(kinds("ab", ""), vec![OpKind::Delete]);
    }

    #[test]
    fn ranges_are_char_indices() {
        let ops = diff_opcodes("café au lait", "café noir");
        assert_eq!(ops[0].kind, OpKind::Equal);
        assert_eq!(ops[0].orig, 0..5);
        let last = ops.last().expect("ops");
        assert_eq!(last.orig.end, "café au lait".chars().count());
        assert_eq!(last.rev.end, "café noir".chars().count());
    }

    #[test]
    fn delete_then_insert_folds_into_replace() {
        let ops = diff_opcodes("abc", "axc");
        assert_eq!(
            ops.iter().map(|o| o.kind).collect::<Vec<_>>(),
            vec![OpKind::Equal, OpKind::Replace, OpKind::Equal]
        );
        assert_eq!(ops[1].orig, 1..2);
        assert_eq!(ops[1].rev, 1..2);
    }
}
