use super::{ChangeOpcode, OpKind, opcodes::change_kind};

/// Merges `change, equal(<= gap chars), change` into a single change.
///
/// One left-to-right pass: a merged change stays the last output op, so a
/// chain of short gaps collapses in the same pass.
pub fn merge_short_gaps(ops: Vec<ChangeOpcode>, gap: usize) -> Vec<ChangeOpcode> {
    let mut out: Vec<ChangeOpcode> = Vec::with_capacity(ops.len());
    let mut iter = ops.into_iter().peekable();

    while let Some(op) = iter.next() {
        if op.kind == OpKind::Equal
            && op.orig.len() <= gap
            && let Some(last) = out.last_mut()
            && last.kind != OpKind::Equal
            && let Some(next) = iter.next_if(|n| n.kind != OpKind::Equal)
        {
            log::trace!(
                "merge: absorbing equal gap {:?} between changes",
                op.orig
            );
            last.orig.end = next.orig.end;
            last.rev.end = next.rev.end;
            last.kind = change_kind(&last.orig, &last.rev);
            continue;
        }
        out.push(op);
    }
    out
}
